//! Common utilities for the laxml crates.
//!
//! This crate provides shared infrastructure used by the tokenizer and tree crates:
//! - **Warning System** - deduplicated recovery warnings routed through `tracing`

pub mod warning;
