//! Key-value pair parsing for attribute lists.
//!
//! - [`config`] - pluggable character classification
//! - [`parser`] - the pair state machine
//! - [`assembler`] - continuation merging and error policy

/// Attribute-list assembly and the I/O error policy.
pub mod assembler;
/// Character classification predicates.
pub mod config;
/// The key-value pair state machine.
pub mod parser;

pub use assembler::{AttributeErrorPolicy, assemble, parse_attributes};
pub use config::{CharClassConfig, DefaultConfig};
pub use parser::{KeyValuePairParser, RawPair};
