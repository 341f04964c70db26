//! Tokenizer configuration.

use serde::{Deserialize, Serialize};

use crate::pairs::AttributeErrorPolicy;
use crate::token::{DEFAULT_ROOT_ELEMENT, XHTML_TRANSITIONAL_EXTERNAL_ID};

/// Policy knobs for [`Tokenizer`](crate::Tokenizer).
///
/// Deserializes from partial JSON; missing fields take their defaults:
///
/// ```
/// let options: laxml_tokenizer::TokenizerOptions =
///     serde_json::from_str(r#"{ "attribute_errors": "propagate" }"#).unwrap();
/// assert_eq!(options.default_root_element, "html");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerOptions {
    /// How attribute parsing reacts to a failing source.
    pub attribute_errors: AttributeErrorPolicy,
    /// Root element for doctypes that do not name one.
    pub default_root_element: String,
    /// External identifier for doctypes without a `PUBLIC`/`SYSTEM` part.
    pub default_external_id: String,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            attribute_errors: AttributeErrorPolicy::default(),
            default_root_element: DEFAULT_ROOT_ELEMENT.to_owned(),
            default_external_id: XHTML_TRANSITIONAL_EXTERNAL_ID.to_owned(),
        }
    }
}
