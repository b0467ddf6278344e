//! Attribute Codec
//!
//! Decoders from raw attribute strings to typed configuration values. No
//! decoder ever fails: an unresolvable symbol simply yields nothing, and the
//! key is omitted from the assembled configuration.

use crate::config::ConfigValue;
use crate::globals::GlobalRegistry;

/// Decoding policy for one attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoder {
    /// Pass the string through unchanged
    Identity,
    /// The literal `"false"` becomes `false`; anything else passes through
    FalseOrString,
    /// `"true"`/`"false"` become booleans; anything else passes through
    BooleanOrString,
    /// All-digit values become integers; anything else passes through
    NumberOrString,
    /// Resolve through the global symbol registry
    GlobalSymbol,
}

impl Decoder {
    /// Decode a raw attribute value
    pub fn decode(&self, raw: &str, globals: &GlobalRegistry) -> Option<ConfigValue> {
        match self {
            Self::Identity => Some(ConfigValue::Str(raw.to_string())),
            Self::FalseOrString => Some(if raw == "false" {
                ConfigValue::Bool(false)
            } else {
                ConfigValue::Str(raw.to_string())
            }),
            Self::BooleanOrString => Some(match raw {
                "true" => ConfigValue::Bool(true),
                "false" => ConfigValue::Bool(false),
                other => ConfigValue::Str(other.to_string()),
            }),
            Self::NumberOrString => {
                if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
                    // Out-of-range digit strings keep their string form.
                    Some(
                        raw.parse::<i64>()
                            .map(ConfigValue::Int)
                            .unwrap_or_else(|_| ConfigValue::Str(raw.to_string())),
                    )
                } else {
                    Some(ConfigValue::Str(raw.to_string()))
                }
            }
            Self::GlobalSymbol => globals.resolve(raw).and_then(ConfigValue::from_global),
        }
    }
}
