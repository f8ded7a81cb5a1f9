//! Proxy state classification
//!
//! The platform tool reports on/off state in several spellings ("Yes",
//! "Enabled", "1" has not been observed but booleans have). This module
//! canonicalizes them into a plain `bool` before anyone else sees them.

/// A value that may describe an on/off state.
///
/// Conversions exist for the shapes the platform and callers actually
/// produce; anything that is not recognizably "on" classifies as off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnabledValue {
    /// A boolean state
    Bool(bool),
    /// A textual state such as "Yes" or "off"
    Text(String),
    /// A numeric state
    Number(i64),
    /// No state at all
    Missing,
}

impl From<bool> for EnabledValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for EnabledValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for EnabledValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for EnabledValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl<T: Into<EnabledValue>> From<Option<T>> for EnabledValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Self::Missing,
        }
    }
}

/// Words that indicate the intention is for something to be on.
const ON_WORDS: [&str; 4] = ["true", "yes", "on", "enabled"];

/// Decide whether a value represents an "on" state.
///
/// Strings match case-insensitively against `true`, `yes`, `on`, and
/// `enabled`; the boolean `true` matches; every other value, including
/// numbers and missing values, is off.
pub fn is_enabled<V: Into<EnabledValue>>(value: V) -> bool {
    match value.into() {
        EnabledValue::Bool(state) => state,
        EnabledValue::Text(text) => ON_WORDS.iter().any(|word| text.eq_ignore_ascii_case(word)),
        EnabledValue::Number(_) | EnabledValue::Missing => false,
    }
}
