//! Error types for the rules crate.

use thiserror::Error;

/// Errors that can occur while parsing a rule spec string.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The rule name is not one of the supported rules.
    #[error("unknown validation rule '{0}'")]
    UnknownRule(String),

    /// The rule requires an argument but none was given.
    #[error("rule '{rule}' requires an argument")]
    MissingArg { rule: String },

    /// The rule's argument could not be parsed.
    #[error("rule '{rule}' has an invalid argument '{arg}'")]
    BadArg { rule: String, arg: String },

    /// The `matches` rule was given an invalid regular expression.
    #[error("invalid pattern for 'matches' rule: {0}")]
    BadPattern(#[from] regex::Error),
}

/// A failed rule check: which rule rejected the value, and why.
///
/// The reason is human-readable and includes the offending value, so it
/// can be appended to a diagnostics log as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{rule}: {reason}")]
pub struct Violation {
    /// Name of the rule that failed.
    pub rule: &'static str,
    /// Human-readable explanation, including the offending value.
    pub reason: String,
}

impl Violation {
    pub(crate) fn new(rule: &'static str, reason: impl Into<String>) -> Self {
        Violation {
            rule,
            reason: reason.into(),
        }
    }
}
