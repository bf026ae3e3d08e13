//! Rules - validation rule engine for scraped field values.
//!
//! A [`RuleSet`] is parsed from a compact, pipe-delimited spec string and
//! then checked against raw string values. Each rule is a closed enum
//! variant, so dispatch is a plain `match` rather than string-keyed
//! lookup at check time.
//!
//! # Quick Start
//!
//! ```rust
//! use skimmer_rules::RuleSet;
//!
//! let rules = RuleSet::parse("integer|min:1").unwrap();
//!
//! assert!(rules.check("42").is_ok());
//!
//! let violation = rules.check("zero").unwrap_err();
//! assert_eq!(violation.rule, "integer");
//! ```
//!
//! # Rule spec grammar
//!
//! A spec is one or more rules separated by `|`. A rule is a name,
//! optionally followed by `:` and an argument:
//!
//! ```text
//! "required|integer|min:1|max:99"
//! "in:red,green,blue"
//! "matches:^[A-Z]{2}-\d+$"
//! ```
//!
//! | Rule | Argument | Passes when |
//! |------|----------|-------------|
//! | `required` | - | value is not blank |
//! | `integer` | - | value parses as `i64` |
//! | `numeric` | - | value parses as `f64` |
//! | `alpha` | - | value is non-empty and alphabetic |
//! | `alpha_num` | - | value is non-empty and alphanumeric |
//! | `email` | - | value looks like an email address |
//! | `url` | - | value is an absolute http(s) URL |
//! | `min` | number | numeric value >= argument |
//! | `max` | number | numeric value <= argument |
//! | `length_min` | integer | character count >= argument |
//! | `length_max` | integer | character count <= argument |
//! | `in` | comma list | value is one of the listed strings |
//! | `matches` | regex | value matches the pattern |

mod error;
mod rule;

pub use error::{RuleError, Violation};
pub use rule::{Rule, RuleSet};
