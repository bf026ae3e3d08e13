//! Rule variants and rule-set parsing.

use regex::Regex;

use crate::error::{RuleError, Violation};

/// A single validation rule.
///
/// Rules are checked against the *raw* extracted string value, before
/// any transform has been applied to it.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Value must not be blank.
    Required,
    /// Value must parse as a signed 64-bit integer.
    Integer,
    /// Value must parse as a floating point number.
    Numeric,
    /// Value must be non-empty and contain only alphabetic characters.
    Alpha,
    /// Value must be non-empty and contain only alphanumeric characters.
    AlphaNum,
    /// Value must look like an email address.
    Email,
    /// Value must be an absolute http or https URL.
    Url,
    /// Numeric value must be greater than or equal to the bound.
    Min(f64),
    /// Numeric value must be less than or equal to the bound.
    Max(f64),
    /// Character count must be at least the bound.
    LengthMin(usize),
    /// Character count must be at most the bound.
    LengthMax(usize),
    /// Value must be one of the listed strings.
    In(Vec<String>),
    /// Value must match the regular expression.
    Matches(Regex),
}

impl Rule {
    /// Returns the canonical name of this rule, as used in spec strings.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Integer => "integer",
            Rule::Numeric => "numeric",
            Rule::Alpha => "alpha",
            Rule::AlphaNum => "alpha_num",
            Rule::Email => "email",
            Rule::Url => "url",
            Rule::Min(_) => "min",
            Rule::Max(_) => "max",
            Rule::LengthMin(_) => "length_min",
            Rule::LengthMax(_) => "length_max",
            Rule::In(_) => "in",
            Rule::Matches(_) => "matches",
        }
    }

    /// Checks a raw value against this rule.
    pub fn check(&self, value: &str) -> Result<(), Violation> {
        match self {
            Rule::Required => {
                if value.trim().is_empty() {
                    return Err(Violation::new("required", "value is blank"));
                }
            }
            Rule::Integer => {
                if value.parse::<i64>().is_err() {
                    return Err(Violation::new(
                        "integer",
                        format!("'{value}' is not an integer"),
                    ));
                }
            }
            Rule::Numeric => {
                if value.parse::<f64>().is_err() {
                    return Err(Violation::new(
                        "numeric",
                        format!("'{value}' is not numeric"),
                    ));
                }
            }
            Rule::Alpha => {
                if value.is_empty() || !value.chars().all(|c| c.is_alphabetic()) {
                    return Err(Violation::new(
                        "alpha",
                        format!("'{value}' is not alphabetic"),
                    ));
                }
            }
            Rule::AlphaNum => {
                if value.is_empty() || !value.chars().all(|c| c.is_alphanumeric()) {
                    return Err(Violation::new(
                        "alpha_num",
                        format!("'{value}' is not alphanumeric"),
                    ));
                }
            }
            Rule::Email => {
                if !looks_like_email(value) {
                    return Err(Violation::new(
                        "email",
                        format!("'{value}' is not an email address"),
                    ));
                }
            }
            Rule::Url => {
                if !looks_like_url(value) {
                    return Err(Violation::new("url", format!("'{value}' is not a URL")));
                }
            }
            Rule::Min(bound) => match value.parse::<f64>() {
                Ok(n) if n >= *bound => {}
                Ok(_) => {
                    return Err(Violation::new(
                        "min",
                        format!("'{value}' is below the minimum of {bound}"),
                    ));
                }
                Err(_) => {
                    return Err(Violation::new(
                        "min",
                        format!("'{value}' is not numeric"),
                    ));
                }
            },
            Rule::Max(bound) => match value.parse::<f64>() {
                Ok(n) if n <= *bound => {}
                Ok(_) => {
                    return Err(Violation::new(
                        "max",
                        format!("'{value}' is above the maximum of {bound}"),
                    ));
                }
                Err(_) => {
                    return Err(Violation::new(
                        "max",
                        format!("'{value}' is not numeric"),
                    ));
                }
            },
            Rule::LengthMin(bound) => {
                if value.chars().count() < *bound {
                    return Err(Violation::new(
                        "length_min",
                        format!("'{value}' is shorter than {bound} characters"),
                    ));
                }
            }
            Rule::LengthMax(bound) => {
                if value.chars().count() > *bound {
                    return Err(Violation::new(
                        "length_max",
                        format!("'{value}' is longer than {bound} characters"),
                    ));
                }
            }
            Rule::In(allowed) => {
                if !allowed.iter().any(|s| s == value) {
                    return Err(Violation::new(
                        "in",
                        format!("'{value}' is not one of the allowed values"),
                    ));
                }
            }
            Rule::Matches(pattern) => {
                if !pattern.is_match(value) {
                    return Err(Violation::new(
                        "matches",
                        format!("'{value}' does not match the pattern"),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Parses a single `name` or `name:arg` token.
    fn parse(token: &str) -> Result<Rule, RuleError> {
        let (name, arg) = match token.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (token, None),
        };
        // Accept "length_min", "lengthMin" and "length-min" spellings alike.
        let canonical: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        let rule = match canonical.as_str() {
            "required" => Rule::Required,
            "integer" => Rule::Integer,
            "numeric" => Rule::Numeric,
            "alpha" => Rule::Alpha,
            "alphanum" => Rule::AlphaNum,
            "email" => Rule::Email,
            "url" => Rule::Url,
            "min" => Rule::Min(parse_arg(name, arg)?),
            "max" => Rule::Max(parse_arg(name, arg)?),
            "lengthmin" => Rule::LengthMin(parse_arg(name, arg)?),
            "lengthmax" => Rule::LengthMax(parse_arg(name, arg)?),
            "in" => {
                let arg = require_arg(name, arg)?;
                Rule::In(arg.split(',').map(str::to_string).collect())
            }
            "matches" => {
                let arg = require_arg(name, arg)?;
                Rule::Matches(Regex::new(arg)?)
            }
            _ => return Err(RuleError::UnknownRule(name.to_string())),
        };

        Ok(rule)
    }
}

/// An ordered set of rules parsed from a spec string.
///
/// Checking stops at the first failing rule, so a `RuleSet` reports at
/// most one [`Violation`] per value.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Parses a pipe-delimited rule spec, e.g. `"required|integer|min:1"`.
    pub fn parse(spec: &str) -> Result<Self, RuleError> {
        let mut rules = Vec::new();
        for token in spec.split('|') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            rules.push(Rule::parse(token)?);
        }
        Ok(RuleSet { rules })
    }

    /// Checks a raw value against every rule, in spec order.
    ///
    /// The first failing rule wins; later rules are not evaluated.
    pub fn check(&self, value: &str) -> Result<(), Violation> {
        for rule in &self.rules {
            rule.check(value)?;
        }
        Ok(())
    }

    /// Returns the parsed rules in spec order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns `true` if the set contains no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn require_arg<'a>(name: &str, arg: Option<&'a str>) -> Result<&'a str, RuleError> {
    arg.ok_or_else(|| RuleError::MissingArg {
        rule: name.to_string(),
    })
}

fn parse_arg<T: std::str::FromStr>(name: &str, arg: Option<&str>) -> Result<T, RuleError> {
    let arg = require_arg(name, arg)?;
    arg.parse().map_err(|_| RuleError::BadArg {
        rule: name.to_string(),
        arg: arg.to_string(),
    })
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

fn looks_like_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("http://")
        .or_else(|| value.strip_prefix("https://"));
    match rest {
        Some(rest) => !rest.is_empty() && !rest.chars().any(char::is_whitespace),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_rules() {
        let set = RuleSet::parse("required|integer").unwrap();
        assert_eq!(set.rules().len(), 2);
        assert_eq!(set.rules()[0].name(), "required");
        assert_eq!(set.rules()[1].name(), "integer");
    }

    #[test]
    fn parse_rules_with_args() {
        let set = RuleSet::parse("min:1|max:10|length_min:2|length_max:5").unwrap();
        assert_eq!(set.rules().len(), 4);
    }

    #[test]
    fn parse_accepts_alternate_spellings() {
        assert!(RuleSet::parse("lengthMin:2").is_ok());
        assert!(RuleSet::parse("length-min:2").is_ok());
        assert!(RuleSet::parse("alphaNum").is_ok());
    }

    #[test]
    fn parse_unknown_rule() {
        let err = RuleSet::parse("bogus").unwrap_err();
        assert!(matches!(err, RuleError::UnknownRule(name) if name == "bogus"));
    }

    #[test]
    fn parse_missing_arg() {
        let err = RuleSet::parse("min").unwrap_err();
        assert!(matches!(err, RuleError::MissingArg { .. }));
    }

    #[test]
    fn parse_bad_arg() {
        let err = RuleSet::parse("min:abc").unwrap_err();
        assert!(matches!(err, RuleError::BadArg { .. }));
    }

    #[test]
    fn parse_bad_pattern() {
        let err = RuleSet::parse("matches:[").unwrap_err();
        assert!(matches!(err, RuleError::BadPattern(_)));
    }

    #[test]
    fn parse_skips_empty_tokens() {
        let set = RuleSet::parse("integer||numeric|").unwrap();
        assert_eq!(set.rules().len(), 2);
    }

    #[test]
    fn required_check() {
        let set = RuleSet::parse("required").unwrap();
        assert!(set.check("x").is_ok());
        assert!(set.check("").is_err());
        assert!(set.check("   ").is_err());
    }

    #[test]
    fn integer_check() {
        let set = RuleSet::parse("integer").unwrap();
        assert!(set.check("42").is_ok());
        assert!(set.check("-7").is_ok());
        assert!(set.check("4.2").is_err());
        assert!(set.check("abc").is_err());
        assert!(set.check("").is_err());
    }

    #[test]
    fn numeric_check() {
        let set = RuleSet::parse("numeric").unwrap();
        assert!(set.check("4.2").is_ok());
        assert!(set.check("-1e3").is_ok());
        assert!(set.check("four").is_err());
    }

    #[test]
    fn alpha_checks() {
        let alpha = RuleSet::parse("alpha").unwrap();
        assert!(alpha.check("Carol").is_ok());
        assert!(alpha.check("Carol3").is_err());
        assert!(alpha.check("").is_err());

        let alnum = RuleSet::parse("alpha_num").unwrap();
        assert!(alnum.check("Carol3").is_ok());
        assert!(alnum.check("Carol 3").is_err());
    }

    #[test]
    fn email_check() {
        let set = RuleSet::parse("email").unwrap();
        assert!(set.check("alice@example.com").is_ok());
        assert!(set.check("alice").is_err());
        assert!(set.check("@example.com").is_err());
        assert!(set.check("alice@nodot").is_err());
        assert!(set.check("a lice@example.com").is_err());
    }

    #[test]
    fn url_check() {
        let set = RuleSet::parse("url").unwrap();
        assert!(set.check("http://example.com/page").is_ok());
        assert!(set.check("https://example.com").is_ok());
        assert!(set.check("ftp://example.com").is_err());
        assert!(set.check("example.com").is_err());
        assert!(set.check("http://").is_err());
    }

    #[test]
    fn min_max_checks() {
        let set = RuleSet::parse("min:1|max:10").unwrap();
        assert!(set.check("1").is_ok());
        assert!(set.check("10").is_ok());
        assert!(set.check("0").is_err());
        assert!(set.check("11").is_err());
        assert!(set.check("abc").is_err());
    }

    #[test]
    fn length_checks() {
        let set = RuleSet::parse("length_min:2|length_max:4").unwrap();
        assert!(set.check("ab").is_ok());
        assert!(set.check("abcd").is_ok());
        assert!(set.check("a").is_err());
        assert!(set.check("abcde").is_err());
    }

    #[test]
    fn in_check() {
        let set = RuleSet::parse("in:red,green,blue").unwrap();
        assert!(set.check("green").is_ok());
        assert!(set.check("yellow").is_err());
    }

    #[test]
    fn matches_check() {
        let set = RuleSet::parse(r"matches:^[A-Z]{2}-\d+$").unwrap();
        assert!(set.check("AB-123").is_ok());
        assert!(set.check("ab-123").is_err());
    }

    #[test]
    fn first_failure_wins() {
        let set = RuleSet::parse("integer|min:5").unwrap();
        let violation = set.check("abc").unwrap_err();
        // "integer" fails before "min" gets a chance to complain.
        assert_eq!(violation.rule, "integer");
    }

    #[test]
    fn violation_display() {
        let set = RuleSet::parse("integer").unwrap();
        let violation = set.check("oops").unwrap_err();
        assert_eq!(violation.to_string(), "integer: 'oops' is not an integer");
    }
}
