//! Value inference: a plausible example literal for a field name.
//!
//! Rules are evaluated in order against the lower-cased name and the first
//! match wins, so a name like `phone_email` is a phone field.

use serde_json::Value;

/// Category a field name was classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Phone,
    Email,
    Code,
    Generic,
}

/// One inference rule: any needle contained in the name selects `kind`.
struct Rule {
    needles: &'static [&'static str],
    kind: ValueKind,
    literal: &'static str,
}

pub const PHONE_LITERAL: &str = "9876543210";
pub const EMAIL_LITERAL: &str = "test@example.com";
pub const CODE_LITERAL: &str = "1234";
pub const GENERIC_LITERAL: &str = "discovery_value";

// Order is load-bearing.
const RULES: &[Rule] = &[
    Rule {
        needles: &["phone", "mobile", "num"],
        kind: ValueKind::Phone,
        literal: PHONE_LITERAL,
    },
    Rule {
        needles: &["email"],
        kind: ValueKind::Email,
        literal: EMAIL_LITERAL,
    },
    Rule {
        needles: &["otp", "code", "pin"],
        kind: ValueKind::Code,
        literal: CODE_LITERAL,
    },
];

fn matching_rule(field: &str) -> Option<&'static Rule> {
    let name = field.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.needles.iter().any(|n| name.contains(n)))
}

/// Classify a field name.
pub fn classify(field: &str) -> ValueKind {
    matching_rule(field).map_or(ValueKind::Generic, |rule| rule.kind)
}

/// Example literal for a field name.
pub fn infer_value(field: &str) -> Value {
    let literal = matching_rule(field).map_or(GENERIC_LITERAL, |rule| rule.literal);
    Value::String(literal.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_fields() {
        assert_eq!(infer_value("mobile"), PHONE_LITERAL);
        assert_eq!(infer_value("PhoneNumber"), PHONE_LITERAL);
        assert_eq!(infer_value("account_num"), PHONE_LITERAL);
    }

    #[test]
    fn test_email_field() {
        assert_eq!(infer_value("userEmail"), EMAIL_LITERAL);
    }

    #[test]
    fn test_code_fields() {
        assert_eq!(infer_value("otp"), CODE_LITERAL);
        assert_eq!(infer_value("verification_code"), CODE_LITERAL);
        assert_eq!(infer_value("PIN"), CODE_LITERAL);
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(infer_value("step"), GENERIC_LITERAL);
        assert_eq!(classify("name"), ValueKind::Generic);
    }

    #[test]
    fn test_first_rule_wins() {
        assert_eq!(infer_value("phone_email"), PHONE_LITERAL);
        assert_eq!(classify("phone_email"), ValueKind::Phone);
        // "email_otp" hits the email rule before the code rule.
        assert_eq!(classify("email_otp"), ValueKind::Email);
        // "pincode_num" contains "num", which outranks "pin" and "code".
        assert_eq!(classify("pincode_num"), ValueKind::Phone);
    }
}
