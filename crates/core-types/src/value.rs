use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A single cell of an input table.
///
/// `Absent` is the explicit "no value" marker. Missing-value tokens, unparsable
/// numbers and undefined ratios all collapse into it, and it compares false
/// against every numeric filter because it never reaches one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Absent,
    Number(Decimal),
    Text(String),
}

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Replaces missing-value tokens with `Absent`. Tokens are matched against the
    /// trimmed cell text; numbers are never tokens.
    pub fn normalize<S: AsRef<str>>(&self, missing_tokens: &[S]) -> Value {
        match self {
            Value::Text(text) => {
                let trimmed = text.trim();
                if missing_tokens.iter().any(|token| token.as_ref() == trimmed) {
                    Value::Absent
                } else {
                    self.clone()
                }
            }
            other => other.clone(),
        }
    }

    /// Numeric view of the cell. Text that does not parse yields `None`, never zero.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(text) => parse_decimal(text),
            Value::Absent => None,
        }
    }

    /// The cell coerced to a numeric value: `Number` on success, `Absent` otherwise.
    pub fn coerce_numeric(&self) -> Value {
        self.to_decimal().map_or(Value::Absent, Value::Number)
    }

    /// Label view of the cell, used for symbols and sector keys.
    pub fn as_label(&self) -> Option<String> {
        match self {
            Value::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Value::Number(n) => Some(n.normalize().to_string()),
            Value::Absent => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => Ok(()),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<Decimal> for Value {
    fn from(n: Decimal) -> Self {
        Value::Number(n)
    }
}

impl From<Option<Decimal>> for Value {
    fn from(n: Option<Decimal>) -> Self {
        n.map_or(Value::Absent, Value::Number)
    }
}

/// Parses plain (`"1234.50"`) or scientific (`"1.2345e3"`) decimal text.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// `(value - reference) / base * 100`.
///
/// Returns `None` when the base is zero or any step overflows.
pub fn percent_change(value: Decimal, reference: Decimal, base: Decimal) -> Option<Decimal> {
    if base.is_zero() {
        return None;
    }
    value
        .checked_sub(reference)?
        .checked_div(base)?
        .checked_mul(ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const TOKENS: [&str; 4] = ["-", "NA", "N/A", ""];

    #[test]
    fn missing_tokens_become_absent() {
        for token in ["-", " NA ", "N/A", "", "   "] {
            assert_eq!(Value::from(token).normalize(&TOKENS), Value::Absent, "{token:?}");
        }
        assert_eq!(Value::from("n/a").normalize(&TOKENS), Value::from("n/a"));
        assert_eq!(
            Value::Number(dec!(0)).normalize(&TOKENS),
            Value::Number(dec!(0))
        );
    }

    #[test]
    fn unparsable_text_is_absent_not_zero() {
        assert_eq!(Value::from("abc").to_decimal(), None);
        assert_eq!(Value::from("12abc").coerce_numeric(), Value::Absent);
        assert_eq!(Value::from(" 101.25 ").to_decimal(), Some(dec!(101.25)));
        assert_eq!(Value::from("1.5e3").to_decimal(), Some(dec!(1500)));
        assert_eq!(Value::Absent.to_decimal(), None);
    }

    #[test]
    fn percent_change_guards_zero_base_and_overflow() {
        assert_eq!(percent_change(dec!(120), dec!(100), dec!(100)), Some(dec!(20)));
        assert_eq!(percent_change(dec!(120), dec!(0), dec!(0)), None);
        assert_eq!(percent_change(Decimal::MAX, Decimal::MIN, dec!(1)), None);
    }

    #[test]
    fn labels_are_trimmed_and_numbers_normalized() {
        assert_eq!(Value::from("  Banks ").as_label(), Some("Banks".to_string()));
        assert_eq!(Value::from("  ").as_label(), None);
        assert_eq!(Value::Number(dec!(7.50)).as_label(), Some("7.5".to_string()));
    }
}
