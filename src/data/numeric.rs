/// A parsed numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// The value as an `i64` when it is an integer or a whole float in range.
    pub fn as_integer(self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(i),
            Number::Float(f) if f.fract() == 0.0 && f >= -(2f64.powi(63)) && f < 2f64.powi(63) => {
                Some(f as i64)
            }
            Number::Float(_) => None,
        }
    }
}

/// Parse a cell as a number.
///
/// Surrounding whitespace is ignored.  Integer literals that fit in an `i64`
/// stay integers; anything else `f64` accepts (decimals, exponents, `inf`)
/// becomes a float.  NaN is an absent value, not a number.
pub fn parse_number(raw: &str) -> Option<Number> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::Integer(i));
    }
    match s.parse::<f64>() {
        Ok(f) if !f.is_nan() => Some(Number::Float(f)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_and_floats() {
        assert_eq!(parse_number("42"), Some(Number::Integer(42)));
        assert_eq!(parse_number(" -7 "), Some(Number::Integer(-7)));
        assert_eq!(parse_number("2.5"), Some(Number::Float(2.5)));
        assert_eq!(parse_number("1e3"), Some(Number::Float(1000.0)));
        assert_eq!(parse_number("-inf"), Some(Number::Float(f64::NEG_INFINITY)));
    }

    #[test]
    fn overflowing_integer_becomes_float() {
        assert_eq!(
            parse_number("99999999999999999999"),
            Some(Number::Float(1e20))
        );
    }

    #[test]
    fn whole_floats_narrow_to_integers() {
        assert_eq!(Number::Float(3.0).as_integer(), Some(3));
        assert_eq!(Number::Float(-0.0).as_integer(), Some(0));
        assert_eq!(Number::Float(2.5).as_integer(), None);
        assert_eq!(Number::Float(1e20).as_integer(), None);
        assert_eq!(Number::Float(f64::INFINITY).as_integer(), None);
    }

    #[test]
    fn rejects_text_and_nan() {
        assert_eq!(parse_number("X1"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("nan"), None);
        assert_eq!(parse_number("1,000"), None);
    }
}
