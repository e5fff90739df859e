//! Typed interpretation of variable values
//!
//! The supported result set is closed: booleans, strings, and the primitive
//! numeric types. Lookup misses and unparsable values yield the type's zero
//! value instead of failing, so scalar reads never error.

/// A scalar type readable through [`crate::SettingsGetter::get`].
pub trait SettingValue: Sized {
    /// The value returned for absent variables and detached getters.
    fn zero() -> Self;

    /// Interpret a raw variable value.
    fn parse_setting(raw: &str) -> Self;
}

impl SettingValue for bool {
    fn zero() -> Self {
        false
    }

    /// Case-insensitive match on the literal `true`; every other string,
    /// empty included, reads as `false`.
    fn parse_setting(raw: &str) -> Self {
        raw.eq_ignore_ascii_case("true")
    }
}

impl SettingValue for String {
    fn zero() -> Self {
        String::new()
    }

    fn parse_setting(raw: &str) -> Self {
        raw.to_string()
    }
}

macro_rules! numeric_setting_value {
    ($($ty:ty),* $(,)?) => {$(
        impl SettingValue for $ty {
            fn zero() -> Self {
                <$ty>::default()
            }

            fn parse_setting(raw: &str) -> Self {
                raw.trim().parse().unwrap_or_default()
            }
        }
    )*};
}

numeric_setting_value!(i32, i64, u32, u64, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_parsing_is_case_insensitive() {
        assert!(bool::parse_setting("true"));
        assert!(bool::parse_setting("TRUE"));
        assert!(bool::parse_setting("True"));
    }

    #[test]
    fn non_boolean_literals_read_as_false() {
        assert!(!bool::parse_setting(""));
        assert!(!bool::parse_setting("yes"));
        assert!(!bool::parse_setting("1"));
    }

    #[test]
    fn numeric_parse_failure_falls_back_to_zero() {
        assert_eq!(i32::parse_setting("not a number"), 0);
        assert_eq!(u64::parse_setting("-1"), 0);
        assert_eq!(f64::parse_setting("2.5"), 2.5);
    }

    #[test]
    fn zero_values_match_defaults() {
        assert_eq!(String::zero(), "");
        assert!(!bool::zero());
        assert_eq!(i64::zero(), 0);
    }
}
