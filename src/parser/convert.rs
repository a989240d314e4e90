//! Cell-to-value conversion
//!
//! Table cells are untyped text, while record fields are strings, integers,
//! versions and so on. Each target type describes how it can be built from
//! text through [`CellType::strategies`], and [`FieldConverter`] tries those
//! strategies in a fixed order:
//!
//! 1. direct coercion (`String`, plain `str::parse` for numbers, `bool`, `char`)
//! 2. cultured parsing, once per [`Culture`] the converter knows about
//! 3. a plain parse function, usually the type's `FromStr`
//!
//! The strategies resolved for a type are cached per converter instance.

use std::any::type_name;
use std::str::FromStr;

use tracing::trace;

use crate::config::DecoderConfig;
use crate::parser::cache::TypeCache;
use crate::parser::culture::Culture;
use crate::parser::error::ConversionError;

/// Builds a value straight from the cell text
pub type DirectFn<T> = fn(&str) -> Option<T>;
/// Builds a value from the cell text under one culture's number format
pub type CulturedFn<T> = fn(&str, &Culture) -> Option<T>;
/// Builds a value with the type's own parser
pub type PlainFn<T> = fn(&str) -> Option<T>;

/// The ways a type can be built from a cell, each one optional
pub struct Strategies<T> {
    direct: Option<DirectFn<T>>,
    cultured: Option<CulturedFn<T>>,
    plain: Option<PlainFn<T>>,
}

impl<T> Strategies<T> {
    pub const fn none() -> Self {
        Self {
            direct: None,
            cultured: None,
            plain: None,
        }
    }

    pub fn direct(mut self, direct: DirectFn<T>) -> Self {
        self.direct = Some(direct);
        self
    }

    pub fn cultured(mut self, cultured: CulturedFn<T>) -> Self {
        self.cultured = Some(cultured);
        self
    }

    pub fn plain(mut self, plain: PlainFn<T>) -> Self {
        self.plain = Some(plain);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.direct.is_none() && self.cultured.is_none() && self.plain.is_none()
    }
}

impl<T: FromStr> Strategies<T> {
    /// Plain-parse strategy backed by the type's `FromStr`
    pub fn from_str_plain() -> Self {
        Self::none().plain(parse_from_str::<T>)
    }
}

impl<T> Clone for Strategies<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Strategies<T> {}

impl<T> std::fmt::Debug for Strategies<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategies")
            .field("direct", &self.direct.is_some())
            .field("cultured", &self.cultured.is_some())
            .field("plain", &self.plain.is_some())
            .finish()
    }
}

/// A type that can be the target of a cell conversion.
///
/// The default implementation exposes no strategy, which makes every
/// conversion to the type fail with [`ConversionError::Unsupported`].
pub trait CellType: Sized + 'static {
    fn strategies() -> Strategies<Self> {
        Strategies::none()
    }
}

/// Converts raw cell text into typed values
#[derive(Debug)]
pub struct FieldConverter {
    cultures: Vec<Culture>,
    resolved: TypeCache,
}

impl FieldConverter {
    /// Converter trying the invariant culture, then the process culture
    pub fn new() -> Self {
        Self::with_cultures(vec![Culture::invariant(), Culture::current()])
    }

    pub fn with_cultures(cultures: Vec<Culture>) -> Self {
        Self {
            cultures,
            resolved: TypeCache::new(),
        }
    }

    /// Converter trying the invariant culture, the process culture and the
    /// configured default locale, in that order
    pub fn from_config(config: &DecoderConfig) -> Self {
        let mut cultures = vec![Culture::invariant(), Culture::current()];
        if let Some(locale) = &config.default_locale {
            cultures.push(Culture::from_locale(locale));
        }
        Self::with_cultures(cultures)
    }

    pub fn cultures(&self) -> &[Culture] {
        &self.cultures
    }

    /// Convert `raw` into a `T`, trying direct, cultured and plain parsing in order
    pub fn convert<T: CellType>(&self, raw: &str) -> Result<T, ConversionError> {
        let strategies = *self
            .resolved
            .get_or_insert_with::<T, Strategies<T>, _>(T::strategies);

        if strategies.is_empty() {
            return Err(ConversionError::Unsupported {
                value: raw.to_string(),
                target: type_name::<T>(),
            });
        }

        if let Some(value) = strategies.direct.and_then(|direct| direct(raw)) {
            return Ok(value);
        }

        if let Some(cultured) = strategies.cultured {
            if let Some(value) = self
                .cultures
                .iter()
                .find_map(|culture| cultured(raw, culture))
            {
                return Ok(value);
            }
            trace!(
                "No culture could parse '{}' as {}",
                raw,
                type_name::<T>()
            );
        }

        if let Some(value) = strategies.plain.and_then(|plain| plain(raw)) {
            return Ok(value);
        }

        Err(ConversionError::Rejected {
            value: raw.to_string(),
            target: type_name::<T>(),
        })
    }

    pub fn try_convert<T: CellType>(&self, raw: &str) -> Option<T> {
        self.convert(raw).ok()
    }
}

impl Default for FieldConverter {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_from_str<T: FromStr>(raw: &str) -> Option<T> {
    raw.parse().ok()
}

fn parse_trimmed<T: FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

fn parse_cultured<T: FromStr>(raw: &str, culture: &Culture) -> Option<T> {
    culture.normalize_number(raw)?.parse().ok()
}

macro_rules! numeric_cell_type {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CellType for $ty {
                fn strategies() -> Strategies<Self> {
                    Strategies::none()
                        .direct(parse_trimmed::<$ty>)
                        .cultured(parse_cultured::<$ty>)
                }
            }
        )*
    };
}

numeric_cell_type!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

impl CellType for String {
    fn strategies() -> Strategies<Self> {
        Strategies::none().direct(|raw| Some(raw.to_string()))
    }
}

impl CellType for bool {
    fn strategies() -> Strategies<Self> {
        Strategies::none().direct(|raw| {
            let raw = raw.trim();
            if raw.eq_ignore_ascii_case("true") {
                Some(true)
            } else if raw.eq_ignore_ascii_case("false") {
                Some(false)
            } else {
                None
            }
        })
    }
}

impl CellType for char {
    fn strategies() -> Strategies<Self> {
        Strategies::none().direct(|raw| {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        })
    }
}

impl CellType for semver::Version {
    fn strategies() -> Strategies<Self> {
        Strategies::from_str_plain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn invariant_only() -> FieldConverter {
        FieldConverter::with_cultures(vec![Culture::invariant()])
    }

    #[derive(Debug, PartialEq)]
    struct Opaque;

    impl CellType for Opaque {}

    #[derive(Debug, PartialEq)]
    struct Tagged(String);

    impl CellType for Tagged {
        fn strategies() -> Strategies<Self> {
            Strategies::none()
                .direct(|raw| raw.strip_prefix("direct:").map(|s| Tagged(s.to_string())))
                .plain(|raw| raw.strip_prefix("plain:").map(|s| Tagged(s.to_string())))
        }
    }

    #[test]
    fn convert_returns_string_unchanged() {
        let converter = invariant_only();
        assert_eq!(
            converter.convert::<String>("Microsoft Edge"),
            Ok("Microsoft Edge".to_string())
        );
    }

    #[rstest]
    #[case("42", Some(42))]
    #[case(" 42 ", Some(42))]
    #[case("-7", Some(-7))]
    #[case("1,234", Some(1234))]
    #[case("abc", None)]
    #[case("", None)]
    fn try_convert_i64_returns_expected(#[case] raw: &str, #[case] expected: Option<i64>) {
        assert_eq!(invariant_only().try_convert::<i64>(raw), expected);
    }

    #[rstest]
    #[case("1.5", 1.5)]
    #[case("1,234.5", 1234.5)]
    #[case("1.234,5", 1234.5)]
    #[case("0,25", 0.25)]
    fn convert_f64_tries_each_culture(#[case] raw: &str, #[case] expected: f64) {
        let converter =
            FieldConverter::with_cultures(vec![Culture::invariant(), Culture::from_locale("de_DE")]);
        assert_eq!(converter.convert::<f64>(raw), Ok(expected));
    }

    #[test]
    fn convert_uses_default_locale_from_config() {
        let config = DecoderConfig {
            default_locale: Some("fr_FR.UTF-8".to_string()),
            ..Default::default()
        };
        let converter = FieldConverter::from_config(&config);

        assert_eq!(converter.cultures().len(), 3);
        assert_eq!(converter.convert::<f64>("1 234,5"), Ok(1234.5));
    }

    #[rstest]
    #[case("true", Some(true))]
    #[case("False", Some(false))]
    #[case("yes", None)]
    fn try_convert_bool_returns_expected(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(invariant_only().try_convert::<bool>(raw), expected);
    }

    #[rstest]
    #[case("x", Some('x'))]
    #[case("–", Some('–'))]
    #[case("xy", None)]
    #[case("", None)]
    fn try_convert_char_returns_expected(#[case] raw: &str, #[case] expected: Option<char>) {
        assert_eq!(invariant_only().try_convert::<char>(raw), expected);
    }

    #[test]
    fn convert_semver_uses_plain_parse() {
        let converter = invariant_only();
        assert_eq!(
            converter.convert::<semver::Version>("1.68.1"),
            Ok(semver::Version::new(1, 68, 1))
        );
        assert!(converter.try_convert::<semver::Version>("1.68").is_none());
    }

    #[test]
    fn convert_falls_back_from_direct_to_plain() {
        let converter = invariant_only();
        assert_eq!(
            converter.convert::<Tagged>("direct:a"),
            Ok(Tagged("a".to_string()))
        );
        assert_eq!(
            converter.convert::<Tagged>("plain:b"),
            Ok(Tagged("b".to_string()))
        );
    }

    #[test]
    fn convert_reports_rejected_when_every_strategy_fails() {
        let err = invariant_only().convert::<u32>("Unknown").unwrap_err();
        assert_eq!(
            err,
            ConversionError::Rejected {
                value: "Unknown".to_string(),
                target: "u32",
            }
        );
        assert_eq!(err.to_string(), "Unable to convert 'Unknown' to u32");
    }

    #[test]
    fn convert_reports_unsupported_for_type_without_strategies() {
        let err = invariant_only().convert::<Opaque>("anything").unwrap_err();
        assert!(matches!(err, ConversionError::Unsupported { ref value, .. } if value == "anything"));
        assert!(err.to_string().starts_with("No known conversion found from 'anything' to "));
    }

    #[test]
    fn convert_resolves_strategies_once_per_type() {
        let converter = invariant_only();
        converter.convert::<u32>("1").unwrap();
        converter.convert::<u32>("2").unwrap();
        converter.convert::<String>("x").unwrap();

        assert_eq!(converter.resolved.len(), 2);
    }
}
