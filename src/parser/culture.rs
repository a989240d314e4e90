//! Number formatting rules used by cultured parsing
//!
//! Package tables are rendered in the locale of the machine that produced
//! them, so a size or count cell may read `1,234.5`, `1.234,5` or `1 234,5`.
//! A [`Culture`] knows how one locale separates digit groups and decimals.

/// Separators of one locale's number format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Culture {
    name: String,
    decimal_separator: char,
    group_separator: char,
}

/// Languages writing `1.234,5`
const COMMA_DECIMAL_DOT_GROUP: &[&str] = &[
    "de", "es", "it", "nl", "pt", "id", "tr", "da", "el", "ro", "hr", "sl", "sr", "vi",
];

/// Languages writing `1 234,5`
const COMMA_DECIMAL_SPACE_GROUP: &[&str] = &[
    "fr", "ru", "pl", "cs", "sk", "sv", "fi", "nb", "nn", "no", "uk", "hu", "bg", "lt", "lv",
    "et",
];

const NO_BREAK_SPACE: char = '\u{a0}';
const NARROW_NO_BREAK_SPACE: char = '\u{202f}';

impl Culture {
    pub fn new(name: impl Into<String>, decimal_separator: char, group_separator: char) -> Self {
        Self {
            name: name.into(),
            decimal_separator,
            group_separator,
        }
    }

    /// Locale-independent rules: `.` for decimals, `,` for groups
    pub fn invariant() -> Self {
        Self::new("", '.', ',')
    }

    /// Rules for a POSIX or BCP 47 locale tag such as `de_DE.UTF-8` or `fr-FR`.
    ///
    /// Unknown languages fall back to the invariant separators.
    pub fn from_locale(tag: &str) -> Self {
        let base = tag.split(['.', '@']).next().unwrap_or_default();
        let language = base
            .split(['_', '-'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        if language.is_empty() || language == "c" || language == "posix" {
            return Self::invariant();
        }

        let (decimal, group) = if COMMA_DECIMAL_DOT_GROUP.contains(&language.as_str()) {
            (',', '.')
        } else if COMMA_DECIMAL_SPACE_GROUP.contains(&language.as_str()) {
            (',', NO_BREAK_SPACE)
        } else {
            ('.', ',')
        };

        Self::new(base, decimal, group)
    }

    /// Rules of the running process, read from `LC_ALL`, `LC_NUMERIC`, then `LANG`
    pub fn current() -> Self {
        current_with_env(
            std::env::var("LC_ALL").ok(),
            std::env::var("LC_NUMERIC").ok(),
            std::env::var("LANG").ok(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn group_separator(&self) -> char {
        self.group_separator
    }

    /// Rewrite `raw` into the form `str::parse` understands: group separators
    /// removed and the decimal separator replaced by `.`.
    ///
    /// Returns `None` when `raw` is not a number written in this culture:
    /// blank input, a second decimal separator, a group separator in the
    /// fraction, or digit groups that are not three digits wide.
    pub fn normalize_number(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let (integer, fraction) = match trimmed.split_once(self.decimal_separator) {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (trimmed, None),
        };

        if let Some(fraction) = fraction {
            if fraction
                .chars()
                .any(|c| c == self.decimal_separator || self.is_group_separator(c))
            {
                return None;
            }
        }

        let groups: Vec<&str> = integer
            .split(|c: char| self.is_group_separator(c))
            .collect();
        if let [leading, rest @ ..] = groups.as_slice() {
            let leading = leading.trim_start_matches(['+', '-']);
            let misgrouped = !rest.is_empty()
                && (leading.is_empty() || leading.len() > 3 || rest.iter().any(|g| g.len() != 3));
            if misgrouped {
                return None;
            }
        }

        let mut normalized = groups.concat();
        if let Some(fraction) = fraction {
            normalized.push('.');
            normalized.push_str(fraction);
        }
        Some(normalized)
    }

    fn is_group_separator(&self, c: char) -> bool {
        if c == self.group_separator {
            return true;
        }
        // Space-grouping locales print any of these depending on the tool
        self.group_separator.is_whitespace()
            && matches!(c, ' ' | NO_BREAK_SPACE | NARROW_NO_BREAK_SPACE)
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}

fn current_with_env(
    lc_all: Option<String>,
    lc_numeric: Option<String>,
    lang: Option<String>,
) -> Culture {
    [lc_all, lc_numeric, lang]
        .into_iter()
        .flatten()
        .find(|tag| !tag.is_empty())
        .map(|tag| Culture::from_locale(&tag))
        .unwrap_or_else(Culture::invariant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("de_DE.UTF-8", "de_DE", ',', '.')]
    #[case("fr-FR", "fr-FR", ',', NO_BREAK_SPACE)]
    #[case("en_US.UTF-8", "en_US", '.', ',')]
    #[case("sr_RS@latin", "sr_RS", ',', '.')]
    #[case("C", "", '.', ',')]
    #[case("POSIX", "", '.', ',')]
    #[case("", "", '.', ',')]
    fn from_locale_returns_expected_separators(
        #[case] tag: &str,
        #[case] name: &str,
        #[case] decimal: char,
        #[case] group: char,
    ) {
        let culture = Culture::from_locale(tag);
        assert_eq!(culture.name(), name);
        assert_eq!(culture.decimal_separator(), decimal);
        assert_eq!(culture.group_separator(), group);
    }

    #[rstest]
    #[case(Culture::invariant(), "1,234.5", Some("1234.5"))]
    #[case(Culture::invariant(), "  42  ", Some("42"))]
    #[case(Culture::from_locale("de_DE"), "1.234,5", Some("1234.5"))]
    #[case(Culture::from_locale("fr_FR"), "1 234,5", Some("1234.5"))]
    #[case(Culture::from_locale("fr_FR"), "1\u{a0}234,5", Some("1234.5"))]
    #[case(Culture::from_locale("fr_FR"), "1\u{202f}234", Some("1234"))]
    #[case(Culture::invariant(), "-12,345,678", Some("-12345678"))]
    #[case(Culture::invariant(), "1.234,5", None)]
    #[case(Culture::invariant(), "0,25", None)]
    #[case(Culture::from_locale("de_DE"), "0,25", Some("0.25"))]
    #[case(Culture::invariant(), "1.2.3", None)]
    #[case(Culture::invariant(), "   ", None)]
    fn normalize_number_returns_expected(
        #[case] culture: Culture,
        #[case] raw: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(culture.normalize_number(raw).as_deref(), expected);
    }

    #[test]
    fn current_with_env_prefers_lc_all() {
        let culture = current_with_env(
            Some("de_DE.UTF-8".to_string()),
            Some("en_US.UTF-8".to_string()),
            Some("fr_FR.UTF-8".to_string()),
        );
        assert_eq!(culture.name(), "de_DE");
    }

    #[test]
    fn current_with_env_skips_empty_values() {
        let culture = current_with_env(Some(String::new()), None, Some("fr_FR.UTF-8".to_string()));
        assert_eq!(culture.name(), "fr_FR");
    }

    #[test]
    fn current_with_env_falls_back_to_invariant() {
        assert_eq!(current_with_env(None, None, None), Culture::invariant());
    }
}
