//! Permissive four-part package version
//!
//! Package managers print versions in many shapes (`1.2`, `1.1.0+321`,
//! `8.2.5096`, `Unknown`). `PackageVersion` keeps only the digit runs and maps
//! the first four of them to major, minor, build and revision.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::parser::convert::{CellType, Strategies};
use crate::version::error::VersionParseError;

/// A version made of up to four numeric components.
///
/// Equality and hashing only look at the components. Ordering is exposed
/// through `is_greater_than` and friends instead of `PartialOrd`: any
/// component that is larger makes a version greater, regardless of the
/// more significant components, so two versions can each be greater than the
/// other (`1.5` vs `2.0`).
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageVersion {
    major: u32,
    minor: u32,
    build: u32,
    revision: u32,
    valid: bool,
}

impl PackageVersion {
    pub const fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
            valid: true,
        }
    }

    /// Scan `text` for digit runs, accepting any separator between them.
    ///
    /// Always returns a value; check [`PackageVersion::is_valid`] to know
    /// whether a digit run was found at all.
    pub fn scan(text: &str) -> Self {
        let mut components = [0u32; 4];
        let mut found = 0usize;

        for token in text
            .split(|c: char| !c.is_ascii_digit())
            .filter(|token| !token.is_empty())
        {
            if found < components.len() {
                // Runs too long for u32 still count, they just read as zero
                components[found] = token.parse().unwrap_or(0);
            }
            found += 1;
        }

        let [major, minor, build, revision] = components;
        Self {
            major,
            minor,
            build,
            revision,
            valid: found > 0,
        }
    }

    /// Parse a version, returning `None` when `text` has no digits.
    ///
    /// Examples:
    /// - "1.2" -> 1.2.0.0
    /// - "1.1.0+321" -> 1.1.0.321
    /// - "Unknown" -> None
    pub fn parse(text: &str) -> Option<Self> {
        let version = Self::scan(text);
        version.valid.then_some(version)
    }

    pub fn try_parse(text: &str) -> Result<Self, VersionParseError> {
        Self::parse(text).ok_or_else(|| VersionParseError::NoNumericComponent(text.to_string()))
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn build(&self) -> u32 {
        self.build
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn components(&self) -> [u32; 4] {
        [self.major, self.minor, self.build, self.revision]
    }

    /// True when any component of `self` is larger than the same component
    /// of `other`, checked from major to revision.
    pub fn is_greater_than(&self, other: &Self) -> bool {
        self.major > other.major
            || self.minor > other.minor
            || self.build > other.build
            || self.revision > other.revision
    }

    pub fn is_greater_or_equal(&self, other: &Self) -> bool {
        self.is_greater_than(other) || self == other
    }

    pub fn is_less_than(&self, other: &Self) -> bool {
        other.is_greater_than(self)
    }

    pub fn is_less_or_equal(&self, other: &Self) -> bool {
        self.is_less_than(other) || self == other
    }
}

impl PartialEq for PackageVersion {
    fn eq(&self, other: &Self) -> bool {
        self.components() == other.components()
    }
}

impl Eq for PackageVersion {}

impl Hash for PackageVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.components().hash(state);
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl FromStr for PackageVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

impl Serialize for PackageVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl CellType for PackageVersion {
    fn strategies() -> Strategies<Self> {
        Strategies::none().plain(Self::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", [1, 0, 0, 0])]
    #[case("1.2", [1, 2, 0, 0])]
    #[case("1.2.123", [1, 2, 123, 0])]
    #[case("1.2.123.666", [1, 2, 123, 666])]
    #[case("1.2.123+666", [1, 2, 123, 666])]
    #[case("1.2.123_666", [1, 2, 123, 666])]
    #[case("v1.2.3.4.5", [1, 2, 3, 4])]
    #[case("Vim 8.2 (x64)", [8, 2, 64, 0])]
    fn parse_maps_digit_runs_to_components(#[case] input: &str, #[case] expected: [u32; 4]) {
        let version = PackageVersion::parse(input).unwrap();
        assert_eq!(version.components(), expected);
        assert!(version.is_valid());
    }

    #[rstest]
    #[case("Unknown")]
    #[case("")]
    #[case("...")]
    fn parse_returns_none_without_digits(#[case] input: &str) {
        assert_eq!(PackageVersion::parse(input), None);
        assert!(!PackageVersion::scan(input).is_valid());
        assert_eq!(
            PackageVersion::try_parse(input),
            Err(VersionParseError::NoNumericComponent(input.to_string()))
        );
    }

    #[test]
    fn scan_treats_overflowing_run_as_zero_but_valid() {
        let version = PackageVersion::scan("99999999999.1");
        assert!(version.is_valid());
        assert_eq!(version.components(), [0, 1, 0, 0]);
    }

    #[rstest]
    #[case("2147483648.1", [2_147_483_648, 1, 0, 0])]
    #[case("4294967295", [4_294_967_295, 0, 0, 0])]
    #[case("4294967296.2", [0, 2, 0, 0])]
    fn scan_keeps_full_u32_range(#[case] input: &str, #[case] expected: [u32; 4]) {
        assert_eq!(PackageVersion::scan(input).components(), expected);
    }

    #[test]
    fn equality_ignores_how_the_version_was_written() {
        let first = PackageVersion::parse("1.2.3.4").unwrap();
        let copy = PackageVersion::parse("1_2+3.4").unwrap();
        let other = PackageVersion::parse("1.2.3.5").unwrap();

        assert_eq!(first, copy);
        assert_ne!(first, other);
        assert_eq!(first, PackageVersion::new(1, 2, 3, 4));
    }

    #[test]
    fn greater_than_follows_component_checks() {
        let a = PackageVersion::parse("1.2.3.4").unwrap();
        let a1 = a;
        let b = PackageVersion::parse("1.2.3.5").unwrap();
        let c = PackageVersion::parse("1.4.1.1").unwrap();
        let d = PackageVersion::parse("2.0.0").unwrap();

        assert!(!a.is_greater_than(&b));
        assert!(b.is_greater_than(&a));
        assert!(a.is_greater_or_equal(&a1));
        assert!(c.is_greater_than(&a));
        assert!(d.is_greater_than(&c));
        assert!(a.is_less_than(&b));
        assert!(a.is_less_or_equal(&a1));
        assert!(!a.is_less_than(&a1));
    }

    #[test]
    fn greater_than_lets_minor_win_over_smaller_major() {
        let older_major = PackageVersion::parse("1.5").unwrap();
        let newer_major = PackageVersion::parse("2.0").unwrap();

        assert!(older_major.is_greater_than(&newer_major));
        assert!(newer_major.is_greater_than(&older_major));
    }

    #[test]
    fn display_prints_all_four_components() {
        let version = PackageVersion::parse("102.0.1245").unwrap();
        assert_eq!(version.to_string(), "102.0.1245.0");
    }

    #[test]
    fn serialize_uses_display_form() {
        let version = PackageVersion::new(1, 68, 1, 0);
        assert_eq!(serde_json::to_string(&version).unwrap(), "\"1.68.1.0\"");
    }

    #[test]
    fn from_str_rejects_text_without_digits() {
        assert!("Unknown".parse::<PackageVersion>().is_err());
        assert_eq!(
            "4.27.154".parse::<PackageVersion>(),
            Ok(PackageVersion::new(4, 27, 154, 0))
        );
    }
}
