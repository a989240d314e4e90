use tracing::warn;

use crate::version::package_version::PackageVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareResult {
    Latest,
    Outdated,
    Newer,
    Invalid,
}

impl CompareResult {
    /// Returns the string representation of the comparison result
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareResult::Latest => "latest",
            CompareResult::Outdated => "outdated",
            CompareResult::Newer => "newer",
            CompareResult::Invalid => "invalid",
        }
    }
}

/// Compare the installed version against the latest known version.
///
/// Equality wins first, then "latest is greater" means outdated. Since the
/// greater-than check is per component, a pair like `1.5` / `2.0` reports
/// `Outdated` because `2.0` is checked as greater before `1.5` is.
pub fn compare_versions(current: &str, latest: &str) -> CompareResult {
    let Some(current_ver) = PackageVersion::parse(current) else {
        warn!("Invalid version format: '{}'", current);
        return CompareResult::Invalid;
    };

    let Some(latest_ver) = PackageVersion::parse(latest) else {
        warn!("Invalid version format: '{}'", latest);
        return CompareResult::Invalid;
    };

    if current_ver == latest_ver {
        CompareResult::Latest
    } else if latest_ver.is_greater_than(&current_ver) {
        CompareResult::Outdated
    } else {
        CompareResult::Newer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.0.0", "1.0.0", CompareResult::Latest)]
    #[case("1.0", "1.0.0.0", CompareResult::Latest)]
    #[case("1.0.0", "2.0.0", CompareResult::Outdated)]
    #[case("102.0.1245.41", "102.0.1245.44", CompareResult::Outdated)]
    #[case("1.1.0+321", "1.1.1+341", CompareResult::Outdated)]
    #[case("2.0.0", "1.0.0", CompareResult::Newer)]
    #[case("1.0.1", "1.0.0", CompareResult::Newer)]
    #[case("1.5", "2.0", CompareResult::Outdated)]
    #[case("Unknown", "1.0.0", CompareResult::Invalid)]
    #[case("1.0.0", "Unknown", CompareResult::Invalid)]
    fn compare_versions_returns_expected(
        #[case] current: &str,
        #[case] latest: &str,
        #[case] expected: CompareResult,
    ) {
        assert_eq!(compare_versions(current, latest), expected);
    }

    #[rstest]
    #[case(CompareResult::Latest, "latest")]
    #[case(CompareResult::Outdated, "outdated")]
    #[case(CompareResult::Newer, "newer")]
    #[case(CompareResult::Invalid, "invalid")]
    fn as_str_returns_expected(#[case] result: CompareResult, #[case] expected: &str) {
        assert_eq!(result.as_str(), expected);
    }
}
