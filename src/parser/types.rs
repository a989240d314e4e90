//! Common record types

use serde::Serialize;

use crate::parser::record::Schema;
use crate::parser::traits::Record;
use crate::version::package_version::PackageVersion;

/// One row of a package listing (search results, installed list, upgrades)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    /// Display name (e.g., "Microsoft Edge")
    pub name: String,
    /// Package identifier (e.g., "Microsoft.Edge")
    pub id: String,
    /// Installed or listed version; `None` when the table shows no usable version
    pub version: Option<PackageVersion>,
    /// Version an upgrade would install, only present in upgrade listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<PackageVersion>,
    /// Where the package comes from (e.g., "winget", "msstore")
    pub source: String,
}

impl PackageInfo {
    /// True when `available` is greater than `version`
    pub fn has_upgrade(&self) -> bool {
        match (&self.version, &self.available) {
            (Some(version), Some(available)) => available.is_greater_than(version),
            _ => false,
        }
    }
}

impl Record for PackageInfo {
    fn schema() -> Schema<Self> {
        Schema::<Self>::builder()
            .field("Name", |info, value: String| info.name = value)
            .field("Id", |info, value: String| info.id = value)
            .field("Version", |info, value: PackageVersion| {
                info.version = Some(value)
            })
            .field("Available", |info, value: PackageVersion| {
                info.available = Some(value)
            })
            .field("Source", |info, value: String| info.source = value)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn info(version: Option<&str>, available: Option<&str>) -> PackageInfo {
        PackageInfo {
            version: version.and_then(PackageVersion::parse),
            available: available.and_then(PackageVersion::parse),
            ..Default::default()
        }
    }

    #[rstest]
    #[case(Some("102.0.1245.41"), Some("102.0.1245.44"), true)]
    #[case(Some("4.26.3"), Some("4.27.154"), true)]
    #[case(Some("1.68.1"), Some("1.68.1"), false)]
    #[case(Some("2.0"), Some("1.0"), false)]
    #[case(None, Some("1.0"), false)]
    #[case(Some("1.0"), None, false)]
    fn has_upgrade_returns_expected(
        #[case] version: Option<&str>,
        #[case] available: Option<&str>,
        #[case] expected: bool,
    ) {
        assert_eq!(info(version, available).has_upgrade(), expected);
    }

    #[test]
    fn schema_covers_package_columns() {
        let schema = PackageInfo::schema();
        assert_eq!(
            schema.names().collect::<Vec<_>>(),
            vec!["Name", "Id", "Version", "Available", "Source"]
        );
    }

    #[test]
    fn serialize_omits_missing_available() {
        let info = PackageInfo {
            name: "Slack".to_string(),
            id: "SlackTechnologies.Slack".to_string(),
            version: PackageVersion::parse("4.26.3"),
            available: None,
            source: "winget".to_string(),
        };

        let json = serde_json::to_value(&info).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "Slack",
                "id": "SlackTechnologies.Slack",
                "version": "4.26.3.0",
                "source": "winget"
            })
        );
    }
}
