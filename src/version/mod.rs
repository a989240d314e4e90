//! Version layer for loosely formatted package versions
//!
//! # Modules
//!
//! - [`package_version`]: `PackageVersion`, a permissive four-part version
//! - [`compare`]: installed-vs-latest comparison built on `PackageVersion`
//! - [`error`]: Error types for version parsing

pub mod compare;
pub mod error;
pub mod package_version;

pub use compare::{CompareResult, compare_versions};
pub use error::VersionParseError;
pub use package_version::PackageVersion;
