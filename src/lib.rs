//! pkgtable decodes the whitespace-aligned tables package managers print
//! (search results, installed lists, available upgrades) into typed records,
//! and compares the loosely formatted versions found in them.
//!
//! # Modules
//!
//! - [`parser`]: header scanning, cell conversion and the table decoder
//! - [`version`]: `PackageVersion` and version comparison
//! - [`config`]: config file loading
//! - [`logging`]: tracing subscriber setup

pub mod config;
pub mod logging;
pub mod parser;
pub mod version;
