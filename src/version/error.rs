use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    #[error("No numeric component found in '{0}'")]
    NoNumericComponent(String),
}
