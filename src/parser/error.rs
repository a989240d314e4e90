use thiserror::Error;

/// Error type for converting a cell into a field value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The target type exposes no conversion strategy at all
    #[error("No known conversion found from '{value}' to {target}")]
    Unsupported { value: String, target: &'static str },

    /// Every strategy the target type exposes rejected the value
    #[error("Unable to convert '{value}' to {target}")]
    Rejected { value: String, target: &'static str },
}
