use thiserror::Error;

/// Precondition violations raised while building typed shipment data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataError {
    #[error("invalid HS code '{0}': expected up to 10 digits")]
    InvalidHsCode(String),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
}
