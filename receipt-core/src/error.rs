use thiserror::Error;

/// Main error type for receipt decoding operations
///
/// The receipt payload is untrusted input (a file on disk or a network
/// response), so every failure mode is funneled through this closed set
/// of variants. No decoding path panics.
#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("empty input")]
    EmptyInput,

    #[error("parsing was aborted")]
    Aborted,

    #[error("unknown universal type: 0x{0:02x}")]
    UnknownUniversalType(u8),

    #[error("unsupported universal type: 0x{0:02x}")]
    UnsupportedType(u8),

    #[error("long form tag numbers are not supported")]
    UnsupportedLongFormTag,

    #[error("malformed length for data")]
    MalformedLength,

    #[error("invalid buffer size: {found} bytes for type 0x{kind:02x}")]
    InvalidBufferSize { found: usize, kind: u8 },

    #[error("unsupported value encoding for type 0x{0:02x}")]
    UnsupportedValueEncoding(u8),

    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("nesting exceeds maximum depth of {0}")]
    NestingTooDeep(usize),

    #[error("internal invariant violated: {0}")]
    InvariantViolation(&'static str),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Result type alias for receipt decoding operations
pub type ReceiptResult<T> = Result<T, ReceiptError>;
