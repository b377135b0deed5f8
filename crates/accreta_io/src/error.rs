//! Error types for accreta_io.
//!
//! Binary decode errors are fatal to the whole stream: records are not
//! resumable mid-way, so the first failure aborts the decode. Every variant
//! produced while reading a buffer carries the byte offset at which decoding
//! failed so callers can surface it.

use thiserror::Error;

/// Main error type for record decoding and encoding.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Magic bytes were neither `SRF` nor `SEL`.
    #[error("invalid header {found:?} (hex {}) at offset {offset}, not a binary surface stream", hex::encode(found))]
    MalformedHeader { found: [u8; 3], offset: usize },

    /// A read ran past the end of the buffer.
    #[error("unexpected end of data at offset {offset}")]
    UnexpectedEndOfData { offset: usize },

    /// Boundary type byte outside the known range {0, 1}.
    #[error("unsupported boundary type {value} at offset {offset}")]
    UnsupportedBoundaryType { value: u8, offset: usize },

    /// Record footer sentinel was not 0x00.
    #[error("corrupt footer byte 0x{found:02x} at offset {offset}, each record must end with 0x00")]
    CorruptFooter { found: u8, offset: usize },

    /// Dimension byte outside {2, 3}.
    #[error("invalid dimension {value} at offset {offset}")]
    InvalidDimension { value: u8, offset: usize },

    /// A connectivity or triangle index referenced a missing particle.
    #[error("index {index} out of range for {count} particles at offset {offset}")]
    InvalidIndex {
        index: i64,
        count: usize,
        offset: usize,
    },

    /// Structurally invalid content (negative counts, broken next chains,
    /// out-of-range timestamps, unencodable values).
    #[error("malformed record: {0}")]
    Malformed(String),

    /// JSON parsing errors from the textual record variant.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for accreta_io operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

impl DecodeError {
    /// Creates a new malformed-record error.
    #[must_use]
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::Malformed(msg.into())
    }
}
