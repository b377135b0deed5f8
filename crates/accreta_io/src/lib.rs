//! # Accreta IO
//!
//! Decoding and encoding of particle-growth records.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - A bounds-checked byte cursor over raw record buffers
//! - The versioned binary decoder (format revisions 0 through 5)
//! - A binary encoder for the same layouts
//! - An adapter for the textual (JSON) record variant

/// Bounds-checked sequential reader over a byte buffer
pub mod cursor;
/// Versioned binary record decoding
pub mod decode;
/// Binary record encoding, mirroring the decoder's revision gating
pub mod encode;
/// Error types and result aliases for decoding operations
pub mod error;
/// Adapter for the textual (JSON) record variant
pub mod json;

pub use cursor::ByteCursor;
pub use decode::{decode_record, decode_stream};
pub use encode::{encode_record, encode_stream, LATEST_REVISION};
pub use error::{DecodeError, Result};
pub use json::surfaces_from_json;
