//! Error types for accreta_analysis.
//!
//! Analysis failures are scoped to the offending call; unlike decode errors
//! they never invalidate the record itself. Recoverable defects found while
//! analysing (degenerate cross-section edges, unprunable residuals) are not
//! errors at all: they are counted on the result and logged.

use accreta_data::SurfaceKind;
use thiserror::Error;

/// Main error type for analysis operations.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The record's kind does not match what the analysis needs.
    #[error("analysis needs a {expected} record, got {actual}")]
    WrongKind {
        expected: SurfaceKind,
        actual: SurfaceKind,
    },

    /// Too few particles for the requested sampling policy.
    #[error("record has {count} particles, sampling needs at least {needed}")]
    TooFewParticles { count: usize, needed: usize },

    /// A chain walk failed to reach its target; the record's next pointers
    /// form more than one cycle.
    #[error("no chain path between particles {from} and {to}")]
    UnreachablePair { from: usize, to: usize },
}

/// Result type alias for accreta_analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
