//! # Accreta Analysis
//!
//! Quantitative and geometric analyses over decoded `Surface` records.
//!
//! This crate provides:
//! - Horton-Strahler branch complexity for tree records
//! - Geodesic-vs-Euclidean distance sampling for closed line records
//! - Planar cross-sections of mesh records
//! - Vertex/triangle sharing statistics for mesh records
//! - A toml-backed configuration layer for the tunable parameters
//!
//! Analyses only read the record; derived values are returned, never written
//! back into the model.

/// Horton-Strahler branch complexity classification
pub mod branching;
/// Tunable analysis parameters, loadable from toml
pub mod config;
/// Planar cross-sections of triangulated meshes
pub mod cross_section;
/// Error types for analysis operations
pub mod error;
/// Geodesic distance sampling along closed particle chains
pub mod geodesic;
/// Per-vertex triangle sharing statistics
pub mod mesh_stats;

pub use branching::{branch_complexity, BranchAnalysis};
pub use config::{AnalysisConfig, CrossSectionConfig, SamplerConfig};
pub use cross_section::{cross_section, CrossSection};
pub use error::{AnalysisError, Result};
pub use geodesic::{bucket_pairs, chain_distances, sample_distances, DistanceBucket, DistancePair};
pub use mesh_stats::{shared_vertex_areas, TriangleShareBin};

// Re-exported so callers can build plane positions/rotations without
// depending on glam themselves.
pub use glam;
