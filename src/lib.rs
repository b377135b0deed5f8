//! # Accreta
//!
//! Ingests simulation output describing growing particle networks (closed
//! 2D curves, branching trees, 3D triangulated surfaces) and derives
//! quantitative and geometric properties from the reconstructed model:
//! branch complexity, geodesic distance statistics, planar cross-sections.
//!
//! The heavy lifting lives in the member crates; this facade re-exports
//! them, adds file-level conveniences, and builds the geometry descriptors
//! handed to rendering collaborators.

/// Tracing bootstrap for embedders
pub mod logging;
/// Geometry descriptors for rendering collaborators
pub mod scene;

pub use accreta_analysis as analysis;
pub use accreta_data as data;
pub use accreta_io as io;

pub use accreta_analysis::glam;
pub use accreta_analysis::{
    branch_complexity, bucket_pairs, chain_distances, cross_section, sample_distances,
    shared_vertex_areas, AnalysisConfig, AnalysisError, BranchAnalysis, CrossSection,
    SamplerConfig,
};
pub use accreta_data::{
    Boundary, BoundaryKind, Metadata, SimulationParams, Surface, SurfaceKind, Topology,
};
pub use accreta_io::{
    decode_stream, encode_record, encode_stream, surfaces_from_json, DecodeError,
};

use anyhow::Context;
use std::path::Path;

/// Reads a binary record file and decodes every record in it.
pub fn decode_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Surface>> {
    let bytes = std::fs::read(&path)
        .with_context(|| format!("reading records from {:?}", path.as_ref()))?;
    decode_stream(&bytes).with_context(|| format!("decoding records from {:?}", path.as_ref()))
}

/// Reads a textual record file and builds the same model from it.
pub fn decode_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Surface>> {
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("reading records from {:?}", path.as_ref()))?;
    surfaces_from_json(&json).with_context(|| format!("decoding records from {:?}", path.as_ref()))
}
