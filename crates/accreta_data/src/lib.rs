//! # Accreta Data
//!
//! Model types for decoded particle-growth records.
//!
//! This crate provides:
//! - The `Surface` record with its per-kind topology payload
//! - Boundary descriptors and their derived volume
//! - Record metadata (simulation parameters, provenance)
//!
//! Types here are pure data: decoding, analysis and rendering live in the
//! sibling crates.

/// Boundary descriptors (sphere/cylinder) and derived volume
pub mod boundary;
/// Record provenance and simulation parameters
pub mod metadata;
/// The `Surface` record and its topology payloads
pub mod surface;

pub use boundary::{Boundary, BoundaryKind};
pub use metadata::{Metadata, SimulationParams};
pub use surface::{invert_cycle, Surface, SurfaceKind, Topology};
