//! The `Surface` record: one decoded snapshot of a growing particle network.
//!
//! A surface is either a closed 2D line (every particle points at its
//! successor, forming a single cycle), a branching tree (per-particle
//! neighbour lists), or a 3D triangulated mesh (connectivity lives in the
//! triangle list). Records are built once by a decoder and are read-only
//! afterwards; analyses return their results separately instead of mutating
//! the record.

use crate::boundary::Boundary;
use crate::metadata::Metadata;
use serde::{Deserialize, Serialize};

/// Connectivity style of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// Closed 2D curve, one `next` pointer per particle.
    Line,
    /// Branching graph with per-particle neighbour lists (2D or 3D).
    Tree,
    /// 3D triangulated surface.
    Mesh,
}

impl std::fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceKind::Line => write!(f, "line"),
            SurfaceKind::Tree => write!(f, "tree"),
            SurfaceKind::Mesh => write!(f, "mesh"),
        }
    }
}

/// Per-kind connectivity payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Topology {
    Line {
        /// Successor index per particle; the pointers form one closed cycle.
        next: Vec<usize>,
        /// Predecessor index per particle, derived by inverting `next` once
        /// at construction. Never stored on the wire.
        previous: Vec<usize>,
    },
    Tree {
        /// Neighbour indices per particle.
        neighbours: Vec<Vec<usize>>,
        /// Indices of recently grown nodes (format revision 3 and later,
        /// empty otherwise).
        young: Vec<usize>,
    },
    Mesh {
        /// Particle index triples.
        triangles: Vec<[usize; 3]>,
    },
}

/// One decoded record describing a particle network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// 2 or 3.
    pub dimension: usize,
    /// Particle positions, each of length `dimension`. Indices are stable
    /// for the record's lifetime.
    pub positions: Vec<Vec<f32>>,
    pub topology: Topology,
    pub boundary: Option<Boundary>,
    pub metadata: Metadata,
}

impl Surface {
    pub fn kind(&self) -> SurfaceKind {
        match self.topology {
            Topology::Line { .. } => SurfaceKind::Line,
            Topology::Tree { .. } => SurfaceKind::Tree,
            Topology::Mesh { .. } => SurfaceKind::Mesh,
        }
    }

    pub fn particle_count(&self) -> usize {
        self.positions.len()
    }

    pub fn position(&self, index: usize) -> &[f32] {
        &self.positions[index]
    }

    /// Number of triangles, for mesh records.
    pub fn triangle_count(&self) -> Option<usize> {
        match &self.topology {
            Topology::Mesh { triangles } => Some(triangles.len()),
            _ => None,
        }
    }

    /// Fraction of the boundary volume the grown structure fills, when both
    /// the recorded volume and a boundary are present.
    pub fn volume_fraction(&self) -> Option<f32> {
        let volume = self.metadata.params.volume?;
        let boundary = self.boundary.as_ref()?;
        Some(volume / boundary.volume())
    }
}

/// Inverts a `next` mapping into a `previous` mapping.
///
/// Returns `None` when the mapping is not invertible, i.e. some index is
/// the successor of two particles (or of none). Out-of-range entries must
/// be rejected before calling this.
pub fn invert_cycle(next: &[usize]) -> Option<Vec<usize>> {
    let mut previous = vec![usize::MAX; next.len()];
    for (i, &n) in next.iter().enumerate() {
        if previous[n] != usize::MAX {
            return None;
        }
        previous[n] = i;
    }
    // every slot written exactly once
    if previous.iter().any(|&p| p == usize::MAX) {
        return None;
    }
    Some(previous)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_cycle_roundtrip() {
        let next = vec![1, 2, 3, 0];
        let previous = invert_cycle(&next).unwrap();
        assert_eq!(previous, vec![3, 0, 1, 2]);
        for i in 0..next.len() {
            assert_eq!(next[previous[i]], i);
        }
    }

    #[test]
    fn test_invert_cycle_rejects_duplicate_successor() {
        // two particles both point at 0
        assert!(invert_cycle(&[0, 0, 1]).is_none());
    }

    #[test]
    fn test_invert_cycle_empty() {
        assert_eq!(invert_cycle(&[]), Some(vec![]));
    }

    #[test]
    fn test_volume_fraction_needs_both_fields() {
        let surface = Surface {
            dimension: 2,
            positions: vec![],
            topology: Topology::Line {
                next: vec![],
                previous: vec![],
            },
            boundary: None,
            metadata: Metadata::default(),
        };
        assert_eq!(surface.volume_fraction(), None);
    }
}
