//! Horton-Strahler branch complexity for tree records.
//!
//! Classifies every particle of a branching structure by stream order: a
//! tip has order 1, and merging two branches of equal order raises the
//! order by one. Instead of recursing over the full tree depth, the
//! classification runs as iterative leaf pruning, which also tolerates
//! branching factors above 2: each pass increments every surviving
//! particle, then strips all leaf runs up to the next branching point.

use crate::error::{AnalysisError, Result};
use accreta_data::{Surface, SurfaceKind, Topology};
use tracing::warn;

/// Branch complexity of one tree record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchAnalysis {
    /// Complexity per particle. Partial (but still meaningful) when
    /// `residual` is set.
    pub complexity: Vec<u32>,
    /// Number of pruning passes performed.
    pub passes: usize,
    /// Number of particles left unpruned when a pass removed nothing:
    /// the structure contained a component this rule cannot reduce (a
    /// cycle, typically). `None` on normal termination.
    pub residual: Option<usize>,
}

impl BranchAnalysis {
    /// Complexity of the edge between two particles, the lower of its two
    /// endpoint complexities. Used for tiered visualization.
    pub fn edge_complexity(&self, a: usize, b: usize) -> u32 {
        self.complexity[a].min(self.complexity[b])
    }

    /// All stored adjacency entries of `surface` with their edge
    /// complexity, in neighbour-list order.
    pub fn edge_tiers(&self, surface: &Surface) -> Result<Vec<(usize, usize, u32)>> {
        let Topology::Tree { neighbours, .. } = &surface.topology else {
            return Err(AnalysisError::WrongKind {
                expected: SurfaceKind::Tree,
                actual: surface.kind(),
            });
        };
        let mut edges = Vec::new();
        for (i, list) in neighbours.iter().enumerate() {
            for &j in list {
                edges.push((i, j, self.edge_complexity(i, j)));
            }
        }
        Ok(edges)
    }
}

/// Computes Horton-Strahler branch complexity for a tree record.
///
/// Particle 0 models the implicit attachment point of the structure and is
/// exempt from the tip check while other particles remain; it can still be
/// swept up as part of a leaf run.
pub fn branch_complexity(surface: &Surface) -> Result<BranchAnalysis> {
    let Topology::Tree { neighbours, .. } = &surface.topology else {
        return Err(AnalysisError::WrongKind {
            expected: SurfaceKind::Tree,
            actual: surface.kind(),
        });
    };

    let n = surface.particle_count();
    let mut complexity = vec![0u32; n];
    let mut remaining = vec![true; n];
    let mut remaining_count = n;
    let mut passes = 0;
    let mut residual = None;

    let degree = |i: usize, remaining: &[bool]| {
        neighbours[i].iter().filter(|&&j| remaining[j]).count()
    };

    while remaining_count > 0 {
        passes += 1;
        let mut marked = vec![false; n];
        let mut marked_count = 0;

        for i in 0..n {
            if !remaining[i] {
                continue;
            }
            complexity[i] += 1;

            // the attachment point survives until it is the last one
            if i == 0 && remaining_count > 1 {
                continue;
            }
            if degree(i, &remaining) > 1 || marked[i] {
                continue;
            }

            // tip of a leaf: sweep the run up to the next branching point
            marked[i] = true;
            marked_count += 1;
            let mut stack = vec![i];
            while let Some(node) = stack.pop() {
                for &j in &neighbours[node] {
                    if !remaining[j] || marked[j] || degree(j, &remaining) > 2 {
                        continue;
                    }
                    marked[j] = true;
                    marked_count += 1;
                    stack.push(j);
                }
            }
        }

        if marked_count == 0 {
            warn!(
                remaining = remaining_count,
                passes, "pruning pass removed nothing, structure has an unprunable residual"
            );
            residual = Some(remaining_count);
            break;
        }
        for i in 0..n {
            if marked[i] {
                remaining[i] = false;
            }
        }
        remaining_count -= marked_count;
    }

    Ok(BranchAnalysis {
        complexity,
        passes,
        residual,
    })
}
