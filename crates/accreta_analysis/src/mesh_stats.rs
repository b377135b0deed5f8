//! Per-vertex triangle sharing statistics for mesh records.
//!
//! Groups vertices by how many triangles they participate in and reports
//! the mean incident-triangle area per group, an indicator of how evenly
//! the growth process tessellated the surface. Charting the bins is left
//! to the reporting collaborators.

use crate::error::{AnalysisError, Result};
use accreta_data::{Surface, SurfaceKind, Topology};
use glam::DVec3;
use std::collections::BTreeMap;

/// Vertices sharing `triangle_count` triangles, with the mean of their
/// mean incident areas. `mean_area` is `None` for counts no vertex has.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleShareBin {
    pub triangle_count: usize,
    pub mean_area: Option<f64>,
}

/// Computes the triangle-sharing bins of a mesh record.
///
/// Bins cover the whole observed count range in ascending order, including
/// empty counts, so downstream plots get an unbroken axis. Vertices not
/// referenced by any triangle are ignored.
pub fn shared_vertex_areas(surface: &Surface) -> Result<Vec<TriangleShareBin>> {
    let Topology::Mesh { triangles } = &surface.topology else {
        return Err(AnalysisError::WrongKind {
            expected: SurfaceKind::Mesh,
            actual: surface.kind(),
        });
    };

    let n = surface.particle_count();
    let mut total_area = vec![0.0f64; n];
    let mut triangle_counts = vec![0usize; n];
    for tri in triangles {
        let a = corner(surface, tri[0]);
        let b = corner(surface, tri[1]);
        let c = corner(surface, tri[2]);
        let area = (b - a).cross(c - a).length() * 0.5;
        for &v in tri {
            total_area[v] += area;
            triangle_counts[v] += 1;
        }
    }

    // mean area per vertex, then mean of those means per count
    let mut groups: BTreeMap<usize, (f64, usize)> = BTreeMap::new();
    for v in 0..n {
        if triangle_counts[v] == 0 {
            continue;
        }
        let mean = total_area[v] / triangle_counts[v] as f64;
        let entry = groups.entry(triangle_counts[v]).or_insert((0.0, 0));
        entry.0 += mean;
        entry.1 += 1;
    }

    let (Some((&min_count, _)), Some((&max_count, _))) =
        (groups.first_key_value(), groups.last_key_value())
    else {
        return Ok(Vec::new());
    };

    Ok((min_count..=max_count)
        .map(|count| TriangleShareBin {
            triangle_count: count,
            mean_area: groups.get(&count).map(|&(sum, members)| sum / members as f64),
        })
        .collect())
}

fn corner(surface: &Surface, index: usize) -> DVec3 {
    let p = surface.position(index);
    DVec3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]))
}
