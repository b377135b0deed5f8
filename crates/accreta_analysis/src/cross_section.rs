//! Planar cross-sections of triangulated mesh records.
//!
//! The cutting plane is given as a position and a three-axis rotation; the
//! mesh is moved into the frame where the plane is `z = 0`, every
//! straddling triangle contributes one 2D segment, and the segment bag can
//! be normalized into a unit square and emitted as move/line path data.
//! Segments are deliberately not stitched into closed loops; the bag
//! already reads as the outline.

use crate::error::{AnalysisError, Result};
use accreta_data::{Surface, SurfaceKind, Topology};
use glam::{DMat3, DVec2, DVec3};
use tracing::warn;

/// Tolerance for the plane-hit check on computed intersection points.
const PLANE_TOLERANCE: f64 = 1e-6;

/// Cross-section of one mesh record: an unordered bag of 2D segments in
/// the cutting plane's frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSection {
    pub segments: Vec<[DVec2; 2]>,
    /// Edges skipped because they ran parallel to the cutting plane.
    pub skipped_edges: usize,
}

/// Intersects a mesh record with a plane.
///
/// # Parameters
/// - `position`: a point on the cutting plane
/// - `rotation`: plane orientation as rotations about X, Y, Z, applied in
///   that order
pub fn cross_section(surface: &Surface, position: DVec3, rotation: DVec3) -> Result<CrossSection> {
    let Topology::Mesh { triangles } = &surface.topology else {
        return Err(AnalysisError::WrongKind {
            expected: SurfaceKind::Mesh,
            actual: surface.kind(),
        });
    };

    // undo the plane's transform so it becomes z = 0
    let orient = DMat3::from_rotation_z(-rotation.z)
        * DMat3::from_rotation_y(-rotation.y)
        * DMat3::from_rotation_x(-rotation.x);
    let transformed: Vec<DVec3> = surface
        .positions
        .iter()
        .map(|p| {
            let v = DVec3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]));
            orient * (v - position)
        })
        .collect();

    let mut segments = Vec::new();
    let mut skipped_edges = 0;
    for tri in triangles {
        let corners = [
            transformed[tri[0]],
            transformed[tri[1]],
            transformed[tri[2]],
        ];
        let above = corners.iter().filter(|v| v.z > 0.0).count();
        if above == 0 || above == 3 {
            continue;
        }

        // one odd vertex on the minority side, two even ones opposite it
        let odd_index = if above == 2 {
            corners.iter().position(|v| v.z <= 0.0).unwrap_or(0)
        } else {
            corners.iter().position(|v| v.z > 0.0).unwrap_or(0)
        };
        let odd = corners[odd_index];
        let even: Vec<DVec3> = corners
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != odd_index)
            .map(|(_, &v)| v)
            .collect();

        let d = plane_intersection(even[0], odd);
        let e = plane_intersection(even[1], odd);
        skipped_edges += usize::from(d.is_none()) + usize::from(e.is_none());
        match (d, e) {
            (Some(d), Some(e)) => segments.push([d, e]),
            _ => warn!(?odd, "triangle edge parallel to the cutting plane, skipped"),
        }
    }

    Ok(CrossSection {
        segments,
        skipped_edges,
    })
}

/// Intersection of the line through `from` and `to` with the `z = 0`
/// plane, or `None` when the line runs parallel to it.
fn plane_intersection(from: DVec3, to: DVec3) -> Option<DVec2> {
    let dir = (to - from).normalize_or_zero();
    if dir.z == 0.0 {
        return None;
    }
    let t = -from.z / dir.z;
    let hit = from + dir * t;
    debug_assert!(hit.z.abs() <= PLANE_TOLERANCE, "off-plane hit {}", hit.z);
    Some(DVec2::new(hit.x, hit.y))
}

impl CrossSection {
    /// Segment endpoints remapped into the unit square spanned by their
    /// bounding box. Collapsed axes land in the middle.
    pub fn normalized(&self) -> Vec<[DVec2; 2]> {
        let (min, max) = self.bounds();
        let remap = |p: DVec2| {
            let span = max - min;
            DVec2::new(
                if span.x == 0.0 { 0.5 } else { (p.x - min.x) / span.x },
                if span.y == 0.0 { 0.5 } else { (p.y - min.y) / span.y },
            )
        };
        self.segments.iter().map(|s| [remap(s[0]), remap(s[1])]).collect()
    }

    /// Move/line path data over a square canvas, aspect ratio preserved by
    /// proportionally shrinking the axis opposite the longer one.
    pub fn path_data(&self, canvas_size: u32) -> String {
        if self.segments.is_empty() {
            return String::new();
        }
        let (min, max) = self.bounds();
        let aspect_ratio = (max.x - min.x) / (max.y - min.y);
        let size = f64::from(canvas_size);
        let mut path = String::new();
        for segment in self.normalized() {
            for (i, point) in segment.iter().enumerate() {
                let mut x = -point.x + 0.5;
                let mut y = -point.y + 0.5;
                if aspect_ratio > 1.0 {
                    y /= aspect_ratio;
                } else {
                    x *= aspect_ratio;
                }
                x += 0.5;
                y += 0.5;
                let op = if i == 0 { 'M' } else { 'L' };
                path.push_str(&format!(
                    "{op} {} {} ",
                    (x * size).round() as i64,
                    (y * size).round() as i64
                ));
            }
        }
        path.trim_end().to_string()
    }

    fn bounds(&self) -> (DVec2, DVec2) {
        let mut min = DVec2::splat(f64::INFINITY);
        let mut max = DVec2::splat(f64::NEG_INFINITY);
        for segment in &self.segments {
            for p in segment {
                min = min.min(*p);
                max = max.max(*p);
            }
        }
        (min, max)
    }
}
