//! Geometry descriptors for rendering collaborators.
//!
//! The core never draws anything. Per decoded record it reports the
//! dimension, what boundary shape to show, and a renderable geometry: a
//! vertex/index mesh, bare line segments, or the closed outline of a line
//! record. Collaborators turn these into actual scene objects.

use accreta_data::{BoundaryKind, Surface, Topology};

/// Boundary shape to display around a record, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryGeometry {
    None,
    Sphere { radius: f32 },
    Cylinder { radius: f32 },
}

/// Renderable geometry of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderGeometry {
    /// Flattened xyz vertex positions plus triangle indices.
    TriangleMesh { positions: Vec<f32>, indices: Vec<u32> },
    /// One segment per stored adjacency entry; 2D records get z = 0.
    LineSegments { segments: Vec<[[f32; 3]; 2]> },
    /// Outline of a closed line record, walked from particle 0 via `next`.
    ClosedOutline { points: Vec<[f32; 2]> },
}

/// Everything a rendering collaborator needs for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneUpdate {
    pub dimension: usize,
    pub boundary: BoundaryGeometry,
    pub geometry: RenderGeometry,
}

/// Builds the scene descriptor of one record.
pub fn describe(surface: &Surface) -> SceneUpdate {
    let boundary = match &surface.boundary {
        None => BoundaryGeometry::None,
        Some(b) => match b.kind {
            BoundaryKind::Sphere => BoundaryGeometry::Sphere { radius: b.radius },
            BoundaryKind::Cylinder => BoundaryGeometry::Cylinder { radius: b.radius },
        },
    };

    let geometry = match &surface.topology {
        Topology::Mesh { triangles } => RenderGeometry::TriangleMesh {
            positions: surface.positions.iter().flatten().copied().collect(),
            indices: triangles
                .iter()
                .flat_map(|tri| tri.iter().map(|&v| v as u32))
                .collect(),
        },
        Topology::Tree { neighbours, .. } => RenderGeometry::LineSegments {
            segments: neighbours
                .iter()
                .enumerate()
                .flat_map(|(i, list)| {
                    list.iter()
                        .map(move |&j| [point3(surface, i), point3(surface, j)])
                })
                .collect(),
        },
        Topology::Line { next, .. } => {
            let mut points = Vec::with_capacity(surface.particle_count());
            if !next.is_empty() {
                let mut current = 0;
                loop {
                    let p = surface.position(current);
                    points.push([p[0], p[1]]);
                    current = next[current];
                    if current == 0 {
                        break;
                    }
                }
            }
            RenderGeometry::ClosedOutline { points }
        }
    };

    SceneUpdate {
        dimension: surface.dimension,
        boundary,
        geometry,
    }
}

fn point3(surface: &Surface, index: usize) -> [f32; 3] {
    let p = surface.position(index);
    [p[0], p[1], if p.len() > 2 { p[2] } else { 0.0 }]
}

/// Path data of a closed outline over a square canvas: the outline is
/// centered, scaled to 90% and truncated to integer coordinates, ending
/// with a close command.
pub fn outline_path_data(points: &[[f32; 2]], canvas_size: u32) -> String {
    if points.is_empty() {
        return String::new();
    }
    let map = |c: f32| ((f64::from(c) * 0.45 + 0.5) * f64::from(canvas_size)) as i64;
    let mut path = String::new();
    for (i, p) in points.iter().enumerate() {
        path.push_str(if i == 0 { "M " } else { "L " });
        path.push_str(&format!("{} {} ", map(p[0]), map(p[1])));
    }
    path.push('Z');
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use accreta_data::{Boundary, Metadata};

    fn line_square() -> Surface {
        Surface {
            dimension: 2,
            positions: vec![
                vec![-1.0, -1.0],
                vec![1.0, -1.0],
                vec![1.0, 1.0],
                vec![-1.0, 1.0],
            ],
            topology: Topology::Line {
                next: vec![1, 2, 3, 0],
                previous: vec![3, 0, 1, 2],
            },
            boundary: Some(Boundary::legacy_default()),
            metadata: Metadata::default(),
        }
    }

    #[test]
    fn test_line_outline_walks_the_cycle() {
        let update = describe(&line_square());
        assert_eq!(update.dimension, 2);
        assert_eq!(
            update.boundary,
            BoundaryGeometry::Sphere { radius: 1.0 }
        );
        match update.geometry {
            RenderGeometry::ClosedOutline { points } => {
                assert_eq!(points.len(), 4);
                assert_eq!(points[0], [-1.0, -1.0]);
                assert_eq!(points[2], [1.0, 1.0]);
            }
            other => panic!("expected outline, got {other:?}"),
        }
    }

    #[test]
    fn test_mesh_flattens_vertices_and_indices() {
        let surface = Surface {
            dimension: 3,
            positions: vec![
                vec![0.0, 0.0, 0.0],
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
            ],
            topology: Topology::Mesh {
                triangles: vec![[0, 1, 2]],
            },
            boundary: None,
            metadata: Metadata::default(),
        };
        let update = describe(&surface);
        match update.geometry {
            RenderGeometry::TriangleMesh { positions, indices } => {
                assert_eq!(positions.len(), 9);
                assert_eq!(indices, vec![0, 1, 2]);
            }
            other => panic!("expected mesh, got {other:?}"),
        }
    }

    #[test]
    fn test_tree_emits_one_segment_per_adjacency() {
        let surface = Surface {
            dimension: 2,
            positions: vec![vec![0.0, 0.0], vec![1.0, 0.0]],
            topology: Topology::Tree {
                neighbours: vec![vec![1], vec![0]],
                young: vec![],
            },
            boundary: None,
            metadata: Metadata::default(),
        };
        match describe(&surface).geometry {
            RenderGeometry::LineSegments { segments } => {
                assert_eq!(segments.len(), 2);
                assert_eq!(segments[0], [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
            }
            other => panic!("expected segments, got {other:?}"),
        }
    }

    #[test]
    fn test_outline_path_data() {
        let points = [[-1.0f32, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
        let path = outline_path_data(&points, 1024);
        assert_eq!(path, "M 51 51 L 972 51 L 972 972 L 51 972 Z");
        assert_eq!(outline_path_data(&[], 1024), "");
    }
}
