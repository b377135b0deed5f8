use serde::{Deserialize, Serialize};

/// Shape of the growth boundary a record was simulated inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    Sphere,
    Cylinder,
}

/// Growth boundary of a record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub kind: BoundaryKind,
    pub radius: f32,
    pub extent: f32,
    /// Only written by producers at format revision 5 and later.
    pub with_offset: bool,
}

impl Boundary {
    /// Enclosed volume as the producer computes it.
    ///
    /// Both kinds use `PI * radius^2`. For cylinders the producer assumes
    /// height = 1, so this is really a cross-section area; the formula is
    /// kept bit-for-bit compatible with existing files.
    pub fn volume(&self) -> f32 {
        std::f32::consts::PI * self.radius * self.radius
    }

    /// Default boundary assumed for textual exports that predate the
    /// boundary field: a unit sphere with a thin extent.
    pub fn legacy_default() -> Self {
        Self {
            kind: BoundaryKind::Sphere,
            radius: 1.0,
            extent: 0.05,
            with_offset: false,
        }
    }
}
