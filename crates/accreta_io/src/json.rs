//! Adapter for the textual (JSON) record variant.
//!
//! The textual exports carry the same logical fields as the binary format,
//! camelCased, either as a single record object or an array of them. Older
//! exports predate the boundary field entirely; for those the boundary
//! defaults to a unit sphere of small extent. An explicit `"boundary": null`
//! means no boundary.

use crate::error::{DecodeError, Result};
use accreta_data::{
    invert_cycle, Boundary, BoundaryKind, Metadata, SimulationParams, Surface, Topology,
};
use chrono::DateTime;
use serde::Deserialize;

#[derive(Deserialize)]
struct ParticleRecord {
    position: Vec<f32>,
    #[serde(default)]
    next: Option<i64>,
    #[serde(default)]
    neighbours: Option<Vec<i64>>,
}

#[derive(Deserialize)]
struct BoundaryRecord {
    #[serde(rename = "type")]
    kind: BoundaryKind,
    radius: f32,
    extent: f32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SurfaceRecord {
    #[serde(default = "default_dimension")]
    dimension: usize,
    #[serde(default)]
    date: i64,
    #[serde(default)]
    seed: i32,
    #[serde(default)]
    timesteps: i32,
    #[serde(default)]
    machine: String,
    #[serde(default)]
    runtime: i32,
    #[serde(default)]
    attraction_magnitude: f32,
    #[serde(default)]
    repulsion_magnitude_factor: f32,
    #[serde(default)]
    damping: f32,
    #[serde(default)]
    noise: f32,
    #[serde(default)]
    repulsion_anisotropy: Option<Vec<f32>>,
    #[serde(default)]
    dt: f32,
    #[serde(default)]
    volume: Option<f32>,
    /// Absent field and explicit `null` mean different things here, hence
    /// the double option.
    #[serde(default, deserialize_with = "deserialize_some")]
    boundary: Option<Option<BoundaryRecord>>,
    #[serde(default)]
    particles: Vec<ParticleRecord>,
    #[serde(default)]
    triangles: Vec<[i64; 3]>,
}

fn default_dimension() -> usize {
    3
}

fn deserialize_some<'de, D>(deserializer: D) -> std::result::Result<Option<Option<BoundaryRecord>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<BoundaryRecord>::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<SurfaceRecord>),
    One(SurfaceRecord),
}

/// Builds `Surface` records from a textual export.
///
/// # Parameters
/// - `json`: one record object or an array of them
///
/// # Returns
/// The validated surfaces, or an error describing the first violation.
pub fn surfaces_from_json(json: &str) -> Result<Vec<Surface>> {
    if json.trim().is_empty() {
        return Err(DecodeError::malformed("empty JSON input"));
    }
    let records = match serde_json::from_str::<OneOrMany>(json)? {
        OneOrMany::Many(records) => records,
        OneOrMany::One(record) => vec![record],
    };
    records.into_iter().map(surface_from_record).collect()
}

fn surface_from_record(record: SurfaceRecord) -> Result<Surface> {
    let dimension = record.dimension;
    if !matches!(dimension, 2 | 3) {
        return Err(DecodeError::malformed(format!(
            "invalid dimension {dimension}"
        )));
    }

    let count = record.particles.len();
    let mut positions = Vec::with_capacity(count);
    let mut next = Vec::new();
    let mut neighbours = Vec::new();
    for (i, particle) in record.particles.iter().enumerate() {
        if particle.position.len() != dimension {
            return Err(DecodeError::malformed(format!(
                "particle {i} has {} coordinates, expected {dimension}",
                particle.position.len()
            )));
        }
        positions.push(particle.position.clone());
        if let Some(list) = &particle.neighbours {
            neighbours.push(
                list.iter()
                    .map(|&n| checked_index(n, count))
                    .collect::<Result<Vec<_>>>()?,
            );
        } else if let Some(n) = particle.next {
            next.push(checked_index(n, count)?);
        }
    }

    let topology = if neighbours.len() == count && count > 0 {
        Topology::Tree {
            neighbours,
            young: Vec::new(),
        }
    } else if next.len() == count && dimension == 2 {
        let previous = invert_cycle(&next)
            .ok_or_else(|| DecodeError::malformed("next pointers are not a closed cycle"))?;
        Topology::Line { next, previous }
    } else if dimension == 3 && neighbours.is_empty() && next.is_empty() {
        Topology::Mesh {
            triangles: record
                .triangles
                .iter()
                .map(|tri| {
                    Ok([
                        checked_index(tri[0], count)?,
                        checked_index(tri[1], count)?,
                        checked_index(tri[2], count)?,
                    ])
                })
                .collect::<Result<Vec<_>>>()?,
        }
    } else {
        return Err(DecodeError::malformed(
            "particles mix or lack connectivity; expected uniform next, neighbours, or none",
        ));
    };

    let boundary = match record.boundary {
        // legacy exports: field absent entirely
        None => Some(Boundary::legacy_default()),
        Some(None) => None,
        Some(Some(b)) => Some(Boundary {
            kind: b.kind,
            radius: b.radius,
            extent: b.extent,
            with_offset: false,
        }),
    };

    let timestamp = DateTime::from_timestamp(record.date, 0)
        .ok_or_else(|| DecodeError::malformed(format!("timestamp {} out of range", record.date)))?;

    Ok(Surface {
        dimension,
        positions,
        topology,
        boundary,
        metadata: Metadata {
            timestamp,
            machine: record.machine,
            seed: record.seed,
            iterations: record.timesteps,
            runtime_ms: record.runtime,
            params: SimulationParams {
                attraction_magnitude: record.attraction_magnitude,
                repulsion_magnitude_factor: record.repulsion_magnitude_factor,
                damping: record.damping,
                noise: record.noise,
                // neutral scaling when the export predates anisotropy
                repulsion_anisotropy: record
                    .repulsion_anisotropy
                    .unwrap_or_else(|| vec![1.0; dimension]),
                delta_time: record.dt,
                volume: record.volume,
            },
        },
    })
}

fn checked_index(index: i64, count: usize) -> Result<usize> {
    if index < 0 || index as usize >= count {
        return Err(DecodeError::malformed(format!(
            "index {index} out of range for {count} particles"
        )));
    }
    Ok(index as usize)
}
