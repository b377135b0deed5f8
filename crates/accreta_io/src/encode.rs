//! Binary record encoding.
//!
//! Mirrors the decoder's revision gating exactly: fields a revision cannot
//! carry are dropped, matching what a writer of that era would have
//! produced. Trees cannot be written below revision 2 because older layouts
//! have no kind string to mark them.

use crate::error::{DecodeError, Result};
use accreta_data::{Boundary, BoundaryKind, Surface, Topology};

/// Newest format revision this crate can read and write.
pub const LATEST_REVISION: u8 = 5;

/// Encodes several records back to back.
pub fn encode_stream(surfaces: &[Surface], revision: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    for surface in surfaces {
        buf.extend_from_slice(&encode_record(surface, revision)?);
    }
    Ok(buf)
}

/// Encodes one record at the given format revision.
///
/// # Returns
/// The record bytes including the trailing 0x00 footer, or an error when the
/// surface cannot be represented at that revision.
pub fn encode_record(surface: &Surface, revision: u8) -> Result<Vec<u8>> {
    if revision > LATEST_REVISION {
        return Err(DecodeError::malformed(format!(
            "unknown format revision {revision}, newest is {LATEST_REVISION}"
        )));
    }
    let is_tree = matches!(surface.topology, Topology::Tree { .. });
    if is_tree && revision < 2 {
        return Err(DecodeError::malformed(
            "tree records require revision 2 or later",
        ));
    }

    let dimension = surface.dimension;
    if !matches!(dimension, 2 | 3) {
        return Err(DecodeError::malformed(format!(
            "cannot encode dimension {dimension}"
        )));
    }
    let count = surface.particle_count();
    let params = &surface.metadata.params;
    if params.repulsion_anisotropy.len() != dimension {
        return Err(DecodeError::malformed(
            "repulsion anisotropy length must match the dimension",
        ));
    }

    let mut buf = Vec::new();
    if revision == 0 {
        buf.extend_from_slice(b"SRF");
    } else {
        buf.extend_from_slice(b"SEL");
        buf.push(revision);
    }
    buf.push(dimension as u8);

    if revision >= 2 {
        let prefix = if is_tree { 't' } else { 's' };
        push_string(&mut buf, &format!("{prefix}{dimension}"))?;
    }

    push_i64(&mut buf, surface.metadata.timestamp.timestamp());
    push_string(&mut buf, &surface.metadata.machine)?;
    push_i32(&mut buf, surface.metadata.seed);
    push_i32(&mut buf, surface.metadata.iterations);
    push_f32(&mut buf, params.attraction_magnitude);
    push_f32(&mut buf, params.repulsion_magnitude_factor);
    push_f32(&mut buf, params.damping);
    push_f32(&mut buf, params.noise);
    for &a in &params.repulsion_anisotropy {
        push_f32(&mut buf, a);
    }
    push_f32(&mut buf, params.delta_time);
    push_i32(&mut buf, surface.metadata.runtime_ms);

    if revision >= 1 {
        let volume = params.volume.ok_or_else(|| {
            DecodeError::malformed("recorded volume is required from revision 1 onward")
        })?;
        push_f32(&mut buf, volume);
    }

    if revision >= 4 {
        match &surface.boundary {
            Some(boundary) => {
                buf.push(1);
                push_boundary(&mut buf, boundary, revision);
            }
            None => buf.push(0),
        }
    }

    push_i32(&mut buf, count as i32);
    for (i, position) in surface.positions.iter().enumerate() {
        if position.len() != dimension {
            return Err(DecodeError::malformed(format!(
                "particle {i} has {} coordinates, expected {dimension}",
                position.len()
            )));
        }
        for &c in position {
            push_f32(&mut buf, c);
        }
        match &surface.topology {
            Topology::Tree { neighbours, .. } => {
                let list = &neighbours[i];
                push_i32(&mut buf, list.len() as i32);
                for &n in list {
                    push_i32(&mut buf, n as i32);
                }
            }
            Topology::Line { next, .. } => push_i32(&mut buf, next[i] as i32),
            Topology::Mesh { .. } => {}
        }
    }

    if let Topology::Tree { young, .. } = &surface.topology {
        if revision >= 3 {
            push_i32(&mut buf, young.len() as i32);
            for &y in young {
                push_i32(&mut buf, y as i32);
            }
        }
    }

    if let Topology::Mesh { triangles } = &surface.topology {
        push_i32(&mut buf, triangles.len() as i32);
        for tri in triangles {
            for &v in tri {
                push_i32(&mut buf, v as i32);
            }
        }
    }

    buf.push(0);
    Ok(buf)
}

fn push_boundary(buf: &mut Vec<u8>, boundary: &Boundary, revision: u8) {
    buf.push(match boundary.kind {
        BoundaryKind::Sphere => 0,
        BoundaryKind::Cylinder => 1,
    });
    push_f32(buf, boundary.radius);
    push_f32(buf, boundary.extent);
    if revision >= 5 {
        buf.push(u8::from(boundary.with_offset));
    }
}

fn push_i32(buf: &mut Vec<u8>, v: i32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn push_i64(buf: &mut Vec<u8>, v: i64) {
    buf.extend_from_slice(&v.to_le_bytes());
}

// Floats leave in the cursor's scratch order, most significant byte last.
fn push_f32(buf: &mut Vec<u8>, v: f32) {
    let be = v.to_be_bytes();
    buf.extend(be.iter().rev());
}

fn push_string(buf: &mut Vec<u8>, s: &str) -> Result<()> {
    if !s.is_ascii() || s.bytes().any(|b| b == 0) {
        return Err(DecodeError::malformed(format!(
            "string {s:?} is not NUL-free ASCII"
        )));
    }
    buf.extend_from_slice(s.as_bytes());
    buf.push(0);
    Ok(())
}
