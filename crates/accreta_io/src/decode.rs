//! Versioned binary record decoding.
//!
//! A stream holds one or more records back to back. Each record starts with
//! a 3-byte magic: `SRF` marks the original layout (revision 0, no version
//! byte), `SEL` is followed by a single revision byte. The revision gates
//! which fields are present:
//!
//! - revision 1 adds the recorded volume
//! - revision 2 stores the kind string explicitly (`s…` surface, `t…` tree);
//!   older records synthesize `"s" + dimension`
//! - revision 3 adds the young-node index array for trees
//! - revision 4 adds the optional boundary block
//! - revision 5 adds the boundary `with_offset` flag
//!
//! Decoding is strictly sequential and non-resumable mid-record: the first
//! failure aborts the whole stream. All index fields are validated against
//! the particle count while reading, so errors carry the exact byte offset.

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, Result};
use accreta_data::{
    invert_cycle, Boundary, BoundaryKind, Metadata, SimulationParams, Surface, Topology,
};
use chrono::DateTime;
use tracing::debug;

/// Decodes every record in `data` until the buffer is exhausted.
///
/// # Returns
/// All decoded surfaces, or the first fatal error with its byte offset.
pub fn decode_stream(data: &[u8]) -> Result<Vec<Surface>> {
    let mut cursor = ByteCursor::new(data);
    let mut surfaces = Vec::new();
    while cursor.remaining() > 0 {
        surfaces.push(decode_record(&mut cursor)?);
    }
    Ok(surfaces)
}

/// Decodes a single record at the cursor's current position.
pub fn decode_record(cursor: &mut ByteCursor) -> Result<Surface> {
    let record_offset = cursor.offset();
    let magic = [cursor.read_u8()?, cursor.read_u8()?, cursor.read_u8()?];
    let revision = match &magic {
        b"SRF" => 0,
        b"SEL" => cursor.read_u8()?,
        _ => {
            return Err(DecodeError::MalformedHeader {
                found: magic,
                offset: record_offset,
            })
        }
    };

    let dimension_offset = cursor.offset();
    let dimension_byte = cursor.read_u8()?;
    if !matches!(dimension_byte, 2 | 3) {
        return Err(DecodeError::InvalidDimension {
            value: dimension_byte,
            offset: dimension_offset,
        });
    }
    let dimension = dimension_byte as usize;

    let kind = if revision < 2 {
        format!("s{dimension}")
    } else {
        cursor.read_string()?
    };
    let is_tree = kind.starts_with('t');

    let timestamp_offset = cursor.offset();
    let unix_seconds = cursor.read_i64()?;
    let timestamp = DateTime::from_timestamp(unix_seconds, 0).ok_or_else(|| {
        DecodeError::malformed(format!(
            "timestamp {unix_seconds} out of range at offset {timestamp_offset}"
        ))
    })?;

    let machine = cursor.read_string()?;
    let seed = cursor.read_i32()?;
    let iterations = cursor.read_i32()?;
    let attraction_magnitude = cursor.read_f32()?;
    let repulsion_magnitude_factor = cursor.read_f32()?;
    let damping = cursor.read_f32()?;
    let noise = cursor.read_f32()?;
    let repulsion_anisotropy = cursor.read_vec(dimension)?;
    let delta_time = cursor.read_f32()?;
    let runtime_ms = cursor.read_i32()?;
    let volume = if revision < 1 {
        None
    } else {
        Some(cursor.read_f32()?)
    };

    let has_boundary = if revision < 4 {
        false
    } else {
        cursor.read_bool()?
    };
    let boundary = if has_boundary {
        Some(decode_boundary(cursor, revision)?)
    } else {
        None
    };

    let count = read_count(cursor, "particle count")?;

    let mut positions = Vec::with_capacity(count);
    let mut neighbours: Vec<Vec<usize>> = Vec::new();
    let mut next: Vec<usize> = Vec::new();
    for _ in 0..count {
        positions.push(cursor.read_vec(dimension)?);
        if is_tree {
            neighbours.push(read_index_array(cursor, count)?);
        } else if dimension == 2 {
            next.push(read_index(cursor, count)?);
        }
    }

    let young = if is_tree && revision >= 3 {
        read_index_array(cursor, count)?
    } else {
        Vec::new()
    };

    let triangles = if dimension == 3 && !is_tree {
        let triangle_count = read_count(cursor, "triangle count")?;
        let mut triangles = Vec::with_capacity(triangle_count);
        for _ in 0..triangle_count {
            triangles.push([
                read_index(cursor, count)?,
                read_index(cursor, count)?,
                read_index(cursor, count)?,
            ]);
        }
        triangles
    } else {
        Vec::new()
    };

    let footer_offset = cursor.offset();
    let footer = cursor.read_u8()?;
    if footer != 0 {
        return Err(DecodeError::CorruptFooter {
            found: footer,
            offset: footer_offset,
        });
    }

    let topology = if is_tree {
        Topology::Tree { neighbours, young }
    } else if dimension == 2 {
        let previous = invert_cycle(&next).ok_or_else(|| {
            DecodeError::malformed(format!(
                "next pointers of record at offset {record_offset} are not a closed cycle"
            ))
        })?;
        Topology::Line { next, previous }
    } else {
        Topology::Mesh { triangles }
    };

    debug!(
        revision,
        dimension,
        kind = %kind,
        particles = count,
        "decoded surface record"
    );

    Ok(Surface {
        dimension,
        positions,
        topology,
        boundary,
        metadata: Metadata {
            timestamp,
            machine,
            seed,
            iterations,
            runtime_ms,
            params: SimulationParams {
                attraction_magnitude,
                repulsion_magnitude_factor,
                damping,
                noise,
                repulsion_anisotropy,
                delta_time,
                volume,
            },
        },
    })
}

fn decode_boundary(cursor: &mut ByteCursor, revision: u8) -> Result<Boundary> {
    let type_offset = cursor.offset();
    let type_byte = cursor.read_u8()?;
    let kind = match type_byte {
        0 => BoundaryKind::Sphere,
        1 => BoundaryKind::Cylinder,
        value => {
            return Err(DecodeError::UnsupportedBoundaryType {
                value,
                offset: type_offset,
            })
        }
    };
    let radius = cursor.read_f32()?;
    let extent = cursor.read_f32()?;
    let with_offset = if revision < 5 {
        false
    } else {
        cursor.read_u8()? == 1
    };
    Ok(Boundary {
        kind,
        radius,
        extent,
        with_offset,
    })
}

fn read_count(cursor: &mut ByteCursor, what: &str) -> Result<usize> {
    let offset = cursor.offset();
    let count = cursor.read_i32()?;
    if count < 0 {
        return Err(DecodeError::malformed(format!(
            "negative {what} {count} at offset {offset}"
        )));
    }
    Ok(count as usize)
}

fn read_index(cursor: &mut ByteCursor, count: usize) -> Result<usize> {
    let offset = cursor.offset();
    let index = cursor.read_i32()?;
    if index < 0 || index as usize >= count {
        return Err(DecodeError::InvalidIndex {
            index: i64::from(index),
            count,
            offset,
        });
    }
    Ok(index as usize)
}

fn read_index_array(cursor: &mut ByteCursor, count: usize) -> Result<Vec<usize>> {
    let len = read_count(cursor, "index array length")?;
    let mut indices = Vec::with_capacity(len);
    for _ in 0..len {
        indices.push(read_index(cursor, count)?);
    }
    Ok(indices)
}
