//! Format compatibility across binary revisions and the textual variant.

use accreta::{
    decode_stream, encode_record, encode_stream, surfaces_from_json, Boundary, BoundaryKind,
    DecodeError, Metadata, SimulationParams, Surface, SurfaceKind, Topology,
};
use chrono::DateTime;

fn metadata(dimension: usize) -> Metadata {
    Metadata {
        timestamp: DateTime::from_timestamp(1_650_123_456, 0).unwrap(),
        machine: "hephaestus".to_string(),
        seed: 1_234_567,
        iterations: 42_000,
        runtime_ms: 910_000,
        params: SimulationParams {
            attraction_magnitude: 0.026,
            repulsion_magnitude_factor: 2.1,
            damping: 0.92,
            noise: 0.0015,
            repulsion_anisotropy: vec![1.0; dimension],
            delta_time: 0.08,
            volume: Some(1.875),
        },
    }
}

fn line_surface(n: usize) -> Surface {
    let positions = (0..n)
        .map(|i| {
            let theta = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
            vec![theta.cos() as f32, theta.sin() as f32]
        })
        .collect();
    let next: Vec<usize> = (0..n).map(|i| (i + 1) % n).collect();
    let previous = accreta_data::invert_cycle(&next).unwrap();
    Surface {
        dimension: 2,
        positions,
        topology: Topology::Line { next, previous },
        boundary: Some(Boundary {
            kind: BoundaryKind::Sphere,
            radius: 1.2,
            extent: 0.05,
            with_offset: true,
        }),
        metadata: metadata(2),
    }
}

fn tree_surface() -> Surface {
    // a star: particle 0 in the middle
    let mut neighbours = vec![vec![1, 2, 3, 4, 5]];
    for _ in 0..5 {
        neighbours.push(vec![0]);
    }
    Surface {
        dimension: 2,
        positions: vec![vec![0.0, 0.0]; 6],
        topology: Topology::Tree {
            neighbours,
            young: vec![4, 5],
        },
        boundary: None,
        metadata: metadata(2),
    }
}

fn mesh_surface() -> Surface {
    Surface {
        dimension: 3,
        positions: vec![
            vec![0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ],
        topology: Topology::Mesh {
            triangles: vec![[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]],
        },
        boundary: Some(Boundary {
            kind: BoundaryKind::Cylinder,
            radius: 0.8,
            extent: 0.2,
            with_offset: false,
        }),
        metadata: metadata(3),
    }
}

#[test]
fn revision5_roundtrip_reproduces_every_field() {
    for original in [line_surface(12), tree_surface(), mesh_surface()] {
        let bytes = encode_record(&original, 5).unwrap();
        let decoded = decode_stream(&bytes).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0], original, "kind {}", original.kind());
    }
}

#[test]
fn revision0_gates_volume_boundary_and_young() {
    let original = line_surface(8);
    let bytes = encode_record(&original, 0).unwrap();
    assert_eq!(&bytes[..3], b"SRF");
    let decoded = decode_stream(&bytes).unwrap().remove(0);

    // the kind is synthesized from the dimension, structure survives
    assert_eq!(decoded.kind(), SurfaceKind::Line);
    assert_eq!(decoded.positions, original.positions);
    assert_eq!(decoded.topology, original.topology);

    // gated fields fall away
    assert_eq!(decoded.metadata.params.volume, None);
    assert!(decoded.boundary.is_none());

    // while the rest of the metadata is intact
    assert_eq!(decoded.metadata.machine, original.metadata.machine);
    assert_eq!(decoded.metadata.timestamp, original.metadata.timestamp);
}

#[test]
fn with_offset_only_survives_revision5() {
    let original = line_surface(8);
    let decoded4 = decode_stream(&encode_record(&original, 4).unwrap())
        .unwrap()
        .remove(0);
    let decoded5 = decode_stream(&encode_record(&original, 5).unwrap())
        .unwrap()
        .remove(0);
    assert!(!decoded4.boundary.unwrap().with_offset);
    assert!(decoded5.boundary.unwrap().with_offset);
}

#[test]
fn footer_must_be_zero() {
    let mut bytes = encode_record(&mesh_surface(), 5).unwrap();
    let last = bytes.len() - 1;
    bytes[last] = 0x01;
    match decode_stream(&bytes).unwrap_err() {
        DecodeError::CorruptFooter { found, offset } => {
            assert_eq!(found, 0x01);
            assert_eq!(offset, last);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn decoded_line_next_pointers_form_one_cycle() {
    let n = 24;
    let bytes = encode_record(&line_surface(n), 5).unwrap();
    let decoded = decode_stream(&bytes).unwrap().remove(0);
    let Topology::Line { next, .. } = &decoded.topology else {
        panic!("expected a line");
    };

    for start in [0, 7, n - 1] {
        let mut seen = vec![false; n];
        let mut current = start;
        for _ in 0..n {
            assert!(!seen[current], "index {current} visited twice");
            seen[current] = true;
            current = next[current];
        }
        assert_eq!(current, start, "walking next {n} times must return home");
        assert!(seen.iter().all(|&s| s), "cycle must visit every particle");
    }
}

#[test]
fn streams_may_concatenate_mixed_revisions() {
    let mut bytes = encode_record(&line_surface(6), 0).unwrap();
    bytes.extend(encode_record(&mesh_surface(), 5).unwrap());
    bytes.extend(encode_record(&tree_surface(), 3).unwrap());
    let decoded = decode_stream(&bytes).unwrap();
    assert_eq!(decoded.len(), 3);
    assert_eq!(decoded[0].kind(), SurfaceKind::Line);
    assert_eq!(decoded[1].kind(), SurfaceKind::Mesh);
    assert_eq!(decoded[2].kind(), SurfaceKind::Tree);
}

#[test]
fn encode_stream_matches_record_concatenation() {
    let surfaces = [line_surface(6), mesh_surface()];
    let streamed = encode_stream(&surfaces, 5).unwrap();
    let mut manual = encode_record(&surfaces[0], 5).unwrap();
    manual.extend(encode_record(&surfaces[1], 5).unwrap());
    assert_eq!(streamed, manual);
}

#[test]
fn textual_variant_builds_the_same_line_model() {
    let json = r#"{
        "dimension": 2,
        "date": 1650123456,
        "seed": 1234567,
        "timesteps": 42000,
        "machine": "hephaestus",
        "runtime": 910000,
        "attractionMagnitude": 0.026,
        "repulsionMagnitudeFactor": 2.1,
        "damping": 0.92,
        "noise": 0.0015,
        "repulsionAnisotropy": [1.0, 1.0],
        "dt": 0.08,
        "volume": 1.875,
        "boundary": { "type": "sphere", "radius": 1.2, "extent": 0.05 },
        "particles": [
            { "position": [1.0, 0.0], "next": 1 },
            { "position": [0.0, 1.0], "next": 2 },
            { "position": [-1.0, 0.0], "next": 3 },
            { "position": [0.0, -1.0], "next": 0 }
        ]
    }"#;
    let from_json = surfaces_from_json(json).unwrap().remove(0);

    let mut reference = line_surface(4);
    // the textual variant never carries the offset flag
    reference.boundary.as_mut().unwrap().with_offset = false;
    assert_eq!(from_json.metadata, reference.metadata);
    assert_eq!(from_json.boundary, reference.boundary);
    assert_eq!(from_json.topology, reference.topology);
}
