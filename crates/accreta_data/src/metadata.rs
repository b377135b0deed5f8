use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parameters the growth simulation ran with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub attraction_magnitude: f32,
    pub repulsion_magnitude_factor: f32,
    pub damping: f32,
    pub noise: f32,
    /// Per-axis scaling of the repulsion force, one entry per dimension.
    pub repulsion_anisotropy: Vec<f32>,
    pub delta_time: f32,
    /// Only present from format revision 1 onward.
    pub volume: Option<f32>,
}

/// Provenance of a record: where, when and how it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub timestamp: DateTime<Utc>,
    pub machine: String,
    pub seed: i32,
    pub iterations: i32,
    pub runtime_ms: i32,
    pub params: SimulationParams,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            attraction_magnitude: 0.0,
            repulsion_magnitude_factor: 0.0,
            damping: 0.0,
            noise: 0.0,
            repulsion_anisotropy: Vec::new(),
            delta_time: 0.0,
            volume: None,
        }
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            timestamp: DateTime::UNIX_EPOCH,
            machine: String::new(),
            seed: 0,
            iterations: 0,
            runtime_ms: 0,
            params: SimulationParams::default(),
        }
    }
}
