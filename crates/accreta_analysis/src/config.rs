//! Configuration for the analysis passes.
//!
//! Maps to an `analysis.toml` file; every tunable of the samplers and the
//! cross-sectioner can be overridden there, with hardcoded defaults as the
//! base layer.
//!
//! ## Example `analysis.toml`
//!
//! ```toml
//! [sampler]
//! samples = 5000
//! bucket_width = 0.01
//! exclude_adjacent = true
//!
//! [cross_section]
//! canvas_size = 512
//! ```

use serde::{Deserialize, Serialize};

/// Geodesic sampling configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    /// Number of particle pairs to draw.
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Aggregate pairs into buckets of this Euclidean width; `None` keeps
    /// the raw pairs.
    #[serde(default)]
    pub bucket_width: Option<f64>,
    /// Redraw pairs that touch via next/previous. Older producers rejected
    /// such pairs, newer ones keep them; off by default to match the newer
    /// behavior.
    #[serde(default)]
    pub exclude_adjacent: bool,
}

/// Cross-section output configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CrossSectionConfig {
    /// Side length of the square canvas the path data is scaled to.
    #[serde(default = "default_canvas_size")]
    pub canvas_size: u32,
}

fn default_samples() -> usize {
    1000
}

fn default_canvas_size() -> u32 {
    512
}

/// Top-level analysis configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub sampler: SamplerConfig,
    #[serde(default)]
    pub cross_section: CrossSectionConfig,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            bucket_width: None,
            exclude_adjacent: false,
        }
    }
}

impl Default for CrossSectionConfig {
    fn default() -> Self {
        Self {
            canvas_size: default_canvas_size(),
        }
    }
}

impl AnalysisConfig {
    /// Parses and validates configuration from toml content.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        let config = toml::from_str::<Self>(content)?;
        Ok(config)
    }

    /// Checks the configuration for values the analyses cannot work with.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.sampler.samples == 0 {
            return Err("sampler.samples must be positive".to_string());
        }
        if let Some(width) = self.sampler.bucket_width {
            if !(width > 0.0) {
                return Err(format!("sampler.bucket_width {width} must be positive"));
            }
        }
        if self.cross_section.canvas_size == 0 {
            return Err("cross_section.canvas_size must be positive".to_string());
        }
        Ok(())
    }
}
