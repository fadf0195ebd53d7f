use crate::generator::profile::GeneratorConfig;
use aerocore::AeroConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub engine: AeroConfig,
    pub generator: GeneratorConfig,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        config
            .engine
            .validate()
            .with_context(|| format!("validating engine section of {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(sample_count: usize, seed: u64, rate_hz: f64) -> Self {
        Self {
            engine: AeroConfig::default(),
            generator: GeneratorConfig {
                sample_count,
                seed,
                rate_hz,
                ..Default::default()
            },
        }
    }
}
