use crate::prelude::{EngineResult, Scenario};
use serde::{Deserialize, Serialize};

/// One instant of telemetry as delivered by the ingest layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Readings for ports `1..=N`; index 0 holds port 1. `None` marks a missing reading.
    pub pressures: Vec<Option<f64>>,
    pub steering: f64,
    pub lateral_g: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

impl Sample {
    pub fn new(pressures: Vec<f64>, steering: f64, lateral_g: f64) -> Self {
        Self {
            pressures: pressures.into_iter().map(Some).collect(),
            steering,
            lateral_g,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Usable reading for a 1-based `port`; absent and non-finite readings yield `None`.
    pub fn pressure(&self, port: usize) -> Option<f64> {
        port.checked_sub(1)
            .and_then(|index| self.pressures.get(index).copied().flatten())
            .filter(|value| value.is_finite())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortCoefficient {
    pub port: usize,
    pub value: f64,
}

/// Why a sample contributed no coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingReference,
    DegenerateReference,
}

/// Immediate per-sample result handed back to the ingest caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedSample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    pub scenario: Scenario,
    pub coefficients: Vec<PortCoefficient>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_ports: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
}

impl ProcessedSample {
    pub fn coefficient(&self, port: usize) -> Option<f64> {
        self.coefficients
            .iter()
            .find(|c| c.port == port)
            .map(|c| c.value)
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
