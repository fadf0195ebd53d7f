use crate::prelude::Scenario;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Point-in-time copy of one (scenario, port) pair.
///
/// `mean`, `std`, `min` and `max` describe the bounded recent window and are
/// `None` while it is empty. `histogram_counts` and `total_samples` are
/// cumulative since the last reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortSnapshot {
    pub port: usize,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub histogram_bins: Vec<f64>,
    pub histogram_counts: Vec<u64>,
    pub percentages: Vec<f64>,
    pub total_samples: u64,
    pub range: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSnapshot {
    pub scenario: Scenario,
    pub ports: Vec<PortSnapshot>,
}

impl ScenarioSnapshot {
    pub fn port(&self, port: usize) -> Option<&PortSnapshot> {
        self.ports.iter().find(|p| p.port == port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortAverage {
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl From<&PortSnapshot> for PortAverage {
    fn from(snapshot: &PortSnapshot) -> Self {
        Self {
            mean: snapshot.mean,
            std: snapshot.std,
            count: snapshot.count,
            min: snapshot.min,
            max: snapshot.max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortHistogram {
    /// Bin centers.
    pub bins: Vec<f64>,
    pub counts: Vec<u64>,
    pub percentages: Vec<f64>,
    pub total_samples: u64,
    pub range: [f64; 2],
}

impl From<PortSnapshot> for PortHistogram {
    fn from(snapshot: PortSnapshot) -> Self {
        Self {
            bins: snapshot.histogram_bins,
            counts: snapshot.histogram_counts,
            percentages: snapshot.percentages,
            total_samples: snapshot.total_samples,
            range: snapshot.range,
        }
    }
}

/// Scenario -> port -> window averages.
pub type AveragesReport = BTreeMap<Scenario, BTreeMap<usize, PortAverage>>;

/// Port -> histogram for a single scenario.
pub type HistogramReport = BTreeMap<usize, PortHistogram>;
