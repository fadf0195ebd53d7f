use crate::interface::report::{AveragesReport, HistogramReport, PortAverage, PortHistogram};
use crate::prelude::{EngineResult, Scenario};
use crate::processing::aggregator::ScenarioAggregator;
use std::sync::Arc;

/// Read/reset handle handed to the display and API layers.
///
/// Cheap to clone; every clone shares the engine's aggregator. All calls copy
/// out owned reports and hold at most one scenario lock at a time, except a
/// full reset.
#[derive(Clone)]
pub struct AeroQuery {
    aggregator: Arc<ScenarioAggregator>,
}

impl AeroQuery {
    pub fn new(aggregator: Arc<ScenarioAggregator>) -> Self {
        Self { aggregator }
    }

    /// Window mean, deviation and count for every scenario and measurement port.
    pub fn get_averages(&self) -> EngineResult<AveragesReport> {
        let mut report = AveragesReport::new();
        for scenario in Scenario::ALL {
            let snapshot = self.aggregator.snapshot(scenario)?;
            let ports = snapshot
                .ports
                .iter()
                .map(|port| (port.port, PortAverage::from(port)))
                .collect();
            report.insert(scenario, ports);
        }
        Ok(report)
    }

    pub fn get_histograms(&self, scenario: Scenario) -> EngineResult<HistogramReport> {
        let snapshot = self.aggregator.snapshot(scenario)?;
        Ok(snapshot
            .ports
            .into_iter()
            .map(|port| (port.port, PortHistogram::from(port)))
            .collect())
    }

    pub fn get_histogram(&self, scenario: Scenario, port: usize) -> EngineResult<PortHistogram> {
        self.aggregator
            .port_snapshot(scenario, port)
            .map(PortHistogram::from)
    }

    pub fn reset_averages(&self, scenario: Option<Scenario>) -> EngineResult<()> {
        self.aggregator.reset(scenario)
    }
}
