use crate::interface::report::{PortSnapshot, ScenarioSnapshot};
use crate::interface::sample::PortCoefficient;
use crate::math::{Histogram, RollingWindow};
use crate::prelude::{AeroConfig, EngineError, EngineResult, Scenario};
use crate::telemetry::log::LogManager;
use std::sync::{Mutex, MutexGuard};

/// Recent window plus cumulative distribution for one (scenario, port) pair.
#[derive(Debug, Clone)]
struct PortStats {
    window: RollingWindow,
    histogram: Histogram,
}

impl PortStats {
    fn new(config: &AeroConfig) -> Self {
        Self {
            window: RollingWindow::with_capacity(config.window_size),
            histogram: Histogram::new(
                config.histogram_bins,
                config.range_min(),
                config.range_max(),
            ),
        }
    }

    fn record(&mut self, value: f64) {
        self.window.push(value);
        self.histogram.record(value);
    }

    fn clear(&mut self) {
        self.window.clear();
        self.histogram.clear();
    }

    fn snapshot(&self, port: usize) -> PortSnapshot {
        PortSnapshot {
            port,
            count: self.window.len(),
            mean: self.window.mean(),
            std: self.window.std(),
            min: self.window.min(),
            max: self.window.max(),
            histogram_bins: self.histogram.bin_centers(),
            histogram_counts: self.histogram.counts().to_vec(),
            percentages: self.histogram.percentages(),
            total_samples: self.histogram.total(),
            range: self.histogram.range(),
        }
    }
}

#[derive(Debug)]
struct ScenarioStats {
    ports: Vec<PortStats>,
}

impl ScenarioStats {
    fn clear(&mut self) {
        self.ports.iter_mut().for_each(PortStats::clear);
    }
}

/// Per-scenario rolling statistics over every measurement port.
///
/// Storage for all (scenario, port) pairs is allocated at construction. Each
/// scenario sits behind its own lock, so readers of one scenario never stall
/// ingest into another, and every update, snapshot or reset of a scenario is
/// atomic with respect to the others.
pub struct ScenarioAggregator {
    /// Measurement port number -> storage slot; indexed by port number.
    slots: Vec<Option<usize>>,
    ports: Vec<usize>,
    scenarios: [Mutex<ScenarioStats>; 3],
    logger: LogManager,
}

impl ScenarioAggregator {
    pub fn new(config: &AeroConfig) -> EngineResult<Self> {
        config.validate()?;

        let ports = config.measurement_ports();
        let mut slots = vec![None; config.total_ports + 1];
        for (slot, &port) in ports.iter().enumerate() {
            slots[port] = Some(slot);
        }
        let scenario_stats = || {
            Mutex::new(ScenarioStats {
                ports: ports.iter().map(|_| PortStats::new(config)).collect(),
            })
        };

        let logger = LogManager::new("aggregator");
        logger.record(&format!(
            "tracking {} ports x {} scenarios, window {}, {} bins over [{}, {}]",
            ports.len(),
            Scenario::ALL.len(),
            config.window_size,
            config.histogram_bins,
            config.range_min(),
            config.range_max()
        ));

        Ok(Self {
            scenarios: [scenario_stats(), scenario_stats(), scenario_stats()],
            slots,
            ports,
            logger,
        })
    }

    /// Measurement ports in storage order.
    pub fn ports(&self) -> &[usize] {
        &self.ports
    }

    fn slot(&self, port: usize) -> EngineResult<usize> {
        self.slots
            .get(port)
            .copied()
            .flatten()
            .ok_or(EngineError::UnknownPort(port))
    }

    fn lock(&self, scenario: Scenario) -> EngineResult<MutexGuard<'_, ScenarioStats>> {
        self.scenarios[scenario.index()]
            .lock()
            .map_err(|_| EngineError::Poisoned(scenario))
    }

    fn checked(&self, port: usize, value: f64) -> EngineResult<usize> {
        let slot = self.slot(port)?;
        if !value.is_finite() {
            return Err(EngineError::NonFinite { port, value });
        }
        Ok(slot)
    }

    /// Adds one coefficient to the pair's window and histogram.
    pub fn update(&self, scenario: Scenario, port: usize, value: f64) -> EngineResult<()> {
        let slot = self.checked(port, value)?;
        let mut stats = self.lock(scenario)?;
        stats.ports[slot].record(value);
        Ok(())
    }

    /// Adds every coefficient of one sample under a single lock acquisition.
    ///
    /// The batch is validated up front; on error nothing is recorded.
    pub fn record(&self, scenario: Scenario, coefficients: &[PortCoefficient]) -> EngineResult<()> {
        let slots = coefficients
            .iter()
            .map(|c| self.checked(c.port, c.value))
            .collect::<EngineResult<Vec<_>>>()?;

        let mut stats = self.lock(scenario)?;
        for (slot, coefficient) in slots.into_iter().zip(coefficients) {
            stats.ports[slot].record(coefficient.value);
        }
        Ok(())
    }

    pub fn snapshot(&self, scenario: Scenario) -> EngineResult<ScenarioSnapshot> {
        let stats = self.lock(scenario)?;
        let ports = self
            .ports
            .iter()
            .zip(&stats.ports)
            .map(|(&port, port_stats)| port_stats.snapshot(port))
            .collect();
        Ok(ScenarioSnapshot { scenario, ports })
    }

    pub fn port_snapshot(&self, scenario: Scenario, port: usize) -> EngineResult<PortSnapshot> {
        let slot = self.slot(port)?;
        let stats = self.lock(scenario)?;
        Ok(stats.ports[slot].snapshot(port))
    }

    /// Current window contents for a pair, oldest first.
    pub fn window_values(&self, scenario: Scenario, port: usize) -> EngineResult<Vec<f64>> {
        let slot = self.slot(port)?;
        let stats = self.lock(scenario)?;
        Ok(stats.ports[slot].window.values().collect())
    }

    /// Clears the given scenario, or every scenario when `None`.
    ///
    /// A full reset holds all scenario locks at once, taken in
    /// [`Scenario::ALL`] order.
    pub fn reset(&self, scenario: Option<Scenario>) -> EngineResult<()> {
        match scenario {
            Some(scenario) => {
                self.lock(scenario)?.clear();
                self.logger.record(&format!("reset {}", scenario));
            }
            None => {
                let mut guards = Scenario::ALL
                    .iter()
                    .map(|&scenario| self.lock(scenario))
                    .collect::<EngineResult<Vec<_>>>()?;
                guards.iter_mut().for_each(|stats| stats.clear());
                drop(guards);
                self.logger.record("reset all scenarios");
            }
        }
        Ok(())
    }
}
