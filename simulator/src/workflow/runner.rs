use aerocore::interface::AveragesReport;
use aerocore::telemetry::IngestCounters;
use aerocore::{AeroConfig, AeroEngine, Sample, Scenario};
use anyhow::Context;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub struct WorkflowResult {
    pub ingested: usize,
    pub scenario_counts: BTreeMap<Scenario, usize>,
    pub counters: IngestCounters,
    pub averages: AveragesReport,
}

/// Ingest driver owning the engine; clones share the same engine.
#[derive(Clone)]
pub struct Runner {
    engine: Arc<AeroEngine>,
}

impl Runner {
    pub fn new(config: AeroConfig) -> anyhow::Result<Self> {
        let engine = AeroEngine::new(config).context("starting aero engine")?;
        Ok(Self {
            engine: Arc::new(engine),
        })
    }

    pub fn engine(&self) -> Arc<AeroEngine> {
        Arc::clone(&self.engine)
    }

    pub fn execute(&self, samples: &[Sample]) -> anyhow::Result<WorkflowResult> {
        let mut scenario_counts = BTreeMap::new();
        for (index, sample) in samples.iter().enumerate() {
            let processed = self
                .engine
                .ingest(sample)
                .with_context(|| format!("ingesting sample {}", index))?;
            *scenario_counts.entry(processed.scenario).or_insert(0) += 1;
        }

        let averages = self
            .engine
            .query()
            .get_averages()
            .context("collecting scenario averages")?;

        Ok(WorkflowResult {
            ingested: samples.len(),
            scenario_counts,
            counters: self.engine.counters(),
            averages,
        })
    }

    /// Feeds `samples` into the engine at `rate_hz` on a background thread until `stop` is set
    /// or the stream ends. Returns the number of samples ingested.
    pub fn spawn_live<I>(
        &self,
        samples: I,
        rate_hz: f64,
        stop: Arc<AtomicBool>,
    ) -> JoinHandle<anyhow::Result<u64>>
    where
        I: Iterator<Item = Sample> + Send + 'static,
    {
        let engine = self.engine();
        let period = if rate_hz > 0.0 {
            Duration::from_secs_f64(1.0 / rate_hz)
        } else {
            Duration::ZERO
        };

        thread::spawn(move || {
            let mut ingested = 0u64;
            for sample in samples {
                if stop.load(Ordering::Relaxed) {
                    break;
                }
                engine
                    .ingest(&sample)
                    .with_context(|| format!("live ingest of sample {}", ingested))?;
                ingested += 1;
                if !period.is_zero() {
                    thread::sleep(period);
                }
            }
            log::info!("live ingest stopped after {} samples", ingested);
            Ok(ingested)
        })
    }
}
