use crate::interface::query::AeroQuery;
use crate::interface::sample::{ProcessedSample, Sample, SkipReason};
use crate::prelude::{AeroConfig, EngineResult};
use crate::processing::{CoefficientCalculator, ScenarioAggregator, ScenarioClassifier};
use crate::telemetry::{IngestCounters, LogManager, MetricsRecorder};
use std::sync::Arc;
use tokio::sync::watch;

/// Ingest pipeline: coefficients, classification and aggregation for each sample.
///
/// Constructed once by the owning service and shared by reference; query and
/// reset callers obtain an [`AeroQuery`] handle instead of touching the engine
/// state directly.
pub struct AeroEngine {
    config: AeroConfig,
    calculator: CoefficientCalculator,
    classifier: ScenarioClassifier,
    aggregator: Arc<ScenarioAggregator>,
    metrics: MetricsRecorder,
    live: watch::Sender<Option<ProcessedSample>>,
    logger: LogManager,
}

impl AeroEngine {
    pub fn new(config: AeroConfig) -> EngineResult<Self> {
        let aggregator = Arc::new(ScenarioAggregator::new(&config)?);
        let (live, _) = watch::channel(None);
        let logger = LogManager::new("engine");
        logger.record(&format!(
            "started with {} ports (dynamic ref {}, static ref {})",
            config.total_ports, config.dynamic_reference_port, config.static_reference_port
        ));

        Ok(Self {
            calculator: CoefficientCalculator::new(&config),
            classifier: ScenarioClassifier::new(&config),
            aggregator,
            metrics: MetricsRecorder::new(),
            live,
            logger,
            config,
        })
    }

    pub fn config(&self) -> &AeroConfig {
        &self.config
    }

    /// Processes one sample and returns its coefficients and scenario.
    ///
    /// Samples with missing or degenerate reference pressures are classified but
    /// contribute nothing to the statistics.
    pub fn ingest(&self, sample: &Sample) -> EngineResult<ProcessedSample> {
        let scenario = self.classifier.classify(sample.steering, sample.lateral_g);

        let processed = match self.calculator.compute(sample) {
            Ok(set) => {
                self.aggregator.record(scenario, &set.coefficients)?;
                if !set.missing_ports.is_empty() {
                    self.logger
                        .detail(&format!("missing readings on ports {:?}", set.missing_ports));
                }
                if set.coefficients.is_empty() {
                    self.metrics.record_empty(set.missing_ports.len());
                } else {
                    self.metrics.record_aggregated(set.missing_ports.len());
                }
                ProcessedSample {
                    timestamp: sample.timestamp,
                    scenario,
                    coefficients: set.coefficients,
                    missing_ports: set.missing_ports,
                    skipped: None,
                }
            }
            Err(reason) => {
                match reason {
                    SkipReason::DegenerateReference => self.metrics.record_degenerate(),
                    SkipReason::MissingReference => self.metrics.record_missing_reference(),
                }
                self.logger.detail(&format!("sample skipped: {:?}", reason));
                ProcessedSample {
                    timestamp: sample.timestamp,
                    scenario,
                    coefficients: Vec::new(),
                    missing_ports: Vec::new(),
                    skipped: Some(reason),
                }
            }
        };

        self.live.send_replace(Some(processed.clone()));
        Ok(processed)
    }

    pub fn query(&self) -> AeroQuery {
        AeroQuery::new(Arc::clone(&self.aggregator))
    }

    /// Receiver that always holds a copy of the most recently processed sample.
    pub fn subscribe(&self) -> watch::Receiver<Option<ProcessedSample>> {
        self.live.subscribe()
    }

    pub fn counters(&self) -> IngestCounters {
        self.metrics.snapshot()
    }
}
