use crate::workflow::runner::WorkflowResult;
use aerocore::interface::AveragesReport;
use aerocore::telemetry::IngestCounters;
use aerocore::Scenario;
use serde::Serialize;
use std::collections::BTreeMap;

/// Offline run summary written as the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub ingested: usize,
    pub scenario_counts: BTreeMap<Scenario, usize>,
    pub counters: IngestCounters,
    pub averages: AveragesReport,
}

impl From<&WorkflowResult> for RunReport {
    fn from(result: &WorkflowResult) -> Self {
        Self {
            ingested: result.ingested,
            scenario_counts: result.scenario_counts.clone(),
            counters: result.counters,
            averages: result.averages.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReply {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<Scenario>,
}

impl StatusReply {
    pub fn reset(scenario: Option<Scenario>) -> Self {
        Self {
            status: "reset",
            scenario,
        }
    }
}
