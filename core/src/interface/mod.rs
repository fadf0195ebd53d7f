pub mod query;
pub mod report;
pub mod sample;

pub use query::AeroQuery;
pub use report::{
    AveragesReport, HistogramReport, PortAverage, PortHistogram, PortSnapshot, ScenarioSnapshot,
};
pub use sample::{PortCoefficient, ProcessedSample, Sample, SkipReason};
