pub mod aggregator;
pub mod coefficient;
pub mod scenario;

pub use aggregator::ScenarioAggregator;
pub use coefficient::{CoefficientCalculator, CoefficientSet};
pub use scenario::ScenarioClassifier;
