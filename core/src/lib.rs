//! Aerodynamic telemetry analytics core.
//!
//! Converts multi-port pressure readings into pressure coefficients, tags each
//! sample with the vehicle's dynamic scenario, and keeps bounded rolling
//! statistics plus cumulative distributions per scenario and port for the
//! display layer to query.

pub mod engine;
pub mod interface;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use engine::AeroEngine;
pub use interface::{AeroQuery, ProcessedSample, Sample};
pub use prelude::{AeroConfig, ConfigError, EngineError, EngineResult, Scenario};
