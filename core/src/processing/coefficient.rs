use crate::interface::sample::{PortCoefficient, Sample, SkipReason};
use crate::prelude::AeroConfig;

/// `(p - p_static) / (p_dynamic - p_static)`.
pub fn pressure_coefficient(pressure: f64, dynamic: f64, static_: f64) -> f64 {
    (pressure - static_) / (dynamic - static_)
}

/// Coefficients computed from one sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoefficientSet {
    pub coefficients: Vec<PortCoefficient>,
    /// Measurement ports whose reading was absent or non-numeric.
    pub missing_ports: Vec<usize>,
}

/// Normalizes raw port pressures against the configured reference ports.
#[derive(Debug, Clone)]
pub struct CoefficientCalculator {
    measurement_ports: Vec<usize>,
    dynamic_port: usize,
    static_port: usize,
    epsilon: f64,
}

impl CoefficientCalculator {
    pub fn new(config: &AeroConfig) -> Self {
        Self {
            measurement_ports: config.measurement_ports(),
            dynamic_port: config.dynamic_reference_port,
            static_port: config.static_reference_port,
            epsilon: config.degenerate_epsilon,
        }
    }

    pub fn measurement_ports(&self) -> &[usize] {
        &self.measurement_ports
    }

    /// Computes every measurement port's coefficient, or reports why the sample is unusable.
    pub fn compute(&self, sample: &Sample) -> Result<CoefficientSet, SkipReason> {
        let (dynamic, static_) = match (
            sample.pressure(self.dynamic_port),
            sample.pressure(self.static_port),
        ) {
            (Some(dynamic), Some(static_)) => (dynamic, static_),
            _ => return Err(SkipReason::MissingReference),
        };

        let denominator = dynamic - static_;
        if denominator.abs() < self.epsilon {
            return Err(SkipReason::DegenerateReference);
        }

        let mut set = CoefficientSet {
            coefficients: Vec::with_capacity(self.measurement_ports.len()),
            missing_ports: Vec::new(),
        };
        for &port in &self.measurement_ports {
            let value = sample
                .pressure(port)
                .map(|pressure| pressure_coefficient(pressure, dynamic, static_))
                .filter(|value| value.is_finite());
            match value {
                Some(value) => set.coefficients.push(PortCoefficient { port, value }),
                None => set.missing_ports.push(port),
            }
        }
        Ok(set)
    }
}
