use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Engine configuration, fixed for the lifetime of an [`AeroEngine`](crate::AeroEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AeroConfig {
    pub total_ports: usize,
    pub dynamic_reference_port: usize,
    pub static_reference_port: usize,
    pub straight_threshold: f64,
    pub turn_threshold: f64,
    pub lateral_g_threshold: f64,
    pub window_size: usize,
    pub histogram_bins: usize,
    pub histogram_range: [f64; 2],
    /// Smallest reference pressure difference treated as significant.
    pub degenerate_epsilon: f64,
}

impl Default for AeroConfig {
    fn default() -> Self {
        Self {
            total_ports: 8,
            dynamic_reference_port: 7,
            static_reference_port: 8,
            straight_threshold: 0.1,
            turn_threshold: 0.3,
            lateral_g_threshold: 0.2,
            window_size: 100,
            histogram_bins: 20,
            histogram_range: [-3.0, 3.0],
            degenerate_epsilon: 1e-6,
        }
    }
}

impl AeroConfig {
    pub fn range_min(&self) -> f64 {
        self.histogram_range[0]
    }

    pub fn range_max(&self) -> f64 {
        self.histogram_range[1]
    }

    /// Checks every construction-time constraint; the engine refuses to start on error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::WindowSize);
        }
        if self.histogram_bins == 0 {
            return Err(ConfigError::HistogramBins);
        }
        let [min, max] = self.histogram_range;
        let bin_width = (max - min) / self.histogram_bins as f64;
        if !min.is_finite() || !max.is_finite() || min >= max || !bin_width.is_finite() {
            return Err(ConfigError::HistogramRange { min, max });
        }
        for (role, port) in [
            ("dynamic", self.dynamic_reference_port),
            ("static", self.static_reference_port),
        ] {
            if port == 0 || port > self.total_ports {
                return Err(ConfigError::ReferencePort {
                    role,
                    port,
                    total_ports: self.total_ports,
                });
            }
        }
        if self.dynamic_reference_port == self.static_reference_port {
            return Err(ConfigError::SharedReferencePort(self.dynamic_reference_port));
        }
        for (name, value) in [
            ("straight_threshold", self.straight_threshold),
            ("turn_threshold", self.turn_threshold),
            ("lateral_g_threshold", self.lateral_g_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Threshold { name, value });
            }
        }
        if !self.degenerate_epsilon.is_finite() || self.degenerate_epsilon <= 0.0 {
            return Err(ConfigError::Epsilon(self.degenerate_epsilon));
        }
        Ok(())
    }

    /// Ports that produce coefficients: every port except the two references, ascending.
    pub fn measurement_ports(&self) -> Vec<usize> {
        (1..=self.total_ports)
            .filter(|&port| {
                port != self.dynamic_reference_port && port != self.static_reference_port
            })
            .collect()
    }
}

/// Discrete vehicle dynamic state derived per sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Straight,
    TurnLeft,
    TurnRight,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Straight, Scenario::TurnLeft, Scenario::TurnRight];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::TurnLeft => "turn_left",
            Self::TurnRight => "turn_right",
        }
    }

    /// Position in [`Scenario::ALL`]; also the fixed lock order.
    pub fn index(&self) -> usize {
        match self {
            Self::Straight => 0,
            Self::TurnLeft => 1,
            Self::TurnRight => 2,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "straight" => Ok(Self::Straight),
            "turn_left" => Ok(Self::TurnLeft),
            "turn_right" => Ok(Self::TurnRight),
            other => Err(EngineError::UnknownScenario(other.to_string())),
        }
    }
}

/// Construction-time configuration failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("window size must be at least 1")]
    WindowSize,
    #[error("histogram bin count must be at least 1")]
    HistogramBins,
    #[error("histogram range [{min}, {max}] must be finite with min < max")]
    HistogramRange { min: f64, max: f64 },
    #[error("{role} reference port {port} outside 1..={total_ports}")]
    ReferencePort {
        role: &'static str,
        port: usize,
        total_ports: usize,
    },
    #[error("dynamic and static reference both use port {0}")]
    SharedReferencePort(usize),
    #[error("{name} must be a finite non-negative number, got {value}")]
    Threshold { name: &'static str, value: f64 },
    #[error("degenerate epsilon must be finite and positive, got {0}")]
    Epsilon(f64),
}

/// Common error type for engine operations.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("port {0} is not a measurement port")]
    UnknownPort(usize),
    #[error("non-finite value {value} for port {port}")]
    NonFinite { port: usize, value: f64 },
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),
    #[error("statistics lock for {0} poisoned")]
    Poisoned(Scenario),
    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AeroConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.measurement_ports(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn validate_rejects_empty_window_and_bins() {
        let config = AeroConfig {
            window_size: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::WindowSize));

        let config = AeroConfig {
            histogram_bins: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::HistogramBins));
    }

    #[test]
    fn validate_rejects_inverted_range() {
        let config = AeroConfig {
            histogram_range: [3.0, 3.0],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::HistogramRange { .. })
        ));
    }

    #[test]
    fn validate_rejects_non_finite_range_and_bin_width() {
        for histogram_range in [[f64::NAN, 1.0], [-1.0, f64::INFINITY], [-1e308, 1e308]] {
            let config = AeroConfig {
                histogram_range,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::HistogramRange { .. })
            ));
        }
    }

    #[test]
    fn validate_rejects_bad_thresholds() {
        let config = AeroConfig {
            straight_threshold: -0.1,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Threshold {
                name: "straight_threshold",
                value: -0.1
            })
        );

        let config = AeroConfig {
            turn_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Threshold { name: "turn_threshold", .. })
        ));

        let config = AeroConfig {
            lateral_g_threshold: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Threshold { name: "lateral_g_threshold", .. })
        ));

        let config = AeroConfig {
            straight_threshold: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_epsilon() {
        for degenerate_epsilon in [0.0, -1e-6] {
            let config = AeroConfig {
                degenerate_epsilon,
                ..Default::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::Epsilon(degenerate_epsilon))
            );
        }

        let config = AeroConfig {
            degenerate_epsilon: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Epsilon(_))));
    }

    #[test]
    fn validate_rejects_out_of_range_reference_ports() {
        let config = AeroConfig {
            static_reference_port: 9,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ReferencePort { role: "static", port: 9, .. })
        ));

        let config = AeroConfig {
            dynamic_reference_port: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ReferencePort { role: "dynamic", .. })
        ));

        let config = AeroConfig {
            dynamic_reference_port: 8,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::SharedReferencePort(8)));
    }

    #[test]
    fn partial_document_fills_from_defaults() {
        let config: AeroConfig =
            serde_json::from_str(r#"{"window_size": 3, "histogram_range": [-1.0, 1.0]}"#).unwrap();
        assert_eq!(config.window_size, 3);
        assert_eq!(config.range_min(), -1.0);
        assert_eq!(config.histogram_bins, 20);
    }

    #[test]
    fn scenario_names_round_trip_through_from_str() {
        for scenario in Scenario::ALL {
            assert_eq!(scenario.as_str().parse::<Scenario>().unwrap(), scenario);
        }
        assert!("sideways".parse::<Scenario>().is_err());
        assert_eq!(
            serde_json::to_string(&Scenario::TurnLeft).unwrap(),
            "\"turn_left\""
        );
    }
}
