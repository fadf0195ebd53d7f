use crate::generator::template::{dynamic_pressure_kpa, steering_sweep};
use aerocore::{AeroConfig, Sample};
use anyhow::Context;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const ATMOSPHERIC_KPA: f64 = 101.325;

/// Parameters for a synthetic multi-port pressure stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub sample_count: usize,
    pub seed: u64,
    pub rate_hz: f64,
    pub speed_mps: f64,
    /// Standard spread of the additive pressure jitter, kPa.
    pub noise: f64,
    pub steering_amplitude: f64,
    pub steering_period_s: f64,
    pub lateral_g_gain: f64,
    /// Chance that one measurement port drops its reading in a sample.
    pub dropout_probability: f64,
    /// Chance that the reference ports read the same pressure.
    pub degenerate_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sample_count: 600,
            seed: 0,
            rate_hz: 20.0,
            speed_mps: 40.0,
            noise: 0.005,
            steering_amplitude: 0.6,
            steering_period_s: 12.0,
            lateral_g_gain: 1.5,
            dropout_probability: 0.02,
            degenerate_probability: 0.01,
        }
    }
}

/// Endless, reproducible sample stream shaped by an [`AeroConfig`] port layout.
///
/// The layout must already have passed [`AeroConfig::validate`].
pub struct SampleGenerator {
    config: GeneratorConfig,
    total_ports: usize,
    dynamic_port: usize,
    static_port: usize,
    /// (port, baseline Cp, lateral sensitivity)
    ports: Vec<(usize, f64, f64)>,
    rng: StdRng,
    tick: u64,
}

impl SampleGenerator {
    pub fn new(engine: &AeroConfig, config: GeneratorConfig) -> Self {
        let measurement = engine.measurement_ports();
        let spread = measurement.len().saturating_sub(1).max(1) as f64;
        let ports = measurement
            .iter()
            .enumerate()
            .map(|(slot, &port)| {
                let baseline = 0.8 - 2.8 * slot as f64 / spread;
                let side = if slot % 2 == 0 { 1.0 } else { -1.0 };
                (port, baseline, 0.4 * side)
            })
            .collect();

        Self {
            rng: StdRng::seed_from_u64(config.seed),
            total_ports: engine.total_ports,
            dynamic_port: engine.dynamic_reference_port,
            static_port: engine.static_reference_port,
            ports,
            config,
            tick: 0,
        }
    }

    fn jitter(&mut self, scale: f64) -> f64 {
        if scale <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-scale..scale)
    }

    fn next_sample(&mut self) -> Sample {
        let rate = if self.config.rate_hz > 0.0 {
            self.config.rate_hz
        } else {
            1.0
        };
        let time_s = self.tick as f64 / rate;
        self.tick += 1;

        let steering = steering_sweep(
            time_s,
            self.config.steering_amplitude,
            self.config.steering_period_s,
        );
        let lateral_g = steering * self.config.lateral_g_gain + self.jitter(0.02);

        let q = dynamic_pressure_kpa(self.config.speed_mps);
        let noise = self.config.noise;
        let static_pressure = ATMOSPHERIC_KPA + self.jitter(noise);
        let degenerate = self
            .rng
            .gen_bool(self.config.degenerate_probability.clamp(0.0, 1.0));
        let dynamic_pressure = if degenerate {
            static_pressure
        } else {
            static_pressure + q + self.jitter(noise)
        };

        let mut pressures = vec![None; self.total_ports];
        pressures[self.dynamic_port - 1] = Some(dynamic_pressure);
        pressures[self.static_port - 1] = Some(static_pressure);
        for index in 0..self.ports.len() {
            let (port, baseline, sensitivity) = self.ports[index];
            let cp = baseline + sensitivity * lateral_g;
            pressures[port - 1] = Some(static_pressure + cp * q + self.jitter(noise));
        }

        if !self.ports.is_empty()
            && self.rng.gen_bool(self.config.dropout_probability.clamp(0.0, 1.0))
        {
            let (port, _, _) = self.ports[self.rng.gen_range(0..self.ports.len())];
            pressures[port - 1] = None;
        }

        Sample {
            pressures,
            steering,
            lateral_g,
            timestamp: Some(time_s),
        }
    }
}

impl Iterator for SampleGenerator {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        Some(self.next_sample())
    }
}

/// Generates `config.sample_count` samples for an engine configuration.
pub fn build_samples(
    engine: &AeroConfig,
    config: &GeneratorConfig,
) -> anyhow::Result<Vec<Sample>> {
    engine
        .validate()
        .context("generator needs a valid port layout")?;
    Ok(SampleGenerator::new(engine, config.clone())
        .take(config.sample_count)
        .collect())
}
