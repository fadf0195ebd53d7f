use std::f64::consts::PI;

/// Sinusoidal steering sweep: left, through centre, right and back over `period_s`.
pub fn steering_sweep(time_s: f64, amplitude: f64, period_s: f64) -> f64 {
    if period_s <= 0.0 {
        return 0.0;
    }
    amplitude * (2.0 * PI * time_s / period_s).sin()
}

/// Dynamic pressure `0.5 * rho * v^2` in kPa, at sea-level air density.
pub fn dynamic_pressure_kpa(speed_mps: f64) -> f64 {
    0.5 * 1.225 * speed_mps * speed_mps / 1000.0
}
