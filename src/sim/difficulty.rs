//! Altitude-driven difficulty curve
//!
//! A tunable heuristic, not a physical model: a fast exponential ramp over the
//! first few hundred units of altitude, slower linear growth afterwards, and a
//! hard ceiling so falling speeds stay playable.

use crate::consts::ALTITUDE_CEILING;
use crate::sanitize;
use crate::tuning::Tuning;

/// Fall-speed multiplier for the given altitude
///
/// With the default tuning this is
/// `g = 0.12 * (1 - 0.6 * e^(-6 * n) + 1.2 * n)` with `n = min(1000, altitude) / 1000`,
/// clamped to `[0.04, 0.36]` and scaled by 0.4 while SlowTime is active.
pub fn gravity(altitude: f32, slow_time_active: bool, tuning: &Tuning) -> f32 {
    let alt_norm = sanitize(altitude).min(ALTITUDE_CEILING) / ALTITUDE_CEILING;
    let ramp = tuning.gravity_ramp * (-tuning.gravity_ramp_rate * alt_norm).exp();
    let g = tuning.gravity_base * (1.0 - ramp + tuning.gravity_linear * alt_norm);
    let g = g.max(tuning.gravity_min).min(tuning.gravity_max);
    if slow_time_active {
        g * tuning.slow_time_factor
    } else {
        g
    }
}

/// Hazard spawn gate for the given altitude
///
/// `max(floor, initial - min(max_reduction, altitude * slope))`
pub fn hazard_spawn_interval(altitude: f32, tuning: &Tuning) -> f32 {
    let reduction = (sanitize(altitude) * tuning.hazard_interval_slope)
        .min(tuning.hazard_interval_max_reduction_ms);
    (tuning.hazard_interval_ms - reduction).max(tuning.hazard_interval_min_ms)
}
