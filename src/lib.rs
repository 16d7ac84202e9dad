//! Astro Runner - hazard and power-up simulation engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, difficulty, collisions, buffs, progression)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player-facing preferences (particle quality)
//! - `error`: Errors raised by the outer loading surfaces

pub mod error;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::EngineError;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation step in milliseconds (one frame at ~60 Hz)
    pub const SIM_STEP_MS: f32 = 16.0;

    /// Default play field size in world units
    pub const DEFAULT_FIELD_WIDTH: f32 = 800.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 600.0;

    /// Altitude at which the difficulty curve stops growing
    pub const ALTITUDE_CEILING: f32 = 1000.0;
}

/// Clamp a value coming from outside the simulation to a finite, non-negative number.
///
/// NaN, infinities and negatives all collapse to 0 so they can never leak
/// into the difficulty curve or buff timers.
#[inline]
pub fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Same as [`sanitize`] for the f64 wall-clock values the session controller hands in.
#[inline]
pub fn sanitize_f64(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
