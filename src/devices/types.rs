//! Common types and traits for production curve generators.

use rand::{Rng, rngs::StdRng};

use crate::error::SimError;

/// Number of hourly samples in one generated day.
pub const HOURS_PER_DAY: usize = 24;

/// A source of hourly production curves.
///
/// Implementations are interchangeable: the simulator only sees the
/// resulting `Vec<f64>`, so hand-authored data works equally well.
pub trait ProductionProfile {
    /// Generates `time_horizon` hourly production samples in MWh per step.
    ///
    /// Only whole days are filled; a trailing partial day stays zero.
    fn generate(&self, time_horizon: usize, rng: &mut StdRng) -> Vec<f64>;

    /// Returns a human-readable name for the generator.
    fn profile_type(&self) -> &'static str;
}

/// Draws a multiplicative factor uniformly from `[1 - spread, 1 + spread]`.
///
/// A zero spread always yields exactly `1.0`.
pub fn uniform_factor(rng: &mut StdRng, spread: f64) -> f64 {
    if spread <= 0.0 {
        return 1.0;
    }
    rng.random_range((1.0 - spread)..=(1.0 + spread))
}

/// Checks the shared generator parameters.
pub(crate) fn check_generator(
    sunrise: usize,
    sunset: usize,
    peak_power_mw: f64,
    peak_noise: f64,
    noise: f64,
) -> Result<(), SimError> {
    if sunrise >= sunset {
        return Err(SimError::invalid("sunrise", "must be < sunset"));
    }
    if sunset > HOURS_PER_DAY {
        return Err(SimError::invalid(
            "sunset",
            format!("must be <= {HOURS_PER_DAY}"),
        ));
    }
    if !(peak_power_mw.is_finite() && peak_power_mw >= 0.0) {
        return Err(SimError::invalid(
            "peak_power_mw",
            "must be finite and >= 0",
        ));
    }
    if !(0.0..=1.0).contains(&peak_noise) {
        return Err(SimError::invalid("peak_noise", "must be in [0, 1]"));
    }
    if !(0.0..=1.0).contains(&noise) {
        return Err(SimError::invalid("noise", "must be in [0, 1]"));
    }
    Ok(())
}
