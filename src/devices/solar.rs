use rand::rngs::StdRng;

use crate::devices::types::{HOURS_PER_DAY, ProductionProfile, check_generator, uniform_factor};
use crate::error::SimError;

/// A solar PV generator with a piecewise-linear daily profile.
///
/// Production ramps linearly from zero at sunrise to the daily peak at the
/// peak hour, then falls linearly towards zero at sunset. The daily peak is
/// scaled by a uniform factor drawn once per day, and every daylight sample
/// by an independent uniform factor.
#[derive(Debug, Clone)]
pub struct LinearPv {
    /// Hour of sunrise (inclusive).
    sunrise: usize,

    /// Hour of peak production.
    peak: usize,

    /// Hour of sunset (exclusive).
    sunset: usize,

    /// Nominal peak production in MW.
    peak_power_mw: f64,

    /// Spread of the daily peak factor (0.5 means 50% to 150%).
    peak_noise: f64,

    /// Spread of the per-sample factor.
    noise: f64,
}

impl LinearPv {
    /// Creates a new piecewise-linear generator.
    ///
    /// # Arguments
    ///
    /// * `sunrise` - Hour of sunrise (inclusive)
    /// * `peak` - Hour of peak production
    /// * `sunset` - Hour of sunset (exclusive, at most 24)
    /// * `peak_power_mw` - Nominal peak production in MW
    /// * `peak_noise` - Daily peak factor spread in [0, 1]
    /// * `noise` - Per-sample factor spread in [0, 1]
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] unless `sunrise < peak < sunset <= 24`
    /// and the power and noise parameters are in range.
    pub fn new(
        sunrise: usize,
        peak: usize,
        sunset: usize,
        peak_power_mw: f64,
        peak_noise: f64,
        noise: f64,
    ) -> Result<Self, SimError> {
        check_generator(sunrise, sunset, peak_power_mw, peak_noise, noise)?;
        if !(sunrise < peak && peak < sunset) {
            return Err(SimError::invalid(
                "peak",
                "must lie strictly between sunrise and sunset",
            ));
        }
        Ok(Self {
            sunrise,
            peak,
            sunset,
            peak_power_mw,
            peak_noise,
            noise,
        })
    }

    /// Hour of sunrise (inclusive).
    pub fn sunrise(&self) -> usize {
        self.sunrise
    }

    /// Hour of peak production.
    pub fn peak(&self) -> usize {
        self.peak
    }

    /// Hour of sunset (exclusive).
    pub fn sunset(&self) -> usize {
        self.sunset
    }

    /// Nominal peak production in MW.
    pub fn peak_power_mw(&self) -> f64 {
        self.peak_power_mw
    }

    /// Spread of the daily peak factor.
    pub fn peak_noise(&self) -> f64 {
        self.peak_noise
    }

    /// Spread of the per-sample factor.
    pub fn noise(&self) -> f64 {
        self.noise
    }

    /// Noise-free production at `hour` for a day whose peak is `peak_day`.
    fn shape(&self, hour: usize, peak_day: f64) -> f64 {
        let rise = peak_day / (self.peak - self.sunrise) as f64;
        let fall = -peak_day / (self.sunset - self.peak) as f64;
        let ramp_up = rise * (hour as f64 - self.sunrise as f64);
        let ramp_down = peak_day + fall * (hour as f64 - self.peak as f64);
        ramp_up.min(ramp_down)
    }
}

impl ProductionProfile for LinearPv {
    fn generate(&self, time_horizon: usize, rng: &mut StdRng) -> Vec<f64> {
        let mut curve = vec![0.0; time_horizon];

        // trailing partial day stays dark
        for day in curve.chunks_exact_mut(HOURS_PER_DAY) {
            let peak_day = self.peak_power_mw * uniform_factor(rng, self.peak_noise);
            for hour in self.sunrise..self.sunset {
                let value = self.shape(hour, peak_day) * uniform_factor(rng, self.noise);
                if let Some(slot) = day.get_mut(hour) {
                    *slot = value;
                }
            }
        }
        curve
    }

    fn profile_type(&self) -> &'static str {
        "LinearPV"
    }
}
