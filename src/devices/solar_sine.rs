//! Solar PV model with a half-sine daily profile.

use std::f64::consts::PI;

use rand::rngs::StdRng;

use crate::devices::types::{HOURS_PER_DAY, ProductionProfile, check_generator, uniform_factor};
use crate::error::SimError;

/// Solar PV generator following a positive half sine between sunrise and sunset.
///
/// Unlike [`LinearPv`](super::LinearPv), the peak hour is implied by the
/// daylight window. The `sunset - sunrise` daylight samples are
/// ```text
/// p(i) = peak_day * sin(pi * i / (n - 1)),  i = 0..n
/// ```
/// so the first and last daylight hours produce zero.
#[derive(Debug, Clone)]
pub struct SinusoidalPv {
    /// Hour of sunrise (inclusive).
    sunrise: usize,

    /// Hour of sunset (exclusive).
    sunset: usize,

    /// Nominal peak production in MW.
    peak_power_mw: f64,

    /// Spread of the daily peak factor.
    peak_noise: f64,

    /// Spread of the per-sample factor.
    noise: f64,

    /// Precomputed half-sine weights, one per daylight hour.
    weights: Vec<f64>,
}

impl SinusoidalPv {
    /// Creates a new half-sine generator.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] unless `sunrise < sunset <= 24`
    /// and the power and noise parameters are in range.
    pub fn new(
        sunrise: usize,
        sunset: usize,
        peak_power_mw: f64,
        peak_noise: f64,
        noise: f64,
    ) -> Result<Self, SimError> {
        check_generator(sunrise, sunset, peak_power_mw, peak_noise, noise)?;
        Ok(Self {
            sunrise,
            sunset,
            peak_power_mw,
            peak_noise,
            noise,
            weights: half_sine(sunset - sunrise),
        })
    }

    pub fn sunrise(&self) -> usize {
        self.sunrise
    }

    pub fn sunset(&self) -> usize {
        self.sunset
    }

    pub fn peak_power_mw(&self) -> f64 {
        self.peak_power_mw
    }

    pub fn peak_noise(&self) -> f64 {
        self.peak_noise
    }

    pub fn noise(&self) -> f64 {
        self.noise
    }
}

/// `n` samples of `sin(pi * x)` over evenly spaced `x` in `[0, 1]`.
fn half_sine(n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![0.0];
    }
    let last = (n - 1) as f64;
    (0..n).map(|i| (PI * i as f64 / last).sin().max(0.0)).collect()
}

impl ProductionProfile for SinusoidalPv {
    fn generate(&self, time_horizon: usize, rng: &mut StdRng) -> Vec<f64> {
        let mut curve = vec![0.0; time_horizon];

        for day in curve.chunks_exact_mut(HOURS_PER_DAY) {
            let peak_day = self.peak_power_mw * uniform_factor(rng, self.peak_noise);
            let daylight = day.iter_mut().skip(self.sunrise);
            for (slot, weight) in daylight.zip(&self.weights) {
                *slot = peak_day * weight * uniform_factor(rng, self.noise);
            }
        }
        curve
    }

    fn profile_type(&self) -> &'static str {
        "SinusoidalPV"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_sunset_before_sunrise_rejected() {
        assert!(SinusoidalPv::new(18, 6, 5.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_half_sine_endpoints() {
        let w = half_sine(5);
        assert_eq!(w.len(), 5);
        assert_eq!(w[0], 0.0);
        assert!((w[2] - 1.0).abs() < 1e-12);
        assert!(w[4].abs() < 1e-12);
        assert!((w[1] - w[3]).abs() < 1e-12);
    }

    #[test]
    fn test_single_daylight_hour() {
        assert_eq!(half_sine(1), vec![0.0]);
    }

    #[test]
    fn test_no_generation_at_night() {
        let pv = SinusoidalPv::new(6, 19, 5.0, 0.0, 0.0).unwrap();
        let curve = pv.generate(48, &mut rng(1));
        for day in 0..2 {
            for hour in (0..6).chain(19..24) {
                assert_eq!(curve[day * 24 + hour], 0.0);
            }
        }
    }

    #[test]
    fn test_peak_generation_at_midday() {
        // 13 daylight samples, middle one lands on x = 0.5
        let pv = SinusoidalPv::new(6, 19, 5.0, 0.0, 0.0).unwrap();
        let curve = pv.generate(24, &mut rng(1));
        assert!((curve[12] - 5.0).abs() < 1e-12);
        assert!(curve.iter().all(|&v| v <= 5.0 + 1e-12));
    }

    #[test]
    fn test_accessors() {
        let pv = SinusoidalPv::new(6, 18, 5.0, 0.5, 0.1).unwrap();
        assert_eq!((pv.sunrise(), pv.sunset()), (6, 18));
        assert_eq!(pv.peak_power_mw(), 5.0);
        assert_eq!(pv.peak_noise(), 0.5);
        assert_eq!(pv.noise(), 0.1);
    }

    #[test]
    fn test_weights_stop_at_midnight() {
        let mut pv = SinusoidalPv::new(6, 18, 5.0, 0.0, 0.0).unwrap();
        pv.sunrise = 20;
        let curve = pv.generate(48, &mut rng(1));
        assert_eq!(curve.len(), 48);
        assert!(curve[..20].iter().all(|&v| v == 0.0));
        assert!(curve[24..44].iter().all(|&v| v == 0.0));
        assert!(curve[21] > 0.0);
    }

    #[test]
    fn test_deterministic_with_same_seed() {
        let pv = SinusoidalPv::new(6, 18, 5.0, 0.5, 0.1).unwrap();
        assert_eq!(pv.generate(72, &mut rng(9)), pv.generate(72, &mut rng(9)));
    }

    #[test]
    fn test_never_negative_with_noise() {
        let pv = SinusoidalPv::new(4, 22, 5.0, 1.0, 1.0).unwrap();
        assert!(pv.generate(24 * 10, &mut rng(2)).iter().all(|&v| v >= 0.0));
    }
}
