//! Asset models and production curve generators.

use rand::rngs::StdRng;

/// Battery energy storage parameters.
pub mod battery;
/// Piecewise-linear solar PV generator.
pub mod solar;
pub mod solar_sine;
pub mod types;

// Re-export the main types for convenience
pub use battery::BatteryParams;
pub use solar::LinearPv;
pub use solar_sine::SinusoidalPv;
pub use types::ProductionProfile;

/// Either of the interchangeable PV generators, selected at runtime.
#[derive(Debug, Clone)]
pub enum Solar {
    Linear(LinearPv),
    Sinusoidal(SinusoidalPv),
}

impl ProductionProfile for Solar {
    fn generate(&self, time_horizon: usize, rng: &mut StdRng) -> Vec<f64> {
        match self {
            Self::Linear(pv) => pv.generate(time_horizon, rng),
            Self::Sinusoidal(pv) => pv.generate(time_horizon, rng),
        }
    }

    fn profile_type(&self) -> &'static str {
        match self {
            Self::Linear(pv) => pv.profile_type(),
            Self::Sinusoidal(pv) => pv.profile_type(),
        }
    }
}
