//! make_ricker: zero-phase Ricker wavelet synthesis

use super::{number_param, positive_param};
use seismic_domain::{HandlerError, ParameterSet, SlotRule, ToolSpec};
use std::f64::consts::PI;

/// Tool name constant
pub const MAKE_RICKER: &str = "make_ricker";

pub const DEFAULT_DT: f64 = 0.001;
pub const DEFAULT_DURATION: f64 = 0.256;

/// Upper bound on generated samples
const MAX_SAMPLES: usize = 1_000_000;

/// Get the tool specification for make_ricker
pub fn make_ricker_definition() -> ToolSpec {
    ToolSpec::new(
        MAKE_RICKER,
        "Create a zero-phase Ricker wavelet with the given peak frequency",
        execute_make_ricker,
    )
    .with_keywords(["ricker", "wavelet", "create", "make", "generate"])
    .require("frequency")
    .optional("dt", DEFAULT_DT)
    .optional("duration", DEFAULT_DURATION)
    .with_slot(SlotRule::frequency("frequency"))
    .with_slot(SlotRule::ranged("dt", &["dt", "sampling"], 0.0001..=0.01))
    .with_slot(SlotRule::ranged("duration", &["duration", "length"], 0.1..=2.0))
}

/// Execute the make_ricker tool
///
/// Returns `wavelet` and `time` of equal, odd length, centred on t = 0.
pub fn execute_make_ricker(params: &ParameterSet) -> Result<ParameterSet, HandlerError> {
    let frequency = positive_param(params, "frequency")?;
    let dt = match number_param(params, "dt")? {
        Some(_) => positive_param(params, "dt")?,
        None => DEFAULT_DT,
    };
    let duration = match number_param(params, "duration")? {
        Some(_) => positive_param(params, "duration")?,
        None => DEFAULT_DURATION,
    };

    if duration < dt {
        return Err(HandlerError::invalid_argument(format!(
            "duration ({}) must be at least dt ({})",
            duration, dt
        )));
    }
    if duration / dt > MAX_SAMPLES as f64 {
        return Err(HandlerError::invalid_argument(format!(
            "duration / dt exceeds {} samples",
            MAX_SAMPLES
        )));
    }

    let (wavelet, time) = ricker(frequency, dt, duration);
    Ok(ParameterSet::new()
        .with("wavelet", wavelet)
        .with("time", time))
}

/// Sample a Ricker wavelet of peak frequency `f` Hz.
///
/// `w(t) = (1 - 2π²f²t²) · exp(-π²f²t²)`, sampled every `dt` over
/// `duration` seconds; the sample count is rounded up to odd so that t = 0
/// is a sample.
pub fn ricker(f: f64, dt: f64, duration: f64) -> (Vec<f64>, Vec<f64>) {
    let mut n = (duration / dt).round().max(1.0) as usize;
    if n % 2 == 0 {
        n += 1;
    }
    let half = (n / 2) as f64;

    let time: Vec<f64> = (0..n).map(|i| (i as f64 - half) * dt).collect();
    let wavelet = time
        .iter()
        .map(|t| {
            let a = (PI * f * t).powi(2);
            (1.0 - 2.0 * a) * (-a).exp()
        })
        .collect();

    (wavelet, time)
}
