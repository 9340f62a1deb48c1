//! compute_reflectivity: normal-incidence reflection coefficients of a
//! layered earth, placed on a sparse time series

use super::sequence_param;
use seismic_domain::{HandlerError, ParameterSet, SlotRule, ToolSpec, Value};

/// Tool name constant
pub const COMPUTE_REFLECTIVITY: &str = "compute_reflectivity";

/// Density used for every layer when `rho` is not given (kg/m³)
pub const DEFAULT_DENSITY: f64 = 2200.0;
pub const DEFAULT_SAMPLES: f64 = 1000.0;
pub const DEFAULT_POSITIONS: [f64; 2] = [100.0, 300.0];

/// Get the tool specification for compute_reflectivity
pub fn compute_reflectivity_definition() -> ToolSpec {
    ToolSpec::new(
        COMPUTE_REFLECTIVITY,
        "Compute a reflectivity series from layer velocities and densities",
        execute_compute_reflectivity,
    )
    .with_keywords([
        "reflectivity",
        "reflection",
        "coefficient",
        "velocity",
        "density",
        "impedance",
    ])
    .require("vp")
    .optional_without_default("rho")
    .optional("n_samples", DEFAULT_SAMPLES)
    .optional("positions", DEFAULT_POSITIONS.to_vec())
    .with_slot(SlotRule::velocity_array("vp"))
    .with_slot(SlotRule::ranged_integer("n_samples", &["samples"], 100.0..=10000.0))
}

/// Execute the compute_reflectivity tool
pub fn execute_compute_reflectivity(params: &ParameterSet) -> Result<ParameterSet, HandlerError> {
    let vp = sequence_param(params, "vp")?
        .ok_or_else(|| HandlerError::wrong_type("vp", "sequence of velocities"))?;
    if vp.len() < 2 {
        return Err(HandlerError::invalid_argument(format!(
            "at least two layers are needed, got {}",
            vp.len()
        )));
    }

    let rho = match sequence_param(params, "rho")? {
        Some(rho) if rho.len() != vp.len() => {
            return Err(HandlerError::invalid_argument(format!(
                "rho has {} values but vp has {} layers",
                rho.len(),
                vp.len()
            )));
        }
        Some(rho) => rho.to_vec(),
        None => vec![DEFAULT_DENSITY; vp.len()],
    };

    let n_samples = match params.get("n_samples") {
        Some(value) => value
            .as_index()
            .ok_or_else(|| HandlerError::wrong_type("n_samples", "non-negative integer"))?,
        None => DEFAULT_SAMPLES as usize,
    };
    let positions = match params.get("positions") {
        Some(value) => value.as_indices().ok_or_else(|| {
            HandlerError::wrong_type("positions", "sequence of non-negative integers")
        })?,
        None => DEFAULT_POSITIONS.iter().map(|p| *p as usize).collect(),
    };

    let rc = reflection_coefficients(vp, &rho)?;
    if positions.len() > rc.len() {
        return Err(HandlerError::invalid_argument(format!(
            "{} given but there {} only {}",
            plural(positions.len(), "position"),
            if rc.len() == 1 { "is" } else { "are" },
            plural(rc.len(), "interface")
        )));
    }

    let mut reflectivity = vec![0.0; n_samples];
    for (coefficient, position) in rc.iter().zip(&positions) {
        let slot = reflectivity.get_mut(*position).ok_or_else(|| {
            HandlerError::invalid_argument(format!(
                "position {} is out of bounds for {} samples",
                position, n_samples
            ))
        })?;
        *slot = *coefficient;
    }

    Ok(ParameterSet::new().with("reflectivity", Value::Sequence(reflectivity)))
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// `rc[i] = (Z[i+1] - Z[i]) / (Z[i+1] + Z[i])` with `Z = vp · rho`
pub fn reflection_coefficients(vp: &[f64], rho: &[f64]) -> Result<Vec<f64>, HandlerError> {
    let impedance: Vec<f64> = vp.iter().zip(rho).map(|(v, r)| v * r).collect();
    if impedance.iter().any(|z| !z.is_finite()) {
        return Err(HandlerError::invalid_argument(
            "velocities and densities must be finite numbers",
        ));
    }

    impedance
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let sum = pair[1] + pair[0];
            if sum == 0.0 {
                Err(HandlerError::execution(format!(
                    "impedance sum is zero at interface {}",
                    i
                )))
            } else {
                Ok((pair[1] - pair[0]) / sum)
            }
        })
        .collect()
}
