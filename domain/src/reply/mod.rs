//! Reply formatting: turns dispatch outcomes into user-facing text.
//!
//! One template per tool name; unknown tools get a generic confirmation.
//! Artifacts are referenced with Markdown image syntax pointing at the
//! handle's URI. Encoding or inlining the artifact is left to the UI.

use crate::tool::{ArtifactHandle, DispatchOutcome, ParameterSet, Value};

/// Defaults shown in the Ricker template when a value is somehow absent
const RICKER_DT: f64 = 0.001;
const RICKER_DURATION: f64 = 0.256;

/// Formats tool results as natural-language replies
pub struct ReplyFormatter;

impl ReplyFormatter {
    /// Format any outcome of a turn.
    ///
    /// `params` are the resolved parameters (defaults filled in) that were
    /// passed to the handler.
    pub fn format_outcome(tool: &str, params: &ParameterSet, outcome: &DispatchOutcome) -> String {
        match outcome {
            DispatchOutcome::Ok(result) => Self::format(tool, params, result),
            DispatchOutcome::MissingParams(names) => {
                format!("Error: Missing required parameters: {}", names.join(", "))
            }
            DispatchOutcome::ExecutionError(message) => format!("Error: {}", message),
            DispatchOutcome::UnrecognizedIntent(hint) => hint.clone(),
        }
    }

    /// Format a successful tool result
    pub fn format(tool: &str, params: &ParameterSet, result: &ParameterSet) -> String {
        match tool {
            "make_ricker" => Self::format_make_ricker(params, result),
            "plot_ricker" | "plot_wavelet" => Self::format_plot(result),
            "compute_reflectivity" => Self::format_reflectivity(params, result),
            _ => format!("Successfully executed {} with the provided parameters.", tool),
        }
    }

    fn format_make_ricker(params: &ParameterSet, result: &ParameterSet) -> String {
        let frequency = display(params.get("frequency"));
        let dt = params.number("dt").unwrap_or(RICKER_DT);
        let duration = params.number("duration").unwrap_or(RICKER_DURATION);
        let samples = result.sequence("wavelet").map_or(0, <[f64]>::len);

        format!(
            "I've created a Ricker wavelet with these parameters:\n\
             - Frequency: {frequency} Hz\n\
             - Sampling interval (dt): {dt:?} seconds\n\
             - Duration: {duration:?} seconds\n\
             \n\
             The wavelet has {samples} samples. Ricker wavelets are zero-phase with a compact \
             spectrum, which makes them the usual source wavelet for synthetic seismic modeling.\n\
             \n\
             The wavelet is kept for this conversation, so you can ask me to plot it or use it \
             in further operations."
        )
    }

    fn format_plot(result: &ParameterSet) -> String {
        let mut reply = String::from(
            "Here is the Ricker wavelet plotted three ways:\n\
             \n\
             1. **Time domain**: amplitude over time, positive lobes in blue and negative lobes in red\n\
             2. **Amplitude spectrum**: frequency content around the dominant frequency\n\
             3. **Power spectrum**: normalized power in decibels, showing how the energy is spread\n\
             \n\
             Together they show the temporal and spectral character of the wavelet, which drives \
             resolution in forward modeling and interpretation.",
        );

        if let Some(artifact) = result.first_artifact() {
            reply.push_str("\n\n");
            reply.push_str(&artifact_markup(artifact));
        }

        reply
    }

    fn format_reflectivity(params: &ParameterSet, result: &ParameterSet) -> String {
        let layers = params.sequence("vp").map_or(0, <[f64]>::len);
        let velocities = display(params.get("vp"));
        let reflectivity = result.sequence("reflectivity").unwrap_or_default();
        let nonzero = reflectivity.iter().filter(|r| **r != 0.0).count();

        format!(
            "I've computed the reflectivity series from {layers} velocity layers:\n\
             - Input velocities: {velocities}\n\
             - Generated {} reflection coefficients ({nonzero} nonzero)\n\
             \n\
             Reflectivity measures the acoustic impedance contrast between layers. Positive \
             values mark an increase in impedance (hard reflection), negative values a decrease \
             (soft reflection). Convolve this series with a source wavelet to build a synthetic \
             seismogram.",
            reflectivity.len()
        )
    }
}

/// Markdown reference to an artifact
pub fn artifact_markup(artifact: &ArtifactHandle) -> String {
    let title = if artifact.title.is_empty() {
        "Ricker Wavelet Plot"
    } else {
        artifact.title.as_str()
    };
    format!("![{}]({})", title, artifact.uri)
}

fn display(value: Option<&Value>) -> String {
    value.map_or_else(|| "unknown".to_string(), Value::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_make_ricker() {
        let params = ParameterSet::new()
            .with("frequency", 25.0)
            .with("dt", 0.001)
            .with("duration", 0.256);
        let result = ParameterSet::new()
            .with("wavelet", vec![0.0; 257])
            .with("time", vec![0.0; 257]);

        let reply = ReplyFormatter::format("make_ricker", &params, &result);
        assert!(reply.contains("Frequency: 25.0 Hz"));
        assert!(reply.contains("Sampling interval (dt): 0.001 seconds"));
        assert!(reply.contains("Duration: 0.256 seconds"));
        assert!(reply.contains("257 samples"));
    }

    #[test]
    fn test_format_plot_embeds_artifact() {
        let result = ParameterSet::new().with(
            "figure",
            ArtifactHandle::new("fig-1", "artifacts/fig-1.svg", "image/svg+xml"),
        );
        let reply = ReplyFormatter::format("plot_ricker", &ParameterSet::new(), &result);
        assert!(reply.contains("Time domain"));
        assert!(reply.ends_with("![Ricker Wavelet Plot](artifacts/fig-1.svg)"));
    }

    #[test]
    fn test_format_plot_without_artifact() {
        let reply = ReplyFormatter::format("plot_wavelet", &ParameterSet::new(), &ParameterSet::new());
        assert!(!reply.contains("!["));
    }

    #[test]
    fn test_format_reflectivity() {
        let params = ParameterSet::new().with("vp", vec![2000.0, 3000.0, 2500.0, 4000.0]);
        let mut series = vec![0.0; 1000];
        series[100] = 0.2;
        series[300] = -0.09;
        let result = ParameterSet::new().with("reflectivity", series);

        let reply = ReplyFormatter::format("compute_reflectivity", &params, &result);
        assert!(reply.contains("from 4 velocity layers"));
        assert!(reply.contains("[2000.0, 3000.0, 2500.0, 4000.0]"));
        assert!(reply.contains("Generated 1000 reflection coefficients (2 nonzero)"));
    }

    #[test]
    fn test_format_unknown_tool() {
        let reply = ReplyFormatter::format("make_gabor", &ParameterSet::new(), &ParameterSet::new());
        assert_eq!(
            reply,
            "Successfully executed make_gabor with the provided parameters."
        );
    }

    #[test]
    fn test_format_outcome_errors() {
        let params = ParameterSet::new();
        assert_eq!(
            ReplyFormatter::format_outcome(
                "make_ricker",
                &params,
                &DispatchOutcome::MissingParams(vec!["frequency".to_string()])
            ),
            "Error: Missing required parameters: frequency"
        );
        assert_eq!(
            ReplyFormatter::format_outcome(
                "make_ricker",
                &params,
                &DispatchOutcome::ExecutionError("Error executing make_ricker: bad dt".to_string())
            ),
            "Error: Error executing make_ricker: bad dt"
        );
        assert_eq!(
            ReplyFormatter::format_outcome(
                "",
                &params,
                &DispatchOutcome::UnrecognizedIntent("try again".to_string())
            ),
            "try again"
        );
    }
}
