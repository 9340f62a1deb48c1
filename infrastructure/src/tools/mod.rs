//! Seismic modeling tools
//!
//! Concrete handlers for the tools the chat pipeline can route to:
//!
//! | Tool | Produces | Needs |
//! |------|----------|-------|
//! | `make_ricker` | `wavelet`, `time` | `frequency` |
//! | `plot_ricker` | `figure` (artifact) | `wavelet` (from context) |
//! | `compute_reflectivity` | `reflectivity` | `vp` |
//!
//! Registration order matters: it breaks keyword-score ties.

pub mod plot;
pub mod reflectivity;
pub mod ricker;

pub use plot::{PLOT_RICKER, PlotRicker, plot_ricker_definition};
pub use reflectivity::{COMPUTE_REFLECTIVITY, compute_reflectivity_definition};
pub use ricker::{MAKE_RICKER, make_ricker_definition};

use crate::render::FigureRenderer;
use seismic_domain::{HandlerError, ParameterSet, ToolRegistry, Value};
use std::sync::Arc;

/// Create the registry with every seismic tool
pub fn default_registry(renderer: Arc<dyn FigureRenderer>) -> ToolRegistry {
    ToolRegistry::new()
        .register(make_ricker_definition())
        .register(plot_ricker_definition(renderer))
        .register(compute_reflectivity_definition())
}

/// Optional number parameter; wrong type is an error
fn number_param(params: &ParameterSet, name: &str) -> Result<Option<f64>, HandlerError> {
    match params.get(name) {
        None => Ok(None),
        Some(value) => value
            .as_number()
            .map(Some)
            .ok_or_else(|| HandlerError::wrong_type(name, "number")),
    }
}

/// Required finite, strictly positive number
fn positive_param(params: &ParameterSet, name: &str) -> Result<f64, HandlerError> {
    let value = number_param(params, name)?
        .ok_or_else(|| HandlerError::wrong_type(name, "number"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(HandlerError::invalid_argument(format!(
            "{} must be a positive number, got {}",
            name, value
        )))
    }
}

/// Optional sequence parameter; wrong type is an error
fn sequence_param<'a>(params: &'a ParameterSet, name: &str) -> Result<Option<&'a [f64]>, HandlerError> {
    match params.get(name) {
        None => Ok(None),
        Some(Value::Sequence(values)) => Ok(Some(values.as_slice())),
        Some(_) => Err(HandlerError::wrong_type(name, "sequence of numbers")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MemoryFigureRenderer;
    use seismic_application::{ChatSession, ProcessTurnUseCase};
    use seismic_domain::{DispatchOutcome, UNRECOGNIZED_HINT};

    fn session() -> (ChatSession, Arc<MemoryFigureRenderer>) {
        let renderer = Arc::new(MemoryFigureRenderer::new());
        let registry = default_registry(renderer.clone());
        let use_case = ProcessTurnUseCase::new(Arc::new(registry));
        (ChatSession::new(Arc::new(use_case)), renderer)
    }

    #[test]
    fn test_registry_order_and_producers() {
        let registry = default_registry(Arc::new(MemoryFigureRenderer::new()));
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec![MAKE_RICKER, PLOT_RICKER, COMPUTE_REFLECTIVITY]
        );
        assert!(registry.validate().is_ok());
    }

    #[test]
    fn test_create_wavelet() {
        let (mut session, _) = session();

        let reply = session.send("Create a 25 Hz Ricker wavelet");

        assert_eq!(reply.tool.as_deref(), Some(MAKE_RICKER));
        let result = reply.outcome.result().unwrap();
        let wavelet = result.sequence("wavelet").unwrap();
        assert!(!wavelet.is_empty());
        assert_eq!(wavelet.len(), result.sequence("time").unwrap().len());
        assert!(reply.text.contains("Frequency: 25.0 Hz"));
        assert!(reply.text.contains("Sampling interval (dt): 0.001 seconds"));
        assert!(reply.text.contains("Duration: 0.256 seconds"));
    }

    #[test]
    fn test_compute_reflectivity() {
        let (mut session, _) = session();

        let reply = session.send("Compute reflectivity for velocities [2000, 3000, 2500, 4000]");

        assert_eq!(reply.tool.as_deref(), Some(COMPUTE_REFLECTIVITY));
        let series = reply
            .outcome
            .result()
            .and_then(|r| r.sequence("reflectivity"))
            .unwrap();
        assert_eq!(series.len(), 1000);
        let nonzero: Vec<usize> = (0..series.len()).filter(|i| series[*i] != 0.0).collect();
        assert_eq!(nonzero, vec![100, 300]);
        assert!(reply.text.contains("Generated 1000 reflection coefficients (2 nonzero)"));
    }

    #[test]
    fn test_plot_follow_up_reuses_wavelet() {
        let (mut session, renderer) = session();

        session.send("Create a 30 Hz Ricker wavelet");
        let wavelet = session.context().get("wavelet").cloned();
        let reply = session.send("plot it");

        assert_eq!(reply.tool.as_deref(), Some(PLOT_RICKER));
        assert!(reply.is_ok());
        assert_eq!(session.context().get("wavelet").cloned(), wavelet);
        let artifact = reply.artifact.unwrap();
        assert_eq!(artifact.uri, "memory://figure-1");
        assert!(reply.text.ends_with("![Ricker Wavelet Plot](memory://figure-1)"));
        assert_eq!(renderer.documents().len(), 1);
    }

    #[test]
    fn test_plot_with_empty_context_creates_wavelet() {
        let (mut session, renderer) = session();

        let reply = session.send("show a 30 Hz plot");

        assert_eq!(reply.tool.as_deref(), Some(PLOT_RICKER));
        assert!(reply.is_ok(), "{}", reply.text);
        assert!(session.context().contains("wavelet"));
        assert!(session.context().contains("figure"));
        assert_eq!(renderer.documents().len(), 1);
    }

    #[test]
    fn test_gibberish() {
        let (mut session, renderer) = session();

        let reply = session.send("asdkjh random gibberish");

        assert_eq!(reply.text, UNRECOGNIZED_HINT);
        assert!(session.context().values().is_empty());
        assert!(renderer.documents().is_empty());
    }

    #[test]
    fn test_wavelet_without_frequency() {
        let (mut session, _) = session();

        let reply = session.send("Generate a wavelet");

        assert_eq!(
            reply.outcome,
            DispatchOutcome::MissingParams(vec!["frequency".to_string()])
        );
        assert_eq!(reply.text, "Error: Missing required parameters: frequency");
    }

    #[test]
    fn test_handler_error_is_reported() {
        let (mut session, _) = session();

        let reply = session.send("compute reflectivity with 200 samples for vp = [2000, 3000, 2500]");

        assert_eq!(
            reply.text,
            "Error: Error executing compute_reflectivity: position 300 is out of bounds for 200 samples"
        );
        assert!(!session.context().contains("reflectivity"));
    }

    #[test]
    fn test_explicit_wavelet_parameters() {
        let (mut session, _) = session();

        let reply = session.send(
            "Generate a ricker wavelet with frequency 20 Hz and duration 0.5 seconds, dt 0.002",
        );

        assert!(reply.is_ok());
        let wavelet = reply.outcome.result().and_then(|r| r.sequence("wavelet")).unwrap();
        assert_eq!(wavelet.len(), 251);
        assert!(reply.text.contains("Duration: 0.5 seconds"));
    }
}
