//! plot_ricker: draw a wavelet from the conversation through a
//! [`FigureRenderer`]

use super::sequence_param;
use super::ricker::{DEFAULT_DT, MAKE_RICKER};
use crate::render::{FigureRenderer, WaveletFigure};
use seismic_domain::{HandlerError, ParameterSet, SlotRule, ToolHandler, ToolSpec};
use std::sync::Arc;
use tracing::debug;

/// Tool name constant
pub const PLOT_RICKER: &str = "plot_ricker";

pub const FIGURE_TITLE: &str = "Ricker Wavelet Plot";

/// Get the tool specification for plot_ricker
pub fn plot_ricker_definition(renderer: Arc<dyn FigureRenderer>) -> ToolSpec {
    ToolSpec::new(
        PLOT_RICKER,
        "Plot a wavelet in the time domain with its amplitude and power spectra",
        PlotRicker::new(renderer),
    )
    .with_keywords(["plot", "show", "visualize", "display", "graph", "chart"])
    .require("wavelet")
    .optional_without_default("time")
    .with_slot(SlotRule::from_context("wavelet", &["time"], MAKE_RICKER))
}

/// Handler for plot_ricker
pub struct PlotRicker {
    renderer: Arc<dyn FigureRenderer>,
}

impl PlotRicker {
    pub fn new(renderer: Arc<dyn FigureRenderer>) -> Self {
        Self { renderer }
    }
}

impl ToolHandler for PlotRicker {
    fn invoke(&self, params: &ParameterSet) -> Result<ParameterSet, HandlerError> {
        let wavelet = sequence_param(params, "wavelet")?
            .ok_or_else(|| HandlerError::wrong_type("wavelet", "sequence of samples"))?
            .to_vec();

        let time = match sequence_param(params, "time")? {
            Some(time) if time.len() != wavelet.len() => {
                return Err(HandlerError::invalid_argument(format!(
                    "time has {} samples but wavelet has {}",
                    time.len(),
                    wavelet.len()
                )));
            }
            Some(time) => time.to_vec(),
            None => {
                debug!("No time axis given, using sample index");
                (0..wavelet.len()).map(|i| i as f64 * DEFAULT_DT).collect()
            }
        };

        let handle = self
            .renderer
            .render(&WaveletFigure::new(FIGURE_TITLE, time, wavelet))
            .map_err(|e| HandlerError::execution(e.to_string()))?;

        Ok(ParameterSet::new().with("figure", handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MemoryFigureRenderer;

    #[test]
    fn test_plot_returns_figure() {
        let renderer = Arc::new(MemoryFigureRenderer::new());
        let handler = PlotRicker::new(renderer.clone());
        let params = ParameterSet::new()
            .with("wavelet", vec![-0.4, 1.0, -0.4])
            .with("time", vec![-0.001, 0.0, 0.001]);

        let result = handler.invoke(&params).unwrap();

        let figure = result.artifact("figure").unwrap();
        assert_eq!(figure.title, FIGURE_TITLE);
        assert_eq!(renderer.documents().len(), 1);
    }

    #[test]
    fn test_plot_without_time_uses_index_axis() {
        let handler = PlotRicker::new(Arc::new(MemoryFigureRenderer::new()));
        let params = ParameterSet::new().with("wavelet", vec![0.0, 1.0, 0.0]);
        assert!(handler.invoke(&params).is_ok());
    }

    #[test]
    fn test_plot_errors() {
        let handler = PlotRicker::new(Arc::new(MemoryFigureRenderer::new()));

        let mismatched = ParameterSet::new()
            .with("wavelet", vec![0.0, 1.0, 0.0])
            .with("time", vec![0.0]);
        assert!(matches!(
            handler.invoke(&mismatched),
            Err(HandlerError::InvalidArgument(_))
        ));

        // a single sample has no sampling interval to draw spectra from
        let single = ParameterSet::new().with("wavelet", vec![1.0]);
        assert!(matches!(
            handler.invoke(&single),
            Err(HandlerError::Execution(_))
        ));

        let not_a_sequence = ParameterSet::new().with("wavelet", 1.0);
        assert!(handler.invoke(&not_a_sequence).is_err());
    }
}
