//! Figure rendering for the plotting tool.
//!
//! [`FigureRenderer`] is the seam between the `plot_ricker` handler and the
//! place figures end up. [`SvgFigureRenderer`] writes standalone SVG files;
//! [`MemoryFigureRenderer`] keeps documents in memory.

mod spectrum;
mod svg;

pub use spectrum::{POWER_FLOOR_DB, Spectrum};
pub use svg::{SvgFigureRenderer, render_svg};

use seismic_domain::ArtifactHandle;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

pub const SVG_MEDIA_TYPE: &str = "image/svg+xml";

/// A wavelet to draw, with its time axis
#[derive(Debug, Clone, PartialEq)]
pub struct WaveletFigure {
    pub title: String,
    pub time: Vec<f64>,
    pub wavelet: Vec<f64>,
}

impl WaveletFigure {
    pub fn new(title: impl Into<String>, time: Vec<f64>, wavelet: Vec<f64>) -> Self {
        Self {
            title: title.into(),
            time,
            wavelet,
        }
    }

    /// Sampling interval taken from the first two time samples
    pub fn dt(&self) -> Option<f64> {
        match self.time.as_slice() {
            [t0, t1, ..] if t1 > t0 => Some(t1 - t0),
            _ => None,
        }
    }
}

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to plot: {0}")]
    InvalidFigure(String),

    #[error("Figure store unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to write figure {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Turns a figure into an artifact
pub trait FigureRenderer: Send + Sync {
    fn render(&self, figure: &WaveletFigure) -> Result<ArtifactHandle, RenderError>;
}

/// Renders SVG documents into memory
#[derive(Debug, Default)]
pub struct MemoryFigureRenderer {
    documents: Mutex<Vec<(ArtifactHandle, String)>>,
}

impl MemoryFigureRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered documents, oldest first
    pub fn documents(&self) -> Vec<(ArtifactHandle, String)> {
        self.documents
            .lock()
            .map(|docs| docs.clone())
            .unwrap_or_default()
    }
}

impl FigureRenderer for MemoryFigureRenderer {
    fn render(&self, figure: &WaveletFigure) -> Result<ArtifactHandle, RenderError> {
        let document = render_svg(figure)?;
        let mut documents = self
            .documents
            .lock()
            .map_err(|e| RenderError::Unavailable(e.to_string()))?;

        let id = format!("figure-{}", documents.len() + 1);
        let handle = ArtifactHandle::new(id.clone(), format!("memory://{}", id), SVG_MEDIA_TYPE)
            .with_title(figure.title.clone());
        documents.push((handle.clone(), document));
        Ok(handle)
    }
}
