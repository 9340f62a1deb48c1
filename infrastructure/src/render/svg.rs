//! SVG rendering of a wavelet in three panels: time domain, amplitude
//! spectrum and power spectrum.

use super::spectrum::{POWER_FLOOR_DB, Spectrum};
use super::{FigureRenderer, RenderError, SVG_MEDIA_TYPE, WaveletFigure};
use seismic_domain::ArtifactHandle;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

const WIDTH: f64 = 800.0;
const PANEL_HEIGHT: f64 = 220.0;
const PANEL_SPACING: f64 = 300.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;

const POSITIVE_FILL: &str = "#1f77b4";
const NEGATIVE_FILL: &str = "#d62728";

/// Writes each figure to `<dir>/<id>.svg`
#[derive(Debug)]
pub struct SvgFigureRenderer {
    dir: PathBuf,
    sequence: AtomicU64,
}

impl SvgFigureRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            sequence: AtomicU64::new(0),
        }
    }

    fn next_id(&self) -> String {
        let n = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        format!("ricker-{}-{}", chrono::Utc::now().format("%Y%m%dT%H%M%S"), n)
    }
}

impl FigureRenderer for SvgFigureRenderer {
    fn render(&self, figure: &WaveletFigure) -> Result<ArtifactHandle, RenderError> {
        let document = render_svg(figure)?;

        fs::create_dir_all(&self.dir).map_err(|source| RenderError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let id = self.next_id();
        let path = self.dir.join(format!("{}.svg", id));
        fs::write(&path, document).map_err(|source| RenderError::Io {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "Wrote figure");
        Ok(
            ArtifactHandle::new(id, path.display().to_string(), SVG_MEDIA_TYPE)
                .with_title(figure.title.clone()),
        )
    }
}

/// Linear mapping of data coordinates into one panel
struct Panel {
    top: f64,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl Panel {
    fn new(index: usize, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            top: MARGIN_TOP + index as f64 * PANEL_SPACING,
            x_range,
            y_range,
        }
    }

    fn x(&self, v: f64) -> f64 {
        let (lo, hi) = self.x_range;
        let span = if hi > lo { hi - lo } else { 1.0 };
        MARGIN_LEFT + (v - lo) / span * (WIDTH - MARGIN_LEFT - MARGIN_RIGHT)
    }

    fn y(&self, v: f64) -> f64 {
        let (lo, hi) = self.y_range;
        let span = if hi > lo { hi - lo } else { 1.0 };
        self.top + PANEL_HEIGHT - (v.clamp(lo, hi) - lo) / span * PANEL_HEIGHT
    }

    fn bottom(&self) -> f64 {
        self.top + PANEL_HEIGHT
    }

    fn frame(&self, out: &mut String, title: &str, x_label: &str, y_label: &str) {
        let right = WIDTH - MARGIN_RIGHT;
        let _ = writeln!(
            out,
            r##"<rect x="{MARGIN_LEFT}" y="{:.2}" width="{:.2}" height="{PANEL_HEIGHT}" fill="none" stroke="#444"/>"##,
            self.top,
            right - MARGIN_LEFT,
        );
        let _ = writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-weight="bold">{}</text>"#,
            WIDTH / 2.0,
            self.top - 12.0,
            escape(title)
        );
        let _ = writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
            (MARGIN_LEFT + right) / 2.0,
            self.bottom() + 36.0,
            escape(x_label)
        );
        let mid = self.top + PANEL_HEIGHT / 2.0;
        let _ = writeln!(
            out,
            r#"<text x="20" y="{mid:.2}" text-anchor="middle" transform="rotate(-90 20 {mid:.2})">{}</text>"#,
            escape(y_label)
        );

        let (x_lo, x_hi) = self.x_range;
        let (y_lo, y_hi) = self.y_range;
        for (x, anchor, label) in [(MARGIN_LEFT, "start", x_lo), (right, "end", x_hi)] {
            let _ = writeln!(
                out,
                r#"<text x="{x:.2}" y="{:.2}" text-anchor="{anchor}" font-size="11">{}</text>"#,
                self.bottom() + 16.0,
                tick(label)
            );
        }
        for (y, label) in [(self.bottom(), y_lo), (self.top + 10.0, y_hi)] {
            let _ = writeln!(
                out,
                r#"<text x="{:.2}" y="{y:.2}" text-anchor="end" font-size="11">{}</text>"#,
                MARGIN_LEFT - 6.0,
                tick(label)
            );
        }
    }
}

/// Render `figure` as a standalone SVG document.
pub fn render_svg(figure: &WaveletFigure) -> Result<String, RenderError> {
    if figure.wavelet.is_empty() {
        return Err(RenderError::InvalidFigure("wavelet is empty".to_string()));
    }
    if figure.time.len() != figure.wavelet.len() {
        return Err(RenderError::InvalidFigure(format!(
            "time has {} samples but wavelet has {}",
            figure.time.len(),
            figure.wavelet.len()
        )));
    }
    if figure
        .wavelet
        .iter()
        .chain(figure.time.iter())
        .any(|v| !v.is_finite())
    {
        return Err(RenderError::InvalidFigure(
            "samples must be finite numbers".to_string(),
        ));
    }
    let dt = figure.dt().ok_or_else(|| {
        RenderError::InvalidFigure("time axis needs two increasing samples".to_string())
    })?;

    let height = MARGIN_TOP + 3.0 * PANEL_SPACING - 20.0;
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{height}" viewBox="0 0 {WIDTH} {height}" font-family="sans-serif" font-size="13">"#
    );
    let _ = writeln!(out, "<title>{}</title>", escape(&figure.title));
    let _ = writeln!(
        out,
        r#"<rect width="100%" height="100%" fill="white"/>"#
    );

    time_panel(&mut out, figure);

    let spectrum = Spectrum::of(&figure.wavelet, dt);
    let nyquist = spectrum.frequencies.last().copied().unwrap_or(0.0);
    let f_max = spectrum
        .bandwidth_limit(0.01)
        .map_or(nyquist, |f| (f * 1.25).min(nyquist))
        .max(spectrum.frequencies.get(1).copied().unwrap_or(1.0));
    let shown = spectrum.frequencies.iter().take_while(|f| **f <= f_max).count();
    let frequencies = &spectrum.frequencies[..shown];

    let amplitudes = &spectrum.amplitudes[..shown];
    let a_max = amplitudes.iter().copied().fold(0.0, f64::max);
    let panel = Panel::new(1, (0.0, f_max), (0.0, if a_max > 0.0 { a_max } else { 1.0 }));
    let amplitude_title = match spectrum.peak_frequency() {
        Some(peak) => format!("Amplitude Spectrum (peak {:.1} Hz)", peak),
        None => "Amplitude Spectrum".to_string(),
    };
    panel.frame(&mut out, &amplitude_title, "Frequency (Hz)", "Amplitude");
    polyline(&mut out, &panel, frequencies.iter().copied().zip(amplitudes.iter().copied()), "#2ca02c");

    let power = spectrum.power_db();
    let panel = Panel::new(2, (0.0, f_max), (POWER_FLOOR_DB, 0.0));
    panel.frame(&mut out, "Power Spectrum", "Frequency (Hz)", "Power (dB)");
    polyline(&mut out, &panel, frequencies.iter().copied().zip(power[..shown].iter().copied()), "#9467bd");

    out.push_str("</svg>\n");
    Ok(out)
}

fn time_panel(out: &mut String, figure: &WaveletFigure) {
    let t_first = figure.time[0];
    let t_last = figure.time[figure.time.len() - 1];
    let peak = figure.wavelet.iter().fold(0.0_f64, |m, w| m.max(w.abs()));
    let peak = if peak > 0.0 { peak } else { 1.0 };

    let panel = Panel::new(0, (t_first, t_last), (-peak, peak));
    panel.frame(out, &figure.title, "Time (s)", "Amplitude");

    let samples = || figure.time.iter().copied().zip(figure.wavelet.iter().copied());
    lobe(out, &panel, samples().map(|(t, w)| (t, w.max(0.0))), POSITIVE_FILL);
    lobe(out, &panel, samples().map(|(t, w)| (t, w.min(0.0))), NEGATIVE_FILL);

    let _ = writeln!(
        out,
        r##"<line x1="{MARGIN_LEFT}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="#888" stroke-dasharray="4 3"/>"##,
        WIDTH - MARGIN_RIGHT,
        y = panel.y(0.0)
    );
    polyline(out, &panel, samples(), "black");
}

/// Filled area between the curve and the zero line
fn lobe(out: &mut String, panel: &Panel, points: impl Iterator<Item = (f64, f64)>, fill: &str) {
    let (x_lo, x_hi) = panel.x_range;
    let zero = panel.y(0.0);
    let mut path = format!("{:.2},{:.2}", panel.x(x_lo), zero);
    for (x, y) in points {
        let _ = write!(path, " {:.2},{:.2}", panel.x(x), panel.y(y));
    }
    let _ = write!(path, " {:.2},{:.2}", panel.x(x_hi), zero);
    let _ = writeln!(
        out,
        r#"<polygon points="{path}" fill="{fill}" fill-opacity="0.6" stroke="none"/>"#
    );
}

fn polyline(out: &mut String, panel: &Panel, points: impl Iterator<Item = (f64, f64)>, stroke: &str) {
    let path = points
        .map(|(x, y)| format!("{:.2},{:.2}", panel.x(x), panel.y(y)))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(
        out,
        r#"<polyline points="{path}" fill="none" stroke="{stroke}" stroke-width="1.5"/>"#
    );
}

fn tick(v: f64) -> String {
    if v != 0.0 && v.abs() < 0.1 {
        format!("{:.3}", v)
    } else {
        format!("{:.1}", v)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure() -> WaveletFigure {
        let dt = 0.001;
        let time: Vec<f64> = (-64..=64).map(|i| i as f64 * dt).collect();
        let wavelet = time
            .iter()
            .map(|t| {
                let a = (std::f64::consts::PI * 30.0 * t).powi(2);
                (1.0 - 2.0 * a) * (-a).exp()
            })
            .collect();
        WaveletFigure::new("Ricker <30 Hz>", time, wavelet)
    }

    #[test]
    fn test_render_svg_has_three_panels() {
        let svg = render_svg(&figure()).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Amplitude Spectrum"));
        assert!(svg.contains("Power Spectrum"));
        assert!(svg.contains("Ricker &lt;30 Hz&gt;"));
        assert_eq!(svg.matches("<polygon").count(), 2);
        assert!(svg.contains(POSITIVE_FILL));
        assert!(svg.contains(NEGATIVE_FILL));
        assert_eq!(svg.matches("<polyline").count(), 3);
    }

    #[test]
    fn test_amplitude_panel_names_dominant_frequency() {
        let svg = render_svg(&figure()).unwrap();

        let start = svg.find("Amplitude Spectrum (peak ").unwrap() + "Amplitude Spectrum (peak ".len();
        let end = start + svg[start..].find(" Hz)").unwrap();
        let peak: f64 = svg[start..end].parse().unwrap();
        assert!((25.0..=35.0).contains(&peak), "peak {peak}");
    }

    #[test]
    fn test_render_svg_rejects_bad_figures() {
        let empty = WaveletFigure::new("w", vec![], vec![]);
        assert!(matches!(render_svg(&empty), Err(RenderError::InvalidFigure(_))));

        let mismatched = WaveletFigure::new("w", vec![0.0, 0.001], vec![1.0]);
        assert!(render_svg(&mismatched).is_err());

        let not_finite = WaveletFigure::new("w", vec![0.0, 0.001], vec![1.0, f64::NAN]);
        assert!(render_svg(&not_finite).is_err());

        let single = WaveletFigure::new("w", vec![0.0], vec![1.0]);
        assert!(render_svg(&single).is_err());
    }

    #[test]
    fn test_svg_renderer_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = SvgFigureRenderer::new(dir.path().join("figures"));

        let first = renderer.render(&figure()).unwrap();
        let second = renderer.render(&figure()).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.media_type, SVG_MEDIA_TYPE);
        assert!(first.uri.ends_with(".svg"));
        let content = fs::read_to_string(&first.uri).unwrap();
        assert!(content.contains("Power Spectrum"));
    }
}
