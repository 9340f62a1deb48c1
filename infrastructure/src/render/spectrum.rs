//! Frequency-domain views of a sampled signal.

use std::f64::consts::PI;

/// Power floor in dB relative to the peak
pub const POWER_FLOOR_DB: f64 = -80.0;

/// One-sided amplitude spectrum
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Bin frequencies in Hz, 0 up to Nyquist
    pub frequencies: Vec<f64>,
    pub amplitudes: Vec<f64>,
}

impl Spectrum {
    /// Spectrum of `signal` sampled every `dt` seconds.
    ///
    /// The signal is zero-padded to the next power of two.
    pub fn of(signal: &[f64], dt: f64) -> Self {
        if signal.is_empty() || dt <= 0.0 {
            return Self {
                frequencies: Vec::new(),
                amplitudes: Vec::new(),
            };
        }

        let n = signal.len().next_power_of_two();
        let mut re: Vec<f64> = signal.to_vec();
        re.resize(n, 0.0);
        let mut im = vec![0.0; n];
        fft(&mut re, &mut im);

        let bins = n / 2 + 1;
        let df = 1.0 / (n as f64 * dt);
        Self {
            frequencies: (0..bins).map(|k| k as f64 * df).collect(),
            amplitudes: (0..bins).map(|k| re[k].hypot(im[k])).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Frequency of the largest amplitude
    pub fn peak_frequency(&self) -> Option<f64> {
        self.amplitudes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, _)| self.frequencies[k])
    }

    /// Highest frequency whose amplitude reaches `fraction` of the peak
    pub fn bandwidth_limit(&self, fraction: f64) -> Option<f64> {
        let max = self.amplitudes.iter().copied().fold(0.0, f64::max);
        if max <= 0.0 {
            return None;
        }
        self.amplitudes
            .iter()
            .rposition(|a| *a >= max * fraction)
            .map(|k| self.frequencies[k])
    }

    /// Power normalized to the peak, in dB, clamped at [`POWER_FLOOR_DB`]
    pub fn power_db(&self) -> Vec<f64> {
        let max = self
            .amplitudes
            .iter()
            .map(|a| a * a)
            .fold(0.0, f64::max);
        self.amplitudes
            .iter()
            .map(|a| {
                if max <= 0.0 || *a == 0.0 {
                    POWER_FLOOR_DB
                } else {
                    (10.0 * (a * a / max).log10()).max(POWER_FLOOR_DB)
                }
            })
            .collect()
    }
}

/// In-place iterative radix-2 FFT. `re.len()` must be a power of two.
fn fft(re: &mut [f64], im: &mut [f64]) {
    let n = re.len();
    if n < 2 {
        return;
    }

    // bit-reversal permutation
    let mut j = 0;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            re.swap(i, j);
            im.swap(i, j);
        }
    }

    let mut len = 2;
    while len <= n {
        let angle = -2.0 * PI / len as f64;
        for start in (0..n).step_by(len) {
            for k in 0..len / 2 {
                let (sin, cos) = (angle * k as f64).sin_cos();
                let a = start + k;
                let b = a + len / 2;
                let tr = re[b] * cos - im[b] * sin;
                let ti = re[b] * sin + im[b] * cos;
                re[b] = re[a] - tr;
                im[b] = im[a] - ti;
                re[a] += tr;
                im[a] += ti;
            }
        }
        len <<= 1;
    }
}
