//! Byte spectrum with the same conventions as a WebAudio AnalyserNode, so the
//! grid reacts the same way on desktop as in the browser:
//!
//! - Blackman window over the last `fft_size` samples
//! - magnitude scaled by `1 / fft_size`
//! - exponential smoothing over time
//! - dB mapped linearly onto `0..=255` between `min_db` and `max_db`

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use sonogrid_core::AnalyserParams;
use std::sync::Arc;

pub struct ByteAnalyser {
    fft: Arc<dyn Fft<f32>>,
    fft_size: usize,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    smoothing: f32,
    min_db: f32,
    max_db: f32,
}

fn blackman(n: usize) -> Vec<f32> {
    const ALPHA: f32 = 0.16;
    let a0 = 0.5 * (1.0 - ALPHA);
    let a1 = 0.5;
    let a2 = 0.5 * ALPHA;
    let tau = 2.0 * std::f32::consts::PI;
    (0..n)
        .map(|i| {
            let x = i as f32 / n as f32;
            a0 - a1 * (tau * x).cos() + a2 * (2.0 * tau * x).cos()
        })
        .collect()
}

impl ByteAnalyser {
    pub fn new(fft_size: usize, params: &AnalyserParams) -> Self {
        let fft_size = fft_size.max(32).next_power_of_two();
        let fft = FftPlanner::new().plan_fft_forward(fft_size);
        Self {
            fft,
            fft_size,
            window: blackman(fft_size),
            scratch: vec![Complex::new(0.0, 0.0); fft_size],
            smoothed: vec![0.0; fft_size / 2],
            smoothing: params.smoothing.clamp(0.0, 1.0),
            min_db: params.min_db,
            max_db: params.max_db,
        }
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Analyse the most recent `fft_size` samples of `samples` (zero-padded at
    /// the front when shorter) and write one byte per bin into `out`.
    pub fn process(&mut self, samples: &[f32], out: &mut [u8]) {
        let n = self.fft_size;
        let take = samples.len().min(n);
        let pad = n - take;
        let tail = &samples[samples.len() - take..];
        for (i, c) in self.scratch.iter_mut().enumerate() {
            let s = if i < pad { 0.0 } else { tail[i - pad] };
            *c = Complex::new(s * self.window[i], 0.0);
        }
        self.fft.process(&mut self.scratch);

        let scale = 1.0 / n as f32;
        let tau = self.smoothing;
        for (k, smoothed) in self.smoothed.iter_mut().enumerate() {
            let mag = self.scratch[k].norm() * scale;
            let next = tau * *smoothed + (1.0 - tau) * mag;
            *smoothed = if next.is_finite() { next } else { 0.0 };
        }

        let range = (self.max_db - self.min_db).max(f32::EPSILON);
        for (o, &mag) in out.iter_mut().zip(self.smoothed.iter()) {
            *o = if mag > 0.0 {
                let db = 20.0 * mag.log10();
                (255.0 / range * (db - self.min_db)).clamp(0.0, 255.0) as u8
            } else {
                0
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(smoothing: f32) -> AnalyserParams {
        AnalyserParams {
            smoothing,
            ..AnalyserParams::default()
        }
    }

    #[test]
    fn silence_reads_as_zero() {
        let mut a = ByteAnalyser::new(1024, &params(0.8));
        let mut out = vec![7u8; a.bin_count()];
        a.process(&vec![0.0; 1024], &mut out);
        assert!(out.iter().all(|&b| b == 0));
    }

    #[test]
    fn tone_peaks_in_its_bin() {
        let sample_rate = 48_000.0f32;
        let n = 1024usize;
        let bin = 40usize;
        let freq = bin as f32 * sample_rate / n as f32;
        // Quiet enough that the peak stays below the max_db ceiling.
        let samples: Vec<f32> = (0..n)
            .map(|i| 0.05 * (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate).sin())
            .collect();
        let mut a = ByteAnalyser::new(n, &params(0.0));
        let mut out = vec![0u8; a.bin_count()];
        a.process(&samples, &mut out);

        let (peak, &value) = out
            .iter()
            .enumerate()
            .max_by_key(|(_, &b)| b)
            .unwrap();
        assert_eq!(peak, bin);
        assert!(value > 0 && value < 255, "peak byte {value}");
        assert!(out[bin - 1] < value && out[bin + 1] < value);
    }

    #[test]
    fn short_input_is_zero_padded() {
        let mut a = ByteAnalyser::new(256, &params(0.0));
        let mut out = vec![0u8; a.bin_count()];
        a.process(&[0.0; 10], &mut out);
        assert!(out.iter().all(|&b| b == 0));
    }
}
