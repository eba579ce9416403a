use crate::analyser::ByteAnalyser;
use anyhow::anyhow;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use sonogrid_core::{AnalyserParams, SpectrumSource};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Most recent mono samples from the input stream.
pub struct SampleRing {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl SampleRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: f32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn copy_into(&self, out: &mut Vec<f32>) {
        out.clear();
        out.extend(self.samples.iter().copied());
    }
}

pub fn list_input_devices() -> anyhow::Result<Vec<String>> {
    let host = cpal::default_host();
    Ok(host
        .input_devices()?
        .map(|d| d.name().unwrap_or_else(|_| "Unknown Device".to_string()))
        .collect())
}

fn find_input_device(name: Option<&str>) -> anyhow::Result<cpal::Device> {
    let host = cpal::default_host();
    match name {
        Some(wanted) => host
            .input_devices()?
            .find(|d| d.name().map(|n| n == wanted).unwrap_or(false))
            .ok_or_else(|| anyhow!("no input device named {wanted:?}")),
        None => host
            .default_input_device()
            .ok_or_else(|| anyhow!("No default input device found")),
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    ring: Arc<Mutex<SampleRing>>,
) -> anyhow::Result<cpal::Stream>
where
    T: cpal::Sample + cpal::SizedSample + Send + 'static,
    f32: cpal::FromSample<T>,
{
    let channels = config.channels.max(1) as usize;
    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            let Ok(mut ring) = ring.lock() else {
                return;
            };
            for frame in data.chunks(channels) {
                let sum: f32 = frame
                    .iter()
                    .map(|&s| -> f32 { cpal::Sample::from_sample(s) })
                    .sum();
                ring.push(sum / frame.len() as f32);
            }
        },
        |err| log::error!("[capture] stream error: {err}"),
        None,
    )?;
    Ok(stream)
}

/// Live input device feeding a [`ByteAnalyser`]; the frame driver's spectrum
/// source on desktop.
pub struct CaptureSource {
    _stream: cpal::Stream,
    ring: Arc<Mutex<SampleRing>>,
    analyser: ByteAnalyser,
    snapshot: Vec<f32>,
    bytes: Vec<u8>,
}

impl CaptureSource {
    pub fn open(device: Option<&str>, params: &AnalyserParams, amount: u32) -> anyhow::Result<Self> {
        let device = find_input_device(device)?;
        let supported = device.default_input_config()?;
        let sample_format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();

        let analyser = ByteAnalyser::new(params.fft_size_for(amount) as usize, params);
        let ring = Arc::new(Mutex::new(SampleRing::new(analyser.fft_size())));
        let stream = match sample_format {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, ring.clone())?,
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, ring.clone())?,
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, ring.clone())?,
            other => return Err(anyhow!("unsupported sample format {other:?}")),
        };
        stream.play()?;
        log::info!(
            "[capture] {} @ {} Hz, {} ch, fft={} bins={}",
            device.name().unwrap_or_default(),
            config.sample_rate.0,
            config.channels,
            analyser.fft_size(),
            analyser.bin_count()
        );
        Ok(Self {
            _stream: stream,
            ring,
            bytes: vec![0; analyser.bin_count()],
            analyser,
            snapshot: Vec::new(),
        })
    }
}

impl SpectrumSource for CaptureSource {
    fn bin_count(&self) -> usize {
        self.analyser.bin_count()
    }

    fn read_bytes(&mut self, out: &mut [u8]) {
        if let Ok(ring) = self.ring.lock() {
            ring.copy_into(&mut self.snapshot);
        }
        self.analyser.process(&self.snapshot, &mut self.bytes);
        let n = out.len().min(self.bytes.len());
        out[..n].copy_from_slice(&self.bytes[..n]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_keeps_latest_samples() {
        let mut ring = SampleRing::new(3);
        for s in [1.0, 2.0, 3.0, 4.0, 5.0] {
            ring.push(s);
        }
        let mut out = Vec::new();
        ring.copy_into(&mut out);
        assert_eq!(out, vec![3.0, 4.0, 5.0]);
    }
}
