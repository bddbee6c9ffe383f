// src/output.rs
// Real-time audio output through cpal
//
// cpal pulls samples from a callback, so blocking writes are bridged through
// a ring buffer: `write` pushes and waits for room, the callback pops and
// pads with silence on underrun.

use crate::error::SinkError;
use crate::player::AudioSink;
use crate::stream::OutputDevice;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::{HeapProd, HeapRb};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(2);
/// Longest time a write or drain may go without the device consuming anything.
const STALL_TIMEOUT: Duration = Duration::from_secs(2);
const MIN_QUEUE_SAMPLES: usize = 8192;

/// The host's default output device, opened as a mono f32 stream.
#[derive(Debug, Clone, Copy)]
pub struct CpalDevice {
    sample_rate: u32,
}

impl CpalDevice {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }
}

/// State shared with the audio callback.
#[derive(Default)]
struct Shared {
    played: AtomicU64,
    period: AtomicUsize,
    failed: AtomicBool,
}

impl OutputDevice for CpalDevice {
    type Sink = CpalSink;

    fn open(&mut self) -> Result<CpalSink, SinkError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(SinkError::NoDevice)?;
        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        log::info!("Using output device: {}", device_name);

        let config = cpal::StreamConfig {
            channels: 1,
            sample_rate: cpal::SampleRate(self.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let capacity = (self.sample_rate as usize / 4).max(MIN_QUEUE_SAMPLES);
        let (producer, mut consumer) = HeapRb::<f32>::new(capacity).split();

        let shared = Arc::new(Shared::default());
        let callback_state = Arc::clone(&shared);
        let error_state = Arc::clone(&shared);

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let n = consumer.pop_slice(data);
                    data[n..].fill(0.0);
                    callback_state.period.store(data.len(), Ordering::Relaxed);
                    callback_state.played.fetch_add(n as u64, Ordering::Release);
                },
                move |err| {
                    log::error!("Audio stream error: {}", err);
                    error_state.failed.store(true, Ordering::Release);
                },
                None,
            )
            .map_err(|e| SinkError::Open(e.to_string()))?;
        stream.play().map_err(|e| SinkError::Open(e.to_string()))?;

        log::info!(
            "Output stream started: {} Hz mono f32, {} sample queue",
            self.sample_rate,
            capacity
        );

        Ok(CpalSink {
            stream,
            producer,
            shared,
            written: 0,
            sample_rate: self.sample_rate,
        })
    }
}

/// An open cpal output stream. Dropping it stops the stream.
pub struct CpalSink {
    stream: cpal::Stream,
    producer: HeapProd<f32>,
    shared: Arc<Shared>,
    written: u64,
    sample_rate: u32,
}

impl CpalSink {
    fn check_device(&self) -> Result<(), SinkError> {
        if self.shared.failed.load(Ordering::Acquire) {
            Err(SinkError::Write("output device reported an error".to_string()))
        } else {
            Ok(())
        }
    }

    fn stalled() -> SinkError {
        SinkError::Write(format!(
            "output stream stalled for more than {:?}",
            STALL_TIMEOUT
        ))
    }
}

impl AudioSink for CpalSink {
    fn write(&mut self, samples: &[f32]) -> Result<(), SinkError> {
        let mut pending = samples;
        let mut last_progress = Instant::now();

        while !pending.is_empty() {
            self.check_device()?;
            let n = self.producer.push_slice(pending);
            if n > 0 {
                pending = &pending[n..];
                self.written += n as u64;
                last_progress = Instant::now();
            } else if last_progress.elapsed() > STALL_TIMEOUT {
                return Err(Self::stalled());
            } else {
                thread::sleep(POLL_INTERVAL);
            }
        }
        Ok(())
    }

    /// Waits until the callback has taken every queued sample, then lets
    /// one more device period play out before pausing.
    fn finish(&mut self) -> Result<(), SinkError> {
        let mut played = self.shared.played.load(Ordering::Acquire);
        let mut last_progress = Instant::now();

        while played < self.written {
            self.check_device()?;
            thread::sleep(POLL_INTERVAL);
            let now = self.shared.played.load(Ordering::Acquire);
            if now > played {
                played = now;
                last_progress = Instant::now();
            } else if last_progress.elapsed() > STALL_TIMEOUT {
                return Err(Self::stalled());
            }
        }

        let period = self.shared.period.load(Ordering::Relaxed);
        thread::sleep(Duration::from_secs_f64(
            period as f64 / self.sample_rate as f64,
        ));

        if let Err(e) = self.stream.pause() {
            log::warn!("Failed to pause output stream: {}", e);
        }
        log::debug!("Output stream drained after {} samples", self.written);
        Ok(())
    }
}
