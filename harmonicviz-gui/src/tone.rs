//! # Tone Player Module
//!
//! Sounds the currently selected harmonic as a sine tone through the default
//! output device. The cpal stream lives on a dedicated thread; the GUI sends
//! it commands over a crossbeam channel.
//!
//! ## Features
//! - Automatic output device and format selection
//! - One stream per tone: a new frequency replaces the previous stream
//! - Graceful shutdown when the player is dropped

use anyhow::{Result, anyhow, bail};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SupportedStreamConfig, SupportedStreamConfigRange};
use crossbeam_channel::{Receiver, Sender};
use std::f32::consts::TAU;
use std::thread::{self, JoinHandle};

/// Commands understood by the tone thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToneCommand {
    /// Start (or retune to) a sine tone at this frequency in Hz
    Play(f64),
    /// Silence the output
    Stop,
    /// Stop and exit the thread
    Shutdown,
}

/// A sine oscillator producing one sample per call.
#[derive(Debug, Clone)]
pub struct SineOscillator {
    phase: f32,
    phase_step: f32,
    gain: f32,
}

impl SineOscillator {
    pub fn new(frequency: f32, sample_rate: f32, gain: f32) -> Self {
        Self {
            phase: 0.0,
            phase_step: TAU * frequency / sample_rate,
            gain,
        }
    }

    pub fn next_sample(&mut self) -> f32 {
        let sample = self.phase.sin() * self.gain;
        self.phase = (self.phase + self.phase_step) % TAU;
        sample
    }
}

/// Handle to the tone thread.
///
/// Dropping the handle shuts the thread down.
#[derive(Debug)]
pub struct TonePlayer {
    command_tx: Sender<ToneCommand>,
    thread_handle: Option<JoinHandle<()>>,
}

impl TonePlayer {
    /// Spawns the tone thread.
    ///
    /// # Arguments
    /// * `gain` - Output amplitude of the sine tone (0.0 to 1.0)
    /// * `target_rate` - Preferred output sample rate in Hz
    pub fn spawn(gain: f32, target_rate: u32) -> Self {
        let (command_tx, command_rx) = crossbeam_channel::unbounded();
        let thread_handle = thread::spawn(move || run_tone_thread(command_rx, gain, target_rate));
        Self {
            command_tx,
            thread_handle: Some(thread_handle),
        }
    }

    pub fn play(&self, frequency: f64) {
        self.send(ToneCommand::Play(frequency));
    }

    pub fn stop(&self) {
        self.send(ToneCommand::Stop);
    }

    fn send(&self, command: ToneCommand) {
        if self.command_tx.send(command).is_err() {
            tracing::warn!(?command, "tone thread is gone, dropping command");
        }
    }
}

impl Drop for TonePlayer {
    fn drop(&mut self) {
        let _ = self.command_tx.send(ToneCommand::Shutdown);
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                tracing::error!("tone thread panicked");
            }
        }
    }
}

/// Body of the tone thread: owns the output stream and applies commands in order.
fn run_tone_thread(commands: Receiver<ToneCommand>, gain: f32, target_rate: u32) {
    tracing::debug!("tone thread started");
    let mut stream: Option<cpal::Stream> = None;

    for command in commands.iter() {
        match command {
            ToneCommand::Play(frequency) => {
                // Drop the old stream before opening the device again.
                stream = None;
                match start_tone(frequency, gain, target_rate) {
                    Ok(s) => {
                        tracing::debug!(frequency, "tone started");
                        stream = Some(s);
                    }
                    Err(e) => tracing::error!(error = %e, frequency, "could not start tone"),
                }
            }
            ToneCommand::Stop => {
                if let Some(s) = stream.take() {
                    if let Err(e) = s.pause() {
                        tracing::warn!(error = %e, "error pausing output stream");
                    }
                }
            }
            ToneCommand::Shutdown => break,
        }
    }

    drop(stream);
    tracing::debug!("tone thread finished");
}

/// Opens the default output device and plays a sine tone.
///
/// # Arguments
/// * `frequency` - Tone frequency in Hz
/// * `gain` - Output amplitude
/// * `target_rate` - Preferred sample rate in Hz
///
/// # Returns
/// * `Ok(stream)` - The playing stream; the tone stops when it is dropped
/// * `Err(e)` - No usable output device or format
pub fn start_tone(frequency: f64, gain: f32, target_rate: u32) -> Result<cpal::Stream> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow!("No output device available"))?;

    tracing::debug!(device = %device.name()?, "using audio output device");

    let configs = device.supported_output_configs()?.collect::<Vec<_>>();
    let supported_config = find_supported_config(configs, target_rate)
        .ok_or_else(|| anyhow!("No suitable f32 output format found"))?;

    let sample_rate = supported_config.sample_rate().0;
    let channels = supported_config.channels() as usize;
    if channels == 0 {
        bail!("Output format has no channels");
    }
    let config: cpal::StreamConfig = supported_config.into();

    let mut oscillator = SineOscillator::new(frequency as f32, sample_rate as f32, gain);
    let err_fn = |err: cpal::StreamError| tracing::error!(error = %err, "an error occurred on the output stream");

    let stream = device.build_output_stream(
        &config,
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            for frame in data.chunks_mut(channels) {
                let sample = oscillator.next_sample();
                frame.fill(sample);
            }
        },
        err_fn,
        None,
    )?;

    stream.play()?;
    Ok(stream)
}

/// Picks the f32 output configuration closest to the target sample rate,
/// preferring fewer channels.
fn find_supported_config(
    configs: Vec<SupportedStreamConfigRange>,
    target_rate: u32,
) -> Option<SupportedStreamConfig> {
    configs
        .into_iter()
        .filter(|c| c.sample_format() == cpal::SampleFormat::F32)
        .min_by_key(|c| {
            let min_diff = (c.min_sample_rate().0 as i64 - target_rate as i64).abs();
            let max_diff = (c.max_sample_rate().0 as i64 - target_rate as i64).abs();
            let in_range = c.min_sample_rate().0 <= target_rate && target_rate <= c.max_sample_rate().0;
            let rate_distance = if in_range { 0 } else { min_diff.min(max_diff) };
            (rate_distance, c.channels())
        })
        .map(|c| {
            let rate = target_rate.clamp(c.min_sample_rate().0, c.max_sample_rate().0);
            c.with_sample_rate(cpal::SampleRate(rate))
        })
}
