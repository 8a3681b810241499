//! Waveforms and envelopes for the synthesized sound effects.
//!
//! Everything is a pure function of time in seconds, so clips can be rendered ahead of
//! time into plain sample buffers.

use std::f32::consts::{PI, TAU};

/// Sample rate used for rendered clips and the music stream
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// Oscillator value in [-1, 1] for `freq_hz` at time `t`
pub fn wave_sample(wave: Waveform, freq_hz: f32, t: f32) -> f32 {
    let phase = TAU * freq_hz * t;
    match wave {
        Waveform::Sine => phase.sin(),
        Waveform::Square => {
            if phase.sin() > 0.0 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Triangle => (2.0 / PI) * phase.sin().asin(),
        Waveform::Sawtooth => {
            let ft = freq_hz * t;
            2.0 * (ft - (ft + 0.5).floor())
        }
    }
}

/// Single tone: fast attack, slow exponential decay, peak gain 0.3
pub fn tone_envelope(t: f32) -> f32 {
    (-3.0 * t).exp() * (1.0 - (-50.0 * t).exp()) * 0.3
}

/// Chord: softer attack and decay, peak gain 0.2
pub fn chord_envelope(t: f32) -> f32 {
    (-2.0 * t).exp() * (1.0 - (-30.0 * t).exp()) * 0.2
}

/// Descending sweep: plain exponential decay from 0.3
pub fn sweep_envelope(t: f32) -> f32 {
    (-1.5 * t).exp() * 0.3
}

fn sample_count(duration_s: f32, sample_rate: u32) -> usize {
    (duration_s * sample_rate as f32) as usize
}

fn render(duration_s: f32, sample_rate: u32, f: impl Fn(f32) -> f32) -> Vec<f32> {
    let rate = sample_rate.max(1) as f32;
    (0..sample_count(duration_s, sample_rate))
        .map(|i| f(i as f32 / rate))
        .collect()
}

pub fn render_tone(freq_hz: f32, duration_s: f32, wave: Waveform, sample_rate: u32) -> Vec<f32> {
    render(duration_s, sample_rate, |t| {
        wave_sample(wave, freq_hz, t) * tone_envelope(t)
    })
}

/// Voices are averaged before the envelope, so a chord never clips.
pub fn render_chord(freqs_hz: &[f32], duration_s: f32, wave: Waveform, sample_rate: u32) -> Vec<f32> {
    let voices = freqs_hz.len().max(1) as f32;
    render(duration_s, sample_rate, |t| {
        let sum: f32 = freqs_hz.iter().map(|&f| wave_sample(wave, f, t)).sum();
        sum / voices * chord_envelope(t)
    })
}

/// Sine whose frequency falls linearly to 20% of `start_hz` over one second
pub fn render_sweep(start_hz: f32, duration_s: f32, sample_rate: u32) -> Vec<f32> {
    render(duration_s, sample_rate, |t| {
        let freq = start_hz * (1.0 - 0.8 * t);
        wave_sample(Waveform::Sine, freq, t) * sweep_envelope(t)
    })
}
