//! Background music: a slow triangle-wave loop, generated on the fly.

use crate::synth::{wave_sample, Waveform, DEFAULT_SAMPLE_RATE};

/// The loop: (frequency in Hz, length in seconds)
pub const MUSIC_NOTES: [(f32, f32); 4] = [(220.0, 2.0), (246.0, 2.0), (196.0, 2.0), (220.0, 2.0)];

const ATTACK_S: f32 = 0.1;
const PEAK: f32 = 0.05;
const FLOOR: f32 = 0.01;

/// Gain at `t` seconds into a note lasting `duration_s`.
///
/// Rises linearly to 0.05 over 0.1 s, then decays exponentially to 0.01 by 0.1 s before
/// the end of the note and holds there.
pub fn note_envelope(t: f32, duration_s: f32) -> f32 {
    if t < ATTACK_S {
        return PEAK * (t / ATTACK_S).max(0.0);
    }
    let decay_len = (duration_s - 2.0 * ATTACK_S).max(f32::EPSILON);
    let progress = ((t - ATTACK_S) / decay_len).min(1.0);
    PEAK * (FLOOR / PEAK).powf(progress)
}

/// Endless mono sample stream of the music loop
#[derive(Debug, Clone)]
pub struct BackgroundMusic {
    sample_rate: u32,
    frame: u64,
}

impl BackgroundMusic {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
            frame: 0,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Length of one pass through the loop in seconds
    pub fn loop_duration_s() -> f32 {
        MUSIC_NOTES.iter().map(|&(_, d)| d).sum()
    }

    /// Note index and time within that note for a position in the loop
    fn locate(&self, t: f32) -> (usize, f32) {
        let mut t = t % Self::loop_duration_s();
        for (i, &(_, d)) in MUSIC_NOTES.iter().enumerate() {
            if t < d {
                return (i, t);
            }
            t -= d;
        }
        (MUSIC_NOTES.len() - 1, 0.0)
    }
}

impl Default for BackgroundMusic {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

impl Iterator for BackgroundMusic {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        // Wrap per loop so the f32 time never loses precision.
        let loop_frames = (Self::loop_duration_s() * self.sample_rate as f32) as u64;
        let t = (self.frame % loop_frames.max(1)) as f32 / self.sample_rate as f32;
        let (note, t_in_note) = self.locate(t);
        let (freq, duration) = MUSIC_NOTES[note];

        self.frame = self.frame.wrapping_add(1);
        Some(wave_sample(Waveform::Triangle, freq, t_in_note) * note_envelope(t_in_note, duration))
    }
}

#[cfg(feature = "rodio")]
impl rodio::Source for BackgroundMusic {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<std::time::Duration> {
        None
    }
}
