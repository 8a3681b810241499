//! Sound bank: one pre-rendered clip per sound cue.

use crate::synth::{render_chord, render_sweep, render_tone, Waveform};
use crate::types::SoundCue;

/// How a cue is synthesized
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoundSpec {
    Tone {
        freq_hz: f32,
        duration_s: f32,
        wave: Waveform,
    },
    Chord {
        freqs_hz: &'static [f32],
        duration_s: f32,
        wave: Waveform,
    },
    Sweep {
        start_hz: f32,
        duration_s: f32,
    },
}

impl SoundSpec {
    pub fn duration_s(&self) -> f32 {
        match *self {
            SoundSpec::Tone { duration_s, .. }
            | SoundSpec::Chord { duration_s, .. }
            | SoundSpec::Sweep { duration_s, .. } => duration_s,
        }
    }

    pub fn render(&self, sample_rate: u32) -> Vec<f32> {
        match *self {
            SoundSpec::Tone {
                freq_hz,
                duration_s,
                wave,
            } => render_tone(freq_hz, duration_s, wave, sample_rate),
            SoundSpec::Chord {
                freqs_hz,
                duration_s,
                wave,
            } => render_chord(freqs_hz, duration_s, wave, sample_rate),
            SoundSpec::Sweep {
                start_hz,
                duration_s,
            } => render_sweep(start_hz, duration_s, sample_rate),
        }
    }
}

const TETRIS_CHORD: [f32; 3] = [440.0, 554.0, 659.0];
const LEVEL_UP_CHORD: [f32; 3] = [523.0, 659.0, 784.0];

pub fn spec_for(cue: SoundCue) -> SoundSpec {
    use SoundSpec::*;
    match cue {
        SoundCue::Move => Tone {
            freq_hz: 220.0,
            duration_s: 0.1,
            wave: Waveform::Sine,
        },
        SoundCue::Rotate => Tone {
            freq_hz: 330.0,
            duration_s: 0.1,
            wave: Waveform::Square,
        },
        SoundCue::Drop => Tone {
            freq_hz: 165.0,
            duration_s: 0.2,
            wave: Waveform::Triangle,
        },
        SoundCue::LineClear => Tone {
            freq_hz: 440.0,
            duration_s: 0.3,
            wave: Waveform::Sawtooth,
        },
        SoundCue::Tetris => Chord {
            freqs_hz: &TETRIS_CHORD,
            duration_s: 0.5,
            wave: Waveform::Sine,
        },
        SoundCue::LevelUp => Chord {
            freqs_hz: &LEVEL_UP_CHORD,
            duration_s: 0.4,
            wave: Waveform::Triangle,
        },
        SoundCue::GameOver => Sweep {
            start_hz: 440.0,
            duration_s: 1.0,
        },
        SoundCue::Pause => Tone {
            freq_hz: 294.0,
            duration_s: 0.2,
            wave: Waveform::Square,
        },
    }
}

/// Clips for every cue, rendered once up front
#[derive(Debug, Clone)]
pub struct SoundBank {
    sample_rate: u32,
    clips: Vec<Vec<f32>>,
}

impl SoundBank {
    pub fn new(sample_rate: u32) -> Self {
        let clips = SoundCue::ALL
            .iter()
            .map(|&cue| spec_for(cue).render(sample_rate))
            .collect();
        Self { sample_rate, clips }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn clip(&self, cue: SoundCue) -> &[f32] {
        &self.clips[cue.index()]
    }
}
