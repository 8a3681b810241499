//! Audio collaborator: synthesized sound effects and a background music loop.
//!
//! The game core only queues [`SoundCue`]s. [`AudioManager`] turns them into clips and
//! hands those to an [`AudioOutput`]. Playback failures never reach the game: they are
//! stored and can be collected with [`AudioManager::take_error`] for reporting once the
//! terminal is restored.
//!
//! Real output needs the `rodio` feature; without it every manager is silent and reports
//! [`AudioStatus::Unavailable`].
//!
//! ```
//! use blockfall_audio::{AudioManager, AudioSettings, AudioStatus, SilentOutput};
//! use blockfall_audio::types::SoundCue;
//!
//! let mut audio = AudioManager::new(AudioSettings::default(), Box::new(SilentOutput));
//! assert_eq!(audio.status(), AudioStatus::Muted);
//! assert!(!audio.play(SoundCue::Move));
//!
//! audio.toggle_mute();
//! assert_eq!(audio.status().label(), "ON");
//! assert!(audio.play(SoundCue::Move));
//! ```

pub mod cues;
pub mod music;
pub mod output;
pub mod settings;
pub mod synth;

pub use blockfall_types as types;

pub use cues::{spec_for, SoundBank, SoundSpec};
pub use music::{note_envelope, BackgroundMusic, MUSIC_NOTES};
#[cfg(feature = "rodio")]
pub use output::RodioOutput;
pub use output::{AudioOutput, SilentOutput};
pub use settings::AudioSettings;
pub use synth::{Waveform, DEFAULT_SAMPLE_RATE};

use types::SoundCue;

/// What the HUD shows for sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioStatus {
    /// No output device (or built without one)
    Unavailable,
    Muted,
    On,
}

impl AudioStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AudioStatus::Unavailable => "N/A",
            AudioStatus::Muted => "OFF",
            AudioStatus::On => "ON",
        }
    }
}

pub struct AudioManager {
    settings: AudioSettings,
    output: Box<dyn AudioOutput>,
    bank: SoundBank,
    available: bool,
    music_playing: bool,
    last_played: Option<SoundCue>,
    error: Option<anyhow::Error>,
}

impl AudioManager {
    pub fn new(settings: AudioSettings, output: Box<dyn AudioOutput>) -> Self {
        Self {
            settings,
            output,
            bank: SoundBank::new(DEFAULT_SAMPLE_RATE),
            available: true,
            music_playing: false,
            last_played: None,
            error: None,
        }
    }

    /// Manager that never plays anything but still tracks mute state.
    pub fn unavailable(settings: AudioSettings) -> Self {
        Self {
            available: false,
            ..Self::new(settings, Box::new(SilentOutput))
        }
    }

    /// Open the default output device, falling back to [`AudioManager::unavailable`].
    ///
    /// The reason for a fallback is kept for [`AudioManager::take_error`].
    #[cfg(feature = "rodio")]
    pub fn open_default(settings: AudioSettings) -> Self {
        match RodioOutput::open_default() {
            Ok(output) => Self::new(settings, Box::new(output)),
            Err(err) => {
                let mut manager = Self::unavailable(settings);
                manager.error = Some(err.context("no audio output device"));
                manager
            }
        }
    }

    #[cfg(not(feature = "rodio"))]
    pub fn open_default(settings: AudioSettings) -> Self {
        Self::unavailable(settings)
    }

    pub fn status(&self) -> AudioStatus {
        if !self.available {
            AudioStatus::Unavailable
        } else if self.settings.muted {
            AudioStatus::Muted
        } else {
            AudioStatus::On
        }
    }

    pub fn settings(&self) -> &AudioSettings {
        &self.settings
    }

    pub fn is_muted(&self) -> bool {
        self.settings.muted
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    /// Last cue that was actually handed to the output
    pub fn last_played(&self) -> Option<SoundCue> {
        self.last_played
    }

    /// Play one cue. Returns whether a clip was sent to the output.
    pub fn play(&mut self, cue: SoundCue) -> bool {
        if !self.available || self.settings.muted {
            return false;
        }
        let gain = self.settings.sfx_gain();
        let rate = self.bank.sample_rate();
        match self.output.play_clip(self.bank.clip(cue), rate, gain) {
            Ok(()) => {
                self.last_played = Some(cue);
                true
            }
            Err(err) => {
                self.record(err);
                false
            }
        }
    }

    /// Play every cue in order; returns how many were sent.
    pub fn play_all(&mut self, cues: &[SoundCue]) -> usize {
        cues.iter().filter(|&&cue| self.play(cue)).count()
    }

    /// Flip mute. Muting stops the music right away.
    pub fn toggle_mute(&mut self) -> bool {
        self.set_muted(!self.settings.muted);
        self.settings.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        if muted {
            self.sync_music(false);
        }
    }

    /// Bring the music loop in line with the game: it plays only while the game wants it
    /// and sound is on.
    pub fn sync_music(&mut self, game_wants_music: bool) {
        let should_play = game_wants_music && self.available && !self.settings.muted;
        if should_play == self.music_playing {
            return;
        }
        let gain = self.settings.music_gain();
        match self.output.set_music(should_play, gain) {
            Ok(()) => self.music_playing = should_play,
            Err(err) => self.record(err),
        }
    }

    /// First playback error since the last call, if any
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn record(&mut self, err: anyhow::Error) {
        // Keep the first failure; later ones are usually the same device going away.
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::unavailable(AudioSettings::default())
    }
}
