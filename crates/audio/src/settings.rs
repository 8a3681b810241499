//! Volume settings.

pub const DEFAULT_MASTER_VOLUME: f32 = 0.7;
pub const DEFAULT_MUSIC_VOLUME: f32 = 0.5;
pub const DEFAULT_SFX_VOLUME: f32 = 0.8;

/// Mixer levels in [0, 1] plus the mute switch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioSettings {
    master: f32,
    music: f32,
    sfx: f32,
    pub muted: bool,
}

impl AudioSettings {
    pub fn new(master: f32, music: f32, sfx: f32, muted: bool) -> Self {
        Self {
            master: clamp_volume(master),
            music: clamp_volume(music),
            sfx: clamp_volume(sfx),
            muted,
        }
    }

    pub fn master(&self) -> f32 {
        self.master
    }

    pub fn music(&self) -> f32 {
        self.music
    }

    pub fn sfx(&self) -> f32 {
        self.sfx
    }

    pub fn set_master(&mut self, v: f32) {
        self.master = clamp_volume(v);
    }

    pub fn set_music(&mut self, v: f32) {
        self.music = clamp_volume(v);
    }

    pub fn set_sfx(&mut self, v: f32) {
        self.sfx = clamp_volume(v);
    }

    /// Effective gain for sound effects (0 while muted)
    pub fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master * self.sfx
        }
    }

    /// Effective gain for background music (0 while muted)
    pub fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master * self.music
        }
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self::new(
            DEFAULT_MASTER_VOLUME,
            DEFAULT_MUSIC_VOLUME,
            DEFAULT_SFX_VOLUME,
            true,
        )
    }
}

fn clamp_volume(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
