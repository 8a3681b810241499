//! Runtime configuration from environment variables and command-line flags.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::audio::settings::{DEFAULT_MASTER_VOLUME, DEFAULT_MUSIC_VOLUME, DEFAULT_SFX_VOLUME};
use crate::audio::AudioSettings;

pub const USAGE: &str = "\
Usage: blockfall [OPTIONS]

Options:
  --seed N      Piece sequence seed (default: from the clock)
  --sound       Start with sound on
  --mute        Start muted (default)
  --no-mouse    Do not capture the mouse
  --log PATH    Append a JSON line per game event to PATH
  -h, --help    Show this help

Environment:
  BLOCKFALL_SEED, BLOCKFALL_MUTED, BLOCKFALL_MASTER_VOLUME, BLOCKFALL_MUSIC_VOLUME,
  BLOCKFALL_SFX_VOLUME, BLOCKFALL_NO_MOUSE, BLOCKFALL_LOG_PATH
";

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Fixed seed; `None` seeds from the clock.
    pub seed: Option<u32>,
    pub muted: bool,
    pub master_volume: f32,
    pub music_volume: f32,
    pub sfx_volume: f32,
    pub mouse: bool,
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            muted: true,
            master_volume: DEFAULT_MASTER_VOLUME,
            music_volume: DEFAULT_MUSIC_VOLUME,
            sfx_volume: DEFAULT_SFX_VOLUME,
            mouse: true,
            log_path: None,
        }
    }
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Run(GameConfig),
    Help,
}

impl GameConfig {
    /// Create from `BLOCKFALL_*` environment variables; unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let volume = |key: &str, fallback: f32| {
            get(key)
                .and_then(|s| s.parse::<f32>().ok())
                .unwrap_or(fallback)
        };

        Self {
            seed: get("BLOCKFALL_SEED").and_then(|s| s.parse().ok()),
            muted: get("BLOCKFALL_MUTED")
                .and_then(|s| parse_flag(&s))
                .unwrap_or(defaults.muted),
            master_volume: volume("BLOCKFALL_MASTER_VOLUME", defaults.master_volume),
            music_volume: volume("BLOCKFALL_MUSIC_VOLUME", defaults.music_volume),
            sfx_volume: volume("BLOCKFALL_SFX_VOLUME", defaults.sfx_volume),
            mouse: !get("BLOCKFALL_NO_MOUSE")
                .and_then(|s| parse_flag(&s))
                .unwrap_or(false),
            log_path: get("BLOCKFALL_LOG_PATH"),
        }
    }

    /// Apply command-line flags (without the program name) on top of `self`.
    pub fn parse_args(mut self, args: &[String]) -> Result<CliCommand> {
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => return Ok(CliCommand::Help),
                "--seed" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --seed"))?;
                    let seed = v
                        .parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                    self.seed = Some(seed);
                }
                "--log" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --log"))?;
                    self.log_path = Some(v.clone());
                }
                "--sound" => self.muted = false,
                "--mute" => self.muted = true,
                "--no-mouse" => self.mouse = false,
                other => return Err(anyhow!("unknown argument: {}", other)),
            }
            i += 1;
        }
        Ok(CliCommand::Run(self))
    }

    pub fn audio_settings(&self) -> AudioSettings {
        AudioSettings::new(
            self.master_volume,
            self.music_volume,
            self.sfx_volume,
            self.muted,
        )
    }

    /// The configured seed, or one taken from the clock.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn clock_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    // Fold the high bits in so runs started within the same second differ.
    (nanos ^ (nanos >> 32)) as u32
}
