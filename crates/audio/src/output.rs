//! Playback backends.

use anyhow::Result;

/// Where finished sample buffers go.
///
/// Implementations own their device; the manager only hands them mono clips and
/// the desired state of the music loop.
pub trait AudioOutput {
    /// Start a mono clip; returns once it is queued, not when it finishes.
    fn play_clip(&mut self, samples: &[f32], sample_rate: u32, volume: f32) -> Result<()>;

    /// Start, pause or re-level the background loop.
    fn set_music(&mut self, playing: bool, volume: f32) -> Result<()>;
}

/// Backend that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentOutput;

impl AudioOutput for SilentOutput {
    fn play_clip(&mut self, _samples: &[f32], _sample_rate: u32, _volume: f32) -> Result<()> {
        Ok(())
    }

    fn set_music(&mut self, _playing: bool, _volume: f32) -> Result<()> {
        Ok(())
    }
}

#[cfg(feature = "rodio")]
pub use self::device::RodioOutput;

#[cfg(feature = "rodio")]
mod device {
    use anyhow::Result;
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::AudioOutput;
    use crate::music::BackgroundMusic;

    /// Default output device through rodio
    pub struct RodioOutput {
        // Dropping the stream silences every sink.
        _stream: OutputStream,
        handle: OutputStreamHandle,
        music: Sink,
    }

    impl RodioOutput {
        pub fn open_default() -> Result<Self> {
            let (stream, handle) = OutputStream::try_default()?;
            let music = Sink::try_new(&handle)?;
            music.pause();
            music.append(BackgroundMusic::default());
            Ok(Self {
                _stream: stream,
                handle,
                music,
            })
        }
    }

    impl AudioOutput for RodioOutput {
        fn play_clip(&mut self, samples: &[f32], sample_rate: u32, volume: f32) -> Result<()> {
            let sink = Sink::try_new(&self.handle)?;
            sink.set_volume(volume);
            sink.append(SamplesBuffer::new(1, sample_rate, samples.to_vec()));
            sink.detach();
            Ok(())
        }

        fn set_music(&mut self, playing: bool, volume: f32) -> Result<()> {
            self.music.set_volume(volume);
            if playing {
                self.music.play();
            } else {
                self.music.pause();
            }
            Ok(())
        }
    }
}
