//! Files written on request: screenshots, animations and memory dumps.

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use image::{
    codecs::gif::{GifEncoder, Repeat},
    Delay, Frame,
};

use crate::{config::GifConfig, error::SessionError, frame::FrameBuffer, record::AnimationEncoder};

#[derive(Clone, Debug)]
pub struct OutputDir {
    dir: PathBuf,
}

impl OutputDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Fresh path named after the local time, e.g. `20261018-134501.250.png`.
    pub fn timestamped(&self, extension: &str) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f").to_string();
        let mut path = self.dir.join(format!("{stamp}.{extension}"));
        let mut n = 1;
        while path.exists() {
            path = self.dir.join(format!("{stamp}-{n}.{extension}"));
            n += 1;
        }
        Ok(path)
    }

    pub fn screenshot(&self, frame: &FrameBuffer) -> Result<PathBuf, SessionError> {
        let path = self
            .timestamped("png")
            .map_err(|e| SessionError::io(&self.dir, e))?;
        frame
            .to_rgb_image()
            .save(&path)
            .map_err(|source| SessionError::Image {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }

    pub fn dump_memory(&self, ram: &[u8]) -> Result<PathBuf, SessionError> {
        let path = self
            .timestamped("ram")
            .map_err(|e| SessionError::io(&self.dir, e))?;
        std::fs::write(&path, ram).map_err(|e| SessionError::io(&path, e))?;
        Ok(path)
    }
}

/// Writes recordings as looping GIFs into an [`OutputDir`].
pub struct GifWriter {
    output: OutputDir,
    config: GifConfig,
}

impl GifWriter {
    pub fn new(output: OutputDir, config: GifConfig) -> Self {
        Self { output, config }
    }
}

impl AnimationEncoder for GifWriter {
    fn encode(&mut self, frames: Vec<FrameBuffer>) -> anyhow::Result<PathBuf> {
        if frames.is_empty() {
            bail!("Nothing to encode, the recording has no frames");
        }
        let path = self.output.timestamped("gif")?;
        let file = File::create(&path)
            .with_context(|| format!("Could not create '{}'", path.display()))?;

        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder.set_repeat(Repeat::Infinite)?;

        let delay = Delay::from_numer_denom_ms(self.config.frame_delay_ms, 1);
        let kept = frames
            .iter()
            .step_by(self.config.frame_step.max(1))
            .map(|fb| Frame::from_parts(fb.to_rgba_image(), 0, 0, delay));
        encoder
            .encode_frames(kept)
            .with_context(|| format!("Could not encode '{}'", path.display()))?;

        Ok(path)
    }
}
