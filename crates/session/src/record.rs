use std::path::PathBuf;

use crate::frame::FrameBuffer;

/// Serializes a finished recording into one artifact.
pub trait AnimationEncoder {
    /// Receives every captured frame in capture order. Returns where the
    /// artifact was written.
    fn encode(&mut self, frames: Vec<FrameBuffer>) -> anyhow::Result<PathBuf>;
}

/// Frame capture for animations. Frames are only retained while recording.
#[derive(Debug, Default)]
pub struct Recorder {
    recording: bool,
    frames: Vec<FrameBuffer>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn start(&mut self) {
        self.frames.clear();
        self.recording = true;
    }

    /// Copies the frame if recording. The core reuses its buffer, hence the clone.
    pub fn capture(&mut self, frame: &FrameBuffer) {
        if self.recording {
            self.frames.push(frame.clone());
        }
    }

    /// Ends the recording and hands over everything captured.
    pub fn stop(&mut self) -> Vec<FrameBuffer> {
        self.recording = false;
        std::mem::take(&mut self.frames)
    }
}
