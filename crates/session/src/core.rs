//! Contract between the session and the emulator core.
//!
//! The session never looks inside the core: it only steps it, feeds it
//! controller state, reads the finished frame and moves opaque state around.

use std::{
    collections::VecDeque,
    path::Path,
    sync::{Arc, Mutex},
};

use crate::{
    controller::{NesController, Pad},
    frame::FrameBuffer,
};

/// Sample queue shared with the host audio device. The core pushes samples,
/// the device callback pops them.
pub type AudioRing = Arc<Mutex<VecDeque<f32>>>;

/// Host audio output handed to the core on session entry.
#[derive(Clone, Debug)]
pub struct AudioOutput {
    pub ring: AudioRing,
    pub sample_rate: u32,
}

impl AudioOutput {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            ring: Arc::new(Mutex::new(VecDeque::with_capacity(4096))),
            sample_rate,
        }
    }
}

pub trait Cartridge {
    /// Whether the cartridge declares battery-backed save RAM.
    fn battery_present(&self) -> bool;
    fn save_ram(&self) -> &[u8];
    fn set_save_ram(&mut self, sram: Vec<u8>);
}

pub trait EmulatorCore {
    type Cart: Cartridge;

    /// Advance emulation by `dt` seconds of emulated time. An error here is an
    /// internal core failure and is not recoverable.
    fn step_seconds(&mut self, dt: f64) -> anyhow::Result<()>;

    /// The last finished frame. Stable until the next [`Self::step_seconds`].
    fn frame_buffer(&self) -> &FrameBuffer;

    /// Number of frames the PPU has finished since power on.
    fn frame_counter(&self) -> u64;

    fn set_buttons(&mut self, pad: Pad, buttons: NesController);

    fn reset(&mut self);

    fn load_state(&mut self, path: &Path) -> anyhow::Result<()>;
    fn save_state(&self, path: &Path) -> anyhow::Result<()>;

    fn cartridge(&self) -> &Self::Cart;
    fn cartridge_mut(&mut self) -> &mut Self::Cart;

    /// Working memory (console RAM).
    fn ram(&self) -> &[u8];
    fn ram_mut(&mut self) -> &mut [u8];

    /// Attach or detach (`None`) the audio output.
    fn set_audio_sink(&mut self, sink: Option<AudioRing>, sample_rate: u32);
}
