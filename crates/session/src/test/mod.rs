use std::{cell::RefCell, collections::HashSet, path::Path, path::PathBuf, rc::Rc};

use anyhow::bail;

use crate::{
    controller::{NesController, Pad},
    core::{AudioRing, Cartridge, EmulatorCore},
    frame::FrameBuffer,
    host::{Graphics, Host, JoystickPort, JoystickState, Key, TextureId, Window},
    present::Quad,
    record::AnimationEncoder,
};


pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Default)]
pub struct FakeCart {
    pub battery: bool,
    pub sram: Vec<u8>,
}

impl Cartridge for FakeCart {
    fn battery_present(&self) -> bool {
        self.battery
    }

    fn save_ram(&self) -> &[u8] {
        &self.sram
    }

    fn set_save_ram(&mut self, sram: Vec<u8>) {
        self.sram = sram;
    }
}

/// Core that records every call. Stepping bumps the frame counter and writes
/// it into pixel (0, 0) and RAM byte 0, mutating both in place.
pub struct FakeCore {
    pub frame: FrameBuffer,
    pub frames: u64,
    pub steps: Vec<f64>,
    pub buttons: [NesController; 2],
    pub buttons_at_step: Vec<[NesController; 2]>,
    pub resets: usize,
    pub ram: Vec<u8>,
    pub cart: FakeCart,
    pub fail_step: bool,
    pub loaded_from: Option<PathBuf>,
    pub audio: Option<(AudioRing, u32)>,
}

impl Default for FakeCore {
    fn default() -> Self {
        Self {
            frame: FrameBuffer::new(),
            frames: 0,
            steps: Vec::new(),
            buttons: [NesController::empty(); 2],
            buttons_at_step: Vec::new(),
            resets: 0,
            ram: vec![0; 0x800],
            cart: FakeCart::default(),
            fail_step: false,
            loaded_from: None,
            audio: None,
        }
    }
}

impl EmulatorCore for FakeCore {
    type Cart = FakeCart;

    fn step_seconds(&mut self, dt: f64) -> anyhow::Result<()> {
        if self.fail_step {
            bail!("CPU jammed");
        }
        self.steps.push(dt);
        self.buttons_at_step.push(self.buttons);
        self.frames += 1;
        let n = self.frames as u8;
        self.frame.set_pixel(0, 0, (n, n, n));
        self.ram[0] = n;
        Ok(())
    }

    fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame
    }

    fn frame_counter(&self) -> u64 {
        self.frames
    }

    fn set_buttons(&mut self, pad: Pad, buttons: NesController) {
        self.buttons[pad.index()] = buttons;
    }

    fn reset(&mut self) {
        self.resets += 1;
        self.ram.fill(0);
    }

    fn load_state(&mut self, path: &Path) -> anyhow::Result<()> {
        self.ram = std::fs::read(path)?;
        self.loaded_from = Some(path.to_path_buf());
        Ok(())
    }

    fn save_state(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, &self.ram)?;
        Ok(())
    }

    fn cartridge(&self) -> &FakeCart {
        &self.cart
    }

    fn cartridge_mut(&mut self) -> &mut FakeCart {
        &mut self.cart
    }

    fn ram(&self) -> &[u8] {
        &self.ram
    }

    fn ram_mut(&mut self) -> &mut [u8] {
        &mut self.ram
    }

    fn set_audio_sink(&mut self, sink: Option<AudioRing>, sample_rate: u32) {
        self.audio = sink.map(|ring| (ring, sample_rate));
    }
}

pub struct FakeWindow {
    pub keys: HashSet<Key>,
    pub joysticks: [Option<JoystickState>; 2],
    pub size: (u32, u32),
    pub title: Option<String>,
}

impl Default for FakeWindow {
    fn default() -> Self {
        Self {
            keys: HashSet::new(),
            joysticks: [None, None],
            size: (512, 480),
            title: None,
        }
    }
}

impl Window for FakeWindow {
    fn framebuffer_size(&self) -> (u32, u32) {
        self.size
    }

    fn key_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    fn joystick(&self, port: JoystickPort) -> Option<JoystickState> {
        match port {
            JoystickPort::One => self.joysticks[0].clone(),
            JoystickPort::Two => self.joysticks[1].clone(),
        }
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GfxCall {
    Create(TextureId),
    Bind(Option<TextureId>),
    Upload,
    Draw(Quad),
    Clear([f32; 4]),
}

#[derive(Default)]
pub struct FakeGraphics {
    pub calls: Vec<GfxCall>,
    textures: usize,
}

impl Graphics for FakeGraphics {
    fn create_texture(&mut self) -> TextureId {
        let id = TextureId(self.textures);
        self.textures += 1;
        self.calls.push(GfxCall::Create(id));
        id
    }

    fn bind_texture(&mut self, texture: Option<TextureId>) {
        self.calls.push(GfxCall::Bind(texture));
    }

    fn upload_pixels(&mut self, _frame: &FrameBuffer) {
        self.calls.push(GfxCall::Upload);
    }

    fn draw_quad(&mut self, quad: &Quad) {
        self.calls.push(GfxCall::Draw(*quad));
    }

    fn clear(&mut self, rgba: [f32; 4]) {
        self.calls.push(GfxCall::Clear(rgba));
    }
}

#[derive(Default)]
pub struct FakeHost {
    pub window: Option<FakeWindow>,
    pub graphics: Option<FakeGraphics>,
}

impl FakeHost {
    pub fn windowed() -> Self {
        Self {
            window: Some(FakeWindow::default()),
            graphics: Some(FakeGraphics::default()),
        }
    }

    pub fn window_mut(&mut self) -> &mut FakeWindow {
        self.window.as_mut().expect("host has no window")
    }
}

impl Host for FakeHost {
    fn window(&mut self) -> Option<&mut dyn Window> {
        self.window.as_mut().map(|w| w as &mut dyn Window)
    }

    fn graphics(&mut self) -> Option<&mut dyn Graphics> {
        self.graphics.as_mut().map(|g| g as &mut dyn Graphics)
    }
}

/// Encoder that keeps every recording it is handed.
#[derive(Clone, Default)]
pub struct CollectingEncoder {
    pub recordings: Rc<RefCell<Vec<Vec<FrameBuffer>>>>,
    pub fail: bool,
}

impl AnimationEncoder for CollectingEncoder {
    fn encode(&mut self, frames: Vec<FrameBuffer>) -> anyhow::Result<PathBuf> {
        if self.fail {
            bail!("disk full");
        }
        let mut recordings = self.recordings.borrow_mut();
        recordings.push(frames);
        Ok(PathBuf::from(format!("{}.gif", recordings.len())))
    }
}
