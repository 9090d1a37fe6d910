use std::collections::VecDeque;

use crate::{
    capture::{GifWriter, OutputDir},
    config::SessionConfig,
    core::{AudioOutput, Cartridge, EmulatorCore},
    error::SessionError,
    host::{Host, Key, Window},
    input::InputMultiplexer,
    persist::{ContentHash, SaveStore},
    present::Presenter,
    record::{AnimationEncoder, Recorder},
    stepper,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hotkey {
    Screenshot,
    Reset,
    ToggleRecording,
    QuickSave,
    QuickLoad,
    DumpMemory,
}

/// What the host should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Continue,
    ShowMenu,
}

/// One running program, from entry until the process exits.
pub struct Session<C: EmulatorCore> {
    core: C,
    title: String,
    hash: ContentHash,
    config: SessionConfig,
    store: SaveStore,
    output: OutputDir,
    audio: Option<AudioOutput>,
    encoder: Box<dyn AnimationEncoder>,

    input: Option<InputMultiplexer>,
    presenter: Option<Presenter>,
    recorder: Recorder,
    quick_save: Option<Vec<u8>>,

    pending_keys: VecDeque<Key>,
    listening: bool,
}

impl<C: EmulatorCore> Session<C> {
    pub fn new(core: C, title: impl Into<String>, hash: ContentHash, config: SessionConfig) -> Self {
        let store = SaveStore::new(config.save_dir());
        let output = OutputDir::new(config.output_dir());
        let encoder = Box::new(GifWriter::new(output.clone(), config.gif.clone()));

        Self {
            core,
            title: title.into(),
            hash,
            config,
            store,
            output,
            audio: None,
            encoder,

            input: None,
            presenter: None,
            recorder: Recorder::new(),
            quick_save: None,

            pending_keys: VecDeque::new(),
            listening: false,
        }
    }

    pub fn with_audio(mut self, audio: AudioOutput) -> Self {
        self.audio = Some(audio);
        self
    }

    pub fn with_encoder(mut self, encoder: Box<dyn AnimationEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn core(&self) -> &C {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut C {
        &mut self.core
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    pub fn store(&self) -> &SaveStore {
        &self.store
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn recorded_frames(&self) -> usize {
        self.recorder.len()
    }

    pub fn has_quick_save(&self) -> bool {
        self.quick_save.is_some()
    }

    pub fn enter(&mut self, host: &mut dyn Host) {
        log::info!("Entering session for '{}' ({})", self.title, self.hash);

        if self.config.audio {
            if let Some(audio) = &self.audio {
                self.core
                    .set_audio_sink(Some(audio.ring.clone()), audio.sample_rate);
            }
        }

        let state_path = self.store.state_path(&self.hash);
        match self.core.load_state(&state_path) {
            Ok(()) => log::info!("Restored state from {}", state_path.display()),
            Err(e) => {
                log::debug!("No saved state ({e:#}), resetting");
                self.core.reset();
            }
        }

        if self.core.cartridge().battery_present() {
            match self.store.read_sram(&self.hash) {
                Ok(sram) => {
                    log::info!("Restored {} bytes of save RAM", sram.len());
                    self.core.cartridge_mut().set_save_ram(sram);
                }
                Err(e) => log::debug!("No save RAM loaded: {e}"),
            }
        }

        let has_window = match host.window() {
            Some(window) => {
                window.set_title(&self.title);
                true
            }
            None => false,
        };
        if let Some(gfx) = host.graphics() {
            self.presenter = Some(Presenter::new(gfx, self.config.padding));
        }
        self.input = Some(InputMultiplexer::new(&self.config, has_window));
        self.listening = true;
    }

    /// Queues a key press for the next [`Self::update`]. Presses outside of
    /// an entered session are dropped.
    pub fn key_pressed(&mut self, key: Key) {
        if self.listening {
            self.pending_keys.push_back(key);
        }
    }

    /// Runs one host frame. An error is a core failure and ends the session.
    pub fn update(
        &mut self,
        t: f64,
        dt: f64,
        host: &mut dyn Host,
    ) -> Result<Transition, SessionError> {
        let dt = stepper::clamp_delta(dt);
        log::trace!("Frame at t={t:.3}, dt={dt:.4}");

        while let Some(key) = self.pending_keys.pop_front() {
            let Some(hotkey) = self.config.hotkeys.lookup(key) else {
                continue;
            };
            if let Err(e) = self.handle_hotkey(hotkey) {
                log::warn!("{hotkey:?} failed: {e}");
            }
        }

        let has_window = host.window().is_some();
        let input = self
            .input
            .get_or_insert_with(|| InputMultiplexer::new(&self.config, has_window));

        if let Some(window) = host.window() {
            if input.menu_requested(window) {
                log::info!("Menu requested");
                return Ok(Transition::ShowMenu);
            }
        }

        let window: Option<&dyn Window> = host.window().map(|w| w as &dyn Window);
        let pads = input.poll(window, self.core.frame_counter());
        let size = window.map(|w| w.framebuffer_size()).unwrap_or((0, 0));

        let frame = stepper::advance(&mut self.core, pads, dt)?;

        if let Some(gfx) = host.graphics() {
            let padding = self.config.padding;
            let presenter = self
                .presenter
                .get_or_insert_with(|| Presenter::new(gfx, padding));
            presenter.present(gfx, frame, size);
        }

        self.recorder.capture(frame);

        Ok(Transition::Continue)
    }

    pub fn handle_hotkey(&mut self, hotkey: Hotkey) -> Result<(), SessionError> {
        match hotkey {
            Hotkey::Screenshot => {
                let path = self.output.screenshot(self.core.frame_buffer())?;
                log::info!("Saved screenshot to {}", path.display());
            }
            Hotkey::Reset => {
                log::info!("Reset");
                self.core.reset();
            }
            Hotkey::ToggleRecording => self.toggle_recording()?,
            Hotkey::QuickSave => self.quick_save(),
            Hotkey::QuickLoad => self.quick_load()?,
            Hotkey::DumpMemory => {
                let path = self.output.dump_memory(self.core.ram())?;
                log::info!("Dumped working memory to {}", path.display());
            }
        }
        Ok(())
    }

    /// Starts a recording, or ends the current one and encodes it.
    pub fn toggle_recording(&mut self) -> Result<(), SessionError> {
        if !self.recorder.is_recording() {
            log::info!("Recording started");
            self.recorder.start();
            return Ok(());
        }

        let frames = self.recorder.stop();
        if frames.is_empty() {
            log::info!("Recording stopped before any frame was captured");
            return Ok(());
        }
        let n = frames.len();
        let path = self.encoder.encode(frames).map_err(SessionError::Encode)?;
        log::info!("Saved {n} frame recording to {}", path.display());
        Ok(())
    }

    /// Keeps a copy of working memory, replacing any earlier one.
    pub fn quick_save(&mut self) {
        self.quick_save = Some(self.core.ram().to_vec());
        log::debug!("Quick saved working memory");
    }

    /// Restores the quick save, if there is one.
    pub fn quick_load(&mut self) -> Result<(), SessionError> {
        let Some(saved) = &self.quick_save else {
            return Ok(());
        };

        let ram = self.core.ram_mut();
        if ram.len() != saved.len() {
            return Err(SessionError::QuickStateSize {
                saved: saved.len(),
                ram: ram.len(),
            });
        }
        ram.copy_from_slice(saved);
        log::debug!("Quick loaded working memory");
        Ok(())
    }

    /// Detaches the session and writes save RAM and state. Both writes are
    /// attempted regardless of the other's outcome; failures are returned.
    pub fn shutdown(&mut self) -> Vec<SessionError> {
        self.listening = false;
        self.pending_keys.clear();
        self.core.set_audio_sink(None, 0);

        let mut errors = Vec::new();

        let cart = self.core.cartridge();
        if cart.battery_present() {
            let path = self.store.sram_path(&self.hash);
            if let Err(source) = self.store.write_sram(&self.hash, cart.save_ram()) {
                errors.push(SessionError::SaveRam { path, source });
            }
        }

        match self.store.prepare_state_path(&self.hash) {
            Ok(path) => {
                if let Err(error) = self.core.save_state(&path) {
                    errors.push(SessionError::SaveState { path, error });
                }
            }
            Err(e) => errors.push(SessionError::io(self.store.state_path(&self.hash), e)),
        }

        for e in &errors {
            log::error!("{e}");
        }
        errors
    }

    /// Saves everything and terminates the process.
    pub fn exit(mut self) -> ! {
        if self.shutdown().is_empty() {
            log::info!("Saved session for '{}'", self.title);
        }
        std::process::exit(0)
    }
}
