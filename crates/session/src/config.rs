use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::{error::SessionError, host::Key, session::Hotkey};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Replace keyboard and joysticks with random button presses.
    pub random_input: bool,
    /// Seed for the random input source, entropy when absent.
    pub random_seed: Option<u64>,
    /// Fraction of the window left empty around the picture.
    pub padding: f32,
    pub audio: bool,
    pub save_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub keys: KeyBindings,
    pub hotkeys: HotkeyBindings,
    pub gif: GifConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            random_input: false,
            random_seed: None,
            padding: 0.,
            audio: true,
            save_dir: None,
            output_dir: None,
            keys: KeyBindings::default(),
            hotkeys: HotkeyBindings::default(),
            gif: GifConfig::default(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "quaqqer", "Nemu")
}

impl SessionConfig {
    pub fn from_toml(src: &str) -> Result<Self, SessionError> {
        Ok(toml::from_str(src)?)
    }

    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let src = std::fs::read_to_string(path).map_err(|e| SessionError::io(path, e))?;
        Self::from_toml(&src)
    }

    /// Root of the per-program state and save RAM files.
    pub fn save_dir(&self) -> PathBuf {
        if let Some(dir) = &self.save_dir {
            return dir.clone();
        }

        match project_dirs() {
            Some(pd) => pd.data_dir().to_path_buf(),
            None => {
                log::warn!("No home directory found, keeping saves in the working directory");
                PathBuf::from(".")
            }
        }
    }

    /// Where screenshots, animations and memory dumps go.
    pub fn output_dir(&self) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }

        let mut dir = self.save_dir();
        dir.push("captures");
        dir
    }
}

/// Keyboard layout for pad 1.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub a: Key,
    pub b: Key,
    pub turbo_a: Key,
    pub turbo_b: Key,
    pub select: Key,
    pub start: Key,
    pub up: Key,
    pub down: Key,
    pub left: Key,
    pub right: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            a: Key::Z,
            b: Key::X,
            turbo_a: Key::A,
            turbo_b: Key::S,
            select: Key::RightShift,
            start: Key::Enter,
            up: Key::ArrowUp,
            down: Key::ArrowDown,
            left: Key::ArrowLeft,
            right: Key::ArrowRight,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HotkeyBindings {
    pub screenshot: Key,
    pub reset: Key,
    pub toggle_recording: Key,
    pub quick_save: Key,
    pub quick_load: Key,
    pub dump_memory: Key,
}

impl Default for HotkeyBindings {
    fn default() -> Self {
        Self {
            screenshot: Key::Space,
            reset: Key::R,
            toggle_recording: Key::Tab,
            quick_save: Key::Num1,
            quick_load: Key::Num2,
            dump_memory: Key::Num5,
        }
    }
}

impl HotkeyBindings {
    pub fn lookup(&self, key: Key) -> Option<Hotkey> {
        [
            (self.screenshot, Hotkey::Screenshot),
            (self.reset, Hotkey::Reset),
            (self.toggle_recording, Hotkey::ToggleRecording),
            (self.quick_save, Hotkey::QuickSave),
            (self.quick_load, Hotkey::QuickLoad),
            (self.dump_memory, Hotkey::DumpMemory),
        ]
        .into_iter()
        .find_map(|(k, hotkey)| (k == key).then_some(hotkey))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GifConfig {
    /// Keep every n:th recorded frame.
    pub frame_step: usize,
    pub frame_delay_ms: u32,
}

impl Default for GifConfig {
    fn default() -> Self {
        Self {
            frame_step: 3,
            frame_delay_ms: 50,
        }
    }
}
