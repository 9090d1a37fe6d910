//! Capabilities the session needs from the windowing toolkit and graphics
//! backend. A host that runs without a display hands out neither.

use serde::Deserialize;

use crate::{frame::FrameBuffer, present::Quad};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum Key {
    A,
    S,
    R,
    X,
    Z,
    Tab,
    Space,
    Enter,
    Escape,
    RightShift,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoystickPort {
    One,
    Two,
}

/// Raw joystick snapshot. Buttons and axes are in the device's own order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JoystickState {
    pub buttons: Vec<bool>,
    pub axes: Vec<f32>,
}

impl JoystickState {
    pub fn button(&self, i: usize) -> bool {
        self.buttons.get(i).copied().unwrap_or(false)
    }

    pub fn axis(&self, i: usize) -> f32 {
        self.axes.get(i).copied().unwrap_or(0.)
    }
}

pub trait Window {
    /// Drawable size in physical pixels.
    fn framebuffer_size(&self) -> (u32, u32);
    fn key_down(&self, key: Key) -> bool;
    /// `None` when nothing is plugged into the port.
    fn joystick(&self, port: JoystickPort) -> Option<JoystickState>;
    fn set_title(&mut self, title: &str);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

pub trait Graphics {
    fn create_texture(&mut self) -> TextureId;
    /// Bind a texture for the following upload and draw calls, `None` unbinds.
    fn bind_texture(&mut self, texture: Option<TextureId>);
    fn upload_pixels(&mut self, frame: &FrameBuffer);
    fn draw_quad(&mut self, quad: &Quad);
    fn clear(&mut self, rgba: [f32; 4]);
}

pub trait Host {
    fn window(&mut self) -> Option<&mut dyn Window>;
    fn graphics(&mut self) -> Option<&mut dyn Graphics>;
}

/// Host without a display, used for soak runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl Host for Headless {
    fn window(&mut self) -> Option<&mut dyn Window> {
        None
    }

    fn graphics(&mut self) -> Option<&mut dyn Graphics> {
        None
    }
}
