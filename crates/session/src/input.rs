//! Turns keyboards, joysticks or a random generator into controller state.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::{KeyBindings, SessionConfig},
    controller::{NesController, Pad, PadInput},
    host::{JoystickPort, JoystickState, Key, Window},
};

/// Length of one turbo cycle in emulated frames.
pub const TURBO_PERIOD: u64 = 6;
/// Frames of each cycle during which turbo buttons are held.
pub const TURBO_DUTY: u64 = 3;

/// Joystick buttons that must be held together to request the menu.
pub const JOYSTICK_RESET_CHORD: [usize; 2] = [4, 5];

const AXIS_THRESHOLD: f32 = 0.5;

/// Turbo square wave, locked to the core's frame counter so the fire rate
/// does not depend on how fast the host renders.
pub fn turbo(frame_counter: u64) -> bool {
    frame_counter % TURBO_PERIOD < TURBO_DUTY
}

pub trait InputSource {
    fn poll(&mut self, window: Option<&dyn Window>, turbo: bool) -> PadInput;
}

pub struct KeyboardSource {
    keys: KeyBindings,
}

impl KeyboardSource {
    pub fn new(keys: KeyBindings) -> Self {
        Self { keys }
    }
}

impl InputSource for KeyboardSource {
    fn poll(&mut self, window: Option<&dyn Window>, turbo: bool) -> PadInput {
        let mut input = PadInput::default();
        let Some(window) = window else {
            return input;
        };

        let k = &self.keys;
        let down = |key: Key| window.key_down(key);
        let pad = input.pad_mut(Pad::One);
        pad.set(NesController::A, down(k.a) || (turbo && down(k.turbo_a)));
        pad.set(NesController::B, down(k.b) || (turbo && down(k.turbo_b)));
        pad.set(NesController::SELECT, down(k.select));
        pad.set(NesController::START, down(k.start));
        pad.set(NesController::UP, down(k.up));
        pad.set(NesController::DOWN, down(k.down));
        pad.set(NesController::LEFT, down(k.left));
        pad.set(NesController::RIGHT, down(k.right));

        input
    }
}

pub struct JoystickSource {
    port: JoystickPort,
}

impl JoystickSource {
    pub fn new(port: JoystickPort) -> Self {
        Self { port }
    }

    fn pad(&self) -> Pad {
        match self.port {
            JoystickPort::One => Pad::One,
            JoystickPort::Two => Pad::Two,
        }
    }
}

pub fn joystick_buttons(js: &JoystickState, turbo: bool) -> NesController {
    let mut c = NesController::empty();
    c.set(NesController::A, js.button(0) || (turbo && js.button(2)));
    c.set(NesController::B, js.button(1) || (turbo && js.button(3)));
    c.set(NesController::SELECT, js.button(6));
    c.set(NesController::START, js.button(7));
    c.set(NesController::UP, js.axis(1) < -AXIS_THRESHOLD);
    c.set(NesController::DOWN, js.axis(1) > AXIS_THRESHOLD);
    c.set(NesController::LEFT, js.axis(0) < -AXIS_THRESHOLD);
    c.set(NesController::RIGHT, js.axis(0) > AXIS_THRESHOLD);
    c
}

impl InputSource for JoystickSource {
    fn poll(&mut self, window: Option<&dyn Window>, turbo: bool) -> PadInput {
        let mut input = PadInput::default();
        if let Some(js) = window.and_then(|w| w.joystick(self.port)) {
            *input.pad_mut(self.pad()) = joystick_buttons(&js, turbo);
        }
        input
    }
}

/// Presses every button of pad 1 with probability one half each frame.
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl InputSource for RandomSource {
    fn poll(&mut self, _window: Option<&dyn Window>, _turbo: bool) -> PadInput {
        let mut input = PadInput::default();
        *input.pad_mut(Pad::One) = NesController::from_bits_retain(self.rng.gen());
        input
    }
}

/// Rising-edge detector for the menu triggers.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResetEdge {
    held: bool,
}

impl ResetEdge {
    pub fn update(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.held;
        self.held = pressed;
        edge
    }
}

pub struct InputMultiplexer {
    sources: Vec<Box<dyn InputSource>>,
    reset_edges: [ResetEdge; 2],
    escape: ResetEdge,
}

impl InputMultiplexer {
    /// Picks the sources once. Without a window there is nothing to poll, so
    /// random input takes over, same as when it is configured.
    pub fn new(config: &SessionConfig, has_window: bool) -> Self {
        let sources: Vec<Box<dyn InputSource>> = if config.random_input || !has_window {
            log::info!("Using random input (seed {:?})", config.random_seed);
            vec![Box::new(RandomSource::new(config.random_seed))]
        } else {
            vec![
                Box::new(KeyboardSource::new(config.keys.clone())),
                Box::new(JoystickSource::new(JoystickPort::One)),
                Box::new(JoystickSource::new(JoystickPort::Two)),
            ]
        };

        Self::with_sources(sources)
    }

    pub fn with_sources(sources: Vec<Box<dyn InputSource>>) -> Self {
        Self {
            sources,
            reset_edges: Default::default(),
            escape: ResetEdge::default(),
        }
    }

    /// Controller state for the current frame. Never cached across frames.
    pub fn poll(&mut self, window: Option<&dyn Window>, frame_counter: u64) -> PadInput {
        let turbo = turbo(frame_counter);
        self.sources
            .iter_mut()
            .fold(PadInput::default(), |acc, source| {
                acc.combine(source.poll(window, turbo))
            })
    }

    /// Escape or the reset chord on either joystick, newly pressed this frame.
    pub fn menu_requested(&mut self, window: &dyn Window) -> bool {
        let mut requested = false;
        for (edge, port) in self
            .reset_edges
            .iter_mut()
            .zip([JoystickPort::One, JoystickPort::Two])
        {
            let pressed = window
                .joystick(port)
                .is_some_and(|js| JOYSTICK_RESET_CHORD.iter().all(|&b| js.button(b)));
            // Every edge detector must see every frame, so no short circuit
            requested |= edge.update(pressed);
        }

        requested |= self.escape.update(window.key_down(Key::Escape));
        requested
    }
}
