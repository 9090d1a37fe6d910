use crate::{
    controller::{Pad, PadInput},
    core::EmulatorCore,
    error::SessionError,
    frame::FrameBuffer,
};

/// Deltas above this are treated as a stall (debugger, suspended laptop) and
/// skipped instead of being caught up.
pub const MAX_DELTA: f64 = 1.;

pub fn clamp_delta(dt: f64) -> f64 {
    if dt > MAX_DELTA {
        0.
    } else {
        dt
    }
}

/// Feeds the controllers, runs the core for `dt` seconds and returns the
/// finished frame.
pub fn advance<C: EmulatorCore>(
    core: &mut C,
    input: PadInput,
    dt: f64,
) -> Result<&FrameBuffer, SessionError> {
    core.set_buttons(Pad::One, input.pad(Pad::One));
    core.set_buttons(Pad::Two, input.pad(Pad::Two));
    core.step_seconds(dt).map_err(SessionError::Core)?;
    Ok(core.frame_buffer())
}
