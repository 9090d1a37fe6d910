use bitflags::bitflags;

/// Button state of one controller pad for a single frame.
///
/// Bit order is the core's contract: A is bit 0, Right is bit 7.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NesController(u8);

bitflags! {
    impl NesController: u8 {
        const A = 0x1;
        const B = 0x2;
        const SELECT = 0x4;
        const START = 0x8;
        const UP = 0x10;
        const DOWN = 0x20;
        const LEFT = 0x40;
        const RIGHT = 0x80;
    }
}

/// Controller port on the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pad {
    One,
    Two,
}

impl Pad {
    pub fn index(self) -> usize {
        match self {
            Pad::One => 0,
            Pad::Two => 1,
        }
    }
}

/// Both pads for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PadInput {
    pub pads: [NesController; 2],
}

impl PadInput {
    pub fn pad(&self, pad: Pad) -> NesController {
        self.pads[pad.index()]
    }

    pub fn pad_mut(&mut self, pad: Pad) -> &mut NesController {
        &mut self.pads[pad.index()]
    }

    /// Bitwise OR per pad, so either source alone presses a button.
    pub fn combine(self, other: PadInput) -> PadInput {
        PadInput {
            pads: [
                self.pads[0] | other.pads[0],
                self.pads[1] | other.pads[1],
            ],
        }
    }
}

impl std::fmt::Display for NesController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use std::fmt::Write;

        // Lowercase when released, uppercase when held
        const CHARS: [char; 8] = ['a', 'b', 's', 't', 'u', 'd', 'l', 'r'];
        for (bit_i, c) in CHARS.into_iter().enumerate() {
            let held = self.bits() & (1 << bit_i) != 0;
            f.write_char(if held { c.to_ascii_uppercase() } else { c })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_is_bitwise_or() {
        for a in 0..=u8::MAX {
            for b in [0x00, 0x01, 0x5a, 0x80, 0xff] {
                let mut left = PadInput::default();
                let mut right = PadInput::default();
                *left.pad_mut(Pad::One) = NesController::from_bits_retain(a);
                *right.pad_mut(Pad::One) = NesController::from_bits_retain(b);

                let combined = left.combine(right);
                assert_eq!(combined.pad(Pad::One).bits(), a | b);
                assert_eq!(combined.pad(Pad::Two), NesController::empty());
            }
        }
    }

    #[test]
    fn display_marks_held_buttons() {
        let c = NesController::A | NesController::START | NesController::RIGHT;
        assert_eq!(c.to_string(), "absTudlR");
    }
}
