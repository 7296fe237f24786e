use std::fmt;

use crate::table::ButtonConstants;

/// Constant the first accumulator is multiplied by after every press.
pub const HASH1_MULTIPLIER: u32 = 0x209;

/// The two hash accumulators after some prefix of button presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HashState {
    pub hash1: u32,
    pub hash2: u32,
}

impl HashState {
    pub const ZERO: HashState = HashState { hash1: 0, hash2: 0 };

    pub fn new(hash1: u32, hash2: u32) -> Self {
        HashState { hash1, hash2 }
    }

    /// Feeds one button press into the accumulators.
    ///
    /// All arithmetic wraps at 32 bits and `>>` is a logical shift. The second
    /// accumulator reads the *updated* first one.
    pub fn step(self, constants: ButtonConstants) -> HashState {
        let t1 = self.hash1 ^ constants.x;
        let t2 = (t1 << 1) ^ (t1 >> 31);
        let hash1 = t2.wrapping_mul(HASH1_MULTIPLIER);

        let mixed = self.hash2 ^ constants.y;
        let t3 = mixed ^ (hash1 >> 8);
        let hash2 = (t3 << 1) ^ (mixed >> 31);

        HashState { hash1, hash2 }
    }
}

impl fmt::Display for HashState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(0x{:08x}, 0x{:08x})", self.hash1, self.hash2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Button, ButtonTable};

    #[test]
    fn single_square_from_zero() {
        let table = ButtonTable::default();
        let next = HashState::ZERO.step(table.get(Button::Square));
        assert_eq!(next, HashState::new(0x9902a184, 0x00ce864d));
    }

    #[test]
    fn multiply_wraps_at_32_bits() {
        // t1 = 0xffffffff rotates to itself, and 0xffffffff * 0x209 overflows
        let constants = ButtonConstants { x: 0xffff_ffff, y: 0 };
        let next = HashState::ZERO.step(constants);
        assert_eq!(next.hash1, 0xffff_fdf7);
        assert_eq!(u64::from(next.hash1), (0xffff_ffffu64 * 0x209) & 0xffff_ffff);
    }

    #[test]
    fn top_bit_wraps_into_bit_zero() {
        // t1 = 0x80000000: shifting left drops the bit, the logical right
        // shift by 31 brings it back in at the bottom.
        let constants = ButtonConstants { x: 0x8000_0000, y: 0 };
        let next = HashState::ZERO.step(constants);
        assert_eq!(next.hash1, HASH1_MULTIPLIER);
    }

    #[test]
    fn step_is_deterministic() {
        let table = ButtonTable::default();
        let state = HashState::new(0xdead_beef, 0x1234_5678);
        for button in Button::ALL {
            let a = state.step(table.get(button));
            let b = state.step(table.get(button));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(HashState::new(0x1eca8e89, 0xad2dc1d6).to_string(), "(0x1eca8e89, 0xad2dc1d6)");
    }
}
