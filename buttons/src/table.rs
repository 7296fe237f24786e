use crate::{Button, HashState, TableError, BUTTON_COUNT};

/// The `x`/`y` pair a single button feeds into the two accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonConstants {
    pub x: u32,
    pub y: u32,
}

/// Per-button constants, indexed by [`Button::index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonTable {
    entries: [ButtonConstants; BUTTON_COUNT],
}

const THPS2_TABLE: [(u32, u32); BUTTON_COUNT] = [
    (0x03185332, 0x80FE4187), // SQUARE
    (0xB87610DB, 0xDE098401), // X
    (0xDEADBEEF, 0xFE3010F3), // CIRCLE
    (0x31415926, 0x7720DE42), // TRIANGLE
    (0x93FE1682, 0x92551072), // LEFT
    (0x776643D1, 0x0901D3E8), // DOWN
    (0xAB432901, 0x88D3A109), // RIGHT
    (0x01234567, 0x34859F3A), // UP
];

impl Default for ButtonTable {
    fn default() -> Self {
        ButtonTable {
            entries: THPS2_TABLE.map(|(x, y)| ButtonConstants { x, y }),
        }
    }
}

impl ButtonTable {
    /// Builds a table from `(x, y)` pairs in button order.
    pub fn from_pairs(pairs: &[(u32, u32)]) -> Result<Self, TableError> {
        let entries: [(u32, u32); BUTTON_COUNT] = pairs
            .try_into()
            .map_err(|_| TableError { found: pairs.len() })?;
        Ok(ButtonTable {
            entries: entries.map(|(x, y)| ButtonConstants { x, y }),
        })
    }

    pub fn get(&self, button: Button) -> ButtonConstants {
        self.entries[button.index()]
    }

    pub fn xs(&self) -> [u32; BUTTON_COUNT] {
        self.entries.map(|c| c.x)
    }

    pub fn ys(&self) -> [u32; BUTTON_COUNT] {
        self.entries.map(|c| c.y)
    }

    /// Runs `sequence` through the hash starting from zero.
    ///
    /// Returns `sequence.len() + 1` states; the first is always [`HashState::ZERO`].
    pub fn simulate(&self, sequence: &[Button]) -> Vec<HashState> {
        let mut trajectory = Vec::with_capacity(sequence.len() + 1);
        let mut state = HashState::ZERO;
        trajectory.push(state);
        for button in sequence {
            state = state.step(self.get(*button));
            trajectory.push(state);
        }
        trajectory
    }

    /// Final state after `sequence`, without keeping the trajectory.
    pub fn hash(&self, sequence: &[Button]) -> HashState {
        sequence
            .iter()
            .fold(HashState::ZERO, |state, b| state.step(self.get(*b)))
    }
}
