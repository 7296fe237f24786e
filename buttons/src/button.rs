use std::fmt;

/// Number of buttons a cheat can be built from.
pub const BUTTON_COUNT: usize = 8;

/// A controller button.
///
/// The discriminant is the button's index into a [`ButtonTable`](crate::ButtonTable)
/// and into the symbolic `[0, 7]` range used by the solver, so the order of the
/// variants must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Button {
    Square = 0,
    X = 1,
    Circle = 2,
    Triangle = 3,
    Left = 4,
    Down = 5,
    Right = 6,
    Up = 7,
}

impl Button {
    pub const ALL: [Button; BUTTON_COUNT] = [
        Button::Square,
        Button::X,
        Button::Circle,
        Button::Triangle,
        Button::Left,
        Button::Down,
        Button::Right,
        Button::Up,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Button> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Button::Square => "SQUARE",
            Button::X => "X",
            Button::Circle => "CIRCLE",
            Button::Triangle => "TRIANGLE",
            Button::Left => "LEFT",
            Button::Down => "DOWN",
            Button::Right => "RIGHT",
            Button::Up => "UP",
        }
    }

    /// Single-letter code, as cheat lists usually write them (`TUXSUXCUX`).
    pub fn letter(self) -> char {
        match self {
            Button::Square => 'S',
            Button::X => 'X',
            Button::Circle => 'C',
            Button::Triangle => 'T',
            Button::Left => 'L',
            Button::Down => 'D',
            Button::Right => 'R',
            Button::Up => 'U',
        }
    }

    pub fn from_letter(letter: char) -> Option<Button> {
        let letter = letter.to_ascii_uppercase();
        Self::ALL.into_iter().find(|b| b.letter() == letter)
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_table_order() {
        for (i, button) in Button::ALL.iter().enumerate() {
            assert_eq!(button.index(), i);
            assert_eq!(Button::from_index(i), Some(*button));
        }
        assert_eq!(Button::from_index(BUTTON_COUNT), None);
    }

    #[test]
    fn letters_round_trip() {
        for button in Button::ALL {
            assert_eq!(Button::from_letter(button.letter()), Some(button));
        }
        assert_eq!(Button::from_letter('t'), Some(Button::Triangle));
        assert_eq!(Button::from_letter('Q'), None);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Button::Triangle.to_string(), "TRIANGLE");
        assert_eq!(Button::X.to_string(), "X");
    }
}
