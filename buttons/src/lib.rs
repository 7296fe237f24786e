//! Concrete model of the THPS2 cheat-code hash.
//!
//! A cheat is a short sequence of controller buttons. Each button carries two
//! 32-bit constants which are folded into two accumulators, starting from zero.
//! This crate holds the button set, the constant table and the plain `u32`
//! implementation of the hash step, which is what solver results get checked
//! against.

mod button;
mod error;
mod format;
mod hash;
mod table;

pub use button::{Button, BUTTON_COUNT};
pub use error::{ParseError, TableError};
pub use format::{format_hex_list, format_letters, format_names, parse_hex_u32, parse_letters};
pub use hash::{HashState, HASH1_MULTIPLIER};
pub use table::{ButtonConstants, ButtonTable};
