//! Colored status lines for the command-line front end.

mod logging;

pub use logging::{Level, Logger};
