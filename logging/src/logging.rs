use colored::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Info = 1,
    Completed = 2,
    Warning = 3,
}

/// Prints status lines to the terminal.
///
/// Info lines only show in debug mode; everything else always prints.
/// Warnings go to stderr.
#[derive(Clone, Copy)]
pub struct Logger {
    debug: bool,
}

impl Logger {
    pub fn new(debug: bool) -> Logger {
        Logger { debug }
    }

    /// Applies the prefix and color for `level`
    fn apply_level(&self, message: &str, level: Level) -> ColoredString {
        match level {
            Level::Info => format!("info: {message}").bright_cyan(),
            Level::Completed => format!("Completed: {message}").bright_green(),
            Level::Warning => format!("warning: {message}").bright_yellow(),
        }
    }

    pub fn log(&self, message: &str, level: Level) {
        match level {
            Level::Info if !self.debug => (),
            Level::Info | Level::Completed => println!("{}", self.apply_level(message, level)),
            Level::Warning => eprintln!("{}", self.apply_level(message, level)),
        }
    }

    pub fn info(&self, message: &str) {
        self.log(message, Level::Info);
    }

    pub fn completed(&self, message: &str) {
        self.log(message, Level::Completed);
    }

    pub fn warning(&self, message: &str) {
        self.log(message, Level::Warning);
    }
}
