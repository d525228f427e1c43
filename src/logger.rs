use crate::Chronometer;
use std::fmt::Display;

/// Line logger; every line carries the time elapsed since start-up.
#[derive(Clone, Copy, Default)]
pub struct Logger {
    chronometer: Chronometer,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            chronometer: Chronometer::new(),
        }
    }

    fn line(&self, value: impl Display) -> String {
        format!("{} ({} elapsed)", value, self.chronometer.elapsed())
    }

    pub fn log(&self, value: impl Display) {
        println!("{}", self.line(value));
    }

    pub fn error(&self, value: impl Display) {
        eprintln!("{}", self.line(format_args!("Error: {}", value)));
    }
}

#[cfg(test)]
mod tests {
    use super::Logger;

    #[test]
    fn line() {
        let line = Logger::new().line("POST /encode 200");
        assert!(line.starts_with("POST /encode 200 (00:"));
        assert!(line.ends_with(" elapsed)"));
    }
}
