//! Progress and status reporting
//!
//! Workflows report through the `Feedback` trait so they can run against
//! the cliclack console or be inspected in tests.

use std::cell::RefCell;

/// Receives status messages from a running workflow
pub trait Feedback {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn success(&self, message: &str);

    /// Start a long-running step (e.g. a spinner)
    fn begin(&self, message: &str);
    /// Finish the step started with `begin`
    fn finish(&self, message: &str);
    /// Abort the step started with `begin`
    fn fail(&self, message: &str);
}

/// Keeps every message, prefixed with its level
#[derive(Debug, Default)]
pub struct Recorded {
    messages: RefCell<Vec<String>>,
}

impl Recorded {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    /// Whether any message at `level` contains `needle`
    pub fn contains(&self, level: &str, needle: &str) -> bool {
        let prefix = format!("{}: ", level);
        self.messages
            .borrow()
            .iter()
            .any(|m| m.starts_with(&prefix) && m.contains(needle))
    }

    fn push(&self, level: &str, message: &str) {
        self.messages
            .borrow_mut()
            .push(format!("{}: {}", level, message));
    }
}

impl Feedback for Recorded {
    fn info(&self, message: &str) {
        self.push("info", message);
    }

    fn warn(&self, message: &str) {
        self.push("warn", message);
    }

    fn success(&self, message: &str) {
        self.push("success", message);
    }

    fn begin(&self, message: &str) {
        self.push("begin", message);
    }

    fn finish(&self, message: &str) {
        self.push("finish", message);
    }

    fn fail(&self, message: &str) {
        self.push("fail", message);
    }
}
