//! `Feedback` rendered with cliclack log lines and spinners

use crate::feedback::Feedback;
use std::cell::RefCell;

/// Charm-style console output
#[derive(Default)]
pub struct Console {
    spinner: RefCell<Option<cliclack::ProgressBar>>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop a spinner left running by a step that never finished
    fn take_spinner(&self) -> Option<cliclack::ProgressBar> {
        self.spinner.borrow_mut().take()
    }
}

impl Feedback for Console {
    fn info(&self, message: &str) {
        let _ = cliclack::log::info(message);
    }

    fn warn(&self, message: &str) {
        let _ = cliclack::log::warning(message);
    }

    fn success(&self, message: &str) {
        let _ = cliclack::log::success(message);
    }

    fn begin(&self, message: &str) {
        if let Some(previous) = self.take_spinner() {
            previous.stop("");
        }
        let spinner = cliclack::spinner();
        spinner.start(message);
        *self.spinner.borrow_mut() = Some(spinner);
    }

    fn finish(&self, message: &str) {
        match self.take_spinner() {
            Some(spinner) => spinner.stop(message),
            None => {
                let _ = cliclack::log::step(message);
            }
        }
    }

    fn fail(&self, message: &str) {
        match self.take_spinner() {
            Some(spinner) => spinner.error(message),
            None => {
                let _ = cliclack::log::error(message);
            }
        }
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        if let Some(spinner) = self.spinner.get_mut().take() {
            spinner.stop("");
        }
    }
}
