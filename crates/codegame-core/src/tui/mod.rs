//! CLI prompts and console feedback using cliclack (Charm-style inline prompts)
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod console;
#[cfg(feature = "tui")]
mod prompts;

#[cfg(feature = "tui")]
pub use console::Console;
#[cfg(feature = "tui")]
pub use prompts::{check_toolchain, confirm, input_or_prompt};
