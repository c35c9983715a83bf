//! Command execution and toolchain management
//!
//! This module provides:
//! - The `CommandRunner` seam for running external commands
//! - Toolchain detection for the language a module targets

pub mod command;
pub mod tool;

pub use command::{CommandRunner, CommandSpec, OutputMode, RecordingRunner, SystemRunner};
pub use tool::{ToolConfig, ToolManager};
