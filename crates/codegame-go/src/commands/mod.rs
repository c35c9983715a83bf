//! Workflows behind each subcommand

pub mod build;
pub mod info;
pub mod new_client;
pub mod new_server;
pub mod run;
pub mod update;
