//! `info`: describe the module to the `codegame` CLI

use anyhow::Result;
use codegame_core::{ModuleConfig, ModuleInfo};
use std::io::Write;

/// Write the module description as JSON
pub fn write_info<C: ModuleConfig>(config: &C, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer(&mut *out, &ModuleInfo::from_config(config))?;
    writeln!(out)?;
    Ok(())
}
