//! Project descriptor and naming helpers

pub mod casing;
pub mod cgfile;

pub use casing::{package_name, pascal_case};
pub use cgfile::{find_project_root, CodeGameFile, ProjectType, CODEGAME_FILE};
