//! Game server access and CGE parsing

pub mod api;
pub mod cge;

pub use api::{trim_url, GameServer};
pub use cge::{parse_cge, CgeDefinitions};
