//! Library version resolution
//!
//! This module provides:
//! - Version specifiers (`latest` or `major.minor`)
//! - Resolution of a specifier against a library's published tags
//! - Compatibility checking against the versions the templates target

pub mod compat;
pub mod resolver;
pub mod specifier;

pub use compat::check_compatibility;
pub use resolver::{select, ResolvedLibrary, SelectionPolicy, VersionResolver};
pub use specifier::{LibraryVersion, PrefixMatch, VersionSpecifier, LATEST};
