//! Compatibility between a resolved library and the module's templates

use super::specifier::LibraryVersion;
use semver::Version;

/// Compare the resolved library version against the one the templates target.
/// Returns a warning message if the library is newer than the templates expect.
pub fn check_compatibility(
    library: &str,
    resolved: LibraryVersion,
    supported: LibraryVersion,
    upgrade_command: &str,
) -> Option<String> {
    let resolved_ver: Version = resolved.to_semver();
    let supported_ver: Version = supported.to_semver();

    if resolved_ver > supported_ver {
        Some(format!(
            "The generated code was written for {} {}, but {} was selected.\n\
             You may have to adjust it by hand, or update this module: {}",
            library, supported, resolved, upgrade_command
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPGRADE: &str = "cargo install codegame-go --force";

    #[test]
    fn test_library_newer_than_templates() {
        let warning = check_compatibility(
            "go-client",
            LibraryVersion::new(0, 10),
            LibraryVersion::new(0, 9),
            UPGRADE,
        );
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("go-client 0.9"));
    }

    #[test]
    fn test_library_same_as_templates() {
        let warning = check_compatibility(
            "go-client",
            LibraryVersion::new(0, 9),
            LibraryVersion::new(0, 9),
            UPGRADE,
        );
        assert!(warning.is_none());
    }

    #[test]
    fn test_library_older_than_templates() {
        let warning = check_compatibility(
            "go-server",
            LibraryVersion::new(0, 7),
            LibraryVersion::new(0, 9),
            UPGRADE,
        );
        assert!(warning.is_none());
    }

    #[test]
    fn test_major_bump_is_newer() {
        let warning = check_compatibility(
            "go-server",
            LibraryVersion::new(1, 0),
            LibraryVersion::new(0, 12),
            UPGRADE,
        );
        assert!(warning.is_some());
    }
}
