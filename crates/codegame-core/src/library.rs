//! Support libraries a generated project depends on

use std::fmt;

/// A library published on GitHub whose tags drive version resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Library {
    /// Short name shown to the user (e.g. "go-client")
    pub name: &'static str,
    /// GitHub owner of the repository
    pub owner: &'static str,
    /// GitHub repository name
    pub repository: &'static str,
    /// Import path of the package for major versions 0 and 1
    pub import_root: &'static str,
}

impl Library {
    /// Import path for the given major version.
    ///
    /// Majors 0 and 1 share the unversioned path. Later majors get `/v<major>`
    /// in front of the final path segment, so `example.com/lib/cg` becomes
    /// `example.com/lib/v2/cg`.
    pub fn import_path(&self, major: u64) -> String {
        if major <= 1 {
            return self.import_root.to_string();
        }

        match self.import_root.rsplit_once('/') {
            Some((base, last)) => format!("{}/v{}/{}", base, major, last),
            None => format!("{}/v{}", self.import_root, major),
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIB: Library = Library {
        name: "go-client",
        owner: "code-game-project",
        repository: "go-client",
        import_root: "github.com/code-game-project/go-client/cg",
    };

    #[test]
    fn test_major_zero_and_one_unversioned() {
        assert_eq!(LIB.import_path(0), "github.com/code-game-project/go-client/cg");
        assert_eq!(LIB.import_path(1), "github.com/code-game-project/go-client/cg");
    }

    #[test]
    fn test_major_two_inserts_suffix_before_last_segment() {
        assert_eq!(
            LIB.import_path(2),
            "github.com/code-game-project/go-client/v2/cg"
        );
        assert_eq!(
            LIB.import_path(11),
            "github.com/code-game-project/go-client/v11/cg"
        );
    }

    #[test]
    fn test_single_segment_root() {
        let lib = Library {
            import_root: "cg",
            ..LIB
        };
        assert_eq!(lib.import_path(3), "cg/v3");
    }
}
