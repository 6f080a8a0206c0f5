use std::fmt;

use crate::domain::path_normalizer::normalize;

/// Base directory the AFS server stores every managed file under.
///
/// Empty when the server could not be asked for it, in which case
/// [`RootDirectory::relativize`] leaves paths untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootDirectory(String);

impl RootDirectory {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_unknown(&self) -> bool {
        self.0.is_empty()
    }

    pub fn relativize(&self, absolute_path: &str) -> String {
        normalize(&self.0, absolute_path)
    }
}

impl fmt::Display for RootDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_root_is_noop() {
        let root = RootDirectory::unknown();
        assert!(root.is_unknown());
        assert_eq!(root.relativize("/srv/afs/a.txt"), "/srv/afs/a.txt");
    }

    #[test]
    fn test_known_root_relativizes() {
        let root = RootDirectory::new("/srv/afs");
        assert!(!root.is_unknown());
        assert_eq!(root.relativize("/srv/afs/a.txt"), "/a.txt");
        assert_eq!(root.to_string(), "/srv/afs");
    }
}
