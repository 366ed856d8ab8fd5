use relative_path::{RelativePath, RelativePathBuf};
use std::path::{Path, PathBuf};

/// Type-safe wrapper for file paths relative to the PAL base directory.
///
/// Uses `RelativePathBuf` to enforce that paths are always relative to the
/// PAL's base directory, preventing accidental use of absolute paths when
/// addressing route documents.
///
/// # Examples
///
/// ```
/// use mocksite_base::FilePath;
///
/// let path1 = FilePath::from("data/routes/en.yml");
/// let path2 = FilePath::from("data/routes").join("about/en.yml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilePath(RelativePathBuf);

impl FilePath {
    /// Returns the underlying RelativePath as a reference.
    pub fn as_relative(&self) -> &RelativePath {
        &self.0
    }

    /// Converts to a regular Path for use with std::fs operations.
    /// This returns the relative path portion without a base directory.
    pub fn as_path(&self) -> &Path {
        Path::new(self.0.as_str())
    }

    /// Consumes the FilePath and returns a PathBuf.
    pub fn into_path_buf(self) -> PathBuf {
        PathBuf::from(self.0.as_str())
    }

    /// Appends a path segment, normalizing separators.
    pub fn join(&self, segment: impl AsRef<RelativePath>) -> FilePath {
        FilePath(self.0.join(segment))
    }

    /// Returns the path relative to `base`, or None if `base` is not a prefix.
    pub fn strip_prefix(&self, base: impl AsRef<RelativePath>) -> Option<FilePath> {
        self.0
            .strip_prefix(base)
            .ok()
            .map(|rest| FilePath(rest.to_relative_path_buf()))
    }

    /// Returns the file name without its extension, if any.
    pub fn file_stem(&self) -> Option<&str> {
        self.0.file_stem()
    }

    /// Returns the parent path, if any.
    pub fn parent(&self) -> Option<FilePath> {
        self.0
            .parent()
            .map(|parent| FilePath(parent.to_relative_path_buf()))
    }
}

impl From<&str> for FilePath {
    fn from(s: &str) -> Self {
        Self(RelativePathBuf::from(s))
    }
}

impl From<String> for FilePath {
    fn from(s: String) -> Self {
        Self(RelativePathBuf::from(s))
    }
}

impl From<RelativePathBuf> for FilePath {
    fn from(p: RelativePathBuf) -> Self {
        Self(p)
    }
}

impl From<&RelativePath> for FilePath {
    fn from(p: &RelativePath) -> Self {
        Self(p.to_relative_path_buf())
    }
}

impl std::fmt::Display for FilePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<RelativePath> for FilePath {
    fn as_ref(&self) -> &RelativePath {
        &self.0
    }
}
