use std::io::{Read, Seek};
use std::sync::Arc;

use crate::MocksiteResult;

use super::file_path::FilePath;
use super::http::{HttpServerConfig, HttpServerHandle, HttpService};

/// Trait combining Read + Seek for file handles.
///
/// Enables returning opaque file handles that work for both real files and
/// in-memory buffers.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// Platform abstraction layer (PAL) trait providing the operations the
/// layout service needs: route document reads, store discovery, and the
/// HTTP listener.
///
/// Two implementations are provided:
/// - `RealPal`: real filesystem via `std::fs`, real listener via tiny_http
/// - `MockPal`: in-memory files and simulated requests for testing
pub trait Pal: std::fmt::Debug + Send + Sync + 'static {
    /// Check if a file exists at the given path.
    fn file_exists(&self, path: &FilePath) -> MocksiteResult<bool>;

    /// Open a file for reading.
    fn read_file(&self, path: &FilePath) -> MocksiteResult<Box<dyn ReadSeek + 'static>>;

    /// Read entire file contents as a UTF-8 string.
    ///
    /// Convenience method with a default implementation: reads the file,
    /// validates UTF-8, and returns the string or an error.
    fn read_file_to_string(&self, path: &FilePath) -> MocksiteResult<String> {
        use std::io::Read;
        let mut reader = self.read_file(path)?;
        let mut contents = Vec::new();
        reader.read_to_end(&mut contents).map_err(|e| {
            Box::new(crate::MocksiteError::new(
                crate::error::ErrorKind::FileError {
                    path: path.as_path().to_path_buf(),
                    source: e,
                },
            ))
        })?;
        String::from_utf8(contents).map_err(|_e| crate::err!("File is not valid UTF-8: {}", path))
    }

    /// Walk a directory tree, yielding paths matching the given glob patterns.
    ///
    /// # Arguments
    /// * `path` - Directory to walk
    /// * `globs` - Glob patterns matched against paths relative to `path`
    ///   (e.g., `["**/*.yml"]`)
    ///
    /// Yielded paths include the `path` prefix.
    fn walk_directory(
        &self,
        path: &FilePath,
        globs: &[String],
    ) -> MocksiteResult<Box<dyn Iterator<Item = MocksiteResult<FilePath>> + '_>>;

    /// Start an HTTP server with the given service.
    ///
    /// Returns a handle to the running server. The server starts immediately
    /// and listens for connections; when the handle is dropped (or
    /// `shutdown()` is called), it stops accepting new connections.
    fn start_http_server(
        &self,
        service: Box<dyn HttpService>,
        config: HttpServerConfig,
    ) -> MocksiteResult<HttpServerHandle>;
}

/// Handle to a PAL implementation, enabling shared ownership.
///
/// Internally wraps `Arc<dyn Pal>` for cheap cloning and thread-safe sharing.
///
/// # Examples
///
/// ```no_run
/// use mocksite_base::{PalHandle, RealPal};
///
/// let pal = PalHandle::new(RealPal::new(".".into()));
/// let pal_clone = pal.clone(); // Cheap clone, shares the same implementation
/// ```
#[derive(Debug, Clone)]
pub struct PalHandle(Arc<dyn Pal>);

impl PalHandle {
    /// Create a new PalHandle from a Pal implementation.
    pub fn new(pal: impl Pal + 'static) -> Self {
        Self(Arc::new(pal))
    }
}

impl std::ops::Deref for PalHandle {
    type Target = dyn Pal;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pal::mock::MockPal;

    #[test]
    fn test_pal_handle_clone() {
        let pal = PalHandle::new(MockPal::new());
        let _pal_clone = pal.clone();
        // Should not panic, clone works
    }

    #[test]
    fn test_pal_handle_deref() {
        let mock = MockPal::new();
        mock.add_file(FilePath::from("en.yml"), b"name: Home".to_vec());
        let pal = PalHandle::new(mock);
        assert!(pal.file_exists(&FilePath::from("en.yml")).unwrap());
    }
}
