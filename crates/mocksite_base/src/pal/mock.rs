use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Mutex};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::MocksiteError;
use crate::MocksiteResult;
use crate::error::ErrorKind;

use super::FilePath;
use super::http::{HttpRequest, HttpResponse, HttpServerConfig, HttpServerHandle, HttpService};
use super::traits::{Pal, ReadSeek};

/// In-memory PAL implementation for testing.
///
/// Stores file contents in a HashMap and supports all Pal operations
/// without touching the real filesystem, including registering HTTP
/// services and driving them with `simulate_request`.
///
/// # Examples
///
/// ```
/// use mocksite_base::{FilePath, MockPal, Pal};
///
/// let mock = MockPal::new();
/// mock.add_file(FilePath::from("data/routes/en.yml"), b"name: Home".to_vec());
/// let content = mock
///     .read_file_to_string(&FilePath::from("data/routes/en.yml"))
///     .unwrap();
/// assert_eq!(content, "name: Home");
/// ```
#[derive(Debug, Clone)]
pub struct MockPal {
    files: Arc<Mutex<HashMap<FilePath, Vec<u8>>>>,
    http_servers: Arc<Mutex<HashMap<u16, HttpServerInfo>>>,
    next_port: Arc<AtomicU16>,
}

/// Information about a registered HTTP server.
#[derive(Debug)]
struct HttpServerInfo {
    service: Box<dyn HttpService>,
    _config: HttpServerConfig,
}

impl MockPal {
    /// Create a new empty MockPal.
    pub fn new() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
            http_servers: Arc::new(Mutex::new(HashMap::new())),
            next_port: Arc::new(AtomicU16::new(10000)),
        }
    }

    /// Add a file to the mock storage.
    pub fn add_file(&self, path: FilePath, content: Vec<u8>) {
        self.files.lock().unwrap().insert(path, content);
    }

    /// Simulate an HTTP request to a running server.
    ///
    /// Looks up the service registered for the given port and invokes it,
    /// without any real network traffic.
    pub fn simulate_request(
        &self,
        port: u16,
        request: HttpRequest,
    ) -> MocksiteResult<HttpResponse> {
        let servers = self.http_servers.lock().unwrap();
        let server_info = servers.get(&port).ok_or_else(|| {
            Box::new(MocksiteError::message(format!(
                "No HTTP server registered on port {}",
                port
            )))
        })?;

        server_info.service.handle_request(request)
    }

    /// Get the number of registered HTTP servers.
    pub fn http_server_count(&self) -> usize {
        self.http_servers.lock().unwrap().len()
    }

    fn build_glob_set(globs: &[String]) -> MocksiteResult<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for glob in globs {
            let compiled = GlobBuilder::new(glob).build().map_err(|e| {
                Box::new(MocksiteError::message(format!(
                    "Invalid glob pattern '{}': {}",
                    glob, e
                )))
            })?;
            builder.add(compiled);
        }
        builder.build().map_err(|e| {
            Box::new(MocksiteError::message(format!(
                "Failed to build glob set: {}",
                e
            )))
        })
    }

    /// Get all files under `directory` whose directory-relative paths match
    /// the glob patterns. Returned paths include the directory prefix,
    /// matching RealPal's walk semantics.
    fn get_matching_files(
        &self,
        directory: &FilePath,
        globs: &[String],
    ) -> MocksiteResult<Vec<FilePath>> {
        let glob_set = Self::build_glob_set(globs)?;

        let files = self.files.lock().unwrap();
        Ok(files
            .keys()
            .filter(|path| {
                path.strip_prefix(directory)
                    .is_some_and(|relative| glob_set.is_match(relative.as_path()))
            })
            .cloned()
            .collect())
    }
}

impl Default for MockPal {
    fn default() -> Self {
        Self::new()
    }
}

impl Pal for MockPal {
    fn file_exists(&self, path: &FilePath) -> MocksiteResult<bool> {
        let files = self.files.lock().unwrap();
        Ok(files.contains_key(path))
    }

    fn read_file(&self, path: &FilePath) -> MocksiteResult<Box<dyn ReadSeek + 'static>> {
        let files = self.files.lock().unwrap();
        let content = files
            .get(path)
            .ok_or_else(|| {
                Box::new(MocksiteError::new(ErrorKind::FileError {
                    path: path.as_path().to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("File not found: {}", path),
                    ),
                }))
            })?
            .clone();
        Ok(Box::new(Cursor::new(content)))
    }

    fn walk_directory(
        &self,
        path: &FilePath,
        globs: &[String],
    ) -> MocksiteResult<Box<dyn Iterator<Item = MocksiteResult<FilePath>> + '_>> {
        let matching_files = self.get_matching_files(path, globs)?;
        let iter = matching_files.into_iter().map(Ok);
        Ok(Box::new(iter))
    }

    fn start_http_server(
        &self,
        service: Box<dyn HttpService>,
        config: HttpServerConfig,
    ) -> MocksiteResult<HttpServerHandle> {
        // Use the configured port if provided, otherwise auto-assign
        let port = match config.port {
            Some(p) => p,
            None => self.next_port.fetch_add(1, Ordering::SeqCst),
        };

        let server_info = HttpServerInfo {
            service,
            _config: config,
        };
        {
            let mut servers = self.http_servers.lock().unwrap();
            servers.insert(port, server_info);
        }

        Ok(HttpServerHandle::new(port))
    }
}
