use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use crate::{MocksiteError, MocksiteResult, error::ErrorKind};

use super::FilePath;
use super::http::{
    HttpBody, HttpMethod, HttpRequest, HttpResponse, HttpServerConfig, HttpServerHandle,
    HttpService,
};
use super::traits::{Pal, ReadSeek};

/// Concrete PAL implementation using the real filesystem and a real
/// tiny_http listener.
///
/// All file paths are resolved relative to a configured base directory,
/// ensuring operations stay within intended boundaries.
#[derive(Debug)]
pub struct RealPal {
    base_dir: PathBuf,
}

impl RealPal {
    /// Create a new RealPal with the given base directory.
    ///
    /// # Arguments
    /// * `base_dir` - All paths will be resolved relative to this directory
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Resolve a FilePath to an absolute filesystem path.
    fn resolve_path(&self, path: &FilePath) -> PathBuf {
        self.base_dir.join(path.as_path())
    }

    /// Build a GlobSet from the given glob patterns.
    #[instrument(skip(self))]
    fn build_glob_set(&self, globs: &[String]) -> MocksiteResult<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for (idx, glob) in globs.iter().enumerate() {
            let compiled = GlobBuilder::new(glob).build().map_err(|e| {
                debug!(index = idx, pattern = %glob, error = %e, "failed to compile glob pattern");
                Box::new(MocksiteError::message(format!(
                    "Invalid glob pattern '{}': {}",
                    glob, e
                )))
            })?;
            builder.add(compiled);
        }
        builder.build().map_err(|e| {
            debug!(error = %e, "failed to build glob set");
            Box::new(MocksiteError::message(format!(
                "Failed to build glob set: {}",
                e
            )))
        })
    }
}

impl Pal for RealPal {
    #[instrument(skip(self), fields(path = %path))]
    fn file_exists(&self, path: &FilePath) -> MocksiteResult<bool> {
        let resolved = self.resolve_path(path);
        let exists = resolved.is_file();
        debug!(exists, resolved = %resolved.display(), "checked file existence");
        Ok(exists)
    }

    #[instrument(skip(self), fields(path = %path))]
    fn read_file(&self, path: &FilePath) -> MocksiteResult<Box<dyn ReadSeek + 'static>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "opening file for reading");
        let file = fs::File::open(&resolved).map_err(|e| {
            debug!(error = %e, "failed to open file");
            Box::new(MocksiteError::new(ErrorKind::FileError {
                path: resolved,
                source: e,
            }))
        })?;
        Ok(Box::new(file))
    }

    #[instrument(skip(self), fields(path = %path, globs = ?globs))]
    fn walk_directory(
        &self,
        path: &FilePath,
        globs: &[String],
    ) -> MocksiteResult<Box<dyn Iterator<Item = MocksiteResult<FilePath>> + '_>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "starting directory walk");

        if !resolved.exists() {
            debug!("directory not found");
            return Err(Box::new(MocksiteError::new(ErrorKind::FileError {
                path: resolved,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "directory not found"),
            })));
        }

        let glob_set = self.build_glob_set(globs)?;

        // Iterator that yields base-prefixed paths for entries whose
        // directory-relative path matches the glob set
        let base_path = path.clone();
        let iter = WalkDir::new(&resolved)
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(e) => {
                    if !e.file_type().is_file() {
                        return None;
                    }
                    if let Ok(relative) = e.path().strip_prefix(&resolved) {
                        if glob_set.is_match(relative) {
                            let full_relative = base_path.as_path().join(relative);
                            Some(Ok(FilePath::from(full_relative.to_string_lossy().as_ref())))
                        } else {
                            None
                        }
                    } else {
                        None
                    }
                }
                Err(e) => {
                    debug!(error = %e, "error walking directory");
                    Some(Err(Box::new(MocksiteError::new(ErrorKind::FileError {
                        path: e
                            .path()
                            .map(|p| p.to_path_buf())
                            .unwrap_or_else(|| PathBuf::from("unknown")),
                        source: std::io::Error::other(e.to_string()),
                    }))))
                }
            });

        Ok(Box::new(iter))
    }

    #[instrument(skip(self, service), fields(address = %config.address()))]
    fn start_http_server(
        &self,
        service: Box<dyn HttpService>,
        config: HttpServerConfig,
    ) -> MocksiteResult<HttpServerHandle> {
        let address = config.address();
        let server = tiny_http::Server::http(&address)
            .map_err(|e| crate::err!("Failed to bind HTTP server to {}: {}", address, e))?;

        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .or(config.port)
            .unwrap_or(0);
        let handle = HttpServerHandle::new(port);
        let shutdown = Arc::clone(handle.shutdown_flag());
        let server_name = config.server_name.clone();

        debug!(port, "HTTP server listening");

        std::thread::spawn(move || {
            // Poll with a timeout so the shutdown flag is observed even when
            // no requests arrive
            loop {
                if shutdown.load(Ordering::SeqCst) {
                    debug!("HTTP server shutting down");
                    break;
                }
                match server.recv_timeout(Duration::from_millis(100)) {
                    Ok(Some(request)) => {
                        handle_connection(service.as_ref(), &server_name, request);
                    }
                    Ok(None) => continue,
                    Err(e) => {
                        warn!(error = %e, "error receiving HTTP request");
                    }
                }
            }
        });

        Ok(handle)
    }
}

/// Convert one tiny_http request, dispatch it to the service, and send the
/// response back on the connection.
fn handle_connection(service: &dyn HttpService, server_name: &str, mut request: tiny_http::Request) {
    let method_str = request.method().to_string();
    let url = request.url().to_string();

    let Some(method) = HttpMethod::parse(&method_str) else {
        warn!(method = %method_str, "unsupported HTTP method");
        respond(
            request,
            HttpResponse::new(super::http::HttpStatusCode::MethodNotAllowed),
            server_name,
        );
        return;
    };

    let mut http_request = HttpRequest::new(method, url);
    for header in request.headers() {
        http_request =
            http_request.with_header(header.field.to_string(), header.value.to_string());
    }

    let mut body = Vec::new();
    if let Err(e) = std::io::Read::read_to_end(request.as_reader(), &mut body) {
        warn!(error = %e, "failed to read request body");
        respond(request, HttpResponse::bad_request(), server_name);
        return;
    }
    if !body.is_empty() {
        http_request = http_request.with_body(HttpBody::from_bytes(body));
    }

    let response = match service.handle_request(http_request) {
        Ok(response) => response,
        Err(e) => {
            // Service errors become HTTP 599 so they are distinguishable
            // from ordinary error responses
            warn!(error = %e, "service returned an error");
            HttpResponse::new(super::http::HttpStatusCode::ServiceError)
                .with_content_type("text/plain")
                .with_body(e.to_string())
        }
    };

    respond(request, response, server_name);
}

fn respond(request: tiny_http::Request, response: HttpResponse, server_name: &str) {
    let status = response.status().as_u16();
    let headers = response.headers().clone();
    let body = response.into_body().into_bytes();

    let mut tiny_response = tiny_http::Response::from_data(body).with_status_code(status);
    for (key, value) in headers.all() {
        match tiny_http::Header::from_bytes(key.as_bytes(), value.as_bytes()) {
            Ok(header) => tiny_response = tiny_response.with_header(header),
            Err(()) => warn!(header = %key, "skipping invalid response header"),
        }
    }
    if let Ok(header) = tiny_http::Header::from_bytes(&b"Server"[..], server_name.as_bytes()) {
        tiny_response = tiny_response.with_header(header);
    }

    if let Err(e) = request.respond(tiny_response) {
        warn!(error = %e, "failed to send HTTP response");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, RealPal) {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let pal = RealPal::new(temp_dir.path().to_path_buf());
        (temp_dir, pal)
    }

    #[test]
    fn test_file_exists_true() {
        let (temp_dir, pal) = setup_test_dir();
        fs::write(temp_dir.path().join("en.yml"), "name: Home").unwrap();

        assert!(pal.file_exists(&FilePath::from("en.yml")).unwrap());
    }

    #[test]
    fn test_file_exists_false() {
        let (_temp_dir, pal) = setup_test_dir();

        assert!(!pal.file_exists(&FilePath::from("missing.yml")).unwrap());
    }

    #[test]
    fn test_file_exists_false_for_directory() {
        let (temp_dir, pal) = setup_test_dir();
        fs::create_dir(temp_dir.path().join("routes")).unwrap();

        assert!(!pal.file_exists(&FilePath::from("routes")).unwrap());
    }

    #[test]
    fn test_read_file() {
        let (temp_dir, pal) = setup_test_dir();
        let content = "name: About Us\nfields:\n  pageTitle: About\n";
        fs::write(temp_dir.path().join("en.yml"), content).unwrap();

        let result = pal.read_file_to_string(&FilePath::from("en.yml")).unwrap();
        assert_eq!(result, content);
    }

    #[test]
    fn test_read_file_not_found() {
        let (_temp_dir, pal) = setup_test_dir();

        let result = pal.read_file(&FilePath::from("missing.yml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_walk_directory_with_glob() {
        let (temp_dir, pal) = setup_test_dir();

        fs::create_dir_all(temp_dir.path().join("routes/about")).unwrap();
        fs::write(temp_dir.path().join("routes/en.yml"), "").unwrap();
        fs::write(temp_dir.path().join("routes/about/en.yml"), "").unwrap();
        fs::write(temp_dir.path().join("routes/about/notes.txt"), "").unwrap();

        let globs = vec!["**/*.yml".to_string()];
        let results: Vec<_> = pal
            .walk_directory(&FilePath::from("routes"), &globs)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.contains(&FilePath::from("routes/en.yml")));
        assert!(results.contains(&FilePath::from("routes/about/en.yml")));
    }

    #[test]
    fn test_walk_directory_not_found() {
        let (_temp_dir, pal) = setup_test_dir();
        let globs = vec!["**/*.yml".to_string()];

        let result = pal.walk_directory(&FilePath::from("nonexistent"), &globs);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_glob_pattern() {
        let (temp_dir, pal) = setup_test_dir();
        fs::create_dir(temp_dir.path().join("routes")).unwrap();
        let invalid_glob = vec!["[invalid".to_string()];

        let result = pal.walk_directory(&FilePath::from("routes"), &invalid_glob);
        assert!(result.is_err());
    }

    #[derive(Debug)]
    struct PingService;

    impl HttpService for PingService {
        fn handle_request(&self, request: HttpRequest) -> MocksiteResult<HttpResponse> {
            if request.path() == "/ping" {
                Ok(HttpResponse::json(r#"{"status":"ok"}"#))
            } else {
                Ok(HttpResponse::not_found())
            }
        }
    }

    #[test]
    fn test_start_http_server_and_request() {
        use std::io::{Read, Write};

        let (_temp_dir, pal) = setup_test_dir();
        // Port 0 lets the OS pick a free port
        let config = HttpServerConfig::new("127.0.0.1").with_port(0);
        let handle = pal
            .start_http_server(Box::new(PingService), config)
            .unwrap();
        assert!(handle.port() > 0);

        let mut stream =
            std::net::TcpStream::connect(("127.0.0.1", handle.port())).expect("connect");
        stream
            .write_all(b"GET /ping HTTP/1.1\r\nHost: 127.0.0.1\r\nConnection: close\r\n\r\n")
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains(r#"{"status":"ok"}"#));

        handle.shutdown();
    }

    #[test]
    fn test_http_server_shutdown_via_handle_drop() {
        let (_temp_dir, pal) = setup_test_dir();
        let config = HttpServerConfig::new("127.0.0.1").with_port(0);
        let handle = pal
            .start_http_server(Box::new(PingService), config)
            .unwrap();
        let shutdown_flag = Arc::clone(handle.shutdown_flag());

        drop(handle);
        assert!(shutdown_flag.load(Ordering::SeqCst));
    }
}
