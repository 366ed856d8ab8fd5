use tracing::debug;

use mocksite_base::{FilePath, MocksiteError, MocksiteResult, PalHandle, error::ErrorKind};

use crate::document::RouteDocument;

/// Compute the document location for a route path and language.
///
/// The base route (`/`) stores its per-language documents at the store
/// root; every other route stores them in a subdirectory mirroring the
/// path segments:
///
/// - `("/", "en")` → `<routes_dir>/en.yml`
/// - `("/about", "en")` → `<routes_dir>/about/en.yml`
pub fn document_path(routes_dir: &str, route_path: &str, language: &str) -> FilePath {
    let base = FilePath::from(routes_dir);
    let filename = format!("{}.yml", language);
    let relative = route_path.trim_start_matches('/');
    if relative.is_empty() {
        base.join(filename.as_str())
    } else {
        base.join(relative).join(filename.as_str())
    }
}

/// Load the route document for `(route_path, language)`, if one exists.
///
/// A missing file is the expected outcome for unknown routes and returns
/// `Ok(None)`; an existing file that fails to parse is an error
/// (`ErrorKind::ParseError`) propagated to the caller. Documents are read
/// fresh on every call.
pub fn resolve_route(
    pal: &PalHandle,
    routes_dir: &str,
    route_path: &str,
    language: &str,
) -> MocksiteResult<Option<RouteDocument>> {
    let path = document_path(routes_dir, route_path, language);

    if !pal.file_exists(&path)? {
        debug!(path = %path, "no route document");
        return Ok(None);
    }

    let contents = pal.read_file_to_string(&path)?;
    let document = serde_yaml::from_str(&contents).map_err(|e| {
        Box::new(MocksiteError::new(ErrorKind::ParseError {
            path: path.as_path().to_path_buf(),
            message: e.to_string(),
        }))
    })?;
    debug!(path = %path, "route document loaded");
    Ok(Some(document))
}
