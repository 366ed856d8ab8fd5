use serde::Serialize;
use tracing::debug;

use mocksite_base::{FilePath, MocksiteResult, PalHandle};

use crate::config::Config;
use crate::layout::LayoutResult;
use crate::resolver::resolve_route;
use crate::transform::route_from_document;

/// A parsed layout query: the three required text inputs.
///
/// `site` is part of the query contract but does not select among stores;
/// a single shared per-language/per-path store serves all sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutQuery {
    pub site: String,
    pub route_path: String,
    pub language: String,
}

/// One known document in the route store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct RouteListing {
    #[serde(rename = "routePath")]
    pub route_path: String,
    pub language: String,
}

/// The layout service: resolves queries against the route store and shapes
/// the result.
///
/// Holds no mutable state; every query is an independent read through the
/// injected PAL, so identical queries against an unchanged store yield
/// identical results.
#[derive(Debug, Clone)]
pub struct LayoutService {
    pal: PalHandle,
    routes_dir: String,
}

impl LayoutService {
    /// Create a service reading documents from `routes_dir`.
    pub fn new(pal: PalHandle, routes_dir: impl Into<String>) -> Self {
        Self {
            pal,
            routes_dir: routes_dir.into(),
        }
    }

    /// Create a service from a loaded configuration.
    pub fn from_config(pal: PalHandle, config: &Config) -> Self {
        Self::new(pal, config.routes_dir.clone())
    }

    /// Execute a layout query.
    ///
    /// Returns the transformed route document, or the canonical not-found
    /// layout when no document exists for the path/language combination.
    /// A document that exists but fails to parse is an error.
    pub fn layout(&self, query: &LayoutQuery) -> MocksiteResult<LayoutResult> {
        debug!(
            site = %query.site,
            route_path = %query.route_path,
            language = %query.language,
            "layout query"
        );

        match resolve_route(&self.pal, &self.routes_dir, &query.route_path, &query.language)? {
            Some(document) => Ok(LayoutResult::from_route(route_from_document(
                &document,
                &query.route_path,
            ))),
            None => Ok(LayoutResult::not_found()),
        }
    }

    /// List every `(routePath, language)` pair present in the route store,
    /// sorted for stable output.
    pub fn list_routes(&self) -> MocksiteResult<Vec<RouteListing>> {
        let base = FilePath::from(self.routes_dir.as_str());
        let globs = vec!["**/*.yml".to_string()];

        let mut listings = Vec::new();
        for entry in self.pal.walk_directory(&base, &globs)? {
            let path = entry?;
            let Some(relative) = path.strip_prefix(&base) else {
                continue;
            };
            let Some(language) = relative.file_stem() else {
                continue;
            };
            let route_path = match relative.parent() {
                Some(parent) if !parent.as_relative().as_str().is_empty() => {
                    format!("/{}", parent.as_relative())
                }
                _ => "/".to_string(),
            };
            listings.push(RouteListing {
                route_path,
                language: language.to_string(),
            });
        }

        listings.sort();
        debug!(count = listings.len(), "listed route documents");
        Ok(listings)
    }
}
