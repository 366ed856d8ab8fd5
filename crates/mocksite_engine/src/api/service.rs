use percent_encoding::percent_decode_str;
use serde::Serialize;
use tracing::{debug, error, warn};

use mocksite_base::MocksiteResult;
use mocksite_base::pal::http::{
    HttpMethod, HttpRequest, HttpResponse, HttpService, HttpStatusCode,
};

use crate::layout::LayoutResult;
use crate::service::{LayoutQuery, LayoutService};

use super::playground::PLAYGROUND_HTML;

/// Envelope for successful layout responses: `{"data":{"layout":...}}`.
#[derive(Serialize)]
struct DataResponse<'a> {
    data: DataBody<'a>,
}

#[derive(Serialize)]
struct DataBody<'a> {
    layout: &'a LayoutResult,
}

/// Envelope for failed requests: `{"errors":[{"message":...}]}`.
#[derive(Serialize)]
struct ErrorsResponse {
    errors: Vec<ErrorEntry>,
}

#[derive(Serialize)]
struct ErrorEntry {
    message: String,
}

/// HTTP service exposing the layout API.
///
/// Handles, relative to the configured endpoint path:
/// - `POST <endpoint>` with a JSON body carrying `site`, `routePath`, and
///   `language` (top-level or under `variables`) - executes the query
/// - `GET <endpoint>?site=..&routePath=..&language=..` - same query via
///   query parameters
/// - `GET <endpoint>` without parameters - the playground page
/// - `GET /api/routes` - lists the documents in the route store
/// - `OPTIONS *` - CORS preflight acceptance
///
/// Every response carries permissive cross-origin headers; browser-based
/// front-ends talk to the mock from any origin.
#[derive(Debug, Clone)]
pub struct LayoutApiService {
    service: LayoutService,
    endpoint: String,
}

impl LayoutApiService {
    /// Create an API service routing layout queries at `endpoint`.
    pub fn new(service: LayoutService, endpoint: impl Into<String>) -> Self {
        Self {
            service,
            endpoint: endpoint.into(),
        }
    }

    /// Attach permissive cross-origin headers to a response.
    fn with_cors(response: HttpResponse) -> HttpResponse {
        response
            .with_header("Access-Control-Allow-Origin", "*")
            .with_header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
            .with_header("Access-Control-Allow-Headers", "Content-Type")
    }

    /// Serialize data to JSON and wrap in an HTTP 200 response with CORS
    /// headers.
    fn json_response<T: Serialize>(data: &T) -> MocksiteResult<HttpResponse> {
        serde_json::to_string(data)
            .map(|json| Self::with_cors(HttpResponse::json(json)))
            .map_err(|e| mocksite_base::err!("JSON serialization error: {}", e))
    }

    /// Build the JSON error envelope with the given status.
    fn error_response(status: HttpStatusCode, message: impl Into<String>) -> HttpResponse {
        let message = message.into();
        let body = serde_json::to_string(&ErrorsResponse {
            errors: vec![ErrorEntry { message }],
        })
        // ErrorsResponse contains only strings; serialization cannot fail
        .unwrap_or_else(|_| r#"{"errors":[{"message":"internal error"}]}"#.to_string());
        Self::with_cors(
            HttpResponse::json(body).with_status(status),
        )
    }

    /// Extract the three query fields from a parsed JSON body. Accepts the
    /// fields at the top level or nested under `variables`.
    fn query_from_json(value: &serde_json::Value) -> Option<LayoutQuery> {
        let source = value.get("variables").unwrap_or(value);
        Some(LayoutQuery {
            site: source.get("site")?.as_str()?.to_string(),
            route_path: source.get("routePath")?.as_str()?.to_string(),
            language: source.get("language")?.as_str()?.to_string(),
        })
    }

    /// Extract the three query fields from a URL query string,
    /// percent-decoding the values. Returns None unless all three are
    /// present.
    fn query_from_params(query_string: &str) -> Option<LayoutQuery> {
        let mut site = None;
        let mut route_path = None;
        let mut language = None;

        for pair in query_string.split('&') {
            let Some((key, raw_value)) = pair.split_once('=') else {
                continue;
            };
            let Ok(value) = percent_decode_str(raw_value).decode_utf8() else {
                continue;
            };
            match key {
                "site" => site = Some(value.into_owned()),
                "routePath" => route_path = Some(value.into_owned()),
                "language" => language = Some(value.into_owned()),
                _ => {}
            }
        }

        Some(LayoutQuery {
            site: site?,
            route_path: route_path?,
            language: language?,
        })
    }

    /// Execute a layout query and wrap the outcome in the response
    /// envelope.
    fn execute(&self, query: &LayoutQuery) -> MocksiteResult<HttpResponse> {
        match self.service.layout(query) {
            Ok(result) => Self::json_response(&DataResponse {
                data: DataBody { layout: &result },
            }),
            Err(e) => {
                error!(route_path = %query.route_path, error = %e, "layout query failed");
                Ok(Self::error_response(
                    HttpStatusCode::InternalServerError,
                    format!("layout operation failed: {}", e),
                ))
            }
        }
    }

    /// Handle POST requests to the layout endpoint.
    fn handle_layout_post(&self, request: &HttpRequest) -> MocksiteResult<HttpResponse> {
        let body = request.body().as_bytes();
        let value: serde_json::Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "invalid JSON in layout request");
                return Ok(Self::error_response(
                    HttpStatusCode::BadRequest,
                    format!("invalid JSON body: {}", e),
                ));
            }
        };

        match Self::query_from_json(&value) {
            Some(query) => self.execute(&query),
            None => Ok(Self::error_response(
                HttpStatusCode::BadRequest,
                "query requires site, routePath, and language",
            )),
        }
    }

    /// Handle GET requests to the layout endpoint: execute the query if
    /// parameters are given, otherwise serve the playground.
    fn handle_layout_get(&self, query_string: Option<&str>) -> MocksiteResult<HttpResponse> {
        match query_string {
            Some(params) => match Self::query_from_params(params) {
                Some(query) => self.execute(&query),
                None => Ok(Self::error_response(
                    HttpStatusCode::BadRequest,
                    "query requires site, routePath, and language",
                )),
            },
            None => {
                debug!("serving playground page");
                Ok(Self::with_cors(HttpResponse::html(PLAYGROUND_HTML)))
            }
        }
    }

    /// Handle GET /api/routes.
    fn handle_routes(&self) -> MocksiteResult<HttpResponse> {
        match self.service.list_routes() {
            Ok(listings) => Self::json_response(&listings),
            Err(e) => {
                error!(error = %e, "route listing failed");
                Ok(Self::error_response(
                    HttpStatusCode::InternalServerError,
                    format!("route listing failed: {}", e),
                ))
            }
        }
    }
}

impl HttpService for LayoutApiService {
    fn handle_request(&self, request: HttpRequest) -> MocksiteResult<HttpResponse> {
        if request.method() == &HttpMethod::Options {
            return Ok(Self::with_cors(HttpResponse::no_content()));
        }

        let (path, query_string) = match request.path().split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (request.path(), None),
        };

        if path == self.endpoint {
            return match request.method() {
                HttpMethod::Post => self.handle_layout_post(&request),
                HttpMethod::Get => self.handle_layout_get(query_string),
                other => Ok(Self::error_response(
                    HttpStatusCode::MethodNotAllowed,
                    format!("method {} not supported on the layout endpoint", other),
                )),
            };
        }

        if path == "/api/routes" && request.method() == &HttpMethod::Get {
            return self.handle_routes();
        }

        debug!(path = %path, "unknown endpoint");
        Ok(Self::error_response(
            HttpStatusCode::NotFound,
            format!("unknown endpoint: {}", path),
        ))
    }
}
