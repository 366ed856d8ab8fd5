pub mod api;
pub mod config;
pub mod document;
pub mod layout;
pub mod resolver;
pub mod service;
pub mod transform;

pub use api::LayoutApiService;
pub use config::{Config, load_config};
pub use document::{ComponentDocument, FieldValue, RouteDocument};
pub use layout::{Component, Field, Item, LayoutResult, Placeholders, Route, SitecoreLayout};
pub use resolver::resolve_route;
pub use service::{LayoutQuery, LayoutService, RouteListing};
pub use transform::route_from_document;
