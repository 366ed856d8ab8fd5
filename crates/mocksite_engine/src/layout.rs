use serde::Serialize;

/// The layout document returned for every query.
///
/// `item` is part of the declared output schema but is never populated by
/// this mock; it is omitted from the serialized result when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
    pub sitecore: SitecoreLayout,
}

/// Rendered-item section of the output schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered: Option<String>,
}

/// Container for the route object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitecoreLayout {
    pub route: Route,
}

/// The transformed route: name, named text fields, and the single
/// recognized placeholder slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub name: String,
    pub fields: Vec<Field>,
    pub placeholders: Placeholders,
}

/// A named text value on a route or component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub value: String,
}

/// Placeholder slots in the output. Only `main` exists; it is always
/// present, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placeholders {
    pub main: Vec<Component>,
}

/// A component instance in the output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub name: String,
    pub fields: Vec<Field>,
}

impl LayoutResult {
    /// Wrap a transformed route in the full result envelope.
    pub fn from_route(route: Route) -> Self {
        Self {
            item: None,
            sitecore: SitecoreLayout { route },
        }
    }

    /// The canonical result for a route with no document. A static
    /// contract: name `not-found`, one `pageTitle` field, empty `main`.
    pub fn not_found() -> Self {
        Self::from_route(Route::not_found())
    }
}

impl Route {
    /// The canonical route returned when no document exists.
    pub fn not_found() -> Self {
        Self {
            name: "not-found".to_string(),
            fields: vec![Field {
                name: "pageTitle".to_string(),
                value: "Not Found".to_string(),
            }],
            placeholders: Placeholders { main: vec![] },
        }
    }
}
