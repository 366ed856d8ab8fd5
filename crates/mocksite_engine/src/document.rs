use indexmap::IndexMap;
use serde::Deserialize;

/// A route document as stored on disk: one YAML file per language per route
/// path. Every part is optional; the shape transformer supplies defaults.
///
/// Field maps are insertion-ordered so the output field list follows the
/// document's own enumeration order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteDocument {
    /// Display name of the route.
    #[serde(default)]
    pub name: Option<String>,
    /// Named scalar values attached to the route.
    #[serde(default)]
    pub fields: Option<IndexMap<String, FieldValue>>,
    /// Placeholder slots, each holding an ordered list of components.
    #[serde(default)]
    pub placeholders: Option<IndexMap<String, Vec<ComponentDocument>>>,
}

/// A component instance inside a placeholder slot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDocument {
    /// Name of the component (YAML key `componentName`).
    pub component_name: String,
    /// Named scalar values attached to the component.
    #[serde(default)]
    pub fields: Option<IndexMap<String, FieldValue>>,
}

/// A scalar field value from a route document.
///
/// Documents are informally typed; this enum captures the scalar shapes they
/// may contain and owns the coercion to output text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Coerce the scalar to its text representation.
    ///
    /// All output field values are text regardless of the source type:
    /// `5` becomes `"5"`, `true` becomes `"true"`, a missing value becomes
    /// `"null"`.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Null => "null".to_string(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Text(s) => s.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let yaml = "\
name: About Us
fields:
  pageTitle: About
  visitorCount: 5
placeholders:
  main:
    - componentName: TeamList
      fields:
        count: 5
";
        let doc: RouteDocument = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(doc.name.as_deref(), Some("About Us"));

        let fields = doc.fields.unwrap();
        assert_eq!(
            fields.get("pageTitle"),
            Some(&FieldValue::Text("About".to_string()))
        );
        assert_eq!(fields.get("visitorCount"), Some(&FieldValue::Integer(5)));

        let placeholders = doc.placeholders.unwrap();
        let main = placeholders.get("main").unwrap();
        assert_eq!(main.len(), 1);
        assert_eq!(main[0].component_name, "TeamList");
    }

    #[test]
    fn test_parse_empty_document() {
        let doc: RouteDocument = serde_yaml::from_str("{}").unwrap();
        assert_eq!(doc.name, None);
        assert_eq!(doc.fields, None);
        assert_eq!(doc.placeholders, None);
    }

    #[test]
    fn test_field_order_preserved() {
        let yaml = "\
fields:
  zulu: 1
  alpha: 2
  mike: 3
";
        let doc: RouteDocument = serde_yaml::from_str(yaml).unwrap();
        let keys: Vec<&String> = doc.fields.as_ref().unwrap().keys().collect();
        assert_eq!(keys, vec!["zulu", "alpha", "mike"]);
    }

    #[test]
    fn test_component_name_yaml_key() {
        let yaml = "componentName: Hero";
        let component: ComponentDocument = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(component.component_name, "Hero");
        assert_eq!(component.fields, None);
    }

    #[test]
    fn test_scalar_coercion_to_text() {
        assert_eq!(FieldValue::Text("Welcome".to_string()).to_text(), "Welcome");
        assert_eq!(FieldValue::Integer(1).to_text(), "1");
        assert_eq!(FieldValue::Integer(-7).to_text(), "-7");
        assert_eq!(FieldValue::Float(1.5).to_text(), "1.5");
        assert_eq!(FieldValue::Boolean(true).to_text(), "true");
        assert_eq!(FieldValue::Boolean(false).to_text(), "false");
        assert_eq!(FieldValue::Null.to_text(), "null");
    }

    #[test]
    fn test_scalar_parsing_variants() {
        let yaml = "\
fields:
  text: hello
  number: 42
  decimal: 2.5
  flag: true
  empty:
";
        let doc: RouteDocument = serde_yaml::from_str(yaml).unwrap();
        let fields = doc.fields.unwrap();
        assert_eq!(fields.get("text"), Some(&FieldValue::Text("hello".to_string())));
        assert_eq!(fields.get("number"), Some(&FieldValue::Integer(42)));
        assert_eq!(fields.get("decimal"), Some(&FieldValue::Float(2.5)));
        assert_eq!(fields.get("flag"), Some(&FieldValue::Boolean(true)));
        assert_eq!(fields.get("empty"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_quoted_number_stays_text() {
        let yaml = "fields:\n  version: \"5\"\n";
        let doc: RouteDocument = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            doc.fields.unwrap().get("version"),
            Some(&FieldValue::Text("5".to_string()))
        );
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let yaml = "placeholders:\n  main: not-a-list\n";
        let result: Result<RouteDocument, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }
}
