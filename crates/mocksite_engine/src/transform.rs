use indexmap::IndexMap;

use crate::document::{FieldValue, RouteDocument};
use crate::layout::{Component, Field, Placeholders, Route};

/// Placeholder slot names recognized in route documents, in precedence
/// order. All other slots are ignored.
const PLACEHOLDER_SLOTS: [&str; 2] = ["jss-main", "main"];

/// Derive the route name for the output.
///
/// The document's own non-empty `name` wins; otherwise the last segment of
/// the route path; for the base route, the literal `home`.
fn route_name(document: &RouteDocument, route_path: &str) -> String {
    if let Some(name) = document.name.as_deref() {
        if !name.is_empty() {
            return name.to_string();
        }
    }
    route_path
        .trim_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "home".to_string())
}

/// Transform a field map into the output list, coercing every value to
/// text and preserving the map's enumeration order.
fn transform_fields(fields: Option<&IndexMap<String, FieldValue>>) -> Vec<Field> {
    fields
        .map(|map| {
            map.iter()
                .map(|(name, value)| Field {
                    name: name.clone(),
                    value: value.to_text(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Transform a parsed route document into the output route shape.
///
/// Applies the name derivation, field transform, and placeholder slot
/// resolution. The output always carries a `fields` list and a
/// `placeholders.main` list, both possibly empty.
pub fn route_from_document(document: &RouteDocument, route_path: &str) -> Route {
    let components = document
        .placeholders
        .as_ref()
        .and_then(|placeholders| {
            PLACEHOLDER_SLOTS
                .iter()
                .find_map(|slot| placeholders.get(*slot))
        })
        .map(|components| {
            components
                .iter()
                .map(|component| Component {
                    name: component.component_name.clone(),
                    fields: transform_fields(component.fields.as_ref()),
                })
                .collect()
        })
        .unwrap_or_default();

    Route {
        name: route_name(document, route_path),
        fields: transform_fields(document.fields.as_ref()),
        placeholders: Placeholders { main: components },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    fn parse(yaml: &str) -> RouteDocument {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_name_from_document() {
        let document = parse("name: About Us");
        assert_eq!(route_from_document(&document, "/about").name, "About Us");
    }

    #[test]
    fn test_name_from_route_path() {
        let document = parse("{}");
        assert_eq!(route_from_document(&document, "/about").name, "about");
    }

    #[test]
    fn test_name_from_nested_route_path_uses_last_segment() {
        let document = parse("{}");
        assert_eq!(
            route_from_document(&document, "/products/widgets").name,
            "widgets"
        );
    }

    #[test]
    fn test_name_defaults_to_home_for_base_route() {
        let document = parse("{}");
        assert_eq!(route_from_document(&document, "/").name, "home");
    }

    #[test]
    fn test_empty_document_name_falls_through() {
        let document = parse("name: \"\"");
        assert_eq!(route_from_document(&document, "/about").name, "about");
    }

    #[test]
    fn test_fields_order_and_coercion() {
        let document = parse("fields:\n  a: 1\n  b: x\n");
        let route = route_from_document(&document, "/");
        assert_eq!(
            route.fields,
            vec![
                Field {
                    name: "a".to_string(),
                    value: "1".to_string()
                },
                Field {
                    name: "b".to_string(),
                    value: "x".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_missing_fields_is_empty_list() {
        let document = parse("name: Home");
        let route = route_from_document(&document, "/");
        assert!(route.fields.is_empty());
    }

    #[test]
    fn test_placeholder_slot_jss_main_wins() {
        let document = parse(
            "placeholders:\n  \
               jss-main:\n    - componentName: FromJssMain\n  \
               main:\n    - componentName: FromMain\n",
        );
        let route = route_from_document(&document, "/");
        assert_eq!(route.placeholders.main.len(), 1);
        assert_eq!(route.placeholders.main[0].name, "FromJssMain");
    }

    #[test]
    fn test_placeholder_slot_main_fallback() {
        let document = parse("placeholders:\n  main:\n    - componentName: Hero\n");
        let route = route_from_document(&document, "/");
        assert_eq!(route.placeholders.main[0].name, "Hero");
    }

    #[test]
    fn test_unrecognized_slots_ignored() {
        let document = parse("placeholders:\n  sidebar:\n    - componentName: Nav\n");
        let route = route_from_document(&document, "/");
        assert!(route.placeholders.main.is_empty());
    }

    #[test]
    fn test_component_transform() {
        let document = parse(
            "placeholders:\n  main:\n    - componentName: Hero\n      fields:\n        title: Welcome\n",
        );
        let route = route_from_document(&document, "/");
        assert_eq!(
            route.placeholders.main,
            vec![Component {
                name: "Hero".to_string(),
                fields: vec![Field {
                    name: "title".to_string(),
                    value: "Welcome".to_string()
                }],
            }]
        );
    }

    #[test]
    fn test_component_without_fields_gets_empty_list() {
        let document = parse("placeholders:\n  main:\n    - componentName: Divider\n");
        let route = route_from_document(&document, "/");
        assert!(route.placeholders.main[0].fields.is_empty());
    }

    #[test]
    fn test_component_order_preserved() {
        let document = parse(
            "placeholders:\n  main:\n    - componentName: First\n    - componentName: Second\n    - componentName: Third\n",
        );
        let route = route_from_document(&document, "/");
        let names: Vec<&str> = route
            .placeholders
            .main
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_full_route_snapshot() {
        let document = parse(
            "\
name: About Us
fields:
  pageTitle: About
  published: true
  revision: 3
placeholders:
  jss-main:
    - componentName: Hero
      fields:
        title: Welcome
    - componentName: TeamList
      fields:
        count: 5
",
        );
        let route = route_from_document(&document, "/about");
        let json = serde_json::to_string_pretty(&route).unwrap();
        expect![[r#"
            {
              "name": "About Us",
              "fields": [
                {
                  "name": "pageTitle",
                  "value": "About"
                },
                {
                  "name": "published",
                  "value": "true"
                },
                {
                  "name": "revision",
                  "value": "3"
                }
              ],
              "placeholders": {
                "main": [
                  {
                    "name": "Hero",
                    "fields": [
                      {
                        "name": "title",
                        "value": "Welcome"
                      }
                    ]
                  },
                  {
                    "name": "TeamList",
                    "fields": [
                      {
                        "name": "count",
                        "value": "5"
                      }
                    ]
                  }
                ]
              }
            }"#]]
        .assert_eq(&json);
    }
}
