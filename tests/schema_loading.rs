//! Integration tests for schema loading
//!
//! Tests that YAML schemas build registries, and that schema bugs are
//! fatal at build time rather than surfacing per request.

mod common;

use std::io::Write;
use shapeql::{parser, Cardinality, Field, ParseError, RegistryError, ScalarType};

fn write_schema(yaml: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_fixture_objects() {
    let registry = common::load_fixture("users.yaml");
    let names: Vec<&str> = registry.objects().map(|o| o.name()).collect();
    assert_eq!(
        names,
        vec!["User", "Preferences", "LegacyPreferences", "Named", "Described"]
    );
    assert_eq!(
        registry.enum_values("Theme").unwrap(),
        &["light".to_string(), "dark".to_string(), "system".to_string()]
    );

    let user = registry.object("User").unwrap();
    let preferences = user.target("preferences").unwrap();
    assert!(preferences.is_polymorphic());
    assert_eq!(preferences.common.keys().collect::<Vec<_>>(), vec!["name", "theme"]);

    let profile = user.target("profile").unwrap();
    assert!(!profile.is_polymorphic());
    assert_eq!(profile.variants[0].members.len(), 2);
    assert_eq!(profile.common.keys().collect::<Vec<_>>(), vec!["title"]);
}

#[test]
fn test_load_from_temp_file() {
    let file = write_schema(
        r#"
objects:
  - name: Post
    fields:
      - { name: title, kind: property, type: text }
      - { name: author, kind: link, target: [[Author]], cardinality: one }
  - name: Author
    fields:
      - { name: name, kind: property, type: str }
      - { name: posts, kind: link, target: [[Post]], cardinality: many }
"#,
    );

    let registry = parser::load_file(file.path()).unwrap();
    let post = registry.object("Post").unwrap();
    match post.field("author") {
        Some(Field::Link(link)) => assert_eq!(link.cardinality, Cardinality::One),
        other => panic!("Expected link, got: {:?}", other),
    }
    let author = registry.object("Author").unwrap();
    assert_eq!(author.property("name").unwrap().property.scalar, ScalarType::Str);
}

#[test]
fn test_target_conflict_is_fatal() {
    let file = write_schema(
        r#"
objects:
  - name: Named
    fields:
      - { name: id, kind: property, type: str }
  - name: Numbered
    fields:
      - { name: id, kind: property, type: int64 }
  - name: Owner
    fields:
      - { name: thing, kind: link, target: [[Named, Numbered]] }
"#,
    );

    match parser::load_file(file.path()).unwrap_err() {
        ParseError::Registry(RegistryError::TargetConflict { link, field, first, second, .. }) => {
            assert_eq!(link, "Owner.thing");
            assert_eq!(field, "id");
            assert_eq!(first, "Named");
            assert_eq!(second, "Numbered");
        }
        other => panic!("Expected TargetConflict, got: {:?}", other),
    }
}

#[test]
fn test_undefined_object_is_fatal() {
    let err = parser::load_str(
        r#"
objects:
  - name: User
    fields:
      - { name: pets, kind: link, target: [[Pet]], cardinality: many }
"#,
    )
    .unwrap_err();

    match err {
        ParseError::Registry(RegistryError::UndefinedObject { name, referenced_by }) => {
            assert_eq!(name, "Pet");
            assert_eq!(referenced_by.as_deref(), Some("User.pets"));
        }
        other => panic!("Expected UndefinedObject, got: {:?}", other),
    }
}

#[test]
fn test_unknown_scalar_type() {
    let err = parser::load_str(
        r#"
objects:
  - name: User
    fields:
      - { name: mood, kind: property, type: Mood }
"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ParseError::Registry(RegistryError::UnknownScalarType { ref type_name, .. }) if type_name == "Mood"
    ));
}

#[test]
fn test_mistyped_computed_field() {
    let err = parser::load_str(
        r#"
objects:
  - name: User
    fields:
      - { name: age, kind: property, type: int32 }
      - { name: shout, kind: computed, expr: { op: { name: upper, args: [ { prop: age } ] } } }
"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ParseError::Registry(RegistryError::InvalidComputedField { ref field, .. }) if field == "shout"
    ));
}
