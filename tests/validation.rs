//! Integration tests for selection validation
//!
//! Tests that bad specs are rejected with the right issue kind at the
//! right key path, and that every bad key of a level is reported.

mod common;

use common::{friends_chain, load_fixture};
use serde_json::json;
use shapeql::expr::{len, literal};
use shapeql::{Error, FieldKind, IssueKind, SelectionSpec, SpecParseError};

#[test]
fn test_unknown_field() {
    let registry = load_fixture("users.yaml");
    let user = registry.object("User").unwrap();

    let err = user.validate(&SelectionSpec::new().include("zzz")).unwrap_err();
    assert_eq!(err.issues().len(), 1);
    assert_eq!(err.issues()[0].path, "zzz");
    assert_eq!(err.issues()[0].kind, IssueKind::UnknownField);
}

#[test]
fn test_unknown_field_with_pointer_override() {
    let registry = load_fixture("users.yaml");
    let user = registry.object("User").unwrap();

    // A bare pointer on an unknown key is not an alias
    let spec = SelectionSpec::new().with("zzz", user.property("name").unwrap());
    let err = user.validate(&spec).unwrap_err();
    assert_eq!(err.issue_at("zzz"), Some(&IssueKind::UnknownField));
}

#[test]
fn test_invalid_directives() {
    let registry = load_fixture("users.yaml");
    let user = registry.object("User").unwrap();

    let spec = SelectionSpec::new()
        .nested("name", SelectionSpec::new().include("x"))
        .nested("name_len", SelectionSpec::new())
        .with("friends", user.property("name").unwrap());
    let err = user.validate(&spec).unwrap_err();

    assert_eq!(
        err.issue_at("name"),
        Some(&IssueKind::InvalidDirective {
            field: FieldKind::Property,
            found: "nested selection"
        })
    );
    assert_eq!(
        err.issue_at("name_len"),
        Some(&IssueKind::InvalidDirective {
            field: FieldKind::Computable,
            found: "nested selection"
        })
    );
    assert_eq!(
        err.issue_at("friends"),
        Some(&IssueKind::InvalidDirective {
            field: FieldKind::Link,
            found: "property reference"
        })
    );
}

#[test]
fn test_batch_errors_across_levels() {
    let registry = load_fixture("users.yaml");
    let user = registry.object("User").unwrap();

    let spec = SelectionSpec::new()
        .include("nope")
        .include("name")
        .nested(
            "friends",
            SelectionSpec::new()
                .include("ghost")
                .nested("friends", SelectionSpec::new().include("phantom")),
        )
        .include("alsoNope");

    let err = user.validate(&spec).unwrap_err();
    let paths: Vec<&str> = err.issues().iter().map(|i| i.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["nope", "friends.ghost", "friends.friends.phantom", "alsoNope"]
    );
    assert!(err.issues().iter().all(|i| i.kind == IssueKind::UnknownField));

    let message = err.to_string();
    assert!(message.contains("4 issue(s)"));
    assert!(message.contains("'friends.friends.phantom': unknown field"));
}

#[test]
fn test_polymorphic_link_common_field() {
    let registry = load_fixture("users.yaml");
    let user = registry.object("User").unwrap();

    let ok = SelectionSpec::new().nested("preferences", SelectionSpec::new().include("name"));
    assert!(user.validate(&ok).is_ok());
}

#[test]
fn test_polymorphic_link_variant_field() {
    let registry = load_fixture("users.yaml");
    let user = registry.object("User").unwrap();

    let spec = SelectionSpec::new().nested(
        "preferences",
        SelectionSpec::new()
            .include("emailNotifications")
            .include("legacyFlag")
            .include("missing"),
    );
    let err = user.validate(&spec).unwrap_err();
    assert_eq!(
        err.issue_at("preferences.emailNotifications"),
        Some(&IssueKind::AmbiguousVariantField {
            variants: vec!["Preferences".to_string()]
        })
    );
    assert_eq!(
        err.issue_at("preferences.legacyFlag"),
        Some(&IssueKind::AmbiguousVariantField {
            variants: vec!["LegacyPreferences".to_string()]
        })
    );
    assert_eq!(err.issue_at("preferences.missing"), Some(&IssueKind::UnknownField));
}

#[test]
fn test_variant_field_alias_is_allowed() {
    let registry = load_fixture("users.yaml");
    let user = registry.object("User").unwrap();

    // A computable under a variant-only name is an alias, not a selection
    let spec = SelectionSpec::new().nested(
        "preferences",
        SelectionSpec::new().with("emailNotifications", literal(false)),
    );
    assert!(user.validate(&spec).is_ok());
}

#[test]
fn test_depth_limit_from_schema_options() {
    let registry = load_fixture("users.yaml");
    let user = registry.object("User").unwrap();
    assert_eq!(registry.options().max_selection_depth, 16);

    // 15 links plus the leaf level is 16 levels
    assert!(user.validate(&friends_chain(15)).is_ok());

    let err = user.validate(&friends_chain(16)).unwrap_err();
    assert_eq!(err.issues().len(), 1);
    assert_eq!(err.issues()[0].kind, IssueKind::DepthExceeded { max: 16 });
    assert_eq!(err.issues()[0].path.split('.').count(), 16);
}

#[test]
fn test_shape_wraps_validation_error() {
    let registry = load_fixture("users.yaml");
    let user = registry.object("User").unwrap();

    match user.shape(&SelectionSpec::new().include("bogus")) {
        Err(Error::Validation(err)) => assert_eq!(err.issue_at("bogus"), Some(&IssueKind::UnknownField)),
        other => panic!("Expected validation error, got: {:?}", other),
    }
}

#[test]
fn test_json_spec() {
    let registry = load_fixture("users.yaml");
    let user = registry.object("User").unwrap();

    let spec = SelectionSpec::from_json(
        &json!({
            "name": true,
            "age": false,
            "friends": { "name": true },
            "zzz": { "$expr": { "op": { "name": "length", "args": [ { "prop": "User.name" } ] } } }
        }),
        user,
    )
    .unwrap();

    let query = user.shape(&spec).unwrap();
    assert_eq!(
        query.resolved_shape().to_string(),
        "{name: str, friends: Array<{name: str}>, zzz: int64}"
    );
    assert_eq!(query.spec().excluded(), &["age".to_string()]);
}

#[test]
fn test_json_spec_expression_type_error() {
    let registry = load_fixture("users.yaml");
    let user = registry.object("User").unwrap();

    let err = SelectionSpec::from_json_str(
        r#"{ "x": { "$expr": { "op": { "name": "upper", "args": [ { "prop": "age" } ] } } } }"#,
        user,
    )
    .unwrap_err();
    match err {
        SpecParseError::Expr { path, source } => {
            assert_eq!(path, "x");
            assert!(source.to_string().contains("upper"));
        }
        other => panic!("Expected expression error, got: {:?}", other),
    }
}

#[test]
fn test_operator_type_mismatch_at_construction() {
    let registry = load_fixture("users.yaml");
    let user = registry.object("User").unwrap();

    let err = len(user.property("age").unwrap()).unwrap_err();
    assert!(matches!(err, shapeql::ExprError::OperatorTypeMismatch { position: 0, .. }));
}
