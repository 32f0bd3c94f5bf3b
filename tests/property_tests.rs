mod common;

use proptest::prelude::*;
use shapeql::{Directive, IssueKind, Registry, ResolvedShape, SelectionSpec};
use std::sync::OnceLock;

const USER_SCALARS: &[&str] = &[
    "name", "age", "nickname", "tags", "emails", "joined", "name_len", "friend_count",
];

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| common::load_fixture("users.yaml"))
}

fn arb_flat_entries() -> impl Strategy<Value = Vec<(&'static str, bool)>> {
    prop::collection::vec((prop::sample::select(USER_SCALARS), any::<bool>()), 0..6)
}

fn arb_spec() -> impl Strategy<Value = SelectionSpec> {
    let leaf = arb_flat_entries().prop_map(|entries| entries.into_iter().collect::<SelectionSpec>());
    leaf.prop_recursive(4, 32, 2, |inner| {
        (arb_flat_entries(), inner, any::<bool>()).prop_map(|(entries, nested, best)| {
            let mut spec: SelectionSpec = entries.into_iter().collect();
            spec.insert(if best { "bestFriend" } else { "friends" }, nested);
            spec
        })
    })
}

/// Shape keys are the spec keys minus exclusions, at every level
fn assert_keys_match(spec: &SelectionSpec, shape: &ResolvedShape) {
    let expected: Vec<&str> = spec
        .iter()
        .filter(|(_, d)| **d != Directive::Exclude)
        .map(|(k, _)| k)
        .collect();
    assert_eq!(shape.keys().collect::<Vec<_>>(), expected);

    for (key, directive) in spec.iter() {
        if let Directive::Nested(inner) = directive {
            let nested = shape
                .get(key)
                .and_then(|t| t.as_object())
                .unwrap_or_else(|| panic!("'{}' should resolve to an object", key));
            assert_keys_match(inner, nested);
        }
    }
}

proptest! {
    #[test]
    fn prop_known_keys_resolve_to_spec_keys(spec in arb_spec()) {
        let user = registry().object("User").unwrap();
        let query = user.shape(&spec).unwrap();
        assert_keys_match(&spec, query.resolved_shape());
    }

    #[test]
    fn prop_validate_and_resolve_are_idempotent(spec in arb_spec()) {
        let user = registry().object("User").unwrap();
        let first = user.validate(&spec).unwrap();
        let second = user.validate(&spec).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            shapeql::resolve(user, &first).unwrap(),
            shapeql::resolve(user, &second).unwrap()
        );
    }

    #[test]
    fn prop_single_unknown_key_is_unknown_field(
        spec in arb_spec(),
        suffix in "[a-z]{1,8}",
        form in 0u8..3,
    ) {
        let user = registry().object("User").unwrap();
        let key = format!("zz_{}", suffix);
        let directive = match form {
            0 => Directive::Include,
            1 => Directive::Exclude,
            _ => Directive::Nested(SelectionSpec::new().include("name")),
        };
        let mut spec = spec;
        spec.insert(key.clone(), directive);

        let err = user.validate(&spec).unwrap_err();
        prop_assert_eq!(err.issues().len(), 1);
        prop_assert_eq!(&err.issues()[0].path, &key);
        prop_assert_eq!(&err.issues()[0].kind, &IssueKind::UnknownField);
    }
}
