//! Schema definitions as handed over by the introspection collaborator
//!
//! These are plain deserializable records; the registry builder turns them
//! into resolved [`SchemaObject`](super::SchemaObject)s.

use serde::Deserialize;
use super::types::Cardinality;
use crate::expr::ExprDef;

/// Default bound on selection spec nesting
pub const DEFAULT_MAX_SELECTION_DEPTH: usize = 64;

/// Root of a schema file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaDefinition {
    #[serde(default)]
    pub options: RegistryOptions,
    /// Enumerated scalar types
    #[serde(default)]
    pub enums: Vec<EnumDefinition>,
    pub objects: Vec<ObjectDefinition>,
}

/// Engine options carried alongside the schema
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegistryOptions {
    /// Deepest nesting a selection spec may use before validation rejects it
    #[serde(default = "default_max_selection_depth")]
    pub max_selection_depth: usize,
}

fn default_max_selection_depth() -> usize {
    DEFAULT_MAX_SELECTION_DEPTH
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            max_selection_depth: DEFAULT_MAX_SELECTION_DEPTH,
        }
    }
}

/// An enumerated scalar type
#[derive(Debug, Clone, Deserialize)]
pub struct EnumDefinition {
    pub name: String,
    pub values: Vec<String>,
}

/// One object type and its fields
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectDefinition {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// A field declaration, tagged by `kind`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldDefinition {
    /// `{ kind: property, name: age, type: int32, cardinality: one }`
    Property {
        name: String,
        #[serde(rename = "type")]
        scalar: String,
        #[serde(default)]
        cardinality: Cardinality,
    },
    /// `{ kind: link, name: friends, target: [[User]], cardinality: many }`
    Link {
        name: String,
        /// Disjunction of conjunctions of object names
        target: Vec<Vec<String>>,
        #[serde(default)]
        cardinality: Cardinality,
    },
    /// `{ kind: computed, name: name_len, expr: { op: { name: len, args: [{ prop: name }] } } }`
    Computed {
        name: String,
        expr: ExprDef,
    },
}

impl FieldDefinition {
    pub fn name(&self) -> &str {
        match self {
            FieldDefinition::Property { name, .. } => name,
            FieldDefinition::Link { name, .. } => name,
            FieldDefinition::Computed { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_fields() {
        let yaml = r#"
objects:
  - name: User
    fields:
      - { kind: property, name: name, type: str }
      - { kind: property, name: nickname, type: str, cardinality: at_most_one }
      - { kind: link, name: friends, target: [[User]], cardinality: many }
      - { kind: computed, name: name_len, expr: { op: { name: len, args: [{ prop: name }] } } }
"#;
        let def: SchemaDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.options.max_selection_depth, DEFAULT_MAX_SELECTION_DEPTH);
        let user = &def.objects[0];
        assert_eq!(user.fields.len(), 4);
        assert!(matches!(
            &user.fields[0],
            FieldDefinition::Property { cardinality: Cardinality::One, .. }
        ));
        assert!(matches!(
            &user.fields[1],
            FieldDefinition::Property { cardinality: Cardinality::AtMostOne, .. }
        ));
        match &user.fields[2] {
            FieldDefinition::Link { target, cardinality, .. } => {
                assert_eq!(target, &vec![vec!["User".to_string()]]);
                assert_eq!(*cardinality, Cardinality::Many);
            }
            other => panic!("Expected link, got: {:?}", other),
        }
        assert_eq!(user.fields[3].name(), "name_len");
    }

    #[test]
    fn test_options_override() {
        let yaml = "options: { max_selection_depth: 3 }\nobjects: []\n";
        let def: SchemaDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.options.max_selection_depth, 3);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let yaml = "objects: [ { name: A, fields: [ { kind: backlink, name: x } ] } ]";
        assert!(serde_yaml::from_str::<SchemaDefinition>(yaml).is_err());
    }
}
