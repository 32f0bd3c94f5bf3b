//! Schema parser (verb module)
//!
//! Transforms YAML files into schema definitions, and on into registries.

use std::path::Path;
use tracing::debug;
use crate::error::ParseError;
use crate::registry::Registry;
use crate::schema::SchemaDefinition;

/// Parse a schema definition from a YAML file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<SchemaDefinition, ParseError> {
    let path_str = path.as_ref().display().to_string();
    let contents = std::fs::read_to_string(&path).map_err(|e| ParseError::Io {
        path: path_str.clone(),
        source: e,
    })?;
    debug!(path = %path_str, bytes = contents.len(), "parser.read");
    parse_str(&contents)
}

/// Parse a schema definition from a YAML string
pub fn parse_str(yaml: &str) -> Result<SchemaDefinition, ParseError> {
    serde_yaml::from_str(yaml).map_err(ParseError::from)
}

/// Parse and build a registry from a YAML file
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Registry, ParseError> {
    let def = parse_file(path)?;
    Ok(Registry::from_definition(&def)?)
}

/// Parse and build a registry from a YAML string
pub fn load_str(yaml: &str) -> Result<Registry, ParseError> {
    let def = parse_str(yaml)?;
    Ok(Registry::from_definition(&def)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryError;
    use crate::schema::{Cardinality, FieldDefinition, ScalarType};

    const USERS: &str = r#"
options:
  max_selection_depth: 8
enums:
  - name: Theme
    values: [light, dark]
objects:
  - name: User
    fields:
      - { name: name, kind: property, type: string, cardinality: one }
      - { name: nickname, kind: property, type: str, cardinality: optional }
      - { name: theme, kind: property, type: Theme }
      - { name: friends, kind: link, target: [[User]], cardinality: many }
      - { name: name_len, kind: computed, expr: { op: { name: length, args: [ { prop: name } ] } } }
"#;

    #[test]
    fn test_parse_definition() {
        let def = parse_str(USERS).unwrap();
        assert_eq!(def.options.max_selection_depth, 8);
        assert_eq!(def.enums[0].values, vec!["light", "dark"]);
        let user = &def.objects[0];
        assert_eq!(user.fields.len(), 5);
        assert!(matches!(
            &user.fields[1],
            FieldDefinition::Property { cardinality: Cardinality::AtMostOne, .. }
        ));
        assert!(matches!(&user.fields[3], FieldDefinition::Link { target, .. } if target == &vec![vec!["User".to_string()]]));
    }

    #[test]
    fn test_load_registry() {
        let registry = load_str(USERS).unwrap();
        let user = registry.object("User").unwrap();
        assert_eq!(user.property("name").unwrap().property.scalar, ScalarType::Str);
        assert_eq!(
            user.property("theme").unwrap().property.scalar,
            ScalarType::Enum("Theme".to_string())
        );
        assert_eq!(registry.options().max_selection_depth, 8);
        assert!(user.field("name_len").is_some());
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_str("not: [valid: yaml");
        assert!(matches!(result, Err(ParseError::Yaml { .. })));
    }

    #[test]
    fn test_load_undefined_target() {
        let yaml = r#"
objects:
  - name: User
    fields:
      - { name: posts, kind: link, target: [[Post]], cardinality: many }
"#;
        let err = load_str(yaml).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Registry(RegistryError::UndefinedObject { ref name, .. }) if name == "Post"
        ));
    }

    #[test]
    fn test_enum_named_like_builtin() {
        let yaml = r#"
enums:
  - name: Time
    values: [morning, evening]
objects:
  - name: Booking
    fields:
      - { name: slot, kind: property, type: Time }
"#;
        let err = load_str(yaml).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Registry(RegistryError::EnumShadowsBuiltin { ref name, builtin: ScalarType::LocalTime })
                if name == "Time"
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_file("no/such/schema.yaml").unwrap_err();
        assert!(matches!(err, ParseError::Io { ref path, .. } if path == "no/such/schema.yaml"));
    }
}
