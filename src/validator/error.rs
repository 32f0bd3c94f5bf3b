use std::fmt;
use thiserror::Error;
use crate::schema::FieldKind;

/// What went wrong with one key of a selection spec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueKind {
    /// Name absent from the object and not backed by a computable
    #[error("unknown field")]
    UnknownField,
    /// Directive form not legal for the field's kind
    #[error("{found} is not a valid directive for a {field}")]
    InvalidDirective { field: FieldKind, found: &'static str },
    /// Field defined by some variants of a polymorphic link but not all
    #[error("field is only defined by variant(s) {}", .variants.join(", "))]
    AmbiguousVariantField { variants: Vec<String> },
    /// Spec nests deeper than the registry allows
    #[error("selection nests deeper than {max} levels")]
    DepthExceeded { max: usize },
}

/// One rejected key, addressed by its dot-separated key chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.path, self.kind)
    }
}

/// Every issue found in a selection spec.
///
/// Issues are ordered by spec key order; a nested level's issues follow
/// the issues of the level above at the position of the parent key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Issue at an exact key path
    pub fn issue_at(&self, path: &str) -> Option<&IssueKind> {
        self.issues.iter().find(|i| i.path == path).map(|i| &i.kind)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid selection ({} issue(s))", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "; {}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
