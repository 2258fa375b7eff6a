//! Field specifications and declarative validation constraints

use crate::forms::FieldValue;
use regex::Regex;

/// Semantic type of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Number,
    FileList,
}

/// A single validation rule
#[derive(Debug, Clone)]
pub enum Rule {
    /// Value must be present (non-empty text, some number, non-empty file list)
    Required,
    /// Text must contain at least this many characters
    MinChars(usize),
    /// Text must match the pattern
    Pattern(Regex),
    /// Number must be at least this value
    Min(f64),
    /// Number must be at most this value
    Max(f64),
    /// Number must be strictly greater than zero
    Positive,
    /// File-list length must not exceed the current numeric value of a
    /// sibling field, read at validation time
    MaxLenOfField(&'static str),
}

/// A rule paired with the message reported when it fails
#[derive(Debug, Clone)]
pub struct Constraint {
    pub rule: Rule,
    pub message: &'static str,
}

impl Constraint {
    pub fn new(rule: Rule, message: &'static str) -> Self {
        Self { rule, message }
    }
}

/// Declarative description of one form field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Wire name, used both as the state key and the payload key
    pub name: &'static str,
    /// Human-readable label
    pub label: &'static str,
    pub field_type: FieldType,
    /// Evaluated in order; the first failure determines the field's message
    pub constraints: Vec<Constraint>,
    /// Initial value on screen mount and after reset()
    pub default: FieldValue,
    /// Validated but excluded from the submission payload
    pub local_only: bool,
}

impl FieldSpec {
    /// Create a new text field
    pub fn text(name: &'static str, label: &'static str, constraints: Vec<Constraint>) -> Self {
        Self {
            name,
            label,
            field_type: FieldType::Text,
            constraints,
            default: FieldValue::Text(String::new()),
            local_only: false,
        }
    }

    /// Create a new numeric field
    pub fn number(name: &'static str, label: &'static str, constraints: Vec<Constraint>) -> Self {
        Self {
            name,
            label,
            field_type: FieldType::Number,
            constraints,
            default: FieldValue::Number(None),
            local_only: false,
        }
    }

    /// Create a new file-list field
    pub fn file_list(name: &'static str, label: &'static str, constraints: Vec<Constraint>) -> Self {
        Self {
            name,
            label,
            field_type: FieldType::FileList,
            constraints,
            default: FieldValue::Files(Vec::new()),
            local_only: false,
        }
    }

    /// Override the default value
    pub fn with_default(mut self, default: FieldValue) -> Self {
        self.default = default;
        self
    }

    /// Mark the field as validation-only (not submitted)
    pub fn local_only(mut self) -> Self {
        self.local_only = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_defaults() {
        let field = FieldSpec::text("email", "Email", vec![]);
        assert_eq!(field.name, "email");
        assert_eq!(field.field_type, FieldType::Text);
        assert_eq!(field.default, FieldValue::Text(String::new()));
        assert!(!field.local_only);
    }

    #[test]
    fn test_number_field_defaults_to_none() {
        let field = FieldSpec::number("price", "Price", vec![]);
        assert_eq!(field.default, FieldValue::Number(None));
    }

    #[test]
    fn test_with_default_overrides() {
        let field = FieldSpec::number("price", "Price", vec![])
            .with_default(FieldValue::Number(Some(150.0)));
        assert_eq!(field.default, FieldValue::Number(Some(150.0)));
    }

    #[test]
    fn test_local_only_marker() {
        let field = FieldSpec::number("maxPictures", "Max Pictures", vec![]).local_only();
        assert!(field.local_only);
    }

    #[test]
    fn test_file_list_defaults_to_empty() {
        let field = FieldSpec::file_list("pictures", "Pictures", vec![]);
        assert_eq!(field.default, FieldValue::Files(Vec::new()));
    }
}
