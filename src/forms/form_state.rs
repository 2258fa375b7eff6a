//! Form state: current field values plus the derived error state

use super::attachments::StagedFile;
use crate::schema::{self, ErrorState, FormDefinition};
use std::collections::BTreeMap;

/// Type-safe field values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(Option<f64>),
    Files(Vec<StagedFile>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Get the text value (returns empty string for other kinds)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    /// Get the numeric value, if any
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => *n,
            _ => None,
        }
    }

    /// Get the staged files (empty slice for other kinds)
    pub fn as_files(&self) -> &[StagedFile] {
        match self {
            FieldValue::Files(files) => files,
            _ => &[],
        }
    }
}

/// Mapping from field name to current value, created on screen mount and
/// discarded on successful submit or navigation away. Owns the derived
/// [`ErrorState`], which is recomputed on every [`FormState::validate`].
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: BTreeMap<&'static str, FieldValue>,
    errors: ErrorState,
}

impl FormState {
    /// Build a state holding every field's default value
    pub fn from_definition(definition: &FormDefinition) -> Self {
        let values = definition
            .fields()
            .iter()
            .map(|f| (f.name, f.default.clone()))
            .collect();
        Self {
            values,
            errors: ErrorState::default(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Set a field's current value. Does not validate.
    pub fn set(&mut self, name: &'static str, value: FieldValue) {
        self.values.insert(name, value);
    }

    /// Current text of a field (empty string when absent)
    pub fn text(&self, name: &str) -> &str {
        self.get(name).map(FieldValue::as_text).unwrap_or("")
    }

    /// Current numeric value of a field
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    /// Currently staged files of a field
    pub fn files(&self, name: &str) -> &[StagedFile] {
        self.get(name).map(FieldValue::as_files).unwrap_or(&[])
    }

    pub(crate) fn files_mut(&mut self, name: &'static str) -> &mut Vec<StagedFile> {
        let entry = self
            .values
            .entry(name)
            .or_insert_with(|| FieldValue::Files(Vec::new()));
        if !matches!(entry, FieldValue::Files(_)) {
            *entry = FieldValue::Files(Vec::new());
        }
        match entry {
            FieldValue::Files(files) => files,
            _ => unreachable!("entry was just normalized to Files"),
        }
    }

    /// Recompute the error state against the definition.
    /// Returns true when every field passes.
    pub fn validate(&mut self, definition: &FormDefinition) -> bool {
        let errors = schema::validate(definition, self);
        self.errors = errors;
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &ErrorState {
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{login_form, vehicle_form};

    #[test]
    fn test_from_definition_loads_defaults() {
        let state = FormState::from_definition(&vehicle_form());
        assert_eq!(state.text("carModel"), "");
        assert_eq!(state.number("price"), Some(150.0));
        assert_eq!(state.number("maxPictures"), Some(2.0));
        assert!(state.files("pictures").is_empty());
    }

    #[test]
    fn test_set_and_get_roundtrip() {
        let mut state = FormState::from_definition(&login_form());
        state.set("email", FieldValue::Text("a@b.com".into()));
        assert_eq!(state.text("email"), "a@b.com");
    }

    #[test]
    fn test_validate_stores_errors() {
        let def = login_form();
        let mut state = FormState::from_definition(&def);
        assert!(!state.validate(&def));
        assert_eq!(state.errors().message("email"), Some("Email is required"));
    }

    #[test]
    fn test_validate_clears_previous_errors() {
        let def = login_form();
        let mut state = FormState::from_definition(&def);
        state.validate(&def);
        assert!(!state.errors().is_empty());

        state.set("email", FieldValue::Text("a@b.com".into()));
        state.set("password", FieldValue::Text("secret".into()));
        assert!(state.validate(&def));
        assert!(state.errors().is_empty());
    }

    #[test]
    fn test_field_value_accessors_across_kinds() {
        assert_eq!(FieldValue::Number(Some(3.0)).as_text(), "");
        assert_eq!(FieldValue::Text("x".into()).as_number(), None);
        assert!(FieldValue::Text("x".into()).as_files().is_empty());
    }
}
