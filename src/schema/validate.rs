//! Pure schema validation over a form's current state

use super::field::{Constraint, Rule};
use super::FormDefinition;
use crate::forms::{FieldValue, FormState};
use std::collections::BTreeMap;

/// Mapping from field name to a human-readable validation message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorState {
    messages: BTreeMap<&'static str, String>,
}

impl ErrorState {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// The message for a field, if it failed validation
    pub fn message(&self, field: &str) -> Option<&str> {
        self.messages.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: &'static str, message: String) {
        self.messages.insert(field, message);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.messages.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Validate a form state against its definition.
///
/// Constraints are evaluated in declaration order; the first failing one per
/// field determines that field's message, independently across fields. The
/// result is recomputed from scratch so it never carries stale entries.
/// Pure function of its inputs.
pub fn validate(definition: &FormDefinition, state: &FormState) -> ErrorState {
    let mut errors = ErrorState::default();
    for field in definition.fields() {
        let value = state.get(field.name);
        for constraint in &field.constraints {
            if !satisfied(constraint, value, state) {
                errors.insert(field.name, constraint.message.to_string());
                break;
            }
        }
    }
    errors
}

fn satisfied(constraint: &Constraint, value: Option<&FieldValue>, state: &FormState) -> bool {
    match &constraint.rule {
        Rule::Required => match value {
            Some(FieldValue::Text(s)) => !s.is_empty(),
            Some(FieldValue::Number(n)) => n.is_some(),
            Some(FieldValue::Files(files)) => !files.is_empty(),
            None => false,
        },
        Rule::MinChars(min) => match value {
            Some(FieldValue::Text(s)) => s.chars().count() >= *min,
            _ => true,
        },
        Rule::Pattern(pattern) => match value {
            Some(FieldValue::Text(s)) => pattern.is_match(s),
            _ => true,
        },
        Rule::Min(min) => match number_of(value) {
            Some(n) => n >= *min,
            None => true,
        },
        Rule::Max(max) => match number_of(value) {
            Some(n) => n <= *max,
            None => true,
        },
        Rule::Positive => match number_of(value) {
            Some(n) => n > 0.0,
            None => true,
        },
        Rule::MaxLenOfField(sibling) => {
            let files = match value {
                Some(FieldValue::Files(files)) => files,
                _ => return true,
            };
            // The limit is the sibling's value at validation time, not at
            // definition time.
            match state.number(sibling) {
                Some(limit) => (files.len() as f64) <= limit,
                None => true,
            }
        }
    }
}

fn number_of(value: Option<&FieldValue>) -> Option<f64> {
    match value {
        Some(FieldValue::Number(n)) => *n,
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{login_form, vehicle_form, StagedFile};
    use pretty_assertions::assert_eq;

    fn valid_login_state() -> FormState {
        let mut state = FormState::from_definition(&login_form());
        state.set("email", FieldValue::Text("a@b.com".into()));
        state.set("password", FieldValue::Text("secret".into()));
        state
    }

    fn valid_vehicle_state() -> FormState {
        let mut state = FormState::from_definition(&vehicle_form());
        state.set("carModel", FieldValue::Text("Civic".into()));
        state.set("phone", FieldValue::Text("03001234567".into()));
        state.set("city", FieldValue::Text("Lahore".into()));
        state
    }

    fn picture(name: &str) -> StagedFile {
        StagedFile::new(name, "image/jpeg", vec![0xff, 0xd8])
    }

    mod login {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_state_produces_empty_errors() {
            let errors = validate(&login_form(), &valid_login_state());
            assert!(errors.is_empty());
        }

        #[test]
        fn test_missing_email_flags_only_email() {
            let mut state = valid_login_state();
            state.set("email", FieldValue::Text(String::new()));
            let errors = validate(&login_form(), &state);
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.message("email"), Some("Email is required"));
            assert_eq!(errors.message("password"), None);
        }

        #[test]
        fn test_invalid_email_format() {
            let mut state = valid_login_state();
            state.set("email", FieldValue::Text("not-an-email".into()));
            let errors = validate(&login_form(), &state);
            assert_eq!(errors.message("email"), Some("Invalid email format"));
        }

        #[test]
        fn test_required_wins_over_format_when_empty() {
            // First failing constraint per field determines the message.
            let mut state = valid_login_state();
            state.set("email", FieldValue::Text(String::new()));
            let errors = validate(&login_form(), &state);
            assert_eq!(errors.message("email"), Some("Email is required"));
        }

        #[test]
        fn test_short_password() {
            let mut state = valid_login_state();
            state.set("password", FieldValue::Text("12345".into()));
            let errors = validate(&login_form(), &state);
            assert_eq!(
                errors.message("password"),
                Some("Password must be at least 6 characters")
            );
        }

        #[test]
        fn test_fields_fail_independently() {
            let mut state = valid_login_state();
            state.set("email", FieldValue::Text("bogus".into()));
            state.set("password", FieldValue::Text("short".into()));
            let errors = validate(&login_form(), &state);
            assert_eq!(errors.len(), 2);
        }
    }

    mod vehicle {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_defaults_plus_required_text_is_valid() {
            // price and maxPictures carry defaults; pictures may be empty.
            let errors = validate(&vehicle_form(), &valid_vehicle_state());
            assert!(errors.is_empty());
        }

        #[test]
        fn test_short_car_model() {
            let mut state = valid_vehicle_state();
            state.set("carModel", FieldValue::Text("Go".into()));
            let errors = validate(&vehicle_form(), &state);
            assert_eq!(
                errors.message("carModel"),
                Some("Minimum 3 characters required")
            );
        }

        #[test]
        fn test_missing_price() {
            let mut state = valid_vehicle_state();
            state.set("price", FieldValue::Number(None));
            let errors = validate(&vehicle_form(), &state);
            assert_eq!(errors.message("price"), Some("Price is required"));
        }

        #[test]
        fn test_negative_price() {
            let mut state = valid_vehicle_state();
            state.set("price", FieldValue::Number(Some(-5.0)));
            let errors = validate(&vehicle_form(), &state);
            assert_eq!(errors.message("price"), Some("Must be a positive number"));
        }

        #[test]
        fn test_phone_must_be_eleven_digits() {
            let mut state = valid_vehicle_state();
            state.set("phone", FieldValue::Text("12345".into()));
            let errors = validate(&vehicle_form(), &state);
            assert_eq!(errors.message("phone"), Some("Must be exactly 11 digits"));
        }

        #[test]
        fn test_max_pictures_range() {
            let mut state = valid_vehicle_state();
            state.set("maxPictures", FieldValue::Number(Some(11.0)));
            let errors = validate(&vehicle_form(), &state);
            assert_eq!(
                errors.message("maxPictures"),
                Some("No more than 10 pictures")
            );

            state.set("maxPictures", FieldValue::Number(Some(0.0)));
            let errors = validate(&vehicle_form(), &state);
            assert_eq!(errors.message("maxPictures"), Some("At least 1 picture"));
        }

        #[test]
        fn test_pictures_limited_by_current_max() {
            let mut state = valid_vehicle_state();
            state.set(
                "pictures",
                FieldValue::Files(vec![picture("a.jpg"), picture("b.jpg"), picture("c.jpg")]),
            );
            // Default maxPictures is 2, so 3 pictures fail.
            let errors = validate(&vehicle_form(), &state);
            assert_eq!(
                errors.message("pictures"),
                Some("Too many pictures uploaded")
            );

            // Raising the sibling at validation time lifts the limit.
            state.set("maxPictures", FieldValue::Number(Some(5.0)));
            let errors = validate(&vehicle_form(), &state);
            assert_eq!(errors.message("pictures"), None);
        }

        #[test]
        fn test_errors_are_recomputed_not_accumulated() {
            let mut state = valid_vehicle_state();
            state.set("city", FieldValue::Text(String::new()));
            let errors = validate(&vehicle_form(), &state);
            assert_eq!(errors.message("city"), Some("City is required"));

            state.set("city", FieldValue::Text("Lahore".into()));
            let errors = validate(&vehicle_form(), &state);
            assert!(errors.is_empty());
        }
    }
}
