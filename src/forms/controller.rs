//! Form controller: mutation, submission lifecycle, and guards

use super::attachments::{self, AttachmentError, StagedFile};
use super::form_state::{FieldValue, FormState};
use crate::api::{MultipartField, SubmissionApi, SubmissionBody, SubmissionRequest, SubmissionResult};
use crate::schema::{Encoding, ErrorState, FormDefinition, Rule};
use serde_json::{Map, Value};

/// Submission lifecycle phase. Terminal states always return to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Submitting,
}

/// Result of a [`FormController::submit`] call
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Validation failed; no network call was made
    Invalid(ErrorState),
    /// The network call resolved
    Completed(SubmissionResult),
    /// A submission was already running; this call was ignored
    InFlight,
    /// The screen was disposed while the request was in flight;
    /// the result must not be acted on
    Discarded,
}

type ChangeListener = Box<dyn Fn() + Send>;

/// Holds current field values, runs validation on submit, and delegates the
/// network call. Owned exclusively by one screen instance and driven from the
/// UI event loop; no locking needed.
pub struct FormController {
    definition: FormDefinition,
    state: FormState,
    phase: Phase,
    disposed: bool,
    on_change: Option<ChangeListener>,
}

impl FormController {
    pub fn new(definition: FormDefinition) -> Self {
        let state = FormState::from_definition(&definition);
        Self {
            definition,
            state,
            phase: Phase::Idle,
            disposed: false,
            on_change: None,
        }
    }

    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn errors(&self) -> &ErrorState {
        self.state.errors()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Register an observer invoked after every state mutation
    pub fn set_on_change(&mut self, listener: impl Fn() + Send + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    /// Update a field's value. Validation is deferred to submit so typing
    /// never flickers error messages.
    pub fn set_field(&mut self, name: &'static str, value: FieldValue) {
        self.state.set(name, value);
        self.emit_change();
    }

    /// Restore every field to its definition default, clearing errors and
    /// staged files. Idempotent.
    pub fn reset(&mut self) {
        self.state = FormState::from_definition(&self.definition);
        self.emit_change();
    }

    /// Mark the owning screen as gone. A submission still in flight will
    /// resolve to [`SubmissionOutcome::Discarded`] instead of completing.
    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    /// Stage files onto a file-list field, bounded by the field's cross-field
    /// limit read at call time. On rejection nothing is appended.
    pub fn add_files(
        &mut self,
        field: &'static str,
        incoming: Vec<StagedFile>,
    ) -> Result<(), AttachmentError> {
        let limit = self.attachment_limit(field);
        attachments::stage_files(self.state.files_mut(field), incoming, limit)?;
        self.emit_change();
        Ok(())
    }

    /// Remove a staged file and its preview handle; no-op when out of range
    pub fn remove_file(&mut self, field: &'static str, index: usize) {
        if attachments::remove_file(self.state.files_mut(field), index) {
            self.emit_change();
        }
    }

    /// Run validation and, if the state is clean, hand a request to the API.
    ///
    /// A second call while a submission is running is ignored rather than
    /// allowed to race.
    pub async fn submit<A>(&mut self, api: &A) -> SubmissionOutcome
    where
        A: SubmissionApi + ?Sized,
    {
        if self.phase != Phase::Idle {
            tracing::debug!(form = self.definition.name(), "submit ignored: already in flight");
            return SubmissionOutcome::InFlight;
        }

        self.phase = Phase::Validating;
        if !self.state.validate(&self.definition) {
            self.phase = Phase::Idle;
            self.emit_change();
            return SubmissionOutcome::Invalid(self.state.errors().clone());
        }

        let request = self.build_request();
        self.phase = Phase::Submitting;
        let result = api.submit(request).await;
        self.phase = Phase::Idle;

        if self.disposed {
            tracing::debug!(form = self.definition.name(), "discarding stale completion");
            return SubmissionOutcome::Discarded;
        }
        self.emit_change();
        SubmissionOutcome::Completed(result)
    }

    /// Build the finalized payload from the current (valid) state.
    /// Local-only fields are excluded.
    fn build_request(&self) -> SubmissionRequest {
        let body = match self.definition.encoding() {
            Encoding::Json => {
                let mut object = Map::new();
                for field in self.definition.fields() {
                    if field.local_only {
                        continue;
                    }
                    let value = match self.state.get(field.name) {
                        Some(FieldValue::Text(s)) => Value::String(s.clone()),
                        Some(FieldValue::Number(Some(n))) => {
                            serde_json::Number::from_f64(*n).map(Value::Number).unwrap_or(Value::Null)
                        }
                        Some(FieldValue::Files(files)) => Value::Array(
                            files
                                .iter()
                                .map(|f| Value::String(f.file_name.clone()))
                                .collect(),
                        ),
                        Some(FieldValue::Number(None)) | None => Value::Null,
                    };
                    object.insert(field.name.to_string(), value);
                }
                SubmissionBody::Json(Value::Object(object))
            }
            Encoding::Multipart => {
                let mut parts = Vec::new();
                for field in self.definition.fields() {
                    if field.local_only {
                        continue;
                    }
                    match self.state.get(field.name) {
                        Some(FieldValue::Text(s)) => parts.push(MultipartField::Text {
                            name: field.name.to_string(),
                            value: s.clone(),
                        }),
                        Some(FieldValue::Number(Some(n))) => parts.push(MultipartField::Text {
                            name: field.name.to_string(),
                            value: format_number(*n),
                        }),
                        Some(FieldValue::Files(files)) => {
                            // One part per staged file, all under the field name.
                            for file in files {
                                parts.push(MultipartField::File {
                                    name: field.name.to_string(),
                                    file: file.clone(),
                                });
                            }
                        }
                        Some(FieldValue::Number(None)) | None => {}
                    }
                }
                SubmissionBody::Multipart(parts)
            }
        };
        SubmissionRequest {
            endpoint: self.definition.endpoint().to_string(),
            body,
            requires_auth: self.definition.requires_auth(),
        }
    }

    /// Current attachment limit for a file-list field, taken from its
    /// cross-field rule's sibling value at call time
    fn attachment_limit(&self, field: &str) -> usize {
        let sibling = self.definition.field(field).and_then(|spec| {
            spec.constraints.iter().find_map(|c| match c.rule {
                Rule::MaxLenOfField(name) => Some(name),
                _ => None,
            })
        });
        match sibling.and_then(|name| self.state.number(name)) {
            Some(limit) if limit >= 0.0 => limit as usize,
            Some(_) => 0,
            None => usize::MAX,
        }
    }

    fn emit_change(&self) {
        if let Some(listener) = &self.on_change {
            listener();
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
