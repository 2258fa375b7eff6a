//! Login screen flow: schema, submission, credential persistence,
//! and post-login navigation

use super::controller::{FormController, SubmissionOutcome};
use super::form_state::FieldValue;
use crate::api::{SubmissionApi, SubmissionResult};
use crate::credentials::TokenStore;
use crate::feedback::{FeedbackDispatcher, Navigator, NotificationSink};
use crate::schema::{Constraint, Encoding, FieldSpec, FormDefinition, Rule};
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const LOGIN_ENDPOINT: &str = "/v1/auth/login";

/// Where a successful login lands
pub const POST_LOGIN_ROUTE: &str = "/vehicle-details";

/// Delay before navigating, so the success toast has time to render
pub const POST_LOGIN_DELAY: Duration = Duration::from_millis(1500);

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid");
}

/// The login form definition: JSON body, no auth header
pub fn login_form() -> FormDefinition {
    FormDefinition::new(
        "login",
        LOGIN_ENDPOINT,
        Encoding::Json,
        false,
        vec![
            FieldSpec::text(
                "email",
                "Email",
                vec![
                    Constraint::new(Rule::Required, "Email is required"),
                    Constraint::new(Rule::Pattern(EMAIL_RE.clone()), "Invalid email format"),
                ],
            ),
            FieldSpec::text(
                "password",
                "Password",
                vec![
                    Constraint::new(Rule::Required, "Password is required"),
                    Constraint::new(
                        Rule::MinChars(6),
                        "Password must be at least 6 characters",
                    ),
                ],
            ),
        ],
    )
}

/// The login screen: controller plus credential persistence and feedback.
///
/// On success the returned token is written to the injected [`TokenStore`]
/// and a navigation to [`POST_LOGIN_ROUTE`] is scheduled.
pub struct LoginFlow<A: SubmissionApi> {
    controller: FormController,
    api: A,
    credentials: Arc<dyn TokenStore>,
    feedback: FeedbackDispatcher,
    pending_navigation: Option<JoinHandle<()>>,
}

impl<A: SubmissionApi> LoginFlow<A> {
    pub fn new(
        api: A,
        credentials: Arc<dyn TokenStore>,
        sink: Arc<dyn NotificationSink>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let feedback = FeedbackDispatcher::new(sink, "Login successful!", "Login failed.")
            .with_navigation(navigator, POST_LOGIN_ROUTE, POST_LOGIN_DELAY);
        Self {
            controller: FormController::new(login_form()),
            api,
            credentials,
            feedback,
            pending_navigation: None,
        }
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FormController {
        &mut self.controller
    }

    pub fn set_email(&mut self, email: &str) {
        self.controller
            .set_field("email", FieldValue::Text(email.to_string()));
    }

    pub fn set_password(&mut self, password: &str) {
        self.controller
            .set_field("password", FieldValue::Text(password.to_string()));
    }

    /// Validate and submit. On success, persist the credential and surface
    /// feedback; on failure, surface the classified message.
    pub async fn submit(&mut self) -> SubmissionOutcome {
        let outcome = self.controller.submit(&self.api).await;
        if let SubmissionOutcome::Completed(result) = &outcome {
            if let SubmissionResult::Success(payload) = result {
                if let Some(token) = &payload.token {
                    self.credentials.set(token.clone());
                }
            }
            self.pending_navigation = self.feedback.notify(result);
        }
        outcome
    }

    /// Handle of the navigation scheduled by the last successful submit
    pub fn pending_navigation(&self) -> Option<&JoinHandle<()>> {
        self.pending_navigation.as_ref()
    }

    /// Take ownership of the scheduled navigation, e.g. to await it
    pub fn take_navigation(&mut self) -> Option<JoinHandle<()>> {
        self.pending_navigation.take()
    }

    /// Tear down the screen: discard any in-flight completion and abort a
    /// not-yet-fired navigation
    pub fn dispose(&mut self) {
        self.controller.dispose();
        if let Some(handle) = self.pending_navigation.take() {
            handle.abort();
        }
    }
}
