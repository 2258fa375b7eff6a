//! Autolot client - validated submission pipeline for the Autolot
//! marketplace API
//!
//! Two screens share one linear pipeline: user input flows into a
//! [`forms::FormController`], is checked against a declarative
//! [`schema::FormDefinition`] on submit, and, when valid, is handed to a
//! [`api::SubmissionApi`] as a JSON or multipart POST. The classified result
//! is surfaced through a [`feedback::FeedbackDispatcher`] as transient
//! toasts, with an optional delayed navigation. Credentials live behind an
//! injected [`credentials::TokenStore`] capability.

pub mod api;
pub mod config;
pub mod credentials;
pub mod feedback;
pub mod forms;
pub mod schema;

pub use api::{FailureKind, HttpSubmissionClient, SubmissionApi, SubmissionRequest, SubmissionResult};
pub use config::ClientConfig;
pub use credentials::{FileTokenStore, InMemoryTokenStore, TokenStore};
pub use feedback::{BufferedSink, FeedbackDispatcher, Navigator, NotificationSink, Severity, Toast};
pub use forms::{
    FieldValue, FormController, FormState, LoginFlow, Phase, StagedFile, SubmissionOutcome,
    VehicleFlow,
};
pub use schema::{ErrorState, FieldSpec, FormDefinition};
