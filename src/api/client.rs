//! HTTP submission client for the Autolot marketplace API
//!
//! Builds JSON or multipart POST requests, attaches the stored bearer token
//! for authorized endpoints, and classifies every failure into a
//! [`SubmissionResult`]. One attempt per call; no retry.

use super::traits::SubmissionApi;
use super::types::{
    FailureKind, MultipartField, SubmissionBody, SubmissionRequest, SubmissionResult,
    SuccessPayload,
};
use crate::config::ClientConfig;
use crate::credentials::TokenStore;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{multipart, StatusCode};
use serde_json::Value;
use std::sync::Arc;

/// Client for communicating with the marketplace backend
pub struct HttpSubmissionClient {
    http: reqwest::Client,
    base_url: String,
    /// Injected credential capability; read before each authorized request
    credentials: Arc<dyn TokenStore>,
}

impl HttpSubmissionClient {
    /// Create a new client from configuration
    pub fn new(config: &ClientConfig, credentials: Arc<dyn TokenStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url(),
            credentials,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

#[async_trait]
impl SubmissionApi for HttpSubmissionClient {
    async fn submit(&self, request: SubmissionRequest) -> SubmissionResult {
        tracing::debug!(endpoint = %request.endpoint, "dispatching submission");

        let mut builder = self.http.post(self.url(&request.endpoint));
        builder = match request.body {
            SubmissionBody::Json(value) => builder.json(&value),
            SubmissionBody::Multipart(fields) => {
                let mut form = multipart::Form::new();
                for field in fields {
                    form = match field {
                        MultipartField::Text { name, value } => form.text(name, value),
                        MultipartField::File { name, file } => {
                            let part = multipart::Part::bytes(file.bytes.clone())
                                .file_name(file.file_name.clone());
                            // Fall back to an untyped part on a malformed mime.
                            let part = part.mime_str(&file.content_type).unwrap_or_else(|_| {
                                multipart::Part::bytes(file.bytes).file_name(file.file_name)
                            });
                            form.part(name, part)
                        }
                    };
                }
                builder.multipart(form)
            }
        };

        if request.requires_auth {
            if let Some(token) = self.credentials.get() {
                builder = builder.bearer_auth(token);
            }
        }

        match builder.send().await {
            Ok(response) => classify_response(response).await,
            Err(error) => {
                let kind = classify_transport(&error);
                tracing::warn!(endpoint = %request.endpoint, %error, ?kind, "submission failed");
                SubmissionResult::Failure {
                    kind,
                    message: None,
                }
            }
        }
    }
}

async fn classify_response(response: reqwest::Response) -> SubmissionResult {
    let status = response.status();
    if status.is_success() {
        let body: Option<Value> = response.json().await.ok();
        let token = body
            .as_ref()
            .and_then(|v| v.get("token"))
            .and_then(Value::as_str)
            .map(str::to_string);
        if token.is_some() {
            tracing::info!("login succeeded; credential received");
        }
        return SubmissionResult::Success(SuccessPayload { token, body });
    }

    // Servers report rejections as {"message": "..."}.
    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string));
    let kind = classify_status(status);
    tracing::warn!(%status, ?kind, "submission rejected");
    SubmissionResult::Failure { kind, message }
}

/// Map an HTTP status to a failure classification
fn classify_status(status: StatusCode) -> FailureKind {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FailureKind::Unauthorized,
        s if s.is_client_error() => FailureKind::ValidationRejected,
        s if s.is_server_error() => FailureKind::ServerError,
        _ => FailureKind::Unexpected,
    }
}

fn classify_transport(error: &reqwest::Error) -> FailureKind {
    if error.is_timeout() || error.is_connect() {
        FailureKind::Unreachable
    } else {
        FailureKind::Unexpected
    }
}
