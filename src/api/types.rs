//! Submission request/result value objects

use crate::forms::StagedFile;
use serde_json::Value;

/// One part of a multipart payload
#[derive(Debug, Clone, PartialEq)]
pub enum MultipartField {
    Text { name: String, value: String },
    File { name: String, file: StagedFile },
}

/// Encoded payload body
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionBody {
    Json(Value),
    Multipart(Vec<MultipartField>),
}

/// The finalized, validated payload ready for network transmission.
/// Constructed once per submit attempt and discarded after the call resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    /// Path relative to the API base URL
    pub endpoint: String,
    pub body: SubmissionBody,
    /// Attach the stored bearer token when true
    pub requires_auth: bool,
}

/// Coarse category assigned to a failed submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Server-side 4xx with a message
    ValidationRejected,
    /// 401 or 403
    Unauthorized,
    /// Network error or timeout
    Unreachable,
    /// 5xx
    ServerError,
    /// Anything uncategorized; surfaced with a generic fallback message
    Unexpected,
}

/// Payload of a successful submission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuccessPayload {
    /// Opaque credential token, present on login responses,
    /// to be persisted by the caller
    pub token: Option<String>,
    /// Parsed response body, when the server returned JSON
    pub body: Option<Value>,
}

/// Outcome of a single network attempt. The client never retries;
/// the caller decides whether to re-invoke.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    Success(SuccessPayload),
    Failure {
        kind: FailureKind,
        message: Option<String>,
    },
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        assert!(SubmissionResult::Success(SuccessPayload::default()).is_success());
        assert!(!SubmissionResult::Failure {
            kind: FailureKind::ServerError,
            message: None,
        }
        .is_success());
    }
}
