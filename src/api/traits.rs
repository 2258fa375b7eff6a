//! Trait abstraction for the submission client to enable mocking in tests

use super::types::{SubmissionRequest, SubmissionResult};
use async_trait::async_trait;

/// A single-attempt submission transport.
///
/// The one suspension point in the pipeline. Implementations classify every
/// failure into a [`SubmissionResult`](super::SubmissionResult); transport
/// errors never escape this boundary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionApi: Send + Sync {
    /// Perform the HTTP POST described by the request
    async fn submit(&self, request: SubmissionRequest) -> SubmissionResult;
}
