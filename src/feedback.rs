//! Transient user-facing feedback and follow-on navigation
//!
//! Surfaces submission results as fire-and-forget toasts and, for flows that
//! configure it, schedules a one-time navigation after a delay so the toast
//! has a moment to render first.

use crate::api::SubmissionResult;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A transient notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub severity: Severity,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Toast {
    fn new(severity: Severity, message: String) -> Self {
        Self {
            severity,
            message,
            at: Utc::now(),
        }
    }
}

/// Receives toasts; implemented by whatever surface renders them
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send + Sync {
    fn push(&self, toast: Toast);
}

/// Performs screen navigation
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Queue-backed sink for frontends that poll pending toasts each frame
#[derive(Default)]
pub struct BufferedSink {
    queue: Mutex<VecDeque<Toast>>,
}

impl BufferedSink {
    /// Take the oldest pending toast, if any
    pub fn pop(&self) -> Option<Toast> {
        self.queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for BufferedSink {
    fn push(&self, toast: Toast) {
        self.queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(toast);
    }
}

/// A navigation to perform after a delay once a submission succeeds
#[derive(Clone)]
struct NavigationPlan {
    route: String,
    delay: Duration,
    navigator: Arc<dyn Navigator>,
}

/// Turns submission results into toasts and scheduled navigation.
///
/// Notifications are fire-and-forget; nothing in the pipeline consumes a
/// return value from them.
pub struct FeedbackDispatcher {
    sink: Arc<dyn NotificationSink>,
    success_message: String,
    /// Shown when a failure carries no server message
    failure_fallback: String,
    navigate_on_success: Option<NavigationPlan>,
}

impl FeedbackDispatcher {
    pub fn new(
        sink: Arc<dyn NotificationSink>,
        success_message: &str,
        failure_fallback: &str,
    ) -> Self {
        Self {
            sink,
            success_message: success_message.to_string(),
            failure_fallback: failure_fallback.to_string(),
            navigate_on_success: None,
        }
    }

    /// Schedule a one-time navigation after `delay` on every success
    pub fn with_navigation(
        mut self,
        navigator: Arc<dyn Navigator>,
        route: &str,
        delay: Duration,
    ) -> Self {
        self.navigate_on_success = Some(NavigationPlan {
            route: route.to_string(),
            delay,
            navigator,
        });
        self
    }

    /// Surface a submission result.
    ///
    /// Returns the handle of the scheduled navigation task, if one was
    /// spawned, so an unmounting screen can abort it.
    pub fn notify(&self, result: &SubmissionResult) -> Option<JoinHandle<()>> {
        match result {
            SubmissionResult::Success(_) => {
                self.sink
                    .push(Toast::new(Severity::Success, self.success_message.clone()));
                self.navigate_on_success.as_ref().map(|plan| {
                    let plan = plan.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(plan.delay).await;
                        plan.navigator.navigate(&plan.route);
                    })
                })
            }
            SubmissionResult::Failure { message, kind } => {
                let message = message
                    .clone()
                    .unwrap_or_else(|| self.failure_fallback.clone());
                tracing::debug!(?kind, "surfacing failure toast");
                self.sink.push(Toast::new(Severity::Error, message));
                None
            }
        }
    }
}
