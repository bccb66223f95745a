//! Operator notifications.
//!
//! Errors from user-initiated actions are *blocking*: the operator must see
//! them before carrying on.  Successes are informational.  Background polling
//! never notifies; it only logs.

/// Notification sink injected into the lifecycle controller and the catalog
/// refresher.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Reports a blocking error (validation, application, or transport).
    fn report_error(&self, message: &str);

    /// Reports a non-blocking success.
    fn report_success(&self, message: &str);
}
