//! Console notifications.
//!
//! Blocking errors go to stderr, successes to stdout.

pub mod mock;

use std::io::Write;

use tracing::debug;

use crate::application::notify::Notifier;

/// Prints notifications for an operator at a terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn report_error(&self, message: &str) {
        // A closed stderr leaves nothing else to report to.
        let _ = writeln!(std::io::stderr().lock(), "error: {message}");
    }

    fn report_success(&self, message: &str) {
        debug!(message, "success reported");
        let _ = writeln!(std::io::stdout().lock(), "{message}");
    }
}
