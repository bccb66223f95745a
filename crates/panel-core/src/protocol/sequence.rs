//! Request sequence numbers and the "latest issued wins" gate.
//!
//! # Why sequence status polls? (for beginners)
//!
//! The panel polls `GET /api/status` on a timer and also forces an extra poll
//! right after a start or stop.  Those requests can overlap.  If an older
//! request is slow and resolves *after* a newer one, applying it would roll the
//! UI back to stale data:
//!
//! ```text
//! t0  poll #4 sent ───────────────────────────────┐ (slow)
//! t1  start succeeds, poll #5 sent ──┐            │
//! t2                    #5 resolves: running=true │  applied
//! t3                                   #4 resolves: running=false  DROPPED
//! ```
//!
//! Every request takes a number from [`LatestWins::issue`] *before* it is
//! sent, and its result must pass [`LatestWins::admit`] before it is applied.
//! Issuing and admitting go through the same value, so a number handed out is
//! always newer than anything admitted before it.
//!
//! # Thread safety
//!
//! The gate is plain data: it lives next to the state it protects and is
//! consulted under the same lock as the write, so admission and application
//! happen as one step.

/// Issues request numbers and admits results in issue order, dropping any
/// that arrive after a newer one.
///
/// ```rust
/// use bridge_panel_core::protocol::LatestWins;
///
/// let mut gate = LatestWins::new();
/// let (a, b) = (gate.issue(), gate.issue());
/// assert!(gate.admit(b));
/// assert!(!gate.admit(a)); // older than b: stale
/// assert!(gate.issue() > b);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatestWins {
    issued: u64,
    last: Option<u64>,
}

impl LatestWins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next request number.
    ///
    /// Numbers start at 0 and are always greater than every number admitted
    /// so far, including ones admitted without being issued here.
    pub fn issue(&mut self) -> u64 {
        let seq = self.issued;
        self.issued = seq.saturating_add(1);
        seq
    }

    /// Returns `true` and records `seq` if it is newer than everything
    /// admitted so far; returns `false` for stale or duplicate numbers.
    pub fn admit(&mut self, seq: u64) -> bool {
        if self.last.is_some_and(|last| seq <= last) {
            tracing::debug!(seq, last = ?self.last, "dropping stale result");
            return false;
        }
        self.last = Some(seq);
        self.issued = self.issued.max(seq.saturating_add(1));
        true
    }

    /// The most recently admitted sequence number, if any.
    pub fn last_admitted(&self) -> Option<u64> {
        self.last
    }
}
