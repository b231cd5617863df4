use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket handed to a search when it is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// Orders overlapping searches so only the latest one may replace the view.
#[derive(Debug, Default)]
pub struct SearchSequencer {
    latest: AtomicU64,
}

impl SearchSequencer {
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True while no search has been dispatched after `ticket`.
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
