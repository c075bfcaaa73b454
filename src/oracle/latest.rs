//! Last-request-wins guard for in-flight oracle calls.
//!
//! The patient can keep editing symptoms while a suggestion request is in
//! flight; every edit may start a fresh request. A stale response arriving
//! after a newer request has begun must be discarded, never queued. Each
//! call takes a ticket from the shared sequence; before applying a result,
//! the caller checks that its ticket is still the current one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    current: Arc<AtomicU64>,
}

#[derive(Debug, Clone)]
pub struct RequestTicket {
    current: Arc<AtomicU64>,
    generation: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request generation, invalidating every earlier ticket.
    pub fn begin(&self) -> RequestTicket {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket {
            current: Arc::clone(&self.current),
            generation,
        }
    }
}

impl RequestTicket {
    /// Whether this ticket still represents the newest request.
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ticket_is_current() {
        let seq = RequestSequence::new();
        let ticket = seq.begin();
        assert!(ticket.is_current());
    }

    #[test]
    fn newer_request_invalidates_older_ticket() {
        let seq = RequestSequence::new();
        let first = seq.begin();
        let second = seq.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn tickets_stay_invalid_forever() {
        let seq = RequestSequence::new();
        let first = seq.begin();
        let _second = seq.begin();
        let _third = seq.begin();
        assert!(!first.is_current());
    }
}
