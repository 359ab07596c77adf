//! Generation stamps for asynchronous loads.
//!
//! Each load takes a ticket; only the ticket from the latest `begin` is
//! current. Results carrying an older ticket are stale and get discarded.

/// Ticket handed out when a load starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: u64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load. Outstanding tickets become stale.
    pub fn begin(&mut self) -> LoadTicket {
        self.current += 1;
        LoadTicket {
            generation: self.current,
        }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.current
    }

    /// Make every outstanding ticket stale without starting a load.
    pub fn invalidate(&mut self) {
        self.current += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_wins() {
        let mut counter = GenerationCounter::new();
        let first = counter.begin();
        let second = counter.begin();

        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
        assert!(second.generation() > first.generation());
    }

    #[test]
    fn test_invalidate_stales_everything() {
        let mut counter = GenerationCounter::new();
        let ticket = counter.begin();
        counter.invalidate();
        assert!(!counter.is_current(ticket));
    }
}
