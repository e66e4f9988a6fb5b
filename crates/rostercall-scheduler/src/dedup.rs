//! Posted-date tracking.
//!
//! In-memory and monotone for the life of the process: dates are only ever
//! added, never removed, so a restart is the only way a date can be
//! announced twice.

use std::collections::HashSet;

/// Tracks which event dates (target-zone day keys) have been announced.
#[derive(Debug, Default)]
pub struct DedupTracker {
    posted: HashSet<String>,
}

impl DedupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_posted(&self, day: &str) -> bool {
        self.posted.contains(day)
    }

    /// Returns false if the date was already marked.
    pub fn mark_posted(&mut self, day: &str) -> bool {
        self.posted.insert(day.to_string())
    }

    pub fn len(&self) -> usize {
        self.posted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_and_check() {
        let mut tracker = DedupTracker::new();
        assert!(!tracker.has_posted("2026-03-01"));
        assert!(tracker.mark_posted("2026-03-01"));
        assert!(tracker.has_posted("2026-03-01"));
        assert!(!tracker.mark_posted("2026-03-01"));
        assert_eq!(tracker.len(), 1);
    }
}
