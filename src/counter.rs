//! Request accounting
//!
//! Every outbound HTTP call a client makes is counted. The counter belongs
//! to one client instance and is shared by all of its clones and iterators;
//! unrelated clients each carry their own. Increment and read go through the
//! same lock so concurrent call paths cannot lose updates.

use std::sync::{Arc, Mutex};

/// Count of HTTP calls issued by one client instance
#[derive(Debug, Clone, Default)]
pub struct RequestCounter {
    count: Arc<Mutex<u64>>,
}

impl RequestCounter {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one outbound call and return the new total
    pub fn increment(&self) -> u64 {
        let mut count = self.count.lock().unwrap_or_else(|e| e.into_inner());
        *count += 1;
        *count
    }

    /// Current number of calls issued
    pub fn get(&self) -> u64 {
        *self.count.lock().unwrap_or_else(|e| e.into_inner())
    }
}
