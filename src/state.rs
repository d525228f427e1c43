use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Request counters shared by every connection.
#[derive(Default)]
pub struct State {
    encoded: AtomicU64,
    decoded: AtomicU64,
    rejected: AtomicU64,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Statistics {
    pub encoded: u64,
    pub decoded: u64,
    pub rejected: u64,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_encoded(&self) {
        self.encoded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_decoded(&self) {
        self.decoded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            encoded: self.encoded.load(Ordering::Relaxed),
            decoded: self.decoded.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}
