//! In-Memory Crisis Diagnostics Adapter
//!
//! Keeps the most recent reports in a bounded ring. Used by tests and by
//! operators who want to inspect crisis-path events of a running process;
//! reports vanish with the process.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::ports::{CrisisDiagnostic, CrisisDiagnostics};

const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct InMemoryCrisisDiagnostics {
    reports: Arc<Mutex<VecDeque<CrisisDiagnostic>>>,
    capacity: usize,
}

impl Default for InMemoryCrisisDiagnostics {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl InMemoryCrisisDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            reports: Arc::new(Mutex::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }

    /// Copy of the retained reports, oldest first.
    pub fn reports(&self) -> Vec<CrisisDiagnostic> {
        self.guard().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    fn guard(&self) -> MutexGuard<'_, VecDeque<CrisisDiagnostic>> {
        // A panic while holding the lock cannot leave the ring inconsistent
        match self.reports.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl CrisisDiagnostics for InMemoryCrisisDiagnostics {
    fn report(&self, diagnostic: CrisisDiagnostic) {
        let mut reports = self.guard();
        reports.push_back(diagnostic);
        while reports.len() > self.capacity {
            reports.pop_front();
        }
    }
}
