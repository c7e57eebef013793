//! Mount tracking for async response handlers.
//!
//! Requests are never cancelled. A widget that unmounts while a request is
//! outstanding must not apply the late response, so every handler checks
//! its [`MountGuard`] before touching state. A widget that reloads on
//! demand also holds a [`LoadGate`] so only the newest load is applied.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Shared flag cleared when the owning widget unmounts.
#[derive(Debug, Clone)]
pub struct MountGuard {
    mounted: Arc<AtomicBool>,
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl MountGuard {
    pub fn new() -> Self {
        Self {
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Mark the widget gone. Idempotent.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }

    /// Run `apply` only while still mounted. Returns whether it ran.
    pub fn apply<F: FnOnce()>(&self, apply: F) -> bool {
        if self.is_mounted() {
            apply();
            true
        } else {
            tracing::debug!("dropping response for unmounted widget");
            false
        }
    }
}

/// Orders reloads of one widget. Each load takes a [`LoadTicket`]; starting
/// a newer load retires every older ticket.
#[derive(Debug, Clone, Default)]
pub struct LoadGate {
    latest: Arc<AtomicU64>,
}

impl LoadGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load, superseding any load still in flight.
    pub fn begin(&self) -> LoadTicket {
        let generation = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        LoadTicket {
            generation,
            latest: Arc::clone(&self.latest),
        }
    }
}

/// Permission to publish the result of one load.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::Acquire) == self.generation
    }

    /// Run `apply` only if no newer load has started. Returns whether it ran.
    pub fn apply<F: FnOnce()>(&self, apply: F) -> bool {
        if self.is_current() {
            apply();
            true
        } else {
            tracing::debug!(generation = self.generation, "dropping superseded load");
            false
        }
    }
}
