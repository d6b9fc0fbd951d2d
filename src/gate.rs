//! In-flight request gate
//!
//! The original pages only toggled a loading overlay while a request ran, so
//! rapid double-clicks could fire overlapping requests. Controllers here hold
//! a [`Gate`] instead: an operation that cannot acquire it reports "busy" and
//! returns before touching the network.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Toast shown when an operation is rejected because another is in flight.
pub const BUSY_MESSAGE: &str = "A request is already in progress";

/// One-slot gate shared by all operations of a controller.
#[derive(Clone, Default)]
pub struct Gate {
    in_flight: Arc<AtomicBool>,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to claim the gate. Returns `None` while another guard is alive.
    pub fn acquire(&self) -> Option<GateGuard> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Some(GateGuard {
                in_flight: self.in_flight.clone(),
            })
        } else {
            None
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Releases the gate on drop, including early returns and error paths.
pub struct GateGuard {
    in_flight: Arc<AtomicBool>,
}

impl Drop for GateGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}
