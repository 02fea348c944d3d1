//! Tick scheduling handles.
//!
//! The session owns a [`TickSchedule`] and decides when ticking starts, stops
//! or changes speed. Every (re)install bumps the generation, and the session
//! drops ticks carrying any other generation, so a tick queued under an old
//! interval can never land after the new one is installed.
//!
//! [`Ticker`] is the wall-clock side used by the frontend loop. It follows
//! whatever handle the session currently exposes.

use std::time::{Duration, Instant};

/// Identifies one installed periodic tick source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickHandle {
    pub interval_ms: u64,
    pub generation: u64,
}

impl TickHandle {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// At most one active handle at a time.
#[derive(Debug, Clone, Default)]
pub struct TickSchedule {
    active: Option<TickHandle>,
    next_generation: u64,
}

impl TickSchedule {
    /// Replace any active handle with a fresh one at `interval_ms`.
    pub fn install(&mut self, interval_ms: u64) -> TickHandle {
        let handle = TickHandle {
            interval_ms,
            generation: self.next_generation,
        };
        self.next_generation += 1;
        self.active = Some(handle);
        handle
    }

    pub fn cancel(&mut self) -> Option<TickHandle> {
        self.active.take()
    }

    pub fn active(&self) -> Option<TickHandle> {
        self.active
    }

    pub fn accepts(&self, handle: TickHandle) -> bool {
        self.active == Some(handle)
    }
}

/// Wall-clock driver for the active handle.
#[derive(Debug, Default)]
pub struct Ticker {
    installed: Option<TickHandle>,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow the session's current handle. A different handle (new speed or
    /// resume) restarts the countdown from `now`; `None` stops ticking.
    pub fn sync(&mut self, handle: Option<TickHandle>, now: Instant) {
        if self.installed == handle {
            return;
        }
        self.installed = handle;
        self.next_due = handle.map(|h| now + h.interval());
    }

    /// Fire at most one tick if the deadline has passed.
    ///
    /// After a long stall the next deadline is pushed to `now + interval`
    /// rather than replaying every missed tick.
    pub fn poll(&mut self, now: Instant) -> Option<TickHandle> {
        let handle = self.installed?;
        let due = self.next_due?;
        if now < due {
            return None;
        }
        let mut next = due + handle.interval();
        if next <= now {
            next = now + handle.interval();
        }
        self.next_due = Some(next);
        Some(handle)
    }

    /// How long the frontend may block waiting for input, capped at `idle`.
    pub fn timeout(&self, now: Instant, idle: Duration) -> Duration {
        match self.next_due {
            Some(due) => due.saturating_duration_since(now).min(idle),
            None => idle,
        }
    }

    pub fn installed(&self) -> Option<TickHandle> {
        self.installed
    }
}
