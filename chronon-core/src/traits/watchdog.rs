//! Watchdog abstraction

/// Liveness watchdog, poked once per processed tick
pub trait Watchdog {
    /// Refresh the watchdog counter.
    fn feed(&mut self);
}
