//! Millisecond tick source
//!
//! The bus engine and flash store bound their busy-polls with
//! millisecond deadlines. Rather than asking for absolute timestamps,
//! this trait models the counter-overflow-flag idiom: restart, then
//! ask "has another millisecond passed?" on every poll iteration.

/// Millisecond-granularity elapsed-tick source
pub trait TickTimer {
    /// Restart the millisecond counter.
    fn restart(&mut self);

    /// True once per elapsed millisecond since `restart`.
    ///
    /// Callers accumulate the returned ticks into their own deadline
    /// counter while spinning on a status flag.
    fn tick_elapsed(&mut self) -> bool;
}
