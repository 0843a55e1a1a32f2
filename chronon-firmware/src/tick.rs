//! Millisecond tick source over the embassy monotonic clock

use chronon_hal::TickTimer;
use embassy_time::{Duration, Instant};

const ONE_MS: Duration = Duration::from_millis(1);

pub struct MillisTimer {
    last: Instant,
}

impl MillisTimer {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl TickTimer for MillisTimer {
    fn restart(&mut self) {
        self.last = Instant::now();
    }

    fn tick_elapsed(&mut self) -> bool {
        if Instant::now() - self.last >= ONE_MS {
            self.last += ONE_MS;
            true
        } else {
            false
        }
    }
}
