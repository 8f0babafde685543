use std::time::{Duration, Instant};

use guru::FrameClock;
use spin_sleep::SpinSleeper;
use tracing::trace;

/// Software vblank: edges every `period` from construction.
pub struct PacedClock {
    period: Duration,
    next: Instant,
    sleeper: SpinSleeper,
    missed: u64,
}

impl PacedClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next: Instant::now() + period,
            sleeper: SpinSleeper::default(),
            missed: 0,
        }
    }

    /// Edges that passed while nobody was waiting.
    pub fn missed(&self) -> u64 {
        self.missed
    }
}

impl FrameClock for PacedClock {
    fn wait_next_frame(&mut self) {
        let now = Instant::now();
        while self.next <= now {
            self.next += self.period;
            self.missed += 1;
            trace!("missed vblank, {} so far", self.missed);
        }

        self.sleeper.sleep(self.next - now);
        self.next += self.period;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_out_each_period() {
        let period = Duration::from_millis(2);
        let mut clock = PacedClock::new(period);
        let start = Instant::now();

        for _ in 0..5 {
            clock.wait_next_frame();
        }
        assert!(start.elapsed() >= period * 4);
    }

    #[test]
    fn late_caller_skips_to_the_following_edge() {
        let period = Duration::from_millis(2);
        let mut clock = PacedClock::new(period);

        std::thread::sleep(period * 3);
        clock.wait_next_frame();
        assert!(clock.missed() >= 2);
    }
}
