// Host timer capability
//
// The run loop waits on a HostTimer for its roughly-16ms frame ticks; quit
// events end the loop. IntervalTimer is the standard-library implementation
// used by the binary.

use std::thread;
use std::time::{Duration, Instant};

/// What a timer delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Run one frame
    Tick,
    /// Terminate the run loop
    Quit,
}

/// Capability trait delivering frame ticks
pub trait HostTimer {
    /// Block until the next event is due
    fn next_tick(&mut self) -> TimerEvent;
}

/// A sleep-based frame timer
///
/// Paces ticks at the configured fps. With a frame limit set it delivers
/// that many ticks and then quits, which is how headless runs terminate.
pub struct IntervalTimer {
    period: Duration,
    deadline: Option<Instant>,
    remaining_frames: Option<u64>,
}

impl IntervalTimer {
    /// Create a timer ticking at the given frames per second
    pub fn new(fps: u32) -> Self {
        IntervalTimer {
            period: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            deadline: None,
            remaining_frames: None,
        }
    }

    /// Deliver at most `frames` ticks before quitting
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.remaining_frames = Some(frames);
        self
    }
}

impl HostTimer for IntervalTimer {
    fn next_tick(&mut self) -> TimerEvent {
        if let Some(remaining) = &mut self.remaining_frames {
            if *remaining == 0 {
                return TimerEvent::Quit;
            }
            *remaining -= 1;
        }

        let now = Instant::now();
        let deadline = self.deadline.get_or_insert(now);
        if *deadline > now {
            thread::sleep(*deadline - now);
        } else if now - *deadline > self.period {
            // Fell behind by more than a frame: resynchronize instead of
            // bursting ticks
            *deadline = now;
        }
        *deadline += self.period;

        TimerEvent::Tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_limit_quits() {
        let mut timer = IntervalTimer::new(1000).with_frame_limit(2);
        assert_eq!(timer.next_tick(), TimerEvent::Tick);
        assert_eq!(timer.next_tick(), TimerEvent::Tick);
        assert_eq!(timer.next_tick(), TimerEvent::Quit);
        assert_eq!(timer.next_tick(), TimerEvent::Quit);
    }

    #[test]
    fn test_ticks_are_paced() {
        let mut timer = IntervalTimer::new(200).with_frame_limit(3);
        let start = Instant::now();
        while timer.next_tick() == TimerEvent::Tick {}
        // Three ticks at 5ms each; the first fires immediately
        assert!(start.elapsed() >= Duration::from_millis(8));
    }
}
