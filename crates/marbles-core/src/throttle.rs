use instant::Instant;
use std::time::Duration;

/// Leading-edge rate gate: the first event passes, then everything inside
/// `interval` of the last admitted event is dropped.
#[derive(Clone, Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn per_second(max_events: u32) -> Self {
        Self::new(Duration::from_secs(1) / max_events.max(1))
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true when an event stamped `now` should be handled.
    pub fn admit(&mut self, now: Instant) -> bool {
        match self.last {
            // Out-of-order stamps count as inside the window
            Some(last) if now < last || now - last < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
