/// Leading-edge time throttle: fires at most once per `interval_ms` and drops
/// everything in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Throttle {
    interval_ms: u64,
    last_fired_ms: Option<u64>,
}

impl Throttle {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_fired_ms: None,
        }
    }

    /// Returns true (and starts a new window) when a call at `now_ms` may run.
    pub fn ready(&mut self, now_ms: u64) -> bool {
        match self.last_fired_ms {
            Some(last) if now_ms.saturating_sub(last) < self.interval_ms => false,
            _ => {
                self.last_fired_ms = Some(now_ms);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Throttle;

    #[test]
    fn drops_calls_inside_the_window() {
        let mut throttle = Throttle::new(16);
        assert!(throttle.ready(0));
        assert!(!throttle.ready(1));
        assert!(!throttle.ready(15));
        assert!(throttle.ready(16));
        assert!(!throttle.ready(20));
        assert!(throttle.ready(100));
    }

    #[test]
    fn zero_interval_never_throttles() {
        let mut throttle = Throttle::new(0);
        assert!(throttle.ready(5));
        assert!(throttle.ready(5));
    }
}
