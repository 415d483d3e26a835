//! Circuit breaker guarding the upstream data provider.
//!
//! Yahoo bans IPs that hammer its endpoints. After an outright block
//! (HTTP 403) or enough consecutive failures the breaker opens and refuses
//! all requests until the cooldown elapses.

use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
enum Gate {
    Closed { failures: u32 },
    Open { since: Instant },
}

/// Breaker with a failure threshold and a fixed cooldown.
#[derive(Debug)]
pub struct CircuitBreaker {
    gate: Mutex<Gate>,
    cooldown: Duration,
    trip_after: u32,
}

impl CircuitBreaker {
    pub fn new(cooldown: Duration, trip_after: u32) -> Self {
        Self {
            gate: Mutex::new(Gate::Closed { failures: 0 }),
            cooldown,
            trip_after,
        }
    }

    /// Provider default: 30-minute cooldown, opens after 3 consecutive failures.
    pub fn default_policy() -> Self {
        Self::new(Duration::from_secs(30 * 60), 3)
    }

    /// Whether a request may go out. An expired cooldown closes the gate.
    pub fn allows(&self) -> bool {
        let mut gate = self.gate.lock().unwrap();
        match *gate {
            Gate::Closed { .. } => true,
            Gate::Open { since } => {
                if since.elapsed() >= self.cooldown {
                    *gate = Gate::Closed { failures: 0 };
                    true
                } else {
                    false
                }
            }
        }
    }

    /// A successful request resets the failure count.
    pub fn on_success(&self) {
        let mut gate = self.gate.lock().unwrap();
        if let Gate::Closed { .. } = *gate {
            *gate = Gate::Closed { failures: 0 };
        }
    }

    /// Record a failed request; opens the gate at the threshold.
    pub fn on_failure(&self) {
        let mut gate = self.gate.lock().unwrap();
        if let Gate::Closed { failures } = *gate {
            let failures = failures + 1;
            *gate = if failures >= self.trip_after {
                Gate::Open {
                    since: Instant::now(),
                }
            } else {
                Gate::Closed { failures }
            };
        }
    }

    /// Open immediately (HTTP 403 / IP ban).
    pub fn open_now(&self) {
        *self.gate.lock().unwrap() = Gate::Open {
            since: Instant::now(),
        };
    }

    /// Remaining cooldown; zero when the gate is closed.
    pub fn cooldown_left(&self) -> Duration {
        match *self.gate.lock().unwrap() {
            Gate::Closed { .. } => Duration::ZERO,
            Gate::Open { since } => self.cooldown.saturating_sub(since.elapsed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        let breaker = CircuitBreaker::new(Duration::from_secs(60), 3);
        assert!(breaker.allows());
        assert_eq!(breaker.cooldown_left(), Duration::ZERO);
    }

    #[test]
    fn opens_at_failure_threshold() {
        let breaker = CircuitBreaker::new(Duration::from_secs(60), 3);
        breaker.on_failure();
        breaker.on_failure();
        assert!(breaker.allows());
        breaker.on_failure();
        assert!(!breaker.allows());
    }

    #[test]
    fn success_resets_failure_count() {
        let breaker = CircuitBreaker::new(Duration::from_secs(60), 3);
        breaker.on_failure();
        breaker.on_failure();
        breaker.on_success();
        breaker.on_failure();
        assert!(breaker.allows());
    }

    #[test]
    fn open_now_blocks_immediately() {
        let breaker = CircuitBreaker::new(Duration::from_secs(60), 3);
        breaker.open_now();
        assert!(!breaker.allows());
        assert!(breaker.cooldown_left() > Duration::ZERO);
    }

    #[test]
    fn closes_after_cooldown() {
        let breaker = CircuitBreaker::new(Duration::from_millis(10), 3);
        breaker.open_now();
        assert!(!breaker.allows());
        std::thread::sleep(Duration::from_millis(15));
        assert!(breaker.allows());
    }
}
