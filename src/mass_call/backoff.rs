//! Fibonacci backoff between totally failed windows.

use std::time::Duration;

/// Fibonacci delay sequence.
///
/// Starting from the pair `(0, 1)`, every call to
/// [`next_multiplier`](Self::next_multiplier) returns `a + b` and advances the
/// pair to `(b, a + b)`, producing 1, 2, 3, 5, 8, ...
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use crystallize_api::mass_call::FibonacciBackoff;
///
/// let mut backoff = FibonacciBackoff::new();
/// assert_eq!(backoff.next_delay(Duration::from_secs(1)), Duration::from_secs(1));
/// assert_eq!(backoff.next_delay(Duration::from_secs(1)), Duration::from_secs(2));
/// assert_eq!(backoff.next_delay(Duration::from_secs(1)), Duration::from_secs(3));
///
/// backoff.reset();
/// assert_eq!(backoff.next_multiplier(), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FibonacciBackoff {
    a: u64,
    b: u64,
}

impl Default for FibonacciBackoff {
    fn default() -> Self {
        Self::new()
    }
}

impl FibonacciBackoff {
    /// Creates a backoff seeded at `(0, 1)`.
    #[must_use]
    pub const fn new() -> Self {
        Self { a: 0, b: 1 }
    }

    /// Returns the next multiplier and advances the sequence.
    pub fn next_multiplier(&mut self) -> u64 {
        let next = self.a.saturating_add(self.b);
        self.a = self.b;
        self.b = next;
        next
    }

    /// Returns the next delay, `unit` times the next multiplier.
    pub fn next_delay(&mut self, unit: Duration) -> Duration {
        let multiplier = u32::try_from(self.next_multiplier()).unwrap_or(u32::MAX);
        unit.saturating_mul(multiplier)
    }

    /// Returns the sequence to `(0, 1)`.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns `true` if no delay was handed out since the last reset.
    #[must_use]
    pub const fn is_reset(&self) -> bool {
        self.a == 0 && self.b == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_fibonacci() {
        let mut backoff = FibonacciBackoff::new();
        let sequence: Vec<u64> = (0..8).map(|_| backoff.next_multiplier()).collect();
        assert_eq!(sequence, vec![1, 2, 3, 5, 8, 13, 21, 34]);
    }

    #[test]
    fn test_delays_scale_with_unit() {
        let mut backoff = FibonacciBackoff::new();
        let unit = Duration::from_millis(10);
        assert_eq!(backoff.next_delay(unit), Duration::from_millis(10));
        assert_eq!(backoff.next_delay(unit), Duration::from_millis(20));
        assert_eq!(backoff.next_delay(unit), Duration::from_millis(30));
        assert_eq!(backoff.next_delay(unit), Duration::from_millis(50));
    }

    #[test]
    fn test_reset_restarts_sequence() {
        let mut backoff = FibonacciBackoff::new();
        backoff.next_multiplier();
        backoff.next_multiplier();
        assert!(!backoff.is_reset());

        backoff.reset();
        assert!(backoff.is_reset());
        assert_eq!(backoff.next_multiplier(), 1);
    }

    #[test]
    fn test_sequence_saturates_instead_of_overflowing() {
        let mut backoff = FibonacciBackoff::new();
        for _ in 0..200 {
            backoff.next_multiplier();
        }
        assert_eq!(backoff.next_multiplier(), u64::MAX);
    }
}
