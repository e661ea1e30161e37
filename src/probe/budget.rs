//! # Consecutive-failure budget for the connectivity prober.
//!
//! The budget starts full; every failed probe spends one unit and every
//! successful probe refills it. Exhaustion is reported exactly once, on the
//! failure that spends the last unit.
//!
//! ## Example
//! ```rust
//! use sharif_net::RetryBudget;
//!
//! let mut budget = RetryBudget::new(2);
//! assert!(!budget.record_failure());
//! budget.reset();
//! assert!(!budget.record_failure());
//! assert!(budget.record_failure()); // second consecutive failure
//! assert!(!budget.record_failure()); // already exhausted, no second signal
//! ```

/// Fixed-size retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    initial: u32,
    remaining: u32,
}

impl RetryBudget {
    /// Creates a full budget (`initial` is clamped to 1).
    pub fn new(initial: u32) -> Self {
        let initial = initial.max(1);
        Self {
            initial,
            remaining: initial,
        }
    }

    /// Refills the budget after a successful probe.
    #[inline]
    pub fn reset(&mut self) {
        self.remaining = self.initial;
    }

    /// Spends one unit; returns `true` iff this failure exhausted the budget.
    pub fn record_failure(&mut self) -> bool {
        match self.remaining {
            0 => false,
            1 => {
                self.remaining = 0;
                true
            }
            n => {
                self.remaining = n - 1;
                false
            }
        }
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausts_on_fifth_consecutive_failure() {
        let mut budget = RetryBudget::new(5);
        let fired: Vec<bool> = (0..7).map(|_| budget.record_failure()).collect();
        assert_eq!(fired, [false, false, false, false, true, false, false]);
        assert_eq!(budget.remaining(), 0);
    }

    #[test]
    fn success_restores_full_budget() {
        let mut budget = RetryBudget::new(5);
        for _ in 0..4 {
            assert!(!budget.record_failure());
        }
        assert_eq!(budget.remaining(), 1);
        budget.reset();
        assert_eq!(budget.remaining(), 5);
        for _ in 0..4 {
            assert!(!budget.record_failure());
        }
        assert!(budget.record_failure());
    }

    #[test]
    fn zero_budget_is_clamped() {
        let mut budget = RetryBudget::new(0);
        assert!(budget.record_failure());
    }
}
