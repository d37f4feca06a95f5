//! Sliding-window rate limiter for player-initiated actions.
//!
//! The time source is the injectable `GameClock`, so tests simulate
//! elapsed time instead of sleeping.

use bevy::prelude::*;
use std::collections::{HashMap, VecDeque};

use crate::shared::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionClass {
    Buy,
    Sell,
    UseItem,
    Craft,
}

impl ActionClass {
    pub fn label(self) -> &'static str {
        match self {
            ActionClass::Buy => "buy",
            ActionClass::Sell => "sell",
            ActionClass::UseItem => "use",
            ActionClass::Craft => "craft",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    pub max_actions: usize,
    pub window_secs: f64,
}

/// Per-action-class sliding window. Only successful operations are
/// recorded; a rejected attempt does not consume budget.
#[derive(Resource, Debug, Clone)]
pub struct ActionRateLimiter {
    limits: HashMap<ActionClass, RateLimit>,
    history: HashMap<ActionClass, VecDeque<f64>>,
}

impl Default for ActionRateLimiter {
    fn default() -> Self {
        let mut limits = HashMap::new();
        limits.insert(
            ActionClass::Buy,
            RateLimit {
                max_actions: 5,
                window_secs: 10.0,
            },
        );
        limits.insert(
            ActionClass::Sell,
            RateLimit {
                max_actions: 5,
                window_secs: 10.0,
            },
        );
        limits.insert(
            ActionClass::UseItem,
            RateLimit {
                max_actions: 10,
                window_secs: 10.0,
            },
        );
        limits.insert(
            ActionClass::Craft,
            RateLimit {
                max_actions: 5,
                window_secs: 10.0,
            },
        );
        Self {
            limits,
            history: HashMap::new(),
        }
    }
}

impl ActionRateLimiter {
    /// Rejects with `RateLimited` if the class has exhausted its window.
    pub fn check(&mut self, class: ActionClass, now: f64) -> Result<(), EngineError> {
        let Some(limit) = self.limits.get(&class).copied() else {
            return Ok(());
        };
        let window = self.history.entry(class).or_default();
        while window
            .front()
            .is_some_and(|&t| now - t >= limit.window_secs)
        {
            window.pop_front();
        }
        if window.len() >= limit.max_actions {
            let oldest = window.front().copied().unwrap_or(now);
            let wait = (limit.window_secs - (now - oldest)).max(0.0);
            return Err(EngineError::RateLimited(format!(
                "too many {} actions — try again in {:.0}s",
                class.label(),
                wait.ceil()
            )));
        }
        Ok(())
    }

    /// Records a successful action against its window.
    pub fn record(&mut self, class: ActionClass, now: f64) {
        self.history.entry(class).or_default().push_back(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_limit_then_rejects() {
        let mut limiter = ActionRateLimiter::default();
        for i in 0..5 {
            assert!(limiter.check(ActionClass::Buy, i as f64 * 0.1).is_ok());
            limiter.record(ActionClass::Buy, i as f64 * 0.1);
        }
        let err = limiter.check(ActionClass::Buy, 1.0).unwrap_err();
        assert!(matches!(err, EngineError::RateLimited(_)));
    }

    #[test]
    fn test_window_slides_open_again() {
        let mut limiter = ActionRateLimiter::default();
        for _ in 0..5 {
            limiter.record(ActionClass::Buy, 0.0);
        }
        assert!(limiter.check(ActionClass::Buy, 5.0).is_err());
        assert!(limiter.check(ActionClass::Buy, 10.0).is_ok());
    }

    #[test]
    fn test_classes_are_independent() {
        let mut limiter = ActionRateLimiter::default();
        for _ in 0..5 {
            limiter.record(ActionClass::Buy, 0.0);
        }
        assert!(limiter.check(ActionClass::Buy, 1.0).is_err());
        assert!(limiter.check(ActionClass::Sell, 1.0).is_ok());
    }

    #[test]
    fn test_failed_checks_do_not_consume_budget() {
        let mut limiter = ActionRateLimiter::default();
        for _ in 0..5 {
            limiter.record(ActionClass::Craft, 0.0);
        }
        // Repeated rejected checks must not extend the lockout.
        for _ in 0..100 {
            assert!(limiter.check(ActionClass::Craft, 9.0).is_err());
        }
        assert!(limiter.check(ActionClass::Craft, 10.0).is_ok());
    }
}
