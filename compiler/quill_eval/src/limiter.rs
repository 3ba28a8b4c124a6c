//! Consumable render budgets.
//!
//! Two kinds share one type: a unit counter (allocation units charged by
//! range expansion and similar) and a wall-clock deadline. Both are shared
//! by `Rc` across a context and every context spawned from it, so a whole
//! render tree draws from one budget. Exhaustion is terminal: nothing resets
//! a limiter.

use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::errors::{resource_exceeded, EvalResult};

/// Resource name reported by memory limiters.
pub const MEMORY: &str = "memory alloc";
/// Resource name reported by render-time limiters.
pub const RENDER: &str = "template render";

#[derive(Debug)]
enum Budget {
    Unbounded,
    Units { limit: u64, used: Cell<u64> },
    Deadline(Instant),
}

/// A budget that fails the render once exceeded.
#[derive(Debug)]
pub struct Limiter {
    resource: &'static str,
    budget: Budget,
}

impl Limiter {
    /// A limiter that never trips.
    pub fn unbounded(resource: &'static str) -> Self {
        Limiter {
            resource,
            budget: Budget::Unbounded,
        }
    }

    /// A unit counter allowing at most `limit` units in total.
    pub fn memory(limit: u64) -> Self {
        Limiter {
            resource: MEMORY,
            budget: Budget::Units {
                limit,
                used: Cell::new(0),
            },
        }
    }

    /// A deadline `budget` from now. A budget too large to represent is
    /// treated as unbounded.
    pub fn render_deadline(budget: Duration) -> Self {
        let budget = match Instant::now().checked_add(budget) {
            Some(deadline) => Budget::Deadline(deadline),
            None => Budget::Unbounded,
        };
        Limiter {
            resource: RENDER,
            budget,
        }
    }

    #[inline]
    pub fn resource(&self) -> &'static str {
        self.resource
    }

    /// Units consumed so far (always zero for deadlines).
    pub fn used(&self) -> u64 {
        match &self.budget {
            Budget::Units { used, .. } => used.get(),
            Budget::Unbounded | Budget::Deadline(_) => 0,
        }
    }

    /// Charge `count` units, then check.
    ///
    /// Deadline and unbounded limiters ignore the charge.
    pub fn use_units(&self, count: u64) -> EvalResult<()> {
        if let Budget::Units { used, .. } = &self.budget {
            used.set(used.get().saturating_add(count));
        }
        self.check()
    }

    /// Fail if the budget is already exceeded.
    pub fn check(&self) -> EvalResult<()> {
        let exceeded = match &self.budget {
            Budget::Unbounded => false,
            Budget::Units { limit, used } => used.get() > *limit,
            Budget::Deadline(deadline) => Instant::now() > *deadline,
        };
        if exceeded {
            tracing::debug!(resource = self.resource, "limiter exhausted");
            return Err(resource_exceeded(self.resource));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
