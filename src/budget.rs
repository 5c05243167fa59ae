//! Limits on how long a search may run.
//!
//! Exhaustive backtracking is exponential in the worst case, so every solve
//! carries a budget: a cap on evaluated candidates, a wall-clock limit and an
//! optional interrupt flag owned by the caller. The engine asks the budget once
//! per candidate; the clock itself is only sampled every
//! `CLOCK_CHECK_MASK + 1` candidates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Check the clock every 1024 candidates.
const CLOCK_CHECK_MASK: u64 = 0x3FF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AbortReason {
    NodeLimit,
    TimeLimit,
    Interrupted,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::NodeLimit => write!(f, "candidate limit reached"),
            AbortReason::TimeLimit => write!(f, "time limit reached"),
            AbortReason::Interrupted => write!(f, "interrupt signal received"),
        }
    }
}

/// Solver limits. `None` disables a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    pub max_nodes: Option<u64>,
    pub time_limit: Option<Duration>,
}

impl SolverConfig {
    pub const DEFAULT_MAX_NODES: u64 = 10_000_000;
    pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(30);

    pub fn unlimited() -> Self {
        Self {
            max_nodes: None,
            time_limit: None,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_nodes: Some(Self::DEFAULT_MAX_NODES),
            time_limit: Some(Self::DEFAULT_TIME_LIMIT),
        }
    }
}

#[derive(Debug)]
pub struct SearchBudget<'a> {
    config: SolverConfig,
    interrupt: Option<&'a AtomicBool>,
    start_time: Instant,
    steps: u64,
}

impl<'a> SearchBudget<'a> {
    pub fn new(config: SolverConfig, interrupt: Option<&'a AtomicBool>) -> Self {
        Self {
            config,
            interrupt,
            start_time: Instant::now(),
            steps: 0,
        }
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Records one candidate and reports whether the search must stop.
    pub fn step(&mut self) -> Option<AbortReason> {
        if let Some(flag) = self.interrupt {
            if flag.load(Ordering::Relaxed) {
                return Some(AbortReason::Interrupted);
            }
        }
        if let Some(max) = self.config.max_nodes {
            if self.steps >= max {
                return Some(AbortReason::NodeLimit);
            }
        }
        if let Some(limit) = self.config.time_limit {
            if (self.steps & CLOCK_CHECK_MASK) == 0 && self.start_time.elapsed() >= limit {
                return Some(AbortReason::TimeLimit);
            }
        }
        self.steps = self.steps.wrapping_add(1);
        None
    }
}
