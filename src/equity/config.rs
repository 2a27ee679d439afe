use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning knobs for an equity run.
///
/// ```
/// use poker_equity::equity::EquityConfig;
///
/// let config = EquityConfig::default().with_threads(2).with_seed(7);
/// assert_eq!(config.worker_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquityConfig {
    /// Worker threads, 0 for one per logical CPU.
    pub threads: usize,
    /// Largest estimated trial count that `Mode::Auto` enumerates exactly.
    pub enumeration_cutoff: u64,
    /// Trial budget of a sampling run, shared by all workers.
    pub max_trials: u64,
    /// Sampling stops once every player's standard error is below this.
    /// Zero disables the check.
    pub stdev_target: f64,
    /// Wall clock budget; a run that hits it ends early like a cancel.
    pub time_limit: Option<Duration>,
    /// Seed for reproducible sampling; worker `i` uses `seed + i`.
    pub seed: Option<u64>,
    /// Trials between cancellation and convergence checks.
    pub batch_size: u64,
}

impl EquityConfig {
    pub const DEFAULT_ENUMERATION_CUTOFF: u64 = 20_000_000;
    pub const DEFAULT_MAX_TRIALS: u64 = 2_000_000;

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_enumeration_cutoff(mut self, cutoff: u64) -> Self {
        self.enumeration_cutoff = cutoff;
        self
    }

    pub fn with_max_trials(mut self, trials: u64) -> Self {
        self.max_trials = trials;
        self
    }

    pub fn with_stdev_target(mut self, target: f64) -> Self {
        self.stdev_target = target;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_batch_size(mut self, batch: u64) -> Self {
        self.batch_size = batch.max(1);
        self
    }

    /// Number of worker threads a run will use.
    pub fn worker_count(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get().max(1)
        } else {
            self.threads
        }
    }
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            enumeration_cutoff: Self::DEFAULT_ENUMERATION_CUTOFF,
            max_trials: Self::DEFAULT_MAX_TRIALS,
            stdev_target: 5e-4,
            time_limit: None,
            seed: None,
            batch_size: 4096,
        }
    }
}
