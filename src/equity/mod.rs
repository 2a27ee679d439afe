//! Multi-way range equity.
//!
//! An [`EquityEngine`] validates its input, then runs worker threads that
//! either enumerate every trial ([`Mode::Exhaustive`]) or sample them
//! ([`Mode::Sampling`]). Workers keep private tallies and publish them once;
//! exhaustive tallies are reduced in index order, so their results do not
//! depend on the number of threads.
//!
//! ```
//! use poker_equity::cards::parse_card_sequence;
//! use poker_equity::equity::{EquityConfig, EquityEngine, Mode};
//! use poker_equity::range::Range;
//!
//! let ranges: Vec<Range> = vec!["AhAs".parse().unwrap(), "KdKc".parse().unwrap()];
//! let board = parse_card_sequence("2c 7d 9h Ts").unwrap();
//!
//! let mut engine = EquityEngine::new(EquityConfig::default().with_threads(2));
//! let result = engine.run(&ranges, board, Default::default(), Mode::Exhaustive).unwrap();
//! assert_eq!(result.hands_evaluated, 44);
//! assert!(result.enumerated_all);
//! assert!(result.equities[0] > 0.9);
//! ```

pub(crate) mod combinatorics;
mod config;
mod enumerate;
mod result;
mod sample;
mod setup;

pub use config::EquityConfig;
pub use result::EquityResult;
pub use setup::{MAX_PLAYERS, MIN_PLAYERS};

use crate::deck::CardMask;
use crate::range::Range;
use log::{debug, info, warn};
use parking_lot::Mutex;
use rand::distr::weighted::WeightedIndex;
use result::Tally;
use serde::{Deserialize, Serialize};
use setup::Job;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EquityError {
    #[error("between 2 and 6 players are required, got {0}")]
    PlayerCount(usize),
    #[error("a board holds at most 5 cards, got {0}")]
    BoardSize(usize),
    #[error("board and dead cards share {0}")]
    Collision(CardMask),
    #[error("player {player} has no combos left after removing board and dead cards")]
    EmptyRange { player: usize },
    #[error("the exhaustive trial space does not fit in 64 bits")]
    SpaceOverflow,
    #[error("invalid combo weights: {0}")]
    Weights(String),
    #[error("an equity run is already in progress")]
    AlreadyRunning,
    #[error("no equity run has finished")]
    NotFinished,
    #[error("no collision free trial exists")]
    NoTrials,
}

/// How trials are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Every trial exactly once.
    Exhaustive,
    /// Random trials until the budget, the error target or the time limit.
    Sampling,
    /// Exhaustive when the estimated trial count is within
    /// [`EquityConfig::enumeration_cutoff`], sampling otherwise.
    #[default]
    Auto,
}

impl Mode {
    /// `Some(true)` forces enumeration, `Some(false)` sampling.
    pub fn from_enumerate_all(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Mode::Exhaustive,
            Some(false) => Mode::Sampling,
            None => Mode::Auto,
        }
    }
}

/// A worker's published tally. `order` is the chunk index for exhaustive
/// runs and the worker index for sampling runs.
#[derive(Debug)]
pub(crate) struct Commit {
    pub order: u64,
    pub tally: Tally,
    pub complete: bool,
}

/// State shared by the workers of one run.
pub(crate) struct Shared {
    pub job: Job,
    pub config: EquityConfig,
    pub samplers: Vec<WeightedIndex<f64>>,
    pub workers: usize,
    pub cursor: AtomicU64,
    cancel: AtomicBool,
    commits: Mutex<Vec<Commit>>,
    started: Instant,
}

impl Shared {
    pub fn new(job: Job, mut config: EquityConfig, samplers: Vec<WeightedIndex<f64>>) -> Self {
        // The field is public, so builders are not the only way in.
        config.batch_size = config.batch_size.max(1);
        let wanted = config.worker_count();
        let workers = if job.exhaustive {
            wanted.min(job.chunk_count.max(1) as usize)
        } else {
            wanted.min(config.max_trials.max(1) as usize)
        };
        Self {
            job,
            config,
            samplers,
            workers,
            cursor: AtomicU64::new(0),
            cancel: AtomicBool::new(false),
            commits: Mutex::new(Vec::new()),
            started: Instant::now(),
        }
    }

    /// True once the run is cancelled or out of time.
    pub fn should_stop(&self) -> bool {
        if self.cancel.load(Ordering::Relaxed) {
            return true;
        }
        match self.config.time_limit {
            Some(limit) if self.started.elapsed() >= limit => {
                if !self.cancel.swap(true, Ordering::Relaxed) {
                    warn!("time limit of {limit:?} reached, stopping");
                }
                true
            }
            _ => false,
        }
    }

    fn work(&self, worker: usize) {
        if self.job.exhaustive {
            let commits = enumerate::run(self);
            self.commits.lock().extend(commits);
        } else {
            let tally = sample::run(self, worker);
            self.commits.lock().push(Commit { order: worker as u64, tally, complete: false });
        }
    }

    /// Reduce the published tallies in order.
    fn finish(&self) -> Result<EquityResult, EquityError> {
        let elapsed = self.started.elapsed();
        let mut commits = std::mem::take(&mut *self.commits.lock());
        commits.sort_by_key(|c| c.order);

        let mut total = Tally::new(self.job.players());
        commits.iter().for_each(|c| total.merge(&c.tally));

        let complete = self.job.exhaustive
            && commits.len() as u64 == self.job.chunk_count
            && commits.iter().all(|c| c.complete);
        let cancelled = self.cancel.load(Ordering::Relaxed) && !complete;

        if total.trials == 0 {
            return Err(EquityError::NoTrials);
        }
        if !(total.total_weight.is_finite() && total.total_weight > 0.0) {
            return Err(EquityError::Weights(format!("total trial weight is {}", total.total_weight)));
        }

        let result = total.into_result(complete, !self.job.exhaustive, cancelled, elapsed);
        info!(
            "equity: {} trials in {:.3?} ({:.0} trials/s), exact: {}, equities: {:?}",
            result.hands_evaluated, elapsed, result.speed, result.enumerated_all, result.equities
        );
        if cancelled {
            warn!("equity run stopped early, result is partial");
        }
        Ok(result)
    }
}

struct Run {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl Run {
    fn join(self) -> Arc<Shared> {
        for handle in self.workers {
            if let Err(panic) = handle.join() {
                std::panic::resume_unwind(panic);
            }
        }
        self.shared
    }
}

/// Runs one equity computation at a time.
///
/// `start` returns as soon as the workers are spawned; `wait` blocks for the
/// result. Dropping a running engine cancels it and joins its workers.
pub struct EquityEngine {
    config: EquityConfig,
    run: Option<Run>,
    outcome: Option<Result<EquityResult, EquityError>>,
}

impl EquityEngine {
    pub fn new(config: EquityConfig) -> Self {
        Self { config, run: None, outcome: None }
    }

    pub fn config(&self) -> &EquityConfig {
        &self.config
    }

    /// Validate the input and spawn the workers.
    ///
    /// Every validation error is reported here, before any trial runs.
    pub fn start(
        &mut self,
        ranges: &[Range],
        board: CardMask,
        dead: CardMask,
        mode: Mode,
    ) -> Result<(), EquityError> {
        if self.run.is_some() {
            return Err(EquityError::AlreadyRunning);
        }

        let job = Job::new(ranges, board, dead, mode, &self.config)?;
        let samplers = if job.exhaustive { Vec::new() } else { sample::samplers(&job)? };
        crate::evaluator::init();

        let shared = Arc::new(Shared::new(job, self.config.clone(), samplers));
        debug!("starting {} equity workers", shared.workers);

        let workers = (0..shared.workers)
            .map(|worker| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || shared.work(worker))
            })
            .collect();

        self.outcome = None;
        self.run = Some(Run { shared, workers });
        Ok(())
    }

    /// Block until the workers finish and return the result.
    pub fn wait(&mut self) -> Result<EquityResult, EquityError> {
        if let Some(run) = self.run.take() {
            self.outcome = Some(run.join().finish());
        }
        self.results().cloned()
    }

    /// `start` followed by `wait`.
    pub fn run(
        &mut self,
        ranges: &[Range],
        board: CardMask,
        dead: CardMask,
        mode: Mode,
    ) -> Result<EquityResult, EquityError> {
        self.start(ranges, board, dead, mode)?;
        self.wait()
    }

    /// Ask the workers to stop after their current batch.
    pub fn cancel(&self) {
        if let Some(run) = &self.run {
            run.shared.cancel.store(true, Ordering::Relaxed);
        }
    }

    pub fn is_running(&self) -> bool {
        self.run.as_ref().is_some_and(|r| r.workers.iter().any(|w| !w.is_finished()))
    }

    /// Result of the last run, once [`EquityEngine::wait`] has returned.
    pub fn results(&self) -> Result<&EquityResult, EquityError> {
        match (&self.run, &self.outcome) {
            (None, Some(Ok(result))) => Ok(result),
            (None, Some(Err(e))) => Err(e.clone()),
            _ => Err(EquityError::NotFinished),
        }
    }
}

impl Drop for EquityEngine {
    fn drop(&mut self) {
        if let Some(run) = self.run.take() {
            run.shared.cancel.store(true, Ordering::Relaxed);
            for handle in run.workers {
                let _ = handle.join();
            }
        }
    }
}
