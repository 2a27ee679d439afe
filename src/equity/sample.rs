//! Monte Carlo trials.
//!
//! Materialized players draw a combo in proportion to its weight, wildcard
//! players and the rest of the board are dealt uniformly from the cards left.
//! A draw where two players collide is thrown away whole, which keeps the
//! joint distribution equal to the weighting of the exhaustive enumeration.

use super::result::Tally;
use super::setup::{Job, MAX_PLAYERS};
use super::{EquityError, Shared};
use crate::cards::{Card, Rank, Suit};
use crate::deck::Deck;
use crate::evaluator::Hand;
use log::warn;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Consecutive rejected draws after which a worker gives up.
pub const MAX_REJECTIONS: u64 = 1_000_000;

/// Trials a worker runs before it trusts its own error estimate.
const MIN_TRIALS_FOR_CONVERGENCE: u64 = 1_000;

/// One weighted sampler per materialized player.
pub(crate) fn samplers(job: &Job) -> Result<Vec<WeightedIndex<f64>>, EquityError> {
    job.materialized
        .iter()
        .map(|&p| {
            WeightedIndex::new(job.combos[p].iter().map(|c| c.weight))
                .map_err(|e| EquityError::Weights(e.to_string()))
        })
        .collect()
}

/// Trial quota of worker `worker` out of `workers`.
pub(crate) fn quota(max_trials: u64, workers: usize, worker: usize) -> u64 {
    let workers = workers as u64;
    max_trials / workers + u64::from((worker as u64) < max_trials % workers)
}

/// Run trials until the quota is spent, the estimate converges or the run
/// is stopped.
pub(crate) fn run(shared: &Shared, worker: usize) -> Tally {
    let job = &shared.job;
    let config = &shared.config;
    let quota = quota(config.max_trials, shared.workers, worker);
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(worker as u64)),
        None => ChaCha8Rng::from_os_rng(),
    };

    let deck = Deck::excluding(job.fixed);
    let mut tally = Tally::new(job.players());
    let mut holes = [[Card::new(Rank::Two, Suit::Clubs); 2]; MAX_PLAYERS];
    let mut values = [0u16; MAX_PLAYERS];
    let mut rejections = 0u64;

    'run: while tally.trials < quota {
        let target = (tally.trials + config.batch_size).min(quota);
        while tally.trials < target {
            let Some(board) = deal(job, &shared.samplers, &deck, &mut holes, &mut rng) else {
                rejections += 1;
                if rejections >= MAX_REJECTIONS {
                    warn!("worker {worker}: {MAX_REJECTIONS} draws in a row collided, giving up");
                    break 'run;
                }
                continue;
            };
            rejections = 0;

            let players = job.players();
            for (value, [a, b]) in values[..players].iter_mut().zip(holes) {
                *value = board.add(a).add(b).evaluate().raw();
            }
            tally.record(&values[..players], 1.0);
        }

        if shared.should_stop() || converged(&tally, config.stdev_target, shared.workers) {
            break;
        }
    }

    tally
}

/// Deal one trial into `holes`, returning the completed board.
fn deal<R: Rng + ?Sized>(
    job: &Job,
    samplers: &[WeightedIndex<f64>],
    deck: &Deck,
    holes: &mut [[Card; 2]; MAX_PLAYERS],
    rng: &mut R,
) -> Option<Hand> {
    let mut used = job.fixed;

    for (&player, sampler) in job.materialized.iter().zip(samplers) {
        let combo = job.combos[player][sampler.sample(rng)].combo;
        let mask = combo.mask();
        if used.intersects(mask) {
            return None;
        }
        used |= mask;
        holes[player] = combo.as_array();
    }

    for &player in &job.wildcards {
        let a = deck.pick_excluding(rng, used)?;
        used = used.with(a);
        let b = deck.pick_excluding(rng, used)?;
        used = used.with(b);
        holes[player] = [a, b];
    }

    let mut board = job.board;
    for _ in 0..job.missing {
        let card = deck.pick_excluding(rng, used)?;
        used = used.with(card);
        board = board.add(card);
    }
    Some(board)
}

/// True when this worker's share of the estimate is precise enough.
///
/// Workers draw independently, so the pooled error is about the worker's own
/// error divided by the square root of the worker count.
fn converged(tally: &Tally, target: f64, workers: usize) -> bool {
    if target <= 0.0 || tally.trials < MIN_TRIALS_FOR_CONVERGENCE {
        return false;
    }
    let scale = (workers as f64).sqrt();
    tally.std_errors().iter().all(|&se| se / scale < target)
}
