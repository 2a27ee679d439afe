use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of a finished equity run.
///
/// `equities[i]` is player `i`'s weighted share of the pot; a `T`-way split
/// gives each tied player `1/T` of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityResult {
    pub equities: Vec<f64>,
    /// Trials won outright.
    pub wins: Vec<u64>,
    /// Trials ending in a split that included the player.
    pub ties: Vec<u64>,
    /// Weighted sum of the split shares.
    pub tie_credit: Vec<f64>,
    pub hands_evaluated: u64,
    /// Trials per second.
    pub speed: f64,
    /// The whole trial space was enumerated.
    pub enumerated_all: bool,
    /// Standard error of each equity, sampling runs only.
    pub std_errors: Option<Vec<f64>>,
    /// The run was cancelled or hit its time limit.
    pub cancelled: bool,
    pub elapsed: Duration,
}

impl EquityResult {
    pub fn players(&self) -> usize {
        self.equities.len()
    }
}

/// Per-worker accumulator, merged once at the end of a run.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tally {
    pub trials: u64,
    pub wins: Vec<u64>,
    pub ties: Vec<u64>,
    pub win_weight: Vec<f64>,
    pub tie_credit: Vec<f64>,
    /// Sum of squared per-trial shares, for standard errors.
    pub share_sq: Vec<f64>,
    pub total_weight: f64,
}

impl Tally {
    pub fn new(players: usize) -> Self {
        Self {
            trials: 0,
            wins: vec![0; players],
            ties: vec![0; players],
            win_weight: vec![0.0; players],
            tie_credit: vec![0.0; players],
            share_sq: vec![0.0; players],
            total_weight: 0.0,
        }
    }

    /// Record one showdown given each player's hand value.
    #[inline]
    pub fn record(&mut self, values: &[u16], weight: f64) {
        let best = values.iter().copied().max().unwrap_or(0);
        let winners = values.iter().filter(|&&v| v == best).count();

        self.trials += 1;
        self.total_weight += weight;

        if winners == 1 {
            for (i, &v) in values.iter().enumerate() {
                if v == best {
                    self.wins[i] += 1;
                    self.win_weight[i] += weight;
                    self.share_sq[i] += 1.0;
                }
            }
        } else {
            let share = 1.0 / winners as f64;
            for (i, &v) in values.iter().enumerate() {
                if v == best {
                    self.ties[i] += 1;
                    self.tie_credit[i] += weight * share;
                    self.share_sq[i] += share * share;
                }
            }
        }
    }

    pub fn merge(&mut self, other: &Tally) {
        self.trials += other.trials;
        self.total_weight += other.total_weight;
        let columns = [
            (&mut self.win_weight, &other.win_weight),
            (&mut self.tie_credit, &other.tie_credit),
            (&mut self.share_sq, &other.share_sq),
        ];
        for (mine, theirs) in columns {
            mine.iter_mut().zip(theirs).for_each(|(a, b)| *a += b);
        }
        self.wins.iter_mut().zip(&other.wins).for_each(|(a, b)| *a += b);
        self.ties.iter_mut().zip(&other.ties).for_each(|(a, b)| *a += b);
    }

    pub fn equities(&self) -> Vec<f64> {
        if self.total_weight <= 0.0 {
            return vec![0.0; self.wins.len()];
        }
        self.win_weight
            .iter()
            .zip(&self.tie_credit)
            .map(|(w, t)| (w + t) / self.total_weight)
            .collect()
    }

    /// Standard error of each equity, for trials drawn with equal weight.
    pub fn std_errors(&self) -> Vec<f64> {
        let n = self.trials as f64;
        if self.trials < 2 {
            return vec![f64::INFINITY; self.wins.len()];
        }
        self.equities()
            .iter()
            .zip(&self.share_sq)
            .map(|(mean, sq)| ((sq / n - mean * mean).max(0.0) / (n - 1.0)).sqrt())
            .collect()
    }

    pub fn into_result(
        self,
        enumerated_all: bool,
        sampled: bool,
        cancelled: bool,
        elapsed: Duration,
    ) -> EquityResult {
        let secs = elapsed.as_secs_f64();
        EquityResult {
            equities: self.equities(),
            std_errors: sampled.then(|| self.std_errors()),
            speed: if secs > 0.0 { self.trials as f64 / secs } else { 0.0 },
            hands_evaluated: self.trials,
            wins: self.wins,
            ties: self.ties,
            tie_credit: self.tie_credit,
            enumerated_all,
            cancelled,
            elapsed,
        }
    }
}
