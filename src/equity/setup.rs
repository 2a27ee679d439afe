use super::combinatorics::nck;
use super::{EquityConfig, EquityError, Mode};
use crate::cards::Card;
use crate::deck::CardMask;
use crate::evaluator::Hand;
use crate::hand::Board;
use crate::range::{Range, WeightedCombo};
use log::debug;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;

/// Target number of chunks an exhaustive index space is cut into.
const CHUNK_TARGET: u64 = 1024;

/// A validated run: everything workers need, read-only.
#[derive(Debug)]
pub(crate) struct Job {
    /// Dead filtered combos of every player, empty for wildcards.
    pub combos: Vec<Vec<WeightedCombo>>,
    /// Players with explicit combos, in seat order.
    pub materialized: Vec<usize>,
    /// Wildcard players, in seat order.
    pub wildcards: Vec<usize>,
    pub board: Hand,
    /// Board and dead cards.
    pub fixed: CardMask,
    /// Board cards still to deal.
    pub missing: usize,
    /// Cards left after fixed cards and materialized hole cards.
    pub remaining: usize,
    /// Product of materialized combo counts.
    pub tuples: u64,
    /// Board completions per tuple.
    pub boards: u64,
    /// Upper bound on the trial count of an exhaustive run.
    pub estimate: Option<u64>,
    pub exhaustive: bool,
    pub chunk_size: u64,
    pub chunk_count: u64,
}

impl Job {
    pub fn new(
        ranges: &[Range],
        board: CardMask,
        dead: CardMask,
        mode: Mode,
        config: &EquityConfig,
    ) -> Result<Self, EquityError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&ranges.len()) {
            return Err(EquityError::PlayerCount(ranges.len()));
        }
        if board.len() > Board::MAX_CARDS {
            return Err(EquityError::BoardSize(board.len()));
        }
        let overlap = board & dead;
        if !overlap.is_empty() {
            return Err(EquityError::Collision(overlap));
        }

        let fixed = board | dead;
        let mut combos = Vec::with_capacity(ranges.len());
        let (mut materialized, mut wildcards) = (Vec::new(), Vec::new());
        for (player, range) in ranges.iter().enumerate() {
            match range.remove_dead(fixed) {
                Range::Wildcard => {
                    wildcards.push(player);
                    combos.push(Vec::new());
                }
                Range::Weighted(list) if list.is_empty() => {
                    return Err(EquityError::EmptyRange { player });
                }
                Range::Weighted(mut list) => {
                    // Scale so the heaviest combo weighs 1 and trial weight products stay in (0, 1].
                    let top = list.iter().fold(0.0f64, |m, c| m.max(c.weight));
                    if top.is_finite() && top > 0.0 {
                        list.iter_mut().for_each(|c| c.weight /= top);
                    }
                    materialized.push(player);
                    combos.push(list);
                }
            }
        }

        let missing = Board::MAX_CARDS - board.len();
        let remaining = (Card::COUNT - fixed.len()).saturating_sub(2 * materialized.len());
        let tuples = materialized
            .iter()
            .try_fold(1u64, |acc, &p| acc.checked_mul(combos[p].len() as u64));
        let boards = nck(remaining, missing);
        let wildcard_deals = (0..wildcards.len()).try_fold(1u64, |acc, j| {
            let left = remaining.saturating_sub(missing + 2 * j);
            acc.checked_mul(nck(left, 2))
        });
        let space = tuples.and_then(|t| t.checked_mul(boards));
        let estimate = space.and_then(|s| wildcard_deals.and_then(|w| s.checked_mul(w)));

        let exhaustive = match mode {
            Mode::Exhaustive => true,
            Mode::Sampling => false,
            Mode::Auto => estimate.is_some_and(|e| e <= config.enumeration_cutoff),
        };
        let (tuples, space) = match (tuples, space) {
            (Some(t), Some(s)) => (t, s),
            _ if exhaustive => return Err(EquityError::SpaceOverflow),
            _ => (0, 0),
        };
        if exhaustive && estimate.is_none() {
            return Err(EquityError::SpaceOverflow);
        }

        let chunk_size = space.div_ceil(CHUNK_TARGET).max(1);
        let chunk_count = space.div_ceil(chunk_size);

        debug!(
            "equity job: {} players ({} wildcard), board {}, dead {}, {} tuples x {} boards, estimate {:?}, {}",
            ranges.len(),
            wildcards.len(),
            board,
            dead,
            tuples,
            boards,
            estimate,
            if exhaustive { "exhaustive" } else { "sampling" }
        );

        Ok(Self {
            combos,
            materialized,
            wildcards,
            board: board.iter().fold(Hand::EMPTY, Hand::add),
            fixed,
            missing,
            remaining,
            tuples,
            boards,
            estimate,
            exhaustive,
            chunk_size,
            chunk_count,
        })
    }

    pub fn players(&self) -> usize {
        self.combos.len()
    }

    /// Size of the flat exhaustive index space.
    pub fn space(&self) -> u64 {
        self.tuples * self.boards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_card_sequence;

    fn ranges(items: &[&str]) -> Vec<Range> {
        items.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn job(items: &[&str], board: &str, dead: &str, mode: Mode) -> Result<Job, EquityError> {
        Job::new(
            &ranges(items),
            parse_card_sequence(board).unwrap(),
            parse_card_sequence(dead).unwrap(),
            mode,
            &EquityConfig::default(),
        )
    }

    #[test]
    fn player_count_is_checked() {
        assert_eq!(job(&["AA"], "", "", Mode::Auto).unwrap_err(), EquityError::PlayerCount(1));
        let seven = ["AA"; 7];
        assert_eq!(job(&seven, "", "", Mode::Auto).unwrap_err(), EquityError::PlayerCount(7));
    }

    #[test]
    fn board_and_dead_must_not_overlap() {
        let err = job(&["AA", "KK"], "2c3c4c", "4c", Mode::Auto).unwrap_err();
        assert_eq!(err, EquityError::Collision(parse_card_sequence("4c").unwrap()));
    }

    #[test]
    fn board_size_is_checked() {
        let err = Job::new(
            &ranges(&["AA", "KK"]),
            parse_card_sequence("2c3c4c5c6c7c").unwrap(),
            CardMask::EMPTY,
            Mode::Auto,
            &EquityConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, EquityError::BoardSize(6));
    }

    #[test]
    fn dead_cards_empty_a_range() {
        let err = job(&["AA", "AhAd"], "", "Ah", Mode::Auto).unwrap_err();
        assert_eq!(err, EquityError::EmptyRange { player: 1 });
    }

    #[test]
    fn space_dimensions() {
        let j = job(&["AA", "KK"], "2c3c4c", "", Mode::Exhaustive).unwrap();
        assert_eq!(j.tuples, 36);
        assert_eq!(j.remaining, 45);
        assert_eq!(j.boards, nck(45, 2));
        assert_eq!(j.estimate, Some(36 * 990));
        assert!(j.chunk_size * j.chunk_count >= j.space());
        assert_eq!(j.board.len(), 3);
    }

    #[test]
    fn auto_uses_cutoff() {
        assert!(job(&["AhAs", "KdKc"], "", "", Mode::Auto).unwrap().exhaustive);
        assert!(!job(&["XX", "XX", "XX"], "", "", Mode::Auto).unwrap().exhaustive);
        assert!(!job(&["AhAs", "KdKc"], "", "", Mode::Sampling).unwrap().exhaustive);
    }

    #[test]
    fn wildcards_are_counted_in_the_estimate() {
        let j = job(&["AhAs", "XX"], "2c3c4c5c6c", "", Mode::Auto).unwrap();
        assert_eq!(j.wildcards, vec![1]);
        assert_eq!(j.boards, 1);
        assert_eq!(j.estimate, Some(nck(45, 2)));
    }

    #[test]
    fn weights_are_scaled_to_the_heaviest_combo() {
        let j = job(&["AhAs:1e-200", "KdKc:4, QdQc:1"], "", "", Mode::Auto).unwrap();
        assert_eq!(j.combos[0][0].weight, 1.0);
        let weights = j.combos[1].iter().map(|c| c.weight).collect::<Vec<_>>();
        assert_eq!(weights, vec![1.0, 0.25]);
    }

    #[test]
    fn overflowing_space_cannot_be_forced() {
        let err = job(&["XX"; 6], "", "", Mode::Exhaustive).unwrap_err();
        assert_eq!(err, EquityError::SpaceOverflow);
    }
}
