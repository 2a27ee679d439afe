//! poker-equity: hand ranking and multi-way range equity for Texas Hold'em.
//!
//! Goals:
//! - Constant time evaluation of 1 to 7 card hands from lookup tables
//! - Exact or sampled equity for 2 to 6 ranges, reproducible across threads
//! - No panics for invalid input; every error is a [`Result`]
//!
//! ## Quick start: rank a hand
//! ```
//! use poker_equity::evaluate_hand;
//! use poker_equity::evaluator::Category;
//!
//! let royal = evaluate_hand("AhKhQhJhTh").unwrap();
//! let quads = evaluate_hand("2c 2d 2h 2s 3c").unwrap();
//! assert_eq!(royal.category, Category::StraightFlush);
//! assert!(royal.value > quads.value);
//! ```
//!
//! ## Equity of ranges
//! ```
//! use poker_equity::{compute_equity, EquityRequest};
//!
//! let request = EquityRequest::new(["AhAs", "KK"])
//!     .with_board("2c 7d 9h")
//!     .with_enumerate_all(true);
//! let result = compute_equity(&request).unwrap();
//! assert!(result.enumerated_all);
//! assert!((result.equities.iter().sum::<f64>() - 1.0).abs() < 1e-9);
//! ```
//!
//! ## CLI
//! ```sh
//! cargo run --bin poker-equity -- equity AA KK --board 2c7d9h
//! ```

pub mod cards;
pub mod deck;
pub mod equity;
pub mod error;
pub mod evaluator;
pub mod hand;
pub mod range;

pub use equity::{EquityConfig, EquityEngine, EquityResult, Mode};
pub use error::{Error, ErrorKind};
pub use evaluator::{Category, HandValue};

use cards::{parse_card_sequence, parse_cards};
use evaluator::{evaluate_cards, MAX_HAND_CARDS};
use range::Range;
use serde::{Deserialize, Serialize};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Strength of a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HandEvaluation {
    pub value: HandValue,
    /// Same as `value`, as a plain integer.
    pub ranking: u16,
    pub category: Category,
    pub num_cards: usize,
}

/// Rank 1 to 7 cards written as two character tokens, e.g. `"AhKh Qh"`.
pub fn evaluate_hand(cards: &str) -> Result<HandEvaluation, Error> {
    let cards = parse_cards(cards)?;
    if cards.is_empty() || cards.len() > MAX_HAND_CARDS {
        return Err(Error::HandSize(cards.len()));
    }
    let value = evaluate_cards(&cards)?;
    Ok(HandEvaluation {
        value,
        ranking: value.raw(),
        category: value.category(),
        num_cards: cards.len(),
    })
}

/// Input of [`compute_equity`]: one range per player plus the fixed cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquityRequest {
    pub hands: Vec<String>,
    pub board: String,
    pub dead: String,
    /// `Some(true)` enumerates, `Some(false)` samples, `None` lets the
    /// configured cutoff decide.
    pub enumerate_all: Option<bool>,
    pub config: EquityConfig,
}

impl EquityRequest {
    pub fn new<I, S>(hands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { hands: hands.into_iter().map(Into::into).collect(), ..Self::default() }
    }

    pub fn with_board(mut self, board: impl Into<String>) -> Self {
        self.board = board.into();
        self
    }

    pub fn with_dead(mut self, dead: impl Into<String>) -> Self {
        self.dead = dead.into();
        self
    }

    pub fn with_enumerate_all(mut self, enumerate_all: bool) -> Self {
        self.enumerate_all = Some(enumerate_all);
        self
    }

    pub fn with_config(mut self, config: EquityConfig) -> Self {
        self.config = config;
        self
    }
}

/// Parse a request and run it to completion on a fresh [`EquityEngine`].
pub fn compute_equity(request: &EquityRequest) -> Result<EquityResult, Error> {
    let ranges = request
        .hands
        .iter()
        .enumerate()
        .map(|(index, hand)| hand.parse::<Range>().map_err(|source| Error::InvalidHand { index, source }))
        .collect::<Result<Vec<_>, _>>()?;
    let board = parse_card_sequence(&request.board)?;
    let dead = parse_card_sequence(&request.dead)?;

    let mut engine = EquityEngine::new(request.config.clone());
    let mode = Mode::from_enumerate_all(request.enumerate_all);
    Ok(engine.run(&ranges, board, dead, mode)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_hand_reports_fields() {
        let e = evaluate_hand("AhKhQhJhTh").unwrap();
        assert_eq!(e.category, Category::StraightFlush);
        assert_eq!(e.num_cards, 5);
        assert_eq!(e.ranking, e.value.raw());
        assert_eq!(e.category.to_string(), "Straight Flush");
    }

    #[test]
    fn evaluate_hand_rejects_bad_sizes() {
        assert_eq!(evaluate_hand("").unwrap_err().kind(), ErrorKind::Parse);
        assert_eq!(evaluate_hand("AhKhQhJhTh9h8h7h").unwrap_err(), Error::HandSize(8));
        assert_eq!(evaluate_hand("AhAh").unwrap_err().kind(), ErrorKind::Collision);
        assert_eq!(evaluate_hand("Ah1h").unwrap_err().kind(), ErrorKind::Parse);
    }

    #[test]
    fn request_builder() {
        let r = EquityRequest::new(["AA", "KK"]).with_board("2c3c4c").with_dead("5d");
        assert_eq!(r.hands, vec!["AA".to_string(), "KK".to_string()]);
        assert_eq!(r.enumerate_all, None);
        assert_eq!(r.board, "2c3c4c");
    }

    #[test]
    fn compute_equity_maps_errors() {
        let bad = EquityRequest::new(["AA", "Z9"]);
        let err = compute_equity(&bad).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(matches!(err, Error::InvalidHand { index: 1, .. }));

        let overlap = EquityRequest::new(["AA", "KK"]).with_board("2c3c").with_dead("3c");
        assert_eq!(compute_equity(&overlap).unwrap_err().kind(), ErrorKind::Collision);

        let one = EquityRequest::new(["AA"]);
        assert_eq!(compute_equity(&one).unwrap_err().kind(), ErrorKind::Config);
    }

    #[test]
    fn request_from_json() {
        let r: EquityRequest =
            serde_json::from_str(r#"{"hands": ["AA", "KK"], "board": "2c3c4c", "enumerate_all": true}"#).unwrap();
        assert_eq!(r.hands.len(), 2);
        assert_eq!(r.enumerate_all, Some(true));
        assert_eq!(r.config, EquityConfig::default());
    }
}
