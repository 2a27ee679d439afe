use crate::cards::CardParseError;
use crate::equity::EquityError;
use crate::evaluator::EvalError;
use crate::hand::HandError;
use crate::range::RangeError;
use serde::Serialize;
use std::fmt;

/// Any error returned by the public entry points.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Card(#[from] CardParseError),
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Equity(#[from] EquityError),
    #[error("a hand holds 1 to 7 cards, got {0}")]
    HandSize(usize),
    #[error("hand {index}: {source}")]
    InvalidHand { index: usize, source: RangeError },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Malformed card or range token, or a hand of the wrong size.
    Parse,
    /// Malformed range grammar or weight.
    Range,
    /// The same card used twice.
    Collision,
    /// A player has no legal combos.
    EmptyRange,
    /// Invalid player count, board size or engine use.
    Config,
    /// No collision free trial exists.
    NoTrials,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Parse => "parse error",
            ErrorKind::Range => "range error",
            ErrorKind::Collision => "collision error",
            ErrorKind::EmptyRange => "empty range error",
            ErrorKind::Config => "config error",
            ErrorKind::NoTrials => "no trials error",
        };
        f.write_str(name)
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Card(e) => card_kind(e),
            Error::Range(e) | Error::InvalidHand { source: e, .. } => range_kind(e),
            Error::Hand(e) => match e {
                HandError::DuplicateHoleCards | HandError::Overlap(_) => ErrorKind::Collision,
                HandError::TooManyBoardCards(_) => ErrorKind::Config,
                HandError::CardParse(e) => card_kind(e),
                _ => ErrorKind::Parse,
            },
            Error::Eval(e) => match e {
                EvalError::Card(e) => card_kind(e),
                _ => ErrorKind::Parse,
            },
            Error::Equity(e) => match e {
                EquityError::Collision(_) => ErrorKind::Collision,
                EquityError::EmptyRange { .. } => ErrorKind::EmptyRange,
                EquityError::NoTrials => ErrorKind::NoTrials,
                _ => ErrorKind::Config,
            },
            Error::HandSize(_) => ErrorKind::Parse,
        }
    }
}

fn card_kind(e: &CardParseError) -> ErrorKind {
    match e {
        CardParseError::Duplicate(_) => ErrorKind::Collision,
        _ => ErrorKind::Parse,
    }
}

fn range_kind(e: &RangeError) -> ErrorKind {
    match e {
        RangeError::Card(e) => card_kind(e),
        _ => ErrorKind::Range,
    }
}
