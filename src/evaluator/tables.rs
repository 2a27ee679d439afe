//! Lookup tables behind [`Hand::evaluate`](super::Hand::evaluate).
//!
//! A hand's ranks are summarised by a base-5 key: digit `i` is the number of
//! cards of rank index `i`. Keys of hands with at most seven cards are mapped
//! to a dense index with a two level perfect hash. The key is split into a
//! low part (ranks Two..Eight, seven digits) and a high part (Nine..Ace, six
//! digits). Low patterns are numbered in order of their card count, so the
//! low patterns that fit next to a high pattern holding `h` cards are exactly
//! the first `LOW_PREFIX[7 - h]` of them, and
//!
//! ```text
//! index = HIGH_OFFSET[high] + LOW_ORDER[low]
//! ```
//!
//! is collision free. Flushes are looked up separately by the 13-bit rank
//! mask of the flush suit.

use super::hand_analysis::{pack_tiebreak, HandAnalysis};
use super::{Category, HandValue, CATEGORY_SPAN};
use log::debug;
use std::sync::LazyLock;
use std::time::Instant;

/// Most cards a hand can hold.
pub const MAX_CARDS: usize = 7;

/// Low part span: five values for each of the seven low ranks.
pub const LOW_SPAN: u32 = 5u32.pow(7);
const HIGH_SPAN: u32 = 5u32.pow(6);

/// Base-5 key contribution of one card of each rank index.
pub const RANK_KEYS: [u32; 13] = {
    let mut keys = [0u32; 13];
    let mut i = 0;
    let mut k = 1u32;
    while i < 13 {
        keys[i] = k;
        k *= 5;
        i += 1;
    }
    keys
};

static TABLES: LazyLock<Tables> = LazyLock::new(Tables::build);

/// The process wide tables, built on first use.
pub fn get() -> &'static Tables {
    &TABLES
}

pub struct Tables {
    low_order: Vec<u16>,
    high_offset: Vec<u32>,
    ranks: Vec<u16>,
    flushes: Vec<u16>,
}

impl Tables {
    /// Value of a hand without a flush from its base-5 rank key.
    #[inline]
    pub fn rank_value(&self, key: u32) -> u16 {
        let (high, low) = ((key / LOW_SPAN) as usize, (key % LOW_SPAN) as usize);
        self.ranks[self.high_offset[high] as usize + self.low_order[low] as usize]
    }

    /// Value of the best flush in a suit holding at least five cards.
    #[inline]
    pub fn flush_value(&self, rank_mask: u16) -> u16 {
        self.flushes[rank_mask as usize & 0x1fff]
    }

    /// Number of rank patterns covered by the rank table.
    pub fn patterns(&self) -> usize {
        self.ranks.len()
    }

    fn build() -> Self {
        let started = Instant::now();

        // Low patterns sorted by card count, then key.
        let mut lows: Vec<(usize, u32)> = (0..LOW_SPAN)
            .map(|k| (digit_sum(k), k))
            .filter(|&(sum, _)| sum <= MAX_CARDS)
            .collect();
        lows.sort_unstable();

        let mut low_order = vec![0u16; LOW_SPAN as usize];
        let mut low_prefix = [0u32; MAX_CARDS + 1];
        for (order, &(sum, key)) in lows.iter().enumerate() {
            low_order[key as usize] = order as u16;
            low_prefix[sum] += 1;
        }
        for s in 1..=MAX_CARDS {
            low_prefix[s] += low_prefix[s - 1];
        }

        let mut high_offset = vec![0u32; HIGH_SPAN as usize];
        let mut patterns: Vec<(Category, u32)> = Vec::new();
        for high in 0..HIGH_SPAN {
            let high_sum = digit_sum(high);
            if high_sum > MAX_CARDS {
                continue;
            }
            high_offset[high as usize] = patterns.len() as u32;
            let fitting = low_prefix[MAX_CARDS - high_sum] as usize;
            for &(_, low) in &lows[..fitting] {
                let analysis = HandAnalysis::from_counts(counts_of(high * LOW_SPAN + low));
                let (category, tiebreak) = analysis.classify();
                patterns.push((category, pack_tiebreak(&tiebreak)));
            }
        }

        let mut flush_patterns: Vec<Option<(Category, u32)>> = vec![None; 1 << 13];
        for (mask, slot) in flush_patterns.iter_mut().enumerate() {
            let analysis = HandAnalysis::suited(mask as u16);
            if analysis.is_flush() {
                let (category, tiebreak) = analysis.classify();
                *slot = Some((category, pack_tiebreak(&tiebreak)));
            }
        }

        // Number the distinct tiebreaks of each category in ascending order.
        let mut ordinals: Vec<Vec<u32>> = vec![Vec::new(); Category::ALL.len()];
        for &(category, packed) in patterns.iter().chain(flush_patterns.iter().flatten()) {
            ordinals[category as usize].push(packed);
        }
        for list in ordinals.iter_mut() {
            list.sort_unstable();
            list.dedup();
            debug_assert!(list.len() <= CATEGORY_SPAN as usize);
        }

        let value = |(category, packed): (Category, u32)| -> u16 {
            let ordinal = ordinals[category as usize].partition_point(|&p| p < packed);
            HandValue::from_parts(category, ordinal as u16).raw()
        };

        let ranks = patterns.iter().copied().map(value).collect::<Vec<_>>();
        let flushes = flush_patterns.iter().map(|p| p.map_or(0, value)).collect::<Vec<_>>();

        debug!(
            "built evaluator tables: {} rank patterns, {} flush masks in {:?}",
            ranks.len(),
            flushes.iter().filter(|&&v| v != 0).count(),
            started.elapsed()
        );

        Self { low_order, high_offset, ranks, flushes }
    }
}

fn digit_sum(mut key: u32) -> usize {
    let mut sum = 0;
    while key > 0 {
        sum += (key % 5) as usize;
        key /= 5;
    }
    sum
}

fn counts_of(mut key: u32) -> [u8; 13] {
    let mut counts = [0u8; 13];
    for count in counts.iter_mut() {
        *count = (key % 5) as u8;
        key /= 5;
    }
    counts
}
