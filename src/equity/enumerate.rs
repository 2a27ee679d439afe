//! Exhaustive enumeration over the flat index space `tuples x boards`.
//!
//! Index `i` decodes to combo tuple `i / boards` (mixed radix over the
//! materialized players' combo lists) and board completion `i % boards`
//! (colex rank of a k-subset of the cards left once the tuple is dealt).
//! Wildcard players are dealt every legal pair inside each index.

use super::combinatorics::for_each_ksubset;
use super::result::Tally;
use super::setup::{Job, MAX_PLAYERS};
use super::{Commit, Shared};
use crate::cards::{Card, Rank, Suit};
use crate::deck::CardMask;
use crate::evaluator::Hand;
use std::ops::ControlFlow;
use std::sync::atomic::Ordering;

/// Claim chunks until none are left or the run is stopped.
pub(crate) fn run(shared: &Shared) -> Vec<Commit> {
    let job = &shared.job;
    let mut dealer = Dealer::new(job);
    let mut done = Vec::new();

    while !shared.should_stop() {
        let id = shared.cursor.fetch_add(1, Ordering::Relaxed);
        if id >= job.chunk_count {
            break;
        }
        let (start, end) = chunk_bounds(id, job.chunk_size, job.space());

        let mut tally = Tally::new(job.players());
        let complete = dealer.chunk(start, end, &mut tally, shared).is_continue();
        done.push(Commit { order: id, tally, complete });
    }

    done
}

/// Index range `[start, end)` of chunk `id`, clipped to the space.
fn chunk_bounds(id: u64, size: u64, space: u64) -> (u64, u64) {
    let start = id.saturating_mul(size).min(space);
    (start, start.saturating_add(size).min(space))
}

struct Dealer<'a> {
    job: &'a Job,
    remaining: Vec<Card>,
    holes: [[Card; 2]; MAX_PLAYERS],
    values: [u16; MAX_PLAYERS],
    pending: u64,
}

impl<'a> Dealer<'a> {
    fn new(job: &'a Job) -> Self {
        let filler = Card::new(Rank::Two, Suit::Clubs);
        Self {
            job,
            remaining: Vec::with_capacity(Card::COUNT),
            holes: [[filler; 2]; MAX_PLAYERS],
            values: [0; MAX_PLAYERS],
            pending: 0,
        }
    }

    fn chunk(&mut self, start: u64, end: u64, tally: &mut Tally, shared: &Shared) -> ControlFlow<()> {
        let boards = self.job.boards;
        let mut index = start;

        while index < end {
            let (tuple, first) = (index / boards, index % boards);
            let count = (boards - first).min(end - index);

            if let Some((used, weight)) = self.deal_tuple(tuple) {
                let remaining = std::mem::take(&mut self.remaining);
                let flow = for_each_ksubset(remaining.len(), self.job.missing, first, count, |at| {
                    let (mut board, mut used) = (self.job.board, used);
                    for &i in at {
                        board = board.add(remaining[i]);
                        used = used.with(remaining[i]);
                    }
                    self.deal_wildcards(0, used, board, weight, tally, shared)
                });
                self.remaining = remaining;
                flow?;
            }

            index += count;
        }

        ControlFlow::Continue(())
    }

    /// Deal the combos of tuple `tuple`; `None` when two players collide.
    fn deal_tuple(&mut self, mut tuple: u64) -> Option<(CardMask, f64)> {
        let job = self.job;
        let mut used = job.fixed;
        let mut weight = 1.0;

        for &player in &job.materialized {
            let list = &job.combos[player];
            let len = list.len() as u64;
            let pick = list[(tuple % len) as usize];
            tuple /= len;

            let mask = pick.combo.mask();
            if used.intersects(mask) {
                return None;
            }
            used |= mask;
            weight *= pick.weight;
            self.holes[player] = pick.combo.as_array();
        }

        self.remaining.clear();
        self.remaining.extend((!used).iter());
        debug_assert_eq!(self.remaining.len(), job.remaining);
        Some((used, weight))
    }

    fn deal_wildcards(
        &mut self,
        depth: usize,
        used: CardMask,
        board: Hand,
        weight: f64,
        tally: &mut Tally,
        shared: &Shared,
    ) -> ControlFlow<()> {
        let Some(&player) = self.job.wildcards.get(depth) else {
            return self.showdown(board, weight, tally, shared);
        };

        let free = !used;
        for a in free.iter() {
            let above = CardMask::from_bits(free.bits() & !((2u64 << a.index()) - 1));
            for b in above.iter() {
                self.holes[player] = [a, b];
                self.deal_wildcards(depth + 1, used.with(a).with(b), board, weight, tally, shared)?;
            }
        }

        ControlFlow::Continue(())
    }

    fn showdown(&mut self, board: Hand, weight: f64, tally: &mut Tally, shared: &Shared) -> ControlFlow<()> {
        let players = self.job.players();
        for (value, [a, b]) in self.values[..players].iter_mut().zip(self.holes) {
            *value = board.add(a).add(b).evaluate().raw();
        }
        tally.record(&self.values[..players], weight);

        self.pending += 1;
        if self.pending >= shared.config.batch_size {
            self.pending = 0;
            if shared.should_stop() {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }
}
