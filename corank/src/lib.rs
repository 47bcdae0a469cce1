//! Welcome to `corank`!

mod ledger;
mod neutral;

pub mod algo;
pub mod stride;
pub mod helpe;

pub use crate::helpe::*;

/// Our fundamental unit of ownership. A [`BlockRange`] is a *closed*,
/// inclusive `[begin, end]` interval of positions over one externally
/// owned buffer.
///
/// > ***ATTENTION:*** a range is a pair of offsets, never a live
/// > reference into the buffer. Whoever holds one may touch exactly the
/// > positions it covers, and nothing else. Disjointness between holders
/// > is what makes the concurrent phase sound, and it is enforced by the
/// > [`BlockLedger`] that issued the ranges--not by locking the buffer.
///
/// Ranges are transient: they are minted during one claim round and
/// consumed when the round's blocks are merged back together. Nothing
/// keeps one alive past its round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    pub begin:  Pos,
    pub end:    Pos,
}

/// Hands out disjoint, fixed-size [`BlockRange`]s over a bound
/// `[left, right]`, from both ends at once, until the two cursors meet.
///
/// The bound is cut into `ceil(length / block_size)` consecutive blocks.
/// [`take_next_left`](BlockLedger::take_next_left) grants them in
/// increasing order starting at block 0;
/// [`take_next_right`](BlockLedger::take_next_right) in decreasing order
/// starting at the last block (which may be a shorter remainder block).
/// Any number of callers may claim concurrently: the exhaustion check
/// and the cursor advance happen under one lock acquisition, so the
/// single middle block (odd block counts) goes to whichever claim
/// transaction lands first.
///
/// A ledger lives for exactly one partition round and is discarded once
/// drained.
pub struct BlockLedger {
    left:           Pos,
    right:          Pos,
    block_size:     Pos,
    total_blocks:   Pos,
    cursors:        Mutex<ledger::Cursors>,
}
