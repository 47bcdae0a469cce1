use crate::helpe::*;

/// The two claim cursors, guarded as one unit.
///
/// Keeping the counts (rather than block indices) makes the exhaustion
/// check symmetric: the ledger is drained the moment the two counts
/// together reach the block total, no matter which side got the odd
/// middle block.
pub struct Cursors {
    claimed_left:   Pos,
    claimed_right:  Pos,
}

impl BlockLedger {
    /// Sets up a ledger over the inclusive bound `[left, right]`.
    ///
    /// A bound with `left > right` encodes the empty range: it yields
    /// zero blocks and the ledger starts out permanently exhausted.
    pub fn new(left: Pos, right: Pos, block_size: Pos) -> Self {
        assert!(block_size > 0, "zero block size");
        let length = (right + 1).saturating_sub(left);

        let mut total_blocks = length / block_size;
        if length % block_size > 0 {
            total_blocks += 1;
        }

        Self {
            left,
            right,
            block_size,
            total_blocks,
            cursors: Mutex::new(Cursors {
                claimed_left:   0,
                claimed_right:  0,
            }),
        }
    }

    pub fn total_blocks(&self) -> Pos {
        self.total_blocks
    }

    /// Grants the next unclaimed block off the left end, or `None` once
    /// the ledger is drained.
    ///
    /// The exhaustion check and the cursor advance happen under one
    /// lock acquisition: the middle block cannot be granted twice.
    pub fn take_next_left(&self) -> Option<BlockRange> {
        let mut cur = self.cursors.lock().unwrap();
        if cur.claimed_left + cur.claimed_right >= self.total_blocks {
            return None;
        }

        let begin = self.left + cur.claimed_left * self.block_size;
        let end = (begin + self.block_size - 1).min(self.right);
        cur.claimed_left += 1;

        Some(BlockRange { begin, end })
    }

    /// Mirror of [`take_next_left`](BlockLedger::take_next_left),
    /// walking down from the last block. The very first grant off this
    /// end may be the shorter remainder block.
    pub fn take_next_right(&self) -> Option<BlockRange> {
        let mut cur = self.cursors.lock().unwrap();
        if cur.claimed_left + cur.claimed_right >= self.total_blocks {
            return None;
        }

        let block = self.total_blocks - 1 - cur.claimed_right;
        let begin = self.left + block * self.block_size;
        let end = (begin + self.block_size - 1).min(self.right);
        cur.claimed_right += 1;

        Some(BlockRange { begin, end })
    }
}
