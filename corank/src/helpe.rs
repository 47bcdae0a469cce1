pub use std::{
    sync::{Arc, Mutex},
    io::{BufRead, BufReader},
    path::PathBuf,
    marker::PhantomData,
    time::Instant,
};
pub use thiserror::Error;
pub use itertools::Itertools;
pub use rayon::prelude::*;
pub use clap::Parser;

pub use crate::{BlockLedger, BlockRange};

/// The unit for addressing buffer positions. `corank` does not care what
/// the elements mean, as long as they are totally ordered.
///
/// We assume a 64bit arch, where `usize` comfortably indexes any buffer
/// the engine will ever see.
pub type Pos = usize;

impl BlockRange {
    /// Number of positions covered. Both endpoints are inclusive, so a
    /// range never covers fewer than one.
    #[inline(always)]
    pub fn len(&self) -> Pos {
        self.end - self.begin + 1
    }
}

impl std::fmt::Display for BlockRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.begin, self.end)
    }
}

/// Everything that can go wrong at the engine's boundary. All of these
/// point at a broken precondition or a broken implementation; none of
/// them is transient, so no retry policy exists.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectError {
    /// An empty buffer, or a sub-range whose left end sits past its
    /// right end where that is not allowed.
    #[error("invalid range [{left}, {right}]")]
    InvalidRange { left: Pos, right: Pos },
    /// The requested rank does not exist in the buffer.
    #[error("rank {rank} outside [0, {len})")]
    OutOfRangeRank { rank: Pos, len: Pos },
    /// Block accounting went wrong: the claims of one round do not tile
    /// their bound. Fatal--it means two holders could have written the
    /// same position.
    #[error("block accounting violation: {detail}")]
    InvariantViolation { detail: String },
}

/// What one neutralization scan reports back. See
/// [`neutral`](crate::neutral) for the scan itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeutralOutcome {
    /// Every element of the left block now sits below the pivot, over
    /// the block's *entire* range. `resume` is how far the right block's
    /// scan got; hand it back on the next call so validated work is
    /// never rescanned.
    LeftDone { resume: Pos },
    /// Mirror image: the right block is entirely at-or-above the pivot,
    /// `resume` is the left block's scan offset.
    RightDone { resume: Pos },
    /// Both blocks finished on the same step.
    BothDone,
}

//---START SHARED BUFFER PRIMITIVES
/// A length-tagged raw handle over one externally owned buffer, shared
/// by all workers of a claim round.
///
/// The borrow checker cannot see that dynamically claimed
/// [`BlockRange`]s are disjoint, so the handle is built once from the
/// exclusive borrow and workers carve their blocks out of it on demand.
/// All the unsafety of the concurrent phase is confined here.
pub struct RawArray<'a, T> {
    ptr:    *mut T,
    len:    usize,
    _own:   PhantomData<&'a mut [T]>,
}

// One worker at a time touches any given position; see `claim_pair`.
unsafe impl<T: Send> Send for RawArray<'_, T> {}
unsafe impl<T: Send> Sync for RawArray<'_, T> {}

impl<'a, T> RawArray<'a, T> {
    pub fn new(buf: &'a mut [T]) -> Self {
        Self {
            ptr:    buf.as_mut_ptr(),
            len:    buf.len(),
            _own:   PhantomData,
        }
    }

    /// Materializes mutable views of two held blocks.
    ///
    /// SAFETY: the caller must hold both blocks as live claims out of
    /// the round's [`BlockLedger`], and must not let the views outlive
    /// those claims. The ledger guarantees no other worker holds any
    /// overlapping range, which is exactly what makes the two `&mut`
    /// sound.
    pub unsafe fn claim_pair(&self, a: BlockRange, b: BlockRange) -> (&mut [T], &mut [T]) {
        // A left claim always sits strictly before a right claim; a
        // violation means the ledger's accounting broke.
        assert!(a.end < b.begin, "overlapping claims {a} and {b}");
        assert!(b.end < self.len, "claim {b} past buffer end {}", self.len);

        (
            std::slice::from_raw_parts_mut(self.ptr.add(a.begin), a.len()),
            std::slice::from_raw_parts_mut(self.ptr.add(b.begin), b.len()),
        )
    }
}
//---END SHARED BUFFER PRIMITIVES

//---START EXTERNAL INTERFACES
// The engine itself is container-agnostic; the `topk` binary feeds it
// from the simplest source there is.

/// Reads one signed integer per line. Blank lines are skipped.
pub fn read_values_from_path(path: PathBuf) -> Result<Vec<i64>, Box<dyn std::error::Error>> {
    let fd = std::fs::File::open(path.as_path())?;
    let reader = BufReader::new(fd);
    let mut res = vec![];
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        res.push(trimmed.parse::<i64>()?);
    }

    Ok(res)
}
//---END EXTERNAL INTERFACES
