use crate::helpe::*;
use crate::neutral::neutralize;

/// Everything one claim round leaves behind, consolidated across
/// workers: fully neutralized blocks per side, plus whatever blocks
/// were still outstanding when the ledger drained.
#[derive(Default)]
pub struct RoundLog {
    neutral_left:   Vec<BlockRange>,
    neutral_right:  Vec<BlockRange>,
    leftover_left:  Vec<BlockRange>,
    leftover_right: Vec<BlockRange>,
}

/// One worker's claim loop: hold a left block and a right block, grind
/// them against each other, replace whichever side neutralizes, until a
/// replacement claim fails.
fn drive_claims<T: Ord>(
    buf:    &RawArray<'_, T>,
    ledger: &BlockLedger,
    pivot:  &T,
    log:    &Mutex<RoundLog>,
) {
    let mut left_block = ledger.take_next_left();
    let mut right_block = ledger.take_next_right();
    let (mut i, mut j) = (0, 0);
    let mut neutral_left = vec![];
    let mut neutral_right = vec![];

    while let (Some(lb), Some(rb)) = (left_block, right_block) {
        // SAFETY: `lb` and `rb` are live claims out of `ledger`, held
        // by this worker alone, and the views die at the end of this
        // iteration.
        let (l, r) = unsafe { buf.claim_pair(lb, rb) };
        match neutralize(l, i, r, j, pivot) {
            NeutralOutcome::RightDone { resume } => {
                neutral_right.push(rb);
                right_block = ledger.take_next_right();
                i = resume;
                j = 0;
            }
            NeutralOutcome::LeftDone { resume } => {
                neutral_left.push(lb);
                left_block = ledger.take_next_left();
                i = 0;
                j = resume;
            }
            NeutralOutcome::BothDone => {
                neutral_left.push(lb);
                neutral_right.push(rb);
                left_block = ledger.take_next_left();
                right_block = ledger.take_next_right();
                i = 0;
                j = 0;
            }
        }
    }

    // The loop drops out the moment either side fails to claim, so at
    // most one block is still outstanding here.
    debug_assert!(left_block.is_none() || right_block.is_none());

    let mut guard = log.lock().unwrap();
    guard.neutral_left.append(&mut neutral_left);
    guard.neutral_right.append(&mut neutral_right);
    if let Some(lb) = left_block {
        guard.leftover_left.push(lb);
    } else if let Some(rb) = right_block {
        guard.leftover_right.push(rb);
    }
}

/// Single-pass, in-place two-way partition of `buf[left..=right]`.
/// Used below one block's worth of elements, where fanning out is not
/// worth it, and for finishing a round's leftover middle.
pub fn partition_sequential<T: Ord>(buf: &mut [T], left: Pos, right: Pos, pivot: &T) -> Pos {
    let mut store = left;
    for at in left..=right {
        if buf[at] < *pivot {
            buf.swap(at, store);
            store += 1;
        }
    }

    store
}

/// Checks that one round's grants tile `[left, right]` exactly. A gap
/// or an overlap here means two workers could have raced on the same
/// positions, which voids the whole round.
fn verify_claims(left: Pos, right: Pos, log: &RoundLog) -> Result<(), SelectError> {
    let mut cursor = left;
    for b in log
        .neutral_left
        .iter()
        .chain(log.leftover_left.iter())
        .chain(log.neutral_right.iter())
        .chain(log.leftover_right.iter())
        .sorted_unstable_by_key(|b| b.begin)
    {
        if b.begin != cursor {
            return Err(SelectError::InvariantViolation {
                detail: format!("grants leave [{left}, {right}] miscovered at {cursor}, saw {b}"),
            });
        }
        cursor = b.end + 1;
    }
    if cursor != right + 1 {
        return Err(SelectError::InvariantViolation {
            detail: format!("grants stop at {cursor}, bound ends at {right}"),
        });
    }

    Ok(())
}

fn swap_span<T>(buf: &mut [T], a: BlockRange, b: BlockRange) {
    debug_assert!(a.len() == b.len(), "unequal spans {a} and {b}");
    for k in 0..a.len() {
        buf.swap(a.begin + k, b.begin + k);
    }
}

/// Sweeps the left flank: neutralized content moves to the lowest
/// positions, leftovers bubble toward the middle. Returns the first
/// position *not* guaranteed below the pivot.
///
/// Pairs the lowest leftover against the highest neutralized block and
/// swaps block for block. Unequal pairs (the ledger's remainder block)
/// trade only the overlapping prefix; the longer block shrinks and
/// stays in play for the next pairing.
fn sweep_left<T>(buf: &mut [T], left: Pos, log: &RoundLog) -> Pos {
    let mut rem: Vec<BlockRange> = log
        .leftover_left
        .iter()
        .copied()
        .sorted_unstable_by_key(|b| b.begin)
        .collect();
    let mut neut: Vec<BlockRange> = log
        .neutral_left
        .iter()
        .copied()
        .sorted_unstable_by(|a, b| b.begin.cmp(&a.begin))
        .collect();

    let mut new_left = left;
    if let Some(first) = neut.first() {
        new_left = first.end + 1;
    }

    let (mut si, mut ni) = (0, 0);
    while si < rem.len() && ni < neut.len() {
        let s = rem[si];
        let n = neut[ni];
        if s.begin > n.begin {
            // Every neutralized block already sits left of every
            // remaining leftover.
            break;
        }
        if s.len() == n.len() {
            swap_span(buf, s, n);
            new_left = s.end + 1;
            si += 1;
            ni += 1;
        } else if s.len() < n.len() {
            // Trade the whole leftover for the neutralized block's
            // tail; its head stays neutralized and stays in play.
            let piece = BlockRange { begin: n.end + 1 - s.len(), end: n.end };
            swap_span(buf, s, piece);
            neut[ni].end = piece.begin - 1;
            new_left = s.end + 1;
            si += 1;
        } else {
            // Neutralized block is the short one: fill the leftover's
            // head and shrink it for the next pairing.
            let piece = BlockRange { begin: s.begin, end: s.begin + n.len() - 1 };
            swap_span(buf, piece, n);
            rem[si].begin = piece.end + 1;
            new_left = piece.end + 1;
            ni += 1;
        }
    }

    new_left
}

/// Mirror of [`sweep_left`]: neutralized content moves to the highest
/// positions. Returns the last position *not* guaranteed at-or-above
/// the pivot.
fn sweep_right<T>(buf: &mut [T], right: Pos, log: &RoundLog) -> Pos {
    let mut rem: Vec<BlockRange> = log
        .leftover_right
        .iter()
        .copied()
        .sorted_unstable_by(|a, b| b.begin.cmp(&a.begin))
        .collect();
    let mut neut: Vec<BlockRange> = log
        .neutral_right
        .iter()
        .copied()
        .sorted_unstable_by_key(|b| b.begin)
        .collect();

    let mut new_right = right;
    if let Some(first) = neut.first() {
        new_right = first.begin - 1;
    }

    let (mut si, mut ni) = (0, 0);
    while si < rem.len() && ni < neut.len() {
        let s = rem[si];
        let n = neut[ni];
        if s.begin < n.begin {
            break;
        }
        if s.len() == n.len() {
            swap_span(buf, s, n);
            new_right = s.begin - 1;
            si += 1;
            ni += 1;
        } else if s.len() < n.len() {
            let piece = BlockRange { begin: n.begin, end: n.begin + s.len() - 1 };
            swap_span(buf, s, piece);
            neut[ni].begin = piece.end + 1;
            new_right = s.begin - 1;
            si += 1;
        } else {
            let piece = BlockRange { begin: s.end + 1 - n.len(), end: s.end };
            swap_span(buf, piece, n);
            rem[si].end = piece.begin - 1;
            new_right = piece.begin - 1;
            ni += 1;
        }
    }

    new_right
}

/// One full claim round over `[left, right]`: fan the claim loop out
/// across workers, join, then sequentially sweep both flanks. Returns
/// the shrunken middle `(new_left, new_right)`; positions below
/// `new_left` are settled under the pivot, positions above `new_right`
/// at or above it.
///
/// The sweeps run strictly after every worker has observed ledger
/// exhaustion--they swap whole blocks across the bound, which is only
/// sound once nobody holds a claim.
pub fn partition_round<T: Ord + Send + Sync>(
    buf:        &mut [T],
    left:       Pos,
    right:      Pos,
    block_size: Pos,
    pivot:      &T,
) -> Result<(Pos, Pos), SelectError> {
    let ledger = BlockLedger::new(left, right, block_size);
    // Each worker needs a block pair in hand to make progress.
    let workers = rayon::current_num_threads()
        .min(ledger.total_blocks() / 2)
        .max(1);

    let log = Arc::new(Mutex::new(RoundLog::default()));
    {
        let shared = RawArray::new(&mut *buf);
        (0..workers).into_par_iter().for_each(|_| {
            drive_claims(&shared, &ledger, pivot, &log);
        });
    }

    let log = match Arc::into_inner(log) {
        Some(v) => v.into_inner().unwrap(),
        // All workers have joined; `log` has one strong reference.
        None => panic!("could not unwrap round log"),
    };

    verify_claims(left, right, &log)?;
    let new_left = sweep_left(buf, left, &log);
    let new_right = sweep_right(buf, right, &log);

    debug_assert!(
        buf[left..new_left].iter().all(|v| *v < *pivot),
        "left flank not settled"
    );
    debug_assert!(
        buf[new_right + 1..=right].iter().all(|v| *v >= *pivot),
        "right flank not settled"
    );

    Ok((new_left, new_right))
}

/// Partitions `buf[left..=right]` around `pivot` so the result matches
/// a sequential two-way partition in classification: everything below
/// the returned boundary is under the pivot, everything from it onward
/// at or above. Equal elements keep no particular order.
pub fn partition_driver<T: Ord + Send + Sync>(
    buf:        &mut [T],
    left:       Pos,
    right:      Pos,
    block_size: Pos,
    pivot:      &T,
) -> Result<Pos, SelectError> {
    if right - left + 1 <= block_size {
        return Ok(partition_sequential(buf, left, right, pivot));
    }

    let (new_left, new_right) = partition_round(buf, left, right, block_size, pivot)?;
    if new_left > new_right {
        // Empty middle: the flanks meet and the seam is the boundary.
        return Ok(new_left);
    }
    // The flanks are settled; only the shrunken middle still mixes
    // sides. Same pivot, fresh ledger. A one-element middle lands in
    // the sequential fallback above--it is narrowed, not yet
    // classified.
    partition_driver(buf, new_left, new_right, block_size, pivot)
}
