use crate::helpe::*;

/// Two-pointer neutralization scan over one left block and one right
/// block, around `pivot`.
///
/// Scans `left` upward from offset `i` for the first element at or
/// above the pivot, `right` upward from offset `j` for the first
/// element below it, swaps the two finds, and repeats until one block
/// runs out. Both offsets are *resume* points from an earlier call on
/// the same block, so validated prefixes are never rescanned.
///
/// The reported side holds its inequality over the block's entire
/// range, not just the scanned part: a swap only ever plants an
/// element that was already classified for that side.
///
/// The blocks must come from disjoint claims of the same round.
pub fn neutralize<T: Ord>(
    left:   &mut [T],
    mut i:  Pos,
    right:  &mut [T],
    mut j:  Pos,
    pivot:  &T,
) -> NeutralOutcome {
    while i < left.len() && j < right.len() {
        while i < left.len() && left[i] < *pivot {
            i += 1;
        }
        while j < right.len() && right[j] >= *pivot {
            j += 1;
        }
        if i == left.len() || j == right.len() {
            break;
        }
        std::mem::swap(&mut left[i], &mut right[j]);
        i += 1;
        j += 1;
    }

    if i == left.len() && j == right.len() {
        NeutralOutcome::BothDone
    } else if i == left.len() {
        NeutralOutcome::LeftDone { resume: j }
    } else {
        NeutralOutcome::RightDone { resume: i }
    }
}
