use crate::helpe::*;
use super::partition::{partition_round, partition_sequential};

/// One selection round: a single ledger lifetime, claims until drained,
/// one pair of flank sweeps--and a sequential finish of whatever middle
/// the leftovers kept mixed. No recursive re-rounds here; the loop in
/// [`select_driver`] narrows on ranks, not on blocks.
fn selection_round<T: Ord + Send + Sync>(
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
        return Ok(new_left);
    }

    Ok(partition_sequential(buf, new_left, new_right, pivot))
}

/// Quickselect over the block-parallel partitioner. On return, position
/// `top` holds exactly the value of sorted rank `top`, and everything
/// before it is drawn from the `top` smallest values (in no particular
/// order).
///
/// Expected-linear total work through uniform pivot sampling; no
/// defense against adversarial inputs beyond that.
pub fn select_driver<T: Ord + Clone + Send + Sync>(
    buf:        &mut [T],
    top:        Pos,
    block_size: Pos,
) -> Result<Pos, SelectError> {
    use rand::{thread_rng, Rng};

    let mut left = 0;
    let mut right = buf.len() - 1;
    loop {
        if left == right {
            return Ok(left);
        }

        let seed = thread_rng().gen_range(left..=right);
        let pivot = buf[seed].clone();

        let mut at = selection_round(buf, left, right, block_size, &pivot)?;
        if top == at {
            return Ok(at);
        }
        if top > at {
            // Hop over the run of pivot copies sitting at the
            // boundary. Without this, an all-duplicate range could
            // never shrink past the true rank.
            while buf[at] == pivot {
                if top == at {
                    return Ok(at);
                }
                at += 1;
            }
            left = at;
        } else {
            while buf[at] == pivot {
                if top == at {
                    return Ok(at);
                }
                at -= 1;
            }
            right = at;
        }
    }
}
