pub mod partition;
pub mod select;

use crate::helpe::*;

/// Moves the `rank + 1` smallest values of `buf` into its head, in
/// place, and returns the position of the rank-`rank` value--which is
/// always `rank` itself once the dust settles.
///
/// Equal values keep no particular order; the head is a set, not a
/// sorted prefix.
pub fn select_top<T>(buf: &mut [T], rank: Pos, block_size: Pos) -> Result<Pos, SelectError>
where
    T: Ord + Clone + Send + Sync,
{
    assert!(block_size > 0, "zero block size");
    if buf.is_empty() {
        return Err(SelectError::InvalidRange { left: 0, right: 0 });
    }
    if rank >= buf.len() {
        return Err(SelectError::OutOfRangeRank { rank, len: buf.len() });
    }

    select::select_driver(buf, rank, block_size)
}

/// In-place two-way partition of `buf[left..=right]` around
/// `pivot`: returns the boundary `b` with everything in
/// `buf[left..b]` below the pivot and everything in `buf[b..=right]` at
/// or above it. Elements outside the sub-range are never touched.
pub fn partition_parallel<T>(
    buf:        &mut [T],
    left:       Pos,
    right:      Pos,
    block_size: Pos,
    pivot:      T,
) -> Result<Pos, SelectError>
where
    T: Ord + Send + Sync,
{
    assert!(block_size > 0, "zero block size");
    if left > right || right >= buf.len() {
        return Err(SelectError::InvalidRange { left, right });
    }

    partition::partition_driver(buf, left, right, block_size, &pivot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_is_rejected() {
        let mut vals: Vec<i64> = vec![];
        assert_eq!(
            select_top(&mut vals, 0, 4),
            Err(SelectError::InvalidRange { left: 0, right: 0 })
        );
    }

    #[test]
    fn out_of_range_rank_is_rejected() {
        let mut vals = vec![3, 1, 2];
        assert_eq!(
            select_top(&mut vals, 3, 4),
            Err(SelectError::OutOfRangeRank { rank: 3, len: 3 })
        );
    }

    #[test]
    fn inverted_sub_range_is_rejected() {
        let mut vals = vec![3, 1, 2];
        assert_eq!(
            partition_parallel(&mut vals, 2, 1, 4, 2),
            Err(SelectError::InvalidRange { left: 2, right: 1 })
        );
        assert_eq!(
            partition_parallel(&mut vals, 0, 3, 4, 2),
            Err(SelectError::InvalidRange { left: 0, right: 3 })
        );
    }
}
