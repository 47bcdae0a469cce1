//! Static striping arithmetic: the fixed-ownership alternative to the
//! dynamic [`BlockLedger`](crate::BlockLedger).
//!
//! A sequence of `length` elements is cut into consecutive blocks of
//! `block` elements and dealt round-robin to `owners` peers: owner `k`
//! gets blocks `k`, `owners + k`, `2 * owners + k`, and so on, with the
//! trailing partial block landing on whichever owner's turn coincides
//! with it. The two functions below are pure bookkeeping over that
//! deal--nothing in the concurrent path calls them; they document the
//! layout a static split would use.

use crate::helpe::Pos;

/// How many elements owner `k` ends up holding.
pub fn stripe_length(length: Pos, owners: Pos, block: Pos, k: Pos) -> Pos {
    let full_blocks = length / block;
    let tail = length % block;

    // Every owner gets the guaranteed whole rounds...
    let mut held = (full_blocks / owners) * block;
    // ...early owners get one whole block from the last round...
    if full_blocks % owners > k {
        held += block;
    }
    // ...and the partial tail lands on the next owner in turn.
    if full_blocks % owners == k {
        held += tail;
    }

    held
}

/// Global position of owner `k`'s `i`-th element (0-based within the
/// owner's contiguous view of its stripes).
pub fn stripe_index(owners: Pos, block: Pos, k: Pos, i: Pos) -> Pos {
    // Consecutive owned blocks sit one full round apart.
    let round = owners * block;
    let owned_block = i / block;
    let first_block_at = k * block;

    first_block_at + owned_block * round + i % block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stripe_lengths_sum_to_whole() {
        for length in 0..20 {
            for block in 1..20 {
                for owners in 1..20 {
                    let total: Pos = (0..owners)
                        .map(|k| stripe_length(length, owners, block, k))
                        .sum();
                    assert_eq!(
                        total, length,
                        "lengths disagree for length {length}, block {block}, owners {owners}"
                    );
                }
            }
        }
    }

    #[test]
    fn stripe_indices_are_a_bijection_in_deal_order() {
        for length in 0..20 {
            for block in 1..20 {
                for owners in 1..20 {
                    let mut owner_of = vec![None; length];
                    for k in 0..owners {
                        for i in 0..stripe_length(length, owners, block, k) {
                            let at = stripe_index(owners, block, k, i);
                            assert!(at < length, "position {at} out of bounds");
                            assert!(
                                owner_of[at].is_none(),
                                "position {at} owned twice (owners {owners}, block {block})"
                            );
                            owner_of[at] = Some(k);
                        }
                    }

                    // Full coverage, and ownership cycles round-robin
                    // as the global position grows.
                    let mut current = None;
                    for (at, owner) in owner_of.into_iter().enumerate() {
                        let owner = owner.unwrap_or_else(|| panic!("position {at} unowned"));
                        match current {
                            Some(c) if c == owner => {}
                            Some(c) => {
                                assert_eq!(
                                    owner,
                                    (c + 1) % owners,
                                    "owner order broken at position {at}"
                                );
                                current = Some(owner);
                            }
                            None => {
                                assert_eq!(owner, 0, "deal must start at owner 0");
                                current = Some(owner);
                            }
                        }
                    }
                }
            }
        }
    }
}
