//! End-to-end checks of the public selection and partition entry
//! points, on loads big enough that the claim loop genuinely fans out.

use corank::algo::{partition_parallel, select_top};
use rand::{thread_rng, Rng};

#[test]
fn select_top_pins_the_exact_rank() {
    let mut rng = thread_rng();
    let n = 10 * 1000;
    let top = 100;

    let original: Vec<i64> = (0..n).map(|_| rng.gen()).collect();
    let mut values = original.clone();

    let at = select_top(&mut values, top, 100).unwrap();
    assert_eq!(at, top);

    let mut sorted = original;
    sorted.sort_unstable();
    assert_eq!(values[top], sorted[top]);

    let mut head = values[..=top].to_vec();
    head.sort_unstable();
    assert_eq!(head, sorted[..=top]);
}

#[test]
fn select_top_survives_all_duplicates() {
    let mut values = vec![7i64; 1000];
    assert_eq!(select_top(&mut values, 613, 8).unwrap(), 613);
}

#[test]
fn partition_parallel_classifies_and_permutes() {
    let mut rng = thread_rng();
    for _ in 0..20 {
        let n = rng.gen_range(2..5000);
        let original: Vec<i64> = (0..n).map(|_| rng.gen_range(-1000..1000)).collect();
        let pivot = original[rng.gen_range(0..original.len())];
        let block_size = rng.gen_range(1..=256);

        let mut values = original.clone();
        let b = partition_parallel(&mut values, 0, original.len() - 1, block_size, pivot).unwrap();

        assert!(values[..b].iter().all(|v| *v < pivot));
        assert!(values[b..].iter().all(|v| *v >= pivot));

        let mut sorted = values;
        sorted.sort_unstable();
        let mut expected = original;
        expected.sort_unstable();
        assert_eq!(sorted, expected);
    }
}

#[test]
fn documented_example_partitions_at_seven() {
    let mut values = vec![1, 4, 7, 3, 2, 9, 10, 8, 5, 6];
    let b = partition_parallel(&mut values, 0, 9, 2, 8).unwrap();
    assert_eq!(b, 7);
    assert!(values[..7].iter().all(|v| *v < 8));
    assert!(values[7..].iter().all(|v| *v >= 8));
}

#[test]
fn documented_example_selects_among_ones() {
    let mut values = vec![1i64; 10];
    assert_eq!(select_top(&mut values, 5, 1).unwrap(), 5);
}
