pub mod common;
pub use common::*;

use copse::example_data::*;
use copse::*;
use itertools::Itertools;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn seeded<D: Data, M: Mode>(seed: u64) -> Forest<D, M> {
    Forest::with_config(ForestConfig::default().with_seed(seed))
}

#[test]
fn add_then_query_then_kth() {
    let mut forest: Forest<StdNum> = seeded(1);
    let root = forest.build(vec![5, 3, 8, 1, 9]);
    let mut root = forest.range_apply(root, 1, 3, Tag::Add(10).into()).unwrap();
    assert_eq!(forest.to_vec(root).unwrap(), vec![5, 13, 18, 11, 9]);
    assert_eq!(forest.range_query(&mut root, 0, 4).unwrap().sum, 56);
    // positional: the fourth value in sequence order
    assert_eq!(forest.kth(root, 3), Ok(&11));

    // by value: the value with three smaller values before it
    let mut set: OrderedMultiset<SetNum> = forest.to_vec(root).unwrap().into_iter().collect();
    assert_eq!(set.kth(3), Some(&13));
}

#[test]
fn reverse_whole_sequence() {
    let mut forest: Forest<StdNum> = seeded(2);
    let root = forest.build(vec![5, 13, 18, 11, 9]);
    let root = forest.range_apply(root, 0, 4, Tag::Reverse.into()).unwrap();
    assert_eq!(forest.kth(root, 0), Ok(&9));
    assert_eq!(forest.to_vec(root).unwrap(), vec![9, 11, 18, 13, 5]);
    forest.assert_correctness(root);
}

#[test]
fn split_then_merge_is_unchanged() {
    let mut forest: Forest<StdNum> = seeded(3);
    let root = forest.build(vec![5, 13, 18, 11, 9]);
    let (left, right) = forest.split_by_rank(root, 2).unwrap();
    assert_eq!(forest.to_vec(left).unwrap(), vec![5, 13]);
    assert_eq!(forest.to_vec(right).unwrap(), vec![18, 11, 9]);
    let root = forest.merge(left, right).unwrap();
    assert_eq!(forest.to_vec(root).unwrap(), vec![5, 13, 18, 11, 9]);
    forest.assert_correctness(root);
}

#[test]
fn reverse_twice_and_add_back_restore() {
    let mut rng = StdRng::seed_from_u64(4);
    let values: Vec<i64> = (0..300).map(|_| rng.gen_range(-1000..1000)).collect();
    let mut forest: Forest<StdNum> = seeded(4);
    let mut root = forest.build(values.clone());
    for _ in 0..100 {
        let range = random_range(&mut rng, values.len());
        if range.is_empty() {
            continue;
        }
        let (start, end) = (range.start, range.end - 1);
        let delta = rng.gen_range(-50..50);
        root = forest.reverse(root, start, end).unwrap();
        root = forest.range_apply(root, start, end, RangeAction::add(delta)).unwrap();
        root = forest.reverse(root, start, end).unwrap();
        root = forest.range_apply(root, start, end, RangeAction::add(-delta)).unwrap();
    }
    forest.assert_correctness(root);
    assert_eq!(forest.to_vec(root).unwrap(), values);
}

#[test]
fn tags_compose_in_order() {
    let mut forest: Forest<StdNum> = seeded(5);
    let root = forest.build(0..10);
    // add, then assign over part of the range: the assignment wins where it applies
    let root = forest.range_apply(root, 0, 9, RangeAction::add(5)).unwrap();
    let root = forest.range_apply(root, 3, 6, RangeAction::assign(-1)).unwrap();
    // add after assign accumulates
    let root = forest.range_apply(root, 2, 4, RangeAction::add(2)).unwrap();
    let root = forest.reverse(root, 0, 9).unwrap();
    assert_eq!(
        forest.to_vec(root).unwrap(),
        vec![14, 13, 12, -1, -1, 1, 1, 9, 6, 5]
    );
    forest.assert_correctness(root);
}

#[test]
fn stale_handles_are_rejected() {
    let mut forest: Forest<StdNum> = seeded(6);
    let a = forest.build(0..10);
    let b = forest.build(10..20);
    let merged = forest.merge(a, b).unwrap();
    assert_eq!(forest.size(a), Err(TreeError::InvalidHandle));
    assert_eq!(forest.size(b), Err(TreeError::InvalidHandle));
    assert_eq!(forest.merge(a, merged), Err(TreeError::InvalidHandle));
    // the failed merge didn't consume the good handle
    assert_eq!(forest.size(merged), Ok(20));

    let (root, _) = forest.delete(merged, 0).unwrap();
    assert_eq!(forest.kth(merged, 0), Err(TreeError::InvalidHandle));
    let removed = forest.take_values(root).unwrap();
    assert_eq!(removed, (1..20).collect::<Vec<i64>>());
    assert!(forest.is_empty());
    assert_eq!(forest.free_tree(root), Err(TreeError::InvalidHandle));
}

#[test]
fn clear_invalidates_everything() {
    let mut forest: Forest<StdNum> = seeded(7);
    let roots = (0..5).map(|i| forest.build(i * 10..i * 10 + 10)).collect_vec();
    forest.clear();
    assert!(forest.is_empty());
    for root in roots {
        assert_eq!(forest.size(root), Err(TreeError::InvalidHandle));
    }
    // the empty tree has no handle to go stale
    assert_eq!(forest.size(None), Ok(0));
}

#[test]
fn without_recycling_slots_are_not_reused() {
    let mut forest: Forest<StdNum> = Forest::with_config(
        ForestConfig::default()
            .with_seed(8)
            .with_capacity(16)
            .recycle_handles(false),
    );
    let root = forest.build(0..4);
    let values = forest.take_values(root).unwrap();
    assert_eq!(values, vec![0, 1, 2, 3]);
    let root = forest.build(4..8);
    assert_eq!(forest.to_vec(root).unwrap(), vec![4, 5, 6, 7]);
    assert_eq!(forest.len(), 4);
}

#[test]
fn errors_leave_trees_intact() {
    let mut forest: Forest<StdNum> = seeded(9);
    let mut root = forest.build(0..5);
    assert_eq!(
        forest.range_apply(root, 2, 5, RangeAction::add(1)),
        Err(TreeError::OutOfRange { index: 5, len: 5 })
    );
    assert_eq!(
        forest.range_query(&mut root, 3, 2),
        Err(TreeError::InvalidRange { start: 3, end: 3, len: 5 })
    );
    assert_eq!(
        forest.split_by_rank(root, 6),
        Err(TreeError::OutOfRange { index: 6, len: 5 })
    );
    assert_eq!(
        forest.insert(root, 6, 0),
        Err(TreeError::OutOfRange { index: 6, len: 5 })
    );
    assert_eq!(forest.to_vec(root).unwrap(), vec![0, 1, 2, 3, 4]);

    let mut keyed: Forest<SetNum, ByKey> = seeded(9);
    let root = keyed.build(vec![1, 4, 9]).unwrap();
    assert_eq!(keyed.delete(root, &5).map(|(_, v)| v), Err(TreeError::NotFound));
    assert_eq!(keyed.size(root), Ok(3));
}

#[test]
fn handles_do_not_cross_forests() {
    let mut first: Forest<StdNum> = seeded(0);
    let mut second: Forest<StdNum> = seeded(0);
    let first_root = first.build(0..10);
    let second_root = second.build(Some(100));
    assert_eq!(first.free_tree(second_root), Err(TreeError::InvalidHandle));
    assert_eq!(first.size(second_root), Err(TreeError::InvalidHandle));
    assert_eq!(
        first.merge(first_root, second_root),
        Err(TreeError::InvalidHandle)
    );
    assert_eq!(second.kth(first_root, 0), Err(TreeError::InvalidHandle));
    first.assert_correctness(first_root);
    assert_eq!(first.to_vec(first_root).unwrap(), (0..10).collect_vec());
    assert_eq!(second.to_vec(second_root).unwrap(), vec![100]);
}

#[test]
fn large_values_are_summed_exactly() {
    let big = i64::MAX / 2 + 1;
    let seq: Sequence<StdNum> = vec![big, big].into_iter().collect();
    assert_eq!(seq.summary().sum, 2 * i128::from(big));
    let mut forest: Forest<StdNum> = seeded(14);
    let root = forest.build(vec![i64::MIN, i64::MAX, i64::MIN, 0]);
    let root = forest.range_apply(root, 0, 3, RangeAction::assign(i64::MAX)).unwrap();
    assert_eq!(forest.summary(root).unwrap().sum, 4 * i128::from(i64::MAX));
    forest.assert_correctness(root);
}

#[test]
fn random_rounds_match_vec() {
    let mut rng = StdRng::seed_from_u64(10);
    check_consistency(&mut rng, 200, 2_000);
}

#[test]
fn order_statistics_match_sorted_reference() {
    let mut rng = StdRng::seed_from_u64(11);
    let values: Vec<i64> = (0..500).map(|_| rng.gen_range(-300..300)).collect();
    let mut set: OrderedMultiset<SetNum> = values.iter().copied().collect();
    let sorted = values.iter().copied().sorted().collect_vec();
    for (k, expected) in sorted.iter().enumerate() {
        assert_eq!(set.kth(k), Some(expected));
    }
    assert_eq!(set.kth(sorted.len()), None);
    for (count, &key) in sorted.iter().dedup_with_count() {
        let rank = set.rank(&key);
        assert_eq!(sorted[rank], key);
        assert_eq!(set.rank(&(key + 1)) - rank, count);
    }
    set.assert_correctness();
}

#[test]
fn many_singleton_unions() {
    let mut forest: Forest<SetNum, ByKey> = seeded(12);
    let mut rng = StdRng::seed_from_u64(12);
    let mut root = None;
    let mut values = vec![];
    for _ in 0..1000 {
        let value: i64 = rng.gen_range(0..10_000);
        values.push(value);
        let single = forest.build(Some(value)).unwrap();
        root = forest.union(root, single).unwrap();
    }
    forest.assert_correctness(root);
    forest.assert_sorted(root);
    values.sort();
    assert_eq!(forest.to_vec(root).unwrap(), values);
}

#[test]
fn deep_trees_do_not_overflow_the_stack() {
    // long sequences built one value at a time, then split into many pieces and merged
    let mut seq: Sequence<StdNum> = Sequence::with_config(ForestConfig::default().with_seed(13));
    for value in 0..200_000 {
        seq.push_back(value);
    }
    let tail = seq.split_off(100_000).unwrap();
    seq.append(tail);
    assert_eq!(seq.summary().sum, (0..200_000i128).sum::<i128>());
    assert_eq!(seq.len(), 200_000);
    let values = seq.into_vec();
    assert!(values.iter().tuple_windows().all(|(a, b)| a < b));
}
