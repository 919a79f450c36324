pub mod common;
pub use common::*;

use copse::example_data::*;
use copse::*;
use proptest::prelude::*;

pub fn round_action_strategy(len: usize) -> impl Strategy<Value = RoundAction> {
    let range_strat =
        (0..len, 0..len).prop_filter_map("illogical range (start > end)", |(start, end)| {
            if start <= end {
                Some(start..end)
            } else {
                None
            }
        });
    // Delete
    (0..len)
        .prop_map(|index| RoundAction::Delete { index })
        .boxed()
        .prop_union(
            // Insert
            (0..=len, -MAX_ADD..MAX_ADD)
                .prop_map(|(index, value)| RoundAction::Insert { index, value })
                .boxed(),
        )
        // Act
        .or((range_strat.clone(), range_action_strategy())
            .prop_map(|(range, action)| RoundAction::Act { range, action })
            .boxed())
        // Query
        .or(range_strat
            .prop_map(|range| RoundAction::Query { range })
            .boxed())
}

pub fn range_action_strategy() -> impl Strategy<Value = RangeAction> {
    (
        proptest::bool::ANY,
        proptest::option::weighted(0.25, -MAX_ADD..MAX_ADD),
        -MAX_ADD..MAX_ADD,
    )
        .prop_map(|(reverse, assign, add)| RangeAction {
            reverse,
            assign,
            add,
        })
}

const INITIAL_LEN: usize = 100;

fn initial_values() -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::vec(-200..200i64, 0..INITIAL_LEN)
}

fn rounds() -> impl Strategy<Value = Vec<RoundAction>> {
    proptest::collection::vec(round_action_strategy(INITIAL_LEN), 1..200)
}

/// Runs the rounds on a sequence and a vector. Rounds whose indices don't fit the
/// current length are skipped.
fn check_sequence_against_vec(
    initial: &[i64],
    rounds: &[RoundAction],
) -> std::result::Result<(), TestCaseError> {
    let mut values = initial.to_vec();
    let mut seq: Sequence<StdNum> = values.iter().copied().collect();
    for round in rounds {
        let len = values.len();
        let fits = match round {
            RoundAction::Act { range, .. } | RoundAction::Query { range } => range.end <= len,
            RoundAction::Insert { index, .. } => *index <= len,
            RoundAction::Delete { index } => *index < len,
        };
        if !fits {
            continue;
        }
        let expected = run_round_on_vec(round.clone(), &mut values);
        let res = run_round(round.clone(), &mut seq);
        prop_assert_eq!(res, expected);
        prop_assert_eq!(seq.summary(), Aggregate::of(&values));
    }
    seq.assert_correctness();
    prop_assert_eq!(seq.to_vec(), values);
    Ok(())
}

#[derive(Clone, Debug)]
enum SetRound {
    Insert(i64),
    Remove(i64),
    Rank(i64),
    Kth(usize),
    Neighbors(i64),
    Range(i64, i64),
}

fn set_round_strategy() -> impl Strategy<Value = SetRound> {
    prop_oneof![
        (-50..50i64).prop_map(SetRound::Insert),
        (-50..50i64).prop_map(SetRound::Remove),
        (-55..55i64).prop_map(SetRound::Rank),
        (0..120usize).prop_map(SetRound::Kth),
        (-55..55i64).prop_map(SetRound::Neighbors),
        (-55..55i64, -55..55i64).prop_map(|(a, b)| SetRound::Range(a, b)),
    ]
}

fn check_multiset_against_sorted_vec(
    initial: &[i64],
    rounds: &[SetRound],
) -> std::result::Result<(), TestCaseError> {
    let mut values = initial.to_vec();
    values.sort();
    let mut set: OrderedMultiset<SetNum> = initial.iter().copied().collect();
    for round in rounds {
        match *round {
            SetRound::Insert(x) => {
                set.insert(x);
                let position = values.partition_point(|&y| y <= x);
                values.insert(position, x);
            }
            SetRound::Remove(x) => {
                let expected = values.iter().position(|&y| y == x).map(|i| values.remove(i));
                prop_assert_eq!(set.remove(&x), expected);
            }
            SetRound::Rank(x) => {
                prop_assert_eq!(set.rank(&x), values.partition_point(|&y| y < x));
            }
            SetRound::Kth(k) => {
                prop_assert_eq!(set.kth(k), values.get(k));
            }
            SetRound::Neighbors(x) => {
                prop_assert_eq!(set.predecessor(&x), values.iter().rev().find(|&&y| y < x));
                prop_assert_eq!(set.successor(&x), values.iter().find(|&&y| y > x));
                prop_assert_eq!(set.contains(&x), values.contains(&x));
            }
            SetRound::Range(low, high) => {
                let inside: Vec<i64> = values
                    .iter()
                    .copied()
                    .filter(|y| (low..=high).contains(y))
                    .collect();
                prop_assert_eq!(set.range_summary(low..=high), Aggregate::of(&inside));
            }
        }
        prop_assert_eq!(set.len(), values.len());
    }
    set.assert_correctness();
    prop_assert_eq!(set.to_vec(), values);
    Ok(())
}

proptest::proptest! {
    #[test]
    fn sequence_matches_vec_proptest(initial in initial_values(), array in rounds()) {
        check_sequence_against_vec(&initial, &array)?;
    }

    #[test]
    fn multiset_matches_sorted_vec_proptest(
        initial in proptest::collection::vec(-50..50i64, 0..60),
        array in proptest::collection::vec(set_round_strategy(), 1..200),
    ) {
        check_multiset_against_sorted_vec(&initial, &array)?;
    }

    #[test]
    fn split_merge_round_trip_proptest(
        values in proptest::collection::vec(-1000..1000i64, 0..150),
        cut in 0..150usize,
    ) {
        let mut forest: Forest<StdNum> = Forest::new();
        let root = forest.build(values.iter().copied());
        let cut = cut.min(values.len());
        let (left, right) = forest.split_by_rank(root, cut).unwrap();
        prop_assert_eq!(forest.size(left).unwrap(), cut);
        prop_assert_eq!(forest.summary(right).unwrap(), Aggregate::of(&values[cut..]));
        let root = forest.merge(left, right).unwrap();
        forest.assert_correctness(root);
        prop_assert_eq!(forest.to_vec(root).unwrap(), values);
    }

    #[test]
    fn union_matches_sorted_concatenation_proptest(
        a in proptest::collection::vec(-100..100i64, 0..100),
        b in proptest::collection::vec(-100..100i64, 0..100),
    ) {
        let mut forest: Forest<SetNum, ByKey> = Forest::new();
        let (mut sorted_a, mut sorted_b) = (a.clone(), b.clone());
        sorted_a.sort();
        sorted_b.sort();
        let left = forest.build(sorted_a).unwrap();
        let right = forest.build(sorted_b).unwrap();
        let root = forest.union(left, right).unwrap();
        forest.assert_correctness(root);
        forest.assert_sorted(root);
        let mut expected: Vec<i64> = a.into_iter().chain(b).collect();
        expected.sort();
        prop_assert_eq!(forest.to_vec(root).unwrap(), expected);
    }
}
