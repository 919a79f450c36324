use copse::example_data::*;
use copse::*;
use rand::Rng;
use std::ops::Range;

/// Something to perform in one round of tests
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundAction {
    Act { range: Range<usize>, action: RangeAction },
    Query { range: Range<usize> },
    Insert { index: usize, value: i64 },
    Delete { index: usize },
}

/// The result after one round of querying
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundResult {
    Empty,
    Summary(Aggregate),
    Value(i64),
}

pub const MAX_ADD: i64 = 200;

/// What a [`RangeAction`] does to a segment, spelled out on a plain slice.
pub fn act_on_slice(values: &mut [i64], action: RangeAction) {
    for value in values.iter_mut() {
        if let Some(assigned) = action.assign {
            *value = assigned;
        }
        *value += action.add;
    }
    if action.reverse {
        values.reverse();
    }
}

pub fn random_range<R: Rng>(rng: &mut R, len: usize) -> Range<usize> {
    let res = (rng.gen_range(0..len + 1), rng.gen_range(0..len + 1));
    if res.0 <= res.1 {
        res.0..res.1
    } else {
        res.1..res.0
    }
}

pub fn random_action<R: Rng>(rng: &mut R) -> RangeAction {
    RangeAction {
        reverse: rng.gen(),
        assign: if rng.gen_range(0..4) == 0 {
            Some(rng.gen_range(-MAX_ADD..=MAX_ADD))
        } else {
            None
        },
        add: rng.gen_range(-MAX_ADD..=MAX_ADD),
    }
}

pub fn random_round_action<R: Rng>(rng: &mut R, len: usize) -> RoundAction {
    use RoundAction::*;
    match rng.gen_range(0..4) {
        // act on a segment
        0 => {
            let range = random_range(rng, len);
            let action = random_action(rng);
            Act { range, action }
        }
        // query a segment
        1 => Query {
            range: random_range(rng, len),
        },
        // insert a value
        2 => {
            let value = rng.gen_range(-MAX_ADD..=MAX_ADD);
            let index = rng.gen_range(0..=len);
            Insert { index, value }
        }
        // delete a value
        _ => Delete {
            index: if len > 0 { rng.gen_range(0..len) } else { 0 },
        },
    }
}

/// Performs the round on the sequence.
pub fn run_round(round: RoundAction, seq: &mut Sequence<StdNum>) -> RoundResult {
    use RoundAction::*;
    use RoundResult::*;
    match round {
        Act { range, action } => {
            seq.act(range, action).unwrap();
            Empty
        }
        Query { range } => {
            let summary = seq.range_summary(range.clone()).unwrap();
            assert_eq!(summary.size, range.len());
            Summary(summary)
        }
        Insert { index, value } => {
            seq.insert(index, value).unwrap();
            Empty
        }
        Delete { index } if !seq.is_empty() => Value(seq.remove(index).unwrap()),
        // delete but the sequence is empty
        Delete { index } => {
            assert_eq!(
                seq.remove(index),
                Err(TreeError::OutOfRange { index, len: 0 })
            );
            Empty
        }
    }
}

/// Performs the round on the reference vector.
pub fn run_round_on_vec(round: RoundAction, values: &mut Vec<i64>) -> RoundResult {
    use RoundAction::*;
    use RoundResult::*;
    match round {
        Act { range, action } => {
            act_on_slice(&mut values[range], action);
            Empty
        }
        Query { range } => Summary(Aggregate::of(&values[range])),
        Insert { index, value } => {
            values.insert(index, value);
            Empty
        }
        Delete { index } if !values.is_empty() => Value(values.remove(index)),
        Delete { .. } => Empty,
    }
}

/// Runs random rounds on a sequence and on a vector, comparing them after every round.
pub fn check_consistency<R: Rng>(rng: &mut R, initial_len: usize, num_rounds: usize) {
    let mut values: Vec<i64> = (0..initial_len as i64).collect();
    let mut seq: Sequence<StdNum> = values.iter().copied().collect();

    for _ in 0..num_rounds {
        let round = random_round_action(rng, values.len());
        let expected = run_round_on_vec(round.clone(), &mut values);
        let res = run_round(round, &mut seq);
        assert_eq!(res, expected);
        assert_eq!(seq.summary(), Aggregate::of(&values));
        assert_eq!(seq.len(), values.len());
        // `O(n)`, but the sequence stays around a few hundred values
        seq.assert_correctness();
    }
    assert_eq!(seq.to_vec(), values);
}
