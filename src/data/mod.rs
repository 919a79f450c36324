//! The traits describing what is stored in the tree.
//!
//! A tree stores values of type [`Data::Value`]. Each subtree caches a summary of
//! its values, of type [`Data::Summary`], and pending actions of type [`Data::Action`]
//! may be applied to whole subtrees at once.
//!
//! Ready-made data lives in [`example_data`].

pub mod example_data;

use std::ops::Add;

/// This trait represents the data that will be stored inside the tree.
///
/// Every node stores a value. Summaries of segments are computed by adding the
/// summaries of their values, so `Summary` has to be a monoid: `+` must be associative
/// and `Default::default()` must be its identity.
///
/// Actions are applied to segments lazily. An action has to act on values and on
/// summaries consistently: acting on the summary of a segment must give the same
/// result as summarizing the segment after acting on each of its values.
/// That is, `action.act(a + b) == action.act(a) + action.act(b)` (up to reversal,
/// see [`Action::to_reverse`]).
pub trait Data {
    type Value;
    type Summary: Copy + Default + Add<Output = Self::Summary>;
    type Action: Action + Acts<Self::Value> + Acts<Self::Summary>;

    /// Creates the summary of a single value.
    fn to_summary(val: &Self::Value) -> Self::Summary;
}

/// Any triple `(Value, Summary, Action)` is a valid [`Data`], as long as the summary
/// can be built from a reference to a value.
impl<V, S, A> Data for (V, S, A)
where
    S: Copy + Default + Add<Output = S> + for<'a> From<&'a V>,
    A: Action + Acts<V> + Acts<S>,
{
    type Value = V;
    type Summary = S;
    type Action = A;

    fn to_summary(val: &V) -> S {
        S::from(val)
    }
}

/// Lazy actions on segments.
///
/// Actions compose with `+`, right to left: `new + old` is the action that first
/// performs `old` and then `new`. `Default::default()` must be the identity action.
pub trait Action: Copy + Default + Add<Output = Self> {
    /// Whether this is the identity action. Used to skip pushing down no-ops.
    fn is_identity(self) -> bool;

    /// Whether this action reverses the segment it is applied to.
    ///
    /// Summaries that aren't symmetric under reversal have to be reversed by
    /// the action's [`Acts`] implementation for the summary.
    fn to_reverse(self) -> bool {
        false
    }
}

/// Actions that can produce a pure reversal. Implemented by actions that may be
/// passed to the positional `reverse` operations.
pub trait Reverse: Action {
    fn reversal() -> Self;
}

/// Trait representing actions acting on values and summaries.
pub trait Acts<V> {
    fn act_inplace(&self, object: &mut V);

    fn act(&self, mut object: V) -> V {
        self.act_inplace(&mut object);
        object
    }
}

/// Summaries that count the number of values they were built from.
pub trait SizedSummary {
    fn size(self) -> usize;
}

/// Values that carry an ordering key. Key-ordered trees keep their values
/// sorted by key, smaller keys on the left.
pub trait Keyed {
    type Key: Ord;
    fn get_key(&self) -> &Self::Key;
}

macro_rules! keyed_by_self {
    ($($t:ty),*) => {
        $(
            impl Keyed for $t {
                type Key = $t;
                fn get_key(&self) -> &$t {
                    self
                }
            }
        )*
    };
}

keyed_by_self!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, char, bool, String);

impl<K: Ord, V> Keyed for (K, V) {
    type Key = K;
    fn get_key(&self) -> &K {
        &self.0
    }
}
