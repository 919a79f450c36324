//! Ready-made summaries and actions.
//!
//! [`StdNum`] is the usual choice for sequences of numbers: it keeps the size, sum,
//! minimum and maximum of every segment, and supports adding to, assigning to and
//! reversing segments. [`SetNum`] is its counterpart for key-ordered trees, where
//! actions are not allowed.

use super::*;

/// Sequences of `i64` with [`Aggregate`] summaries and [`RangeAction`] actions.
pub type StdNum = (i64, Aggregate, RangeAction);

/// Sorted multisets of `i64` with [`Aggregate`] summaries.
pub type SetNum = (i64, Aggregate, Unit);

/// Values that only need to be counted.
pub type Counted<V> = (V, Size, Unit);

/// Storing the size of a subtree.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub struct Size {
    pub size: usize,
}

impl Add for Size {
    type Output = Size;
    fn add(self, other: Size) -> Size {
        Size {
            size: self.size + other.size,
        }
    }
}

impl<V> From<&V> for Size {
    fn from(_: &V) -> Size {
        Size { size: 1 }
    }
}

impl SizedSummary for Size {
    fn size(self) -> usize {
        self.size
    }
}

/// The action that does nothing. Used by trees that never act on segments.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub struct Unit;

impl Add for Unit {
    type Output = Unit;
    fn add(self, _: Unit) -> Unit {
        Unit
    }
}

impl Action for Unit {
    fn is_identity(self) -> bool {
        true
    }
}

impl<V> Acts<V> for Unit {
    fn act_inplace(&self, _: &mut V) {}
}

/// An action that only reverses segments.
/// It leaves every value and summary untouched, so it fits summaries that
/// don't depend on the order of the values (such as [`Size`] and [`Aggregate`]).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub struct RevAction {
    pub to_reverse: bool,
}

impl Add for RevAction {
    type Output = RevAction;
    fn add(self, other: RevAction) -> RevAction {
        RevAction {
            to_reverse: self.to_reverse != other.to_reverse,
        }
    }
}

impl Action for RevAction {
    fn is_identity(self) -> bool {
        !self.to_reverse
    }

    fn to_reverse(self) -> bool {
        self.to_reverse
    }
}

impl Reverse for RevAction {
    fn reversal() -> Self {
        RevAction { to_reverse: true }
    }
}

impl<V> Acts<V> for RevAction {
    fn act_inplace(&self, _: &mut V) {}
}

/// Size, sum, minimum and maximum of a segment of `i64` values.
///
/// The empty segment has a sum of `0`, a minimum of `i64::MAX` and a maximum of `i64::MIN`,
/// so that it is the identity of `+`.
///
/// The sum is kept as an `i128`, so it is exact for any segment of `i64` values.
/// Values themselves wrap on overflow under [`RangeAction`]; a segment holding a value
/// that wrapped has an unspecified `sum`, `min` and `max`, but never panics.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Aggregate {
    pub size: usize,
    pub sum: i128,
    pub min: i64,
    pub max: i64,
}

impl Default for Aggregate {
    fn default() -> Self {
        Aggregate {
            size: 0,
            sum: 0,
            min: i64::MAX,
            max: i64::MIN,
        }
    }
}

impl Aggregate {
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Summarizes a slice directly, without a tree.
    pub fn of(values: &[i64]) -> Aggregate {
        values.iter().map(Aggregate::from).fold(Aggregate::default(), Add::add)
    }
}

impl Add for Aggregate {
    type Output = Aggregate;
    fn add(self, other: Aggregate) -> Aggregate {
        Aggregate {
            size: self.size + other.size,
            sum: self.sum.wrapping_add(other.sum),
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

impl From<&i64> for Aggregate {
    fn from(val: &i64) -> Aggregate {
        Aggregate {
            size: 1,
            sum: i128::from(*val),
            min: *val,
            max: *val,
        }
    }
}

impl SizedSummary for Aggregate {
    fn size(self) -> usize {
        self.size
    }
}

/// A single segment update, as a caller would phrase it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Tag {
    Add(i64),
    Assign(i64),
    Reverse,
}

/// The composition of any number of [`Tag`]s.
///
/// Applying a `RangeAction` to a value first assigns (if `assign` is set),
/// then adds `add`, then reverses the segment if `reverse` is set.
///
/// When composing, a later assignment wins over everything before it: the pending
/// additions are dropped. Additions after an assignment accumulate on top of it.
/// Reversals compose by parity.
///
///```
/// use copse::example_data::*;
/// use copse::Acts;
///
/// let add = RangeAction::add(3);
/// let assign = RangeAction::assign(10);
/// // assign after add: the assignment wins
/// assert_eq!((assign + add).act(1i64), 10);
/// // add after assign: the addition applies to the assigned value
/// assert_eq!((add + assign).act(1i64), 13);
///```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub struct RangeAction {
    pub reverse: bool,
    pub assign: Option<i64>,
    pub add: i64,
}

impl RangeAction {
    pub fn add(delta: i64) -> Self {
        RangeAction {
            add: delta,
            ..Default::default()
        }
    }

    pub fn assign(value: i64) -> Self {
        RangeAction {
            assign: Some(value),
            ..Default::default()
        }
    }

    pub fn reverse() -> Self {
        RangeAction {
            reverse: true,
            ..Default::default()
        }
    }
}

impl From<Tag> for RangeAction {
    fn from(tag: Tag) -> RangeAction {
        match tag {
            Tag::Add(delta) => RangeAction::add(delta),
            Tag::Assign(value) => RangeAction::assign(value),
            Tag::Reverse => RangeAction::reverse(),
        }
    }
}

impl Add for RangeAction {
    type Output = RangeAction;
    fn add(self, old: RangeAction) -> RangeAction {
        let reverse = self.reverse != old.reverse;
        match self.assign {
            Some(_) => RangeAction { reverse, ..self },
            None => RangeAction {
                reverse,
                assign: old.assign,
                add: old.add.wrapping_add(self.add),
            },
        }
    }
}

impl Action for RangeAction {
    fn is_identity(self) -> bool {
        !self.reverse && self.assign.is_none() && self.add == 0
    }

    fn to_reverse(self) -> bool {
        self.reverse
    }
}

impl Reverse for RangeAction {
    fn reversal() -> Self {
        RangeAction::reverse()
    }
}

impl Acts<i64> for RangeAction {
    fn act_inplace(&self, val: &mut i64) {
        if let Some(assigned) = self.assign {
            *val = assigned;
        }
        *val = val.wrapping_add(self.add);
    }
}

impl Acts<Aggregate> for RangeAction {
    fn act_inplace(&self, summary: &mut Aggregate) {
        if summary.size == 0 {
            return;
        }
        // at most `u32::MAX` values, so these products fit in an `i128`
        let size = summary.size as i128;
        if let Some(assigned) = self.assign {
            summary.sum = i128::from(assigned) * size;
            summary.min = assigned;
            summary.max = assigned;
        }
        summary.sum = summary.sum.wrapping_add(i128::from(self.add) * size);
        summary.min = summary.min.wrapping_add(self.add);
        summary.max = summary.max.wrapping_add(self.add);
    }
}

#[test]
fn assign_dominates_earlier_add() {
    let composed = RangeAction::assign(4) + RangeAction::add(100);
    assert_eq!(composed, RangeAction::assign(4));
    assert_eq!(composed.act(-7i64), 4);
}

#[test]
fn add_accumulates_on_assign() {
    let composed = RangeAction::add(2) + RangeAction::add(3) + RangeAction::assign(4);
    assert_eq!(composed.act(0i64), 9);
    let summary = Aggregate::of(&[1, 2, 3]);
    assert_eq!(composed.act(summary), Aggregate::of(&[9, 9, 9]));
}

#[test]
fn reversal_parity() {
    let twice = RangeAction::reverse() + RangeAction::reverse();
    assert!(twice.is_identity());
    let thrice = RangeAction::reverse() + twice;
    assert!(thrice.to_reverse());
    let reverse_then_assign = RangeAction::assign(1) + RangeAction::reverse();
    assert!(reverse_then_assign.to_reverse());
}

#[test]
fn empty_aggregate_is_identity() {
    let summary = Aggregate::of(&[5, -2, 8]);
    assert_eq!(summary + Aggregate::default(), summary);
    assert_eq!(Aggregate::default() + summary, summary);
    assert_eq!(RangeAction::add(3).act(Aggregate::default()), Aggregate::default());
    assert_eq!(summary.sum, 11);
    assert_eq!(summary.min, -2);
    assert_eq!(summary.max, 8);
}

#[test]
fn sums_near_the_limits_do_not_overflow() {
    let big = i64::MAX / 2 + 1;
    let summary = Aggregate::of(&[big, big, i64::MAX]);
    assert_eq!(summary.sum, 2 * i128::from(big) + i128::from(i64::MAX));
    assert_eq!(summary.max, i64::MAX);

    let lowest = Aggregate::of(&[i64::MIN, i64::MIN]);
    assert_eq!(lowest.sum, 2 * i128::from(i64::MIN));

    let assigned = RangeAction::assign(i64::MAX).act(Aggregate::of(&[0; 4]));
    assert_eq!(assigned.sum, 4 * i128::from(i64::MAX));
    assert_eq!(assigned, Aggregate::of(&[i64::MAX; 4]));

    // values wrap instead of panicking
    assert_eq!(RangeAction::add(1).act(i64::MAX), i64::MIN);
    assert_eq!((RangeAction::add(i64::MAX) + RangeAction::add(1)).add, i64::MIN);
}
