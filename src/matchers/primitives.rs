//! Matchers for primitive values: equality, ordering, ranges.

use std::any::Any;
use std::fmt::Debug;

use crate::description::{Description, SelfDescribing};
use crate::diagnostics::Diagnostics;
use crate::matcher::{FieldMatch, Matcher};

/// Match any value equal to `expected`.
pub fn equal_to<T: PartialEq + Debug>(expected: T) -> EqualTo<T> {
    EqualTo { expected }
}

/// Equality matcher. See [`equal_to`].
pub struct EqualTo<T> {
    expected: T,
}

impl<T: Debug> SelfDescribing for EqualTo<T> {
    fn describe_to(&self, description: &mut Description) {
        description.text(format!("equal to {:?}", self.expected));
    }
}

impl<T: PartialEq + Debug> Matcher<T> for EqualTo<T> {
    fn matches(&self, actual: &T, _diag: &mut Diagnostics) -> bool {
        *actual == self.expected
    }
}

impl<T: PartialEq + Any + Debug> FieldMatch for EqualTo<T> {
    type Value = T;
}

enum Op {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Op {
    fn label(&self) -> &'static str {
        match self {
            Op::Gt => "greater than",
            Op::Gte => "greater than or equal to",
            Op::Lt => "less than",
            Op::Lte => "less than or equal to",
        }
    }
}

/// Match any value strictly greater than `bound`.
pub fn gt<T: PartialOrd + Debug>(bound: T) -> OrdMatcher<T> {
    OrdMatcher { bound, op: Op::Gt }
}

/// Match any value greater than or equal to `bound`.
pub fn gte<T: PartialOrd + Debug>(bound: T) -> OrdMatcher<T> {
    OrdMatcher { bound, op: Op::Gte }
}

/// Match any value strictly less than `bound`.
pub fn lt<T: PartialOrd + Debug>(bound: T) -> OrdMatcher<T> {
    OrdMatcher { bound, op: Op::Lt }
}

/// Match any value less than or equal to `bound`.
pub fn lte<T: PartialOrd + Debug>(bound: T) -> OrdMatcher<T> {
    OrdMatcher { bound, op: Op::Lte }
}

/// Ordering comparison matcher. See [`gt`], [`gte`], [`lt`], [`lte`].
pub struct OrdMatcher<T> {
    bound: T,
    op: Op,
}

impl<T: Debug> SelfDescribing for OrdMatcher<T> {
    fn describe_to(&self, description: &mut Description) {
        description.text(format!("{} {:?}", self.op.label(), self.bound));
    }
}

impl<T: PartialOrd + Debug> Matcher<T> for OrdMatcher<T> {
    fn matches(&self, actual: &T, _diag: &mut Diagnostics) -> bool {
        match self.op {
            Op::Gt => *actual > self.bound,
            Op::Gte => *actual >= self.bound,
            Op::Lt => *actual < self.bound,
            Op::Lte => *actual <= self.bound,
        }
    }
}

impl<T: PartialOrd + Any + Debug> FieldMatch for OrdMatcher<T> {
    type Value = T;
}

/// Match any value in the inclusive range `[low, high]`.
pub fn in_range<T: PartialOrd + Debug>(low: T, high: T) -> InRange<T> {
    InRange { low, high }
}

/// Inclusive range matcher. See [`in_range`].
pub struct InRange<T> {
    low: T,
    high: T,
}

impl<T: Debug> SelfDescribing for InRange<T> {
    fn describe_to(&self, description: &mut Description) {
        description.text(format!("in range {:?}..={:?}", self.low, self.high));
    }
}

impl<T: PartialOrd + Debug> Matcher<T> for InRange<T> {
    fn matches(&self, actual: &T, _diag: &mut Diagnostics) -> bool {
        *actual >= self.low && *actual <= self.high
    }
}

impl<T: PartialOrd + Any + Debug> FieldMatch for InRange<T> {
    type Value = T;
}

/// Match any value at all. Useful as a placeholder in positional lists.
pub fn anything<T: ?Sized>() -> Anything<T> {
    Anything {
        _marker: std::marker::PhantomData,
    }
}

/// Always-matching matcher. See [`anything`].
pub struct Anything<T: ?Sized> {
    _marker: std::marker::PhantomData<fn(&T)>,
}

impl<T: ?Sized> SelfDescribing for Anything<T> {
    fn describe_to(&self, description: &mut Description) {
        description.text("anything");
    }
}

impl<T: ?Sized> Matcher<T> for Anything<T> {
    fn matches(&self, _actual: &T, _diag: &mut Diagnostics) -> bool {
        true
    }
}

impl<T: Any + Debug> FieldMatch for Anything<T> {
    type Value = T;
}
