//! Boolean composition of matchers: [`all_of`], [`any_of`], [`not`].
//!
//! `all_of` and `any_of` evaluate every branch through the diagnostics
//! audit point, so a failing composite shows the outcome of each attempted
//! sub-match rather than just the first.
//!
//! # Example
//!
//! ```rust
//! use affirm::combinators::{all_of_boxed, not};
//! use affirm::matcher::{satisfies, Matcher};
//! use affirm::matchers;
//!
//! let m = all_of_boxed(matchers![
//!     satisfies(|n: &i32| *n > 0, "greater than 0"),
//!     satisfies(|n: &i32| *n < 100, "less than 100"),
//! ]);
//! assert!(m.matches_quietly(&50));
//! assert!(!m.matches_quietly(&200));
//!
//! let m = not(satisfies(|n: &i32| *n == 0, "equal to 0"));
//! assert!(m.matches_quietly(&1));
//! ```

use std::any::Any;
use std::fmt::Debug;

use crate::description::{Description, SelfDescribing};
use crate::diagnostics::Diagnostics;
use crate::matcher::{FieldMatch, Matcher};

/// Create a matcher that passes only if every sub-matcher passes.
pub fn all_of<T, M>(matchers: Vec<M>) -> AllOf<T>
where
    T: ?Sized,
    M: Matcher<T> + 'static,
{
    AllOf {
        matchers: matchers
            .into_iter()
            .map(|m| Box::new(m) as Box<dyn Matcher<T>>)
            .collect(),
    }
}

/// Like [`all_of`], for pre-boxed matchers of differing concrete types.
pub fn all_of_boxed<T: ?Sized>(matchers: Vec<Box<dyn Matcher<T>>>) -> AllOf<T> {
    AllOf { matchers }
}

/// Matcher requiring every sub-matcher to pass. See [`all_of`].
pub struct AllOf<T: ?Sized> {
    matchers: Vec<Box<dyn Matcher<T>>>,
}

impl<T: ?Sized> SelfDescribing for AllOf<T> {
    fn describe_to(&self, description: &mut Description) {
        description.text("all of:");
        for matcher in &self.matchers {
            description.described_child(matcher);
        }
    }
}

impl<T: ?Sized + Debug> Matcher<T> for AllOf<T> {
    fn matches(&self, actual: &T, diag: &mut Diagnostics) -> bool {
        let mut all = true;
        for matcher in &self.matchers {
            if !diag.try_match(actual, &**matcher) {
                all = false;
            }
        }
        all
    }
}

impl<T: Any + Debug> FieldMatch for AllOf<T> {
    type Value = T;
}

/// Create a matcher that passes if at least one sub-matcher passes.
pub fn any_of<T, M>(matchers: Vec<M>) -> AnyOf<T>
where
    T: ?Sized,
    M: Matcher<T> + 'static,
{
    AnyOf {
        matchers: matchers
            .into_iter()
            .map(|m| Box::new(m) as Box<dyn Matcher<T>>)
            .collect(),
    }
}

/// Like [`any_of`], for pre-boxed matchers of differing concrete types.
pub fn any_of_boxed<T: ?Sized>(matchers: Vec<Box<dyn Matcher<T>>>) -> AnyOf<T> {
    AnyOf { matchers }
}

/// Matcher requiring at least one sub-matcher to pass. See [`any_of`].
pub struct AnyOf<T: ?Sized> {
    matchers: Vec<Box<dyn Matcher<T>>>,
}

impl<T: ?Sized> SelfDescribing for AnyOf<T> {
    fn describe_to(&self, description: &mut Description) {
        description.text("any of:");
        for matcher in &self.matchers {
            description.described_child(matcher);
        }
    }
}

impl<T: ?Sized + Debug> Matcher<T> for AnyOf<T> {
    fn matches(&self, actual: &T, diag: &mut Diagnostics) -> bool {
        let mut any = false;
        for matcher in &self.matchers {
            if diag.try_match(actual, &**matcher) {
                any = true;
            }
        }
        any
    }
}

impl<T: Any + Debug> FieldMatch for AnyOf<T> {
    type Value = T;
}

/// Create a matcher that inverts another matcher's result.
///
/// The wrapped matcher is evaluated quietly; its own trace would read
/// backwards under negation.
pub fn not<T, M>(matcher: M) -> Not<T>
where
    T: ?Sized,
    M: Matcher<T> + 'static,
{
    Not {
        inner: Box::new(matcher),
    }
}

/// Matcher inverting another matcher. See [`not`].
pub struct Not<T: ?Sized> {
    inner: Box<dyn Matcher<T>>,
}

impl<T: ?Sized> SelfDescribing for Not<T> {
    fn describe_to(&self, description: &mut Description) {
        description.text("not:");
        description.described_child(&self.inner);
    }
}

impl<T: ?Sized> Matcher<T> for Not<T> {
    fn matches(&self, actual: &T, _diag: &mut Diagnostics) -> bool {
        !self.inner.matches_quietly(actual)
    }
}

impl<T: Any + Debug> FieldMatch for Not<T> {
    type Value = T;
}
