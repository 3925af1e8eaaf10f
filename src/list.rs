//! Matching sequences of items against sequences of matchers.
//!
//! A list matcher pairs an ordering policy (in order, or any order) with a
//! completeness policy (only: every item consumed by exactly one matcher,
//! or at least: every matcher consumes some item, extras allowed):
//!
//! - [`in_order_only`] - exact positional match, lengths must agree
//! - [`in_order_at_least`] - the matchers must match a subsequence of the
//!   items in the same relative order; extra items anywhere are allowed
//! - [`in_any_order_only`] - a full bipartite cover: every item matched by
//!   exactly one matcher and every matcher used exactly once
//! - [`in_any_order_at_least`] - every matcher finds some item; unmatched
//!   extra items are ignored
//!
//! Any-order matching assigns greedily: each item is tested against the
//! remaining unmatched matchers in declaration order, and the first match
//! removes both from further consideration.
//!
//! Every failure names the position, item, or matcher that caused it.
//!
//! # Example
//!
//! ```rust
//! use affirm::list::in_any_order_only;
//! use affirm::matcher::Matcher;
//! use affirm::matchers::strings;
//! use affirm::matchers;
//!
//! let m = in_any_order_only(matchers![
//!     strings::equal_to("one"),
//!     strings::equal_to("two"),
//! ]);
//! let actual = vec!["two".to_string(), "one".to_string()];
//! assert!(m.matches_quietly(&actual));
//! ```

use std::any::Any;
use std::fmt::Debug;
use std::marker::PhantomData;

use crate::description::{description_of, Description, SelfDescribing};
use crate::diagnostics::Diagnostics;
use crate::matcher::{FieldMatch, Matcher};
use crate::matchers::primitives::equal_to;

/// Box a list of matchers for one of the list constructors.
///
/// # Example
///
/// ```rust,ignore
/// let m = in_order_only(matchers![
///     strings::equal_to("one"),
///     strings::equal_to("two"),
/// ]);
/// ```
#[macro_export]
macro_rules! matchers {
    ($($m:expr),* $(,)?) => {
        vec![$(Box::new($m) as Box<dyn $crate::matcher::Matcher<_>>),*]
    };
}

/// Ordering policy for a list matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    InOrder,
    AnyOrder,
}

/// Completeness policy for a list matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completeness {
    Only,
    AtLeast,
}

/// Every item must match the matcher at its position; lengths must agree.
pub fn in_order_only<T>(expected: Vec<Box<dyn Matcher<T>>>) -> ListMatcher<T> {
    ListMatcher::new(Order::InOrder, Completeness::Only, expected)
}

/// The matchers must match a subsequence of the items, preserving relative
/// order; items may be skipped before, between, and after matches.
pub fn in_order_at_least<T>(expected: Vec<Box<dyn Matcher<T>>>) -> ListMatcher<T> {
    ListMatcher::new(Order::InOrder, Completeness::AtLeast, expected)
}

/// Every item must be matched by exactly one matcher and every matcher
/// used exactly once, in any order.
pub fn in_any_order_only<T>(expected: Vec<Box<dyn Matcher<T>>>) -> ListMatcher<T> {
    ListMatcher::new(Order::AnyOrder, Completeness::Only, expected)
}

/// Every matcher must match some item, in any order; extra items are
/// ignored.
pub fn in_any_order_at_least<T>(expected: Vec<Box<dyn Matcher<T>>>) -> ListMatcher<T> {
    ListMatcher::new(Order::AnyOrder, Completeness::AtLeast, expected)
}

/// Matcher over a sequence of items. Built by the list constructors.
pub struct ListMatcher<T> {
    order: Order,
    completeness: Completeness,
    expected: Vec<Box<dyn Matcher<T>>>,
}

impl<T> ListMatcher<T> {
    fn new(order: Order, completeness: Completeness, expected: Vec<Box<dyn Matcher<T>>>) -> Self {
        Self {
            order,
            completeness,
            expected,
        }
    }
}

impl<T: Debug> ListMatcher<T> {
    fn match_items(&self, actual: &[T], diag: &mut Diagnostics) -> bool {
        match (self.order, self.completeness) {
            (Order::InOrder, Completeness::Only) => self.match_in_order_only(actual, diag),
            (Order::InOrder, Completeness::AtLeast) => self.match_in_order_at_least(actual, diag),
            (Order::AnyOrder, _) => self.match_any_order(actual, diag),
        }
    }

    fn match_in_order_only(&self, actual: &[T], diag: &mut Diagnostics) -> bool {
        if actual.len() != self.expected.len() {
            diag.mismatched(&format!(
                "expected {} item(s) but got {}",
                self.expected.len(),
                actual.len()
            ));
            return false;
        }
        for (i, (item, matcher)) in actual.iter().zip(&self.expected).enumerate() {
            if !diag.try_match_named(&format!("[{}]", i), item, &**matcher) {
                return false;
            }
        }
        true
    }

    fn match_in_order_at_least(&self, actual: &[T], diag: &mut Diagnostics) -> bool {
        // Greedy left-to-right subsequence scan: each matcher consumes the
        // first remaining item that satisfies it.
        let mut cursor = 0;
        for (mi, matcher) in self.expected.iter().enumerate() {
            let mut consumed = None;
            while cursor < actual.len() {
                let index = cursor;
                cursor += 1;
                if matcher.matches_quietly(&actual[index]) {
                    consumed = Some(index);
                    break;
                }
            }
            match consumed {
                Some(index) => {
                    diag.text(format!("matcher [{}] matched item [{}]", mi, index));
                }
                None => {
                    diag.mismatched(&format!(
                        "no remaining item matched [{}] {}",
                        mi,
                        description_of(matcher)
                    ));
                    return false;
                }
            }
        }
        true
    }

    fn match_any_order(&self, actual: &[T], diag: &mut Diagnostics) -> bool {
        // Greedy bipartite assignment: the pool keeps matcher-declaration
        // order, and each item takes the first remaining matcher it
        // satisfies.
        let mut remaining: Vec<usize> = (0..self.expected.len()).collect();
        for (i, item) in actual.iter().enumerate() {
            let taken = remaining
                .iter()
                .position(|&mi| self.expected[mi].matches_quietly(item));
            match taken {
                Some(pos) => {
                    let mi = remaining.remove(pos);
                    diag.text(format!("item [{}] matched matcher [{}]", i, mi));
                }
                None => {
                    if self.completeness == Completeness::Only {
                        diag.mismatched(&format!(
                            "item [{}] {} matched no remaining matcher",
                            i,
                            crate::description::pretty_debug(item)
                        ));
                        return false;
                    }
                }
            }
        }
        if !remaining.is_empty() {
            let unmatched: Vec<String> = remaining
                .iter()
                .map(|&mi| format!("[{}] {}", mi, description_of(&self.expected[mi])))
                .collect();
            diag.mismatched(&format!(
                "{} matcher(s) found no item:\n{}",
                remaining.len(),
                unmatched.join("\n")
            ));
            return false;
        }
        true
    }
}

impl<T: Debug> SelfDescribing for ListMatcher<T> {
    fn describe_to(&self, description: &mut Description) {
        let header = match (self.order, self.completeness) {
            (Order::InOrder, Completeness::Only) => "a list containing, in order, only:",
            (Order::InOrder, Completeness::AtLeast) => "a list containing, in order, at least:",
            (Order::AnyOrder, Completeness::Only) => "a list containing, in any order, only:",
            (Order::AnyOrder, Completeness::AtLeast) => {
                "a list containing, in any order, at least:"
            }
        };
        description.text(header);
        description.indented(|d| {
            for (i, matcher) in self.expected.iter().enumerate() {
                d.text(format!("[{}] {}", i, description_of(matcher)));
            }
        });
    }
}

impl<T: Debug> Matcher<[T]> for ListMatcher<T> {
    fn matches(&self, actual: &[T], diag: &mut Diagnostics) -> bool {
        self.match_items(actual, diag)
    }
}

impl<T: Debug> Matcher<Vec<T>> for ListMatcher<T> {
    fn matches(&self, actual: &Vec<T>, diag: &mut Diagnostics) -> bool {
        self.match_items(actual.as_slice(), diag)
    }
}

impl<T: Any + Debug> FieldMatch for ListMatcher<T> {
    type Value = Vec<T>;
}

/// Matcher on the number of items in a sequence. See [`with_num_items`]
/// and [`no_items`].
pub struct CountMatcher<T> {
    expected: Box<dyn Matcher<usize>>,
    _marker: PhantomData<fn(&T)>,
}

/// Create a matcher delegating the item count to a numeric matcher.
pub fn with_num_items<T>(expected: impl Matcher<usize> + 'static) -> CountMatcher<T> {
    CountMatcher {
        expected: Box::new(expected),
        _marker: PhantomData,
    }
}

/// Create a matcher requiring an empty sequence.
pub fn no_items<T>() -> CountMatcher<T> {
    with_num_items(equal_to(0_usize))
}

impl<T> SelfDescribing for CountMatcher<T> {
    fn describe_to(&self, description: &mut Description) {
        description.text("a list with number of items:");
        description.described_child(&self.expected);
    }
}

impl<T: Debug> Matcher<[T]> for CountMatcher<T> {
    fn matches(&self, actual: &[T], diag: &mut Diagnostics) -> bool {
        let count = actual.len();
        diag.try_match_named("number of items", &count, &*self.expected)
    }
}

impl<T: Debug> Matcher<Vec<T>> for CountMatcher<T> {
    fn matches(&self, actual: &Vec<T>, diag: &mut Diagnostics) -> bool {
        Matcher::<[T]>::matches(self, actual.as_slice(), diag)
    }
}

impl<T: Any + Debug> FieldMatch for CountMatcher<T> {
    type Value = Vec<T>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::strings;

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn one_two_three() -> Vec<Box<dyn Matcher<String>>> {
        matchers![
            strings::equal_to("one"),
            strings::equal_to("two"),
            strings::equal_to("three"),
        ]
    }

    // ------------------------------------------------------------------
    // in order, only
    // ------------------------------------------------------------------

    #[test]
    fn test_in_order_only_exact_match() {
        let m = in_order_only(one_two_three());
        assert!(m.matches_quietly(&items(&["one", "two", "three"])));
    }

    #[test]
    fn test_in_order_only_wrong_order_fails() {
        let m = in_order_only(one_two_three());
        assert!(!m.matches_quietly(&items(&["two", "one", "three"])));
    }

    #[test]
    fn test_in_order_only_extra_item_fails() {
        let m = in_order_only(one_two_three());
        assert!(!m.matches_quietly(&items(&["one", "two", "three", "four"])));
    }

    #[test]
    fn test_in_order_only_missing_item_fails() {
        let m = in_order_only(one_two_three());
        assert!(!m.matches_quietly(&items(&["one", "two"])));
    }

    #[test]
    fn test_in_order_only_failure_names_position() {
        let m = in_order_only(one_two_three());
        let mut diag = Diagnostics::new();
        assert!(!m.matches(&items(&["one", "oops", "three"]), &mut diag));
        let trace = diag.into_trace();
        assert!(trace.contains("[1]: Mismatch!"));
        assert!(trace.contains("\"oops\""));
    }

    // ------------------------------------------------------------------
    // in order, at least
    // ------------------------------------------------------------------

    #[test]
    fn test_in_order_at_least_subsequence() {
        let m = in_order_at_least(one_two_three());
        assert!(m.matches_quietly(&items(&["zero", "one", "two", "three", "four"])));
    }

    #[test]
    fn test_in_order_at_least_exact_sequence() {
        let m = in_order_at_least(one_two_three());
        assert!(m.matches_quietly(&items(&["one", "two", "three"])));
    }

    #[test]
    fn test_in_order_at_least_missing_middle_fails() {
        let m = in_order_at_least(one_two_three());
        assert!(!m.matches_quietly(&items(&["one", "three"])));
    }

    #[test]
    fn test_in_order_at_least_out_of_order_fails() {
        let m = in_order_at_least(one_two_three());
        assert!(!m.matches_quietly(&items(&["two", "one", "three"])));
    }

    #[test]
    fn test_in_order_at_least_duplicate_at_start() {
        let m = in_order_at_least(matchers![
            strings::equal_to("one"),
            strings::equal_to("one"),
            strings::equal_to("two"),
        ]);
        assert!(m.matches_quietly(&items(&["one", "one", "two"])));
    }

    #[test]
    fn test_in_order_at_least_duplicate_at_end() {
        let m = in_order_at_least(matchers![
            strings::equal_to("one"),
            strings::equal_to("two"),
            strings::equal_to("two"),
        ]);
        assert!(m.matches_quietly(&items(&["one", "two", "two"])));
    }

    #[test]
    fn test_in_order_at_least_duplicate_not_present_twice_fails() {
        let m = in_order_at_least(matchers![
            strings::equal_to("one"),
            strings::equal_to("one"),
        ]);
        assert!(!m.matches_quietly(&items(&["one", "two"])));
    }

    #[test]
    fn test_in_order_at_least_failure_names_matcher() {
        let m = in_order_at_least(one_two_three());
        let mut diag = Diagnostics::new();
        assert!(!m.matches(&items(&["one", "two"]), &mut diag));
        let trace = diag.into_trace();
        assert!(trace.contains("no remaining item matched [2]"));
        assert!(trace.contains("\"three\""));
    }

    // ------------------------------------------------------------------
    // in any order, only
    // ------------------------------------------------------------------

    #[test]
    fn test_in_any_order_only_permutation() {
        let m = in_any_order_only(one_two_three());
        assert!(m.matches_quietly(&items(&["two", "one", "three"])));
        assert!(m.matches_quietly(&items(&["three", "two", "one"])));
    }

    #[test]
    fn test_in_any_order_only_extra_item_fails() {
        let m = in_any_order_only(one_two_three());
        assert!(!m.matches_quietly(&items(&["two", "one", "three", "four"])));
    }

    #[test]
    fn test_in_any_order_only_missing_item_fails() {
        let m = in_any_order_only(one_two_three());
        assert!(!m.matches_quietly(&items(&["two", "one"])));
    }

    #[test]
    fn test_in_any_order_only_failure_names_unmatched_item() {
        let m = in_any_order_only(one_two_three());
        let mut diag = Diagnostics::new();
        assert!(!m.matches(&items(&["one", "four", "three"]), &mut diag));
        let trace = diag.into_trace();
        assert!(trace.contains("item [1]"));
        assert!(trace.contains("\"four\""));
        assert!(trace.contains("matched no remaining matcher"));
    }

    #[test]
    fn test_in_any_order_only_failure_names_unmatched_matchers() {
        let m = in_any_order_only(one_two_three());
        let mut diag = Diagnostics::new();
        assert!(!m.matches(&items(&["one", "three"]), &mut diag));
        let trace = diag.into_trace();
        assert!(trace.contains("found no item"));
        assert!(trace.contains("\"two\""));
    }

    // ------------------------------------------------------------------
    // in any order, at least
    // ------------------------------------------------------------------

    #[test]
    fn test_in_any_order_at_least_ignores_extras() {
        let m = in_any_order_at_least(one_two_three());
        assert!(m.matches_quietly(&items(&["four", "three", "one", "five", "two"])));
    }

    #[test]
    fn test_in_any_order_at_least_missing_matcher_fails() {
        let m = in_any_order_at_least(one_two_three());
        assert!(!m.matches_quietly(&items(&["one", "three", "four"])));
    }

    // ------------------------------------------------------------------
    // counts
    // ------------------------------------------------------------------

    #[test]
    fn test_no_items() {
        let m = no_items::<String>();
        assert!(m.matches_quietly(&Vec::<String>::new()));
        assert!(!m.matches_quietly(&items(&["one"])));
    }

    #[test]
    fn test_with_num_items() {
        let m = with_num_items::<String>(equal_to(2_usize));
        assert!(m.matches_quietly(&items(&["a", "b"])));
        assert!(!m.matches_quietly(&items(&["a"])));
    }

    #[test]
    fn test_with_num_items_failure_trace() {
        let m = with_num_items::<String>(equal_to(3_usize));
        let mut diag = Diagnostics::new();
        assert!(!m.matches(&items(&["a"]), &mut diag));
        let trace = diag.into_trace();
        assert!(trace.contains("number of items: Mismatch!"));
    }

    #[test]
    fn test_works_on_slices_too() {
        let m = in_order_only(matchers![strings::equal_to("a")]);
        let actual = items(&["a"]);
        assert!(Matcher::<[String]>::matches_quietly(&m, actual.as_slice()));
    }
}
