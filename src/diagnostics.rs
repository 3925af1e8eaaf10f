//! Match attempt tracing.
//!
//! `Diagnostics` accumulates a nested textual trace of a match attempt: one
//! `Match`/`Mismatch!` entry per attempted child match, with the child's own
//! trace folded beneath it. Assertion helpers render the final trace as the
//! failure message.
//!
//! A null variant ([`Diagnostics::null`]) performs matching with identical
//! boolean outcomes while recording nothing, for hot paths that only need
//! the result.

use std::fmt::Debug;

use crate::description::{Description, SelfDescribing};
use crate::matcher::Matcher;

/// Accumulating trace of one match attempt.
///
/// Create one instance per top-level assertion; composite matchers route
/// every child match through [`try_match`](Self::try_match) so nested
/// failures stay discoverable from the top-level trace.
pub struct Diagnostics {
    desc: Option<Description>,
}

impl Diagnostics {
    /// Create a recording instance.
    pub fn new() -> Self {
        Self {
            desc: Some(Description::new()),
        }
    }

    /// Create the null variant: identical match behavior, no recording.
    pub fn null() -> Self {
        Self { desc: None }
    }

    /// Whether this instance discards everything recorded into it.
    pub fn is_null(&self) -> bool {
        self.desc.is_none()
    }

    /// Produce an independent instance for pre-computing a sub-result
    /// before deciding how to render it. Null instances stay null.
    pub fn new_child(&self) -> Self {
        if self.is_null() {
            Self::null()
        } else {
            Self::new()
        }
    }

    /// Invoke `matcher` against `actual`, recording exactly one
    /// `Match`/`Mismatch!` entry with the matcher's self-description, a
    /// pretty rendering of the actual value on mismatch, and the child
    /// trace folded beneath. Returns the boolean outcome.
    pub fn try_match<T: ?Sized + Debug>(&mut self, actual: &T, matcher: &dyn Matcher<T>) -> bool {
        self.try_match_entry(None, actual, matcher)
    }

    /// Same as [`try_match`](Self::try_match), labeling the entry with a
    /// name or index (for example a property name or list position).
    pub fn try_match_named<T: ?Sized + Debug>(
        &mut self,
        name: &str,
        actual: &T,
        matcher: &dyn Matcher<T>,
    ) -> bool {
        self.try_match_entry(Some(name), actual, matcher)
    }

    fn try_match_entry<T: ?Sized + Debug>(
        &mut self,
        name: Option<&str>,
        actual: &T,
        matcher: &dyn Matcher<T>,
    ) -> bool {
        if self.is_null() {
            return matcher.matches(actual, self);
        }
        let mut child = Diagnostics::new();
        let matched = matcher.matches(actual, &mut child);
        let Some(d) = self.desc.as_mut() else {
            return matched;
        };
        let outcome = if matched { "Match" } else { "Mismatch!" };
        match name {
            Some(name) => d.text(format!("{}: {}", name, outcome)),
            None => d.text(outcome),
        }
        d.indented(|d| {
            d.labeled_described_child("expected", &matcher);
            if !matched {
                d.labeled_child("but was", actual);
            }
            let trace = child.trace();
            if !trace.is_empty() {
                d.block(&trace);
            }
        });
        matched
    }

    /// Record a successful outcome directly, without invoking another
    /// matcher. For leaf matchers with custom logic.
    pub fn matched(&mut self, what: &dyn SelfDescribing) {
        if let Some(d) = self.desc.as_mut() {
            d.text("Match");
            d.described_child(what);
        }
    }

    /// Record a failed outcome directly, without invoking another matcher.
    pub fn mismatched(&mut self, what: &dyn SelfDescribing) {
        if let Some(d) = self.desc.as_mut() {
            d.text("Mismatch!");
            d.described_child(what);
        }
    }

    /// Record a free-form note at the current position in the trace.
    pub fn text(&mut self, line: impl AsRef<str>) {
        if let Some(d) = self.desc.as_mut() {
            d.text(line);
        }
    }

    /// The trace rendered so far.
    pub fn trace(&self) -> String {
        self.desc
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default()
    }

    /// Consume the diagnostics, returning the final trace.
    pub fn into_trace(self) -> String {
        self.desc.map(Description::finish).unwrap_or_default()
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::satisfies;

    #[test]
    fn test_try_match_records_match() {
        let mut diag = Diagnostics::new();
        let matcher = satisfies(|n: &i32| *n > 0, "a positive number");
        assert!(diag.try_match(&5, &matcher));
        let trace = diag.into_trace();
        assert!(trace.contains("Match"));
        assert!(trace.contains("a positive number"));
    }

    #[test]
    fn test_try_match_records_mismatch_with_actual() {
        let mut diag = Diagnostics::new();
        let matcher = satisfies(|s: &&str| !s.is_empty(), "a non-empty string");
        assert!(!diag.try_match(&"", &matcher));
        let trace = diag.into_trace();
        assert!(trace.contains("Mismatch!"));
        assert!(trace.contains("a non-empty string"));
        assert!(trace.contains("(empty string)"));
    }

    #[test]
    fn test_mismatch_entry_layout() {
        let mut diag = Diagnostics::new();
        let matcher = satisfies(|n: &i32| *n == 1, "equal to 1");
        assert!(!diag.try_match(&2, &matcher));
        let trace = diag.into_trace();
        assert!(trace.contains("expected:\n    equal to 1"));
        assert!(trace.contains("but was:\n    2"));
    }

    #[test]
    fn test_try_match_named_labels_entry() {
        let mut diag = Diagnostics::new();
        let matcher = satisfies(|n: &i32| *n == 1, "equal to 1");
        assert!(!diag.try_match_named("IntProp", &2, &matcher));
        let trace = diag.into_trace();
        assert!(trace.contains("IntProp: Mismatch!"));
    }

    #[test]
    fn test_null_diagnostics_same_outcome_no_trace() {
        let matcher = satisfies(|n: &i32| *n > 0, "a positive number");
        let mut null = Diagnostics::null();
        let mut full = Diagnostics::new();
        assert_eq!(
            null.try_match(&-1, &matcher),
            full.try_match(&-1, &matcher)
        );
        assert!(null.into_trace().is_empty());
        assert!(!full.into_trace().is_empty());
    }

    #[test]
    fn test_null_child_stays_null() {
        let null = Diagnostics::null();
        assert!(null.new_child().is_null());
        let full = Diagnostics::new();
        assert!(!full.new_child().is_null());
    }

    #[test]
    fn test_matched_and_mismatched_primitives() {
        let mut diag = Diagnostics::new();
        diag.matched(&"saw the expected value");
        diag.mismatched(&"missing entry");
        let trace = diag.into_trace();
        assert!(trace.contains("Match\n  saw the expected value"));
        assert!(trace.contains("Mismatch!\n  missing entry"));
    }
}
