//! The core matcher contract.
//!
//! A matcher is a predicate-with-description over a typed value. Matchers
//! are immutable after construction and carry no per-match state, so one
//! instance can be reused across any number of match attempts.
//!
//! This module also provides:
//!
//! - [`satisfies`] - the universal leaf-matcher constructor wrapping a plain
//!   predicate and a description (every concrete factory builds on this)
//! - [`ActualValue`]/[`FieldValue`]/[`TypeGate`] - the erased-value layer
//!   used when the value's type is only known at runtime (for example a
//!   field read through [`Fields`](crate::object::Fields)); a failed
//!   downcast is reported as a structured wrong-type diagnostic, never as an
//!   ordinary mismatch and never by invoking the typed matcher
//!
//! # Example
//!
//! ```rust
//! use affirm::matcher::{satisfies, Matcher};
//!
//! let positive = satisfies(|n: &i32| *n > 0, "a positive number");
//! assert!(positive.matches_quietly(&3));
//! assert!(!positive.matches_quietly(&-3));
//! ```

use std::any::{type_name, Any};
use std::fmt::{self, Debug};
use std::marker::PhantomData;

use crate::description::{Description, SelfDescribing};
use crate::diagnostics::Diagnostics;

/// A predicate-with-description over values of type `T`.
///
/// Implementations must be pure: the outcome depends only on the actual
/// value and the matcher's construction-time configuration, and matching
/// must not mutate the matcher.
pub trait Matcher<T: ?Sized>: SelfDescribing {
    /// Test the actual value, recording the attempt into `diag`.
    fn matches(&self, actual: &T, diag: &mut Diagnostics) -> bool;

    /// Test the actual value without recording anything. The boolean
    /// outcome is identical to [`matches`](Self::matches).
    fn matches_quietly(&self, actual: &T) -> bool {
        self.matches(actual, &mut Diagnostics::null())
    }

    /// Called when no value is present at all (an absent field). The
    /// default records a mismatch; matchers that accept absence override
    /// this.
    fn matches_absent(&self, diag: &mut Diagnostics) -> bool {
        diag.mismatched(&"expected a value but none was present");
        false
    }
}

impl<T: ?Sized> Matcher<T> for Box<dyn Matcher<T>> {
    fn matches(&self, actual: &T, diag: &mut Diagnostics) -> bool {
        (**self).matches(actual, diag)
    }

    fn matches_absent(&self, diag: &mut Diagnostics) -> bool {
        (**self).matches_absent(diag)
    }
}

impl<T: ?Sized, M: Matcher<T> + ?Sized> Matcher<T> for &M {
    fn matches(&self, actual: &T, diag: &mut Diagnostics) -> bool {
        (**self).matches(actual, diag)
    }

    fn matches_absent(&self, diag: &mut Diagnostics) -> bool {
        (**self).matches_absent(diag)
    }
}

/// Create a matcher from a predicate and a description.
///
/// This is the universal leaf constructor: the description must be a stable
/// rendering of the matcher's configuration, never influenced by match
/// attempts.
///
/// # Example
///
/// ```rust
/// use affirm::matcher::{satisfies, Matcher};
///
/// let even = satisfies(|n: &i32| n % 2 == 0, "an even number");
/// assert!(even.matches_quietly(&4));
/// assert!(!even.matches_quietly(&3));
/// ```
pub fn satisfies<T, F>(predicate: F, description: impl Into<String>) -> FnMatcher<T, F>
where
    T: ?Sized,
    F: Fn(&T) -> bool,
{
    FnMatcher {
        predicate,
        description: description.into(),
        _marker: PhantomData,
    }
}

/// Matcher wrapping a plain predicate. See [`satisfies`].
pub struct FnMatcher<T: ?Sized, F> {
    predicate: F,
    description: String,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized, F> SelfDescribing for FnMatcher<T, F> {
    fn describe_to(&self, description: &mut Description) {
        description.text(&self.description);
    }
}

impl<T: ?Sized, F: Fn(&T) -> bool> Matcher<T> for FnMatcher<T, F> {
    fn matches(&self, actual: &T, _diag: &mut Diagnostics) -> bool {
        (self.predicate)(actual)
    }
}

/// Create a matcher from a predicate that also receives diagnostics, for
/// leaf matchers that record custom detail about why they failed.
pub fn satisfies_with_diag<T, F>(predicate: F, description: impl Into<String>) -> FnDiagMatcher<T, F>
where
    T: ?Sized,
    F: Fn(&T, &mut Diagnostics) -> bool,
{
    FnDiagMatcher {
        predicate,
        description: description.into(),
        _marker: PhantomData,
    }
}

/// Matcher wrapping a diagnostics-aware predicate. See [`satisfies_with_diag`].
pub struct FnDiagMatcher<T: ?Sized, F> {
    predicate: F,
    description: String,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized, F> SelfDescribing for FnDiagMatcher<T, F> {
    fn describe_to(&self, description: &mut Description) {
        description.text(&self.description);
    }
}

impl<T: ?Sized, F: Fn(&T, &mut Diagnostics) -> bool> Matcher<T> for FnDiagMatcher<T, F> {
    fn matches(&self, actual: &T, diag: &mut Diagnostics) -> bool {
        (self.predicate)(actual, diag)
    }
}

// =============================================================================
// Erased values and the type gate
// =============================================================================

/// Names the single concrete type a matcher reads an erased field as.
///
/// Matchers that accept several actual types when matched directly (string
/// matchers work against `str`, `String`, and `&str` alike) need one
/// canonical type for the runtime gate to downcast to; `Value` is that
/// type. Field registration is bounded on this trait so the gate type never
/// has to be spelled out at the call site.
pub trait FieldMatch: Matcher<Self::Value> {
    /// The concrete type an erased field value is downcast to.
    type Value: Any + Debug;
}

impl<T: Any + Debug> FieldMatch for Box<dyn Matcher<T>> {
    type Value = T;
}

impl<T: Any + Debug, F: Fn(&T) -> bool> FieldMatch for FnMatcher<T, F> {
    type Value = T;
}

impl<T: Any + Debug, F: Fn(&T, &mut Diagnostics) -> bool> FieldMatch for FnDiagMatcher<T, F> {
    type Value = T;
}

/// A type-erased borrowed value, capturing the concrete type name and a
/// pre-rendered `Debug` form at erase time so wrong-type diagnostics keep
/// both sides of the story.
pub struct ActualValue<'a> {
    value: &'a dyn Any,
    type_name: &'static str,
    rendered: String,
}

impl<'a> ActualValue<'a> {
    /// Erase a concrete value.
    pub fn of<T: Any + Debug>(value: &'a T) -> Self {
        Self {
            value,
            type_name: type_name::<T>(),
            rendered: format!("{:?}", value),
        }
    }

    /// The concrete type name captured at erase time.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The `Debug` rendering captured at erase time.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// Recover the concrete value, if `T` is the erased type.
    pub fn downcast<T: Any>(&self) -> Option<&'a T> {
        self.value.downcast_ref::<T>()
    }
}

impl fmt::Debug for ActualValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

/// A field read result: either a present erased value or nothing at all
/// (an `Option` field holding `None`).
pub enum FieldValue<'a> {
    /// No value present.
    Absent,
    /// A present, type-erased value.
    Present(ActualValue<'a>),
}

impl<'a> FieldValue<'a> {
    /// Erase a plain field value.
    pub fn of<T: Any + Debug>(value: &'a T) -> Self {
        FieldValue::Present(ActualValue::of(value))
    }

    /// Erase an optional field value, mapping `None` to `Absent`.
    pub fn option<T: Any + Debug>(value: &'a Option<T>) -> Self {
        match value {
            Some(v) => Self::of(v),
            None => FieldValue::Absent,
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Absent => f.write_str("(absent)"),
            FieldValue::Present(v) => fmt::Debug::fmt(v, f),
        }
    }
}

/// Wraps a typed matcher behind a runtime type check.
///
/// If the erased value's type is not `V`, the gate records a structured
/// wrong-type diagnostic naming both types and returns `false` without
/// invoking the typed matcher. An absent value fails the same way unless
/// the gate was built with [`tolerant`](Self::tolerant), in which case the
/// inner matcher's [`matches_absent`](Matcher::matches_absent) decides.
pub struct TypeGate<V, M> {
    inner: M,
    tolerant: bool,
    _marker: PhantomData<fn(&V)>,
}

impl<V: Any + Debug, M: Matcher<V>> TypeGate<V, M> {
    /// Gate that rejects absent values outright.
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            tolerant: false,
            _marker: PhantomData,
        }
    }

    /// Gate that forwards absent values to the inner matcher's
    /// `matches_absent`.
    pub fn tolerant(inner: M) -> Self {
        Self {
            inner,
            tolerant: true,
            _marker: PhantomData,
        }
    }
}

impl<V, M: SelfDescribing> SelfDescribing for TypeGate<V, M> {
    fn describe_to(&self, description: &mut Description) {
        self.inner.describe_to(description);
    }
}

impl<'a, V: Any + Debug, M: Matcher<V>> Matcher<FieldValue<'a>> for TypeGate<V, M> {
    fn matches(&self, actual: &FieldValue<'a>, diag: &mut Diagnostics) -> bool {
        match actual {
            FieldValue::Absent => {
                if self.tolerant {
                    self.inner.matches_absent(diag)
                } else {
                    diag.mismatched(&format!(
                        "wrong type: expected {} but no value was present",
                        type_name::<V>()
                    ));
                    false
                }
            }
            FieldValue::Present(value) => match value.downcast::<V>() {
                Some(typed) => self.inner.matches(typed, diag),
                None => {
                    diag.mismatched(&format!(
                        "wrong type: expected {} but got {}",
                        type_name::<V>(),
                        value.type_name()
                    ));
                    false
                }
            },
        }
    }
}

/// Create a matcher that only accepts an absent value. Pair it with a
/// tolerant [`TypeGate`] (or
/// [`with_optional_property`](crate::object::PropertyMatcher::with_optional_property))
/// to assert that an optional field holds nothing.
pub fn absent<T: ?Sized>() -> Absent<T> {
    Absent {
        _marker: PhantomData,
    }
}

/// Matcher accepting only absence. See [`absent`].
pub struct Absent<T: ?Sized> {
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized> SelfDescribing for Absent<T> {
    fn describe_to(&self, description: &mut Description) {
        description.text("absent");
    }
}

impl<T: ?Sized> Matcher<T> for Absent<T> {
    fn matches(&self, _actual: &T, diag: &mut Diagnostics) -> bool {
        diag.mismatched(&"expected absent but a value was present");
        false
    }

    fn matches_absent(&self, diag: &mut Diagnostics) -> bool {
        diag.matched(&"absent");
        true
    }
}

impl<T: Any + Debug> FieldMatch for Absent<T> {
    type Value = T;
}
