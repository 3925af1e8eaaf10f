//! Matching structs property by property.
//!
//! Rust has no ambient reflection, so property access is an explicit
//! capability: a type implements [`Fields`] (usually via the [`fields!`]
//! macro) to expose its field names and type-erased field reads. On top of
//! that:
//!
//! - [`ObjectMatcher`] applies named checks over whole objects in
//!   registration order, each built from an extraction function and a value
//!   matcher
//! - [`PropertyMatcher`] registers matchers against field names, validating
//!   the name eagerly at registration (a misspelled name is a test-setup
//!   bug and panics immediately, listing the available fields) and routing
//!   the field value through the runtime type gate at match time (a
//!   wrong-typed value is an ordinary mismatch, never a panic)
//!
//! # Example
//!
//! ```rust
//! use affirm::fields;
//! use affirm::matcher::Matcher;
//! use affirm::matchers::{primitives, strings};
//! use affirm::object::PropertyMatcher;
//!
//! #[derive(Debug)]
//! struct Order {
//!     id: String,
//!     quantity: i64,
//! }
//! fields!(Order { id, quantity });
//!
//! let matcher = PropertyMatcher::<Order>::new()
//!     .with_property("id", strings::starts_with("ord-"))
//!     .with_property("quantity", primitives::equal_to(2_i64));
//!
//! let order = Order { id: "ord-7".to_string(), quantity: 2 };
//! assert!(matcher.matches_quietly(&order));
//! ```

use std::any::Any;
use std::fmt::Debug;

use crate::description::{description_of, Description, SelfDescribing};
use crate::diagnostics::Diagnostics;
use crate::matcher::{FieldMatch, FieldValue, Matcher, TypeGate};

/// Capability exposing a type's fields by name as type-erased reads.
///
/// Implement by hand for computed or optional fields (map `None` to
/// [`FieldValue::Absent`] via [`FieldValue::option`]), or use the
/// [`fields!`] macro for plain structs.
pub trait Fields {
    /// All field names this type exposes, in declaration order.
    fn field_names() -> &'static [&'static str];

    /// Read one field by name. Returns `None` for unknown names.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// Implement [`Fields`] for a struct by listing its fields.
///
/// Mark `Option` fields with `: option` so a `None` value surfaces as
/// [`FieldValue::Absent`] rather than as a present `Option`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug)]
/// struct Account { name: String, balance: i64, closed_on: Option<String> }
/// fields!(Account { name, balance, closed_on: option });
/// ```
#[macro_export]
macro_rules! fields {
    ($ty:ty { $($field:ident $(: $kind:ident)?),* $(,)? }) => {
        impl $crate::object::Fields for $ty {
            fn field_names() -> &'static [&'static str] {
                &[$(stringify!($field)),*]
            }

            fn field(&self, name: &str) -> Option<$crate::matcher::FieldValue<'_>> {
                match name {
                    $(stringify!($field) => {
                        Some($crate::__field_value!(self, $field $(: $kind)?))
                    })*
                    _ => None,
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_value {
    ($self:ident, $field:ident) => {
        $crate::matcher::FieldValue::of(&$self.$field)
    };
    ($self:ident, $field:ident: option) => {
        $crate::matcher::FieldValue::option(&$self.$field)
    };
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

struct Check<T> {
    name: String,
    expected: String,
    run: Box<dyn Fn(&T, &mut Diagnostics) -> bool>,
}

/// Matcher applying named checks over a whole object.
///
/// Checks run in registration order and the first failure short-circuits,
/// so earlier assertions fail before later, possibly irrelevant ones.
/// Duplicate names are allowed and all are applied.
pub struct ObjectMatcher<T> {
    type_label: &'static str,
    checks: Vec<Check<T>>,
}

impl<T> ObjectMatcher<T> {
    /// Create a matcher with no checks yet (matches anything).
    pub fn new() -> Self {
        Self {
            type_label: short_type_name::<T>(),
            checks: Vec::new(),
        }
    }

    /// Register a named check built from an extraction function and a
    /// matcher on the extracted value.
    pub fn with<V, F, M>(mut self, name: impl Into<String>, extract: F, matcher: M) -> Self
    where
        V: Debug,
        F: Fn(&T) -> V + 'static,
        M: Matcher<V> + 'static,
    {
        let name = name.into();
        let expected = description_of(&matcher);
        let label = name.clone();
        let run = Box::new(move |actual: &T, diag: &mut Diagnostics| {
            let value = extract(actual);
            diag.try_match_named(&label, &value, &matcher)
        });
        self.checks.push(Check {
            name,
            expected,
            run,
        });
        self
    }

    pub(crate) fn push_check(
        &mut self,
        name: String,
        expected: String,
        run: Box<dyn Fn(&T, &mut Diagnostics) -> bool>,
    ) {
        self.checks.push(Check {
            name,
            expected,
            run,
        });
    }
}

impl<T> Default for ObjectMatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SelfDescribing for ObjectMatcher<T> {
    fn describe_to(&self, description: &mut Description) {
        description.text(format!("a {} where:", self.type_label));
        description.indented(|d| {
            for check in &self.checks {
                if check.expected.contains('\n') {
                    d.text(format!("{}:", check.name));
                    d.indented(|d| d.block(&check.expected));
                } else {
                    d.text(format!("{}: {}", check.name, check.expected));
                }
            }
        });
    }
}

impl<T> Matcher<T> for ObjectMatcher<T> {
    fn matches(&self, actual: &T, diag: &mut Diagnostics) -> bool {
        for check in &self.checks {
            if !(check.run)(actual, diag) {
                return false;
            }
        }
        true
    }
}

impl<T: Any + Debug> FieldMatch for ObjectMatcher<T> {
    type Value = T;
}

/// Matcher registering value matchers against named fields of a
/// [`Fields`] type. Builds on [`ObjectMatcher`].
pub struct PropertyMatcher<T: Fields> {
    inner: ObjectMatcher<T>,
}

impl<T: Fields + 'static> PropertyMatcher<T> {
    /// Create a matcher with no property checks yet.
    pub fn new() -> Self {
        Self {
            inner: ObjectMatcher::new(),
        }
    }

    fn checked_name(name: &'static str) -> &'static str {
        let known = T::field_names();
        if !known.contains(&name) {
            panic!(
                "no field '{}' on {}; available fields: {:?}",
                name,
                short_type_name::<T>(),
                known
            );
        }
        name
    }

    /// Register a matcher for a field. The field name is validated now;
    /// the value's runtime type is checked at match time through the type
    /// gate, downcasting to the matcher's
    /// [`FieldMatch::Value`] type. May be called repeatedly for the same
    /// field to compose independent assertions.
    pub fn with_property<M>(mut self, name: &'static str, matcher: M) -> Self
    where
        M: FieldMatch + 'static,
    {
        let name = Self::checked_name(name);
        let gate = TypeGate::<M::Value, M>::new(matcher);
        let expected = description_of(&gate);
        let run = Box::new(move |actual: &T, diag: &mut Diagnostics| {
            let field = actual.field(name).unwrap_or(FieldValue::Absent);
            diag.try_match_named(name, &field, &gate)
        });
        self.inner.push_check(name.to_string(), expected, run);
        self
    }

    /// Like [`with_property`](Self::with_property), but an absent value
    /// (an `Option` field holding `None`) is forwarded to the matcher's
    /// `matches_absent` instead of failing outright. Pair with
    /// [`absent`](crate::matcher::absent) to assert a field holds nothing.
    pub fn with_optional_property<M>(mut self, name: &'static str, matcher: M) -> Self
    where
        M: FieldMatch + 'static,
    {
        let name = Self::checked_name(name);
        let gate = TypeGate::<M::Value, M>::tolerant(matcher);
        let expected = description_of(&gate);
        let run = Box::new(move |actual: &T, diag: &mut Diagnostics| {
            let field = actual.field(name).unwrap_or(FieldValue::Absent);
            diag.try_match_named(name, &field, &gate)
        });
        self.inner.push_check(name.to_string(), expected, run);
        self
    }
}

impl<T: Fields + 'static> Default for PropertyMatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Fields> SelfDescribing for PropertyMatcher<T> {
    fn describe_to(&self, description: &mut Description) {
        self.inner.describe_to(description);
    }
}

impl<T: Fields> Matcher<T> for PropertyMatcher<T> {
    fn matches(&self, actual: &T, diag: &mut Diagnostics) -> bool {
        self.inner.matches(actual, diag)
    }
}

impl<T: Fields + Any + Debug> FieldMatch for PropertyMatcher<T> {
    type Value = T;
}
