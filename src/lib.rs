//! # affirm
//!
//! A composable matcher library with nested failure diagnostics.
//!
//! Matchers describe what a value should look like; when a match fails, the
//! assertion panics with a tree-shaped trace showing every attempted
//! sub-match, so a failure three levels deep in a list of objects reads as
//! a path rather than a bare `false`.
//!
//! ## Quick Start
//!
//! ```rust
//! use affirm::{assert_that, matchers::strings};
//!
//! assert_that(&"hello world".to_string(), &strings::starts_with("hello"));
//! ```
//!
//! ## Matching Lists
//!
//! ```rust
//! use affirm::{assert_that, list, matchers, matchers::strings};
//!
//! let lines = vec!["first".to_string(), "second".to_string()];
//!
//! assert_that(
//!     &lines,
//!     &list::in_order_only(matchers![
//!         strings::equal_to("first"),
//!         strings::starts_with("sec"),
//!     ]),
//! );
//! ```
//!
//! ## Matching Objects
//!
//! ```rust
//! use affirm::{assert_that, fields, matchers::primitives, matchers::strings};
//! use affirm::object::PropertyMatcher;
//!
//! #[derive(Debug)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//! fields!(User { name, age });
//!
//! let user = User { name: "Ada".to_string(), age: 36 };
//!
//! assert_that(
//!     &user,
//!     &PropertyMatcher::<User>::new()
//!         .with_property("name", strings::equal_to("Ada"))
//!         .with_property("age", primitives::gt(18_u32)),
//! );
//! ```

pub mod combinators;
pub mod description;
pub mod diagnostics;
pub mod expect;
pub mod list;
pub mod matcher;
pub mod matchers;
pub mod object;

// Assertion entry points
pub use expect::{assert_that, verify, MatchError};

// Core matching types
pub use description::{description_of, pretty_debug, Description, SelfDescribing};
pub use diagnostics::Diagnostics;
pub use matcher::{
    absent, satisfies, satisfies_with_diag, ActualValue, FieldMatch, FieldValue, Matcher, TypeGate,
};

// Composition
pub use combinators::{all_of, all_of_boxed, any_of, any_of_boxed, not};

// Object matching
pub use object::{Fields, ObjectMatcher, PropertyMatcher};
