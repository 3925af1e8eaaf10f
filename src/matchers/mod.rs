//! The built-in matcher catalog.
//!
//! Organized by the kind of value matched:
//!
//! - [`primitives`] — equality, ordering, ranges, anything
//! - [`strings`] — equality, substrings, prefixes/suffixes, blankness,
//!   length, and (with the `pattern` feature) regex and glob patterns
//! - [`json`] — `serde_json::Value` objects (with the `json` feature)
//!
//! All of these return concrete matcher types, so they compose with the
//! combinators and list matchers without boxing until a heterogeneous
//! collection needs `Box<dyn Matcher<T>>`.

pub mod primitives;
pub mod strings;

#[cfg(feature = "json")]
pub mod json;
