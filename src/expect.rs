//! Assertion entry points.
//!
//! [`assert_that`] panics with the full diagnostic trace on mismatch, for
//! use inside tests. [`verify`] returns the trace as a [`MatchError`]
//! instead, for callers that aggregate failures or assert from non-test
//! code.
//!
//! # Example
//!
//! ```rust
//! use affirm::assert_that;
//! use affirm::matchers::strings;
//!
//! assert_that(&"hello".to_string(), &strings::starts_with("he"));
//! ```

use std::fmt::Debug;

use thiserror::Error;

use crate::diagnostics::Diagnostics;
use crate::matcher::Matcher;

/// A failed match, carrying the full diagnostic trace.
#[derive(Debug, Error)]
#[error("\n{trace}")]
pub struct MatchError {
    /// The rendered trace of the failed match attempt.
    pub trace: String,
}

/// Match `actual` against `matcher`, returning the diagnostic trace as an
/// error on mismatch.
pub fn verify<T: ?Sized + Debug>(actual: &T, matcher: &dyn Matcher<T>) -> Result<(), MatchError> {
    let mut diag = Diagnostics::new();
    if diag.try_match(actual, matcher) {
        Ok(())
    } else {
        Err(MatchError {
            trace: diag.into_trace(),
        })
    }
}

/// Match `actual` against `matcher`, panicking with the diagnostic trace
/// on mismatch.
#[track_caller]
pub fn assert_that<T: ?Sized + Debug>(actual: &T, matcher: &dyn Matcher<T>) {
    if let Err(e) = verify(actual, matcher) {
        panic!("assertion failed:{}", e);
    }
}
