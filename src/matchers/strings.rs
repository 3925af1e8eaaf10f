//! String matchers.
//!
//! Every matcher here works against `str`, `String`, and `&str` actual
//! values alike; assertions do not care which representation a test holds.
//!
//! With the `pattern` feature, [`matching`] (regex) and [`matching_glob`]
//! (glob wildcard) are available as well.

use crate::description::{Description, SelfDescribing};
use crate::diagnostics::Diagnostics;
use crate::matcher::{FieldMatch, Matcher};

// Each matcher implements a private `check(&str)`; this generates the
// Matcher impls for the three string shapes delegating to it, and pins the
// field gate to `String` so property registration infers.
macro_rules! str_matcher_impls {
    ($ty:ident) => {
        impl Matcher<str> for $ty {
            fn matches(&self, actual: &str, _diag: &mut Diagnostics) -> bool {
                self.check(actual)
            }
        }

        impl Matcher<String> for $ty {
            fn matches(&self, actual: &String, _diag: &mut Diagnostics) -> bool {
                self.check(actual)
            }
        }

        impl<'a> Matcher<&'a str> for $ty {
            fn matches(&self, actual: &&'a str, _diag: &mut Diagnostics) -> bool {
                self.check(actual)
            }
        }

        impl FieldMatch for $ty {
            type Value = String;
        }
    };
}

/// Match a string equal to `expected`.
pub fn equal_to(expected: impl Into<String>) -> StrEqual {
    StrEqual {
        expected: expected.into(),
    }
}

/// String equality matcher. See [`equal_to`].
pub struct StrEqual {
    expected: String,
}

impl StrEqual {
    fn check(&self, s: &str) -> bool {
        s == self.expected
    }
}

impl SelfDescribing for StrEqual {
    fn describe_to(&self, description: &mut Description) {
        description.text(format!("equal to {:?}", self.expected));
    }
}

str_matcher_impls!(StrEqual);

/// Match a string containing `substring`.
pub fn contains(substring: impl Into<String>) -> Contains {
    Contains {
        substring: substring.into(),
    }
}

/// Substring matcher. See [`contains`].
pub struct Contains {
    substring: String,
}

impl Contains {
    fn check(&self, s: &str) -> bool {
        s.contains(&self.substring)
    }
}

impl SelfDescribing for Contains {
    fn describe_to(&self, description: &mut Description) {
        description.text(format!("containing {:?}", self.substring));
    }
}

str_matcher_impls!(Contains);

/// Match a string starting with `prefix`.
pub fn starts_with(prefix: impl Into<String>) -> StartsWith {
    StartsWith {
        prefix: prefix.into(),
    }
}

/// Prefix matcher. See [`starts_with`].
pub struct StartsWith {
    prefix: String,
}

impl StartsWith {
    fn check(&self, s: &str) -> bool {
        s.starts_with(&self.prefix)
    }
}

impl SelfDescribing for StartsWith {
    fn describe_to(&self, description: &mut Description) {
        description.text(format!("starting with {:?}", self.prefix));
    }
}

str_matcher_impls!(StartsWith);

/// Match a string ending with `suffix`.
pub fn ends_with(suffix: impl Into<String>) -> EndsWith {
    EndsWith {
        suffix: suffix.into(),
    }
}

/// Suffix matcher. See [`ends_with`].
pub struct EndsWith {
    suffix: String,
}

impl EndsWith {
    fn check(&self, s: &str) -> bool {
        s.ends_with(&self.suffix)
    }
}

impl SelfDescribing for EndsWith {
    fn describe_to(&self, description: &mut Description) {
        description.text(format!("ending with {:?}", self.suffix));
    }
}

str_matcher_impls!(EndsWith);

/// Match a string equal to `expected`, ignoring ASCII case.
pub fn equal_ignoring_case(expected: impl Into<String>) -> EqualIgnoringCase {
    EqualIgnoringCase {
        expected: expected.into(),
    }
}

/// Case-insensitive equality matcher. See [`equal_ignoring_case`].
pub struct EqualIgnoringCase {
    expected: String,
}

impl EqualIgnoringCase {
    fn check(&self, s: &str) -> bool {
        s.eq_ignore_ascii_case(&self.expected)
    }
}

impl SelfDescribing for EqualIgnoringCase {
    fn describe_to(&self, description: &mut Description) {
        description.text(format!("equal to {:?} (ignoring case)", self.expected));
    }
}

str_matcher_impls!(EqualIgnoringCase);

/// Match a string that is empty or whitespace only.
pub fn blank() -> Blank {
    Blank
}

/// Blank-string matcher. See [`blank`].
pub struct Blank;

impl Blank {
    fn check(&self, s: &str) -> bool {
        s.trim().is_empty()
    }
}

impl SelfDescribing for Blank {
    fn describe_to(&self, description: &mut Description) {
        description.text("a blank string");
    }
}

str_matcher_impls!(Blank);

/// Match the empty string.
pub fn empty() -> Empty {
    Empty
}

/// Empty-string matcher. See [`empty`].
pub struct Empty;

impl Empty {
    fn check(&self, s: &str) -> bool {
        s.is_empty()
    }
}

impl SelfDescribing for Empty {
    fn describe_to(&self, description: &mut Description) {
        description.text("an empty string");
    }
}

str_matcher_impls!(Empty);

/// Match a string whose character count is `len`.
pub fn of_length(len: usize) -> OfLength {
    OfLength { len }
}

/// String length matcher. See [`of_length`].
pub struct OfLength {
    len: usize,
}

impl OfLength {
    fn check(&self, s: &str) -> bool {
        s.chars().count() == self.len
    }
}

impl SelfDescribing for OfLength {
    fn describe_to(&self, description: &mut Description) {
        description.text(format!("a string of length {}", self.len));
    }
}

str_matcher_impls!(OfLength);

/// Match a string against a regular expression.
///
/// The pattern is compiled at construction time; an invalid pattern is a
/// test-setup bug and panics.
#[cfg(feature = "pattern")]
pub fn matching(pattern: &str) -> Matching {
    let regex = match regex::Regex::new(pattern) {
        Ok(regex) => regex,
        Err(e) => panic!("invalid pattern '{}': {}", pattern, e),
    };
    Matching { regex }
}

/// Regex matcher. See [`matching`].
#[cfg(feature = "pattern")]
pub struct Matching {
    regex: regex::Regex,
}

#[cfg(feature = "pattern")]
impl Matching {
    fn check(&self, s: &str) -> bool {
        self.regex.is_match(s)
    }
}

#[cfg(feature = "pattern")]
impl SelfDescribing for Matching {
    fn describe_to(&self, description: &mut Description) {
        description.text(format!("matching pattern {:?}", self.regex.as_str()));
    }
}

#[cfg(feature = "pattern")]
str_matcher_impls!(Matching);

/// Match a string against a glob-style wildcard pattern (`*`, `?`).
#[cfg(feature = "pattern")]
pub fn matching_glob(pattern: &str) -> MatchingGlob {
    let glob = match glob::Pattern::new(pattern) {
        Ok(glob) => glob,
        Err(e) => panic!("invalid pattern '{}': {}", pattern, e),
    };
    MatchingGlob { glob }
}

/// Glob matcher. See [`matching_glob`].
#[cfg(feature = "pattern")]
pub struct MatchingGlob {
    glob: glob::Pattern,
}

#[cfg(feature = "pattern")]
impl MatchingGlob {
    fn check(&self, s: &str) -> bool {
        self.glob.matches(s)
    }
}

#[cfg(feature = "pattern")]
impl SelfDescribing for MatchingGlob {
    fn describe_to(&self, description: &mut Description) {
        description.text(format!("matching glob {:?}", self.glob.as_str()));
    }
}

#[cfg(feature = "pattern")]
str_matcher_impls!(MatchingGlob);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::description_of;

    #[test]
    fn test_equal_to_all_string_shapes() {
        let m = equal_to("hello");
        assert!(m.matches_quietly("hello"));
        assert!(m.matches_quietly(&"hello".to_string()));
        assert!(m.matches_quietly(&"hello"));
        assert!(!m.matches_quietly("HELLO"));
    }

    #[test]
    fn test_equal_to_description_quotes_value() {
        assert_eq!(description_of(&equal_to("two")), "equal to \"two\"");
    }

    #[test]
    fn test_contains() {
        let m = contains("ell");
        assert!(m.matches_quietly("hello"));
        assert!(!m.matches_quietly("world"));
    }

    #[test]
    fn test_starts_and_ends_with() {
        assert!(starts_with("he").matches_quietly("hello"));
        assert!(!starts_with("lo").matches_quietly("hello"));
        assert!(ends_with("lo").matches_quietly("hello"));
        assert!(!ends_with("he").matches_quietly("hello"));
    }

    #[test]
    fn test_equal_ignoring_case() {
        let m = equal_ignoring_case("Hello");
        assert!(m.matches_quietly("HELLO"));
        assert!(m.matches_quietly("hello"));
        assert!(!m.matches_quietly("hell"));
    }

    #[test]
    fn test_blank_and_empty() {
        assert!(blank().matches_quietly(""));
        assert!(blank().matches_quietly("   "));
        assert!(!blank().matches_quietly(" x "));
        assert!(empty().matches_quietly(""));
        assert!(!empty().matches_quietly(" "));
    }

    #[test]
    fn test_of_length_counts_chars_not_bytes() {
        assert!(of_length(5).matches_quietly("hello"));
        // "héllo" is 6 bytes but 5 chars
        assert!(of_length(5).matches_quietly("héllo"));
        assert!(!of_length(6).matches_quietly("héllo"));
    }

    #[cfg(feature = "pattern")]
    #[test]
    fn test_matching_regex() {
        let m = matching(r"^\d{3}-\d{4}$");
        assert!(m.matches_quietly("555-1234"));
        assert!(!m.matches_quietly("5551234"));
    }

    #[cfg(feature = "pattern")]
    #[test]
    #[should_panic(expected = "invalid pattern")]
    fn test_matching_invalid_regex_panics() {
        let _ = matching("(unclosed");
    }

    #[cfg(feature = "pattern")]
    #[test]
    fn test_matching_glob() {
        let m = matching_glob("item-*");
        assert!(m.matches_quietly("item-12"));
        assert!(!m.matches_quietly("thing-12"));
    }
}
