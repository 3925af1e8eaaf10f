//! Matchers for `serde_json::Value` objects.
//!
//! [`entries_matching`] checks a set of expected entries against a JSON
//! object, matching each value as a glob pattern, a regex, or an exact
//! string (tried in that order). [`object_with`] drills into a single key
//! with an arbitrary [`Matcher<Value>`](crate::matcher::Matcher).

use std::collections::HashMap;

use serde_json::Value;

use crate::description::{Description, SelfDescribing};
use crate::diagnostics::Diagnostics;
use crate::matcher::{FieldMatch, Matcher};

/// Match one expected pattern against one actual JSON value.
///
/// Tried in order: glob pattern, regex, exact string comparison. Non-string
/// values are compared against their JSON rendering. Without the `pattern`
/// feature only the exact comparison applies.
pub fn pattern_matches(pattern: &str, actual: &Value) -> bool {
    let actual_str = match actual {
        Value::String(s) => s.clone(),
        v => v.to_string(),
    };

    #[cfg(feature = "pattern")]
    {
        if let Ok(glob) = glob::Pattern::new(pattern) {
            if glob.matches(&actual_str) {
                return true;
            }
        }
        if let Ok(re) = regex::Regex::new(pattern) {
            if re.is_match(&actual_str) {
                return true;
            }
        }
    }

    actual_str == pattern
}

/// Match a JSON object containing every expected entry.
///
/// Entries beyond the expected ones are ignored. A missing key is a
/// mismatch.
pub fn entries_matching(expected: HashMap<String, String>) -> EntriesMatching {
    EntriesMatching { expected }
}

/// JSON object entry matcher. See [`entries_matching`].
pub struct EntriesMatching {
    expected: HashMap<String, String>,
}

impl EntriesMatching {
    fn sorted_entries(&self) -> Vec<(&String, &String)> {
        let mut entries: Vec<_> = self.expected.iter().collect();
        entries.sort_by_key(|(k, _)| k.as_str());
        entries
    }
}

impl SelfDescribing for EntriesMatching {
    fn describe_to(&self, description: &mut Description) {
        description.text("a json object with entries:");
        description.indented(|d| {
            for (key, pattern) in self.sorted_entries() {
                d.text(format!("{}: {:?}", key, pattern));
            }
        });
    }
}

impl FieldMatch for EntriesMatching {
    type Value = Value;
}

impl Matcher<Value> for EntriesMatching {
    fn matches(&self, actual: &Value, diag: &mut Diagnostics) -> bool {
        for (key, pattern) in self.sorted_entries() {
            let Some(value) = actual.get(key) else {
                diag.text(format!("missing key {:?}", key));
                return false;
            };
            if !pattern_matches(pattern, value) {
                diag.text(format!(
                    "key {:?}: expected {:?} but was {}",
                    key, pattern, value
                ));
                return false;
            }
        }
        true
    }
}

/// Match a JSON object whose value at `key` satisfies `matcher`.
pub fn object_with(key: impl Into<String>, matcher: impl Matcher<Value> + 'static) -> KeyMatching {
    KeyMatching {
        key: key.into(),
        matcher: Box::new(matcher),
    }
}

/// Single-key JSON matcher. See [`object_with`].
pub struct KeyMatching {
    key: String,
    matcher: Box<dyn Matcher<Value>>,
}

impl SelfDescribing for KeyMatching {
    fn describe_to(&self, description: &mut Description) {
        description.text(format!("a json object where {:?}:", self.key));
        description.described_child(&self.matcher);
    }
}

impl FieldMatch for KeyMatching {
    type Value = Value;
}

impl Matcher<Value> for KeyMatching {
    fn matches(&self, actual: &Value, diag: &mut Diagnostics) -> bool {
        let Some(value) = actual.get(&self.key) else {
            diag.text(format!("missing key {:?}", self.key));
            return false;
        };
        diag.try_match_named(&self.key, value, &*self.matcher)
    }
}

/// Build an entry map for [`entries_matching`] from key-pattern pairs.
///
/// # Example
///
/// ```rust,ignore
/// let expected = entries! {
///     "file_path" => "*.txt",
///     "mode" => "append",
/// };
/// ```
#[macro_export]
macro_rules! entries {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut map = std::collections::HashMap::new();
        $(
            map.insert($key.to_string(), $value.to_string());
        )*
        map
    }};
}
