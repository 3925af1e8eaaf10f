//! Indentation-aware text rendering for matcher descriptions and traces.
//!
//! This module provides the building blocks every diagnostic rendering goes
//! through:
//! - `Description` - an indent-tracking text buffer that renders nested,
//!   labeled values as a human-readable tree
//! - `SelfDescribing` - the capability a value implements to render its own
//!   nested description instead of a generic pretty-print
//!
//! # Example
//!
//! ```rust
//! use affirm::description::Description;
//!
//! let mut d = Description::new();
//! d.text("a list where:");
//! d.indented(|d| {
//!     d.text("[0] equal to \"one\"");
//!     d.text("[1] equal to \"two\"");
//! });
//! assert!(d.to_string().contains("  [0] equal to \"one\""));
//! ```

use std::fmt::{self, Debug};

/// Indent unit applied once per nesting level.
const INDENT: &str = "  ";

/// Capability for values that render their own nested description.
///
/// Matchers implement this so their expectation can be embedded in a failure
/// trace; plain values fall back to a `Debug`-based pretty rendering instead.
pub trait SelfDescribing {
    /// Render this value into the given description at its current indent.
    fn describe_to(&self, description: &mut Description);
}

impl SelfDescribing for str {
    fn describe_to(&self, description: &mut Description) {
        description.block(self);
    }
}

impl SelfDescribing for String {
    fn describe_to(&self, description: &mut Description) {
        description.block(self);
    }
}

impl<S: SelfDescribing + ?Sized> SelfDescribing for &S {
    fn describe_to(&self, description: &mut Description) {
        (**self).describe_to(description);
    }
}

impl<S: SelfDescribing + ?Sized> SelfDescribing for Box<S> {
    fn describe_to(&self, description: &mut Description) {
        (**self).describe_to(description);
    }
}

/// Render a self-describing value into a fresh description and return the
/// text. The result is a pure function of the value's configuration, so
/// repeated calls yield identical output.
pub fn description_of(value: &dyn SelfDescribing) -> String {
    let mut description = Description::new();
    value.describe_to(&mut description);
    description.finish()
}

/// Pretty-render a value via its `Debug` output, annotating quoted strings
/// with their length and flagging empty or whitespace-only strings.
pub fn pretty_debug<T: Debug + ?Sized>(value: &T) -> String {
    annotate(&format!("{:?}", value))
}

fn annotate(rendered: &str) -> String {
    if rendered.len() >= 2 && rendered.starts_with('"') && rendered.ends_with('"') {
        let inner = &rendered[1..rendered.len() - 1];
        let (len, blank) = measure_quoted(inner);
        if len == 0 {
            format!("{} (empty string)", rendered)
        } else if blank {
            format!("{} (blank string, length {})", rendered, len)
        } else {
            format!("{} (length {})", rendered, len)
        }
    } else {
        rendered.to_string()
    }
}

/// Measure the character count and blankness of a `Debug`-escaped string
/// body. Escape sequences like `\n` or `\u{7f}` count as the one character
/// they stand for, not the characters of their rendering.
fn measure_quoted(escaped: &str) -> (usize, bool) {
    let mut len = 0;
    let mut blank = true;
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        let c = if c == '\\' {
            match chars.next() {
                Some('n') => '\n',
                Some('r') => '\r',
                Some('t') => '\t',
                Some('0') => '\0',
                Some('u') => {
                    // \u{XXXX}: consume through the closing brace
                    let mut code = 0u32;
                    for d in chars.by_ref() {
                        match d.to_digit(16) {
                            Some(digit) => code = code * 16 + digit,
                            None if d == '}' => break,
                            None => {}
                        }
                    }
                    char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
                }
                Some(other) => other,
                None => break,
            }
        } else {
            c
        };
        len += 1;
        if !c.is_whitespace() {
            blank = false;
        }
    }
    (len, blank)
}

/// An indent-tracking text buffer.
///
/// Lines appended while not at the start of a line are preceded by a newline;
/// every line is prefixed with the current indentation. Indentation is pushed
/// and popped in pairs through the closure-scoped [`indented`](Self::indented).
///
/// Every append is also mirrored to an optional streaming listener (for live
/// console echo); mirroring never alters the buffered content.
pub struct Description {
    buf: String,
    depth: usize,
    at_line_start: bool,
    listener: Option<Box<dyn FnMut(&str)>>,
}

impl Description {
    /// Create an empty description.
    pub fn new() -> Self {
        Self {
            buf: String::new(),
            depth: 0,
            at_line_start: true,
            listener: None,
        }
    }

    /// Create a description that mirrors every appended fragment to the
    /// given listener as it is written.
    pub fn with_listener(listener: impl FnMut(&str) + 'static) -> Self {
        Self {
            buf: String::new(),
            depth: 0,
            at_line_start: true,
            listener: Some(Box::new(listener)),
        }
    }

    fn append(&mut self, s: &str) {
        self.buf.push_str(s);
        if let Some(listener) = &mut self.listener {
            listener(s);
        }
    }

    /// Append one line at the current indent, moving to a new line first if
    /// the buffer is mid-line.
    pub fn text(&mut self, line: impl AsRef<str>) {
        if !self.at_line_start {
            self.append("\n");
        }
        for _ in 0..self.depth {
            self.append(INDENT);
        }
        self.append(line.as_ref());
        self.at_line_start = false;
    }

    /// Append a possibly multi-line block, re-indenting every line to the
    /// current level.
    pub fn block(&mut self, text: &str) {
        for line in text.lines() {
            self.text(line);
        }
    }

    /// Run `f` with the indent level increased by one; the pop is paired
    /// with the push by construction.
    pub fn indented<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    /// Append a pretty rendering of an arbitrary value at the current
    /// indent. Multi-line renderings are re-indented line by line.
    pub fn value(&mut self, value: impl Debug) {
        let rendered = pretty_debug(&value);
        self.block(&rendered);
    }

    /// Append `label: value`, putting multi-line renderings on their own
    /// indented lines beneath the label.
    pub fn labeled_value(&mut self, label: &str, value: impl Debug) {
        let rendered = pretty_debug(&value);
        if rendered.contains('\n') {
            self.text(format!("{}:", label));
            self.indented(|d| d.block(&rendered));
        } else {
            self.text(format!("{}: {}", label, rendered));
        }
    }

    /// Append a value one indent level deeper than the current one.
    pub fn child(&mut self, value: impl Debug) {
        self.indented(|d| d.value(value));
    }

    /// Append `label:` followed by the value one indent level deeper.
    pub fn labeled_child(&mut self, label: &str, value: impl Debug) {
        self.text(format!("{}:", label));
        self.child(value);
    }

    /// Append a self-describing value one indent level deeper.
    pub fn described_child(&mut self, value: &dyn SelfDescribing) {
        self.indented(|d| value.describe_to(d));
    }

    /// Append `label:` followed by a self-describing value one level deeper.
    pub fn labeled_described_child(&mut self, label: &str, value: &dyn SelfDescribing) {
        self.text(format!("{}:", label));
        self.described_child(value);
    }

    /// Append plain items as one comma-separated unit: `[a, b, c]`.
    ///
    /// Use this for primitive items with no structured self-description;
    /// structured items belong in [`described_children`](Self::described_children).
    pub fn children<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: Debug,
    {
        let joined: Vec<String> = items.into_iter().map(|i| pretty_debug(&i)).collect();
        self.text(format!("[{}]", joined.join(", ")));
    }

    /// Append `label:` followed by plain items as one comma-separated unit.
    pub fn labeled_children<I>(&mut self, label: &str, items: I)
    where
        I: IntoIterator,
        I::Item: Debug,
    {
        let joined: Vec<String> = items.into_iter().map(|i| pretty_debug(&i)).collect();
        self.text(format!("{}: [{}]", label, joined.join(", ")));
    }

    /// Append self-describing items one per line at the current indent.
    pub fn described_children<'a, I>(&mut self, items: I)
    where
        I: IntoIterator<Item = &'a dyn SelfDescribing>,
    {
        for item in items {
            item.describe_to(self);
        }
    }

    /// Append `label:` followed by self-describing items one per line, one
    /// indent level deeper.
    pub fn labeled_described_children<'a, I>(&mut self, label: &str, items: I)
    where
        I: IntoIterator<Item = &'a dyn SelfDescribing>,
    {
        self.text(format!("{}:", label));
        self.indented(|d| {
            for item in items {
                item.describe_to(d);
            }
        });
    }

    /// Consume the description, returning the rendered text.
    pub fn finish(self) -> String {
        self.buf
    }
}

impl Default for Description {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}
