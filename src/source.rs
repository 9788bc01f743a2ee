//! Read-only access to the text a fixer is bound to.

use crate::range::TextRange;
use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

/// An immutable source buffer.
///
/// Only the text is ever read. Implementations must not change what
/// `text()` returns while a fixer holds them.
pub trait SourceBuffer {
    fn text(&self) -> &str;
}

impl SourceBuffer for str {
    fn text(&self) -> &str {
        self
    }
}

impl SourceBuffer for String {
    fn text(&self) -> &str {
        self.as_str()
    }
}

impl SourceBuffer for Cow<'_, str> {
    fn text(&self) -> &str {
        self
    }
}

impl SourceBuffer for Arc<str> {
    fn text(&self) -> &str {
        self
    }
}

impl SourceBuffer for Rc<str> {
    fn text(&self) -> &str {
        self
    }
}

impl<T: SourceBuffer + ?Sized> SourceBuffer for &T {
    fn text(&self) -> &str {
        (**self).text()
    }
}

/// Copy out the text covered by `range`.
///
/// Never panics. Offsets past the end are clamped to the text length and
/// `start >= end` gives an empty string. A range that splits a UTF-8
/// sequence is decoded lossily.
pub fn slice_text(text: &str, range: TextRange) -> String {
    let end = range.end.min(text.len());
    let start = range.start.min(end);

    match text.get(start..end) {
        Some(slice) => slice.to_string(),
        None => String::from_utf8_lossy(&text.as_bytes()[start..end]).into_owned(),
    }
}
