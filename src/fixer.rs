//! Construction of [`Fix`] values from editing intents.
//!
//! Every operation is total: ranges are taken as given, never checked
//! against the buffer or against each other. Whatever an operation is
//! handed, it returns a descriptor; rejecting malformed ones is the job of
//! an [`crate::apply::FixApplier`].
//!
//! The range forms are free functions so they can be used without binding
//! a buffer. [`RuleFixer`] wraps them, and each of its element methods only
//! reads the element's range and calls the matching range method, so the
//! two forms agree for the same underlying range.

use crate::fix::Fix;
use crate::range::{Located, TextRange};
use crate::source::{slice_text, SourceBuffer};

/// Zero-width fix at `offset`. All insertions go through here.
fn insertion_at(offset: usize, text: impl Into<String>) -> Fix {
    Fix::new(TextRange::at(offset), text)
}

/// Insert `text` at `range.end`.
pub fn insert_text_after_range(range: impl Into<TextRange>, text: impl Into<String>) -> Fix {
    insertion_at(range.into().end, text)
}

/// Insert `text` at `range.start`.
pub fn insert_text_before_range(range: impl Into<TextRange>, text: impl Into<String>) -> Fix {
    insertion_at(range.into().start, text)
}

pub fn replace_text_range(range: impl Into<TextRange>, text: impl Into<String>) -> Fix {
    Fix::new(range, text)
}

pub fn remove_range(range: impl Into<TextRange>) -> Fix {
    Fix::new(range, String::new())
}

/// Fix that rewrites `range` with its own current text.
///
/// The text is copied out of `source` now; the fix holds no reference to
/// the buffer afterwards.
pub fn keep_range<S: SourceBuffer + ?Sized>(source: &S, range: impl Into<TextRange>) -> Fix {
    let range = range.into();
    Fix::new(range, slice_text(source.text(), range))
}

/// Builds fixes against one immutable source buffer.
///
/// Holds nothing but a shared reference, so it is `Copy` and can be used
/// from any number of threads when the buffer is `Sync`.
#[derive(Debug)]
pub struct RuleFixer<'s, S: SourceBuffer + ?Sized> {
    source: &'s S,
}

impl<S: SourceBuffer + ?Sized> Clone for RuleFixer<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: SourceBuffer + ?Sized> Copy for RuleFixer<'_, S> {}

impl<'s, S: SourceBuffer + ?Sized> RuleFixer<'s, S> {
    pub fn new(source: &'s S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &'s S {
        self.source
    }

    pub fn insert_text_after(&self, element: &impl Located, text: impl Into<String>) -> Fix {
        self.insert_text_after_range(element.text_range(), text)
    }

    pub fn insert_text_after_range(
        &self,
        range: impl Into<TextRange>,
        text: impl Into<String>,
    ) -> Fix {
        insert_text_after_range(range, text)
    }

    pub fn insert_text_before(&self, element: &impl Located, text: impl Into<String>) -> Fix {
        self.insert_text_before_range(element.text_range(), text)
    }

    pub fn insert_text_before_range(
        &self,
        range: impl Into<TextRange>,
        text: impl Into<String>,
    ) -> Fix {
        insert_text_before_range(range, text)
    }

    pub fn replace_text(&self, element: &impl Located, text: impl Into<String>) -> Fix {
        self.replace_text_range(element.text_range(), text)
    }

    pub fn replace_text_range(&self, range: impl Into<TextRange>, text: impl Into<String>) -> Fix {
        replace_text_range(range, text)
    }

    pub fn remove(&self, element: &impl Located) -> Fix {
        self.remove_range(element.text_range())
    }

    pub fn remove_range(&self, range: impl Into<TextRange>) -> Fix {
        remove_range(range)
    }

    /// Keep `element` untouched while still claiming its range, so that
    /// any other fix touching it is reported as a conflict.
    pub fn keep(&self, element: &impl Located) -> Fix {
        self.keep_range(element.text_range())
    }

    pub fn keep_range(&self, range: impl Into<TextRange>) -> Fix {
        keep_range(self.source, range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ident {
        range: TextRange,
    }

    impl Located for Ident {
        fn text_range(&self) -> TextRange {
            self.range
        }
    }

    const SOURCE: &str = "const a = 1;";

    fn ident_a() -> Ident {
        Ident {
            range: TextRange::new(6, 7),
        }
    }

    #[test]
    fn insert_before_is_zero_width_at_start() {
        let fixer = RuleFixer::new(SOURCE);
        assert_eq!(
            fixer.insert_text_before(&ident_a(), "let "),
            Fix::new(TextRange::at(6), "let ")
        );
    }

    #[test]
    fn insert_after_is_zero_width_at_end() {
        let fixer = RuleFixer::new("foo(bar)");
        assert_eq!(
            fixer.insert_text_after_range((0, 8), ";"),
            Fix::new(TextRange::at(8), ";")
        );
        assert_eq!(
            fixer.insert_text_after(&ident_a(), "x"),
            Fix::new(TextRange::at(7), "x")
        );
    }

    #[test]
    fn replace_remove_keep_use_full_range() {
        let fixer = RuleFixer::new(SOURCE);
        let a = ident_a();
        assert_eq!(fixer.replace_text(&a, "b"), Fix::new((6, 7), "b"));
        assert_eq!(fixer.remove(&a), Fix::new((6, 7), ""));
        assert_eq!(fixer.keep(&a), Fix::new((6, 7), "a"));
    }

    #[test]
    fn zero_width_remove_and_replace() {
        let fixer = RuleFixer::new(SOURCE);
        assert_eq!(fixer.remove_range((5, 5)), Fix::new(TextRange::at(5), ""));
        assert_eq!(
            fixer.replace_text_range((5, 5), "x"),
            fixer.insert_text_before_range((5, 5), "x")
        );
    }

    #[test]
    fn malformed_ranges_pass_through() {
        let fixer = RuleFixer::new(SOURCE);
        assert_eq!(fixer.remove_range((9, 2)), Fix::new((9, 2), ""));
        assert_eq!(
            fixer.insert_text_before_range((400, 500), "x"),
            Fix::new(TextRange::at(400), "x")
        );
        assert_eq!(fixer.keep_range((9, 2)), Fix::new((9, 2), ""));
        assert_eq!(fixer.keep_range((10, 99)), Fix::new((10, 99), "1;"));
    }

    #[test]
    fn text_is_taken_verbatim() {
        let fixer = RuleFixer::new(SOURCE);
        let raw = "\"quoted\"\n\t\\n";
        assert_eq!(fixer.replace_text(&ident_a(), raw).text, raw);
    }

    #[test]
    fn keep_copies_text_out_of_buffer() {
        let fix = {
            let owned = String::from("fn main() {}");
            RuleFixer::new(&owned).keep_range((3, 7))
        };
        assert_eq!(fix, Fix::new((3, 7), "main"));
    }

    #[test]
    fn free_functions_match_methods() {
        let fixer = RuleFixer::new(SOURCE);
        assert_eq!(keep_range(SOURCE, (0, 5)), fixer.keep_range((0, 5)));
        assert_eq!(remove_range((0, 5)), fixer.remove_range((0, 5)));
    }

    #[test]
    fn fixer_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleFixer<'static, str>>();
        assert_send_sync::<RuleFixer<'static, String>>();
    }
}
