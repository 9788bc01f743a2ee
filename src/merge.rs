//! Folding several fixes for the same report into one.

use crate::fix::Fix;
use crate::range::TextRange;
use crate::source::SourceBuffer;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error("no fixes to merge")]
    Empty,

    #[error("fixes {first} and {second} overlap and cannot be merged")]
    Overlapping { first: TextRange, second: TextRange },

    #[error("fix range {0} is inverted")]
    InvertedRange(TextRange),

    #[error("fix range {range} out of bounds for source length {len}")]
    OutOfBounds { range: TextRange, len: usize },

    #[error("fix range {0} does not fall on UTF-8 character boundaries")]
    NotCharBoundary(TextRange),
}

fn check_range(text: &str, range: TextRange) -> Result<(), MergeError> {
    if range.is_inverted() {
        return Err(MergeError::InvertedRange(range));
    }
    if range.end > text.len() {
        return Err(MergeError::OutOfBounds {
            range,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(range.start) || !text.is_char_boundary(range.end) {
        return Err(MergeError::NotCharBoundary(range));
    }
    Ok(())
}

/// Merge `fixes` into a single fix spanning all of them.
///
/// The gaps between fixes are filled with the original text, so the
/// merged fix rewrites exactly what the individual fixes would have.
/// Touching fixes (one ends where the next starts) are fine; overlapping
/// ones are an error, as is any fix that does not fit the source.
pub fn merge_fixes<S: SourceBuffer + ?Sized>(source: &S, fixes: &[Fix]) -> Result<Fix, MergeError> {
    let text = source.text();
    for fix in fixes {
        check_range(text, fix.range)?;
    }

    let mut sorted: Vec<&Fix> = fixes.iter().collect();
    sorted.sort_by_key(|f| (f.range.start, f.range.end));

    let (first, rest) = match sorted.split_first() {
        Some(split) => split,
        None => return Err(MergeError::Empty),
    };
    if rest.is_empty() {
        return Ok((*first).clone());
    }

    let start = first.range.start;
    let mut cursor = first.range.end;
    let mut merged = first.text.clone();
    let mut previous = first.range;

    for fix in rest {
        if fix.range.start < cursor {
            return Err(MergeError::Overlapping {
                first: previous,
                second: fix.range,
            });
        }
        merged.push_str(&text[cursor..fix.range.start]);
        merged.push_str(&fix.text);
        cursor = fix.range.end;
        previous = fix.range;
    }

    Ok(Fix::new(TextRange::new(start, cursor), merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixer::RuleFixer;

    #[test]
    fn empty_list_is_an_error() {
        assert_eq!(merge_fixes("abc", &[]), Err(MergeError::Empty));
    }

    #[test]
    fn single_fix_is_returned_unchanged() {
        let fix = Fix::new((1, 2), "X");
        assert_eq!(merge_fixes("abc", &[fix.clone()]).unwrap(), fix);
    }

    #[test]
    fn gaps_are_filled_with_original_text() {
        let source = "foo(bar)";
        let fixer = RuleFixer::new(source);
        let fixes = [
            fixer.insert_text_after_range((0, 8), ";"),
            fixer.replace_text_range((0, 3), "baz"),
        ];
        let merged = merge_fixes(source, &fixes).unwrap();
        assert_eq!(merged, Fix::new((0, 8), "baz(bar);"));
    }

    #[test]
    fn keep_widens_merged_range_without_changing_text() {
        let source = "let x = 1;";
        let fixer = RuleFixer::new(source);
        let fixes = [fixer.replace_text_range((4, 5), "y"), fixer.keep_range((0, 10))];
        assert!(matches!(
            merge_fixes(source, &fixes),
            Err(MergeError::Overlapping { .. })
        ));

        let fixes = [fixer.replace_text_range((4, 5), "y"), fixer.keep_range((8, 9))];
        assert_eq!(merge_fixes(source, &fixes).unwrap(), Fix::new((4, 9), "y = 1"));
    }

    #[test]
    fn touching_fixes_merge() {
        let fixes = [Fix::new((0, 1), "A"), Fix::new((1, 2), "B")];
        assert_eq!(merge_fixes("ab", &fixes).unwrap(), Fix::new((0, 2), "AB"));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let fixes = [Fix::new((3, 1), ""), Fix::new((0, 1), "A")];
        assert_eq!(
            merge_fixes("abcd", &fixes),
            Err(MergeError::InvertedRange(TextRange::new(3, 1)))
        );
    }

    #[test]
    fn split_character_is_rejected_not_replaced() {
        // 'é' occupies bytes 1..3
        let fixes = [Fix::new((0, 2), "X"), Fix::new((3, 4), "Y")];
        assert_eq!(
            merge_fixes("héllo", &fixes),
            Err(MergeError::NotCharBoundary(TextRange::new(0, 2)))
        );
    }

    #[test]
    fn out_of_bounds_fix_is_rejected() {
        let fixes = [Fix::new((0, 1), "A"), Fix::new((50, 60), "B")];
        assert_eq!(
            merge_fixes("abc", &fixes),
            Err(MergeError::OutOfBounds {
                range: TextRange::new(50, 60),
                len: 3
            })
        );
    }

    #[test]
    fn single_malformed_fix_is_rejected_too() {
        assert!(matches!(
            merge_fixes("abc", &[Fix::new((2, 9), "")]),
            Err(MergeError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn merged_fix_applies_like_the_parts() {
        use crate::apply::{FixApplier, SpliceApplier};

        let source = "héllo wörld";
        let fixes = [Fix::new((0, 1), "H"), Fix::new((8, 10), "o")];
        let merged = merge_fixes(source, &fixes).unwrap();

        let applier = SpliceApplier::default();
        let whole = applier.apply(source, &[merged]).unwrap();
        let parts = applier.apply(source, &fixes).unwrap();
        assert!(whole.skipped.is_empty());
        assert_eq!(whole.output, parts.output);
        assert_eq!(whole.output, "Héllo world");
    }
}
