//! Tree-sitter front end that supplies located elements.
//!
//! Syntax nodes are used directly as [`Located`] values; leaf nodes are
//! additionally snapshotted as [`Token`]s so callers can hold them without
//! borrowing the tree.

use crate::range::{Located, TextRange};
use crate::source::SourceBuffer;
use ast_grep_language::{LanguageExt, SupportLang};
use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

#[derive(Error, Debug)]
pub enum TreeSitterError {
    #[error("failed to set language for parser")]
    LanguageSet,

    #[error("failed to parse source code")]
    ParseFailed,
}

/// Tree-sitter parser wrapper for Rust source code.
pub struct RustParser {
    parser: Parser,
}

impl RustParser {
    pub fn new() -> Result<Self, TreeSitterError> {
        let mut parser = Parser::new();
        let ts_lang = SupportLang::Rust.get_ts_language();
        parser
            .set_language(&ts_lang)
            .map_err(|_| TreeSitterError::LanguageSet)?;

        Ok(Self { parser })
    }

    pub fn parse(&mut self, source: &str) -> Result<Tree, TreeSitterError> {
        self.parser
            .parse(source, None)
            .ok_or(TreeSitterError::ParseFailed)
    }

    pub fn parse_with_source<'a>(
        &mut self,
        source: &'a str,
    ) -> Result<ParsedSource<'a>, TreeSitterError> {
        let tree = self.parse(source)?;
        Ok(ParsedSource { source, tree })
    }
}

/// A lexical token: the kind and range of a leaf node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: String,
    pub range: TextRange,
}

impl Located for Token {
    fn text_range(&self) -> TextRange {
        self.range
    }
}

/// A parsed source file with its tree-sitter tree.
pub struct ParsedSource<'a> {
    pub source: &'a str,
    pub tree: Tree,
}

impl<'a> ParsedSource<'a> {
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Whether the tree contains any ERROR or MISSING nodes.
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Source text under a node or token; empty if the range does not fit.
    pub fn text_of(&self, element: &impl Located) -> &'a str {
        self.source
            .get(element.text_range().as_std())
            .unwrap_or_default()
    }

    /// All leaf tokens in document order.
    pub fn tokens(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        collect_leaves(self.tree.root_node(), &mut tokens);
        tokens
    }

    /// First token whose text equals `text`.
    pub fn find_token(&self, text: &str) -> Option<Token> {
        self.tokens()
            .into_iter()
            .find(|t| self.text_of(t) == text)
    }

    /// First node of `kind` in pre-order.
    pub fn find_node(&self, kind: &str) -> Option<Node<'_>> {
        find_kind(self.tree.root_node(), kind)
    }
}

impl SourceBuffer for ParsedSource<'_> {
    fn text(&self) -> &str {
        self.source
    }
}

fn collect_leaves(node: Node<'_>, tokens: &mut Vec<Token>) {
    if node.child_count() == 0 {
        // MISSING nodes are zero-width placeholders, not source tokens
        if !node.is_missing() {
            tokens.push(Token {
                kind: node.kind().to_string(),
                range: node.text_range(),
            });
        }
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_leaves(child, tokens);
    }
}

fn find_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    if node.kind() == kind {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(|child| find_kind(child, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fix::Fix;
    use crate::fixer::RuleFixer;

    #[test]
    fn parse_valid_rust() {
        let mut parser = RustParser::new().unwrap();
        let parsed = parser.parse_with_source("fn main() {}").unwrap();

        assert!(!parsed.has_errors());
        assert_eq!(parsed.root_node().kind(), "source_file");
    }

    #[test]
    fn parse_invalid_rust() {
        let mut parser = RustParser::new().unwrap();
        let parsed = parser.parse_with_source("fn main( { }").unwrap();
        assert!(parsed.has_errors());
    }

    #[test]
    fn tokens_cover_leaves_in_order() {
        let mut parser = RustParser::new().unwrap();
        let parsed = parser.parse_with_source("const A: u8 = 1;").unwrap();
        let texts: Vec<&str> = parsed
            .tokens()
            .iter()
            .map(|t| parsed.text_of(t))
            .collect();
        assert_eq!(texts, ["const", "A", ":", "u8", "=", "1", ";"]);
    }

    #[test]
    fn nodes_and_tokens_drive_the_fixer_alike() {
        let mut parser = RustParser::new().unwrap();
        let parsed = parser.parse_with_source("const A: u8 = 1;").unwrap();
        let fixer = RuleFixer::new(&parsed);

        let token = parsed.find_token("A").unwrap();
        let node = parsed.find_node("identifier").unwrap();
        assert_eq!(token.range, TextRange::new(6, 7));
        assert_eq!(parsed.text_of(&node), "A");
        assert_eq!(parsed.text_of(&TextRange::new(6, 99)), "");
        assert_eq!(fixer.keep(&token), fixer.keep(&node));
        assert_eq!(fixer.replace_text(&node, "B"), Fix::new((6, 7), "B"));

        let item = parsed.find_node("const_item").unwrap();
        assert_eq!(
            fixer.insert_text_before(&item, "pub "),
            Fix::new(TextRange::at(0), "pub ")
        );
    }
}
