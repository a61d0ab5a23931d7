//! Lossless, immutable syntax tree.
//!
//! The green layer stores kinds, text and widths and can be shared freely.
//! The red layer wraps it with absolute positions and parent links,
//! materialized lazily as the tree is walked.

/// Typed AST wrappers around the raw syntax tree.
pub mod ast;
mod green;
mod red;
mod schema;
mod syntax;
mod syntax_kind;
mod syntax_set;
mod tree;
mod trivia;
mod visitor;

pub use green::{GreenElement, GreenNode, GreenToken, TokenValue};
pub use mparser_errors::{Diagnostic, Severity};
pub use red::{SyntaxNode, SyntaxNodeOrToken, SyntaxToken};
pub use schema::{SyntaxFactory, SyntaxVisitor, slot_names};
pub use syntax::{
    NodeOrToken, Preorder, PreorderWithTokens, SyntaxElementChildren, SyntaxNodeOrTokenList,
    TokenAtOffset, WalkEvent, WalkEventWithTokens,
};
pub use syntax_kind::{DescribeKind, KEYWORDS, SyntaxKind, is_keyword};
pub use syntax_set::SyntaxSet;
pub use text_size::{TextRange, TextSize};
pub use tree::SyntaxTree;
pub use trivia::{GreenTrivia, Trivia, TriviaIter, TriviaKind, TriviaPiece};
pub use visitor::{TextCollector, walk_node};
