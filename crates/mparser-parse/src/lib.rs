//! Recursive-descent parser producing lossless syntax trees.
//!
//! Lexical errors are fatal and returned as [`LexError`]. Syntax errors are
//! recovered from: the tree is always built, and problems are attached to the
//! nodes they concern as diagnostics.

mod grammar;
mod parser;

use mparser_inputs::SourceFile;
pub use mparser_tokenizer::LexError;
use mparser_tokenizer::Tokenizer;
use mparser_yellow::SyntaxTree;
use tracing::debug_span;

pub fn parse(source: &SourceFile) -> Result<SyntaxTree, LexError> {
    let _span = debug_span!("parse", file = source.display_name()).entered();
    let tokens = Tokenizer::with_file(source.text(), source.id()).parse_all()?;
    let mut parser = parser::Parser::new(tokens);
    let green = grammar::file(&mut parser);
    Ok(SyntaxTree::new(source.clone(), green, Vec::new()))
}

/// Parses text that does not come from a file.
pub fn parse_text(text: &str) -> Result<SyntaxTree, LexError> {
    parse(&SourceFile::detached(text))
}
