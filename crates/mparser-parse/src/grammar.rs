use mparser_yellow::SyntaxKind::{self, *};
use mparser_yellow::{GreenElement, GreenNode, GreenToken, SyntaxFactory, SyntaxSet};

use crate::parser::{Marker, Parser};

mod expressions;
mod statements;

pub(crate) use statements::file;

/// Tokens that may begin an expression, keywords aside.
const EXPRESSION_FIRST: SyntaxSet = SyntaxSet::new([
    IDENTIFIER,
    NUMBER_LITERAL,
    STRING_LITERAL,
    DOUBLE_QUOTED_STRING_LITERAL,
    UNQUOTED_STRING_LITERAL,
    OPENING_SQUARE_BRACKET,
    OPENING_BRACE,
    OPENING_BRACKET,
    AT,
    PLUS,
    MINUS,
    NOT,
    COLON,
]);

pub(crate) fn identifier_name(p: &mut Parser<'_>) -> GreenNode {
    debug_assert!(p.at(IDENTIFIER));
    SyntaxFactory::new().identifier_name(p.bump())
}

/// A zero-width name standing in for a missing operand.
pub(crate) fn missing_name(p: &mut Parser<'_>, message: &str) -> GreenNode {
    let mut m = p.start();
    m.error_here(p, format!("{message}, found {}", p.describe_current()));
    m.factory().identifier_name(GreenToken::missing(IDENTIFIER))
}

/// Wraps the current token in an `ERROR` node.
pub(crate) fn error_token(p: &mut Parser<'_>, message: String) -> GreenNode {
    let mut m = p.start();
    m.error_at_current(p, message);
    let skipped = vec![p.bump().into()];
    m.factory().error(skipped)
}

/// Parses `bra element (delim element)* ket` into `elements`, keeping the
/// delimiters as tokens. A delimiter with no element before it is wrapped in
/// an `ERROR` node; elements not separated by `delim` are reported.
pub(crate) fn delimited(
    p: &mut Parser<'_>,
    m: &mut Marker,
    (bra, ket, delim): (SyntaxKind, SyntaxKind, SyntaxKind),
    first_set: &SyntaxSet,
    mut element: impl FnMut(&mut Parser<'_>) -> Option<GreenElement>,
) -> (GreenToken, Vec<GreenElement>, GreenToken) {
    debug_assert_eq!(p.peek_kind(), bra);
    let bra = p.bump();
    let mut elements = Vec::new();

    while !p.at(ket) && !p.at(END_OF_FILE) && !p.at_block_boundary() {
        if p.at(delim) {
            let message = format!("unexpected {}", delim.describe());
            elements.push(error_token(p, message).into());
            continue;
        }

        let Some(parsed) = element(p) else { break };
        elements.push(parsed);

        match p.eat(delim) {
            Some(token) => elements.push(token.into()),
            None if first_set.contains(p.peek_kind()) && !p.at_block_boundary() => {
                m.error_here(p, format!("expected {}", delim.describe()));
            }
            None => break,
        }
    }

    let ket = p.expect(m, ket);
    (bra, elements, ket)
}
