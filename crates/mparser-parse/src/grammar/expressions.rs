use mparser_yellow::SyntaxKind::{self, *};
use mparser_yellow::{GreenElement, GreenNode, GreenToken, SyntaxFactory, SyntaxSet};

use super::{EXPRESSION_FIRST, delimited, error_token, identifier_name, missing_name};
use crate::parser::{Context, Marker, Parser};

const PARAMETER_FIRST: SyntaxSet = SyntaxSet::new([IDENTIFIER, NOT]);

/// Binding power of binary operators, loosest first. All of them associate
/// to the left, `^` included.
fn infix_binding_power(kind: SyntaxKind) -> Option<u8> {
    Some(match kind {
        LOGICAL_OR => 1,
        LOGICAL_AND => 2,
        BITWISE_OR => 3,
        BITWISE_AND => 4,
        LESS | LESS_OR_EQUAL | GREATER | GREATER_OR_EQUAL | EQUALITY | INEQUALITY => 5,
        COLON => 6,
        PLUS | MINUS => 7,
        MULTIPLY | DIVIDE | BACKSLASH | DOT_MULTIPLY | DOT_DIVIDE | DOT_BACKSLASH => 8,
        POWER | DOT_POWER => 10,
        _ => return None,
    })
}

/// Prefix `+ - ~` bind tighter than `*` and looser than `^`: `-a^2` is
/// `-(a^2)`.
const PREFIX_BINDING_POWER: u8 = 9;

pub(crate) fn at_expression_start(p: &Parser<'_>) -> bool {
    match p.peek_kind() {
        IDENTIFIER => p.at_name(),
        COLON => p.in_index_context() && closes_argument(p.nth(1).kind()),
        kind => EXPRESSION_FIRST.contains(kind),
    }
}

fn closes_argument(kind: SyntaxKind) -> bool {
    matches!(kind, COMMA | CLOSING_BRACKET | CLOSING_BRACE)
}

/// An operand must start on the line of its operator unless brackets are
/// open.
fn at_operand(p: &Parser<'_>) -> bool {
    at_expression_start(p) && !ends_expression(p)
}

pub(crate) fn expression_or_missing(p: &mut Parser<'_>) -> GreenNode {
    if at_operand(p) { expression(p) } else { missing_name(p, "expected an expression") }
}

pub(crate) fn expression(p: &mut Parser<'_>) -> GreenNode {
    binary(p, 0)
}

fn binary(p: &mut Parser<'_>, min_binding_power: u8) -> GreenNode {
    let mut m = p.start();
    let mut lhs = prefix(p);

    loop {
        if ends_expression(p) {
            break;
        }
        let Some(binding_power) = infix_binding_power(p.peek_kind()) else { break };
        if binding_power < min_binding_power || starts_new_element(p) {
            break;
        }
        let operation = p.bump();
        let rhs = if at_operand(p) {
            binary(p, binding_power + 1)
        } else {
            missing_name(p, "expected an expression")
        };
        lhs = m.factory().binary_operation_expression(lhs, operation, rhs);
    }

    lhs
}

fn prefix(p: &mut Parser<'_>) -> GreenNode {
    if !matches!(p.peek_kind(), PLUS | MINUS | NOT) {
        return postfix(p);
    }
    let mut m = p.start();
    let operation = p.bump();
    let operand = if at_operand(p) {
        binary(p, PREFIX_BINDING_POWER)
    } else {
        missing_name(p, "expected an expression")
    };
    m.factory().unary_prefix_operation_expression(operation, operand)
}

/// A line break ends an expression unless it sits inside parentheses.
fn ends_expression(p: &Parser<'_>) -> bool {
    p.context() != Context::Parens && p.after_line_break()
}

/// Inside brackets, `[a -b]` holds two elements while `[a - b]` and `[a-b]`
/// hold one.
fn starts_new_element(p: &Parser<'_>) -> bool {
    p.context() == Context::Matrix
        && p.after_trivia()
        && matches!(p.peek_kind(), PLUS | MINUS)
        && p.current().trailing.is_empty()
}

fn postfix(p: &mut Parser<'_>) -> GreenNode {
    let mut m = p.start();
    let mut expression = primary(p);

    loop {
        if ends_expression(p) {
            break;
        }
        match p.peek_kind() {
            OPENING_BRACKET | OPENING_BRACE
                if p.context() == Context::Matrix && p.after_trivia() =>
            {
                break;
            }
            OPENING_BRACKET => {
                let (open, arguments, close) = arguments(p, &mut m, OPENING_BRACKET, CLOSING_BRACKET);
                expression =
                    m.factory().function_call_expression(expression, open, arguments, close);
            }
            OPENING_BRACE => {
                let (open, arguments, close) = arguments(p, &mut m, OPENING_BRACE, CLOSING_BRACE);
                expression = m
                    .factory()
                    .cell_array_element_access_expression(expression, open, arguments, close);
            }
            DOT => {
                let dot = p.bump();
                let member = member(p);
                expression = m.factory().member_access_expression(expression, dot, member);
            }
            TRANSPOSE | DOT_TRANSPOSE => {
                let operation = p.bump();
                expression = m.factory().unary_postfix_operation_expression(expression, operation);
            }
            _ => break,
        }
    }

    expression
}

fn arguments(
    p: &mut Parser<'_>,
    m: &mut Marker,
    bra: SyntaxKind,
    ket: SyntaxKind,
) -> (GreenToken, Vec<GreenElement>, GreenToken) {
    p.in_index(|p| {
        delimited(p, m, (bra, ket, COMMA), &EXPRESSION_FIRST, |p| {
            at_expression_start(p).then(|| expression(p).into())
        })
    })
}

/// The right side of `.`: a field name or a parenthesized dynamic field.
fn member(p: &mut Parser<'_>) -> GreenNode {
    match p.peek_kind() {
        IDENTIFIER => identifier_name(p),
        OPENING_BRACKET => {
            let mut m = p.start();
            let open = p.bump();
            let field = p.with_context(Context::Parens, expression_or_missing);
            let close = p.expect(&mut m, CLOSING_BRACKET);
            m.factory().indirect_member_access_expression(open, field, close)
        }
        _ => missing_name(p, "expected a field name"),
    }
}

fn primary(p: &mut Parser<'_>) -> GreenNode {
    let factory = SyntaxFactory::new();
    match p.peek_kind() {
        IDENTIFIER if p.at_name() => identifier_name(p),
        NUMBER_LITERAL => factory.number_literal_expression(p.bump()),
        STRING_LITERAL => factory.string_literal_expression(p.bump()),
        DOUBLE_QUOTED_STRING_LITERAL => factory.double_quoted_string_literal_expression(p.bump()),
        UNQUOTED_STRING_LITERAL => factory.unquoted_string_literal_expression(p.bump()),
        OPENING_SQUARE_BRACKET => {
            let mut m = p.start();
            let open = p.bump();
            let elements = matrix_elements(p, CLOSING_SQUARE_BRACKET);
            let close = p.expect(&mut m, CLOSING_SQUARE_BRACKET);
            m.factory().array_literal_expression(open, elements, close)
        }
        OPENING_BRACE => {
            let mut m = p.start();
            let open = p.bump();
            let elements = matrix_elements(p, CLOSING_BRACE);
            let close = p.expect(&mut m, CLOSING_BRACE);
            m.factory().cell_array_literal_expression(open, elements, close)
        }
        OPENING_BRACKET => {
            let mut m = p.start();
            let open = p.bump();
            let inner = p.with_context(Context::Parens, expression_or_missing);
            let close = p.expect(&mut m, CLOSING_BRACKET);
            m.factory().parenthesized_expression(open, inner, close)
        }
        AT => function_handle(p),
        COLON if p.in_index_context() => factory.magic_colon_expression(p.bump()),
        _ => missing_name(p, "expected an expression"),
    }
}

/// Rows of `[...]` or `{...}`. Commas, semicolons and whitespace separate
/// elements; line breaks separate rows.
fn matrix_elements(p: &mut Parser<'_>, close: SyntaxKind) -> Vec<GreenElement> {
    p.with_context(Context::Matrix, |p| {
        let mut elements = Vec::new();
        while !p.at(close) && !p.at(END_OF_FILE) {
            match p.peek_kind() {
                COMMA | SEMICOLON => elements.push(p.bump().into()),
                _ if at_expression_start(p) => elements.push(expression(p).into()),
                CLOSING_BRACKET | CLOSING_BRACE | CLOSING_SQUARE_BRACKET => break,
                _ if p.at_block_boundary() => break,
                _ => {
                    let message = format!("unexpected {}", p.describe_current());
                    elements.push(error_token(p, message).into());
                }
            }
        }
        elements
    })
}

/// `@name` or `@(params) body`.
fn function_handle(p: &mut Parser<'_>) -> GreenNode {
    let mut m = p.start();
    let at_sign = p.bump();
    match p.peek_kind() {
        OPENING_BRACKET => {
            let input = function_input(p);
            let body = expression_or_missing(p);
            m.factory().lambda_expression(at_sign, input, body)
        }
        IDENTIFIER => {
            let function_name = compound_name(p);
            m.factory().named_function_handle(at_sign, function_name)
        }
        _ => {
            let function_name = missing_name(p, "expected a function name");
            m.factory().named_function_handle(at_sign, function_name)
        }
    }
}

/// `name` or `name.name...`.
pub(crate) fn compound_name(p: &mut Parser<'_>) -> GreenNode {
    let first = identifier_name(p);
    if !continues_compound_name(p) {
        return first;
    }
    let mut nodes = vec![first.into()];
    while continues_compound_name(p) {
        nodes.push(p.bump().into());
        nodes.push(identifier_name(p).into());
    }
    SyntaxFactory::new().compound_name(nodes)
}

fn continues_compound_name(p: &Parser<'_>) -> bool {
    p.at(DOT) && p.nth(1).kind() == IDENTIFIER && !p.after_trivia()
}

/// `(a, ~, b)` in a function header or a lambda.
pub(crate) fn function_input(p: &mut Parser<'_>) -> GreenNode {
    let mut m = p.start();
    let (open, parameters, close) = p.with_context(Context::Parens, |p| {
        delimited(p, &mut m, (OPENING_BRACKET, CLOSING_BRACKET, COMMA), &PARAMETER_FIRST, parameter)
    });
    m.factory().function_input_description(open, parameters, close)
}

fn parameter(p: &mut Parser<'_>) -> Option<GreenElement> {
    match p.peek_kind() {
        IDENTIFIER => Some(identifier_name(p).into()),
        NOT => Some(p.bump().into()),
        _ => None,
    }
}
