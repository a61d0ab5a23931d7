use mparser_yellow::SyntaxKind::*;
use mparser_yellow::{GreenElement, GreenNode, GreenToken, SyntaxFactory, TriviaKind};

use super::expressions::{
    at_expression_start, compound_name, expression, expression_or_missing, function_input,
};
use super::{error_token, identifier_name, missing_name};
use crate::parser::{Context, Marker, Parser};

pub(crate) fn file(p: &mut Parser<'_>) -> GreenNode {
    let mut statements = Vec::new();
    while !p.at(END_OF_FILE) {
        if p.at_block_boundary() {
            let message = format!("unexpected {}", p.describe_current());
            statements.push(error_token(p, message).into());
            continue;
        }
        statements.push(statement(p).into());
    }
    let end_of_file = p.bump_eof();
    SyntaxFactory::new().file(statements, end_of_file)
}

/// Statements up to the keyword that closes the enclosing block. Inside a
/// function, `function` also closes the body of a function without `end`.
fn block(p: &mut Parser<'_>) -> Vec<GreenElement> {
    let mut statements = Vec::new();
    while !p.at(END_OF_FILE)
        && !p.at_block_boundary()
        && !(p.in_function() && p.at_keyword("function"))
    {
        statements.push(statement(p).into());
    }
    statements
}

fn statement(p: &mut Parser<'_>) -> GreenNode {
    if p.at(IDENTIFIER) {
        match p.current().text() {
            "function" => return function_declaration(p),
            "if" => return if_statement(p),
            "while" => return while_statement(p),
            "for" => return for_statement(p),
            "switch" => return switch_statement(p),
            "try" => return try_catch_statement(p),
            "break" | "continue" | "return" => return keyword_statement(p),
            _ => {}
        }
    }

    match p.peek_kind() {
        SEMICOLON | COMMA => SyntaxFactory::new().empty_statement(p.bump()),
        _ if at_expression_start(p) => expression_statement(p),
        _ => {
            let message = format!("unexpected {}", p.describe_current());
            error_token(p, message)
        }
    }
}

fn expression_statement(p: &mut Parser<'_>) -> GreenNode {
    let mut m = p.start();
    let expression = if at_command(p) { command(p) } else { assignment_or_expression(p) };
    let terminator = statement_terminator(p, &mut m);
    m.factory().expression_statement(expression, terminator)
}

/// `break`, `continue` and `return` stand alone as names.
fn keyword_statement(p: &mut Parser<'_>) -> GreenNode {
    let mut m = p.start();
    let name = identifier_name(p);
    let terminator = statement_terminator(p, &mut m);
    m.factory().expression_statement(name, terminator)
}

/// A statement ends with `;`, `,`, a line break, or the keyword closing the
/// enclosing block.
fn statement_terminator(p: &mut Parser<'_>, m: &mut Marker) -> Option<GreenToken> {
    if let Some(token) = p.eat(SEMICOLON) {
        return Some(token);
    }
    if let Some(token) = p.eat(COMMA) {
        return Some(token);
    }
    if !p.after_line_break() && !p.at(END_OF_FILE) && !p.at_block_boundary() {
        let message =
            format!("expected ';', ',' or a line break, found {}", p.describe_current());
        m.error_here(p, message);
    }
    None
}

/// The tokenizer has already turned the arguments of `name arg arg` into
/// string literals. A name followed by anything but plain whitespace, such
/// as a continuation, never starts a command.
fn at_command(p: &Parser<'_>) -> bool {
    let name = p.current();
    p.at_name()
        && !name.trailing.is_empty()
        && name.trailing.pieces().iter().all(|piece| piece.kind == TriviaKind::Whitespace)
        && matches!(
            p.nth(1).kind(),
            UNQUOTED_STRING_LITERAL | STRING_LITERAL | DOUBLE_QUOTED_STRING_LITERAL
        )
}

fn command(p: &mut Parser<'_>) -> GreenNode {
    let command_name = identifier_name(p);
    let mut arguments = Vec::new();
    while !p.after_line_break() {
        let factory = SyntaxFactory::new();
        let argument = match p.peek_kind() {
            UNQUOTED_STRING_LITERAL => factory.unquoted_string_literal_expression(p.bump()),
            STRING_LITERAL => factory.string_literal_expression(p.bump()),
            DOUBLE_QUOTED_STRING_LITERAL => {
                factory.double_quoted_string_literal_expression(p.bump())
            }
            _ => break,
        };
        arguments.push(argument.into());
    }
    SyntaxFactory::new().command_expression(command_name, arguments)
}

fn assignment_or_expression(p: &mut Parser<'_>) -> GreenNode {
    let mut m = p.start();
    let lhs = expression(p);
    if !p.at(ASSIGNMENT) || p.after_line_break() {
        return lhs;
    }
    let assignment_sign = p.bump();
    let rhs = expression_or_missing(p);
    m.factory().assignment_expression(lhs, assignment_sign, rhs)
}

fn optional_commas(p: &mut Parser<'_>) -> Vec<GreenElement> {
    let mut commas = Vec::new();
    while matches!(p.peek_kind(), COMMA | SEMICOLON) {
        commas.push(p.bump().into());
    }
    commas
}

fn if_statement(p: &mut Parser<'_>) -> GreenNode {
    let mut m = p.start();
    let if_keyword = p.bump();
    let condition = expression_or_missing(p);
    let optional_commas = optional_commas(p);
    let body = block(p);

    let mut elseif_clauses = Vec::new();
    while p.at_keyword("elseif") {
        elseif_clauses.push(elseif_clause(p).into());
    }
    let else_clause = if p.at_keyword("else") { Some(else_clause(p)) } else { None };

    let end_keyword = p.expect_keyword(&mut m, "end");
    m.factory().if_statement(
        if_keyword,
        condition,
        optional_commas,
        body,
        elseif_clauses,
        else_clause,
        end_keyword,
    )
}

fn elseif_clause(p: &mut Parser<'_>) -> GreenNode {
    let elseif_keyword = p.bump();
    let condition = expression_or_missing(p);
    let optional_commas = optional_commas(p);
    let body = block(p);
    SyntaxFactory::new().elseif_clause(elseif_keyword, condition, optional_commas, body)
}

fn else_clause(p: &mut Parser<'_>) -> GreenNode {
    let else_keyword = p.bump();
    let body = block(p);
    SyntaxFactory::new().else_clause(else_keyword, body)
}

fn while_statement(p: &mut Parser<'_>) -> GreenNode {
    let mut m = p.start();
    let while_keyword = p.bump();
    let condition = expression_or_missing(p);
    let optional_commas = optional_commas(p);
    let body = block(p);
    let end_keyword = p.expect_keyword(&mut m, "end");
    m.factory().while_statement(while_keyword, condition, optional_commas, body, end_keyword)
}

fn for_statement(p: &mut Parser<'_>) -> GreenNode {
    let mut m = p.start();
    let for_keyword = p.bump();
    let for_assignment =
        if p.at(OPENING_BRACKET) { parenthesized_loop_header(p) } else { loop_header(p) };
    let optional_commas = optional_commas(p);
    let body = block(p);
    let end_keyword = p.expect_keyword(&mut m, "end");
    m.factory().for_statement(for_keyword, for_assignment, optional_commas, body, end_keyword)
}

fn loop_header(p: &mut Parser<'_>) -> GreenNode {
    if at_expression_start(p) {
        assignment_or_expression(p)
    } else {
        missing_name(p, "expected a loop variable")
    }
}

/// `for (i = 1:n)` keeps the brackets as a parenthesized expression around
/// the assignment.
fn parenthesized_loop_header(p: &mut Parser<'_>) -> GreenNode {
    let mut m = p.start();
    let opening_bracket = p.bump();
    let header = p.with_context(Context::Parens, loop_header);
    let closing_bracket = p.expect(&mut m, CLOSING_BRACKET);
    m.factory().parenthesized_expression(opening_bracket, header, closing_bracket)
}

fn switch_statement(p: &mut Parser<'_>) -> GreenNode {
    let mut m = p.start();
    let switch_keyword = p.bump();
    let switch_expression = expression_or_missing(p);
    let optional_commas = optional_commas(p);

    let mut cases = Vec::new();
    while p.at_keyword("case") || p.at_keyword("otherwise") {
        cases.push(switch_case(p).into());
    }

    let end_keyword = p.expect_keyword(&mut m, "end");
    m.factory().switch_statement(switch_keyword, switch_expression, optional_commas, cases, end_keyword)
}

/// `case value` or `otherwise`, with the statements up to the next one.
fn switch_case(p: &mut Parser<'_>) -> GreenNode {
    let is_case = p.at_keyword("case");
    let case_keyword = p.bump();
    let case_identifier = if is_case { Some(expression_or_missing(p)) } else { None };
    let optional_commas = optional_commas(p);
    let body = block(p);
    SyntaxFactory::new().switch_case(case_keyword, case_identifier, optional_commas, body)
}

fn try_catch_statement(p: &mut Parser<'_>) -> GreenNode {
    let mut m = p.start();
    let try_keyword = p.bump();
    let try_body = block(p);
    let catch_clause = if p.at_keyword("catch") { Some(catch_clause(p)) } else { None };
    let end_keyword = p.expect_keyword(&mut m, "end");
    m.factory().try_catch_statement(try_keyword, try_body, catch_clause, end_keyword)
}

/// `catch err` binds the exception when the name shares the line with
/// `catch`.
fn catch_clause(p: &mut Parser<'_>) -> GreenNode {
    let catch_keyword = p.bump();
    let catch_identifier =
        if p.at_name() && !p.after_line_break() { Some(identifier_name(p)) } else { None };
    let catch_body = block(p);
    SyntaxFactory::new().catch_clause(catch_keyword, catch_identifier, catch_body)
}

fn function_declaration(p: &mut Parser<'_>) -> GreenNode {
    let mut m = p.start();
    let function_keyword = p.bump();
    let output_description = function_output(p);
    let name =
        if p.at_name() { compound_name(p) } else { missing_name(p, "expected a function name") };
    let input_description =
        if p.at(OPENING_BRACKET) && !p.after_line_break() { Some(function_input(p)) } else { None };
    let commas = optional_commas(p);
    let body = p.with_function(block);
    let end_keyword = if p.at_keyword("end") { Some(p.bump()) } else { None };
    m.factory().function_declaration(
        function_keyword,
        output_description,
        name,
        input_description,
        commas,
        body,
        end_keyword,
    )
}

/// `[a, b] =` or `a =` before the function name.
fn function_output(p: &mut Parser<'_>) -> Option<GreenNode> {
    let mut m = p.start();
    let output_list = if p.at(OPENING_SQUARE_BRACKET) {
        let mut outputs = vec![p.bump().into()];
        loop {
            match p.peek_kind() {
                IDENTIFIER => outputs.push(identifier_name(p).into()),
                COMMA => outputs.push(p.bump().into()),
                _ => break,
            }
        }
        outputs.push(p.expect(&mut m, CLOSING_SQUARE_BRACKET).into());
        outputs
    } else if p.at_name() && p.nth(1).kind() == ASSIGNMENT {
        vec![identifier_name(p).into()]
    } else {
        return None;
    };
    let assignment_sign = p.expect(&mut m, ASSIGNMENT);
    Some(m.factory().function_output_description(output_list, assignment_sign))
}
