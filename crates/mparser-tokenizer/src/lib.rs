//! Lossless lexer: every character of the input ends up either in a token or
//! in the trivia attached to one.

mod cursor;
mod error;
mod number;
mod token;

pub use cursor::{EOF_CHAR, TextWindow, TextWindowWithNull, Window};
pub use error::LexError;
use mparser_inputs::{FileId, Position};
pub use mparser_yellow::SyntaxKind;
use mparser_yellow::SyntaxKind::*;
use mparser_yellow::{GreenTrivia, TokenValue, TriviaKind, TriviaPiece, is_keyword};
use text_size::TextSize;
pub use token::{PureToken, Token};
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug)]
struct LastToken {
    kind: SyntaxKind,
    has_trailing_trivia: bool,
    ends_line: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TriviaMode {
    /// Everything up to the next token.
    Leading,
    /// Up to and including the first line break.
    Trailing,
}

pub struct Tokenizer<'a> {
    text: &'a str,
    window: TextWindowWithNull<'a>,
    last: Option<LastToken>,
    bracket_depth: u32,
    at_statement_start: bool,
    command_mode: bool,
    trivia_pieces: Vec<TriviaPiece>,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::with_file(text, FileId::DETACHED)
    }

    pub fn with_file(text: &'a str, file: FileId) -> Self {
        Self {
            text,
            window: TextWindowWithNull::with_file(text, file),
            last: None,
            bracket_depth: 0,
            at_statement_start: true,
            command_mode: false,
            trivia_pieces: Vec::with_capacity(4),
            finished: false,
        }
    }

    /// Byte offset of the next unread character.
    pub fn offset(&self) -> TextSize {
        self.window.offset()
    }

    /// Reads one token with its leading and trailing trivia.
    ///
    /// After the end of the input this keeps returning `END_OF_FILE` tokens.
    pub fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        let start = self.window.offset();
        self.trivia_pieces.clear();
        self.trivia(TriviaMode::Leading);
        let leading_count = self.trivia_pieces.len();

        let pure = match self.pure_token(leading_count > 0) {
            Ok(pure) => pure,
            Err(error) => {
                debug!(%error, "tokenization failed");
                self.finished = true;
                return Err(error);
            }
        };
        if pure.kind == END_OF_FILE {
            self.finished = true;
        } else {
            self.trivia(TriviaMode::Trailing);
        }

        let (leading, trailing) = self.trivia_pieces.split_at(leading_count);
        let full_text = &self.text[usize::from(start)..usize::from(self.window.offset())];
        let token = Token::new(pure, GreenTrivia::new(leading), GreenTrivia::new(trailing), full_text);
        self.advance_state(&token);
        Ok(token)
    }

    /// Tokenizes the whole input. The last token is always `END_OF_FILE`.
    pub fn parse_all(self) -> Result<Vec<Token<'a>>, LexError> {
        let position = self.window.position();
        let tokens = self.collect::<Result<Vec<_>, _>>()?;
        match tokens.last() {
            Some(token) if token.kind() == END_OF_FILE => Ok(tokens),
            Some(token) => Err(LexError::MissingEndOfFile { position: token.position() }),
            None => Err(LexError::MissingEndOfFile { position }),
        }
    }

    fn trivia(&mut self, mode: TriviaMode) {
        let mut line_start = mode == TriviaMode::Leading && self.last.is_none_or(|last| last.ends_line);
        loop {
            let start = self.window.offset();
            let kind = match self.window.peek(0) {
                ' ' | '\t' => {
                    self.window.consume_while(|c| c == ' ' || c == '\t');
                    TriviaKind::Whitespace
                }
                '\n' | '\r' => {
                    self.consume_line_break();
                    TriviaKind::Newline
                }
                '%' if line_start && self.at_block_comment_open() => {
                    self.block_comment();
                    TriviaKind::BlockComment
                }
                '%' => {
                    self.window.consume_while(|c| !is_line_break(c));
                    TriviaKind::Comment
                }
                '.' if self.window.peek(1) == '.' && self.window.peek(2) == '.' => {
                    self.window.consume_while(|c| !is_line_break(c));
                    self.consume_line_break();
                    TriviaKind::LineContinuation
                }
                _ => break,
            };
            self.trivia_pieces.push(TriviaPiece::new(kind, self.window.offset() - start));

            match kind {
                TriviaKind::Newline | TriviaKind::LineContinuation => {
                    if mode == TriviaMode::Trailing {
                        break;
                    }
                    line_start = true;
                }
                TriviaKind::Comment | TriviaKind::BlockComment => line_start = false,
                TriviaKind::Whitespace => {}
            }
        }
    }

    fn consume_line_break(&mut self) {
        match (self.window.peek(0), self.window.peek(1)) {
            ('\r', '\n') => self.window.consume(2),
            ('\n' | '\r', _) => self.window.consume(1),
            _ => {}
        }
    }

    /// `%{` alone on its line opens a block comment.
    fn at_block_comment_open(&self) -> bool {
        self.window.rest().strip_prefix("%{").is_some_and(|after| is_blank(rest_of_line(after)))
    }

    /// Consumes a `%{` line through the matching `%}` line, or through the end
    /// of the input when there is none.
    fn block_comment(&mut self) {
        self.window.consume_while(|c| !is_line_break(c));
        while !self.window.is_at_end() {
            self.consume_line_break();
            let line = rest_of_line(self.window.rest());
            if line.trim() == "%}" {
                let indent = line.chars().take_while(|c| c.is_whitespace()).count();
                self.window.consume(indent + 2);
                break;
            }
            self.window.consume(line.chars().count());
        }
    }

    fn pure_token(&mut self, has_leading_trivia: bool) -> Result<PureToken<'a>, LexError> {
        let position = self.window.position();
        let start = self.window.offset();
        let c = self.window.peek(0);

        let (kind, value) = if c == EOF_CHAR && self.window.is_at_end() {
            (END_OF_FILE, None)
        } else if self.command_mode && !matches!(c, '\'' | '"' | ';' | ',') {
            let word = self.window.consume_while(|c| !ends_command_word(c));
            debug_assert!(word > 0);
            let text = &self.text[usize::from(start)..usize::from(self.window.offset())];
            (UNQUOTED_STRING_LITERAL, Some(TokenValue::String(text.into())))
        } else {
            match c {
                c if c.is_ascii_alphabetic() => {
                    self.window.consume_while(|c| c.is_ascii_alphanumeric() || c == '_');
                    (IDENTIFIER, None)
                }
                '0'..='9' => self.number(position)?,
                '.' if self.window.peek(1).is_ascii_digit() => self.number(position)?,
                '\'' if !self.command_mode && self.quote_is_transpose(has_leading_trivia) => {
                    self.window.consume(1);
                    (TRANSPOSE, None)
                }
                '\'' => self.string('\'', STRING_LITERAL, position)?,
                '"' => self.string('"', DOUBLE_QUOTED_STRING_LITERAL, position)?,
                c => (self.operator(c, position)?, None),
            }
        };

        let text = &self.text[usize::from(start)..usize::from(self.window.offset())];
        Ok(PureToken { kind, text, value, position })
    }

    /// A quote right after a closing bracket or a name, with no trivia in
    /// between, transposes; anywhere else it opens a string.
    fn quote_is_transpose(&self, has_leading_trivia: bool) -> bool {
        !has_leading_trivia
            && self.last.is_some_and(|last| {
                !last.has_trailing_trivia
                    && matches!(
                        last.kind,
                        CLOSING_BRACKET | CLOSING_SQUARE_BRACKET | CLOSING_BRACE | IDENTIFIER
                    )
            })
    }

    fn number(
        &mut self,
        position: Position,
    ) -> Result<(SyntaxKind, Option<TokenValue>), LexError> {
        let malformed = |len: usize, window: &TextWindowWithNull<'_>| LexError::MalformedNumber {
            text: window.rest().chars().take(len + 1).collect(),
            position,
        };
        let len = number::scan(&self.window).map_err(|len| malformed(len, &self.window))?;
        let text = self.window.take_and_consume(len);
        let value = text.parse::<f64>().ok().ok_or_else(|| LexError::MalformedNumber {
            text: text.to_owned(),
            position,
        })?;
        Ok((NUMBER_LITERAL, Some(TokenValue::Number(value))))
    }

    /// Reads a quoted string. A doubled quote stands for one quote character.
    fn string(
        &mut self,
        quote: char,
        kind: SyntaxKind,
        position: Position,
    ) -> Result<(SyntaxKind, Option<TokenValue>), LexError> {
        self.window.consume(1);
        let mut value = String::new();
        loop {
            match self.window.peek(0) {
                c if c == quote => {
                    if self.window.peek(1) != quote {
                        self.window.consume(1);
                        break;
                    }
                    self.window.consume(2);
                    value.push(quote);
                }
                '\n' | '\r' => return Err(LexError::UnterminatedString { position }),
                EOF_CHAR if self.window.is_at_end() => {
                    return Err(LexError::UnterminatedString { position });
                }
                c => {
                    self.window.consume(1);
                    value.push(c);
                }
            }
        }
        Ok((kind, Some(TokenValue::String(value.into()))))
    }

    fn operator(
        &mut self,
        c: char,
        position: Position,
    ) -> Result<SyntaxKind, LexError> {
        let (kind, len) = match (c, self.window.peek(1)) {
            ('=', '=') => (EQUALITY, 2),
            ('=', _) => (ASSIGNMENT, 1),
            ('~', '=') => (INEQUALITY, 2),
            ('~', _) => (NOT, 1),
            ('&', '&') => (LOGICAL_AND, 2),
            ('&', _) => (BITWISE_AND, 1),
            ('|', '|') => (LOGICAL_OR, 2),
            ('|', _) => (BITWISE_OR, 1),
            ('<', '=') => (LESS_OR_EQUAL, 2),
            ('<', _) => (LESS, 1),
            ('>', '=') => (GREATER_OR_EQUAL, 2),
            ('>', _) => (GREATER, 1),
            ('+', _) => (PLUS, 1),
            ('-', _) => (MINUS, 1),
            ('*', _) => (MULTIPLY, 1),
            ('/', _) => (DIVIDE, 1),
            ('\\', _) => (BACKSLASH, 1),
            ('^', _) => (POWER, 1),
            ('.', '*') => (DOT_MULTIPLY, 2),
            ('.', '/') => (DOT_DIVIDE, 2),
            ('.', '^') => (DOT_POWER, 2),
            ('.', '\\') => (DOT_BACKSLASH, 2),
            ('.', '\'') => (DOT_TRANSPOSE, 2),
            ('.', _) => (DOT, 1),
            ('@', _) => (AT, 1),
            (':', _) => (COLON, 1),
            ('?', _) => (QUESTION_MARK, 1),
            (',', _) => (COMMA, 1),
            (';', _) => (SEMICOLON, 1),
            ('(', _) => (OPENING_BRACKET, 1),
            (')', _) => (CLOSING_BRACKET, 1),
            ('[', _) => (OPENING_SQUARE_BRACKET, 1),
            (']', _) => (CLOSING_SQUARE_BRACKET, 1),
            ('{', _) => (OPENING_BRACE, 1),
            ('}', _) => (CLOSING_BRACE, 1),
            _ => return Err(LexError::UnexpectedCharacter { character: c, position }),
        };
        self.window.consume(len);
        Ok(kind)
    }

    fn advance_state(&mut self, token: &Token<'a>) {
        let kind = token.kind();
        if !self.command_mode {
            match kind {
                OPENING_BRACKET | OPENING_SQUARE_BRACKET | OPENING_BRACE => self.bracket_depth += 1,
                CLOSING_BRACKET | CLOSING_SQUARE_BRACKET | CLOSING_BRACE => {
                    self.bracket_depth = self.bracket_depth.saturating_sub(1);
                }
                _ => {}
            }
        }

        if self.command_mode {
            if matches!(kind, SEMICOLON | COMMA | END_OF_FILE) || token.ends_line() {
                trace!(at = %token.position(), "leaving command syntax");
                self.command_mode = false;
            }
        } else if self.at_statement_start
            && self.bracket_depth == 0
            && kind == IDENTIFIER
            && !is_keyword(token.text())
            && self.starts_command(&token.trailing)
        {
            trace!(name = token.text(), at = %token.position(), "entering command syntax");
            self.command_mode = true;
        }

        let line_break = token.trailing.pieces().iter().any(|piece| piece.kind == TriviaKind::Newline);
        let opens_body = kind == IDENTIFIER && matches!(token.text(), "else" | "try" | "otherwise");
        self.at_statement_start = self.bracket_depth == 0
            && (matches!(kind, SEMICOLON | COMMA) || line_break || opens_body);
        self.last = Some(LastToken {
            kind,
            has_trailing_trivia: !token.trailing.is_empty(),
            ends_line: token.trailing.has_line_break(),
        });
    }

    /// Decides whether a statement-initial name is a command: it is
    /// separated from what follows by plain whitespace, and what follows
    /// reads as an argument rather than as an assignment, an index or a
    /// binary operator with spaces on both sides.
    fn starts_command(&self, trailing: &GreenTrivia) -> bool {
        if trailing.is_empty()
            || trailing.pieces().iter().any(|piece| piece.kind != TriviaKind::Whitespace)
        {
            return false;
        }
        let next = self.window.peek(0);
        match next {
            EOF_CHAR | '=' | '(' | ';' | ',' | '\n' | '\r' => false,
            _ if is_operator_start(next) => {
                let after = if is_two_char_operator(next, self.window.peek(1)) {
                    self.window.peek(2)
                } else {
                    self.window.peek(1)
                };
                !matches!(after, ' ' | '\t' | '\n' | '\r' | EOF_CHAR)
            }
            _ => true,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        Some(self.next_token())
    }
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c == ' ' || c == '\t')
}

fn rest_of_line(text: &str) -> &str {
    text.find(['\n', '\r']).map_or(text, |end| &text[..end])
}

fn ends_command_word(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | ';' | ',' | '%')
}

fn is_operator_start(c: char) -> bool {
    matches!(
        c,
        '+' | '-' | '*' | '/' | '\\' | '^' | '<' | '>' | '&' | '|' | '~' | '.' | ':'
    )
}

fn is_two_char_operator(first: char, second: char) -> bool {
    matches!(
        (first, second),
        ('=' | '~' | '<' | '>', '=')
            | ('&', '&')
            | ('|', '|')
            | ('.', '*' | '/' | '^' | '\\' | '\'')
    )
}

#[cfg(test)]
mod tests {
    use expect_test::{Expect, expect};

    use super::*;

    fn check(text: &str, expect: Expect) {
        let tokens = Tokenizer::new(text).parse_all().unwrap();
        let actual: String = tokens.iter().map(|token| format!("{token}\n")).collect();
        expect.assert_eq(&actual);
    }

    fn kinds(text: &str) -> Vec<SyntaxKind> {
        Tokenizer::new(text).parse_all().unwrap().iter().map(Token::kind).collect()
    }

    #[test]
    fn test_line_continuation() {
        check(
            "something ... #$@#%*^!@#\n",
            expect![[r#"
                IDENTIFIER@0..9 "something" trailing=[Whitespace(" "), LineContinuation("... #$@#%*^!@#\n")]
                END_OF_FILE@25..25 ""
            "#]],
        );
    }

    #[test]
    fn test_trivia_attachment() {
        check(
            "  x = 1; % set x\r\ny",
            expect![[r#"
                IDENTIFIER@2..3 "x" leading=[Whitespace("  ")] trailing=[Whitespace(" ")]
                ASSIGNMENT@4..5 "=" trailing=[Whitespace(" ")]
                NUMBER_LITERAL@6..7 "1"
                SEMICOLON@7..8 ";" trailing=[Whitespace(" "), Comment("% set x"), Newline("\r\n")]
                IDENTIFIER@18..19 "y"
                END_OF_FILE@19..19 ""
            "#]],
        );
    }

    #[test]
    fn test_block_comment() {
        check(
            "%{\nanything ' here\n%}\nx",
            expect![[r#"
                IDENTIFIER@22..23 "x" leading=[BlockComment("%{\nanything ' here\n%}"), Newline("\n")]
                END_OF_FILE@23..23 ""
            "#]],
        );
        check(
            "%{ not a block\nx",
            expect![[r#"
                IDENTIFIER@15..16 "x" leading=[Comment("%{ not a block"), Newline("\n")]
                END_OF_FILE@16..16 ""
            "#]],
        );
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_end() {
        let tokens = Tokenizer::new("%{\nx = 1\n").parse_all().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].leading.pieces()[0].kind, TriviaKind::BlockComment);
        assert_eq!(tokens[0].full_text(), "%{\nx = 1\n");
    }

    #[test]
    fn test_number_literals() {
        let inputs = vec![
            ("42", 42.0),
            ("42.", 42.0),
            ("3.25", 3.25),
            (".5", 0.5),
            ("1e3", 1000.0),
            ("42.e-5", 42.0e-5),
            ("2.5E+2", 250.0),
        ];

        for (input, expected) in inputs {
            let mut tokenizer = Tokenizer::new(input);
            let token = tokenizer.next_token().unwrap();
            assert_eq!(token.kind(), NUMBER_LITERAL, "Input: '{input}'");
            assert_eq!(token.value(), Some(&TokenValue::Number(expected)), "Input: '{input}'");
            assert_eq!(token.text(), input);
        }
    }

    #[test]
    fn test_dot_after_number() {
        assert_eq!(
            kinds("26.^[1]"),
            vec![
                NUMBER_LITERAL,
                DOT_POWER,
                OPENING_SQUARE_BRACKET,
                NUMBER_LITERAL,
                CLOSING_SQUARE_BRACKET,
                END_OF_FILE
            ]
        );
        assert_eq!(kinds("42.;"), vec![NUMBER_LITERAL, SEMICOLON, END_OF_FILE]);
        assert_eq!(kinds("x.y"), vec![IDENTIFIER, DOT, IDENTIFIER, END_OF_FILE]);
        assert_eq!(kinds("a.*b"), vec![IDENTIFIER, DOT_MULTIPLY, IDENTIFIER, END_OF_FILE]);
    }

    #[test]
    fn test_transpose_or_string() {
        let transposed = vec![
            ("undefined'", vec![IDENTIFIER, TRANSPOSE, END_OF_FILE]),
            (
                "[undefined]'",
                vec![
                    OPENING_SQUARE_BRACKET,
                    IDENTIFIER,
                    CLOSING_SQUARE_BRACKET,
                    TRANSPOSE,
                    END_OF_FILE,
                ],
            ),
            ("{undefined}'", vec![OPENING_BRACE, IDENTIFIER, CLOSING_BRACE, TRANSPOSE, END_OF_FILE]),
            (
                "undefined()'",
                vec![IDENTIFIER, OPENING_BRACKET, CLOSING_BRACKET, TRANSPOSE, END_OF_FILE],
            ),
            ("undefined.'", vec![IDENTIFIER, DOT_TRANSPOSE, END_OF_FILE]),
        ];
        for (input, expected) in transposed {
            assert_eq!(kinds(input), expected, "Input: '{input}'");
        }

        assert_eq!(
            kinds("x = ['a' 'b']"),
            vec![
                IDENTIFIER,
                ASSIGNMENT,
                OPENING_SQUARE_BRACKET,
                STRING_LITERAL,
                STRING_LITERAL,
                CLOSING_SQUARE_BRACKET,
                END_OF_FILE
            ]
        );
        assert_eq!(
            kinds("f('x')"),
            vec![IDENTIFIER, OPENING_BRACKET, STRING_LITERAL, CLOSING_BRACKET, END_OF_FILE]
        );
    }

    #[test]
    fn test_string_escapes() {
        let inputs = vec![
            ("'just a ''string'''", STRING_LITERAL, "just a 'string'"),
            ("\"say \"\"hi\"\"\"", DOUBLE_QUOTED_STRING_LITERAL, "say \"hi\""),
            ("'it''s \"fine\"'", STRING_LITERAL, "it's \"fine\""),
            ("''", STRING_LITERAL, ""),
        ];

        for (input, kind, value) in inputs {
            let token = Tokenizer::new(input).next_token().unwrap();
            assert_eq!(token.kind(), kind, "Input: '{input}'");
            assert_eq!(token.text(), input);
            assert_eq!(token.value(), Some(&TokenValue::String(value.into())), "Input: '{input}'");
        }
    }

    #[test]
    fn test_fatal_errors() {
        let error = Tokenizer::new("x = 'abc").parse_all().unwrap_err();
        assert!(matches!(error, LexError::UnterminatedString { .. }));
        assert_eq!(error.position().to_string(), "1:5");

        let error = Tokenizer::new("s = 'ab\ncd'").parse_all().unwrap_err();
        assert!(matches!(error, LexError::UnterminatedString { .. }));

        let error = Tokenizer::new("y = 1e+").parse_all().unwrap_err();
        assert_eq!(error.to_string(), "malformed number \"1e+\" at 1:5");

        let error = Tokenizer::new("a\nb = # c").parse_all().unwrap_err();
        assert_eq!(error.to_string(), "unexpected character '#' at 2:5");
        let diagnostic = error.to_diagnostic();
        assert_eq!(diagnostic.severity(), mparser_errors::Severity::Fatal);
        assert_eq!(diagnostic.range(), text_size::TextRange::at(6.into(), 1.into()));
    }

    #[test]
    fn test_iteration_stops_after_error() {
        let results: Vec<_> = Tokenizer::new("x = $ y").collect();
        assert_eq!(results.len(), 3);
        assert!(results[1].is_ok());
        assert!(results[2].is_err());
    }

    #[test]
    fn test_command_syntax() {
        assert_eq!(
            kinds("hold on; format long g"),
            vec![
                IDENTIFIER,
                UNQUOTED_STRING_LITERAL,
                SEMICOLON,
                IDENTIFIER,
                UNQUOTED_STRING_LITERAL,
                UNQUOTED_STRING_LITERAL,
                END_OF_FILE
            ]
        );
        assert_eq!(
            kinds("disp 'hello world' % greet\nx = 1"),
            vec![IDENTIFIER, STRING_LITERAL, IDENTIFIER, ASSIGNMENT, NUMBER_LITERAL, END_OF_FILE]
        );
        assert_eq!(kinds("a -b"), vec![IDENTIFIER, UNQUOTED_STRING_LITERAL, END_OF_FILE]);
        assert_eq!(kinds("try hold on, end"), vec![
            IDENTIFIER,
            IDENTIFIER,
            UNQUOTED_STRING_LITERAL,
            COMMA,
            IDENTIFIER,
            END_OF_FILE
        ]);
        assert_eq!(kinds("if x, a, else hold on, end"), vec![
            IDENTIFIER,
            IDENTIFIER,
            COMMA,
            IDENTIFIER,
            COMMA,
            IDENTIFIER,
            IDENTIFIER,
            UNQUOTED_STRING_LITERAL,
            COMMA,
            IDENTIFIER,
            END_OF_FILE
        ]);
        assert_eq!(kinds("switch k, otherwise format long, end"), vec![
            IDENTIFIER,
            IDENTIFIER,
            COMMA,
            IDENTIFIER,
            IDENTIFIER,
            UNQUOTED_STRING_LITERAL,
            COMMA,
            IDENTIFIER,
            END_OF_FILE
        ]);
        // Only the body keywords start a statement; `if` takes an expression.
        assert_eq!(kinds("if a -b, end"), vec![
            IDENTIFIER,
            IDENTIFIER,
            MINUS,
            IDENTIFIER,
            COMMA,
            IDENTIFIER,
            END_OF_FILE
        ]);
        assert_eq!(kinds("global a b"), vec![
            IDENTIFIER,
            UNQUOTED_STRING_LITERAL,
            UNQUOTED_STRING_LITERAL,
            END_OF_FILE
        ]);

        let words: Vec<_> = Tokenizer::new("load data.mat -ascii")
            .parse_all()
            .unwrap()
            .into_iter()
            .filter_map(|token| match token.pure.value {
                Some(TokenValue::String(value)) => Some(value),
                _ => None,
            })
            .collect();
        let expected: Vec<Box<str>> = vec!["data.mat".into(), "-ascii".into()];
        assert_eq!(words, expected);
    }

    #[test]
    fn test_not_command_syntax() {
        let inputs = vec![
            ("a - b", vec![IDENTIFIER, MINUS, IDENTIFIER, END_OF_FILE]),
            ("x = 1", vec![IDENTIFIER, ASSIGNMENT, NUMBER_LITERAL, END_OF_FILE]),
            ("x == 1", vec![IDENTIFIER, EQUALITY, NUMBER_LITERAL, END_OF_FILE]),
            ("f (1)", vec![IDENTIFIER, OPENING_BRACKET, NUMBER_LITERAL, CLOSING_BRACKET, END_OF_FILE]),
            ("a ...\n b", vec![IDENTIFIER, IDENTIFIER, END_OF_FILE]),
            ("if x", vec![IDENTIFIER, IDENTIFIER, END_OF_FILE]),
            (
                "[a b]",
                vec![
                    OPENING_SQUARE_BRACKET,
                    IDENTIFIER,
                    IDENTIFIER,
                    CLOSING_SQUARE_BRACKET,
                    END_OF_FILE,
                ],
            ),
            ("y = f x", vec![IDENTIFIER, ASSIGNMENT, IDENTIFIER, IDENTIFIER, END_OF_FILE]),
        ];

        for (input, expected) in inputs {
            assert_eq!(kinds(input), expected, "Input: '{input}'");
        }
    }

    #[test]
    fn test_positions() {
        let tokens = Tokenizer::new("a\r\nbc\n\n  d").parse_all().unwrap();
        let positions: Vec<_> = tokens.iter().map(|token| token.position().to_string()).collect();
        assert_eq!(positions, vec!["1:1", "2:1", "4:3", "4:4"]);
        assert_eq!(tokens[2].full_range(), text_size::TextRange::new(6.into(), 10.into()));
        assert_eq!(tokens[2].range(), text_size::TextRange::new(9.into(), 10.into()));
    }

    #[test]
    fn test_full_text_is_lossless() {
        let text = "function y = f(x) % doc\n  y = x.^2 ...\n    + 1;\nend\n";
        let tokens = Tokenizer::new(text).parse_all().unwrap();
        let joined: String = tokens.iter().map(Token::full_text).collect();
        assert_eq!(joined, text);

        let green = tokens[0].to_green();
        assert_eq!(green.text(), "function");
        assert_eq!(green.full_text(), "function ");
    }
}
