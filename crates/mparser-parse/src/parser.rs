use mparser_errors::Diagnostic;
use mparser_tokenizer::Token;
use mparser_yellow::{GreenToken, SyntaxFactory, SyntaxKind, is_keyword};
use text_size::{TextRange, TextSize};
use tracing::debug;

/// How line breaks and whitespace affect the expression being parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Context {
    /// A line break ends the expression.
    Statement,
    /// Inside `(...)`: line breaks are ignored.
    Parens,
    /// Inside `[...]` or `{...}`: a line break ends the row and whitespace
    /// may separate elements.
    Matrix,
}

pub(crate) struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    /// Start of the current token's leading trivia.
    offset: TextSize,
    context: Context,
    index_depth: u32,
    in_function: bool,
}

impl<'a> Parser<'a> {
    /// `tokens` must end with `END_OF_FILE`.
    pub(crate) fn new(tokens: Vec<Token<'a>>) -> Self {
        debug_assert_eq!(tokens.last().map(Token::kind), Some(SyntaxKind::END_OF_FILE));
        Self {
            tokens,
            pos: 0,
            offset: TextSize::new(0),
            context: Context::Statement,
            index_depth: 0,
            in_function: false,
        }
    }

    pub(crate) fn current(&self) -> &Token<'a> {
        self.nth(0)
    }

    pub(crate) fn nth(&self, n: usize) -> &Token<'a> {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    pub(crate) fn peek_kind(&self) -> SyntaxKind {
        self.current().kind()
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn at_keyword(&self, keyword: &str) -> bool {
        self.at(SyntaxKind::IDENTIFIER) && self.current().text() == keyword
    }

    /// At a keyword that closes or continues an enclosing block.
    pub(crate) fn at_block_boundary(&self) -> bool {
        self.at(SyntaxKind::IDENTIFIER)
            && matches!(
                self.current().text(),
                "end" | "else" | "elseif" | "case" | "otherwise" | "catch"
            )
            && !(self.index_depth > 0 && self.at_keyword("end"))
    }

    /// At an identifier that names something, rather than a keyword. `end`
    /// counts as a name inside an index.
    pub(crate) fn at_name(&self) -> bool {
        self.at(SyntaxKind::IDENTIFIER)
            && (!is_keyword(self.current().text())
                || (self.index_depth > 0 && self.at_keyword("end")))
    }

    pub(crate) fn previous(&self) -> Option<&Token<'a>> {
        self.pos.checked_sub(1).map(|index| &self.tokens[index])
    }

    /// The last consumed token ended its line.
    pub(crate) fn after_line_break(&self) -> bool {
        self.previous().is_some_and(Token::ends_line)
    }

    /// The last consumed token is followed by trivia.
    pub(crate) fn after_trivia(&self) -> bool {
        self.previous().is_some_and(|token| !token.trailing.is_empty())
    }

    pub(crate) fn offset(&self) -> TextSize {
        self.offset
    }

    pub(crate) fn context(&self) -> Context {
        self.context
    }

    /// Runs `f` in `context`, restoring the previous one afterwards.
    pub(crate) fn with_context<T>(&mut self, context: Context, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.context, context);
        let result = f(self);
        self.context = saved;
        result
    }

    /// Runs `f` inside an index, where `end` and a bare `:` are expressions.
    pub(crate) fn in_index<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.index_depth += 1;
        let result = self.with_context(Context::Parens, f);
        self.index_depth -= 1;
        result
    }

    pub(crate) fn in_index_context(&self) -> bool {
        self.index_depth > 0
    }

    pub(crate) fn in_function(&self) -> bool {
        self.in_function
    }

    pub(crate) fn with_function<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.in_function, true);
        let saved_depth = std::mem::take(&mut self.index_depth);
        let result = self.with_context(Context::Statement, f);
        self.index_depth = saved_depth;
        self.in_function = saved;
        result
    }

    /// Consumes the current token. The end-of-file token is only consumed
    /// by [`Parser::bump_eof`].
    pub(crate) fn bump(&mut self) -> GreenToken {
        debug_assert!(!self.at(SyntaxKind::END_OF_FILE));
        let token = &self.tokens[self.pos];
        let green = token.to_green();
        self.offset += green.width();
        self.pos += 1;
        green
    }

    pub(crate) fn bump_eof(&mut self) -> GreenToken {
        debug_assert!(self.at(SyntaxKind::END_OF_FILE));
        let green = self.current().to_green();
        self.offset += green.width();
        green
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> Option<GreenToken> {
        self.at(kind).then(|| self.bump())
    }

    pub(crate) fn start(&self) -> Marker {
        Marker { start: self.offset, diagnostics: Vec::new() }
    }

    /// Consumes `kind`, or produces a missing token and reports it on `m`.
    pub(crate) fn expect(&mut self, m: &mut Marker, kind: SyntaxKind) -> GreenToken {
        if let Some(token) = self.eat(kind) {
            return token;
        }
        m.error_here(self, format!("expected {}", kind.describe()));
        GreenToken::missing(kind)
    }

    /// Consumes the keyword, or produces a missing identifier and reports it
    /// on `m`.
    pub(crate) fn expect_keyword(&mut self, m: &mut Marker, keyword: &str) -> GreenToken {
        if self.at_keyword(keyword) {
            return self.bump();
        }
        m.error_here(self, format!("expected '{keyword}'"));
        GreenToken::missing(SyntaxKind::IDENTIFIER)
    }

    /// Human readable name of the current token for diagnostics.
    pub(crate) fn describe_current(&self) -> String {
        match self.peek_kind() {
            SyntaxKind::IDENTIFIER if is_keyword(self.current().text()) => {
                format!("'{}'", self.current().text())
            }
            kind => kind.describe().to_string(),
        }
    }
}

/// Start of a node being built, together with the diagnostics reported for
/// it. Ranges are recorded relative to the node start.
pub(crate) struct Marker {
    start: TextSize,
    diagnostics: Vec<Diagnostic>,
}

impl Marker {
    /// Reports an empty range at the parser's position, where a missing
    /// element is inserted.
    pub(crate) fn error_here(&mut self, p: &Parser<'_>, message: impl Into<String>) {
        let range = TextRange::empty(p.offset());
        self.push(range, message.into());
    }

    /// Reports the range of the current token.
    pub(crate) fn error_at_current(&mut self, p: &Parser<'_>, message: impl Into<String>) {
        self.push(p.current().range(), message.into());
    }

    fn push(&mut self, range: TextRange, message: String) {
        debug!(%message, ?range, "recovered from syntax error");
        self.diagnostics.push(Diagnostic::error(message, range - self.start));
    }

    /// A factory for the node; it carries the reported diagnostics. The
    /// marker keeps its start and can build an enclosing node next.
    pub(crate) fn factory(&mut self) -> SyntaxFactory {
        SyntaxFactory::with_diagnostics(std::mem::take(&mut self.diagnostics))
    }
}
