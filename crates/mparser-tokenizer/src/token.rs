use std::fmt;

use mparser_inputs::Position;
use mparser_yellow::{GreenToken, GreenTrivia, SyntaxKind, TokenValue, TriviaIter, TriviaKind};
use text_size::{TextRange, TextSize};

/// A token stripped of its trivia.
#[derive(Clone, Debug, PartialEq)]
pub struct PureToken<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    /// Decoded value of number and string literals.
    pub value: Option<TokenValue>,
    /// Where `text` starts.
    pub position: Position,
}

/// A token together with the trivia around it.
///
/// `full_text` is the leading trivia, the token text and the trailing trivia,
/// concatenated; the full texts of all tokens of an input reproduce it.
#[derive(Clone, Debug, PartialEq)]
pub struct Token<'a> {
    pub pure: PureToken<'a>,
    pub leading: GreenTrivia,
    pub trailing: GreenTrivia,
    full_text: &'a str,
}

impl<'a> Token<'a> {
    pub(crate) fn new(
        pure: PureToken<'a>,
        leading: GreenTrivia,
        trailing: GreenTrivia,
        full_text: &'a str,
    ) -> Self {
        debug_assert_eq!(
            TextSize::of(full_text),
            leading.len() + TextSize::of(pure.text) + trailing.len()
        );
        Self { pure, leading, trailing, full_text }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.pure.kind
    }

    pub fn text(&self) -> &'a str {
        self.pure.text
    }

    pub fn full_text(&self) -> &'a str {
        self.full_text
    }

    pub fn value(&self) -> Option<&TokenValue> {
        self.pure.value.as_ref()
    }

    pub fn position(&self) -> Position {
        self.pure.position
    }

    pub fn leading_trivia(&self) -> TriviaIter<'_> {
        TriviaIter::new(self.full_text, self.leading.pieces())
    }

    pub fn trailing_trivia(&self) -> TriviaIter<'_> {
        let start = self.full_text.len() - usize::from(self.trailing.len());
        TriviaIter::new(&self.full_text[start..], self.trailing.pieces())
    }

    /// Whether the trailing trivia ends the line, either with a line break or
    /// with a comment running up to one.
    pub fn ends_line(&self) -> bool {
        self.trailing.pieces().iter().any(|piece| {
            matches!(piece.kind, TriviaKind::Newline | TriviaKind::Comment | TriviaKind::BlockComment)
        })
    }

    /// The token text without trivia.
    pub fn range(&self) -> TextRange {
        TextRange::at(self.pure.position.offset, TextSize::of(self.pure.text))
    }

    pub fn full_range(&self) -> TextRange {
        TextRange::at(self.pure.position.offset - self.leading.len(), TextSize::of(self.full_text))
    }

    pub fn to_green(&self) -> GreenToken {
        GreenToken::new(
            self.kind(),
            self.leading.clone(),
            self.full_text,
            self.trailing.clone(),
            self.pure.value.clone(),
        )
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.range(), self.text())?;
        if !self.leading.is_empty() {
            write!(f, " leading=[")?;
            write_trivia(f, self.leading_trivia())?;
            write!(f, "]")?;
        }
        if !self.trailing.is_empty() {
            write!(f, " trailing=[")?;
            write_trivia(f, self.trailing_trivia())?;
            write!(f, "]")?;
        }
        Ok(())
    }
}

fn write_trivia(f: &mut fmt::Formatter<'_>, trivia: TriviaIter<'_>) -> fmt::Result {
    for (index, piece) in trivia.enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{piece}")?;
    }
    Ok(())
}
