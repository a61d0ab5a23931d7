use mparser_errors::Diagnostic;
use mparser_inputs::Position;
use text_size::{TextRange, TextSize};

/// A lexical error. Tokenization stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unterminated string literal starting at {position}")]
    UnterminatedString { position: Position },
    #[error("malformed number {text:?} at {position}")]
    MalformedNumber { text: String, position: Position },
    #[error("unexpected character {character:?} at {position}")]
    UnexpectedCharacter { character: char, position: Position },
    #[error("input ended without an end-of-file token at {position}")]
    MissingEndOfFile { position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            Self::UnterminatedString { position }
            | Self::MalformedNumber { position, .. }
            | Self::UnexpectedCharacter { position, .. }
            | Self::MissingEndOfFile { position } => *position,
        }
    }

    /// The error as a fatal diagnostic covering the offending text.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let len = match self {
            Self::MalformedNumber { text, .. } => TextSize::of(text.as_str()),
            Self::UnexpectedCharacter { character, .. } => TextSize::of(*character),
            Self::UnterminatedString { .. } | Self::MissingEndOfFile { .. } => TextSize::new(0),
        };
        Diagnostic::fatal(self.to_string(), TextRange::at(self.position().offset, len))
    }
}
