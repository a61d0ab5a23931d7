//! Trivia attached to tokens: whitespace, line breaks, comments and line
//! continuations.

use std::fmt;

use text_size::TextSize;
use triomphe::ThinArc;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TriviaKind {
    Whitespace,
    /// `\n`, `\r` or `\r\n`.
    Newline,
    /// `%` up to the end of the line.
    Comment,
    /// `%{` ... `%}`, each marker on a line of its own.
    BlockComment,
    /// `...` up to and including the following line break.
    LineContinuation,
}

impl TriviaKind {
    /// Whether the piece ends a line.
    pub const fn breaks_line(self) -> bool {
        matches!(self, Self::Newline | Self::LineContinuation)
    }
}

/// A trivia fragment with its kind and length.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TriviaPiece {
    pub kind: TriviaKind,
    pub len: TextSize,
}

impl TriviaPiece {
    pub fn new(kind: TriviaKind, len: TextSize) -> Self {
        Self { kind, len }
    }
}

/// Shared, immutable run of trivia pieces. The text lives in the owning
/// token.
#[derive(Clone, Default, Eq, Hash, PartialEq)]
pub struct GreenTrivia {
    ptr: Option<ThinArc<TextSize, TriviaPiece>>,
}

impl fmt::Debug for GreenTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.pieces()).finish()
    }
}

impl GreenTrivia {
    pub fn new(pieces: &[TriviaPiece]) -> Self {
        if pieces.is_empty() {
            return Self::empty();
        }
        let total_len = pieces.iter().map(|piece| piece.len).sum();
        Self { ptr: Some(ThinArc::from_header_and_slice(total_len, pieces)) }
    }

    pub const fn empty() -> Self {
        Self { ptr: None }
    }

    pub fn len(&self) -> TextSize {
        match &self.ptr {
            None => TextSize::new(0),
            Some(ptr) => ptr.header.header,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    pub fn pieces(&self) -> &[TriviaPiece] {
        match &self.ptr {
            None => &[],
            Some(ptr) => &ptr.slice,
        }
    }

    pub fn has_line_break(&self) -> bool {
        self.pieces().iter().any(|piece| piece.kind.breaks_line())
    }
}

/// One trivia piece together with its text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Trivia<'a> {
    pub kind: TriviaKind,
    pub text: &'a str,
}

impl fmt::Display for Trivia<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})", self.kind, self.text)
    }
}

/// Walks trivia pieces, slicing their text off `text` front to back.
#[derive(Clone, Debug)]
pub struct TriviaIter<'a> {
    text: &'a str,
    pieces: std::slice::Iter<'a, TriviaPiece>,
}

impl<'a> TriviaIter<'a> {
    pub fn new(text: &'a str, pieces: &'a [TriviaPiece]) -> Self {
        Self { text, pieces: pieces.iter() }
    }
}

impl<'a> Iterator for TriviaIter<'a> {
    type Item = Trivia<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let piece = self.pieces.next()?;
        let (text, rest) = self.text.split_at(piece.len.into());
        self.text = rest;
        Some(Trivia { kind: piece.kind, text })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pieces.size_hint()
    }
}

impl ExactSizeIterator for TriviaIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_pieces_in_order() {
        let pieces = [
            TriviaPiece::new(TriviaKind::Whitespace, 2.into()),
            TriviaPiece::new(TriviaKind::Comment, 3.into()),
            TriviaPiece::new(TriviaKind::Newline, 1.into()),
        ];
        let trivia = GreenTrivia::new(&pieces);
        assert_eq!(trivia.len(), TextSize::new(6));
        assert!(trivia.has_line_break());

        let text: Vec<_> =
            TriviaIter::new("  % x\n", trivia.pieces()).map(|it| it.to_string()).collect();
        assert_eq!(text, ["Whitespace(\"  \")", "Comment(\"% x\")", "Newline(\"\\n\")"]);
    }

    #[test]
    fn empty_trivia_does_not_allocate() {
        let trivia = GreenTrivia::new(&[]);
        assert!(trivia.is_empty());
        assert_eq!(trivia, GreenTrivia::empty());
        assert_eq!(trivia.len(), TextSize::new(0));
    }
}
