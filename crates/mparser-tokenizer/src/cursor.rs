//! Character windows over the source text.
//!
//! Both flavors share [`Window`] for offset and line/column bookkeeping and
//! differ only in how they answer a peek past the end of the input.

use std::ops::{Deref, DerefMut};

use mparser_inputs::{FileId, Position};
use text_size::TextSize;

/// Returned by [`TextWindowWithNull::peek`] past the end of the input.
pub const EOF_CHAR: char = '\0';

#[derive(Clone, Debug)]
pub struct Window<'a> {
    text: &'a str,
    offset: usize,
    line: u32,
    column: u32,
    file: FileId,
    after_cr: bool,
}

impl<'a> Window<'a> {
    fn new(text: &'a str, file: FileId) -> Self {
        Self { text, offset: 0, line: 0, column: 0, file, after_cr: false }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The unconsumed part of the input.
    pub fn rest(&self) -> &'a str {
        &self.text[self.offset..]
    }

    fn char_at(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    /// Advances by `n` characters, or to the end of the input.
    ///
    /// `\n` and `\r` start a new line; `\r\n` counts as one line break.
    pub fn consume(&mut self, n: usize) {
        for c in self.rest().chars().take(n) {
            self.offset += c.len_utf8();
            match c {
                '\n' if self.after_cr => {}
                '\n' | '\r' => {
                    self.line += 1;
                    self.column = 0;
                }
                _ => self.column += 1,
            }
            self.after_cr = c == '\r';
        }
    }

    pub fn take_and_consume(&mut self, n: usize) -> &'a str {
        let start = self.offset;
        self.consume(n);
        &self.text[start..self.offset]
    }

    /// Consumes characters while `predicate` holds and returns how many.
    pub fn consume_while(&mut self, predicate: impl Fn(char) -> bool) -> usize {
        let count = self.rest().chars().take_while(|&c| predicate(c)).count();
        self.consume(count);
        count
    }

    /// Characters left to read.
    pub fn remaining(&self) -> usize {
        self.rest().chars().count()
    }

    pub fn is_at_end(&self) -> bool {
        self.offset == self.text.len()
    }

    pub fn offset(&self) -> TextSize {
        TextSize::new(self.offset as u32)
    }

    pub fn position(&self) -> Position {
        Position::new(self.file, self.offset(), self.line, self.column)
    }
}

/// Window whose lookahead reports the end of the input as `None`.
#[derive(Clone, Debug)]
pub struct TextWindow<'a>(Window<'a>);

impl<'a> TextWindow<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::with_file(text, FileId::DETACHED)
    }

    pub fn with_file(text: &'a str, file: FileId) -> Self {
        Self(Window::new(text, file))
    }

    /// The character `n` positions ahead, if the input is long enough.
    pub fn peek(&self, n: usize) -> Option<char> {
        self.0.char_at(n)
    }
}

/// Window whose lookahead reads [`EOF_CHAR`] past the end of the input, so
/// scanners can look ahead a fixed distance without bounds checks.
#[derive(Clone, Debug)]
pub struct TextWindowWithNull<'a>(Window<'a>);

impl<'a> TextWindowWithNull<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::with_file(text, FileId::DETACHED)
    }

    pub fn with_file(text: &'a str, file: FileId) -> Self {
        Self(Window::new(text, file))
    }

    pub fn peek(&self, n: usize) -> char {
        self.0.char_at(n).unwrap_or(EOF_CHAR)
    }
}

macro_rules! deref_to_window {
    ($($window:ident),*) => {$(
        impl<'a> Deref for $window<'a> {
            type Target = Window<'a>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl DerefMut for $window<'_> {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }
    )*};
}

deref_to_window!(TextWindow, TextWindowWithNull);
