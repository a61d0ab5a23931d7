//! Source buffers and positions inside them.

use std::fmt;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
pub use line_index::{LineCol, LineIndex, WideEncoding};
pub use text_size::{TextRange, TextSize};

/// Identifies a source buffer in positions and diagnostics.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FileId(u32);

impl FileId {
    /// The id used for text that was not loaded from a file.
    pub const DETACHED: Self = Self(0);

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Location of a character in a source buffer.
///
/// `line` and `column` are 0-based; `column` counts characters, not bytes.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Position {
    pub file: FileId,
    pub offset: TextSize,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(file: FileId, offset: TextSize, line: u32, column: u32) -> Self {
        Self { file, offset, line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// An in-memory source buffer with an optional path.
#[derive(Clone)]
pub struct SourceFile(Arc<SourceFileData>);

struct SourceFileData {
    id: FileId,
    path: Option<Utf8PathBuf>,
    text: Box<str>,
    line_index: LineIndex,
}

impl SourceFile {
    pub fn new(id: FileId, path: Option<Utf8PathBuf>, text: impl Into<Box<str>>) -> Self {
        let text = text.into();
        let line_index = LineIndex::new(&text);
        Self(Arc::new(SourceFileData { id, path, text, line_index }))
    }

    /// Wraps text that does not come from a file.
    pub fn detached(text: impl Into<Box<str>>) -> Self {
        Self::new(FileId::DETACHED, None, text)
    }

    pub fn id(&self) -> FileId {
        self.0.id
    }

    pub fn path(&self) -> Option<&Utf8Path> {
        self.0.path.as_deref()
    }

    /// Returns the path for display, or `<input>` for detached text.
    pub fn display_name(&self) -> &str {
        self.path().map_or("<input>", Utf8Path::as_str)
    }

    pub fn text(&self) -> &str {
        &self.0.text
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.0.line_index
    }

    /// Resolves a byte offset into a line/column position.
    pub fn position(&self, offset: TextSize) -> Position {
        let line_col = self.0.line_index.line_col(offset);
        let column = self
            .0
            .line_index
            .to_wide(WideEncoding::Utf32, line_col)
            .map_or(line_col.col, |wide| wide.col);
        Position::new(self.0.id, offset, line_col.line, column)
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("id", &self.0.id)
            .field("path", &self.0.path)
            .field("text_len", &self.0.text.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_positions_in_characters() {
        let file = SourceFile::detached("x = 1;\ny = 'é' + z");

        let position = file.position(TextSize::new(7));
        assert_eq!((position.line, position.column), (1, 0));

        // 'é' is two bytes wide but one character.
        let offset = "x = 1;\ny = 'é' ".len() as u32;
        let position = file.position(TextSize::new(offset));
        assert_eq!((position.line, position.column), (1, 8));
        assert_eq!(position.to_string(), "2:9");
    }

    #[test]
    fn detached_files_have_a_display_name() {
        let file = SourceFile::detached("");
        assert_eq!(file.display_name(), "<input>");
        assert_eq!(file.id(), FileId::DETACHED);

        let file = SourceFile::new(FileId::new(3), Some("a/b.m".into()), "x");
        assert_eq!(file.display_name(), "a/b.m");
        assert_eq!(file.id().raw(), 3);
    }
}
