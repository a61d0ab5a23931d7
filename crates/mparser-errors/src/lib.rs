use std::fmt::{self, Display};

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::{TextRange, TextSize};

/// How a reported problem affects the parse.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Severity {
    /// The input could not be tokenized; no tree exists.
    Fatal,
    /// The tree was built, but part of it is malformed.
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fatal => "fatal",
            Self::Error => "error",
        })
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Diagnostic {
    message: String,
    range: TextRange,
    severity: Severity,
}

impl Diagnostic {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn error(message: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), range, severity: Severity::Error }
    }

    pub fn fatal(message: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), range, severity: Severity::Fatal }
    }

    /// Moves the range by `offset`, turning a node-relative range into an
    /// absolute one.
    pub fn shifted(&self, offset: TextSize) -> Self {
        Self { range: self.range + offset, ..self.clone() }
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let message = Level::Error.title(&self.message).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(Level::Error.span(self.range.into()).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}: {}", self.severity, self.range, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifting_keeps_message_and_severity() {
        let diagnostic = Diagnostic::error("expected ')'", TextRange::empty(TextSize::new(3)));
        let shifted = diagnostic.shifted(TextSize::new(10));

        assert_eq!(shifted.range(), TextRange::empty(TextSize::new(13)));
        assert_eq!(shifted.message(), "expected ')'");
        assert_eq!(shifted.severity(), Severity::Error);
        assert_eq!(shifted.to_string(), "error@13..13: expected ')'");
    }

    #[test]
    fn renders_plain_snippet() {
        let text = "x = (1 + 2\n";
        let diagnostic = Diagnostic::fatal("unterminated", TextRange::new(4.into(), 5.into()));
        let rendered = diagnostic.render(&Renderer::plain(), "a.m", text).to_string();

        assert!(rendered.contains("unterminated"));
        assert!(rendered.contains("a.m"));
    }
}
