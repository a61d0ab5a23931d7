//! Position-independent, immutable tree nodes.
//!
//! Green nodes know their kind, their width and their children, nothing
//! else. Structurally equal subtrees compare equal and may be shared between
//! trees.

use std::fmt;

use mparser_errors::Diagnostic;
use text_size::TextSize;
use triomphe::Arc;

use crate::{GreenTrivia, NodeOrToken, SyntaxKind, TriviaIter};

pub type GreenElement = NodeOrToken<GreenNode, GreenToken>;

impl GreenElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn width(&self) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.width(),
            NodeOrToken::Token(token) => token.width(),
        }
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        NodeOrToken::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        NodeOrToken::Token(token)
    }
}

/// Decoded value of a literal token.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    Number(f64),
    String(Box<str>),
}

/// A leaf: kind, full text (trivia included) and decoded value.
#[derive(Clone, PartialEq)]
pub struct GreenToken(Arc<GreenTokenData>);

#[derive(PartialEq)]
struct GreenTokenData {
    kind: SyntaxKind,
    text: Box<str>,
    leading: GreenTrivia,
    trailing: GreenTrivia,
    value: Option<TokenValue>,
    missing: bool,
}

impl GreenToken {
    /// `text` covers the leading trivia, the token itself and the trailing
    /// trivia.
    pub fn new(
        kind: SyntaxKind,
        leading: GreenTrivia,
        text: &str,
        trailing: GreenTrivia,
        value: Option<TokenValue>,
    ) -> Self {
        debug_assert!(kind.is_token());
        debug_assert!(leading.len() + trailing.len() <= TextSize::of(text));
        Self(Arc::new(GreenTokenData {
            kind,
            text: text.into(),
            leading,
            trailing,
            value,
            missing: false,
        }))
    }

    /// A zero-width placeholder for a token the parser expected but did not
    /// find.
    pub fn missing(kind: SyntaxKind) -> Self {
        Self(Arc::new(GreenTokenData {
            kind,
            text: "".into(),
            leading: GreenTrivia::empty(),
            trailing: GreenTrivia::empty(),
            value: None,
            missing: true,
        }))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    pub fn full_text(&self) -> &str {
        &self.0.text
    }

    /// The token text without its trivia.
    pub fn text(&self) -> &str {
        let start: usize = self.0.leading.len().into();
        let end = self.0.text.len() - usize::from(self.0.trailing.len());
        &self.0.text[start..end]
    }

    pub fn width(&self) -> TextSize {
        TextSize::of(&*self.0.text)
    }

    pub fn leading(&self) -> &GreenTrivia {
        &self.0.leading
    }

    pub fn trailing(&self) -> &GreenTrivia {
        &self.0.trailing
    }

    pub fn leading_trivia(&self) -> TriviaIter<'_> {
        TriviaIter::new(&self.0.text, self.0.leading.pieces())
    }

    pub fn trailing_trivia(&self) -> TriviaIter<'_> {
        let start = self.0.text.len() - usize::from(self.0.trailing.len());
        TriviaIter::new(&self.0.text[start..], self.0.trailing.pieces())
    }

    pub fn value(&self) -> Option<&TokenValue> {
        self.0.value.as_ref()
    }

    pub fn is_missing(&self) -> bool {
        self.0.missing
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_missing() {
            return write!(f, "{:?} <missing>", self.kind());
        }
        write!(f, "{:?} {:?}", self.kind(), self.full_text())
    }
}

/// An inner node with a fixed number of slots, some of which may be empty.
#[derive(Clone, PartialEq)]
pub struct GreenNode(Arc<GreenNodeData>);

#[derive(PartialEq)]
struct GreenNodeData {
    kind: SyntaxKind,
    width: TextSize,
    slots: Box<[Option<GreenElement>]>,
    /// Ranges are relative to the start of this node.
    diagnostics: Box<[Diagnostic]>,
}

impl GreenNode {
    pub fn new(kind: SyntaxKind, slots: Vec<Option<GreenElement>>) -> Self {
        Self::new_with_diagnostics(kind, slots, Vec::new())
    }

    pub fn new_with_diagnostics(
        kind: SyntaxKind,
        slots: Vec<Option<GreenElement>>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        debug_assert!(kind.is_node());
        let width = slots.iter().flatten().map(GreenElement::width).sum();
        Self(Arc::new(GreenNodeData {
            kind,
            width,
            slots: slots.into_boxed_slice(),
            diagnostics: diagnostics.into_boxed_slice(),
        }))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    pub fn width(&self) -> TextSize {
        self.0.width
    }

    pub fn slot_count(&self) -> usize {
        self.0.slots.len()
    }

    /// The child in slot `index`, or `None` when the slot is empty or out
    /// of range.
    pub fn slot(&self, index: usize) -> Option<&GreenElement> {
        self.0.slots.get(index)?.as_ref()
    }

    pub fn slots(&self) -> &[Option<GreenElement>] {
        &self.0.slots
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.0.diagnostics
    }

    /// A copy of this node carrying `diagnostics` instead of its own.
    #[must_use]
    pub fn with_diagnostics(&self, diagnostics: Vec<Diagnostic>) -> Self {
        Self(Arc::new(GreenNodeData {
            kind: self.0.kind,
            width: self.0.width,
            slots: self.0.slots.clone(),
            diagnostics: diagnostics.into_boxed_slice(),
        }))
    }

    /// Distance from the start of this node to the start of slot `index`.
    pub fn slot_offset(&self, index: usize) -> TextSize {
        self.0.slots[..index].iter().flatten().map(GreenElement::width).sum()
    }

    pub fn full_text(&self) -> String {
        let mut out = String::with_capacity(usize::from(self.width()));
        let mut stack = Vec::new();
        push_slots(&mut stack, self, false);
        while let Some(element) = stack.pop() {
            match element {
                NodeOrToken::Node(node) => push_slots(&mut stack, node, false),
                NodeOrToken::Token(token) => out.push_str(token.full_text()),
            }
        }
        out
    }

    /// The leftmost token that is not a missing placeholder.
    pub fn first_token(&self) -> Option<&GreenToken> {
        self.edge_token(false)
    }

    /// The rightmost token that is not a missing placeholder.
    pub fn last_token(&self) -> Option<&GreenToken> {
        self.edge_token(true)
    }

    fn edge_token(&self, from_end: bool) -> Option<&GreenToken> {
        let mut stack = Vec::new();
        push_slots(&mut stack, self, from_end);
        while let Some(element) = stack.pop() {
            match element {
                NodeOrToken::Node(node) => push_slots(&mut stack, node, from_end),
                NodeOrToken::Token(token) if !token.is_missing() => return Some(token),
                NodeOrToken::Token(_) => {}
            }
        }
        None
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Pushes the children of `node` so that popping visits them left to right,
/// or right to left when `from_end` is set.
fn push_slots<'a>(stack: &mut Vec<&'a GreenElement>, node: &'a GreenNode, from_end: bool) {
    let slots = node.slots().iter().flatten();
    if from_end {
        stack.extend(slots);
    } else {
        stack.extend(slots.rev());
    }
}

impl Drop for GreenNodeData {
    /// Unlinks uniquely owned descendants one at a time, so dropping a deep
    /// tree does not recurse once per level.
    fn drop(&mut self) {
        let mut stack: Vec<GreenNode> = take_child_nodes(&mut self.slots).collect();
        while let Some(mut node) = stack.pop() {
            if let Some(data) = Arc::get_mut(&mut node.0) {
                stack.extend(take_child_nodes(&mut data.slots));
            }
        }
    }
}

fn take_child_nodes(slots: &mut [Option<GreenElement>]) -> impl Iterator<Item = GreenNode> + '_ {
    slots.iter_mut().filter_map(|slot| match slot.take()? {
        NodeOrToken::Node(node) => Some(node),
        NodeOrToken::Token(_) => None,
    })
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenNode")
            .field("kind", &self.kind())
            .field("width", &self.width())
            .field("slots", &self.slot_count())
            .finish_non_exhaustive()
    }
}
