//! Positioned handles over green nodes.
//!
//! A [`SyntaxNode`] is created lazily the first time a slot is asked for and
//! cached, so asking twice yields the same node. Children hold a weak link
//! back to their parent; the parent owns its children through the cache.

use std::cell::OnceCell;
use std::fmt::{self, Write as _};
use std::rc::{Rc, Weak};

use mparser_errors::Diagnostic;
use text_size::{TextRange, TextSize};

use crate::syntax::{Preorder, PreorderWithTokens, SyntaxElementChildren, WalkEventWithTokens};
use crate::{
    GreenNode, GreenToken, NodeOrToken, SyntaxKind, TokenAtOffset, TokenValue, Trivia, TriviaIter,
};

pub type SyntaxNodeOrToken = NodeOrToken<SyntaxNode, SyntaxToken>;

#[derive(Clone)]
pub struct SyntaxNode(Rc<NodeData>);

struct NodeData {
    green: GreenNode,
    parent: Option<Weak<NodeData>>,
    index: u32,
    offset: TextSize,
    children: Box<[OnceCell<SyntaxNode>]>,
}

impl SyntaxNode {
    pub fn new_root(green: GreenNode) -> Self {
        Self::new(green, None, 0, TextSize::new(0))
    }

    fn new(green: GreenNode, parent: Option<Weak<NodeData>>, index: u32, offset: TextSize) -> Self {
        let children = (0..green.slot_count()).map(|_| OnceCell::new()).collect();
        Self(Rc::new(NodeData { green, parent, index, offset, children }))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.green.kind()
    }

    pub fn green(&self) -> &GreenNode {
        &self.0.green
    }

    /// The parent node, or `None` for a root or once the tree that owned
    /// this node has been dropped.
    pub fn parent(&self) -> Option<Self> {
        self.0.parent.as_ref()?.upgrade().map(Self)
    }

    pub fn index_in_parent(&self) -> usize {
        self.0.index as usize
    }

    /// Absolute offset of the node start, leading trivia included.
    pub fn position(&self) -> TextSize {
        self.0.offset
    }

    pub fn width(&self) -> TextSize {
        self.0.green.width()
    }

    pub fn full_range(&self) -> TextRange {
        TextRange::at(self.position(), self.width())
    }

    /// The range without the leading trivia of the first token and the
    /// trailing trivia of the last one.
    pub fn range(&self) -> TextRange {
        let green = &self.0.green;
        let (Some(first), Some(last)) = (green.first_token(), green.last_token()) else {
            return TextRange::empty(self.position());
        };
        let full = self.full_range();
        let start = full.start() + first.leading().len();
        let end = full.end() - last.trailing().len();
        TextRange::new(start, end.max(start))
    }

    pub fn slot_count(&self) -> usize {
        self.0.green.slot_count()
    }

    fn slot_position(&self, index: usize) -> TextSize {
        self.0.offset + self.0.green.slot_offset(index)
    }

    pub fn child(&self, index: usize) -> Option<SyntaxNodeOrToken> {
        match self.0.green.slot(index)? {
            NodeOrToken::Node(_) => self.child_node(index).map(NodeOrToken::Node),
            NodeOrToken::Token(_) => self.child_token(index).map(NodeOrToken::Token),
        }
    }

    /// The node in slot `index`. Repeated calls return the same node.
    pub fn child_node(&self, index: usize) -> Option<Self> {
        let NodeOrToken::Node(green) = self.0.green.slot(index)? else {
            return None;
        };
        let child = self.0.children[index].get_or_init(|| {
            Self::new(
                green.clone(),
                Some(Rc::downgrade(&self.0)),
                index as u32,
                self.slot_position(index),
            )
        });
        Some(child.clone())
    }

    pub fn child_token(&self, index: usize) -> Option<SyntaxToken> {
        let NodeOrToken::Token(green) = self.0.green.slot(index)? else {
            return None;
        };
        Some(SyntaxToken { parent: self.clone(), index: index as u32, green: green.clone() })
    }

    /// Node in a slot the schema declares as always present.
    #[track_caller]
    pub(crate) fn required_node(&self, index: usize) -> Self {
        match self.child_node(index) {
            Some(node) => node,
            None => panic!("{:?} is missing required node slot {index}", self.kind()),
        }
    }

    /// Token in a slot the schema declares as always present.
    #[track_caller]
    pub(crate) fn required_token(&self, index: usize) -> SyntaxToken {
        match self.child_token(index) {
            Some(token) => token,
            None => panic!("{:?} is missing required token slot {index}", self.kind()),
        }
    }

    /// Non-empty slots in order.
    pub fn children_and_tokens(&self) -> SyntaxElementChildren {
        SyntaxElementChildren::new(self.clone())
    }

    pub fn children(&self) -> impl Iterator<Item = Self> + use<> {
        self.children_and_tokens().filter_map(NodeOrToken::into_node)
    }

    /// This node followed by its ancestors up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = Self> + use<> {
        std::iter::successors(Some(self.clone()), Self::parent)
    }

    pub fn first_token(&self) -> Option<SyntaxToken> {
        self.edge_token(false)
    }

    pub fn last_token(&self) -> Option<SyntaxToken> {
        self.edge_token(true)
    }

    fn edge_token(&self, from_end: bool) -> Option<SyntaxToken> {
        let mut stack = vec![NodeOrToken::Node(self.clone())];
        while let Some(element) = stack.pop() {
            match element {
                NodeOrToken::Node(node) => {
                    let children = (0..node.slot_count()).filter_map(|index| node.child(index));
                    if from_end {
                        stack.extend(children);
                    } else {
                        stack.extend(children.rev());
                    }
                }
                NodeOrToken::Token(token) if !token.is_missing() => return Some(token),
                NodeOrToken::Token(_) => {}
            }
        }
        None
    }

    pub fn full_text(&self) -> String {
        self.0.green.full_text()
    }

    pub fn text(&self) -> String {
        let full = self.full_text();
        let range = self.range() - self.position();
        full[range].to_owned()
    }

    /// Diagnostics attached to this node and its descendants, in absolute
    /// offsets and ordered by start.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        collect_diagnostics(&self.0.green, self.position(), &mut diagnostics);
        diagnostics.sort_by_key(|diagnostic| diagnostic.range().start());
        diagnostics
    }

    pub fn preorder(&self) -> Preorder {
        Preorder::new(self.clone())
    }

    pub fn preorder_with_tokens(&self) -> PreorderWithTokens {
        PreorderWithTokens::new(self.clone())
    }

    /// Every token under this node, missing placeholders included.
    pub fn descendant_tokens(&self) -> impl Iterator<Item = SyntaxToken> + use<> {
        self.preorder_with_tokens().filter_map(|event| match event {
            WalkEventWithTokens::Token(token) => Some(token),
            _ => None,
        })
    }

    pub fn token_at_offset(&self, offset: TextSize) -> TokenAtOffset<SyntaxToken> {
        let range = self.full_range();
        if offset < range.start() || offset > range.end() {
            return TokenAtOffset::None;
        }
        let right = self.token_covering(offset);
        let left = if offset > range.start() {
            self.token_covering(offset - TextSize::new(1))
        } else {
            None
        };
        match (left, right) {
            (Some(left), Some(right)) if left != right => TokenAtOffset::Between(left, right),
            (_, Some(token)) | (Some(token), None) => TokenAtOffset::Single(token),
            (None, None) => TokenAtOffset::None,
        }
    }

    fn token_covering(&self, offset: TextSize) -> Option<SyntaxToken> {
        let mut node = self.clone();
        loop {
            match node.children_and_tokens().find(|child| child.full_range().contains(offset))? {
                NodeOrToken::Node(child) => node = child,
                NodeOrToken::Token(token) => return Some(token),
            }
        }
    }

    /// Indented dump of the subtree: one node or token per line.
    pub fn debug_dump(&self) -> String {
        let mut out = String::new();
        let mut depth = 0usize;
        for event in self.preorder_with_tokens() {
            match event {
                WalkEventWithTokens::EnterNode(node) => {
                    let indent = "  ".repeat(depth);
                    let _ = writeln!(out, "{indent}{node:?}");
                    for diagnostic in node.green().diagnostics() {
                        let _ = writeln!(out, "{indent}  # {}", diagnostic.shifted(node.position()));
                    }
                    depth += 1;
                }
                WalkEventWithTokens::LeaveNode(_) => depth -= 1,
                WalkEventWithTokens::Token(token) => {
                    let _ = writeln!(out, "{}{token:?}", "  ".repeat(depth));
                }
            }
        }
        out
    }
}

fn collect_diagnostics(root: &GreenNode, offset: TextSize, out: &mut Vec<Diagnostic>) {
    let mut stack = vec![(root, offset)];
    while let Some((green, offset)) = stack.pop() {
        out.extend(green.diagnostics().iter().map(|diagnostic| diagnostic.shifted(offset)));
        let mut children = Vec::new();
        let mut offset = offset;
        for slot in green.slots().iter().flatten() {
            if let NodeOrToken::Node(node) = slot {
                children.push((node, offset));
            }
            offset += slot.width();
        }
        stack.extend(children.into_iter().rev());
    }
}

impl Drop for NodeData {
    /// Cached children are released from an explicit stack. A child still
    /// referenced elsewhere stays alive with a dangling parent link.
    fn drop(&mut self) {
        let mut stack: Vec<SyntaxNode> =
            self.children.iter_mut().filter_map(OnceCell::take).collect();
        while let Some(SyntaxNode(node)) = stack.pop() {
            if let Some(mut data) = Rc::into_inner(node) {
                stack.extend(data.children.iter_mut().filter_map(OnceCell::take));
            }
        }
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for SyntaxNode {}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.full_range())
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_text())
    }
}

/// A token in a tree. Its position is derived from the parent.
#[derive(Clone)]
pub struct SyntaxToken {
    parent: SyntaxNode,
    index: u32,
    green: GreenToken,
}

impl SyntaxToken {
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    pub fn green(&self) -> &GreenToken {
        &self.green
    }

    pub fn text(&self) -> &str {
        self.green.text()
    }

    pub fn full_text(&self) -> &str {
        self.green.full_text()
    }

    pub fn leading_trivia(&self) -> TriviaIter<'_> {
        self.green.leading_trivia()
    }

    pub fn trailing_trivia(&self) -> TriviaIter<'_> {
        self.green.trailing_trivia()
    }

    /// Absolute offset of the token start, leading trivia included.
    pub fn position(&self) -> TextSize {
        self.parent.slot_position(self.index as usize)
    }

    pub fn full_range(&self) -> TextRange {
        TextRange::at(self.position(), self.green.width())
    }

    pub fn range(&self) -> TextRange {
        let start = self.position() + self.green.leading().len();
        TextRange::at(start, TextSize::of(self.text()))
    }

    pub fn value(&self) -> Option<&TokenValue> {
        self.green.value()
    }

    pub fn is_missing(&self) -> bool {
        self.green.is_missing()
    }

    pub fn parent(&self) -> SyntaxNode {
        self.parent.clone()
    }

    pub fn index_in_parent(&self) -> usize {
        self.index as usize
    }
}

impl PartialEq for SyntaxToken {
    fn eq(&self, other: &Self) -> bool {
        self.parent == other.parent && self.index == other.index
    }
}

impl Eq for SyntaxToken {}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_missing() {
            return write!(f, "{:?}@{:?} <missing>", self.kind(), self.range());
        }
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.range(), self.text())?;
        let mut leading = self.leading_trivia().peekable();
        if leading.peek().is_some() {
            f.write_str(" leading=[")?;
            write_trivia(f, leading)?;
            f.write_str("]")?;
        }
        let mut trailing = self.trailing_trivia().peekable();
        if trailing.peek().is_some() {
            f.write_str(" trailing=[")?;
            write_trivia(f, trailing)?;
            f.write_str("]")?;
        }
        Ok(())
    }
}

fn write_trivia<'a>(
    f: &mut fmt::Formatter<'_>,
    trivia: impl Iterator<Item = Trivia<'a>>,
) -> fmt::Result {
    for (i, piece) in trivia.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{piece}")?;
    }
    Ok(())
}

impl fmt::Display for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl SyntaxNodeOrToken {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn full_range(&self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.full_range(),
            NodeOrToken::Token(token) => token.full_range(),
        }
    }

    pub fn range(&self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.range(),
            NodeOrToken::Token(token) => token.range(),
        }
    }

    pub fn full_text(&self) -> String {
        match self {
            NodeOrToken::Node(node) => node.full_text(),
            NodeOrToken::Token(token) => token.full_text().to_owned(),
        }
    }

    pub fn parent(&self) -> Option<SyntaxNode> {
        match self {
            NodeOrToken::Node(node) => node.parent(),
            NodeOrToken::Token(token) => Some(token.parent()),
        }
    }
}

impl From<GreenNode> for SyntaxNode {
    fn from(green: GreenNode) -> Self {
        Self::new_root(green)
    }
}

