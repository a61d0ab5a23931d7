//! Navigation helpers shared by the green and red layers.

use std::fmt;

use crate::{SyntaxKind, SyntaxNode, SyntaxNodeOrToken, SyntaxToken};

/// Node-or-token wrapper used throughout the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    pub fn as_node(&self) -> Option<&N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, NodeOrToken::Node(_))
    }
}

impl<N: fmt::Display, T: fmt::Display> fmt::Display for NodeOrToken<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeOrToken::Node(node) => fmt::Display::fmt(node, f),
            NodeOrToken::Token(token) => fmt::Display::fmt(token, f),
        }
    }
}

/// Iterator over the non-empty slots of a node.
#[derive(Clone, Debug)]
pub struct SyntaxElementChildren {
    parent: SyntaxNode,
    next: usize,
}

impl SyntaxElementChildren {
    pub(crate) fn new(parent: SyntaxNode) -> Self {
        Self { parent, next: 0 }
    }
}

impl Iterator for SyntaxElementChildren {
    type Item = SyntaxNodeOrToken;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.parent.slot_count() {
            let index = self.next;
            self.next += 1;
            if let Some(child) = self.parent.child(index) {
                return Some(child);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.parent.slot_count() - self.next))
    }
}

/// Preorder traversal over nodes.
#[derive(Clone)]
pub struct Preorder {
    inner: PreorderWithTokens,
}

impl Preorder {
    pub(crate) fn new(start: SyntaxNode) -> Self {
        Self { inner: PreorderWithTokens::new(start) }
    }

    /// Skips the children of the node that was just entered.
    pub fn skip_subtree(&mut self) {
        self.inner.skip_subtree();
    }
}

impl Iterator for Preorder {
    type Item = WalkEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(|item| match item {
            WalkEventWithTokens::EnterNode(it) => Some(WalkEvent::Enter(it)),
            WalkEventWithTokens::LeaveNode(it) => Some(WalkEvent::Leave(it)),
            WalkEventWithTokens::Token(_) => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalkEvent {
    Enter(SyntaxNode),
    Leave(SyntaxNode),
}

/// Preorder traversal over nodes and tokens.
#[derive(Clone)]
pub struct PreorderWithTokens {
    stack: Vec<(SyntaxNode, SyntaxElementChildren)>,
    root: Option<SyntaxNode>,
}

impl PreorderWithTokens {
    pub(crate) fn new(start: SyntaxNode) -> Self {
        Self { stack: Vec::with_capacity(32), root: Some(start) }
    }

    /// Skips the children of the node that was just entered. Its
    /// `LeaveNode` event is not reported.
    pub fn skip_subtree(&mut self) {
        assert!(self.stack.pop().is_some(), "must have a subtree to skip");
    }
}

impl Iterator for PreorderWithTokens {
    type Item = WalkEventWithTokens;

    fn next(&mut self) -> Option<Self::Item> {
        let Some((_, active)) = self.stack.last_mut() else {
            let root = self.root.take()?;
            self.stack.push((root.clone(), root.children_and_tokens()));
            return Some(WalkEventWithTokens::EnterNode(root));
        };
        match active.next() {
            Some(SyntaxNodeOrToken::Node(child)) => {
                self.stack.push((child.clone(), child.children_and_tokens()));
                Some(WalkEventWithTokens::EnterNode(child))
            }
            Some(SyntaxNodeOrToken::Token(token)) => Some(WalkEventWithTokens::Token(token)),
            None => {
                let (exited, _) = self.stack.pop()?;
                Some(WalkEventWithTokens::LeaveNode(exited))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalkEventWithTokens {
    EnterNode(SyntaxNode),
    LeaveNode(SyntaxNode),
    Token(SyntaxToken),
}

/// There might be zero, one or two tokens at a given offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenAtOffset<T> {
    /// No tokens at offset.
    None,
    /// Only a single token at offset.
    Single(T),
    /// Offset is exactly between two tokens.
    Between(T, T),
}

impl<T> TokenAtOffset<T> {
    pub fn map<F: Fn(T) -> U, U>(self, f: F) -> TokenAtOffset<U> {
        match self {
            TokenAtOffset::None => TokenAtOffset::None,
            TokenAtOffset::Single(it) => TokenAtOffset::Single(f(it)),
            TokenAtOffset::Between(l, r) => TokenAtOffset::Between(f(l), f(r)),
        }
    }

    /// Convert to option, preferring the right token in case of a tie.
    pub fn right_biased(self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Single(token) => Some(token),
            Self::Between(_, right) => Some(right),
        }
    }

    /// Convert to option, preferring the left token in case of a tie.
    pub fn left_biased(self) -> Option<T> {
        match self {
            Self::None => None,
            Self::Single(token) => Some(token),
            Self::Between(left, _) => Some(left),
        }
    }
}

impl<T> Iterator for TokenAtOffset<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match std::mem::replace(self, Self::None) {
            Self::None => None,
            Self::Single(token) => Some(token),
            Self::Between(left, right) => {
                *self = Self::Single(right);
                Some(left)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::None => (0, Some(0)),
            Self::Single(_) => (1, Some(1)),
            Self::Between(_, _) => (2, Some(2)),
        }
    }
}

impl<T> ExactSizeIterator for TokenAtOffset<T> {}

/// Typed view over a `LIST` node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxNodeOrTokenList(SyntaxNode);

impl SyntaxNodeOrTokenList {
    pub fn new(node: SyntaxNode) -> Self {
        debug_assert_eq!(node.kind(), SyntaxKind::LIST);
        Self(node)
    }

    pub fn syntax(&self) -> &SyntaxNode {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.slot_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<SyntaxNodeOrToken> {
        self.0.child(index)
    }

    pub fn iter(&self) -> SyntaxElementChildren {
        self.0.children_and_tokens()
    }

    pub fn nodes(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        self.0.children()
    }

    pub fn tokens(&self) -> impl Iterator<Item = SyntaxToken> + use<> {
        self.iter().filter_map(NodeOrToken::into_token)
    }
}

impl IntoIterator for &SyntaxNodeOrTokenList {
    type Item = SyntaxNodeOrToken;
    type IntoIter = SyntaxElementChildren;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
