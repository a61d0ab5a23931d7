use crate::{NodeOrToken, SyntaxNode, SyntaxToken, SyntaxVisitor};

/// Visits every child of `node` in slot order.
pub fn walk_node<V: SyntaxVisitor + ?Sized>(visitor: &mut V, node: &SyntaxNode) {
    for child in node.children_and_tokens() {
        match child {
            NodeOrToken::Node(child) => visitor.visit(&child),
            NodeOrToken::Token(token) => visitor.visit_token(&token),
        }
    }
}

/// Concatenates the full text of every token it visits.
#[derive(Debug, Default)]
pub struct TextCollector {
    text: String,
}

impl TextCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reproduces the source text covered by `node`. Tokens come from a
    /// flat preorder walk, so tree depth does not grow the call stack.
    pub fn collect(node: &SyntaxNode) -> String {
        let mut collector = Self::new();
        for token in node.descendant_tokens() {
            collector.visit_token(&token);
        }
        collector.finish()
    }

    pub fn finish(self) -> String {
        self.text
    }
}

impl SyntaxVisitor for TextCollector {
    fn visit_token(&mut self, token: &SyntaxToken) {
        self.text.push_str(token.full_text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AstNode, BinaryOperationExpression, IdentifierName};
    use crate::{
        GreenNode, GreenToken, GreenTrivia, SyntaxFactory, SyntaxKind, TriviaKind, TriviaPiece,
    };

    fn token(kind: SyntaxKind, text: &str, trailing_space: bool) -> GreenToken {
        if trailing_space {
            let trailing = GreenTrivia::new(&[TriviaPiece::new(TriviaKind::Whitespace, 1.into())]);
            GreenToken::new(kind, GreenTrivia::empty(), &format!("{text} "), trailing, None)
        } else {
            GreenToken::new(kind, GreenTrivia::empty(), text, GreenTrivia::empty(), None)
        }
    }

    fn sum() -> GreenNode {
        let name = |text: &str| {
            SyntaxFactory::new().identifier_name(token(SyntaxKind::IDENTIFIER, text, true))
        };
        let inner = SyntaxFactory::new().binary_operation_expression(
            name("a"),
            token(SyntaxKind::PLUS, "+", true),
            name("b"),
        );
        SyntaxFactory::new().binary_operation_expression(
            inner,
            token(SyntaxKind::MINUS, "-", true),
            SyntaxFactory::new().identifier_name(token(SyntaxKind::IDENTIFIER, "c", false)),
        )
    }

    #[derive(Default)]
    struct Names(Vec<String>);

    impl SyntaxVisitor for Names {
        fn visit_identifier_name(&mut self, node: &IdentifierName) {
            self.0.push(node.name().text().to_owned());
        }
    }

    /// Stops at the first binary expression.
    #[derive(Default)]
    struct Shallow(usize);

    impl SyntaxVisitor for Shallow {
        fn visit_binary_operation_expression(&mut self, _node: &BinaryOperationExpression) {
            self.0 += 1;
        }
    }

    #[test]
    fn collects_source_text() {
        let root = SyntaxNode::new_root(sum());
        assert_eq!(TextCollector::collect(&root), "a + b - c");
        assert_eq!(TextCollector::collect(&root), root.full_text());
    }

    #[test]
    fn hooks_see_every_node_of_their_kind() {
        let root = SyntaxNode::new_root(sum());
        let mut names = Names::default();
        names.visit(&root);
        assert_eq!(names.0, ["a", "b", "c"]);
    }

    #[test]
    fn hooks_without_walk_stop_descent() {
        let root = SyntaxNode::new_root(sum());
        let mut shallow = Shallow::default();
        shallow.visit(&root);
        assert_eq!(shallow.0, 1);

        let mut deep = Shallow::default();
        walk_node(&mut deep, &root);
        assert_eq!(deep.0, 1);
        assert!(BinaryOperationExpression::can_cast(root.kind()));
    }
}
