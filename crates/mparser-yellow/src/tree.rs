use std::fmt;

use mparser_errors::Diagnostic;
use mparser_inputs::{Position, SourceFile};
use text_size::TextSize;

use crate::{GreenNode, SyntaxNode};

/// A parsed source file: the red root, the text it was built from and every
/// diagnostic reported while building it.
#[derive(Clone)]
pub struct SyntaxTree {
    root: SyntaxNode,
    source: SourceFile,
    diagnostics: Vec<Diagnostic>,
}

impl SyntaxTree {
    /// `diagnostics` holds problems found outside the tree, in absolute
    /// offsets. Diagnostics attached to green nodes are collected as well.
    pub fn new(source: SourceFile, green: GreenNode, diagnostics: Vec<Diagnostic>) -> Self {
        debug_assert_eq!(green.width(), TextSize::of(source.text()));
        let root = SyntaxNode::new_root(green);
        let mut diagnostics = diagnostics;
        diagnostics.extend(root.diagnostics());
        diagnostics.sort_by_key(|diagnostic| diagnostic.range().start());
        Self { root, source, diagnostics }
    }

    pub fn root(&self) -> SyntaxNode {
        self.root.clone()
    }

    pub fn source(&self) -> &SourceFile {
        &self.source
    }

    pub fn text(&self) -> &str {
        self.source.text()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn position(&self, offset: TextSize) -> Position {
        self.source.position(offset)
    }

    pub fn debug_dump(&self) -> String {
        self.root.debug_dump()
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("source", &self.source)
            .field("diagnostics", &self.diagnostics.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use mparser_errors::TextRange;

    use super::*;
    use crate::ast::{AstNode, File};
    use crate::{
        GreenToken, GreenTrivia, NodeOrToken, SyntaxFactory, SyntaxKind, TextCollector,
        TokenAtOffset, TokenValue, TriviaKind, TriviaPiece, WalkEvent,
    };

    fn token(kind: SyntaxKind, text: &str, trailing: &[TriviaPiece]) -> GreenToken {
        let width: TextSize = trailing.iter().map(|piece| piece.len).sum();
        let padding = " ".repeat(usize::from(width));
        let value = (kind == SyntaxKind::NUMBER_LITERAL)
            .then(|| text.parse().ok().map(TokenValue::Number))
            .flatten();
        GreenToken::new(
            kind,
            GreenTrivia::empty(),
            &format!("{text}{padding}"),
            GreenTrivia::new(trailing),
            value,
        )
    }

    fn space() -> [TriviaPiece; 1] {
        [TriviaPiece::new(TriviaKind::Whitespace, 1.into())]
    }

    /// `x = (1 ` with the closing bracket missing, followed by end of file.
    fn broken_assignment() -> SyntaxTree {
        let f = SyntaxFactory::new;
        let x = f().identifier_name(token(SyntaxKind::IDENTIFIER, "x", &space()));
        let one = f().number_literal_expression(token(SyntaxKind::NUMBER_LITERAL, "1", &space()));
        let paren = SyntaxFactory::with_diagnostics(vec![Diagnostic::error(
            "expected ')'",
            TextRange::empty(3.into()),
        )])
        .parenthesized_expression(
            token(SyntaxKind::OPENING_BRACKET, "(", &[]),
            one,
            GreenToken::missing(SyntaxKind::CLOSING_BRACKET),
        );
        let assignment =
            f().assignment_expression(x, token(SyntaxKind::ASSIGNMENT, "=", &space()), paren);
        let statement = f().expression_statement(assignment, None);
        let file = f().file(vec![statement.into()], token(SyntaxKind::END_OF_FILE, "", &[]));
        SyntaxTree::new(SourceFile::detached("x = (1 "), file, Vec::new())
    }

    #[test]
    fn round_trips_and_dumps() {
        let tree = broken_assignment();
        assert_eq!(TextCollector::collect(&tree.root()), tree.text());
        expect![[r#"
            FILE@0..7
              LIST@0..7
                EXPRESSION_STATEMENT@0..7
                  ASSIGNMENT_EXPRESSION@0..7
                    IDENTIFIER_NAME@0..2
                      IDENTIFIER@0..1 "x" trailing=[Whitespace(" ")]
                    ASSIGNMENT@2..3 "=" trailing=[Whitespace(" ")]
                    PARENTHESIZED_EXPRESSION@4..7
                      # error@7..7: expected ')'
                      OPENING_BRACKET@4..5 "("
                      NUMBER_LITERAL_EXPRESSION@5..7
                        NUMBER_LITERAL@5..6 "1" trailing=[Whitespace(" ")]
                      CLOSING_BRACKET@7..7 <missing>
              END_OF_FILE@7..7 ""
        "#]]
        .assert_eq(&tree.debug_dump());
    }

    #[test]
    fn diagnostics_are_absolute() {
        let tree = broken_assignment();
        let [diagnostic] = tree.diagnostics() else { panic!("expected one diagnostic") };
        assert_eq!(diagnostic.range(), TextRange::empty(7.into()));
        assert_eq!(tree.position(diagnostic.range().start()).to_string(), "1:8");
        assert!(tree.has_errors());
    }

    #[test]
    fn positions_follow_preceding_widths() {
        let tree = broken_assignment();
        for event in tree.root().preorder_with_tokens() {
            let crate::WalkEventWithTokens::EnterNode(node) = event else { continue };
            let mut expected = node.position();
            for index in 0..node.slot_count() {
                let Some(child) = node.child(index) else { continue };
                assert_eq!(child.full_range().start(), expected);
                expected += child.full_range().len();
            }
            assert_eq!(expected, node.full_range().end());
        }
    }

    #[test]
    fn children_are_cached() {
        let tree = broken_assignment();
        let root = tree.root();
        let first = root.child_node(0).unwrap();
        let again = root.child_node(0).unwrap();
        assert_eq!(first, again);
        assert_eq!(first.parent(), Some(root.clone()));
        assert!(root.child_node(1).is_none());
        assert_eq!(root.child_token(1).map(|it| it.kind()), Some(SyntaxKind::END_OF_FILE));
    }

    #[test]
    fn detached_nodes_outlive_their_tree() {
        let statement = {
            let tree = broken_assignment();
            let file = File::cast(tree.root()).unwrap();
            file.statement_list().nodes().next().unwrap()
        };
        assert_eq!(statement.kind(), SyntaxKind::EXPRESSION_STATEMENT);
        assert_eq!(statement.full_text(), "x = (1 ");
        assert!(statement.parent().is_none());
    }

    #[test]
    fn ranges_exclude_outer_trivia() {
        let tree = broken_assignment();
        let statement = tree.root().child_node(0).unwrap().child_node(0).unwrap();
        assert_eq!(statement.full_range(), TextRange::new(0.into(), 7.into()));
        assert_eq!(statement.range(), TextRange::new(0.into(), 6.into()));
        assert_eq!(statement.text(), "x = (1");
        assert_eq!(statement.first_token().map(|it| it.text().to_owned()), Some("x".into()));
        assert_eq!(statement.last_token().map(|it| it.text().to_owned()), Some("1".into()));
        assert_eq!(statement.ancestors().count(), 3);
    }

    #[test]
    fn finds_tokens_at_offsets() {
        let root = broken_assignment().root();
        let texts = |at: u32| {
            root.token_at_offset(at.into()).map(|it| it.text().to_owned()).collect::<Vec<_>>()
        };
        assert_eq!(texts(0), ["x"]);
        assert_eq!(texts(2), ["x", "="]);
        assert_eq!(texts(5), ["(", "1"]);
        assert_eq!(texts(7), ["1"]);
        assert_eq!(root.token_at_offset(8.into()), TokenAtOffset::None);

        let biased = |at: u32, left: bool| {
            let tokens = root.token_at_offset(at.into());
            let token = if left { tokens.left_biased() } else { tokens.right_biased() };
            token.map(|it| it.text().to_owned())
        };
        assert_eq!(biased(2, true).as_deref(), Some("x"));
        assert_eq!(biased(2, false).as_deref(), Some("="));
        assert_eq!(biased(7, false).as_deref(), Some("1"));
        assert_eq!(biased(8, true), None);
    }

    #[test]
    fn preorder_can_skip_subtrees() {
        let root = broken_assignment().root();
        let mut entered = Vec::new();
        let mut preorder = root.preorder();
        while let Some(event) = preorder.next() {
            if let WalkEvent::Enter(node) = event {
                if node.kind() == SyntaxKind::PARENTHESIZED_EXPRESSION {
                    preorder.skip_subtree();
                }
                entered.push(node.kind());
            }
        }
        assert!(entered.contains(&SyntaxKind::IDENTIFIER_NAME));
        assert!(entered.contains(&SyntaxKind::PARENTHESIZED_EXPRESSION));
        assert!(!entered.contains(&SyntaxKind::NUMBER_LITERAL_EXPRESSION));
    }

    #[test]
    fn number_values_survive() {
        let tree = broken_assignment();
        let number = tree
            .root()
            .descendant_tokens()
            .find(|it| it.kind() == SyntaxKind::NUMBER_LITERAL)
            .unwrap();
        assert_eq!(number.value(), Some(&TokenValue::Number(1.0)));
        assert!(matches!(
            number.parent().child(0),
            Some(NodeOrToken::Token(ref token)) if token == &number
        ));
    }
}
