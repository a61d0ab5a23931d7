//! The node schema: every node kind with its ordered, typed slots.
//!
//! `syntax_nodes!` expands the table into the typed AST wrappers, the
//! [`SyntaxFactory`] constructors and the [`SyntaxVisitor`] dispatch, so the
//! three can never disagree about slot order.
//!
//! Slot types:
//! - `token` / `opt_token`: a token that is always present / may be absent,
//! - `node` / `opt_node`: a node that is always present / may be absent,
//! - `list`: a `LIST` node holding any number of nodes and tokens.

use mparser_errors::Diagnostic;

use crate::ast::AstNode;
use crate::visitor::walk_node;
use crate::{
    GreenElement, GreenNode, GreenToken, NodeOrToken, SyntaxKind, SyntaxNode,
    SyntaxNodeOrTokenList, SyntaxToken,
};

/// Builds green nodes. Diagnostics given to [`SyntaxFactory::with_diagnostics`]
/// are attached to the node it builds next; their ranges must be relative to
/// that node's start.
#[derive(Debug, Default)]
pub struct SyntaxFactory {
    diagnostics: Vec<Diagnostic>,
}

impl SyntaxFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    fn build(self, kind: SyntaxKind, slots: Vec<Option<GreenElement>>) -> GreenNode {
        GreenNode::new_with_diagnostics(kind, slots, self.diagnostics)
    }

    pub fn list(self, elements: Vec<GreenElement>) -> GreenNode {
        self.build(SyntaxKind::LIST, elements.into_iter().map(Some).collect())
    }
}

trait IntoSlot {
    fn into_slot(self) -> Option<GreenElement>;
}

impl IntoSlot for GreenToken {
    fn into_slot(self) -> Option<GreenElement> {
        Some(NodeOrToken::Token(self))
    }
}

impl IntoSlot for Option<GreenToken> {
    fn into_slot(self) -> Option<GreenElement> {
        self.map(NodeOrToken::Token)
    }
}

impl IntoSlot for GreenNode {
    fn into_slot(self) -> Option<GreenElement> {
        Some(NodeOrToken::Node(self))
    }
}

impl IntoSlot for Option<GreenNode> {
    fn into_slot(self) -> Option<GreenElement> {
        self.map(NodeOrToken::Node)
    }
}

impl IntoSlot for Vec<GreenElement> {
    fn into_slot(self) -> Option<GreenElement> {
        Some(NodeOrToken::Node(SyntaxFactory::new().list(self)))
    }
}

macro_rules! slot_type {
    (token) => { GreenToken };
    (opt_token) => { Option<GreenToken> };
    (node) => { GreenNode };
    (opt_node) => { Option<GreenNode> };
    (list) => { Vec<GreenElement> };
}

macro_rules! slot_accessor {
    ($name:ident, $index:expr, token) => {
        pub fn $name(&self) -> SyntaxToken {
            self.0.required_token($index)
        }
    };
    ($name:ident, $index:expr, opt_token) => {
        pub fn $name(&self) -> Option<SyntaxToken> {
            self.0.child_token($index)
        }
    };
    ($name:ident, $index:expr, node) => {
        pub fn $name(&self) -> SyntaxNode {
            self.0.required_node($index)
        }
    };
    ($name:ident, $index:expr, opt_node) => {
        pub fn $name(&self) -> Option<SyntaxNode> {
            self.0.child_node($index)
        }
    };
    ($name:ident, $index:expr, list) => {
        pub fn $name(&self) -> SyntaxNodeOrTokenList {
            SyntaxNodeOrTokenList::new(self.0.required_node($index))
        }
    };
}

macro_rules! slot_accessors {
    ($index:expr;) => {};
    ($index:expr; $name:ident: $slot:ident, $($rest:tt)*) => {
        slot_accessor!($name, $index, $slot);
        slot_accessors!($index + 1; $($rest)*);
    };
}

macro_rules! syntax_nodes {
    ($(
        $(#[$meta:meta])*
        $name:ident = $kind:ident, $factory:ident, $visit:ident {
            $($slot:ident: $slot_ty:ident,)*
        }
    )*) => {
        /// Typed wrappers, one per node kind.
        pub(crate) mod nodes {
            use super::*;

            $(
                $(#[$meta])*
                #[derive(Clone, Debug, PartialEq, Eq)]
                pub struct $name(pub(crate) SyntaxNode);

                impl AstNode for $name {
                    fn can_cast(kind: SyntaxKind) -> bool {
                        kind == SyntaxKind::$kind
                    }

                    fn cast(syntax: SyntaxNode) -> Option<Self> {
                        Self::can_cast(syntax.kind()).then_some(Self(syntax))
                    }

                    fn syntax(&self) -> &SyntaxNode {
                        &self.0
                    }
                }

                impl $name {
                    slot_accessors!(0usize; $($slot: $slot_ty,)*);
                }
            )*
        }

        impl SyntaxFactory {
            $(
                pub fn $factory(self, $($slot: slot_type!($slot_ty)),*) -> GreenNode {
                    self.build(SyntaxKind::$kind, vec![$($slot.into_slot()),*])
                }
            )*
        }

        /// Slot names of a node kind, in slot order.
        pub fn slot_names(kind: SyntaxKind) -> Option<&'static [&'static str]> {
            match kind {
                $(SyntaxKind::$kind => Some(&[$(stringify!($slot)),*]),)*
                _ => None,
            }
        }

        /// Kind-directed traversal. Every hook defaults to
        /// [`SyntaxVisitor::default_visit`], which walks into all children.
        /// A hook that does not call [`walk_node`] stops the descent there.
        pub trait SyntaxVisitor {
            fn visit(&mut self, node: &SyntaxNode) {
                match node.kind() {
                    $(SyntaxKind::$kind => self.$visit(&nodes::$name(node.clone())),)*
                    SyntaxKind::LIST => self.visit_list(&SyntaxNodeOrTokenList::new(node.clone())),
                    _ => self.default_visit(node),
                }
            }

            $(
                fn $visit(&mut self, node: &nodes::$name) {
                    self.default_visit(node.syntax());
                }
            )*

            fn visit_list(&mut self, list: &SyntaxNodeOrTokenList) {
                for element in list {
                    match element {
                        NodeOrToken::Node(node) => self.visit(&node),
                        NodeOrToken::Token(token) => self.visit_token(&token),
                    }
                }
            }

            fn visit_token(&mut self, _token: &SyntaxToken) {}

            fn default_visit(&mut self, node: &SyntaxNode) {
                walk_node(self, node);
            }
        }
    };
}

syntax_nodes! {
    /// A whole source file.
    File = FILE, file, visit_file {
        statement_list: list,
        end_of_file: token,
    }

    FunctionDeclaration = FUNCTION_DECLARATION, function_declaration, visit_function_declaration {
        function_keyword: token,
        output_description: opt_node,
        name: node,
        input_description: opt_node,
        commas: list,
        body: list,
        end_keyword: opt_token,
    }

    /// `[a, b] =` or `a =` in a function header. The list keeps brackets
    /// and commas as tokens.
    FunctionOutputDescription = FUNCTION_OUTPUT_DESCRIPTION, function_output_description, visit_function_output_description {
        output_list: list,
        assignment_sign: token,
    }

    FunctionInputDescription = FUNCTION_INPUT_DESCRIPTION, function_input_description, visit_function_input_description {
        opening_bracket: token,
        parameter_list: list,
        closing_bracket: token,
    }

    SwitchStatement = SWITCH_STATEMENT, switch_statement, visit_switch_statement {
        switch_keyword: token,
        switch_expression: node,
        optional_commas: list,
        cases: list,
        end_keyword: token,
    }

    /// `case` or `otherwise`; the latter has no case identifier.
    SwitchCase = SWITCH_CASE, switch_case, visit_switch_case {
        case_keyword: token,
        case_identifier: opt_node,
        optional_commas: list,
        body: list,
    }

    WhileStatement = WHILE_STATEMENT, while_statement, visit_while_statement {
        while_keyword: token,
        condition: node,
        optional_commas: list,
        body: list,
        end_keyword: token,
    }

    ElseifClause = ELSEIF_CLAUSE, elseif_clause, visit_elseif_clause {
        elseif_keyword: token,
        condition: node,
        optional_commas: list,
        body: list,
    }

    ElseClause = ELSE_CLAUSE, else_clause, visit_else_clause {
        else_keyword: token,
        body: list,
    }

    IfStatement = IF_STATEMENT, if_statement, visit_if_statement {
        if_keyword: token,
        condition: node,
        optional_commas: list,
        body: list,
        elseif_clauses: list,
        else_clause: opt_node,
        end_keyword: token,
    }

    ForStatement = FOR_STATEMENT, for_statement, visit_for_statement {
        for_keyword: token,
        for_assignment: node,
        optional_commas: list,
        body: list,
        end_keyword: token,
    }

    TryCatchStatement = TRY_CATCH_STATEMENT, try_catch_statement, visit_try_catch_statement {
        try_keyword: token,
        try_body: list,
        catch_clause: opt_node,
        end_keyword: token,
    }

    CatchClause = CATCH_CLAUSE, catch_clause, visit_catch_clause {
        catch_keyword: token,
        catch_identifier: opt_node,
        catch_body: list,
    }

    ExpressionStatement = EXPRESSION_STATEMENT, expression_statement, visit_expression_statement {
        expression: node,
        semicolon_or_comma: opt_token,
    }

    EmptyStatement = EMPTY_STATEMENT, empty_statement, visit_empty_statement {
        semicolon_or_comma: token,
    }

    AssignmentExpression = ASSIGNMENT_EXPRESSION, assignment_expression, visit_assignment_expression {
        lhs: node,
        assignment_sign: token,
        rhs: node,
    }

    UnaryPrefixOperationExpression = UNARY_PREFIX_OPERATION_EXPRESSION, unary_prefix_operation_expression, visit_unary_prefix_operation_expression {
        operation: token,
        operand: node,
    }

    UnaryPostfixOperationExpression = UNARY_POSTFIX_OPERATION_EXPRESSION, unary_postfix_operation_expression, visit_unary_postfix_operation_expression {
        operand: node,
        operation: token,
    }

    BinaryOperationExpression = BINARY_OPERATION_EXPRESSION, binary_operation_expression, visit_binary_operation_expression {
        lhs: node,
        operation: token,
        rhs: node,
    }

    IdentifierName = IDENTIFIER_NAME, identifier_name, visit_identifier_name {
        name: token,
    }

    NumberLiteralExpression = NUMBER_LITERAL_EXPRESSION, number_literal_expression, visit_number_literal_expression {
        number: token,
    }

    StringLiteralExpression = STRING_LITERAL_EXPRESSION, string_literal_expression, visit_string_literal_expression {
        string: token,
    }

    DoubleQuotedStringLiteralExpression = DOUBLE_QUOTED_STRING_LITERAL_EXPRESSION, double_quoted_string_literal_expression, visit_double_quoted_string_literal_expression {
        string: token,
    }

    UnquotedStringLiteralExpression = UNQUOTED_STRING_LITERAL_EXPRESSION, unquoted_string_literal_expression, visit_unquoted_string_literal_expression {
        string: token,
    }

    ArrayLiteralExpression = ARRAY_LITERAL_EXPRESSION, array_literal_expression, visit_array_literal_expression {
        opening_square_bracket: token,
        elements: list,
        closing_square_bracket: token,
    }

    CellArrayLiteralExpression = CELL_ARRAY_LITERAL_EXPRESSION, cell_array_literal_expression, visit_cell_array_literal_expression {
        opening_brace: token,
        elements: list,
        closing_brace: token,
    }

    ParenthesizedExpression = PARENTHESIZED_EXPRESSION, parenthesized_expression, visit_parenthesized_expression {
        opening_bracket: token,
        expression: node,
        closing_bracket: token,
    }

    CellArrayElementAccessExpression = CELL_ARRAY_ELEMENT_ACCESS_EXPRESSION, cell_array_element_access_expression, visit_cell_array_element_access_expression {
        expression: node,
        opening_brace: token,
        nodes: list,
        closing_brace: token,
    }

    FunctionCallExpression = FUNCTION_CALL_EXPRESSION, function_call_expression, visit_function_call_expression {
        function_name: node,
        opening_bracket: token,
        parameters: list,
        closing_bracket: token,
    }

    MemberAccessExpression = MEMBER_ACCESS_EXPRESSION, member_access_expression, visit_member_access_expression {
        left_operand: node,
        dot: token,
        right_operand: node,
    }

    /// The `(expr)` in `s.(expr)`.
    IndirectMemberAccessExpression = INDIRECT_MEMBER_ACCESS_EXPRESSION, indirect_member_access_expression, visit_indirect_member_access_expression {
        opening_bracket: token,
        expression: node,
        closing_bracket: token,
    }

    CommandExpression = COMMAND_EXPRESSION, command_expression, visit_command_expression {
        command_name: node,
        arguments: list,
    }

    NamedFunctionHandle = NAMED_FUNCTION_HANDLE, named_function_handle, visit_named_function_handle {
        at_sign: token,
        function_name: node,
    }

    LambdaExpression = LAMBDA_EXPRESSION, lambda_expression, visit_lambda_expression {
        at_sign: token,
        input: node,
        body: node,
    }

    /// Dotted name such as `pkg.sub.fn`. The list alternates identifiers
    /// and dots.
    CompoundName = COMPOUND_NAME, compound_name, visit_compound_name {
        nodes: list,
    }

    /// A bare `:` used as an index.
    MagicColonExpression = MAGIC_COLON_EXPRESSION, magic_colon_expression, visit_magic_colon_expression {
        colon: token,
    }

    /// Tokens the parser could not place.
    ErrorNode = ERROR, error, visit_error {
        skipped: list,
    }
}

#[cfg(test)]
mod tests {
    use mparser_errors::TextRange;

    use super::nodes::*;
    use super::*;
    use crate::{GreenTrivia, TextCollector};

    fn token(kind: SyntaxKind, text: &str) -> GreenToken {
        GreenToken::new(kind, GreenTrivia::empty(), text, GreenTrivia::empty(), None)
    }

    fn name(text: &str) -> GreenNode {
        SyntaxFactory::new().identifier_name(token(SyntaxKind::IDENTIFIER, text))
    }

    #[test]
    fn factory_follows_slot_table() {
        let green = SyntaxFactory::new().binary_operation_expression(
            name("a"),
            token(SyntaxKind::PLUS, "+"),
            name("b"),
        );
        let names = slot_names(SyntaxKind::BINARY_OPERATION_EXPRESSION).unwrap();
        assert_eq!(names, ["lhs", "operation", "rhs"]);
        assert_eq!(green.slot_count(), names.len());
        assert_eq!(green.full_text(), "a+b");

        let node = BinaryOperationExpression::cast(SyntaxNode::new_root(green)).unwrap();
        assert_eq!(node.operation().text(), "+");
        assert_eq!(node.lhs().kind(), SyntaxKind::IDENTIFIER_NAME);
        assert_eq!(node.rhs().full_range(), TextRange::new(2.into(), 3.into()));
    }

    #[test]
    fn optional_slots_may_be_empty() {
        let green = SyntaxFactory::new().expression_statement(name("x"), None);
        let node = ExpressionStatement::cast(SyntaxNode::new_root(green)).unwrap();
        assert!(node.semicolon_or_comma().is_none());
        assert_eq!(node.expression().full_text(), "x");
        assert!(IdentifierName::cast(node.syntax().clone()).is_none());
    }

    #[test]
    fn lists_hold_nodes_and_tokens() {
        let green = SyntaxFactory::new().compound_name(vec![
            name("a").into(),
            token(SyntaxKind::DOT, ".").into(),
            name("b").into(),
        ]);
        let node = CompoundName::cast(SyntaxNode::new_root(green)).unwrap();
        let list = node.nodes();
        assert_eq!(list.len(), 3);
        assert_eq!(list.nodes().count(), 2);
        assert_eq!(list.tokens().map(|it| it.text().to_owned()).collect::<Vec<_>>(), ["."]);
        assert_eq!(TextCollector::collect(node.syntax()), "a.b");
    }

    #[test]
    fn factory_attaches_diagnostics() {
        let diagnostic = Diagnostic::error("expected ')'", TextRange::empty(1.into()));
        let green = SyntaxFactory::with_diagnostics(vec![diagnostic.clone()])
            .parenthesized_expression(
                token(SyntaxKind::OPENING_BRACKET, "("),
                name("x"),
                GreenToken::missing(SyntaxKind::CLOSING_BRACKET),
            );
        assert_eq!(green.diagnostics(), [diagnostic]);
        assert_eq!(green.width(), 2.into());

        let file = SyntaxFactory::new().file(Vec::new(), token(SyntaxKind::END_OF_FILE, ""));
        assert!(file.diagnostics().is_empty());
    }
}
