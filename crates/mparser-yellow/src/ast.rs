use crate::SyntaxKind::{self, *};
use crate::SyntaxNode;
pub use crate::schema::nodes::*;

pub trait AstNode {
    fn can_cast(kind: SyntaxKind) -> bool
    where
        Self: Sized;

    fn cast(syntax: SyntaxNode) -> Option<Self>
    where
        Self: Sized;

    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_enum {
    ($(#[$meta:meta])* $enum:ident { $($variant:ident($node:ident) = $kind:ident,)* }) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub enum $enum {
            $($variant($node),)*
        }

        impl AstNode for $enum {
            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $($kind)|*)
            }

            fn cast(syntax: SyntaxNode) -> Option<Self> {
                Some(match syntax.kind() {
                    $($kind => Self::$variant($node(syntax)),)*
                    _ => return None,
                })
            }

            fn syntax(&self) -> &SyntaxNode {
                match self {
                    $(Self::$variant(it) => it.syntax(),)*
                }
            }
        }
    };
}

ast_enum! {
    Statement {
        Expression(ExpressionStatement) = EXPRESSION_STATEMENT,
        Empty(EmptyStatement) = EMPTY_STATEMENT,
        FunctionDeclaration(FunctionDeclaration) = FUNCTION_DECLARATION,
        If(IfStatement) = IF_STATEMENT,
        While(WhileStatement) = WHILE_STATEMENT,
        For(ForStatement) = FOR_STATEMENT,
        Switch(SwitchStatement) = SWITCH_STATEMENT,
        TryCatch(TryCatchStatement) = TRY_CATCH_STATEMENT,
        Error(ErrorNode) = ERROR,
    }
}

ast_enum! {
    Expression {
        Assignment(AssignmentExpression) = ASSIGNMENT_EXPRESSION,
        Prefix(UnaryPrefixOperationExpression) = UNARY_PREFIX_OPERATION_EXPRESSION,
        Postfix(UnaryPostfixOperationExpression) = UNARY_POSTFIX_OPERATION_EXPRESSION,
        Binary(BinaryOperationExpression) = BINARY_OPERATION_EXPRESSION,
        Name(IdentifierName) = IDENTIFIER_NAME,
        Number(NumberLiteralExpression) = NUMBER_LITERAL_EXPRESSION,
        String(StringLiteralExpression) = STRING_LITERAL_EXPRESSION,
        DoubleQuotedString(DoubleQuotedStringLiteralExpression) = DOUBLE_QUOTED_STRING_LITERAL_EXPRESSION,
        UnquotedString(UnquotedStringLiteralExpression) = UNQUOTED_STRING_LITERAL_EXPRESSION,
        Array(ArrayLiteralExpression) = ARRAY_LITERAL_EXPRESSION,
        CellArray(CellArrayLiteralExpression) = CELL_ARRAY_LITERAL_EXPRESSION,
        Parenthesized(ParenthesizedExpression) = PARENTHESIZED_EXPRESSION,
        CellAccess(CellArrayElementAccessExpression) = CELL_ARRAY_ELEMENT_ACCESS_EXPRESSION,
        Call(FunctionCallExpression) = FUNCTION_CALL_EXPRESSION,
        MemberAccess(MemberAccessExpression) = MEMBER_ACCESS_EXPRESSION,
        IndirectMemberAccess(IndirectMemberAccessExpression) = INDIRECT_MEMBER_ACCESS_EXPRESSION,
        Command(CommandExpression) = COMMAND_EXPRESSION,
        FunctionHandle(NamedFunctionHandle) = NAMED_FUNCTION_HANDLE,
        Lambda(LambdaExpression) = LAMBDA_EXPRESSION,
        CompoundName(CompoundName) = COMPOUND_NAME,
        MagicColon(MagicColonExpression) = MAGIC_COLON_EXPRESSION,
        Error(ErrorNode) = ERROR,
    }
}

impl File {
    pub fn statements(&self) -> impl Iterator<Item = Statement> + use<> {
        self.statement_list().nodes().filter_map(Statement::cast)
    }
}

impl BinaryOperationExpression {
    pub fn lhs_expression(&self) -> Option<Expression> {
        Expression::cast(self.lhs())
    }

    pub fn rhs_expression(&self) -> Option<Expression> {
        Expression::cast(self.rhs())
    }
}

impl NumberLiteralExpression {
    pub fn value(&self) -> Option<f64> {
        match self.number().value()? {
            crate::TokenValue::Number(value) => Some(*value),
            crate::TokenValue::String(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GreenToken, GreenTrivia, SyntaxFactory, TokenValue};

    #[test]
    fn casts_through_enums() {
        let number = GreenToken::new(
            NUMBER_LITERAL,
            GreenTrivia::empty(),
            "42",
            GreenTrivia::empty(),
            Some(TokenValue::Number(42.0)),
        );
        let green = SyntaxFactory::new().number_literal_expression(number);
        let syntax = SyntaxNode::new_root(green);

        let Some(Expression::Number(literal)) = Expression::cast(syntax.clone()) else {
            panic!("expected a number literal");
        };
        assert_eq!(literal.value(), Some(42.0));
        assert_eq!(literal.syntax(), &syntax);
        assert!(Statement::cast(syntax).is_none());
        assert!(Expression::can_cast(ERROR) && Statement::can_cast(ERROR));
    }
}
