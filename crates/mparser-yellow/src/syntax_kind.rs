use std::fmt;

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u16)]
pub enum SyntaxKind {
    BAD_TOKEN,
    END_OF_FILE,
    IDENTIFIER,
    NUMBER_LITERAL,
    STRING_LITERAL,
    DOUBLE_QUOTED_STRING_LITERAL,
    UNQUOTED_STRING_LITERAL,

    ASSIGNMENT,
    EQUALITY,
    INEQUALITY,
    LOGICAL_AND,
    LOGICAL_OR,
    BITWISE_AND,
    BITWISE_OR,
    LESS,
    LESS_OR_EQUAL,
    GREATER,
    GREATER_OR_EQUAL,
    NOT,
    PLUS,
    MINUS,
    MULTIPLY,
    DIVIDE,
    POWER,
    BACKSLASH,
    TRANSPOSE,
    DOT_MULTIPLY,
    DOT_DIVIDE,
    DOT_POWER,
    DOT_BACKSLASH,
    DOT_TRANSPOSE,
    AT,
    COLON,
    QUESTION_MARK,
    COMMA,
    SEMICOLON,
    OPENING_BRACE,
    CLOSING_BRACE,
    OPENING_SQUARE_BRACKET,
    CLOSING_SQUARE_BRACKET,
    OPENING_BRACKET,
    CLOSING_BRACKET,
    DOT,

    LIST,
    ERROR,
    FILE,
    FUNCTION_DECLARATION,
    FUNCTION_OUTPUT_DESCRIPTION,
    FUNCTION_INPUT_DESCRIPTION,
    SWITCH_STATEMENT,
    SWITCH_CASE,
    WHILE_STATEMENT,
    ELSEIF_CLAUSE,
    ELSE_CLAUSE,
    IF_STATEMENT,
    FOR_STATEMENT,
    TRY_CATCH_STATEMENT,
    CATCH_CLAUSE,
    EXPRESSION_STATEMENT,
    EMPTY_STATEMENT,
    ASSIGNMENT_EXPRESSION,
    UNARY_PREFIX_OPERATION_EXPRESSION,
    UNARY_POSTFIX_OPERATION_EXPRESSION,
    BINARY_OPERATION_EXPRESSION,
    IDENTIFIER_NAME,
    NUMBER_LITERAL_EXPRESSION,
    STRING_LITERAL_EXPRESSION,
    DOUBLE_QUOTED_STRING_LITERAL_EXPRESSION,
    UNQUOTED_STRING_LITERAL_EXPRESSION,
    ARRAY_LITERAL_EXPRESSION,
    CELL_ARRAY_LITERAL_EXPRESSION,
    PARENTHESIZED_EXPRESSION,
    CELL_ARRAY_ELEMENT_ACCESS_EXPRESSION,
    FUNCTION_CALL_EXPRESSION,
    MEMBER_ACCESS_EXPRESSION,
    INDIRECT_MEMBER_ACCESS_EXPRESSION,
    COMMAND_EXPRESSION,
    NAMED_FUNCTION_HANDLE,
    LAMBDA_EXPRESSION,
    COMPOUND_NAME,
    MAGIC_COLON_EXPRESSION,
}

/// Words that open or close blocks. They are lexed as plain identifiers.
pub const KEYWORDS: &[&str] = &[
    "break",
    "case",
    "catch",
    "classdef",
    "continue",
    "else",
    "elseif",
    "end",
    "for",
    "function",
    "if",
    "otherwise",
    "return",
    "switch",
    "try",
    "while",
];

pub fn is_keyword(text: &str) -> bool {
    KEYWORDS.contains(&text)
}

impl SyntaxKind {
    pub const fn is_token(self) -> bool {
        (self as u16) < (Self::LIST as u16)
    }

    pub const fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Source text of punctuation and operator tokens.
    pub const fn fixed_text(self) -> Option<&'static str> {
        Some(match self {
            Self::ASSIGNMENT => "=",
            Self::EQUALITY => "==",
            Self::INEQUALITY => "~=",
            Self::LOGICAL_AND => "&&",
            Self::LOGICAL_OR => "||",
            Self::BITWISE_AND => "&",
            Self::BITWISE_OR => "|",
            Self::LESS => "<",
            Self::LESS_OR_EQUAL => "<=",
            Self::GREATER => ">",
            Self::GREATER_OR_EQUAL => ">=",
            Self::NOT => "~",
            Self::PLUS => "+",
            Self::MINUS => "-",
            Self::MULTIPLY => "*",
            Self::DIVIDE => "/",
            Self::POWER => "^",
            Self::BACKSLASH => "\\",
            Self::TRANSPOSE => "'",
            Self::DOT_MULTIPLY => ".*",
            Self::DOT_DIVIDE => "./",
            Self::DOT_POWER => ".^",
            Self::DOT_BACKSLASH => ".\\",
            Self::DOT_TRANSPOSE => ".'",
            Self::AT => "@",
            Self::COLON => ":",
            Self::QUESTION_MARK => "?",
            Self::COMMA => ",",
            Self::SEMICOLON => ";",
            Self::OPENING_BRACE => "{",
            Self::CLOSING_BRACE => "}",
            Self::OPENING_SQUARE_BRACKET => "[",
            Self::CLOSING_SQUARE_BRACKET => "]",
            Self::OPENING_BRACKET => "(",
            Self::CLOSING_BRACKET => ")",
            Self::DOT => ".",
            _ => return None,
        })
    }

    /// Human-readable name used in "expected ..." messages.
    pub fn describe(self) -> DescribeKind {
        DescribeKind(self)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DescribeKind(SyntaxKind);

impl fmt::Display for DescribeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.0.fixed_text() {
            return write!(f, "'{text}'");
        }
        let name = match self.0 {
            SyntaxKind::IDENTIFIER => "identifier",
            SyntaxKind::NUMBER_LITERAL => "number",
            SyntaxKind::STRING_LITERAL | SyntaxKind::DOUBLE_QUOTED_STRING_LITERAL => "string",
            SyntaxKind::UNQUOTED_STRING_LITERAL => "command argument",
            SyntaxKind::END_OF_FILE => "end of file",
            kind => return write!(f, "{kind:?}"),
        };
        f.write_str(name)
    }
}
