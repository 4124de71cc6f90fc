//! Token types for the formula lexer

/// Token types for the formula lexer
#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum TokenType {
    /// A single element symbol (`Fe`, `O`)
    Element,
    /// An integer or decimal amount (`2`, `0.5`)
    Number,
    OpenParen,  // (
    CloseParen, // )
    /// Additive separator: `·`, `•`, `∙`, `⋅` or a hydrate `.`
    HydrateDot,
    Eof,
}

/// A token in a formula string
///
/// `position` is the character offset of the token's first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    pub value: String,
    pub position: usize,
}

impl Token {
    pub fn new(token_type: TokenType, value: impl Into<String>, position: usize) -> Self {
        Self {
            token_type,
            value: value.into(),
            position,
        }
    }

    pub fn eof(position: usize) -> Self {
        Self::new(TokenType::Eof, String::new(), position)
    }
}
