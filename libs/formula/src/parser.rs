//! Formula parser - converts formula strings to a `FormulaTree`
//!
//! Recursive descent over the grammar:
//!
//! ```text
//! formula   := component (SEP component)*
//! component := [NUMBER] item+        -- NUMBER only after SEP
//! item      := ELEMENT [NUMBER] | "(" item+ ")" [NUMBER]
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::ast::{FormulaGroup, FormulaTree};
use crate::elements;
use crate::error::{Error, Result};
use crate::lexer::Lexer;
use crate::token::{Token, TokenType};

/// Default bound on parenthesis nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Parser settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest allowed parenthesis nesting.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parser for formula strings
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    recursion_depth: usize,
    max_depth: usize,
}

impl Parser {
    /// Create a new parser with default options
    pub fn new(input: &str) -> Result<Self> {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &str, options: ParseOptions) -> Result<Self> {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token()?;
        Ok(Self {
            lexer,
            current_token,
            recursion_depth: 0,
            max_depth: options.max_depth,
        })
    }

    /// Advance to the next token
    fn advance(&mut self) -> Result<()> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    /// Check if current token matches the given type
    fn current_token_is(&self, token_type: TokenType) -> bool {
        self.current_token.token_type == token_type
    }

    fn unexpected(&self) -> Error {
        let token = &self.current_token;
        match token.token_type {
            TokenType::Eof => Error::lexical(token.position, "unexpected end of formula"),
            _ => Error::lexical(token.position, format!("unexpected '{}'", token.value)),
        }
    }

    /// Parse the entire formula (top-level entry point)
    pub fn parse(&mut self) -> Result<FormulaTree> {
        let mut components = vec![self.parse_component(false)?];

        while self.current_token_is(TokenType::HydrateDot) {
            self.advance()?;
            components.push(self.parse_component(true)?);
        }

        // Ensure we've consumed all input
        match self.current_token.token_type {
            TokenType::Eof => Ok(FormulaTree { components }),
            TokenType::CloseParen => Err(Error::UnbalancedGroup {
                pos: self.current_token.position,
            }),
            _ => Err(self.unexpected()),
        }
    }

    /// Check recursion depth and increment
    fn check_recursion_depth(&mut self) -> Result<()> {
        self.recursion_depth += 1;
        if self.recursion_depth > self.max_depth {
            return Err(Error::RecursionLimit {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    /// Decrement recursion depth
    fn decrement_recursion_depth(&mut self) {
        self.recursion_depth -= 1;
    }

    /// Parse one additive component; hydrate components may carry a
    /// leading coefficient.
    fn parse_component(&mut self, allow_coefficient: bool) -> Result<FormulaGroup> {
        let position = self.current_token.position;

        let amount = if self.current_token_is(TokenType::Number) {
            if !allow_coefficient {
                return Err(Error::lexical(
                    position,
                    "formula cannot start with a coefficient",
                ));
            }
            self.parse_amount()?
        } else {
            Decimal::ONE
        };

        let children = self.parse_sequence()?;
        if children.is_empty() {
            return Err(match self.current_token.token_type {
                TokenType::CloseParen => Error::UnbalancedGroup {
                    pos: self.current_token.position,
                },
                TokenType::Eof => Error::lexical(position, "expected an element or group"),
                _ => self.unexpected(),
            });
        }

        Ok(FormulaGroup::Group { children, amount })
    }

    /// Parse elements and groups until something else shows up
    fn parse_sequence(&mut self) -> Result<Vec<FormulaGroup>> {
        let mut items = Vec::new();
        loop {
            match self.current_token.token_type {
                TokenType::Element => items.push(self.parse_element()?),
                TokenType::OpenParen => items.push(self.parse_group()?),
                _ => return Ok(items),
            }
        }
    }

    fn parse_element(&mut self) -> Result<FormulaGroup> {
        let Some(symbol) = elements::lookup(&self.current_token.value) else {
            return Err(Error::lexical(
                self.current_token.position,
                format!("unknown element symbol '{}'", self.current_token.value),
            ));
        };
        self.advance()?;

        let amount = self.parse_optional_amount()?;
        Ok(FormulaGroup::Element { symbol, amount })
    }

    /// Parse a parenthesized group and its multiplier
    fn parse_group(&mut self) -> Result<FormulaGroup> {
        let open_pos = self.current_token.position;
        self.check_recursion_depth()?;
        self.advance()?; // Skip '('

        let children = self.parse_sequence()?;
        match self.current_token.token_type {
            TokenType::CloseParen => {}
            TokenType::Eof => return Err(Error::UnbalancedGroup { pos: open_pos }),
            _ => return Err(self.unexpected()),
        }
        if children.is_empty() {
            return Err(Error::lexical(open_pos, "empty group"));
        }
        self.advance()?; // Skip ')'

        let amount = self.parse_optional_amount()?;
        self.decrement_recursion_depth();

        Ok(FormulaGroup::Group { children, amount })
    }

    fn parse_optional_amount(&mut self) -> Result<Decimal> {
        if self.current_token_is(TokenType::Number) {
            self.parse_amount()
        } else {
            Ok(Decimal::ONE)
        }
    }

    fn parse_amount(&mut self) -> Result<Decimal> {
        let token = &self.current_token;
        let amount = Decimal::from_str(&token.value).map_err(|_| {
            Error::lexical(
                token.position,
                format!("amount '{}' is out of range", token.value),
            )
        })?;
        self.advance()?;
        Ok(amount)
    }
}
