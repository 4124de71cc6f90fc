//! Formula lexer - tokenizes formula strings
//!
//! Converts a formula such as `CuSO4·5H2O` into element, number, parenthesis
//! and hydrate-separator tokens. Runs of letters are split into element
//! symbols here, so the parser only ever sees valid symbols.

use std::collections::VecDeque;

use crate::elements;
use crate::error::{Error, Result};
use crate::token::{Token, TokenType};

/// Characters that always separate an additive (hydrate) component.
pub const HYDRATE_SEPARATORS: [char; 4] = ['·', '•', '∙', '⋅'];

/// The formula lexer
pub struct Lexer {
    position: usize,
    chars: Vec<char>,
    current_char: Option<char>,
    /// Element tokens already split out of a letter run
    pending: VecDeque<Token>,
    /// Whether the last emitted token was a hydrate separator
    after_separator: bool,
}

impl Lexer {
    /// Create a new lexer for the given input
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let current_char = chars.first().copied();

        Self {
            position: 0,
            chars,
            current_char,
            pending: VecDeque::new(),
            after_separator: false,
        }
    }

    /// Advance to the next character
    fn advance(&mut self) {
        self.position += 1;
        self.current_char = self.chars.get(self.position).copied();
    }

    /// Peek at the next character without advancing
    fn peek(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }

    fn skip_digits(&mut self) {
        while let Some(c) = self.current_char {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Read an integer or decimal amount.
    ///
    /// A `.` between digits is a decimal point unless the rest of the input
    /// reads as a water of hydration (`4.5H2O`), in which case the dot is
    /// left for the next token. The leading coefficient of a hydrate
    /// component (`·0.5H2O`) and a zero integer part (`Na0.5H2O`) are always
    /// read as decimals.
    fn read_number(&mut self) -> Token {
        let start_pos = self.position;
        self.skip_digits();
        let zero_integer = self.chars[start_pos..self.position].iter().all(|c| *c == '0');

        if self.current_char == Some('.')
            && self.peek().is_some_and(|c| c.is_ascii_digit())
            && (self.after_separator
                || zero_integer
                || !is_water_tail(&self.chars[self.position + 1..]))
        {
            self.advance(); // Skip '.'
            self.skip_digits();
        }

        let value: String = self.chars[start_pos..self.position].iter().collect();
        Token::new(TokenType::Number, value, start_pos)
    }

    /// Read a run of letters and split it into element tokens.
    fn read_elements(&mut self) -> Result<Token> {
        let start_pos = self.position;
        while let Some(c) = self.current_char {
            if c.is_ascii_alphabetic() {
                self.advance();
            } else {
                break;
            }
        }

        let run = &self.chars[start_pos..self.position];
        let Some(symbols) = split_symbols(run) else {
            let text: String = run.iter().collect();
            let single_symbol_shape = run.iter().skip(1).all(|c| c.is_ascii_lowercase());
            return Err(if single_symbol_shape {
                Error::lexical(start_pos, format!("unknown element symbol '{text}'"))
            } else {
                Error::AmbiguousElement {
                    pos: start_pos,
                    run: text,
                }
            });
        };

        let mut offset = start_pos;
        for symbol in symbols {
            self.pending
                .push_back(Token::new(TokenType::Element, symbol, offset));
            offset += symbol.len();
        }

        self.pending
            .pop_front()
            .ok_or_else(|| Error::lexical(start_pos, "empty element run"))
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Result<Token> {
        let token = match self.pending.pop_front() {
            Some(token) => token,
            None => self.scan_token()?,
        };
        self.after_separator = token.token_type == TokenType::HydrateDot;
        Ok(token)
    }

    fn scan_token(&mut self) -> Result<Token> {
        let position = self.position;
        let Some(c) = self.current_char else {
            return Ok(Token::eof(position));
        };

        match c {
            '(' => {
                self.advance();
                Ok(Token::new(TokenType::OpenParen, "(", position))
            }
            ')' => {
                self.advance();
                Ok(Token::new(TokenType::CloseParen, ")", position))
            }
            // A dot outside a number always separates a hydrate component
            '.' => {
                self.advance();
                Ok(Token::new(TokenType::HydrateDot, ".", position))
            }
            c if HYDRATE_SEPARATORS.contains(&c) => {
                self.advance();
                Ok(Token::new(TokenType::HydrateDot, c.to_string(), position))
            }
            c if c.is_ascii_digit() => Ok(self.read_number()),
            c if c.is_ascii_alphabetic() => self.read_elements(),
            c if c.is_whitespace() => Err(Error::lexical(
                position,
                "whitespace is not allowed in a formula",
            )),
            other => Err(Error::lexical(
                position,
                format!("unexpected character '{other}'"),
            )),
        }
    }

    /// Tokenize the whole input, including the trailing `Eof` token
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.token_type == TokenType::Eof;
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }
}

/// True when `rest` (the input after a `.`) is `<coefficient>H2O`.
fn is_water_tail(rest: &[char]) -> bool {
    let digits = |s: &[char]| s.iter().take_while(|c| c.is_ascii_digit()).count();

    let mut i = digits(rest);
    if rest.get(i) == Some(&'.') {
        let fraction = digits(&rest[i + 1..]);
        if fraction == 0 {
            return false;
        }
        i += 1 + fraction;
    }
    rest[i..].iter().copied().eq("H2O".chars())
}

fn symbol_at(run: &[char], offset: usize, width: usize) -> Option<&'static str> {
    let candidate: String = run.get(offset..offset + width)?.iter().collect();
    elements::lookup(&candidate)
}

/// Split a letter run into element symbols.
///
/// Two-letter symbols are tried first; when the remainder of the run cannot
/// be split, the last accepted symbol is rolled back and retried one letter
/// shorter.
fn split_symbols(run: &[char]) -> Option<Vec<&'static str>> {
    let mut accepted: Vec<(usize, usize, &'static str)> = Vec::new();
    let mut offset = 0;
    let mut max_width = 2;

    while offset < run.len() {
        let next = (1..=max_width)
            .rev()
            .find_map(|width| symbol_at(run, offset, width).map(|s| (width, s)));
        match next {
            Some((width, symbol)) => {
                accepted.push((offset, width, symbol));
                offset += width;
                max_width = 2;
            }
            None => {
                let (prev_offset, prev_width, _) = accepted.pop()?;
                offset = prev_offset;
                max_width = prev_width - 1;
            }
        }
    }

    Some(accepted.into_iter().map(|(_, _, symbol)| symbol).collect())
}
