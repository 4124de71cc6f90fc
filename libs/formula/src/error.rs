//! Error types for formula parsing

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Formula parsing errors
///
/// Positions are character offsets into the input string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid formula at position {pos}: {message}")]
    Lexical { pos: usize, message: String },

    #[error("unbalanced parenthesis at position {pos}")]
    UnbalancedGroup { pos: usize },

    #[error("'{run}' at position {pos} cannot be read as a sequence of element symbols")]
    AmbiguousElement { pos: usize, run: String },

    #[error("formula nested too deeply (max depth: {limit})")]
    RecursionLimit { limit: usize },

    #[error("element amounts exceed the representable range")]
    AmountOverflow,

    /// Rejected `(symbol, amount)` input when building a composition directly.
    #[error("invalid composition: {message}")]
    InvalidComposition { message: String },
}

impl Error {
    pub(crate) fn lexical(pos: usize, message: impl Into<String>) -> Self {
        Error::Lexical {
            pos,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_composition(message: impl Into<String>) -> Self {
        Error::InvalidComposition {
            message: message.into(),
        }
    }
}
