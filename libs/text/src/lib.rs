//! Text preparation around chemical formulas: sentence token normalization
//! for embedding corpora, formula mention counts and search filters.

#![forbid(unsafe_code)]

mod counts;
mod filter;
mod sentence;
mod units;

pub use counts::MaterialCounts;
pub use filter::MaterialFilter;
pub use sentence::{deaccent, is_number, SentenceProcessor, NUMBER_TOKEN};
pub use units::is_unit;
