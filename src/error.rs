//! Crate-level error surface
//!
//! Exactly two structural error kinds exist: [`LexError`] for unrecognized
//! character sequences and unterminated literals, and [`ParseError`] for
//! grammar violations. Both abort translation of the current compilation
//! unit; there is no recovery. [`AnalyzerError`] folds them together with
//! I/O failures for the library API and the batch driver.

use thiserror::Error;

pub use crate::parser::lexer::LexError;
pub use crate::parser::parse::ParseError;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
