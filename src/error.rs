//! Error type for song validation and symbol table construction.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    /// A song record is missing a field the analysis needs.
    #[error("Invalid input: song {id} is missing `{field}`")]
    InvalidInput { id: i64, field: &'static str },
    /// A record in the lyrics document has the wrong shape (e.g. a numeric title).
    #[error("Invalid record #{position}: {message}")]
    InvalidRecord { position: usize, message: String },
    #[error("Invalid symbol table: {0}")]
    InvalidSymbolTable(String),
}
