//! Error types surfaced to callers of this crate.
//!
//! The solver's internal algorithms never raise: conflicts and results
//! are values, not exceptions. The only fallible boundary is parsing.

use thiserror::Error;

/// A malformed DIMACS CNF input.
#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("missing DIMACS header line (expected `p cnf <n_vars> <n_clauses>`)")]
    MissingHeader,

    #[error("malformed DIMACS header: {0:?}")]
    MalformedHeader(String),

    #[error("line {line}: invalid literal token {token:?}")]
    InvalidLiteral { line: usize, token: String },
}
