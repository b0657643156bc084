//! Construction-site errors.
//!
//! Rule application never surfaces errors through these types: a rule that
//! cannot apply returns no output. The errors here are raised synchronously
//! when a client misuses the formula builder or the signature, and the
//! offending construction must be abandoned.

use thiserror::Error;

/// Errors raised while building formulas programmatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    /// Function and predicate names must start with a lowercase character,
    /// variable names with an uppercase character (TPTP conventions).
    #[error("{kind} name must start with a {expected} character: '{name}'")]
    InvalidName {
        kind: &'static str,
        expected: &'static str,
        name: String,
    },

    /// A term or formula built by one builder was passed to another.
    #[error("expression was built by a different builder instance")]
    ForeignExpression,

    /// Quantifying over a variable that is already bound in the body.
    #[error("attempt to bind a variable that is already bound: '{0}'")]
    VariableAlreadyBound(String),

    /// A symbol was applied to the wrong number of arguments.
    #[error("arity mismatch for '{name}': declared {declared}, applied to {applied}")]
    ArityMismatch {
        name: String,
        declared: usize,
        applied: usize,
    },
}

pub type BuilderResult<T> = Result<T, BuilderError>;
