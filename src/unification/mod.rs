//! Unification, matching, and backtrackable substitutions.

pub mod matching;
pub mod substitution;
pub mod unify;


pub use matching::{match_literal_into, match_term, match_term_into};
pub use substitution::{BankedTerm, BankedVar, Mark, OccursCheck, Substitution};
pub use unify::{equal_under, unify, unify_terms, unify_with_abstraction, Constraint};
