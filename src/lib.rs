//! Wyvern: the inference core of a saturation-based first-order theorem
//! prover.
//!
//! The crate provides the calculus rules a saturation loop drives: shared
//! terms and clauses, unification and backtrackable substitutions, literal
//! selection, equality resolution, structural and mathematical induction
//! axiom generation, arithmetic simplification (Gaussian variable
//! elimination, distinct-equality removal, interpreted evaluation), and the
//! subsumption decision procedure used by forward/backward simplification.
//!
//! The outer loop, input parsing and proof output live elsewhere; they reach
//! the core through [`saturation::InferencePipeline`], the clause stream
//! traits in [`generating`] and [`simplifying`], and the [`builder`] API for
//! programmatic problem construction.

pub mod axioms;
pub mod builder;
pub mod config;
pub mod env;
pub mod error;
pub mod fol;
pub mod generating;
pub mod saturation;
pub mod selection;
pub mod simplifying;
pub mod unification;

// Re-export the commonly used types

pub use config::{
    AbstractionPolicy, EqualityProxyMode, InductionChoice, InductionMode, InferenceConfig,
    LiteralSelectionStrategy, MathInductionScheme, StructuralInductionScheme,
};

pub use env::{Environment, Limits, Statistics};

pub use fol::{
    Clause, ClauseRole, Color, Formula, FunctionId, Inference, InferenceRule, Interpretation,
    Literal, PredicateId, Signature, SortId, SortTable, TermBank, TermId, TermOrdering, KBO,
    KBOConfig,
};

pub use error::{BuilderError, BuilderResult};

pub use generating::{
    equality_resolution, ClauseStream, EqualityResolutionRule, GeneratingRule, InductionRule,
};

pub use simplifying::{
    DistinctEqualityRule, GaussianVariableEliminationRule, InterpretedEvaluationRule, Simplified,
    SimplifyingRule,
};

pub use saturation::{subsumes, subsumes_with_witness, InferencePipeline};

pub use selection::{
    apply_selection, selector_for, LiteralSelector, SelectAll, SelectMaximal,
    SelectNegMaxWeightOrMaximal, SelectUniqueMaximalOrNegOrMaximal,
};

pub use unification::{match_term, unify, unify_with_abstraction, Substitution};

pub use builder::{AnnotatedFormula, Annotation, Connective, FormulaBuilder, Quantifier};

pub use axioms::equality_proxy_axioms;
