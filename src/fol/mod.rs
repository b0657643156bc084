//! First-order logic data model: sorts, signature, shared terms, literals,
//! clauses, formulas, clausification and the simplification ordering.

pub mod clause;
pub mod cnf;
pub mod formula;
pub mod literal;
pub mod ordering;
pub mod signature;
pub mod sorts;
pub mod term;
pub mod theory;

pub use clause::{Clause, ClauseRole, Inference, InferenceRule};
pub use cnf::clausify;
pub use formula::Formula;
pub use literal::Literal;
pub use ordering::{literal_greater, KBOConfig, TermOrdering, KBO};
pub use signature::{Color, FunctionId, PredicateId, Signature};
pub use sorts::{SortId, SortKind, SortTable, TaConstructor, TermAlgebra};
pub use term::{AtomId, AtomNode, SubtermIter, TermBank, TermId, TermNode};
pub use theory::Interpretation;
