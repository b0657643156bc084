//! The inference environment.
//!
//! One [`Environment`] bundles the process-wide state every rule operates on:
//! sort table, signature, term bank, options, statistics sink and resource
//! limits. It is constructed once before any rule runs and passed explicitly
//! to every rule entry point; tests create as many independent environments
//! as they need within one process.

use crate::config::InferenceConfig;
use crate::fol::literal::Literal;
use crate::fol::signature::{FunctionId, PredicateId, Signature};
use crate::fol::sorts::{SortId, SortTable, TaConstructor, TermAlgebra};
use crate::fol::term::{TermBank, TermId};
use crate::fol::theory::Interpretation;
use num::{BigInt, BigRational};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Counters published by the inference rules.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Statistics {
    pub equality_resolutions: usize,
    pub blocked_by_aftercheck: usize,
    pub gaussian_eliminations: usize,
    pub distinct_equality_removals: usize,
    pub evaluations: usize,
    pub induction_applications: usize,
    pub generalized_induction_applications: usize,
    pub subsumption_checks: usize,
    pub subsumed: usize,
}

impl Statistics {
    /// JSON view for the embedding tool's reporting
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Cooperative resource limits. The embedding loop sets the abort flag; rules
/// observe it between top-level iterations and at subsumption backtrack
/// points, and publish no partial results once it is raised.
#[derive(Debug, Default)]
pub struct Limits {
    abort: AtomicBool,
}

impl Limits {
    pub fn request_abort(&self) {
        self.abort.store(true, Ordering::Relaxed);
    }

    pub fn aborted(&self) -> bool {
        self.abort.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.abort.store(false, Ordering::Relaxed);
    }
}

/// Process-wide state of one prover run
#[derive(Debug)]
pub struct Environment {
    pub sorts: SortTable,
    pub signature: Signature,
    pub terms: TermBank,
    pub options: InferenceConfig,
    pub statistics: Statistics,
    pub limits: Limits,
}

impl Environment {
    pub fn new(options: InferenceConfig) -> Self {
        Environment {
            sorts: SortTable::new(),
            signature: Signature::new(),
            terms: TermBank::new(),
            options,
            statistics: Statistics::default(),
            limits: Limits::default(),
        }
    }

    pub fn with_default_options() -> Self {
        Environment::new(InferenceConfig::default())
    }

    // === Term construction (splitting the borrow between bank and signature) ===

    pub fn var(&mut self, index: u32) -> TermId {
        self.terms.var(index)
    }

    pub fn app(&mut self, symbol: FunctionId, args: Vec<TermId>) -> TermId {
        self.terms.app(&self.signature, symbol, args)
    }

    pub fn constant(&mut self, symbol: FunctionId) -> TermId {
        self.terms.constant(&self.signature, symbol)
    }

    /// Application of the symbol interpreting `interp`
    pub fn interpreted_app(&mut self, interp: Interpretation, args: Vec<TermId>) -> TermId {
        let f = self.signature.interpreting_function(interp);
        self.app(f, args)
    }

    /// The interned integer numeral term
    pub fn int_numeral(&mut self, value: BigInt) -> TermId {
        self.interpreted_app(Interpretation::IntNumeral(value), vec![])
    }

    /// The interned rational numeral term
    pub fn rat_numeral(&mut self, value: BigRational) -> TermId {
        self.interpreted_app(Interpretation::RatNumeral(value), vec![])
    }

    /// The interned real numeral term (reals are exact rationals)
    pub fn real_numeral(&mut self, value: BigRational) -> TermId {
        self.interpreted_app(Interpretation::RealNumeral(value), vec![])
    }

    // === Literal construction ===

    pub fn literal(&mut self, predicate: PredicateId, args: Vec<TermId>, polarity: bool) -> Literal {
        let atom = self.terms.pred_atom(predicate, args);
        Literal { atom, polarity }
    }

    /// Equality literal with the argument order preserved
    pub fn equality(&mut self, sort: SortId, polarity: bool, lhs: TermId, rhs: TermId) -> Literal {
        let atom = self.terms.eq_atom(sort, lhs, rhs);
        Literal { atom, polarity }
    }

    /// Equality literal in canonical orientation
    pub fn equality_oriented(
        &mut self,
        sort: SortId,
        polarity: bool,
        lhs: TermId,
        rhs: TermId,
    ) -> Literal {
        let atom = self.terms.eq_atom_oriented(sort, lhs, rhs);
        Literal { atom, polarity }
    }

    // === Declarations ===

    /// Declare a term-algebra sort from already-interned constructor symbols.
    /// Destructor symbols are created here, one per constructor argument, and
    /// the constructors are flagged in the signature.
    pub fn declare_term_algebra(&mut self, sort: SortId, constructors: &[FunctionId]) {
        let mut records = Vec::with_capacity(constructors.len());
        for &con in constructors {
            let (name, arg_sorts) = {
                let f = self.signature.function(con);
                (f.name.clone(), f.arg_sorts.clone())
            };
            self.signature.function_mut(con).ta_constructor = true;
            let destructors = arg_sorts
                .iter()
                .enumerate()
                .map(|(j, &arg_sort)| {
                    self.signature
                        .add_function(&format!("{}_{}", name, j), vec![sort], arg_sort)
                })
                .collect();
            records.push(TaConstructor {
                functor: con,
                arg_sorts,
                destructors,
            });
        }
        self.sorts.set_term_algebra(
            sort,
            TermAlgebra {
                constructors: records,
            },
        );
    }

    // === Theory queries ===

    /// Interpretation of the head symbol of a term, Uninterpreted for
    /// variables and user symbols.
    pub fn head_interpretation(&self, t: TermId) -> &Interpretation {
        match self.terms.symbol(t) {
            Some(f) => &self.signature.function(f).interpretation,
            None => &Interpretation::Uninterpreted,
        }
    }

    /// True if the term is an application with an interpreted head symbol
    /// (a theory operator or a numeral).
    pub fn is_theory_term(&self, t: TermId) -> bool {
        !self.head_interpretation(t).is_uninterpreted()
    }

    /// The exact value of an integer numeral term
    pub fn as_int_numeral(&self, t: TermId) -> Option<&BigInt> {
        match self.head_interpretation(t) {
            Interpretation::IntNumeral(n) => Some(n),
            _ => None,
        }
    }

    /// The exact value of a rational or real numeral term
    pub fn as_fraction_numeral(&self, t: TermId) -> Option<&BigRational> {
        match self.head_interpretation(t) {
            Interpretation::RatNumeral(r) | Interpretation::RealNumeral(r) => Some(r),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_independent_environments() {
        let mut env1 = Environment::with_default_options();
        let mut env2 = Environment::with_default_options();

        let a1 = env1
            .signature
            .add_function("a", vec![], SortTable::INDIVIDUAL);
        let b2 = env2
            .signature
            .add_function("b", vec![], SortTable::INDIVIDUAL);

        // IDs are environment-local
        assert_eq!(a1.as_u32(), b2.as_u32());
        assert_eq!(env1.signature.function(a1).name, "a");
        assert_eq!(env2.signature.function(b2).name, "b");
    }

    #[test]
    fn test_numerals() {
        let mut env = Environment::with_default_options();
        let five = env.int_numeral(BigInt::from(5));
        let five2 = env.int_numeral(BigInt::from(5));
        assert_eq!(five, five2);
        assert_eq!(env.as_int_numeral(five), Some(&BigInt::from(5)));
        assert!(env.is_theory_term(five));
        assert_eq!(env.terms.sort(five), Some(SortTable::INTEGER));
    }

    #[test]
    fn test_term_algebra_declaration() {
        let mut env = Environment::with_default_options();
        let list = env.sorts.declare("list");
        let ind = SortTable::INDIVIDUAL;
        let nil = env.signature.add_function("nil", vec![], list);
        let cons = env.signature.add_function("cons", vec![ind, list], list);

        env.declare_term_algebra(list, &[nil, cons]);

        assert!(env.signature.function(cons).ta_constructor);
        let ta = env.sorts.term_algebra(list).expect("declared");
        assert_eq!(ta.constructors.len(), 2);
        assert!(ta.constructors[1].recursive(list));
        assert!(!ta.constructors[0].recursive(list));
        assert_eq!(ta.constructors[1].destructors.len(), 2);

        // destructors project back to the argument sorts
        let head = ta.constructors[1].destructors[0];
        assert_eq!(env.signature.function(head).result_sort, ind);
        let tail = ta.constructors[1].destructors[1];
        assert_eq!(env.signature.function(tail).result_sort, list);
    }

    #[test]
    fn test_abort_flag() {
        let env = Environment::with_default_options();
        assert!(!env.limits.aborted());
        env.limits.request_abort();
        assert!(env.limits.aborted());
        env.limits.reset();
        assert!(!env.limits.aborted());
    }
}
