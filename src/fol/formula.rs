//! Quantified formulas.
//!
//! Full first-order formulas appear in two places only: the programmatic
//! formula builder and the induction hypotheses before clausification. The
//! clause-level calculus never sees them.

use crate::fol::literal::Literal;
use crate::fol::term::TermBank;
use std::collections::HashSet;

/// A first-order formula over interned literals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    True,
    False,
    /// A (possibly negated) atomic formula
    Atom(Literal),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Not(Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Iff(Box<Formula>, Box<Formula>),
    Xor(Box<Formula>, Box<Formula>),
    Forall(Vec<u32>, Box<Formula>),
    Exists(Vec<u32>, Box<Formula>),
}

impl Formula {
    pub fn not(f: Formula) -> Formula {
        Formula::Not(Box::new(f))
    }

    pub fn implies(lhs: Formula, rhs: Formula) -> Formula {
        Formula::Implies(Box::new(lhs), Box::new(rhs))
    }

    /// Conjunction that collapses the singleton case
    pub fn and(mut conjuncts: Vec<Formula>) -> Formula {
        if conjuncts.len() == 1 {
            conjuncts.pop().expect("len checked")
        } else {
            Formula::And(conjuncts)
        }
    }

    /// Disjunction that collapses the singleton case
    pub fn or(mut disjuncts: Vec<Formula>) -> Formula {
        if disjuncts.len() == 1 {
            disjuncts.pop().expect("len checked")
        } else {
            Formula::Or(disjuncts)
        }
    }

    /// Free variables: variables of the literals minus the quantified ones
    pub fn free_variables(&self, bank: &TermBank) -> HashSet<u32> {
        let mut free = HashSet::new();
        self.collect_free(bank, &mut Vec::new(), &mut free);
        free
    }

    fn collect_free(&self, bank: &TermBank, bound: &mut Vec<u32>, free: &mut HashSet<u32>) {
        match self {
            Formula::True | Formula::False => {}
            Formula::Atom(lit) => {
                let mut vars = HashSet::new();
                bank.atom_variables(lit.atom, &mut vars);
                for v in vars {
                    if !bound.contains(&v) {
                        free.insert(v);
                    }
                }
            }
            Formula::And(fs) | Formula::Or(fs) => {
                for f in fs {
                    f.collect_free(bank, bound, free);
                }
            }
            Formula::Not(f) => f.collect_free(bank, bound, free),
            Formula::Implies(a, b) | Formula::Iff(a, b) | Formula::Xor(a, b) => {
                a.collect_free(bank, bound, free);
                b.collect_free(bank, bound, free);
            }
            Formula::Forall(vars, f) | Formula::Exists(vars, f) => {
                let n = bound.len();
                bound.extend(vars.iter().copied());
                f.collect_free(bank, bound, free);
                bound.truncate(n);
            }
        }
    }

    /// Universal closure over the free variables, in ascending index order
    pub fn quantify(self, bank: &TermBank) -> Formula {
        let mut free: Vec<u32> = self.free_variables(bank).into_iter().collect();
        if free.is_empty() {
            return self;
        }
        free.sort_unstable();
        Formula::Forall(free, Box::new(self))
    }

    /// All variables bound by a quantifier anywhere in the formula
    pub fn bound_variables(&self, out: &mut HashSet<u32>) {
        match self {
            Formula::True | Formula::False | Formula::Atom(_) => {}
            Formula::And(fs) | Formula::Or(fs) => {
                for f in fs {
                    f.bound_variables(out);
                }
            }
            Formula::Not(f) => f.bound_variables(out),
            Formula::Implies(a, b) | Formula::Iff(a, b) | Formula::Xor(a, b) => {
                a.bound_variables(out);
                b.bound_variables(out);
            }
            Formula::Forall(vars, f) | Formula::Exists(vars, f) => {
                out.extend(vars.iter().copied());
                f.bound_variables(out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fol::signature::Signature;
    use crate::fol::sorts::SortTable;

    #[test]
    fn test_free_and_bound_variables() {
        let mut sig = Signature::new();
        let mut bank = TermBank::new();
        let ind = SortTable::INDIVIDUAL;
        let p = sig.add_predicate("p", vec![ind, ind]);

        let x = bank.var(0);
        let y = bank.var(1);
        let atom = bank.pred_atom(p, vec![x, y]);
        let f = Formula::Forall(
            vec![0],
            Box::new(Formula::Atom(Literal::positive(atom))),
        );

        let free = f.free_variables(&bank);
        assert!(free.contains(&1));
        assert!(!free.contains(&0));

        let mut bound = HashSet::new();
        f.bound_variables(&mut bound);
        assert!(bound.contains(&0));
    }

    #[test]
    fn test_universal_closure() {
        let mut sig = Signature::new();
        let mut bank = TermBank::new();
        let ind = SortTable::INDIVIDUAL;
        let p = sig.add_predicate("p", vec![ind]);

        let x = bank.var(7);
        let atom = bank.pred_atom(p, vec![x]);
        let f = Formula::Atom(Literal::positive(atom)).quantify(&bank);

        match f {
            Formula::Forall(vars, _) => assert_eq!(vars, vec![7]),
            other => panic!("expected universal closure, got {:?}", other),
        }
    }
}
