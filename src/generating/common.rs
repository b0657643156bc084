//! Shared helpers for generating rules.

use crate::env::Environment;
use crate::fol::clause::{Clause, Inference, InferenceRule};
use crate::fol::literal::Literal;
use crate::fol::term::AtomNode;
use crate::unification::{unify, Substitution};
use std::sync::Arc;

/// Unify the atoms of two banked literals (predicate and arguments, or both
/// sides of two equalities over the same sort).
pub fn unify_atoms(
    env: &Environment,
    subst: &mut Substitution,
    lit1: &Literal,
    bank1: u32,
    lit2: &Literal,
    bank2: u32,
) -> bool {
    match (env.terms.atom(lit1.atom), env.terms.atom(lit2.atom)) {
        (
            AtomNode::Pred {
                predicate: p1,
                args: args1,
            },
            AtomNode::Pred {
                predicate: p2,
                args: args2,
            },
        ) => {
            if p1 != p2 {
                return false;
            }
            let args1 = args1.clone();
            let args2 = args2.clone();
            let mark = subst.mark();
            for (&a1, &a2) in args1.iter().zip(args2.iter()) {
                if !unify(env, subst, (a1, bank1), (a2, bank2)) {
                    subst.restore(mark);
                    return false;
                }
            }
            true
        }
        (
            AtomNode::Eq {
                sort: s1,
                lhs: l1,
                rhs: r1,
            },
            AtomNode::Eq {
                sort: s2,
                lhs: l2,
                rhs: r2,
            },
        ) => {
            if s1 != s2 {
                return false;
            }
            let (l1, r1, l2, r2) = (*l1, *r1, *l2, *r2);
            let mark = subst.mark();
            if unify(env, subst, (l1, bank1), (l2, bank2))
                && unify(env, subst, (r1, bank1), (r2, bank2))
            {
                true
            } else {
                subst.restore(mark);
                false
            }
        }
        _ => false,
    }
}

/// Binary resolution of `left[left_idx]` against the complementary literal
/// `right[right_idx]`. Premises live in separate banks so their variable
/// namespaces stay disjoint. Returns the resolvent under the stated rule, or
/// None if the atoms do not unify.
pub fn resolve(
    env: &mut Environment,
    left: &Arc<Clause>,
    left_idx: usize,
    right: &Arc<Clause>,
    right_idx: usize,
    rule: InferenceRule,
) -> Option<Clause> {
    let lit_l = left.literals[left_idx];
    let lit_r = right.literals[right_idx];
    if lit_l.polarity == lit_r.polarity {
        return None;
    }

    let mut subst = Substitution::new();
    if !unify_atoms(env, &mut subst, &lit_l, 0, &lit_r, 1) {
        return None;
    }

    let mut literals = Vec::with_capacity(left.len() + right.len() - 2);
    for (j, lit) in left.literals.iter().enumerate() {
        if j != left_idx {
            literals.push(subst.apply_literal(env, lit, 0));
        }
    }
    for (j, lit) in right.literals.iter().enumerate() {
        if j != right_idx {
            literals.push(subst.apply_literal(env, lit, 1));
        }
    }

    Some(Clause::new(
        &env.terms,
        literals,
        Inference::new(rule, vec![left.clone(), right.clone()]),
    ))
}
