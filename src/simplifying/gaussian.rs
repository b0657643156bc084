//! Gaussian variable elimination.
//!
//! Scans the negative equalities of a clause for a rebalancing `x != u` with
//! `x` not occurring in `u`. When one is found, `x` is replaced by `u` in
//! every other literal and the disequality is dropped. One step per call;
//! the enclosing simplification loop re-invokes to a fixed point.

use super::rebalance::rebalancings;
use super::{Simplified, SimplifyingRule};
use crate::env::Environment;
use crate::fol::clause::{Clause, Inference, InferenceRule};
use crate::fol::literal::Literal;
use std::sync::Arc;

/// Gaussian variable elimination as a simplifying rule
#[derive(Debug, Default)]
pub struct GaussianVariableEliminationRule;

impl GaussianVariableEliminationRule {
    pub fn new() -> Self {
        GaussianVariableEliminationRule
    }
}

impl SimplifyingRule for GaussianVariableEliminationRule {
    fn name(&self) -> &'static str {
        "GaussianVariableElimination"
    }

    fn simplify(&mut self, clause: &Arc<Clause>, env: &mut Environment) -> Simplified {
        for (i, lit) in clause.literals.iter().enumerate() {
            if lit.is_positive() {
                continue;
            }
            let Some((_, lhs, rhs)) = lit.as_equality(&env.terms) else {
                continue;
            };
            for balanced in rebalancings(env, lhs, rhs) {
                if env.terms.contains_subterm(balanced.rhs, balanced.var) {
                    continue;
                }
                let rewritten = rewrite(env, clause, i, balanced.var, balanced.rhs);
                env.statistics.gaussian_eliminations += 1;
                return Simplified::Replaced(Arc::new(rewritten));
            }
        }
        Simplified::Unchanged
    }
}

/// Drop the literal at `skip` and replace `find` by `by` everywhere else
fn rewrite(
    env: &mut Environment,
    clause: &Arc<Clause>,
    skip: usize,
    find: crate::fol::term::TermId,
    by: crate::fol::term::TermId,
) -> Clause {
    let mut literals = Vec::with_capacity(clause.len() - 1);
    for (j, lit) in clause.literals.iter().enumerate() {
        if j == skip {
            continue;
        }
        let atom = env
            .terms
            .replace_in_atom(&env.signature, lit.atom, find, by);
        literals.push(Literal {
            atom,
            polarity: lit.polarity,
        });
    }
    Clause::new(
        &env.terms,
        literals,
        Inference::new(
            InferenceRule::GaussianVariableElimination,
            vec![clause.clone()],
        ),
    )
}
