//! Distinct-equality simplification.
//!
//! Constants declared in a shared distinct group are semantically unequal.
//! A positive equality between two such constants is identically false and
//! is dropped; a negative one is identically true, making the whole clause
//! redundant. Premise units of the groups consulted are recorded in the
//! inference of the shortened clause.

use super::{Simplified, SimplifyingRule};
use crate::env::Environment;
use crate::fol::clause::{Clause, Inference, InferenceRule};
use crate::fol::term::TermId;
use std::sync::Arc;

/// Distinct-equality simplification as a simplifying rule
#[derive(Debug, Default)]
pub struct DistinctEqualityRule;

impl DistinctEqualityRule {
    pub fn new() -> Self {
        DistinctEqualityRule
    }
}

/// The distinct group forcing `t1` and `t2` apart, if any. Only equalities
/// between two arity-0 constants can be distinct by declaration.
fn must_be_distinct(env: &Environment, t1: TermId, t2: TermId) -> Option<usize> {
    let f1 = env.terms.symbol(t1)?;
    let f2 = env.terms.symbol(t2)?;
    if env.signature.function(f1).arity != 0 || env.signature.function(f2).arity != 0 {
        return None;
    }
    env.signature.common_distinct_group(f1, f2)
}

fn can_simplify(env: &Environment, clause: &Clause) -> bool {
    clause.literals.iter().any(|lit| {
        lit.as_equality(&env.terms)
            .map(|(_, lhs, rhs)| must_be_distinct(env, lhs, rhs).is_some())
            .unwrap_or(false)
    })
}

impl SimplifyingRule for DistinctEqualityRule {
    fn name(&self) -> &'static str {
        "DistinctEqualityRemoval"
    }

    fn simplify(&mut self, clause: &Arc<Clause>, env: &mut Environment) -> Simplified {
        if !can_simplify(env, clause) {
            return Simplified::Unchanged;
        }

        let mut literals = Vec::with_capacity(clause.len());
        let mut premises = Vec::new();
        for lit in &clause.literals {
            let group = lit
                .as_equality(&env.terms)
                .and_then(|(_, lhs, rhs)| must_be_distinct(env, lhs, rhs));
            let Some(group) = group else {
                literals.push(*lit);
                continue;
            };
            if lit.is_negative() {
                // implied by the distinctness constraint: the clause is
                // a consequence of the group and carries no information
                env.statistics.distinct_equality_removals += 1;
                return Simplified::Redundant;
            }
            // a false literal, drop it and remember the group's premise
            if let Some(premise) = env.signature.distinct_group_premise(group) {
                if !premises.iter().any(|p| Arc::ptr_eq(p, premise)) {
                    premises.push(premise.clone());
                }
            }
        }

        debug_assert!(literals.len() < clause.len());
        let mut parents = vec![clause.clone()];
        parents.extend(premises);
        env.statistics.distinct_equality_removals += 1;
        Simplified::Replaced(Arc::new(Clause::new(
            &env.terms,
            literals,
            Inference::new(InferenceRule::DistinctEqualityRemoval, parents),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fol::clause::ClauseRole;
    use crate::fol::sorts::SortTable;

    fn distinct_env() -> (Environment, TermId, TermId) {
        let mut env = Environment::with_default_options();
        let ind = SortTable::INDIVIDUAL;
        let a = env.signature.add_function("a", vec![], ind);
        let b = env.signature.add_function("b", vec![], ind);
        env.signature.add_distinct_group(vec![a, b], None);
        let ta = env.constant(a);
        let tb = env.constant(b);
        (env, ta, tb)
    }

    #[test]
    fn test_positive_distinct_equality_is_dropped() {
        let (mut env, ta, tb) = distinct_env();
        let ind = SortTable::INDIVIDUAL;
        let r = env.signature.add_predicate("r", vec![ind]);
        let x = env.var(0);

        // a = b ∨ r(x)  ⇒  r(x)
        let eq = env.equality(ind, true, ta, tb);
        let rx = env.literal(r, vec![x], true);
        let clause = Arc::new(Clause::input(&env.terms, vec![eq, rx], ClauseRole::Axiom));

        let mut rule = DistinctEqualityRule::new();
        match rule.simplify(&clause, &mut env) {
            Simplified::Replaced(out) => {
                assert_eq!(out.literals, vec![rx]);
                assert_eq!(out.inference.rule, InferenceRule::DistinctEqualityRemoval);
            }
            other => panic!("expected replacement, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_distinct_equality_discards_clause() {
        let (mut env, ta, tb) = distinct_env();
        let ind = SortTable::INDIVIDUAL;

        // a != b is implied by the group: the whole clause is redundant
        let diseq = env.equality(ind, false, ta, tb);
        let clause = Arc::new(Clause::input(&env.terms, vec![diseq], ClauseRole::Axiom));

        let mut rule = DistinctEqualityRule::new();
        assert!(matches!(
            rule.simplify(&clause, &mut env),
            Simplified::Redundant
        ));
    }

    #[test]
    fn test_premise_unit_is_recorded() {
        let mut env = Environment::with_default_options();
        let ind = SortTable::INDIVIDUAL;
        let a = env.signature.add_function("a", vec![], ind);
        let b = env.signature.add_function("b", vec![], ind);
        let ta = env.constant(a);
        let tb = env.constant(b);

        let diseq = env.equality(ind, false, ta, tb);
        let premise_unit = Arc::new(Clause::input(&env.terms, vec![diseq], ClauseRole::Axiom));
        env.signature
            .add_distinct_group(vec![a, b], Some(premise_unit.clone()));

        let eq = env.equality(ind, true, ta, tb);
        let clause = Arc::new(Clause::input(&env.terms, vec![eq], ClauseRole::Axiom));

        let mut rule = DistinctEqualityRule::new();
        match rule.simplify(&clause, &mut env) {
            Simplified::Replaced(out) => {
                assert!(out.is_empty());
                assert_eq!(out.inference.parents.len(), 2);
                assert!(Arc::ptr_eq(&out.inference.parents[1], &premise_unit));
            }
            other => panic!("expected replacement, got {:?}", other),
        }
    }

    #[test]
    fn test_unrelated_constants_untouched() {
        let (mut env, ta, _) = distinct_env();
        let ind = SortTable::INDIVIDUAL;
        let c = env.signature.add_function("c", vec![], ind);
        let tc = env.constant(c);

        // c shares no group with a
        let eq = env.equality(ind, true, ta, tc);
        let clause = Arc::new(Clause::input(&env.terms, vec![eq], ClauseRole::Axiom));

        let mut rule = DistinctEqualityRule::new();
        assert!(rule.simplify(&clause, &mut env).is_unchanged());
    }

    #[test]
    fn test_never_lengthens_clause() {
        let (mut env, ta, tb) = distinct_env();
        let ind = SortTable::INDIVIDUAL;
        let r = env.signature.add_predicate("r", vec![ind]);

        let eq = env.equality(ind, true, ta, tb);
        let ra = env.literal(r, vec![ta], true);
        let clause = Arc::new(Clause::input(&env.terms, vec![eq, ra, eq], ClauseRole::Axiom));

        let mut rule = DistinctEqualityRule::new();
        match rule.simplify(&clause, &mut env) {
            Simplified::Replaced(out) => assert!(out.len() < clause.len()),
            other => panic!("expected replacement, got {:?}", other),
        }
    }
}
