//! Equality resolution.
//!
//! From a selected negative equality `s != t` whose sides unify with σ,
//! derive `(C \ {s != t})σ`. Under unification-with-abstraction the child
//! carries one disequality per deferred constraint. With the
//! literal-maximality aftercheck enabled, a child is rejected when another
//! selected literal strictly dominates the resolved one after σ.

use super::{ClauseStream, GeneratingRule};
use crate::config::AbstractionPolicy;
use crate::env::Environment;
use crate::fol::clause::{Clause, Inference, InferenceRule};
use crate::fol::ordering::{literal_greater, KBO};
use crate::fol::sorts::SortTable;
use crate::unification::{unify_terms, unify_with_abstraction, Substitution};
use std::sync::Arc;

/// Apply equality resolution to every selected negative equality of the
/// premise. The premise must have at least one selected literal.
pub fn equality_resolution(premise: &Arc<Clause>, env: &mut Environment) -> Vec<Arc<Clause>> {
    let mut results = Vec::new();
    if premise.is_empty() {
        return results;
    }
    debug_assert!(premise.selected > 0);

    let policy = env.options.unification_with_abstraction;
    let aftercheck = env.options.literal_maximality_aftercheck && premise.selected > 1;
    let kbo = KBO::default();

    for i in 0..premise.selected {
        let lit = premise.literals[i];
        if lit.is_positive() {
            continue;
        }
        let Some((_, lhs, rhs)) = lit.as_equality(&env.terms) else {
            continue;
        };

        // constraints between equal top symbols would only restate the
        // argument disagreements, so the handler is suppressed there
        let mut use_handler = policy != AbstractionPolicy::Off;
        if let (Some(f1), Some(f2)) = (env.terms.symbol(lhs), env.terms.symbol(rhs)) {
            if f1 == f2 {
                use_handler = false;
            }
        }

        let mut subst = Substitution::new();
        let mut constraints = Vec::new();
        let unified = if use_handler {
            unify_with_abstraction(env, &mut subst, (lhs, 0), (rhs, 0), policy, &mut constraints)
        } else {
            unify_terms(env, &mut subst, lhs, rhs)
        };
        if !unified {
            continue;
        }

        let lit_after = if aftercheck {
            Some(subst.apply_literal(env, &lit, 0))
        } else {
            None
        };

        let mut literals = Vec::with_capacity(premise.len() - 1 + constraints.len());
        let mut blocked = false;
        for (j, curr) in premise.literals.clone().iter().enumerate() {
            if j == i {
                continue;
            }
            let curr_after = subst.apply_literal(env, curr, 0);
            if let Some(ref resolved_after) = lit_after {
                if j < premise.selected
                    && literal_greater(&env.terms, &kbo, &curr_after, resolved_after)
                {
                    env.statistics.blocked_by_aftercheck += 1;
                    blocked = true;
                    break;
                }
            }
            literals.push(curr_after);
        }
        if blocked {
            continue;
        }

        let mut rejected = false;
        for &(cs, ct) in &constraints {
            let l = subst.apply(env, cs.0, cs.1);
            let r = subst.apply(env, ct.0, ct.1);
            if policy == AbstractionPolicy::Ground
                && !(env.terms.is_ground(l) && env.terms.is_ground(r))
                && !env.is_theory_term(l)
                && !env.is_theory_term(r)
            {
                // the deferred pair stayed non-ground and non-theory
                rejected = true;
                break;
            }
            let sort = env
                .terms
                .sort(r)
                .or_else(|| env.terms.sort(l))
                .unwrap_or(SortTable::INDIVIDUAL);
            literals.push(env.equality(sort, false, l, r));
        }
        if rejected {
            continue;
        }

        let child = Clause::new(
            &env.terms,
            literals,
            Inference::new(InferenceRule::EqualityResolution, vec![premise.clone()]),
        );
        env.statistics.equality_resolutions += 1;
        results.push(Arc::new(child));
    }

    results
}

/// Equality resolution as a generating rule
#[derive(Debug, Default)]
pub struct EqualityResolutionRule;

impl EqualityResolutionRule {
    pub fn new() -> Self {
        EqualityResolutionRule
    }
}

impl GeneratingRule for EqualityResolutionRule {
    fn name(&self) -> &'static str {
        "EqualityResolution"
    }

    fn generate(&mut self, premise: &Arc<Clause>, env: &mut Environment) -> ClauseStream {
        ClauseStream::from_vec(equality_resolution(premise, env))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fol::clause::ClauseRole;
    use crate::fol::literal::Literal;

    #[test]
    fn test_reflexive_disequality_gives_empty_clause() {
        let mut env = Environment::with_default_options();
        let ind = SortTable::INDIVIDUAL;
        let a = env.signature.add_function("a", vec![], ind);
        let ta = env.constant(a);

        let lit = env.equality(ind, false, ta, ta);
        let premise = Arc::new(Clause::input(&env.terms, vec![lit], ClauseRole::Axiom));

        let children = equality_resolution(&premise, &mut env);
        assert_eq!(children.len(), 1);
        assert!(children[0].is_empty());
        assert_eq!(
            children[0].inference.rule,
            InferenceRule::EqualityResolution
        );
        assert_eq!(env.statistics.equality_resolutions, 1);
    }

    #[test]
    fn test_resolving_instantiates_remaining_literals() {
        let mut env = Environment::with_default_options();
        let ind = SortTable::INDIVIDUAL;
        let f = env.signature.add_function("f", vec![ind], ind);
        let a = env.signature.add_function("a", vec![], ind);
        let p = env.signature.add_predicate("p", vec![ind]);

        let ta = env.constant(a);
        let x = env.var(0);
        let fx = env.app(f, vec![x]);
        let fa = env.app(f, vec![ta]);

        // f(x) != f(a) ∨ p(x)  ⇒  p(a)
        let diseq = env.equality(ind, false, fx, fa);
        let px = env.literal(p, vec![x], true);
        let premise = Arc::new(Clause::input(&env.terms, vec![diseq, px], ClauseRole::Axiom));

        let children = equality_resolution(&premise, &mut env);
        assert_eq!(children.len(), 1);
        let pa = env.literal(p, vec![ta], true);
        assert_eq!(children[0].literals, vec![pa]);
    }

    #[test]
    fn test_positive_equalities_are_ignored() {
        let mut env = Environment::with_default_options();
        let ind = SortTable::INDIVIDUAL;
        let a = env.signature.add_function("a", vec![], ind);
        let ta = env.constant(a);

        let lit = env.equality(ind, true, ta, ta);
        let premise = Arc::new(Clause::input(&env.terms, vec![lit], ClauseRole::Axiom));

        assert!(equality_resolution(&premise, &mut env).is_empty());
    }

    #[test]
    fn test_non_unifiable_sides_give_no_child() {
        let mut env = Environment::with_default_options();
        let ind = SortTable::INDIVIDUAL;
        let a = env.signature.add_function("a", vec![], ind);
        let b = env.signature.add_function("b", vec![], ind);
        let ta = env.constant(a);
        let tb = env.constant(b);

        let lit = env.equality(ind, false, ta, tb);
        let premise = Arc::new(Clause::input(&env.terms, vec![lit], ClauseRole::Axiom));

        assert!(equality_resolution(&premise, &mut env).is_empty());
    }

    #[test]
    fn test_only_selected_literals_resolve() {
        let mut env = Environment::with_default_options();
        let ind = SortTable::INDIVIDUAL;
        let a = env.signature.add_function("a", vec![], ind);
        let p = env.signature.add_predicate("p", vec![ind]);
        let ta = env.constant(a);

        let pa = env.literal(p, vec![ta], true);
        let diseq = env.equality(ind, false, ta, ta);
        let mut clause = Clause::input(&env.terms, vec![pa, diseq], ClauseRole::Axiom);
        // only the leading literal p(a) is selected
        clause.selected = 1;
        let premise = Arc::new(clause);

        assert!(equality_resolution(&premise, &mut env).is_empty());
    }

    #[test]
    fn test_aftercheck_blocks_dominated_child() {
        let mut env = Environment::with_default_options();
        env.options.literal_maximality_aftercheck = true;
        let ind = SortTable::INDIVIDUAL;
        let f = env.signature.add_function("f", vec![ind], ind);
        let g = env.signature.add_function("g", vec![ind], ind);
        let a = env.signature.add_function("a", vec![], ind);
        let ta = env.constant(a);

        // a != a ∨ g(f(a)) != a : both selected; after σ (empty) the second
        // selected disequality strictly dominates the resolved one
        let small = env.equality(ind, false, ta, ta);
        let fa = env.app(f, vec![ta]);
        let gfa = env.app(g, vec![fa]);
        let large = env.equality(ind, false, gfa, ta);
        let premise = Arc::new(Clause::input(
            &env.terms,
            vec![small, large],
            ClauseRole::Axiom,
        ));

        let children = equality_resolution(&premise, &mut env);
        // the small disequality is blocked; the large one cannot unify
        assert!(children.is_empty());
        assert_eq!(env.statistics.blocked_by_aftercheck, 1);
    }

    #[test]
    fn test_abstraction_adds_constraint_literal() {
        let mut env = Environment::with_default_options();
        env.options.unification_with_abstraction = AbstractionPolicy::Full;
        let int = SortTable::INTEGER;
        let c = env.signature.add_function("c", vec![], int);
        let p = env.signature.add_predicate("p", vec![int]);

        let tc = env.constant(c);
        let one = env.int_numeral(1.into());
        let x = env.var(0);
        let plus = env.interpreted_app(crate::fol::theory::Interpretation::IntPlus, vec![x, one]);

        // c != x + 1 ∨ p(x): the clash c vs + is deferred as a constraint
        let diseq = env.equality(int, false, tc, plus);
        let px = env.literal(p, vec![x], true);
        let premise = Arc::new(Clause::input(&env.terms, vec![diseq, px], ClauseRole::Axiom));

        let children = equality_resolution(&premise, &mut env);
        assert_eq!(children.len(), 1);
        // p(x)σ plus one constraint disequality
        assert_eq!(children[0].len(), 2);
        let constraint = children[0].literals[1];
        assert!(constraint.is_negative());
        assert!(constraint.is_equality(&env.terms));
    }

    fn all_literals(clause: &Clause) -> Vec<Literal> {
        clause.literals.clone()
    }

    #[test]
    fn test_child_length_is_premise_length_minus_one() {
        let mut env = Environment::with_default_options();
        let ind = SortTable::INDIVIDUAL;
        let a = env.signature.add_function("a", vec![], ind);
        let p = env.signature.add_predicate("p", vec![ind]);
        let q = env.signature.add_predicate("q", vec![ind]);
        let ta = env.constant(a);
        let x = env.var(0);

        let diseq = env.equality(ind, false, x, ta);
        let px = env.literal(p, vec![x], true);
        let qx = env.literal(q, vec![x], false);
        let premise = Arc::new(Clause::input(
            &env.terms,
            vec![diseq, px, qx],
            ClauseRole::Axiom,
        ));

        let children = equality_resolution(&premise, &mut env);
        assert_eq!(children.len(), 1);
        assert_eq!(all_literals(&children[0]).len(), premise.len() - 1);
    }
}
