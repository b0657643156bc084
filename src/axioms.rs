//! Equality proxy axiomatisation.
//!
//! When the configured mode is not `Off`, emits the equality axioms as input
//! clauses: reflexivity (`R`), plus symmetry and transitivity (`RST`), plus
//! function and predicate congruence for every uninterpreted symbol of the
//! signature (`RSTC`).

use crate::config::EqualityProxyMode;
use crate::env::Environment;
use crate::fol::clause::{Clause, ClauseRole, Inference, InferenceRule};
use crate::fol::literal::Literal;
use crate::fol::sorts::{SortKind, SortTable};
use crate::fol::term::TermId;
use std::sync::Arc;

/// Generate the equality axioms for the current signature
pub fn equality_proxy_axioms(env: &mut Environment, mode: EqualityProxyMode) -> Vec<Arc<Clause>> {
    if mode == EqualityProxyMode::Off {
        return Vec::new();
    }

    let mut clauses = Vec::new();
    let sorts: Vec<_> = env
        .sorts
        .iter()
        .filter(|&s| !matches!(env.sorts.kind(s), SortKind::Boolean))
        .collect();

    for &sort in &sorts {
        let x = env.var(0);
        let y = env.var(1);
        let z = env.var(2);

        // x = x
        let refl = env.equality(sort, true, x, x);
        clauses.push(axiom(env, vec![refl]));

        if mode == EqualityProxyMode::R {
            continue;
        }

        // x != y ∨ y = x
        let sym = vec![
            env.equality(sort, false, x, y),
            env.equality(sort, true, y, x),
        ];
        clauses.push(axiom(env, sym));

        // x != y ∨ y != z ∨ x = z
        let trans = vec![
            env.equality(sort, false, x, y),
            env.equality(sort, false, y, z),
            env.equality(sort, true, x, z),
        ];
        clauses.push(axiom(env, trans));
    }

    if mode == EqualityProxyMode::RSTC {
        for f in env.signature.function_ids().collect::<Vec<_>>() {
            let symbol = env.signature.function(f);
            if symbol.arity == 0 || !symbol.interpretation.is_uninterpreted() {
                continue;
            }
            let arg_sorts = symbol.arg_sorts.clone();
            let result_sort = symbol.result_sort;
            let (diseqs, xs, ys) = argument_diseqs(env, &arg_sorts);
            let fx = env.app(f, xs);
            let fy = env.app(f, ys);
            let mut literals = diseqs;
            literals.push(env.equality(result_sort, true, fx, fy));
            clauses.push(axiom(env, literals));
        }
        for p in env.signature.predicate_ids().collect::<Vec<_>>() {
            let symbol = env.signature.predicate(p);
            if symbol.arity == 0 || !symbol.interpretation.is_uninterpreted() {
                continue;
            }
            let arg_sorts = symbol.arg_sorts.clone();
            let (diseqs, xs, ys) = argument_diseqs(env, &arg_sorts);
            let mut literals = diseqs;
            literals.push(env.literal(p, xs, false));
            literals.push(env.literal(p, ys, true));
            clauses.push(axiom(env, literals));
        }
    }

    clauses
}

/// `x_i != y_i` per argument position, with the two variable vectors
fn argument_diseqs(
    env: &mut Environment,
    arg_sorts: &[crate::fol::sorts::SortId],
) -> (Vec<Literal>, Vec<TermId>, Vec<TermId>) {
    let mut diseqs = Vec::with_capacity(arg_sorts.len());
    let mut xs = Vec::with_capacity(arg_sorts.len());
    let mut ys = Vec::with_capacity(arg_sorts.len());
    for (i, &sort) in arg_sorts.iter().enumerate() {
        let x = env.var(2 * i as u32);
        let y = env.var(2 * i as u32 + 1);
        xs.push(x);
        ys.push(y);
        diseqs.push(env.equality(sort, false, x, y));
    }
    (diseqs, xs, ys)
}

fn axiom(env: &Environment, literals: Vec<Literal>) -> Arc<Clause> {
    let mut clause = Clause::new(
        &env.terms,
        literals,
        Inference::new(InferenceRule::EqualityProxy, vec![]),
    );
    clause.role = ClauseRole::Axiom;
    Arc::new(clause)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_emits_nothing() {
        let mut env = Environment::with_default_options();
        assert!(equality_proxy_axioms(&mut env, EqualityProxyMode::Off).is_empty());
    }

    #[test]
    fn test_r_emits_reflexivity_per_sort() {
        let mut env = Environment::with_default_options();
        let sorts_without_bool = env.sorts.len() - 1;
        let clauses = equality_proxy_axioms(&mut env, EqualityProxyMode::R);
        assert_eq!(clauses.len(), sorts_without_bool);
        assert!(clauses.iter().all(|c| c.len() == 1));
    }

    #[test]
    fn test_rst_adds_symmetry_and_transitivity() {
        let mut env = Environment::with_default_options();
        let sorts_without_bool = env.sorts.len() - 1;
        let clauses = equality_proxy_axioms(&mut env, EqualityProxyMode::RST);
        assert_eq!(clauses.len(), 3 * sorts_without_bool);
        // transitivity clauses have three literals
        assert!(clauses.iter().any(|c| c.len() == 3));
    }

    #[test]
    fn test_rstc_congruence() {
        let mut env = Environment::with_default_options();
        let ind = SortTable::INDIVIDUAL;
        env.signature.add_function("f", vec![ind, ind], ind);
        env.signature.add_predicate("p", vec![ind]);

        let base = {
            let mut scratch = Environment::with_default_options();
            equality_proxy_axioms(&mut scratch, EqualityProxyMode::RST).len()
        };
        let clauses = equality_proxy_axioms(&mut env, EqualityProxyMode::RSTC);
        // one congruence clause for f, one for p
        assert_eq!(clauses.len(), base + 2);

        // f congruence: x1 != y1 ∨ x2 != y2 ∨ f(x1,x2) = f(y1,y2)
        assert!(clauses.iter().any(|c| {
            c.len() == 3
                && c.literals[2]
                    .as_equality(&env.terms)
                    .map(|(_, lhs, _)| env.terms.symbol(lhs) == env.signature.get_function("f", 2))
                    .unwrap_or(false)
        }));

        // p congruence: x1 != y1 ∨ ~p(x1) ∨ p(y1)
        assert!(clauses.iter().any(|c| {
            c.len() == 3
                && c.literals[1].is_negative()
                && c.literals[1].predicate(&env.terms) == env.signature.get_predicate("p", 1)
        }));
    }
}
