//! Multiset subsumption.
//!
//! Decides whether there is a substitution θ with `Cθ` a sub-multiset of `D`
//! (C the side premise, D the main premise). The engine computes, per side
//! literal, the set of main literals it can match — equalities contribute
//! both orientations as separate alternatives — then searches for a choice
//! of one alternative per side literal whose matchers merge into one
//! well-defined substitution and whose main literals are pairwise distinct.
//!
//! The problem is NP-hard in general; the search is plain backtracking with
//! a consistency check on the merged substitution, which is fast in the
//! common small cases. The abort flag is polled at backtrack points.

use crate::env::Environment;
use crate::fol::clause::Clause;
use crate::fol::term::TermId;
use crate::unification::match_literal_into;
use std::collections::HashMap;

/// One match alternative of a side literal
#[derive(Debug)]
struct Alt {
    /// Index of the matched literal in the main premise
    j: usize,
    /// The matcher, as bindings of side variables to main terms
    bindings: Vec<(u32, TermId)>,
}

/// Does `side` subsume `main`?
pub fn subsumes(env: &mut Environment, side: &Clause, main: &Clause) -> bool {
    subsumes_with_witness(env, side, main).is_some()
}

/// Does `side` subsume `main`? On success, returns the witness substitution
/// on the side premise's variables.
pub fn subsumes_with_witness(
    env: &mut Environment,
    side: &Clause,
    main: &Clause,
) -> Option<HashMap<u32, TermId>> {
    env.statistics.subsumption_checks += 1;

    if side.is_empty() || side.len() > main.len() {
        return None;
    }
    if !side
        .color(&env.terms, &env.signature)
        .compatible(main.color(&env.terms, &env.signature))
    {
        return None;
    }

    // per-literal pre-matching
    let mut alts: Vec<Vec<Alt>> = Vec::with_capacity(side.len());
    for side_lit in &side.literals {
        let mut lit_alts = Vec::new();
        for (j, main_lit) in main.literals.iter().enumerate() {
            let orientations: &[bool] = if side_lit.is_equality(&env.terms) {
                &[false, true]
            } else {
                &[false]
            };
            for &reversed in orientations {
                let mut map = HashMap::new();
                let mut trail = Vec::new();
                if match_literal_into(&env.terms, side_lit, main_lit, reversed, &mut map, &mut trail)
                {
                    lit_alts.push(Alt {
                        j,
                        bindings: trail.iter().map(|&v| (v, map[&v])).collect(),
                    });
                }
            }
        }
        if lit_alts.is_empty() {
            return None;
        }
        alts.push(lit_alts);
    }

    let mut global = HashMap::new();
    let mut used = vec![false; main.len()];
    if search(env, &alts, 0, &mut global, &mut used) {
        env.statistics.subsumed += 1;
        Some(global)
    } else {
        None
    }
}

/// Choose one alternative per side literal, depth first. The chosen matchers
/// must merge consistently and no main literal may be used twice.
fn search(
    env: &Environment,
    alts: &[Vec<Alt>],
    i: usize,
    global: &mut HashMap<u32, TermId>,
    used: &mut [bool],
) -> bool {
    if i == alts.len() {
        return true;
    }
    if env.limits.aborted() {
        return false;
    }
    'alts: for alt in &alts[i] {
        if used[alt.j] {
            continue;
        }
        let mut added = Vec::new();
        for &(var, term) in &alt.bindings {
            match global.get(&var) {
                Some(&bound) if bound != term => {
                    for v in added.drain(..) {
                        global.remove(&v);
                    }
                    continue 'alts;
                }
                Some(_) => {}
                None => {
                    global.insert(var, term);
                    added.push(var);
                }
            }
        }
        used[alt.j] = true;
        if search(env, alts, i + 1, global, used) {
            return true;
        }
        used[alt.j] = false;
        for v in added {
            global.remove(&v);
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fol::clause::ClauseRole;
    use crate::fol::signature::Color;
    use crate::fol::sorts::SortTable;

    fn input(env: &Environment, lits: Vec<crate::fol::literal::Literal>) -> Clause {
        Clause::input(&env.terms, lits, ClauseRole::Axiom)
    }

    #[test]
    fn test_basic_subsumption_with_witness() {
        let mut env = Environment::with_default_options();
        let ind = SortTable::INDIVIDUAL;
        let p = env.signature.add_predicate("p", vec![ind]);
        let q = env.signature.add_predicate("q", vec![ind, ind]);
        let r = env.signature.add_predicate("r", vec![]);
        let a = env.signature.add_function("a", vec![], ind);
        let b = env.signature.add_function("b", vec![], ind);
        let ta = env.constant(a);
        let tb = env.constant(b);
        let x = env.var(0);
        let y = env.var(1);

        // p(x) ∨ q(x, y) subsumes p(a) ∨ q(a, b) ∨ r with {x ↦ a, y ↦ b}
        let side_lits = vec![
            env.literal(p, vec![x], true),
            env.literal(q, vec![x, y], true),
        ];
        let side = input(&env, side_lits);
        let main_lits = vec![
            env.literal(p, vec![ta], true),
            env.literal(q, vec![ta, tb], true),
            env.literal(r, vec![], true),
        ];
        let main = input(&env, main_lits);

        let witness = subsumes_with_witness(&mut env, &side, &main).expect("subsumes");
        assert_eq!(witness.get(&0), Some(&ta));
        assert_eq!(witness.get(&1), Some(&tb));
        assert_eq!(env.statistics.subsumed, 1);
    }

    #[test]
    fn test_multiset_injectivity() {
        let mut env = Environment::with_default_options();
        let ind = SortTable::INDIVIDUAL;
        let p = env.signature.add_predicate("p", vec![ind]);
        let a = env.signature.add_function("a", vec![], ind);
        let ta = env.constant(a);
        let x = env.var(0);
        let y = env.var(1);

        // p(x) ∨ p(y) needs two distinct main literals: p(a) alone is not
        // a multiset superset of any instance
        let side_lits = vec![
            env.literal(p, vec![x], true),
            env.literal(p, vec![y], true),
        ];
        let side = input(&env, side_lits);
        let main_lit = env.literal(p, vec![ta], true);
        let main = input(&env, vec![main_lit]);

        assert!(!subsumes(&mut env, &side, &main));
    }

    #[test]
    fn test_consistency_across_literals() {
        let mut env = Environment::with_default_options();
        let ind = SortTable::INDIVIDUAL;
        let p = env.signature.add_predicate("p", vec![ind]);
        let q = env.signature.add_predicate("q", vec![ind]);
        let a = env.signature.add_function("a", vec![], ind);
        let b = env.signature.add_function("b", vec![], ind);
        let ta = env.constant(a);
        let tb = env.constant(b);
        let x = env.var(0);

        // p(x) ∨ q(x) against p(a) ∨ q(b): the matchers disagree on x
        let side_lits = vec![
            env.literal(p, vec![x], true),
            env.literal(q, vec![x], true),
        ];
        let side = input(&env, side_lits);
        let main_lits = vec![
            env.literal(p, vec![ta], true),
            env.literal(q, vec![tb], true),
        ];
        let main = input(&env, main_lits);
        assert!(!subsumes(&mut env, &side, &main));

        // but against p(a) ∨ q(a) they agree
        let main_lits = vec![
            env.literal(p, vec![ta], true),
            env.literal(q, vec![ta], true),
        ];
        let main = input(&env, main_lits);
        assert!(subsumes(&mut env, &side, &main));
    }

    #[test]
    fn test_polarity_must_match() {
        let mut env = Environment::with_default_options();
        let ind = SortTable::INDIVIDUAL;
        let p = env.signature.add_predicate("p", vec![ind]);
        let a = env.signature.add_function("a", vec![], ind);
        let ta = env.constant(a);
        let x = env.var(0);

        let side_lit = env.literal(p, vec![x], false);
        let side = input(&env, vec![side_lit]);
        let main_lit = env.literal(p, vec![ta], true);
        let main = input(&env, vec![main_lit]);
        assert!(!subsumes(&mut env, &side, &main));
    }

    #[test]
    fn test_commutative_equality_orientation() {
        let mut env = Environment::with_default_options();
        let ind = SortTable::INDIVIDUAL;
        let f = env.signature.add_function("f", vec![ind], ind);
        let a = env.signature.add_function("a", vec![], ind);
        let ta = env.constant(a);
        let fa = env.app(f, vec![ta]);
        let x = env.var(0);
        let fx = env.app(f, vec![x]);

        // f(x) = x subsumes a = f(a) only through the reversed orientation
        let side_lit = env.equality(ind, true, fx, x);
        let side = input(&env, vec![side_lit]);
        let main_lit = env.equality(ind, true, ta, fa);
        let main = input(&env, vec![main_lit]);

        let witness = subsumes_with_witness(&mut env, &side, &main).expect("subsumes");
        assert_eq!(witness.get(&0), Some(&ta));
    }

    #[test]
    fn test_subsumption_is_not_reflexively_trivial() {
        let mut env = Environment::with_default_options();
        let ind = SortTable::INDIVIDUAL;
        let p = env.signature.add_predicate("p", vec![ind]);
        let a = env.signature.add_function("a", vec![], ind);
        let ta = env.constant(a);
        let x = env.var(0);

        // ground side premises subsume only their own literals
        let side_lit = env.literal(p, vec![ta], true);
        let side = input(&env, vec![side_lit]);
        let main_lit = env.literal(p, vec![x], true);
        let main = input(&env, vec![main_lit]);
        assert!(!subsumes(&mut env, &side, &main));
    }

    #[test]
    fn test_color_clash_blocks_subsumption() {
        let mut env = Environment::with_default_options();
        let ind = SortTable::INDIVIDUAL;
        let p = env.signature.add_predicate("p", vec![ind]);
        let a = env.signature.add_function("a", vec![], ind);
        let b = env.signature.add_function("b", vec![], ind);
        env.signature.function_mut(a).color = Color::Left;
        env.signature.function_mut(b).color = Color::Right;
        let ta = env.constant(a);
        let tb = env.constant(b);
        let x = env.var(0);

        let g = env.signature.add_function("g", vec![ind, ind], ind);
        let gax = env.app(g, vec![ta, x]);
        let gab = env.app(g, vec![ta, tb]);

        // the match exists but the colors clash
        let side_lit = env.literal(p, vec![gax], true);
        let side = input(&env, vec![side_lit]);
        let main_lit = env.literal(p, vec![gab], true);
        let main = input(&env, vec![main_lit]);
        assert!(!subsumes(&mut env, &side, &main));
    }

    #[test]
    fn test_abort_flag_stops_search() {
        let mut env = Environment::with_default_options();
        let ind = SortTable::INDIVIDUAL;
        let p = env.signature.add_predicate("p", vec![ind]);
        let a = env.signature.add_function("a", vec![], ind);
        let ta = env.constant(a);
        let x = env.var(0);

        let side_lit = env.literal(p, vec![x], true);
        let side = input(&env, vec![side_lit]);
        let main_lit = env.literal(p, vec![ta], true);
        let main = input(&env, vec![main_lit]);

        env.limits.request_abort();
        // no partial result once the flag is raised
        assert!(!subsumes(&mut env, &side, &main));
        env.limits.reset();
        assert!(subsumes(&mut env, &side, &main));
    }
}
