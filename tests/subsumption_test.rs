//! Integration tests for the subsumption decision procedure.

use wyvern::{subsumes, subsumes_with_witness, Clause, ClauseRole, Environment, SortTable};

fn clause(env: &Environment, lits: Vec<wyvern::Literal>) -> Clause {
    Clause::input(&env.terms, lits, ClauseRole::Axiom)
}

#[test]
fn test_instance_subset_with_witness() {
    // C = p(x) ∨ q(x, y), D = p(a) ∨ q(a, b) ∨ r: yes with {x ↦ a, y ↦ b}
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

    let px = env.literal(p, vec![x], true);
    let qxy = env.literal(q, vec![x, y], true);
    let side = clause(&env, vec![px, qxy]);

    let pa = env.literal(p, vec![ta], true);
    let qab = env.literal(q, vec![ta, tb], true);
    let rr = env.literal(r, vec![], true);
    let main = clause(&env, vec![pa, qab, rr]);

    let witness = subsumes_with_witness(&mut env, &side, &main).expect("subsumes");
    assert_eq!(witness.get(&0), Some(&ta));
    assert_eq!(witness.get(&1), Some(&tb));

    // the witness makes every side literal a main literal
    let mut subst = wyvern::Substitution::new();
    for (&v, &t) in &witness {
        subst
            .bind(&env.terms, (v, 0), (t, 0))
            .expect("ground bindings");
    }
    for lit in side.literals.clone() {
        let image = subst.apply_literal(&mut env, &lit, 0);
        assert!(main.literals.contains(&image));
    }
}

#[test]
fn test_longer_side_premise_cannot_subsume() {
    let mut env = Environment::with_default_options();
    let ind = SortTable::INDIVIDUAL;
    let p = env.signature.add_predicate("p", vec![ind]);
    let q = env.signature.add_predicate("q", vec![ind]);
    let a = env.signature.add_function("a", vec![], ind);
    let ta = env.constant(a);
    let x = env.var(0);

    let px = env.literal(p, vec![x], true);
    let qx = env.literal(q, vec![x], true);
    let side = clause(&env, vec![px, qx]);
    let pa = env.literal(p, vec![ta], true);
    let main = clause(&env, vec![pa]);

    assert!(!subsumes(&mut env, &side, &main));
}

#[test]
fn test_backtracking_over_candidate_matches() {
    // p(x, y) ∨ q(y): the first candidate match for p binds y to b, which
    // the q literal cannot complete; the search must back up and take the
    // second candidate
    let mut env = Environment::with_default_options();
    let ind = SortTable::INDIVIDUAL;
    let p = env.signature.add_predicate("p", vec![ind, ind]);
    let q = env.signature.add_predicate("q", vec![ind]);
    let a = env.signature.add_function("a", vec![], ind);
    let b = env.signature.add_function("b", vec![], ind);
    let c = env.signature.add_function("c", vec![], ind);
    let ta = env.constant(a);
    let tb = env.constant(b);
    let tc = env.constant(c);
    let x = env.var(0);
    let y = env.var(1);

    let pxy = env.literal(p, vec![x, y], true);
    let qy = env.literal(q, vec![y], true);
    let side = clause(&env, vec![pxy, qy]);

    let pab = env.literal(p, vec![ta, tb], true);
    let pac = env.literal(p, vec![ta, tc], true);
    let qc = env.literal(q, vec![tc], true);
    let main = clause(&env, vec![pab, pac, qc]);

    let witness = subsumes_with_witness(&mut env, &side, &main).expect("subsumes");
    assert_eq!(witness.get(&0), Some(&ta));
    assert_eq!(witness.get(&1), Some(&tc));
}

#[test]
fn test_duplicate_side_literals_need_duplicate_main_literals() {
    let mut env = Environment::with_default_options();
    let ind = SortTable::INDIVIDUAL;
    let p = env.signature.add_predicate("p", vec![ind]);
    let a = env.signature.add_function("a", vec![], ind);
    let ta = env.constant(a);

    let pa = env.literal(p, vec![ta], true);
    let side = clause(&env, vec![pa, pa]);

    // multiset semantics: p(a) ∨ p(a) does not fit inside a single p(a)
    let main_single = clause(&env, vec![pa]);
    assert!(!subsumes(&mut env, &side, &main_single));

    let main_double = clause(&env, vec![pa, pa]);
    assert!(subsumes(&mut env, &side, &main_double));
}

#[test]
fn test_equality_orientations_count_separately() {
    let mut env = Environment::with_default_options();
    let ind = SortTable::INDIVIDUAL;
    let a = env.signature.add_function("a", vec![], ind);
    let b = env.signature.add_function("b", vec![], ind);
    let ta = env.constant(a);
    let tb = env.constant(b);
    let x = env.var(0);
    let y = env.var(1);

    // x = y ∨ y = x can cover a = b ∨ b = a using both orientations
    let eq_xy = env.equality(ind, true, x, y);
    let eq_yx = env.equality(ind, true, y, x);
    let side = clause(&env, vec![eq_xy, eq_yx]);

    let eq_ab = env.equality(ind, true, ta, tb);
    let eq_ba = env.equality(ind, true, tb, ta);
    let main = clause(&env, vec![eq_ab, eq_ba]);

    assert!(subsumes(&mut env, &side, &main));

    // and a single main equality is not enough for both side literals
    let main_single = clause(&env, vec![eq_ab]);
    assert!(!subsumes(&mut env, &side, &main_single));
}
