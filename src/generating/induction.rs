//! Induction axiom generation.
//!
//! For an eligible ground literal L[t] of the premise, generate an induction
//! hypothesis entailing L at t, clausify it, and resolve the clause carrying
//! the instantiated conclusion against the premise. Remaining clausification
//! products are emitted as-is. Structural induction offers three schemes
//! (conventional, least-counterexample, subterm-ordering); mathematical
//! induction over the integers offers the conventional scheme in its upward
//! and downward variants.
//!
//! Every emitted clause records rule `InductionAxiom` (`GenInductionAxiom`
//! when only a subset of the occurrences of t was inducted on) and an
//! induction depth one above the premise.

use super::common::resolve;
use super::{ClauseStream, GeneratingRule};
use crate::config::InductionChoice;
use crate::env::Environment;
use crate::fol::clause::{Clause, Inference, InferenceRule};
use crate::fol::cnf::clausify;
use crate::fol::formula::Formula;
use crate::fol::literal::Literal;
use crate::fol::sorts::{SortId, SortTable, TaConstructor};
use crate::fol::term::TermId;
use crate::fol::theory::Interpretation;
use log::debug;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Occurrence masks use a u64; literals with more occurrences of the target
/// than this are inducted on in full only.
const MAX_SUBSET_OCCURRENCES: u32 = 64;

/// Induction axiom generation as a generating rule.
///
/// The rule keeps a per-run memo of (literal, target) pairs already
/// processed, keyed by the literal with the target replaced by a sort-blank
/// constant, and a placeholder constant per sort for generalisation.
#[derive(Debug, Default)]
pub struct InductionRule {
    done: HashSet<Literal>,
    blanks: HashMap<SortId, TermId>,
    placeholders: HashMap<SortId, TermId>,
}

impl InductionRule {
    pub fn new() -> Self {
        InductionRule::default()
    }
}

impl GeneratingRule for InductionRule {
    fn name(&self) -> &'static str {
        "Induction"
    }

    fn generate(&mut self, premise: &Arc<Clause>, env: &mut Environment) -> ClauseStream {
        let choice = env.options.induction_choice;
        let eligible = match choice {
            InductionChoice::All => true,
            InductionChoice::Goal | InductionChoice::GoalPlus => premise.derived_from_goal,
        };
        let max_depth = env.options.max_induction_depth;
        if !eligible
            || (env.options.induction_unit_only && premise.len() != 1)
            || (max_depth > 0 && premise.induction_depth >= max_depth)
        {
            return ClauseStream::empty();
        }

        let mut out = Vec::new();
        for lit_idx in 0..premise.len() {
            self.process(premise, lit_idx, env, &mut out);
        }
        ClauseStream::from_vec(out)
    }
}

impl InductionRule {
    fn process(
        &mut self,
        premise: &Arc<Clause>,
        lit_idx: usize,
        env: &mut Environment,
        out: &mut Vec<Arc<Clause>>,
    ) {
        let lit = premise.literals[lit_idx];

        if env.options.induction_neg_only && lit.is_positive() && !is_inequality_literal(env, &lit)
        {
            return;
        }
        if !lit.is_ground(&env.terms) {
            return;
        }

        debug!(
            "induction: process {} in {}",
            lit.display(&env.terms, &env.signature),
            premise.display(&env.terms, &env.signature)
        );

        let choice = env.options.induction_choice;
        let all = choice == InductionChoice::All;
        let goal_plus = choice == InductionChoice::GoalPlus;
        let complex_allowed = env.options.induction_on_complex_terms;
        let struct_ind = env.options.induction.structural();
        let math_ind = env.options.induction.mathematical();

        let mut ta_terms: Vec<TermId> = Vec::new();
        let mut int_terms: Vec<TermId> = Vec::new();
        for t in env.terms.atom_subterms(lit.atom) {
            let Some(f) = env.terms.symbol(t) else {
                continue;
            };
            let func = env.signature.function(f);
            if !(complex_allowed || func.arity == 0) {
                continue;
            }
            if !(all || func.in_goal || (goal_plus && func.induction_skolem)) {
                continue;
            }
            if struct_ind
                && env.sorts.is_term_algebra(func.result_sort)
                // base constructors are their own base case
                && ((complex_allowed && func.arity != 0) || !func.ta_constructor)
                && !ta_terms.contains(&t)
            {
                ta_terms.push(t);
            }
            if math_ind
                && func.result_sort == SortTable::INTEGER
                && !func.interpretation.is_numeral()
                && !int_terms.contains(&t)
            {
                int_terms.push(t);
            }
        }

        for t in int_terms {
            if !self.not_done(env, &lit, t) {
                continue;
            }
            if env.options.math_induction_scheme.one() {
                self.for_each_target(env, premise, lit_idx, t, |rule, env, ilit, target, out| {
                    perform_math_induction_one(env, premise, lit_idx, ilit, target, rule, out);
                }, out);
            }
        }
        for t in ta_terms {
            if !self.not_done(env, &lit, t) {
                continue;
            }
            let scheme = env.options.struct_induction_scheme;
            self.for_each_target(env, premise, lit_idx, t, |rule, env, ilit, target, out| {
                if scheme.one() {
                    perform_struct_induction_one(env, premise, lit_idx, ilit, target, rule, out);
                }
                if scheme.two() {
                    perform_struct_induction_two(env, premise, lit_idx, ilit, target, rule, out);
                }
                if scheme.three() {
                    perform_struct_induction_three(env, premise, lit_idx, ilit, target, rule, out);
                }
            }, out);
        }
    }

    /// Run the scheme body once per induction target: on the literal itself,
    /// or, under occurrence generalisation, once per occurrence subset with
    /// the target replaced by a per-sort placeholder constant.
    #[allow(clippy::too_many_arguments)]
    fn for_each_target(
        &mut self,
        env: &mut Environment,
        premise: &Arc<Clause>,
        lit_idx: usize,
        t: TermId,
        body: impl Fn(InferenceRule, &mut Environment, &Literal, TermId, &mut Vec<Arc<Clause>>),
        out: &mut Vec<Arc<Clause>>,
    ) {
        let lit = premise.literals[lit_idx];
        if !env.options.induction_gen {
            body(InferenceRule::InductionAxiom, env, &lit, t, out);
            return;
        }

        let placeholder = self.placeholder(env, t);
        let occurrences = env.terms.count_occurrences(lit.atom, t) as u32;
        let bound = env.options.max_induction_gen_subset_size as u32;

        if occurrences > MAX_SUBSET_OCCURRENCES {
            let atom = env.terms.replace_subset_in_atom(
                &env.signature,
                lit.atom,
                t,
                placeholder,
                0,
                0, // every occurrence is replaced past the mask width
            );
            let ilit = Literal {
                atom,
                polarity: lit.polarity,
            };
            body(InferenceRule::InductionAxiom, env, &ilit, placeholder, out);
            return;
        }

        let full: u64 = if occurrences == 64 {
            u64::MAX
        } else {
            (1u64 << occurrences) - 1
        };
        for mask in 1..=full {
            let bits = mask.count_ones();
            if bound > 0 && bits > bound && bits < occurrences {
                continue;
            }
            let rule = if bits == occurrences {
                InferenceRule::InductionAxiom
            } else {
                InferenceRule::GenInductionAxiom
            };
            let atom = env.terms.replace_subset_in_atom(
                &env.signature,
                lit.atom,
                t,
                placeholder,
                mask,
                MAX_SUBSET_OCCURRENCES,
            );
            let ilit = Literal {
                atom,
                polarity: lit.polarity,
            };
            body(rule, env, &ilit, placeholder, out);
        }
    }

    /// The redundancy filter: a (literal, target) pair whose blanked form was
    /// already processed is skipped.
    fn not_done(&mut self, env: &mut Environment, lit: &Literal, t: TermId) -> bool {
        let sort = env
            .terms
            .sort(t)
            .expect("induction targets are applications");
        let blank = match self.blanks.get(&sort) {
            Some(&b) => b,
            None => {
                let f = env.signature.add_fresh_function("blank", vec![], sort);
                let b = env.constant(f);
                self.blanks.insert(sort, b);
                b
            }
        };
        let atom = env
            .terms
            .replace_in_atom(&env.signature, lit.atom, t, blank);
        let key = Literal {
            atom,
            polarity: lit.polarity,
        };
        self.done.insert(key)
    }

    /// Per-sort placeholder constant used by occurrence generalisation
    fn placeholder(&mut self, env: &mut Environment, t: TermId) -> TermId {
        let sort = env
            .terms
            .sort(t)
            .expect("induction targets are applications");
        match self.placeholders.get(&sort) {
            Some(&p) => p,
            None => {
                let f = env
                    .signature
                    .add_fresh_function("placeholder", vec![], sort);
                let p = env.constant(f);
                self.placeholders.insert(sort, p);
                p
            }
        }
    }
}

fn is_inequality_literal(env: &Environment, lit: &Literal) -> bool {
    lit.predicate(&env.terms)
        .map(|p| env.signature.predicate(p).interpretation.is_inequality())
        .unwrap_or(false)
}

/// Replace every occurrence of `find` in the literal
fn replace_in_literal(env: &mut Environment, lit: &Literal, find: TermId, by: TermId) -> Literal {
    let atom = env.terms.replace_in_atom(&env.signature, lit.atom, find, by);
    Literal {
        atom,
        polarity: lit.polarity,
    }
}

/// Clausify the hypothesis; resolve every clause containing the instantiated
/// conclusion against the premise, emit the rest unchanged.
fn produce_clauses(
    env: &mut Environment,
    premise: &Arc<Clause>,
    lit_idx: usize,
    hypothesis: Formula,
    conclusion: Literal,
    rule: InferenceRule,
    out: &mut Vec<Arc<Clause>>,
) {
    let depth = premise.induction_depth + 1;
    for literals in clausify(env, hypothesis, true) {
        let clause = Clause::new(
            &env.terms,
            literals,
            Inference::new(rule, vec![premise.clone()]),
        )
        .with_induction_depth(depth);

        match clause.literals.iter().position(|l| *l == conclusion) {
            Some(pos) => {
                let clause = Arc::new(clause);
                if let Some(resolvent) = resolve(env, &clause, pos, premise, lit_idx, rule) {
                    out.push(Arc::new(resolvent));
                }
            }
            None => out.push(Arc::new(clause)),
        }
    }
    env.statistics.induction_applications += 1;
    if rule == InferenceRule::GenInductionAxiom {
        env.statistics.generalized_induction_applications += 1;
    }
}

/// Mathematical induction over the integers, conventional scheme, both
/// directions:
///
/// ```text
/// (L[0] ∧ ∀x. (x ≥ 0 ∧ L[x]) → L[x+1]) → ∀y. y ≥ 0 → L[y]
/// (L[0] ∧ ∀x. (x ≤ 0 ∧ L[x]) → L[x-1]) → ∀y. y ≤ 0 → L[y]
/// ```
fn perform_math_induction_one(
    env: &mut Environment,
    premise: &Arc<Clause>,
    lit_idx: usize,
    ilit: &Literal,
    term: TermId,
    rule: InferenceRule,
    out: &mut Vec<Arc<Clause>>,
) {
    let zero = env.int_numeral(0.into());
    let one = env.int_numeral(1.into());
    let minus_one = env.int_numeral((-1).into());
    let x = env.var(0);
    let y = env.var(1);

    let clit = ilit.complement();

    let l_zero = Formula::Atom(replace_in_literal(env, &clit, term, zero));
    let l_x = Formula::Atom(replace_in_literal(env, &clit, term, x));
    let conclusion = replace_in_literal(env, &clit, term, y);
    let l_y = Formula::Atom(conclusion);

    let x_plus_one = env.interpreted_app(Interpretation::IntPlus, vec![x, one]);
    let l_succ = Formula::Atom(replace_in_literal(env, &clit, term, x_plus_one));
    let x_minus_one = env.interpreted_app(Interpretation::IntPlus, vec![x, minus_one]);
    let l_pred = Formula::Atom(replace_in_literal(env, &clit, term, x_minus_one));

    let less = env.signature.interpreting_predicate(Interpretation::IntLess);
    // x ≥ 0 is ¬(x < 0), x ≤ 0 is ¬(0 < x)
    let x_geq_zero = Formula::Atom(env.literal(less, vec![x, zero], false));
    let y_geq_zero = Formula::Atom(env.literal(less, vec![y, zero], false));
    let x_leq_zero = Formula::Atom(env.literal(less, vec![zero, x], false));
    let y_leq_zero = Formula::Atom(env.literal(less, vec![zero, y], false));

    let upward = Formula::implies(
        Formula::And(vec![
            l_zero.clone(),
            Formula::Forall(
                vec![0],
                Box::new(Formula::implies(
                    Formula::And(vec![x_geq_zero, l_x.clone()]),
                    l_succ,
                )),
            ),
        ]),
        Formula::Forall(
            vec![1],
            Box::new(Formula::implies(y_geq_zero, l_y.clone())),
        ),
    );
    let downward = Formula::implies(
        Formula::And(vec![
            l_zero,
            Formula::Forall(
                vec![0],
                Box::new(Formula::implies(Formula::And(vec![x_leq_zero, l_x]), l_pred)),
            ),
        ]),
        Formula::Forall(vec![1], Box::new(Formula::implies(y_leq_zero, l_y))),
    );

    produce_clauses(env, premise, lit_idx, upward, conclusion, rule, out);
    produce_clauses(env, premise, lit_idx, downward, conclusion, rule, out);
}

/// The constructors of the target's term-algebra sort
fn algebra_of(env: &Environment, term: TermId) -> (SortId, Vec<TaConstructor>) {
    let sort = env
        .terms
        .sort(term)
        .expect("induction targets are applications");
    let ta = env
        .sorts
        .term_algebra(sort)
        .expect("structural induction targets have term-algebra sorts");
    (sort, ta.constructors.clone())
}

/// Conventional structural induction:
///
/// ```text
/// (L[b₁] ∧ … ∧ (∀x⃗. L[x] → L[c(x⃗)]) ∧ …) → ∀v. L[v]
/// ```
///
/// with one conjunct per constructor, where L is the complement of the
/// premise literal at the induction target.
fn perform_struct_induction_one(
    env: &mut Environment,
    premise: &Arc<Clause>,
    lit_idx: usize,
    ilit: &Literal,
    term: TermId,
    rule: InferenceRule,
    out: &mut Vec<Arc<Clause>>,
) {
    let (ta_sort, constructors) = algebra_of(env, term);
    let clit = ilit.complement();
    let mut var = 0u32;

    let mut cases = Vec::with_capacity(constructors.len());
    for con in &constructors {
        let mut arg_terms = Vec::with_capacity(con.arg_sorts.len());
        let mut ta_vars = Vec::new();
        for &arg_sort in &con.arg_sorts {
            let v = env.var(var);
            var += 1;
            if arg_sort == ta_sort {
                ta_vars.push(v);
            }
            arg_terms.push(v);
        }
        let applied = env.app(con.functor, arg_terms);
        let case_conclusion = Formula::Atom(replace_in_literal(env, &clit, term, applied));

        if ta_vars.is_empty() {
            cases.push(case_conclusion);
        } else {
            let antecedent = Formula::and(
                ta_vars
                    .iter()
                    .map(|&v| Formula::Atom(replace_in_literal(env, &clit, term, v)))
                    .collect(),
            );
            cases.push(Formula::implies(antecedent, case_conclusion));
        }
    }

    let conclusion_var = env.var(var);
    let conclusion = replace_in_literal(env, &clit, term, conclusion_var);

    let hypothesis = Formula::implies(
        Formula::and(cases).quantify(&env.terms),
        Formula::Atom(conclusion).quantify(&env.terms),
    );
    produce_clauses(env, premise, lit_idx, hypothesis, conclusion, rule, out);
}

/// Least-counterexample structural induction: there is a least witness y of
/// the premise literal, so every destructor image of y satisfies its
/// complement:
///
/// ```text
/// ¬L[v] ∨ ∃y. (L[y] ∧ ⋀_c (y = c(d₁(y),…) → ⋀_j ¬L[dⱼ(y)]))
/// ```
fn perform_struct_induction_two(
    env: &mut Environment,
    premise: &Arc<Clause>,
    lit_idx: usize,
    ilit: &Literal,
    term: TermId,
    rule: InferenceRule,
    out: &mut Vec<Arc<Clause>>,
) {
    let (ta_sort, constructors) = algebra_of(env, term);
    let clit = ilit.complement();
    let y = env.var(0);
    let l_y = Formula::Atom(replace_in_literal(env, ilit, term, y));

    let mut conjuncts = vec![l_y];
    for con in &constructors {
        if !con.recursive(ta_sort) {
            continue;
        }
        let mut arg_terms = Vec::with_capacity(con.destructors.len());
        let mut ta_args = Vec::new();
        for (j, &dj) in con.destructors.iter().enumerate() {
            let djy = env.app(dj, vec![y]);
            arg_terms.push(djy);
            if con.arg_sorts[j] == ta_sort {
                ta_args.push(djy);
            }
        }
        let rebuilt = env.app(con.functor, arg_terms);
        let fixpoint = Formula::Atom(env.equality(ta_sort, true, y, rebuilt));
        let smaller = Formula::and(
            ta_args
                .iter()
                .map(|&d| Formula::Atom(replace_in_literal(env, &clit, term, d)))
                .collect(),
        );
        conjuncts.push(Formula::implies(fixpoint, smaller));
    }

    let exists = Formula::Exists(vec![0], Box::new(Formula::and(conjuncts)));
    let conclusion_var = env.var(1);
    let conclusion = replace_in_literal(env, &clit, term, conclusion_var);
    let hypothesis = Formula::Or(vec![
        exists,
        Formula::Atom(conclusion).quantify(&env.terms),
    ]);
    produce_clauses(env, premise, lit_idx, hypothesis, conclusion, rule, out);
}

/// Subterm-ordering structural induction. Introduces a fresh unary predicate
/// `smallerThan` closed under the destructors of the witness y, asserts the
/// premise literal at y, and bounds the complement below y:
///
/// ```text
/// ¬L[v] ∨ ∃y. (L[y]
///              ∧ ⋀_c (y = c(d⃗(y)) → ⋀_j smaller(dⱼ(y)))
///              ∧ ⋀_c ∀x⃗ (smaller(c(x⃗)) → ⋀_j smaller(xⱼ))
///              ∧ ∀z. smaller(z) → ¬L[z])
/// ```
fn perform_struct_induction_three(
    env: &mut Environment,
    premise: &Arc<Clause>,
    lit_idx: usize,
    ilit: &Literal,
    term: TermId,
    rule: InferenceRule,
    out: &mut Vec<Arc<Clause>>,
) {
    let (ta_sort, constructors) = algebra_of(env, term);
    let clit = ilit.complement();
    let x = env.var(0);
    let y = env.var(1);
    let z = env.var(2);

    let smaller = env
        .signature
        .add_fresh_predicate("smallerThan", vec![ta_sort]);

    let l_y = Formula::Atom(replace_in_literal(env, ilit, term, y));
    let mut conjuncts = vec![l_y];
    let mut var = 3u32;

    for con in &constructors {
        if !con.recursive(ta_sort) {
            continue;
        }
        let mut arg_terms = Vec::new();
        let mut ta_args = Vec::new();
        let mut var_terms = Vec::new();
        let mut ta_vars = Vec::new();
        for (j, &dj) in con.destructors.iter().enumerate() {
            let djy = env.app(dj, vec![y]);
            arg_terms.push(djy);
            let xj = env.var(var);
            var += 1;
            var_terms.push(xj);
            if con.arg_sorts[j] == ta_sort {
                ta_args.push(djy);
                ta_vars.push(xj);
            }
        }

        // y = c(d₁(y),…) → ⋀ smaller(dⱼ(y))
        let rebuilt = env.app(con.functor, arg_terms);
        let fixpoint = Formula::Atom(env.equality(ta_sort, true, y, rebuilt));
        let smaller_destructors = Formula::and(
            ta_args
                .iter()
                .map(|&d| Formula::Atom(env.literal(smaller, vec![d], true)))
                .collect(),
        );
        conjuncts.push(Formula::implies(fixpoint, smaller_destructors));

        // ∀x⃗. smaller(c(x⃗)) → ⋀ smaller(xⱼ): closure under destructors
        let con_vars = env.app(con.functor, var_terms);
        let smaller_con = Formula::Atom(env.literal(smaller, vec![con_vars], true));
        let smaller_args = Formula::and(
            ta_vars
                .iter()
                .map(|&v| Formula::Atom(env.literal(smaller, vec![v], true)))
                .collect(),
        );
        conjuncts.push(Formula::implies(smaller_con, smaller_args).quantify(&env.terms));
    }

    // ∀z. smaller(z) → ¬L[z]
    let smaller_z = Formula::Atom(env.literal(smaller, vec![z], true));
    let not_l_z = Formula::Atom(replace_in_literal(env, &clit, term, z));
    conjuncts.push(Formula::Forall(
        vec![2],
        Box::new(Formula::implies(smaller_z, not_l_z)),
    ));

    let exists = Formula::Exists(vec![1], Box::new(Formula::and(conjuncts)));
    let conclusion = replace_in_literal(env, &clit, term, x);
    let hypothesis = Formula::Or(vec![
        exists,
        Formula::Atom(conclusion).quantify(&env.terms),
    ]);
    produce_clauses(env, premise, lit_idx, hypothesis, conclusion, rule, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InductionMode, StructuralInductionScheme};
    use crate::fol::clause::ClauseRole;

    /// An environment with a list algebra (nil, cons) and a goal predicate
    /// over lists, plus a goal constant `t`.
    fn list_env() -> (Environment, TermId, Literal) {
        let mut env = Environment::with_default_options();
        env.options.induction = InductionMode::Structural;
        env.options.induction_choice = InductionChoice::Goal;

        let list = env.sorts.declare("list");
        let ind = SortTable::INDIVIDUAL;
        let nil = env.signature.add_function("nil", vec![], list);
        let cons = env.signature.add_function("cons", vec![ind, list], list);
        env.declare_term_algebra(list, &[nil, cons]);

        let t = env.signature.add_function("t", vec![], list);
        env.signature.function_mut(t).in_goal = true;
        let tt = env.constant(t);

        let p = env.signature.add_predicate("p", vec![list]);
        let lit = env.literal(p, vec![tt], false);
        (env, tt, lit)
    }

    fn goal_premise(env: &Environment, lit: Literal) -> Arc<Clause> {
        Arc::new(Clause::input(
            &env.terms,
            vec![lit],
            ClauseRole::NegatedConjecture,
        ))
    }

    #[test]
    fn test_struct_induction_one_emits_base_and_step() {
        let (mut env, tt, lit) = list_env();
        let premise = goal_premise(&env, lit);

        let mut rule = InductionRule::new();
        let children: Vec<_> = rule.generate(&premise, &mut env).collect();

        // hypothesis (L[nil] ∧ ∀h,τ (L[τ] → L[cons(h,τ)])) → ∀v L[v]
        // clausifies into two clauses, each resolved with ~p(t):
        //   ~p(nil) ∨ p(sk_τ)       (base fails or the witness holds)
        //   ~p(nil) ∨ ~p(cons(sk_h, sk_τ))   (base fails or the step fails)
        assert_eq!(children.len(), 2);
        for child in &children {
            assert_eq!(child.len(), 2);
            assert_eq!(child.inference.rule, InferenceRule::InductionAxiom);
            assert_eq!(child.induction_depth, premise.induction_depth + 1);
            assert!(child.iter().all(|l| l.is_ground(&env.terms)));
        }

        // the resolvents no longer mention the induction target
        for child in &children {
            for l in child.iter() {
                assert!(!env
                    .terms
                    .atom_args(l.atom)
                    .iter()
                    .any(|&a| env.terms.contains_subterm(a, tt)));
            }
        }

        let rendered: Vec<String> = children
            .iter()
            .map(|c| format!("{}", c.display(&env.terms, &env.signature)))
            .collect();
        assert!(rendered.iter().any(|s| s.contains("~p(nil)")));
        assert!(rendered.iter().any(|s| s.contains("cons(")));
    }

    #[test]
    fn test_induction_depth_gate() {
        let (mut env, _, lit) = list_env();
        env.options.max_induction_depth = 1;
        let premise = Arc::new(
            Clause::input(&env.terms, vec![lit], ClauseRole::NegatedConjecture)
                .with_induction_depth(1),
        );

        let mut rule = InductionRule::new();
        assert_eq!(rule.generate(&premise, &mut env).len(), 0);
    }

    #[test]
    fn test_unit_only_gate() {
        let (mut env, _, lit) = list_env();
        env.options.induction_unit_only = true;
        let ind = SortTable::INDIVIDUAL;
        let q = env.signature.add_predicate("q", vec![ind]);
        let a = env.signature.add_function("a", vec![], ind);
        let ta = env.constant(a);
        let qa = env.literal(q, vec![ta], true);

        let premise = Arc::new(Clause::input(
            &env.terms,
            vec![lit, qa],
            ClauseRole::NegatedConjecture,
        ));
        let mut rule = InductionRule::new();
        assert_eq!(rule.generate(&premise, &mut env).len(), 0);
    }

    #[test]
    fn test_goal_gate_skips_axioms() {
        let (mut env, _, lit) = list_env();
        let premise = Arc::new(Clause::input(&env.terms, vec![lit], ClauseRole::Axiom));

        let mut rule = InductionRule::new();
        assert_eq!(rule.generate(&premise, &mut env).len(), 0);
    }

    #[test]
    fn test_non_ground_literals_are_skipped() {
        let (mut env, _, _) = list_env();
        let list = env.sorts.get("list").expect("declared");
        let p = env.signature.add_predicate("p", vec![list]);
        let x = env.var(0);
        let lit = env.literal(p, vec![x], false);
        let premise = goal_premise(&env, lit);

        let mut rule = InductionRule::new();
        assert_eq!(rule.generate(&premise, &mut env).len(), 0);
    }

    #[test]
    fn test_neg_only_gate() {
        let (mut env, tt, _) = list_env();
        env.options.induction_neg_only = true;
        let list = env.sorts.get("list").expect("declared");
        let p = env.signature.add_predicate("p", vec![list]);
        let positive = env.literal(p, vec![tt], true);
        let premise = goal_premise(&env, positive);

        let mut rule = InductionRule::new();
        assert_eq!(rule.generate(&premise, &mut env).len(), 0);
    }

    #[test]
    fn test_redundancy_memo_fires_once() {
        let (mut env, _, lit) = list_env();
        let premise = goal_premise(&env, lit);

        let mut rule = InductionRule::new();
        let first = rule.generate(&premise, &mut env).len();
        assert!(first > 0);
        // the same literal/target pair is filtered on the second pass
        assert_eq!(rule.generate(&premise, &mut env).len(), 0);
    }

    #[test]
    fn test_struct_induction_two_uses_destructors() {
        let (mut env, _, lit) = list_env();
        env.options.struct_induction_scheme = StructuralInductionScheme::Two;
        let premise = goal_premise(&env, lit);

        let mut rule = InductionRule::new();
        let children: Vec<_> = rule.generate(&premise, &mut env).collect();
        assert!(!children.is_empty());

        // some child mentions a destructor applied to the skolem witness
        let rendered: Vec<String> = children
            .iter()
            .map(|c| format!("{}", c.display(&env.terms, &env.signature)))
            .collect();
        assert!(rendered.iter().any(|s| s.contains("cons_0") || s.contains("cons_1")));
    }

    #[test]
    fn test_struct_induction_three_adds_fresh_predicate() {
        let (mut env, _, lit) = list_env();
        env.options.struct_induction_scheme = StructuralInductionScheme::Three;
        let premise = goal_premise(&env, lit);

        let before = env.signature.predicate_count();
        let mut rule = InductionRule::new();
        let children: Vec<_> = rule.generate(&premise, &mut env).collect();
        assert!(!children.is_empty());
        // the smallerThan predicate was registered mid-run
        assert_eq!(env.signature.predicate_count(), before + 1);
    }

    #[test]
    fn test_math_induction_upward_and_downward() {
        let mut env = Environment::with_default_options();
        env.options.induction = InductionMode::Mathematical;
        env.options.induction_choice = InductionChoice::Goal;
        let int = SortTable::INTEGER;

        let n = env.signature.add_function("n", vec![], int);
        env.signature.function_mut(n).in_goal = true;
        let tn = env.constant(n);
        let q = env.signature.add_predicate("q", vec![int]);
        let lit = env.literal(q, vec![tn], false);
        let premise = goal_premise(&env, lit);

        let mut rule = InductionRule::new();
        let children: Vec<_> = rule.generate(&premise, &mut env).collect();
        // two hypotheses (upward, downward), several clauses each
        assert!(children.len() >= 4);
        assert_eq!(env.statistics.induction_applications, 2);

        let rendered: Vec<String> = children
            .iter()
            .map(|c| format!("{}", c.display(&env.terms, &env.signature)))
            .collect();
        // base case instances mention q(0)
        assert!(rendered.iter().any(|s| s.contains("q(0)")));
    }

    #[test]
    fn test_generalisation_enumerates_subsets() {
        let (mut env, tt, _) = list_env();
        env.options.induction_gen = true;
        let list = env.sorts.get("list").expect("declared");
        let r = env.signature.add_predicate("r", vec![list, list]);
        // r(t, t): three nonempty occurrence subsets
        let lit = env.literal(r, vec![tt, tt], false);
        let premise = goal_premise(&env, lit);

        let mut rule = InductionRule::new();
        let children: Vec<_> = rule.generate(&premise, &mut env).collect();
        assert!(!children.is_empty());
        // the two proper subsets are generalized inductions
        assert_eq!(env.statistics.generalized_induction_applications, 2);
        assert_eq!(env.statistics.induction_applications, 3);

        // proper-subset children keep one occurrence of the target
        assert!(children
            .iter()
            .any(|c| c.inference.rule == InferenceRule::GenInductionAxiom));
    }
}
