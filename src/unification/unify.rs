//! Robinson unification, with optional unification-with-abstraction.
//!
//! Unification mutates a [`Substitution`] and restores it to the pre-call
//! mark on failure. A sort clash between two applications is a unification
//! failure, never a panic. Under an abstraction policy, a top-level
//! disagreement that the policy covers is deferred instead of failing: the
//! offending pair is pushed onto the constraint stack and unification
//! proceeds as if the two terms had unified. The consuming rule turns each
//! constraint into an extra disequality literal on the conclusion.

use crate::config::AbstractionPolicy;
use crate::env::Environment;
use crate::fol::term::{TermBank, TermId, TermNode};
use crate::unification::substitution::{BankedTerm, Substitution};

/// A deferred disagreement pair recorded by unification-with-abstraction
pub type Constraint = (BankedTerm, BankedTerm);

/// Classical unification of two banked terms. On success the substitution
/// holds an MGU extension; on failure it is restored to the pre-call state.
pub fn unify(
    env: &Environment,
    subst: &mut Substitution,
    s: BankedTerm,
    t: BankedTerm,
) -> bool {
    let mut no_constraints = Vec::new();
    unify_with_abstraction(env, subst, s, t, AbstractionPolicy::Off, &mut no_constraints)
}

/// Unification with abstraction. Emitted constraints are appended to
/// `constraints`; the stack is truncated back on failure.
pub fn unify_with_abstraction(
    env: &Environment,
    subst: &mut Substitution,
    s: BankedTerm,
    t: BankedTerm,
    policy: AbstractionPolicy,
    constraints: &mut Vec<Constraint>,
) -> bool {
    let mark = subst.mark();
    let constraints_mark = constraints.len();
    if unify_inner(env, subst, s, t, policy, constraints) {
        true
    } else {
        subst.restore(mark);
        constraints.truncate(constraints_mark);
        false
    }
}

fn unify_inner(
    env: &Environment,
    subst: &mut Substitution,
    s: BankedTerm,
    t: BankedTerm,
    policy: AbstractionPolicy,
    constraints: &mut Vec<Constraint>,
) -> bool {
    let bank = &env.terms;
    let mut pairs = vec![(s, t)];

    while let Some((s, t)) = pairs.pop() {
        let s = subst.deref(bank, s);
        let t = subst.deref(bank, t);
        if s == t {
            continue;
        }
        match (bank.node(s.0), bank.node(t.0)) {
            (TermNode::Var { index }, _) => {
                if subst.bind(bank, (*index, s.1), t).is_err() {
                    return false;
                }
            }
            (_, TermNode::Var { index }) => {
                if subst.bind(bank, (*index, t.1), s).is_err() {
                    return false;
                }
            }
            (
                TermNode::App {
                    symbol: f1,
                    args: args1,
                    sort: sort1,
                    ..
                },
                TermNode::App {
                    symbol: f2,
                    args: args2,
                    sort: sort2,
                    ..
                },
            ) => {
                if sort1 != sort2 {
                    // type clash is a failure, abstraction never crosses sorts
                    return false;
                }
                if f1 == f2 {
                    for (&a1, &a2) in args1.iter().zip(args2.iter()) {
                        pairs.push(((a1, s.1), (a2, t.1)));
                    }
                } else if can_abstract(env, policy, s.0, t.0) {
                    constraints.push((s, t));
                } else {
                    return false;
                }
            }
        }
    }
    true
}

/// Whether a top-symbol disagreement may be deferred as a constraint.
///
/// `Full` abstracts any clash involving a theory term. `Ground` additionally
/// abstracts clashes between two non-ground uninterpreted terms; the
/// consuming rule rejects the inference if such a pair stays non-ground and
/// non-theory after the final substitution is applied.
fn can_abstract(env: &Environment, policy: AbstractionPolicy, s: TermId, t: TermId) -> bool {
    match policy {
        AbstractionPolicy::Off => false,
        AbstractionPolicy::Full => env.is_theory_term(s) || env.is_theory_term(t),
        AbstractionPolicy::Ground => {
            env.is_theory_term(s)
                || env.is_theory_term(t)
                || (!env.terms.is_ground(s) && !env.terms.is_ground(t))
        }
    }
}

/// Same-bank convenience wrapper used by rules resolving within one premise
pub fn unify_terms(env: &Environment, subst: &mut Substitution, s: TermId, t: TermId) -> bool {
    unify(env, subst, (s, 0), (t, 0))
}

/// Check that a substitution makes two banked terms equal without extending
/// it (used by tests and the subsumption consistency check).
pub fn equal_under(
    bank: &TermBank,
    subst: &Substitution,
    s: BankedTerm,
    t: BankedTerm,
) -> bool {
    let s = subst.deref(bank, s);
    let t = subst.deref(bank, t);
    if s == t {
        return true;
    }
    match (bank.node(s.0), bank.node(t.0)) {
        (
            TermNode::App {
                symbol: f1,
                args: args1,
                ..
            },
            TermNode::App {
                symbol: f2,
                args: args2,
                ..
            },
        ) => {
            f1 == f2
                && args1
                    .iter()
                    .zip(args2.iter())
                    .all(|(&a1, &a2)| equal_under(bank, subst, (a1, s.1), (a2, t.1)))
        }
        _ => false,
    }
}
