//! One-sided unification (matching).
//!
//! Matching instantiates variables of the pattern only; the subject is rigid.
//! The subsumption engine uses the plain map-based matcher, the rules use the
//! banked variant sharing a [`Substitution`].

use crate::env::Environment;
use crate::fol::literal::Literal;
use crate::fol::term::{AtomNode, TermBank, TermId, TermNode};
use crate::unification::substitution::{BankedTerm, Substitution};
use std::collections::HashMap;

/// Match a banked pattern onto a banked subject, binding only pattern
/// variables. Restores the substitution on failure.
pub fn match_term(
    env: &Environment,
    subst: &mut Substitution,
    pattern: BankedTerm,
    subject: BankedTerm,
) -> bool {
    let mark = subst.mark();
    if match_inner(&env.terms, subst, pattern, subject) {
        true
    } else {
        subst.restore(mark);
        false
    }
}

fn match_inner(
    bank: &TermBank,
    subst: &mut Substitution,
    pattern: BankedTerm,
    subject: BankedTerm,
) -> bool {
    match bank.node(pattern.0) {
        TermNode::Var { index } => {
            let key = (*index, pattern.1);
            match subst.lookup(key) {
                Some(bound) => bound == subject,
                None => {
                    subst.bind_unchecked(key, subject);
                    true
                }
            }
        }
        TermNode::App {
            symbol: pf,
            args: pargs,
            ..
        } => match bank.node(subject.0) {
            // subject variables are never bound
            TermNode::Var { .. } => false,
            TermNode::App {
                symbol: sf,
                args: sargs,
                ..
            } => {
                pf == sf
                    && pargs
                        .iter()
                        .zip(sargs.iter())
                        .all(|(&p, &s)| match_inner(bank, subst, (p, pattern.1), (s, subject.1)))
            }
        },
    }
}

/// Map-based matcher used by subsumption: bind pattern variables to subject
/// terms, with subject terms taken verbatim (no banks). Extends `map` on
/// success; the caller owns rollback.
pub fn match_term_into(
    bank: &TermBank,
    pattern: TermId,
    subject: TermId,
    map: &mut HashMap<u32, TermId>,
    trail: &mut Vec<u32>,
) -> bool {
    match bank.node(pattern) {
        TermNode::Var { index } => match map.get(index) {
            Some(&bound) => bound == subject,
            None => {
                map.insert(*index, subject);
                trail.push(*index);
                true
            }
        },
        TermNode::App {
            symbol: pf,
            args: pargs,
            ..
        } => match bank.node(subject) {
            TermNode::Var { .. } => false,
            TermNode::App {
                symbol: sf,
                args: sargs,
                ..
            } => {
                pf == sf
                    && pargs
                        .iter()
                        .zip(sargs.iter())
                        .all(|(&p, &s)| match_term_into(bank, p, s, map, trail))
            }
        },
    }
}

/// Match the arguments of two same-polarity literals, pattern onto subject.
/// Equalities may be matched in either orientation; `reversed` selects which.
pub fn match_literal_into(
    bank: &TermBank,
    pattern: &Literal,
    subject: &Literal,
    reversed: bool,
    map: &mut HashMap<u32, TermId>,
    trail: &mut Vec<u32>,
) -> bool {
    if pattern.polarity != subject.polarity {
        return false;
    }
    match (bank.atom(pattern.atom), bank.atom(subject.atom)) {
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
            !reversed
                && p1 == p2
                && args1
                    .iter()
                    .zip(args2.iter())
                    .all(|(&p, &s)| match_term_into(bank, p, s, map, trail))
        }
        (
            AtomNode::Eq {
                sort: sort1,
                lhs: l1,
                rhs: r1,
            },
            AtomNode::Eq {
                sort: sort2,
                lhs: l2,
                rhs: r2,
            },
        ) => {
            if sort1 != sort2 {
                return false;
            }
            let (s_lhs, s_rhs) = if reversed { (*r2, *l2) } else { (*l2, *r2) };
            match_term_into(bank, *l1, s_lhs, map, trail)
                && match_term_into(bank, *r1, s_rhs, map, trail)
        }
        _ => false,
    }
}
