//! Rebalancing of arithmetic equalities.
//!
//! Enumerates all ways of rewriting an equality `s = t` into `x = rhs` by
//! inverting interpreted operators along a path from the root of one side to
//! a variable position. Iterating over `x * 7 = y + 1` gives
//! `x = (y + 1) / 7` and `y = (x * 7) - 1`.
//!
//! Inversion rules per sort: addition inverts on both argument positions;
//! binary and unary minus always invert; multiplication over the fraction
//! sorts inverts when the other argument is a non-zero numeral, over the
//! integers only when it is 1 or -1.

use crate::env::Environment;
use crate::fol::term::TermId;
use crate::fol::theory::Interpretation;
use num::{BigInt, One, Zero};

/// One rebalancing: a variable left-hand side and the inverted right-hand
/// side built from the rest of the equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rebalancing {
    pub var: TermId,
    pub rhs: TermId,
}

/// Enumerate every rebalancing of the equality `lhs = rhs`, in left-to-right
/// order of the variable positions.
pub fn rebalancings(env: &mut Environment, lhs: TermId, rhs: TermId) -> Vec<Rebalancing> {
    let mut out = Vec::new();
    descend(env, lhs, rhs, &mut out);
    descend(env, rhs, lhs, &mut out);
    out
}

/// Walk into `side`, carrying the inverted context in `target`.
fn descend(env: &mut Environment, side: TermId, target: TermId, out: &mut Vec<Rebalancing>) {
    if env.terms.is_var(side) {
        out.push(Rebalancing {
            var: side,
            rhs: target,
        });
        return;
    }
    let args = env.terms.args(side).to_vec();
    for (index, &arg) in args.iter().enumerate() {
        if let Some(new_target) = invert_top(env, side, index, target) {
            descend(env, arg, new_target, out);
        }
    }
}

/// Invert the top operator of `term` around argument position `index`,
/// wrapping `target`. None when the operator cannot be inverted there.
fn invert_top(
    env: &mut Environment,
    term: TermId,
    index: usize,
    target: TermId,
) -> Option<TermId> {
    use Interpretation::*;

    let interp = env.head_interpretation(term).clone();
    let args = env.terms.args(term).to_vec();
    match interp {
        // a + b = t inverts to t - other on either position
        IntPlus => Some(minus_of(env, IntMinus, target, args[1 - index])),
        RatPlus => Some(minus_of(env, RatMinus, target, args[1 - index])),
        RealPlus => Some(minus_of(env, RealMinus, target, args[1 - index])),

        // a - b = t: a = t + b, b = a - t
        IntMinus => Some(invert_minus(env, IntPlus, IntMinus, &args, index, target)),
        RatMinus => Some(invert_minus(env, RatPlus, RatMinus, &args, index, target)),
        RealMinus => Some(invert_minus(env, RealPlus, RealMinus, &args, index, target)),

        // -a = t inverts to a = -t
        IntUnaryMinus => Some(env.interpreted_app(IntUnaryMinus, vec![target])),
        RatUnaryMinus => Some(env.interpreted_app(RatUnaryMinus, vec![target])),
        RealUnaryMinus => Some(env.interpreted_app(RealUnaryMinus, vec![target])),

        // a * b = t over fractions inverts to t / b for non-zero numeral b
        RatMultiply => invert_fraction_mul(env, RatDivide, args[1 - index], target),
        RealMultiply => invert_fraction_mul(env, RealDivide, args[1 - index], target),

        // over the integers only multiplication by 1 or -1 inverts
        IntMultiply => invert_int_mul(env, args[1 - index], target),

        _ => None,
    }
}

fn minus_of(
    env: &mut Environment,
    minus: Interpretation,
    target: TermId,
    other: TermId,
) -> TermId {
    env.interpreted_app(minus, vec![target, other])
}

fn invert_minus(
    env: &mut Environment,
    plus: Interpretation,
    minus: Interpretation,
    args: &[TermId],
    index: usize,
    target: TermId,
) -> TermId {
    if index == 0 {
        // a = target + b
        env.interpreted_app(plus, vec![target, args[1]])
    } else {
        // b = a - target
        env.interpreted_app(minus, vec![args[0], target])
    }
}

fn invert_fraction_mul(
    env: &mut Environment,
    divide: Interpretation,
    other: TermId,
    target: TermId,
) -> Option<TermId> {
    match env.as_fraction_numeral(other) {
        Some(value) if !value.is_zero() => Some(env.interpreted_app(divide, vec![target, other])),
        _ => None,
    }
}

fn invert_int_mul(env: &mut Environment, other: TermId, target: TermId) -> Option<TermId> {
    let value = env.as_int_numeral(other)?.clone();
    if value == BigInt::one() {
        Some(target)
    } else if (-&value).is_one() {
        let negative_one = env.int_numeral(value);
        Some(env.interpreted_app(Interpretation::IntMultiply, vec![negative_one, target]))
    } else {
        None
    }
}
