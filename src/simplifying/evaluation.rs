//! Interpreted evaluation.
//!
//! Walks each literal bottom-up, folding interpreted functions applied to
//! numerals into numerals, and evaluates interpreted predicates over
//! numerals to truth values. Arithmetic failure (division or modulo by
//! zero) is a non-failure: the offending subterm is left intact.
//!
//! Dispatch over the closed sort set {integer, rational, real} is by
//! matching on the interpretation tag; reals share the exact rational
//! representation.

use super::{Simplified, SimplifyingRule};
use crate::env::Environment;
use crate::fol::clause::{Clause, Inference, InferenceRule};
use crate::fol::literal::Literal;
use crate::fol::term::{AtomNode, TermId};
use crate::fol::theory::Interpretation;
use num::{BigInt, BigRational, Zero};
use std::sync::Arc;

/// Interpreted evaluation as a simplifying rule
#[derive(Debug, Default)]
pub struct InterpretedEvaluationRule;

impl InterpretedEvaluationRule {
    pub fn new() -> Self {
        InterpretedEvaluationRule
    }
}

enum LiteralEval {
    Unchanged,
    Simplified(Literal),
    Constant(bool),
}

impl SimplifyingRule for InterpretedEvaluationRule {
    fn name(&self) -> &'static str {
        "Evaluation"
    }

    fn simplify(&mut self, clause: &Arc<Clause>, env: &mut Environment) -> Simplified {
        let mut literals = Vec::with_capacity(clause.len());
        let mut modified = false;
        for lit in &clause.literals {
            match simplify_literal(env, lit) {
                LiteralEval::Unchanged => literals.push(*lit),
                LiteralEval::Simplified(new_lit) => {
                    literals.push(new_lit);
                    modified = true;
                }
                LiteralEval::Constant(true) => {
                    // a true literal makes the clause a tautology
                    env.statistics.evaluations += 1;
                    return Simplified::Redundant;
                }
                LiteralEval::Constant(false) => {
                    modified = true;
                }
            }
        }
        if !modified {
            return Simplified::Unchanged;
        }
        env.statistics.evaluations += 1;
        Simplified::Replaced(Arc::new(Clause::new(
            &env.terms,
            literals,
            Inference::new(InferenceRule::Evaluation, vec![clause.clone()]),
        )))
    }
}

fn simplify_literal(env: &mut Environment, lit: &Literal) -> LiteralEval {
    match env.terms.atom(lit.atom).clone() {
        AtomNode::Pred { predicate, args } => {
            let new_args: Vec<TermId> = args.iter().map(|&a| eval_term(env, a)).collect();
            let interp = env.signature.predicate(predicate).interpretation.clone();
            if let Some(value) = try_evaluate_predicate(env, &interp, &new_args) {
                let value = if lit.polarity { value } else { !value };
                return LiteralEval::Constant(value);
            }
            if new_args != args {
                LiteralEval::Simplified(env.literal(predicate, new_args, lit.polarity))
            } else {
                LiteralEval::Unchanged
            }
        }
        // equality is evaluated by other rules; only its arguments fold
        AtomNode::Eq { sort, lhs, rhs } => {
            let new_lhs = eval_term(env, lhs);
            let new_rhs = eval_term(env, rhs);
            if new_lhs != lhs || new_rhs != rhs {
                LiteralEval::Simplified(env.equality(sort, lit.polarity, new_lhs, new_rhs))
            } else {
                LiteralEval::Unchanged
            }
        }
    }
}

/// Bottom-up evaluation of a term
fn eval_term(env: &mut Environment, t: TermId) -> TermId {
    if env.terms.is_var(t) {
        return t;
    }
    let symbol = env.terms.symbol(t).expect("non-variable term");
    let args = env.terms.args(t).to_vec();
    let new_args: Vec<TermId> = args.iter().map(|&a| eval_term(env, a)).collect();

    let interp = env.signature.function(symbol).interpretation.clone();
    if let Some(folded) = try_evaluate_function(env, &interp, &new_args) {
        return folded;
    }

    if new_args != args {
        env.app(symbol, new_args)
    } else {
        t
    }
}

fn try_evaluate_function(
    env: &mut Environment,
    interp: &Interpretation,
    args: &[TermId],
) -> Option<TermId> {
    use Interpretation::*;
    match interp {
        IntUnaryMinus | IntSuccessor | IntPlus | IntMinus | IntMultiply | IntDivide
        | IntModulo => {
            let values = int_values(env, args)?;
            let result = eval_int_function(interp, &values)?;
            Some(env.int_numeral(result))
        }
        RatUnaryMinus | RatPlus | RatMinus | RatMultiply | RatDivide => {
            let values = fraction_values(env, args)?;
            let result = eval_fraction_function(interp, &values)?;
            Some(env.rat_numeral(result))
        }
        RealUnaryMinus | RealPlus | RealMinus | RealMultiply | RealDivide => {
            let values = fraction_values(env, args)?;
            let result = eval_fraction_function(interp, &values)?;
            Some(env.real_numeral(result))
        }
        _ => None,
    }
}

fn eval_int_function(interp: &Interpretation, values: &[BigInt]) -> Option<BigInt> {
    use Interpretation::*;
    Some(match interp {
        IntUnaryMinus => -&values[0],
        IntSuccessor => &values[0] + 1,
        IntPlus => &values[0] + &values[1],
        IntMinus => &values[0] - &values[1],
        IntMultiply => &values[0] * &values[1],
        IntDivide => {
            if values[1].is_zero() {
                return None;
            }
            &values[0] / &values[1]
        }
        IntModulo => {
            if values[1].is_zero() {
                return None;
            }
            &values[0] % &values[1]
        }
        _ => return None,
    })
}

fn eval_fraction_function(
    interp: &Interpretation,
    values: &[BigRational],
) -> Option<BigRational> {
    use Interpretation::*;
    Some(match interp {
        RatUnaryMinus | RealUnaryMinus => -&values[0],
        RatPlus | RealPlus => &values[0] + &values[1],
        RatMinus | RealMinus => &values[0] - &values[1],
        RatMultiply | RealMultiply => &values[0] * &values[1],
        RatDivide | RealDivide => {
            if values[1].is_zero() {
                return None;
            }
            &values[0] / &values[1]
        }
        _ => return None,
    })
}

fn try_evaluate_predicate(
    env: &Environment,
    interp: &Interpretation,
    args: &[TermId],
) -> Option<bool> {
    use Interpretation::*;
    match interp {
        IntGreater | IntGreaterEqual | IntLess | IntLessEqual | IntDivides => {
            let values = int_values(env, args)?;
            match interp {
                IntGreater => Some(values[0] > values[1]),
                IntGreaterEqual => Some(values[0] >= values[1]),
                IntLess => Some(values[0] < values[1]),
                IntLessEqual => Some(values[0] <= values[1]),
                IntDivides => {
                    if values[1].is_zero() {
                        None
                    } else {
                        Some((&values[0] % &values[1]).is_zero())
                    }
                }
                _ => None,
            }
        }
        RatGreater | RatGreaterEqual | RatLess | RatLessEqual | RatIsInt | RealGreater
        | RealGreaterEqual | RealLess | RealLessEqual | RealIsInt | RealIsRat => {
            let values = fraction_values(env, args)?;
            match interp {
                RatGreater | RealGreater => Some(values[0] > values[1]),
                RatGreaterEqual | RealGreaterEqual => Some(values[0] >= values[1]),
                RatLess | RealLess => Some(values[0] < values[1]),
                RatLessEqual | RealLessEqual => Some(values[0] <= values[1]),
                RatIsInt | RealIsInt => Some(values[0].is_integer()),
                // reals are represented as exact rationals
                RealIsRat => Some(true),
                _ => None,
            }
        }
        _ => None,
    }
}

fn int_values(env: &Environment, args: &[TermId]) -> Option<Vec<BigInt>> {
    args.iter()
        .map(|&a| env.as_int_numeral(a).cloned())
        .collect()
}

fn fraction_values(env: &Environment, args: &[TermId]) -> Option<Vec<BigRational>> {
    args.iter()
        .map(|&a| env.as_fraction_numeral(a).cloned())
        .collect()
}
