//! Interpreted symbols of the arithmetic theories.
//!
//! The theory language is closed: integer, rational and real arithmetic with
//! the operators below. Numerals are represented exactly — integers as
//! [`BigInt`], rationals and reals as [`BigRational`] (reals are exact
//! rationals, which is why `$is_rat` evaluates to true on every representable
//! real).

use crate::fol::sorts::{SortId, SortTable};
use num::{BigInt, BigRational};
use serde::{Deserialize, Serialize};

/// Interpretation tag of a function or predicate symbol.
///
/// `Uninterpreted` is the default for every user symbol. Numeral variants
/// carry the exact constant value of the symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interpretation {
    Uninterpreted,

    IntNumeral(BigInt),
    RatNumeral(BigRational),
    RealNumeral(BigRational),

    // integer functions
    IntUnaryMinus,
    IntSuccessor,
    IntPlus,
    IntMinus,
    IntMultiply,
    IntDivide,
    IntModulo,
    // integer predicates
    IntGreater,
    IntGreaterEqual,
    IntLess,
    IntLessEqual,
    IntDivides,

    // rational functions
    RatUnaryMinus,
    RatPlus,
    RatMinus,
    RatMultiply,
    RatDivide,
    // rational predicates
    RatGreater,
    RatGreaterEqual,
    RatLess,
    RatLessEqual,
    RatIsInt,

    // real functions
    RealUnaryMinus,
    RealPlus,
    RealMinus,
    RealMultiply,
    RealDivide,
    // real predicates
    RealGreater,
    RealGreaterEqual,
    RealLess,
    RealLessEqual,
    RealIsInt,
    RealIsRat,
}

use Interpretation::*;

impl Interpretation {
    pub fn is_uninterpreted(&self) -> bool {
        matches!(self, Uninterpreted)
    }

    pub fn is_numeral(&self) -> bool {
        matches!(self, IntNumeral(_) | RatNumeral(_) | RealNumeral(_))
    }

    /// True for interpreted function symbols (numerals included)
    pub fn is_function(&self) -> bool {
        matches!(
            self,
            IntNumeral(_)
                | RatNumeral(_)
                | RealNumeral(_)
                | IntUnaryMinus
                | IntSuccessor
                | IntPlus
                | IntMinus
                | IntMultiply
                | IntDivide
                | IntModulo
                | RatUnaryMinus
                | RatPlus
                | RatMinus
                | RatMultiply
                | RatDivide
                | RealUnaryMinus
                | RealPlus
                | RealMinus
                | RealMultiply
                | RealDivide
        )
    }

    /// True for interpreted predicate symbols
    pub fn is_predicate(&self) -> bool {
        !self.is_uninterpreted() && !self.is_function()
    }

    /// True for the ordering predicates <, ≤, >, ≥ of any numeric sort
    pub fn is_inequality(&self) -> bool {
        matches!(
            self,
            IntGreater
                | IntGreaterEqual
                | IntLess
                | IntLessEqual
                | RatGreater
                | RatGreaterEqual
                | RatLess
                | RatLessEqual
                | RealGreater
                | RealGreaterEqual
                | RealLess
                | RealLessEqual
        )
    }

    /// The sort the operation works on (argument sort for predicates,
    /// argument and result sort for functions).
    pub fn operand_sort(&self) -> Option<SortId> {
        match self {
            Uninterpreted => None,
            IntNumeral(_) | IntUnaryMinus | IntSuccessor | IntPlus | IntMinus | IntMultiply
            | IntDivide | IntModulo | IntGreater | IntGreaterEqual | IntLess | IntLessEqual
            | IntDivides => Some(SortTable::INTEGER),
            RatNumeral(_) | RatUnaryMinus | RatPlus | RatMinus | RatMultiply | RatDivide
            | RatGreater | RatGreaterEqual | RatLess | RatLessEqual | RatIsInt => {
                Some(SortTable::RATIONAL)
            }
            RealNumeral(_) | RealUnaryMinus | RealPlus | RealMinus | RealMultiply | RealDivide
            | RealGreater | RealGreaterEqual | RealLess | RealLessEqual | RealIsInt
            | RealIsRat => Some(SortTable::REAL),
        }
    }

    /// Arity of the interpreted operation
    pub fn arity(&self) -> usize {
        match self {
            Uninterpreted => 0,
            IntNumeral(_) | RatNumeral(_) | RealNumeral(_) => 0,
            IntUnaryMinus | IntSuccessor | RatUnaryMinus | RealUnaryMinus | RatIsInt
            | RealIsInt | RealIsRat => 1,
            _ => 2,
        }
    }

    /// Canonical TPTP-style symbol name
    pub fn name(&self) -> String {
        match self {
            Uninterpreted => String::new(),
            IntNumeral(n) => n.to_string(),
            RatNumeral(r) | RealNumeral(r) => {
                if r.is_integer() {
                    r.numer().to_string()
                } else {
                    format!("{}/{}", r.numer(), r.denom())
                }
            }
            IntUnaryMinus | RatUnaryMinus | RealUnaryMinus => "$uminus".into(),
            IntSuccessor => "$successor".into(),
            IntPlus | RatPlus | RealPlus => "$sum".into(),
            IntMinus | RatMinus | RealMinus => "$difference".into(),
            IntMultiply | RatMultiply | RealMultiply => "$product".into(),
            IntDivide | RatDivide | RealDivide => "$quotient".into(),
            IntModulo => "$remainder".into(),
            IntGreater | RatGreater | RealGreater => "$greater".into(),
            IntGreaterEqual | RatGreaterEqual | RealGreaterEqual => "$greatereq".into(),
            IntLess | RatLess | RealLess => "$less".into(),
            IntLessEqual | RatLessEqual | RealLessEqual => "$lesseq".into(),
            IntDivides => "$divides".into(),
            RatIsInt | RealIsInt => "$is_int".into(),
            RealIsRat => "$is_rat".into(),
        }
    }

    /// Infix rendering of binary arithmetic operators, None when the symbol
    /// is printed in prefix form.
    pub fn infix(&self) -> Option<&'static str> {
        match self {
            IntPlus | RatPlus | RealPlus => Some("+"),
            IntMinus | RatMinus | RealMinus => Some("-"),
            IntMultiply | RatMultiply | RealMultiply => Some("*"),
            IntDivide | RatDivide | RealDivide => Some("/"),
            IntModulo => Some("mod"),
            IntGreater | RatGreater | RealGreater => Some(">"),
            IntGreaterEqual | RatGreaterEqual | RealGreaterEqual => Some(">="),
            IntLess | RatLess | RealLess => Some("<"),
            IntLessEqual | RatLessEqual | RealLessEqual => Some("<="),
            _ => None,
        }
    }

    /// True for the unary minus of any numeric sort
    pub fn is_unary_minus(&self) -> bool {
        matches!(self, IntUnaryMinus | RatUnaryMinus | RealUnaryMinus)
    }
}
