//! Literals: signed atoms.
//!
//! A literal is an interned atom plus a polarity bit, so literals are shared
//! modulo polarity and are `Copy`.

use crate::fol::signature::{PredicateId, Signature};
use crate::fol::sorts::SortId;
use crate::fol::term::{write_term, AtomId, AtomNode, TermBank, TermId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A positive or negative atomic formula
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub atom: AtomId,
    /// true = positive, false = negative
    pub polarity: bool,
}

impl Literal {
    pub fn positive(atom: AtomId) -> Self {
        Literal {
            atom,
            polarity: true,
        }
    }

    pub fn negative(atom: AtomId) -> Self {
        Literal {
            atom,
            polarity: false,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.polarity
    }

    pub fn is_negative(&self) -> bool {
        !self.polarity
    }

    /// The literal with the opposite polarity on the same atom
    pub fn complement(&self) -> Literal {
        Literal {
            atom: self.atom,
            polarity: !self.polarity,
        }
    }

    pub fn is_equality(&self, bank: &TermBank) -> bool {
        matches!(bank.atom(self.atom), AtomNode::Eq { .. })
    }

    /// Sides and sort of an equality literal
    pub fn as_equality(&self, bank: &TermBank) -> Option<(SortId, TermId, TermId)> {
        match bank.atom(self.atom) {
            AtomNode::Eq { sort, lhs, rhs } => Some((*sort, *lhs, *rhs)),
            _ => None,
        }
    }

    /// Predicate symbol of a non-equality literal
    pub fn predicate(&self, bank: &TermBank) -> Option<PredicateId> {
        match bank.atom(self.atom) {
            AtomNode::Pred { predicate, .. } => Some(*predicate),
            _ => None,
        }
    }

    pub fn args(&self, bank: &TermBank) -> Vec<TermId> {
        bank.atom_args(self.atom)
    }

    pub fn is_ground(&self, bank: &TermBank) -> bool {
        bank.atom_ground(self.atom)
    }

    /// Symbol count of the literal
    pub fn weight(&self, bank: &TermBank) -> usize {
        bank.atom_weight(self.atom)
    }

    /// Format this literal with the signature for name resolution
    pub fn display<'a>(&self, bank: &'a TermBank, sig: &'a Signature) -> LiteralDisplay<'a> {
        LiteralDisplay {
            bank,
            sig,
            literal: *self,
        }
    }
}

/// Display wrapper for literals. Equalities render infix (`s = t`, `s != t`),
/// everything else prefix with `~` marking negative polarity.
pub struct LiteralDisplay<'a> {
    bank: &'a TermBank,
    sig: &'a Signature,
    literal: Literal,
}

impl<'a> fmt::Display for LiteralDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bank.atom(self.literal.atom) {
            AtomNode::Eq { lhs, rhs, .. } => {
                write_term(f, self.bank, self.sig, *lhs)?;
                write!(f, " {} ", if self.literal.polarity { "=" } else { "!=" })?;
                write_term(f, self.bank, self.sig, *rhs)
            }
            AtomNode::Pred { predicate, args } => {
                if !self.literal.polarity {
                    write!(f, "~")?;
                }
                write!(f, "{}", self.sig.predicate(*predicate).name)?;
                if !args.is_empty() {
                    write!(f, "(")?;
                    for (i, &a) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write_term(f, self.bank, self.sig, a)?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}
