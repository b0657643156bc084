//! Clauses and their provenance.
//!
//! A clause is an ordered sequence of literals, semantically a multiset
//! interpreted as a universally closed disjunction. The empty clause denotes
//! ⊥. Every clause carries an inference record (rule plus parent clauses)
//! forming an acyclic derivation DAG rooted at input clauses.

use crate::fol::literal::Literal;
use crate::fol::signature::{Color, Signature};
use crate::fol::term::{AtomNode, TermBank};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

/// Input type of a clause (derived clauses keep `Derived`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClauseRole {
    #[default]
    Axiom,
    Assumption,
    Lemma,
    /// The goal, stored negated
    NegatedConjecture,
    Derived,
}

impl ClauseRole {
    pub fn is_goal(&self) -> bool {
        matches!(self, ClauseRole::NegatedConjecture)
    }
}

/// Rule identifiers for inference records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InferenceRule {
    Input,
    EqualityResolution,
    GaussianVariableElimination,
    DistinctEqualityRemoval,
    Evaluation,
    InductionAxiom,
    GenInductionAxiom,
    Clausification,
    Resolution,
    EqualityProxy,
}

impl InferenceRule {
    pub fn name(&self) -> &'static str {
        match self {
            InferenceRule::Input => "Input",
            InferenceRule::EqualityResolution => "EqualityResolution",
            InferenceRule::GaussianVariableElimination => "GaussianVariableElimination",
            InferenceRule::DistinctEqualityRemoval => "DistinctEqualityRemoval",
            InferenceRule::Evaluation => "Evaluation",
            InferenceRule::InductionAxiom => "InductionAxiom",
            InferenceRule::GenInductionAxiom => "GenInductionAxiom",
            InferenceRule::Clausification => "Clausification",
            InferenceRule::Resolution => "Resolution",
            InferenceRule::EqualityProxy => "EqualityProxy",
        }
    }
}

impl fmt::Display for InferenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Provenance record: the rule applied and the parent clauses
#[derive(Debug, Clone, Serialize)]
pub struct Inference {
    pub rule: InferenceRule,
    pub parents: Vec<Arc<Clause>>,
}

impl Inference {
    pub fn input() -> Self {
        Inference {
            rule: InferenceRule::Input,
            parents: Vec::new(),
        }
    }

    pub fn new(rule: InferenceRule, parents: Vec<Arc<Clause>>) -> Self {
        Inference { rule, parents }
    }
}

/// A clause: literals plus provenance, age, cached weight, induction depth
/// and the count of leading literals selected for generating inferences.
#[derive(Debug, Clone, Serialize)]
pub struct Clause {
    pub literals: Vec<Literal>,
    pub role: ClauseRole,
    pub inference: Inference,
    /// Generation counter; inputs are 0
    pub age: usize,
    /// Cached symbol count of all literals
    pub weight: usize,
    /// Number of induction axioms above this clause in the derivation DAG
    pub induction_depth: usize,
    /// Whether the conjecture is among the ancestors
    pub derived_from_goal: bool,
    /// The first `selected` literals are selected; literal selection reorders
    /// the sequence so selected literals come first
    pub selected: usize,
}

impl Clause {
    /// Create a derived clause. Age, induction depth and the goal flag are
    /// inherited from the parents; all literals start selected.
    pub fn new(bank: &TermBank, literals: Vec<Literal>, inference: Inference) -> Self {
        let weight = literals.iter().map(|l| l.weight(bank)).sum();
        let age = inference
            .parents
            .iter()
            .map(|p| p.age + 1)
            .max()
            .unwrap_or(0);
        let induction_depth = inference
            .parents
            .iter()
            .map(|p| p.induction_depth)
            .max()
            .unwrap_or(0);
        let derived_from_goal = inference.parents.iter().any(|p| p.derived_from_goal);
        let role = if matches!(inference.rule, InferenceRule::Input) {
            ClauseRole::Axiom
        } else {
            ClauseRole::Derived
        };
        let selected = literals.len();
        Clause {
            literals,
            role,
            inference,
            age,
            weight,
            induction_depth,
            derived_from_goal,
            selected,
        }
    }

    /// Create an input clause with the given role
    pub fn input(bank: &TermBank, literals: Vec<Literal>, role: ClauseRole) -> Self {
        let mut clause = Clause::new(bank, literals, Inference::input());
        clause.derived_from_goal = role.is_goal();
        clause.role = role;
        clause
    }

    /// Replace only the provenance of the clause
    pub fn with_inference(&self, inference: Inference) -> Self {
        let mut clause = self.clone();
        clause.inference = inference;
        clause
    }

    pub fn with_induction_depth(mut self, depth: usize) -> Self {
        self.induction_depth = depth;
        self
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// The empty clause denotes ⊥
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Literal> {
        self.literals.iter()
    }

    /// The literals eligible as premises of generating inferences
    pub fn selected_literals(&self) -> &[Literal] {
        &self.literals[..self.selected]
    }

    pub fn contains(&self, lit: &Literal) -> bool {
        self.literals.contains(lit)
    }

    /// A clause is a tautology if it contains complementary literals or a
    /// reflexive positive equality.
    pub fn is_tautology(&self, bank: &TermBank) -> bool {
        for i in 0..self.literals.len() {
            for j in (i + 1)..self.literals.len() {
                if self.literals[i].atom == self.literals[j].atom
                    && self.literals[i].polarity != self.literals[j].polarity
                {
                    return true;
                }
            }
        }
        for lit in &self.literals {
            if lit.polarity {
                if let AtomNode::Eq { lhs, rhs, .. } = bank.atom(lit.atom) {
                    if lhs == rhs {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Combined color of every symbol occurring in the clause
    pub fn color(&self, bank: &TermBank, sig: &Signature) -> Color {
        let mut color = Color::Transparent;
        for lit in &self.literals {
            if let AtomNode::Pred { predicate, .. } = bank.atom(lit.atom) {
                color = color.join(sig.predicate(*predicate).color);
            }
            for t in bank.atom_subterms(lit.atom) {
                if let Some(f) = bank.symbol(t) {
                    color = color.join(sig.function(f).color);
                }
            }
        }
        color
    }

    /// Format this clause with the signature for name resolution
    pub fn display<'a>(&'a self, bank: &'a TermBank, sig: &'a Signature) -> ClauseDisplay<'a> {
        ClauseDisplay {
            clause: self,
            bank,
            sig,
        }
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, i: usize) -> &Literal {
        &self.literals[i]
    }
}

/// Display wrapper for clauses
pub struct ClauseDisplay<'a> {
    clause: &'a Clause,
    bank: &'a TermBank,
    sig: &'a Signature,
}

impl<'a> fmt::Display for ClauseDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clause.is_empty() {
            write!(f, "⊥")
        } else {
            for (i, lit) in self.clause.literals.iter().enumerate() {
                if i > 0 {
                    write!(f, " ∨ ")?;
                }
                write!(f, "{}", lit.display(self.bank, self.sig))?;
            }
            Ok(())
        }
    }
}
