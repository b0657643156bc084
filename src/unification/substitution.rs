//! Backtrackable substitutions over banked variables.
//!
//! A substitution maps `(variable, bank)` pairs to terms; the bank is a small
//! integer keeping the variable namespaces of different premises disjoint
//! during unification. Every binding is recorded on a trail so that a failed
//! unification attempt can rewind to its starting mark.

use crate::env::Environment;
use crate::fol::clause::Clause;
use crate::fol::literal::Literal;
use crate::fol::term::{AtomNode, TermBank, TermId, TermNode};
use std::collections::HashMap;

/// A variable occurrence in a specific bank
pub type BankedVar = (u32, u32);

/// A term read in a specific bank
pub type BankedTerm = (TermId, u32);

/// Occurs-check failure from [`Substitution::bind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccursCheck;

/// Trail position returned by [`Substitution::mark`]
#[derive(Debug, Clone, Copy)]
pub struct Mark(usize);

/// A backtrackable substitution
#[derive(Debug, Default)]
pub struct Substitution {
    map: HashMap<BankedVar, BankedTerm>,
    trail: Vec<BankedVar>,
    /// Memoized fresh variables assigned to unbound inputs by `apply`
    output_vars: HashMap<BankedVar, u32>,
    next_output_var: u32,
}

impl Substitution {
    pub fn new() -> Self {
        Substitution::default()
    }

    /// Forget all bindings and the output renaming
    pub fn reset(&mut self) {
        self.map.clear();
        self.trail.clear();
        self.output_vars.clear();
        self.next_output_var = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Save the current trail position
    pub fn mark(&self) -> Mark {
        Mark(self.trail.len())
    }

    /// Undo every binding made after the mark
    pub fn restore(&mut self, mark: Mark) {
        while self.trail.len() > mark.0 {
            if let Some(var) = self.trail.pop() {
                self.map.remove(&var);
            }
        }
    }

    pub fn lookup(&self, var: BankedVar) -> Option<BankedTerm> {
        self.map.get(&var).copied()
    }

    /// Follow variable bindings until reaching an application or an unbound
    /// variable.
    pub fn deref(&self, bank: &TermBank, mut term: BankedTerm) -> BankedTerm {
        loop {
            match bank.node(term.0) {
                TermNode::Var { index } => match self.lookup((*index, term.1)) {
                    Some(next) => term = next,
                    None => return term,
                },
                TermNode::App { .. } => return term,
            }
        }
    }

    /// Whether the banked variable occurs in the term, bindings walked
    pub fn occurs(&self, bank: &TermBank, var: BankedVar, term: BankedTerm) -> bool {
        let (t, b) = self.deref(bank, term);
        match bank.node(t) {
            TermNode::Var { index } => (*index, b) == var,
            TermNode::App { args, .. } => args.iter().any(|&a| self.occurs(bank, var, (a, b))),
        }
    }

    /// Bind a variable after an occurs check, extending the trail
    pub fn bind(
        &mut self,
        bank: &TermBank,
        var: BankedVar,
        term: BankedTerm,
    ) -> Result<(), OccursCheck> {
        if self.occurs(bank, var, term) {
            return Err(OccursCheck);
        }
        self.bind_unchecked(var, term);
        Ok(())
    }

    /// Bind without the occurs check; the caller has already walked the term
    pub fn bind_unchecked(&mut self, var: BankedVar, term: BankedTerm) {
        self.trail.push(var);
        self.map.insert(var, term);
    }

    /// Full walk-and-rebuild of a banked term, producing a term without bank
    /// annotations. Unbound variables are renamed to fresh output variables,
    /// consistently across calls until the next `reset`.
    pub fn apply(&mut self, env: &mut Environment, term: TermId, bank: u32) -> TermId {
        let (t, b) = self.deref(&env.terms, (term, bank));
        match env.terms.node(t) {
            TermNode::Var { index } => {
                let key = (*index, b);
                let out = match self.output_vars.get(&key) {
                    Some(&v) => v,
                    None => {
                        let v = self.next_output_var;
                        self.next_output_var += 1;
                        self.output_vars.insert(key, v);
                        v
                    }
                };
                env.terms.var(out)
            }
            TermNode::App { symbol, args, .. } => {
                let symbol = *symbol;
                let args = args.clone();
                let new_args = args.iter().map(|&a| self.apply(env, a, b)).collect();
                env.app(symbol, new_args)
            }
        }
    }

    /// Apply the substitution to a literal
    pub fn apply_literal(&mut self, env: &mut Environment, lit: &Literal, bank: u32) -> Literal {
        match env.terms.atom(lit.atom).clone() {
            AtomNode::Pred { predicate, args } => {
                let new_args = args.iter().map(|&a| self.apply(env, a, bank)).collect();
                env.literal(predicate, new_args, lit.polarity)
            }
            AtomNode::Eq { sort, lhs, rhs } => {
                let new_lhs = self.apply(env, lhs, bank);
                let new_rhs = self.apply(env, rhs, bank);
                env.equality(sort, lit.polarity, new_lhs, new_rhs)
            }
        }
    }

    /// Apply the substitution to every literal of a clause, preserving order
    /// and length.
    pub fn apply_clause(&mut self, env: &mut Environment, clause: &Clause, bank: u32) -> Vec<Literal> {
        clause
            .literals
            .iter()
            .map(|lit| self.apply_literal(env, lit, bank))
            .collect()
    }
}
