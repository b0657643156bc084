//! The shared term universe.
//!
//! Terms and atoms are hash-consed: structurally equal expressions are
//! interned to the same ID, so equality is identity. Construction performs a
//! lookup in the bank; the first insertion computes and caches the result
//! sort, the ground flag and the weight (symbol count). Nodes are never
//! mutated or freed after construction — the bank is appendable only and
//! lives for the whole run.

use crate::fol::signature::{FunctionId, PredicateId, Signature};
use crate::fol::sorts::SortId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// ID of an interned term
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermId(pub(crate) u32);

/// ID of an interned atom
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomId(pub(crate) u32);

impl TermId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl AtomId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl Serialize for TermId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TermId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(TermId)
    }
}

impl Serialize for AtomId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AtomId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(AtomId)
    }
}

/// Interned term node. Cached attributes are computed once at insertion.
#[derive(Debug, Clone)]
pub enum TermNode {
    Var {
        index: u32,
    },
    App {
        symbol: FunctionId,
        args: Vec<TermId>,
        sort: SortId,
        ground: bool,
        weight: u32,
    },
}

/// Interned atom node. Equality is a distinguished, sort-parameterised atom;
/// argument order of an equality is preserved as given unless the caller
/// requests the canonical orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomNode {
    Pred {
        predicate: PredicateId,
        args: Vec<TermId>,
    },
    Eq {
        sort: SortId,
        lhs: TermId,
        rhs: TermId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TermKey {
    Var(u32),
    App(FunctionId, Vec<TermId>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum AtomKey {
    Pred(PredicateId, Vec<TermId>),
    Eq(SortId, TermId, TermId),
}

/// The hash-consing table for terms and atoms.
#[derive(Debug, Clone, Default)]
pub struct TermBank {
    terms: Vec<TermNode>,
    term_lookup: HashMap<TermKey, TermId>,
    atoms: Vec<AtomNode>,
    atom_lookup: HashMap<AtomKey, AtomId>,
}

impl TermBank {
    pub fn new() -> Self {
        TermBank::default()
    }

    // === Construction ===

    /// Intern a variable term by index
    pub fn var(&mut self, index: u32) -> TermId {
        let key = TermKey::Var(index);
        if let Some(&id) = self.term_lookup.get(&key) {
            return id;
        }
        let id = TermId(self.terms.len() as u32);
        self.terms.push(TermNode::Var { index });
        self.term_lookup.insert(key, id);
        id
    }

    /// Intern an application `f(args)`. For any two calls with structurally
    /// equal arguments this returns the identical ID.
    pub fn app(&mut self, sig: &Signature, symbol: FunctionId, args: Vec<TermId>) -> TermId {
        let key = TermKey::App(symbol, args.clone());
        if let Some(&id) = self.term_lookup.get(&key) {
            return id;
        }
        let sort = sig.function(symbol).result_sort;
        let ground = args.iter().all(|&a| self.is_ground(a));
        let weight = 1 + args.iter().map(|&a| self.weight(a) as u32).sum::<u32>();
        let id = TermId(self.terms.len() as u32);
        self.terms.push(TermNode::App {
            symbol,
            args,
            sort,
            ground,
            weight,
        });
        self.term_lookup.insert(key, id);
        id
    }

    /// Intern a constant (arity-0 application)
    pub fn constant(&mut self, sig: &Signature, symbol: FunctionId) -> TermId {
        self.app(sig, symbol, vec![])
    }

    // === Term queries ===

    pub fn node(&self, t: TermId) -> &TermNode {
        &self.terms[t.0 as usize]
    }

    pub fn is_var(&self, t: TermId) -> bool {
        matches!(self.node(t), TermNode::Var { .. })
    }

    pub fn var_index(&self, t: TermId) -> Option<u32> {
        match self.node(t) {
            TermNode::Var { index } => Some(*index),
            _ => None,
        }
    }

    pub fn symbol(&self, t: TermId) -> Option<FunctionId> {
        match self.node(t) {
            TermNode::App { symbol, .. } => Some(*symbol),
            _ => None,
        }
    }

    pub fn args(&self, t: TermId) -> &[TermId] {
        match self.node(t) {
            TermNode::App { args, .. } => args,
            _ => &[],
        }
    }

    /// Result sort of an application; variables are unsorted
    pub fn sort(&self, t: TermId) -> Option<SortId> {
        match self.node(t) {
            TermNode::App { sort, .. } => Some(*sort),
            _ => None,
        }
    }

    pub fn is_ground(&self, t: TermId) -> bool {
        match self.node(t) {
            TermNode::Var { .. } => false,
            TermNode::App { ground, .. } => *ground,
        }
    }

    /// Symbol count of the term; variables count 1
    pub fn weight(&self, t: TermId) -> usize {
        match self.node(t) {
            TermNode::Var { .. } => 1,
            TermNode::App { weight, .. } => *weight as usize,
        }
    }

    /// Left-to-right depth-first traversal of every non-variable subterm,
    /// the term itself included when it is not a variable.
    pub fn subterms(&self, t: TermId) -> SubtermIter<'_> {
        SubtermIter {
            bank: self,
            stack: vec![t],
        }
    }

    /// Whether `sub` occurs anywhere inside `t` (variables included)
    pub fn contains_subterm(&self, t: TermId, sub: TermId) -> bool {
        if t == sub {
            return true;
        }
        self.args(t).iter().any(|&a| self.contains_subterm(a, sub))
    }

    /// Collect all variable indices of the term
    pub fn variables(&self, t: TermId, out: &mut HashSet<u32>) {
        match self.node(t) {
            TermNode::Var { index } => {
                out.insert(*index);
            }
            TermNode::App { args, .. } => {
                for &a in args.iter() {
                    self.variables(a, out);
                }
            }
        }
    }

    /// Rebuild `t` with every occurrence of `find` replaced by `by`.
    /// Occurrences inside a replaced subterm are not revisited.
    pub fn replace(&mut self, sig: &Signature, t: TermId, find: TermId, by: TermId) -> TermId {
        if t == find {
            return by;
        }
        match self.node(t) {
            TermNode::Var { .. } => t,
            TermNode::App { symbol, args, .. } => {
                let symbol = *symbol;
                let args = args.clone();
                let new_args: Vec<TermId> = args
                    .iter()
                    .map(|&a| self.replace(sig, a, find, by))
                    .collect();
                if new_args == args {
                    t
                } else {
                    self.app(sig, symbol, new_args)
                }
            }
        }
    }

    // === Atoms ===

    /// Intern a predicate atom
    pub fn pred_atom(&mut self, predicate: PredicateId, args: Vec<TermId>) -> AtomId {
        let key = AtomKey::Pred(predicate, args.clone());
        if let Some(&id) = self.atom_lookup.get(&key) {
            return id;
        }
        let id = AtomId(self.atoms.len() as u32);
        self.atoms.push(AtomNode::Pred { predicate, args });
        self.atom_lookup.insert(key, id);
        id
    }

    /// Intern an equality atom over the given sort. Argument order is
    /// preserved: `eq_atom(s, a, b)` and `eq_atom(s, b, a)` are distinct.
    pub fn eq_atom(&mut self, sort: SortId, lhs: TermId, rhs: TermId) -> AtomId {
        let key = AtomKey::Eq(sort, lhs, rhs);
        if let Some(&id) = self.atom_lookup.get(&key) {
            return id;
        }
        let id = AtomId(self.atoms.len() as u32);
        self.atoms.push(AtomNode::Eq { sort, lhs, rhs });
        self.atom_lookup.insert(key, id);
        id
    }

    /// Intern an equality atom in canonical orientation (smaller ID first),
    /// so that the two argument orders share one representation.
    pub fn eq_atom_oriented(&mut self, sort: SortId, lhs: TermId, rhs: TermId) -> AtomId {
        if rhs < lhs {
            self.eq_atom(sort, rhs, lhs)
        } else {
            self.eq_atom(sort, lhs, rhs)
        }
    }

    pub fn atom(&self, a: AtomId) -> &AtomNode {
        &self.atoms[a.0 as usize]
    }

    /// Argument terms of the atom; an equality yields its two sides
    pub fn atom_args(&self, a: AtomId) -> Vec<TermId> {
        match self.atom(a) {
            AtomNode::Pred { args, .. } => args.clone(),
            AtomNode::Eq { lhs, rhs, .. } => vec![*lhs, *rhs],
        }
    }

    pub fn atom_ground(&self, a: AtomId) -> bool {
        self.atom_args(a).iter().all(|&t| self.is_ground(t))
    }

    /// Symbol count of the atom (head symbol plus argument weights)
    pub fn atom_weight(&self, a: AtomId) -> usize {
        1 + self
            .atom_args(a)
            .iter()
            .map(|&t| self.weight(t))
            .sum::<usize>()
    }

    /// Non-variable subterms of every argument, left to right.
    /// This is the polymorphic counterpart of [`TermBank::subterms`].
    pub fn atom_subterms(&self, a: AtomId) -> SubtermIter<'_> {
        let mut stack = self.atom_args(a);
        stack.reverse();
        SubtermIter { bank: self, stack }
    }

    pub fn atom_variables(&self, a: AtomId, out: &mut HashSet<u32>) {
        for t in self.atom_args(a) {
            self.variables(t, out);
        }
    }

    /// Rebuild the atom with every occurrence of `find` replaced by `by`
    pub fn replace_in_atom(
        &mut self,
        sig: &Signature,
        a: AtomId,
        find: TermId,
        by: TermId,
    ) -> AtomId {
        match self.atom(a).clone() {
            AtomNode::Pred { predicate, args } => {
                let new_args = args
                    .iter()
                    .map(|&t| self.replace(sig, t, find, by))
                    .collect();
                self.pred_atom(predicate, new_args)
            }
            AtomNode::Eq { sort, lhs, rhs } => {
                let new_lhs = self.replace(sig, lhs, find, by);
                let new_rhs = self.replace(sig, rhs, find, by);
                self.eq_atom(sort, new_lhs, new_rhs)
            }
        }
    }

    /// Number of occurrences of `find` in the atom, counted in the same
    /// left-to-right order the subset replacement visits them.
    pub fn count_occurrences(&self, a: AtomId, find: TermId) -> usize {
        fn count(bank: &TermBank, t: TermId, find: TermId) -> usize {
            if t == find {
                return 1;
            }
            bank.args(t).iter().map(|&x| count(bank, x, find)).sum()
        }
        self.atom_args(a)
            .iter()
            .map(|&t| count(self, t, find))
            .sum()
    }

    /// Rebuild the atom replacing only the occurrences of `find` whose
    /// left-to-right index has its bit set in `mask`. When the occurrence
    /// count exceeds `max_occurrences`, every occurrence is replaced.
    pub fn replace_subset_in_atom(
        &mut self,
        sig: &Signature,
        a: AtomId,
        find: TermId,
        by: TermId,
        mask: u64,
        max_occurrences: u32,
    ) -> AtomId {
        let total = self.count_occurrences(a, find) as u32;
        let mut seen = 0u32;
        match self.atom(a).clone() {
            AtomNode::Pred { predicate, args } => {
                let new_args = args
                    .iter()
                    .map(|&t| self.subset_walk(sig, t, find, by, mask, total, max_occurrences, &mut seen))
                    .collect();
                self.pred_atom(predicate, new_args)
            }
            AtomNode::Eq { sort, lhs, rhs } => {
                let new_lhs =
                    self.subset_walk(sig, lhs, find, by, mask, total, max_occurrences, &mut seen);
                let new_rhs =
                    self.subset_walk(sig, rhs, find, by, mask, total, max_occurrences, &mut seen);
                self.eq_atom(sort, new_lhs, new_rhs)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn subset_walk(
        &mut self,
        sig: &Signature,
        t: TermId,
        find: TermId,
        by: TermId,
        mask: u64,
        total: u32,
        max_occurrences: u32,
        seen: &mut u32,
    ) -> TermId {
        if t == find {
            let hit = total > max_occurrences || (mask >> *seen) & 1 == 1;
            *seen += 1;
            return if hit { by } else { t };
        }
        match self.node(t) {
            TermNode::Var { .. } => t,
            TermNode::App { symbol, args, .. } => {
                let symbol = *symbol;
                let args = args.clone();
                let new_args: Vec<TermId> = args
                    .iter()
                    .map(|&x| self.subset_walk(sig, x, find, by, mask, total, max_occurrences, seen))
                    .collect();
                if new_args == args {
                    t
                } else {
                    self.app(sig, symbol, new_args)
                }
            }
        }
    }

    // === Display ===

    /// Format a term in the canonical form: standard infix for interpreted
    /// arithmetic, prefix with parentheses otherwise, variables rendered as
    /// their declared name or `u<n>`.
    pub fn display<'a>(&'a self, term: TermId, sig: &'a Signature) -> TermDisplay<'a> {
        TermDisplay {
            bank: self,
            sig,
            term,
        }
    }
}

/// Left-to-right depth-first iterator over non-variable subterms
pub struct SubtermIter<'a> {
    bank: &'a TermBank,
    stack: Vec<TermId>,
}

impl<'a> Iterator for SubtermIter<'a> {
    type Item = TermId;

    fn next(&mut self) -> Option<TermId> {
        while let Some(t) = self.stack.pop() {
            match self.bank.node(t) {
                TermNode::Var { .. } => continue,
                TermNode::App { args, .. } => {
                    for &a in args.iter().rev() {
                        self.stack.push(a);
                    }
                    return Some(t);
                }
            }
        }
        None
    }
}

/// Display wrapper that resolves symbol names through the signature
pub struct TermDisplay<'a> {
    bank: &'a TermBank,
    sig: &'a Signature,
    term: TermId,
}

impl<'a> fmt::Display for TermDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_term(f, self.bank, self.sig, self.term)
    }
}

pub(crate) fn write_term(
    f: &mut fmt::Formatter<'_>,
    bank: &TermBank,
    sig: &Signature,
    t: TermId,
) -> fmt::Result {
    match bank.node(t) {
        TermNode::Var { index } => match sig.variable_name(*index) {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "u{}", index),
        },
        TermNode::App { symbol, args, .. } => {
            let func = sig.function(*symbol);
            if let Some(op) = func.interpretation.infix() {
                write!(f, "(")?;
                write_term(f, bank, sig, args[0])?;
                write!(f, " {} ", op)?;
                write_term(f, bank, sig, args[1])?;
                write!(f, ")")
            } else if func.interpretation.is_unary_minus() {
                write!(f, "-")?;
                write_term(f, bank, sig, args[0])
            } else if args.is_empty() {
                write!(f, "{}", func.name)
            } else {
                write!(f, "{}(", func.name)?;
                for (i, &a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write_term(f, bank, sig, a)?;
                }
                write!(f, ")")
            }
        }
    }
}
