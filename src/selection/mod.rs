//! Literal selection strategies, after Hoder et al. "Selecting the
//! selection" (2016).
//!
//! Selection restricts which literals of a clause may act as premises of
//! generating inferences. A strategy returns the set of selected indices;
//! [`apply_selection`] reorders the clause so the selected literals lead and
//! records their count.

use crate::config::LiteralSelectionStrategy;
use crate::env::Environment;
use crate::fol::clause::Clause;
use crate::fol::ordering::{literal_greater, KBO};
use std::collections::HashSet;

/// Trait for literal selection strategies
pub trait LiteralSelector {
    /// Indices of the selected literals
    fn select(&self, env: &Environment, clause: &Clause) -> HashSet<usize>;

    fn name(&self) -> &str;

    /// Whether the strategy only ever selects negative literals or maximal
    /// ones, keeping the calculus complete for the ordering aftercheck.
    fn is_complete(&self) -> bool {
        true
    }
}

/// Build the selector configured by the strategy option
pub fn selector_for(strategy: LiteralSelectionStrategy) -> Box<dyn LiteralSelector> {
    match strategy {
        LiteralSelectionStrategy::Sel0 => Box::new(SelectAll),
        LiteralSelectionStrategy::Sel20 => Box::new(SelectMaximal::new()),
        LiteralSelectionStrategy::Sel21 => Box::new(SelectUniqueMaximalOrNegOrMaximal::new()),
        LiteralSelectionStrategy::Sel22 => Box::new(SelectNegMaxWeightOrMaximal::new()),
    }
}

/// Reorder the clause so selected literals come first and set the selected
/// count. The literal multiset is unchanged.
pub fn apply_selection(env: &Environment, clause: &mut Clause, selector: &dyn LiteralSelector) {
    let selected = selector.select(env, clause);
    let mut leading = Vec::with_capacity(clause.literals.len());
    let mut trailing = Vec::new();
    for (i, lit) in clause.literals.iter().enumerate() {
        if selected.contains(&i) {
            leading.push(*lit);
        } else {
            trailing.push(*lit);
        }
    }
    let count = leading.len();
    leading.extend(trailing);
    clause.literals = leading;
    clause.selected = count;
}

/// Find all maximal literals in a clause
fn find_maximal_literals(env: &Environment, clause: &Clause, kbo: &KBO) -> HashSet<usize> {
    let mut maximal = HashSet::new();
    for i in 0..clause.literals.len() {
        let mut is_maximal = true;
        for j in 0..clause.literals.len() {
            if i != j
                && literal_greater(&env.terms, kbo, &clause.literals[j], &clause.literals[i])
            {
                is_maximal = false;
                break;
            }
        }
        if is_maximal {
            maximal.insert(i);
        }
    }
    maximal
}

fn has_unique_maximal(env: &Environment, clause: &Clause, kbo: &KBO) -> Option<usize> {
    let maximal = find_maximal_literals(env, clause, kbo);
    if maximal.len() == 1 {
        maximal.into_iter().next()
    } else {
        None
    }
}

/// A negative literal with maximum weight, if any
fn find_max_weight_negative(env: &Environment, clause: &Clause) -> Option<usize> {
    clause
        .literals
        .iter()
        .enumerate()
        .filter(|(_, lit)| lit.is_negative())
        .max_by_key(|(i, lit)| (lit.weight(&env.terms), usize::MAX - i))
        .map(|(i, _)| i)
}

// ============================================================================
// Selection 0: select all literals
// ============================================================================

/// No selection: every literal participates
pub struct SelectAll;

impl LiteralSelector for SelectAll {
    fn select(&self, _env: &Environment, clause: &Clause) -> HashSet<usize> {
        (0..clause.literals.len()).collect()
    }

    fn name(&self) -> &str {
        "sel0"
    }

    fn is_complete(&self) -> bool {
        // selecting everything gives up the maximality restriction
        false
    }
}

// ============================================================================
// Selection 20: select all maximal literals
// ============================================================================

/// Select all literals that are maximal in the simplification ordering
pub struct SelectMaximal {
    kbo: KBO,
}

impl SelectMaximal {
    pub fn new() -> Self {
        SelectMaximal {
            kbo: KBO::default(),
        }
    }

    pub fn with_kbo(kbo: KBO) -> Self {
        SelectMaximal { kbo }
    }
}

impl Default for SelectMaximal {
    fn default() -> Self {
        Self::new()
    }
}

impl LiteralSelector for SelectMaximal {
    fn select(&self, env: &Environment, clause: &Clause) -> HashSet<usize> {
        find_maximal_literals(env, clause, &self.kbo)
    }

    fn name(&self) -> &str {
        "sel20"
    }
}

// ============================================================================
// Selection 22: max-weight negative literal, else all maximal
// ============================================================================

/// Select a negative literal with maximum weight if one exists, otherwise
/// select all maximal literals.
pub struct SelectNegMaxWeightOrMaximal {
    kbo: KBO,
}

impl SelectNegMaxWeightOrMaximal {
    pub fn new() -> Self {
        SelectNegMaxWeightOrMaximal {
            kbo: KBO::default(),
        }
    }

    pub fn with_kbo(kbo: KBO) -> Self {
        SelectNegMaxWeightOrMaximal { kbo }
    }
}

impl Default for SelectNegMaxWeightOrMaximal {
    fn default() -> Self {
        Self::new()
    }
}

impl LiteralSelector for SelectNegMaxWeightOrMaximal {
    fn select(&self, env: &Environment, clause: &Clause) -> HashSet<usize> {
        if let Some(idx) = find_max_weight_negative(env, clause) {
            return HashSet::from([idx]);
        }
        find_maximal_literals(env, clause, &self.kbo)
    }

    fn name(&self) -> &str {
        "sel22"
    }
}

// ============================================================================
// Selection 21: unique maximal, else max-weight negative, else all maximal
// ============================================================================

/// Select a unique maximal literal if one exists, otherwise a max-weight
/// negative literal, otherwise all maximal literals.
pub struct SelectUniqueMaximalOrNegOrMaximal {
    kbo: KBO,
}

impl SelectUniqueMaximalOrNegOrMaximal {
    pub fn new() -> Self {
        SelectUniqueMaximalOrNegOrMaximal {
            kbo: KBO::default(),
        }
    }

    pub fn with_kbo(kbo: KBO) -> Self {
        SelectUniqueMaximalOrNegOrMaximal { kbo }
    }
}

impl Default for SelectUniqueMaximalOrNegOrMaximal {
    fn default() -> Self {
        Self::new()
    }
}

impl LiteralSelector for SelectUniqueMaximalOrNegOrMaximal {
    fn select(&self, env: &Environment, clause: &Clause) -> HashSet<usize> {
        if let Some(idx) = has_unique_maximal(env, clause, &self.kbo) {
            return HashSet::from([idx]);
        }
        if let Some(idx) = find_max_weight_negative(env, clause) {
            return HashSet::from([idx]);
        }
        find_maximal_literals(env, clause, &self.kbo)
    }

    fn name(&self) -> &str {
        "sel21"
    }
}
