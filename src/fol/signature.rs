//! Symbol interning and the signature registry.
//!
//! Every function and predicate symbol known in a run lives here, keyed by
//! identity. The registry is appendable only: symbols are created at parse or
//! preprocess time (or mid-run, for skolem and fresh induction symbols) and
//! are never freed.
//!
//! Interned IDs give O(1) comparison and hashing (u32 instead of a string)
//! and `Copy` semantics. Each symbol kind has its own ID type for type
//! safety.

use crate::fol::clause::Clause;
use crate::fol::sorts::SortId;
use crate::fol::theory::Interpretation;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// ID of an interned function symbol (constants are functions of arity 0)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(pub(crate) u32);

/// ID of an interned predicate symbol
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PredicateId(pub(crate) u32);

impl FunctionId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl PredicateId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

impl fmt::Display for PredicateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl Serialize for FunctionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FunctionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(FunctionId)
    }
}

impl Serialize for PredicateId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PredicateId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(PredicateId)
    }
}

/// Symbol color for split reasoning. Two clauses are compatible when at most
/// one of them is colored, or both carry the same color. `Invalid` only
/// arises from joining clashing colors; no symbol carries it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Color {
    #[default]
    Transparent,
    Left,
    Right,
    Invalid,
}

impl Color {
    pub fn compatible(self, other: Color) -> bool {
        if self == Color::Invalid || other == Color::Invalid {
            return false;
        }
        self == Color::Transparent || other == Color::Transparent || self == other
    }

    /// Combine the colors of two symbols occurring together
    pub fn join(self, other: Color) -> Color {
        match (self, other) {
            (Color::Transparent, c) | (c, Color::Transparent) => c,
            (a, b) if a == b => a,
            _ => Color::Invalid,
        }
    }
}

/// Metadata of one function symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSymbol {
    pub name: String,
    pub arity: usize,
    pub arg_sorts: Vec<SortId>,
    pub result_sort: SortId,
    pub interpretation: Interpretation,
    /// IDs of the distinct groups this constant belongs to
    pub distinct_groups: Vec<usize>,
    /// Symbol occurs in the conjecture
    pub in_goal: bool,
    /// Skolem constant introduced while clausifying the goal
    pub induction_skolem: bool,
    /// Constructor of a term-algebra sort
    pub ta_constructor: bool,
    pub color: Color,
}

/// Metadata of one predicate symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredicateSymbol {
    pub name: String,
    pub arity: usize,
    pub arg_sorts: Vec<SortId>,
    pub interpretation: Interpretation,
    pub color: Color,
}

/// A set of constants declared mutually distinct, with an optional premise
/// unit that justifies the distinctness in derivations.
#[derive(Debug, Clone)]
pub struct DistinctGroup {
    pub members: Vec<FunctionId>,
    pub premise: Option<Arc<Clause>>,
}

/// The signature registry: all function and predicate symbols of a run.
#[derive(Debug, Clone, Default)]
pub struct Signature {
    functions: Vec<FunctionSymbol>,
    function_lookup: IndexMap<(String, usize), FunctionId>,
    predicates: Vec<PredicateSymbol>,
    predicate_lookup: IndexMap<(String, usize), PredicateId>,
    /// Interpreted symbols (operators and numerals) are keyed by their
    /// interpretation rather than by name, since names overload across sorts.
    interpreted_functions: HashMap<Interpretation, FunctionId>,
    interpreted_predicates: HashMap<Interpretation, PredicateId>,
    distinct_groups: Vec<DistinctGroup>,
    /// Display names of builder-declared variables, by variable index
    variable_names: HashMap<u32, String>,
    fresh_counter: usize,
}

impl Signature {
    pub fn new() -> Self {
        Signature::default()
    }

    // === Functions ===

    /// Intern a function symbol, returning its ID (get-or-create).
    /// Constants are functions with an empty argument sort list.
    pub fn add_function(
        &mut self,
        name: &str,
        arg_sorts: Vec<SortId>,
        result_sort: SortId,
    ) -> FunctionId {
        let key = (name.to_string(), arg_sorts.len());
        if let Some(&id) = self.function_lookup.get(&key) {
            return id;
        }
        let id = FunctionId(self.functions.len() as u32);
        self.functions.push(FunctionSymbol {
            name: name.to_string(),
            arity: arg_sorts.len(),
            arg_sorts,
            result_sort,
            interpretation: Interpretation::Uninterpreted,
            distinct_groups: Vec::new(),
            in_goal: false,
            induction_skolem: false,
            ta_constructor: false,
            color: Color::Transparent,
        });
        self.function_lookup.insert(key, id);
        id
    }

    /// Intern a function symbol under a freshly generated name.
    /// Used for skolem constants, induction placeholders and blanks.
    pub fn add_fresh_function(
        &mut self,
        prefix: &str,
        arg_sorts: Vec<SortId>,
        result_sort: SortId,
    ) -> FunctionId {
        let name = self.fresh_name(prefix);
        self.add_function(&name, arg_sorts, result_sort)
    }

    pub fn function(&self, id: FunctionId) -> &FunctionSymbol {
        &self.functions[id.0 as usize]
    }

    pub fn function_mut(&mut self, id: FunctionId) -> &mut FunctionSymbol {
        &mut self.functions[id.0 as usize]
    }

    pub fn get_function(&self, name: &str, arity: usize) -> Option<FunctionId> {
        self.function_lookup
            .get(&(name.to_string(), arity))
            .copied()
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Iterate over all function IDs in interning order
    pub fn function_ids(&self) -> impl Iterator<Item = FunctionId> {
        (0..self.functions.len() as u32).map(FunctionId)
    }

    // === Predicates ===

    /// Intern a predicate symbol, returning its ID (get-or-create)
    pub fn add_predicate(&mut self, name: &str, arg_sorts: Vec<SortId>) -> PredicateId {
        let key = (name.to_string(), arg_sorts.len());
        if let Some(&id) = self.predicate_lookup.get(&key) {
            return id;
        }
        let id = PredicateId(self.predicates.len() as u32);
        self.predicates.push(PredicateSymbol {
            name: name.to_string(),
            arity: arg_sorts.len(),
            arg_sorts,
            interpretation: Interpretation::Uninterpreted,
            color: Color::Transparent,
        });
        self.predicate_lookup.insert(key, id);
        id
    }

    /// Intern a predicate symbol under a freshly generated name.
    /// Used by subterm-ordering induction for its `smallerThan` predicate.
    pub fn add_fresh_predicate(&mut self, prefix: &str, arg_sorts: Vec<SortId>) -> PredicateId {
        let name = self.fresh_name(prefix);
        self.add_predicate(&name, arg_sorts)
    }

    pub fn predicate(&self, id: PredicateId) -> &PredicateSymbol {
        &self.predicates[id.0 as usize]
    }

    pub fn predicate_mut(&mut self, id: PredicateId) -> &mut PredicateSymbol {
        &mut self.predicates[id.0 as usize]
    }

    pub fn get_predicate(&self, name: &str, arity: usize) -> Option<PredicateId> {
        self.predicate_lookup
            .get(&(name.to_string(), arity))
            .copied()
    }

    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    pub fn predicate_ids(&self) -> impl Iterator<Item = PredicateId> {
        (0..self.predicates.len() as u32).map(PredicateId)
    }

    // === Interpreted symbols ===

    /// The function symbol interpreting the given operation or numeral
    /// (get-or-create). Interpreted symbols are not reachable through the
    /// name lookup since their names overload across sorts.
    pub fn interpreting_function(&mut self, interp: Interpretation) -> FunctionId {
        debug_assert!(interp.is_function());
        if let Some(&id) = self.interpreted_functions.get(&interp) {
            return id;
        }
        let sort = interp
            .operand_sort()
            .expect("interpreted operations are sorted");
        let id = FunctionId(self.functions.len() as u32);
        self.functions.push(FunctionSymbol {
            name: interp.name(),
            arity: interp.arity(),
            arg_sorts: vec![sort; interp.arity()],
            result_sort: sort,
            interpretation: interp.clone(),
            distinct_groups: Vec::new(),
            in_goal: false,
            induction_skolem: false,
            ta_constructor: false,
            color: Color::Transparent,
        });
        self.interpreted_functions.insert(interp, id);
        id
    }

    /// The predicate symbol interpreting the given operation (get-or-create)
    pub fn interpreting_predicate(&mut self, interp: Interpretation) -> PredicateId {
        debug_assert!(interp.is_predicate());
        if let Some(&id) = self.interpreted_predicates.get(&interp) {
            return id;
        }
        let sort = interp
            .operand_sort()
            .expect("interpreted operations are sorted");
        let id = PredicateId(self.predicates.len() as u32);
        self.predicates.push(PredicateSymbol {
            name: interp.name(),
            arity: interp.arity(),
            arg_sorts: vec![sort; interp.arity()],
            interpretation: interp.clone(),
            color: Color::Transparent,
        });
        self.interpreted_predicates.insert(interp, id);
        id
    }

    /// True if the function symbol belongs to the theory language
    pub fn is_interpreted_function(&self, id: FunctionId) -> bool {
        !self.function(id).interpretation.is_uninterpreted()
    }

    pub fn is_numeral(&self, id: FunctionId) -> bool {
        self.function(id).interpretation.is_numeral()
    }

    // === Distinct groups ===

    /// Declare a group of mutually distinct constants. The optional premise
    /// unit is recorded in the inference of every simplification that
    /// consults the group.
    pub fn add_distinct_group(
        &mut self,
        members: Vec<FunctionId>,
        premise: Option<Arc<Clause>>,
    ) -> usize {
        let group_id = self.distinct_groups.len();
        for &member in &members {
            self.function_mut(member).distinct_groups.push(group_id);
        }
        self.distinct_groups.push(DistinctGroup { members, premise });
        group_id
    }

    pub fn distinct_group(&self, id: usize) -> &DistinctGroup {
        &self.distinct_groups[id]
    }

    pub fn distinct_group_premise(&self, id: usize) -> Option<&Arc<Clause>> {
        self.distinct_groups[id].premise.as_ref()
    }

    /// A distinct group shared by two constants, if any
    pub fn common_distinct_group(&self, f1: FunctionId, f2: FunctionId) -> Option<usize> {
        let groups1 = &self.function(f1).distinct_groups;
        if groups1.is_empty() {
            return None;
        }
        let groups2 = &self.function(f2).distinct_groups;
        groups1.iter().find(|g| groups2.contains(g)).copied()
    }

    // === Variable display names ===

    pub fn set_variable_name(&mut self, index: u32, name: &str) {
        self.variable_names.insert(index, name.to_string());
    }

    pub fn variable_name(&self, index: u32) -> Option<&str> {
        self.variable_names.get(&index).map(String::as_str)
    }

    fn fresh_name(&mut self, prefix: &str) -> String {
        loop {
            let name = format!("{}{}", prefix, self.fresh_counter);
            self.fresh_counter += 1;
            // a user symbol of any arity with this name shadows it
            if !self
                .function_lookup
                .keys()
                .chain(self.predicate_lookup.keys())
                .any(|(n, _)| n == &name)
            {
                return name;
            }
        }
    }
}
