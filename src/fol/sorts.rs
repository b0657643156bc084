//! Sorts and term algebras.
//!
//! Sorts are compared by identity. The builtin sorts (boolean, integer,
//! rational, real, individual) are created by [`SortTable::new`]; user sorts
//! and term-algebra sorts are declared afterwards and live for the whole run.

use crate::fol::signature::FunctionId;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// ID of an interned sort
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SortId(pub(crate) u32);

impl SortId {
    /// Get the raw ID value (for debugging/serialization)
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

impl Serialize for SortId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SortId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(SortId)
    }
}

/// What kind of terms a sort names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKind {
    Boolean,
    Integer,
    Rational,
    Real,
    /// Default sort of otherwise untyped individuals ($i)
    Individual,
    /// User-declared uninterpreted sort
    User,
    /// Inductively defined datatype with a fixed constructor set
    TermAlgebra(TermAlgebra),
}

/// One constructor of a term algebra, with its argument sorts and the
/// destructor (projection) symbol for each argument position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaConstructor {
    pub functor: FunctionId,
    pub arg_sorts: Vec<SortId>,
    pub destructors: Vec<FunctionId>,
}

impl TaConstructor {
    /// A constructor is recursive if some argument has the algebra's own sort
    pub fn recursive(&self, sort: SortId) -> bool {
        self.arg_sorts.iter().any(|&s| s == sort)
    }
}

/// Constructor set of a term-algebra sort
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TermAlgebra {
    pub constructors: Vec<TaConstructor>,
}

#[derive(Debug, Clone)]
struct SortInfo {
    name: String,
    kind: SortKind,
}

/// Registry of all sorts known in a run.
///
/// Appendable only; sorts are never removed.
#[derive(Debug, Clone)]
pub struct SortTable {
    sorts: Vec<SortInfo>,
    lookup: IndexMap<String, SortId>,
}

impl SortTable {
    pub const BOOLEAN: SortId = SortId(0);
    pub const INTEGER: SortId = SortId(1);
    pub const RATIONAL: SortId = SortId(2);
    pub const REAL: SortId = SortId(3);
    pub const INDIVIDUAL: SortId = SortId(4);

    pub fn new() -> Self {
        let mut table = SortTable {
            sorts: Vec::new(),
            lookup: IndexMap::new(),
        };
        table.insert("$o", SortKind::Boolean);
        table.insert("$int", SortKind::Integer);
        table.insert("$rat", SortKind::Rational);
        table.insert("$real", SortKind::Real);
        table.insert("$i", SortKind::Individual);
        table
    }

    fn insert(&mut self, name: &str, kind: SortKind) -> SortId {
        let id = SortId(self.sorts.len() as u32);
        self.sorts.push(SortInfo {
            name: name.to_string(),
            kind,
        });
        self.lookup.insert(name.to_string(), id);
        id
    }

    /// Declare a user sort, returning its ID (get-or-create)
    pub fn declare(&mut self, name: &str) -> SortId {
        if let Some(&id) = self.lookup.get(name) {
            return id;
        }
        self.insert(name, SortKind::User)
    }

    /// Turn an existing sort into a term-algebra sort.
    ///
    /// Constructor symbols must already exist in the signature; the caller
    /// (normally `Environment::declare_term_algebra`) supplies the
    /// constructor records with their destructors.
    pub fn set_term_algebra(&mut self, sort: SortId, algebra: TermAlgebra) {
        self.sorts[sort.0 as usize].kind = SortKind::TermAlgebra(algebra);
    }

    /// Get an existing sort by name
    pub fn get(&self, name: &str) -> Option<SortId> {
        self.lookup.get(name).copied()
    }

    pub fn name(&self, id: SortId) -> &str {
        &self.sorts[id.0 as usize].name
    }

    pub fn kind(&self, id: SortId) -> &SortKind {
        &self.sorts[id.0 as usize].kind
    }

    pub fn is_term_algebra(&self, id: SortId) -> bool {
        matches!(self.kind(id), SortKind::TermAlgebra(_))
    }

    /// Constructor set of a term-algebra sort, None for any other sort
    pub fn term_algebra(&self, id: SortId) -> Option<&TermAlgebra> {
        match self.kind(id) {
            SortKind::TermAlgebra(ta) => Some(ta),
            _ => None,
        }
    }

    /// Number of declared sorts
    pub fn len(&self) -> usize {
        self.sorts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorts.is_empty()
    }

    /// Iterate over all sort IDs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = SortId> {
        (0..self.sorts.len() as u32).map(SortId)
    }
}

impl Default for SortTable {
    fn default() -> Self {
        Self::new()
    }
}
