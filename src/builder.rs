//! Programmatic problem construction.
//!
//! Clients that build problems in memory rather than parsing them use a
//! [`FormulaBuilder`]: variables by name, symbols with TPTP name checks,
//! atoms, equalities, connectives, quantifiers and annotated formulas.
//! Building a conjecture universally closes and negates the formula.
//!
//! Terms and formulas are tagged with the builder that created them;
//! combining expressions from different builders is a construction error.

use crate::env::Environment;
use crate::error::{BuilderError, BuilderResult};
use crate::fol::clause::{Clause, ClauseRole};
use crate::fol::cnf::clausify;
use crate::fol::formula::Formula;
use crate::fol::signature::{FunctionId, PredicateId};
use crate::fol::sorts::{SortId, SortTable};
use crate::fol::term::{AtomNode, TermId};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_BUILDER_ID: AtomicU64 = AtomicU64::new(0);

/// Binary connectives accepted by [`FormulaBuilder::binary`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
    Implies,
    Iff,
    Xor,
}

/// Quantifiers accepted by [`FormulaBuilder::quantified`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    Forall,
    Exists,
}

/// Annotation of a built formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    Axiom,
    Assumption,
    Lemma,
    Conjecture,
}

impl Annotation {
    fn role(self) -> ClauseRole {
        match self {
            Annotation::Axiom => ClauseRole::Axiom,
            Annotation::Assumption => ClauseRole::Assumption,
            Annotation::Lemma => ClauseRole::Lemma,
            Annotation::Conjecture => ClauseRole::NegatedConjecture,
        }
    }
}

/// A variable created by a builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BVar {
    owner: u64,
    index: u32,
}

/// A term created by a builder
#[derive(Debug, Clone, Copy)]
pub struct BTerm {
    owner: u64,
    term: TermId,
}

impl BTerm {
    pub fn term(&self) -> TermId {
        self.term
    }
}

/// A formula under construction
#[derive(Debug, Clone)]
pub struct BFormula {
    owner: u64,
    formula: Formula,
    bound: HashSet<u32>,
}

impl BFormula {
    pub fn formula(&self) -> &Formula {
        &self.formula
    }
}

/// An annotated formula, ready for clausification
#[derive(Debug, Clone)]
pub struct AnnotatedFormula {
    pub name: String,
    pub role: ClauseRole,
    pub formula: Formula,
}

/// Builder of terms and formulas over an [`Environment`]
#[derive(Debug)]
pub struct FormulaBuilder {
    id: u64,
    check_names: bool,
    check_rebinding: bool,
    vars: HashMap<String, u32>,
    next_var: u32,
}

impl FormulaBuilder {
    /// `check_names` enforces the TPTP conventions (lowercase-initial
    /// function and predicate names, uppercase-initial variables);
    /// `check_rebinding` rejects quantifying over an already-bound variable.
    pub fn new(check_names: bool, check_rebinding: bool) -> Self {
        FormulaBuilder {
            id: NEXT_BUILDER_ID.fetch_add(1, Ordering::Relaxed),
            check_names,
            check_rebinding,
            vars: HashMap::new(),
            next_var: 0,
        }
    }

    // === Symbols and variables ===

    /// Create (or look up) a variable by name
    pub fn var(&mut self, env: &mut Environment, name: &str) -> BuilderResult<BVar> {
        if self.check_names && !name.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
            return Err(BuilderError::InvalidName {
                kind: "variable",
                expected: "uppercase",
                name: name.to_string(),
            });
        }
        let index = match self.vars.get(name) {
            Some(&i) => i,
            None => {
                let i = self.next_var;
                self.next_var += 1;
                self.vars.insert(name.to_string(), i);
                env.signature.set_variable_name(i, name);
                i
            }
        };
        Ok(BVar {
            owner: self.id,
            index,
        })
    }

    /// Declare a function symbol
    pub fn function(
        &self,
        env: &mut Environment,
        name: &str,
        arg_sorts: Vec<SortId>,
        result_sort: SortId,
    ) -> BuilderResult<FunctionId> {
        self.check_symbol_name("function", name)?;
        Ok(env.signature.add_function(name, arg_sorts, result_sort))
    }

    /// Declare a constant of the individual sort
    pub fn constant(&self, env: &mut Environment, name: &str) -> BuilderResult<BTerm> {
        let f = self.function(env, name, vec![], SortTable::INDIVIDUAL)?;
        Ok(BTerm {
            owner: self.id,
            term: env.constant(f),
        })
    }

    /// Declare a predicate symbol
    pub fn predicate(
        &self,
        env: &mut Environment,
        name: &str,
        arg_sorts: Vec<SortId>,
    ) -> BuilderResult<PredicateId> {
        self.check_symbol_name("predicate", name)?;
        Ok(env.signature.add_predicate(name, arg_sorts))
    }

    fn check_symbol_name(&self, kind: &'static str, name: &str) -> BuilderResult<()> {
        if self.check_names && !name.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
            return Err(BuilderError::InvalidName {
                kind,
                expected: "lowercase",
                name: name.to_string(),
            });
        }
        Ok(())
    }

    // === Terms ===

    pub fn var_term(&self, env: &mut Environment, var: BVar) -> BuilderResult<BTerm> {
        self.check_owner(var.owner)?;
        Ok(BTerm {
            owner: self.id,
            term: env.var(var.index),
        })
    }

    pub fn term(
        &self,
        env: &mut Environment,
        function: FunctionId,
        args: Vec<BTerm>,
    ) -> BuilderResult<BTerm> {
        let declared = env.signature.function(function).arity;
        if declared != args.len() {
            return Err(BuilderError::ArityMismatch {
                name: env.signature.function(function).name.clone(),
                declared,
                applied: args.len(),
            });
        }
        let mut term_args = Vec::with_capacity(args.len());
        for arg in args {
            self.check_owner(arg.owner)?;
            term_args.push(arg.term);
        }
        Ok(BTerm {
            owner: self.id,
            term: env.app(function, term_args),
        })
    }

    // === Formulas ===

    pub fn atom(
        &self,
        env: &mut Environment,
        predicate: PredicateId,
        args: Vec<BTerm>,
        polarity: bool,
    ) -> BuilderResult<BFormula> {
        let declared = env.signature.predicate(predicate).arity;
        if declared != args.len() {
            return Err(BuilderError::ArityMismatch {
                name: env.signature.predicate(predicate).name.clone(),
                declared,
                applied: args.len(),
            });
        }
        let mut term_args = Vec::with_capacity(args.len());
        for arg in args {
            self.check_owner(arg.owner)?;
            term_args.push(arg.term);
        }
        let lit = env.literal(predicate, term_args, polarity);
        Ok(self.wrap(Formula::Atom(lit)))
    }

    /// Equality over the common sort of the two sides; sides whose sort
    /// cannot be read off (variables) default to the individual sort.
    pub fn equality(
        &self,
        env: &mut Environment,
        lhs: BTerm,
        rhs: BTerm,
        polarity: bool,
    ) -> BuilderResult<BFormula> {
        self.check_owner(lhs.owner)?;
        self.check_owner(rhs.owner)?;
        let sort = env
            .terms
            .sort(lhs.term)
            .or_else(|| env.terms.sort(rhs.term))
            .unwrap_or(SortTable::INDIVIDUAL);
        let lit = env.equality(sort, polarity, lhs.term, rhs.term);
        Ok(self.wrap(Formula::Atom(lit)))
    }

    /// The boolean constant `true` or `false`
    pub fn boolean(&self, value: bool) -> BFormula {
        self.wrap(if value { Formula::True } else { Formula::False })
    }

    pub fn negation(&self, f: BFormula) -> BuilderResult<BFormula> {
        self.check_owner(f.owner)?;
        Ok(BFormula {
            owner: self.id,
            bound: f.bound.clone(),
            formula: Formula::not(f.formula),
        })
    }

    /// Combine two formulas with a binary connective
    pub fn binary(
        &self,
        connective: Connective,
        lhs: BFormula,
        rhs: BFormula,
    ) -> BuilderResult<BFormula> {
        self.check_owner(lhs.owner)?;
        self.check_owner(rhs.owner)?;
        let mut bound = lhs.bound;
        bound.extend(rhs.bound.iter().copied());
        let formula = match connective {
            Connective::And => Formula::And(vec![lhs.formula, rhs.formula]),
            Connective::Or => Formula::Or(vec![lhs.formula, rhs.formula]),
            Connective::Implies => Formula::implies(lhs.formula, rhs.formula),
            Connective::Iff => Formula::Iff(Box::new(lhs.formula), Box::new(rhs.formula)),
            Connective::Xor => Formula::Xor(Box::new(lhs.formula), Box::new(rhs.formula)),
        };
        Ok(BFormula {
            owner: self.id,
            formula,
            bound,
        })
    }

    /// Quantify over a variable. Quantifying over an already-bound variable
    /// is a construction error when rebinding checks are on.
    pub fn quantified(
        &self,
        env: &Environment,
        quantifier: Quantifier,
        var: BVar,
        body: BFormula,
    ) -> BuilderResult<BFormula> {
        self.check_owner(var.owner)?;
        self.check_owner(body.owner)?;
        if self.check_rebinding && body.bound.contains(&var.index) {
            let name = env
                .signature
                .variable_name(var.index)
                .unwrap_or("?")
                .to_string();
            return Err(BuilderError::VariableAlreadyBound(name));
        }
        let mut bound = body.bound;
        bound.insert(var.index);
        let formula = match quantifier {
            Quantifier::Forall => Formula::Forall(vec![var.index], Box::new(body.formula)),
            Quantifier::Exists => Formula::Exists(vec![var.index], Box::new(body.formula)),
        };
        Ok(BFormula {
            owner: self.id,
            formula,
            bound,
        })
    }

    /// Conditional formula, expressed through its two implications
    pub fn ite(
        &self,
        condition: BFormula,
        then: BFormula,
        otherwise: BFormula,
    ) -> BuilderResult<BFormula> {
        self.check_owner(condition.owner)?;
        let negated = BFormula {
            owner: self.id,
            formula: Formula::not(condition.formula.clone()),
            bound: condition.bound.clone(),
        };
        let pos = self.binary(Connective::Implies, condition, then)?;
        let neg_branch = self.binary(Connective::Implies, negated, otherwise)?;
        self.binary(Connective::And, pos, neg_branch)
    }

    /// Annotate a finished formula. Conjectures are universally closed over
    /// their free variables and negated, and their symbols are flagged as
    /// goal symbols for induction gating.
    pub fn annotated(
        &self,
        env: &mut Environment,
        f: BFormula,
        annotation: Annotation,
        name: &str,
    ) -> BuilderResult<AnnotatedFormula> {
        self.check_owner(f.owner)?;
        let role = annotation.role();
        let formula = if annotation == Annotation::Conjecture {
            mark_goal_symbols(env, &f.formula);
            Formula::not(f.formula.quantify(&env.terms))
        } else {
            f.formula
        };
        Ok(AnnotatedFormula {
            name: name.to_string(),
            role,
            formula,
        })
    }

    /// Clausify an annotated formula into input clauses
    pub fn clausify(
        &self,
        env: &mut Environment,
        annotated: AnnotatedFormula,
    ) -> Vec<Arc<Clause>> {
        let mark_skolems = annotated.role.is_goal();
        clausify(env, annotated.formula, mark_skolems)
            .into_iter()
            .map(|literals| Arc::new(Clause::input(&env.terms, literals, annotated.role)))
            .collect()
    }

    fn check_owner(&self, owner: u64) -> BuilderResult<()> {
        if owner != self.id {
            return Err(BuilderError::ForeignExpression);
        }
        Ok(())
    }

    fn wrap(&self, formula: Formula) -> BFormula {
        BFormula {
            owner: self.id,
            formula,
            bound: HashSet::new(),
        }
    }
}

/// Flag every function symbol of the conjecture as a goal symbol
fn mark_goal_symbols(env: &mut Environment, formula: &Formula) {
    match formula {
        Formula::True | Formula::False => {}
        Formula::Atom(lit) => {
            let terms: Vec<TermId> = match env.terms.atom(lit.atom) {
                AtomNode::Pred { args, .. } => args.clone(),
                AtomNode::Eq { lhs, rhs, .. } => vec![*lhs, *rhs],
            };
            for t in terms {
                let subterms: Vec<TermId> = env.terms.subterms(t).collect();
                for s in subterms {
                    if let Some(f) = env.terms.symbol(s) {
                        env.signature.function_mut(f).in_goal = true;
                    }
                }
            }
        }
        Formula::And(fs) | Formula::Or(fs) => {
            for f in fs {
                mark_goal_symbols(env, f);
            }
        }
        Formula::Not(f) => mark_goal_symbols(env, f),
        Formula::Implies(a, b) | Formula::Iff(a, b) | Formula::Xor(a, b) => {
            mark_goal_symbols(env, a);
            mark_goal_symbols(env, b);
        }
        Formula::Forall(_, f) | Formula::Exists(_, f) => mark_goal_symbols(env, f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_checks() {
        let mut env = Environment::with_default_options();
        let mut builder = FormulaBuilder::new(true, true);

        assert!(matches!(
            builder.function(&mut env, "Bad", vec![], SortTable::INDIVIDUAL),
            Err(BuilderError::InvalidName { .. })
        ));
        assert!(matches!(
            builder.predicate(&mut env, "Q", vec![]),
            Err(BuilderError::InvalidName { .. })
        ));
        assert!(matches!(
            builder.var(&mut env, "lower"),
            Err(BuilderError::InvalidName { .. })
        ));

        assert!(builder.function(&mut env, "good", vec![], SortTable::INDIVIDUAL).is_ok());
        assert!(builder.var(&mut env, "X").is_ok());

        // an unchecked builder accepts anything
        let mut lax = FormulaBuilder::new(false, false);
        assert!(lax.var(&mut env, "lower").is_ok());
    }

    #[test]
    fn test_same_name_same_variable() {
        let mut env = Environment::with_default_options();
        let mut builder = FormulaBuilder::new(true, true);
        let x1 = builder.var(&mut env, "X").expect("valid");
        let x2 = builder.var(&mut env, "X").expect("valid");
        assert_eq!(x1, x2);
    }

    #[test]
    fn test_foreign_expressions_are_rejected() {
        let mut env = Environment::with_default_options();
        let mut b1 = FormulaBuilder::new(true, true);
        let b2 = FormulaBuilder::new(true, true);

        let x = b1.var(&mut env, "X").expect("valid");
        assert!(matches!(
            b2.var_term(&mut env, x),
            Err(BuilderError::ForeignExpression)
        ));
    }

    #[test]
    fn test_rebinding_is_an_error() {
        let mut env = Environment::with_default_options();
        let mut builder = FormulaBuilder::new(true, true);

        let p = builder
            .predicate(&mut env, "p", vec![SortTable::INDIVIDUAL])
            .expect("valid");
        let x = builder.var(&mut env, "X").expect("valid");
        let tx = builder.var_term(&mut env, x).expect("valid");
        let px = builder.atom(&mut env, p, vec![tx], true).expect("valid");

        let inner = builder
            .quantified(&env, Quantifier::Forall, x, px)
            .expect("valid");
        assert!(matches!(
            builder.quantified(&env, Quantifier::Exists, x, inner),
            Err(BuilderError::VariableAlreadyBound(_))
        ));
    }

    #[test]
    fn test_arity_mismatch() {
        let mut env = Environment::with_default_options();
        let builder = FormulaBuilder::new(true, true);
        let ind = SortTable::INDIVIDUAL;
        let f = builder
            .function(&mut env, "f", vec![ind, ind], ind)
            .expect("valid");
        let a = builder.constant(&mut env, "a").expect("valid");

        assert!(matches!(
            builder.term(&mut env, f, vec![a]),
            Err(BuilderError::ArityMismatch { .. })
        ));
    }

    #[test]
    fn test_conjecture_is_closed_and_negated() {
        let mut env = Environment::with_default_options();
        let mut builder = FormulaBuilder::new(true, true);
        let ind = SortTable::INDIVIDUAL;

        let p = builder.predicate(&mut env, "p", vec![ind]).expect("valid");
        let x = builder.var(&mut env, "X").expect("valid");
        let tx = builder.var_term(&mut env, x).expect("valid");
        let px = builder.atom(&mut env, p, vec![tx], true).expect("valid");

        let annotated = builder
            .annotated(&mut env, px, Annotation::Conjecture, "goal")
            .expect("valid");
        assert_eq!(annotated.role, ClauseRole::NegatedConjecture);
        // ¬∀X p(X)
        match &annotated.formula {
            Formula::Not(inner) => {
                assert!(matches!(**inner, Formula::Forall(_, _)));
            }
            other => panic!("expected negated closure, got {:?}", other),
        }

        // clausification skolemizes the counterexample
        let clauses = builder.clausify(&mut env, annotated);
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].role, ClauseRole::NegatedConjecture);
        assert!(clauses[0].derived_from_goal);
        let lit = clauses[0].literals[0];
        assert!(lit.is_negative());
        assert!(lit.is_ground(&env.terms));
    }

    #[test]
    fn test_ite_expansion() {
        let mut env = Environment::with_default_options();
        let builder = FormulaBuilder::new(true, true);
        let c = builder.predicate(&mut env, "c", vec![]).expect("valid");
        let t = builder.predicate(&mut env, "t", vec![]).expect("valid");
        let e = builder.predicate(&mut env, "e", vec![]).expect("valid");

        let fc = builder.atom(&mut env, c, vec![], true).expect("valid");
        let ft = builder.atom(&mut env, t, vec![], true).expect("valid");
        let fe = builder.atom(&mut env, e, vec![], true).expect("valid");

        let ite = builder.ite(fc, ft, fe).expect("valid");
        match ite.formula() {
            Formula::And(parts) => assert_eq!(parts.len(), 2),
            other => panic!("expected conjunction of implications, got {:?}", other),
        }
    }

    #[test]
    fn test_goal_symbols_are_marked() {
        let mut env = Environment::with_default_options();
        let mut builder = FormulaBuilder::new(true, true);
        let ind = SortTable::INDIVIDUAL;

        let p = builder.predicate(&mut env, "p", vec![ind]).expect("valid");
        let a = builder.constant(&mut env, "a").expect("valid");
        let pa = builder.atom(&mut env, p, vec![a], true).expect("valid");
        builder
            .annotated(&mut env, pa, Annotation::Conjecture, "goal")
            .expect("valid");

        let a_id = env.signature.get_function("a", 0).expect("declared");
        assert!(env.signature.function(a_id).in_goal);
    }
}
