//! Clausification: negation normal form, skolemization, distribution.
//!
//! Used to turn builder formulas and induction hypotheses into clauses.
//! Universally quantified variables keep their indices; existential
//! variables are replaced by skolem applications over the universal scope.

use crate::env::Environment;
use crate::fol::formula::Formula;
use crate::fol::literal::Literal;
use crate::fol::sorts::{SortId, SortTable};
use crate::fol::term::{AtomNode, TermId};
use std::collections::HashMap;

/// Negation normal form: negation pushed to the literals
#[derive(Debug, Clone)]
enum Nnf {
    True,
    False,
    Atom(Literal),
    And(Vec<Nnf>),
    Or(Vec<Nnf>),
    Forall(Vec<u32>, Box<Nnf>),
    Exists(Vec<u32>, Box<Nnf>),
}

/// Clausify a closed or open formula (free variables are read as universal).
///
/// When `mark_induction_skolems` is set, skolem symbols introduced here are
/// flagged in the signature; induction gating with the goal-plus policy
/// treats them as goal symbols.
pub fn clausify(
    env: &mut Environment,
    formula: Formula,
    mark_induction_skolems: bool,
) -> Vec<Vec<Literal>> {
    let var_sorts = infer_variable_sorts(env, &formula);
    let nnf = to_nnf(&formula, true);
    let mut scope = Vec::new();
    let mut replacements = HashMap::new();
    let skolemized = skolemize(
        env,
        nnf,
        &mut scope,
        &var_sorts,
        &mut replacements,
        mark_induction_skolems,
    );
    let mut clauses = distribute(&skolemized);
    for clause in &mut clauses {
        dedup_literals(clause);
    }
    clauses
}

fn to_nnf(formula: &Formula, positive: bool) -> Nnf {
    match formula {
        Formula::True => {
            if positive {
                Nnf::True
            } else {
                Nnf::False
            }
        }
        Formula::False => {
            if positive {
                Nnf::False
            } else {
                Nnf::True
            }
        }
        Formula::Atom(lit) => Nnf::Atom(if positive { *lit } else { lit.complement() }),
        Formula::Not(f) => to_nnf(f, !positive),
        Formula::And(fs) => {
            let parts = fs.iter().map(|f| to_nnf(f, positive)).collect();
            if positive {
                Nnf::And(parts)
            } else {
                Nnf::Or(parts)
            }
        }
        Formula::Or(fs) => {
            let parts = fs.iter().map(|f| to_nnf(f, positive)).collect();
            if positive {
                Nnf::Or(parts)
            } else {
                Nnf::And(parts)
            }
        }
        Formula::Implies(a, b) => {
            if positive {
                Nnf::Or(vec![to_nnf(a, false), to_nnf(b, true)])
            } else {
                Nnf::And(vec![to_nnf(a, true), to_nnf(b, false)])
            }
        }
        Formula::Iff(a, b) => {
            if positive {
                Nnf::And(vec![
                    Nnf::Or(vec![to_nnf(a, false), to_nnf(b, true)]),
                    Nnf::Or(vec![to_nnf(a, true), to_nnf(b, false)]),
                ])
            } else {
                // ¬(a ↔ b) is a ⊕ b
                Nnf::And(vec![
                    Nnf::Or(vec![to_nnf(a, true), to_nnf(b, true)]),
                    Nnf::Or(vec![to_nnf(a, false), to_nnf(b, false)]),
                ])
            }
        }
        Formula::Xor(a, b) => to_nnf(&Formula::Iff(a.clone(), b.clone()), !positive),
        Formula::Forall(vars, f) => {
            let body = Box::new(to_nnf(f, positive));
            if positive {
                Nnf::Forall(vars.clone(), body)
            } else {
                Nnf::Exists(vars.clone(), body)
            }
        }
        Formula::Exists(vars, f) => {
            let body = Box::new(to_nnf(f, positive));
            if positive {
                Nnf::Exists(vars.clone(), body)
            } else {
                Nnf::Forall(vars.clone(), body)
            }
        }
    }
}

fn skolemize(
    env: &mut Environment,
    nnf: Nnf,
    scope: &mut Vec<(u32, SortId)>,
    var_sorts: &HashMap<u32, SortId>,
    replacements: &mut HashMap<u32, TermId>,
    mark: bool,
) -> Nnf {
    match nnf {
        Nnf::True => Nnf::True,
        Nnf::False => Nnf::False,
        Nnf::Atom(lit) => {
            let mut atom = lit.atom;
            for (&var, &by) in replacements.iter() {
                let var_term = env.terms.var(var);
                atom = env.terms.replace_in_atom(&env.signature, atom, var_term, by);
            }
            Nnf::Atom(Literal {
                atom,
                polarity: lit.polarity,
            })
        }
        Nnf::And(fs) => Nnf::And(
            fs.into_iter()
                .map(|f| skolemize(env, f, scope, var_sorts, replacements, mark))
                .collect(),
        ),
        Nnf::Or(fs) => Nnf::Or(
            fs.into_iter()
                .map(|f| skolemize(env, f, scope, var_sorts, replacements, mark))
                .collect(),
        ),
        Nnf::Forall(vars, f) => {
            let n = scope.len();
            for &v in &vars {
                let sort = var_sorts.get(&v).copied().unwrap_or(SortTable::INDIVIDUAL);
                scope.push((v, sort));
            }
            let body = skolemize(env, *f, scope, var_sorts, replacements, mark);
            scope.truncate(n);
            Nnf::Forall(vars, Box::new(body))
        }
        Nnf::Exists(vars, f) => {
            let added: Vec<u32> = vars.clone();
            for &v in &vars {
                let result_sort = var_sorts.get(&v).copied().unwrap_or(SortTable::INDIVIDUAL);
                let arg_sorts: Vec<SortId> = scope.iter().map(|&(_, s)| s).collect();
                let sk = env
                    .signature
                    .add_fresh_function("sK", arg_sorts, result_sort);
                if mark {
                    env.signature.function_mut(sk).induction_skolem = true;
                }
                let args: Vec<TermId> = scope
                    .iter()
                    .map(|&(sv, _)| env.terms.var(sv))
                    .collect::<Vec<_>>();
                let term = env.app(sk, args);
                replacements.insert(v, term);
            }
            let body = skolemize(env, *f, scope, var_sorts, replacements, mark);
            for v in added {
                replacements.remove(&v);
            }
            body
        }
    }
}

fn distribute(nnf: &Nnf) -> Vec<Vec<Literal>> {
    match nnf {
        Nnf::True => vec![],
        Nnf::False => vec![vec![]],
        Nnf::Atom(lit) => vec![vec![*lit]],
        Nnf::Forall(_, f) => distribute(f),
        Nnf::Exists(_, _) => unreachable!("existentials are skolemized away"),
        Nnf::And(fs) => fs.iter().flat_map(distribute).collect(),
        Nnf::Or(fs) => {
            let mut acc: Vec<Vec<Literal>> = vec![vec![]];
            for f in fs {
                let parts = distribute(f);
                let mut next = Vec::with_capacity(acc.len() * parts.len());
                for left in &acc {
                    for right in &parts {
                        let mut merged = left.clone();
                        merged.extend(right.iter().copied());
                        next.push(merged);
                    }
                }
                acc = next;
            }
            acc
        }
    }
}

fn dedup_literals(clause: &mut Vec<Literal>) {
    let mut seen = Vec::new();
    clause.retain(|lit| {
        if seen.contains(lit) {
            false
        } else {
            seen.push(*lit);
            true
        }
    });
}

/// Infer the sort of every variable from the argument positions it occupies.
/// Variables that occur only directly under a quantifier default to `$i`.
fn infer_variable_sorts(env: &Environment, formula: &Formula) -> HashMap<u32, SortId> {
    let mut sorts = HashMap::new();
    collect_formula_sorts(env, formula, &mut sorts);
    sorts
}

fn collect_formula_sorts(env: &Environment, formula: &Formula, sorts: &mut HashMap<u32, SortId>) {
    match formula {
        Formula::True | Formula::False => {}
        Formula::Atom(lit) => match env.terms.atom(lit.atom) {
            AtomNode::Pred { predicate, args } => {
                let arg_sorts = env.signature.predicate(*predicate).arg_sorts.clone();
                for (i, &arg) in args.iter().enumerate() {
                    let expected = arg_sorts.get(i).copied();
                    collect_term_sorts(env, arg, expected, sorts);
                }
            }
            AtomNode::Eq { sort, lhs, rhs } => {
                collect_term_sorts(env, *lhs, Some(*sort), sorts);
                collect_term_sorts(env, *rhs, Some(*sort), sorts);
            }
        },
        Formula::And(fs) | Formula::Or(fs) => {
            for f in fs {
                collect_formula_sorts(env, f, sorts);
            }
        }
        Formula::Not(f) => collect_formula_sorts(env, f, sorts),
        Formula::Implies(a, b) | Formula::Iff(a, b) | Formula::Xor(a, b) => {
            collect_formula_sorts(env, a, sorts);
            collect_formula_sorts(env, b, sorts);
        }
        Formula::Forall(_, f) | Formula::Exists(_, f) => collect_formula_sorts(env, f, sorts),
    }
}

fn collect_term_sorts(
    env: &Environment,
    t: TermId,
    expected: Option<SortId>,
    sorts: &mut HashMap<u32, SortId>,
) {
    if let Some(index) = env.terms.var_index(t) {
        if let Some(sort) = expected {
            sorts.entry(index).or_insert(sort);
        }
        return;
    }
    if let Some(f) = env.terms.symbol(t) {
        let arg_sorts = env.signature.function(f).arg_sorts.clone();
        for (i, &arg) in env.terms.args(t).to_vec().iter().enumerate() {
            collect_term_sorts(env, arg, arg_sorts.get(i).copied(), sorts);
        }
    }
}
