//! Term ordering (Knuth-Bendix) and its extension to literals.
//!
//! The simplification ordering used by literal selection and by the
//! literal-maximality aftercheck of the generating rules.

use crate::fol::literal::Literal;
use crate::fol::signature::FunctionId;
use crate::fol::term::{AtomNode, TermBank, TermId, TermNode};
use std::collections::HashMap;

/// Result of comparing two terms or literals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermOrdering {
    Greater,
    Less,
    Equal,
    Incomparable,
}

/// Configuration for the Knuth-Bendix ordering
#[derive(Debug, Clone)]
pub struct KBOConfig {
    /// Weight of each function symbol (default weight is 1)
    pub function_weights: HashMap<FunctionId, usize>,
    /// Precedence of symbols (higher value = higher precedence)
    pub function_precedence: HashMap<FunctionId, usize>,
    /// Weight of variables (must be positive)
    pub variable_weight: usize,
}

impl Default for KBOConfig {
    fn default() -> Self {
        KBOConfig {
            function_weights: HashMap::new(),
            function_precedence: HashMap::new(),
            variable_weight: 1,
        }
    }
}

/// Knuth-Bendix ordering on shared terms
#[derive(Debug, Clone, Default)]
pub struct KBO {
    config: KBOConfig,
}

impl KBO {
    pub fn new(config: KBOConfig) -> Self {
        KBO { config }
    }

    fn function_weight(&self, id: FunctionId) -> usize {
        self.config.function_weights.get(&id).copied().unwrap_or(1)
    }

    fn function_precedence(&self, id: FunctionId) -> usize {
        self.config
            .function_precedence
            .get(&id)
            .copied()
            .unwrap_or(0)
    }

    /// KBO weight of a term under the configured symbol weights
    pub fn term_weight(&self, bank: &TermBank, term: TermId) -> usize {
        match bank.node(term) {
            TermNode::Var { .. } => self.config.variable_weight,
            TermNode::App { symbol, args, .. } => {
                self.function_weight(*symbol)
                    + args
                        .iter()
                        .map(|&a| self.term_weight(bank, a))
                        .sum::<usize>()
            }
        }
    }

    /// Count occurrences of each variable in a term
    pub fn count_variables(&self, bank: &TermBank, term: TermId) -> HashMap<u32, usize> {
        let mut counts = HashMap::new();
        count_variables_rec(bank, term, &mut counts);
        counts
    }

    /// Compare two terms using KBO
    pub fn compare(&self, bank: &TermBank, s: TermId, t: TermId) -> TermOrdering {
        // shared terms: syntactic equality is identity
        if s == t {
            return TermOrdering::Equal;
        }

        let vars_s = self.count_variables(bank, s);
        let vars_t = self.count_variables(bank, t);

        // for s > t, need #(x, s) >= #(x, t) for all variables x
        let s_gt_t_var_cond = vars_t.iter().all(|(var, count_t)| {
            let count_s = vars_s.get(var).copied().unwrap_or(0);
            count_s >= *count_t
        });
        let t_gt_s_var_cond = vars_s.iter().all(|(var, count_s)| {
            let count_t = vars_t.get(var).copied().unwrap_or(0);
            count_t >= *count_s
        });

        let weight_s = self.term_weight(bank, s);
        let weight_t = self.term_weight(bank, t);

        if weight_s > weight_t && s_gt_t_var_cond {
            TermOrdering::Greater
        } else if weight_t > weight_s && t_gt_s_var_cond {
            TermOrdering::Less
        } else if weight_s == weight_t {
            if s_gt_t_var_cond && t_gt_s_var_cond {
                self.compare_lex(bank, s, t)
            } else if s_gt_t_var_cond {
                match self.compare_lex(bank, s, t) {
                    lex @ (TermOrdering::Greater | TermOrdering::Equal) => lex,
                    _ => TermOrdering::Incomparable,
                }
            } else if t_gt_s_var_cond {
                match self.compare_lex(bank, s, t) {
                    lex @ (TermOrdering::Less | TermOrdering::Equal) => lex,
                    _ => TermOrdering::Incomparable,
                }
            } else {
                TermOrdering::Incomparable
            }
        } else {
            TermOrdering::Incomparable
        }
    }

    /// Lexicographic comparison for terms of equal weight
    fn compare_lex(&self, bank: &TermBank, s: TermId, t: TermId) -> TermOrdering {
        match (bank.node(s), bank.node(t)) {
            (TermNode::Var { index: v1 }, TermNode::Var { index: v2 }) => {
                if v1 == v2 {
                    TermOrdering::Equal
                } else if v1 > v2 {
                    TermOrdering::Greater
                } else {
                    TermOrdering::Less
                }
            }
            // variables are smaller than applications in the lex tiebreak
            (TermNode::Var { .. }, _) => TermOrdering::Less,
            (_, TermNode::Var { .. }) => TermOrdering::Greater,
            (
                TermNode::App {
                    symbol: f1,
                    args: args1,
                    ..
                },
                TermNode::App {
                    symbol: f2,
                    args: args2,
                    ..
                },
            ) => {
                if f1 != f2 {
                    let prec1 = self.function_precedence(*f1);
                    let prec2 = self.function_precedence(*f2);
                    if prec1 > prec2 {
                        TermOrdering::Greater
                    } else if prec1 < prec2 {
                        TermOrdering::Less
                    } else if f1 > f2 {
                        TermOrdering::Greater
                    } else {
                        TermOrdering::Less
                    }
                } else {
                    let args1 = args1.clone();
                    let args2 = args2.clone();
                    for (&a1, &a2) in args1.iter().zip(args2.iter()) {
                        match self.compare(bank, a1, a2) {
                            TermOrdering::Equal => continue,
                            other => return other,
                        }
                    }
                    TermOrdering::Equal
                }
            }
        }
    }
}

fn count_variables_rec(bank: &TermBank, term: TermId, counts: &mut HashMap<u32, usize>) {
    match bank.node(term) {
        TermNode::Var { index } => {
            *counts.entry(*index).or_insert(0) += 1;
        }
        TermNode::App { args, .. } => {
            for &a in args.iter() {
                count_variables_rec(bank, a, counts);
            }
        }
    }
}

/// Head rank used to compare atoms of equal weight: equality is the smallest
/// head, predicates are ordered by ID.
fn atom_head_rank(bank: &TermBank, lit: &Literal) -> u64 {
    match bank.atom(lit.atom) {
        AtomNode::Eq { .. } => 0,
        AtomNode::Pred { predicate, .. } => 1 + predicate.as_u32() as u64,
    }
}

/// Compare two literals with the KBO extension to atoms: variable condition,
/// then weight, then head precedence, then lexicographic arguments.
/// Returns true if `lit1` strictly dominates `lit2`.
pub fn literal_greater(bank: &TermBank, kbo: &KBO, lit1: &Literal, lit2: &Literal) -> bool {
    let mut vars1 = HashMap::new();
    let mut vars2 = HashMap::new();
    for t in lit1.args(bank) {
        count_variables_rec(bank, t, &mut vars1);
    }
    for t in lit2.args(bank) {
        count_variables_rec(bank, t, &mut vars2);
    }

    let var_cond = vars2.iter().all(|(var, count2)| {
        let count1 = vars1.get(var).copied().unwrap_or(0);
        count1 >= *count2
    });
    if !var_cond {
        return false;
    }

    let weight1 = lit1.weight(bank);
    let weight2 = lit2.weight(bank);
    if weight1 > weight2 {
        return true;
    }
    if weight1 < weight2 {
        return false;
    }

    let head1 = atom_head_rank(bank, lit1);
    let head2 = atom_head_rank(bank, lit2);
    if head1 != head2 {
        return head1 > head2;
    }

    for (a1, a2) in lit1.args(bank).into_iter().zip(lit2.args(bank)) {
        match kbo.compare(bank, a1, a2) {
            TermOrdering::Greater => return true,
            TermOrdering::Less => return false,
            TermOrdering::Equal | TermOrdering::Incomparable => continue,
        }
    }

    false
}
