//! The saturation-facing surface of the inference core.
//!
//! The outer loop owns clause selection and the passive/active sets; the
//! core exposes a pipeline that simplifies one clause to a fixed point and
//! enumerates the children of a given clause, plus the subsumption decision
//! procedure for forward/backward simplification.

pub mod subsumption;

pub use subsumption::{subsumes, subsumes_with_witness};

use crate::config::{InductionMode, InferenceConfig};
use crate::env::Environment;
use crate::fol::clause::Clause;
use crate::generating::{ClauseStream, EqualityResolutionRule, GeneratingRule, InductionRule};
use crate::selection::{apply_selection, selector_for, LiteralSelector};
use crate::simplifying::{
    DistinctEqualityRule, GaussianVariableEliminationRule, InterpretedEvaluationRule, Simplified,
    SimplifyingRule,
};
use log::debug;
use std::sync::Arc;

/// The rule set of one run, assembled from the configuration.
pub struct InferencePipeline {
    selector: Box<dyn LiteralSelector>,
    simplifiers: Vec<Box<dyn SimplifyingRule>>,
    generators: Vec<Box<dyn GeneratingRule>>,
}

impl InferencePipeline {
    pub fn from_config(config: &InferenceConfig) -> Self {
        let mut generators: Vec<Box<dyn GeneratingRule>> =
            vec![Box::new(EqualityResolutionRule::new())];
        if config.induction != InductionMode::None {
            generators.push(Box::new(InductionRule::new()));
        }
        InferencePipeline {
            selector: selector_for(config.literal_selection),
            simplifiers: vec![
                Box::new(InterpretedEvaluationRule::new()),
                Box::new(GaussianVariableEliminationRule::new()),
                Box::new(DistinctEqualityRule::new()),
            ],
            generators,
        }
    }

    /// Apply every simplifying rule to a fixed point. Returns None when some
    /// rule found the clause redundant. Abortable between rule invocations.
    pub fn simplify(&mut self, clause: Arc<Clause>, env: &mut Environment) -> Option<Arc<Clause>> {
        let mut current = clause;
        loop {
            if env.limits.aborted() {
                return Some(current);
            }
            let mut changed = false;
            for rule in &mut self.simplifiers {
                match rule.simplify(&current, env) {
                    Simplified::Unchanged => {}
                    Simplified::Replaced(next) => {
                        debug!(
                            "{}: {} => {}",
                            rule.name(),
                            current.display(&env.terms, &env.signature),
                            next.display(&env.terms, &env.signature)
                        );
                        current = next;
                        changed = true;
                    }
                    Simplified::Redundant => return None,
                }
            }
            if !changed {
                return Some(current);
            }
        }
    }

    /// Apply literal selection, producing the activated clause handed to the
    /// generating rules.
    pub fn activate(&self, clause: &Arc<Clause>, env: &Environment) -> Arc<Clause> {
        let mut activated = (**clause).clone();
        apply_selection(env, &mut activated, self.selector.as_ref());
        Arc::new(activated)
    }

    /// Enumerate the children of an activated clause across all generating
    /// rules. Abortable between rules.
    pub fn generate(&mut self, clause: &Arc<Clause>, env: &mut Environment) -> ClauseStream {
        let mut children = Vec::new();
        for rule in &mut self.generators {
            if env.limits.aborted() {
                break;
            }
            children.extend(rule.generate(clause, env));
        }
        ClauseStream::from_vec(children)
    }
}
