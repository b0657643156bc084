//! Inference core configuration.

use serde::{Deserialize, Serialize};

/// Which induction axioms to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InductionMode {
    #[default]
    None,
    Structural,
    Mathematical,
    Both,
}

impl InductionMode {
    pub fn structural(self) -> bool {
        matches!(self, InductionMode::Structural | InductionMode::Both)
    }

    pub fn mathematical(self) -> bool {
        matches!(self, InductionMode::Mathematical | InductionMode::Both)
    }
}

/// Structural induction scheme selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StructuralInductionScheme {
    #[default]
    One,
    Two,
    Three,
    All,
}

impl StructuralInductionScheme {
    pub fn one(self) -> bool {
        matches!(self, Self::One | Self::All)
    }

    pub fn two(self) -> bool {
        matches!(self, Self::Two | Self::All)
    }

    pub fn three(self) -> bool {
        matches!(self, Self::Three | Self::All)
    }
}

/// Mathematical induction scheme selection. Scheme two is recognised but
/// generates nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MathInductionScheme {
    #[default]
    One,
    Two,
    All,
}

impl MathInductionScheme {
    pub fn one(self) -> bool {
        matches!(self, Self::One | Self::All)
    }
}

/// Which literal targets are eligible for induction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InductionChoice {
    /// Any eligible subterm
    All,
    /// Head symbol must occur in the goal
    #[default]
    Goal,
    /// Goal symbols plus skolem constants introduced while clausifying it
    GoalPlus,
}

/// Unification-with-abstraction policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AbstractionPolicy {
    /// Classical unification
    #[default]
    Off,
    /// Abstract, but reject inferences whose constraint pairs are
    /// non-ground and non-theory on both sides
    Ground,
    /// Abstract on any theory clash
    Full,
}

/// Equality proxy axiomatisation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EqualityProxyMode {
    #[default]
    Off,
    /// Reflexivity only
    R,
    /// Reflexivity, symmetry, transitivity
    RST,
    /// RST plus congruence for every symbol
    RSTC,
}

/// Literal selection strategies (numbers match the usual `--selection`
/// convention from Hoder et al. "Selecting the selection", 2016).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LiteralSelectionStrategy {
    /// Selection 0: select all literals
    Sel0,
    /// Selection 20: select all maximal literals
    Sel20,
    /// Selection 21: unique maximal, else max-weight negative, else maximal
    #[default]
    Sel21,
    /// Selection 22: max-weight negative literal, else all maximal
    Sel22,
}

/// The recognised options of the inference core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    pub induction: InductionMode,
    pub struct_induction_scheme: StructuralInductionScheme,
    pub math_induction_scheme: MathInductionScheme,
    pub induction_choice: InductionChoice,
    /// Only clauses of length 1 trigger induction
    pub induction_unit_only: bool,
    /// Only negative literals (or interpreted inequalities) trigger induction
    pub induction_neg_only: bool,
    /// Allow compound induction targets, not just constants
    pub induction_on_complex_terms: bool,
    /// Enable occurrence generalisation
    pub induction_gen: bool,
    /// Maximum induction depth, 0 = unlimited
    pub max_induction_depth: usize,
    /// Maximum size of generalisation subsets, 0 = unlimited
    pub max_induction_gen_subset_size: usize,
    pub unification_with_abstraction: AbstractionPolicy,
    pub equality_proxy: EqualityProxyMode,
    /// Reject equality-resolution children whose resolved literal is
    /// dominated by another selected literal after unification
    pub literal_maximality_aftercheck: bool,
    pub literal_selection: LiteralSelectionStrategy,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        InferenceConfig {
            induction: InductionMode::None,
            struct_induction_scheme: StructuralInductionScheme::One,
            math_induction_scheme: MathInductionScheme::One,
            induction_choice: InductionChoice::Goal,
            induction_unit_only: false,
            induction_neg_only: false,
            induction_on_complex_terms: false,
            induction_gen: false,
            max_induction_depth: 0,
            max_induction_gen_subset_size: 0,
            unification_with_abstraction: AbstractionPolicy::Off,
            equality_proxy: EqualityProxyMode::Off,
            literal_maximality_aftercheck: false,
            literal_selection: LiteralSelectionStrategy::Sel21,
        }
    }
}
