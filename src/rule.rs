//! Production rules.

use crate::symbol::{ContextSpec, Symbol, SymbolError, parse_symbols};
use serde::{Deserialize, Serialize};

/// A single production rule: rewrite `target` into `replacement` when both
/// context requirements hold.
///
/// `probability` is deliberately unvalidated (negative values or sums above
/// one across matching rules are a modelling choice, not an error); see
/// [`LSystem`](crate::LSystem) for how the shared probability draw is spent
/// across matching rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// The symbol being rewritten.
    pub target: Symbol,

    /// What the target becomes. May be empty (the symbol is erased).
    pub replacement: Vec<Symbol>,

    /// Requirement on the resolved left neighbour.
    pub left: ContextSpec,

    /// Requirement on the resolved right neighbour.
    pub right: ContextSpec,

    /// Chance that this rule wins once it matches. Defaults to `1.0`.
    pub probability: f32,
}

impl Rule {
    /// Creates a context-free rule `target -> replacement` with probability 1.
    ///
    /// Fails if any character falls outside the 0-127 alphabet.
    pub fn new(target: char, replacement: &str) -> Result<Self, SymbolError> {
        Ok(Rule {
            target: Symbol::new(target)?,
            replacement: parse_symbols(replacement)?,
            left: ContextSpec::Any,
            right: ContextSpec::Any,
            probability: 1.0,
        })
    }

    /// Sets the left-context requirement (builder style).
    pub fn with_left(mut self, left: ContextSpec) -> Self {
        self.left = left;
        self
    }

    /// Sets the right-context requirement (builder style).
    pub fn with_right(mut self, right: ContextSpec) -> Self {
        self.right = right;
        self
    }

    /// Sets the win probability (builder style).
    pub fn with_probability(mut self, probability: f32) -> Self {
        self.probability = probability;
        self
    }

    /// Whether this rule applies to `target` between the two resolved
    /// neighbours (`None` = string boundary).
    pub fn matches(&self, target: Symbol, left: Option<Symbol>, right: Option<Symbol>) -> bool {
        self.target == target && self.left.matches(left) && self.right.matches(right)
    }
}
