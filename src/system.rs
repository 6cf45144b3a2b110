//! The rewriting engine.
//!
//! [`LSystem`] owns a seed, an ordered rule list, an ignore set, and an RNG
//! seed, and caches the most recently derived string together with its
//! stage. [`LSystem::generate`] replays rewriting steps forward from the
//! cache (or from the seed, when asked for an earlier stage), so scrubbing a
//! stage slider back and forth stays cheap.

use crate::rule::Rule;
use crate::symbol::{ContextSpec, Symbol, SymbolError, SymbolSet, parse_symbols};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// A context-sensitive, stochastic L-System.
///
/// Every mutating edit (seed, rules, ignore list, RNG seed) resets the
/// cached derivation to stage 0, so the cached string is always exactly the
/// seed rewritten [`stage`](Self::stage) times.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LSystem {
    seed: Vec<Symbol>,
    rules: Vec<Rule>,
    ignored: SymbolSet,
    rng_seed: u64,
    value: Vec<Symbol>,
    stage: u32,
}

impl LSystem {
    /// Creates a system from a seed string with no rules.
    ///
    /// Fails if the seed contains characters outside the 0-127 alphabet.
    pub fn new(seed: &str) -> Result<Self, SymbolError> {
        let seed = parse_symbols(seed)?;
        Ok(LSystem {
            value: seed.clone(),
            seed,
            ..Default::default()
        })
    }

    /// The stage-0 string.
    pub fn seed(&self) -> &[Symbol] {
        &self.seed
    }

    /// The rules, in application/tie-break order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Symbols skipped during context resolution.
    pub fn ignored(&self) -> SymbolSet {
        self.ignored
    }

    /// The seed of the per-step random generator.
    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// The cached derived string, without forcing a derivation.
    pub fn value(&self) -> &[Symbol] {
        &self.value
    }

    /// How many rewriting passes produced [`value`](Self::value).
    pub fn stage(&self) -> u32 {
        self.stage
    }

    /// Replaces the seed and resets to stage 0.
    pub fn set_seed(&mut self, seed: &str) -> Result<(), SymbolError> {
        self.seed = parse_symbols(seed)?;
        self.reset();
        Ok(())
    }

    /// Replaces the seed with an already-validated symbol sequence.
    pub fn set_seed_symbols(&mut self, seed: Vec<Symbol>) {
        self.seed = seed;
        self.reset();
    }

    /// Appends a rule. Order matters: earlier rules get first claim on the
    /// probability draw when several rules match.
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
        self.reset();
    }

    /// Overwrites the rule at `index`, if it exists.
    pub fn replace_rule(&mut self, index: usize, rule: Rule) {
        if let Some(slot) = self.rules.get_mut(index) {
            *slot = rule;
            self.reset();
        }
    }

    /// Removes and returns the rule at `index`, if it exists.
    pub fn remove_rule(&mut self, index: usize) -> Option<Rule> {
        if index < self.rules.len() {
            let rule = self.rules.remove(index);
            self.reset();
            Some(rule)
        } else {
            None
        }
    }

    /// Drops every rule.
    pub fn clear_rules(&mut self) {
        self.rules.clear();
        self.reset();
    }

    /// Marks a symbol as invisible to context resolution.
    pub fn add_ignored(&mut self, sym: Symbol) {
        self.ignored.insert(sym);
        self.reset();
    }

    /// Replaces the whole ignore set.
    pub fn set_ignored(&mut self, ignored: SymbolSet) {
        self.ignored = ignored;
        self.reset();
    }

    /// Sets the RNG seed, making future derivations reproducible for this
    /// exact (seed, rules, rng_seed) triple.
    pub fn set_rng_seed(&mut self, rng_seed: u64) {
        self.rng_seed = rng_seed;
        self.reset();
    }

    /// Picks a fresh RNG seed at random, for users fishing for a different
    /// stochastic variant of the same rule set.
    pub fn regenerate_rng_seed(&mut self) {
        self.set_rng_seed(rand::rng().random());
    }

    /// Discards the cached derivation: value := seed, stage := 0.
    pub fn reset(&mut self) {
        self.value = self.seed.clone();
        self.stage = 0;
    }

    /// Returns the string at `stage`, resetting and/or stepping as needed.
    ///
    /// Requesting a stage at or past the cache costs only the difference in
    /// steps; requesting an earlier stage re-derives from the seed.
    pub fn generate(&mut self, stage: u32) -> &[Symbol] {
        if self.stage > stage {
            self.reset();
        }
        while self.stage < stage {
            self.step();
        }
        &self.value
    }

    /// Advances the cached string by one derivation stage.
    ///
    /// The random generator is re-seeded from [`rng_seed`](Self::rng_seed)
    /// on every call, so stage N is the same string no matter how the caller
    /// got there. All replacements are resolved against the pre-step string;
    /// a replacement never sees another replacement from the same pass.
    pub fn step(&mut self) {
        self.stage += 1;

        let mut rng = StdRng::seed_from_u64(self.rng_seed);
        let mut next = Vec::with_capacity(self.value.len());

        for position in 0..self.value.len() {
            let target = self.value[position];
            let left = self.left_neighbour(position);
            let right = self.right_neighbour(position);

            // One shared draw per position, spent across matching rules.
            // Drawn even when nothing matches, to keep the draw sequence
            // independent of the rule set's coverage.
            let sample = rng.random::<f32>();
            match select_replacement(&self.rules, target, left, right, sample) {
                Some(replacement) => next.extend_from_slice(replacement),
                None => next.push(target),
            }
        }

        self.value = next;
    }

    /// Whether `sym` appears anywhere in the system: seed, rule target,
    /// either explicit context, or any replacement character.
    ///
    /// Hosts use this to prune stale symbol-map entries.
    pub fn char_used(&self, sym: Symbol) -> bool {
        if self.seed.contains(&sym) {
            return true;
        }
        self.rules.iter().any(|rule| {
            rule.target == sym
                || rule.left == ContextSpec::Exact(sym)
                || rule.right == ContextSpec::Exact(sym)
                || rule.replacement.contains(&sym)
        })
    }

    /// Resolves the left context of the symbol at `position`.
    ///
    /// Walks leftward, skipping ignored symbols and whole branches: a `]`
    /// enters a branch (depth +1), a `[` leaves one (depth -1, clamped at 0
    /// so unbalanced strings never wedge the scan). The first plain symbol
    /// at depth 0 is the neighbour; the start of the string is the boundary.
    ///
    /// Known limitation, kept for compatibility with the classical bracketed
    /// model: only productions shaped like `A[B]` with at least one
    /// non-ignored symbol in `A` resolve correctly, since consecutive `[`s
    /// on the left make the depth count ambiguous.
    fn left_neighbour(&self, position: usize) -> Option<Symbol> {
        let mut depth = 0usize;
        for index in (0..position).rev() {
            let sym = self.value[index];
            if self.ignored.contains(sym) {
                continue;
            }
            if sym == Symbol::OPEN_BRANCH {
                depth = depth.saturating_sub(1);
            } else if sym == Symbol::CLOSE_BRANCH {
                depth += 1;
            } else if depth == 0 {
                return Some(sym);
            }
        }
        None
    }

    /// Resolves the right context of the symbol at `position`.
    ///
    /// Mirrors the left scan with one asymmetry: a `]` at depth 0 means the
    /// rest of the string belongs to an enclosing branch, so the neighbour
    /// is the boundary immediately. (Hogeweg's paper reads differently for
    /// an opening bracket; this follows the established implementation
    /// behaviour, which existing systems depend on.)
    fn right_neighbour(&self, position: usize) -> Option<Symbol> {
        let mut depth = 0usize;
        for &sym in &self.value[(position + 1).min(self.value.len())..] {
            if self.ignored.contains(sym) {
                continue;
            }
            if sym == Symbol::OPEN_BRANCH {
                depth += 1;
            } else if sym == Symbol::CLOSE_BRANCH {
                if depth == 0 {
                    return None;
                }
                depth -= 1;
            } else if depth == 0 {
                return Some(sym);
            }
        }
        None
    }
}

/// Picks the replacement for `target` given one uniform draw `sample` in
/// `[0, 1)`.
///
/// Rules are scanned in stored order; the first matching rule whose
/// probability exceeds the remaining sample wins, otherwise its probability
/// is subtracted and the scan continues. Earlier rules therefore get first
/// claim on the probability mass. `None` means no rule won and the target
/// is kept as-is (the implicit identity rule).
fn select_replacement<'a>(
    rules: &'a [Rule],
    target: Symbol,
    left: Option<Symbol>,
    right: Option<Symbol>,
    mut sample: f32,
) -> Option<&'a [Symbol]> {
    for rule in rules {
        if rule.matches(target, left, right) {
            if sample < rule.probability {
                return Some(&rule.replacement);
            }
            sample -= rule.probability;
        }
    }
    None
}
