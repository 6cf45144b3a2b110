//! Symbols, context specifiers, and symbol sets.
//!
//! The alphabet is bounded to the 128 code points `0..=127`. String-boundary
//! ("end"), "don't care", and "any symbol" markers are *not* members of the
//! alphabet: a resolved neighbour is an `Option<Symbol>` (`None` = boundary)
//! and a rule's context requirement is a [`ContextSpec`], so the sentinels
//! can never collide with user input.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of code points in the supported alphabet.
pub const ALPHABET_SIZE: usize = 128;

/// Raised when a character outside the `0..=127` alphabet reaches a seed,
/// rule, or ignore-list constructor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("character {ch:?} is outside the supported 0-127 alphabet")]
pub struct SymbolError {
    /// The offending character.
    pub ch: char,
}

/// A single alphabet symbol, guaranteed to be in `0..=127`.
///
/// Construction goes through [`Symbol::new`], which rejects anything outside
/// the alphabet. This is the one hard precondition in the crate; everything
/// past it can index by symbol code without further checks.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Symbol(u8);

impl Symbol {
    /// Opens a branch. Structural for context resolution: never a context
    /// symbol itself, but adjusts bracket depth while scanning.
    pub const OPEN_BRANCH: Symbol = Symbol(b'[');

    /// Closes a branch. Structural, like [`Symbol::OPEN_BRANCH`].
    pub const CLOSE_BRANCH: Symbol = Symbol(b']');

    /// Creates a symbol from a character, rejecting code points above 127.
    pub fn new(ch: char) -> Result<Self, SymbolError> {
        let code = ch as u32;
        if code < ALPHABET_SIZE as u32 {
            Ok(Symbol(code as u8))
        } else {
            Err(SymbolError { ch })
        }
    }

    /// The symbol as a plain character.
    pub fn as_char(self) -> char {
        self.0 as char
    }

    /// The symbol's code point, always `< 128`.
    pub fn code(self) -> u8 {
        self.0
    }
}

impl TryFrom<char> for Symbol {
    type Error = SymbolError;

    fn try_from(ch: char) -> Result<Self, SymbolError> {
        Symbol::new(ch)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Parses a string into a symbol sequence, failing on the first character
/// outside the alphabet.
pub fn parse_symbols(s: &str) -> Result<Vec<Symbol>, SymbolError> {
    s.chars().map(Symbol::new).collect()
}

/// Renders a symbol sequence back into a plain string, e.g. for the host's
/// raw-string preview or clipboard export.
pub fn format_symbols(symbols: &[Symbol]) -> String {
    symbols.iter().map(|s| s.as_char()).collect()
}

/// A rule's requirement on one resolved neighbour.
///
/// A resolved neighbour is `Some(symbol)` or `None` for the string boundary
/// ("end"). Note the asymmetry between [`ContextSpec::Any`] and
/// [`ContextSpec::Wildcard`]: `Any` also accepts the boundary, `Wildcard`
/// requires that *some* symbol is there.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextSpec {
    /// The rule does not care about this side at all.
    #[default]
    Any,
    /// Any symbol satisfies, but the string boundary does not.
    Wildcard,
    /// Only the string boundary satisfies; lets a rule require "end of
    /// string" on one side.
    End,
    /// Only this exact symbol satisfies.
    Exact(Symbol),
}

impl ContextSpec {
    /// Shorthand for an [`ContextSpec::Exact`] requirement from a character.
    pub fn exact(ch: char) -> Result<Self, SymbolError> {
        Ok(ContextSpec::Exact(Symbol::new(ch)?))
    }

    /// Whether `neighbour` (resolved via the bracket-aware scan, `None` =
    /// string boundary) satisfies this requirement.
    pub fn matches(self, neighbour: Option<Symbol>) -> bool {
        match self {
            ContextSpec::Any => true,
            ContextSpec::Wildcard => neighbour.is_some(),
            ContextSpec::End => neighbour.is_none(),
            ContextSpec::Exact(sym) => neighbour == Some(sym),
        }
    }
}

/// A set of symbols, used for the engine's "ignored during context
/// resolution" list.
///
/// One bit per alphabet code point. [`Symbol`]'s constructor already bounds
/// the domain, so membership tests never index out of range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolSet(u128);

impl SymbolSet {
    /// An empty set.
    pub fn new() -> Self {
        SymbolSet(0)
    }

    /// Adds a symbol to the set.
    pub fn insert(&mut self, sym: Symbol) {
        self.0 |= 1u128 << sym.code();
    }

    /// Removes a symbol from the set.
    pub fn remove(&mut self, sym: Symbol) {
        self.0 &= !(1u128 << sym.code());
    }

    /// Whether the set contains `sym`.
    pub fn contains(&self, sym: Symbol) -> bool {
        self.0 & (1u128 << sym.code()) != 0
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Symbol> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        let mut set = SymbolSet::new();
        for sym in iter {
            set.insert(sym);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(ch: char) -> Symbol {
        Symbol::new(ch).unwrap()
    }

    #[test]
    fn rejects_out_of_alphabet_characters() {
        assert!(Symbol::new('A').is_ok());
        assert!(Symbol::new('\x7f').is_ok());
        assert_eq!(Symbol::new('é'), Err(SymbolError { ch: 'é' }));
        assert!(parse_symbols("F[+F]λ").is_err());
    }

    #[test]
    fn parse_and_format_round_trip() {
        let symbols = parse_symbols("F[+F]F").unwrap();
        assert_eq!(symbols.len(), 6);
        assert_eq!(format_symbols(&symbols), "F[+F]F");
    }

    // The 3x3 truth table for {Exact, Any, Wildcard} x {match, other, end},
    // plus the End specifier.
    #[test]
    fn context_spec_truth_table() {
        let a = Some(sym('A'));
        let b = Some(sym('B'));
        let end = None;

        let exact = ContextSpec::exact('A').unwrap();
        assert!(exact.matches(a));
        assert!(!exact.matches(b));
        assert!(!exact.matches(end));

        assert!(ContextSpec::Any.matches(a));
        assert!(ContextSpec::Any.matches(b));
        assert!(ContextSpec::Any.matches(end));

        assert!(ContextSpec::Wildcard.matches(a));
        assert!(ContextSpec::Wildcard.matches(b));
        assert!(!ContextSpec::Wildcard.matches(end));

        assert!(!ContextSpec::End.matches(a));
        assert!(ContextSpec::End.matches(end));
    }

    #[test]
    fn symbol_set_membership() {
        let mut set = SymbolSet::new();
        assert!(set.is_empty());
        set.insert(sym('X'));
        set.insert(sym('\x00'));
        set.insert(sym('\x7f'));
        assert!(set.contains(sym('X')));
        assert!(set.contains(sym('\x00')));
        assert!(set.contains(sym('\x7f')));
        assert!(!set.contains(sym('Y')));
        set.remove(sym('X'));
        assert!(!set.contains(sym('X')));
    }
}
