//! # fern-core
//!
//! A context-sensitive, stochastic L-System rewriting engine paired with a
//! 2D turtle-graphics interpreter that renders derived strings as
//! engine-agnostic drawing primitives.
//!
//! It decouples the *grammar* (seed + production rules, derived by
//! [`LSystem`]) from the *picture* (a [`Drawing`] of line and rectangle
//! primitives produced by [`TurtleInterpreter`]), so the same core drives
//! an interactive editor, an SVG exporter, or a headless test harness. The
//! crate never touches a display surface, an input event, or the
//! filesystem.

pub mod drawing;
pub mod interpreter;
pub mod rule;
pub mod symbol;
pub mod system;
pub mod turtle;

pub use drawing::*;
pub use interpreter::*;
pub use rule::*;
pub use symbol::*;
pub use system::*;
pub use turtle::*;
