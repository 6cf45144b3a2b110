//! Interpreter that converts an L-System symbol sequence into a [`Drawing`].
//!
//! The entry point is [`TurtleInterpreter`]. Configure it with a
//! [`TurtleConfig`], bind symbols to instructions via
//! [`TurtleInterpreter::set_instruction`] (or sync them from a system with
//! [`TurtleInterpreter::sync_symbols`]), then call
//! [`TurtleInterpreter::draw`] with a derived string.

use crate::drawing::Drawing;
use crate::symbol::Symbol;
use crate::system::LSystem;
use crate::turtle::{TurtleInstruction, TurtleMap, TurtlePose};
use glam::Vec2;

/// Marker squares are this fraction of the step size.
const MARKER_SCALE: f32 = 0.25;

/// Configuration for one turtle run.
#[derive(Clone, Copy, Debug)]
pub struct TurtleConfig {
    /// Where the turtle starts.
    pub origin: Vec2,

    /// Distance covered by one move-forward, in canvas units.
    pub step: f32,

    /// Rotation applied by one turn, in turns (1.0 = full rotation).
    pub angle_delta: f32,

    /// Maximum number of saved poses. Pushes past this are dropped, so a
    /// typo'd push-heavy string can't grow the stack without bound.
    pub max_stack_depth: usize,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            step: 5.0,
            angle_delta: 0.071,
            max_stack_depth: 1 << 16,
        }
    }
}

/// Interprets a derived symbol string as 2D turtle-graphics commands.
pub struct TurtleInterpreter {
    map: TurtleMap,
    config: TurtleConfig,
}

impl TurtleInterpreter {
    /// Creates a new interpreter with the given configuration and an empty
    /// symbol map.
    ///
    /// Bind instructions with [`set_instruction`](Self::set_instruction) or
    /// [`sync_symbols`](Self::sync_symbols) before calling
    /// [`draw`](Self::draw); with an empty map every symbol is a no-op.
    pub fn new(config: TurtleConfig) -> Self {
        Self {
            map: TurtleMap::new(),
            config,
        }
    }

    /// Replaces the entire symbol-to-instruction map in one step (builder
    /// pattern).
    pub fn with_map(mut self, map: TurtleMap) -> Self {
        self.map = map;
        self
    }

    /// Binds a single symbol to an instruction.
    pub fn set_instruction(&mut self, sym: Symbol, instruction: TurtleInstruction) {
        self.map.insert(sym, instruction);
    }

    /// The instruction a symbol is bound to. Unbound symbols are
    /// [`TurtleInstruction::Nop`].
    pub fn instruction_for(&self, sym: Symbol) -> TurtleInstruction {
        self.map.get(&sym).copied().unwrap_or_default()
    }

    /// Read access to the symbol map, e.g. for a host's binding table UI.
    pub fn map(&self) -> &TurtleMap {
        &self.map
    }

    /// The active configuration.
    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    /// Updates the configuration for subsequent runs.
    pub fn set_config(&mut self, config: TurtleConfig) {
        self.config = config;
    }

    /// Adds a [`TurtleInstruction::Nop`] binding for every symbol `system`
    /// uses that has no binding yet, so the host's table always lists the
    /// full live alphabet. Existing bindings are untouched.
    pub fn sync_symbols(&mut self, system: &LSystem) {
        let mut add = |sym: Symbol| {
            self.map.entry(sym).or_default();
        };

        for &sym in system.seed() {
            add(sym);
        }
        for rule in system.rules() {
            add(rule.target);
            for &sym in &rule.replacement {
                add(sym);
            }
        }
    }

    /// Removes bindings for symbols that no longer appear anywhere in
    /// `system` (per [`LSystem::char_used`]).
    pub fn prune_unused(&mut self, system: &LSystem) {
        self.map.retain(|&sym, _| system.char_used(sym));
    }

    /// Runs the turtle over `symbols` and returns the resulting [`Drawing`].
    ///
    /// Walks every symbol in order, dispatching each to its bound
    /// [`TurtleInstruction`]. The turtle starts at the configured origin
    /// facing up. Unbound symbols are silently ignored.
    ///
    /// # Pose stack
    ///
    /// Push saves the full pose (position + heading), pop restores it. Both
    /// tolerate unbalanced input: a push past `max_stack_depth` is dropped
    /// and a pop on an empty stack does nothing. The stack lives and dies
    /// with this one run.
    pub fn draw(&self, symbols: &[Symbol]) -> Drawing {
        let mut drawing = Drawing::new();
        let mut pose = TurtlePose::at(self.config.origin);
        let mut stack: Vec<TurtlePose> = Vec::new();

        for &sym in symbols {
            match self.instruction_for(sym) {
                TurtleInstruction::MoveForward => {
                    let from = pose.advance(self.config.step);
                    drawing.add_line(from, pose.position);
                }
                TurtleInstruction::TurnLeft => pose.turn(self.config.angle_delta),
                TurtleInstruction::TurnRight => pose.turn(-self.config.angle_delta),
                TurtleInstruction::PushPose => {
                    if stack.len() < self.config.max_stack_depth {
                        stack.push(pose);
                    }
                }
                TurtleInstruction::PopPose => {
                    if let Some(saved) = stack.pop() {
                        pose = saved;
                    }
                }
                TurtleInstruction::DrawMarker => {
                    drawing.add_rect(pose.position, MARKER_SCALE * self.config.step);
                }
                TurtleInstruction::Nop => {}
            }
        }

        drawing
    }
}
