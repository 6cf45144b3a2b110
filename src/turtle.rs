//! Turtle state and the instruction vocabulary.

use crate::symbol::Symbol;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f32::consts::TAU;

/// Heading the turtle starts every run with, in turns.
///
/// 0.75 turns points "up" under the screen convention of
/// [`TurtlePose::heading_vector`] (y grows downward), so default drawings
/// grow toward the top of the canvas instead of sideways.
pub const INITIAL_HEADING: f32 = 0.75;

/// The state of the drawing turtle: where it is and which way it faces.
///
/// Heading is measured in turns (one full rotation = 1.0) rather than
/// radians or degrees, matching how hosts expose the angle-delta control.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtlePose {
    /// Current position on the canvas.
    pub position: Vec2,

    /// Current facing, in turns.
    pub heading: f32,
}

impl TurtlePose {
    /// A pose at `origin` with the default upward heading.
    pub fn at(origin: Vec2) -> Self {
        TurtlePose {
            position: origin,
            heading: INITIAL_HEADING,
        }
    }

    /// Unit direction of the current heading in screen space (x right,
    /// y down).
    pub fn heading_vector(&self) -> Vec2 {
        Vec2::new(-(TAU * self.heading).cos(), (TAU * self.heading).sin())
    }

    /// Rotates counter-clockwise by `turns` (negative = clockwise).
    pub fn turn(&mut self, turns: f32) {
        self.heading += turns;
    }

    /// Moves `distance` along the current heading, returning the previous
    /// position so callers can emit the traversed segment.
    pub fn advance(&mut self, distance: f32) -> Vec2 {
        let from = self.position;
        self.position += self.heading_vector() * distance;
        from
    }
}

/// What the turtle does when it reads a symbol.
///
/// A closed vocabulary: hosts bind symbols to these via the [`TurtleMap`],
/// and anything unbound behaves as [`Nop`](Self::Nop).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurtleInstruction {
    /// Symbol carries no drawing meaning.
    #[default]
    Nop,
    /// Advance one step, drawing a line segment.
    MoveForward,
    /// Rotate counter-clockwise by the configured angle delta.
    TurnLeft,
    /// Rotate clockwise by the configured angle delta.
    TurnRight,
    /// Save the current pose onto the stack.
    PushPose,
    /// Restore the most recently saved pose.
    PopPose,
    /// Stamp a filled square marker at the current position.
    DrawMarker,
}

impl TurtleInstruction {
    /// Every instruction, in a stable order for host selection UIs.
    pub const ALL: [TurtleInstruction; 7] = [
        TurtleInstruction::Nop,
        TurtleInstruction::MoveForward,
        TurtleInstruction::TurnLeft,
        TurtleInstruction::TurnRight,
        TurtleInstruction::PushPose,
        TurtleInstruction::PopPose,
        TurtleInstruction::DrawMarker,
    ];

    /// Human-readable name for host UIs.
    pub fn label(self) -> &'static str {
        match self {
            TurtleInstruction::Nop => "none",
            TurtleInstruction::MoveForward => "move forward",
            TurtleInstruction::TurnLeft => "turn left",
            TurtleInstruction::TurnRight => "turn right",
            TurtleInstruction::PushPose => "push pose",
            TurtleInstruction::PopPose => "pop pose",
            TurtleInstruction::DrawMarker => "draw marker",
        }
    }
}

/// Host-editable binding from symbols to turtle instructions.
///
/// Ordered so host UIs list entries stably.
pub type TurtleMap = BTreeMap<Symbol, TurtleInstruction>;
