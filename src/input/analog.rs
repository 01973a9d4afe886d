//! One frame's classified analog stick reading.

use super::direction::Direction;
use crate::math::Vec2;

/// Classification of the stick's movement over time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalogState {
    /// Centered and at rest.
    #[default]
    Idle,
    /// Moving, but too slowly (or too shallowly) to be a tap.
    Switch,
    /// A fast move that reached full deflection this frame.
    SwitchTap,
    /// Holding a direction it already switched to.
    Active,
    /// Ambiguous movement, including degenerate frame timing.
    Unknown,
}

/// An immutable analog reading, produced fresh each frame by the stream.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Analog {
    pub state: AnalogState,
    pub direction: Direction,
    /// Dead-zone filtered position.
    pub position: Vec2,
    /// Unfiltered position, kept for speed calculation.
    pub raw_position: Vec2,
}

impl Analog {
    pub fn new(state: AnalogState, direction: Direction, position: Vec2, raw_position: Vec2) -> Analog {
        Analog {
            state,
            direction,
            position,
            raw_position,
        }
    }

    /// True if the stick snapped to full deflection this frame.
    pub fn did_tap(&self) -> bool {
        self.state == AnalogState::SwitchTap
    }
}
