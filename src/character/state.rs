//! Character state variants.
//!
//! A closed sum type: every dispatch site matches exhaustively, so adding a
//! state forces every handler to take a position on it. Each variant carries
//! its own frame counter, incremented once per simulation tick; the
//! per-variant payloads (`direction`, `is_short`, `is_falling`,
//! `is_on_ground`) live only as long as the variant is active.

use crate::input::Direction;
use crate::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CharacterState {
    Idle {
        frame: u32,
    },
    Walk {
        frame: u32,
    },
    Dash {
        frame: u32,
        direction: Direction,
    },
    Run {
        frame: u32,
        direction: Direction,
    },
    Pivot {
        frame: u32,
        direction: Direction,
    },
    Skid {
        frame: u32,
    },
    JumpWait {
        frame: u32,
        /// Set when the jump button is released before takeoff.
        is_short: bool,
    },
    Airborne {
        frame: u32,
        /// Set once vertical velocity turns downward; gates fast-fall and landing.
        is_falling: bool,
    },
    AirDodge {
        frame: u32,
        /// Normalized dodge direction, fixed at entry.
        direction: Vec2,
        /// True for the grounded (wavedash) variant.
        is_on_ground: bool,
    },
    WaveLand {
        frame: u32,
    },
}

impl CharacterState {
    /// Ticks the frame counter, whatever the variant.
    pub fn advance_frame(&mut self) {
        *self.frame_mut() += 1;
    }

    #[cfg(test)]
    pub(crate) fn set_frame(&mut self, frame: u32) {
        *self.frame_mut() = frame;
    }

    fn frame_mut(&mut self) -> &mut u32 {
        use CharacterState::*;
        match self {
            Idle { frame }
            | Walk { frame }
            | Dash { frame, .. }
            | Run { frame, .. }
            | Pivot { frame, .. }
            | Skid { frame }
            | JumpWait { frame, .. }
            | Airborne { frame, .. }
            | AirDodge { frame, .. }
            | WaveLand { frame } => frame,
        }
    }

    pub fn frame(&self) -> u32 {
        use CharacterState::*;
        match self {
            Idle { frame }
            | Walk { frame }
            | Dash { frame, .. }
            | Run { frame, .. }
            | Pivot { frame, .. }
            | Skid { frame }
            | JumpWait { frame, .. }
            | Airborne { frame, .. }
            | AirDodge { frame, .. }
            | WaveLand { frame } => *frame,
        }
    }

    /// Variant tag, for logging and tag-equality checks.
    pub fn name(&self) -> &'static str {
        use CharacterState::*;
        match self {
            Idle { .. } => "Idle",
            Walk { .. } => "Walk",
            Dash { .. } => "Dash",
            Run { .. } => "Run",
            Pivot { .. } => "Pivot",
            Skid { .. } => "Skid",
            JumpWait { .. } => "JumpWait",
            Airborne { .. } => "Airborne",
            AirDodge { .. } => "AirDodge",
            WaveLand { .. } => "WaveLand",
        }
    }

    /// Same variant, ignoring frame counters and payloads.
    pub fn same_variant(&self, other: &CharacterState) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_frame_on_every_variant() {
        let mut states = [
            CharacterState::Idle { frame: 0 },
            CharacterState::Dash {
                frame: 3,
                direction: Direction::LEFT,
            },
            CharacterState::AirDodge {
                frame: 7,
                direction: Vec2::new(-1.0, 0.0),
                is_on_ground: false,
            },
        ];

        for state in &mut states {
            let before = state.frame();
            state.advance_frame();
            assert_eq!(state.frame(), before + 1);
        }
    }

    #[test]
    fn test_same_variant_ignores_payload() {
        let a = CharacterState::Dash {
            frame: 0,
            direction: Direction::LEFT,
        };
        let b = CharacterState::Dash {
            frame: 12,
            direction: Direction::RIGHT,
        };
        assert!(a.same_variant(&b));
        assert!(!a.same_variant(&CharacterState::Skid { frame: 0 }));
    }
}
