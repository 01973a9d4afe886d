//! Stick direction as a small bitmask.
//!
//! Single directions are one bit each so that groupings like
//! [`Direction::HORIZONTAL`] can be expressed as unions and tested with
//! [`Direction::intersects`].

use crate::math::Vec2;
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction(u8);

impl Direction {
    pub const NEUTRAL: Direction = Direction(1 << 0);
    pub const UP: Direction = Direction(1 << 1);
    pub const DOWN: Direction = Direction(1 << 2);
    pub const LEFT: Direction = Direction(1 << 3);
    pub const RIGHT: Direction = Direction(1 << 4);

    pub const VERTICAL: Direction = Direction(Self::UP.0 | Self::DOWN.0);
    pub const HORIZONTAL: Direction = Direction(Self::LEFT.0 | Self::RIGHT.0);

    /// Primary direction of a (dead-zone filtered) stick position.
    ///
    /// The axis with the larger absolute magnitude wins by sign. The
    /// comparison is strict, so an exact tie (`|x| == |y|`) resolves to the
    /// vertical axis.
    pub fn from_position(pos: Vec2) -> Direction {
        if pos.x == 0.0 && pos.y == 0.0 {
            Direction::NEUTRAL
        } else if pos.x.abs() > pos.y.abs() {
            if pos.x > 0.0 {
                Direction::RIGHT
            } else {
                Direction::LEFT
            }
        } else if pos.y > 0.0 {
            Direction::UP
        } else {
            Direction::DOWN
        }
    }

    /// The opposite single direction; groupings and neutral map to themselves.
    pub fn invert(self) -> Direction {
        match self {
            Direction::UP => Direction::DOWN,
            Direction::DOWN => Direction::UP,
            Direction::LEFT => Direction::RIGHT,
            Direction::RIGHT => Direction::LEFT,
            other => other,
        }
    }

    /// True if this direction shares any bit with `other`.
    pub fn intersects(self, other: Direction) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_neutral(self) -> bool {
        self == Direction::NEUTRAL
    }

    pub fn is_left(self) -> bool {
        self == Direction::LEFT
    }

    pub fn is_right(self) -> bool {
        self == Direction::RIGHT
    }

    pub fn is_horizontal(self) -> bool {
        self.intersects(Direction::HORIZONTAL)
    }

    pub fn is_vertical(self) -> bool {
        self.intersects(Direction::VERTICAL)
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::NEUTRAL
    }
}

impl fmt::Debug for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Direction::NEUTRAL => "Neutral",
            Direction::UP => "Up",
            Direction::DOWN => "Down",
            Direction::LEFT => "Left",
            Direction::RIGHT => "Right",
            Direction::VERTICAL => "Vertical",
            Direction::HORIZONTAL => "Horizontal",
            Direction(bits) => return write!(f, "Direction({bits:#b})"),
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_position_is_neutral() {
        assert_eq!(Direction::from_position(Vec2::ZERO), Direction::NEUTRAL);
    }

    #[test]
    fn test_dominant_axis_wins() {
        assert_eq!(Direction::from_position(Vec2::new(0.8, 0.2)), Direction::RIGHT);
        assert_eq!(Direction::from_position(Vec2::new(-0.8, 0.2)), Direction::LEFT);
        assert_eq!(Direction::from_position(Vec2::new(0.1, 0.9)), Direction::UP);
        assert_eq!(Direction::from_position(Vec2::new(0.1, -0.9)), Direction::DOWN);
    }

    #[test]
    fn test_exact_tie_resolves_vertical() {
        // strict |x| > |y| comparison: a perfect diagonal is vertical
        assert_eq!(Direction::from_position(Vec2::new(0.5, 0.5)), Direction::UP);
        assert_eq!(Direction::from_position(Vec2::new(-0.5, -0.5)), Direction::DOWN);
        assert_eq!(Direction::from_position(Vec2::new(1.0, -1.0)), Direction::DOWN);
    }

    #[test]
    fn test_invert() {
        assert_eq!(Direction::LEFT.invert(), Direction::RIGHT);
        assert_eq!(Direction::UP.invert(), Direction::DOWN);
        assert_eq!(Direction::NEUTRAL.invert(), Direction::NEUTRAL);
        assert_eq!(Direction::HORIZONTAL.invert(), Direction::HORIZONTAL);
    }

    #[test]
    fn test_groupings_intersect() {
        assert!(Direction::LEFT.intersects(Direction::HORIZONTAL));
        assert!(Direction::RIGHT.intersects(Direction::HORIZONTAL));
        assert!(!Direction::UP.intersects(Direction::HORIZONTAL));
        assert!(Direction::DOWN.intersects(Direction::VERTICAL));
        assert!(!Direction::NEUTRAL.intersects(Direction::HORIZONTAL));
    }
}
