//! Abstract already-polled input device.
//!
//! The engine-integration layer owns the actual device backends; the core
//! only ever sees this capability set, polled once per stream advance. The
//! source is assumed total: every tracked name yields a reading.

/// Control names tracked by the stream.
pub const MOVE_X: &str = "move_x";
pub const MOVE_Y: &str = "move_y";
pub const JUMP_A: &str = "jump_a";
pub const JUMP_B: &str = "jump_b";
pub const SHIELD_L: &str = "shield_l";
pub const SHIELD_R: &str = "shield_r";

pub trait Source {
    /// Current reading of a named analog axis, in [-1.0, 1.0].
    fn axis(&self, name: &str) -> f32;

    /// True if the named button was pressed this frame.
    fn button_down(&self, name: &str) -> bool;

    /// True if the named button was released this frame.
    fn button_up(&self, name: &str) -> bool;

    /// True while the named button is held.
    fn button_held(&self, name: &str) -> bool;
}
