//! An immutable bundle of one fully-classified input frame.

use super::analog::Analog;
use super::button::Button;

/// Everything the character reads for one frame. The only way to produce a
/// new one is through [`super::stream::Stream::advance`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Snapshot {
    pub stick: Analog,
    pub jump_a: Button,
    pub jump_b: Button,
    pub shield_l: Button,
    pub shield_r: Button,
    pub time: f32,
}
