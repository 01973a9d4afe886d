//! Wavedash chord disambiguation.
//!
//! Distinguishes three outcomes from overlapping presses inside a short
//! frame window: a jump+shield chord (wavedash), or a plain jump on either
//! jump button once the window expires without a chord. A chord always wins
//! over the window-expiry fallback.

use crate::input::{GestureRecognizer, GestureState, InputStream};

/// The recognized command, once the state machine settles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WaveDashAction {
    #[default]
    None,
    WaveDash,
    JumpA,
    JumpB,
}

// sticky button bits
const JUMP_A: u8 = 1 << 0;
const JUMP_B: u8 = 1 << 1;
const SHIELD_L: u8 = 1 << 2;
const SHIELD_R: u8 = 1 << 3;

pub struct WaveDash {
    state: GestureState,
    action: WaveDashAction,
    buttons: u8,
    fail_on_frame: Option<u32>,
    window_frames: u32,
}

impl WaveDash {
    pub fn new(window_frames: u32) -> WaveDash {
        WaveDash {
            state: GestureState::Possible,
            action: WaveDashAction::None,
            buttons: 0,
            fail_on_frame: None,
            window_frames,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn action(&self) -> WaveDashAction {
        self.action
    }

    pub fn reset(&mut self) {
        self.state = GestureState::Possible;
        self.action = WaveDashAction::None;
        self.buttons = 0;
        self.fail_on_frame = None;
    }

    pub fn on_update(&mut self, inputs: &dyn InputStream, frame: u32) {
        // once an action is recognized, hold it until reset
        if self.action != WaveDashAction::None {
            return;
        }

        // accumulate newly-pressed buttons into the sticky mask
        let input = inputs.current();
        if input.jump_a.is_down() {
            self.buttons |= JUMP_A;
        }
        if input.jump_b.is_down() {
            self.buttons |= JUMP_B;
        }
        if input.shield_l.is_down() {
            self.buttons |= SHIELD_L;
        }
        if input.shield_r.is_down() {
            self.buttons |= SHIELD_R;
        }

        // advance the state machine
        if matches!(self.state, GestureState::Possible | GestureState::Pending) {
            // any two-button chord involving a jump button fires a wavedash
            let is_chord = (self.buttons & JUMP_A != 0 && self.buttons & !JUMP_A != 0)
                || (self.buttons & JUMP_B != 0 && self.buttons & !JUMP_B != 0);

            let next = if is_chord {
                GestureState::Satisfied
            } else if self.state == GestureState::Pending
                && self.fail_on_frame.is_some_and(|deadline| frame >= deadline)
            {
                GestureState::Failed
            } else if self.buttons != 0 {
                GestureState::Pending
            } else {
                GestureState::Possible
            };

            // arm the frame window on the transition into pending
            if next == GestureState::Pending && self.state != GestureState::Pending {
                self.fail_on_frame = Some(frame + self.window_frames);
            }

            self.state = next;
        }

        // resolve the action
        self.action = match self.state {
            GestureState::Satisfied => WaveDashAction::WaveDash,
            GestureState::Failed if self.buttons & JUMP_A != 0 => WaveDashAction::JumpA,
            GestureState::Failed if self.buttons & JUMP_B != 0 => WaveDashAction::JumpB,
            _ => self.action,
        };
    }
}

impl GestureRecognizer for WaveDash {
    fn reset(&mut self) {
        WaveDash::reset(self);
    }

    fn on_input(&mut self, inputs: &dyn InputStream, frame: u32) -> GestureState {
        self.on_update(inputs, frame);
        self.state
    }
}
