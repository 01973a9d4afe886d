//! Character state machine and per-frame physics accumulation.
//!
//! The embedding engine drives a character in a fixed order each frame:
//! [`Character::pre_update`] with the body's current velocity, then
//! [`Character::update`] with the classified input stream, then its own
//! physics step, then [`Character::post_simulation`] with the post-physics
//! velocity. Ground contact arrives out of band through
//! [`Character::on_collide`], at most once per frame after `update`.
//!
//! `force` is transient: zeroed at the start of every cycle and summed by
//! whichever handlers fire, it is an impulse for the external integrator to
//! apply once, not a persistent quantity.

mod state;
mod wavedash;

pub use state::CharacterState;
pub use wavedash::{WaveDash, WaveDashAction};

use tracing::debug;

use crate::input::{Analog, Direction, GestureState, InputStream};
use crate::math::Vec2;
use crate::tuning::{CharacterTuning, InputTuning};

pub struct Character {
    velocity: Vec2,
    force: Vec2,
    gravity_scale: f32,
    facing_left: bool,
    state: CharacterState,
    /// Monotonic simulation frame counter, shared with the chord recognizer.
    frame: u32,
    wavedash: WaveDash,
    tuning: CharacterTuning,
    input_tuning: InputTuning,
}

impl Character {
    pub fn new(tuning: CharacterTuning, input_tuning: InputTuning, is_on_ground: bool) -> Character {
        let state = if is_on_ground {
            CharacterState::Idle { frame: 0 }
        } else {
            CharacterState::Airborne {
                frame: 0,
                is_falling: true,
            }
        };

        Character {
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            gravity_scale: tuning.gravity_on,
            facing_left: false,
            state,
            frame: 0,
            wavedash: WaveDash::new(tuning.wave_dash_window_frames),
            tuning,
            input_tuning,
        }
    }

    // -- reads --
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Impulse accumulated this frame, for the external integrator.
    pub fn force(&self) -> Vec2 {
        self.force
    }

    pub fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    pub fn facing_left(&self) -> bool {
        self.facing_left
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    // -- frame driver events --
    /// Start a simulation frame: tick counters and sync the body velocity.
    pub fn pre_update(&mut self, velocity: Vec2) {
        self.state.advance_frame();
        self.frame += 1;
        self.force = Vec2::ZERO;
        self.velocity = velocity;
    }

    /// Dispatch the current input frame to the active state's handler.
    pub fn update(&mut self, inputs: &dyn InputStream) {
        // downward motion always counts as falling, whatever else this
        // frame's handler decides
        if let CharacterState::Airborne { .. } = self.state {
            if self.velocity.y <= 0.0 {
                self.fall();
            }
        }

        match self.state {
            CharacterState::Idle { .. } => self.on_idle(inputs),
            CharacterState::Walk { .. } => self.on_walk(inputs),
            CharacterState::Dash { frame, direction } => self.on_dash(frame, direction, inputs),
            CharacterState::Run { direction, .. } => self.on_run(direction, inputs),
            CharacterState::Pivot { frame, direction } => self.on_pivot(frame, direction, inputs),
            CharacterState::Skid { .. } => self.on_skid(inputs),
            CharacterState::JumpWait { frame, .. } => self.on_jump_wait(frame, inputs),
            CharacterState::Airborne { is_falling, .. } => self.on_airborne(is_falling, inputs),
            CharacterState::AirDodge { direction, .. } => self.on_air_dodge(direction),
            CharacterState::WaveLand { .. } => self.on_wave_land(inputs),
        }
    }

    /// Re-sync after the external physics step and apply speed clamps.
    pub fn post_simulation(&mut self, velocity: Vec2) {
        self.force = Vec2::ZERO;
        self.velocity = velocity;

        match self.state {
            CharacterState::Dash { .. } => self.limit_ground_speed(),
            CharacterState::Airborne { .. } => self.limit_air_speed(),
            CharacterState::AirDodge { frame, direction, .. } => {
                self.on_air_dodge_late(frame, direction)
            },
            _ => {},
        }
    }

    /// Ground contact reported by the collision layer.
    pub fn on_collide(&mut self) {
        match self.state {
            CharacterState::Airborne { is_falling: true, .. } => self.land(),
            CharacterState::AirDodge { .. } => {
                self.end_air_dodge();
                self.wave_land();
            },
            _ => {},
        }
    }

    // -- events/neutral --
    fn on_idle(&mut self, inputs: &dyn InputStream) {
        let stick = inputs.current().stick;

        if self.try_jump_inputs(inputs) {
            return;
        }

        if self.did_tap(stick, Direction::HORIZONTAL) {
            self.dash(stick.direction, stick.position.x);
        } else if stick.position.x != 0.0 {
            self.walk(stick.direction, stick.position.x);
        }
    }

    // -- events/move --
    fn on_walk(&mut self, inputs: &dyn InputStream) {
        let stick = inputs.current().stick;

        if self.try_jump_inputs(inputs) {
            return;
        }

        if self.did_tap(stick, Direction::HORIZONTAL) {
            self.dash(stick.direction, stick.position.x);
        } else if stick.position.x != 0.0 {
            self.walk(stick.direction, stick.position.x);
        } else {
            self.idle();
        }
    }

    fn on_dash(&mut self, frame: u32, direction: Direction, inputs: &dyn InputStream) {
        let stick = inputs.current().stick;

        if self.try_jump_inputs(inputs) {
            return;
        }

        if self.did_tap(stick, direction.invert()) {
            // dash back, restarting the dash
            self.dash(stick.direction, stick.position.x);
        } else if frame < self.tuning.dash_frames {
            self.dash(direction, stick.position.x);
        } else if stick.direction == direction {
            self.run(direction);
        } else {
            self.skid();
        }
    }

    fn on_run(&mut self, direction: Direction, inputs: &dyn InputStream) {
        let stick = inputs.current().stick;

        if self.try_jump_inputs(inputs) {
            return;
        }

        if stick.direction == direction {
            self.run(direction);
        } else if stick.direction == direction.invert() {
            self.pivot(stick.direction);
        } else {
            self.skid();
        }
    }

    fn on_pivot(&mut self, frame: u32, direction: Direction, inputs: &dyn InputStream) {
        let stick = inputs.current().stick;

        if self.try_jump_inputs(inputs) {
            return;
        }

        if frame < self.tuning.run_pivot_frames {
            // wait out the pivot
        } else if stick.direction == direction {
            self.run(direction);
        } else {
            self.idle();
        }
    }

    fn on_skid(&mut self, inputs: &dyn InputStream) {
        let stick = inputs.current().stick;

        if self.try_jump_inputs(inputs) {
            return;
        }

        if self.did_tap(stick, Direction::HORIZONTAL) {
            self.dash(stick.direction, stick.position.x);
        } else if stick.position.x != 0.0 {
            self.walk(stick.direction, stick.position.x);
        } else {
            self.idle();
        }
    }

    // -- events/jump --
    fn on_jump_wait(&mut self, frame: u32, inputs: &dyn InputStream) {
        let input = inputs.current();

        // releasing the button before takeoff shortens the jump
        if !input.jump_a.is_active() {
            if let CharacterState::JumpWait { is_short, .. } = &mut self.state {
                *is_short = true;
            }
        }

        if frame >= self.tuning.jump_wait_frames {
            self.takeoff();
        } else if input.shield_l.is_down() || input.shield_r.is_down() {
            // shield during the wait cancels the jump into a wavedash
            self.wave_dash(input.stick.position.normalize());
        }
    }

    fn on_airborne(&mut self, is_falling: bool, inputs: &dyn InputStream) {
        let input = inputs.current();
        let stick = input.stick;

        self.drift(stick.position.x);

        if is_falling && self.did_tap(stick, Direction::DOWN) {
            self.fast_fall();
        }

        if input.shield_l.is_down() || input.shield_r.is_down() {
            self.start_air_dodge(stick.position.normalize(), false);
        }
    }

    fn on_air_dodge(&mut self, direction: Vec2) {
        // decay the dodge impulse each frame
        self.force += -direction * self.tuning.air_dodge_decay;
    }

    fn on_air_dodge_late(&mut self, frame: u32, direction: Vec2) {
        let min_frames = (self.tuning.air_dodge / self.tuning.air_dodge_decay).ceil() as u32;
        if frame < min_frames {
            return;
        }

        // coarse check: has the decay pushed the body back against the
        // dodge direction?
        let is_opposed =
            sign(self.velocity.x) == -sign(direction.x) && sign(self.velocity.y) == -sign(direction.y);

        if is_opposed {
            self.end_air_dodge();
            self.velocity = Vec2::ZERO;
            self.fall();
        }
    }

    fn on_wave_land(&mut self, inputs: &dyn InputStream) {
        let input = inputs.current();

        if input.jump_a.is_down() {
            self.full_jump();
        } else if input.jump_b.is_down() {
            self.short_jump();
        } else if self.velocity.x == 0.0 {
            self.idle();
        }
    }

    // -- events/commands --
    /// Feed the chord recognizer and fire whichever jump command it settles
    /// on. Returns true if a command consumed this frame's input.
    fn try_jump_inputs(&mut self, inputs: &dyn InputStream) -> bool {
        self.wavedash.on_update(inputs, self.frame);

        let action = self.wavedash.action();
        if action == WaveDashAction::None {
            // a failed chord with no jump in it (lone shield press) leaves
            // the recognizer settled; re-arm it for the next press
            if self.wavedash.state() == GestureState::Failed {
                self.wavedash.reset();
            }
            return false;
        }

        self.wavedash.reset();

        match action {
            WaveDashAction::WaveDash => {
                let stick = inputs.current().stick;
                self.wave_dash(stick.position.normalize());
            },
            WaveDashAction::JumpA => self.full_jump(),
            WaveDashAction::JumpB => self.short_jump(),
            WaveDashAction::None => unreachable!(),
        }

        true
    }

    fn did_tap(&self, stick: Analog, direction: Direction) -> bool {
        if !stick.did_tap() || !stick.direction.intersects(direction) {
            return false;
        }

        // a tap only counts as a hard switch at high deflection
        let mag = if direction.is_horizontal() {
            stick.position.x.abs()
        } else {
            stick.position.y.abs()
        };

        mag >= self.input_tuning.hard_switch_mag
    }

    // -- commands --
    fn idle(&mut self) {
        self.switch_state(CharacterState::Idle { frame: 0 });
    }

    // -- commands/move --
    fn walk(&mut self, direction: Direction, x_move: f32) {
        if !matches!(self.state, CharacterState::Walk { .. }) {
            self.switch_state(CharacterState::Walk { frame: 0 });
        }

        self.velocity = Vec2::new(x_move * self.tuning.walk, 0.0);
        self.facing_left = direction.is_left();
    }

    fn dash(&mut self, direction: Direction, x_axis: f32) {
        // a new dash or a direction change restarts the state
        let is_same = matches!(self.state, CharacterState::Dash { direction: d, .. } if d == direction);
        if !is_same {
            self.switch_state(CharacterState::Dash { frame: 0, direction });
        }

        // the first dash frame gets the initial burst
        if matches!(self.state, CharacterState::Dash { frame: 0, .. }) {
            let burst = if direction.is_left() {
                -self.tuning.dash_initial
            } else {
                self.tuning.dash_initial
            };
            self.velocity = Vec2::new(burst, 0.0);
            self.facing_left = direction.is_left();
        }

        // per-frame dash force, scaled by how far the stick backs the dash
        let is_axis_aligned =
            x_axis < 0.0 && direction.is_left() || x_axis > 0.0 && direction.is_right();
        let scale = if is_axis_aligned { x_axis.abs() } else { 0.0 };
        let force = self.tuning.dash_base + self.tuning.dash_scale * scale;

        self.force.x += if direction.is_left() { -force } else { force };
    }

    fn limit_ground_speed(&mut self) {
        self.velocity.x = self.velocity.x.clamp(-self.tuning.run, self.tuning.run);
    }

    fn run(&mut self, direction: Direction) {
        if !matches!(self.state, CharacterState::Run { .. }) {
            self.switch_state(CharacterState::Run { frame: 0, direction });
        }

        let speed = if direction.is_left() {
            -self.tuning.run
        } else {
            self.tuning.run
        };
        self.velocity = Vec2::new(speed, 0.0);
    }

    fn pivot(&mut self, direction: Direction) {
        self.switch_state(CharacterState::Pivot { frame: 0, direction });
        self.facing_left = direction.is_left();
    }

    fn skid(&mut self) {
        self.switch_state(CharacterState::Skid { frame: 0 });
    }

    // -- commands/jump --
    fn full_jump(&mut self) {
        self.switch_state(CharacterState::JumpWait {
            frame: 0,
            is_short: false,
        });
    }

    fn short_jump(&mut self) {
        self.switch_state(CharacterState::JumpWait {
            frame: 0,
            is_short: true,
        });
    }

    fn takeoff(&mut self) {
        let is_short = matches!(self.state, CharacterState::JumpWait { is_short: true, .. });

        self.switch_state(CharacterState::Airborne {
            frame: 0,
            is_falling: false,
        });

        self.velocity.y = if is_short {
            self.tuning.jump_short
        } else {
            self.tuning.jump
        };
    }

    fn drift(&mut self, x_move: f32) {
        self.force.x += x_move * self.tuning.drift;
    }

    fn fall(&mut self) {
        if let CharacterState::Airborne { is_falling, .. } = &mut self.state {
            *is_falling = true;
        } else {
            self.switch_state(CharacterState::Airborne {
                frame: 0,
                is_falling: true,
            });
        }
    }

    fn fast_fall(&mut self) {
        self.velocity.y = -self.tuning.fast_fall;
    }

    fn land(&mut self) {
        self.idle();
    }

    fn limit_air_speed(&mut self) {
        self.velocity.x = self
            .velocity
            .x
            .clamp(-self.tuning.max_air_speed_x, self.tuning.max_air_speed_x);
    }

    // -- commands/air dodge --
    fn start_air_dodge(&mut self, direction: Vec2, is_on_ground: bool) {
        self.switch_state(CharacterState::AirDodge {
            frame: 0,
            direction,
            is_on_ground,
        });

        // gravity is off for the duration of the dodge
        self.gravity_scale = self.tuning.gravity_off;

        // cancel momentum and apply the dodge impulse
        self.velocity = Vec2::ZERO;
        self.force += direction * self.tuning.air_dodge;
    }

    fn end_air_dodge(&mut self) {
        self.gravity_scale = self.tuning.gravity_on;
    }

    /// A grounded air dodge: momentum redirects along the stick while the
    /// character stays on the ground.
    fn wave_dash(&mut self, direction: Vec2) {
        let grounded = Vec2::new(direction.x, 0.0);
        self.start_air_dodge(grounded, true);
    }

    fn wave_land(&mut self) {
        self.switch_state(CharacterState::WaveLand { frame: 0 });
    }

    fn switch_state(&mut self, state: CharacterState) {
        debug!("character state switch: {} => {}", self.state.name(), state.name());
        self.state = state;
    }
}

fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
