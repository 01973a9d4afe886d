//! Frame-stepped capture and classification of raw input readings.

use tracing::trace;

use super::analog::{Analog, AnalogState};
use super::buffer::Buffer;
use super::button::Button;
use super::direction::Direction;
use super::snapshot::Snapshot;
use super::source::{self, Source};
use crate::math::Vec2;
use crate::tuning::InputTuning;

/// Read-only view of the classified input history.
pub trait InputStream {
    /// The nth-newest snapshot; offset 0 is the current frame.
    ///
    /// # Panics
    /// Panics if `offset` is past the buffer capacity.
    fn at(&self, offset: usize) -> Snapshot;

    fn current(&self) -> Snapshot {
        self.at(0)
    }
}

/// Owns a [`Source`] and advances it one classified frame at a time.
pub struct Stream<S: Source> {
    source: S,
    buffer: Buffer,
    tuning: InputTuning,
}

impl<S: Source> Stream<S> {
    pub fn new(source: S, tuning: InputTuning) -> Stream<S> {
        let mut buffer = Buffer::new(tuning.buffer_frames);
        buffer.add(Snapshot::default());

        Stream {
            source,
            buffer,
            tuning,
        }
    }

    /// Pull one reading per tracked axis/button, classify it, and push a new
    /// snapshot. `time` must increase monotonically between calls; a repeated
    /// timestamp degrades the stick classification to `Unknown`.
    pub fn advance(&mut self, time: f32) {
        let snapshot = self.capture(time);
        self.buffer.add(snapshot);
    }

    fn capture(&self, time: f32) -> Snapshot {
        Snapshot {
            stick: self.capture_stick(time),
            jump_a: self.capture_button(source::JUMP_A),
            jump_b: self.capture_button(source::JUMP_B),
            shield_l: self.capture_button(source::SHIELD_L),
            shield_r: self.capture_button(source::SHIELD_R),
            time,
        }
    }

    fn capture_stick(&self, time: f32) -> Analog {
        let prev = self.current();
        let prev_stick = prev.stick;

        let raw = Vec2::new(self.source.axis(source::MOVE_X), self.source.axis(source::MOVE_Y));

        // filter the raw position
        let mut pos = raw;
        if pos.mag() <= self.tuning.dead_zone {
            pos = Vec2::ZERO;
        }

        let direction = Direction::from_position(pos);

        // instantaneous stick speed since the last sample
        let dt = time - prev.time;
        let speed = if dt > 0.0 {
            ((raw - prev_stick.raw_position).mag() / dt).abs()
        } else {
            f32::NAN
        };

        // magnitude along the primary direction
        let mag = if direction.is_horizontal() {
            pos.x.abs()
        } else {
            pos.y.abs()
        };

        let state = classify_stick(
            prev_stick.state,
            prev_stick.direction,
            direction,
            speed,
            mag,
            &self.tuning,
        );

        if state != prev_stick.state {
            trace!(
                "stick state switch: {:?} => {:?} (speed: {}, mag: {})",
                prev_stick.state,
                state,
                speed,
                mag
            );
        }

        Analog::new(state, direction, pos, raw)
    }

    fn capture_button(&self, name: &str) -> Button {
        Button::from_polls(
            self.source.button_down(name),
            self.source.button_up(name),
            self.source.button_held(name),
        )
    }
}

impl<S: Source> InputStream for Stream<S> {
    fn at(&self, offset: usize) -> Snapshot {
        self.buffer.get(offset)
    }
}

/// Stick state transition table.
///
/// A non-finite speed means the frame timing was degenerate (zero elapsed
/// time); rather than letting NaN leak into the comparisons below, the
/// reading is classified `Unknown` outright.
fn classify_stick(
    prev_state: AnalogState,
    prev_direction: Direction,
    direction: Direction,
    speed: f32,
    mag: f32,
    tuning: &InputTuning,
) -> AnalogState {
    use AnalogState::*;

    if !speed.is_finite() {
        return Unknown;
    }

    // the stick is neutral
    if direction.is_neutral() {
        if prev_state == Idle || speed < tuning.idle_speed {
            Idle
        } else {
            Unknown
        }
    }
    // still moving in the previous direction
    else if direction == prev_direction {
        if matches!(prev_state, Active | Switch | SwitchTap) {
            Active
        } else if speed >= tuning.tap_speed && mag == 1.0 {
            SwitchTap
        } else if speed < tuning.tap_speed {
            Switch
        } else {
            Unknown
        }
    }
    // the direction switched this frame
    else if speed >= tuning.tap_speed && mag == 1.0 {
        SwitchTap
    } else if speed >= tuning.tap_speed {
        Unknown
    } else {
        Switch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::button::ButtonState;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};

    /// A scriptable source for driving the stream in tests.
    #[derive(Default)]
    struct FakeSource {
        axes: RefCell<HashMap<&'static str, f32>>,
        down: RefCell<HashSet<&'static str>>,
        up: RefCell<HashSet<&'static str>>,
        held: RefCell<HashSet<&'static str>>,
    }

    impl FakeSource {
        fn set_stick(&self, x: f32, y: f32) {
            let mut axes = self.axes.borrow_mut();
            axes.insert(source::MOVE_X, x);
            axes.insert(source::MOVE_Y, y);
        }

        fn press(&self, name: &'static str) {
            self.down.borrow_mut().insert(name);
            self.held.borrow_mut().insert(name);
        }

        fn settle(&self) {
            self.down.borrow_mut().clear();
            self.up.borrow_mut().clear();
        }
    }

    impl Source for FakeSource {
        fn axis(&self, name: &str) -> f32 {
            self.axes.borrow().get(name).copied().unwrap_or(0.0)
        }

        fn button_down(&self, name: &str) -> bool {
            self.down.borrow().contains(name)
        }

        fn button_up(&self, name: &str) -> bool {
            self.up.borrow().contains(name)
        }

        fn button_held(&self, name: &str) -> bool {
            self.held.borrow().contains(name)
        }
    }

    fn make_stream() -> Stream<FakeSource> {
        Stream::new(FakeSource::default(), InputTuning::default())
    }

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_dead_zone_filters_position_and_keeps_raw() {
        let mut stream = make_stream();
        stream.source.set_stick(0.05, 0.05);

        stream.advance(DT);

        let stick = stream.current().stick;
        assert_eq!(stick.position, Vec2::ZERO);
        assert_eq!(stick.raw_position, Vec2::new(0.05, 0.05));
        assert_eq!(stick.direction, Direction::NEUTRAL);
    }

    #[test]
    fn test_tap_on_fast_full_deflection() {
        let mut stream = make_stream();
        stream.source.set_stick(-1.0, 0.0);

        // 0 -> -1.0 in one 60fps frame is 60 units/s, well past the threshold
        stream.advance(DT);

        let stick = stream.current().stick;
        assert_eq!(stick.state, AnalogState::SwitchTap);
        assert_eq!(stick.direction, Direction::LEFT);
    }

    #[test]
    fn test_slow_deflection_is_a_switch() {
        let mut stream = make_stream();
        stream.source.set_stick(-0.3, 0.0);

        // 0.3 units over half a second is far below the tap speed
        stream.advance(0.5);

        assert_eq!(stream.current().stick.state, AnalogState::Switch);
    }

    #[test]
    fn test_held_direction_stays_active() {
        let mut stream = make_stream();
        stream.source.set_stick(-1.0, 0.0);
        stream.advance(DT);

        stream.advance(DT * 2.0);
        assert_eq!(stream.current().stick.state, AnalogState::Active);

        // idempotent from then on
        stream.advance(DT * 3.0);
        assert_eq!(stream.current().stick.state, AnalogState::Active);
    }

    #[test]
    fn test_slow_return_to_neutral_is_idle() {
        let mut stream = make_stream();
        stream.source.set_stick(-0.3, 0.0);
        stream.advance(0.5);
        assert_eq!(stream.current().stick.state, AnalogState::Switch);

        // 0.3 units over 4 seconds is below the idle speed: absorbed to Idle
        stream.source.set_stick(0.0, 0.0);
        stream.advance(4.5);

        assert_eq!(stream.current().stick.state, AnalogState::Idle);
    }

    #[test]
    fn test_fast_return_to_neutral_is_unknown() {
        let mut stream = make_stream();
        stream.source.set_stick(-1.0, 0.0);
        stream.advance(DT);

        stream.source.set_stick(0.0, 0.0);
        stream.advance(DT * 2.0);

        assert_eq!(stream.current().stick.state, AnalogState::Unknown);
    }

    #[test]
    fn test_zero_elapsed_time_classifies_unknown() {
        let mut stream = make_stream();
        stream.source.set_stick(-1.0, 0.0);
        stream.advance(DT);

        // repeated timestamp: no NaN may leak into the state machine
        stream.source.set_stick(-0.5, 0.0);
        stream.advance(DT);

        assert_eq!(stream.current().stick.state, AnalogState::Unknown);
    }

    #[test]
    fn test_button_press_hold_release_cycle() {
        let mut stream = make_stream();

        stream.source.press(source::JUMP_A);
        stream.advance(DT);
        assert_eq!(stream.current().jump_a.state, ButtonState::Down);

        stream.source.settle();
        stream.advance(DT * 2.0);
        assert_eq!(stream.current().jump_a.state, ButtonState::Active);

        stream.source.held.borrow_mut().clear();
        stream.source.up.borrow_mut().insert(source::JUMP_A);
        stream.advance(DT * 3.0);
        assert_eq!(stream.current().jump_a.state, ButtonState::Up);

        stream.source.settle();
        stream.advance(DT * 4.0);
        assert_eq!(stream.current().jump_a.state, ButtonState::Inactive);
    }

    #[test]
    fn test_buffered_reads_see_history() {
        let mut stream = make_stream();

        stream.source.press(source::SHIELD_L);
        stream.advance(DT);
        stream.source.settle();
        stream.advance(DT * 2.0);

        assert_eq!(stream.at(1).shield_l.state, ButtonState::Down);
        assert_eq!(stream.at(0).shield_l.state, ButtonState::Active);
    }

    proptest! {
        #[test]
        fn prop_dead_zone_positions_filter_to_zero(
            r in 0.0f32..0.099,
            theta in 0.0f32..std::f32::consts::TAU,
        ) {
            let (x, y) = (r * theta.cos(), r * theta.sin());

            let mut stream = make_stream();
            stream.source.set_stick(x, y);
            stream.advance(DT);

            let stick = stream.current().stick;
            prop_assert_eq!(stick.position, Vec2::ZERO);
            prop_assert_eq!(stick.raw_position, Vec2::new(x, y));
        }

        #[test]
        fn prop_direction_follows_dominant_axis(
            x in -1.0f32..1.0,
            y in -1.0f32..1.0,
        ) {
            prop_assume!(Vec2::new(x, y).mag() > InputTuning::default().dead_zone);

            let direction = Direction::from_position(Vec2::new(x, y));
            if x.abs() > y.abs() {
                prop_assert!(direction.is_horizontal());
                prop_assert_eq!(direction.is_right(), x > 0.0);
            } else {
                prop_assert!(direction.is_vertical());
                prop_assert_eq!(direction == Direction::UP, y > 0.0);
            }
        }

        #[test]
        fn prop_neutral_slow_stick_absorbs_to_idle(
            prev_state in prop::sample::select(vec![
                AnalogState::Idle,
                AnalogState::Switch,
                AnalogState::SwitchTap,
                AnalogState::Active,
                AnalogState::Unknown,
            ]),
            speed in 0.0f32..0.099,
        ) {
            let tuning = InputTuning::default();
            let state = classify_stick(
                prev_state,
                Direction::LEFT,
                Direction::NEUTRAL,
                speed,
                0.0,
                &tuning,
            );
            prop_assert_eq!(state, AnalogState::Idle);
        }
    }
}
