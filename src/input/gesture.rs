//! Chainable gesture recognition with cross-gesture blocking.
//!
//! A [`GestureChain`] updates its gestures left to right, giving earlier
//! gestures priority: a gesture can only be *recognized* (satisfied and
//! unblocked) while no earlier gesture is pending, satisfied, or itself
//! blocked. A failed gesture stops blocking, which is what lets a lower
//! priority gesture fire once a higher-priority one gives up.

use super::snapshot::Snapshot;
use super::stream::InputStream;

/// Recognition progress reported by a recognizer each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GestureState {
    /// Nothing seen yet; the gesture could still start.
    #[default]
    Possible,
    /// Partially matched, waiting on more input.
    Pending,
    /// Fully matched.
    Satisfied,
    /// Cannot match until reset.
    Failed,
}

/// The pluggable recognition strategy behind a [`Gesture`].
pub trait GestureRecognizer {
    fn reset(&mut self) {}

    /// Inspect the classified input history and report progress. `frame` is
    /// the driver's monotonic frame counter, for expressing frame windows.
    fn on_input(&mut self, inputs: &dyn InputStream, frame: u32) -> GestureState;
}

/// One slot in a chain: a recognizer plus its recognition flag.
pub struct Gesture {
    recognizer: Box<dyn GestureRecognizer>,
    state: GestureState,
    is_recognized: bool,
}

impl Gesture {
    pub fn new(recognizer: impl GestureRecognizer + 'static) -> Gesture {
        Gesture {
            recognizer: Box::new(recognizer),
            state: GestureState::Possible,
            is_recognized: false,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Satisfied and not blocked by an earlier gesture in the chain.
    pub fn is_recognized(&self) -> bool {
        self.is_recognized
    }

    fn reset(&mut self) {
        self.state = GestureState::Possible;
        self.is_recognized = false;
        self.recognizer.reset();
    }

    fn invalidate(&mut self, blocked: bool) {
        self.is_recognized = self.state == GestureState::Satisfied && !blocked;
    }
}

/// An ordered set of gestures sharing one input stream.
#[derive(Default)]
pub struct GestureChain {
    gestures: Vec<Gesture>,
}

impl GestureChain {
    pub fn new() -> GestureChain {
        GestureChain::default()
    }

    /// Append a gesture at the lowest priority position.
    pub fn push(&mut self, gesture: Gesture) {
        self.gestures.push(gesture);
    }

    pub fn len(&self) -> usize {
        self.gestures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty()
    }

    pub fn gesture(&self, index: usize) -> &Gesture {
        &self.gestures[index]
    }

    pub fn reset(&mut self) {
        for gesture in &mut self.gestures {
            gesture.reset();
        }
    }

    /// Advance every gesture one frame, in priority order.
    ///
    /// Recognition is re-derived both before and after each recognizer runs,
    /// so a gesture that was satisfied earlier becomes recognized on the
    /// frame its upstream blocker fails.
    pub fn on_update(&mut self, inputs: &dyn InputStream, frame: u32) {
        for index in 0..self.gestures.len() {
            let blocked = self.is_blocked(index);
            let gesture = &mut self.gestures[index];
            gesture.invalidate(blocked);

            if matches!(gesture.state, GestureState::Possible | GestureState::Pending) {
                gesture.state = gesture.recognizer.on_input(inputs, frame);
            }

            let blocked = self.is_blocked(index);
            self.gestures[index].invalidate(blocked);
        }
    }

    /// A gesture is blocked while any earlier gesture is pending or satisfied.
    fn is_blocked(&self, index: usize) -> bool {
        self.gestures[..index]
            .iter()
            .any(|gesture| matches!(gesture.state, GestureState::Pending | GestureState::Satisfied))
    }
}

/// A stream stub for recognizers that are driven without a live device.
#[cfg(test)]
pub(crate) struct NullStream;

#[cfg(test)]
impl InputStream for NullStream {
    fn at(&self, _offset: usize) -> Snapshot {
        Snapshot::default()
    }
}
