//! One frame's classified button reading.

/// Button edge/level classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonState {
    #[default]
    Inactive,
    /// Pressed this frame.
    Down,
    /// Held since an earlier frame.
    Active,
    /// Released this frame.
    Up,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Button {
    pub state: ButtonState,
}

impl Button {
    pub fn new(state: ButtonState) -> Button {
        Button { state }
    }

    /// Classify one frame from the source's three independent polls.
    ///
    /// `Down` takes priority over `Up`, which takes priority over the steady
    /// held/idle states.
    pub fn from_polls(pressed: bool, released: bool, held: bool) -> Button {
        let state = if pressed {
            ButtonState::Down
        } else if released {
            ButtonState::Up
        } else if held {
            ButtonState::Active
        } else {
            ButtonState::Inactive
        };

        Button::new(state)
    }

    pub fn is_down(&self) -> bool {
        self.state == ButtonState::Down
    }

    /// True while the button is pressed, whether it just went down or is held.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ButtonState::Down | ButtonState::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_priority() {
        // press beats release beats held
        assert_eq!(Button::from_polls(true, true, true).state, ButtonState::Down);
        assert_eq!(Button::from_polls(false, true, true).state, ButtonState::Up);
        assert_eq!(Button::from_polls(false, false, true).state, ButtonState::Active);
        assert_eq!(Button::from_polls(false, false, false).state, ButtonState::Inactive);
    }

    #[test]
    fn test_is_active_covers_down_and_held() {
        assert!(Button::new(ButtonState::Down).is_active());
        assert!(Button::new(ButtonState::Active).is_active());
        assert!(!Button::new(ButtonState::Up).is_active());
        assert!(!Button::new(ButtonState::Inactive).is_active());
    }
}
