//! Input classification: raw axis/button readings in, semantically classified
//! per-frame snapshots out.
//!
//! The embedding engine polls its devices and exposes them through [`Source`];
//! [`Stream::advance`] captures one classified [`Snapshot`] per frame into a
//! bounded history [`Buffer`]. Gesture recognition ([`gesture`]) layers on top
//! of the read-only [`InputStream`] view.

pub mod analog;
pub mod buffer;
pub mod button;
pub mod direction;
pub mod gesture;
pub mod snapshot;
pub mod source;
pub mod stream;

pub use analog::{Analog, AnalogState};
pub use buffer::Buffer;
pub use button::{Button, ButtonState};
pub use direction::Direction;
pub use gesture::{Gesture, GestureChain, GestureRecognizer, GestureState};
pub use snapshot::Snapshot;
pub use source::Source;
pub use stream::{InputStream, Stream};
