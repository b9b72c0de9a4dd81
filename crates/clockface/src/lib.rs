//! Layout and interaction core of a radial clock widget.
//!
//! The crate computes what to draw (circles, tick segments, text anchors, dial positions)
//! and reacts to pointer movement and animation ticks. Drawing and event dispatch belong
//! to the host.

pub mod animator;
pub mod clock;
pub mod controller;
pub mod dial;
pub mod face;
pub mod geometry;
pub mod layout;
pub mod time;

pub use animator::{AngleAnimator, AnimationStep, AnimatorState, Easing};
pub use clock::{Layout, PointerOutcome, RadialClock};
pub use controller::DragController;
pub use dial::{ControlLabel, Dial, DialLabel, DialSpec, Quadrant};
pub use face::{ClockFace, Insets};
pub use geometry::{Bounds, Point};
pub use layout::{
    BaselineShift, FaceParams, FixedTextHeight, Numeral, ParamsError, TextAnchor, TextMetrics,
    TextRole, Tick, TickDirection,
};
pub use time::DialTime;
