//! Continuous scrolling while a press is held
//!
//! - `direction` - Scroll direction selector and its axis/sign
//! - `target` - Scrollable target collaborator and the atomic offsets impl
//! - `schedule` - Tick strategies (fixed interval, frame synchronized) and
//!   the scoped tick handle
//! - `controller` - The press/release/leave/context-menu contract
//!
//! Both strategies share the same contract. The interval strategy (10 ms)
//! is the default; the frame strategy steps once per [`FrameClock`] pulse.

mod controller;
mod direction;
mod schedule;
mod target;

pub use controller::{EventDisposition, HoldScrollController, PressKind, PRIMARY_BUTTON};
pub use direction::{HorizontalDirection, ScrollDirection, VerticalDirection};
pub use schedule::{FrameClock, TickHandle, TickStrategy};
pub use target::{ScrollOffsets, ScrollTarget};
