//! Motion atoms shared by the tween engine
//!
//! - `easing` - Pure easing functions (quadratic, cubic, quintic, exponential)
//! - `timing` - Time calculation utilities (progress, interpolation)

pub mod easing;
pub mod timing;

pub use easing::EasingType;
