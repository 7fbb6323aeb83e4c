//! Animated visibility lifecycle
//!
//! One parametrized state machine behind the fade, fade+slide and scaleX
//! wrappers. [`Effect`] describes which properties move and where "hidden"
//! is; [`VisibilityAnimator`] decides when content is mounted and which
//! transition plays.
//!
//! # Usage
//!
//! ```ignore
//! use revealkit_core::engine::TweenEngine;
//! use revealkit_core::visibility::{Effect, TransitionDurations, VisibilityAnimator};
//!
//! let mut engine = TweenEngine::new();
//! let effect = Effect::Fade;
//! let target = engine.register_target(effect.hidden());
//! let mut animator = VisibilityAnimator::new(effect, TransitionDurations::uniform(d), false);
//! animator.bind_target(target, &mut engine);
//!
//! animator.observe(true, &mut engine);
//!
//! // Every frame
//! let done = engine.update(Instant::now());
//! animator.on_tweens_complete(&done);
//! if animator.is_mounted() { /* render with engine.values(target) */ }
//! ```

mod animator;
mod effect;

pub use animator::{Phase, TransitionKind, VisibilityAnimator};
pub use effect::{Effect, EffectKind, SlideDirection, TransformOrigin, TransitionDurations};
