//! Visibility lifecycle state machine
//!
//! Decouples "should be visible" from "is mounted". Showing mounts
//! synchronously and then plays the enter transition; hiding plays the exit
//! transition and only unmounts once the engine reports it finished.

use tracing::{debug, trace, warn};

use super::effect::{Effect, EffectKind, TransitionDurations};
use crate::config::VisibilityConfig;
use crate::engine::{AnimationEngine, TargetId, TweenId, TweenRequest};
use crate::motion::EasingType;

/// Lifecycle phase
///
/// State machine: Unmounted → Entering → Visible → Exiting → Unmounted.
/// A show request while Exiting goes straight back to Entering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not in the render tree
    Unmounted,
    /// Mounted and animating in. `tween` is `None` while the enter for this
    /// mount is waiting for a target to be bound.
    Entering { tween: Option<TweenId> },
    /// Mounted and at rest
    Visible,
    /// Still mounted, animating out; unmounts when `tween` completes
    Exiting { tween: TweenId },
}

impl Phase {
    #[inline]
    pub fn is_mounted(self) -> bool {
        !matches!(self, Phase::Unmounted)
    }
}

/// Which transition is currently playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    None,
    Entering,
    Exiting,
}

/// Drives one animated wrapper's mount state and transitions
#[derive(Debug, Clone)]
pub struct VisibilityAnimator {
    effect: Effect,
    durations: TransitionDurations,
    easing: EasingType,
    phase: Phase,
    desired: bool,
    target: Option<TargetId>,
    /// Incremented on every mount
    epoch: u64,
}

impl VisibilityAnimator {
    /// Create an animator. `mounted` starts equal to `initially_visible`;
    /// the first enter plays once a target is bound.
    pub fn new(effect: Effect, durations: TransitionDurations, initially_visible: bool) -> Self {
        let (phase, epoch) = if initially_visible {
            (Phase::Entering { tween: None }, 1)
        } else {
            (Phase::Unmounted, 0)
        };

        Self {
            effect,
            durations,
            easing: EasingType::default(),
            phase,
            desired: initially_visible,
            target: None,
            epoch,
        }
    }

    /// Build an animator for one family from the `[visibility]` section
    pub fn from_config(kind: EffectKind, config: &VisibilityConfig) -> crate::Result<Self> {
        let effect = Effect::from_config(kind, config)?;
        let durations = config.durations()?;
        Ok(Self::new(effect, durations, config.initially_visible).with_easing(config.easing))
    }

    pub fn with_easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.phase.is_mounted()
    }

    /// Last observed desired visibility
    #[inline]
    pub fn desired(&self) -> bool {
        self.desired
    }

    pub fn transition_kind(&self) -> TransitionKind {
        match self.phase {
            Phase::Entering { .. } => TransitionKind::Entering,
            Phase::Exiting { .. } => TransitionKind::Exiting,
            Phase::Unmounted | Phase::Visible => TransitionKind::None,
        }
    }

    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    pub fn durations(&self) -> TransitionDurations {
        self.durations
    }

    /// Number of times content has been mounted
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    /// Bind the element to animate. Plays the enter owed by the current
    /// mount, if any.
    pub fn bind_target<E>(&mut self, target: TargetId, engine: &mut E)
    where
        E: AnimationEngine + ?Sized,
    {
        self.target = Some(target);
        if self.phase == (Phase::Entering { tween: None }) {
            self.play_enter(engine);
        }
    }

    /// Detach the element. An exit in flight can no longer finish, so the
    /// content unmounts right away.
    pub fn unbind_target(&mut self) {
        self.target = None;
        match self.phase {
            Phase::Exiting { .. } => self.unmount(),
            Phase::Entering { tween: Some(_) } => self.phase = Phase::Visible,
            _ => {}
        }
    }

    /// Feed the host's desired visibility. Call whenever it changes; calling
    /// it with an unchanged value is harmless.
    pub fn observe<E>(&mut self, visible: bool, engine: &mut E)
    where
        E: AnimationEngine + ?Sized,
    {
        self.desired = visible;

        match (visible, self.phase) {
            (true, Phase::Unmounted) => {
                self.epoch += 1;
                self.phase = Phase::Entering { tween: None };
                debug!(effect = self.effect.name(), epoch = self.epoch, "Mounted");
                self.play_enter(engine);
            }
            (true, Phase::Exiting { tween }) => {
                debug!(effect = self.effect.name(), exit = %tween, "Exit interrupted by show");
                self.reverse_exit(engine);
            }
            (true, Phase::Entering { .. } | Phase::Visible) => {}
            (false, Phase::Entering { .. } | Phase::Visible) => self.play_exit(engine),
            (false, Phase::Unmounted | Phase::Exiting { .. }) => {}
        }
    }

    /// Route a completed tween. Returns true if it belonged to the current
    /// transition; stale ids are ignored.
    pub fn on_tween_complete(&mut self, tween: TweenId) -> bool {
        match self.phase {
            Phase::Exiting { tween: exit } if exit == tween => {
                self.unmount();
                true
            }
            Phase::Entering { tween: Some(enter) } if enter == tween => {
                trace!(effect = self.effect.name(), "Enter finished");
                self.phase = Phase::Visible;
                true
            }
            _ => false,
        }
    }

    /// Route a batch of completions, returning how many were ours
    pub fn on_tweens_complete(&mut self, tweens: &[TweenId]) -> usize {
        tweens.iter().filter(|t| self.on_tween_complete(**t)).count()
    }

    /// Hidden -> resting, replayed from the hidden values every mount
    fn play_enter<E>(&mut self, engine: &mut E)
    where
        E: AnimationEngine + ?Sized,
    {
        let Some(target) = self.target else {
            trace!(effect = self.effect.name(), "Enter deferred until a target is bound");
            return;
        };

        let request = TweenRequest::from_to(
            target,
            self.effect.hidden(),
            self.effect.resting(),
            self.durations.enter,
        )
        .with_easing(self.easing);

        self.phase = match engine.animate(request) {
            Ok(tween) => Phase::Entering { tween: Some(tween) },
            Err(e) => {
                warn!(effect = self.effect.name(), error = %e, "Enter transition rejected");
                Phase::Visible
            }
        };
    }

    /// Current -> resting, overriding the exit tween on the same properties
    fn reverse_exit<E>(&mut self, engine: &mut E)
    where
        E: AnimationEngine + ?Sized,
    {
        let Some(target) = self.target else {
            self.phase = Phase::Visible;
            return;
        };

        let request = TweenRequest::to(target, self.effect.resting(), self.durations.enter)
            .with_easing(self.easing);

        self.phase = match engine.animate(request) {
            Ok(tween) => Phase::Entering { tween: Some(tween) },
            Err(e) => {
                warn!(effect = self.effect.name(), error = %e, "Enter transition rejected");
                Phase::Visible
            }
        };
    }

    /// Current -> hidden, unmounting on completion
    fn play_exit<E>(&mut self, engine: &mut E)
    where
        E: AnimationEngine + ?Sized,
    {
        let Some(target) = self.target else {
            trace!(effect = self.effect.name(), "No target bound, unmounting without exit");
            self.unmount();
            return;
        };

        let request = TweenRequest::to(target, self.effect.hidden(), self.durations.exit)
            .with_easing(self.easing);

        match engine.animate(request) {
            Ok(tween) => self.phase = Phase::Exiting { tween },
            Err(e) => {
                warn!(effect = self.effect.name(), error = %e, "Exit transition rejected");
                self.unmount();
            }
        }
    }

    fn unmount(&mut self) {
        debug!(effect = self.effect.name(), epoch = self.epoch, "Unmounted");
        self.phase = Phase::Unmounted;
    }
}
