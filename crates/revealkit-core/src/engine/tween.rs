//! Built-in tween engine
//!
//! Keeps the current property values of every registered target and a list
//! of running tweens. Call `update(now)` once per frame to advance them; it
//! returns the ids of tweens that finished during that step.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::{AnimationEngine, Property, PropertyMap, TargetId, TweenId, TweenRequest};
use crate::motion::timing::{is_complete, lerp, progress};
use crate::motion::EasingType;
use crate::{Error, Result};

/// One property being driven by a tween
#[derive(Debug, Clone)]
struct Track {
    property: Property,
    from: f64,
    to: f64,
}

#[derive(Debug, Clone)]
struct ActiveTween {
    id: TweenId,
    target: TargetId,
    tracks: Vec<Track>,
    start: Instant,
    duration: Duration,
    easing: EasingType,
}

/// In-process [`AnimationEngine`] driven by an explicit clock
#[derive(Debug)]
pub struct TweenEngine {
    /// Time of the last update; new tweens start here
    now: Instant,
    next_target: u64,
    next_tween: u64,
    values: HashMap<TargetId, PropertyMap>,
    tweens: Vec<ActiveTween>,
}

impl Default for TweenEngine {
    fn default() -> Self {
        Self::starting_at(Instant::now())
    }
}

impl TweenEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine whose clock starts at `now`
    pub fn starting_at(now: Instant) -> Self {
        Self {
            now,
            next_target: 0,
            next_tween: 0,
            values: HashMap::new(),
            tweens: Vec::new(),
        }
    }

    /// Current engine time
    #[inline]
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Register a new animatable target with its initial values
    pub fn register_target(&mut self, initial: PropertyMap) -> TargetId {
        let id = TargetId(self.next_target);
        self.next_target += 1;
        self.values.insert(id, initial);
        id
    }

    /// Forget a target and kill its tweens (no completions are reported)
    pub fn remove_target(&mut self, target: TargetId) {
        self.values.remove(&target);
        self.tweens.retain(|t| t.target != target);
    }

    /// Snapshot of a target's current values
    pub fn values(&self, target: TargetId) -> Option<&PropertyMap> {
        self.values.get(&target)
    }

    /// Check if any tween is running
    #[inline]
    pub fn is_animating(&self) -> bool {
        !self.tweens.is_empty()
    }

    /// Check if a specific tween is still running
    pub fn is_running(&self, tween: TweenId) -> bool {
        self.tweens.iter().any(|t| t.id == tween)
    }

    /// Advance every tween to `now`, returning the ids that completed
    pub fn update(&mut self, now: Instant) -> Vec<TweenId> {
        if now > self.now {
            self.now = now;
        }

        let mut completed = Vec::new();
        let values = &mut self.values;

        self.tweens.retain(|tween| {
            let Some(target_values) = values.get_mut(&tween.target) else {
                return false;
            };

            if is_complete(tween.start, tween.duration, now) {
                for track in &tween.tracks {
                    target_values.insert(track.property, track.to);
                }
                completed.push(tween.id);
                return false;
            }

            let t = tween.easing.apply(progress(tween.start, tween.duration, now));
            for track in &tween.tracks {
                target_values.insert(track.property, lerp(track.from, track.to, t));
            }
            true
        });

        if !completed.is_empty() {
            trace!(count = completed.len(), "Tweens completed");
        }
        completed
    }

    fn current_value(&self, target: TargetId, property: Property) -> f64 {
        self.values
            .get(&target)
            .and_then(|v| v.get(property))
            .unwrap_or_else(|| property.resting_default())
    }

    /// Drop the tracks another tween holds on the same properties
    fn overwrite(&mut self, target: TargetId, properties: &PropertyMap) {
        self.tweens.retain_mut(|tween| {
            if tween.target != target {
                return true;
            }
            tween.tracks.retain(|track| !properties.contains(track.property));
            if tween.tracks.is_empty() {
                debug!(tween = %tween.id, "Tween overwritten");
                false
            } else {
                true
            }
        });
    }
}

impl AnimationEngine for TweenEngine {
    fn animate(&mut self, request: TweenRequest) -> Result<TweenId> {
        if request.duration.is_zero() {
            return Err(Error::InvalidTween("duration must be greater than zero".to_string()));
        }
        if request.to.is_empty() {
            return Err(Error::InvalidTween("no target properties given".to_string()));
        }
        if !self.values.contains_key(&request.target) {
            return Err(Error::InvalidTween(format!(
                "unknown target {:?}",
                request.target
            )));
        }

        self.overwrite(request.target, &request.to);

        // from/to renders the initial values right away
        if let Some(from) = &request.from {
            if let Some(target_values) = self.values.get_mut(&request.target) {
                for (property, value) in from.iter() {
                    target_values.insert(property, value);
                }
            }
        }

        let tracks = request
            .to
            .iter()
            .map(|(property, to)| Track {
                property,
                from: self.current_value(request.target, property),
                to,
            })
            .collect();

        let id = TweenId(self.next_tween);
        self.next_tween += 1;

        self.tweens.push(ActiveTween {
            id,
            target: request.target,
            tracks,
            start: self.now,
            duration: request.duration,
            easing: request.easing,
        });

        trace!(tween = %id, duration_ms = request.duration.as_millis(), "Tween started");
        Ok(id)
    }

    fn value(&self, target: TargetId, property: Property) -> Option<f64> {
        let values = self.values.get(&target)?;
        Some(values.get(property).unwrap_or_else(|| property.resting_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn linear(request: TweenRequest) -> TweenRequest {
        request.with_easing(EasingType::Linear)
    }

    #[test]
    fn test_from_to_renders_initial_values_immediately() {
        let mut engine = TweenEngine::new();
        let target = engine.register_target(PropertyMap::new());

        engine
            .animate(TweenRequest::from_to(
                target,
                PropertyMap::new().with(Property::Opacity, 0.0),
                PropertyMap::new().with(Property::Opacity, 1.0),
                ms(100),
            ))
            .unwrap();

        assert_eq!(engine.value(target, Property::Opacity), Some(0.0));
    }

    #[test]
    fn test_interpolates_and_completes_once() {
        let t0 = Instant::now();
        let mut engine = TweenEngine::starting_at(t0);
        let target = engine.register_target(PropertyMap::new().with(Property::Y, 50.0));

        let id = engine
            .animate(linear(TweenRequest::to(
                target,
                PropertyMap::new().with(Property::Y, 0.0),
                ms(100),
            )))
            .unwrap();

        assert!(engine.update(t0 + ms(50)).is_empty());
        let mid = engine.value(target, Property::Y).unwrap();
        assert!((mid - 25.0).abs() < 0.001, "mid = {}", mid);

        assert_eq!(engine.update(t0 + ms(100)), vec![id]);
        assert_eq!(engine.value(target, Property::Y), Some(0.0));
        assert!(!engine.is_animating());
        assert!(engine.update(t0 + ms(200)).is_empty());
    }

    #[test]
    fn test_overwrite_kills_tween_without_completion() {
        let t0 = Instant::now();
        let mut engine = TweenEngine::starting_at(t0);
        let target = engine.register_target(PropertyMap::new());

        let exit = engine
            .animate(TweenRequest::to(
                target,
                PropertyMap::new().with(Property::Opacity, 0.0),
                ms(100),
            ))
            .unwrap();
        engine.update(t0 + ms(40));

        let enter = engine
            .animate(TweenRequest::to(
                target,
                PropertyMap::new().with(Property::Opacity, 1.0),
                ms(100),
            ))
            .unwrap();

        assert!(!engine.is_running(exit));
        let done = engine.update(t0 + ms(500));
        assert_eq!(done, vec![enter]);
        assert_eq!(engine.value(target, Property::Opacity), Some(1.0));
    }

    #[test]
    fn test_partial_overwrite_keeps_other_tracks() {
        let t0 = Instant::now();
        let mut engine = TweenEngine::starting_at(t0);
        let target = engine.register_target(PropertyMap::new());

        let both = engine
            .animate(TweenRequest::to(
                target,
                PropertyMap::new()
                    .with(Property::Opacity, 0.0)
                    .with(Property::X, 30.0),
                ms(100),
            ))
            .unwrap();
        engine
            .animate(TweenRequest::to(
                target,
                PropertyMap::new().with(Property::Opacity, 1.0),
                ms(50),
            ))
            .unwrap();

        assert!(engine.is_running(both));
        let done = engine.update(t0 + ms(100));
        assert_eq!(done.len(), 2);
        assert_eq!(engine.value(target, Property::X), Some(30.0));
        assert_eq!(engine.value(target, Property::Opacity), Some(1.0));
    }

    #[test]
    fn test_rejects_invalid_requests() {
        let mut engine = TweenEngine::new();
        let target = engine.register_target(PropertyMap::new());
        let to = PropertyMap::new().with(Property::Opacity, 1.0);

        let zero = engine.animate(TweenRequest::to(target, to.clone(), Duration::ZERO));
        assert!(matches!(zero, Err(Error::InvalidTween(_))));

        let empty = engine.animate(TweenRequest::to(target, PropertyMap::new(), ms(10)));
        assert!(matches!(empty, Err(Error::InvalidTween(_))));

        engine.remove_target(target);
        let unknown = engine.animate(TweenRequest::to(target, to, ms(10)));
        assert!(matches!(unknown, Err(Error::InvalidTween(_))));
    }

    #[test]
    fn test_value_defaults_for_unset_properties() {
        let mut engine = TweenEngine::new();
        let target = engine.register_target(PropertyMap::new());
        assert_eq!(engine.value(target, Property::ScaleX), Some(1.0));
        engine.remove_target(target);
        assert_eq!(engine.value(target, Property::ScaleX), None);
    }
}
