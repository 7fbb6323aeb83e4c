//! Animation engine collaborator
//!
//! The visibility lifecycle never interpolates anything itself. It hands
//! [`TweenRequest`]s to an [`AnimationEngine`] and gets a [`TweenId`] back;
//! completions come back to it through the host, which routes the ids the
//! engine reports from its update step.
//!
//! Engines must honor property-level overwrite: a new tween on a
//! `(target, property)` pair retargets that property, and a tween that loses
//! every property is killed without reporting completion.

mod tween;

pub use tween::TweenEngine;

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::motion::EasingType;
use crate::Result;

/// Visual property a tween can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    Opacity,
    /// Horizontal offset in pixels
    X,
    /// Vertical offset in pixels
    Y,
    /// Horizontal scale factor
    ScaleX,
}

impl Property {
    /// Value a property has before anything animated it
    pub fn resting_default(self) -> f64 {
        match self {
            Property::Opacity | Property::ScaleX => 1.0,
            Property::X | Property::Y => 0.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Property::Opacity => "opacity",
            Property::X => "x",
            Property::Y => "y",
            Property::ScaleX => "scaleX",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered property -> value map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyMap(BTreeMap<Property, f64>);

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, property: Property, value: f64) -> Self {
        self.0.insert(property, value);
        self
    }

    pub fn insert(&mut self, property: Property, value: f64) {
        self.0.insert(property, value);
    }

    pub fn get(&self, property: Property) -> Option<f64> {
        self.0.get(&property).copied()
    }

    pub fn contains(&self, property: Property) -> bool {
        self.0.contains_key(&property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, f64)> + '_ {
        self.0.iter().map(|(p, v)| (*p, *v))
    }

    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Property, f64)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (Property, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Handle to an element the engine can animate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub(crate) u64);

/// Handle to one issued tween
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub(crate) u64);

impl fmt::Display for TweenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tween#{}", self.0)
    }
}

/// A single animation request
///
/// With `from` set the engine renders those values immediately and tweens
/// to `to` ("from/to" mode); without it the tween starts from whatever the
/// target currently shows ("to" mode).
#[derive(Debug, Clone, PartialEq)]
pub struct TweenRequest {
    pub target: TargetId,
    pub from: Option<PropertyMap>,
    pub to: PropertyMap,
    pub duration: Duration,
    pub easing: EasingType,
}

impl TweenRequest {
    /// Animate from current values to `to`
    pub fn to(target: TargetId, to: PropertyMap, duration: Duration) -> Self {
        Self {
            target,
            from: None,
            to,
            duration,
            easing: EasingType::default(),
        }
    }

    /// Animate from explicit initial values to `to`
    pub fn from_to(target: TargetId, from: PropertyMap, to: PropertyMap, duration: Duration) -> Self {
        Self {
            target,
            from: Some(from),
            to,
            duration,
            easing: EasingType::default(),
        }
    }

    pub fn with_easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }
}

/// External interpolation engine used by the visibility lifecycle
pub trait AnimationEngine {
    /// Start a tween. Zero durations and empty property maps are rejected.
    fn animate(&mut self, request: TweenRequest) -> Result<TweenId>;

    /// Current value of a property, `None` for an unknown target
    fn value(&self, target: TargetId, property: Property) -> Option<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_map_builder() {
        let map = PropertyMap::new()
            .with(Property::Opacity, 0.0)
            .with(Property::Y, 50.0);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(Property::Y), Some(50.0));
        assert_eq!(map.get(Property::X), None);
        // Ordered by property, not by insertion
        let props: Vec<_> = map.properties().collect();
        assert_eq!(props, vec![Property::Opacity, Property::Y]);
    }

    #[test]
    fn test_resting_defaults() {
        assert_eq!(Property::Opacity.resting_default(), 1.0);
        assert_eq!(Property::ScaleX.resting_default(), 1.0);
        assert_eq!(Property::X.resting_default(), 0.0);
        assert_eq!(Property::Y.resting_default(), 0.0);
    }
}
