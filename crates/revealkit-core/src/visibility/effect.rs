//! Property-set descriptors for the visibility families
//!
//! Fade, fade+slide and scaleX differ only in which properties they drive
//! and what the hidden values are. [`Effect`] captures exactly that.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::axis::{Axis, Sign};
use crate::config::VisibilityConfig;
use crate::engine::{Property, PropertyMap};
use crate::Error;

/// Side a fade+slide panel enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlideDirection {
    /// Starts below its resting place
    #[default]
    SlideUp,
    /// Starts above its resting place
    SlideDown,
    /// Starts left of its resting place
    SlideFromLeft,
    /// Starts right of its resting place
    SlideFromRight,
}

impl SlideDirection {
    pub fn axis(self) -> Axis {
        match self {
            SlideDirection::SlideUp | SlideDirection::SlideDown => Axis::Vertical,
            SlideDirection::SlideFromLeft | SlideDirection::SlideFromRight => Axis::Horizontal,
        }
    }

    /// Sign of the hidden offset
    pub fn sign(self) -> Sign {
        match self {
            SlideDirection::SlideUp | SlideDirection::SlideFromRight => Sign::Positive,
            SlideDirection::SlideDown | SlideDirection::SlideFromLeft => Sign::Negative,
        }
    }

    /// Offset the content sits at while hidden
    pub fn hidden_offset(self, length: f64) -> f64 {
        self.sign().apply(length)
    }
}

/// Horizontal anchor of a scaleX transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransformOrigin {
    Left,
    #[default]
    Center,
    Right,
}

impl TransformOrigin {
    /// Anchor position as a fraction of the width
    pub fn fraction(self) -> f64 {
        match self {
            TransformOrigin::Left => 0.0,
            TransformOrigin::Center => 0.5,
            TransformOrigin::Right => 1.0,
        }
    }
}

impl FromStr for TransformOrigin {
    type Err = Error;

    /// Parse CSS-like origins ("left", "center center", "right top", "50%").
    /// Vertical keywords are accepted and ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut horizontal = None;
        let mut seen_any = false;

        for token in s.split_whitespace() {
            seen_any = true;
            let parsed = match token.to_ascii_lowercase().as_str() {
                "left" | "0%" => Some(TransformOrigin::Left),
                "right" | "100%" => Some(TransformOrigin::Right),
                "50%" => Some(TransformOrigin::Center),
                "center" | "top" | "bottom" => None,
                other => {
                    return Err(Error::Config(format!(
                        "unsupported transform origin keyword '{}'",
                        other
                    )))
                }
            };
            if horizontal.is_none() {
                horizontal = parsed;
            }
        }

        if !seen_any {
            return Err(Error::Config("transform origin is empty".to_string()));
        }
        Ok(horizontal.unwrap_or_default())
    }
}

impl fmt::Display for TransformOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformOrigin::Left => f.write_str("left center"),
            TransformOrigin::Center => f.write_str("center center"),
            TransformOrigin::Right => f.write_str("right center"),
        }
    }
}

/// Resolved enter/exit durations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionDurations {
    pub enter: Duration,
    pub exit: Duration,
}

impl TransitionDurations {
    pub fn new(enter: Duration, exit: Duration) -> Self {
        Self { enter, exit }
    }

    pub fn uniform(duration: Duration) -> Self {
        Self::new(duration, duration)
    }
}

/// Which family to build from a [`VisibilityConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Fade,
    FadeSlide,
    ScaleX,
}

/// Property set driven by one visibility animator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Opacity only
    Fade,
    /// Opacity plus an axis offset
    FadeSlide { direction: SlideDirection, length: f64 },
    /// Horizontal scale around a static origin
    ScaleX { origin: TransformOrigin },
}

impl Effect {
    pub fn from_config(kind: EffectKind, config: &VisibilityConfig) -> crate::Result<Self> {
        Ok(match kind {
            EffectKind::Fade => Effect::Fade,
            EffectKind::FadeSlide => Effect::FadeSlide {
                direction: config.slide_direction,
                length: config.slide_length,
            },
            EffectKind::ScaleX => Effect::ScaleX {
                origin: config.origin()?,
            },
        })
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::Fade => EffectKind::Fade,
            Effect::FadeSlide { .. } => EffectKind::FadeSlide,
            Effect::ScaleX { .. } => EffectKind::ScaleX,
        }
    }

    /// Values while hidden (start of enter, end of exit)
    pub fn hidden(&self) -> PropertyMap {
        match *self {
            Effect::Fade => PropertyMap::new().with(Property::Opacity, 0.0),
            Effect::FadeSlide { direction, length } => PropertyMap::new()
                .with(Property::Opacity, 0.0)
                .with(
                    direction.axis().offset_property(),
                    direction.hidden_offset(length),
                ),
            Effect::ScaleX { .. } => PropertyMap::new().with(Property::ScaleX, 0.0),
        }
    }

    /// Fully visible resting values
    pub fn resting(&self) -> PropertyMap {
        match *self {
            Effect::Fade => PropertyMap::new().with(Property::Opacity, 1.0),
            Effect::FadeSlide { direction, .. } => PropertyMap::new()
                .with(Property::Opacity, 1.0)
                .with(direction.axis().offset_property(), 0.0),
            Effect::ScaleX { .. } => PropertyMap::new().with(Property::ScaleX, 1.0),
        }
    }

    /// Static transform origin, only meaningful for scaleX
    pub fn transform_origin(&self) -> Option<TransformOrigin> {
        match *self {
            Effect::ScaleX { origin } => Some(origin),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Effect::Fade => "fade",
            Effect::FadeSlide { .. } => "fade-slide",
            Effect::ScaleX { .. } => "scale-x",
        }
    }
}
