//! Axis and sign shared by slide offsets and scroll steps

use crate::engine::Property;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Offset property that moves content along this axis
    pub fn offset_property(self) -> Property {
        match self {
            Axis::Horizontal => Property::X,
            Axis::Vertical => Property::Y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    #[inline]
    pub fn factor(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }

    /// Apply this sign to a magnitude
    #[inline]
    pub fn apply(self, magnitude: f64) -> f64 {
        self.factor() * magnitude
    }
}
