use serde::{Deserialize, Serialize};

use crate::axis::{Axis, Sign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalDirection {
    Down,
    Up,
}

/// Scroll direction: exactly one of a horizontal or a vertical selector.
///
/// In TOML: `direction = { vertical = "down" }` or
/// `direction = { horizontal = "left" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Horizontal(HorizontalDirection),
    Vertical(VerticalDirection),
}

impl Default for ScrollDirection {
    fn default() -> Self {
        ScrollDirection::Vertical(VerticalDirection::Down)
    }
}

impl ScrollDirection {
    pub fn axis(self) -> Axis {
        match self {
            ScrollDirection::Horizontal(_) => Axis::Horizontal,
            ScrollDirection::Vertical(_) => Axis::Vertical,
        }
    }

    /// `down` and `right` scroll forward, `up` and `left` backward
    pub fn sign(self) -> Sign {
        match self {
            ScrollDirection::Horizontal(HorizontalDirection::Right)
            | ScrollDirection::Vertical(VerticalDirection::Down) => Sign::Positive,
            ScrollDirection::Horizontal(HorizontalDirection::Left)
            | ScrollDirection::Vertical(VerticalDirection::Up) => Sign::Negative,
        }
    }

    /// Signed offset change for one tick of `step`
    #[inline]
    pub fn delta(self, step: f64) -> f64 {
        self.sign().apply(step)
    }

    /// Same axis, opposite sign
    pub fn reversed(self) -> Self {
        match self {
            ScrollDirection::Horizontal(HorizontalDirection::Left) => {
                ScrollDirection::Horizontal(HorizontalDirection::Right)
            }
            ScrollDirection::Horizontal(HorizontalDirection::Right) => {
                ScrollDirection::Horizontal(HorizontalDirection::Left)
            }
            ScrollDirection::Vertical(VerticalDirection::Down) => {
                ScrollDirection::Vertical(VerticalDirection::Up)
            }
            ScrollDirection::Vertical(VerticalDirection::Up) => {
                ScrollDirection::Vertical(VerticalDirection::Down)
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScrollDirection::Horizontal(HorizontalDirection::Left) => "left",
            ScrollDirection::Horizontal(HorizontalDirection::Right) => "right",
            ScrollDirection::Vertical(VerticalDirection::Down) => "down",
            ScrollDirection::Vertical(VerticalDirection::Up) => "up",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_and_sign_resolution() {
        let cases = [
            (ScrollDirection::Vertical(VerticalDirection::Down), Axis::Vertical, 2.0),
            (ScrollDirection::Vertical(VerticalDirection::Up), Axis::Vertical, -2.0),
            (ScrollDirection::Horizontal(HorizontalDirection::Right), Axis::Horizontal, 2.0),
            (ScrollDirection::Horizontal(HorizontalDirection::Left), Axis::Horizontal, -2.0),
        ];

        for (direction, axis, delta) in cases {
            assert_eq!(direction.axis(), axis, "{:?}", direction);
            assert_eq!(direction.delta(2.0), delta, "{:?}", direction);
        }
    }

    #[test]
    fn test_reversed_keeps_axis() {
        let right = ScrollDirection::Horizontal(HorizontalDirection::Right);
        assert_eq!(right.reversed().label(), "left");
        assert_eq!(right.reversed().axis(), Axis::Horizontal);
        assert_eq!(ScrollDirection::default().reversed().reversed(), ScrollDirection::default());
    }

    #[test]
    fn test_default_is_down() {
        assert_eq!(ScrollDirection::default().label(), "down");
    }
}
