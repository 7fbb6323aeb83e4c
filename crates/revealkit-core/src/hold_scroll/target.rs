//! Scrollable target collaborator
//!
//! The host owns the target; controllers only hold a `Weak` to it and touch
//! nothing but its offsets.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::axis::Axis;

/// Element with mutable horizontal and vertical scroll offsets
pub trait ScrollTarget: Send + Sync {
    fn scroll_offset(&self, axis: Axis) -> f64;

    fn set_scroll_offset(&self, axis: Axis, value: f64);

    /// Move the offset by `delta`
    fn scroll_by(&self, axis: Axis, delta: f64) {
        self.set_scroll_offset(axis, self.scroll_offset(axis) + delta);
    }
}

/// `f64` stored as bits in an `AtomicU64`
#[derive(Debug)]
struct AtomicF64(AtomicU64);

impl AtomicF64 {
    fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Release);
    }

    /// Apply `f` atomically, returning the new value
    fn update(&self, f: impl Fn(f64) -> f64) -> f64 {
        let mut current = self.0.load(Ordering::Acquire);
        loop {
            let next = f(f64::from_bits(current)).to_bits();
            match self
                .0
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return f64::from_bits(next),
                Err(actual) => current = actual,
            }
        }
    }
}

/// Lock-free scroll offsets, clamped to `[0, max]` per axis
///
/// Safe to share between the host's render loop and tick tasks.
#[derive(Debug)]
pub struct ScrollOffsets {
    left: AtomicF64,
    top: AtomicF64,
    max_left: AtomicF64,
    max_top: AtomicF64,
}

impl Default for ScrollOffsets {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollOffsets {
    /// Offsets at the origin with no upper bound
    pub fn new() -> Self {
        Self {
            left: AtomicF64::new(0.0),
            top: AtomicF64::new(0.0),
            max_left: AtomicF64::new(f64::INFINITY),
            max_top: AtomicF64::new(f64::INFINITY),
        }
    }

    /// Offsets bounded by the given maximums
    pub fn with_extent(max_left: f64, max_top: f64) -> Self {
        let offsets = Self::new();
        offsets.set_extent(max_left, max_top);
        offsets
    }

    /// Update the scrollable extent (e.g. after a resize) and re-clamp
    pub fn set_extent(&self, max_left: f64, max_top: f64) {
        self.max_left.store(max_left.max(0.0));
        self.max_top.store(max_top.max(0.0));
        self.left.update(|v| clamp(v, self.max_left.load()));
        self.top.update(|v| clamp(v, self.max_top.load()));
    }

    pub fn left(&self) -> f64 {
        self.left.load()
    }

    pub fn top(&self) -> f64 {
        self.top.load()
    }

    fn slot(&self, axis: Axis) -> (&AtomicF64, &AtomicF64) {
        match axis {
            Axis::Horizontal => (&self.left, &self.max_left),
            Axis::Vertical => (&self.top, &self.max_top),
        }
    }
}

fn clamp(value: f64, max: f64) -> f64 {
    value.max(0.0).min(max)
}

impl ScrollTarget for ScrollOffsets {
    fn scroll_offset(&self, axis: Axis) -> f64 {
        self.slot(axis).0.load()
    }

    fn set_scroll_offset(&self, axis: Axis, value: f64) {
        let (offset, max) = self.slot(axis);
        offset.store(clamp(value, max.load()));
    }

    fn scroll_by(&self, axis: Axis, delta: f64) {
        let (offset, max) = self.slot(axis);
        let max = max.load();
        offset.update(|v| clamp(v + delta, max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_by_moves_one_axis() {
        let offsets = ScrollOffsets::new();
        offsets.scroll_by(Axis::Vertical, 12.0);
        offsets.scroll_by(Axis::Vertical, -2.0);
        assert_eq!(offsets.top(), 10.0);
        assert_eq!(offsets.left(), 0.0);
    }

    #[test]
    fn test_offsets_clamp_to_extent() {
        let offsets = ScrollOffsets::with_extent(30.0, 100.0);
        offsets.scroll_by(Axis::Vertical, -5.0);
        assert_eq!(offsets.top(), 0.0);

        offsets.set_scroll_offset(Axis::Horizontal, 45.0);
        assert_eq!(offsets.left(), 30.0);

        offsets.scroll_by(Axis::Vertical, 150.0);
        assert_eq!(offsets.top(), 100.0);
    }

    #[test]
    fn test_shrinking_extent_reclamps() {
        let offsets = ScrollOffsets::new();
        offsets.set_scroll_offset(Axis::Vertical, 80.0);
        offsets.set_extent(0.0, 50.0);
        assert_eq!(offsets.top(), 50.0);
    }

    #[test]
    fn test_default_trait_scroll_by() {
        struct Plain(std::sync::Mutex<f64>);

        impl ScrollTarget for Plain {
            fn scroll_offset(&self, _axis: Axis) -> f64 {
                *self.0.lock().unwrap()
            }

            fn set_scroll_offset(&self, _axis: Axis, value: f64) {
                *self.0.lock().unwrap() = value;
            }
        }

        let plain = Plain(std::sync::Mutex::new(1.0));
        plain.scroll_by(Axis::Vertical, 2.5);
        assert_eq!(plain.scroll_offset(Axis::Vertical), 3.5);
    }
}
