//! Press-and-hold scroll controller
//!
//! While a press is held over a trigger, the bound target's offset advances
//! by `step` per tick. `on_press_start` / `on_press_end` / `on_press_leave` /
//! `on_context_menu` are the whole input contract; the scheduling strategy
//! is fixed at construction.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use tokio::runtime::Handle;
use tracing::{debug, trace};

use super::direction::ScrollDirection;
use super::schedule::{FrameClock, TickHandle, TickStrategy};
use super::target::ScrollTarget;
use crate::config::{ScrollConfig, StrategyKind};
use crate::{Error, Result};

/// Button index of the primary pointer button
pub const PRIMARY_BUTTON: u16 = 0;

/// Kind of press that may start a hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKind {
    /// Mouse/pen press with its button index (0 = primary)
    Pointer { button: u16 },
    /// Touch start; has no button
    Touch,
}

impl PressKind {
    pub fn primary() -> Self {
        PressKind::Pointer {
            button: PRIMARY_BUTTON,
        }
    }
}

/// What the host should do with the input event it just delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    Continue,
    /// Suppress the host's default handling (e.g. the context menu)
    PreventDefault,
}

/// Scrolls a target continuously while a press is held
///
/// Invariant: a tick handle exists exactly while the controller is active.
/// Dropping the controller drops the handle, which stops scrolling.
#[derive(Debug)]
pub struct HoldScrollController {
    direction: ScrollDirection,
    step: f64,
    strategy: TickStrategy,
    touch_enabled: bool,
    target: Option<Weak<dyn ScrollTarget>>,
    runtime: Handle,
    ticks: Arc<AtomicU64>,
    pending: Option<TickHandle>,
}

impl HoldScrollController {
    /// Create a controller on the current tokio runtime
    pub fn new(direction: ScrollDirection, step: f64, strategy: TickStrategy) -> Result<Self> {
        Self::with_runtime(Handle::try_current()?, direction, step, strategy)
    }

    /// Create a controller that spawns its ticks on `runtime`
    pub fn with_runtime(
        runtime: Handle,
        direction: ScrollDirection,
        step: f64,
        strategy: TickStrategy,
    ) -> Result<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(Error::Config(format!(
                "scroll step must be positive, got {}",
                step
            )));
        }
        if let TickStrategy::Interval { period } = &strategy {
            if period.is_zero() {
                return Err(Error::Config("tick period must be non-zero".to_string()));
            }
        }

        Ok(Self {
            direction,
            step,
            strategy,
            touch_enabled: true,
            target: None,
            runtime,
            ticks: Arc::new(AtomicU64::new(0)),
            pending: None,
        })
    }

    /// Build from the `[scroll]` section. `clock` is only used by the frame
    /// strategy.
    pub fn from_config(config: &ScrollConfig, clock: &FrameClock) -> Result<Self> {
        let strategy = match config.strategy {
            StrategyKind::Interval => TickStrategy::interval(config.interval()),
            StrategyKind::Frame => TickStrategy::every_frame(clock.clone()),
        };
        Ok(Self::new(config.direction, config.step, strategy)?.with_touch(config.touch_enabled))
    }

    /// Override the configured direction (e.g. for a paired up/down trigger)
    pub fn with_direction(mut self, direction: ScrollDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Whether touch presses start scrolling
    pub fn with_touch(mut self, enabled: bool) -> Self {
        self.touch_enabled = enabled;
        self
    }

    /// Bind the element to scroll. Only a weak reference is kept.
    pub fn bind_target<T>(&mut self, target: &Arc<T>)
    where
        T: ScrollTarget + 'static,
    {
        let weak: Weak<T> = Arc::downgrade(target);
        self.target = Some(weak);
    }

    /// Unbind the target and stop any hold
    pub fn unbind_target(&mut self) {
        self.stop();
        self.target = None;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// Total ticks that reached a live target since creation
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Acquire)
    }

    /// Press began over the trigger. Returns true if scrolling started.
    pub fn on_press_start(&mut self, kind: PressKind) -> bool {
        match kind {
            PressKind::Pointer { button } if button != PRIMARY_BUTTON => {
                trace!(button, "Ignoring non-primary button press");
                return false;
            }
            PressKind::Touch if !self.touch_enabled => {
                trace!("Ignoring touch press, touch disabled");
                return false;
            }
            _ => {}
        }

        if self.pending.is_some() {
            return false;
        }

        let Some(weak) = self.target.clone() else {
            trace!("No scroll target bound, ignoring press");
            return false;
        };
        if weak.strong_count() == 0 {
            trace!("Scroll target dropped, ignoring press");
            return false;
        }

        let axis = self.direction.axis();
        let delta = self.direction.delta(self.step);
        let ticks = self.ticks.clone();
        let step = move || {
            if let Some(target) = weak.upgrade() {
                target.scroll_by(axis, delta);
                ticks.fetch_add(1, Ordering::AcqRel);
            }
        };

        self.pending = Some(TickHandle::spawn(&self.runtime, &self.strategy, step));
        debug!(
            direction = self.direction.label(),
            step = self.step,
            strategy = ?self.strategy.kind(),
            "Hold scroll started"
        );
        true
    }

    /// Press released
    pub fn on_press_end(&mut self) {
        self.stop();
    }

    /// Pointer left the trigger
    pub fn on_press_leave(&mut self) {
        self.stop();
    }

    /// Context menu (or long-press alternate) fired over the trigger.
    /// Always asks the host to suppress the menu, then stops.
    pub fn on_context_menu(&mut self) -> EventDisposition {
        self.stop();
        EventDisposition::PreventDefault
    }

    /// Stop scrolling; no tick runs after this returns. No-op when inactive.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
            debug!(direction = self.direction.label(), ticks = self.ticks(), "Hold scroll stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time;

    use super::*;
    use crate::axis::Axis;
    use crate::hold_scroll::{ScrollOffsets, VerticalDirection};

    const DOWN: ScrollDirection = ScrollDirection::Vertical(VerticalDirection::Down);
    const UP: ScrollDirection = ScrollDirection::Vertical(VerticalDirection::Up);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn interval_controller(direction: ScrollDirection, target: &Arc<ScrollOffsets>) -> HoldScrollController {
        let mut controller =
            HoldScrollController::new(direction, 2.0, TickStrategy::interval(ms(10))).unwrap();
        controller.bind_target(target);
        controller
    }

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_release_scrolls_nothing() {
        let target = Arc::new(ScrollOffsets::new());
        target.set_scroll_offset(Axis::Vertical, 100.0);
        let mut controller = interval_controller(DOWN, &target);

        assert!(controller.on_press_start(PressKind::primary()));
        controller.on_press_end();
        assert!(!controller.is_active());

        time::sleep(ms(100)).await;
        assert_eq!(target.top(), 100.0);
        assert_eq!(controller.ticks(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_rate_matches_hold_time() {
        for hold_ms in [25u64, 100, 253] {
            let target = Arc::new(ScrollOffsets::new());
            let mut controller = interval_controller(DOWN, &target);

            controller.on_press_start(PressKind::primary());
            time::sleep(ms(hold_ms)).await;
            controller.on_press_end();

            let expected = 2.0 * (hold_ms / 10) as f64;
            let delta = target.top();
            assert!(
                (delta - expected).abs() <= 2.0,
                "held {}ms: delta {} expected {}",
                hold_ms,
                delta,
                expected
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_up_scrolls_negative() {
        let target = Arc::new(ScrollOffsets::new());
        target.set_scroll_offset(Axis::Vertical, 100.0);
        let mut controller = interval_controller(UP, &target);

        controller.on_press_start(PressKind::Touch);
        time::sleep(ms(55)).await;
        controller.on_press_leave();

        let delta = target.top() - 100.0;
        assert!((delta - -10.0).abs() <= 2.0, "delta {}", delta);
    }

    #[tokio::test(start_paused = true)]
    async fn test_horizontal_leaves_vertical_alone() {
        let target = Arc::new(ScrollOffsets::new());
        let mut controller = interval_controller(
            ScrollDirection::Horizontal(crate::hold_scroll::HorizontalDirection::Right),
            &target,
        );

        controller.on_press_start(PressKind::primary());
        time::sleep(ms(50)).await;
        controller.stop();

        assert!(target.left() > 0.0);
        assert_eq!(target.top(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_context_menu_stops_for_good() {
        let target = Arc::new(ScrollOffsets::new());
        let mut controller = interval_controller(DOWN, &target);

        controller.on_press_start(PressKind::primary());
        time::sleep(ms(35)).await;

        assert_eq!(controller.on_context_menu(), EventDisposition::PreventDefault);
        assert!(!controller.is_active());
        let frozen = target.top();
        assert!(frozen > 0.0);

        // The physical button is still down; nothing else arrives
        time::sleep(ms(200)).await;
        assert_eq!(target.top(), frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_context_menu_while_idle_still_prevents_default() {
        let target = Arc::new(ScrollOffsets::new());
        let mut controller = interval_controller(DOWN, &target);
        assert_eq!(controller.on_context_menu(), EventDisposition::PreventDefault);
        assert!(!controller.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_primary_button_starts() {
        let target = Arc::new(ScrollOffsets::new());
        let mut controller = interval_controller(DOWN, &target);

        assert!(!controller.on_press_start(PressKind::Pointer { button: 2 }));
        assert!(!controller.on_press_start(PressKind::Pointer { button: 1 }));
        assert!(!controller.is_active());

        assert!(controller.on_press_start(PressKind::Touch));
        assert!(controller.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_touch_disabled_ignores_touch() {
        let target = Arc::new(ScrollOffsets::new());
        let mut controller = interval_controller(DOWN, &target).with_touch(false);
        assert!(!controller.on_press_start(PressKind::Touch));
        assert!(controller.on_press_start(PressKind::primary()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_is_noop() {
        let target = Arc::new(ScrollOffsets::new());
        let mut controller = interval_controller(DOWN, &target);

        assert!(controller.on_press_start(PressKind::primary()));
        assert!(!controller.on_press_start(PressKind::primary()));
        time::sleep(ms(55)).await;
        controller.on_press_end();

        // One loop, not two
        assert!((target.top() - 10.0).abs() <= 2.0, "top {}", target.top());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_while_inactive_is_noop() {
        let target = Arc::new(ScrollOffsets::new());
        let mut controller = interval_controller(DOWN, &target);
        controller.on_press_end();
        controller.on_press_leave();
        assert!(!controller.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_scrolling() {
        let target = Arc::new(ScrollOffsets::new());
        let mut controller = interval_controller(DOWN, &target);

        controller.on_press_start(PressKind::primary());
        time::sleep(ms(30)).await;
        drop(controller);
        let frozen = target.top();

        time::sleep(ms(100)).await;
        assert_eq!(target.top(), frozen);
    }

    /// Target whose reads take long enough for a stop to land mid-step
    #[derive(Default)]
    struct SlowTarget {
        top: std::sync::Mutex<f64>,
    }

    impl ScrollTarget for SlowTarget {
        fn scroll_offset(&self, _axis: Axis) -> f64 {
            std::thread::sleep(ms(50));
            *self.top.lock().unwrap()
        }

        fn set_scroll_offset(&self, _axis: Axis, value: f64) {
            *self.top.lock().unwrap() = value;
        }
    }

    impl SlowTarget {
        fn top(&self) -> f64 {
            *self.top.lock().unwrap()
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_context_menu_waits_for_step_in_progress() {
        let target = Arc::new(SlowTarget::default());
        let mut controller =
            HoldScrollController::new(DOWN, 2.0, TickStrategy::interval(ms(10))).unwrap();
        controller.bind_target(&target);

        assert!(controller.on_press_start(PressKind::primary()));
        // First tick is still reading when the menu fires
        time::sleep(ms(35)).await;
        assert_eq!(controller.on_context_menu(), EventDisposition::PreventDefault);
        let at_stop = target.top();

        time::sleep(ms(150)).await;
        assert_eq!(target.top(), at_stop);
        assert_eq!(controller.ticks() as f64 * 2.0, at_stop);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_or_dropped_target_is_silent() {
        let mut controller =
            HoldScrollController::new(DOWN, 2.0, TickStrategy::interval(ms(10))).unwrap();
        assert!(!controller.on_press_start(PressKind::primary()));

        let target = Arc::new(ScrollOffsets::new());
        controller.bind_target(&target);
        assert!(controller.on_press_start(PressKind::primary()));

        // Host tears the target down mid-hold
        drop(target);
        time::sleep(ms(50)).await;
        assert_eq!(controller.ticks(), 0);
        controller.on_press_end();

        assert!(!controller.on_press_start(PressKind::primary()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_frame_strategy_steps_once_per_frame() {
        let clock = FrameClock::new();
        let target = Arc::new(ScrollOffsets::new());
        let mut controller =
            HoldScrollController::new(DOWN, 2.0, TickStrategy::every_frame(clock.clone())).unwrap();
        controller.bind_target(&target);

        controller.on_press_start(PressKind::primary());
        // Nothing moves until the next frame
        assert_eq!(target.top(), 0.0);
        settle().await;
        assert_eq!(target.top(), 0.0);

        for _ in 0..4 {
            clock.pulse();
            settle().await;
        }
        assert_eq!(target.top(), 8.0);
        assert_eq!(controller.ticks(), 4);

        controller.on_press_end();
        clock.pulse();
        settle().await;
        assert_eq!(target.top(), 8.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_frame_strategy_immediate_release() {
        let clock = FrameClock::new();
        let target = Arc::new(ScrollOffsets::new());
        let mut controller =
            HoldScrollController::new(UP, 2.0, TickStrategy::every_frame(clock.clone())).unwrap();
        controller.bind_target(&target);
        target.set_scroll_offset(Axis::Vertical, 40.0);

        controller.on_press_start(PressKind::primary());
        controller.on_press_end();
        clock.pulse();
        settle().await;
        assert_eq!(target.top(), 40.0);
    }

    #[tokio::test]
    async fn test_from_config() {
        let config = ScrollConfig {
            strategy: StrategyKind::Frame,
            touch_enabled: false,
            ..Default::default()
        };
        let controller = HoldScrollController::from_config(&config, &FrameClock::new()).unwrap();
        assert_eq!(controller.strategy_kind(), StrategyKind::Frame);
        assert_eq!(controller.step(), 2.0);
        assert_eq!(controller.direction(), DOWN);

        let flipped = controller.with_direction(UP);
        assert_eq!(flipped.direction(), UP);
    }

    #[tokio::test]
    async fn test_rejects_invalid_configuration() {
        assert!(matches!(
            HoldScrollController::new(DOWN, 0.0, TickStrategy::default()),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            HoldScrollController::new(DOWN, f64::NAN, TickStrategy::default()),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            HoldScrollController::new(DOWN, 2.0, TickStrategy::interval(Duration::ZERO)),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_requires_runtime() {
        let result = HoldScrollController::new(DOWN, 2.0, TickStrategy::default());
        assert!(matches!(result, Err(Error::NoRuntime(_))));
    }
}
