//! Tick scheduling for hold scrolling
//!
//! A [`TickHandle`] is the only thing that keeps a tick loop alive. It is
//! acquired when a hold starts and cancels the loop when stopped or dropped,
//! so no tick can outlive the controller that owns it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::config::StrategyKind;

/// Display-refresh signal shared between a host's render loop and
/// frame-driven controllers
///
/// The host calls [`FrameClock::pulse`] once per rendered frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    tx: Arc<watch::Sender<u64>>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// Signal that a frame was presented
    pub fn pulse(&self) {
        self.tx.send_modify(|frame| *frame = frame.wrapping_add(1));
    }

    /// Number of frames pulsed so far
    pub fn frame(&self) -> u64 {
        *self.tx.borrow()
    }

    /// Check if any frame-driven loop is waiting on the next pulse
    pub fn has_waiters(&self) -> bool {
        self.tx.receiver_count() > 0
    }

    /// Receiver that wakes on the next pulse (the current frame counts as seen)
    pub(crate) fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

/// How a held press turns into ticks
#[derive(Debug, Clone)]
pub enum TickStrategy {
    /// One tick every `period` of wall-clock time
    Interval { period: Duration },
    /// One tick per pulse of `clock`
    Frame { clock: FrameClock },
}

impl TickStrategy {
    /// Default interval period
    pub const DEFAULT_PERIOD: Duration = Duration::from_millis(10);

    pub fn interval(period: Duration) -> Self {
        TickStrategy::Interval { period }
    }

    pub fn every_frame(clock: FrameClock) -> Self {
        TickStrategy::Frame { clock }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            TickStrategy::Interval { .. } => StrategyKind::Interval,
            TickStrategy::Frame { .. } => StrategyKind::Frame,
        }
    }
}

impl Default for TickStrategy {
    fn default() -> Self {
        TickStrategy::interval(Self::DEFAULT_PERIOD)
    }
}

/// Scoped scheduler resource for one active hold
///
/// Cancellation is synchronous: once `cancel` or `drop` returns, the loop
/// never calls its step again. Each step runs under the `active` lock, so
/// clearing the flag waits for a step already in progress on another worker.
#[derive(Debug)]
pub struct TickHandle {
    active: Arc<Mutex<bool>>,
    task: JoinHandle<()>,
}

impl TickHandle {
    /// Start a tick loop on `runtime` calling `step` once per tick
    pub fn spawn<F>(runtime: &Handle, strategy: &TickStrategy, step: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let active = Arc::new(Mutex::new(true));

        let task = match strategy {
            TickStrategy::Interval { period } => {
                runtime.spawn(run_interval(*period, active.clone(), step))
            }
            TickStrategy::Frame { clock } => {
                // Subscribe now so only pulses after the start count
                runtime.spawn(run_frames(clock.subscribe(), active.clone(), step))
            }
        };

        Self { active, task }
    }

    /// Check if the loop may still tick
    pub fn is_active(&self) -> bool {
        *lock(&self.active)
    }

    /// Stop the loop
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        *lock(&self.active) = false;
        self.task.abort();
    }
}

// A step that panicked leaves the flag itself intact
fn lock(active: &Mutex<bool>) -> MutexGuard<'_, bool> {
    active.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run one step unless cancelled; false once the loop should end
fn step_if_active<F>(active: &Mutex<bool>, step: &mut F) -> bool
where
    F: FnMut(),
{
    let guard = lock(active);
    if !*guard {
        return false;
    }
    step();
    true
}

async fn run_interval<F>(period: Duration, active: Arc<Mutex<bool>>, mut step: F)
where
    F: FnMut(),
{
    // First tick one period after start, like a repeating timer
    let mut interval = time::interval_at(time::Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        if !step_if_active(&active, &mut step) {
            break;
        }
    }
}

async fn run_frames<F>(mut frames: watch::Receiver<u64>, active: Arc<Mutex<bool>>, mut step: F)
where
    F: FnMut(),
{
    // Clock dropped ends the chain
    while frames.changed().await.is_ok() {
        if !step_if_active(&active, &mut step) {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn counter() -> (Arc<AtomicU32>, impl FnMut() + Send + 'static) {
        let count = Arc::new(AtomicU32::new(0));
        let inner = count.clone();
        (count, move || {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    /// Let spawned tasks run without moving past any pending timer
    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_first_tick_after_one_period() {
        let (count, step) = counter();
        let handle = TickHandle::spawn(&Handle::current(), &TickStrategy::default(), step);

        time::sleep(Duration::from_millis(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        handle.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_interval_ticks() {
        let (count, step) = counter();
        let handle = TickHandle::spawn(&Handle::current(), &TickStrategy::default(), step);

        time::sleep(Duration::from_millis(35)).await;
        drop(handle);
        let seen = count.load(Ordering::SeqCst);

        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), seen);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_cancel_waits_for_running_step() {
        let count = Arc::new(AtomicU32::new(0));
        let inner = count.clone();
        let slow_step = move || {
            inner.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            inner.fetch_add(1, Ordering::SeqCst);
        };
        let handle = TickHandle::spawn(&Handle::current(), &TickStrategy::default(), slow_step);

        // Lands while a step is sleeping on the other worker
        time::sleep(Duration::from_millis(15)).await;
        handle.cancel();
        let seen = count.load(Ordering::SeqCst);
        assert_eq!(seen % 2, 0, "cancel returned mid-step");

        time::sleep(Duration::from_millis(60)).await;
        assert_eq!(count.load(Ordering::SeqCst), seen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_frame_ticks_once_per_pulse() {
        let clock = FrameClock::new();
        let (count, step) = counter();
        let handle = TickHandle::spawn(&Handle::current(), &TickStrategy::every_frame(clock.clone()), step);

        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(clock.has_waiters());

        for _ in 0..3 {
            clock.pulse();
            settle().await;
        }
        assert_eq!(count.load(Ordering::SeqCst), 3);

        handle.cancel();
        clock.pulse();
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_frame_clock_counts_pulses() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert!(!clock.has_waiters());
        clock.pulse();
        clock.pulse();
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_strategy_kind() {
        assert_eq!(TickStrategy::default().kind(), StrategyKind::Interval);
        assert_eq!(
            TickStrategy::every_frame(FrameClock::new()).kind(),
            StrategyKind::Frame
        );
    }
}
