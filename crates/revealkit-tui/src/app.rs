use std::sync::Arc;
use std::time::Instant;

use crossterm::event::MouseEvent;
use ratatui::layout::{Position, Rect};
use revealkit_core::engine::{PropertyMap, TargetId, TweenEngine};
use revealkit_core::hold_scroll::{FrameClock, HoldScrollController, ScrollOffsets};
use revealkit_core::visibility::{EffectKind, VisibilityAnimator};
use revealkit_core::AppConfig;
use tracing::debug;

use crate::input::{translate_mouse, Action, PointerAction};
use crate::theme::Theme;

/// One animated wrapper shown in the right-hand column
pub struct RevealPanel {
    pub title: &'static str,
    pub animator: VisibilityAnimator,
    /// Engine handle of the panel's animated properties
    pub target: TargetId,
}

/// A press-and-hold button above or below the content pane
pub struct ScrollTrigger {
    pub controller: HoldScrollController,
    /// Last rendered area, used for hit testing
    pub area: Rect,
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub engine: TweenEngine,
    pub panels: Vec<RevealPanel>,
    pub triggers: Vec<ScrollTrigger>,
    /// Scroll offsets of the content pane, in pixels
    pub content: Arc<ScrollOffsets>,
    pub content_lines: Vec<String>,
    pub content_area: Rect,
    /// Pulsed once per drawn frame
    pub frame_clock: FrameClock,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl App {
    /// Build the demo. Must be called inside a tokio runtime.
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> revealkit_core::Result<Self> {
        let mut engine = TweenEngine::new();

        let mut panels = Vec::new();
        for (kind, title) in [
            (EffectKind::Fade, "fade"),
            (EffectKind::FadeSlide, "fade + slide"),
            (EffectKind::ScaleX, "scaleX"),
        ] {
            let mut animator = VisibilityAnimator::from_config(kind, &config.visibility)?;
            let target = engine.register_target(animator.effect().hidden());
            animator.bind_target(target, &mut engine);
            panels.push(RevealPanel {
                title,
                animator,
                target,
            });
        }

        let frame_clock = FrameClock::new();
        let content = Arc::new(ScrollOffsets::new());
        let forward = config.scroll.direction;

        let mut triggers = Vec::with_capacity(2);
        for direction in [forward.reversed(), forward] {
            let mut controller = HoldScrollController::from_config(&config.scroll, &frame_clock)?
                .with_direction(direction);
            controller.bind_target(&content);
            triggers.push(ScrollTrigger {
                controller,
                area: Rect::default(),
            });
        }

        Ok(Self {
            config,
            theme,
            engine,
            panels,
            triggers,
            content,
            content_lines: demo_lines(),
            content_area: Rect::default(),
            frame_clock,
            should_quit: false,
            status_message: None,
        })
    }

    /// Advance the tween engine and route finished tweens to their panels
    pub fn advance(&mut self, now: Instant) {
        let completed = self.engine.update(now);
        if completed.is_empty() {
            return;
        }
        for panel in &mut self.panels {
            panel.animator.on_tweens_complete(&completed);
        }
    }

    /// Check if the next frame should come at the animation rate
    pub fn is_animating(&self) -> bool {
        self.engine.is_animating() || self.triggers.iter().any(|t| t.controller.is_active())
    }

    /// Current engine values of a panel
    pub fn panel_values(&self, index: usize) -> Option<&PropertyMap> {
        let panel = self.panels.get(index)?;
        self.engine.values(panel.target)
    }

    /// Flip one panel's desired visibility
    pub fn toggle_panel(&mut self, index: usize) {
        self.advance(Instant::now());
        let Some(panel) = self.panels.get_mut(index) else {
            return;
        };
        let visible = !panel.animator.desired();
        panel.animator.observe(visible, &mut self.engine);
        self.status_message = Some(format!(
            "{} -> {}",
            panel.title,
            if visible { "show" } else { "hide" }
        ));
    }

    /// Show everything unless everything is already shown
    pub fn toggle_all(&mut self) {
        self.advance(Instant::now());
        let visible = !self.panels.iter().all(|p| p.animator.desired());
        for panel in &mut self.panels {
            panel.animator.observe(visible, &mut self.engine);
        }
        self.status_message = Some(format!("all -> {}", if visible { "show" } else { "hide" }));
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleFade => self.toggle_panel(0),
            Action::ToggleSlide => self.toggle_panel(1),
            Action::ToggleScale => self.toggle_panel(2),
            Action::ToggleAll => self.toggle_all(),
            Action::None => {}
        }
    }

    /// Route a mouse event to the scroll triggers
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        let Some(pointer) = translate_mouse(event.kind) else {
            return;
        };
        let position = Position::new(event.column, event.row);

        for trigger in &mut self.triggers {
            let inside = trigger.area.contains(position);
            match pointer {
                PointerAction::Press(kind) if inside => {
                    trigger.controller.on_press_start(kind);
                }
                PointerAction::ContextMenu if inside => {
                    let disposition = trigger.controller.on_context_menu();
                    debug!(?disposition, "Context menu over scroll trigger");
                }
                PointerAction::Release => trigger.controller.on_press_end(),
                PointerAction::Move if !inside => trigger.controller.on_press_leave(),
                _ => {}
            }
        }
    }

    /// Record the content pane's area and resize its scroll extent
    pub fn set_content_area(&mut self, area: Rect) {
        self.content_area = area;

        let cell_px = self.config.ui.cell_px;
        let inner_height = area.height.saturating_sub(2) as usize;
        let inner_width = area.width.saturating_sub(2) as usize;
        let widest = self
            .content_lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);

        let max_top = self.content_lines.len().saturating_sub(inner_height) as f64 * cell_px;
        let max_left = widest.saturating_sub(inner_width) as f64 * cell_px;
        self.content.set_extent(max_left, max_top);
    }

    /// Content scroll position in terminal cells, as `(rows, columns)`
    pub fn content_scroll(&self) -> (u16, u16) {
        let cell_px = self.config.ui.cell_px;
        let rows = (self.content.top() / cell_px).floor();
        let cols = (self.content.left() / cell_px).floor();
        (rows.min(u16::MAX as f64) as u16, cols.min(u16::MAX as f64) as u16)
    }

    /// Call after every draw so frame-driven holds step once per frame
    pub fn on_frame_presented(&self) {
        self.frame_clock.pulse();
    }
}

fn demo_lines() -> Vec<String> {
    (1..=200)
        .map(|i| format!("{:>3}  hold a trigger to scroll this pane", i))
        .collect()
}
