use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use revealkit_core::config::UiConfig;

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    /// Faster poll timeout used while something is animating
    animation_tick: Duration,
}

impl EventHandler {
    /// Create a handler that polls at the configured animation FPS while animating
    pub fn from_config(ui: &UiConfig) -> Self {
        Self {
            tick_rate: Duration::from_millis(ui.tick_rate_ms),
            animation_tick: ui.animation_tick_duration(),
        }
    }

    /// Poll for the next event at the idle tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll for the next event at the animation frame rate
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_tick)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    // (crossterm 0.27+ sends release events on some systems)
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse button, motion or wheel
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_uses_clamped_frame_period() {
        let ui = UiConfig {
            tick_rate_ms: 250,
            animation_fps: 5000,
            ..UiConfig::default()
        };

        let handler = EventHandler::from_config(&ui);
        assert_eq!(handler.tick_rate, Duration::from_millis(250));
        assert_eq!(handler.animation_tick, Duration::from_millis(1));
    }
}
