use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::info;

use revealkit_core::AppConfig;
use revealkit_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    theme::Theme,
    widgets::{ContentWidget, RevealPanelWidget, ScrollTriggerWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    // Build app state before touching the terminal so config errors print normally
    let mut app = App::new(config.clone(), Theme::default())?;
    info!(
        strategy = ?config.scroll.strategy,
        step = config.scroll.step,
        "Starting interactive demo"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("revealkit"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = main_loop(&mut terminal, &mut app, &keymap);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    keymap: &Keymap,
) -> Result<()> {
    // Create event handler with animation FPS support
    let event_handler = EventHandler::from_config(&app.config.ui);

    loop {
        // Advance tweens and settle finished transitions
        app.advance(Instant::now());

        // Draw UI
        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: content + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            // Scroll column on the left, reveal panels on the right
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
                .split(main_layout[0]);

            let scroll_column = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Backward trigger
                    Constraint::Min(3),    // Content
                    Constraint::Length(3), // Forward trigger
                ])
                .split(columns[0]);

            let panel_slots = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                ])
                .split(columns[1]);

            // Record hit areas before rendering
            app.triggers[0].area = scroll_column[0];
            app.triggers[1].area = scroll_column[2];
            if app.content_area != scroll_column[1] {
                app.set_content_area(scroll_column[1]);
            }

            ScrollTriggerWidget::render(frame, scroll_column[0], &app.triggers[0], &app.theme);
            ContentWidget::render(frame, scroll_column[1], app);
            ScrollTriggerWidget::render(frame, scroll_column[2], &app.triggers[1], &app.theme);

            for (index, slot) in panel_slots.iter().enumerate() {
                RevealPanelWidget::render(
                    frame,
                    *slot,
                    &app.panels[index],
                    app.panel_values(index),
                    &app.theme,
                    app.config.ui.cell_px,
                );
            }

            StatusBarWidget::render(frame, main_layout[1], app);
        })?;

        // Frame presented: let frame-driven holds take their step
        app.on_frame_presented();

        // Handle events (use faster tick rate during animations or held triggers)
        let event = if app.is_animating() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, keymap);
                    app.status_message = None;
                    app.handle_action(action);
                }
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
                AppEvent::Resize(_, _) => {
                    // Extent is recomputed on the next draw
                }
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
