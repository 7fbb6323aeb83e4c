use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use revealkit_core::visibility::Phase;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let phases: Vec<String> = app
                .panels
                .iter()
                .map(|p| format!("{}:{}", p.title, phase_label(p.animator.phase())))
                .collect();
            let (rows, cols) = app.content_scroll();
            format!(
                " {} | scroll {},{} ({:?})",
                phases.join(" "),
                rows,
                cols,
                app.config.scroll.strategy
            )
        };

        let keys = &app.config.keymap;
        let help_hint = format!(
            " {}:fade {}:slide {}:scale {}:all {}:quit ",
            keys.toggle_fade, keys.toggle_slide, keys.toggle_scale, keys.toggle_all, keys.quit
        );
        let used = status_text.chars().count() + help_hint.chars().count();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Unmounted => "off",
        Phase::Entering { .. } => "in",
        Phase::Visible => "on",
        Phase::Exiting { .. } => "out",
    }
}
