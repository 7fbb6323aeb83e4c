use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

pub struct ContentWidget;

impl ContentWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let lines: Vec<Line> = app
            .content_lines
            .iter()
            .map(|l| Line::from(Span::styled(l.as_str(), Style::default().fg(theme.fg0))))
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.bg2))
            .title(Span::styled(" content ", Style::default().fg(theme.grey2)));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(theme.bg0))
            .scroll(app.content_scroll());
        frame.render_widget(paragraph, area);
    }
}
