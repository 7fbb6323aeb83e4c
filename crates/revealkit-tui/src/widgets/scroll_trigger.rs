use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use revealkit_core::hold_scroll::{HorizontalDirection, ScrollDirection, VerticalDirection};

use crate::app::ScrollTrigger;
use crate::theme::Theme;

pub struct ScrollTriggerWidget;

impl ScrollTriggerWidget {
    pub fn render(frame: &mut Frame, area: Rect, trigger: &ScrollTrigger, theme: &Theme) {
        let direction = trigger.controller.direction();
        let active = trigger.controller.is_active();

        let color = if active { theme.active } else { theme.grey1 };
        let mut label_style = Style::default().fg(color);
        if active {
            label_style = label_style.add_modifier(Modifier::BOLD);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        let line = Line::from(vec![
            Span::styled(arrow(direction), label_style),
            Span::styled(format!(" hold to scroll {}", direction.label()), label_style),
        ]);

        frame.render_widget(
            Paragraph::new(line).alignment(Alignment::Center).block(block),
            area,
        );
    }
}

fn arrow(direction: ScrollDirection) -> &'static str {
    match direction {
        ScrollDirection::Vertical(VerticalDirection::Up) => "▲",
        ScrollDirection::Vertical(VerticalDirection::Down) => "▼",
        ScrollDirection::Horizontal(HorizontalDirection::Left) => "◀",
        ScrollDirection::Horizontal(HorizontalDirection::Right) => "▶",
    }
}
