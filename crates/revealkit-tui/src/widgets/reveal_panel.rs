use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use revealkit_core::engine::{Property, PropertyMap};
use revealkit_core::visibility::{TransformOrigin, TransitionKind};

use crate::app::RevealPanel;
use crate::theme::{blend, Theme};

pub struct RevealPanelWidget;

impl RevealPanelWidget {
    pub fn render(
        frame: &mut Frame,
        slot: Rect,
        panel: &RevealPanel,
        values: Option<&PropertyMap>,
        theme: &Theme,
        cell_px: f64,
    ) {
        let outline = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.bg2))
            .title(Span::styled(
                format!(" {} ", panel.title),
                Style::default().fg(theme.grey1),
            ));
        let inner = outline.inner(slot);
        frame.render_widget(outline, slot);

        if !panel.animator.is_mounted() {
            return;
        }
        let Some(values) = values else {
            return;
        };
        let Some(area) = panel_rect(inner, values, panel.animator.effect().transform_origin(), cell_px)
        else {
            return;
        };

        let opacity = values.get(Property::Opacity).unwrap_or(1.0);
        let accent = blend(theme.aqua, theme.bg0, opacity);
        let text = blend(theme.fg0, theme.bg0, opacity);
        let dim = blend(theme.grey2, theme.bg0, opacity);

        let phase = match panel.animator.transition_kind() {
            TransitionKind::Entering => "entering",
            TransitionKind::Exiting => "exiting",
            TransitionKind::None => "visible",
        };

        let mut lines = vec![Line::from(Span::styled(
            phase,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))];
        for (property, value) in values.iter() {
            lines.push(Line::from(Span::styled(
                format!("{:<8}{:>8.2}", property.name(), value),
                Style::default().fg(dim),
            )));
        }
        lines.push(Line::from(Span::styled(
            format!("mount #{}", panel.animator.epoch()),
            Style::default().fg(text),
        )));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(theme.bg1));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Where the animated box lands inside `slot`
///
/// `scaleX` shrinks the width around the transform origin, `x`/`y` shift the
/// box by `offset / cell_px` cells. The result is clipped to the slot;
/// `None` when nothing is left to draw.
pub fn panel_rect(
    slot: Rect,
    values: &PropertyMap,
    origin: Option<TransformOrigin>,
    cell_px: f64,
) -> Option<Rect> {
    let scale = values.get(Property::ScaleX).unwrap_or(1.0).clamp(0.0, 1.0);
    let width = (slot.width as f64 * scale).round() as u16;
    if width == 0 || slot.height == 0 {
        return None;
    }

    let fraction = origin.unwrap_or_default().fraction();
    let spare = slot.width.saturating_sub(width) as f64;
    let dx = values.get(Property::X).unwrap_or(0.0) / cell_px;
    let dy = values.get(Property::Y).unwrap_or(0.0) / cell_px;

    let x = (slot.x as f64 + spare * fraction + dx).round() as i32;
    let y = (slot.y as f64 + dy).round() as i32;

    let left = x.max(slot.x as i32);
    let top = y.max(slot.y as i32);
    // Offsets far outside the slot saturate to i32 bounds
    let right = x.saturating_add(width as i32).min(slot.right() as i32);
    let bottom = y.saturating_add(slot.height as i32).min(slot.bottom() as i32);
    if right <= left || bottom <= top {
        return None;
    }

    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}
