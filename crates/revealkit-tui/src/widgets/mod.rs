mod content;
mod reveal_panel;
mod scroll_trigger;
mod status_bar;

pub use content::ContentWidget;
pub use reveal_panel::{panel_rect, RevealPanelWidget};
pub use scroll_trigger::ScrollTriggerWidget;
pub use status_bar::StatusBarWidget;
