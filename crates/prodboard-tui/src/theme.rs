//! Palette and semantic styles for the admin panel.

use ratatui::style::{Color, Modifier, Style};

use crate::action::NotificationLevel;

// ── Palette ───────────────────────────────────────────────────────────

pub const ACCENT: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const HEADER_CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const PRICE_CORAL: Color = Color::Rgb(255, 106, 193); // #ff6ac1
pub const WARN_YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const OK_GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const DANGER_RED: Color = Color::Rgb(255, 99, 99); // #ff6363

pub const TEXT: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const MUTED: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_PANEL: Color = Color::Rgb(30, 31, 41); // #1e1f29

// ── Semantic Styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(HEADER_CYAN).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(ACCENT)
}

pub fn border_default() -> Style {
    Style::default().fg(MUTED)
}

/// Sortable column header; the active one is underlined.
pub fn table_header(active: bool) -> Style {
    let style = Style::default().fg(HEADER_CYAN).add_modifier(Modifier::BOLD);
    if active {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}

pub fn table_row() -> Style {
    Style::default().fg(TEXT)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(ACCENT)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn sidebar_active() -> Style {
    Style::default()
        .fg(ACCENT)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn sidebar_inactive() -> Style {
    Style::default().fg(TEXT)
}

/// Focused form field.
pub fn field_active() -> Style {
    Style::default().fg(HEADER_CYAN).bg(BG_HIGHLIGHT)
}

pub fn field_inactive() -> Style {
    Style::default().fg(TEXT)
}

pub fn error_text() -> Style {
    Style::default().fg(DANGER_RED)
}

pub fn key_hint() -> Style {
    Style::default().fg(MUTED)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(HEADER_CYAN).add_modifier(Modifier::BOLD)
}

pub fn notification(level: NotificationLevel) -> Style {
    let fg = match level {
        NotificationLevel::Info => HEADER_CYAN,
        NotificationLevel::Success => OK_GREEN,
        NotificationLevel::Error => DANGER_RED,
    };
    Style::default().fg(fg).bg(BG_PANEL).add_modifier(Modifier::BOLD)
}
