//! Transient notification in the top-right corner.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::action::{Notification, NotificationLevel};
use crate::theme;

const MAX_WIDTH: u16 = 48;

pub fn render(frame: &mut Frame, area: Rect, notification: &Notification) {
    let text_width = u16::try_from(notification.message.chars().count()).unwrap_or(u16::MAX);
    let width = text_width.saturating_add(4).min(MAX_WIDTH).min(area.width);
    let lines = text_width / MAX_WIDTH.saturating_sub(4).max(1) + 1;
    let height = lines.saturating_add(2).min(area.height);

    let rect = Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + 1,
        width,
        height,
    );

    let title = match notification.level {
        NotificationLevel::Info => " info ",
        NotificationLevel::Success => " done ",
        NotificationLevel::Error => " error ",
    };
    let style = theme::notification(notification.level);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style);

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(Span::styled(notification.message.as_str(), style))
            .wrap(Wrap { trim: true })
            .block(block),
        rect,
    );
}
