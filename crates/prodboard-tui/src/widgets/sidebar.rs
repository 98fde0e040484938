//! Left navigation panel.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::screen::ScreenId;
use crate::theme;

pub const WIDTH: u16 = 22;

pub fn render(frame: &mut Frame, area: Rect, active: ScreenId) {
    let block = Block::default()
        .title(" Admin Dashboard ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_default());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from("")];
    for id in ScreenId::ALL {
        let (marker, style) = if id == active {
            ("▸", theme::sidebar_active())
        } else {
            (" ", theme::sidebar_inactive())
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} "), style),
            Span::styled(format!("{} ", id.number()), theme::key_hint_key()),
            Span::styled(format!("{:<12}", id.label()), style),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
