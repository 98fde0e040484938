//! Create / Update / Delete modal.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use prodboard_core::{ActiveModal, ModalTarget, ProductDraft};

use crate::theme;
use crate::widgets::centered_rect;

/// Form fields in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Name,
    Price,
    Description,
}

impl Field {
    const ALL: [Field; 3] = [Self::Name, Self::Price, Self::Description];

    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Price,
            Self::Price => Self::Description,
            Self::Description => Self::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Name => Self::Description,
            Self::Price => Self::Name,
            Self::Description => Self::Price,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Price => "Price",
            Self::Description => "Description",
        }
    }

    pub fn value(self, draft: &ProductDraft) -> &str {
        match self {
            Self::Name => &draft.name,
            Self::Price => &draft.price,
            Self::Description => &draft.description,
        }
    }

    pub fn value_mut(self, draft: &mut ProductDraft) -> &mut String {
        match self {
            Self::Name => &mut draft.name,
            Self::Price => &mut draft.price,
            Self::Description => &mut draft.description,
        }
    }
}

pub fn render(frame: &mut Frame, area: Rect, modal: &ActiveModal, focus: Field) {
    match &modal.target {
        ModalTarget::Create => render_form(frame, area, " Create Product ", modal, focus),
        ModalTarget::Update(id) => {
            render_form(frame, area, &format!(" Update Product {id} "), modal, focus);
        }
        ModalTarget::Delete(id) => render_delete(frame, area, &id.to_string(), modal),
    }
}

fn modal_block(title: &str, danger: bool) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if danger {
            theme::error_text()
        } else {
            theme::border_focused()
        })
        .style(Style::default().bg(theme::BG_PANEL))
}

fn status_line(modal: &ActiveModal) -> Line<'_> {
    if modal.is_submitting() {
        Line::from(Span::styled(
            "Submitting…",
            Style::default().fg(theme::WARN_YELLOW),
        ))
    } else if let Some(ref err) = modal.error {
        Line::from(Span::styled(err.as_str(), theme::error_text()))
    } else {
        Line::from("")
    }
}

fn render_form(frame: &mut Frame, area: Rect, title: &str, modal: &ActiveModal, focus: Field) {
    let rect = centered_rect(area, 60, 13);
    frame.render_widget(Clear, rect);

    let block = modal_block(title, false);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1), // name
        Constraint::Length(1),
        Constraint::Length(1), // price
        Constraint::Length(1),
        Constraint::Length(1), // description
        Constraint::Length(1),
        Constraint::Min(1),    // status / error
        Constraint::Length(1), // hints
    ])
    .split(inner);

    for (field, row) in Field::ALL.into_iter().zip([rows[1], rows[3], rows[5]]) {
        let active = field == focus && !modal.is_submitting();
        let cursor = if active { "▏" } else { "" };
        let style = if active {
            theme::field_active()
        } else {
            theme::field_inactive()
        };
        let line = Line::from(vec![
            Span::styled(
                format!("  {:<12} ", field.label()),
                Style::default()
                    .fg(theme::TEXT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{}{cursor}", field.value(&modal.draft)), style),
        ]);
        frame.render_widget(Paragraph::new(line), row);
    }

    frame.render_widget(
        Paragraph::new(status_line(modal))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rows[7],
    );

    let hints = Line::from(vec![
        Span::styled("Tab ", theme::key_hint_key()),
        Span::styled("next field  ", theme::key_hint()),
        Span::styled("Enter ", theme::key_hint_key()),
        Span::styled("save  ", theme::key_hint()),
        Span::styled("Esc ", theme::key_hint_key()),
        Span::styled("cancel", theme::key_hint()),
    ]);
    frame.render_widget(
        Paragraph::new(hints).alignment(Alignment::Center),
        rows[8],
    );
}

fn render_delete(frame: &mut Frame, area: Rect, id: &str, modal: &ActiveModal) {
    let rect = centered_rect(area, 56, 9);
    frame.render_widget(Clear, rect);

    let block = modal_block(" Delete Product ", true);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Are you sure? Product {id} will be deleted."),
            Style::default().fg(theme::TEXT),
        )),
        Line::from(Span::styled(
            "This action cannot be undone.",
            Style::default().fg(theme::TEXT),
        )),
        Line::from(""),
        status_line(modal),
        Line::from(vec![
            Span::styled("y ", theme::key_hint_key()),
            Span::styled("delete  ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_cycle_in_both_directions() {
        assert_eq!(Field::Name.next(), Field::Price);
        assert_eq!(Field::Description.next(), Field::Name);
        assert_eq!(Field::Name.prev(), Field::Description);
    }

    #[test]
    fn value_mut_targets_the_field() {
        let mut draft = ProductDraft::default();
        Field::Price.value_mut(&mut draft).push_str("42");
        assert_eq!(draft.price, "42");
        assert_eq!(Field::Price.value(&draft), "42");
    }
}
