//! Overview screen: collection summary and last load status.

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use prodboard_core::PriceSummary;

use crate::action::{Action, LoadOutcome};
use crate::component::Component;
use crate::theme;

pub struct OverviewScreen {
    focused: bool,
    summary: PriceSummary,
    last_load: Option<LoadOutcome>,
}

impl OverviewScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            summary: PriceSummary::default(),
            last_load: None,
        }
    }

    fn stat_line<'a>(label: &'a str, value: String) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("  {label:<16}"), Style::default().fg(theme::TEXT)),
            Span::styled(value, Style::default().fg(theme::PRICE_CORAL)),
        ])
    }

    fn load_line(&self) -> Line<'_> {
        let label = Span::styled(
            format!("  {:<16}", "Last load"),
            Style::default().fg(theme::TEXT),
        );
        let value = match &self.last_load {
            None => Span::styled("pending", Style::default().fg(theme::WARN_YELLOW)),
            Some(Ok(count)) => Span::styled(
                format!("ok ({count} products)"),
                Style::default().fg(theme::OK_GREEN),
            ),
            Some(Err(message)) => Span::styled(format!("failed: {message}"), theme::error_text()),
        };
        Line::from(vec![label, value])
    }
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "─".into(), |v| v.to_string())
}

impl Component for OverviewScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ProductsUpdated(items) => {
                self.summary = PriceSummary::from_products(items);
            }
            Action::LoadFinished(outcome) => {
                self.last_load = Some(outcome.clone());
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Overview ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let s = &self.summary;
        let lines = vec![
            Line::from(""),
            Self::stat_line("Products", s.count.to_string()),
            Self::stat_line("Total value", s.total.to_string()),
            Self::stat_line("Cheapest", or_dash(s.min)),
            Self::stat_line("Most expensive", or_dash(s.max)),
            Self::stat_line("Average price", or_dash(s.average.map(|a| format!("{a:.2}")))),
            Line::from(""),
            self.load_line(),
        ];

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        frame.render_widget(Paragraph::new(lines), layout[0]);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("  r ", theme::key_hint_key()),
                Span::styled("reload from the Products screen", theme::key_hint()),
            ])),
            layout[1],
        );
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Overview"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use prodboard_core::{Product, ProductId};

    use super::*;

    fn product(id: i64, price: i64) -> Arc<Product> {
        Arc::new(Product {
            id: ProductId::Number(id),
            name: format!("p{id}"),
            price,
            description: String::new(),
        })
    }

    #[test]
    fn summary_tracks_latest_snapshot() {
        let mut screen = OverviewScreen::new();
        let items = Arc::new(vec![product(1, 10), product(2, 30)]);
        screen.update(&Action::ProductsUpdated(items)).unwrap();

        assert_eq!(screen.summary.count, 2);
        assert_eq!(screen.summary.total, 40);
        assert_eq!(screen.summary.min, Some(10));
        assert_eq!(screen.summary.max, Some(30));
    }

    #[test]
    fn remembers_last_load_outcome() {
        let mut screen = OverviewScreen::new();
        assert_eq!(screen.last_load, None);
        screen
            .update(&Action::LoadFinished(Err("db offline".into())))
            .unwrap();
        assert_eq!(screen.last_load, Some(Err("db offline".into())));
    }
}
