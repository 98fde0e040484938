//! Products screen: sortable, searchable, paged table with CRUD modals.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use tracing::debug;

use prodboard_core::{
    CommandResult, ModalTarget, PageView, Product, Session, SortKey, SortState,
};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::product_form::{self, Field};

pub struct ProductsScreen {
    focused: bool,
    session: Session,
    products: Arc<Vec<Arc<Product>>>,
    /// Row within the current page.
    selected: usize,
    search_active: bool,
    field: Field,
}

impl ProductsScreen {
    pub fn new(page_size: usize) -> Self {
        Self {
            focused: false,
            session: Session::new(page_size),
            products: Arc::new(Vec::new()),
            selected: 0,
            search_active: false,
            field: Field::default(),
        }
    }

    fn view(&self) -> PageView {
        self.session.view(&self.products)
    }

    fn selected_product(&self) -> Option<Arc<Product>> {
        self.view().items.get(self.selected).cloned()
    }

    /// Keep the page and the selected row inside the current view.
    fn clamp(&mut self) {
        let page_count = self.view().page_count;
        self.session.clamp_page(page_count);
        let rows = self.view().items.len();
        self.selected = self.selected.min(rows.saturating_sub(1));
    }

    fn move_selection(&mut self, down: bool) {
        let rows = self.view().items.len();
        if rows == 0 {
            return;
        }
        self.selected = if down {
            (self.selected + 1).min(rows - 1)
        } else {
            self.selected.saturating_sub(1)
        };
    }

    fn sort_by(&mut self, key: SortKey) {
        self.session.request_sort(key);
        self.selected = 0;
    }

    fn edit_search(&mut self, edit: impl FnOnce(&mut String)) {
        let mut text = self.session.search().to_owned();
        edit(&mut text);
        self.session.set_search(text);
        self.selected = 0;
    }

    // ── Key handling per mode ────────────────────────────────────────

    fn handle_modal_key(&mut self, key: KeyEvent, target: &ModalTarget) -> Option<Action> {
        if matches!(target, ModalTarget::Delete(_)) {
            return match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                    self.session.begin_submit().map(Action::Submit)
                }
                KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                    self.session.close_modal();
                    None
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Esc => self.session.close_modal(),
            KeyCode::Enter => return self.session.begin_submit().map(Action::Submit),
            KeyCode::Tab | KeyCode::Down => self.field = self.field.next(),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.prev(),
            KeyCode::Backspace => {
                let field = self.field;
                if let Some(draft) = self.session.draft_mut() {
                    field.value_mut(draft).pop();
                }
            }
            KeyCode::Char(c) => {
                let field = self.field;
                if let Some(draft) = self.session.draft_mut() {
                    field.value_mut(draft).push(c);
                }
            }
            _ => {}
        }
        None
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.search_active = false,
            KeyCode::Esc => {
                self.search_active = false;
                self.edit_search(String::clear);
            }
            KeyCode::Backspace => self.edit_search(|s| {
                s.pop();
            }),
            KeyCode::Char(c) => self.edit_search(|s| s.push(c)),
            _ => {}
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('i') => self.sort_by(SortKey::Id),
            KeyCode::Char('n') => self.sort_by(SortKey::Name),
            KeyCode::Char('p') => self.sort_by(SortKey::Price),
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(true),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(false),
            KeyCode::Char('l') | KeyCode::Right => {
                let page_count = self.view().page_count;
                self.session.next_page(page_count);
                self.selected = 0;
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.session.prev_page();
                self.selected = 0;
            }
            KeyCode::Char('/') => self.search_active = true,
            KeyCode::Char('c') => {
                self.field = Field::default();
                self.session.open_create();
            }
            KeyCode::Char('e') => {
                if let Some(product) = self.selected_product() {
                    self.field = Field::default();
                    self.session.open_update(&product);
                }
            }
            KeyCode::Char('d') => {
                if let Some(product) = self.selected_product() {
                    self.session.open_delete(product.id.clone());
                }
            }
            KeyCode::Char('r') => return Some(Action::Reload),
            KeyCode::Char('x') => {
                self.session.reset();
                self.selected = 0;
            }
            _ => {}
        }
        None
    }

    /// Settle a finished write. Returns the toast to show, if any.
    ///
    /// A result for a modal the user already dismissed leaves the modal
    /// alone, but a create or update failure still gets its toast.
    fn finish_submission(
        &mut self,
        ticket: u64,
        verb: &str,
        outcome: &Result<CommandResult, prodboard_core::CoreError>,
    ) -> Option<Action> {
        let target = self.session.modal().map(|m| m.target.clone());
        if !self.session.finish_submit(ticket, outcome) {
            debug!(ticket, verb, "result for a dismissed modal");
            return match outcome {
                Err(e) if verb != "delete" => {
                    Some(Action::Notify(Notification::error(e.to_string())))
                }
                _ => None,
            };
        }

        match (target, outcome) {
            (_, Ok(CommandResult::Created(p))) => Some(Action::Notify(Notification::success(
                format!("Created {}", p.name),
            ))),
            (_, Ok(CommandResult::Updated(p))) => Some(Action::Notify(Notification::success(
                format!("Updated {}", p.name),
            ))),
            (_, Ok(CommandResult::Deleted { id, .. })) => Some(Action::Notify(
                Notification::success(format!("Deleted product {id}")),
            )),
            // Delete failures are only logged (by the controller).
            (Some(ModalTarget::Delete(_)), Err(_)) => {
                self.session.close_modal();
                None
            }
            (_, Err(e)) => Some(Action::Notify(Notification::error(e.to_string()))),
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn header_cell(label: &str, key: SortKey, sort: SortState) -> Cell<'static> {
        let active = sort.key == key;
        let text = if active {
            format!("{label} {}", sort.direction.arrow())
        } else {
            label.to_owned()
        };
        Cell::from(text).style(theme::table_header(active))
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, view: &PageView) {
        let sort = self.session.sort();
        let header = Row::new(vec![
            Self::header_cell("ID", SortKey::Id, sort),
            Self::header_cell("Name", SortKey::Name, sort),
            Self::header_cell("Price", SortKey::Price, sort),
            Cell::from("Description").style(theme::table_header(false)),
        ]);

        let rows: Vec<Row> = view
            .items
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let is_selected = i == self.selected;
                let prefix = if is_selected { "▸" } else { " " };
                Row::new(vec![
                    Cell::from(format!("{prefix}{}", p.id)),
                    Cell::from(p.name.clone()).style(
                        Style::default()
                            .fg(theme::HEADER_CYAN)
                            .add_modifier(if is_selected {
                                Modifier::BOLD
                            } else {
                                Modifier::empty()
                            }),
                    ),
                    Cell::from(p.price.to_string())
                        .style(Style::default().fg(theme::PRICE_CORAL)),
                    Cell::from(p.description.clone()),
                ])
                .style(theme::table_row())
            })
            .collect();

        let widths = [
            Constraint::Length(8),
            Constraint::Min(16),
            Constraint::Length(10),
            Constraint::Percentage(45),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = TableState::default();
        if !view.items.is_empty() {
            state.select(Some(self.selected));
        }
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_footer(frame: &mut Frame, area: Rect, view: &PageView) {
        let pages = view.page_count.max(1);
        let mut spans = vec![Span::styled(
            format!("  Page {} of {pages}  ", view.page),
            Style::default().fg(theme::TEXT),
        )];
        for n in 1..=pages {
            let style = if n == view.page {
                theme::sidebar_active()
            } else {
                theme::key_hint()
            };
            spans.push(Span::styled(format!(" {n} "), style));
        }
        spans.push(Span::styled(
            format!("   {} matching", view.matched),
            theme::key_hint(),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_search(&self, frame: &mut Frame, area: Rect) {
        let search = self.session.search();
        let line = if self.search_active {
            Line::from(vec![
                Span::styled("  / ", theme::key_hint_key()),
                Span::styled(format!("{search}▏"), theme::field_active()),
            ])
        } else if search.is_empty() {
            Line::from(Span::styled("  / search name or description", theme::key_hint()))
        } else {
            Line::from(vec![
                Span::styled("  filter: ", theme::key_hint()),
                Span::styled(search.to_owned(), Style::default().fg(theme::WARN_YELLOW)),
            ])
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Component for ProductsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(target) = self.session.modal().map(|m| m.target.clone()) {
            return Ok(self.handle_modal_key(key, &target));
        }
        if self.search_active {
            self.handle_search_key(key);
            return Ok(None);
        }
        Ok(self.handle_table_key(key))
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ProductsUpdated(items) => {
                self.products = Arc::clone(items);
                self.clamp();
                Ok(None)
            }
            Action::SubmissionFinished {
                ticket,
                verb,
                outcome,
            } => Ok(self.finish_submission(*ticket, verb, outcome)),
            _ => Ok(None),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let view = self.view();
        let block = Block::default()
            .title(format!(" Products ({}) ", self.products.len()))
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

        let layout = Layout::vertical([
            Constraint::Length(1), // search
            Constraint::Min(1),    // table
            Constraint::Length(1), // pages
            Constraint::Length(1), // hints
        ])
        .split(inner);

        self.render_search(frame, layout[0]);
        self.render_table(frame, layout[1], &view);
        Self::render_footer(frame, layout[2], &view);

        let hints = Line::from(vec![
            Span::styled("  i/n/p ", theme::key_hint_key()),
            Span::styled("sort  ", theme::key_hint()),
            Span::styled("←/→ ", theme::key_hint_key()),
            Span::styled("page  ", theme::key_hint()),
            Span::styled("c ", theme::key_hint_key()),
            Span::styled("create  ", theme::key_hint()),
            Span::styled("e ", theme::key_hint_key()),
            Span::styled("edit  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("reload  ", theme::key_hint()),
            Span::styled("x ", theme::key_hint_key()),
            Span::styled("reset", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[3]);

        if let Some(modal) = self.session.modal() {
            product_form::render(frame, area, modal, self.field);
        }
    }

    fn captures_input(&self) -> bool {
        self.search_active || self.session.modal().is_some()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Products"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use prodboard_core::{Command, CoreError, ProductDraft, ProductId, SortDirection};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(screen: &mut ProductsScreen, code: KeyCode) -> Option<Action> {
        screen.handle_key_event(key(code)).unwrap()
    }

    fn type_text(screen: &mut ProductsScreen, text: &str) {
        for c in text.chars() {
            press(screen, KeyCode::Char(c));
        }
    }

    fn product(id: i64, name: &str, price: i64) -> Arc<Product> {
        Arc::new(Product {
            id: ProductId::Number(id),
            name: name.into(),
            price,
            description: format!("{name} description"),
        })
    }

    fn loaded(items: Vec<Arc<Product>>) -> ProductsScreen {
        let mut screen = ProductsScreen::new(2);
        screen
            .update(&Action::ProductsUpdated(Arc::new(items)))
            .unwrap();
        screen
    }

    fn visible_names(screen: &ProductsScreen) -> Vec<String> {
        screen.view().items.iter().map(|p| p.name.clone()).collect()
    }

    fn submitted(action: Option<Action>) -> (u64, Command) {
        match action {
            Some(Action::Submit(s)) => (s.ticket, s.command),
            other => panic!("expected a submission, got {other:?}"),
        }
    }

    #[test]
    fn price_key_sorts_then_toggles() {
        let mut screen = loaded(vec![product(1, "A", 10), product(2, "B", 5)]);

        press(&mut screen, KeyCode::Char('p'));
        assert_eq!(visible_names(&screen), ["B", "A"]);
        assert_eq!(screen.session.sort().direction, SortDirection::Ascending);

        press(&mut screen, KeyCode::Char('p'));
        assert_eq!(visible_names(&screen), ["A", "B"]);
        assert_eq!(screen.session.sort().direction, SortDirection::Descending);
    }

    #[test]
    fn arrows_page_within_bounds() {
        let mut screen = loaded(vec![
            product(1, "A", 1),
            product(2, "B", 2),
            product(3, "C", 3),
        ]);

        press(&mut screen, KeyCode::Right);
        assert_eq!(visible_names(&screen), ["C"]);
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.session.page(), 2);
        press(&mut screen, KeyCode::Left);
        press(&mut screen, KeyCode::Left);
        assert_eq!(screen.session.page(), 1);
    }

    #[test]
    fn search_filters_and_owns_the_keyboard() {
        let mut screen = loaded(vec![product(1, "Desk", 1), product(2, "Lamp", 2)]);

        press(&mut screen, KeyCode::Char('/'));
        assert!(screen.captures_input());
        type_text(&mut screen, "LAM");
        assert_eq!(visible_names(&screen), ["Lamp"]);

        press(&mut screen, KeyCode::Enter);
        assert!(!screen.captures_input());
        assert_eq!(screen.session.search(), "LAM");

        press(&mut screen, KeyCode::Char('/'));
        press(&mut screen, KeyCode::Esc);
        assert_eq!(screen.session.search(), "");
    }

    #[test]
    fn create_modal_collects_fields_and_submits() {
        let mut screen = loaded(vec![]);

        press(&mut screen, KeyCode::Char('c'));
        type_text(&mut screen, "Shelf");
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "20.9");
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "pine");

        let (_, command) = submitted(press(&mut screen, KeyCode::Enter));
        assert_eq!(
            command,
            Command::Create {
                draft: ProductDraft::new("Shelf", "20.9", "pine")
            }
        );

        // Typing and re-submitting are ignored while the request is in flight.
        type_text(&mut screen, "x");
        assert!(press(&mut screen, KeyCode::Enter).is_none());
        assert_eq!(screen.session.modal().unwrap().draft.description, "pine");
    }

    #[test]
    fn update_failure_keeps_modal_and_raises_toast() {
        let mut screen = loaded(vec![product(1, "Desk", 250)]);

        press(&mut screen, KeyCode::Char('e'));
        assert_eq!(screen.session.modal().unwrap().draft.name, "Desk");
        let (ticket, _) = submitted(press(&mut screen, KeyCode::Enter));

        let outcome = Arc::new(Err(CoreError::Rejected {
            message: "Price too high".into(),
            status: Some(422),
        }));
        let follow_up = screen
            .update(&Action::SubmissionFinished {
                ticket,
                verb: "update",
                outcome,
            })
            .unwrap();

        match follow_up {
            Some(Action::Notify(n)) => assert_eq!(n, Notification::error("Price too high")),
            other => panic!("expected an error toast, got {other:?}"),
        }
        let modal = screen.session.modal().unwrap();
        assert_eq!(modal.error.as_deref(), Some("Price too high"));
        assert!(!modal.is_submitting());
    }

    #[test]
    fn delete_failure_is_silent_and_closes() {
        let mut screen = loaded(vec![product(1, "Desk", 250)]);

        press(&mut screen, KeyCode::Char('d'));
        let (ticket, command) = submitted(press(&mut screen, KeyCode::Char('y')));
        assert_eq!(command, Command::Delete { id: ProductId::Number(1) });

        let outcome = Arc::new(Err(CoreError::NotFound {
            message: "gone".into(),
        }));
        let follow_up = screen
            .update(&Action::SubmissionFinished {
                ticket,
                verb: "delete",
                outcome,
            })
            .unwrap();
        assert!(follow_up.is_none());
        assert!(screen.session.modal().is_none());
    }

    #[test]
    fn late_result_for_dismissed_modal_is_ignored() {
        let mut screen = loaded(vec![product(1, "Desk", 250)]);

        press(&mut screen, KeyCode::Char('d'));
        let (ticket, _) = submitted(press(&mut screen, KeyCode::Enter));
        press(&mut screen, KeyCode::Esc);

        let outcome = Arc::new(Ok(CommandResult::Deleted {
            id: ProductId::Number(1),
            removed: 1,
        }));
        let follow_up = screen
            .update(&Action::SubmissionFinished {
                ticket,
                verb: "delete",
                outcome,
            })
            .unwrap();
        assert!(follow_up.is_none());
    }

    #[test]
    fn late_failure_for_dismissed_form_still_raises_toast() {
        let mut screen = loaded(vec![product(1, "Desk", 250)]);

        press(&mut screen, KeyCode::Char('c'));
        type_text(&mut screen, "Lamp");
        press(&mut screen, KeyCode::Tab);
        type_text(&mut screen, "9");
        let (ticket, command) = submitted(press(&mut screen, KeyCode::Enter));
        press(&mut screen, KeyCode::Esc);
        assert!(screen.session.modal().is_none());

        let outcome = Arc::new(Err(CoreError::Rejected {
            message: "Name already taken".into(),
            status: Some(400),
        }));
        let follow_up = screen
            .update(&Action::SubmissionFinished {
                ticket,
                verb: command.verb(),
                outcome,
            })
            .unwrap();

        match follow_up {
            Some(Action::Notify(n)) => assert_eq!(n, Notification::error("Name already taken")),
            other => panic!("expected an error toast, got {other:?}"),
        }
        assert!(screen.session.modal().is_none());
    }

    #[test]
    fn x_resets_sort_search_and_page() {
        let mut screen = loaded(vec![
            product(1, "Desk", 250),
            product(2, "Desk lamp", 40),
            product(3, "Chair", 90),
        ]);
        press(&mut screen, KeyCode::Char('p'));
        press(&mut screen, KeyCode::Char('p'));
        press(&mut screen, KeyCode::Char('/'));
        type_text(&mut screen, "desk");
        press(&mut screen, KeyCode::Enter);
        assert_eq!(visible_names(&screen), ["Desk", "Desk lamp"]);

        press(&mut screen, KeyCode::Char('x'));
        assert_eq!(screen.session.search(), "");
        assert_eq!(screen.session.page(), 1);
        assert_eq!(screen.session.sort(), SortState::default());
        assert_eq!(visible_names(&screen), ["Desk", "Desk lamp"]);
    }

    #[test]
    fn shrinking_collection_snaps_page_back() {
        let mut screen = loaded(vec![
            product(1, "A", 1),
            product(2, "B", 2),
            product(3, "C", 3),
        ]);
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.session.page(), 2);

        screen
            .update(&Action::ProductsUpdated(Arc::new(vec![product(1, "A", 1)])))
            .unwrap();
        assert_eq!(screen.session.page(), 1);
        assert_eq!(visible_names(&screen), ["A"]);
    }

    #[test]
    fn reload_key_requests_reload() {
        let mut screen = loaded(vec![]);
        assert!(matches!(
            press(&mut screen, KeyCode::Char('r')),
            Some(Action::Reload)
        ));
    }
}
