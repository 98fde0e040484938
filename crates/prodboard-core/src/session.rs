// ── Session-scoped UI state ──
//
// Each surface (a TUI screen, a CLI invocation) owns one `Session`. It
// holds the view state (sort, search, page) and the modal state. Nothing
// here is process-global and nothing here talks to the network.

use std::sync::Arc;

use crate::command::{CommandResult, ProductDraft};
use crate::error::CoreError;
use crate::modal::{ActiveModal, ModalState, Submission};
use crate::model::{Product, ProductId};
use crate::view::{PageView, SortKey, SortState, ViewQuery, clamp_page};

#[derive(Debug, Clone)]
pub struct Session {
    query: ViewQuery,
    modal: ModalState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(crate::view::DEFAULT_PAGE_SIZE)
    }
}

impl Session {
    /// Fresh session: id ascending, no search, page 1, no modal.
    pub fn new(page_size: usize) -> Self {
        Self {
            query: ViewQuery {
                page_size: page_size.max(1),
                ..ViewQuery::default()
            },
            modal: ModalState::default(),
        }
    }

    /// Back to defaults, keeping the page size.
    pub fn reset(&mut self) {
        *self = Self::new(self.query.page_size);
    }

    // ── View state ───────────────────────────────────────────────────

    pub fn sort(&self) -> SortState {
        self.query.sort
    }

    pub fn search(&self) -> &str {
        &self.query.search
    }

    pub fn page(&self) -> usize {
        self.query.page
    }

    pub fn page_size(&self) -> usize {
        self.query.page_size
    }

    /// Apply the header-click toggle rule.
    pub fn request_sort(&mut self, key: SortKey) {
        self.query.sort = self.query.sort.toggle(key);
    }

    /// Replace the search text and return to page 1.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.query.search = text.into();
        self.query.page = 1;
    }

    /// Jump to `page`. Out-of-range pages render empty until clamped.
    pub fn go_to_page(&mut self, page: usize) {
        self.query.page = page;
    }

    /// Advance unless already on the last page.
    pub fn next_page(&mut self, page_count: usize) {
        if self.query.page < page_count {
            self.query.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.query.page > 1 {
            self.query.page -= 1;
        }
    }

    /// Snap the current page into `[1, page_count]`.
    pub fn clamp_page(&mut self, page_count: usize) {
        self.query.page = clamp_page(self.query.page, page_count);
    }

    /// Derive the visible page from a collection snapshot.
    pub fn view(&self, items: &[Arc<Product>]) -> PageView {
        self.query.apply(items)
    }

    // ── Modal state ──────────────────────────────────────────────────

    pub fn modal(&self) -> Option<&ActiveModal> {
        self.modal.active()
    }

    pub fn draft_mut(&mut self) -> Option<&mut ProductDraft> {
        self.modal.draft_mut()
    }

    pub fn open_create(&mut self) {
        self.modal.open_create();
    }

    pub fn open_update(&mut self, product: &Product) {
        self.modal.open_update(product);
    }

    pub fn open_delete(&mut self, id: ProductId) {
        self.modal.open_delete(id);
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    pub fn begin_submit(&mut self) -> Option<Submission> {
        self.modal.begin_submit()
    }

    pub fn finish_submit(
        &mut self,
        ticket: u64,
        outcome: &Result<CommandResult, CoreError>,
    ) -> bool {
        self.modal.finish_submit(ticket, outcome)
    }
}
