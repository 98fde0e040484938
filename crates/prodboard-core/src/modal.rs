// ── Modal workflow ──
//
// One modal at a time, each moving Closed -> Open -> Submitting -> Closed.
// A failed submit drops back to Open with the error attached and the form
// intact. Dismissing a modal never cancels a request that is already in
// flight; its result is matched by ticket and ignored if the modal moved on.

use crate::command::{Command, CommandResult, ProductDraft};
use crate::error::CoreError;
use crate::model::{Product, ProductId};

/// Which workflow a modal drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalTarget {
    Create,
    Update(ProductId),
    Delete(ProductId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Open,
    Submitting { ticket: u64 },
}

/// An open modal and its form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveModal {
    pub target: ModalTarget,
    /// Unused (default) for delete.
    pub draft: ProductDraft,
    pub phase: ModalPhase,
    /// Last submit failure, shown until the next submit.
    pub error: Option<String>,
}

impl ActiveModal {
    fn open(target: ModalTarget, draft: ProductDraft) -> Self {
        Self {
            target,
            draft,
            phase: ModalPhase::Open,
            error: None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, ModalPhase::Submitting { .. })
    }

    fn command(&self) -> Command {
        match &self.target {
            ModalTarget::Create => Command::Create {
                draft: self.draft.clone(),
            },
            ModalTarget::Update(id) => Command::Update {
                id: id.clone(),
                draft: self.draft.clone(),
            },
            ModalTarget::Delete(id) => Command::Delete { id: id.clone() },
        }
    }
}

/// A command handed out by [`ModalState::begin_submit`].
///
/// Pass `ticket` back to [`ModalState::finish_submit`] with the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: u64,
    pub command: Command,
}

/// Holder of the (at most one) open modal.
#[derive(Debug, Clone, Default)]
pub struct ModalState {
    active: Option<ActiveModal>,
    next_ticket: u64,
}

impl ModalState {
    pub fn active(&self) -> Option<&ActiveModal> {
        self.active.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// The editable form, while open and not submitting.
    pub fn draft_mut(&mut self) -> Option<&mut ProductDraft> {
        self.active
            .as_mut()
            .filter(|m| !m.is_submitting())
            .map(|m| &mut m.draft)
    }

    pub fn open_create(&mut self) {
        self.active = Some(ActiveModal::open(
            ModalTarget::Create,
            ProductDraft::default(),
        ));
    }

    /// Seeds the form from the targeted product.
    pub fn open_update(&mut self, product: &Product) {
        self.active = Some(ActiveModal::open(
            ModalTarget::Update(product.id.clone()),
            ProductDraft::from_product(product),
        ));
    }

    pub fn open_delete(&mut self, id: ProductId) {
        self.active = Some(ActiveModal::open(
            ModalTarget::Delete(id),
            ProductDraft::default(),
        ));
    }

    /// Cancel: clears target and form. In-flight requests keep running.
    pub fn close(&mut self) {
        self.active = None;
    }

    /// Move Open -> Submitting and hand out the command to run.
    ///
    /// Returns `None` when no modal is open or one is already submitting.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        let modal = self.active.as_mut()?;
        if modal.is_submitting() {
            return None;
        }
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        modal.phase = ModalPhase::Submitting { ticket };
        modal.error = None;
        Some(Submission {
            ticket,
            command: modal.command(),
        })
    }

    /// Settle a submission: success closes, failure reopens with the error.
    ///
    /// Returns `false` if the ticket no longer matches the open modal (it
    /// was dismissed or replaced while the request was in flight).
    pub fn finish_submit(
        &mut self,
        ticket: u64,
        outcome: &Result<CommandResult, CoreError>,
    ) -> bool {
        let Some(modal) = self.active.as_mut() else {
            return false;
        };
        if modal.phase != (ModalPhase::Submitting { ticket }) {
            return false;
        }
        match outcome {
            Ok(_) => self.active = None,
            Err(e) => {
                modal.phase = ModalPhase::Open;
                modal.error = Some(e.to_string());
            }
        }
        true
    }
}
