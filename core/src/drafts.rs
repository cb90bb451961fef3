//! Local draft state: unsaved form text and the edit-mode state machine.

use crate::types::{Item, ItemInput};

/// Unsaved form text for a pending create or edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub description: String,
}

impl Draft {
    /// The request payload this draft would submit, with surrounding
    /// whitespace removed from both fields.
    pub fn trimmed(&self) -> ItemInput {
        ItemInput {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }

    /// A draft is submittable once its trimmed name is non-empty. The
    /// presentation layer checks this before any request is issued.
    pub fn is_submittable(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.description.clear();
    }
}

/// Which item, if any, is currently being edited. A tagged variant instead
/// of a nullable id: the invariant "at most one item in edit mode" holds by
/// construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Idle,
    Editing(i64),
}

/// The two independent drafts plus the edit-mode machine.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub new_item: Draft,
    edit_mode: EditMode,
    pub edit_draft: Draft,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    pub fn editing_id(&self) -> Option<i64> {
        match self.edit_mode {
            EditMode::Idle => None,
            EditMode::Editing(id) => Some(id),
        }
    }

    /// Enter edit mode on `item`, seeding the edit draft from its current
    /// fields. Any unsaved draft for a previously edited item is discarded
    /// silently — no confirmation, no carry-over between items.
    pub fn start_edit(&mut self, item: &Item) {
        self.edit_mode = EditMode::Editing(item.id);
        self.edit_draft = Draft {
            name: item.name.clone(),
            description: item.description.clone(),
        };
    }

    /// Leave edit mode without saving, dropping the edit draft.
    pub fn cancel_edit(&mut self) {
        self.edit_mode = EditMode::Idle;
        self.edit_draft.clear();
    }

    /// Leave edit mode after a successful save. Identical cleanup to
    /// cancel; the distinction exists at the call sites.
    pub fn finish_edit(&mut self) {
        self.edit_mode = EditMode::Idle;
        self.edit_draft.clear();
    }
}
