//! Sequencing for create, update, and delete mutations.
//!
//! # Design
//! Each mutation kind carries its own pending flag and its own last error;
//! kinds never affect one another, and a submission of a kind that is
//! already pending is rejected without issuing a request. A successful mutation invalidates the
//! synchronization cache (the next read refetches) and resets the draft
//! state belonging to that kind. A failed mutation records its error and
//! leaves all drafts untouched so the user can correct and resubmit. There
//! are no retries.

use crate::cache::ItemCache;
use crate::client::ItemClient;
use crate::drafts::FormState;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{Item, ItemInput};

/// Pending flag and last error for one mutation kind.
#[derive(Debug, Default)]
pub struct MutationState {
    pending: bool,
    last_error: Option<ApiError>,
}

impl MutationState {
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    /// Claim the pending slot for a submission. Errors when a submission of
    /// this kind is already in flight; the rejection does not touch
    /// `last_error`, which still belongs to the in-flight submission.
    fn begin(&mut self, kind: &'static str) -> Result<(), ApiError> {
        if self.pending {
            return Err(ApiError::AlreadyPending(kind));
        }
        self.pending = true;
        Ok(())
    }

    fn finish<T>(&mut self, result: &Result<T, ApiError>) {
        self.pending = false;
        self.last_error = result.as_ref().err().cloned();
    }
}

/// Tracks the three mutation kinds and drives them through the client,
/// transport, cache, and form state.
#[derive(Debug, Default)]
pub struct MutationOrchestrator {
    create: MutationState,
    update: MutationState,
    delete: MutationState,
}

impl MutationOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_state(&self) -> &MutationState {
        &self.create
    }

    pub fn update_state(&self) -> &MutationState {
        &self.update
    }

    pub fn delete_state(&self) -> &MutationState {
        &self.delete
    }

    /// Submit the new-item draft. On success the cache is invalidated and
    /// the draft cleared; on failure the draft is retained for correction.
    ///
    /// Submitting while a create is already pending is rejected with
    /// `AlreadyPending` before any request is built.
    pub fn create<T: Transport>(
        &mut self,
        client: &ItemClient,
        transport: &mut T,
        cache: &mut ItemCache,
        forms: &mut FormState,
    ) -> Result<Item, ApiError> {
        self.create.begin("create")?;
        let input = forms.new_item.trimmed();
        let result = run_create(client, transport, &input);
        self.create.finish(&result);

        if result.is_ok() {
            cache.invalidate();
            forms.new_item.clear();
        }
        result
    }

    /// Save the edit draft onto item `id`. On success the cache is
    /// invalidated and edit mode exits; on failure edit mode and the draft
    /// survive so the user can retry.
    pub fn update<T: Transport>(
        &mut self,
        client: &ItemClient,
        transport: &mut T,
        cache: &mut ItemCache,
        forms: &mut FormState,
        id: i64,
    ) -> Result<Item, ApiError> {
        self.update.begin("update")?;
        let input = forms.edit_draft.trimmed();
        let result = run_update(client, transport, id, &input);
        self.update.finish(&result);

        if result.is_ok() {
            cache.invalidate();
            forms.finish_edit();
        }
        result
    }

    /// Delete item `id`. Immediate and irreversible from the client's
    /// perspective — no confirmation, no undo. A failed delete changes no
    /// local state beyond its own error slot.
    pub fn delete<T: Transport>(
        &mut self,
        client: &ItemClient,
        transport: &mut T,
        cache: &mut ItemCache,
        id: i64,
    ) -> Result<(), ApiError> {
        self.delete.begin("delete")?;
        let result = run_delete(client, transport, id);
        self.delete.finish(&result);

        if result.is_ok() {
            cache.invalidate();
        }
        result
    }
}

fn run_create<T: Transport>(
    client: &ItemClient,
    transport: &mut T,
    input: &ItemInput,
) -> Result<Item, ApiError> {
    let request = client.build_create_item(input)?;
    let response = transport.execute(request)?;
    client.parse_create_item(response)
}

fn run_update<T: Transport>(
    client: &ItemClient,
    transport: &mut T,
    id: i64,
    input: &ItemInput,
) -> Result<Item, ApiError> {
    let request = client.build_update_item(id, input)?;
    let response = transport.execute(request)?;
    client.parse_update_item(response)
}

fn run_delete<T: Transport>(
    client: &ItemClient,
    transport: &mut T,
    id: i64,
) -> Result<(), ApiError> {
    let request = client.build_delete_item(id);
    let response = transport.execute(request)?;
    client.parse_delete_item(response)
}
