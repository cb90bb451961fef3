//! Session facade: the non-visual half of the item management page.
//!
//! Owns the client, the synchronization cache, the mutation orchestrator,
//! and the draft state, and exposes exactly the operations a rendering
//! layer needs: a read-through item list, guarded submits, the edit-mode
//! transitions, and display-ready error messages. Rendering itself lives
//! elsewhere; this type is deterministic given a `Transport`.

use crate::cache::ItemCache;
use crate::client::ItemClient;
use crate::config::base_url_from_env;
use crate::drafts::FormState;
use crate::error::{create_error_message, load_error_message, ApiError};
use crate::http::Transport;
use crate::orchestrator::MutationOrchestrator;
use crate::types::{Item, ItemsSnapshot};

pub struct ItemSession<T: Transport> {
    client: ItemClient,
    transport: T,
    cache: ItemCache,
    orchestrator: MutationOrchestrator,
    forms: FormState,
    last_load_error: Option<ApiError>,
}

impl<T: Transport> ItemSession<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: ItemClient::new(base_url),
            transport,
            cache: ItemCache::new(),
            orchestrator: MutationOrchestrator::new(),
            forms: FormState::new(),
            last_load_error: None,
        }
    }

    /// Build a session against the `ITEM_API_URL` backend (loopback default).
    pub fn from_env(transport: T) -> Self {
        Self::new(&base_url_from_env(), transport)
    }

    pub fn client(&self) -> &ItemClient {
        &self.client
    }

    pub fn forms(&self) -> &FormState {
        &self.forms
    }

    pub fn forms_mut(&mut self) -> &mut FormState {
        &mut self.forms
    }

    pub fn orchestrator(&self) -> &MutationOrchestrator {
        &self.orchestrator
    }

    /// Read-through list: serve the cached snapshot when fresh, otherwise
    /// fetch, install under the generation captured before the fetch, and
    /// return the fetched result either way (a result whose generation went
    /// stale is returned to the caller but not cached).
    pub fn items(&mut self) -> Result<ItemsSnapshot, ApiError> {
        let generation = self.cache.begin_fetch();
        if let Some(snapshot) = self.cache.get() {
            return Ok(snapshot.clone());
        }

        let request = self.client.build_list_items();
        let result = self
            .transport
            .execute(request)
            .map_err(ApiError::from)
            .and_then(|response| self.client.parse_list_items(response));

        match result {
            Ok(snapshot) => {
                self.last_load_error = None;
                self.cache.store(generation, snapshot.clone());
                Ok(snapshot)
            }
            Err(err) => {
                self.last_load_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Search bypasses the cache: it is a different logical query from the
    /// one cached list view.
    pub fn search(&mut self, query: &str) -> Result<Vec<Item>, ApiError> {
        let request = self.client.build_search_items(query);
        let response = self.transport.execute(request)?;
        self.client.parse_search_items(response)
    }

    /// Submit the new-item draft. A draft whose trimmed name is empty is
    /// rejected here, before the orchestrator is invoked — no request is
    /// issued. Returns `Ok(None)` in that case, `Ok(Some(item))` on a
    /// successful create.
    pub fn submit_create(&mut self) -> Result<Option<Item>, ApiError> {
        if !self.forms.new_item.is_submittable() {
            return Ok(None);
        }
        self.orchestrator
            .create(&self.client, &mut self.transport, &mut self.cache, &mut self.forms)
            .map(Some)
    }

    /// Enter edit mode on the cached item with this id, seeding the edit
    /// draft from its fields. Returns `false` when the id is not in the
    /// cached list (or nothing is cached).
    pub fn start_edit(&mut self, id: i64) -> bool {
        let Some(snapshot) = self.cache.get() else {
            return false;
        };
        let Some(item) = snapshot.items.iter().find(|item| item.id == id) else {
            return false;
        };
        let item = item.clone();
        self.forms.start_edit(&item);
        true
    }

    pub fn cancel_edit(&mut self) {
        self.forms.cancel_edit();
    }

    /// Save the edit draft onto the item currently in edit mode. No-op
    /// (`Ok(None)`) when nothing is being edited or the draft's trimmed
    /// name is empty — the save control is disabled in both states.
    pub fn save_edit(&mut self) -> Result<Option<Item>, ApiError> {
        let Some(id) = self.forms.editing_id() else {
            return Ok(None);
        };
        if !self.forms.edit_draft.is_submittable() {
            return Ok(None);
        }
        self.orchestrator
            .update(&self.client, &mut self.transport, &mut self.cache, &mut self.forms, id)
            .map(Some)
    }

    /// Delete immediately — no confirmation step, no undo.
    pub fn delete(&mut self, id: i64) -> Result<(), ApiError> {
        self.orchestrator
            .delete(&self.client, &mut self.transport, &mut self.cache, id)
    }

    /// Inline message for a failed list read, if the last read failed.
    pub fn load_error_message(&self) -> Option<String> {
        self.last_load_error.as_ref().map(load_error_message)
    }

    /// Inline message for a failed create, if the last create failed.
    pub fn create_error_message(&self) -> Option<String> {
        self.orchestrator
            .create_state()
            .last_error()
            .map(create_error_message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse, TransportError};
    use std::collections::VecDeque;

    struct ScriptedTransport {
        responses: VecDeque<Result<HttpResponse, TransportError>>,
        requests: Vec<HttpRequest>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
            Self {
                responses: responses.into(),
                requests: Vec::new(),
            }
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.push(request);
            self.responses.pop_front().expect("unscripted request")
        }
    }

    fn ok(status: u16, body: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn list_body(items_json: &str, timestamp: &str) -> String {
        format!(
            r#"{{"success":true,"message":"Operation successful","data":{items_json},"timestamp":"{timestamp}"}}"#
        )
    }

    fn item_json(id: i64, name: &str, description: &str) -> String {
        format!(
            r#"{{"id":{id},"name":"{name}","description":"{description}","createdAt":"2024-05-01T12:00:00"}}"#
        )
    }

    fn session(responses: Vec<Result<HttpResponse, TransportError>>) -> ItemSession<ScriptedTransport> {
        ItemSession::new("http://localhost:8080", ScriptedTransport::new(responses))
    }

    #[test]
    fn second_read_is_served_from_cache() {
        let mut s = session(vec![ok(200, &list_body("[]", "t1"))]);
        let first = s.items().unwrap();
        let second = s.items().unwrap();
        assert_eq!(first, second);
        assert_eq!(s.transport.requests.len(), 1, "one fetch, one cache hit");
    }

    #[test]
    fn whitespace_only_name_issues_no_request() {
        let mut s = session(vec![]);
        s.forms_mut().new_item.name = "   ".to_string();
        s.forms_mut().new_item.description = "ignored".to_string();

        let outcome = s.submit_create().unwrap();
        assert!(outcome.is_none());
        assert!(s.transport.requests.is_empty());
    }

    #[test]
    fn create_then_read_refetches() {
        let created = format!(
            r#"{{"success":true,"message":"Item created successfully","data":{},"timestamp":"t"}}"#,
            item_json(1, "Widget", "")
        );
        let mut s = session(vec![
            ok(200, &list_body("[]", "t1")),
            ok(201, &created),
            ok(200, &list_body(&format!("[{}]", item_json(1, "Widget", "")), "t2")),
        ]);

        assert!(s.items().unwrap().items.is_empty());

        s.forms_mut().new_item.name = "Widget".to_string();
        let created = s.submit_create().unwrap().unwrap();
        assert_eq!(created.name, "Widget");
        assert!(!s.orchestrator().create_state().is_pending());

        // Cache was invalidated by the create; this read refetches.
        let snapshot = s.items().unwrap();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.fetched_at, "t2");
        assert_eq!(s.transport.requests.len(), 3);
        assert_eq!(s.transport.requests[2].method, HttpMethod::Get);
    }

    #[test]
    fn start_edit_unknown_id_is_rejected() {
        let mut s = session(vec![ok(200, &list_body("[]", "t1"))]);
        s.items().unwrap();
        assert!(!s.start_edit(99));
    }

    #[test]
    fn start_edit_seeds_draft_and_save_exits_edit_mode() {
        let one = item_json(3, "Widget", "blue");
        let updated = format!(
            r#"{{"success":true,"message":"Item updated successfully","data":{},"timestamp":"t"}}"#,
            item_json(3, "Gadget", "blue")
        );
        let mut s = session(vec![ok(200, &list_body(&format!("[{one}]"), "t1")), ok(200, &updated)]);
        s.items().unwrap();

        assert!(s.start_edit(3));
        assert_eq!(s.forms().edit_draft.name, "Widget");

        s.forms_mut().edit_draft.name = "Gadget".to_string();
        let saved = s.save_edit().unwrap().unwrap();
        assert_eq!(saved.name, "Gadget");
        assert_eq!(s.forms().editing_id(), None);
    }

    #[test]
    fn save_edit_with_blank_name_issues_no_request() {
        let one = item_json(3, "Widget", "");
        let mut s = session(vec![ok(200, &list_body(&format!("[{one}]"), "t1"))]);
        s.items().unwrap();
        s.start_edit(3);
        s.forms_mut().edit_draft.name = "  ".to_string();

        assert!(s.save_edit().unwrap().is_none());
        assert_eq!(s.transport.requests.len(), 1, "only the list fetch");
        assert_eq!(s.forms().editing_id(), Some(3), "still editing");
    }

    #[test]
    fn rejected_update_keeps_edit_mode_and_exposes_message() {
        let one = item_json(3, "Widget", "");
        let rejection = r#"{"success":false,"message":"Validation failed","data":{"name":"Name is required"},"timestamp":"t"}"#;
        let mut s = session(vec![
            ok(200, &list_body(&format!("[{one}]"), "t1")),
            ok(400, rejection),
        ]);
        s.items().unwrap();
        s.start_edit(3);
        s.forms_mut().edit_draft.name = "x".to_string();

        let err = s.save_edit().unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
        assert_eq!(s.forms().editing_id(), Some(3));
        assert_eq!(s.forms().edit_draft.name, "x");
    }

    #[test]
    fn failed_load_records_display_message() {
        let mut s = session(vec![Err(TransportError("connection refused".to_string()))]);
        assert!(s.items().is_err());
        assert_eq!(s.load_error_message().as_deref(), Some("connection refused"));
    }

    #[test]
    fn successful_load_clears_previous_error() {
        let mut s = session(vec![
            Err(TransportError("connection refused".to_string())),
            ok(200, &list_body("[]", "t1")),
        ]);
        let _ = s.items();
        s.items().unwrap();
        assert!(s.load_error_message().is_none());
    }

    #[test]
    fn create_error_message_surfaces_first_field() {
        let rejection = r#"{"success":false,"message":"Validation failed","data":{"name":"Name is required"},"timestamp":"t"}"#;
        let mut s = session(vec![ok(400, rejection)]);
        s.forms_mut().new_item.name = "x".to_string();

        assert!(s.submit_create().is_err());
        assert_eq!(
            s.create_error_message().as_deref(),
            Some("Name is required")
        );
        // The draft survives for correction.
        assert_eq!(s.forms().new_item.name, "x");
    }

    #[test]
    fn delete_failure_leaves_cached_list_intact() {
        let one = item_json(3, "Widget", "");
        let missing = r#"{"success":false,"message":"Item not found with id: 9","data":null,"timestamp":"t"}"#;
        let mut s = session(vec![
            ok(200, &list_body(&format!("[{one}]"), "t1")),
            ok(404, missing),
        ]);
        s.items().unwrap();

        let err = s.delete(9).unwrap_err();
        assert!(matches!(err, ApiError::Application { status: 404, .. }));
        // Next read is still the cached snapshot — no refetch.
        s.items().unwrap();
        assert_eq!(s.transport.requests.len(), 2);
    }

    #[test]
    fn search_bypasses_cache() {
        let found = format!("[{}]", item_json(2, "Blue widget", ""));
        let mut s = session(vec![
            ok(200, &list_body("[]", "t1")),
            ok(200, &list_body(&found, "t2")),
        ]);
        s.items().unwrap();

        let results = s.search("blue").unwrap();
        assert_eq!(results.len(), 1);
        assert!(s.transport.requests[1].path.ends_with("/api/items/search?q=blue"));
        // The cached list is untouched by the search.
        assert!(s.items().unwrap().items.is_empty());
    }
}
