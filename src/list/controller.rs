use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info};

use super::{Entity, Lookups, SaveMode, filter_records, id_set};
use crate::api::{self, ApiClient};
use crate::error::AppError;
use crate::session::Session;
use crate::shell::{self, Shell};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
    /// A required field was empty; nothing was sent.
    Incomplete { field: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Deleted,
    Cancelled,
    NoSelection,
}

struct ListState<E: Entity> {
    items: Vec<E>,
    filtered: Vec<E>,
    query: String,
    draft: E,
    editing_id: Option<i64>,
    lookups: E::Lookups,
    error: Option<String>,
}

impl<E: Entity> ListState<E> {
    fn refilter(&mut self) {
        let lookups = &self.lookups;
        let filtered = filter_records(&self.items, &self.query, |record| {
            record.search_fields(lookups)
        });
        self.filtered = filtered;
    }
}

impl<E: Entity> Default for ListState<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            filtered: Vec::new(),
            query: String::new(),
            draft: E::default(),
            editing_id: None,
            lookups: E::Lookups::default(),
            error: None,
        }
    }
}

/// Marks a mutating request as outstanding for the lifetime of the guard.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, AppError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlight(flag))
            .map_err(|_| AppError::Busy)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Search + CRUD over one REST resource.
///
/// All operations take `&self`; state sits behind a mutex that is never held
/// across a request, so a controller can be shared with `Arc` between UI
/// tasks. At most one `save`/`remove` runs at a time, a second one is
/// rejected with [`AppError::Busy`].
pub struct ListController<E: Entity> {
    api: Arc<dyn ApiClient>,
    shell: Arc<dyn Shell>,
    session: Arc<Session>,
    state: Mutex<ListState<E>>,
    in_flight: AtomicBool,
}

impl<E: Entity> ListController<E> {
    pub fn new(api: Arc<dyn ApiClient>, shell: Arc<dyn Shell>, session: Arc<Session>) -> Self {
        Self {
            api,
            shell,
            session,
            state: Mutex::new(ListState::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    fn state(&self) -> MutexGuard<'_, ListState<E>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fail(&self, what: &str, err: &AppError) {
        error!("{} {} failed: {}", what, E::RESOURCE, err);
        self.state().error = Some(err.user_message());
    }

    /// Initial fetch of the collection and its lookups.
    pub async fn activate(&self) -> Result<usize, AppError> {
        self.load_lookups().await;
        self.load().await
    }

    pub async fn load(&self) -> Result<usize, AppError> {
        match api::fetch_list::<E>(self.api.as_ref(), E::RESOURCE, &[]).await {
            Ok(items) => {
                let mut state = self.state();
                state.items = items;
                state.error = None;
                state.refilter();
                debug!("loaded {} {}", state.items.len(), E::RESOURCE);
                Ok(state.items.len())
            }
            Err(e) => {
                self.fail("Load", &e);
                Err(e)
            }
        }
    }

    pub async fn load_lookups(&self) {
        let current = self.state().lookups.clone();
        let fresh = current.refresh(self.api.as_ref()).await;
        let mut state = self.state();
        state.lookups = fresh;
        state.refilter();
    }

    pub fn apply_filter(&self, query: &str) {
        let mut state = self.state();
        state.query = query.to_string();
        state.refilter();
    }

    pub fn reset(&self) {
        let mut state = self.state();
        state.draft = E::default();
        state.editing_id = None;
    }

    pub fn select_for_edit(&self, record: &E) {
        let mut state = self.state();
        state.editing_id = id_set(record.id());
        state.draft = record.clone();
    }

    pub fn edit_draft<F: FnOnce(&mut E)>(&self, edit: F) {
        edit(&mut self.state().draft);
    }

    pub async fn save(&self) -> Result<SaveOutcome, AppError> {
        let (payload, editing_id) = {
            let state = self.state();
            (state.draft.payload(), state.editing_id)
        };
        let mode = match editing_id {
            Some(_) => SaveMode::Update,
            None => SaveMode::Create,
        };

        if let Some(field) = payload.missing_required(mode) {
            debug!("{}: save skipped, {} is required", E::RESOURCE, field);
            return Ok(SaveOutcome::Incomplete { field });
        }

        let _busy = InFlight::acquire(&self.in_flight)?;
        let body = serde_json::to_value(&payload)?;
        let result = match editing_id {
            Some(id) => self
                .api
                .put(&format!("{}/{}", E::RESOURCE, id), &body)
                .await
                .map(|_| SaveOutcome::Updated),
            None => self
                .api
                .post(E::RESOURCE, &[], Some(&body))
                .await
                .map(|_| SaveOutcome::Created),
        };

        match result {
            Ok(outcome) => {
                info!("{} saved ({:?})", E::RESOURCE, outcome);
                self.reset();
                // A failed reload is already logged and surfaced by `load`.
                let _ = self.load().await;
                Ok(outcome)
            }
            Err(e) => {
                let what = match mode {
                    SaveMode::Create => "Create",
                    SaveMode::Update => "Update",
                };
                self.fail(what, &e);
                Err(e)
            }
        }
    }

    pub async fn remove(&self, id: Option<i64>) -> Result<RemoveOutcome, AppError> {
        let Some(id) = id_set(id) else {
            return Ok(RemoveOutcome::NoSelection);
        };
        let _busy = InFlight::acquire(&self.in_flight)?;
        if !self.shell.confirm(E::DELETE_PROMPT) {
            return Ok(RemoveOutcome::Cancelled);
        }

        match self.api.delete(&format!("{}/{}", E::RESOURCE, id)).await {
            Ok(_) => {
                info!("{} {} deleted", E::RESOURCE, id);
                let _ = self.load().await;
                Ok(RemoveOutcome::Deleted)
            }
            Err(e) => {
                self.fail("Delete", &e);
                Err(e)
            }
        }
    }

    pub fn logout(&self) -> bool {
        shell::logout(self.shell.as_ref(), &self.session)
    }

    pub fn items(&self) -> Vec<E> {
        self.state().items.clone()
    }

    pub fn filtered(&self) -> Vec<E> {
        self.state().filtered.clone()
    }

    pub fn query(&self) -> String {
        self.state().query.clone()
    }

    pub fn draft(&self) -> E {
        self.state().draft.clone()
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.state().editing_id
    }

    pub fn lookups(&self) -> E::Lookups {
        self.state().lookups.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}
