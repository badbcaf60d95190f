//! Transport-independent service layer.
//!
//! `ChartService` is the single entry point for consumer-facing
//! operations. The HTTP server and the CLI call its methods; they never
//! reach into the store, extractor or advice client directly.
//!
//! Updates for one user are serialized with a per-user async lock, so a
//! load, merge, save sequence never interleaves with another for the
//! same id. Locks exist only for known ids and only while in use.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::advice::{AdviceClient, AdviceComposer, AdviceError};
use crate::chart::{ChartEdit, MedicalChart, UserId};
use crate::extract::{self, ChartExtractor, ExtractedFacts};
use crate::storage::{ChartStore, StorageError};

/// Errors surfaced by service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A required request field was missing or blank.
    #[error("{0}")]
    MissingField(&'static str),

    #[error("User not found")]
    UserNotFound(UserId),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Detail is logged; callers only see the generic message.
    #[error("Failed to get skincare advice. Please try again.")]
    Advice(#[source] AdviceError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result of opening a session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: UserId,
    pub medical_chart: MedicalChart,
    /// True when a new id was issued
    #[serde(skip)]
    pub created: bool,
}

/// Chart operations over a store and an advice client.
#[derive(Clone)]
pub struct ChartService {
    store: Arc<dyn ChartStore>,
    composer: AdviceComposer,
    extractor: Arc<ChartExtractor>,
    locks: Arc<DashMap<UserId, Arc<Mutex<()>>>>,
}

impl ChartService {
    pub fn new(store: Arc<dyn ChartStore>, advice: Arc<dyn AdviceClient>) -> Self {
        Self {
            store,
            composer: AdviceComposer::new(advice),
            extractor: Arc::new(ChartExtractor::new()),
            locks: Arc::new(DashMap::new()),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn ChartStore> {
        &self.store
    }

    /// Lock handle for a stored user. Unknown ids never get an entry.
    fn user_lock(&self, id: &UserId) -> ServiceResult<Arc<Mutex<()>>> {
        if !self.store.contains(id)? {
            return Err(ServiceError::UserNotFound(id.clone()));
        }
        Ok(self
            .locks
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone())
    }

    /// Drop the lock entry once no other task holds or awaits it.
    fn release_lock(&self, id: &UserId, lock: Arc<Mutex<()>>) {
        drop(lock);
        self.locks.remove_if(id, |_, l| Arc::strong_count(l) == 1);
    }

    fn load_existing(&self, id: &UserId) -> ServiceResult<MedicalChart> {
        self.store
            .load(id)?
            .ok_or_else(|| ServiceError::UserNotFound(id.clone()))
    }

    // --- Sessions ---

    /// Return the chart for a known id, or issue a new id with an empty
    /// chart. Blank and unknown ids both get a fresh session.
    pub async fn open_session(&self, user_id: Option<&str>) -> ServiceResult<Session> {
        if let Some(raw) = user_id.map(str::trim).filter(|s| !s.is_empty()) {
            let id = UserId::from(raw);
            if let Some(chart) = self.store.load(&id)? {
                tracing::debug!(user_id = %id, "resumed session");
                return Ok(Session {
                    user_id: id,
                    medical_chart: chart,
                    created: false,
                });
            }
        }

        let id = UserId::new();
        let chart = MedicalChart::new();
        self.store.save(&id, &chart)?;
        tracing::info!(user_id = %id, "issued new user id");

        Ok(Session {
            user_id: id,
            medical_chart: chart,
            created: true,
        })
    }

    // --- Reads ---

    /// Load the chart for `user_id`.
    pub async fn chart(&self, user_id: &str) -> ServiceResult<MedicalChart> {
        self.load_existing(&UserId::from(user_id.trim()))
    }

    /// All known user ids.
    pub fn list_users(&self) -> ServiceResult<Vec<UserId>> {
        Ok(self.store.list()?)
    }

    /// Run extraction without touching any chart.
    pub fn extract_preview(&self, text: &str) -> ExtractedFacts {
        self.extractor.extract(text)
    }

    // --- Writes ---

    /// Extract facts from `input` and merge them into the user's chart.
    pub async fn update_chart(&self, user_id: &str, input: &str) -> ServiceResult<MedicalChart> {
        if user_id.trim().is_empty() || input.is_empty() {
            return Err(ServiceError::MissingField("User ID and input are required"));
        }
        let id = UserId::from(user_id.trim());

        let lock = self.user_lock(&id)?;
        let result = {
            let _guard = lock.lock().await;
            self.merge_input(&id, input)
        };
        self.release_lock(&id, lock);
        result
    }

    fn merge_input(&self, id: &UserId, input: &str) -> ServiceResult<MedicalChart> {
        let existing = self.load_existing(id)?;
        let facts = self.extractor.extract(input);
        tracing::debug!(user_id = %id, ?facts, "extracted chart facts");

        let updated = extract::merge(&existing, &facts);
        self.store.save(id, &updated)?;
        Ok(updated)
    }

    /// Overwrite chart fields directly.
    pub async fn edit_chart(&self, user_id: &str, edit: &ChartEdit) -> ServiceResult<MedicalChart> {
        let id = UserId::from(user_id.trim());

        let lock = self.user_lock(&id)?;
        let result = {
            let _guard = lock.lock().await;
            self.load_existing(&id).and_then(|existing| {
                let updated = extract::apply_edit(&existing, edit);
                self.store.save(&id, &updated)?;
                Ok(updated)
            })
        };
        self.release_lock(&id, lock);
        result
    }

    // --- Advice ---

    /// Ask the advice service `question` using the user's current chart.
    pub async fn advice(&self, user_id: &str, question: &str) -> ServiceResult<String> {
        if user_id.trim().is_empty() || question.trim().is_empty() {
            return Err(ServiceError::MissingField("User ID and question are required"));
        }
        let id = UserId::from(user_id.trim());
        let chart = self.load_existing(&id)?;

        self.composer.advise(&chart, question).await.map_err(|e| {
            tracing::error!(user_id = %id, error = %e, "advice request failed");
            ServiceError::Advice(e)
        })
    }

    /// Whether the advice client is ready to take requests.
    pub async fn advice_available(&self) -> bool {
        self.composer.is_available().await
    }
}
