//! Hearing test entity store
//!
//! The repository trait is the seam between the service and storage. The
//! in-memory implementation is volatile: records live as long as the process.
//! Every operation takes the single store lock, so a create, update or delete
//! never interleaves with another store operation.

use async_trait::async_trait;
use audisense_common::HearingTestId;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

/// Stored hearing test record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HearingTest {
    pub id: HearingTestId,
    pub tester_name: String,
    pub date_conducted: DateTime<Utc>,
    pub result: String,
}

/// The replaceable business fields of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HearingTestFields {
    pub tester_name: String,
    pub date_conducted: DateTime<Utc>,
    pub result: String,
}

/// Store failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// The id counter reached its maximum; ids are never reused
    #[error("Hearing test id space exhausted")]
    IdSpaceExhausted,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage operations for hearing test records
///
/// Implementations hand out copies; callers never hold references into the
/// store.
#[async_trait]
pub trait HearingTestRepository: Send + Sync {
    /// All present records, in no guaranteed order
    async fn list_all(&self) -> StoreResult<Vec<HearingTest>>;

    async fn get_by_id(&self, id: HearingTestId) -> StoreResult<Option<HearingTest>>;

    /// Assign the next id and store the record
    async fn create(&self, fields: HearingTestFields) -> StoreResult<HearingTest>;

    /// Replace the business fields of an existing record; `None` if absent
    async fn update(
        &self,
        id: HearingTestId,
        fields: HearingTestFields,
    ) -> StoreResult<Option<HearingTest>>;

    /// Remove a record; `false` if there was nothing to remove
    async fn delete(&self, id: HearingTestId) -> StoreResult<bool>;
}

struct StoreState {
    records: BTreeMap<HearingTestId, HearingTest>,
    next_id: HearingTestId,
}

/// Process-lifetime in-memory store
pub struct InMemoryHearingTestStore {
    state: RwLock<StoreState>,
}

impl Default for InMemoryHearingTestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHearingTestStore {
    /// Empty store; the first record gets id 1
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                records: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

#[async_trait]
impl HearingTestRepository for InMemoryHearingTestStore {
    async fn list_all(&self) -> StoreResult<Vec<HearingTest>> {
        let state = self.state.read().await;
        Ok(state.records.values().cloned().collect())
    }

    async fn get_by_id(&self, id: HearingTestId) -> StoreResult<Option<HearingTest>> {
        let state = self.state.read().await;
        Ok(state.records.get(&id).cloned())
    }

    async fn create(&self, fields: HearingTestFields) -> StoreResult<HearingTest> {
        let mut state = self.state.write().await;

        let id = state.next_id;
        state.next_id = id.checked_add(1).ok_or(StoreError::IdSpaceExhausted)?;

        let record = HearingTest {
            id,
            tester_name: fields.tester_name,
            date_conducted: fields.date_conducted,
            result: fields.result,
        };
        state.records.insert(id, record.clone());
        debug!(id, "Stored hearing test");

        Ok(record)
    }

    async fn update(
        &self,
        id: HearingTestId,
        fields: HearingTestFields,
    ) -> StoreResult<Option<HearingTest>> {
        let mut state = self.state.write().await;

        let Some(existing) = state.records.get_mut(&id) else {
            return Ok(None);
        };
        existing.tester_name = fields.tester_name;
        existing.date_conducted = fields.date_conducted;
        existing.result = fields.result;

        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: HearingTestId) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        Ok(state.records.remove(&id).is_some())
    }
}
