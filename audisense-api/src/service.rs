//! Hearing test service
//!
//! Maps between wire types and stored records. Holds no state of its own and
//! performs no validation: requests arrive already validated.

use crate::store::{HearingTest, HearingTestFields, HearingTestRepository, StoreResult};
use audisense_common::{HearingTestId, HearingTestRequest, HearingTestView};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::info;

impl From<HearingTest> for HearingTestView {
    fn from(record: HearingTest) -> Self {
        Self {
            id: record.id,
            tester_name: record.tester_name,
            date_conducted: record.date_conducted,
            result: record.result,
        }
    }
}

impl From<HearingTestRequest> for HearingTestFields {
    fn from(request: HearingTestRequest) -> Self {
        Self {
            tester_name: request.tester_name,
            date_conducted: request.date_conducted,
            result: request.result,
        }
    }
}

#[derive(Clone)]
pub struct HearingTestService {
    repository: Arc<dyn HearingTestRepository>,
}

impl HearingTestService {
    pub fn new(repository: Arc<dyn HearingTestRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_all(&self) -> StoreResult<Vec<HearingTestView>> {
        let records = self.repository.list_all().await?;
        Ok(records.into_iter().map(HearingTestView::from).collect())
    }

    pub async fn get_by_id(&self, id: HearingTestId) -> StoreResult<Option<HearingTestView>> {
        Ok(self.repository.get_by_id(id).await?.map(HearingTestView::from))
    }

    pub async fn create(&self, request: HearingTestRequest) -> StoreResult<HearingTestView> {
        let record = self.repository.create(request.into()).await?;
        Ok(record.into())
    }

    pub async fn update(
        &self,
        id: HearingTestId,
        request: HearingTestRequest,
    ) -> StoreResult<Option<HearingTestView>> {
        Ok(self
            .repository
            .update(id, request.into())
            .await?
            .map(HearingTestView::from))
    }

    pub async fn delete(&self, id: HearingTestId) -> StoreResult<bool> {
        self.repository.delete(id).await
    }

    /// Insert the two demonstration records, dated relative to `now`
    pub async fn seed_sample_data(&self, now: DateTime<Utc>) -> StoreResult<Vec<HearingTestView>> {
        let samples = [
            ("Dr. Smith", 7, "Normal hearing range"),
            ("Dr. Johnson", 3, "Mild hearing loss detected"),
        ];

        let mut seeded = Vec::with_capacity(samples.len());
        for (tester_name, days_ago, result) in samples {
            let fields = HearingTestFields {
                tester_name: tester_name.to_string(),
                date_conducted: now - Duration::days(days_ago),
                result: result.to_string(),
            };
            seeded.push(self.repository.create(fields).await?.into());
        }

        info!("Seeded {} sample hearing tests", seeded.len());
        Ok(seeded)
    }
}
