//! Typed hearing test operations over a [`DataGateway`]

use audisense_common::models::{hearing_test_path, HEARING_TESTS_PATH};
use audisense_common::{HearingTestId, HearingTestRequest, HearingTestView};
use tracing::{info, warn};

use crate::gateway::DataGateway;

/// Client-side façade for the `/api/hearingtests` resource
pub struct HearingTestClient<G> {
    gateway: G,
}

impl<G: DataGateway> HearingTestClient<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// All records; `None` when the load failed (as opposed to an empty list)
    pub async fn list(&self) -> Option<Vec<HearingTestView>> {
        info!("Fetching all hearing tests");
        self.gateway.get(HEARING_TESTS_PATH).await
    }

    pub async fn get(&self, id: HearingTestId) -> Option<HearingTestView> {
        info!("Fetching hearing test with ID: {}", id);
        self.gateway.get(&hearing_test_path(id)).await
    }

    pub async fn create(&self, request: &HearingTestRequest) -> Option<HearingTestView> {
        info!("Creating new hearing test for tester: {}", request.tester_name);
        self.gateway.post(HEARING_TESTS_PATH, request).await
    }

    /// PUT the new fields, then re-read the record
    ///
    /// Succeeds only if both calls succeed. A failed re-read reports failure
    /// even though the update itself may have been applied.
    pub async fn update(
        &self,
        id: HearingTestId,
        request: &HearingTestRequest,
    ) -> Option<HearingTestView> {
        info!("Updating hearing test with ID: {}", id);
        let path = hearing_test_path(id);

        if !self.gateway.put(&path, request).await {
            warn!("Update of hearing test {} was not accepted", id);
            return None;
        }

        let refreshed = self.gateway.get(&path).await;
        if refreshed.is_none() {
            warn!("Hearing test {} was updated but could not be re-read", id);
        }
        refreshed
    }

    pub async fn delete(&self, id: HearingTestId) -> bool {
        info!("Deleting hearing test with ID: {}", id);
        self.gateway.delete(&hearing_test_path(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{request, FakeGateway};

    #[tokio::test]
    async fn test_create_then_get() {
        let client = HearingTestClient::new(FakeGateway::new());

        let created = client.create(&request("Dr. Smith", 0)).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(client.get(1).await, Some(created));
    }

    #[tokio::test]
    async fn test_list_failure_is_distinct_from_empty() {
        let client = HearingTestClient::new(FakeGateway::new());
        assert_eq!(client.list().await, Some(Vec::new()));

        client.gateway().set_offline(true);
        assert_eq!(client.list().await, None);
    }

    #[tokio::test]
    async fn test_update_issues_put_then_get() {
        let client = HearingTestClient::new(FakeGateway::new());
        client.create(&request("Dr. Smith", 0)).await.unwrap();

        let updated = client.update(1, &request("Dr. Johnson", 1)).await.unwrap();
        assert_eq!(updated.tester_name, "Dr. Johnson");

        let calls = client.gateway().calls();
        assert_eq!(
            &calls[calls.len() - 2..],
            ["PUT /api/hearingtests/1", "GET /api/hearingtests/1"]
        );
    }

    #[tokio::test]
    async fn test_update_fails_when_refetch_fails() {
        let client = HearingTestClient::new(FakeGateway::new());
        client.create(&request("Dr. Smith", 0)).await.unwrap();
        client.gateway().set_fail_gets(true);

        assert!(client.update(1, &request("Dr. Johnson", 1)).await.is_none());

        // The mutation itself went through
        client.gateway().set_fail_gets(false);
        assert_eq!(client.get(1).await.unwrap().tester_name, "Dr. Johnson");
    }

    #[tokio::test]
    async fn test_update_unknown_skips_refetch() {
        let client = HearingTestClient::new(FakeGateway::new());

        assert!(client.update(5, &request("Dr. Smith", 0)).await.is_none());
        assert_eq!(client.gateway().calls(), vec!["PUT /api/hearingtests/5"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let client = HearingTestClient::new(FakeGateway::new());
        client.create(&request("Dr. Smith", 0)).await.unwrap();

        assert!(client.delete(1).await);
        assert!(!client.delete(1).await);
        assert_eq!(client.get(1).await, None);
    }
}
