use super::ApiClient;
use super::types::{GoalProgress, GoalRecord, GoalRequest, GoalUpdateRequest};
use crate::errors::ApiError;

/// Server-persisted goals, as opposed to the local [`crate::GoalStore`]
/// collection. The backend owns derivation here; these calls just move rows.
impl ApiClient {
    pub async fn goals(&self) -> Result<Vec<GoalRecord>, ApiError> {
        self.get("/goals").await
    }

    pub async fn goal(&self, id: i64) -> Result<GoalRecord, ApiError> {
        self.get(&format!("/goals/{id}")).await
    }

    pub async fn create_goal(&self, request: &GoalRequest) -> Result<GoalRecord, ApiError> {
        self.post("/goals", request).await
    }

    pub async fn update_goal(
        &self,
        id: i64,
        request: &GoalUpdateRequest,
    ) -> Result<GoalRecord, ApiError> {
        self.put(&format!("/goals/{id}"), request).await
    }

    pub async fn delete_goal(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/goals/{id}")).await
    }

    pub async fn goal_progress(&self, id: i64) -> Result<Vec<GoalProgress>, ApiError> {
        self.get(&format!("/goals/{id}/progress")).await
    }

    pub async fn record_progress(&self, id: i64, increment: f64) -> Result<GoalRecord, ApiError> {
        let body = serde_json::json!({ "increment": increment });
        self.post(&format!("/goals/{id}/progress"), &body).await
    }
}
