use super::ApiClient;
use super::types::{DailyLog, DailyLogRequest};
use crate::errors::ApiError;
use chrono::NaiveDate;

impl ApiClient {
    pub async fn create_daily_log(&self, request: &DailyLogRequest) -> Result<DailyLog, ApiError> {
        self.post("/daily-log", request).await
    }

    pub async fn daily_log_by_date(&self, date: NaiveDate) -> Result<DailyLog, ApiError> {
        self.get(&format!("/daily-log/{date}")).await
    }

    /// Logs within an optional date range; an absent bound is omitted from
    /// the query entirely.
    pub async fn daily_log_history(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<DailyLog>, ApiError> {
        let mut query = Vec::new();
        if let Some(from) = from {
            query.push(("from", from.to_string()));
        }
        if let Some(to) = to {
            query.push(("to", to.to_string()));
        }
        self.get_with_query("/daily-log/history", &query).await
    }

    pub async fn update_daily_log(
        &self,
        id: i64,
        request: &DailyLogRequest,
    ) -> Result<DailyLog, ApiError> {
        self.put(&format!("/daily-log/{id}"), request).await
    }

    pub async fn delete_daily_log(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/daily-log/{id}")).await
    }
}
