use super::ApiClient;
use super::types::{Correlation, Insight, SkinScorePoint, WeeklySummary};
use crate::errors::ApiError;
use chrono::NaiveDate;

impl ApiClient {
    pub async fn weekly_summary(&self) -> Result<WeeklySummary, ApiError> {
        self.get("/analytics/weekly-summary").await
    }

    pub async fn insights(&self) -> Result<Vec<Insight>, ApiError> {
        self.get("/analytics/insights").await
    }

    pub async fn correlations(&self) -> Result<Vec<Correlation>, ApiError> {
        self.get("/analytics/correlations").await
    }

    pub async fn skin_score_trend(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<SkinScorePoint>, ApiError> {
        let mut query = Vec::new();
        if let Some(from) = from {
            query.push(("from", from.to_string()));
        }
        if let Some(to) = to {
            query.push(("to", to.to_string()));
        }
        self.get_with_query("/analytics/skin-score-trend", &query)
            .await
    }
}
