use super::ApiClient;
use super::types::{UserProfile, WeeklyPlan};
use crate::errors::ApiError;
use serde::Deserialize;

impl ApiClient {
    /// Ask the AI engine for a personalized multi-week plan.
    pub async fn generate_weekly_plan(
        &self,
        profile: &UserProfile,
    ) -> Result<Vec<WeeklyPlan>, ApiError> {
        self.post("/recommendations/generate-plan", profile).await
    }

    /// Free-text skincare advice for one question against the profile.
    pub async fn ai_advice(
        &self,
        profile: &UserProfile,
        question: &str,
    ) -> Result<String, ApiError> {
        let body = serde_json::json!({
            "userProfile": profile,
            "question": question,
        });
        let response: AdviceResponse = self.post("/recommendations/ai-advice", &body).await?;
        Ok(response.advice)
    }
}

#[derive(Debug, Deserialize)]
struct AdviceResponse {
    advice: String,
}
