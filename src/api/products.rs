use super::ApiClient;
use super::types::{ProductRecord, ProductRequest};
use crate::errors::ApiError;

impl ApiClient {
    pub async fn products(&self) -> Result<Vec<ProductRecord>, ApiError> {
        self.get("/products").await
    }

    pub async fn product(&self, id: i64) -> Result<ProductRecord, ApiError> {
        self.get(&format!("/products/{id}")).await
    }

    pub async fn create_product(&self, request: &ProductRequest) -> Result<ProductRecord, ApiError> {
        self.post("/products", request).await
    }

    pub async fn update_product(
        &self,
        id: i64,
        request: &ProductRequest,
    ) -> Result<ProductRecord, ApiError> {
        self.put(&format!("/products/{id}"), request).await
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/products/{id}")).await
    }

    pub async fn toggle_product_active(&self, id: i64) -> Result<ProductRecord, ApiError> {
        self.patch_empty(&format!("/products/{id}/toggle-active")).await
    }

    /// Impact analysis for one product. The shape is owned by the analytics
    /// backend, so it stays opaque JSON here.
    pub async fn product_impact_analysis(&self, id: i64) -> Result<serde_json::Value, ApiError> {
        self.get(&format!("/products/{id}/impact-analysis")).await
    }
}
