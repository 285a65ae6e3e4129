//! Shared transport for every server-backed resource: one `reqwest` client
//! behind a cheap clone handle, bearer-token injection on the way out,
//! logging and the global 401 rule on the way back. No retry, no backoff;
//! callers decide what a failed call means for them.

mod analytics;
mod daily_logs;
mod goals;
mod products;
mod recommendations;
pub mod types;

use crate::config::ApiConfig;
use crate::errors::ApiError;
use crate::session::{Navigator, Session};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Build the shared client. Fails only if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(
        config: ApiConfig,
        session: Arc<Session>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.base_url,
                session,
                navigator,
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.inner.http.get(self.url(path))).await?;
        self.read_json(response).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let request = self.inner.http.get(self.url(path)).query(query);
        let response = self.send(request).await?;
        self.read_json(response).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: serde::Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.inner.http.post(self.url(path)).json(body);
        let response = self.send(request).await?;
        self.read_json(response).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: serde::Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.inner.http.put(self.url(path)).json(body);
        let response = self.send(request).await?;
        self.read_json(response).await
    }

    /// PATCH without a body, for flip-style endpoints.
    pub(crate) async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.inner.http.patch(self.url(path))).await?;
        self.read_json(response).await
    }

    /// DELETE, tolerating an empty (204) success body.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.send(self.inner.http.delete(self.url(path))).await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(self.failure(response).await)
    }

    /// Outgoing hook: attach the bearer token when the session has one, log,
    /// and execute. A missing token never blocks the request.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let request = match self.inner.session.token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let request = request.build()?;
        debug!("api request: {} {}", request.method(), request.url());
        let response = self.inner.http.execute(request).await?;
        debug!("api response: {} {}", response.status(), response.url());
        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        if response.status().is_success() {
            return Ok(response.json().await?);
        }
        Err(self.failure(response).await)
    }

    /// Incoming hook for non-2xx responses. A 401 is handled globally: the
    /// session is dropped and the application is routed to login no matter
    /// which resource call hit it. Everything else is handed back to the
    /// caller with the server's message.
    async fn failure(&self, response: reqwest::Response) -> ApiError {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            error!("api error: {status}, dropping session");
            self.inner.session.log_out().await;
            self.inner.navigator.go_to_login();
            return ApiError::Unauthorized;
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        error!("api error: {status} - {message}");
        ApiError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}
