use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use super::{backend_error_message, ApiError, BookingBackend, TokenSource};
use crate::models::{
    AdminStats, Blog, BookingRecord, BookingUpdate, ChartPoint, ContactMessage, EmergencyAlert,
    GalleryItem, NewBlog, NewEmergencyAlert, ServiceCategory, ServiceSummary, Subscription,
    UserSummary,
};

/// How many times a call may be attempted. One attempt means no retry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn bounded(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Exponential backoff: base, 2×base, 4×base, ...
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * (1u32 << (attempt.saturating_sub(1)).min(16))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPeriod {
    Week,
    Month,
    Year,
}

impl ChartPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartPeriod::Week => "week",
            ChartPeriod::Month => "month",
            ChartPeriod::Year => "year",
        }
    }
}

/// Backends answer either with the bare resource or wrapped in `{"data": ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str::<Envelope<T>>(text)
        .map(Envelope::into_inner)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
    tokens: Arc<dyn TokenSource>,
    retry: RetryPolicy,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            tokens,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let text = self.execute(method, path, body).await?;
        decode(&text)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<String, ApiError> {
        let Some(token) = self.tokens.bearer_token() else {
            tracing::warn!(%method, path, "no bearer token, request not sent");
            return Err(ApiError::Unauthorized);
        };
        let url = format!("{}{path}", self.base_url);

        let mut attempt = 1;
        loop {
            match self.send_once(&method, &url, &token, body.as_ref()).await {
                Ok(text) => {
                    if attempt > 1 {
                        tracing::debug!(%method, path, attempt, "backend call succeeded after retry");
                    }
                    return Ok(text);
                }
                Err(e) if e.is_retryable() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.delay_for(attempt);
                    tracing::warn!(
                        %method,
                        path,
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "backend call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(%method, path, error = %e, "backend call failed");
                    return Err(e);
                }
            }
        }
    }

    async fn send_once(
        &self,
        method: &Method,
        url: &str,
        token: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<String, ApiError> {
        let mut req = self.client.request(method.clone(), url).bearer_auth(token);
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if status.is_success() {
            return Ok(text);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        let message = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| backend_error_message(&v));
        Err(ApiError::Remote {
            status: status.as_u16(),
            message,
        })
    }

    // ── Bookings ──

    pub async fn list_bookings(&self) -> Result<Vec<BookingRecord>, ApiError> {
        self.request(Method::GET, "/bookings", None).await
    }

    // ── Admin dashboard ──

    pub async fn get_admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.request(Method::GET, "/admin/stats", None).await
    }

    pub async fn get_chart_data(&self, period: ChartPeriod) -> Result<Vec<ChartPoint>, ApiError> {
        let path = format!("/admin/chart-data?period={}", period.as_str());
        self.request(Method::GET, &path, None).await
    }

    // ── Blogs ──

    pub async fn list_blogs(&self) -> Result<Vec<Blog>, ApiError> {
        self.request(Method::GET, "/blogs", None).await
    }

    pub async fn create_blog(&self, blog: &NewBlog) -> Result<Blog, ApiError> {
        let body = serde_json::to_value(blog).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.request(Method::POST, "/blogs", Some(body)).await
    }

    pub async fn delete_blog(&self, id: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, &format!("/blogs/{id}"), None)
            .await
            .map(|_| ())
    }

    // ── Emergency alerts ──

    pub async fn list_emergency_alerts(&self) -> Result<Vec<EmergencyAlert>, ApiError> {
        self.request(Method::GET, "/emergency-alerts", None).await
    }

    pub async fn create_emergency_alert(
        &self,
        alert: &NewEmergencyAlert,
    ) -> Result<EmergencyAlert, ApiError> {
        let body = serde_json::to_value(alert).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.request(Method::POST, "/emergency-alerts", Some(body))
            .await
    }

    // ── Subscriptions ──

    pub async fn list_subscriptions(&self) -> Result<Vec<Subscription>, ApiError> {
        self.request(Method::GET, "/subscriptions", None).await
    }

    pub async fn delete_subscription(&self, id: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, &format!("/subscriptions/{id}"), None)
            .await
            .map(|_| ())
    }

    // ── Public site ──

    pub async fn send_contact_message(&self, message: &ContactMessage) -> Result<(), ApiError> {
        let body = serde_json::to_value(message).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.execute(Method::POST, "/contact", Some(body))
            .await
            .map(|_| ())
    }

    pub async fn subscribe_newsletter(&self, email: &str) -> Result<(), ApiError> {
        self.execute(
            Method::POST,
            "/newsletter/subscribe",
            Some(json!({ "email": email.trim() })),
        )
        .await
        .map(|_| ())
    }

    pub async fn get_gallery(&self) -> Result<Vec<GalleryItem>, ApiError> {
        self.request(Method::GET, "/gallery", None).await
    }

    pub async fn list_service_categories(&self) -> Result<Vec<ServiceCategory>, ApiError> {
        self.request(Method::GET, "/service-categories", None).await
    }
}

#[async_trait]
impl BookingBackend for BackendClient {
    async fn get_booking(&self, id: &str) -> Result<BookingRecord, ApiError> {
        self.request(Method::GET, &format!("/bookings/{id}"), None)
            .await
    }

    async fn get_user(&self, id: &str) -> Result<UserSummary, ApiError> {
        self.request(Method::GET, &format!("/users/{id}"), None).await
    }

    async fn get_service(&self, id: &str) -> Result<ServiceSummary, ApiError> {
        self.request(Method::GET, &format!("/services/{id}"), None)
            .await
    }

    async fn update_booking(
        &self,
        id: &str,
        update: &BookingUpdate,
    ) -> Result<BookingRecord, ApiError> {
        let body = serde_json::to_value(update).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.request(Method::PUT, &format!("/bookings/{id}"), Some(body))
            .await
    }

    async fn delete_booking(&self, id: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, &format!("/bookings/{id}"), None)
            .await
            .map(|_| ())
    }
}
