use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub backend_url: String,
    pub prefs_database_url: String,
    pub email_forward_path: String,
    pub message_forward_path: String,
    pub backend_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            backend_url: env::var("BACKEND_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:8080/api".to_string()),
            prefs_database_url: env::var("PREFS_DATABASE_URL")
                .unwrap_or_else(|_| "concierge.db".to_string()),
            email_forward_path: env::var("EMAIL_FORWARD_PATH")
                .unwrap_or_else(|_| "/notifications/email".to_string()),
            message_forward_path: env::var("MESSAGE_FORWARD_PATH")
                .unwrap_or_else(|_| "/webhooks/message".to_string()),
            backend_timeout_secs: env::var("BACKEND_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }

    /// Absolute backend URL for a path such as `/bookings/42`.
    pub fn backend_endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.backend_url)
        } else {
            format!("{}/{path}", self.backend_url)
        }
    }
}
