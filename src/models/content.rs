use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::non_blank;

pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(default)]
    pub total_bookings: i64,
    #[serde(default)]
    pub pending_bookings: i64,
    #[serde(default)]
    pub total_users: i64,
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub active_subscriptions: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    #[serde(alias = "date", alias = "month")]
    pub label: String,
    #[serde(default)]
    pub bookings: i64,
    #[serde(default)]
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub author: Option<BlogAuthor>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Backends send the author either populated or as a bare id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BlogAuthor {
    Profile {
        #[serde(default)]
        name: Option<String>,
        #[serde(default, rename = "firstName")]
        first_name: Option<String>,
    },
    Id(String),
}

impl Blog {
    pub fn author_name(&self) -> &str {
        match &self.author {
            Some(BlogAuthor::Profile { name, first_name }) => non_blank(name.as_deref())
                .or_else(|| non_blank(first_name.as_deref()))
                .unwrap_or(ANONYMOUS_AUTHOR),
            Some(BlogAuthor::Id(_)) | None => ANONYMOUS_AUTHOR,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBlog {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    #[default]
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyAlert {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub severity: AlertSeverity,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewEmergencyAlert {
    pub title: String,
    pub message: String,
    pub severity: AlertSeverity,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(alias = "_id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "url")]
    pub image_url: String,
    #[serde(default)]
    pub caption: Option<String>,
}
