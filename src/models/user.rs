use serde::{Deserialize, Serialize};

pub const UNKNOWN_USER: &str = "Unknown";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl UserSummary {
    /// Full name, else first/last, else email, else "Unknown".
    pub fn display_name(&self) -> String {
        if let Some(name) = non_blank(self.name.as_deref()) {
            return name.to_string();
        }

        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .filter_map(non_blank)
            .collect();
        if !parts.is_empty() {
            return parts.join(" ");
        }

        non_blank(self.email.as_deref())
            .unwrap_or(UNKNOWN_USER)
            .to_string()
    }
}

pub(crate) fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
