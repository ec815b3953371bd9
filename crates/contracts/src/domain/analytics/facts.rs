//! Факты аналитики. Всё append-mostly: изменяется только Visitor
//! (счётчик визитов и last_visit_at при повторной идентификации).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{FieldError, Timestamps};

/// Посетитель, идентифицируемый непрозрачным ключом со стороны клиента
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visitor {
    pub id: String,
    pub visitor_key: String,
    pub first_visit_at: DateTime<Utc>,
    pub last_visit_at: DateTime<Utc>,
    pub visits_count: i64,
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub referrer: String,
    #[serde(default)]
    pub is_bot: bool,
}

/// Сессия посетителя
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitorSession {
    pub id: String,
    pub session_key: String,
    pub visitor_key: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub entry_page: String,
    #[serde(default)]
    pub exit_page: String,
    pub pages_viewed: i64,
    /// Сбрасывается при просмотре второй страницы
    pub is_bounce: bool,
}

/// Просмотр страницы
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageView {
    pub id: String,
    pub path: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub referrer: String,
    #[serde(default)]
    pub language: String,
    pub visitor_key: String,
    #[serde(default)]
    pub session_key: String,
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub is_mobile: bool,
    #[serde(default)]
    pub duration: i64,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

/// Произвольное событие на сайте
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub path: String,
    pub visitor_key: String,
    #[serde(default)]
    pub session_key: String,
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrackPageViewDto {
    pub visitor_key: String,
    #[serde(default)]
    pub session_key: String,
    pub path: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub referrer: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub is_mobile: bool,
}

impl TrackPageViewDto {
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.visitor_key.trim().is_empty() {
            return Err(FieldError::new("visitor_key", "must not be empty"));
        }
        if self.path.trim().is_empty() {
            return Err(FieldError::new("path", "must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrackEventDto {
    pub visitor_key: String,
    #[serde(default)]
    pub session_key: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub path: String,
}

impl TrackEventDto {
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.visitor_key.trim().is_empty() {
            return Err(FieldError::new("visitor_key", "must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(FieldError::new("name", "must not be empty"));
        }
        Ok(())
    }
}
