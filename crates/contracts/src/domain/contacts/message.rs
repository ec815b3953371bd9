use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, FieldError, Timestamps};

/// Статус обработки сообщения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    New,
    InProgress,
    Replied,
    Closed,
    Spam,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::InProgress => "in_progress",
            ContactStatus::Replied => "replied",
            ContactStatus::Closed => "closed",
            ContactStatus::Spam => "spam",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "new" => Some(ContactStatus::New),
            "in_progress" => Some(ContactStatus::InProgress),
            "replied" => Some(ContactStatus::Replied),
            "closed" => Some(ContactStatus::Closed),
            "spam" => Some(ContactStatus::Spam),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactMessageId(pub Uuid);

impl ContactMessageId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ContactMessageId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ContactMessageId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Сообщение из контактной формы. Payload неизменяем; статус workflow и
/// флаг прочтения меняются независимо друг от друга.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub status: ContactStatus,
    #[serde(default)]
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl ContactMessage {
    pub fn new_for_insert(
        dto: &ContactMessageDto,
        ip_address: Option<String>,
        user_agent: String,
    ) -> Self {
        Self {
            id: ContactMessageId::new_v4(),
            name: dto.name.clone(),
            email: dto.email.clone(),
            subject: dto.subject.clone(),
            message: dto.message.clone(),
            status: ContactStatus::New,
            is_read: false,
            read_at: None,
            ip_address,
            user_agent,
            timestamps: Timestamps::new(),
        }
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.name.trim().is_empty() {
            return Err(FieldError::new("name", "must not be empty"));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(FieldError::new("email", "valid email is required"));
        }
        if self.subject.trim().is_empty() {
            return Err(FieldError::new("subject", "must not be empty"));
        }
        if self.message.trim().is_empty() {
            return Err(FieldError::new("message", "must not be empty"));
        }
        Ok(())
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContactMessageDto {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}
