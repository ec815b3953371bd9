use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, FieldError, Language, Timestamps};

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub Uuid);

impl SubscriptionId {
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

impl AggregateId for SubscriptionId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SubscriptionId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Подписка на блог. Email уникален в том виде, в каком сохранён.
///
/// confirmed_at/token смоделированы, но flow подтверждения не реализован:
/// подписка активна сразу.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub language: Language,
    #[serde(default)]
    pub is_active: bool,
    pub confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub token: String,
    pub ip_address: Option<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Subscription {
    pub fn new_for_insert(dto: &SubscribeDto, ip_address: Option<String>) -> Self {
        let language = dto
            .language
            .as_deref()
            .and_then(Language::from_code)
            .unwrap_or(Language::FALLBACK);
        Self {
            id: SubscriptionId::new_v4(),
            email: dto.email.clone(),
            name: dto.name.clone(),
            language,
            is_active: true,
            confirmed_at: None,
            token: String::new(),
            ip_address,
            timestamps: Timestamps::new(),
        }
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(FieldError::new("email", "valid email is required"));
        }
        Ok(())
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SubscribeDto {
    pub email: String,
    #[serde(default)]
    pub name: String,
    /// Код языка рассылки; неизвестный код приводится к en
    pub language: Option<String>,
}
