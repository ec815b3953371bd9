use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, FieldError, Localized, Timestamps};

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagId(pub Uuid);

impl TagId {
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

impl AggregateId for TagId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(TagId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Тег статьи блога
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub slug: String,
    pub name: Localized,
    #[serde(default)]
    pub description: Localized,
    #[serde(default)]
    pub color: String,
    /// Количество опубликованных постов; заполняется при чтении
    #[serde(default)]
    pub posts_count: i64,
    #[serde(default)]
    pub is_active: bool,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Tag {
    pub fn new_for_insert(slug: String, dto: &TagDto) -> Self {
        Self {
            id: TagId::new_v4(),
            slug,
            name: dto.name.clone(),
            description: dto.description.clone(),
            color: dto.color.clone(),
            posts_count: 0,
            is_active: dto.is_active,
            timestamps: Timestamps::new(),
        }
    }

    pub fn update(&mut self, dto: &TagDto) {
        if let Some(slug) = &dto.slug {
            self.slug = slug.clone();
        }
        self.name = dto.name.clone();
        self.description = dto.description.clone();
        self.color = dto.color.clone();
        self.is_active = dto.is_active;
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.slug.trim().is_empty() {
            return Err(FieldError::new("slug", "must not be empty"));
        }
        if !self.name.has_fallback() {
            return Err(FieldError::new("name", "English value is required"));
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.timestamps.touch();
    }
}

/// Краткая ссылка на тег в составе поста
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRef {
    pub id: String,
    pub slug: String,
    pub name: Localized,
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TagDto {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub name: Localized,
    #[serde(default)]
    pub description: Localized,
    #[serde(default)]
    pub color: String,
    #[serde(default = "crate::domain::common::default_true")]
    pub is_active: bool,
}
