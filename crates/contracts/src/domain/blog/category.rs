use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, FieldError, Localized, Timestamps};

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub Uuid);

impl CategoryId {
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

impl AggregateId for CategoryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CategoryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Категория блога
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub slug: String,
    pub name: Localized,
    #[serde(default)]
    pub description: Localized,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    pub parent_id: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    /// Количество опубликованных постов; заполняется при чтении
    #[serde(default)]
    pub posts_count: i64,
    #[serde(default)]
    pub is_active: bool,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Category {
    pub fn new_for_insert(slug: String, dto: &CategoryDto) -> Self {
        Self {
            id: CategoryId::new_v4(),
            slug,
            name: dto.name.clone(),
            description: dto.description.clone(),
            icon: dto.icon.clone(),
            color: dto.color.clone(),
            parent_id: dto.parent_id.clone(),
            sort_order: dto.sort_order,
            posts_count: 0,
            is_active: dto.is_active,
            timestamps: Timestamps::new(),
        }
    }

    pub fn update(&mut self, dto: &CategoryDto) {
        if let Some(slug) = &dto.slug {
            self.slug = slug.clone();
        }
        self.name = dto.name.clone();
        self.description = dto.description.clone();
        self.icon = dto.icon.clone();
        self.color = dto.color.clone();
        self.parent_id = dto.parent_id.clone();
        self.sort_order = dto.sort_order;
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

/// Краткая ссылка на категорию в составе поста
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: String,
    pub slug: String,
    pub name: Localized,
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CategoryDto {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub name: Localized,
    #[serde(default)]
    pub description: Localized,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    pub parent_id: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "crate::domain::common::default_true")]
    pub is_active: bool,
}
