use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, FieldError, Localized, Timestamps};

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TechnologyId(pub Uuid);

impl TechnologyId {
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

impl AggregateId for TechnologyId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(TechnologyId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Технология, используемая в проектах. Название не локализуется —
/// имена технологий едины для всех языков.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technology {
    pub id: TechnologyId,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Localized,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Technology {
    pub fn new_for_insert(slug: String, dto: &TechnologyDto) -> Self {
        Self {
            id: TechnologyId::new_v4(),
            slug,
            name: dto.name.clone(),
            description: dto.description.clone(),
            icon: dto.icon.clone(),
            color: dto.color.clone(),
            website: dto.website.clone(),
            version: dto.version.clone(),
            position: dto.position,
            is_active: dto.is_active,
            timestamps: Timestamps::new(),
        }
    }

    pub fn update(&mut self, dto: &TechnologyDto) {
        if let Some(slug) = &dto.slug {
            self.slug = slug.clone();
        }
        self.name = dto.name.clone();
        self.description = dto.description.clone();
        self.icon = dto.icon.clone();
        self.color = dto.color.clone();
        self.website = dto.website.clone();
        self.version = dto.version.clone();
        self.position = dto.position;
        self.is_active = dto.is_active;
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.slug.trim().is_empty() {
            return Err(FieldError::new("slug", "must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(FieldError::new("name", "must not be empty"));
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.timestamps.touch();
    }
}

/// Краткая ссылка на технологию в составе проекта
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnologyRef {
    pub id: String,
    pub slug: String,
    pub name: String,
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TechnologyDto {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Localized,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "crate::domain::common::default_true")]
    pub is_active: bool,
}
