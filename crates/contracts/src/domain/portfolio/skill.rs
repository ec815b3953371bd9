use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, FieldError, Localized, Timestamps};

/// Группа навыков
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SkillGroup {
    Frontend,
    Backend,
    Database,
    Devops,
    Design,
    Soft,
    #[default]
    Other,
}

impl SkillGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillGroup::Frontend => "frontend",
            SkillGroup::Backend => "backend",
            SkillGroup::Database => "database",
            SkillGroup::Devops => "devops",
            SkillGroup::Design => "design",
            SkillGroup::Soft => "soft",
            SkillGroup::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "frontend" => Some(SkillGroup::Frontend),
            "backend" => Some(SkillGroup::Backend),
            "database" => Some(SkillGroup::Database),
            "devops" => Some(SkillGroup::Devops),
            "design" => Some(SkillGroup::Design),
            "soft" => Some(SkillGroup::Soft),
            "other" => Some(SkillGroup::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for SkillGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillId(pub Uuid);

impl SkillId {
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

impl AggregateId for SkillId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SkillId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Навык в резюме
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub slug: String,
    pub name: Localized,
    #[serde(default)]
    pub description: Localized,
    #[serde(default)]
    pub icon: String,
    /// Уровень владения, 0–100
    #[serde(default)]
    pub level: i32,
    #[serde(default)]
    pub group: SkillGroup,
    #[serde(default)]
    pub years_experience: i32,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Skill {
    pub fn new_for_insert(slug: String, dto: &SkillDto) -> Self {
        Self {
            id: SkillId::new_v4(),
            slug,
            name: dto.name.clone(),
            description: dto.description.clone(),
            icon: dto.icon.clone(),
            level: dto.level,
            group: dto.group,
            years_experience: dto.years_experience,
            position: dto.position,
            is_active: dto.is_active,
            timestamps: Timestamps::new(),
        }
    }

    pub fn update(&mut self, dto: &SkillDto) {
        if let Some(slug) = &dto.slug {
            self.slug = slug.clone();
        }
        self.name = dto.name.clone();
        self.description = dto.description.clone();
        self.icon = dto.icon.clone();
        self.level = dto.level;
        self.group = dto.group;
        self.years_experience = dto.years_experience;
        self.position = dto.position;
        self.is_active = dto.is_active;
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.slug.trim().is_empty() {
            return Err(FieldError::new("slug", "must not be empty"));
        }
        if !self.name.has_fallback() {
            return Err(FieldError::new("name", "English value is required"));
        }
        if !(0..=100).contains(&self.level) {
            return Err(FieldError::new("level", "must be between 0 and 100"));
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.timestamps.touch();
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SkillDto {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub name: Localized,
    #[serde(default)]
    pub description: Localized,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub level: i32,
    #[serde(default)]
    pub group: SkillGroup,
    #[serde(default)]
    pub years_experience: i32,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "crate::domain::common::default_true")]
    pub is_active: bool,
}
