use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::CategoryRef;
use super::technology::TechnologyRef;
use crate::domain::common::{
    AggregateId, Featured, FieldError, Localized, Publication, PublishStatus, Seo, Timestamps,
};

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub Uuid);

impl ProjectId {
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

impl AggregateId for ProjectId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProjectId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Проект в портфолио
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub slug: String,
    pub title: Localized,
    #[serde(default)]
    pub subtitle: Localized,
    pub description: Localized,
    #[serde(default)]
    pub content: Localized,
    #[serde(flatten)]
    pub seo: Seo,
    #[serde(flatten)]
    pub publication: Publication,
    #[serde(flatten)]
    pub featured: Featured,
    /// Сырой счётчик просмотров, инкрементируется стором
    #[serde(default)]
    pub views_count: i64,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_website: String,
    #[serde(default)]
    pub project_url: String,
    #[serde(default)]
    pub github_url: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_ongoing: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
    #[serde(default)]
    pub technologies: Vec<TechnologyRef>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Project {
    pub fn new_for_insert(slug: String, dto: &ProjectDto) -> Self {
        Self {
            id: ProjectId::new_v4(),
            slug,
            title: dto.title.clone(),
            subtitle: dto.subtitle.clone(),
            description: dto.description.clone(),
            content: dto.content.clone(),
            seo: dto.seo.clone(),
            publication: Publication::default(),
            featured: Featured {
                is_featured: dto.is_featured,
                featured_order: dto.featured_order,
            },
            views_count: 0,
            client_name: dto.client_name.clone(),
            client_website: dto.client_website.clone(),
            project_url: dto.project_url.clone(),
            github_url: dto.github_url.clone(),
            start_date: dto.start_date,
            end_date: dto.end_date,
            is_ongoing: dto.is_ongoing,
            sort_order: dto.sort_order,
            is_active: dto.is_active,
            categories: Vec::new(),
            technologies: Vec::new(),
            timestamps: Timestamps::new(),
        }
    }

    /// Обновление из DTO; views_count и published_at не трогаются
    pub fn update(&mut self, dto: &ProjectDto) {
        if let Some(slug) = &dto.slug {
            self.slug = slug.clone();
        }
        self.title = dto.title.clone();
        self.subtitle = dto.subtitle.clone();
        self.description = dto.description.clone();
        self.content = dto.content.clone();
        self.seo = dto.seo.clone();
        self.featured.is_featured = dto.is_featured;
        self.featured.featured_order = dto.featured_order;
        self.client_name = dto.client_name.clone();
        self.client_website = dto.client_website.clone();
        self.project_url = dto.project_url.clone();
        self.github_url = dto.github_url.clone();
        self.start_date = dto.start_date;
        self.end_date = dto.end_date;
        self.is_ongoing = dto.is_ongoing;
        self.sort_order = dto.sort_order;
        self.is_active = dto.is_active;
    }

    pub fn apply_status(&mut self, status: PublishStatus) {
        self.publication.set_status(status);
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.slug.trim().is_empty() {
            return Err(FieldError::new("slug", "must not be empty"));
        }
        if !self.title.has_fallback() {
            return Err(FieldError::new("title", "English value is required"));
        }
        if !self.description.has_fallback() {
            return Err(FieldError::new("description", "English value is required"));
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
pub struct ProjectDto {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub title: Localized,
    #[serde(default)]
    pub subtitle: Localized,
    #[serde(default)]
    pub description: Localized,
    #[serde(default)]
    pub content: Localized,
    #[serde(default)]
    pub seo: Seo,
    /// Целевой статус публикации ("draft" | "published" | "archived")
    pub status: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub featured_order: i32,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_website: String,
    #[serde(default)]
    pub project_url: String,
    #[serde(default)]
    pub github_url: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_ongoing: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "crate::domain::common::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub category_ids: Vec<String>,
    #[serde(default)]
    pub technology_ids: Vec<String>,
}
