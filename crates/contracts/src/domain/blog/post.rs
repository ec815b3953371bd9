use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::CategoryRef;
use super::tag::TagRef;
use crate::domain::common::{
    AggregateId, Featured, FieldError, Localized, Publication, PublishStatus, Seo, Timestamps,
};

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub Uuid);

impl PostId {
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

impl AggregateId for PostId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(PostId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Статья блога
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub slug: String,
    pub title: Localized,
    #[serde(default)]
    pub subtitle: Localized,
    #[serde(default)]
    pub excerpt: Localized,
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
    pub read_time: i32,
    #[serde(default)]
    pub allow_comments: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Post {
    pub fn new_for_insert(slug: String, dto: &PostDto) -> Self {
        Self {
            id: PostId::new_v4(),
            slug,
            title: dto.title.clone(),
            subtitle: dto.subtitle.clone(),
            excerpt: dto.excerpt.clone(),
            content: dto.content.clone(),
            seo: dto.seo.clone(),
            publication: Publication::default(),
            featured: Featured {
                is_featured: dto.is_featured,
                featured_order: dto.featured_order,
            },
            views_count: 0,
            read_time: dto.read_time,
            allow_comments: dto.allow_comments,
            is_active: dto.is_active,
            categories: Vec::new(),
            tags: Vec::new(),
            timestamps: Timestamps::new(),
        }
    }

    /// Обновление полей из DTO. Счётчик просмотров и published_at
    /// намеренно не трогаются: первый принадлежит стору, второй ставится
    /// только через apply_status.
    pub fn update(&mut self, dto: &PostDto) {
        if let Some(slug) = &dto.slug {
            self.slug = slug.clone();
        }
        self.title = dto.title.clone();
        self.subtitle = dto.subtitle.clone();
        self.excerpt = dto.excerpt.clone();
        self.content = dto.content.clone();
        self.seo = dto.seo.clone();
        self.featured.is_featured = dto.is_featured;
        self.featured.featured_order = dto.featured_order;
        self.read_time = dto.read_time;
        self.allow_comments = dto.allow_comments;
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
        if !self.content.has_fallback() {
            return Err(FieldError::new("content", "English value is required"));
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
pub struct PostDto {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub title: Localized,
    #[serde(default)]
    pub subtitle: Localized,
    #[serde(default)]
    pub excerpt: Localized,
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
    pub read_time: i32,
    #[serde(default = "crate::domain::common::default_true")]
    pub allow_comments: bool,
    #[serde(default = "crate::domain::common::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub category_ids: Vec<String>,
    #[serde(default)]
    pub tag_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> PostDto {
        PostDto {
            title: Localized::new("Hello"),
            content: Localized::new("Body"),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_post_starts_as_draft_with_zero_views() {
        let post = Post::new_for_insert("hello".into(), &dto());
        assert_eq!(post.publication.status, PublishStatus::Draft);
        assert!(post.publication.published_at.is_none());
        assert_eq!(post.views_count, 0);
    }

    #[test]
    fn test_apply_status_stamps_once() {
        let mut post = Post::new_for_insert("hello".into(), &dto());
        post.apply_status(PublishStatus::Published);
        let stamped = post.publication.published_at;
        assert!(stamped.is_some());

        post.apply_status(PublishStatus::Archived);
        post.apply_status(PublishStatus::Published);
        assert_eq!(post.publication.published_at, stamped);
    }

    #[test]
    fn test_update_does_not_touch_views_or_publication() {
        let mut post = Post::new_for_insert("hello".into(), &dto());
        post.apply_status(PublishStatus::Published);
        post.views_count = 7;
        let stamped = post.publication.published_at;

        post.update(&dto());
        assert_eq!(post.views_count, 7);
        assert_eq!(post.publication.published_at, stamped);
    }

    #[test]
    fn test_validate_requires_english_title() {
        let mut post = Post::new_for_insert("hello".into(), &dto());
        post.title = Localized::with("", "Привет", "");
        let err = post.validate().unwrap_err();
        assert_eq!(err.field, "title");
    }
}
