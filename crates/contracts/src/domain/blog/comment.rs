use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, FieldError, Timestamps};

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentId(pub Uuid);

impl CommentId {
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

impl AggregateId for CommentId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CommentId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Комментарий к статье. Создаётся неодобренным; одобрение — только
/// явным действием модерации.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: String,
    pub parent_id: Option<String>,
    pub author_name: String,
    pub author_email: String,
    #[serde(default)]
    pub author_website: String,
    pub content: String,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub is_active: bool,
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Comment {
    /// Новый комментарий из публичной формы. `is_approved` всегда false,
    /// что бы ни пришло в теле запроса — DTO поля не имеет.
    pub fn new_for_insert(
        dto: &CommentDto,
        ip_address: Option<String>,
        user_agent: String,
    ) -> Self {
        Self {
            id: CommentId::new_v4(),
            post_id: dto.post_id.clone(),
            parent_id: dto.parent_id.clone(),
            author_name: dto.author_name.clone(),
            author_email: dto.author_email.clone(),
            author_website: dto.author_website.clone(),
            content: dto.content.clone(),
            is_approved: false,
            is_active: true,
            ip_address,
            user_agent,
            timestamps: Timestamps::new(),
        }
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.author_name.trim().is_empty() {
            return Err(FieldError::new("author_name", "must not be empty"));
        }
        if self.author_email.trim().is_empty() || !self.author_email.contains('@') {
            return Err(FieldError::new("author_email", "valid email is required"));
        }
        if self.content.trim().is_empty() {
            return Err(FieldError::new("content", "must not be empty"));
        }
        Ok(())
    }
}

/// Узел дерева комментариев в публичной выдаче
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentNode {
    pub id: String,
    pub author_name: String,
    pub author_email: String,
    #[serde(default)]
    pub author_website: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<CommentNode>,
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CommentDto {
    pub post_id: String,
    pub parent_id: Option<String>,
    pub author_name: String,
    pub author_email: String,
    #[serde(default)]
    pub author_website: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submitted_comment_is_never_approved() {
        // Тело запроса пытается протащить is_approved — поле игнорируется
        let dto: CommentDto = serde_json::from_value(serde_json::json!({
            "post_id": "p1",
            "author_name": "Eve",
            "author_email": "eve@example.com",
            "content": "first!",
            "is_approved": true,
            "is_active": true
        }))
        .unwrap();

        let comment = Comment::new_for_insert(&dto, None, String::new());
        assert!(!comment.is_approved);
        assert!(comment.is_active);
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let dto = CommentDto {
            post_id: "p1".into(),
            author_name: "Eve".into(),
            author_email: "not-an-email".into(),
            content: "hi".into(),
            ..Default::default()
        };
        let comment = Comment::new_for_insert(&dto, None, String::new());
        assert_eq!(comment.validate().unwrap_err().field, "author_email");
    }
}
