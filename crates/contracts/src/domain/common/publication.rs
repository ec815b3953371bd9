use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Статус публикации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl PublishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStatus::Draft => "draft",
            PublishStatus::Published => "published",
            PublishStatus::Archived => "archived",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(PublishStatus::Draft),
            "published" => Some(PublishStatus::Published),
            "archived" => Some(PublishStatus::Archived),
            _ => None,
        }
    }
}

impl std::fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Состояние публикации сущности.
///
/// Переходы между статусами не ограничены. `published_at` выставляется
/// один раз, при первом переходе в `published`, и после этого не меняется
/// и не очищается.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub status: PublishStatus,
    pub published_at: Option<DateTime<Utc>>,
}

impl Publication {
    pub fn is_published(&self) -> bool {
        self.status == PublishStatus::Published
    }

    pub fn set_status(&mut self, status: PublishStatus) {
        self.status = status;
        if status == PublishStatus::Published && self.published_at.is_none() {
            self.published_at = Some(Utc::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_publish_stamps_published_at() {
        let mut publication = Publication::default();
        assert!(publication.published_at.is_none());

        publication.set_status(PublishStatus::Published);
        assert!(publication.is_published());
        assert!(publication.published_at.is_some());
    }

    #[test]
    fn test_published_at_survives_status_cycling() {
        let mut publication = Publication::default();
        publication.set_status(PublishStatus::Published);
        let stamped = publication.published_at;

        publication.set_status(PublishStatus::Archived);
        assert_eq!(publication.published_at, stamped);

        publication.set_status(PublishStatus::Published);
        assert_eq!(publication.published_at, stamped);

        publication.set_status(PublishStatus::Draft);
        assert!(!publication.is_published());
        assert_eq!(publication.published_at, stamped);
    }

    #[test]
    fn test_draft_and_archived_do_not_stamp() {
        let mut publication = Publication::default();
        publication.set_status(PublishStatus::Archived);
        publication.set_status(PublishStatus::Draft);
        assert!(publication.published_at.is_none());
    }
}
