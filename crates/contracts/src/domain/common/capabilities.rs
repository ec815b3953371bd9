//! Независимые «способности» сущностей, подключаемые включением поля,
//! а не иерархией типов.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Временные метки записи
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Timestamps {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Timestamps {
    fn default() -> Self {
        Self::new()
    }
}

/// SEO-поля страницы сущности
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seo {
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub meta_keywords: String,
}

/// Рекомендуемый контент
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Featured {
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub featured_order: i32,
}
