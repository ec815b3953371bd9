use serde::{Deserialize, Serialize};

/// Поддерживаемые языки контента
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ru,
    He,
}

impl Language {
    /// Язык, на который падает fallback переводов
    pub const FALLBACK: Language = Language::En;

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::He => "he",
        }
    }

    /// Парсинг кода языка. Неизвестный код — `None`: трактуется как
    /// отсутствующий перевод, не как ошибка.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "ru" => Some(Language::Ru),
            "he" => Some(Language::He),
            _ => None,
        }
    }

    pub fn all() -> Vec<Language> {
        vec![Language::En, Language::Ru, Language::He]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
