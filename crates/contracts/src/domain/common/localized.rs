use serde::{Deserialize, Serialize};

use super::Language;

/// Локализованное текстовое поле: одно логическое поле, по значению на язык.
///
/// `en` обязателен для required-полей, `ru`/`he` могут быть пустыми.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub ru: String,
    #[serde(default)]
    pub he: String,
}

impl Localized {
    pub fn new(en: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ..Default::default()
        }
    }

    pub fn with(
        en: impl Into<String>,
        ru: impl Into<String>,
        he: impl Into<String>,
    ) -> Self {
        Self {
            en: en.into(),
            ru: ru.into(),
            he: he.into(),
        }
    }

    /// Значение на запрошенном языке; при пустом переводе — `en`.
    pub fn get(&self, lang: Language) -> &str {
        let value = match lang {
            Language::En => &self.en,
            Language::Ru => &self.ru,
            Language::He => &self.he,
        };
        if value.is_empty() {
            &self.en
        } else {
            value
        }
    }

    /// То же для кода, который мог не распарситься: неизвестный язык
    /// эквивалентен отсутствующему переводу.
    pub fn get_opt(&self, lang: Option<Language>) -> &str {
        self.get(lang.unwrap_or(Language::FALLBACK))
    }

    pub fn is_empty(&self) -> bool {
        self.en.is_empty() && self.ru.is_empty() && self.he.is_empty()
    }

    /// Required-поле обязано иметь непустое `en`-значение
    pub fn has_fallback(&self) -> bool {
        !self.en.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_translation_when_present() {
        let field = Localized::with("Hello", "Привет", "שלום");
        assert_eq!(field.get(Language::Ru), "Привет");
        assert_eq!(field.get(Language::He), "שלום");
        assert_eq!(field.get(Language::En), "Hello");
    }

    #[test]
    fn test_get_falls_back_to_en_when_translation_empty() {
        let field = Localized::new("Hello");
        assert_eq!(field.get(Language::Ru), "Hello");
        assert_eq!(field.get(Language::He), "Hello");
    }

    #[test]
    fn test_unsupported_code_falls_back_like_missing_translation() {
        let field = Localized::with("Hello", "Привет", "");
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(field.get_opt(Language::from_code("fr")), "Hello");
        assert_eq!(field.get_opt(Language::from_code("ru")), "Привет");
        assert_eq!(field.get_opt(Language::from_code("RU")), "Привет");
    }

    #[test]
    fn test_empty_field_stays_empty() {
        let field = Localized::default();
        assert_eq!(field.get(Language::Ru), "");
        assert!(field.is_empty());
        assert!(!field.has_fallback());
    }
}
