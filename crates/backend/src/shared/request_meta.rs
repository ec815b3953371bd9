use axum::http::{header, HeaderMap};

/// Дальше этой длины user-agent не сохраняется
pub const MAX_USER_AGENT_LEN: usize = 500;

/// Метаданные клиента, снимаемые с заголовков запроса
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub ip_address: Option<String>,
    pub user_agent: String,
}

impl RequestMeta {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let ip_address = header_value(headers, "x-forwarded-for")
            // за прокси первым стоит адрес клиента
            .and_then(|v| v.split(',').next().map(|s| s.trim().to_string()))
            .filter(|s| !s.is_empty())
            .or_else(|| header_value(headers, "x-real-ip").filter(|s| !s.is_empty()));

        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(truncate_user_agent)
            .unwrap_or_default();

        Self {
            ip_address,
            user_agent,
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
}

/// Обрезает user-agent до 500 символов
pub fn truncate_user_agent(ua: &str) -> String {
    ua.chars().take(MAX_USER_AGENT_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_user_agent_is_truncated() {
        let long = "x".repeat(2000);
        assert_eq!(truncate_user_agent(&long).chars().count(), 500);
        assert_eq!(truncate_user_agent("curl/8.0"), "curl/8.0");
    }

    #[test]
    fn test_forwarded_for_takes_first_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        let meta = RequestMeta::from_headers(&headers);
        assert_eq!(meta.ip_address.as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_real_ip_fallback_and_missing_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));
        let meta = RequestMeta::from_headers(&headers);
        assert_eq!(meta.ip_address.as_deref(), Some("198.51.100.4"));

        let meta = RequestMeta::from_headers(&HeaderMap::new());
        assert!(meta.ip_address.is_none());
        assert!(meta.user_agent.is_empty());
    }
}
