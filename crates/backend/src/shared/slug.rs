/// Slug из заголовка: ascii-буквы и цифры в нижнем регистре,
/// остальное схлопывается в одиночные дефисы.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Slug из DTO либо из en-заголовка; не-ascii заголовок без явного slug
/// получает суффикс из uuid, чтобы не остаться с пустой строкой.
pub fn slug_or_derive(explicit: Option<&str>, fallback_title: &str) -> String {
    if let Some(slug) = explicit {
        let slug = slug.trim();
        if !slug.is_empty() {
            return slug.to_string();
        }
    }
    let derived = slugify(fallback_title);
    if derived.is_empty() {
        format!("item-{}", &uuid::Uuid::new_v4().to_string()[..8])
    } else {
        derived
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  Rust 2024  "), "rust-2024");
        assert_eq!(slugify("a--b__c"), "a-b-c");
        assert_eq!(slugify("Привет"), "");
    }

    #[test]
    fn test_slug_or_derive() {
        assert_eq!(slug_or_derive(Some("my-slug"), "Title"), "my-slug");
        assert_eq!(slug_or_derive(Some("  "), "My Title"), "my-title");
        let generated = slug_or_derive(None, "Привет");
        assert!(generated.starts_with("item-"));
    }
}
