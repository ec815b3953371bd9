use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Параметры постраничного запроса: ?page=1&page_size=20
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct PageParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PageParams {
    /// Номер страницы: с единицы в API, с нуля в сторе
    pub fn page_index(&self) -> u64 {
        self.page.unwrap_or(1).max(1) - 1
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

/// Страница выдачи
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u64, params: PageParams) -> Self {
        let page_size = params.page_size();
        let total_pages = (total + page_size - 1) / page_size;
        Self {
            items,
            total,
            page: params.page_index() + 1,
            page_size,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_clamping() {
        let params = PageParams::default();
        assert_eq!(params.page_index(), 0);
        assert_eq!(params.page_size(), DEFAULT_PAGE_SIZE);

        let params = PageParams {
            page: Some(0),
            page_size: Some(100_000),
        };
        assert_eq!(params.page_index(), 0);
        assert_eq!(params.page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_total_pages_math() {
        let params = PageParams {
            page: Some(2),
            page_size: Some(20),
        };
        let page = Paginated::new(vec![1, 2, 3], 41, params);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 3);

        let empty: Paginated<i32> = Paginated::new(vec![], 0, PageParams::default());
        assert_eq!(empty.total_pages, 0);
    }
}
