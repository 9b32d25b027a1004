use serde::Serialize;

/// Default page size of list views.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Offset pagination over a known total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub total: i64,
    pub size: i64,
    /// 1-based, clamped to the last page.
    pub current: i64,
    pub max: i64,
}

impl Page {
    pub fn new(total: i64, requested: i64, size: i64) -> Self {
        let size = size.max(1);
        let total = total.max(0);
        let max = (total / size + i64::from(total % size != 0)).max(1);
        let current = requested.clamp(1, max);
        Self {
            total,
            size,
            current,
            max,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.current - 1) * self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        let page = Page::new(45, 2, DEFAULT_PAGE_SIZE);
        assert_eq!(page.max, 3);
        assert_eq!(page.offset(), 20);

        let page = Page::new(45, 9, DEFAULT_PAGE_SIZE);
        assert_eq!(page.current, 3);
        assert_eq!(page.offset(), 40);
    }

    #[test]
    fn test_empty_list() {
        let page = Page::new(0, 0, DEFAULT_PAGE_SIZE);
        assert_eq!(page.current, 1);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_huge_total() {
        let page = Page::new(i64::MAX, i64::MAX, DEFAULT_PAGE_SIZE);
        assert_eq!(page.max, i64::MAX / DEFAULT_PAGE_SIZE + 1);
        assert_eq!(page.current, page.max);
        assert_eq!(page.offset(), (page.max - 1) * DEFAULT_PAGE_SIZE);

        let page = Page::new(i64::MAX, 1, i64::MAX);
        assert_eq!(page.max, 1);
        assert_eq!(page.offset(), 0);
    }
}
