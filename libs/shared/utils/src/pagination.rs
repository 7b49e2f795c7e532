use serde::Serialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 20;

/// Page/limit pair as it arrived on the query string. Values are not
/// clamped: a page past the end, or a non-positive page or limit,
/// yields an empty slice rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_or(page, DEFAULT_PAGE),
            limit: parse_or(limit, DEFAULT_LIMIT),
        }
    }

    fn start(&self) -> Option<usize> {
        if self.page < 1 || self.limit < 1 {
            return None;
        }
        let start = (self.page - 1).checked_mul(self.limit)?;
        usize::try_from(start).ok()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: usize,
    pub total_pages: usize,
}

pub fn total_pages(total: usize, limit: i64) -> usize {
    match usize::try_from(limit) {
        Ok(limit) if limit > 0 => total.div_ceil(limit),
        _ => 0,
    }
}

pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> (Vec<T>, PageMeta) {
    let total = items.len();
    let meta = PageMeta {
        page: request.page,
        limit: request.limit,
        total,
        total_pages: total_pages(total, request.limit),
    };

    let page = match request.start() {
        Some(start) if start < total => {
            let take = usize::try_from(request.limit).unwrap_or(usize::MAX);
            items.into_iter().skip(start).take(take).collect()
        }
        _ => Vec::new(),
    };

    (page, meta)
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_requested_page() {
        let items: Vec<u32> = (1..=45).collect();
        let (page, meta) = paginate(items, PageRequest { page: 3, limit: 20 });

        assert_eq!(page, vec![41, 42, 43, 44, 45]);
        assert_eq!(meta.total, 45);
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn page_beyond_range_is_empty() {
        let items: Vec<u32> = (1..=5).collect();
        let (page, meta) = paginate(items, PageRequest { page: 9, limit: 20 });

        assert!(page.is_empty());
        assert_eq!(meta.total_pages, 1);
    }

    #[test]
    fn non_positive_values_yield_empty_page() {
        let (page, _) = paginate(vec![1, 2, 3], PageRequest { page: 0, limit: 20 });
        assert!(page.is_empty());

        let (page, meta) = paginate(vec![1, 2, 3], PageRequest { page: 1, limit: -5 });
        assert!(page.is_empty());
        assert_eq!(meta.total_pages, 0);
    }

    #[test]
    fn unparsable_query_values_fall_back_to_defaults() {
        let request = PageRequest::from_query(Some("abc"), None);
        assert_eq!(request, PageRequest::default());
    }
}
