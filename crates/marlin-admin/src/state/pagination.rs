use marlin_shared::const_config::client::pagination::PAGINATION_DEFAULT_LIMIT;

/// 1-based page position within a filtered list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: u32,
    filtered_count: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, PAGINATION_DEFAULT_LIMIT)
    }
}

impl Pagination {
    /// A page or limit of 0 is replaced by the first page or default limit
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: if limit == 0 {
                PAGINATION_DEFAULT_LIMIT
            } else {
                limit
            },
            filtered_count: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn filtered_count(&self) -> u64 {
        self.filtered_count
    }

    pub fn set_filtered_count(&mut self, filtered_count: u64) {
        self.filtered_count = filtered_count;
    }

    /// The server counts pages from 0
    pub fn request_page(&self) -> u32 {
        self.page - 1
    }

    pub fn total_pages(&self) -> u32 {
        let pages = self.filtered_count.div_ceil(u64::from(self.limit));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    /// Returns false and stays put if `page` is outside `1..=total_pages`
    pub fn go_to_page(&mut self, page: u32) -> bool {
        if page >= 1 && page <= self.total_pages() {
            self.page = page;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self) -> bool {
        if self.has_next_page() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.has_prev_page() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn change_limit(&mut self, limit: u32) {
        if limit > 0 {
            self.limit = limit;
        }
        self.page = 1;
    }

    pub fn reset_page(&mut self) {
        self.page = 1;
    }
}
