use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

/// Optional `page` / `limit` query parameters shared by list routes.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageParams {
    /// Pagination is only applied when a page is requested.
    pub fn resolve(&self) -> Option<PageRequest> {
        self.page.map(|page| PageRequest {
            page: page.max(1),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    /// SQL `LIMIT` / `OFFSET` pair; sqlite treats a negative limit as unbounded.
    pub fn sql_bounds(request: Option<PageRequest>) -> (i64, i64) {
        match request {
            Some(r) => (i64::from(r.limit), r.offset()),
            None => (-1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// List response body: a plain array, or a page envelope when paginated.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Listing<T> {
    All(Vec<T>),
    Paged(Page<T>),
}

impl<T> Listing<T> {
    pub fn new(rows: Vec<T>, total: u64, request: Option<PageRequest>) -> Self {
        match request {
            None => Listing::All(rows),
            Some(r) => Listing::Paged(Page {
                data: rows,
                pagination: Pagination {
                    page: r.page,
                    limit: r.limit,
                    total,
                    total_pages: total.div_ceil(u64::from(r.limit)),
                },
            }),
        }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            Listing::All(rows) => rows,
            Listing::Paged(page) => &page.data,
        }
    }
}
