use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_PER_PAGE: u64 = 15;

/// Page links shown on each side of the current page
pub const ON_EACH_SIDE: u64 = 3;

/// Page window for one list query. Values below 1 are clamped to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationSpec {
    page: u64,
    per_page: u64,
    paginate: bool,
}

impl Default for PaginationSpec {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            paginate: true,
        }
    }
}

impl PaginationSpec {
    pub fn new(page: u64, per_page: u64, paginate: bool) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
            paginate,
        }
    }

    /// Fetch everything in one unpaged list
    pub fn unpaged() -> Self {
        Self {
            paginate: false,
            ..Self::default()
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn paginate(&self) -> bool {
        self.paginate
    }

    pub fn set_page(&mut self, page: u64) -> &mut Self {
        self.page = page.max(1);
        self
    }

    pub fn set_per_page(&mut self, per_page: u64) -> &mut Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn set_paginate(&mut self, paginate: bool) -> &mut Self {
        self.paginate = paginate;
        self
    }

    /// Rows to skip before the current page
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// Navigation link of a paginated response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub url: Option<String>,
    pub label: String,
    pub active: bool,
}

/// One page of results plus navigation metadata.
///
/// Serializes to the same shape as a length-aware paginator's array form so
/// clients can consume either interchangeably.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LengthAwarePage {
    pub current_page: u64,
    pub data: Vec<Value>,
    pub first_page_url: String,
    pub from: Option<u64>,
    pub last_page: u64,
    pub last_page_url: String,
    pub links: Vec<PageLink>,
    pub next_page_url: Option<String>,
    pub path: String,
    pub per_page: u64,
    pub prev_page_url: Option<String>,
    pub to: Option<u64>,
    pub total: u64,
}

impl LengthAwarePage {
    pub fn new(data: Vec<Value>, total: u64, per_page: u64, current_page: u64, path: &str) -> Self {
        let per_page = per_page.max(1);
        let last_page = total.div_ceil(per_page).max(1);
        let url = |page: u64| format!("{path}?page={page}");

        let (from, to) = if data.is_empty() {
            (None, None)
        } else {
            let from = current_page.saturating_sub(1) * per_page + 1;
            (Some(from), Some(from + data.len() as u64 - 1))
        };

        let prev_page_url = (current_page > 1).then(|| url(current_page - 1));
        let next_page_url = (current_page < last_page).then(|| url(current_page + 1));

        let window = page_window(current_page, last_page);
        let mut links = Vec::with_capacity(window.len() + 2);
        links.push(PageLink {
            url: prev_page_url.clone(),
            label: "&laquo; Previous".to_string(),
            active: false,
        });
        links.extend(window.into_iter().map(|slot| match slot {
            Some(page) => PageLink {
                url: Some(url(page)),
                label: page.to_string(),
                active: page == current_page,
            },
            None => PageLink {
                url: None,
                label: "...".to_string(),
                active: false,
            },
        }));
        links.push(PageLink {
            url: next_page_url.clone(),
            label: "Next &raquo;".to_string(),
            active: false,
        });

        Self {
            current_page,
            data,
            first_page_url: url(1),
            from,
            last_page,
            last_page_url: url(last_page),
            links,
            next_page_url,
            path: path.to_string(),
            per_page,
            prev_page_url,
            to,
            total,
        }
    }
}

/// Page numbers to link, `None` marking a `...` gap.
///
/// Short paginators list every page. Longer ones keep the first two and last
/// two pages plus a slider of `ON_EACH_SIDE` pages around the current one.
fn page_window(current: u64, last: u64) -> Vec<Option<u64>> {
    let window = ON_EACH_SIDE + 4;
    if last < ON_EACH_SIDE * 2 + 8 {
        return (1..=last).map(Some).collect();
    }

    let mut pages: Vec<Option<u64>> = Vec::new();
    if current <= window {
        pages.extend((1..=window + ON_EACH_SIDE).map(Some));
        pages.push(None);
        pages.extend((last - 1..=last).map(Some));
    } else if current > last - window {
        pages.extend((1..=2).map(Some));
        pages.push(None);
        pages.extend((last - (window + ON_EACH_SIDE - 1)..=last).map(Some));
    } else {
        pages.extend((1..=2).map(Some));
        pages.push(None);
        pages.extend((current - ON_EACH_SIDE..=current + ON_EACH_SIDE).map(Some));
        pages.push(None);
        pages.extend((last - 1..=last).map(Some));
    }
    pages
}

/// Result of a list query: a page, or the full ordered projection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryOutput {
    Page(LengthAwarePage),
    All(Vec<Value>),
}

impl QueryOutput {
    pub fn rows(&self) -> &[Value] {
        match self {
            QueryOutput::Page(page) => &page.data,
            QueryOutput::All(rows) => rows,
        }
    }
}
