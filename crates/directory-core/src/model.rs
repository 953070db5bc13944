use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Column names expected in the source header.
pub mod columns {
    pub const NAME: &str = "Name";
    pub const STANCE: &str = "Stance on crypto";
    pub const ROLE: &str = "Role";
    pub const STATE: &str = "State";
    pub const PARTY: &str = "Party";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PoliticianRecord {
    /// Slug of the name and resolved state code, e.g. "jane-doe-ca".
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Two-letter postal code; absent when the source value did not resolve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
}

/// Filters and page window for a directory lookup. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct PoliticianQuery {
    /// Case-insensitive substring of the politician's name.
    #[serde(default)]
    pub query: Option<String>,
    /// Full state name or two-letter code. Ignored when `zip` resolves.
    #[serde(default)]
    pub state: Option<String>,
    /// Five-digit ZIP code; takes precedence over `state`.
    #[serde(default)]
    pub zip: Option<String>,
    /// Case-insensitive substring of the party.
    #[serde(default)]
    pub party: Option<String>,
    /// Case-insensitive substring of the role, e.g. "senator".
    #[serde(default)]
    pub role: Option<String>,
    /// Case-insensitive substring of the stance, e.g. "supportive".
    #[serde(default)]
    pub stance: Option<String>,
    /// 1-based page number (default: 1). Out-of-range values are clamped.
    #[serde(default)]
    pub page: Option<i64>,
    /// Records per page (default: 10).
    #[serde(default, rename = "pageSize", alias = "page_size")]
    pub page_size: Option<i64>,
}

impl PoliticianQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1) as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<T: Clone> Page<T> {
    /// Cuts one page out of `items`, clamping `page` into `1..=total_pages`.
    pub fn paginate(items: &[T], page: i64, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total = items.len();
        let total_pages = total.div_ceil(page_size).max(1);
        let page = page.clamp(1, total_pages as i64) as usize;

        let start = ((page - 1) * page_size).min(total);
        let end = start.saturating_add(page_size).min(total);

        Self {
            data: items[start..end].to_vec(),
            total,
            page,
            page_size,
            total_pages,
        }
    }
}
