//! Paged listing primitives.
//!
//! # Responsibility
//! - Parse `page`/`size`/`sort` request parameters into a [`PageRequest`].
//! - Describe one page of results and its navigation links.
//!
//! # Invariants
//! - Pages are 0-based; `size` is always at least 1.
//! - `total_pages == ceil(total_elements / size)`.
//! - Link header order is `next`, `prev`, `last`, `first`; `next`/`prev` are
//!   omitted on the last/first page.

use crate::model::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*(?:,\s*((?i:asc|desc))\s*)?$")
        .expect("valid sort regex")
});

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Bounds applied when turning client parameters into a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    pub default_size: u32,
    pub max_size: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}

impl PageLimits {
    /// Clamps a requested size into `1..=max_size`; `0` means "default".
    pub fn clamp_size(&self, requested: Option<u32>) -> u32 {
        let max_size = self.max_size.max(1);
        match requested {
            None | Some(0) => self.default_size.clamp(1, max_size),
            Some(size) => size.min(max_size),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One sort key: JSON property name plus direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }

    /// Parses `field` or `field,asc|desc` (direction case-insensitive).
    ///
    /// Returns `None` for anything else; callers attach entity context.
    pub fn parse(value: &str) -> Option<Self> {
        let captures = SORT_RE.captures(value)?;
        let direction = match captures.get(2) {
            Some(direction) if direction.as_str().eq_ignore_ascii_case("desc") => Direction::Desc,
            _ => Direction::Asc,
        };
        Some(Self {
            property: captures[1].to_string(),
            direction,
        })
    }
}

/// Requested page window and ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    /// Unsorted request; `size` below 1 is raised to 1.
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
            sort: Vec::new(),
        }
    }

    pub fn sorted_by(mut self, order: SortOrder) -> Self {
        self.sort.push(order);
        self
    }

    /// Builds a request from raw query parameters.
    ///
    /// `entity` only labels sort errors; sortability is checked by endpoints.
    ///
    /// # Errors
    /// - `InvalidPaging` when `page` or `size` is not a non-negative integer.
    /// - `InvalidSort` when a `sort` value is malformed.
    pub fn from_params(
        entity: &'static str,
        page: Option<&str>,
        size: Option<&str>,
        sort: &[&str],
        limits: &PageLimits,
    ) -> Result<Self, ValidationError> {
        let page = parse_param("page", page)?.unwrap_or(0);
        let size = limits.clamp_size(parse_param("size", size)?);
        let sort = sort
            .iter()
            .filter(|value| !value.trim().is_empty())
            .map(|value| {
                SortOrder::parse(value).ok_or_else(|| ValidationError::InvalidSort {
                    entity,
                    sort: (*value).to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { page, size, sort })
    }

    /// Row offset of the first record on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// Appends `id ASC` unless `id` is already a sort key, making the order
    /// total so consecutive pages never overlap.
    pub fn with_id_tiebreak(mut self, id_property: &str) -> Self {
        if !self.sort.iter().any(|order| order.property == id_property) {
            self.sort.push(SortOrder::asc(id_property));
        }
        self
    }
}

fn parse_param(parameter: &'static str, value: Option<&str>) -> Result<Option<u32>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ValidationError::InvalidPaging {
                parameter,
                value: raw.to_string(),
            }),
    }
}

/// One page of records plus the metadata needed for navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    /// 0-based page index.
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }

    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.number) + 1 < self.total_pages()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }

    /// Renders the RFC 5988 `Link` header value for this page.
    pub fn link_header(&self, base_url: &str) -> String {
        let page_uri = |page: u64| format!("<{base_url}?page={page}&size={}>", self.size);
        let number = u64::from(self.number);
        let mut links = Vec::with_capacity(4);
        if self.has_next() {
            links.push(format!("{}; rel=\"next\"", page_uri(number + 1)));
        }
        if !self.is_first() {
            links.push(format!("{}; rel=\"prev\"", page_uri(number - 1)));
        }
        let last_page = self.total_pages().saturating_sub(1);
        links.push(format!("{}; rel=\"last\"", page_uri(last_page)));
        links.push(format!("{}; rel=\"first\"", page_uri(0)));
        links.join(",")
    }
}
