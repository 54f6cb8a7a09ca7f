//! User-adjustable inputs of the directory view.
//!
//! The rendering layer mutates this state through `StateCtx::update`; the
//! derived view recomputes after every mutation. All inputs are
//! enum-constrained or clamped, so no mutation can fail.

use std::any::Any;
use std::fmt;
use std::str::FromStr;

use roster_states::{State, state_assign_impl};
use thiserror::Error;
use ustr::Ustr;

/// City category used for coarse filtering; `All` disables it.
///
/// Cities are interned (`Ustr`) since they are cloned and compared on every
/// recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    City(Ustr),
}

impl Category {
    pub fn city(city: &str) -> Self {
        Self::City(Ustr::from(city))
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "All",
            Self::City(city) => city.as_str(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(String);

/// Field the visible rows are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Display name.
    #[default]
    Name,
    /// Employer name; records without one sort as empty.
    Company,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Company => "company",
        }
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "name" => Ok(Self::Name),
            "company" => Ok(Self::Company),
            other => Err(UnknownSortKey(other.to_owned())),
        }
    }
}

/// Query text, category, sort key and page of the directory view.
///
/// Stored in `StateCtx`; read by the derived-view compute.
#[derive(Debug, Clone)]
pub struct DirectoryFilters {
    query: String,
    category: Category,
    sort_key: SortKey,
    /// 1-based.
    page: usize,
}

impl Default for DirectoryFilters {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: Category::All,
            sort_key: SortKey::Name,
            page: 1,
        }
    }
}

impl DirectoryFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Replace the query text. Resets the page to 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    /// Replace the selected category. Resets the page to 1.
    ///
    /// The rendering layer binds its selector to the derived option list, so
    /// the value is one of those options; a stale city simply yields an
    /// empty view.
    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        self.page = 1;
    }

    /// Replace the sort key. Does not touch the page.
    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.sort_key = sort_key;
    }

    /// Clamp the requested page into `[1, total_pages]`.
    ///
    /// No-op when there are no pages at all.
    pub fn set_page(&mut self, page: usize, total_pages: usize) {
        if total_pages == 0 {
            return;
        }
        self.page = page.clamp(1, total_pages);
    }

    /// Back to initial values; used by the full-reload control.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl State for DirectoryFilters {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
