//! Derived directory view: filter, sort and paginate the fetched dataset.
//!
//! `DirectoryViewCompute` depends on `DirectoryFilters` (user input) and
//! `FetchUsersCompute` (dataset), so the context reruns it after every input
//! mutation or fetch update. `derive_view` itself is pure; the compute is
//! just its registration shell.

use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use roster_states::{Compute, ComputeDeps, Dep, Updater, assign_impl};

use crate::fetch_users_compute::{FetchUsersCompute, FetchUsersResult};
use crate::filters::{Category, DirectoryFilters, SortKey};
use crate::record::UserRecord;

/// Records shown per page.
pub const PAGE_SIZE: usize = 4;

/// View-level phase: `Initializing -> Loading -> {Ready, Failed}`.
///
/// `Failed` only exits through the full-reload control; every mutation in
/// `Ready` is synchronous.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DirectoryPhase {
    /// No fetch attempted yet.
    #[default]
    Initializing,
    /// The dataset fetch is in flight.
    Loading,
    /// Dataset available; rows reflect the current inputs.
    Ready,
    /// The fetch failed; payload is the user-facing message.
    Failed(String),
}

/// The filtered, sorted, paginated subset of records currently visible.
#[derive(Debug, Clone)]
pub struct DirectoryViewCompute {
    phase: DirectoryPhase,
    page_rows: Vec<UserRecord>,
    /// Page actually sliced, clamped into `[1, total_pages]` (1 when there
    /// are no pages, so a "page 1 of 0" display never underflows).
    page: usize,
    total_pages: usize,
    category_options: Vec<Category>,
}

impl Default for DirectoryViewCompute {
    fn default() -> Self {
        Self {
            phase: DirectoryPhase::Initializing,
            page_rows: Vec::new(),
            page: 1,
            total_pages: 0,
            category_options: vec![Category::All],
        }
    }
}

impl DirectoryViewCompute {
    pub fn phase(&self) -> &DirectoryPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, DirectoryPhase::Loading)
    }

    /// The user-facing message, if the view is in the failed phase.
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            DirectoryPhase::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Rows of the current page, in display order.
    pub fn page_rows(&self) -> &[UserRecord] {
        &self.page_rows
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// `{All}` plus every distinct non-empty city in the dataset,
    /// alphabetically ordered.
    pub fn category_options(&self) -> &[Category] {
        &self.category_options
    }

    /// Whether the previous-page control should be enabled.
    pub fn has_prev(&self) -> bool {
        self.total_pages > 0 && self.page > 1
    }

    /// Whether the next-page control should be enabled.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

impl Compute for DirectoryViewCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn deps(&self) -> ComputeDeps {
        const STATE_IDS: [TypeId; 1] = [TypeId::of::<DirectoryFilters>()];
        const COMPUTE_IDS: [TypeId; 1] = [TypeId::of::<FetchUsersCompute>()];
        (&STATE_IDS, &COMPUTE_IDS)
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        let filters = deps.get_state_ref::<DirectoryFilters>();
        let fetch = deps.get_compute_ref::<FetchUsersCompute>();
        updater.set(derive_view(filters, fetch));
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

/// Compute the visible page from the current inputs.
///
/// Deterministic: same inputs, same view.
pub fn derive_view(filters: &DirectoryFilters, fetch: &FetchUsersCompute) -> DirectoryViewCompute {
    match &fetch.result {
        FetchUsersResult::Idle => DirectoryViewCompute::default(),
        FetchUsersResult::Pending => DirectoryViewCompute {
            phase: DirectoryPhase::Loading,
            ..DirectoryViewCompute::default()
        },
        FetchUsersResult::Error(message) => DirectoryViewCompute {
            phase: DirectoryPhase::Failed(message.clone()),
            ..DirectoryViewCompute::default()
        },
        FetchUsersResult::Success(users) => {
            let category_options = category_options(users);

            let mut rows: Vec<UserRecord> = users.clone();
            if !filters.query().is_empty() {
                let needle = filters.query().to_lowercase();
                rows.retain(|record| matches_query(record, &needle));
            }
            if let Category::City(city) = filters.category() {
                rows.retain(|record| record.city() == Some(city.as_str()));
            }
            sort_rows(&mut rows, filters.sort_key());

            let total_pages = page_count(rows.len());
            let page = filters.page().clamp(1, total_pages.max(1));
            let page_rows = page_slice(rows, page);

            DirectoryViewCompute {
                phase: DirectoryPhase::Ready,
                page_rows,
                page,
                total_pages,
                category_options,
            }
        }
    }
}

/// Case-insensitive substring match against the concatenated searchable
/// fields (name, username, email, company name). `needle` must already be
/// lowercased.
fn matches_query(record: &UserRecord, needle: &str) -> bool {
    let haystack = format!(
        "{} {} {} {}",
        record.name,
        record.username,
        record.email,
        record.company_name()
    )
    .to_lowercase();
    haystack.contains(needle)
}

/// Collating comparison: case-insensitive, with the raw strings as
/// tie-break so the order stays total.
fn collate_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Stable ascending sort by the selected key; ties keep dataset order.
fn sort_rows(rows: &mut [UserRecord], sort_key: SortKey) {
    match sort_key {
        SortKey::Name => rows.sort_by(|a, b| collate_cmp(&a.name, &b.name)),
        SortKey::Company => rows.sort_by(|a, b| collate_cmp(a.company_name(), b.company_name())),
    }
}

fn page_count(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

fn page_slice(rows: Vec<UserRecord>, page: usize) -> Vec<UserRecord> {
    rows.into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect()
}

/// `{All}` plus the distinct non-empty cities, alphabetically ordered.
fn category_options(users: &[UserRecord]) -> Vec<Category> {
    let cities: BTreeSet<&str> = users
        .iter()
        .filter_map(UserRecord::city)
        .filter(|city| !city.is_empty())
        .collect();

    let mut options = Vec::with_capacity(cities.len() + 1);
    options.push(Category::All);
    options.extend(cities.into_iter().map(Category::city));
    options
}
