//! Scenario tests for the derived directory view, driven through a full
//! `StateCtx` the way the rendering layer drives it.

mod common;

use common::user;
use roster_business::{
    BusinessConfig, Category, DirectoryFilters, DirectoryPhase, DirectoryViewCompute,
    FetchUsersCompute, FetchUsersResult, SortKey, UserRecord, build_directory_ctx,
};
use roster_states::StateCtx;

/// Context with the dataset already loaded, as if the fetch succeeded.
fn seeded_ctx(users: Vec<UserRecord>) -> StateCtx {
    let mut ctx = build_directory_ctx(BusinessConfig::default());
    ctx.updater().set(FetchUsersCompute {
        result: FetchUsersResult::Success(users),
        fetched_at: None,
    });
    ctx.sync_computes();
    ctx
}

fn visible_ids(ctx: &StateCtx) -> Vec<u64> {
    ctx.compute::<DirectoryViewCompute>()
        .page_rows()
        .iter()
        .map(|record| record.id)
        .collect()
}

#[test]
fn test_initial_view_is_initializing() {
    let ctx = build_directory_ctx(BusinessConfig::default());
    let view = ctx.compute::<DirectoryViewCompute>();

    assert_eq!(view.phase(), &DirectoryPhase::Initializing);
    assert!(view.page_rows().is_empty());
    assert_eq!(view.category_options(), [Category::All]);
}

#[test]
fn test_springfield_category_scenario() {
    // 5 records: 3 in Springfield, 2 in Shelbyville.
    let mut ctx = seeded_ctx(vec![
        user(1, "Homer", Some("Springfield"), ""),
        user(2, "Marge", Some("Springfield"), ""),
        user(3, "Ned", Some("Springfield"), ""),
        user(4, "Lenny", Some("Shelbyville"), ""),
        user(5, "Carl", Some("Shelbyville"), ""),
    ]);

    ctx.update::<DirectoryFilters>(|filters| {
        filters.set_category(Category::city("Springfield"));
    });

    let view = ctx.compute::<DirectoryViewCompute>();
    assert_eq!(view.total_pages(), 1);
    assert_eq!(view.page(), 1);
    assert_eq!(view.page_rows().len(), 3);
    assert!(
        view.page_rows()
            .iter()
            .all(|record| record.city() == Some("Springfield"))
    );
}

#[test]
fn test_ten_records_paginate_and_clamp() {
    let mut ctx = seeded_ctx(
        (1..=10)
            .map(|id| user(id, &format!("User {id:02}"), None, ""))
            .collect(),
    );

    assert_eq!(ctx.compute::<DirectoryViewCompute>().total_pages(), 3);
    assert_eq!(visible_ids(&ctx), [1, 2, 3, 4]);

    let total = ctx.compute::<DirectoryViewCompute>().total_pages();
    ctx.update::<DirectoryFilters>(|filters| filters.set_page(2, total));
    assert_eq!(visible_ids(&ctx), [5, 6, 7, 8]);

    ctx.update::<DirectoryFilters>(|filters| filters.set_page(3, total));
    assert_eq!(visible_ids(&ctx), [9, 10]);

    // Requesting page 4 clamps to the last page.
    ctx.update::<DirectoryFilters>(|filters| filters.set_page(4, total));
    assert_eq!(ctx.state::<DirectoryFilters>().page(), 3);
    assert_eq!(visible_ids(&ctx), [9, 10]);
}

#[test]
fn test_query_and_category_compose() {
    let mut ctx = seeded_ctx(vec![
        user(1, "Anna Stone", Some("Springfield"), "Acme Corp"),
        user(2, "Ben Stone", Some("Shelbyville"), "Acme Corp"),
        user(3, "Cara Hill", Some("Springfield"), "Globex"),
    ]);

    ctx.update::<DirectoryFilters>(|filters| {
        filters.set_query("acme");
        filters.set_category(Category::city("Springfield"));
    });

    assert_eq!(visible_ids(&ctx), [1]);
}

#[test]
fn test_query_change_resets_page_sort_change_does_not() {
    let mut ctx = seeded_ctx(
        (1..=10)
            .map(|id| user(id, &format!("User {id:02}"), None, ""))
            .collect(),
    );

    let total = ctx.compute::<DirectoryViewCompute>().total_pages();
    ctx.update::<DirectoryFilters>(|filters| filters.set_page(2, total));
    ctx.update::<DirectoryFilters>(|filters| filters.set_sort_key(SortKey::Company));
    assert_eq!(ctx.state::<DirectoryFilters>().page(), 2);

    ctx.update::<DirectoryFilters>(|filters| filters.set_query("user"));
    assert_eq!(ctx.state::<DirectoryFilters>().page(), 1);
}

#[test]
fn test_sorting_reorders_visible_rows() {
    let mut ctx = seeded_ctx(vec![
        user(1, "Zoe Adams", None, "Acme Corp"),
        user(2, "Amy Brown", None, "Zenith"),
        user(3, "Mia Clark", None, "Bolt"),
    ]);

    assert_eq!(visible_ids(&ctx), [2, 3, 1]);

    ctx.update::<DirectoryFilters>(|filters| filters.set_sort_key(SortKey::Company));
    assert_eq!(visible_ids(&ctx), [1, 3, 2]);
}

#[test]
fn test_failed_fetch_scenario() {
    let mut ctx = build_directory_ctx(BusinessConfig::default());
    ctx.updater().set(FetchUsersCompute {
        result: FetchUsersResult::Error("Failed to fetch users. Please try again.".to_owned()),
        fetched_at: None,
    });
    ctx.sync_computes();

    let view = ctx.compute::<DirectoryViewCompute>();
    assert_eq!(
        view.error_message(),
        Some("Failed to fetch users. Please try again.")
    );
    assert!(view.page_rows().is_empty());
    assert_eq!(view.total_pages(), 0);
    assert_eq!(view.category_options(), [Category::All]);
    assert!(ctx.compute::<FetchUsersCompute>().users().is_none());
}

#[test]
fn test_shrinking_result_set_keeps_page_in_bounds() {
    let mut ctx = seeded_ctx(
        (1..=10)
            .map(|id| user(id, &format!("User {id:02}"), None, ""))
            .collect(),
    );

    let total = ctx.compute::<DirectoryViewCompute>().total_pages();
    ctx.update::<DirectoryFilters>(|filters| filters.set_page(3, total));

    // Narrowing the query shrinks the set; the page reset keeps the view on
    // a valid page.
    ctx.update::<DirectoryFilters>(|filters| filters.set_query("User 0"));
    let view = ctx.compute::<DirectoryViewCompute>();
    assert_eq!(view.page(), 1);
    assert_eq!(view.total_pages(), 3);
    assert_eq!(visible_ids(&ctx), [1, 2, 3, 4]);
}
