//! Context assembly for the directory view.
//!
//! The rendering layer owns one `StateCtx` built here, reads
//! `DirectoryViewCompute` each frame, and mutates `DirectoryFilters` through
//! `StateCtx::update`.

use log::warn;
use roster_states::{StateCtx, Time};

use crate::config::BusinessConfig;
use crate::directory_view_compute::DirectoryViewCompute;
use crate::fetch_users_compute::{FetchUsersCompute, LoadUsersCommand};
use crate::filters::DirectoryFilters;

/// Register every state, compute and command the directory view needs.
pub fn register_directory(ctx: &mut StateCtx, config: BusinessConfig) {
    ctx.add_state(config);
    ctx.add_state(Time::default());
    ctx.add_state(DirectoryFilters::default());
    ctx.record_compute(FetchUsersCompute::default());
    ctx.record_compute(DirectoryViewCompute::default());
    ctx.record_command(LoadUsersCommand);

    if let Err(err) = ctx.verify_deps() {
        warn!("register_directory: {err}");
    }
}

/// Build a ready-to-load context with the derived view already settled.
pub fn build_directory_ctx(config: BusinessConfig) -> StateCtx {
    let mut ctx = StateCtx::new();
    register_directory(&mut ctx, config);
    ctx.sync_computes();
    ctx
}

/// Start the one-shot dataset fetch.
///
/// Requires a tokio runtime context (the command is spawned as a task). The
/// command itself skips when a fetch already started.
pub fn load_directory(ctx: &mut StateCtx) {
    ctx.dispatch::<LoadUsersCommand>();
}

/// Full-reload control: discard all prior view state and fetch again.
///
/// The only exit from the failed phase. Query, category, sort key and page
/// all return to their initial values.
pub fn reload_directory(ctx: &mut StateCtx) {
    ctx.update::<DirectoryFilters>(DirectoryFilters::reset);
    ctx.updater().set(FetchUsersCompute::default());
    ctx.sync_computes();
    ctx.dispatch::<LoadUsersCommand>();
}
