mod config;
mod directory_view_compute;
mod error;
mod fetch_users_compute;
mod filters;
pub mod http;
mod record;
mod setup;
mod test_utils;

pub use config::BusinessConfig;
pub use directory_view_compute::{
    DirectoryPhase, DirectoryViewCompute, PAGE_SIZE, derive_view,
};
pub use error::FetchError;
pub use fetch_users_compute::{FetchUsersCompute, FetchUsersResult, LoadUsersCommand};
pub use filters::{Category, DirectoryFilters, SortKey, UnknownSortKey};
pub use record::{Address, Company, UserRecord};
pub use setup::{build_directory_ctx, load_directory, register_directory, reload_directory};
