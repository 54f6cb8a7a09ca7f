//! One-shot dataset fetch: compute-shaped cache + manual command.
//!
//! Fetching is a side effect (network IO). Side effects must not live in
//! derived computes, because computes run implicitly on dirty propagation.
//! Instead:
//! - `FetchUsersCompute` is a compute-shaped cache holding the latest fetch
//!   result; its `compute()` is a deliberate no-op.
//! - `LoadUsersCommand` is a manual-only command you explicitly dispatch; it
//!   performs the request and updates the cache via the `Updater`.

use std::any::Any;

use chrono::{DateTime, Utc};
use log::{error, info, warn};
use roster_states::{
    Command, CommandSnapshot, Compute, ComputeDeps, Dep, Time, Updater, assign_impl,
};
use tokio_util::sync::CancellationToken;

use crate::config::BusinessConfig;
use crate::error::FetchError;
use crate::http::Client;
use crate::record::UserRecord;

/// Result of the dataset fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchUsersResult {
    /// No fetch attempted yet.
    #[default]
    Idle,
    /// Fetch in flight.
    Pending,
    /// Dataset loaded.
    Success(Vec<UserRecord>),
    /// Fetch failed; the payload is the user-facing message.
    Error(String),
}

/// Compute-shaped cache storing the fetched dataset.
///
/// It is a `Compute` only so the derived view can declare it as a
/// dependency; every update arrives from `LoadUsersCommand`.
#[derive(Debug, Clone, Default)]
pub struct FetchUsersCompute {
    pub result: FetchUsersResult,
    /// When the dataset was loaded (from the `Time` state, mockable).
    pub fetched_at: Option<DateTime<Utc>>,
}

impl FetchUsersCompute {
    /// Returns true if no fetch has been attempted yet.
    pub fn is_idle(&self) -> bool {
        matches!(self.result, FetchUsersResult::Idle)
    }

    /// Returns true if a fetch is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self.result, FetchUsersResult::Pending)
    }

    /// The dataset, if loaded.
    pub fn users(&self) -> Option<&[UserRecord]> {
        match &self.result {
            FetchUsersResult::Success(users) => Some(users.as_slice()),
            _ => None,
        }
    }

    /// The user-facing message, if the fetch failed.
    pub fn error_message(&self) -> Option<&str> {
        match &self.result {
            FetchUsersResult::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

impl Compute for FetchUsersCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn deps(&self) -> ComputeDeps {
        // Cache updated by a command; no derived dependencies.
        (&[], &[])
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {
        // Intentionally no-op; see module docs.
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

/// Manual-only command performing the one-shot dataset fetch.
///
/// Dispatch via `StateCtx::dispatch::<LoadUsersCommand>()`. Dispatching
/// again after a fetch has started does nothing; the full-reload path
/// resets the cache to `Idle` first.
#[derive(Debug, Default)]
pub struct LoadUsersCommand;

impl Command for LoadUsersCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        _cancel: CancellationToken,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>> {
        let config = snap.state::<BusinessConfig>().clone();
        let cache = snap.compute::<FetchUsersCompute>().clone();
        let now = snap.state::<Time>().to_utc();

        Box::pin(async move {
            if !cache.is_idle() {
                warn!("LoadUsersCommand: fetch already started, skipping");
                return;
            }

            updater.set(FetchUsersCompute {
                result: FetchUsersResult::Pending,
                fetched_at: None,
            });

            let url = config.users_url();
            info!("LoadUsersCommand: GET {url}");

            match fetch_users(url.as_str()).await {
                Ok(users) => {
                    info!("LoadUsersCommand: loaded {} users", users.len());
                    updater.set(FetchUsersCompute {
                        result: FetchUsersResult::Success(users),
                        fetched_at: Some(now),
                    });
                }
                Err(err) => {
                    error!("LoadUsersCommand: {err}");
                    updater.set(FetchUsersCompute {
                        result: FetchUsersResult::Error(err.user_message().to_owned()),
                        fetched_at: None,
                    });
                }
            }
        })
    }
}

async fn fetch_users(url: &str) -> Result<Vec<UserRecord>, FetchError> {
    let response = Client::get(url)
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    if !response.is_success() {
        return Err(FetchError::Status(response.status));
    }

    response
        .json::<Vec<UserRecord>>()
        .map_err(|e| FetchError::Decode(e.to_string()))
}
