mod command;
mod compute;
mod ctx;
mod dep;
mod graph;
mod snapshot;
mod state;
mod state_sync_status;
mod time;
mod updater;

pub use command::Command;
pub use compute::{Compute, ComputeDeps, assign_impl};
pub use ctx::StateCtx;
pub use dep::Dep;
pub use graph::{DepRoute, Graph, TopologyError};
pub use snapshot::{CommandSnapshot, ComputeSnapshot, StateSnapshot};
pub use state::{State, state_assign_impl};
pub use state_sync_status::StateSyncStatus;
pub use time::Time;
pub use updater::Updater;
