use std::any::Any;
use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::{CommandSnapshot, Updater};

/// A manual-only side effect.
///
/// Commands never run implicitly: they are enqueued with
/// `StateCtx::enqueue_command` (or `dispatch`) and spawned by
/// `flush_commands`. A command reads the snapshot taken at flush time and
/// publishes results through the [`Updater`]; the cancellation token fires
/// when the context shuts down.
pub trait Command: Any + Send {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>>;
}
