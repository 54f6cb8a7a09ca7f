use std::any::{Any, TypeId};

use flume::Sender;

use crate::Compute;

/// A pending replacement value for a registered compute.
pub(crate) struct UpdateMessage {
    pub(crate) type_id: TypeId,
    pub(crate) value: Box<dyn Any + Send>,
}

/// Write handle into a [`crate::StateCtx`].
///
/// Cheap to clone and `Send`. Computes and commands use it to publish new
/// values; updates are applied by `StateCtx::sync_computes` on the owning
/// thread, never in place.
#[derive(Clone)]
pub struct Updater {
    send: Sender<UpdateMessage>,
}

impl Updater {
    pub(crate) fn new(send: Sender<UpdateMessage>) -> Self {
        Self { send }
    }

    /// Publish a new value for a registered compute.
    pub fn set<T: Compute>(&self, value: T) {
        let message = UpdateMessage {
            type_id: TypeId::of::<T>(),
            value: Box::new(value),
        };
        if self.send.send(message).is_err() {
            log::warn!(
                "updater: context dropped, {} update lost",
                std::any::type_name::<T>()
            );
        }
    }
}
