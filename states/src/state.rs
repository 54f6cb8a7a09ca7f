use std::any::Any;

/// A mutable, single-owner piece of application state.
///
/// States are registered in a [`crate::StateCtx`], mutated through
/// `StateCtx::update`, and read by computes via their declared dependencies.
/// `assign_box` lets the context apply type-erased replacement values that
/// arrive through the [`crate::Updater`] channel.
pub trait State: Any + Send {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Cloned value for command snapshots.
    ///
    /// `None` opts the state out of snapshotting; a command reading it will
    /// panic with a missing-snapshot message.
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Shared `assign_box` body for `State` implementations.
pub fn state_assign_impl<T: State>(dst: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *dst = *value,
        Err(_) => log::warn!(
            "state assign: value is not a {}, update dropped",
            std::any::type_name::<T>()
        ),
    }
}
