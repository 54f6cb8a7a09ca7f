use std::any::{Any, TypeId};

use crate::{Dep, Updater};

/// Dependency declaration of a compute: `(state type ids, compute type ids)`.
pub type ComputeDeps = (&'static [TypeId], &'static [TypeId]);

/// A derived value with declared dependencies.
///
/// The context reruns `compute` whenever one of the declared dependencies is
/// updated. Computes must be pure over their dependencies: the new value is
/// published through the [`Updater`] and applied by the context on the next
/// sync, never written in place.
pub trait Compute: Any + Send {
    fn as_any(&self) -> &dyn Any;

    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: Dep<'_>, updater: Updater);

    /// Cloned value for command snapshots (see [`crate::State::snapshot`]).
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Shared `assign_box` body for `Compute` implementations.
pub fn assign_impl<T: Compute>(dst: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *dst = *value,
        Err(_) => log::warn!(
            "compute assign: value is not a {}, update dropped",
            std::any::type_name::<T>()
        ),
    }
}
