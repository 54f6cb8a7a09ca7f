use std::any::{TypeId, type_name};
use std::collections::BTreeMap;

use crate::{Compute, State};

/// Borrowed view of the registered states and computes, handed to
/// [`Compute::compute`] for the duration of one recomputation.
pub struct Dep<'a> {
    states: &'a BTreeMap<TypeId, Box<dyn State>>,
    computes: &'a BTreeMap<TypeId, Box<dyn Compute>>,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(
        states: &'a BTreeMap<TypeId, Box<dyn State>>,
        computes: &'a BTreeMap<TypeId, Box<dyn Compute>>,
    ) -> Self {
        Self { states, computes }
    }

    /// # Panics
    ///
    /// Panics if the state type is not registered in the context.
    pub fn get_state_ref<T: State>(&self) -> &'a T {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .unwrap_or_else(|| panic!("state {} is not registered", type_name::<T>()))
    }

    /// # Panics
    ///
    /// Panics if the compute type is not registered in the context.
    pub fn get_compute_ref<T: Compute>(&self) -> &'a T {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|compute| compute.as_any().downcast_ref::<T>())
            .unwrap_or_else(|| panic!("compute {} is not registered", type_name::<T>()))
    }
}
