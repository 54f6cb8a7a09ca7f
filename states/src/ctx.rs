use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;

use flume::{Receiver, Sender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::graph::{Graph, TopologyError};
use crate::snapshot::{CommandSnapshot, ComputeSnapshot, StateSnapshot};
use crate::updater::UpdateMessage;
use crate::{Command, Compute, Dep, State, StateSyncStatus, Updater};

/// Sync passes before the context gives up on settling.
///
/// A well-formed (acyclic) dependency graph settles in at most one pass per
/// compute layer; hitting the cap means `verify_deps` was skipped on a
/// cyclic graph.
const MAX_SYNC_PASSES: usize = 64;

/// Owner of all registered states, computes and commands.
///
/// Mutations are sequential: `update` mutates a state in place, marks the
/// computes that declared it as a dependency dirty, and reruns them. Async
/// command results arrive through the updater channel and are applied by
/// `sync_computes` on the owning thread.
pub struct StateCtx {
    states: BTreeMap<TypeId, Box<dyn State>>,
    computes: BTreeMap<TypeId, Box<dyn Compute>>,
    commands: BTreeMap<TypeId, Box<dyn Command>>,

    /// Registration order; recomputation runs in this order.
    compute_order: Vec<TypeId>,
    status: BTreeMap<TypeId, StateSyncStatus>,
    /// Dependency type id -> computes that declared it.
    dependents: BTreeMap<TypeId, Vec<TypeId>>,
    graph: Graph<TypeId>,

    command_queue: Vec<TypeId>,
    send: Sender<UpdateMessage>,
    recv: Receiver<UpdateMessage>,
    tasks: JoinSet<()>,
    cancel: CancellationToken,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
            compute_order: Vec::new(),
            status: BTreeMap::new(),
            dependents: BTreeMap::new(),
            graph: Graph::new(),
            command_queue: Vec::new(),
            send,
            recv,
            tasks: JoinSet::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        self.states.insert(TypeId::of::<T>(), Box::new(state));
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let id = TypeId::of::<T>();
        let (state_deps, compute_deps) = compute.deps();
        for dep in state_deps.iter().chain(compute_deps) {
            self.dependents.entry(*dep).or_default().push(id);
            if let Err(err) = self.graph.route_to(*dep, id) {
                log::warn!("record_compute: {err}");
            }
        }
        self.status.insert(id, StateSyncStatus::BeforeInit);
        self.compute_order.push(id);
        self.computes.insert(id, Box::new(compute));
    }

    pub fn record_command<T: Command>(&mut self, command: T) {
        self.commands.insert(TypeId::of::<T>(), Box::new(command));
    }

    /// Check the declared dependency graph for cycles.
    pub fn verify_deps(&self) -> Result<(), TopologyError<TypeId>> {
        self.graph.topology_sort()
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    /// # Panics
    ///
    /// Panics if the state type is not registered.
    pub fn state<T: State>(&self) -> &T {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .unwrap_or_else(|| panic!("state {} is not registered", type_name::<T>()))
    }

    /// # Panics
    ///
    /// Panics if the state type is not registered.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        self.states
            .get_mut(&TypeId::of::<T>())
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
            .unwrap_or_else(|| panic!("state {} is not registered", type_name::<T>()))
    }

    /// # Panics
    ///
    /// Panics if the compute type is not registered.
    pub fn compute<T: Compute>(&self) -> &T {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|compute| compute.as_any().downcast_ref::<T>())
            .unwrap_or_else(|| panic!("compute {} is not registered", type_name::<T>()))
    }

    /// Mutate a state in place, then rerun its dependent computes.
    pub fn update<T: State>(&mut self, mutate: impl FnOnce(&mut T)) {
        mutate(self.state_mut::<T>());
        self.invalidate(TypeId::of::<T>());
        self.sync_computes();
    }

    fn invalidate(&mut self, changed: TypeId) {
        let Some(ids) = self.dependents.get(&changed) else {
            return;
        };
        for id in ids {
            if let Some(status) = self.status.get_mut(id)
                && *status == StateSyncStatus::Clean
            {
                *status = StateSyncStatus::Dirty;
            }
        }
    }

    /// Apply pending updates and rerun invalidated computes until the
    /// context settles.
    pub fn sync_computes(&mut self) {
        for _ in 0..MAX_SYNC_PASSES {
            let mut changed = Vec::new();
            while let Ok(message) = self.recv.try_recv() {
                let UpdateMessage { type_id, value } = message;
                self.apply(type_id, value);
                changed.push(type_id);
            }
            for id in changed {
                self.invalidate(id);
            }

            let pending: Vec<TypeId> = self
                .compute_order
                .iter()
                .copied()
                .filter(|id| {
                    matches!(
                        self.status.get(id),
                        Some(StateSyncStatus::BeforeInit | StateSyncStatus::Dirty)
                    )
                })
                .collect();

            if pending.is_empty() && self.recv.is_empty() {
                return;
            }

            for id in pending {
                self.run_compute(id);
                self.status.insert(id, StateSyncStatus::Clean);
            }
        }
        log::error!("sync_computes: not settled after {MAX_SYNC_PASSES} passes, giving up");
    }

    fn run_compute(&self, id: TypeId) {
        let Some(compute) = self.computes.get(&id) else {
            return;
        };
        let deps = Dep::new(&self.states, &self.computes);
        compute.compute(deps, self.updater());
    }

    fn apply(&mut self, type_id: TypeId, value: Box<dyn Any + Send>) {
        if let Some(compute) = self.computes.get_mut(&type_id) {
            compute.assign_box(value);
        } else if let Some(state) = self.states.get_mut(&type_id) {
            state.assign_box(value);
        } else {
            log::warn!("sync_computes: update for unregistered type {type_id:?} dropped");
        }
    }

    pub fn enqueue_command<T: Command>(&mut self) {
        let id = TypeId::of::<T>();
        if !self.commands.contains_key(&id) {
            log::warn!("enqueue_command: {} is not recorded", type_name::<T>());
            return;
        }
        self.command_queue.push(id);
    }

    /// Enqueue and immediately flush a single command.
    pub fn dispatch<T: Command>(&mut self) {
        self.enqueue_command::<T>();
        self.flush_commands();
    }

    /// Spawn every queued command onto the task set.
    ///
    /// Each command receives a snapshot taken now; results flow back through
    /// the updater channel and land on the next `sync_computes`. Requires a
    /// tokio runtime context.
    pub fn flush_commands(&mut self) {
        let queue = std::mem::take(&mut self.command_queue);
        for id in queue {
            let Some(command) = self.commands.get(&id) else {
                continue;
            };
            let snap = self.take_snapshot();
            let fut = command.run(snap, Updater::new(self.send.clone()), self.cancel.child_token());
            self.tasks.spawn(fut);
        }
    }

    fn take_snapshot(&self) -> CommandSnapshot {
        let mut states = StateSnapshot::default();
        for (id, state) in &self.states {
            if let Some(value) = state.snapshot() {
                states.insert(*id, value);
            }
        }
        let mut computes = ComputeSnapshot::default();
        for (id, compute) in &self.computes {
            if let Some(value) = compute.snapshot() {
                computes.insert(*id, value);
            }
        }
        CommandSnapshot::new(states, computes)
    }

    /// In-flight command tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn task_set_mut(&mut self) -> &mut JoinSet<()> {
        &mut self.tasks
    }

    /// Cancel in-flight commands and drop their tasks.
    pub async fn shutdown(&mut self) {
        self.cancel.cancel();
        self.tasks.abort_all();
        while self.tasks.join_next().await.is_some() {}
    }
}
