/// Sync bookkeeping for a registered compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateSyncStatus {
    /// Registered but never computed.
    #[default]
    BeforeInit,
    /// Up to date with all dependencies.
    Clean,
    /// A dependency changed since the last computation.
    Dirty,
}
