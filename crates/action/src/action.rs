use crate::metadata::ActionMetadata;

/// Base trait for all action types.
///
/// Provides identity and metadata; the engine uses this to look actions up
/// and to describe them in the editor. Execution logic is defined by
/// sub-traits ([`InteractiveAction`](crate::InteractiveAction)).
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn Action`.
pub trait Action: Send + Sync + 'static {
    /// Static metadata describing this action type.
    fn metadata(&self) -> &ActionMetadata;
}
