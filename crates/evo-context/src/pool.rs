use indexmap::IndexSet;
use parking_lot::RwLock;

use evo_types::TypeDescriptor;

/// Concrete classes seen during generation, in the order they were first recorded.
///
/// Entries are keyed by descriptor, so they are only valid for the registry that produced them;
/// the owning [`crate::GenerationContext`] rebuilds the pool when the registry is swapped.
#[derive(Debug, Default)]
pub struct ClassPool {
    entries: RwLock<IndexSet<TypeDescriptor>>,
}

impl ClassPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `ty`. Returns `false` if it was already present.
    pub fn record(&self, ty: TypeDescriptor) -> bool {
        self.entries.write().insert(ty)
    }

    pub fn contains(&self, ty: &TypeDescriptor) -> bool {
        self.entries.read().contains(ty)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// A copy of every entry in insertion order.
    pub fn snapshot(&self) -> Vec<TypeDescriptor> {
        self.entries.read().iter().cloned().collect()
    }

    /// Replace every entry at once.
    pub(crate) fn replace(&self, entries: IndexSet<TypeDescriptor>) {
        *self.entries.write() = entries;
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
