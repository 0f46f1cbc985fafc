//! Generation session state shared by the search workers.
//!
//! A [`GenerationContext`] owns the current type registry, the resolver options and every cache
//! derived from the registry. Workers borrow it immutably and resolve in parallel, each with its
//! own substitution map; swapping the registry requires `&mut` access, so it can only happen once
//! every in-flight resolution has finished.

#![forbid(unsafe_code)]

mod pool;

use std::fmt;
use std::sync::Arc;

use evo_config::EvoConfig;
use evo_generic::{ConstructionFailed, GenericResolver, GenericsOptions};
use evo_types::{SubstitutionMap, TypeDescriptor, TypeRegistry};
use indexmap::IndexSet;

pub use pool::ClassPool;

pub type SharedRegistry = Arc<dyn TypeRegistry + Send + Sync>;

/// What happened to the cached classes during [`GenerationContext::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetReport {
    pub previous_generation: u64,
    pub generation: u64,
    /// Pool entries carried over to the new registry.
    pub retained: usize,
    /// Pool entries that no longer resolve, rendered against the old registry.
    pub dropped: Vec<String>,
}

pub struct GenerationContext {
    registry: SharedRegistry,
    options: GenericsOptions,
    pool: ClassPool,
    generation: u64,
}

impl fmt::Debug for GenerationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationContext")
            .field("options", &self.options)
            .field("pool", &self.pool.len())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl GenerationContext {
    pub fn new(registry: SharedRegistry, options: GenericsOptions) -> Self {
        Self {
            registry,
            options,
            pool: ClassPool::new(),
            generation: 0,
        }
    }

    pub fn from_config(registry: SharedRegistry, config: &EvoConfig) -> Self {
        Self::new(registry, config.generics_options())
    }

    pub fn registry(&self) -> &dyn TypeRegistry {
        self.registry.as_ref()
    }

    pub fn options(&self) -> GenericsOptions {
        self.options
    }

    /// Incremented on every [`reset`](Self::reset).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pool(&self) -> &ClassPool {
        &self.pool
    }

    pub fn resolver(&self) -> GenericResolver<'_> {
        GenericResolver::new(self.registry(), self.options)
    }

    pub fn generic_instantiation(
        &self,
        ty: &TypeDescriptor,
        map: &SubstitutionMap,
    ) -> Result<TypeDescriptor, ConstructionFailed> {
        self.resolver().generic_instantiation(ty, map)
    }

    /// Add a class seen during generation to the pool.
    ///
    /// Only concrete raw or parameterized descriptors of known classes are pooled; anything else
    /// is refused and `false` is returned, as is a descriptor that is already present.
    pub fn record_concrete_class(&self, ty: TypeDescriptor) -> bool {
        let known = ty
            .class_id()
            .is_some_and(|class| self.registry.class(class).is_some());
        if !known || !ty.is_concrete() {
            tracing::debug!(
                target: "evo.context",
                ty = %ty.display(self.registry()),
                "refusing to pool a non-concrete or unknown type"
            );
            return false;
        }
        self.pool.record(ty)
    }

    /// Pooled classes that can be instantiated to `slot`, in the order they were recorded.
    pub fn candidates_for(&self, slot: &TypeDescriptor) -> Vec<TypeDescriptor> {
        let resolver = self.resolver();
        self.pool
            .snapshot()
            .into_iter()
            .filter(|candidate| resolver.can_be_instantiated_to(candidate, slot))
            .collect()
    }

    /// Swap in `registry` and rebuild every cache derived from the old one.
    ///
    /// Pool entries are rebound by name; those missing from the new registry are dropped and
    /// reported rather than kept stale.
    pub fn reset(&mut self, registry: SharedRegistry) -> ResetReport {
        let previous = self.generation;
        let old = Arc::clone(&self.registry);

        let mut retained = IndexSet::new();
        let mut dropped = Vec::new();
        for entry in self.pool.snapshot() {
            match entry.rebind(old.as_ref(), registry.as_ref()) {
                Ok(rebound) => {
                    retained.insert(rebound);
                }
                Err(err) => {
                    let name = entry.type_name(old.as_ref());
                    tracing::warn!(
                        target: "evo.context",
                        ty = %name,
                        error = %err,
                        "dropping pooled class missing from the new registry"
                    );
                    dropped.push(name);
                }
            }
        }

        let report = ResetReport {
            previous_generation: previous,
            generation: previous + 1,
            retained: retained.len(),
            dropped,
        };

        self.pool.replace(retained);
        self.registry = registry;
        self.generation = report.generation;

        tracing::info!(
            target: "evo.context",
            generation = report.generation,
            retained = report.retained,
            dropped = report.dropped.len(),
            "type registry replaced"
        );
        report
    }

    /// Drop every cache derived from the registry without swapping it.
    pub fn clear_caches(&mut self) {
        self.pool.clear();
        tracing::debug!(target: "evo.context", generation = self.generation, "caches cleared");
    }
}
