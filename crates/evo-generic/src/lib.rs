//! Generic type resolution over [`evo_types`] descriptors.
//!
//! [`GenericResolver`] turns descriptors that still contain type variables or wildcards into
//! concrete descriptors that satisfy every declared bound, and answers whether one descriptor
//! can be instantiated to another. Resolution recurses through type arguments, bounds and
//! assignability checks; every path carries a depth that is cut off at
//! [`GenericsOptions::max_generic_depth`], so self-referential bounds such as
//! `T extends Comparable<T>` terminate.
//!
//! ```
//! use evo_generic::{GenericResolver, GenericsOptions};
//! use evo_types::{SubstitutionMap, TypeDescriptor, TypeRegistry, TypeStore};
//!
//! let store = TypeStore::with_minimal_jdk();
//! let list = store.lookup_class("java.util.List").unwrap();
//! let string = store.lookup_class("java.lang.String").unwrap();
//! let e = store.class(list).unwrap().type_params[0];
//!
//! let resolver = GenericResolver::new(&store, GenericsOptions::default());
//! let map: SubstitutionMap = [(e, TypeDescriptor::Raw(string))].into_iter().collect();
//! let ty = resolver
//!     .generic_instantiation(&TypeDescriptor::class(list, vec![TypeDescriptor::TypeVar(e)]), &map)
//!     .unwrap();
//! assert_eq!(ty, TypeDescriptor::class(list, vec![TypeDescriptor::Raw(string)]));
//! ```

#![forbid(unsafe_code)]

mod bounds;
mod engine;
mod error;
mod members;
mod oracle;
mod superclass;
mod type_map;

pub use bounds::BoundSource;
pub use engine::GenericResolver;
pub use error::{ConstructionFailed, ConstructionFailure, GenericError};
pub use members::ConcreteSignature;

/// Default for [`GenericsOptions::max_generic_depth`].
pub const DEFAULT_MAX_GENERIC_DEPTH: usize = 3;

/// Knobs consumed by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenericsOptions {
    /// Nesting level past which descriptors are returned unresolved.
    pub max_generic_depth: usize,
}

impl Default for GenericsOptions {
    fn default() -> Self {
        Self {
            max_generic_depth: DEFAULT_MAX_GENERIC_DEPTH,
        }
    }
}
