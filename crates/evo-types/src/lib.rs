//! Type descriptors and the type registry they are resolved against.
//!
//! A [`TypeDescriptor`] models a Java type expression (raw class, parameterized type, wildcard,
//! type variable, generic array). Descriptors refer to classes and type parameters by id; the
//! ids are interpreted by a [`TypeRegistry`], which supplies supertypes, declared type
//! parameters and their bounds.
//!
//! Resolution of type variables and wildcards into concrete types lives in `evo-generic`; this
//! crate only provides the data model and the structural helpers it is built on.

#![forbid(unsafe_code)]

mod descriptor;
mod error;
mod format;
mod minimal_jdk;
mod rebind;
mod store;
mod subst;
mod supertypes;

pub use descriptor::{
    DescriptorError, DescriptorKind, ParameterizedType, TypeDescriptor, WildcardType,
};
pub use error::{RebindError, UnsupportedShape};
pub use format::DisplayDescriptor;
pub use rebind::{rebind_class, rebind_type_var};
pub use store::{
    ClassDef, ClassId, ClassKind, ConstructorDef, MethodDef, TypeParamDef, TypeRegistry,
    TypeStore, TypeVarId, TypeVarOwner, WellKnownTypes,
};
pub use subst::{substitute, SubstitutionMap};
pub use supertypes::{
    declared_type_parameters, erasure, instantiate_as_supertype, is_array_supertype,
    is_raw_assignable, is_subclass, supertypes_of, RawType,
};
