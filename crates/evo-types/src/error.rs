use crate::{ClassId, DescriptorKind, TypeVarId};

/// An operation was asked of a descriptor shape for which it has no meaning.
///
/// This is a contract violation at the call site, not a runtime condition to recover from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{operation}` is not supported for a {shape}")]
pub struct UnsupportedShape {
    pub operation: &'static str,
    pub shape: DescriptorKind,
}

impl UnsupportedShape {
    pub fn new(operation: &'static str, shape: DescriptorKind) -> Self {
        Self { operation, shape }
    }
}

/// Why a descriptor could not be moved onto a new type-information source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RebindError {
    #[error("class {0:?} is not defined in the previous registry")]
    UnknownClassId(ClassId),
    #[error("type variable {0:?} is not defined in the previous registry")]
    UnknownTypeVariable(TypeVarId),
    #[error("class {name} not found in the new registry")]
    ClassNotFound { name: String },
    #[error("type variable {name} of {owner} not found in the new registry")]
    TypeVariableNotFound { name: String, owner: String },
}
