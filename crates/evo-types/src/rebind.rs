//! Moving descriptors between type-information sources.
//!
//! Class and type-variable ids are only meaningful for the registry that allocated them, so a
//! descriptor is carried over by name: classes are looked up by binary name and type variables
//! are located on the re-resolved owner by their declared name.

use crate::{
    ClassId, ParameterizedType, RebindError, TypeDescriptor, TypeRegistry, TypeVarId,
    TypeVarOwner, WildcardType,
};

impl TypeDescriptor {
    /// Re-derive this descriptor against `to`. `from` must be the registry it was built from.
    pub fn rebind(
        &self,
        from: &dyn TypeRegistry,
        to: &dyn TypeRegistry,
    ) -> Result<TypeDescriptor, RebindError> {
        Ok(match self {
            TypeDescriptor::Raw(class) => TypeDescriptor::Raw(rebind_class(*class, from, to)?),
            TypeDescriptor::Parameterized(p) => TypeDescriptor::Parameterized(ParameterizedType {
                class: rebind_class(p.class, from, to)?,
                args: p
                    .args
                    .iter()
                    .map(|arg| arg.rebind(from, to))
                    .collect::<Result<_, _>>()?,
                owner: match &p.owner {
                    Some(owner) => Some(Box::new(owner.rebind(from, to)?)),
                    None => None,
                },
            }),
            TypeDescriptor::Wildcard(w) => TypeDescriptor::Wildcard(WildcardType {
                upper_bounds: w
                    .upper_bounds
                    .iter()
                    .map(|b| b.rebind(from, to))
                    .collect::<Result<_, _>>()?,
                lower_bounds: w
                    .lower_bounds
                    .iter()
                    .map(|b| b.rebind(from, to))
                    .collect::<Result<_, _>>()?,
            }),
            TypeDescriptor::TypeVar(id) => TypeDescriptor::TypeVar(rebind_type_var(*id, from, to)?),
            TypeDescriptor::GenericArray(component) => {
                TypeDescriptor::GenericArray(Box::new(component.rebind(from, to)?))
            }
        })
    }

    /// Replace this descriptor with its counterpart in `to`.
    ///
    /// On failure the descriptor is left exactly as it was and `false` is returned; callers are
    /// expected to discard it.
    pub fn change_type_information_source(
        &mut self,
        from: &dyn TypeRegistry,
        to: &dyn TypeRegistry,
    ) -> bool {
        match self.rebind(from, to) {
            Ok(rebound) => {
                *self = rebound;
                true
            }
            Err(err) => {
                tracing::warn!(
                    target: "evo.types",
                    ty = %self.display(from),
                    error = %err,
                    "failed to rebind descriptor; keeping previous type information source"
                );
                false
            }
        }
    }
}

pub fn rebind_class(
    class: ClassId,
    from: &dyn TypeRegistry,
    to: &dyn TypeRegistry,
) -> Result<ClassId, RebindError> {
    let def = from
        .class(class)
        .ok_or(RebindError::UnknownClassId(class))?;
    to.lookup_class(&def.name)
        .ok_or_else(|| RebindError::ClassNotFound {
            name: def.name.clone(),
        })
}

pub fn rebind_type_var(
    id: TypeVarId,
    from: &dyn TypeRegistry,
    to: &dyn TypeRegistry,
) -> Result<TypeVarId, RebindError> {
    let def = from
        .type_param(id)
        .ok_or(RebindError::UnknownTypeVariable(id))?;
    let owner_class = rebind_class(def.owner.class(), from, to)?;
    let owner_def = to.class(owner_class).ok_or_else(|| RebindError::ClassNotFound {
        name: from
            .class(def.owner.class())
            .map(|d| d.name.clone())
            .unwrap_or_default(),
    })?;

    let candidates: &[TypeVarId] = match &def.owner {
        TypeVarOwner::Class(_) => &owner_def.type_params,
        TypeVarOwner::Method { name, arity, .. } => owner_def
            .methods
            .iter()
            .find(|m| &m.name == name && m.params.len() == *arity)
            .map(|m| m.type_params.as_slice())
            .unwrap_or_default(),
        TypeVarOwner::Constructor { index, .. } => owner_def
            .constructors
            .get(*index)
            .map(|c| c.type_params.as_slice())
            .unwrap_or_default(),
    };

    candidates
        .iter()
        .copied()
        .find(|candidate| {
            to.type_param(*candidate)
                .is_some_and(|tp| tp.name == def.name)
        })
        .ok_or_else(|| RebindError::TypeVariableNotFound {
            name: def.name.clone(),
            owner: owner_def.name.clone(),
        })
}
