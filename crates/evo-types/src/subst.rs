use std::collections::BTreeMap;

use crate::{ParameterizedType, TypeDescriptor, TypeVarId, WildcardType};

/// Bindings from type variables to descriptors for a single resolution pass.
///
/// Entries are never removed. A missing key means "not bound yet"; it never stands for
/// `Object` or any other default.
///
/// A map is owned by one resolution pass; parallel workers each build their own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubstitutionMap {
    bindings: BTreeMap<TypeVarId, TypeDescriptor>,
}

impl SubstitutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, var: TypeVarId) -> Option<&TypeDescriptor> {
        self.bindings.get(&var)
    }

    pub fn contains(&self, var: TypeVarId) -> bool {
        self.bindings.contains_key(&var)
    }

    /// Bind `var`, replacing any earlier binding for it.
    pub fn bind(&mut self, var: TypeVarId, ty: TypeDescriptor) {
        self.bindings.insert(var, ty);
    }

    /// Bind `var` unless it is already bound. Returns whether the binding was added.
    pub fn bind_if_absent(&mut self, var: TypeVarId, ty: TypeDescriptor) -> bool {
        if self.bindings.contains_key(&var) {
            return false;
        }
        self.bindings.insert(var, ty);
        true
    }

    /// Add every binding from `other`; `other` wins on conflicts.
    pub fn extend(&mut self, other: SubstitutionMap) {
        self.bindings.extend(other.bindings);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeVarId, &TypeDescriptor)> {
        self.bindings.iter().map(|(var, ty)| (*var, ty))
    }
}

impl FromIterator<(TypeVarId, TypeDescriptor)> for SubstitutionMap {
    fn from_iter<I: IntoIterator<Item = (TypeVarId, TypeDescriptor)>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

/// Structural replacement of bound type variables. Unbound variables are kept; no bound is
/// checked.
pub fn substitute(ty: &TypeDescriptor, map: &SubstitutionMap) -> TypeDescriptor {
    if map.is_empty() {
        return ty.clone();
    }
    match ty {
        TypeDescriptor::Raw(_) => ty.clone(),
        TypeDescriptor::TypeVar(id) => map.get(*id).cloned().unwrap_or_else(|| ty.clone()),
        TypeDescriptor::Parameterized(p) => TypeDescriptor::Parameterized(ParameterizedType {
            class: p.class,
            args: p.args.iter().map(|arg| substitute(arg, map)).collect(),
            owner: p.owner.as_ref().map(|owner| Box::new(substitute(owner, map))),
        }),
        TypeDescriptor::Wildcard(w) => TypeDescriptor::Wildcard(WildcardType {
            upper_bounds: w.upper_bounds.iter().map(|b| substitute(b, map)).collect(),
            lower_bounds: w.lower_bounds.iter().map(|b| substitute(b, map)).collect(),
        }),
        TypeDescriptor::GenericArray(component) => {
            TypeDescriptor::GenericArray(Box::new(substitute(component, map)))
        }
    }
}
