use evo_types::{
    substitute, DescriptorKind, SubstitutionMap, TypeDescriptor, TypeVarId, UnsupportedShape,
    WildcardType,
};

use crate::GenericResolver;

/// The declaration whose bounds a candidate is checked against.
#[derive(Clone, Copy, Debug)]
pub enum BoundSource<'a> {
    TypeVariable(TypeVarId),
    Wildcard(&'a WildcardType),
}

impl GenericResolver<'_> {
    /// Whether `candidate` may be substituted for the variable or wildcard `source`.
    ///
    /// Upper bounds must accept the candidate; a wildcard's lower bounds must be assignable to
    /// it. Bounds are read with `map` in effect, and a type variable additionally sees itself
    /// bound to the candidate (`T extends Comparable<T>`).
    ///
    /// Type-variable and wildcard candidates have no defined check and are rejected with
    /// [`UnsupportedShape`] rather than approved.
    pub fn satisfies_boundaries(
        &self,
        candidate: &TypeDescriptor,
        source: BoundSource<'_>,
        map: &SubstitutionMap,
    ) -> Result<bool, UnsupportedShape> {
        match candidate.kind() {
            kind @ (DescriptorKind::TypeVariable | DescriptorKind::Wildcard) => {
                return Err(UnsupportedShape::new("satisfies_boundaries", kind));
            }
            DescriptorKind::RawClass | DescriptorKind::Parameterized | DescriptorKind::GenericArray => {}
        }

        Ok(match source {
            BoundSource::TypeVariable(id) => match self.env.type_param(id) {
                Some(def) => self.check_bounds(candidate, Some(id), &def.upper_bounds, &[], map, 0),
                None => false,
            },
            BoundSource::Wildcard(w) => {
                self.check_bounds(candidate, None, &w.upper_bounds, &w.lower_bounds, map, 0)
            }
        })
    }

    pub(crate) fn check_bounds(
        &self,
        candidate: &TypeDescriptor,
        var: Option<TypeVarId>,
        upper_bounds: &[TypeDescriptor],
        lower_bounds: &[TypeDescriptor],
        map: &SubstitutionMap,
        depth: usize,
    ) -> bool {
        let mut scoped = map.clone();
        if let Some(var) = var {
            scoped.bind(var, candidate.clone());
        }

        let uppers_ok = upper_bounds.iter().all(|bound| {
            let bound = substitute(bound, &scoped);
            if bound.has_type_variables() {
                self.can_be_instantiated_to_at(candidate, &bound, depth + 1)
            } else {
                self.is_assignable(candidate, &bound)
            }
        });
        if !uppers_ok {
            return false;
        }

        lower_bounds.iter().all(|bound| {
            let bound = substitute(bound, &scoped);
            self.is_assignable(&bound, candidate)
        })
    }
}
