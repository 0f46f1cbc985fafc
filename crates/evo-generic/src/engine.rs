use std::fmt;

use evo_types::{
    erasure, is_raw_assignable, substitute, ClassKind, ParameterizedType, RawType,
    SubstitutionMap, TypeDescriptor, TypeRegistry, TypeVarId,
};

use crate::{ConstructionFailed, ConstructionFailure, GenericsOptions};

/// Resolves descriptors containing type variables and wildcards into concrete descriptors.
///
/// A resolver only borrows the registry; it holds no per-pass state, so one resolver can be
/// shared by parallel workers as long as each of them passes its own [`SubstitutionMap`].
#[derive(Clone, Copy)]
pub struct GenericResolver<'env> {
    pub(crate) env: &'env dyn TypeRegistry,
    pub(crate) options: GenericsOptions,
}

impl fmt::Debug for GenericResolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericResolver")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<'env> GenericResolver<'env> {
    pub fn new(env: &'env dyn TypeRegistry, options: GenericsOptions) -> Self {
        Self { env, options }
    }

    pub fn env(&self) -> &'env dyn TypeRegistry {
        self.env
    }

    pub fn options(&self) -> GenericsOptions {
        self.options
    }

    pub fn max_depth(&self) -> usize {
        self.options.max_generic_depth
    }

    /// Instantiate `ty` starting at the top recursion level.
    pub fn generic_instantiation(
        &self,
        ty: &TypeDescriptor,
        map: &SubstitutionMap,
    ) -> Result<TypeDescriptor, ConstructionFailed> {
        self.instantiate(ty, map, 0)
    }

    /// Replace every type variable and wildcard reachable from `ty` with a concrete,
    /// bound-satisfying descriptor.
    ///
    /// Past the configured maximum depth the descriptor is returned unchanged; this truncation
    /// is an approximation, not an error.
    pub fn instantiate(
        &self,
        ty: &TypeDescriptor,
        map: &SubstitutionMap,
        depth: usize,
    ) -> Result<TypeDescriptor, ConstructionFailed> {
        if depth > self.max_depth() {
            tracing::trace!(
                target: "evo.generic",
                ty = %ty.display(self.env),
                depth,
                "recursion limit reached; nothing further is replaced"
            );
            return Ok(ty.clone());
        }

        tracing::debug!(
            target: "evo.generic",
            ty = %ty.display(self.env),
            bindings = map.len(),
            depth,
            "instantiating"
        );

        match ty {
            TypeDescriptor::Raw(_) => Ok(ty.clone()),
            TypeDescriptor::Parameterized(p) => {
                let args = self.instantiate_type_arguments(ty, p, map, depth)?;
                let owner = match &p.owner {
                    Some(owner) => Some(Box::new(self.instantiate(owner, map, depth + 1)?)),
                    None => None,
                };
                Ok(TypeDescriptor::Parameterized(ParameterizedType {
                    class: p.class,
                    args,
                    owner,
                }))
            }
            TypeDescriptor::Wildcard(w) => {
                self.select_for_bounds(ty, None, &w.upper_bounds, &w.lower_bounds, map, depth)
            }
            TypeDescriptor::TypeVar(id) => self.instantiate_type_variable(ty, *id, map, depth),
            TypeDescriptor::GenericArray(component) => Ok(TypeDescriptor::GenericArray(Box::new(
                self.instantiate(component, map, depth + 1)?,
            ))),
        }
    }

    /// Instantiate the arguments of `p` against the formals of its class.
    ///
    /// A wildcard argument is resolved within its own bounds and the formal's bounds, and every
    /// argument produced here must satisfy the formal it stands for (`Box<T extends Number>`
    /// never becomes `Box<String>`). Formal bounds see the arguments chosen for earlier formals.
    fn instantiate_type_arguments(
        &self,
        ty: &TypeDescriptor,
        p: &ParameterizedType,
        map: &SubstitutionMap,
        depth: usize,
    ) -> Result<Vec<TypeDescriptor>, ConstructionFailed> {
        let formals: &[TypeVarId] = match self.env.class(p.class) {
            Some(def) if def.type_params.len() == p.args.len() => &def.type_params,
            _ => &[],
        };

        let mut chosen = SubstitutionMap::new();
        let mut args = Vec::with_capacity(p.args.len());
        for (idx, arg) in p.args.iter().enumerate() {
            let formal = formals
                .get(idx)
                .and_then(|formal| Some((*formal, self.env.type_param(*formal)?)));
            let formal_bounds: Vec<TypeDescriptor> = formal
                .map(|(_, def)| def.upper_bounds.iter().map(|b| substitute(b, &chosen)).collect())
                .unwrap_or_default();

            let instantiated = match arg {
                TypeDescriptor::Wildcard(w) if depth < self.max_depth() => {
                    let mut uppers = w.upper_bounds.clone();
                    uppers.extend(formal_bounds.iter().cloned());
                    self.select_for_bounds(arg, None, &uppers, &w.lower_bounds, map, depth + 1)?
                }
                _ => self.instantiate(arg, map, depth + 1)?,
            };

            if let Some((formal, _)) = formal {
                // Arguments that were already concrete are returned as given.
                if instantiated != *arg
                    && instantiated.is_concrete()
                    && !self.check_bounds(&instantiated, Some(formal), &formal_bounds, &[], map, depth)
                {
                    tracing::debug!(
                        target: "evo.generic",
                        ty = %ty.display(self.env),
                        argument = %instantiated.display(self.env),
                        "type argument violates the bounds of its formal"
                    );
                    return Err(self.fail(ty, ConstructionFailure::BoundViolation));
                }
                chosen.bind(formal, instantiated.clone());
            }
            args.push(instantiated);
        }
        Ok(args)
    }

    fn instantiate_type_variable(
        &self,
        ty: &TypeDescriptor,
        id: TypeVarId,
        map: &SubstitutionMap,
        depth: usize,
    ) -> Result<TypeDescriptor, ConstructionFailed> {
        let Some(def) = self.env.type_param(id) else {
            return Err(self.fail(ty, ConstructionFailure::UnknownTypeVariable));
        };

        let bound_value = map.get(id).filter(|value| **value != *ty);
        let Some(bound_value) = bound_value else {
            return self.select_for_bounds(ty, Some(id), &def.upper_bounds, &[], map, depth);
        };

        let candidate = if bound_value.is_concrete() {
            bound_value.clone()
        } else {
            self.instantiate(bound_value, map, depth + 1)?
        };

        if !candidate.is_concrete() {
            // Truncated by the depth limit; there is nothing concrete to validate yet.
            return Ok(candidate);
        }

        if self.check_bounds(&candidate, Some(id), &def.upper_bounds, &[], map, depth) {
            Ok(candidate)
        } else {
            tracing::debug!(
                target: "evo.generic",
                var = %ty.display(self.env),
                candidate = %candidate.display(self.env),
                "candidate violates declared bounds"
            );
            Err(self.fail(ty, ConstructionFailure::BoundViolation))
        }
    }

    /// Pick a concrete descriptor satisfying every upper bound and not violating any lower
    /// bound. `var` is the type variable being resolved, if any; it is bound to each candidate
    /// while its own bounds are checked so self-referential bounds can be validated.
    pub(crate) fn select_for_bounds(
        &self,
        subject: &TypeDescriptor,
        var: Option<TypeVarId>,
        upper_bounds: &[TypeDescriptor],
        lower_bounds: &[TypeDescriptor],
        map: &SubstitutionMap,
        depth: usize,
    ) -> Result<TypeDescriptor, ConstructionFailed> {
        let uppers: Vec<TypeDescriptor> = if upper_bounds.is_empty() {
            vec![TypeDescriptor::Raw(self.env.well_known().object)]
        } else {
            upper_bounds.to_vec()
        };

        // `? super L` is always satisfied by `L` itself; only the upper bounds remain.
        if let Some(lower) = lower_bounds.first() {
            let candidate = self.instantiate(lower, map, depth + 1)?;
            if !candidate.is_concrete()
                || self.check_bounds(&candidate, var, &uppers, &[], map, depth)
            {
                return Ok(candidate);
            }
            return Err(self.fail(subject, ConstructionFailure::BoundViolation));
        }

        let instantiated = uppers
            .iter()
            .map(|bound| self.instantiate(bound, map, depth + 1))
            .collect::<Result<Vec<_>, _>>();
        let preferred = match &instantiated {
            Ok(bounds) => self.most_specific(bounds),
            Err(err) => {
                tracing::debug!(target: "evo.generic", error = %err, "failed to instantiate bound");
                None
            }
        };

        if let Some(candidate) = preferred {
            if candidate.is_concrete() && self.check_bounds(candidate, var, &uppers, &[], map, depth)
            {
                return Ok(candidate.clone());
            }
        }

        if let Some(found) = self.search_registry(var, &uppers, map, depth) {
            return Ok(found);
        }

        match preferred {
            Some(candidate) if !candidate.is_concrete() => {
                tracing::debug!(
                    target: "evo.generic",
                    ty = %subject.display(self.env),
                    candidate = %candidate.display(self.env),
                    "returning partially instantiated candidate"
                );
                Ok(candidate.clone())
            }
            _ => Err(self.fail(subject, ConstructionFailure::NoCandidate)),
        }
    }

    /// The bound whose erasure is a subtype of every other bound's erasure.
    fn most_specific<'a>(&self, bounds: &'a [TypeDescriptor]) -> Option<&'a TypeDescriptor> {
        let erased: Vec<Option<RawType>> =
            bounds.iter().map(|bound| erasure(self.env, bound)).collect();
        bounds.iter().enumerate().find_map(|(idx, bound)| {
            let this = erased[idx].as_ref()?;
            let below_all = erased.iter().all(|other| {
                other
                    .as_ref()
                    .is_some_and(|other| is_raw_assignable(self.env, other, this))
            });
            below_all.then_some(bound)
        })
    }

    /// First non-generic registry class satisfying every bound. Concrete classes are preferred
    /// over abstract ones and interfaces; ties break on binary name.
    fn search_registry(
        &self,
        var: Option<TypeVarId>,
        uppers: &[TypeDescriptor],
        map: &SubstitutionMap,
        depth: usize,
    ) -> Option<TypeDescriptor> {
        let erased_bounds: Vec<RawType> = uppers
            .iter()
            .filter_map(|bound| erasure(self.env, bound))
            .collect();

        let mut candidates: Vec<_> = self
            .env
            .class_ids()
            .into_iter()
            .filter_map(|id| self.env.class(id).map(|def| (id, def)))
            .filter(|(_, def)| !def.is_generic())
            .collect();
        candidates.sort_by_key(|(_, def)| (def.kind == ClassKind::Interface, def.is_abstract));

        candidates.into_iter().find_map(|(id, _)| {
            let raw = RawType::Class(id);
            if !erased_bounds
                .iter()
                .all(|bound| is_raw_assignable(self.env, bound, &raw))
            {
                return None;
            }
            let candidate = TypeDescriptor::Raw(id);
            self.check_bounds(&candidate, var, uppers, &[], map, depth)
                .then_some(candidate)
        })
    }

    pub(crate) fn fail(&self, ty: &TypeDescriptor, reason: ConstructionFailure) -> ConstructionFailed {
        ConstructionFailed::new(ty.type_name(self.env), reason)
    }
}
