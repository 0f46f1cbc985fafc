use std::collections::HashSet;

use evo_types::{
    erasure, instantiate_as_supertype, is_array_supertype, is_raw_assignable, RawType,
    SubstitutionMap, TypeDescriptor, TypeVarId, WildcardType,
};

use crate::GenericResolver;

impl GenericResolver<'_> {
    /// Whether `source`, possibly after binding its variables and wildcards, can be used where
    /// `target` is expected.
    ///
    /// This is a boolean oracle: construction failures and registry misses answer `false`.
    pub fn can_be_instantiated_to(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        self.can_be_instantiated_to_at(source, target, 0)
    }

    pub(crate) fn can_be_instantiated_to_at(
        &self,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
        depth: usize,
    ) -> bool {
        let (Some(source_raw), Some(target_raw)) =
            (erasure(self.env, source), erasure(self.env, target))
        else {
            return false;
        };
        if !is_raw_assignable(self.env, &target_raw, &source_raw) {
            return false;
        }

        if depth > self.max_depth() {
            return source.is_concrete() && self.is_assignable(source, target);
        }

        let map = self.instantiation_context(source, target);
        match self.instantiate(source, &map, depth) {
            Ok(instantiated) if instantiated == *source => {
                // The erasure gate alone admits `List<Integer>` for `List<String>`; require real
                // assignability of the concrete source.
                source.is_concrete() && self.is_assignable(source, target)
            }
            Ok(instantiated) => self.can_be_instantiated_to_at(&instantiated, target, depth + 1),
            Err(err) => {
                tracing::debug!(
                    target: "evo.generic",
                    source = %source.display(self.env),
                    target_ty = %target.display(self.env),
                    error = %err,
                    "failed to instantiate"
                );
                false
            }
        }
    }

    /// Bindings under which `source` is instantiated when checked against `target`: the
    /// target's own type-variable map plus the source's formals unified with the target's
    /// arguments through the inheritance chain.
    pub fn instantiation_context(
        &self,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> SubstitutionMap {
        let mut map = self.type_variable_map(target);
        if let TypeDescriptor::Parameterized(target) = target {
            if let Some(RawType::Class(class)) = erasure(self.env, source) {
                map.extend(self.determine_type_arguments(class, target));
            }
        }
        map
    }

    /// Java assignment compatibility between descriptors.
    ///
    /// Type arguments are invariant unless the target argument is a wildcard; a raw type on
    /// either side is accepted as an unchecked conversion. A free type variable in the target
    /// accepts anything whose erasure fits the variable's bounds.
    pub fn is_assignable(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        self.assignable(source, target, &mut HashSet::new())
    }

    fn assignable(
        &self,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
        seen: &mut HashSet<TypeVarId>,
    ) -> bool {
        if source == target {
            return true;
        }

        match target {
            TypeDescriptor::TypeVar(var) => return self.fits_erased_bounds(source, *var),
            TypeDescriptor::Wildcard(w) => return self.contained_by(source, w, seen),
            _ => {}
        }

        match source {
            TypeDescriptor::TypeVar(var) => {
                if !seen.insert(*var) {
                    return false;
                }
                let bounds = self
                    .env
                    .type_param(*var)
                    .map(|def| def.upper_bounds.clone())
                    .unwrap_or_default();
                let ok = bounds.iter().any(|bound| self.assignable(bound, target, seen));
                seen.remove(var);
                ok
            }
            TypeDescriptor::Wildcard(w) => w
                .effective_upper_bounds(self.env)
                .iter()
                .any(|bound| self.assignable(bound, target, seen)),
            TypeDescriptor::GenericArray(component) => match target {
                TypeDescriptor::GenericArray(target_component) => {
                    self.assignable(component, target_component, seen)
                }
                TypeDescriptor::Raw(class) => is_array_supertype(self.env, *class),
                _ => false,
            },
            TypeDescriptor::Raw(_) | TypeDescriptor::Parameterized(_) => {
                let Some(target_class) = target.class_id() else {
                    return false;
                };
                let Some(view) = instantiate_as_supertype(self.env, source, target_class) else {
                    return false;
                };
                match (&view, target) {
                    (_, TypeDescriptor::Raw(_)) => true,
                    (TypeDescriptor::Raw(_), TypeDescriptor::Parameterized(_)) => true,
                    (TypeDescriptor::Parameterized(view), TypeDescriptor::Parameterized(target)) => {
                        view.args.len() == target.args.len()
                            && view
                                .args
                                .iter()
                                .zip(&target.args)
                                .all(|(arg, target_arg)| self.arg_contained(arg, target_arg, seen))
                    }
                    _ => false,
                }
            }
        }
    }

    /// Type-argument containment (`target_arg` contains `arg`).
    fn arg_contained(
        &self,
        arg: &TypeDescriptor,
        target_arg: &TypeDescriptor,
        seen: &mut HashSet<TypeVarId>,
    ) -> bool {
        if arg == target_arg {
            return true;
        }
        match target_arg {
            TypeDescriptor::Wildcard(w) => self.contained_by(arg, w, seen),
            TypeDescriptor::TypeVar(var) => self.fits_erased_bounds(arg, *var),
            _ => false,
        }
    }

    fn contained_by(
        &self,
        arg: &TypeDescriptor,
        wildcard: &WildcardType,
        seen: &mut HashSet<TypeVarId>,
    ) -> bool {
        let (arg_uppers, arg_lowers) = match arg {
            TypeDescriptor::Wildcard(w) => (w.effective_upper_bounds(self.env), w.lower_bounds.clone()),
            other => (vec![other.clone()], vec![other.clone()]),
        };

        let uppers_ok = wildcard.upper_bounds.iter().all(|upper| {
            arg_uppers
                .iter()
                .any(|arg_upper| self.assignable(arg_upper, upper, seen))
        });
        let lowers_ok = wildcard.lower_bounds.iter().all(|lower| {
            arg_lowers
                .iter()
                .any(|arg_lower| self.assignable(lower, arg_lower, seen))
        });
        uppers_ok && lowers_ok
    }

    fn fits_erased_bounds(&self, ty: &TypeDescriptor, var: TypeVarId) -> bool {
        if matches!(ty, TypeDescriptor::TypeVar(other) if *other == var) {
            return true;
        }
        let (Some(erased), Some(def)) = (erasure(self.env, ty), self.env.type_param(var)) else {
            return false;
        };
        def.upper_bounds.iter().all(|bound| {
            erasure(self.env, bound).is_some_and(|bound| is_raw_assignable(self.env, &bound, &erased))
        })
    }
}
