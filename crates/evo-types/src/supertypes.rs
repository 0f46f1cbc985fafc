use std::collections::{HashSet, VecDeque};

use crate::{
    substitute, ClassId, ClassKind, ParameterizedType, SubstitutionMap, TypeDescriptor,
    TypeRegistry, TypeVarId,
};

const ARRAY_SUPERTYPES: [&str; 2] = ["java.lang.Cloneable", "java.io.Serializable"];

/// Direct supertypes of `class` as declared, expressed over the class's own type parameters.
///
/// Interfaces without superinterfaces report `java.lang.Object`.
pub fn supertypes_of(env: &dyn TypeRegistry, class: ClassId) -> Vec<TypeDescriptor> {
    let Some(def) = env.class(class) else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(def.interfaces.len() + 1);
    if let Some(sc) = &def.super_class {
        out.push(sc.clone());
    }
    out.extend(def.interfaces.iter().cloned());
    if def.kind == ClassKind::Interface && class != env.well_known().object {
        let object = TypeDescriptor::Raw(env.well_known().object);
        if !out.contains(&object) {
            out.push(object);
        }
    }
    out
}

/// Formal type parameters of `class` with their declared bounds, in declaration order.
pub fn declared_type_parameters(
    env: &dyn TypeRegistry,
    class: ClassId,
) -> Vec<(String, Vec<TypeDescriptor>)> {
    let Some(def) = env.class(class) else {
        return Vec::new();
    };
    def.type_params
        .iter()
        .filter_map(|tp| env.type_param(*tp))
        .map(|tp| (tp.name.clone(), tp.upper_bounds.clone()))
        .collect()
}

/// Nominal subclassing: `sub` equals `sup` or reaches it through declared supertypes.
pub fn is_subclass(env: &dyn TypeRegistry, sub: ClassId, sup: ClassId) -> bool {
    if sub == sup || sup == env.well_known().object {
        return env.class(sub).is_some() || sub == sup;
    }
    let mut queue = VecDeque::from([sub]);
    let mut seen = HashSet::new();
    while let Some(current) = queue.pop_front() {
        if !seen.insert(current) {
            continue;
        }
        if current == sup {
            return true;
        }
        for supertype in supertypes_of(env, current) {
            if let Some(id) = supertype.class_id() {
                queue.push_back(id);
            }
        }
    }
    false
}

/// The erasure of a descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RawType {
    Class(ClassId),
    Array(Box<RawType>),
}

/// Erase `ty`: type variables erase to their first bound, wildcards to their first upper bound.
pub fn erasure(env: &dyn TypeRegistry, ty: &TypeDescriptor) -> Option<RawType> {
    fn inner(
        env: &dyn TypeRegistry,
        ty: &TypeDescriptor,
        seen: &mut HashSet<TypeVarId>,
    ) -> Option<RawType> {
        match ty {
            TypeDescriptor::Raw(class) => Some(RawType::Class(*class)),
            TypeDescriptor::Parameterized(p) => Some(RawType::Class(p.class)),
            TypeDescriptor::GenericArray(component) => {
                Some(RawType::Array(Box::new(inner(env, component, seen)?)))
            }
            TypeDescriptor::Wildcard(w) => match w.upper_bounds.first() {
                Some(bound) => inner(env, bound, seen),
                None => Some(RawType::Class(env.well_known().object)),
            },
            TypeDescriptor::TypeVar(id) => {
                if !seen.insert(*id) {
                    return Some(RawType::Class(env.well_known().object));
                }
                let bound = env.type_param(*id)?.upper_bounds.first()?;
                inner(env, bound, seen)
            }
        }
    }

    inner(env, ty, &mut HashSet::new())
}

/// Whether a value of erased type `source` may be stored in a slot of erased type `target`.
pub fn is_raw_assignable(env: &dyn TypeRegistry, target: &RawType, source: &RawType) -> bool {
    match (target, source) {
        (RawType::Class(t), RawType::Class(s)) => is_subclass(env, *s, *t),
        (RawType::Class(t), RawType::Array(_)) => is_array_supertype(env, *t),
        (RawType::Array(t), RawType::Array(s)) => is_raw_assignable(env, t, s),
        (RawType::Array(_), RawType::Class(_)) => false,
    }
}

/// `Object`, `Cloneable` and `Serializable` are the only class supertypes of an array.
pub fn is_array_supertype(env: &dyn TypeRegistry, class: ClassId) -> bool {
    class == env.well_known().object
        || ARRAY_SUPERTYPES
            .iter()
            .any(|name| env.lookup_class(name) == Some(class))
}

/// Return `ty` viewed as `target` by walking the supertype graph and applying type argument
/// substitution along the way.
///
/// Example: `ArrayList<String>` viewed as `List` returns `List<String>`; a raw `ArrayList`
/// stays raw and yields `List`. Returns `None` if `target` is not a supertype.
pub fn instantiate_as_supertype(
    env: &dyn TypeRegistry,
    ty: &TypeDescriptor,
    target: ClassId,
) -> Option<TypeDescriptor> {
    fn inner(
        env: &dyn TypeRegistry,
        ty: &TypeDescriptor,
        target: ClassId,
        seen_type_vars: &mut HashSet<TypeVarId>,
    ) -> Option<TypeDescriptor> {
        let (def, args) = match ty {
            TypeDescriptor::GenericArray(_) => {
                return is_array_supertype(env, target).then_some(TypeDescriptor::Raw(target));
            }
            TypeDescriptor::Wildcard(w) => {
                return w
                    .effective_upper_bounds(env)
                    .iter()
                    .find_map(|bound| inner(env, bound, target, seen_type_vars));
            }
            TypeDescriptor::TypeVar(id) => {
                if !seen_type_vars.insert(*id) {
                    return None;
                }
                let found = env.type_param(*id).and_then(|tp| {
                    tp.upper_bounds
                        .iter()
                        .find_map(|bound| inner(env, bound, target, seen_type_vars))
                });
                seen_type_vars.remove(id);
                return found;
            }
            TypeDescriptor::Raw(def) => (*def, Vec::new()),
            TypeDescriptor::Parameterized(p) => (p.class, p.args.clone()),
        };

        let mut queue: VecDeque<(ClassId, Vec<TypeDescriptor>)> = VecDeque::new();
        let mut seen: HashSet<(ClassId, Vec<TypeDescriptor>)> = HashSet::new();
        queue.push_back((def, args));

        while let Some((def, args)) = queue.pop_front() {
            if !seen.insert((def, args.clone())) {
                continue;
            }

            if def == target {
                return Some(TypeDescriptor::class(def, args));
            }

            let Some(class_def) = env.class(def) else {
                continue;
            };

            // A raw use of a generic class has no arguments to push upwards; keep it raw.
            let raw = args.is_empty() && class_def.is_generic();
            let subst: SubstitutionMap = if raw {
                SubstitutionMap::new()
            } else {
                class_def
                    .type_params
                    .iter()
                    .copied()
                    .zip(args.iter().cloned())
                    .collect()
            };

            for supertype in supertypes_of(env, def) {
                let next = if raw {
                    supertype.class_id().map(|id| (id, Vec::new()))
                } else {
                    match substitute(&supertype, &subst) {
                        TypeDescriptor::Raw(id) => Some((id, Vec::new())),
                        TypeDescriptor::Parameterized(ParameterizedType { class, args, .. }) => {
                            Some((class, args))
                        }
                        _ => None,
                    }
                };
                if let Some(next) = next {
                    queue.push_back(next);
                }
            }
        }

        None
    }

    let mut seen_type_vars = HashSet::new();
    inner(env, ty, target, &mut seen_type_vars)
}
