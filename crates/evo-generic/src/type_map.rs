use std::collections::{HashSet, VecDeque};

use evo_types::{
    instantiate_as_supertype, substitute, supertypes_of, ClassId, ParameterizedType,
    SubstitutionMap, TypeDescriptor, TypeVarId,
};

use crate::GenericResolver;

impl GenericResolver<'_> {
    /// Bindings implied by `ty`: its own type arguments, those of its owner type, and the
    /// arguments its class passes up the supertype chain.
    ///
    /// For `class IntList extends ArrayList<Integer>`, the raw `IntList` yields
    /// `{ArrayList.E -> Integer, List.E -> Integer, Collection.E -> Integer, ...}`.
    pub fn type_variable_map(&self, ty: &TypeDescriptor) -> SubstitutionMap {
        let mut map = SubstitutionMap::new();
        self.collect_type_variable_map(ty, &mut map, &mut HashSet::new());
        map
    }

    fn collect_type_variable_map(
        &self,
        ty: &TypeDescriptor,
        map: &mut SubstitutionMap,
        seen: &mut HashSet<TypeVarId>,
    ) {
        match ty {
            TypeDescriptor::Raw(class) => self.collect_inherited(*class, &[], map),
            TypeDescriptor::Parameterized(p) => {
                if let Some(def) = self.env.class(p.class) {
                    if def.type_params.len() == p.args.len() {
                        for (formal, arg) in def.type_params.iter().zip(&p.args) {
                            map.bind_if_absent(*formal, arg.clone());
                        }
                    }
                }
                if let Some(owner) = &p.owner {
                    self.collect_type_variable_map(owner, map, seen);
                }
                self.collect_inherited(p.class, &p.args, map);
            }
            TypeDescriptor::TypeVar(var) => {
                if !seen.insert(*var) {
                    return;
                }
                if let Some(def) = self.env.type_param(*var) {
                    for bound in &def.upper_bounds {
                        self.collect_type_variable_map(bound, map, seen);
                    }
                }
            }
            TypeDescriptor::Wildcard(w) => {
                for bound in &w.upper_bounds {
                    self.collect_type_variable_map(bound, map, seen);
                }
            }
            TypeDescriptor::GenericArray(component) => {
                self.collect_type_variable_map(component, map, seen)
            }
        }
    }

    /// Walk the supertypes of `class` (applied to `args`, or to its own formals when raw) and
    /// bind every supertype formal that has not been bound by a more specific type.
    fn collect_inherited(&self, class: ClassId, args: &[TypeDescriptor], map: &mut SubstitutionMap) {
        let mut queue: VecDeque<(ClassId, Vec<TypeDescriptor>)> = VecDeque::new();
        let mut visited = HashSet::new();
        queue.push_back((class, args.to_vec()));

        while let Some((current, args)) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            let Some(def) = self.env.class(current) else {
                continue;
            };
            let local: SubstitutionMap = if def.type_params.len() == args.len() {
                def.type_params.iter().copied().zip(args).collect()
            } else {
                SubstitutionMap::new()
            };

            for supertype in supertypes_of(self.env, current) {
                match substitute(&supertype, &local) {
                    TypeDescriptor::Parameterized(ParameterizedType { class, args, .. }) => {
                        if let Some(super_def) = self.env.class(class) {
                            if super_def.type_params.len() == args.len() {
                                for (formal, arg) in super_def.type_params.iter().zip(&args) {
                                    map.bind_if_absent(*formal, arg.clone());
                                }
                            }
                        }
                        queue.push_back((class, args));
                    }
                    TypeDescriptor::Raw(class) => queue.push_back((class, Vec::new())),
                    _ => {}
                }
            }
        }
    }

    /// Bind the formal type parameters of `source` so that, viewed as `target.class`, it has
    /// `target`'s type arguments.
    ///
    /// `determine_type_arguments(ArrayList, List<String>)` yields `{ArrayList.E -> String}`.
    /// Formals that do not reach the target (or reach it only inside a raw supertype) are left
    /// unbound.
    pub fn determine_type_arguments(
        &self,
        source: ClassId,
        target: &ParameterizedType,
    ) -> SubstitutionMap {
        let mut map = SubstitutionMap::new();
        let Some(def) = self.env.class(source) else {
            return map;
        };
        if !def.is_generic() {
            return map;
        }

        let formals: Vec<TypeDescriptor> = def
            .type_params
            .iter()
            .map(|tp| TypeDescriptor::TypeVar(*tp))
            .collect();
        let own = TypeDescriptor::class(source, formals);
        let Some(TypeDescriptor::Parameterized(view)) =
            instantiate_as_supertype(self.env, &own, target.class)
        else {
            return map;
        };

        let formals: HashSet<TypeVarId> = def.type_params.iter().copied().collect();
        for (view_arg, target_arg) in view.args.iter().zip(&target.args) {
            unify(view_arg, target_arg, &formals, &mut map);
        }
        map
    }
}

fn unify(
    pattern: &TypeDescriptor,
    actual: &TypeDescriptor,
    formals: &HashSet<TypeVarId>,
    map: &mut SubstitutionMap,
) {
    match (pattern, actual) {
        (TypeDescriptor::TypeVar(var), _) if formals.contains(var) => {
            map.bind_if_absent(*var, actual.clone());
        }
        (TypeDescriptor::Parameterized(p), TypeDescriptor::Parameterized(a))
            if p.class == a.class && p.args.len() == a.args.len() =>
        {
            for (p_arg, a_arg) in p.args.iter().zip(&a.args) {
                unify(p_arg, a_arg, formals, map);
            }
        }
        (TypeDescriptor::GenericArray(p), TypeDescriptor::GenericArray(a)) => {
            unify(p, a, formals, map)
        }
        _ => {}
    }
}
