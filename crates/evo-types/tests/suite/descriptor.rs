use evo_types::{
    substitute, DescriptorError, DescriptorKind, SubstitutionMap, TypeDescriptor, TypeRegistry,
    TypeStore, WildcardType,
};
use pretty_assertions::assert_eq;

#[test]
fn shape_predicates_follow_the_variant() {
    let env = TypeStore::with_minimal_jdk();
    let list = env.class_id("java.util.List").unwrap();
    let string = env.class_id("java.lang.String").unwrap();
    let e = env.class(list).unwrap().type_params[0];

    let raw = TypeDescriptor::Raw(string);
    assert!(raw.is_raw_class());
    assert!(!raw.has_wildcard_or_type_variables());
    assert!(raw.is_concrete());
    assert_eq!(raw.generic_bounds(&env), Vec::<TypeDescriptor>::new());
    assert_eq!(raw.owner_type(), Ok(None));
    assert_eq!(raw.parameter_types(), &[] as &[TypeDescriptor]);

    let var = TypeDescriptor::TypeVar(e);
    assert!(var.is_type_variable());
    assert!(var.has_wildcard_or_type_variables());
    assert!(var.has_type_variables());
    assert!(!var.has_wildcard_types());
    assert_eq!(var.parameter_types(), &[] as &[TypeDescriptor]);
    assert_eq!(var.generic_bounds(&env), vec![env.object_type()]);

    let wildcard = TypeDescriptor::Wildcard(WildcardType::extends(TypeDescriptor::Raw(string)));
    assert!(wildcard.is_wildcard_type());
    assert!(wildcard.has_wildcard_types());
    assert!(!wildcard.has_type_variables());

    let list_e = TypeDescriptor::class(list, vec![var.clone()]);
    assert!(list_e.is_parameterized_type());
    assert!(list_e.has_type_variables());
    assert_eq!(list_e.parameter_types(), &[var.clone()]);
    assert_eq!(list_e.type_variables(&env), vec![e]);
    assert_eq!(list_e.free_type_variables(), vec![e]);

    let array = TypeDescriptor::array_of(list_e.clone());
    assert!(array.is_generic_array());
    assert_eq!(array.kind(), DescriptorKind::GenericArray);
    assert!(array.has_type_variables());
}

#[test]
fn wildcard_bounds_include_implicit_object() {
    let env = TypeStore::with_minimal_jdk();
    let integer = TypeDescriptor::Raw(env.class_id("java.lang.Integer").unwrap());

    let super_integer = TypeDescriptor::Wildcard(WildcardType::super_of(integer.clone()));
    assert_eq!(
        super_integer.generic_bounds(&env),
        vec![env.object_type(), integer]
    );
    assert_eq!(
        TypeDescriptor::Wildcard(WildcardType::unbounded()).generic_bounds(&env),
        vec![env.object_type()]
    );
}

#[test]
fn owner_type_of_type_variable_is_unsupported() {
    let env = TypeStore::with_minimal_jdk();
    let list = env.class_id("java.util.List").unwrap();
    let e = env.class(list).unwrap().type_params[0];

    let err = TypeDescriptor::TypeVar(e).owner_type().unwrap_err();
    assert_eq!(err.shape, DescriptorKind::TypeVariable);
    assert_eq!(err.to_string(), "`owner_type` is not supported for a type variable");
}

#[test]
fn parameterized_checks_arity() {
    let env = TypeStore::with_minimal_jdk();
    let map = env.class_id("java.util.Map").unwrap();
    let string = TypeDescriptor::Raw(env.class_id("java.lang.String").unwrap());

    let err = TypeDescriptor::parameterized(&env, map, vec![string.clone()], None).unwrap_err();
    assert_eq!(
        err,
        DescriptorError::ArityMismatch {
            name: "java.util.Map".to_string(),
            expected: 2,
            found: 1,
        }
    );

    let outer = TypeDescriptor::Raw(env.class_id("java.util.List").unwrap());
    let ty = TypeDescriptor::parameterized(
        &env,
        map,
        vec![string.clone(), string],
        Some(outer.clone()),
    )
    .unwrap();
    assert!(ty.has_owner_type());
    assert_eq!(ty.owner_type(), Ok(Some(&outer)));
}

#[test]
fn substitute_replaces_bound_variables_only() {
    let env = TypeStore::with_minimal_jdk();
    let map_class = env.class_id("java.util.Map").unwrap();
    let params = env.class(map_class).unwrap().type_params.clone();
    let (k, v) = (params[0], params[1]);
    let string = TypeDescriptor::Raw(env.class_id("java.lang.String").unwrap());

    let ty = TypeDescriptor::class(
        map_class,
        vec![
            TypeDescriptor::TypeVar(k),
            TypeDescriptor::Wildcard(WildcardType::extends(TypeDescriptor::TypeVar(v))),
        ],
    );
    let mut subst = SubstitutionMap::new();
    subst.bind(k, string.clone());

    let out = substitute(&ty, &subst);
    assert_eq!(
        out,
        TypeDescriptor::class(
            map_class,
            vec![
                string,
                TypeDescriptor::Wildcard(WildcardType::extends(TypeDescriptor::TypeVar(v))),
            ],
        )
    );
    assert_eq!(out.free_type_variables(), vec![v]);
}

#[test]
fn substitution_map_is_add_only() {
    let env = TypeStore::with_minimal_jdk();
    let list = env.class_id("java.util.List").unwrap();
    let e = env.class(list).unwrap().type_params[0];
    let string = TypeDescriptor::Raw(env.class_id("java.lang.String").unwrap());
    let integer = TypeDescriptor::Raw(env.class_id("java.lang.Integer").unwrap());

    let mut map = SubstitutionMap::new();
    assert!(map.bind_if_absent(e, string.clone()));
    assert!(!map.bind_if_absent(e, integer.clone()));
    assert_eq!(map.get(e), Some(&string));

    map.bind(e, integer.clone());
    assert_eq!(map.get(e), Some(&integer));
    assert_eq!(map.len(), 1);
}
