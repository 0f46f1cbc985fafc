use evo_types::{ClassId, TypeDescriptor, TypeRegistry, TypeStore, TypeVarId, WildcardType};
use pretty_assertions::assert_eq;

#[test]
fn renders_java_like_syntax() {
    let env = TypeStore::with_minimal_jdk();
    let map = env.class_id("java.util.Map").unwrap();
    let number = TypeDescriptor::Raw(env.class_id("java.lang.Number").unwrap());
    let integer = TypeDescriptor::Raw(env.class_id("java.lang.Integer").unwrap());
    let k = env.class(map).unwrap().type_params[0];

    let ty = TypeDescriptor::class(
        map,
        vec![
            TypeDescriptor::TypeVar(k),
            TypeDescriptor::array_of(TypeDescriptor::Wildcard(WildcardType::extends(number))),
        ],
    );
    assert_eq!(
        ty.type_name(&env),
        "java.util.Map<K, ? extends java.lang.Number[]>"
    );

    let lower = TypeDescriptor::Wildcard(WildcardType::super_of(integer));
    assert_eq!(lower.type_name(&env), "? super java.lang.Integer");
    assert_eq!(
        TypeDescriptor::Wildcard(WildcardType::unbounded()).type_name(&env),
        "?"
    );
}

#[test]
fn owner_types_use_the_simple_name() {
    let env = TypeStore::with_minimal_jdk();
    let map = env.class_id("java.util.Map").unwrap();
    let string = TypeDescriptor::Raw(env.class_id("java.lang.String").unwrap());
    let outer = TypeDescriptor::class(
        env.class_id("java.util.List").unwrap(),
        vec![string.clone()],
    );

    let ty = TypeDescriptor::parameterized(&env, map, vec![string.clone(), string], Some(outer))
        .unwrap();
    assert_eq!(
        ty.display(&env).to_string(),
        "java.util.List<java.lang.String>.Map<java.lang.String, java.lang.String>"
    );
}

#[test]
fn unknown_ids_do_not_panic() {
    let env = TypeStore::new();

    assert_eq!(
        TypeDescriptor::Raw(ClassId::from_raw(42)).type_name(&env),
        "<unknown class #42>"
    );
    assert_eq!(
        TypeDescriptor::TypeVar(TypeVarId::from_raw(7)).type_name(&env),
        "<unknown type variable #7>"
    );
}
