use evo_types::{
    erasure, instantiate_as_supertype, is_raw_assignable, is_subclass, supertypes_of, RawType,
    TypeDescriptor, TypeRegistry, TypeStore,
};
use pretty_assertions::assert_eq;

#[test]
fn supertype_view_substitutes_type_arguments() {
    let env = TypeStore::with_minimal_jdk();
    let array_list = env.class_id("java.util.ArrayList").unwrap();
    let iterable = env.class_id("java.lang.Iterable").unwrap();
    let string = TypeDescriptor::Raw(env.class_id("java.lang.String").unwrap());

    let ty = TypeDescriptor::class(array_list, vec![string.clone()]);
    assert_eq!(
        instantiate_as_supertype(&env, &ty, iterable),
        Some(TypeDescriptor::class(iterable, vec![string]))
    );
    assert_eq!(
        instantiate_as_supertype(&env, &TypeDescriptor::Raw(array_list), iterable),
        Some(TypeDescriptor::Raw(iterable))
    );
    assert_eq!(
        instantiate_as_supertype(&env, &ty, env.class_id("java.util.Map").unwrap()),
        None
    );
}

#[test]
fn interfaces_report_object() {
    let env = TypeStore::with_minimal_jdk();
    let serializable = env.class_id("java.io.Serializable").unwrap();

    assert_eq!(supertypes_of(&env, serializable), vec![env.object_type()]);
    assert!(is_subclass(&env, serializable, env.well_known().object));
}

#[test]
fn erasure_follows_first_bound() {
    let env = TypeStore::with_minimal_jdk();
    let collections = env.class_id("java.util.Collections").unwrap();
    let comparable = env.class_id("java.lang.Comparable").unwrap();
    let sort = env
        .class(collections)
        .unwrap()
        .methods
        .iter()
        .find(|m| m.name == "sort")
        .unwrap();
    let t = TypeDescriptor::TypeVar(sort.type_params[0]);

    assert_eq!(erasure(&env, &t), Some(RawType::Class(comparable)));
    assert_eq!(
        erasure(&env, &TypeDescriptor::array_of(t)),
        Some(RawType::Array(Box::new(RawType::Class(comparable))))
    );
}

#[test]
fn arrays_are_assignable_to_object_cloneable_and_serializable() {
    let env = TypeStore::with_minimal_jdk();
    let string = env.class_id("java.lang.String").unwrap();
    let array = RawType::Array(Box::new(RawType::Class(string)));

    for name in ["java.lang.Object", "java.lang.Cloneable", "java.io.Serializable"] {
        let target = RawType::Class(env.class_id(name).unwrap());
        assert!(is_raw_assignable(&env, &target, &array), "{name}");
    }
    assert!(!is_raw_assignable(&env, &RawType::Class(string), &array));
    assert!(is_raw_assignable(
        &env,
        &RawType::Array(Box::new(RawType::Class(env.well_known().object))),
        &array
    ));
}
