use evo_types::{TypeDescriptor, TypeRegistry};
use pretty_assertions::assert_eq;

use super::fixture::Fixture;

#[test]
fn receiver_bindings_flow_into_inherited_methods() {
    let fx = Fixture::new();
    let resolver = fx.resolver();
    let add = fx.method("java.util.Collection", "add");
    let receiver = fx.generic("java.util.List", vec![fx.raw("java.lang.String")]);

    let sig = resolver.instantiate_method(&receiver, &add).unwrap();
    assert_eq!(sig.type_args, Vec::<TypeDescriptor>::new());
    assert_eq!(sig.params, vec![fx.raw("java.lang.String")]);
    assert_eq!(sig.return_type, Some(fx.raw("java.lang.Boolean")));

    let sig = resolver
        .instantiate_method(&fx.raw("com.example.IntList"), &add)
        .unwrap();
    assert_eq!(sig.params, vec![fx.raw("java.lang.Integer")]);
}

#[test]
fn map_put_uses_both_type_arguments() {
    let fx = Fixture::new();
    let resolver = fx.resolver();
    let put = fx.method("java.util.Map", "put");
    let receiver = fx.generic(
        "java.util.HashMap",
        vec![fx.raw("java.lang.String"), fx.raw("java.lang.Integer")],
    );

    let sig = resolver.instantiate_method(&receiver, &put).unwrap();
    assert_eq!(
        sig.params,
        vec![fx.raw("java.lang.String"), fx.raw("java.lang.Integer")]
    );
    assert_eq!(sig.return_type, Some(fx.raw("java.lang.Integer")));
}

#[test]
fn static_method_type_parameters_are_chosen_from_bounds() {
    let fx = Fixture::new();
    let resolver = fx.resolver();
    let collections = fx.raw("java.util.Collections");

    let singleton = fx.method("java.util.Collections", "singletonList");
    let sig = resolver.instantiate_method(&collections, &singleton).unwrap();
    assert_eq!(sig.type_args, vec![fx.raw("java.lang.Object")]);
    assert_eq!(sig.params, vec![fx.raw("java.lang.Object")]);
    assert_eq!(
        sig.return_type,
        Some(fx.generic("java.util.List", vec![fx.raw("java.lang.Object")]))
    );

    let sort = fx.method("java.util.Collections", "sort");
    let sig = resolver.instantiate_method(&collections, &sort).unwrap();
    let [chosen] = sig.type_args.as_slice() else {
        panic!("sort declares one type parameter");
    };
    assert!(chosen.is_concrete());
    assert!(resolver.is_assignable(chosen, &fx.raw("java.lang.Comparable")));
    assert_eq!(sig.params, vec![fx.generic("java.util.List", vec![chosen.clone()])]);
    assert_eq!(sig.return_type, None);
}

#[test]
fn method_type_parameter_respects_its_bound() {
    let fx = Fixture::new();
    let resolver = fx.resolver();
    let receiver = TypeDescriptor::Raw(fx.sorter);

    let pick = fx.method("com.example.Sorter", "pick");
    let sig = resolver.instantiate_method(&receiver, &pick).unwrap();
    assert_eq!(sig.type_args, vec![fx.raw("java.lang.Integer")]);
    assert_eq!(sig.return_type, Some(fx.raw("java.lang.Integer")));
}

#[test]
fn constructor_of_raw_generic_class_picks_class_arguments() {
    let fx = Fixture::new();
    let resolver = fx.resolver();
    let array_list = fx.class("java.util.ArrayList");
    let ctors = fx.store.class(array_list).unwrap().constructors.clone();

    let sig = resolver
        .instantiate_constructor(&TypeDescriptor::Raw(array_list), &ctors[1])
        .unwrap();
    let object = fx.raw("java.lang.Object");
    assert_eq!(
        sig.return_type,
        Some(fx.generic("java.util.ArrayList", vec![object.clone()]))
    );
    assert_eq!(sig.params, vec![fx.generic("java.util.Collection", vec![object])]);
}

#[test]
fn constructor_of_parameterized_class_keeps_its_arguments() {
    let fx = Fixture::new();
    let resolver = fx.resolver();
    let array_list = fx.class("java.util.ArrayList");
    let ctors = fx.store.class(array_list).unwrap().constructors.clone();
    let owner = fx.generic("java.util.ArrayList", vec![fx.raw("java.lang.String")]);

    let default_ctor = resolver.instantiate_constructor(&owner, &ctors[0]).unwrap();
    assert_eq!(default_ctor.params, Vec::<TypeDescriptor>::new());
    assert_eq!(default_ctor.return_type, Some(owner.clone()));

    let copy_ctor = resolver.instantiate_constructor(&owner, &ctors[1]).unwrap();
    assert_eq!(
        copy_ctor.params,
        vec![fx.generic("java.util.Collection", vec![fx.raw("java.lang.String")])]
    );
}
