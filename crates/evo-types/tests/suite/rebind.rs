use evo_types::{
    ClassDef, MethodDef, RebindError, TypeDescriptor, TypeRegistry, TypeStore, TypeVarId,
    TypeVarOwner, WildcardType,
};
use pretty_assertions::assert_eq;

/// The minimal JDK class shapes defined after some unrelated classes, so every id is shifted.
fn shifted_jdk() -> TypeStore {
    let jdk = TypeStore::with_minimal_jdk();
    let mut store = TypeStore::new();
    let object = store.object_type();
    for name in ["com.example.A", "com.example.B", "com.example.C"] {
        let id = store.add_class(ClassDef::simple(name, Some(object.clone())));
        store.add_type_param("X", TypeVarOwner::Class(id), vec![]);
    }

    for id in jdk.class_ids() {
        let def = jdk.class(id).unwrap().clone();
        if def.name == "java.lang.Object" {
            continue;
        }
        let new_id = store.intern_class_id(&def.name);
        let type_params = def
            .type_params
            .iter()
            .map(|tp| {
                let name = jdk.type_param(*tp).unwrap().name.clone();
                store.add_type_param(name, TypeVarOwner::Class(new_id), vec![])
            })
            .collect();
        store.define_class(
            new_id,
            ClassDef {
                type_params,
                super_class: None,
                interfaces: Vec::new(),
                constructors: Vec::new(),
                methods: Vec::new(),
                ..def
            },
        );
    }
    store
}

#[test]
fn rebinding_moves_descriptor_onto_new_ids() {
    let old = TypeStore::with_minimal_jdk();
    let new = shifted_jdk();
    let old_map = old.class_id("java.util.Map").unwrap();
    let old_k = old.class(old_map).unwrap().type_params[0];
    let old_string = old.class_id("java.lang.String").unwrap();

    let mut ty = TypeDescriptor::class(
        old_map,
        vec![
            TypeDescriptor::TypeVar(old_k),
            TypeDescriptor::Wildcard(WildcardType::extends(TypeDescriptor::Raw(old_string))),
        ],
    );
    assert!(ty.change_type_information_source(&old, &new));

    let new_map = new.class_id("java.util.Map").unwrap();
    let new_k = new.class(new_map).unwrap().type_params[0];
    let new_string = new.class_id("java.lang.String").unwrap();
    assert_ne!(new_map, old_map);
    assert_eq!(
        ty,
        TypeDescriptor::class(
            new_map,
            vec![
                TypeDescriptor::TypeVar(new_k),
                TypeDescriptor::Wildcard(WildcardType::extends(TypeDescriptor::Raw(new_string))),
            ],
        )
    );
    assert_eq!(ty.type_name(&new), "java.util.Map<K, ? extends java.lang.String>");
}

#[test]
fn type_variable_is_located_by_name_on_its_owner() {
    let old = TypeStore::with_minimal_jdk();
    let new = shifted_jdk();
    let hash_map = old.class_id("java.util.HashMap").unwrap();
    let v = old.class(hash_map).unwrap().type_params[1];

    let rebound = TypeDescriptor::TypeVar(v).rebind(&old, &new).unwrap();
    let TypeDescriptor::TypeVar(new_v) = rebound else {
        panic!("expected a type variable, got {rebound:?}");
    };
    let def = new.type_param(new_v).unwrap();
    assert_eq!(def.name, "V");
    assert_eq!(def.owner.class(), new.class_id("java.util.HashMap").unwrap());
}

#[test]
fn missing_class_leaves_descriptor_untouched() {
    let old = TypeStore::with_minimal_jdk();
    let new = TypeStore::new();
    let string = old.class_id("java.lang.String").unwrap();

    let mut ty = TypeDescriptor::Raw(string);
    assert!(!ty.change_type_information_source(&old, &new));
    assert_eq!(ty, TypeDescriptor::Raw(string));
    assert_eq!(
        ty.rebind(&old, &new),
        Err(RebindError::ClassNotFound {
            name: "java.lang.String".to_string()
        })
    );
}

#[test]
fn missing_type_variable_name_is_reported() {
    let old = TypeStore::with_minimal_jdk();
    let mut new = TypeStore::new();
    let object = new.object_type();
    // Same class name, differently named type parameter.
    let list = new.intern_class_id("java.util.List");
    let x = new.add_type_param("X", TypeVarOwner::Class(list), vec![]);
    let mut def = ClassDef::simple("java.util.List", Some(object));
    def.type_params = vec![x];
    new.define_class(list, def);

    let old_list = old.class_id("java.util.List").unwrap();
    let e = old.class(old_list).unwrap().type_params[0];
    let mut ty = TypeDescriptor::class(old_list, vec![TypeDescriptor::TypeVar(e)]);
    let before = ty.clone();

    assert!(!ty.change_type_information_source(&old, &new));
    assert_eq!(ty, before);
    assert_eq!(
        ty.rebind(&old, &new),
        Err(RebindError::TypeVariableNotFound {
            name: "E".to_string(),
            owner: "java.util.List".to_string(),
        })
    );
}

#[test]
fn method_type_parameters_follow_their_method() {
    let old = TypeStore::with_minimal_jdk();
    let collections = old.class_id("java.util.Collections").unwrap();
    let sort = old
        .class(collections)
        .unwrap()
        .methods
        .iter()
        .find(|m| m.name == "sort")
        .unwrap();
    let t = sort.type_params[0];

    // The same model rebuilt from scratch resolves to identical ids.
    let new = TypeStore::with_minimal_jdk();
    assert_eq!(
        TypeDescriptor::TypeVar(t).rebind(&old, &new),
        Ok(TypeDescriptor::TypeVar(t))
    );
    assert_eq!(
        TypeDescriptor::TypeVar(t).rebind(&old, &TypeStore::new()),
        Err(RebindError::ClassNotFound {
            name: "java.util.Collections".to_string()
        })
    );
}

/// `class Util { <T> T pick(T a); <T> T pick(T a, T b); }`, with the overloads declared in the
/// given order. Returns the store and the `T` of the one- and two-argument overloads.
fn overloaded_util(two_args_first: bool) -> (TypeStore, TypeVarId, TypeVarId) {
    let mut store = TypeStore::new();
    let object = store.object_type();
    let util = store.intern_class_id("com.example.Util");

    let overload = |store: &mut TypeStore, arity: usize| {
        let t = store.add_type_param(
            "T",
            TypeVarOwner::Method {
                class: util,
                name: "pick".to_string(),
                arity,
            },
            vec![],
        );
        let method = MethodDef {
            name: "pick".to_string(),
            type_params: vec![t],
            params: vec![TypeDescriptor::TypeVar(t); arity],
            return_type: Some(TypeDescriptor::TypeVar(t)),
            is_static: true,
        };
        (t, method)
    };
    let (first, second) = if two_args_first { (2, 1) } else { (1, 2) };
    let (first_t, first_method) = overload(&mut store, first);
    let (second_t, second_method) = overload(&mut store, second);

    let mut def = ClassDef::simple("com.example.Util", Some(object));
    def.methods = vec![first_method, second_method];
    store.define_class(util, def);

    if two_args_first {
        (store, second_t, first_t)
    } else {
        (store, first_t, second_t)
    }
}

#[test]
fn overloaded_method_type_parameters_keep_their_overload() {
    let (old, old_one, old_two) = overloaded_util(false);
    let (new, new_one, new_two) = overloaded_util(true);
    assert_ne!(old_two, new_two);

    assert_eq!(
        TypeDescriptor::TypeVar(old_two).rebind(&old, &new),
        Ok(TypeDescriptor::TypeVar(new_two))
    );
    assert_eq!(
        TypeDescriptor::TypeVar(old_one).rebind(&old, &new),
        Ok(TypeDescriptor::TypeVar(new_one))
    );
}
