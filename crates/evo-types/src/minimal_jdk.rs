//! A tiny slice of the JDK class hierarchy, enough to exercise generic resolution without a
//! classpath.

use crate::{
    ClassDef, ClassId, ClassKind, ConstructorDef, MethodDef, TypeDescriptor, TypeRegistry,
    TypeStore, TypeVarId, TypeVarOwner, WildcardType,
};

fn raw(id: ClassId) -> TypeDescriptor {
    TypeDescriptor::Raw(id)
}

fn var(id: TypeVarId) -> TypeDescriptor {
    TypeDescriptor::TypeVar(id)
}

fn interface(name: &str, type_params: Vec<TypeVarId>, interfaces: Vec<TypeDescriptor>) -> ClassDef {
    ClassDef {
        name: name.to_string(),
        kind: ClassKind::Interface,
        is_abstract: true,
        type_params,
        super_class: None,
        interfaces,
        constructors: Vec::new(),
        methods: Vec::new(),
    }
}

fn class(
    name: &str,
    type_params: Vec<TypeVarId>,
    super_class: TypeDescriptor,
    interfaces: Vec<TypeDescriptor>,
) -> ClassDef {
    ClassDef {
        name: name.to_string(),
        kind: ClassKind::Class,
        is_abstract: false,
        type_params,
        super_class: Some(super_class),
        interfaces,
        constructors: vec![ConstructorDef {
            type_params: Vec::new(),
            params: Vec::new(),
        }],
        methods: Vec::new(),
    }
}

impl TypeStore {
    pub fn with_minimal_jdk() -> Self {
        let mut store = TypeStore::new();
        let object = raw(store.well_known().object);

        let serializable = store.add_class(interface("java.io.Serializable", vec![], vec![]));
        let cloneable = store.add_class(interface("java.lang.Cloneable", vec![], vec![]));
        let char_sequence = store.add_class(interface("java.lang.CharSequence", vec![], vec![]));

        let comparable = store.intern_class_id("java.lang.Comparable");
        let comparable_t = store.add_type_param("T", TypeVarOwner::Class(comparable), vec![]);
        store.define_class(
            comparable,
            interface("java.lang.Comparable", vec![comparable_t], vec![]),
        );
        let comparable_of = |arg: TypeDescriptor| TypeDescriptor::class(comparable, vec![arg]);

        let boolean = store.intern_class_id("java.lang.Boolean");
        store.define_class(
            boolean,
            class(
                "java.lang.Boolean",
                vec![],
                object.clone(),
                vec![raw(serializable), comparable_of(raw(boolean))],
            ),
        );

        let mut number = class("java.lang.Number", vec![], object.clone(), vec![raw(serializable)]);
        number.is_abstract = true;
        number.constructors.clear();
        let number = store.add_class(number);

        for name in ["java.lang.Double", "java.lang.Integer", "java.lang.Long"] {
            let id = store.intern_class_id(name);
            store.define_class(
                id,
                class(name, vec![], raw(number), vec![comparable_of(raw(id))]),
            );
        }

        let string = store.intern_class_id("java.lang.String");
        store.define_class(
            string,
            class(
                "java.lang.String",
                vec![],
                object.clone(),
                vec![raw(serializable), comparable_of(raw(string)), raw(char_sequence)],
            ),
        );

        let iterable = store.intern_class_id("java.lang.Iterable");
        let iterable_t = store.add_type_param("T", TypeVarOwner::Class(iterable), vec![]);
        store.define_class(
            iterable,
            interface("java.lang.Iterable", vec![iterable_t], vec![]),
        );

        let collection = store.intern_class_id("java.util.Collection");
        let collection_e = store.add_type_param("E", TypeVarOwner::Class(collection), vec![]);
        let mut collection_def = interface(
            "java.util.Collection",
            vec![collection_e],
            vec![TypeDescriptor::class(iterable, vec![var(collection_e)])],
        );
        collection_def.methods.push(MethodDef {
            name: "add".to_string(),
            type_params: Vec::new(),
            params: vec![var(collection_e)],
            return_type: Some(raw(boolean)),
            is_static: false,
        });
        store.define_class(collection, collection_def);

        let list = generic_collection_interface(&mut store, "java.util.List", collection);
        let set = generic_collection_interface(&mut store, "java.util.Set", collection);

        for (name, iface, extra) in [
            ("java.util.ArrayList", list, vec![raw(cloneable), raw(serializable)]),
            ("java.util.LinkedList", list, vec![raw(cloneable), raw(serializable)]),
            ("java.util.HashSet", set, vec![raw(cloneable), raw(serializable)]),
        ] {
            let id = store.intern_class_id(name);
            let e = store.add_type_param("E", TypeVarOwner::Class(id), vec![]);
            let mut interfaces = vec![TypeDescriptor::class(iface, vec![var(e)])];
            interfaces.extend(extra);
            let mut def = class(name, vec![e], object.clone(), interfaces);
            def.constructors.push(ConstructorDef {
                type_params: Vec::new(),
                params: vec![TypeDescriptor::class(
                    collection,
                    vec![TypeDescriptor::Wildcard(WildcardType::extends(var(e)))],
                )],
            });
            store.define_class(id, def);
        }

        let map = store.intern_class_id("java.util.Map");
        let map_k = store.add_type_param("K", TypeVarOwner::Class(map), vec![]);
        let map_v = store.add_type_param("V", TypeVarOwner::Class(map), vec![]);
        let mut map_def = interface("java.util.Map", vec![map_k, map_v], vec![]);
        map_def.methods.push(MethodDef {
            name: "put".to_string(),
            type_params: Vec::new(),
            params: vec![var(map_k), var(map_v)],
            return_type: Some(var(map_v)),
            is_static: false,
        });
        store.define_class(map, map_def);

        let hash_map = store.intern_class_id("java.util.HashMap");
        let hash_map_k = store.add_type_param("K", TypeVarOwner::Class(hash_map), vec![]);
        let hash_map_v = store.add_type_param("V", TypeVarOwner::Class(hash_map), vec![]);
        store.define_class(
            hash_map,
            class(
                "java.util.HashMap",
                vec![hash_map_k, hash_map_v],
                object.clone(),
                vec![
                    TypeDescriptor::class(map, vec![var(hash_map_k), var(hash_map_v)]),
                    raw(cloneable),
                    raw(serializable),
                ],
            ),
        );

        // `<T extends Comparable<? super T>> void sort(List<T>)` and `<T> List<T> singletonList(T)`.
        let collections = store.intern_class_id("java.util.Collections");
        let sort_owner = TypeVarOwner::Method {
            class: collections,
            name: "sort".to_string(),
            arity: 1,
        };
        let sort_t = store.add_type_param("T", sort_owner, vec![]);
        store.set_type_param_bounds(
            sort_t,
            vec![comparable_of(TypeDescriptor::Wildcard(WildcardType::super_of(var(sort_t))))],
        );
        let singleton_owner = TypeVarOwner::Method {
            class: collections,
            name: "singletonList".to_string(),
            arity: 1,
        };
        let singleton_t = store.add_type_param("T", singleton_owner, vec![]);
        let mut collections_def = class("java.util.Collections", vec![], object, vec![]);
        collections_def.constructors.clear();
        collections_def.methods = vec![
            MethodDef {
                name: "sort".to_string(),
                type_params: vec![sort_t],
                params: vec![TypeDescriptor::class(list, vec![var(sort_t)])],
                return_type: None,
                is_static: true,
            },
            MethodDef {
                name: "singletonList".to_string(),
                type_params: vec![singleton_t],
                params: vec![var(singleton_t)],
                return_type: Some(TypeDescriptor::class(list, vec![var(singleton_t)])),
                is_static: true,
            },
        ];
        store.define_class(collections, collections_def);

        store
    }
}

fn generic_collection_interface(store: &mut TypeStore, name: &str, collection: ClassId) -> ClassId {
    let id = store.intern_class_id(name);
    let e = store.add_type_param("E", TypeVarOwner::Class(id), vec![]);
    store.define_class(
        id,
        interface(
            name,
            vec![e],
            vec![TypeDescriptor::class(collection, vec![var(e)])],
        ),
    );
    id
}
