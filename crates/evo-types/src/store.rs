use std::collections::HashMap;

use crate::TypeDescriptor;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVarId(u32);

impl TypeVarId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
}

/// The entity that declares a type parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeVarOwner {
    Class(ClassId),
    /// `arity` is the parameter count; together with `name` it picks one overload.
    Method {
        class: ClassId,
        name: String,
        arity: usize,
    },
    Constructor { class: ClassId, index: usize },
}

impl TypeVarOwner {
    pub fn class(&self) -> ClassId {
        match self {
            TypeVarOwner::Class(class)
            | TypeVarOwner::Method { class, .. }
            | TypeVarOwner::Constructor { class, .. } => *class,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParamDef {
    pub name: String,
    pub owner: TypeVarOwner,
    /// Never empty: a parameter declared without bounds carries `java.lang.Object`.
    pub upper_bounds: Vec<TypeDescriptor>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDef {
    pub name: String,
    pub type_params: Vec<TypeVarId>,
    pub params: Vec<TypeDescriptor>,
    /// `None` for `void`.
    pub return_type: Option<TypeDescriptor>,
    pub is_static: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructorDef {
    pub type_params: Vec<TypeVarId>,
    pub params: Vec<TypeDescriptor>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDef {
    pub name: String,
    pub kind: ClassKind,
    pub is_abstract: bool,
    pub type_params: Vec<TypeVarId>,
    pub super_class: Option<TypeDescriptor>,
    pub interfaces: Vec<TypeDescriptor>,
    pub constructors: Vec<ConstructorDef>,
    pub methods: Vec<MethodDef>,
}

impl ClassDef {
    /// A public, non-generic class with no members extending `super_class`.
    pub fn simple(name: impl Into<String>, super_class: Option<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            kind: ClassKind::Class,
            is_abstract: false,
            type_params: Vec::new(),
            super_class,
            interfaces: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WellKnownTypes {
    pub object: ClassId,
}

/// Structural facts about the host type system.
///
/// Implementations only answer questions; they never allocate descriptors on behalf of the
/// engine. A registry may be replaced wholesale between generation runs, which is why
/// descriptors derived from one registry have to be rebound before they are used with another.
pub trait TypeRegistry {
    fn class(&self, id: ClassId) -> Option<&ClassDef>;

    fn type_param(&self, id: TypeVarId) -> Option<&TypeParamDef>;

    fn lookup_class(&self, name: &str) -> Option<ClassId>;

    fn well_known(&self) -> &WellKnownTypes;

    /// Every defined class, ordered by binary name.
    fn class_ids(&self) -> Vec<ClassId>;
}

/// In-memory [`TypeRegistry`].
///
/// Classes are interned by binary name first and defined later so self-referential bounds such
/// as `E extends Enum<E>` can refer to the class being declared.
#[derive(Debug, Clone)]
pub struct TypeStore {
    classes: Vec<Option<ClassDef>>,
    class_by_name: HashMap<String, ClassId>,
    type_params: Vec<TypeParamDef>,
    well_known: WellKnownTypes,
}

impl Default for TypeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeStore {
    /// A store that only knows `java.lang.Object`.
    pub fn new() -> Self {
        let object = ClassId(0);
        let mut class_by_name = HashMap::new();
        class_by_name.insert("java.lang.Object".to_string(), object);
        Self {
            classes: vec![Some(ClassDef::simple("java.lang.Object", None))],
            class_by_name,
            type_params: Vec::new(),
            well_known: WellKnownTypes { object },
        }
    }

    pub fn object_type(&self) -> TypeDescriptor {
        TypeDescriptor::Raw(self.well_known.object)
    }

    /// Returns the id for `name`, reserving a placeholder if the class is not known yet.
    pub fn intern_class_id(&mut self, name: &str) -> ClassId {
        if let Some(id) = self.class_by_name.get(name) {
            return *id;
        }
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(None);
        self.class_by_name.insert(name.to_string(), id);
        id
    }

    pub fn define_class(&mut self, id: ClassId, def: ClassDef) {
        let idx = id.0 as usize;
        if idx >= self.classes.len() {
            self.classes.resize(idx + 1, None);
        }
        self.class_by_name.insert(def.name.clone(), id);
        self.classes[idx] = Some(def);
    }

    pub fn add_class(&mut self, def: ClassDef) -> ClassId {
        let id = self.intern_class_id(&def.name);
        self.define_class(id, def);
        id
    }

    pub fn add_type_param(
        &mut self,
        name: impl Into<String>,
        owner: TypeVarOwner,
        upper_bounds: Vec<TypeDescriptor>,
    ) -> TypeVarId {
        let id = TypeVarId(self.type_params.len() as u32);
        let upper_bounds = self.non_empty_bounds(upper_bounds);
        self.type_params.push(TypeParamDef {
            name: name.into(),
            owner,
            upper_bounds,
        });
        id
    }

    /// Replace the bounds of an already allocated type parameter.
    pub fn set_type_param_bounds(&mut self, id: TypeVarId, upper_bounds: Vec<TypeDescriptor>) {
        let upper_bounds = self.non_empty_bounds(upper_bounds);
        if let Some(def) = self.type_params.get_mut(id.0 as usize) {
            def.upper_bounds = upper_bounds;
        }
    }

    fn non_empty_bounds(&self, bounds: Vec<TypeDescriptor>) -> Vec<TypeDescriptor> {
        if bounds.is_empty() {
            vec![self.object_type()]
        } else {
            bounds
        }
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.lookup_class(name)
    }

    pub fn class_count(&self) -> usize {
        self.classes.iter().filter(|c| c.is_some()).count()
    }

    pub fn type_param_count(&self) -> usize {
        self.type_params.len()
    }
}

impl TypeRegistry for TypeStore {
    fn class(&self, id: ClassId) -> Option<&ClassDef> {
        self.classes.get(id.0 as usize).and_then(Option::as_ref)
    }

    fn type_param(&self, id: TypeVarId) -> Option<&TypeParamDef> {
        self.type_params.get(id.0 as usize)
    }

    fn lookup_class(&self, name: &str) -> Option<ClassId> {
        let id = *self.class_by_name.get(name)?;
        self.class(id).map(|_| id)
    }

    fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }

    fn class_ids(&self) -> Vec<ClassId> {
        let mut ids: Vec<(&str, ClassId)> = self
            .classes
            .iter()
            .enumerate()
            .filter_map(|(idx, def)| def.as_ref().map(|d| (d.name.as_str(), ClassId(idx as u32))))
            .collect();
        ids.sort();
        ids.into_iter().map(|(_, id)| id).collect()
    }
}
