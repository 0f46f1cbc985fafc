use std::fmt;

use crate::{ClassId, TypeRegistry, TypeVarId, UnsupportedShape};

/// A type expression over the host's nominal type system.
///
/// Descriptors are plain values: every transformation returns a new descriptor. The only
/// in-place operation is [`TypeDescriptor::change_type_information_source`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// A class used without type arguments.
    Raw(ClassId),
    Parameterized(ParameterizedType),
    Wildcard(WildcardType),
    TypeVar(TypeVarId),
    /// An array whose component is itself a descriptor (`T[]`, `List<String>[]`).
    GenericArray(Box<TypeDescriptor>),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParameterizedType {
    pub class: ClassId,
    pub args: Vec<TypeDescriptor>,
    pub owner: Option<Box<TypeDescriptor>>,
}

/// `?`, `? extends U1 & U2`, `? super L`.
///
/// An empty `upper_bounds` list stands for the implicit `java.lang.Object` bound.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WildcardType {
    pub upper_bounds: Vec<TypeDescriptor>,
    pub lower_bounds: Vec<TypeDescriptor>,
}

impl WildcardType {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn extends(bound: TypeDescriptor) -> Self {
        Self {
            upper_bounds: vec![bound],
            lower_bounds: Vec::new(),
        }
    }

    pub fn super_of(bound: TypeDescriptor) -> Self {
        Self {
            upper_bounds: Vec::new(),
            lower_bounds: vec![bound],
        }
    }

    /// Upper bounds with the implicit `Object` bound made explicit.
    pub fn effective_upper_bounds(&self, env: &dyn TypeRegistry) -> Vec<TypeDescriptor> {
        if self.upper_bounds.is_empty() {
            vec![TypeDescriptor::Raw(env.well_known().object)]
        } else {
            self.upper_bounds.clone()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    RawClass,
    Parameterized,
    Wildcard,
    TypeVariable,
    GenericArray,
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DescriptorKind::RawClass => "raw class",
            DescriptorKind::Parameterized => "parameterized type",
            DescriptorKind::Wildcard => "wildcard type",
            DescriptorKind::TypeVariable => "type variable",
            DescriptorKind::GenericArray => "generic array",
        })
    }
}

/// Arity mismatch between a parameterized descriptor and its declaring class.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("class {class:?} is not defined in the registry")]
    UnknownClass { class: ClassId },
    #[error("{name} declares {expected} type parameter(s) but {found} argument(s) were supplied")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
}

impl TypeDescriptor {
    /// `Raw(def)` when `args` is empty, otherwise an owner-less parameterized type.
    ///
    /// This does not consult the registry; use [`TypeDescriptor::parameterized`] when the
    /// argument count has not been checked yet.
    pub fn class(def: ClassId, args: Vec<TypeDescriptor>) -> Self {
        if args.is_empty() {
            TypeDescriptor::Raw(def)
        } else {
            TypeDescriptor::Parameterized(ParameterizedType {
                class: def,
                args,
                owner: None,
            })
        }
    }

    /// A parameterized type whose argument count matches the class declaration.
    pub fn parameterized(
        env: &dyn TypeRegistry,
        class: ClassId,
        args: Vec<TypeDescriptor>,
        owner: Option<TypeDescriptor>,
    ) -> Result<Self, DescriptorError> {
        let def = env
            .class(class)
            .ok_or(DescriptorError::UnknownClass { class })?;
        if def.type_params.len() != args.len() {
            return Err(DescriptorError::ArityMismatch {
                name: def.name.clone(),
                expected: def.type_params.len(),
                found: args.len(),
            });
        }
        Ok(TypeDescriptor::Parameterized(ParameterizedType {
            class,
            args,
            owner: owner.map(Box::new),
        }))
    }

    pub fn array_of(component: TypeDescriptor) -> Self {
        TypeDescriptor::GenericArray(Box::new(component))
    }

    pub fn kind(&self) -> DescriptorKind {
        match self {
            TypeDescriptor::Raw(_) => DescriptorKind::RawClass,
            TypeDescriptor::Parameterized(_) => DescriptorKind::Parameterized,
            TypeDescriptor::Wildcard(_) => DescriptorKind::Wildcard,
            TypeDescriptor::TypeVar(_) => DescriptorKind::TypeVariable,
            TypeDescriptor::GenericArray(_) => DescriptorKind::GenericArray,
        }
    }

    pub fn is_raw_class(&self) -> bool {
        matches!(self, TypeDescriptor::Raw(_))
    }

    pub fn is_parameterized_type(&self) -> bool {
        matches!(self, TypeDescriptor::Parameterized(_))
    }

    pub fn is_type_variable(&self) -> bool {
        matches!(self, TypeDescriptor::TypeVar(_))
    }

    pub fn is_wildcard_type(&self) -> bool {
        matches!(self, TypeDescriptor::Wildcard(_))
    }

    pub fn is_generic_array(&self) -> bool {
        matches!(self, TypeDescriptor::GenericArray(_))
    }

    /// `true` if anything inside this descriptor still has to be bound.
    pub fn has_wildcard_or_type_variables(&self) -> bool {
        match self {
            TypeDescriptor::Raw(_) => false,
            TypeDescriptor::Wildcard(_) | TypeDescriptor::TypeVar(_) => true,
            TypeDescriptor::Parameterized(p) => {
                p.args.iter().any(TypeDescriptor::has_wildcard_or_type_variables)
                    || p.owner
                        .as_deref()
                        .is_some_and(TypeDescriptor::has_wildcard_or_type_variables)
            }
            TypeDescriptor::GenericArray(component) => component.has_wildcard_or_type_variables(),
        }
    }

    pub fn has_type_variables(&self) -> bool {
        match self {
            TypeDescriptor::Raw(_) => false,
            TypeDescriptor::TypeVar(_) => true,
            TypeDescriptor::Wildcard(w) => w
                .upper_bounds
                .iter()
                .chain(&w.lower_bounds)
                .any(TypeDescriptor::has_type_variables),
            TypeDescriptor::Parameterized(p) => {
                p.args.iter().any(TypeDescriptor::has_type_variables)
                    || p.owner.as_deref().is_some_and(TypeDescriptor::has_type_variables)
            }
            TypeDescriptor::GenericArray(component) => component.has_type_variables(),
        }
    }

    pub fn has_wildcard_types(&self) -> bool {
        match self {
            TypeDescriptor::Raw(_) | TypeDescriptor::TypeVar(_) => false,
            TypeDescriptor::Wildcard(_) => true,
            TypeDescriptor::Parameterized(p) => {
                p.args.iter().any(TypeDescriptor::has_wildcard_types)
                    || p.owner.as_deref().is_some_and(TypeDescriptor::has_wildcard_types)
            }
            TypeDescriptor::GenericArray(component) => component.has_wildcard_types(),
        }
    }

    /// A descriptor without free type variables or wildcards.
    pub fn is_concrete(&self) -> bool {
        !self.has_wildcard_or_type_variables()
    }

    /// Actual type arguments; empty for everything but parameterized types.
    pub fn parameter_types(&self) -> &[TypeDescriptor] {
        match self {
            TypeDescriptor::Parameterized(p) => &p.args,
            _ => &[],
        }
    }

    pub fn has_owner_type(&self) -> bool {
        matches!(self, TypeDescriptor::Parameterized(ParameterizedType { owner: Some(_), .. }))
    }

    /// The enclosing parameterized type, if any. A type variable has no notion of an owner.
    pub fn owner_type(&self) -> Result<Option<&TypeDescriptor>, UnsupportedShape> {
        match self {
            TypeDescriptor::TypeVar(_) => Err(UnsupportedShape::new(
                "owner_type",
                DescriptorKind::TypeVariable,
            )),
            TypeDescriptor::Parameterized(p) => Ok(p.owner.as_deref()),
            TypeDescriptor::Raw(_) | TypeDescriptor::Wildcard(_) | TypeDescriptor::GenericArray(_) => {
                Ok(None)
            }
        }
    }

    /// Declared bounds: upper then lower bounds of a wildcard, upper bounds of a type variable,
    /// nothing for every other shape.
    pub fn generic_bounds(&self, env: &dyn TypeRegistry) -> Vec<TypeDescriptor> {
        match self {
            TypeDescriptor::TypeVar(id) => env
                .type_param(*id)
                .map(|def| def.upper_bounds.clone())
                .unwrap_or_default(),
            TypeDescriptor::Wildcard(w) => w
                .effective_upper_bounds(env)
                .into_iter()
                .chain(w.lower_bounds.iter().cloned())
                .collect(),
            TypeDescriptor::Raw(_)
            | TypeDescriptor::Parameterized(_)
            | TypeDescriptor::GenericArray(_) => Vec::new(),
        }
    }

    /// Formal type parameters of the class this descriptor names.
    pub fn type_variables(&self, env: &dyn TypeRegistry) -> Vec<TypeVarId> {
        match self {
            TypeDescriptor::Raw(class) => env
                .class(*class)
                .map(|def| def.type_params.clone())
                .unwrap_or_default(),
            TypeDescriptor::Parameterized(p) => env
                .class(p.class)
                .map(|def| def.type_params.clone())
                .unwrap_or_default(),
            TypeDescriptor::GenericArray(component) => component.type_variables(env),
            TypeDescriptor::Wildcard(_) | TypeDescriptor::TypeVar(_) => Vec::new(),
        }
    }

    /// The nominal class named by a raw or parameterized descriptor.
    pub fn class_id(&self) -> Option<ClassId> {
        match self {
            TypeDescriptor::Raw(class) => Some(*class),
            TypeDescriptor::Parameterized(p) => Some(p.class),
            _ => None,
        }
    }

    /// Every type variable mentioned anywhere inside this descriptor, in first-seen order.
    pub fn free_type_variables(&self) -> Vec<TypeVarId> {
        fn walk(ty: &TypeDescriptor, out: &mut Vec<TypeVarId>) {
            match ty {
                TypeDescriptor::Raw(_) => {}
                TypeDescriptor::TypeVar(id) => {
                    if !out.contains(id) {
                        out.push(*id);
                    }
                }
                TypeDescriptor::Wildcard(w) => {
                    for bound in w.upper_bounds.iter().chain(&w.lower_bounds) {
                        walk(bound, out);
                    }
                }
                TypeDescriptor::Parameterized(p) => {
                    for arg in &p.args {
                        walk(arg, out);
                    }
                    if let Some(owner) = &p.owner {
                        walk(owner, out);
                    }
                }
                TypeDescriptor::GenericArray(component) => walk(component, out),
            }
        }

        let mut out = Vec::new();
        walk(self, &mut out);
        out
    }
}
