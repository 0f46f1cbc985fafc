use evo_types::{
    is_array_supertype, is_subclass, ParameterizedType, TypeDescriptor, UnsupportedShape,
};

use crate::{ConstructionFailure, GenericError, GenericResolver};

impl GenericResolver<'_> {
    /// Re-parameterize `source` so that it agrees with `super_type`, one of its supertypes.
    ///
    /// `ArrayList` with `List<String>` gives `ArrayList<String>`; formals that the supertype
    /// does not determine keep their current argument, or become their own type variable when
    /// `source` is raw. A raw `super_type` imposes nothing and yields `source` unchanged.
    pub fn with_parameters_from_superclass(
        &self,
        source: &TypeDescriptor,
        super_type: &TypeDescriptor,
    ) -> Result<TypeDescriptor, GenericError> {
        const OP: &str = "with_parameters_from_superclass";

        match source {
            TypeDescriptor::TypeVar(_) | TypeDescriptor::Wildcard(_) => {
                Err(UnsupportedShape::new(OP, source.kind()).into())
            }
            TypeDescriptor::GenericArray(component) => match super_type {
                TypeDescriptor::GenericArray(super_component) => Ok(TypeDescriptor::array_of(
                    self.with_parameters_from_superclass(component, super_component)?,
                )),
                TypeDescriptor::Raw(class) if is_array_supertype(self.env, *class) => {
                    Ok(source.clone())
                }
                _ => Err(self.fail(source, ConstructionFailure::NotASupertype).into()),
            },
            TypeDescriptor::Raw(class) | TypeDescriptor::Parameterized(ParameterizedType { class, .. }) => {
                let Some(def) = self.env.class(*class) else {
                    return Err(self.fail(source, ConstructionFailure::UnknownClass).into());
                };
                if !def.is_generic() {
                    return Ok(source.clone());
                }

                let target = match super_type {
                    TypeDescriptor::Raw(_) => return Ok(source.clone()),
                    TypeDescriptor::Parameterized(target) => target,
                    other => return Err(UnsupportedShape::new(OP, other.kind()).into()),
                };
                if !is_subclass(self.env, *class, target.class) {
                    return Err(self.fail(source, ConstructionFailure::NotASupertype).into());
                }

                let determined = self.determine_type_arguments(*class, target);
                let current = source.parameter_types();
                let args = def
                    .type_params
                    .iter()
                    .enumerate()
                    .map(|(idx, formal)| match determined.get(*formal) {
                        Some(arg) => arg.clone(),
                        None => current
                            .get(idx)
                            .cloned()
                            .unwrap_or(TypeDescriptor::TypeVar(*formal)),
                    })
                    .collect();

                let owner = match source {
                    TypeDescriptor::Parameterized(p) => p.owner.clone(),
                    _ => None,
                };
                Ok(TypeDescriptor::Parameterized(ParameterizedType {
                    class: *class,
                    args,
                    owner,
                }))
            }
        }
    }
}
