use evo_types::{
    ConstructorDef, MethodDef, SubstitutionMap, TypeDescriptor, TypeVarId,
};

use crate::{ConstructionFailed, ConstructionFailure, GenericResolver};

/// A member signature with every type variable replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcreteSignature {
    /// Chosen arguments for the member's own type parameters, in declaration order.
    pub type_args: Vec<TypeDescriptor>,
    pub params: Vec<TypeDescriptor>,
    /// `None` for `void` methods.
    pub return_type: Option<TypeDescriptor>,
}

impl GenericResolver<'_> {
    /// Instantiate `method` as invoked on `receiver`.
    ///
    /// The receiver's bindings apply to instance methods only; method type parameters are
    /// chosen from their bounds in declaration order, so later parameters may depend on
    /// earlier ones.
    pub fn instantiate_method(
        &self,
        receiver: &TypeDescriptor,
        method: &MethodDef,
    ) -> Result<ConcreteSignature, ConstructionFailed> {
        let map = if method.is_static {
            SubstitutionMap::new()
        } else {
            self.type_variable_map(receiver)
        };
        let (type_args, map) = self.choose_type_arguments(&method.type_params, map)?;

        let params = self.instantiate_all(&method.params, &map)?;
        let return_type = match &method.return_type {
            Some(ty) => Some(self.instantiate(ty, &map, 0)?),
            None => None,
        };

        tracing::debug!(
            target: "evo.generic",
            method = %method.name,
            receiver = %receiver.display(self.env),
            type_args = type_args.len(),
            "instantiated method"
        );

        Ok(ConcreteSignature {
            type_args,
            params,
            return_type,
        })
    }

    /// Instantiate `ctor` for `owner`, choosing the class type arguments as well when `owner`
    /// does not supply them. The return type is the constructed type.
    pub fn instantiate_constructor(
        &self,
        owner: &TypeDescriptor,
        ctor: &ConstructorDef,
    ) -> Result<ConcreteSignature, ConstructionFailed> {
        let Some(class) = owner.class_id() else {
            return Err(self.fail(owner, ConstructionFailure::UnknownClass));
        };
        let Some(def) = self.env.class(class) else {
            return Err(self.fail(owner, ConstructionFailure::UnknownClass));
        };

        let constructed = if def.is_generic() && !owner.is_parameterized_type() {
            let raw_args = def
                .type_params
                .iter()
                .map(|tp| TypeDescriptor::TypeVar(*tp))
                .collect();
            TypeDescriptor::class(class, raw_args)
        } else {
            owner.clone()
        };
        let constructed = self.instantiate(&constructed, &self.type_variable_map(owner), 0)?;

        let map = self.type_variable_map(&constructed);
        let (type_args, map) = self.choose_type_arguments(&ctor.type_params, map)?;
        let params = self.instantiate_all(&ctor.params, &map)?;

        Ok(ConcreteSignature {
            type_args,
            params,
            return_type: Some(constructed),
        })
    }

    fn choose_type_arguments(
        &self,
        type_params: &[TypeVarId],
        mut map: SubstitutionMap,
    ) -> Result<(Vec<TypeDescriptor>, SubstitutionMap), ConstructionFailed> {
        let mut chosen = Vec::with_capacity(type_params.len());
        for tp in type_params {
            let ty = self.instantiate(&TypeDescriptor::TypeVar(*tp), &map, 0)?;
            map.bind(*tp, ty.clone());
            chosen.push(ty);
        }
        Ok((chosen, map))
    }

    fn instantiate_all(
        &self,
        types: &[TypeDescriptor],
        map: &SubstitutionMap,
    ) -> Result<Vec<TypeDescriptor>, ConstructionFailed> {
        types.iter().map(|ty| self.instantiate(ty, map, 0)).collect()
    }
}
