use std::{cell::OnceCell, fmt::Debug};

use crate::{
    blueprint::{blueprint_creation, Blueprint},
    errors::RegisterError,
    factories::{Creation, Factory, TryFactory},
    identifier::{Identifier, Name},
    types::{Injectable, Instance, TypeInfo},
};

/// How a definition produces its value
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Value that already exists
    Precomputed(Instance),
    /// Default-constructed struct with injected fields
    Blueprint(Creation),
    /// Creation function invoked with the resolved dependencies
    Function(Creation),
}

/// Describes how to produce the value of one identifier
pub struct Definition {
    pub(crate) name: Option<Name>,
    pub(crate) dependencies: Vec<Identifier>,
    pub(crate) strategy: Strategy,
    /// Set once, on the first successful resolution
    pub(crate) cache: OnceCell<Instance>,
}
impl Debug for Definition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Definition")
            .field("name", &self.name)
            .field("dependencies", &self.dependencies)
            .field("strategy", &self.strategy)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

impl Definition {
    pub fn new(dependencies: Vec<Identifier>, strategy: Strategy) -> Self {
        Definition {
            name: None,
            dependencies,
            strategy,
            cache: OnceCell::new(),
        }
    }

    pub fn value<T: Injectable>(value: T) -> Self {
        Definition::new(vec![], Strategy::Precomputed(Instance::new(value)))
    }

    /// Function definition, one unnamed dependency per parameter
    pub fn function<Args, F: Factory<Args>>(factory: F) -> Self {
        Definition::from_creation(Creation::from_factory(factory))
    }

    /// Fallible function definition, one unnamed dependency per parameter
    pub fn try_function<Args, F: TryFactory<Args>>(factory: F) -> Self {
        Definition::from_creation(Creation::from_try_factory(factory))
    }

    pub fn blueprint<B: Blueprint + Default + Injectable>() -> Self {
        let (dependencies, creation) = blueprint_creation::<B>();
        Definition::new(dependencies, Strategy::Blueprint(creation))
    }

    fn from_creation(creation: Creation) -> Self {
        let dependencies = unnamed_dependencies(creation.parameters());
        Definition::new(dependencies, Strategy::Function(creation))
    }

    /// Replaces the dependencies with explicitly declared ones
    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = Identifier>) -> Self {
        self.dependencies = dependencies.into_iter().collect();
        self
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    pub fn dependencies(&self) -> &[Identifier] {
        &self.dependencies
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn is_resolved(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Checks the definition can produce a value for `identifier`
    pub(crate) fn validate(&self, identifier: &Identifier) -> Result<(), RegisterError> {
        let creation = match &self.strategy {
            Strategy::Precomputed(instance) => {
                if instance.info != identifier.type_info() {
                    return Err(RegisterError::ValueTypeMismatch {
                        identifier: identifier.clone(),
                        actual: instance.info,
                    });
                }
                return Ok(());
            }
            Strategy::Blueprint(creation) | Strategy::Function(creation) => creation,
        };

        if creation.produces() != identifier.type_info() {
            return Err(RegisterError::InvalidCreationSignature {
                identifier: identifier.clone(),
                produces: creation.produces(),
            });
        }

        let declared: Vec<TypeInfo> = self.dependencies.iter().map(Identifier::type_info).collect();
        if declared != creation.parameters() {
            return Err(RegisterError::SignatureMismatch {
                identifier: identifier.clone(),
                declared,
                parameters: creation.parameters().to_vec(),
            });
        }

        Ok(())
    }
}

/// One unnamed identifier per parameter type
pub(crate) fn unnamed_dependencies(parameters: &[TypeInfo]) -> Vec<Identifier> {
    parameters
        .iter()
        .map(|parameter| Identifier::new(*parameter, None))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn function_dependencies_follow_parameters() {
        let definition = Definition::function(|_: Arc<i32>, _: Arc<f32>| true);

        assert_eq!(
            definition.dependencies(),
            &[Identifier::of::<i32>(), Identifier::of::<f32>()]
        );
        assert!(definition.validate(&Identifier::of::<bool>()).is_ok());
        assert!(!definition.is_resolved());
    }

    #[test]
    fn mismatching_dependencies_are_rejected() {
        let definition = Definition::function(|_: Arc<i32>, _: Arc<f32>| true)
            .with_dependencies([Identifier::of::<String>(), Identifier::of::<f32>()]);

        let err = definition.validate(&Identifier::of::<bool>()).unwrap_err();
        assert_eq!(
            err,
            RegisterError::SignatureMismatch {
                identifier: Identifier::of::<bool>(),
                declared: vec![TypeInfo::of::<String>(), TypeInfo::of::<f32>()],
                parameters: vec![TypeInfo::of::<i32>(), TypeInfo::of::<f32>()],
            }
        );
    }

    #[test]
    fn wrong_dependency_count_is_rejected() {
        let definition = Definition::function(|_: Arc<i32>, _: Arc<String>| true)
            .with_dependencies([Identifier::of::<i32>()]);

        assert!(matches!(
            definition.validate(&Identifier::of::<bool>()),
            Err(RegisterError::SignatureMismatch { .. })
        ));
    }

    #[test]
    fn product_must_match_identifier() {
        let function = Definition::function(|| 1_u8);
        assert_eq!(
            function.validate(&Identifier::of::<String>()),
            Err(RegisterError::InvalidCreationSignature {
                identifier: Identifier::of::<String>(),
                produces: TypeInfo::of::<u8>(),
            })
        );

        let value = Definition::value(1_u8);
        assert_eq!(
            value.validate(&Identifier::of::<String>()),
            Err(RegisterError::ValueTypeMismatch {
                identifier: Identifier::of::<String>(),
                actual: TypeInfo::of::<u8>(),
            })
        );
    }
}
