use std::marker::PhantomData;

use crate::{
    blueprint::{blueprint_creation, Blueprint},
    definition::{unnamed_dependencies, Definition, Strategy},
    errors::RegisterError,
    factories::{Creation, Factory, TryFactory},
    hive::Hive,
    identifier::{Identifier, Name},
    types::{Injectable, Instance, TypeInfo},
};

/// Fluent construction of a definition for `T`
///
/// Nothing touches the hive until [Builder::register]. Every call consumes and returns the
/// builder, and builders are [Clone], so a partially configured builder can serve as a
/// template for several registrations.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use beehive::{Builder, Hive, Identifier};
///
/// let mut hive = Hive::new();
/// hive.register_value_named("port", 8080_u16).unwrap();
///
/// Builder::<String>::new()
///     .name("address")
///     .deps([Identifier::named::<u16>("port")])
///     .func(|port: Arc<u16>| format!("localhost:{port}"))
///     .register(&mut hive)
///     .unwrap();
///
/// assert_eq!(*hive.get_named::<String>("address").unwrap(), "localhost:8080");
/// ```
pub struct Builder<T> {
    name: Option<Name>,
    dependencies: Option<Vec<Identifier>>,
    value: Option<Instance>,
    creation: Option<PendingCreation>,
    _provides: PhantomData<fn() -> T>,
}
impl<T> Clone for Builder<T> {
    fn clone(&self) -> Self {
        Builder {
            name: self.name.clone(),
            dependencies: self.dependencies.clone(),
            value: self.value.clone(),
            creation: self.creation.clone(),
            _provides: PhantomData,
        }
    }
}
impl<T: Injectable> Default for Builder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
struct PendingCreation {
    creation: Creation,
    /// Used when no dependencies were declared explicitly
    inferred: Vec<Identifier>,
    blueprint: bool,
}

impl<T: Injectable> Builder<T> {
    pub fn new() -> Self {
        Builder {
            name: None,
            dependencies: None,
            value: None,
            creation: None,
            _provides: PhantomData,
        }
    }

    pub fn name(mut self, name: impl Into<Name>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declares the dependencies explicitly instead of inferring them from the parameters
    pub fn deps(mut self, dependencies: impl IntoIterator<Item = Identifier>) -> Self {
        self.dependencies = Some(dependencies.into_iter().collect());
        self
    }

    pub fn value(mut self, value: T) -> Self {
        self.value = Some(Instance::new(value));
        self
    }

    pub fn func<Args, F: Factory<Args, Provides = T>>(self, factory: F) -> Self {
        self.with_function(Creation::from_factory(factory))
    }

    pub fn try_func<Args, F: TryFactory<Args, Provides = T>>(self, factory: F) -> Self {
        self.with_function(Creation::from_try_factory(factory))
    }

    fn with_function(mut self, creation: Creation) -> Self {
        self.creation = Some(PendingCreation {
            inferred: unnamed_dependencies(creation.parameters()),
            creation,
            blueprint: false,
        });
        self
    }

    /// Creates `T` by injecting its fields
    ///
    /// Explicit dependencies override the blueprint's own identifiers.
    pub fn blueprint(mut self) -> Self
    where
        T: Blueprint + Default,
    {
        let (inferred, creation) = blueprint_creation::<T>();
        self.creation = Some(PendingCreation {
            creation,
            inferred,
            blueprint: true,
        });
        self
    }

    pub fn identifier(&self) -> Identifier {
        Identifier::new(TypeInfo::of::<T>(), self.name.clone())
    }

    pub fn register(self, hive: &mut Hive) -> Result<(), RegisterError> {
        let identifier = self.identifier();

        let (strategy, inferred) = match (self.value, self.creation) {
            (Some(_), Some(_)) => return Err(RegisterError::ConflictingStrategies(identifier)),
            (None, None) => return Err(RegisterError::MissingStrategy(identifier)),
            (Some(value), None) => (Strategy::Precomputed(value), vec![]),
            (None, Some(pending)) if pending.blueprint => {
                (Strategy::Blueprint(pending.creation), pending.inferred)
            }
            (None, Some(pending)) => (Strategy::Function(pending.creation), pending.inferred),
        };

        let dependencies = self.dependencies.unwrap_or(inferred);
        hive.register(identifier, Definition::new(dependencies, strategy))
    }
}
