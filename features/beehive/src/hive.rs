use std::{
    any::type_name,
    collections::{BTreeMap, HashMap},
    fmt::Debug,
    sync::Arc,
};

use crate::{
    blueprint::Blueprint,
    dependency_graph::{DependencyGraph, DependencyGraphErrors},
    definition::Definition,
    errors::{RegisterError, ResolveError},
    factories::{Factory, TryFactory},
    identifier::{Identifier, Name},
    types::{Injectable, Instance, TypeInfo},
};

/// Registry of everything that can be produced
///
/// Values are created lazily on first request and then reused for every later request.
///
/// The hive is meant for single threaded use: resolution writes into the cache of each
/// definition, so it is neither `Send` nor `Sync`. Resolved values themselves are
/// shared [Arc]s and can be sent anywhere.
#[derive(Default)]
pub struct Hive {
    pub(crate) definitions: HashMap<Identifier, Definition>,
}
impl Debug for Hive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sorted: BTreeMap<_, _> = self.definitions.iter().collect();
        let mut map = f.debug_map();
        for (identifier, definition) in sorted {
            let state = if definition.is_resolved() {
                "resolved"
            } else {
                "pending"
            };
            map.entry(&identifier.to_string(), &state);
        }
        map.finish()
    }
}

impl Hive {
    pub fn new() -> Self {
        Hive {
            definitions: HashMap::new(),
        }
    }

    /// Registers `definition` under `identifier`
    ///
    /// The identifier's name is authoritative for the definition.
    pub fn register(
        &mut self,
        identifier: Identifier,
        mut definition: Definition,
    ) -> Result<(), RegisterError> {
        definition.validate(&identifier)?;

        if self.definitions.contains_key(&identifier) {
            return Err(RegisterError::DuplicateIdentifier(identifier));
        }

        tracing::debug!(
            "Registered {} with {} dependencies",
            identifier,
            definition.dependencies.len()
        );

        definition.name = identifier.name().cloned();
        self.definitions.insert(identifier, definition);
        Ok(())
    }

    pub fn register_value<T: Injectable>(&mut self, value: T) -> Result<(), RegisterError> {
        self.register(Identifier::of::<T>(), Definition::value(value))
    }

    pub fn register_value_named<T: Injectable>(
        &mut self,
        name: impl Into<Name>,
        value: T,
    ) -> Result<(), RegisterError> {
        self.register(Identifier::named::<T>(name), Definition::value(value))
    }

    /// Registers a creation function for its return type
    ///
    /// Every parameter becomes an unnamed dependency on the parameter's type.
    pub fn register_fn<Args, F: Factory<Args>>(&mut self, factory: F) -> Result<(), RegisterError> {
        self.register(
            Identifier::new(F::supplies(), None),
            Definition::function(factory),
        )
    }

    pub fn register_fn_named<Args, F: Factory<Args>>(
        &mut self,
        name: impl Into<Name>,
        factory: F,
    ) -> Result<(), RegisterError> {
        self.register(
            Identifier::new(F::supplies(), Some(name.into())),
            Definition::function(factory),
        )
    }

    /// Registers a fallible creation function for the `Ok` type of its result
    pub fn register_try_fn<Args, F: TryFactory<Args>>(
        &mut self,
        factory: F,
    ) -> Result<(), RegisterError> {
        self.register(
            Identifier::new(F::supplies(), None),
            Definition::try_function(factory),
        )
    }

    pub fn register_try_fn_named<Args, F: TryFactory<Args>>(
        &mut self,
        name: impl Into<Name>,
        factory: F,
    ) -> Result<(), RegisterError> {
        self.register(
            Identifier::new(F::supplies(), Some(name.into())),
            Definition::try_function(factory),
        )
    }

    pub fn register_blueprint<B: Blueprint + Default + Injectable>(
        &mut self,
    ) -> Result<(), RegisterError> {
        self.register(Identifier::of::<B>(), Definition::blueprint::<B>())
    }

    pub fn register_blueprint_named<B: Blueprint + Default + Injectable>(
        &mut self,
        name: impl Into<Name>,
    ) -> Result<(), RegisterError> {
        self.register(Identifier::named::<B>(name), Definition::blueprint::<B>())
    }

    /// Resolves the type-erased value of `identifier`
    ///
    /// A creation function that panics fails with [ResolveError::CreationFailed]. The panic
    /// still passes through the installed panic hook, which by default prints it to stderr.
    pub fn get_instance(&self, identifier: &Identifier) -> Result<Instance, ResolveError> {
        self.resolve(identifier)
    }

    /// Resolves the unnamed registration of `T`
    pub fn get<T: Injectable>(&self) -> Result<Arc<T>, ResolveError> {
        self.get_typed(&Identifier::of::<T>())
    }

    /// Resolves the registration of `T` under `name`
    pub fn get_named<T: Injectable>(&self, name: impl Into<Name>) -> Result<Arc<T>, ResolveError> {
        self.get_typed(&Identifier::named::<T>(name))
    }

    /// Resolves `T` and clones it into `destination`
    ///
    /// `destination` is left untouched on error.
    pub fn get_into<T: Injectable + Clone>(&self, destination: &mut T) -> Result<(), ResolveError> {
        let resolved = self.get::<T>()?;
        destination.clone_from(&resolved);
        Ok(())
    }

    pub fn get_named_into<T: Injectable + Clone>(
        &self,
        name: impl Into<Name>,
        destination: &mut T,
    ) -> Result<(), ResolveError> {
        let resolved = self.get_named::<T>(name)?;
        destination.clone_from(&resolved);
        Ok(())
    }

    fn get_typed<T: Injectable>(&self, identifier: &Identifier) -> Result<Arc<T>, ResolveError> {
        self.resolve(identifier)?
            .downcast()
            .map_err(|actual_type| ResolveError::DowncastFailed {
                required_type: type_name::<T>(),
                actual_type,
            })
    }

    /// Injects every field of a caller owned struct
    ///
    /// Fields are resolved one after another; fields assigned before a failure keep their
    /// new value.
    pub fn fill_blueprint_instance<B: Blueprint>(&self, target: &mut B) -> Result<(), ResolveError> {
        for injection in B::injections() {
            let identifier = injection.identifier();
            let instance = self.resolve(identifier)?;
            injection
                .assign(target, &instance)
                .map_err(|error| ResolveError::InjectFailed {
                    identifier: identifier.clone(),
                    error,
                })?;
        }
        Ok(())
    }

    pub fn contains(&self, identifier: &Identifier) -> bool {
        self.definitions.contains_key(identifier)
    }

    /// True once the identifier was resolved successfully
    pub fn is_resolved(&self, identifier: &Identifier) -> bool {
        self.definitions
            .get(identifier)
            .is_some_and(Definition::is_resolved)
    }

    pub fn definition(&self, identifier: &Identifier) -> Option<&Definition> {
        self.definitions.get(identifier)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.definitions.keys()
    }

    /// All identifiers registered for a type, named or not
    pub fn identifiers_of(&self, type_info: TypeInfo) -> Vec<&Identifier> {
        let mut identifiers: Vec<_> = self
            .definitions
            .keys()
            .filter(|identifier| identifier.type_info() == type_info)
            .collect();
        identifiers.sort();
        identifiers
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Snapshot of the declared dependencies
    pub fn graph(&self) -> DependencyGraph {
        DependencyGraph::new(self)
    }

    /// Reports missing dependencies and cycles without creating anything
    pub fn check(&self) -> Result<(), DependencyGraphErrors> {
        self.graph().check()
    }
}
