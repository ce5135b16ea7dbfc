use std::{fmt::Debug, rc::Rc};

use crate::{
    errors::InjectError,
    factories::Creation,
    identifier::{Identifier, Name},
    inject::Inject,
    types::{Injectable, Instance, TypeInfo},
};

/// A struct whose fields are injected one by one
///
/// Registered blueprints start from [Default] and get each [Injection] assigned in the
/// order returned by [Blueprint::injections].
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use beehive::{Blueprint, Injection};
///
/// #[derive(Default)]
/// struct Greeter {
///     greeting: Arc<String>,
///     excited: Arc<bool>,
/// }
///
/// impl Blueprint for Greeter {
///     fn injections() -> Vec<Injection<Self>> {
///         vec![
///             Injection::field(|greeter: &mut Self, greeting: Arc<String>| {
///                 greeter.greeting = greeting
///             }),
///             Injection::named("excited", |greeter: &mut Self, excited: Arc<bool>| {
///                 greeter.excited = excited
///             }),
///         ]
///     }
/// }
/// ```
pub trait Blueprint: Sized + 'static {
    fn injections() -> Vec<Injection<Self>>;
}

type AssignFn<S> = dyn Fn(&mut S, &Instance) -> Result<(), InjectError>;

/// One injected field of a [Blueprint]
pub struct Injection<S> {
    identifier: Identifier,
    assign: Rc<AssignFn<S>>,
}
impl<S> Clone for Injection<S> {
    fn clone(&self) -> Self {
        Injection {
            identifier: self.identifier.clone(),
            assign: self.assign.clone(),
        }
    }
}
impl<S> Debug for Injection<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Injection").field(&self.identifier).finish()
    }
}

impl<S: 'static> Injection<S> {
    /// Injects the unnamed registration of the field's type
    pub fn field<V: Inject + 'static>(assign: impl Fn(&mut S, V) + 'static) -> Self {
        Self::with_identifier(Identifier::new(V::type_info(), None), assign)
    }

    /// Injects the registration of the field's type under `name`
    pub fn named<V: Inject + 'static>(
        name: impl Into<Name>,
        assign: impl Fn(&mut S, V) + 'static,
    ) -> Self {
        Self::with_identifier(Identifier::new(V::type_info(), Some(name.into())), assign)
    }

    fn with_identifier<V: Inject + 'static>(
        identifier: Identifier,
        assign: impl Fn(&mut S, V) + 'static,
    ) -> Self {
        Injection {
            identifier,
            assign: Rc::new(move |target: &mut S, instance: &Instance| {
                assign(target, V::from_instance(instance)?);
                Ok(())
            }),
        }
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub(crate) fn assign(&self, target: &mut S, instance: &Instance) -> Result<(), InjectError> {
        (self.assign)(target, instance)
    }
}

/// Dependencies and creation routine of a registered blueprint
pub(crate) fn blueprint_creation<B: Blueprint + Default + Injectable>(
) -> (Vec<Identifier>, Creation) {
    let injections = B::injections();
    let dependencies: Vec<_> = injections
        .iter()
        .map(|injection| injection.identifier.clone())
        .collect();
    let parameters = dependencies.iter().map(Identifier::type_info).collect();

    let creation = Creation::new(parameters, TypeInfo::of::<B>(), move |arguments| {
        let mut blueprint = B::default();
        for (injection, argument) in injections.iter().zip(arguments.iter()) {
            injection.assign(&mut blueprint, argument)?;
        }
        Ok(Instance::new(blueprint))
    });

    (dependencies, creation)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[derive(Default)]
    struct Pair {
        left: Arc<u8>,
        right: Arc<u8>,
    }
    impl Blueprint for Pair {
        fn injections() -> Vec<Injection<Self>> {
            vec![
                Injection::named("left", |pair: &mut Self, left: Arc<u8>| pair.left = left),
                Injection::named("right", |pair: &mut Self, right: Arc<u8>| {
                    pair.right = right
                }),
            ]
        }
    }

    #[test]
    fn injections_become_dependencies() {
        let (dependencies, creation) = blueprint_creation::<Pair>();

        assert_eq!(
            dependencies,
            vec![
                Identifier::named::<u8>("left"),
                Identifier::named::<u8>("right")
            ]
        );
        assert_eq!(creation.parameters(), &[TypeInfo::of::<u8>(); 2]);
        assert_eq!(creation.produces(), TypeInfo::of::<Pair>());
    }

    #[test]
    fn creation_assigns_fields_in_order() {
        let (_, creation) = blueprint_creation::<Pair>();

        let pair = creation
            .invoke(vec![Instance::new(1_u8), Instance::new(2_u8)])
            .unwrap()
            .downcast::<Pair>()
            .unwrap();

        assert_eq!((*pair.left, *pair.right), (1, 2));
    }
}
