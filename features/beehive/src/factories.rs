use std::{fmt::Debug, rc::Rc};

use crate::{
    errors::InjectError,
    inject::Inject,
    types::{DynError, Injectable, Instance, TypeInfo},
};

/// A creation function supplying one type
///
/// Implemented for every `Fn(A1, .., An) -> R` with up to eight [Inject] parameters.
pub trait Factory<Args>: 'static {
    type Provides: Injectable;

    /// Returns the typeinfo about the factory's provided type
    fn supplies() -> TypeInfo {
        TypeInfo::of::<Self::Provides>()
    }

    /// Types required by the parameters, in declaration order
    fn parameters() -> Vec<TypeInfo>;

    /// Invokes the function with resolved arguments, positioned as the parameters
    fn construct(&self, arguments: Vec<Instance>) -> Result<Self::Provides, DynError>;
}

/// A creation function which may fail
///
/// Implemented for every `Fn(A1, .., An) -> Result<R, E>` with up to eight [Inject]
/// parameters. An `Err` is reported as a failed creation and nothing is cached.
pub trait TryFactory<Args>: 'static {
    type Provides: Injectable;

    fn supplies() -> TypeInfo {
        TypeInfo::of::<Self::Provides>()
    }

    fn parameters() -> Vec<TypeInfo>;

    fn try_construct(&self, arguments: Vec<Instance>) -> Result<Self::Provides, DynError>;
}

fn next_argument(
    arguments: &mut impl Iterator<Item = Instance>,
    expected: TypeInfo,
) -> Result<Instance, InjectError> {
    arguments
        .next()
        .ok_or(InjectError::MissingArgument(expected))
}

macro_rules! impl_factory {
    ($($param:ident),*) => {
        impl<Func, R, $($param,)*> Factory<($($param,)*)> for Func
        where
            Func: Fn($($param),*) -> R + 'static,
            R: Injectable,
            $($param: Inject,)*
        {
            type Provides = R;

            fn parameters() -> Vec<TypeInfo> {
                vec![$(<$param as Inject>::type_info()),*]
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn construct(&self, arguments: Vec<Instance>) -> Result<R, DynError> {
                let mut arguments = arguments.into_iter();
                $(
                    let $param = <$param as Inject>::from_instance(&next_argument(
                        &mut arguments,
                        <$param as Inject>::type_info(),
                    )?)?;
                )*
                Ok(self($($param),*))
            }
        }

        impl<Func, R, E, $($param,)*> TryFactory<($($param,)*)> for Func
        where
            Func: Fn($($param),*) -> Result<R, E> + 'static,
            R: Injectable,
            E: Into<DynError>,
            $($param: Inject,)*
        {
            type Provides = R;

            fn parameters() -> Vec<TypeInfo> {
                vec![$(<$param as Inject>::type_info()),*]
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn try_construct(&self, arguments: Vec<Instance>) -> Result<R, DynError> {
                let mut arguments = arguments.into_iter();
                $(
                    let $param = <$param as Inject>::from_instance(&next_argument(
                        &mut arguments,
                        <$param as Inject>::type_info(),
                    )?)?;
                )*
                self($($param),*).map_err(Into::into)
            }
        }
    };
}

impl_factory!();
impl_factory!(A1);
impl_factory!(A1, A2);
impl_factory!(A1, A2, A3);
impl_factory!(A1, A2, A3, A4);
impl_factory!(A1, A2, A3, A4, A5);
impl_factory!(A1, A2, A3, A4, A5, A6);
impl_factory!(A1, A2, A3, A4, A5, A6, A7);
impl_factory!(A1, A2, A3, A4, A5, A6, A7, A8);

type CreateFn = dyn Fn(Vec<Instance>) -> Result<Instance, DynError>;

/// Type-erased creation routine together with its signature
#[derive(Clone)]
pub struct Creation {
    parameters: Vec<TypeInfo>,
    produces: TypeInfo,
    create: Rc<CreateFn>,
}
impl Debug for Creation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Creation")
            .field("parameters", &self.parameters)
            .field("produces", &self.produces)
            .finish_non_exhaustive()
    }
}

impl Creation {
    /// Creation from a dynamically typed routine
    ///
    /// The routine receives one argument per parameter, in the same order, and must return
    /// an instance of `produces`.
    pub fn new(
        parameters: Vec<TypeInfo>,
        produces: TypeInfo,
        create: impl Fn(Vec<Instance>) -> Result<Instance, DynError> + 'static,
    ) -> Self {
        Creation {
            parameters,
            produces,
            create: Rc::new(create),
        }
    }

    pub fn from_factory<Args, F: Factory<Args>>(factory: F) -> Self {
        Creation::new(F::parameters(), F::supplies(), move |arguments| {
            factory.construct(arguments).map(Instance::new)
        })
    }

    pub fn from_try_factory<Args, F: TryFactory<Args>>(factory: F) -> Self {
        Creation::new(F::parameters(), F::supplies(), move |arguments| {
            factory.try_construct(arguments).map(Instance::new)
        })
    }

    pub fn parameters(&self) -> &[TypeInfo] {
        &self.parameters
    }

    pub fn produces(&self) -> TypeInfo {
        self.produces
    }

    pub(crate) fn invoke(&self, arguments: Vec<Instance>) -> Result<Instance, DynError> {
        (self.create)(arguments)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn function_signature_is_introspected() {
        let creation = Creation::from_factory(|a: Arc<i32>, b: Arc<String>| format!("{a}{b}"));

        assert_eq!(
            creation.parameters(),
            &[TypeInfo::of::<i32>(), TypeInfo::of::<String>()]
        );
        assert_eq!(creation.produces(), TypeInfo::of::<String>());

        let produced = creation
            .invoke(vec![Instance::new(1_i32), Instance::new("x".to_string())])
            .unwrap();
        assert_eq!(*produced.downcast::<String>().unwrap(), "1x");
    }

    #[test]
    fn fallible_function_produces_ok_type() {
        let creation = Creation::from_try_factory(|| Err::<u8, _>("nope"));

        assert_eq!(creation.produces(), TypeInfo::of::<u8>());
        assert!(creation.parameters().is_empty());

        let err = creation.invoke(vec![]).unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }

    #[test]
    fn missing_argument_is_an_error() {
        let creation = Creation::from_factory(|a: Arc<i32>| *a);

        let err = creation.invoke(vec![]).unwrap_err();
        assert_eq!(err.to_string(), "no argument supplied for parameter 'i32'");
    }
}
