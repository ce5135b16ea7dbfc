use std::sync::Arc;

use thiserror::Error;

use crate::{
    dependency_graph::DependencyGraphErrors,
    identifier::Identifier,
    types::{DynError, TypeInfo},
};

/// Any error the hive can return
#[derive(Error, Debug)]
pub enum HiveError {
    #[error(transparent)]
    Register(#[from] RegisterError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Graph(#[from] DependencyGraphErrors),
}

/// Errors while registering a definition
///
/// A failed registration never changes the hive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// The identifier is already taken
    #[error("bee {0} already registered")]
    DuplicateIdentifier(Identifier),
    /// Neither a value nor a creation strategy was supplied
    #[error("bee {0} must have a value or a creation strategy")]
    MissingStrategy(Identifier),
    /// Both a value and a creation strategy were supplied
    #[error("bee {0} can not have both a value and a creation strategy")]
    ConflictingStrategies(Identifier),
    /// The creation strategy does not produce the identifier's type
    #[error("bee {identifier} creation produces '{produces}'")]
    InvalidCreationSignature {
        identifier: Identifier,
        produces: TypeInfo,
    },
    /// The precomputed value is not of the identifier's type
    #[error("bee {identifier} was given a value of type '{actual}'")]
    ValueTypeMismatch {
        identifier: Identifier,
        actual: TypeInfo,
    },
    /// Declared dependencies do not match the creation parameters
    #[error(
        "bee {identifier} creation func with invalid parameters {} for real parameters {}",
        type_list(.declared),
        type_list(.parameters)
    )]
    SignatureMismatch {
        identifier: Identifier,
        declared: Vec<TypeInfo>,
        parameters: Vec<TypeInfo>,
    },
}

/// Errors while resolving an identifier
#[derive(Error, Debug, Clone)]
pub enum ResolveError {
    /// Nothing is registered for the identifier
    #[error("bee {0} not found")]
    NotFound(Identifier),
    /// The identifier is already being resolved further up the path
    #[error(
        "dependency cycle found {dependency} <-> {requested_by} | route: {}",
        route(.chain)
    )]
    DependencyCycle {
        dependency: Identifier,
        requested_by: Identifier,
        /// Resolution path closed with the repeated identifier
        chain: Vec<Identifier>,
    },
    /// The creation strategy panicked or returned an error
    #[error("error in creation of bee {identifier}: {error}")]
    CreationFailed {
        identifier: Identifier,
        error: Arc<DynError>,
    },
    #[error("Failed to downcast, required: '{required_type}' actual: '{actual_type}'")]
    DowncastFailed {
        required_type: &'static str,
        actual_type: &'static str,
    },
    /// A resolved value could not be assigned into a struct field
    #[error("could not inject {identifier}: {error}")]
    InjectFailed {
        identifier: Identifier,
        error: InjectError,
    },
}

/// Errors while turning a resolved instance into a parameter
#[derive(Error, Debug, Clone)]
pub enum InjectError {
    #[error("Failed to downcast, required: '{required_type}' actual: '{actual_type}'")]
    DowncastFailed {
        required_type: &'static str,
        actual_type: &'static str,
    },
    /// Fewer arguments than parameters were supplied
    #[error("no argument supplied for parameter '{0}'")]
    MissingArgument(TypeInfo),
    /// Generic error during injection
    #[error("Error during injection: {0}")]
    Other(Arc<DynError>),
}
impl InjectError {
    pub fn other(error: impl Into<DynError>) -> Self {
        Self::Other(Arc::new(error.into()))
    }
}

fn type_list(types: &[TypeInfo]) -> String {
    let names: Vec<_> = types.iter().map(|info| info.type_name).collect();
    format!("[{}]", names.join(" "))
}

fn route(chain: &[Identifier]) -> String {
    let hops: Vec<_> = chain.iter().map(Identifier::to_string).collect();
    hops.join(" > ")
}
