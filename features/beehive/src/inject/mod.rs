use crate::{
    errors::InjectError,
    types::{Instance, TypeInfo},
};

pub mod arc;

/// A parameter kind of creation functions and blueprint fields
///
/// Declares which type has to be resolved for the parameter and how the parameter is
/// extracted from the resolved [Instance].
pub trait Inject: Sized {
    /// The type that has to be resolved to supply this parameter
    fn type_info() -> TypeInfo;

    fn from_instance(instance: &Instance) -> Result<Self, InjectError>;
}
