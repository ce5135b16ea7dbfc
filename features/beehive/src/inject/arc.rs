use std::{any::type_name, sync::Arc};

use crate::{
    errors::InjectError,
    inject::Inject,
    types::{Injectable, Instance, TypeInfo},
};

impl<T: Injectable> Inject for Arc<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn from_instance(instance: &Instance) -> Result<Self, InjectError> {
        instance
            .downcast::<T>()
            .map_err(|actual_type| InjectError::DowncastFailed {
                required_type: type_name::<T>(),
                actual_type,
            })
    }
}
