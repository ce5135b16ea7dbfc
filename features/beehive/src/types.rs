use std::{
    any::{Any, TypeId},
    fmt::Debug,
    sync::Arc,
};

/// Boxed error returned by creation functions
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Resolved values are handed out as shared [Arc]s, so anything the hive produces
/// must be Send + Sync + 'static - even though the hive itself is single threaded.
pub trait Injectable: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> Injectable for T {}

/// A type-erased value held by the hive
#[derive(Clone)]
pub struct Instance {
    pub info: TypeInfo,
    pub instance: Arc<dyn Any + Send + Sync + 'static>,
}
impl Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Instance").field(&self.info.type_name).finish()
    }
}

impl Instance {
    pub fn new<ExistingInstance: Injectable>(instance: ExistingInstance) -> Self {
        Self::from_arc(Arc::new(instance))
    }

    pub fn from_arc<ExistingInstance: Injectable>(instance: Arc<ExistingInstance>) -> Self {
        Instance {
            info: TypeInfo::of::<ExistingInstance>(),
            instance,
        }
    }

    /// Downcasts to the concrete type, returning the actual type name on failure
    pub fn downcast<T: Injectable>(&self) -> Result<Arc<T>, &'static str> {
        match Arc::downcast::<T>(self.instance.clone()) {
            Ok(downcasted) => Ok(downcasted),
            Err(_) => Err(self.info.type_name),
        }
    }

    /// Two instances are the same if they share the same allocation
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.instance, &other.instance)
    }
}

/// Type Name and Type Id
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TypeInfo {
    pub type_name: &'static str,
    pub type_id: TypeId,
}
impl std::fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name)
    }
}
impl TypeInfo {
    pub fn of<T: 'static + ?Sized>() -> TypeInfo {
        TypeInfo {
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }
}
