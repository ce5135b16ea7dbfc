use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use crate::{
    definition::Strategy,
    errors::ResolveError,
    factories::Creation,
    hive::Hive,
    identifier::Identifier,
    types::{DynError, Instance},
};

impl Hive {
    /// Resolves `identifier`, starting a new resolution path
    pub(crate) fn resolve(&self, identifier: &Identifier) -> Result<Instance, ResolveError> {
        let mut path = vec![identifier.clone()];
        self.resolve_on_path(identifier, &mut path)
    }

    /// Resolves `identifier`, which is the last entry of `path`
    ///
    /// Dependencies are resolved depth first in declaration order and cached as they
    /// complete. The cache of `identifier` is only written on success.
    fn resolve_on_path(
        &self,
        identifier: &Identifier,
        path: &mut Vec<Identifier>,
    ) -> Result<Instance, ResolveError> {
        let Some(definition) = self.definitions.get(identifier) else {
            tracing::error!("Tried to resolve an unregistered bee: {}", identifier);
            return Err(ResolveError::NotFound(identifier.clone()));
        };

        if let Some(cached) = definition.cache.get() {
            tracing::trace!("Using cached instance of {}", identifier);
            return Ok(cached.clone());
        }

        // Precomputed values are already materialized, declared dependencies are not consulted
        let creation = match &definition.strategy {
            Strategy::Precomputed(instance) => {
                let _ = definition.cache.set(instance.clone());
                return Ok(instance.clone());
            }
            Strategy::Blueprint(creation) | Strategy::Function(creation) => creation,
        };

        tracing::debug!(
            "Resolving {} with {} dependencies",
            identifier,
            definition.dependencies.len()
        );

        let mut arguments = Vec::with_capacity(definition.dependencies.len());
        for dependency in &definition.dependencies {
            if path.contains(dependency) {
                let mut chain = path.clone();
                chain.push(dependency.clone());
                return Err(ResolveError::DependencyCycle {
                    dependency: dependency.clone(),
                    requested_by: identifier.clone(),
                    chain,
                });
            }

            path.push(dependency.clone());
            let resolved = self.resolve_on_path(dependency, path);
            path.pop();

            arguments.push(resolved?);
        }

        let instance = create(identifier, creation, arguments)?;
        tracing::debug!("Constructed instance of {}", identifier);
        // Nothing else writes this cell while `identifier` is on the path
        let _ = definition.cache.set(instance.clone());
        Ok(instance)
    }
}

/// Invokes a creation, converting panics and errors into [ResolveError::CreationFailed]
fn create(
    identifier: &Identifier,
    creation: &Creation,
    arguments: Vec<Instance>,
) -> Result<Instance, ResolveError> {
    let failed = |error: DynError| {
        tracing::warn!("Creation of {} failed: {}", identifier, error);
        ResolveError::CreationFailed {
            identifier: identifier.clone(),
            error: Arc::new(error),
        }
    };

    let instance = match panic::catch_unwind(AssertUnwindSafe(|| creation.invoke(arguments))) {
        Ok(Ok(instance)) => instance,
        Ok(Err(error)) => return Err(failed(error)),
        Err(payload) => return Err(failed(panic_message(payload).into())),
    };

    if instance.info != creation.produces() {
        return Err(failed(
            format!(
                "produced '{}' instead of '{}'",
                instance.info,
                creation.produces()
            )
            .into(),
        ));
    }

    Ok(instance)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return message.to_string();
    }
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(_) => "creation panicked".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::{definition::Definition, types::TypeInfo};

    fn counted(counter: &Rc<Cell<u32>>, value: &'static str) -> impl Fn() -> String + 'static {
        let counter = counter.clone();
        move || {
            counter.set(counter.get() + 1);
            value.to_string()
        }
    }

    #[test]
    fn missing_identifier_is_not_found() {
        let hive = Hive::new();
        let err = hive.resolve(&Identifier::of::<u8>()).unwrap_err();
        assert!(matches!(err, ResolveError::NotFound(id) if id == Identifier::of::<u8>()));
    }

    #[test]
    fn cache_is_written_on_success() {
        let counter = Rc::new(Cell::new(0));
        let mut hive = Hive::new();
        hive.register_fn(counted(&counter, "a")).unwrap();

        let first = hive.resolve(&Identifier::of::<String>()).unwrap();
        let second = hive.resolve(&Identifier::of::<String>()).unwrap();

        assert_eq!(counter.get(), 1);
        assert!(first.ptr_eq(&second));
        assert!(hive.is_resolved(&Identifier::of::<String>()));
    }

    #[test]
    fn shared_dependency_is_created_once() {
        let counter = Rc::new(Cell::new(0));
        let mut hive = Hive::new();
        hive.register_fn(counted(&counter, "shared")).unwrap();
        hive.register_fn(|a: Arc<String>, b: Arc<String>| a.len() + b.len())
            .unwrap();

        assert_eq!(*hive.get::<usize>().unwrap(), 12);
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let mut hive = Hive::new();
        hive.register(
            Identifier::of::<String>(),
            Definition::function(|s: Arc<String>| s.to_string()),
        )
        .unwrap();

        let err = hive.resolve(&Identifier::of::<String>()).unwrap_err();
        match err {
            ResolveError::DependencyCycle { chain, .. } => {
                assert_eq!(chain, vec![Identifier::of::<String>(); 2])
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(!hive.is_resolved(&Identifier::of::<String>()));
    }

    #[test]
    fn value_depending_on_itself_is_returned() {
        let mut hive = Hive::new();
        hive.register(
            Identifier::of::<u8>(),
            Definition::value(1_u8).with_dependencies([Identifier::of::<u8>()]),
        )
        .unwrap();

        let instance = hive.resolve(&Identifier::of::<u8>()).unwrap();
        assert_eq!(*instance.downcast::<u8>().unwrap(), 1);
        assert!(hive.is_resolved(&Identifier::of::<u8>()));
    }

    #[test]
    fn cycle_below_the_root_reports_the_walk() {
        let mut hive = Hive::new();
        hive.register_fn(|s: Arc<String>| s.len() as u32).unwrap();
        hive.register_fn(|n: Arc<u8>| n.to_string()).unwrap();
        hive.register_fn(|s: Arc<String>| s.len() as u8).unwrap();

        let err = hive.resolve(&Identifier::of::<u32>()).unwrap_err();
        match err {
            ResolveError::DependencyCycle {
                dependency,
                requested_by,
                chain,
            } => {
                assert_eq!(dependency, Identifier::of::<String>());
                assert_eq!(requested_by, Identifier::of::<u8>());
                assert_eq!(
                    chain,
                    vec![
                        Identifier::of::<u32>(),
                        Identifier::of::<String>(),
                        Identifier::of::<u8>(),
                        Identifier::of::<String>(),
                    ]
                );
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn lying_creation_is_rejected() {
        let mut hive = Hive::new();
        let creation = Creation::new(vec![], TypeInfo::of::<u8>(), |_| Ok(Instance::new(1_u16)));
        hive.register(
            Identifier::of::<u8>(),
            Definition::new(vec![], Strategy::Function(creation)),
        )
        .unwrap();

        let err = hive.resolve(&Identifier::of::<u8>()).unwrap_err();
        assert!(matches!(err, ResolveError::CreationFailed { .. }));
        assert!(!hive.is_resolved(&Identifier::of::<u8>()));
    }

    #[test]
    fn panic_message_of_formatted_panic() {
        let payload = panic::catch_unwind(|| panic!("code {}", 7)).unwrap_err();
        assert_eq!(panic_message(payload), "code 7");
    }
}
