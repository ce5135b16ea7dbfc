use std::{fmt::Debug, ops::Deref, sync::Arc};

use beehive::{Inject, InjectError, Injectable, Instance, TypeInfo};

use crate::provider::ConfigProvider;

/// A wrapper type to allow for config injections
///
/// This provides a simple way to retrieve configs from the [ConfigProvider] registered in
/// the hive, and inject them into a creation function as a parameter. The parameter depends
/// on the [ConfigProvider]; a config type that was never added fails the creation.
///
/// # Example
/// ```rust
/// use beehive::Hive;
/// use beehive_config::{Config, ConfigProvider};
///
/// struct ServerConfig {
///     port: u16,
/// }
///
/// let mut provider = ConfigProvider::new();
/// provider.add_config(ServerConfig { port: 8080 }).unwrap();
///
/// let mut hive = Hive::new();
/// hive.register_value(provider).unwrap();
/// hive.register_fn(|config: Config<ServerConfig>| format!("0.0.0.0:{}", config.port))
///     .unwrap();
///
/// assert_eq!(*hive.get::<String>().unwrap(), "0.0.0.0:8080");
/// ```
pub struct Config<T> {
    inner: Arc<T>,
}
impl<T> Deref for Config<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl<T> Clone for Config<T> {
    fn clone(&self) -> Self {
        Config {
            inner: self.inner.clone(),
        }
    }
}
impl<T: Debug> Debug for Config<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Config").field(&self.inner).finish()
    }
}
impl<T> Config<T> {
    pub fn inner(&self) -> Arc<T> {
        self.inner.clone()
    }

    pub fn into_inner(self) -> Arc<T> {
        self.inner
    }
}

impl<T: Injectable> Inject for Config<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<ConfigProvider>()
    }

    fn from_instance(instance: &Instance) -> Result<Self, InjectError> {
        let provider = Arc::<ConfigProvider>::from_instance(instance)?;
        let inner = provider.require_config::<T>().map_err(InjectError::other)?;

        Ok(Config { inner })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use beehive::{Hive, Identifier, ResolveError};

    use super::*;

    #[derive(Debug, PartialEq)]
    struct DatabaseConfig {
        url: &'static str,
    }

    fn hive_with(provider: ConfigProvider) -> Hive {
        let mut hive = Hive::new();
        hive.register_value(provider).unwrap();
        hive
    }

    #[test]
    fn config_parameter_depends_on_provider() {
        let mut hive = hive_with(ConfigProvider::new());
        hive.register_fn(|config: Config<DatabaseConfig>| config.url.len())
            .unwrap();

        assert_eq!(
            hive.definition(&Identifier::of::<usize>())
                .unwrap()
                .dependencies(),
            &[Identifier::of::<ConfigProvider>()]
        );
    }

    #[test]
    fn injects_added_config() {
        let mut provider = ConfigProvider::new();
        provider
            .add_config(DatabaseConfig {
                url: "postgres://db",
            })
            .unwrap();

        let mut hive = hive_with(provider);
        hive.register_fn(|config: Config<DatabaseConfig>, retries: Arc<u8>| {
            format!("{} x{retries}", config.url)
        })
        .unwrap();
        hive.register_value(3_u8).unwrap();

        assert_eq!(*hive.get::<String>().unwrap(), "postgres://db x3");
    }

    #[test]
    fn missing_config_fails_creation() {
        let mut hive = hive_with(ConfigProvider::new());
        hive.register_fn(|config: Config<DatabaseConfig>| config.url.to_string())
            .unwrap();

        let err = hive.get::<String>().unwrap_err();
        match err {
            ResolveError::CreationFailed { identifier, error } => {
                assert_eq!(identifier, Identifier::of::<String>());
                assert!(error.to_string().contains("is not known"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
