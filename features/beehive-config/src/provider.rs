use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
};

use beehive::{Injectable, TypeInfo};

use crate::errors::ConfigError;

/// A provider to register all configs.
///
/// Configs can be registered and retrieved based on type. Register the provider itself
/// in the hive to make its configs injectable as [Config](crate::config::Config).
#[derive(Default)]
pub struct ConfigProvider {
    configs: HashMap<TypeId, (TypeInfo, Arc<dyn Any + Send + Sync + 'static>)>,
}
impl Debug for ConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.configs.values().map(|(info, _)| info.type_name).collect();
        names.sort_unstable();
        f.debug_tuple("ConfigProvider").field(&names).finish()
    }
}

impl ConfigProvider {
    /// Initializes an empty Config Provider
    pub fn new() -> Self {
        Self {
            configs: HashMap::new(),
        }
    }

    /// Retrieve a config with specified type.
    ///
    /// Returns `None` if the config type was never added
    pub fn get_config<T: Injectable>(&self) -> Option<Arc<T>> {
        self.configs
            .get(&TypeId::of::<T>())
            .and_then(|(_, entry)| entry.clone().downcast().ok())
    }

    /// Retrieve a config with specified type, failing with [ConfigError::Missing]
    pub fn require_config<T: Injectable>(&self) -> Result<Arc<T>, ConfigError> {
        self.get_config()
            .ok_or_else(|| ConfigError::Missing(TypeInfo::of::<T>()))
    }

    pub fn contains<T: Injectable>(&self) -> bool {
        self.configs.contains_key(&TypeId::of::<T>())
    }

    /// Add a config to the registry.
    ///
    /// If the config type is already registered, it will return a
    /// [`ConfigError::AlreadyRegistered`] error
    pub fn add_config<T: Injectable>(&mut self, config: T) -> Result<&mut Self, ConfigError> {
        let info = TypeInfo::of::<T>();

        if self.configs.contains_key(&info.type_id) {
            return Err(ConfigError::AlreadyRegistered(info));
        }

        tracing::debug!("Added config {}", info);
        self.configs.insert(info.type_id, (info, Arc::new(config)));
        Ok(self)
    }

    /// Can optionally add a config to the registry.
    ///
    /// If the config provided is `Some(T)`, it will be the same as calling [`ConfigProvider::add_config`]
    /// If the config provided is `None`, then the function just returns `Ok(self)` for chaining
    pub fn maybe_add_config<T: Injectable>(
        &mut self,
        config: Option<T>,
    ) -> Result<&mut Self, ConfigError> {
        match config {
            Some(c) => self.add_config(c),
            None => Ok(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct AppConfig {
        host: String,
        port: u16,
    }

    fn app_config() -> AppConfig {
        AppConfig {
            host: "localhost".to_string(),
            port: 8080,
        }
    }

    #[test]
    fn add_and_get() {
        let mut provider = ConfigProvider::new();
        provider.add_config(app_config()).unwrap();

        assert_eq!(*provider.get_config::<AppConfig>().unwrap(), app_config());
        assert!(provider.contains::<AppConfig>());
        assert!(provider.get_config::<u8>().is_none());
        assert_eq!(
            provider.require_config::<u8>().unwrap_err(),
            ConfigError::Missing(TypeInfo::of::<u8>())
        );
    }

    #[test]
    fn duplicate_is_rejected() {
        let mut provider = ConfigProvider::new();
        provider.add_config(app_config()).unwrap();

        let err = provider.add_config(app_config()).unwrap_err();
        assert_eq!(err, ConfigError::AlreadyRegistered(TypeInfo::of::<AppConfig>()));
    }

    #[test]
    fn maybe_add_chains() {
        let mut provider = ConfigProvider::new();
        provider
            .maybe_add_config(None::<u8>)
            .unwrap()
            .maybe_add_config(Some(3_u16))
            .unwrap();

        assert!(!provider.contains::<u8>());
        assert_eq!(*provider.get_config::<u16>().unwrap(), 3);
    }
}
