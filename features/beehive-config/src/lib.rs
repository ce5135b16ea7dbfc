//! Beehive Config provides a registry of configs that can be injected into the creation
//! functions of a [Hive](beehive::Hive).
//!
//! Beehive Config is split into two major parts:
//! 1. ConfigProvider: Used to create the registry of all configs
//! 2. Config<T>: A parameter type to retrieve configs during creation
//!
//! # Examples
//!
//! ```rust
//! use beehive::Hive;
//! use beehive_config::{register_provider, Config, ConfigProvider};
//!
//! #[derive(Clone)]
//! struct AppConfig {
//!     host: String,
//!     port: u16,
//!     app_name: String,
//! }
//!
//! let mut provider = ConfigProvider::new();
//! provider
//!     .add_config(AppConfig {
//!         host: "localhost".to_string(),
//!         port: 8080_u16,
//!         app_name: "My Awesome App".to_string(),
//!     })
//!     .unwrap();
//!
//! let mut hive = Hive::new();
//! register_provider(&mut hive, provider).unwrap();
//! hive.register_fn(|app: Config<AppConfig>| {
//!     format!("{} on {}:{}", app.app_name, app.host, app.port)
//! })
//! .unwrap();
//!
//! assert_eq!(
//!     *hive.get::<String>().unwrap(),
//!     "My Awesome App on localhost:8080"
//! );
//! ```
//!
//! Beehive Config consists of the following components:
//!
//! 1. Config - for injecting a config and handling resolution
//! 2. Provider - for creating a registry of configs, adding and retrieving configs
//! 3. Errors - for config errors

use beehive::{Hive, RegisterError};

pub mod config;
pub mod errors;
pub mod provider;

pub use config::Config;
pub use errors::ConfigError;
pub use provider::ConfigProvider;

/// Registers the provider as the unnamed [ConfigProvider] of the hive
pub fn register_provider(hive: &mut Hive, provider: ConfigProvider) -> Result<(), RegisterError> {
    hive.register_value(provider)
}
