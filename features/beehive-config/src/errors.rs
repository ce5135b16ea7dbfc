use beehive::TypeInfo;

/// Errors of the [ConfigProvider](crate::provider::ConfigProvider)
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The required Config is not known
    #[error("The required Config type '{0}' is not known")]
    Missing(TypeInfo),
    /// The Config type is already registered
    #[error("The Config type '{0}' is already registered")]
    AlreadyRegistered(TypeInfo),
}
