use std::{borrow::Cow, fmt::Display};

use crate::types::TypeInfo;

/// Discriminates several registrations of the same type
///
/// Textual and numeric names never compare equal, `Number(1)` is not `Text("1")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Name {
    Text(Cow<'static, str>),
    Number(i64),
}
impl Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Name::Text(text) => f.write_str(text),
            Name::Number(number) => write!(f, "{number}"),
        }
    }
}
impl From<&'static str> for Name {
    fn from(value: &'static str) -> Self {
        Name::Text(Cow::Borrowed(value))
    }
}
impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::Text(Cow::Owned(value))
    }
}
impl From<i64> for Name {
    fn from(value: i64) -> Self {
        Name::Number(value)
    }
}
impl From<i32> for Name {
    fn from(value: i32) -> Self {
        Name::Number(value.into())
    }
}
impl From<u32> for Name {
    fn from(value: u32) -> Self {
        Name::Number(value.into())
    }
}

/// Key of one producible value: its type plus an optional [Name]
///
/// An absent name is the default slot of a type and differs from an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    type_info: TypeInfo,
    name: Option<Name>,
}
impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "'{}#{}'", self.type_info, name),
            None => write!(f, "'{}'", self.type_info),
        }
    }
}

impl Identifier {
    pub fn new(type_info: TypeInfo, name: Option<Name>) -> Self {
        Identifier { type_info, name }
    }

    /// Unnamed identifier of `T`
    pub fn of<T: 'static + ?Sized>() -> Self {
        Identifier::new(TypeInfo::of::<T>(), None)
    }

    /// Identifier of `T` registered under `name`
    pub fn named<T: 'static + ?Sized>(name: impl Into<Name>) -> Self {
        Identifier::new(TypeInfo::of::<T>(), Some(name.into()))
    }

    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn equality_is_structural() {
        assert_eq!(Identifier::of::<String>(), Identifier::of::<String>());
        assert_eq!(
            Identifier::named::<String>("a"),
            Identifier::named::<String>("a".to_string())
        );
        assert_ne!(Identifier::of::<String>(), Identifier::of::<i32>());
        assert_ne!(
            Identifier::named::<String>("a"),
            Identifier::named::<String>("b")
        );
    }

    #[test]
    fn absent_name_differs_from_empty_name() {
        assert_ne!(Identifier::of::<String>(), Identifier::named::<String>(""));

        let set: HashSet<_> = [Identifier::of::<u8>(), Identifier::named::<u8>("")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn numeric_and_textual_names_differ() {
        assert_ne!(Name::from(1_i64), Name::from("1"));
        assert_ne!(Identifier::named::<i32>(1_i64), Identifier::named::<i32>("1"));
    }

    #[test]
    fn display() {
        assert_eq!(Identifier::of::<i32>().to_string(), "'i32'");
        assert_eq!(Identifier::named::<i32>("name").to_string(), "'i32#name'");
        assert_eq!(Identifier::named::<u8>(7_u32).to_string(), "'u8#7'");
    }
}
