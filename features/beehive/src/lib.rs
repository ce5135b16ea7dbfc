//! Beehive is an in-process registry of producible values ("bees").
//!
//! Values are registered under a type and an optional [Name], either as
//! 1. an existing value,
//! 2. a creation function whose parameters are resolved from the hive,
//! 3. or a [Blueprint] struct whose fields get injected.
//!
//! Requesting a value resolves its dependencies recursively, creates it once and caches it
//! for every later request. Dependency cycles are detected while resolving and reported with
//! the full resolution path.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use beehive::Hive;
//!
//! let mut hive = Hive::new();
//! hive.register_value(123_i32).unwrap();
//! hive.register_fn(|i: Arc<i32>| format!("func({i})")).unwrap();
//! hive.register_fn_named("alt", |i: Arc<i32>| format!("alternative func({i})"))
//!     .unwrap();
//!
//! assert_eq!(*hive.get::<String>().unwrap(), "func(123)");
//! assert_eq!(*hive.get_named::<String>("alt").unwrap(), "alternative func(123)");
//! ```
//!
//! Beehive consists of the following components:
//!
//! 1. Identifier - the key of a registration, type plus optional name
//! 2. Definition - how a value is produced, and its cache
//! 3. Hive - registration, validation and lookup
//! 4. Resolver - recursive resolution with cycle detection
//! 5. Builder - fluent construction of definitions

pub mod blueprint;
pub mod builder;
pub mod definition;
pub mod dependency_graph;
pub mod errors;
pub mod factories;
pub mod hive;
pub mod identifier;
pub mod inject;
mod resolver;
pub mod types;

pub use blueprint::{Blueprint, Injection};
pub use builder::Builder;
pub use definition::{Definition, Strategy};
pub use dependency_graph::{DependencyGraph, DependencyGraphError, DependencyGraphErrors};
pub use errors::{HiveError, InjectError, RegisterError, ResolveError};
pub use factories::{Creation, Factory, TryFactory};
pub use hive::Hive;
pub use identifier::{Identifier, Name};
pub use inject::Inject;
pub use types::{DynError, Injectable, Instance, TypeInfo};
