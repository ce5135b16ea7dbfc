use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use crate::{definition::Strategy, hive::Hive, identifier::Identifier};

/// Declared dependencies of every registered identifier
///
/// Used to find missing dependencies and cycles up front, without creating anything.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    map: BTreeMap<Identifier, Vec<Identifier>>,
}
impl DependencyGraph {
    pub fn new(hive: &Hive) -> Self {
        let map = hive
            .definitions
            .iter()
            .map(|(identifier, definition)| {
                // Precomputed values never resolve their declared dependencies
                let dependencies = match definition.strategy {
                    Strategy::Precomputed(_) => Vec::new(),
                    _ => definition.dependencies.clone(),
                };
                (identifier.clone(), dependencies)
            })
            .collect();

        Self { map }
    }

    pub fn dependencies_of(&self, identifier: &Identifier) -> Option<&[Identifier]> {
        self.map.get(identifier).map(Vec::as_slice)
    }

    /// Validate the graph
    ///
    /// Returns a list of all issues
    pub fn check(&self) -> Result<(), DependencyGraphErrors> {
        let mut checked = HashSet::new();
        let mut errors = Vec::new();
        for identifier in self.map.keys() {
            let mut dependency_chain = Vec::new();
            check_recurse(
                self,
                &mut checked,
                &mut errors,
                &mut dependency_chain,
                identifier,
            );
        }

        if !errors.is_empty() {
            return Err(DependencyGraphErrors { errors });
        }

        return Ok(());

        fn check_recurse<'a>(
            graph: &'a DependencyGraph,
            checked: &mut HashSet<&'a Identifier>,
            errors: &mut Vec<DependencyGraphError>,
            dependency_chain: &mut Vec<&'a Identifier>,
            identifier: &'a Identifier,
        ) {
            // Circular Dependency Check
            if dependency_chain.contains(&identifier) {
                let mut chain: Vec<Identifier> =
                    dependency_chain.iter().map(|&id| id.clone()).collect();
                chain.push(identifier.clone());

                errors.push(DependencyGraphError::CircularDependency {
                    from: chain[0].clone(),
                    to: identifier.clone(),
                    chain,
                });
                return;
            }

            // Skip other checks if already checked
            if !checked.insert(identifier) {
                return;
            };

            let Some(dependencies) = graph.map.get(identifier) else {
                return;
            };

            dependency_chain.push(identifier);

            for dependency in dependencies {
                if !graph.map.contains_key(dependency) {
                    errors.push(DependencyGraphError::MissingDependency {
                        dependency: dependency.clone(),
                        required_by: identifier.clone(),
                    });
                    continue;
                }

                check_recurse(graph, checked, errors, dependency_chain, dependency);
            }

            dependency_chain.pop();
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DependencyGraphError {
    #[error("{required_by} needs {dependency} but it is missing")]
    MissingDependency {
        dependency: Identifier,
        required_by: Identifier,
    },
    #[error("A Circular Dependency exists between {from} and {to} through {chain:?}")]
    CircularDependency {
        from: Identifier,
        to: Identifier,
        chain: Vec<Identifier>,
    },
}
impl std::fmt::Display for DependencyGraphErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut display = Vec::new();
        display.push("The dependency graph had one or more errors:".to_string());
        for error in &self.errors {
            display.push(format!("- {}", error));
        }
        f.write_str(&display.join("\n"))
    }
}

#[derive(Error, Debug, Clone)]
pub struct DependencyGraphErrors {
    pub errors: Vec<DependencyGraphError>,
}
