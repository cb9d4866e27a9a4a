//! Location forest and name resolution.

use std::collections::HashMap;
use std::sync::OnceLock;

use hauler_config::{LocationRecord, LocationTable};
use hauler_core::{Coordinates, LocationKind, names};
use thiserror::Error;

use crate::builtin;

/// Typed handle to a node of a [`LocationGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(u32);

impl LocationId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A resolved location.
#[derive(Debug, Clone)]
pub struct LocationNode {
    /// Stable lowercase slug.
    pub slug: String,
    /// Canonical display name.
    pub name: String,
    pub kind: LocationKind,
    pub parent: Option<LocationId>,
    /// Own coordinates; use [`LocationGraph::coordinates_of`] for inherited ones.
    pub coordinates: Option<Coordinates>,
    /// System reached by jumping through this node.
    pub gateway_to: Option<LocationId>,
}

/// Errors raised while validating a location table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("location id `{0}` is defined more than once")]
    DuplicateId(String),
    #[error("location name `{name}` is used by both `{first}` and `{second}`")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },
    #[error("location `{id}` refers to unknown parent `{parent}`")]
    UnknownParent { id: String, parent: String },
    #[error("location `{0}` has no parent but is not a system")]
    OrphanRoot(String),
    #[error("system `{0}` must not have a parent")]
    NestedSystem(String),
    #[error("parent chain of `{0}` loops back on itself")]
    Cycle(String),
    #[error("location `{0}` must give both sector and orbit or neither")]
    IncompleteCoordinates(String),
    #[error("location `{id}` has coordinates out of range (sector {sector}, orbit {orbit})")]
    CoordinatesOutOfRange { id: String, sector: u8, orbit: u8 },
    #[error("gateway `{id}` must lead to another known system, not `{target}`")]
    InvalidGateway { id: String, target: String },
}

/// Immutable hierarchy of systems, bodies and sites.
#[derive(Debug, Clone)]
pub struct LocationGraph {
    version: u32,
    nodes: Vec<LocationNode>,
    by_slug: HashMap<String, LocationId>,
    by_name: HashMap<String, LocationId>,
}

impl LocationGraph {
    /// Shared graph built from the built-in reference table.
    pub fn builtin() -> &'static LocationGraph {
        static BUILTIN: OnceLock<LocationGraph> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            LocationGraph::from_table(builtin::builtin_table())
                .expect("built-in location table is consistent")
        })
    }

    /// Build and validate a graph from a location table.
    pub fn from_table(table: LocationTable) -> Result<Self, GraphError> {
        let mut graph = Self::from_records(table.locations)?;
        graph.version = table.version;
        Ok(graph)
    }

    /// Build and validate a graph from loose records.
    pub fn from_records<I>(records: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = LocationRecord>,
    {
        let records: Vec<LocationRecord> = records.into_iter().collect();

        let mut by_slug = HashMap::with_capacity(records.len());
        let mut by_name: HashMap<String, LocationId> = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let id = LocationId(index as u32);
            let slug = record.id.trim().to_lowercase();
            if by_slug.insert(slug, id).is_some() {
                return Err(GraphError::DuplicateId(record.id.clone()));
            }
            let key = names::normalize(&record.name);
            if let Some(previous) = by_name.insert(key, id) {
                return Err(GraphError::DuplicateName {
                    name: record.name.clone(),
                    first: records[previous.index()].id.clone(),
                    second: record.id.clone(),
                });
            }
        }

        let lookup = |raw: &str| by_slug.get(&raw.trim().to_lowercase()).copied();

        let mut nodes = Vec::with_capacity(records.len());
        for record in &records {
            let parent = match &record.parent {
                Some(parent) => Some(lookup(parent).ok_or_else(|| GraphError::UnknownParent {
                    id: record.id.clone(),
                    parent: parent.clone(),
                })?),
                None => None,
            };
            match (record.kind, parent) {
                (LocationKind::System, Some(_)) => {
                    return Err(GraphError::NestedSystem(record.id.clone()));
                }
                (kind, None) if kind != LocationKind::System => {
                    return Err(GraphError::OrphanRoot(record.id.clone()));
                }
                _ => {}
            }

            let coordinates = match (record.sector, record.orbit) {
                (Some(sector), Some(orbit)) => {
                    let coordinates = Coordinates::new(sector, orbit);
                    if !coordinates.is_valid() {
                        return Err(GraphError::CoordinatesOutOfRange {
                            id: record.id.clone(),
                            sector,
                            orbit,
                        });
                    }
                    Some(coordinates)
                }
                (None, None) => None,
                _ => return Err(GraphError::IncompleteCoordinates(record.id.clone())),
            };

            let gateway_to = match &record.gateway_to {
                Some(target) => Some(lookup(target).ok_or_else(|| GraphError::InvalidGateway {
                    id: record.id.clone(),
                    target: target.clone(),
                })?),
                None => None,
            };

            nodes.push(LocationNode {
                slug: record.id.trim().to_lowercase(),
                name: names::display(&record.name),
                kind: record.kind,
                parent,
                coordinates,
                gateway_to,
            });
        }

        let graph = Self {
            version: 1,
            nodes,
            by_slug,
            by_name,
        };
        graph.validate_links()?;
        Ok(graph)
    }

    fn validate_links(&self) -> Result<(), GraphError> {
        for id in self.ids() {
            let mut steps = 0;
            let mut current = self.node(id).parent;
            while let Some(parent) = current {
                steps += 1;
                if steps > self.nodes.len() {
                    return Err(GraphError::Cycle(self.node(id).slug.clone()));
                }
                current = self.node(parent).parent;
            }

            let node = self.node(id);
            if let Some(target) = node.gateway_to {
                let target_node = self.node(target);
                if target_node.kind != LocationKind::System || self.system_of(id) == Some(target) {
                    return Err(GraphError::InvalidGateway {
                        id: node.slug.clone(),
                        target: target_node.slug.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node handles in table order.
    pub fn ids(&self) -> impl Iterator<Item = LocationId> + '_ {
        (0..self.nodes.len()).map(|index| LocationId(index as u32))
    }

    pub fn node(&self, id: LocationId) -> &LocationNode {
        &self.nodes[id.index()]
    }

    /// Exact, case-insensitive match against display names.
    pub fn resolve(&self, name: &str) -> Option<LocationId> {
        let key = names::normalize(name);
        if key.is_empty() {
            return None;
        }
        self.by_name.get(&key).copied()
    }

    /// Look a node up by its slug.
    pub fn by_slug(&self, slug: &str) -> Option<LocationId> {
        self.by_slug.get(&slug.trim().to_lowercase()).copied()
    }

    /// Nearest node of `kind` on the chain starting at `id` itself.
    pub fn ancestor_of_type(&self, id: LocationId, kind: LocationKind) -> Option<LocationId> {
        let mut current = Some(id);
        while let Some(candidate) = current {
            let node = self.node(candidate);
            if node.kind == kind {
                return Some(candidate);
            }
            current = node.parent;
        }
        None
    }

    pub fn system_of(&self, id: LocationId) -> Option<LocationId> {
        self.ancestor_of_type(id, LocationKind::System)
    }

    /// Own coordinates, or those of the nearest placed ancestor.
    pub fn coordinates_of(&self, id: LocationId) -> Option<Coordinates> {
        let mut current = Some(id);
        while let Some(candidate) = current {
            let node = self.node(candidate);
            if node.coordinates.is_some() {
                return node.coordinates;
            }
            current = node.parent;
        }
        None
    }

    /// Chain of ancestors from the immediate parent up to the system.
    pub fn ancestors(&self, id: LocationId) -> Vec<LocationId> {
        let mut chain = Vec::new();
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = self.node(parent).parent;
        }
        chain
    }

    /// Gateway inside `from_system` that jumps to `to_system`, first in table order.
    pub fn gateway_between(
        &self,
        from_system: LocationId,
        to_system: LocationId,
    ) -> Option<LocationId> {
        self.ids().find(|&id| {
            self.node(id).gateway_to == Some(to_system) && self.system_of(id) == Some(from_system)
        })
    }
}
