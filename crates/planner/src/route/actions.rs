//! Extraction of pickup and delivery obligations from a mission list.

use std::collections::{HashMap, HashSet};

use hauler_config::Mission;
use hauler_core::{Scu, names};
use hauler_universe::{LocationGraph, LocationId};

use super::RouteItem;

/// Identity of a stop location after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Site {
    Known(LocationId),
    /// Normalized text of a name the graph does not know.
    Unknown(String),
}

impl Site {
    pub fn location(&self) -> Option<LocationId> {
        match self {
            Site::Known(id) => Some(*id),
            Site::Unknown(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiteEntry {
    pub site: Site,
    /// Canonical node name, or the first spelling seen for unknown names.
    pub display: String,
}

/// Interned stop locations in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct SiteTable {
    entries: Vec<SiteEntry>,
    index: HashMap<Site, usize>,
    unresolved: Vec<String>,
}

impl SiteTable {
    fn intern(&mut self, graph: &LocationGraph, raw: &str) -> usize {
        let site = match graph.resolve(raw) {
            Some(id) => Site::Known(id),
            None => Site::Unknown(names::normalize(raw)),
        };
        if let Some(&existing) = self.index.get(&site) {
            return existing;
        }

        let display = match &site {
            Site::Known(id) => graph.node(*id).name.clone(),
            Site::Unknown(_) => {
                let text = raw.trim().to_string();
                log::warn!("unknown location `{text}`, using fallback travel cost");
                self.unresolved.push(text.clone());
                text
            }
        };
        let position = self.entries.len();
        self.index.insert(site.clone(), position);
        self.entries.push(SiteEntry { site, display });
        position
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> &SiteEntry {
        &self.entries[index]
    }

    pub fn location(&self, index: usize) -> Option<LocationId> {
        self.entries[index].site.location()
    }

    /// Names that failed to resolve, in first-seen order.
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }
}

#[derive(Debug, Clone)]
pub struct PickupAction {
    /// `<mission id>_<leg index>`.
    pub id: String,
    pub site: usize,
    pub destination: usize,
    pub item: RouteItem,
}

#[derive(Debug, Clone)]
pub struct DeliveryAction {
    /// `<pickup id>_delivery`.
    pub id: String,
    pub site: usize,
    /// Index of the linked pickup in [`ActionSet::pickups`].
    pub pickup: usize,
    pub item: RouteItem,
}

impl PickupAction {
    pub fn scu(&self) -> Scu {
        self.item.quantity
    }
}

impl DeliveryAction {
    pub fn scu(&self) -> Scu {
        self.item.quantity
    }
}

/// A destination system outside the start system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignSystem {
    pub system: LocationId,
    /// Gateway in the start system that jumps to `system`, when one exists.
    pub gateway: Option<LocationId>,
}

/// Everything a generation run derives from the mission list up front.
#[derive(Debug, Clone, Default)]
pub struct ActionSet {
    pub sites: SiteTable,
    pub pickups: Vec<PickupAction>,
    pub deliveries: Vec<DeliveryAction>,
    pub start_system: Option<LocationId>,
    pub foreign_systems: Vec<ForeignSystem>,
}

impl ActionSet {
    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty() && self.deliveries.is_empty()
    }

    /// Whether two sites may share a system. Unknown sites match every system.
    pub fn same_system(&self, graph: &LocationGraph, a: usize, b: usize) -> bool {
        same_system(graph, self.sites.location(a), self.sites.location(b))
    }
}

pub(crate) fn same_system(
    graph: &LocationGraph,
    a: Option<LocationId>,
    b: Option<LocationId>,
) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => graph.system_of(a) == graph.system_of(b),
        _ => true,
    }
}

/// Mission id used in action ids.
///
/// Blank ids fall back to the 1-based position. A key already in `taken` gets a
/// numeric suffix so leg ids stay unique across missions.
pub fn mission_key(mission: &Mission, position: usize, taken: &HashSet<String>) -> String {
    let id = mission.id.trim();
    if id.is_empty() {
        names::unique_key(&format!("m{}", position + 1), taken)
    } else {
        names::unique_key(id, taken)
    }
}

/// Derive pickups and deliveries in mission order, then leg order.
pub fn extract_actions(graph: &LocationGraph, missions: &[Mission]) -> ActionSet {
    let mut actions = ActionSet::default();

    let mut taken: HashSet<String> = HashSet::new();
    for (position, mission) in missions.iter().enumerate() {
        let mission_id = mission_key(mission, position, &taken);
        if mission_id != mission.id.trim() {
            log::debug!("mission {} routed as {mission_id}", position + 1);
        }
        taken.insert(mission_id.clone());
        for (leg_index, leg) in mission.commodities.iter().enumerate() {
            if !leg.is_routable() {
                log::trace!("skipping incomplete leg {leg_index} of mission {mission_id}");
                continue;
            }
            let pickup_id = format!("{mission_id}_{leg_index}");
            let item = RouteItem {
                leg_id: pickup_id.clone(),
                pickup: actions.pickups.len(),
                mission_id: mission_id.clone(),
                commodity: leg.commodity.trim().to_string(),
                quantity: leg.quantity,
                max_box_size: leg.max_box_size,
            };
            let pickup_site = actions.sites.intern(graph, &leg.pickup);
            let destination_site = actions.sites.intern(graph, &leg.destination);

            actions.deliveries.push(DeliveryAction {
                id: format!("{pickup_id}_delivery"),
                site: destination_site,
                pickup: actions.pickups.len(),
                item: item.clone(),
            });
            actions.pickups.push(PickupAction {
                id: pickup_id,
                site: pickup_site,
                destination: destination_site,
                item,
            });
        }
    }

    actions.start_system = actions
        .pickups
        .iter()
        .find_map(|pickup| actions.sites.location(pickup.site))
        .and_then(|id| graph.system_of(id));

    if let Some(start) = actions.start_system {
        for delivery in &actions.deliveries {
            let Some(system) = actions
                .sites
                .location(delivery.site)
                .and_then(|id| graph.system_of(id))
            else {
                continue;
            };
            if system == start || actions.foreign_systems.iter().any(|f| f.system == system) {
                continue;
            }
            let gateway = graph.gateway_between(start, system);
            if gateway.is_none() {
                log::info!(
                    "no gateway from {} to {}, routing without gateway guidance",
                    graph.node(start).name,
                    graph.node(system).name
                );
            }
            actions.foreign_systems.push(ForeignSystem { system, gateway });
        }
    }

    actions
}
