//! Configuration models and loaders for the Hauler Helper route planner.

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use hauler_core::{LocationKind, Scu, names, scoring};
use serde::Deserialize;
use thiserror::Error;

/// Largest standard container, used when a leg does not state a box limit.
pub const DEFAULT_MAX_BOX_SIZE: u8 = 4;

/// Hauling contract as entered in the mission editor.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Mission {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub payout: Option<u64>,
    #[serde(default, alias = "legs")]
    pub commodities: Vec<CommodityLeg>,
}

/// One commodity to carry from a pickup to a destination.
///
/// Every field is optional on disk: the editor saves half-filled legs and the
/// planner ignores them until they are complete.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CommodityLeg {
    #[serde(default)]
    pub commodity: String,
    #[serde(default)]
    pub quantity: Scu,
    #[serde(default)]
    pub pickup: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default = "default_max_box_size")]
    pub max_box_size: u8,
}

impl CommodityLeg {
    pub fn new(commodity: &str, quantity: Scu, pickup: &str, destination: &str) -> Self {
        Self {
            commodity: commodity.to_string(),
            quantity,
            pickup: pickup.to_string(),
            destination: destination.to_string(),
            max_box_size: DEFAULT_MAX_BOX_SIZE,
        }
    }

    /// A leg takes part in routing only once commodity, quantity, pickup and destination are all set.
    pub fn is_routable(&self) -> bool {
        !self.commodity.trim().is_empty()
            && self.quantity > 0
            && !self.pickup.trim().is_empty()
            && !self.destination.trim().is_empty()
    }
}

impl Default for CommodityLeg {
    fn default() -> Self {
        Self::new("", 0, "", "")
    }
}

fn default_max_box_size() -> u8 {
    DEFAULT_MAX_BOX_SIZE
}

/// A single node of a location table.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LocationRecord {
    pub id: String,
    pub name: String,
    pub kind: LocationKind,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub sector: Option<u8>,
    #[serde(default)]
    pub orbit: Option<u8>,
    /// Id of the system this node jumps to, for gateway stations.
    #[serde(default)]
    pub gateway_to: Option<String>,
}

/// Versioned location reference table.
#[derive(Debug, Deserialize, Clone)]
pub struct LocationTable {
    #[serde(default = "default_table_version")]
    pub version: u32,
    pub locations: Vec<LocationRecord>,
}

fn default_table_version() -> u32 {
    1
}

/// Ship catalog entry. Capacity is informational only.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ShipConfig {
    pub name: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(alias = "capacity")]
    pub capacity_scu: Scu,
}

/// Tunable weights of the route generator. Missing fields keep their defaults.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlannerConfig {
    pub delivery_weight: f64,
    pub pickup_weight: f64,
    pub combo_bonus: f64,
    pub distance_penalty: f64,
    pub lookahead_weight: f64,
    pub gateway_weight: f64,
    pub max_refine_passes: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            delivery_weight: scoring::DELIVERY_WEIGHT,
            pickup_weight: scoring::PICKUP_WEIGHT,
            combo_bonus: scoring::COMBO_BONUS,
            distance_penalty: scoring::DISTANCE_PENALTY,
            lookahead_weight: scoring::LOOKAHEAD_WEIGHT,
            gateway_weight: scoring::GATEWAY_WEIGHT,
            max_refine_passes: scoring::MAX_REFINE_PASSES,
        }
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("ship '{0}' not found in catalog")]
    ShipNotFound(String),
}

/// Load missions from a YAML list, a single TOML mission, or a directory of TOML missions.
pub fn load_missions<P: AsRef<Path>>(path: P) -> Result<Vec<Mission>, ConfigError> {
    let mut missions: Vec<Mission> = load_records(path)?;
    let mut taken: HashSet<String> = missions
        .iter()
        .map(|mission| mission.id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();
    for (index, mission) in missions.iter_mut().enumerate() {
        if mission.id.trim().is_empty() {
            mission.id = names::unique_key(&format!("m{}", index + 1), &taken);
            taken.insert(mission.id.clone());
        }
    }
    Ok(missions)
}

/// Parse a YAML mission list held in memory.
pub fn parse_missions_yaml(contents: &str) -> Result<Vec<Mission>, ConfigError> {
    Ok(serde_yaml::from_str(contents)?)
}

/// Load a location table document from YAML or TOML.
pub fn load_location_table<P: AsRef<Path>>(path: P) -> Result<LocationTable, ConfigError> {
    load_document(path)
}

/// Load ship catalog entries from a YAML list or TOML files.
pub fn load_ships<P: AsRef<Path>>(path: P) -> Result<Vec<ShipConfig>, ConfigError> {
    load_records(path)
}

/// Load planner weights from YAML or TOML.
pub fn load_planner_config<P: AsRef<Path>>(path: P) -> Result<PlannerConfig, ConfigError> {
    load_document(path)
}

/// Find a ship by name (case-insensitive).
pub fn find_ship<'a>(ships: &'a [ShipConfig], name: &str) -> Result<&'a ShipConfig, ConfigError> {
    let wanted = name.trim().to_lowercase();
    ships
        .iter()
        .find(|ship| ship.name.to_lowercase() == wanted)
        .ok_or_else(|| ConfigError::ShipNotFound(name.to_string()))
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn load_document<T, P>(path: P) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}
