//! Core units, constants, and shared primitives for the Hauler Helper workspace.

/// Cargo quantity in standard cargo units.
pub type Scu = u32;

/// Travel cost tiers used by the heuristic distance model.
pub mod constants {
    /// Cost of moving between two distinct locations around the same moon or planet.
    pub const LOCAL_COST: f64 = 10.0;
    /// Cost between bodies of the same system when no coordinates are known.
    pub const INTERPLANETARY_COST: f64 = 100.0;
    /// Cost of any hop between two different star systems.
    pub const INTERSTELLAR_COST: f64 = 1_000.0;
    /// Cost assumed when either endpoint is not in the location graph.
    pub const UNKNOWN_LOCATION_COST: f64 = 100.0;

    /// Cost of one compass-sector step around a star.
    pub const SECTOR_WEIGHT: f64 = 15.0;
    /// Cost of one orbital-radius step.
    pub const ORBIT_WEIGHT: f64 = 5.0;
    /// Number of compass sectors around a star.
    pub const SECTOR_COUNT: u8 = 8;
    /// Outermost orbit index.
    pub const MAX_ORBIT: u8 = 10;
}

/// Default weights of the greedy scoring function.
pub mod scoring {
    pub const DELIVERY_WEIGHT: f64 = 3.0;
    pub const PICKUP_WEIGHT: f64 = 2.0;
    /// Bonus for a location that offers both a delivery and a pickup.
    pub const COMBO_BONUS: f64 = 200.0;
    pub const DISTANCE_PENALTY: f64 = 0.5;
    pub const LOOKAHEAD_WEIGHT: f64 = 0.15;
    pub const GATEWAY_WEIGHT: f64 = 0.1;
    /// Upper bound on full 2-opt passes over the delivery stops.
    pub const MAX_REFINE_PASSES: usize = 50;
}

/// Location classification shared by the graph and its configuration records.
pub mod kind {
    use std::fmt;

    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum LocationKind {
        System,
        Planet,
        Moon,
        Station,
        City,
        Outpost,
        Lagrange,
        Gateway,
    }

    impl LocationKind {
        pub fn as_str(self) -> &'static str {
            match self {
                LocationKind::System => "system",
                LocationKind::Planet => "planet",
                LocationKind::Moon => "moon",
                LocationKind::Station => "station",
                LocationKind::City => "city",
                LocationKind::Outpost => "outpost",
                LocationKind::Lagrange => "lagrange",
                LocationKind::Gateway => "gateway",
            }
        }
    }

    impl fmt::Display for LocationKind {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }
}

/// Coarse polar position of a body around its system's star.
pub mod polar {
    use super::constants::{MAX_ORBIT, ORBIT_WEIGHT, SECTOR_COUNT, SECTOR_WEIGHT};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Coordinates {
        /// Compass sector, 1 through 8.
        pub sector: u8,
        /// Radial distance from the star, 0 through 10.
        pub orbit: u8,
    }

    impl Coordinates {
        pub fn new(sector: u8, orbit: u8) -> Self {
            Self { sector, orbit }
        }

        /// Whether both components lie in their documented ranges.
        pub fn is_valid(&self) -> bool {
            (1..=SECTOR_COUNT).contains(&self.sector) && self.orbit <= MAX_ORBIT
        }

        /// Circular distance between two compass sectors.
        pub fn sector_delta(&self, other: &Coordinates) -> u8 {
            let direct = self.sector.abs_diff(other.sector);
            direct.min(SECTOR_COUNT - direct)
        }

        pub fn orbit_delta(&self, other: &Coordinates) -> u8 {
            self.orbit.abs_diff(other.orbit)
        }

        /// Weighted polar distance; sector steps cost three times an orbit step.
        pub fn distance(&self, other: &Coordinates) -> f64 {
            f64::from(self.sector_delta(other)) * SECTOR_WEIGHT
                + f64::from(self.orbit_delta(other)) * ORBIT_WEIGHT
        }
    }
}

/// Free-text location name helpers.
pub mod names {
    use std::collections::HashSet;

    /// Trim, lowercase, and collapse internal whitespace so equivalent spellings compare equal.
    pub fn normalize(name: &str) -> String {
        name.split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Trimmed display form with internal whitespace collapsed.
    pub fn display(name: &str) -> String {
        name.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// `base`, or `base-2`, `base-3`, ... when earlier keys are already taken.
    pub fn unique_key(base: &str, taken: &HashSet<String>) -> String {
        let mut key = base.to_string();
        let mut suffix = 2;
        while taken.contains(&key) {
            key = format!("{base}-{suffix}");
            suffix += 1;
        }
        key
    }
}

pub use kind::LocationKind;
pub use polar::Coordinates;
