//! Built-in location table for the Stanton, Pyro and Nyx systems.
//!
//! Moons and surface sites carry no coordinates of their own and inherit the
//! position of the nearest placed ancestor. Lagrange stations sit beside their
//! planet: L1 inward, L2 outward, L3 opposite, L4 one sector ahead, L5 one behind.

use hauler_config::{LocationRecord, LocationTable};
use hauler_core::LocationKind::{self, *};

/// Version of the built-in table; bump whenever names change.
pub const BUILTIN_TABLE_VERSION: u32 = 3;

struct Entry {
    id: &'static str,
    name: &'static str,
    kind: LocationKind,
    parent: Option<&'static str>,
    position: Option<(u8, u8)>,
    gateway_to: Option<&'static str>,
}

const fn system(id: &'static str, name: &'static str) -> Entry {
    Entry {
        id,
        name,
        kind: System,
        parent: None,
        position: None,
        gateway_to: None,
    }
}

const fn site(
    id: &'static str,
    name: &'static str,
    kind: LocationKind,
    parent: &'static str,
) -> Entry {
    Entry {
        id,
        name,
        kind,
        parent: Some(parent),
        position: None,
        gateway_to: None,
    }
}

const fn placed(
    id: &'static str,
    name: &'static str,
    kind: LocationKind,
    parent: &'static str,
    sector: u8,
    orbit: u8,
) -> Entry {
    Entry {
        id,
        name,
        kind,
        parent: Some(parent),
        position: Some((sector, orbit)),
        gateway_to: None,
    }
}

const fn gateway(
    id: &'static str,
    name: &'static str,
    parent: &'static str,
    sector: u8,
    orbit: u8,
    to: &'static str,
) -> Entry {
    Entry {
        id,
        name,
        kind: Gateway,
        parent: Some(parent),
        position: Some((sector, orbit)),
        gateway_to: Some(to),
    }
}

const ENTRIES: &[Entry] = &[
    system("stanton", "Stanton"),
    system("pyro", "Pyro"),
    system("nyx", "Nyx"),
    // Stanton planets
    placed("hurston", "Hurston", Planet, "stanton", 1, 2),
    placed("crusader", "Crusader", Planet, "stanton", 3, 5),
    placed("arccorp", "ArcCorp", Planet, "stanton", 6, 4),
    placed("microtech", "MicroTech", Planet, "stanton", 4, 8),
    // Stanton jump points
    gateway("pyro-gateway-stanton", "Pyro Gateway - Stanton", "stanton", 7, 10, "pyro"),
    gateway("nyx-gateway-stanton", "Nyx Gateway - Stanton", "stanton", 3, 10, "nyx"),
    // Moons
    site("aberdeen", "Aberdeen", Moon, "hurston"),
    site("arial", "Arial", Moon, "hurston"),
    site("magda", "Magda", Moon, "hurston"),
    site("ita", "Ita", Moon, "hurston"),
    site("cellin", "Cellin", Moon, "crusader"),
    site("yela", "Yela", Moon, "crusader"),
    site("daymar", "Daymar", Moon, "crusader"),
    site("lyria", "Lyria", Moon, "arccorp"),
    site("wala", "Wala", Moon, "arccorp"),
    site("caliope", "Caliope", Moon, "microtech"),
    site("clio", "Clio", Moon, "microtech"),
    site("euterpe", "Euterpe", Moon, "microtech"),
    // Lagrange stations
    placed("hur-l1", "HUR-L1 Green Glade", Lagrange, "hurston", 1, 1),
    placed("hur-l2", "HUR-L2 Faithful Dream", Lagrange, "hurston", 1, 3),
    placed("hur-l3", "HUR-L3 Thundering Express", Lagrange, "hurston", 5, 2),
    placed("hur-l4", "HUR-L4 Melodic Fields", Lagrange, "hurston", 2, 2),
    placed("hur-l5", "HUR-L5 High Course", Lagrange, "hurston", 8, 2),
    placed("cru-l1", "CRU-L1 Ambitious Dream", Lagrange, "crusader", 3, 4),
    placed("cru-l2", "CRU-L2", Lagrange, "crusader", 3, 6),
    placed("cru-l3", "CRU-L3", Lagrange, "crusader", 7, 5),
    placed("cru-l4", "CRU-L4 Shallow Fields", Lagrange, "crusader", 4, 5),
    placed("cru-l5", "CRU-L5 Beautiful Glen", Lagrange, "crusader", 2, 5),
    placed("arc-l1", "ARC-L1 Wide Forest", Lagrange, "arccorp", 6, 3),
    placed("arc-l2", "ARC-L2", Lagrange, "arccorp", 6, 5),
    placed("arc-l3", "ARC-L3 Modern Express", Lagrange, "arccorp", 2, 4),
    placed("arc-l4", "ARC-L4 Feint Glen", Lagrange, "arccorp", 7, 4),
    placed("arc-l5", "ARC-L5 Yellow Core", Lagrange, "arccorp", 5, 4),
    placed("mic-l1", "MIC-L1 Shallow Frontier", Lagrange, "microtech", 4, 7),
    placed("mic-l2", "MIC-L2 Long Forest", Lagrange, "microtech", 4, 9),
    placed("mic-l3", "MIC-L3 Endless Odyssey", Lagrange, "microtech", 8, 8),
    placed("mic-l4", "MIC-L4 Red Crossroads", Lagrange, "microtech", 5, 8),
    placed("mic-l5", "MIC-L5 Modern Icarus", Lagrange, "microtech", 3, 8),
    // Hurston
    site("lorville", "Lorville", City, "hurston"),
    site("everus-harbor", "Everus Harbor", Station, "hurston"),
    site("dupree-industrial", "Dupree Industrial", Outpost, "hurston"),
    site("greycat-complex-b", "Greycat Complex-B", Outpost, "hurston"),
    site("hdms-edmond", "HDMS-Edmond", Outpost, "hurston"),
    site("hdms-hadley", "HDMS-Hadley", Outpost, "hurston"),
    site("hdms-oparei", "HDMS-Oparei", Outpost, "hurston"),
    site("hdms-pinewood", "HDMS-Pinewood", Outpost, "hurston"),
    site("hdms-stanhope", "HDMS-Stanhope", Outpost, "hurston"),
    site("hdms-thedus", "HDMS-Thedus", Outpost, "hurston"),
    site("hdpc-cassillo", "HDPC-Cassillo", Outpost, "hurston"),
    site("hdpc-farnesway", "HDPC-Farnesway", Outpost, "hurston"),
    site("reclamation-orinth", "Reclamation & Disposal Orinth", Outpost, "hurston"),
    site("sakura-sun-magnolia", "Sakura Sun Magnolia", Outpost, "hurston"),
    site("hdms-anderson", "HDMS-Anderson", Outpost, "aberdeen"),
    site("hdms-norgaard", "HDMS-Norgaard", Outpost, "aberdeen"),
    site("hdms-bezdek", "HDMS-Bezdek", Outpost, "arial"),
    site("hdms-lathan", "HDMS-Lathan", Outpost, "arial"),
    site("hdms-hahn", "HDMS-Hahn", Outpost, "magda"),
    site("hdms-pearlman", "HDMS-Pearlman", Outpost, "magda"),
    site("hdms-ryder", "HDMS-Ryder", Outpost, "ita"),
    site("hdms-woodruff", "HDMS-Woodruff", Outpost, "ita"),
    // Crusader
    site("orison", "Orison", City, "crusader"),
    site("port-olisar", "Remember Port Olisar <3", Station, "crusader"),
    site("seraphim-station", "Seraphim Station", Station, "crusader"),
    site("gallete-farms", "Gallete Family Farms", Outpost, "cellin"),
    site("hickes-research", "Hickes Research Outpost", Outpost, "cellin"),
    site("terra-mills", "Terra Mills HydroFarm", Outpost, "cellin"),
    site("tram-myers", "Tram & Myers Mining", Outpost, "cellin"),
    site("arccorp-157", "ArcCorp Mining Area 157", Outpost, "yela"),
    site("benson-mining", "Benson Mining Outpost", Outpost, "yela"),
    site("deakins-research", "Deakins Research Outpost", Outpost, "yela"),
    site("grim-hex", "Grim HEX", Station, "yela"),
    site("arccorp-141", "ArcCorp Mining Area 141", Outpost, "daymar"),
    site("bountiful-harvest", "Bountiful Harvest Hydroponics", Outpost, "daymar"),
    site("brios-breaker", "Brio's Breaker Yard", Outpost, "daymar"),
    site("kudre-ore", "Kudre Ore", Outpost, "daymar"),
    site("nuen-waste", "Nuen Waste Management", Outpost, "daymar"),
    site("shubin-scd-1", "Shubin Mining Facility SCD-1", Outpost, "daymar"),
    // ArcCorp
    site("area-18", "Area 18", City, "arccorp"),
    site("baijini-point", "Baijini Point", Station, "arccorp"),
    site("humbolt-mines", "Humbolt Mines", Outpost, "lyria"),
    site("loveridge-mineral-reserve", "Loveridge Mineral Reserve", Outpost, "lyria"),
    site("shubin-sal-2", "Shubin Mining Facility SAL-2", Outpost, "lyria"),
    site("shubin-sal-5", "Shubin Mining Facility SAL-5", Outpost, "lyria"),
    site("arccorp-045", "ArcCorp Mining Area 045", Outpost, "wala"),
    site("arccorp-048", "ArcCorp Mining Area 048", Outpost, "wala"),
    site("arccorp-056", "ArcCorp Mining Area 056", Outpost, "wala"),
    site("arccorp-061", "ArcCorp Mining Area 061", Outpost, "wala"),
    site("samson-sons", "Samson & Sons Salvage", Outpost, "wala"),
    site("shady-glen", "Shady Glen Farms", Outpost, "wala"),
    // MicroTech
    site("new-babbage", "New Babbage", City, "microtech"),
    site("port-tressler", "Port Tressler", Station, "microtech"),
    site("covalex-s4dc05", "Covalex S4DC05", Outpost, "microtech"),
    site("cry-astro-19-02", "Cry-Astro 19-02", Station, "microtech"),
    site("cry-astro-34-12", "Cry-Astro 34-12", Station, "microtech"),
    site("greycat-complex-a", "Greycat Complex A", Outpost, "microtech"),
    site("microtech-s4ld01", "MicroTech S4LD01", Outpost, "microtech"),
    site("microtech-s4ld13", "MicroTech S4LD13", Outpost, "microtech"),
    site("rayari-deltana", "Rayari Deltana", Outpost, "microtech"),
    site("sakura-sun-goldenrod", "Sakura Sun Goldenrod", Outpost, "microtech"),
    site("shubin-smo-10", "Shubin SMO-10", Outpost, "microtech"),
    site("shubin-smo-13", "Shubin SMO-13", Outpost, "microtech"),
    site("shubin-smo-18", "Shubin SMO-18", Outpost, "microtech"),
    site("shubin-smo-22", "Shubin SMO-22", Outpost, "microtech"),
    site("rayari-anvik", "Rayari Anvik", Outpost, "caliope"),
    site("rayari-kaltag", "Rayari Kaltag", Outpost, "caliope"),
    site("shubin-smca-6", "Shubin SMCa-6", Outpost, "caliope"),
    site("shubin-smca-8", "Shubin SMCa-8", Outpost, "caliope"),
    site("rayari-cantwell", "Rayari Cantwell", Outpost, "clio"),
    site("rayari-mcgrath", "Rayari McGrath", Outpost, "clio"),
    site("buds-growery", "Bud's Growery", Outpost, "euterpe"),
    site("devlin-scrap", "Devlin Scrap & Salvage", Outpost, "euterpe"),
    // Pyro
    placed("pyro-i", "Pyro I", Planet, "pyro", 2, 1),
    placed("pyro-iv", "Pyro IV", Planet, "pyro", 5, 5),
    placed("pyro-v", "Pyro V", Planet, "pyro", 8, 7),
    placed("terminus", "Terminus", Planet, "pyro", 3, 9),
    gateway("stanton-gateway-pyro", "Stanton Gateway - Pyro", "pyro", 6, 10, "stanton"),
    gateway("nyx-gateway-pyro", "Nyx Gateway - Pyro", "pyro", 1, 10, "nyx"),
    site("monox", "Monox", Moon, "pyro-i"),
    site("bloom", "Bloom", Moon, "pyro-i"),
    site("ignis", "Ignis", Moon, "pyro-v"),
    site("vatra", "Vatra", Moon, "pyro-v"),
    site("adir", "Adir", Moon, "pyro-v"),
    site("fairo", "Fairo", Moon, "pyro-v"),
    placed("checkmate-station", "Checkmate Station", Lagrange, "pyro", 3, 8),
    placed("starlight-service", "Starlight Service Station", Lagrange, "pyro", 5, 6),
    placed("patch-city", "Patch City", Lagrange, "pyro", 7, 7),
    placed("endgame", "Endgame", Lagrange, "pyro", 1, 9),
    placed("dudley-daughters", "Dudley & Daughters", Lagrange, "pyro", 8, 4),
    placed("megumi-refueling", "Megumi Refueling", Lagrange, "pyro", 4, 3),
    site("gray-gardens", "Gray Gardens Depot", Outpost, "pyro-i"),
    site("outpost-10q-yk", "Outpost 10Q-YK", Outpost, "pyro-i"),
    site("rustville", "Rustville", Outpost, "pyro-i"),
    site("stags-rut", "Stag's Rut", Outpost, "pyro-i"),
    site("arid-reach", "Arid Reach", Outpost, "monox"),
    site("jacksons-swap", "Jackson's Swap", Outpost, "monox"),
    site("last-ditch", "Last Ditch", Outpost, "monox"),
    site("slowburn-depot", "Slowburn Depot", Outpost, "monox"),
    site("sunset-mesa", "Sunset Mesa", Outpost, "monox"),
    site("yangs-place", "Yang's Place", Outpost, "monox"),
    site("bueno-ravine", "Bueno Ravine", Outpost, "bloom"),
    site("carvers-ridge", "Carver's Ridge", Outpost, "bloom"),
    site("frigid-knot", "Frigid Knot", Outpost, "bloom"),
    site("orbituary", "Orbituary", Outpost, "bloom"),
    site("prospect-depot", "Prospect Depot", Outpost, "bloom"),
    site("shadowfall", "Shadowfall", Outpost, "bloom"),
    site("shepherds-rest", "Shepherd's Rest", Outpost, "bloom"),
    site("golden-riviera", "The Golden Riviera", Outpost, "bloom"),
    site("the-yard", "The Yard", Outpost, "bloom"),
    site("windfall", "Windfall", Outpost, "bloom"),
    site("chawlas-beach", "Chawla's Beach", Outpost, "pyro-iv"),
    site("dingers-depot", "Dinger's Depot", Outpost, "pyro-iv"),
    site("fallow-field", "Fallow Field", Outpost, "pyro-iv"),
    site("goners-deal", "Goner's Deal", Outpost, "pyro-iv"),
    site("sacrens-plot", "Sacren's Plot", Outpost, "pyro-iv"),
    site("ashland", "Ashland", Outpost, "ignis"),
    site("kabirs-post", "Kabir's Post", Outpost, "ignis"),
    site("seers-canyon", "Seer's Canyon", Outpost, "vatra"),
    site("outpost-12r", "Outpost 12R", Outpost, "adir"),
    site("prophets-peak", "Prophet's Peak", Outpost, "adir"),
    site("feo-canyon-depot", "FEO Canyon Depot", Outpost, "fairo"),
    site("outpost-08p", "Outpost 08P", Outpost, "fairo"),
    site("blackrock-exchange", "Blackrock Exchange", Outpost, "terminus"),
    site("bullocks-reach", "Bullock's Reach", Outpost, "terminus"),
    site("canard-view", "Canard View", Outpost, "terminus"),
    site("kinder-plots", "Kinder Plots", Outpost, "terminus"),
    site("last-landings", "Last Landings", Outpost, "terminus"),
    site("outpost-56l", "Outpost 56L", Outpost, "terminus"),
    site("rough-landing", "Rough Landing", Outpost, "terminus"),
    site("ruin-station", "Ruin Station", Station, "terminus"),
    site("scarpers-turn", "Scarper's Turn", Outpost, "terminus"),
    site("stonetree", "Stonetree", Outpost, "terminus"),
    site("watchers-depot", "Watcher's Depot", Outpost, "terminus"),
    // Nyx
    placed("delamar", "Delamar", Planet, "nyx", 4, 6),
    site("levski", "Levski", City, "delamar"),
    gateway("stanton-gateway-nyx", "Stanton Gateway - Nyx", "nyx", 8, 10, "stanton"),
    gateway("pyro-gateway-nyx", "Pyro Gateway - Nyx", "nyx", 2, 10, "pyro"),
];

/// The built-in table as owned configuration records.
pub fn builtin_table() -> LocationTable {
    LocationTable {
        version: BUILTIN_TABLE_VERSION,
        locations: ENTRIES.iter().map(Entry::to_record).collect(),
    }
}

impl Entry {
    fn to_record(&self) -> LocationRecord {
        LocationRecord {
            id: self.id.to_string(),
            name: self.name.to_string(),
            kind: self.kind,
            parent: self.parent.map(str::to_string),
            sector: self.position.map(|(sector, _)| sector),
            orbit: self.position.map(|(_, orbit)| orbit),
            gateway_to: self.gateway_to.map(str::to_string),
        }
    }
}
