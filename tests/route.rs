use std::collections::HashMap;

use hauler_helper::config::{
    CommodityLeg, Mission, PlannerConfig, load_location_table, load_missions,
};
use hauler_helper::planner::{
    LocationGraph, RouteCompletion, RoutePlan, StopKind, extract_actions, generate_route,
    generate_route_with,
};

fn mission(id: &str, legs: Vec<CommodityLeg>) -> Mission {
    Mission {
        id: id.to_string(),
        payout: None,
        commodities: legs,
    }
}

fn leg(commodity: &str, quantity: u32, pickup: &str, destination: &str) -> CommodityLeg {
    CommodityLeg::new(commodity, quantity, pickup, destination)
}

/// Position of each leg's pickup and delivery, checked independently of the planner.
fn leg_positions(plan: &RoutePlan) -> HashMap<String, (Vec<usize>, Vec<usize>)> {
    let mut positions: HashMap<String, (Vec<usize>, Vec<usize>)> = HashMap::new();
    for (index, stop) in plan.stops.iter().enumerate() {
        for item in &stop.items {
            let entry = positions.entry(item.leg_id.clone()).or_default();
            match stop.kind {
                StopKind::Pickup => entry.0.push(index),
                StopKind::Delivery => entry.1.push(index),
            }
        }
    }
    positions
}

fn assert_precedence_and_completeness(missions: &[Mission], plan: &RoutePlan) {
    let positions = leg_positions(plan);
    let routable: usize = missions
        .iter()
        .map(|m| m.commodities.iter().filter(|l| l.is_routable()).count())
        .sum();
    assert_eq!(positions.len(), routable);
    for (leg_id, (pickups, deliveries)) in &positions {
        assert_eq!(pickups.len(), 1, "{leg_id} picked up once");
        assert_eq!(deliveries.len(), 1, "{leg_id} delivered once");
        assert!(pickups[0] < deliveries[0], "{leg_id} delivered before pickup");
    }
    assert!(plan.respects_precedence());
}

#[test]
fn single_leg_yields_pickup_then_delivery() {
    let missions = vec![mission("m1", vec![leg("Gold", 10, "A", "B")])];
    let plan = generate_route(&missions);

    assert_eq!(plan.completion, RouteCompletion::Complete);
    assert_eq!(plan.stops.len(), 2);
    assert_eq!(plan.stops[0].id, "stop_1");
    assert_eq!(plan.stops[0].kind, StopKind::Pickup);
    assert_eq!(plan.stops[0].location, "A");
    assert_eq!(plan.stops[0].scu(), 10);
    assert_eq!(plan.stops[1].id, "stop_2");
    assert_eq!(plan.stops[1].kind, StopKind::Delivery);
    assert_eq!(plan.stops[1].location, "B");
    assert_eq!(plan.stops[1].items[0].leg_id, "m1_0");
    assert_eq!(plan.unresolved_locations, vec!["A", "B"]);
}

#[test]
fn shared_pickup_location_is_visited_once() {
    let missions = vec![
        mission("m1", vec![leg("Gold", 10, "Warehouse", "X")]),
        mission("m2", vec![leg("Silver", 5, "Warehouse", "Y")]),
    ];
    let plan = generate_route(&missions);

    assert_eq!(plan.stops.len(), 3);
    let first = &plan.stops[0];
    assert_eq!(first.kind, StopKind::Pickup);
    assert_eq!(first.location, "Warehouse");
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.items[0].mission_id, "m1");
    assert_eq!(first.items[1].mission_id, "m2");
    assert_eq!(plan.stops[1].location, "X");
    assert_eq!(plan.stops[2].location, "Y");
    assert!(plan.stops[1..].iter().all(|s| s.kind == StopKind::Delivery));
}

#[test]
fn same_place_leg_delivers_on_a_later_stop() {
    let missions = vec![mission("m1", vec![leg("Gold", 4, "A", "A")])];
    let plan = generate_route(&missions);

    assert_eq!(plan.stops.len(), 2);
    assert_eq!(plan.stops[0].kind, StopKind::Pickup);
    assert_eq!(plan.stops[1].kind, StopKind::Delivery);
    assert_eq!(plan.stops[0].location, plan.stops[1].location);
    assert_eq!(plan.unresolved_locations, vec!["A"]);
}

#[test]
fn incomplete_legs_are_ignored() {
    let missions = vec![mission(
        "m1",
        vec![
            leg("Gold", 5, "A", ""),
            leg("", 5, "A", "B"),
            leg("Gold", 0, "A", "B"),
            leg("Gold", 5, "  ", "B"),
        ],
    )];
    let graph = LocationGraph::builtin();
    let actions = extract_actions(graph, &missions);
    assert!(actions.is_empty());

    let plan = generate_route(&missions);
    assert!(plan.stops.is_empty());
    assert!(plan.is_complete());
    assert!(plan.unresolved_locations.is_empty());
    assert_eq!(plan.total_cost(), 0.0);
}

#[test]
fn leg_ids_use_mission_id_and_leg_position() {
    let missions = vec![
        mission("", vec![leg("Gold", 5, "Lorville", "Area 18")]),
        mission(
            "contract-7",
            vec![leg("Gold", 0, "", ""), leg("Iron", 3, "Orison", "Lorville")],
        ),
    ];
    let actions = extract_actions(LocationGraph::builtin(), &missions);
    let ids: Vec<&str> = actions.pickups.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["m1_0", "contract-7_1"]);
    assert_eq!(actions.deliveries[1].id, "contract-7_1_delivery");
    assert_eq!(actions.deliveries[1].pickup, 1);
    assert_eq!(actions.pickups[0].item.mission_id, "m1");
}

#[test]
fn blank_mission_id_never_reuses_an_explicit_one() {
    let missions = vec![
        mission("m2", vec![leg("Gold", 5, "Lorville", "Area 18")]),
        mission("", vec![leg("Iron", 3, "Area 18", "Orison")]),
    ];
    let actions = extract_actions(LocationGraph::builtin(), &missions);
    let ids: Vec<&str> = actions.pickups.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["m2_0", "m2-2_0"]);
    assert_eq!(actions.pickups[1].item.mission_id, "m2-2");

    let plan = generate_route(&missions);
    assert!(plan.is_complete());
    assert_eq!(plan.stops.len(), 4);
    assert_precedence_and_completeness(&missions, &plan);
}

#[test]
fn duplicate_mission_ids_keep_legs_apart() {
    let missions = vec![
        mission("dup", vec![leg("Gold", 5, "Lorville", "Area 18")]),
        mission("dup", vec![leg("Iron", 3, "Area 18", "Orison")]),
        mission(" dup ", vec![leg("Tin", 2, "Orison", "Lorville")]),
    ];
    let actions = extract_actions(LocationGraph::builtin(), &missions);
    let ids: Vec<&str> = actions.pickups.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["dup_0", "dup-2_0", "dup-3_0"]);

    let plan = generate_route(&missions);
    assert!(plan.is_complete());
    assert_precedence_and_completeness(&missions, &plan);
}

#[test]
fn spellings_of_one_location_share_a_stop() {
    let missions = vec![
        mission("m1", vec![leg("Gold", 5, "Area 18", "Lorville")]),
        mission("m2", vec![leg("Iron", 6, "  area   18 ", "Lorville")]),
        mission("m3", vec![leg("Tin", 2, "Depot 7", "depot 7 ")]),
        mission("m4", vec![leg("Tin", 2, "DEPOT 7", "Lorville")]),
    ];
    let plan = generate_route(&missions);

    let area18: Vec<_> = plan
        .stops
        .iter()
        .filter(|s| s.kind == StopKind::Pickup && s.location == "Area 18")
        .collect();
    assert_eq!(area18.len(), 1);
    assert_eq!(area18[0].items.len(), 2);
    assert_eq!(plan.unresolved_locations, vec!["Depot 7"]);
    assert!(plan.stops.iter().all(|s| s.location != "DEPOT 7"));
    assert_precedence_and_completeness(&missions, &plan);
}

#[test]
fn delivery_and_pickup_at_one_location_are_adjacent() {
    let missions = vec![
        mission("m1", vec![leg("Gold", 10, "Lorville", "Area 18")]),
        mission("m2", vec![leg("Iron", 5, "Area 18", "New Babbage")]),
    ];
    let plan = generate_route(&missions);

    let kinds: Vec<(StopKind, &str)> = plan
        .stops
        .iter()
        .map(|s| (s.kind, s.location.as_str()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (StopKind::Pickup, "Lorville"),
            (StopKind::Delivery, "Area 18"),
            (StopKind::Pickup, "Area 18"),
            (StopKind::Delivery, "New Babbage"),
        ]
    );

    let profile = plan.cargo_profile();
    let loads: Vec<(u32, u32)> = profile.loads.iter().map(|l| (l.before, l.after)).collect();
    assert_eq!(loads, vec![(0, 10), (10, 0), (0, 5), (5, 0)]);
    assert_eq!(profile.peak, 10);
}

#[test]
fn start_system_and_gateways_are_derived_from_pickups() {
    let graph = LocationGraph::builtin();
    let missions = vec![
        mission("m1", vec![leg("Gold", 5, "Unlisted Dock", "Lorville")]),
        mission("m2", vec![leg("Gold", 5, "Lorville", "Checkmate Station")]),
        mission("m3", vec![leg("Gold", 5, "Area 18", "Levski")]),
        mission("m4", vec![leg("Gold", 5, "Area 18", "Ruin Station")]),
    ];
    let actions = extract_actions(graph, &missions);

    let stanton = graph.resolve("Stanton").unwrap();
    let pyro = graph.resolve("Pyro").unwrap();
    let nyx = graph.resolve("Nyx").unwrap();
    assert_eq!(actions.start_system, Some(stanton));

    let foreign: Vec<_> = actions.foreign_systems.iter().map(|f| f.system).collect();
    assert_eq!(foreign, vec![pyro, nyx]);
    assert_eq!(
        actions.foreign_systems[0].gateway,
        graph.resolve("Pyro Gateway - Stanton")
    );
    assert_eq!(
        actions.foreign_systems[1].gateway,
        graph.resolve("Nyx Gateway - Stanton")
    );
}

#[test]
fn routes_without_a_gateway_still_complete() {
    let mut table = load_location_table("data/locations.yaml").expect("locations yaml");
    table.locations.retain(|record| record.id != "sol-jump");
    let graph = LocationGraph::from_table(table).expect("valid table");

    let missions = vec![
        mission("m1", vec![leg("Water", 20, "Houston", "Proxima Port")]),
        mission("m2", vec![leg("Ice", 8, "Tycho Base", "Olympus Yard")]),
    ];
    let actions = extract_actions(&graph, &missions);
    assert_eq!(actions.foreign_systems.len(), 1);
    assert_eq!(actions.foreign_systems[0].gateway, None);

    let plan = generate_route_with(&graph, &PlannerConfig::default(), &missions);
    assert!(plan.is_complete());
    assert_precedence_and_completeness(&missions, &plan);
}

#[test]
fn sample_missions_route_completely() {
    let missions = load_missions("data/missions/sample.yaml").expect("sample missions");
    let plan = generate_route(&missions);

    assert!(plan.is_complete());
    assert!(plan.unresolved_locations.is_empty());
    assert_precedence_and_completeness(&missions, &plan);
    assert!(plan.total_cost() <= plan.constructed_cost);
    for (index, stop) in plan.stops.iter().enumerate() {
        assert_eq!(stop.id, format!("stop_{}", index + 1));
        assert!(!stop.items.is_empty());
    }
}

#[test]
fn regeneration_is_idempotent() {
    let missions = load_missions("data/missions/sample.yaml").expect("sample missions");
    let first = generate_route(&missions);
    let second = generate_route(&missions);
    assert_eq!(first, second);
}

#[test]
fn disabling_refinement_keeps_the_constructed_order() {
    let missions = load_missions("data/missions/sample.yaml").expect("sample missions");
    let config = PlannerConfig {
        max_refine_passes: 0,
        ..PlannerConfig::default()
    };
    let plan = generate_route_with(LocationGraph::builtin(), &config, &missions);
    assert_eq!(plan.refinement_swaps, 0);
    assert_eq!(plan.total_cost(), plan.constructed_cost);

    let refined = generate_route(&missions);
    assert!(refined.total_cost() <= plan.total_cost());
}

const NAMES: [&str; 16] = [
    "Lorville",
    "Everus Harbor",
    "HDMS-Anderson",
    "HDMS-Norgaard",
    "Area 18",
    "Baijini Point",
    "Humbolt Mines",
    "Orison",
    "Seraphim Station",
    "Grim HEX",
    "New Babbage",
    "Port Tressler",
    "Checkmate Station",
    "Ruin Station",
    "Levski",
    "Unlisted Depot",
];

/// Deterministic mission set drawn from a linear congruential sequence.
fn generated_missions(seed: u64) -> Vec<Mission> {
    let mut state = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
    let mut next = |bound: usize| {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((state >> 33) % bound as u64) as usize
    };
    (0..6)
        .map(|m| {
            let legs = (0..3)
                .map(|_| {
                    let pickup = NAMES[next(NAMES.len())];
                    let destination = NAMES[next(NAMES.len())];
                    let quantity = next(40) as u32;
                    let mut leg = leg("Cargo", quantity, pickup, destination);
                    leg.max_box_size = [1, 2, 4, 8, 16, 32][next(6)];
                    leg
                })
                .collect();
            mission(&format!("g{m}"), legs)
        })
        .collect()
}

#[test]
fn generated_routes_respect_precedence_and_never_regress() {
    for seed in 0..40 {
        let missions = generated_missions(seed);
        let plan = generate_route(&missions);
        assert!(plan.is_complete(), "seed {seed}");
        assert_precedence_and_completeness(&missions, &plan);
        assert!(
            plan.total_cost() <= plan.constructed_cost,
            "seed {seed}: {} > {}",
            plan.total_cost(),
            plan.constructed_cost
        );
        assert_eq!(plan, generate_route(&missions), "seed {seed}");

        let profile = plan.cargo_profile();
        assert_eq!(profile.loads.last().map(|l| l.after).unwrap_or(0), 0);
    }
}

#[test]
fn generated_routes_with_one_shared_mission_id_respect_precedence() {
    for seed in 0..40 {
        let mut missions = generated_missions(seed);
        for m in &mut missions {
            m.id = "dup".to_string();
        }
        let plan = generate_route(&missions);
        assert!(plan.is_complete(), "seed {seed}");
        assert_precedence_and_completeness(&missions, &plan);
    }
}

fn line_graph() -> LocationGraph {
    use hauler_helper::config::LocationRecord;
    use hauler_helper::primitives::LocationKind;

    let station = |id: &str, name: &str, sector: u8| LocationRecord {
        id: id.to_string(),
        name: name.to_string(),
        kind: LocationKind::Station,
        parent: Some("s".to_string()),
        sector: Some(sector),
        orbit: Some(0),
        gateway_to: None,
    };
    LocationGraph::from_records(vec![
        LocationRecord {
            id: "s".to_string(),
            name: "Solo".to_string(),
            kind: LocationKind::System,
            parent: None,
            sector: None,
            orbit: None,
            gateway_to: None,
        },
        station("p", "Port", 1),
        station("near", "Near", 2),
        station("far", "Far", 5),
    ])
    .expect("valid records")
}

#[test]
fn refinement_swaps_deliveries_when_edges_get_cheaper() {
    let graph = line_graph();
    let missions = vec![mission(
        "m1",
        vec![leg("Ore", 100, "Port", "Far"), leg("Ice", 1, "Port", "Near")],
    )];

    let unrefined = PlannerConfig {
        max_refine_passes: 0,
        ..PlannerConfig::default()
    };
    let constructed = generate_route_with(&graph, &unrefined, &missions);
    let order: Vec<&str> = constructed.stops.iter().map(|s| s.location.as_str()).collect();
    assert_eq!(order, vec!["Port", "Far", "Near"]);
    assert_eq!(constructed.total_cost(), 105.0);

    let plan = generate_route_with(&graph, &PlannerConfig::default(), &missions);
    let order: Vec<&str> = plan.stops.iter().map(|s| s.location.as_str()).collect();
    assert_eq!(order, vec!["Port", "Near", "Far"]);
    assert_eq!(plan.refinement_swaps, 1);
    assert_eq!(plan.constructed_cost, 105.0);
    assert_eq!(plan.total_cost(), 60.0);
    assert_eq!(plan.stops[1].items[0].commodity, "Ice");
    assert_eq!(plan.stops[1].id, "stop_3");
    assert!(plan.respects_precedence());
}

#[test]
fn refinement_never_moves_a_delivery_ahead_of_its_pickup() {
    let graph = line_graph();
    let missions = vec![
        mission("m1", vec![leg("Ore", 100, "Port", "Far")]),
        mission("m2", vec![leg("Ice", 1, "Far", "Near")]),
    ];
    let plan = generate_route_with(&graph, &PlannerConfig::default(), &missions);

    let kinds: Vec<(StopKind, &str)> = plan
        .stops
        .iter()
        .map(|s| (s.kind, s.location.as_str()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (StopKind::Pickup, "Port"),
            (StopKind::Delivery, "Far"),
            (StopKind::Pickup, "Far"),
            (StopKind::Delivery, "Near"),
        ]
    );
    assert_eq!(plan.refinement_swaps, 0);
    assert_eq!(plan.total_cost(), plan.constructed_cost);
    assert!(plan.respects_precedence());
}

fn record(
    id: &str,
    kind: hauler_helper::primitives::LocationKind,
    parent: Option<&str>,
    sector: Option<u8>,
) -> hauler_helper::config::LocationRecord {
    hauler_helper::config::LocationRecord {
        id: id.to_string(),
        name: id.to_string(),
        kind,
        parent: parent.map(str::to_string),
        sector,
        orbit: sector.map(|_| 0),
        gateway_to: None,
    }
}

/// Home system with a gateway at sector 0 leading to a second system.
fn gateway_graph() -> LocationGraph {
    use hauler_helper::primitives::LocationKind;

    let mut gateway = record("Gate", LocationKind::Gateway, Some("Home"), Some(0));
    gateway.gateway_to = Some("Away".to_string());
    LocationGraph::from_records(vec![
        record("Home", LocationKind::System, None, None),
        record("Away", LocationKind::System, None, None),
        gateway,
        record("Dock", LocationKind::Station, Some("Home"), Some(2)),
        record("West", LocationKind::Station, Some("Home"), Some(6)),
        record("East", LocationKind::Station, Some("Home"), Some(1)),
        record("Outer", LocationKind::Station, Some("Away"), Some(3)),
    ])
    .expect("valid records")
}

fn first_stop(graph: &LocationGraph, config: &PlannerConfig, missions: &[Mission]) -> String {
    let plan = generate_route_with(graph, config, missions);
    assert!(plan.is_complete());
    assert!(plan.respects_precedence());
    plan.stops[0].location.clone()
}

#[test]
fn lookahead_prefers_pickups_near_pending_destinations() {
    let graph = gateway_graph();
    let missions = vec![
        mission("m1", vec![leg("Ore", 10, "West", "Dock")]),
        mission("m2", vec![leg("Ice", 10, "East", "Dock")]),
    ];
    let flat = PlannerConfig {
        lookahead_weight: 0.0,
        gateway_weight: 0.0,
        ..PlannerConfig::default()
    };
    assert_eq!(first_stop(&graph, &flat, &missions), "West");

    let lookahead = PlannerConfig {
        lookahead_weight: 0.15,
        ..flat.clone()
    };
    assert_eq!(first_stop(&graph, &lookahead, &missions), "East");
    assert_eq!(
        first_stop(&graph, &PlannerConfig::default(), &missions),
        "East"
    );
}

#[test]
fn gateway_deviation_prefers_pickups_on_the_way_out() {
    let graph = gateway_graph();
    let missions = vec![
        mission("m1", vec![leg("Ore", 10, "West", "Dock")]),
        mission("m2", vec![leg("Ice", 10, "East", "Outer")]),
    ];
    let actions = extract_actions(&graph, &missions);
    assert_eq!(actions.foreign_systems[0].gateway, graph.resolve("Gate"));

    let flat = PlannerConfig {
        lookahead_weight: 0.0,
        gateway_weight: 0.0,
        ..PlannerConfig::default()
    };
    assert_eq!(first_stop(&graph, &flat, &missions), "West");

    let gateway = PlannerConfig {
        gateway_weight: 0.1,
        ..flat.clone()
    };
    assert_eq!(first_stop(&graph, &gateway, &missions), "East");
}
