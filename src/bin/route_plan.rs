use std::path::PathBuf;

use clap::Parser;
use hauler_helper::config::{
    self, Mission, PlannerConfig, ShipConfig, load_location_table, load_missions,
    load_planner_config, load_ships,
};
use hauler_helper::export::{self, route::Metadata};
use hauler_helper::planner::{CargoLayout, RouteCompletion, box_breakdown, format_breakdown};
use hauler_helper::universe::LocationGraph;
use hauler_helper::{RoutePlan, generate_route_with};

/// Plan a pickup and delivery route for a set of hauling missions.
#[derive(Parser, Debug)]
#[command(author, version, about = "Cargo route planner")]
struct Cli {
    /// Mission file (YAML list or TOML) or directory of TOML missions
    #[arg(long)]
    missions: PathBuf,

    /// Location table replacing the built-in graph
    #[arg(long)]
    locations: Option<PathBuf>,

    /// Planner weights (TOML/YAML, every field optional)
    #[arg(long)]
    planner: Option<PathBuf>,

    /// Ship catalog used with --ship
    #[arg(long, default_value = "data/ships.yaml")]
    ships: PathBuf,

    /// Ship whose capacity is shown next to the cargo load
    #[arg(long)]
    ship: Option<String>,

    /// Write the route manifest as CSV (use '-' for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write a JSON sidecar (use '-' for stdout)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let missions: Vec<Mission> = load_missions(&cli.missions)?;
    log::info!(
        "loaded {} missions from {}",
        missions.len(),
        cli.missions.display()
    );
    let owned_graph = match &cli.locations {
        Some(path) => Some(LocationGraph::from_table(load_location_table(path)?)?),
        None => None,
    };
    let graph = owned_graph.as_ref().unwrap_or_else(|| LocationGraph::builtin());
    let weights = match &cli.planner {
        Some(path) => load_planner_config(path)?,
        None => PlannerConfig::default(),
    };
    let ship = match &cli.ship {
        Some(name) => {
            let ships = load_ships(&cli.ships)?;
            Some(config::find_ship(&ships, name)?.clone())
        }
        None => None,
    };

    let plan = generate_route_with(graph, &weights, &missions);
    let layout = CargoLayout::build(&plan, None);

    print_plan(&plan, ship.as_ref());

    if let Some(path) = &cli.csv {
        let writer = export::writer_for_path(path)?;
        export::route::write_csv(writer, &plan)?;
    }
    if let Some(path) = &cli.json {
        let generated = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let meta = Metadata {
            generated_utc: &generated,
            ship: ship.as_ref().map(|s| s.name.as_str()),
            capacity_scu: ship.as_ref().map(|s| s.capacity_scu),
            location_table_version: graph.version(),
        };
        let writer = export::writer_for_path(path)?;
        export::route::write_sidecar(writer, &meta, &plan, &layout)?;
    }

    if let RouteCompletion::Incomplete { .. } = plan.completion {
        log::error!("partial route printed above");
        anyhow::bail!("route is {}", plan.completion);
    }
    Ok(())
}

fn print_plan(plan: &RoutePlan, ship: Option<&ShipConfig>) {
    let profile = plan.cargo_profile();
    println!("=== Route ({} stops) ===", plan.stops.len());
    for (index, (stop, load)) in plan.stops.iter().zip(&profile.loads).enumerate() {
        println!(
            "{:>3}. {:<8} {}  [{} -> {} SCU]",
            index + 1,
            stop.kind,
            stop.location,
            load.before,
            load.after
        );
        for item in &stop.items {
            println!(
                "       {} {} SCU ({}) [{}]",
                item.commodity,
                item.quantity,
                format_breakdown(&box_breakdown(item.quantity, item.max_box_size)),
                item.mission_id
            );
        }
    }
    match ship {
        Some(ship) => println!(
            "Peak load: {} / {} SCU ({})",
            profile.peak, ship.capacity_scu, ship.name
        ),
        None => println!("Peak load: {} SCU", profile.peak),
    }
    println!(
        "Travel cost: {:.1} (constructed {:.1})",
        plan.total_cost(),
        plan.constructed_cost
    );
    for name in &plan.unresolved_locations {
        println!("Unknown location: {name}");
    }
}
