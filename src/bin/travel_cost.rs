use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use hauler_helper::config::load_location_table;
use hauler_helper::universe::{CostBasis, LocationGraph, LocationId};

/// Print the heuristic travel cost between two named locations.
#[derive(Parser, Debug)]
#[command(author, version, about = "Heuristic travel cost between two locations")]
struct Cli {
    /// Origin location name (case-insensitive)
    from: String,

    /// Destination location name (case-insensitive)
    to: String,

    /// Location table replacing the built-in graph
    #[arg(long)]
    locations: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let owned_graph = match &cli.locations {
        Some(path) => {
            let table = load_location_table(path)
                .with_context(|| format!("loading locations from {}", path.display()))?;
            Some(LocationGraph::from_table(table)?)
        }
        None => None,
    };
    let graph = owned_graph.as_ref().unwrap_or_else(|| LocationGraph::builtin());

    let from = graph.resolve(&cli.from);
    let to = graph.resolve(&cli.to);
    let cost = graph.explain_cost(from, to);

    println!("From: {}", describe(graph, &cli.from, from));
    println!("To:   {}", describe(graph, &cli.to, to));
    println!("Cost: {:.1} ({})", cost.value, basis_label(cost.basis));
    Ok(())
}

fn describe(graph: &LocationGraph, raw: &str, id: Option<LocationId>) -> String {
    let Some(id) = id else {
        return format!("{} (unknown)", raw.trim());
    };
    let node = graph.node(id);
    let mut chain = vec![format!("{} [{}]", node.name, node.kind)];
    chain.extend(
        graph
            .ancestors(id)
            .into_iter()
            .map(|ancestor| graph.node(ancestor).name.clone()),
    );
    let mut line = chain.join(" < ");
    if let Some(coordinates) = graph.coordinates_of(id) {
        line.push_str(&format!(
            " @ sector {} orbit {}",
            coordinates.sector, coordinates.orbit
        ));
    }
    line
}

fn basis_label(basis: CostBasis) -> &'static str {
    match basis {
        CostBasis::Unresolved => "unknown location fallback",
        CostBasis::Identical => "same location",
        CostBasis::Interstellar => "interstellar",
        CostBasis::Polar => "polar distance",
        CostBasis::Local => "same body",
        CostBasis::Interplanetary => "interplanetary",
    }
}
