//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

/// Errors raised while writing exports.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod route {
    use std::io::Write;

    use hauler_core::Scu;
    use hauler_planner::{
        CargoGroup, CargoLayout, CargoLoad, RouteCompletion, RoutePlan, RouteStop, box_breakdown,
        format_breakdown,
    };
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use crate::ExportError;

    /// CSV row emitted per route item.
    #[derive(Debug, Clone, Serialize)]
    pub struct Record<'a> {
        pub stop_index: usize,
        pub stop_id: &'a str,
        #[serde(rename = "type")]
        pub kind: &'static str,
        pub location: &'a str,
        pub mission_id: &'a str,
        pub commodity: &'a str,
        pub scu: Scu,
        pub max_box_size: u8,
        pub boxes: String,
    }

    /// Flatten a plan into one record per stop item.
    pub fn records(plan: &RoutePlan) -> Vec<Record<'_>> {
        plan.stops
            .iter()
            .enumerate()
            .flat_map(|(index, stop)| {
                stop.items.iter().map(move |item| Record {
                    stop_index: index + 1,
                    stop_id: &stop.id,
                    kind: stop.kind.as_str(),
                    location: &stop.location,
                    mission_id: &item.mission_id,
                    commodity: &item.commodity,
                    scu: item.quantity,
                    max_box_size: item.max_box_size,
                    boxes: format_breakdown(&box_breakdown(item.quantity, item.max_box_size)),
                })
            })
            .collect()
    }

    /// Write the route manifest as CSV with a header row.
    pub fn write_csv<W: Write>(writer: W, plan: &RoutePlan) -> Result<(), ExportError> {
        let mut out = csv::Writer::from_writer(writer);
        for record in records(plan) {
            out.serialize(record)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Metadata describing the planning run.
    #[derive(Debug, Clone, Default)]
    pub struct Metadata<'a> {
        pub generated_utc: &'a str,
        pub ship: Option<&'a str>,
        pub capacity_scu: Option<Scu>,
        pub location_table_version: u32,
    }

    #[derive(Serialize)]
    struct StopEntry<'a> {
        #[serde(flatten)]
        stop: &'a RouteStop,
        load: CargoLoad,
    }

    #[derive(Serialize)]
    struct Sidecar<'a> {
        generated_utc: &'a str,
        ship: Option<&'a str>,
        capacity_scu: Option<Scu>,
        location_table_version: u32,
        completion: &'a RouteCompletion,
        unresolved_locations: &'a [String],
        constructed_cost: f64,
        total_cost: f64,
        peak_scu: Scu,
        stops: Vec<StopEntry<'a>>,
        cargo_groups: &'a [CargoGroup],
    }

    /// Write a JSON sidecar with the stops, loads, cargo groups and costs.
    pub fn write_sidecar<W: Write>(
        writer: W,
        meta: &Metadata<'_>,
        plan: &RoutePlan,
        layout: &CargoLayout,
    ) -> Result<(), ExportError> {
        let profile = plan.cargo_profile();
        let sidecar = Sidecar {
            generated_utc: meta.generated_utc,
            ship: meta.ship,
            capacity_scu: meta.capacity_scu,
            location_table_version: meta.location_table_version,
            completion: &plan.completion,
            unresolved_locations: &plan.unresolved_locations,
            constructed_cost: plan.constructed_cost,
            total_cost: plan.total_cost(),
            peak_scu: profile.peak,
            stops: plan
                .stops
                .iter()
                .zip(profile.loads)
                .map(|(stop, load)| StopEntry { stop, load })
                .collect(),
            cargo_groups: &layout.groups,
        };
        let mut writer = writer;
        to_writer_pretty(&mut writer, &sidecar)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
