//! Tabular report generation
//!
//! Writes one CSV sheet per non-empty entity collection plus a system
//! summary sheet into a report directory. Frames are built with polars and
//! written with its CSV writer.

use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::app::models::{NetworkModel, format_decimal};
use crate::{Error, Result};

/// Sheets of the report, in write order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSheet {
    Buses,
    Loads,
    Generators,
    Branches,
    Transformers,
    SystemSummary,
}

impl ReportSheet {
    pub const ALL: [ReportSheet; 6] = [
        ReportSheet::Buses,
        ReportSheet::Loads,
        ReportSheet::Generators,
        ReportSheet::Branches,
        ReportSheet::Transformers,
        ReportSheet::SystemSummary,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ReportSheet::Buses => "buses.csv",
            ReportSheet::Loads => "loads.csv",
            ReportSheet::Generators => "generators.csv",
            ReportSheet::Branches => "branches.csv",
            ReportSheet::Transformers => "transformers.csv",
            ReportSheet::SystemSummary => "system_summary.csv",
        }
    }

    /// Build the sheet's frame; `None` for an empty entity collection
    ///
    /// The summary sheet is always produced.
    pub fn build(self, model: &NetworkModel) -> PolarsResult<Option<DataFrame>> {
        match self {
            ReportSheet::Buses if model.buses.is_empty() => Ok(None),
            ReportSheet::Loads if model.loads.is_empty() => Ok(None),
            ReportSheet::Generators if model.generators.is_empty() => Ok(None),
            ReportSheet::Branches if model.branches.is_empty() => Ok(None),
            ReportSheet::Transformers if model.transformers.is_empty() => Ok(None),
            ReportSheet::Buses => bus_frame(model).map(Some),
            ReportSheet::Loads => load_frame(model).map(Some),
            ReportSheet::Generators => generator_frame(model).map(Some),
            ReportSheet::Branches => branch_frame(model).map(Some),
            ReportSheet::Transformers => transformer_frame(model).map(Some),
            ReportSheet::SystemSummary => summary_frame(model).map(Some),
        }
    }
}

fn bus_frame(model: &NetworkModel) -> PolarsResult<DataFrame> {
    let buses: Vec<_> = model.buses.values().collect();

    df!(
        "Bus Number" => buses.iter().map(|b| b.bus_number).collect::<Vec<_>>(),
        "Name" => buses.iter().map(|b| b.name.clone()).collect::<Vec<_>>(),
        "Base kV" => buses.iter().map(|b| b.base_kv).collect::<Vec<_>>(),
        "Type" => buses.iter().map(|b| b.bus_type).collect::<Vec<_>>(),
        "Voltage Mag" => buses.iter().map(|b| b.voltage_magnitude).collect::<Vec<_>>(),
        "Voltage Angle" => buses.iter().map(|b| b.voltage_angle).collect::<Vec<_>>(),
        "Area" => buses.iter().map(|b| b.area).collect::<Vec<_>>(),
        "Zone" => buses.iter().map(|b| b.zone).collect::<Vec<_>>(),
    )
}

fn load_frame(model: &NetworkModel) -> PolarsResult<DataFrame> {
    let loads = &model.loads;

    df!(
        "Bus Number" => loads.iter().map(|l| l.bus_number).collect::<Vec<_>>(),
        "ID" => loads.iter().map(|l| l.id.clone()).collect::<Vec<_>>(),
        "Active Power (MW)" => loads.iter().map(|l| l.active_power).collect::<Vec<_>>(),
        "Reactive Power (MVAr)" => loads.iter().map(|l| l.reactive_power).collect::<Vec<_>>(),
        "Load Type" => loads.iter().map(|l| l.load_type.clone()).collect::<Vec<_>>(),
        "Area" => loads.iter().map(|l| l.area).collect::<Vec<_>>(),
        "Zone" => loads.iter().map(|l| l.zone).collect::<Vec<_>>(),
    )
}

fn generator_frame(model: &NetworkModel) -> PolarsResult<DataFrame> {
    let gens = &model.generators;

    df!(
        "Bus Number" => gens.iter().map(|g| g.bus_number).collect::<Vec<_>>(),
        "ID" => gens.iter().map(|g| g.id.clone()).collect::<Vec<_>>(),
        "Active Power (MW)" => gens.iter().map(|g| g.active_power).collect::<Vec<_>>(),
        "Reactive Power (MVAr)" => gens.iter().map(|g| g.reactive_power).collect::<Vec<_>>(),
        "MVA Base" => gens.iter().map(|g| g.mva_base).collect::<Vec<_>>(),
        "Voltage Setpoint" => gens.iter().map(|g| g.voltage_setpoint).collect::<Vec<_>>(),
        "Brand" => gens.iter().map(|g| g.brand.clone()).collect::<Vec<_>>(),
        "Model" => gens.iter().map(|g| g.model.clone()).collect::<Vec<_>>(),
        "Fuel Type" => gens.iter().map(|g| g.fuel_type.clone()).collect::<Vec<_>>(),
        "Efficiency" => gens.iter().map(|g| g.efficiency).collect::<Vec<_>>(),
    )
}

fn branch_frame(model: &NetworkModel) -> PolarsResult<DataFrame> {
    let branches = &model.branches;

    df!(
        "From Bus" => branches.iter().map(|b| b.from_bus).collect::<Vec<_>>(),
        "To Bus" => branches.iter().map(|b| b.to_bus).collect::<Vec<_>>(),
        "Circuit ID" => branches.iter().map(|b| b.circuit_id.clone()).collect::<Vec<_>>(),
        "Resistance (pu)" => branches.iter().map(|b| b.resistance).collect::<Vec<_>>(),
        "Reactance (pu)" => branches.iter().map(|b| b.reactance).collect::<Vec<_>>(),
        "Charging Susceptance (pu)" => branches.iter().map(|b| b.charging_susceptance).collect::<Vec<_>>(),
        "MVA Rating" => branches.iter().map(|b| b.mva_rating).collect::<Vec<_>>(),
        "Length (km)" => branches.iter().map(|b| b.length_km).collect::<Vec<_>>(),
    )
}

fn transformer_frame(model: &NetworkModel) -> PolarsResult<DataFrame> {
    let txs = &model.transformers;

    df!(
        "From Bus" => txs.iter().map(|t| t.from_bus).collect::<Vec<_>>(),
        "To Bus" => txs.iter().map(|t| t.to_bus).collect::<Vec<_>>(),
        "Circuit ID" => txs.iter().map(|t| t.circuit_id.clone()).collect::<Vec<_>>(),
        "Resistance (pu)" => txs.iter().map(|t| t.resistance).collect::<Vec<_>>(),
        "Reactance (pu)" => txs.iter().map(|t| t.reactance).collect::<Vec<_>>(),
        "MVA Rating" => txs.iter().map(|t| t.nominal_mva).collect::<Vec<_>>(),
        "From Voltage (kV)" => txs.iter().map(|t| t.from_bus_voltage).collect::<Vec<_>>(),
        "To Voltage (kV)" => txs.iter().map(|t| t.to_bus_voltage).collect::<Vec<_>>(),
        "Brand" => txs.iter().map(|t| t.brand.clone()).collect::<Vec<_>>(),
        "Model" => txs.iter().map(|t| t.model.clone()).collect::<Vec<_>>(),
        "Cooling Type" => txs.iter().map(|t| t.cooling_type.clone()).collect::<Vec<_>>(),
        "Vector Group" => txs.iter().map(|t| t.vector_group.clone()).collect::<Vec<_>>(),
    )
}

/// Metric/value rows summarizing the model
pub fn summary_rows(model: &NetworkModel) -> Vec<(&'static str, String)> {
    let stats = model.statistics();
    let voltage_levels = stats
        .voltage_levels
        .iter()
        .map(|kv| format_decimal(*kv))
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        ("Total Buses", stats.total_buses.to_string()),
        ("Total Transformers", stats.total_transformers.to_string()),
        ("Total Generators", stats.total_generators.to_string()),
        ("Total Loads", stats.total_loads.to_string()),
        ("Total Branches", stats.total_branches.to_string()),
        (
            "Total Generation Capacity (MVA)",
            format_decimal(stats.total_generation_capacity_mva),
        ),
        (
            "Total Load Demand (MW)",
            format_decimal(stats.total_load_demand_mw),
        ),
        (
            "Base Frequency (Hz)",
            format_decimal(model.conversion_info.base_frequency),
        ),
        ("Voltage Levels (kV)", voltage_levels),
        ("Number of Areas", stats.areas.len().to_string()),
        ("Number of Zones", stats.zones.len().to_string()),
    ]
}

fn summary_frame(model: &NetworkModel) -> PolarsResult<DataFrame> {
    let (metrics, values): (Vec<&str>, Vec<String>) = summary_rows(model).into_iter().unzip();

    df!(
        "Metric" => metrics,
        "Value" => values,
    )
}

/// Write the report directory, returning the sheet files written
pub fn write_report_dir(model: &NetworkModel, dir: &Path) -> Result<Vec<PathBuf>> {
    info!("Generating report: {}", dir.display());

    fs::create_dir_all(dir)
        .map_err(|e| Error::io(format!("Failed to create {}", dir.display()), e))?;

    let mut written = Vec::new();

    for sheet in ReportSheet::ALL {
        let Some(mut df) = sheet
            .build(model)
            .map_err(|e| Error::report(format!("Failed to build {}", sheet.file_name()), e))?
        else {
            debug!("Skipping empty sheet {}", sheet.file_name());
            continue;
        };

        let path = dir.join(sheet.file_name());
        let mut file = File::create(&path)
            .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .map_err(|e| Error::report(format!("Failed to write {}", path.display()), e))?;

        debug!("Wrote {} rows to {}", df.height(), path.display());
        written.push(path);
    }

    Ok(written)
}
