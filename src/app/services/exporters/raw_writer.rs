//! PowerFactory RAW file generation
//!
//! The RAW layout is a frequency header followed by one comma-separated
//! block per entity kind, each closed by a `0 / End of ... Data` trailer.

use chrono::{Local, NaiveDateTime};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::app::models::NetworkModel;
use crate::{Error, Result};

/// RAW writer with a fixed generation timestamp
#[derive(Debug, Clone)]
pub struct RawWriter {
    generated_at: NaiveDateTime,
}

impl Default for RawWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl RawWriter {
    /// Create a writer stamped with the current local time
    pub fn new() -> Self {
        Self {
            generated_at: Local::now().naive_local(),
        }
    }

    /// Override the generation timestamp
    pub fn with_generated_at(mut self, generated_at: NaiveDateTime) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Write the model in RAW layout
    pub fn write<W: Write>(&self, model: &NetworkModel, out: &mut W) -> std::io::Result<()> {
        let info = &model.conversion_info;
        let source_name = Path::new(&info.source_file)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| info.source_file.clone());

        writeln!(
            out,
            "0, {:.1}, 30 / PowerFactory RAW File",
            info.base_frequency
        )?;
        writeln!(
            out,
            "Converted from {} on {}",
            source_name,
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(out, "Base frequency: {:.3} Hz", info.base_frequency)?;
        writeln!(out)?;

        writeln!(out, "/BUS DATA")?;
        for bus in model.buses.values() {
            writeln!(
                out,
                "{}, '{}', {:.2}, {}, {:.4}, {:.3}, {}, {}, {:.3}, {:.3}",
                bus.bus_number,
                bus.name,
                bus.base_kv,
                bus.bus_type,
                bus.voltage_magnitude,
                bus.voltage_angle,
                bus.area,
                bus.zone,
                bus.max_voltage,
                bus.min_voltage
            )?;
        }
        writeln!(out, "0 / End of Bus Data\n")?;

        writeln!(out, "/LOAD DATA")?;
        for load in &model.loads {
            writeln!(
                out,
                "{}, '{}', {:.2}, {:.2}, {}, {}, {}, {}",
                load.bus_number,
                load.id,
                load.active_power,
                load.reactive_power,
                load.load_type,
                load.voltage_dependence,
                load.area,
                load.zone
            )?;
        }
        writeln!(out, "0 / End of Load Data\n")?;

        writeln!(out, "/GENERATOR DATA")?;
        for generator in &model.generators {
            writeln!(
                out,
                "{}, '{}', {:.2}, {:.2}, {:.2}, {:.2}, {:.4}, {:.2}",
                generator.bus_number,
                generator.id,
                generator.active_power,
                generator.reactive_power,
                generator.max_reactive_power,
                generator.min_reactive_power,
                generator.voltage_setpoint,
                generator.mva_base
            )?;
        }
        writeln!(out, "0 / End of Generator Data\n")?;

        writeln!(out, "/BRANCH DATA")?;
        for branch in &model.branches {
            writeln!(
                out,
                "{}, {}, '{}', {:.6}, {:.6}, {:.6}, {:.2}",
                branch.from_bus,
                branch.to_bus,
                branch.circuit_id,
                branch.resistance,
                branch.reactance,
                branch.charging_susceptance,
                branch.mva_rating
            )?;
        }
        writeln!(out, "0 / End of Branch Data\n")?;

        writeln!(out, "/TRANSFORMER DATA")?;
        for transformer in &model.transformers {
            writeln!(
                out,
                "{}, {}, '{}', {}, {}, {:.6}, {:.6}, {:.2}",
                transformer.from_bus,
                transformer.to_bus,
                transformer.circuit_id,
                transformer.winding_type,
                transformer.control_method,
                transformer.resistance,
                transformer.reactance,
                transformer.nominal_mva
            )?;
        }
        writeln!(out, "0 / End of Transformer Data")?;

        Ok(())
    }

    /// Write the model to a RAW file, replacing any existing file
    pub fn write_file(&self, model: &NetworkModel, path: &Path) -> Result<()> {
        info!("Generating PowerFactory RAW file: {}", path.display());

        let file = File::create(path)
            .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
        let mut out = BufWriter::new(file);

        self.write(model, &mut out)
            .and_then(|_| out.flush())
            .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;

        Ok(())
    }
}

/// Write a RAW file stamped with the current time
pub fn write_raw_file(model: &NetworkModel, path: &Path) -> Result<()> {
    RawWriter::new().write_file(model, path)
}
