//! JSON metadata document
//!
//! The document carries conversion info, model statistics, brand
//! dictionaries and a denormalized view of the main equipment.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::app::models::{
    BrandData, BusNumber, ConversionInfo, ModelStatistics, NetworkModel, format_decimal,
};
use crate::{Error, Result};

/// Equipment catalogue lists; the EMS format provides none of them
#[derive(Debug, Clone, Default, Serialize)]
pub struct EquipmentCatalog {
    pub transformer_models: Vec<String>,
    pub generator_models: Vec<String>,
    pub conductor_types: Vec<String>,
    pub tower_types: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransformerDetail {
    pub id: String,
    pub from_bus: BusNumber,
    pub to_bus: BusNumber,
    pub voltage_ratio: String,
    pub mva_rating: f64,
    /// `"<r>+j<x> pu"`
    pub impedance: String,
    pub brand: String,
    pub model: String,
    pub cooling_type: String,
    pub vector_group: String,
    pub year_manufactured: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratorDetail {
    pub id: String,
    pub bus_number: BusNumber,
    pub mva_base: f64,
    pub active_power: f64,
    pub reactive_power: f64,
    pub voltage_setpoint: f64,
    pub brand: String,
    pub model: String,
    pub fuel_type: String,
    pub efficiency: f64,
    pub year_commissioned: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BusDetail {
    pub number: BusNumber,
    pub name: String,
    pub base_kv: f64,
    #[serde(rename = "type")]
    pub bus_type: i32,
    pub area: i32,
    pub zone: i32,
    pub voltage_magnitude: f64,
    pub voltage_angle: f64,
}

/// Denormalized equipment view
#[derive(Debug, Clone, Serialize)]
pub struct DetailedEquipment {
    pub transformers: Vec<TransformerDetail>,
    pub generators: Vec<GeneratorDetail>,
    pub buses: Vec<BusDetail>,
}

impl DetailedEquipment {
    pub fn from_model(model: &NetworkModel) -> Self {
        let transformers = model
            .transformers
            .iter()
            .map(|tx| TransformerDetail {
                id: tx.equipment_id(),
                from_bus: tx.from_bus,
                to_bus: tx.to_bus,
                voltage_ratio: tx.voltage_ratio(),
                mva_rating: tx.nominal_mva,
                impedance: format!(
                    "{}+j{} pu",
                    format_decimal(tx.resistance),
                    format_decimal(tx.reactance)
                ),
                brand: tx.brand.clone(),
                model: tx.model.clone(),
                cooling_type: tx.cooling_type.clone(),
                vector_group: tx.vector_group.clone(),
                year_manufactured: tx.year_manufactured,
            })
            .collect();

        let generators = model
            .generators
            .iter()
            .map(|generator| GeneratorDetail {
                id: generator.equipment_id(),
                bus_number: generator.bus_number,
                mva_base: generator.mva_base,
                active_power: generator.active_power,
                reactive_power: generator.reactive_power,
                voltage_setpoint: generator.voltage_setpoint,
                brand: generator.brand.clone(),
                model: generator.model.clone(),
                fuel_type: generator.fuel_type.clone(),
                efficiency: generator.efficiency,
                year_commissioned: generator.year_commissioned,
            })
            .collect();

        let buses = model
            .buses
            .values()
            .map(|bus| BusDetail {
                number: bus.bus_number,
                name: bus.name.clone(),
                base_kv: bus.base_kv,
                bus_type: bus.bus_type,
                area: bus.area,
                zone: bus.zone,
                voltage_magnitude: bus.voltage_magnitude,
                voltage_angle: bus.voltage_angle,
            })
            .collect();

        Self {
            transformers,
            generators,
            buses,
        }
    }
}

/// Complete metadata document
#[derive(Debug, Clone, Serialize)]
pub struct MetadataDocument<'a> {
    pub conversion_info: &'a ConversionInfo,
    pub statistics: &'a ModelStatistics,
    pub brand_data: &'a BrandData,
    pub equipment_data: EquipmentCatalog,
    pub detailed_equipment: DetailedEquipment,
}

impl<'a> MetadataDocument<'a> {
    pub fn from_model(model: &'a NetworkModel) -> Self {
        Self {
            conversion_info: &model.conversion_info,
            statistics: model.statistics(),
            brand_data: model.brand_data(),
            equipment_data: EquipmentCatalog::default(),
            detailed_equipment: DetailedEquipment::from_model(model),
        }
    }

    /// Pretty-printed JSON text
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::serialization("Failed to serialize metadata", e))
    }
}

/// Write the metadata document for a model
pub fn write_metadata_file(model: &NetworkModel, path: &Path) -> Result<()> {
    info!("Generating metadata JSON file: {}", path.display());

    let document = MetadataDocument::from_model(model);
    let file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
    let mut out = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut out, &document)
        .map_err(|e| Error::serialization(format!("Failed to write {}", path.display()), e))?;
    out.flush()
        .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;

    Ok(())
}
