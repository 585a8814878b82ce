//! Data models for EMS network conversion
//!
//! This module contains the typed network entities recovered from an EMS
//! flat-text export and the [`NetworkModel`] that owns them once parsing is
//! complete.

use crate::constants::{generator_defaults, transformer_defaults};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod statistics;

pub use statistics::ModelStatistics;

/// Bus numbers are the integer keys of the bus section
pub type BusNumber = i32;

/// Render a float the way the legacy tooling printed it (`110.0`, not `110`)
pub fn format_decimal(value: f64) -> String {
    format!("{:?}", value)
}

// =============================================================================
// Network Entities
// =============================================================================

/// Bus (node) record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bus {
    /// Unique bus number
    pub bus_number: BusNumber,

    /// Bus name with quotes removed
    pub name: String,

    /// Base voltage in kV
    pub base_kv: f64,

    /// Bus type code (1 = load bus, 2 = generator bus, 3 = swing bus)
    pub bus_type: i32,

    /// Voltage magnitude in p.u.
    pub voltage_magnitude: f64,

    /// Voltage angle in degrees
    pub voltage_angle: f64,

    pub area: i32,
    pub zone: i32,

    /// Upper voltage limit in p.u.
    pub max_voltage: f64,

    /// Lower voltage limit in p.u.
    pub min_voltage: f64,

    pub description: String,
}

impl Bus {
    /// Description string recorded for every bus
    pub fn describe(name: &str, bus_number: BusNumber, base_kv: f64) -> String {
        format!("Bus {} {} {}kV", name, bus_number, format_decimal(base_kv))
    }
}

/// Load record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    /// Bus the load is connected to (not checked against the bus section)
    pub bus_number: BusNumber,
    pub id: String,

    /// Active power in MW
    pub active_power: f64,

    /// Reactive power in MVAr
    pub reactive_power: f64,

    /// Raw load type code
    pub load_type: String,
    pub voltage_dependence: i32,
    pub area: i32,
    pub zone: i32,
    pub description: String,
}

/// Generator record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generator {
    pub bus_number: BusNumber,
    pub id: String,

    /// Active power output in MW
    pub active_power: f64,

    /// Reactive power output in MVAr
    pub reactive_power: f64,

    pub max_reactive_power: f64,
    pub min_reactive_power: f64,

    /// Voltage setpoint in p.u.
    pub voltage_setpoint: f64,

    /// Machine base in MVA
    pub mva_base: f64,

    pub inertia: f64,
    pub damping: f64,

    /// Manufacturer, recovered from a free-text description when present
    pub brand: String,

    /// Model name, recovered from a free-text description when present
    pub model: String,

    pub fuel_type: String,
    pub efficiency: f64,
    pub year_commissioned: i32,
}

impl Generator {
    /// Equipment identifier used in metadata (`GEN_<bus>_<id>`)
    pub fn equipment_id(&self) -> String {
        format!("GEN_{}_{}", self.bus_number, self.id)
    }
}

/// Branch (line) record
///
/// From/to buses are stored as read; the pair is not canonicalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub from_bus: BusNumber,
    pub to_bus: BusNumber,
    pub circuit_id: String,
    pub resistance: f64,
    pub reactance: f64,
    pub charging_susceptance: f64,
    pub mva_rating: f64,
    pub length_km: f64,
    pub conductor_type: String,
    pub tower_type: String,
    pub brand: String,
    pub year_installed: i32,
}

/// Two-winding transformer record, built from a four-line block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformer {
    pub from_bus: BusNumber,
    pub to_bus: BusNumber,
    pub circuit_id: String,
    pub winding_type: i32,
    pub control_method: i32,
    pub resistance: f64,
    pub reactance: f64,
    pub magnetizing_conductance: f64,
    pub magnetizing_susceptance: f64,
    pub nominal_mva: f64,

    /// From-side voltage in kV
    pub from_bus_voltage: f64,

    /// To-side voltage in kV
    pub to_bus_voltage: f64,

    pub min_tap: f64,
    pub max_tap: f64,
    pub step_size: f64,
    pub min_angle: f64,
    pub max_angle: f64,
    pub angle_step: f64,
    pub tap_position: f64,
    pub phase_angle: f64,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub year_manufactured: i32,
    pub cooling_type: String,
    pub vector_group: String,
}

impl Transformer {
    /// Equipment identifier used in metadata (`TX_<from>_<to>`)
    pub fn equipment_id(&self) -> String {
        Self::default_name(self.from_bus, self.to_bus)
    }

    /// Name synthesized when the block carries none
    pub fn default_name(from_bus: BusNumber, to_bus: BusNumber) -> String {
        format!("TX_{}_{}", from_bus, to_bus)
    }

    /// Voltage ratio as `"<from>/<to>kV"`
    pub fn voltage_ratio(&self) -> String {
        format!(
            "{}/{}kV",
            format_decimal(self.from_bus_voltage),
            format_decimal(self.to_bus_voltage)
        )
    }
}

// =============================================================================
// Conversion Metadata
// =============================================================================

/// Metadata about the conversion run and the source system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionInfo {
    pub source_file: String,
    pub conversion_date: String,
    pub converter_version: String,
    pub base_frequency: f64,
    pub system_name: String,
    pub description: String,
}

impl ConversionInfo {
    /// Create conversion info stamped with the current local time
    pub fn new(
        source_file: impl Into<String>,
        base_frequency: f64,
        system_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            source_file: source_file.into(),
            conversion_date: Local::now()
                .naive_local()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
            converter_version: crate::constants::CONVERTER_VERSION.to_string(),
            base_frequency,
            system_name: system_name.into(),
            description: description.into(),
        }
    }
}

/// Brand entry for a generator manufacturer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorBrand {
    pub model: String,
    #[serde(rename = "type")]
    pub machine_type: String,
    pub fuel_type: String,
}

/// Brand entry for a transformer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerBrand {
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub voltage_ratio: String,
    pub mva_rating: f64,
    pub vector_group: String,
    pub cooling_type: String,
}

/// Brand dictionaries derived from the parsed equipment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandData {
    pub transformers: BTreeMap<String, TransformerBrand>,
    pub generators: BTreeMap<String, GeneratorBrand>,
    pub switchgear: BTreeMap<String, String>,
    pub protection_devices: BTreeMap<String, String>,
}

impl BrandData {
    /// Derive brand dictionaries; later equipment overwrites earlier entries
    pub fn derive(generators: &[Generator], transformers: &[Transformer]) -> Self {
        let mut brand_data = Self::default();

        for generator in generators.iter().filter(|g| !g.brand.is_empty()) {
            brand_data.generators.insert(
                generator.brand.clone(),
                GeneratorBrand {
                    model: generator.model.clone(),
                    machine_type: generator_defaults::MACHINE_TYPE.to_string(),
                    fuel_type: generator.fuel_type.clone(),
                },
            );
        }

        for transformer in transformers {
            brand_data.transformers.insert(
                transformer.equipment_id(),
                TransformerBrand {
                    equipment_type: transformer_defaults::EQUIPMENT_TYPE.to_string(),
                    voltage_ratio: transformer.voltage_ratio(),
                    mva_rating: transformer.nominal_mva,
                    vector_group: transformer.vector_group.clone(),
                    cooling_type: transformer.cooling_type.clone(),
                },
            );
        }

        brand_data
    }
}

// =============================================================================
// Network Model
// =============================================================================

/// Parsed network model with derived statistics
///
/// Buses are keyed by number; inserting a bus whose number already exists
/// replaces the earlier one. Statistics and brand data are recomputed in
/// full by [`NetworkModel::update_statistics`], never maintained incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkModel {
    pub conversion_info: ConversionInfo,
    pub buses: BTreeMap<BusNumber, Bus>,
    pub loads: Vec<Load>,
    pub generators: Vec<Generator>,
    pub branches: Vec<Branch>,
    pub transformers: Vec<Transformer>,
    statistics: ModelStatistics,
    brand_data: BrandData,
}

impl NetworkModel {
    /// Create an empty model
    pub fn new(conversion_info: ConversionInfo) -> Self {
        Self {
            conversion_info,
            buses: BTreeMap::new(),
            loads: Vec::new(),
            generators: Vec::new(),
            branches: Vec::new(),
            transformers: Vec::new(),
            statistics: ModelStatistics::default(),
            brand_data: BrandData::default(),
        }
    }

    /// Insert a bus, returning the bus it replaced
    pub fn insert_bus(&mut self, bus: Bus) -> Option<Bus> {
        self.buses.insert(bus.bus_number, bus)
    }

    /// Recompute statistics and brand data from the current collections
    pub fn update_statistics(&mut self) {
        self.statistics = ModelStatistics::compute(self);
        self.brand_data = BrandData::derive(&self.generators, &self.transformers);
    }

    /// Statistics as of the last [`NetworkModel::update_statistics`] call
    pub fn statistics(&self) -> &ModelStatistics {
        &self.statistics
    }

    /// Brand dictionaries as of the last [`NetworkModel::update_statistics`] call
    pub fn brand_data(&self) -> &BrandData {
        &self.brand_data
    }

    /// Total number of recovered records
    pub fn record_count(&self) -> usize {
        self.buses.len()
            + self.loads.len()
            + self.generators.len()
            + self.branches.len()
            + self.transformers.len()
    }
}
