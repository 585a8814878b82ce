//! Summary statistics derived from a network model

use super::NetworkModel;
use serde::{Deserialize, Serialize};

/// Counts, distinct levels and aggregate capacity/demand of a model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelStatistics {
    pub total_buses: usize,
    pub total_transformers: usize,
    pub total_generators: usize,
    pub total_loads: usize,
    pub total_branches: usize,

    /// Sorted distinct bus base voltages (kV)
    pub voltage_levels: Vec<f64>,

    /// Sorted distinct bus areas
    pub areas: Vec<i32>,

    /// Sorted distinct bus zones
    pub zones: Vec<i32>,

    /// Sum of generator MVA bases
    pub total_generation_capacity_mva: f64,

    /// Sum of load active power (MW)
    pub total_load_demand_mw: f64,
}

impl ModelStatistics {
    /// Compute statistics from the model's current collections
    pub fn compute(model: &NetworkModel) -> Self {
        let mut voltage_levels: Vec<f64> = model.buses.values().map(|b| b.base_kv).collect();
        voltage_levels.sort_by(f64::total_cmp);
        voltage_levels.dedup_by(|a, b| a.total_cmp(b).is_eq());

        let mut areas: Vec<i32> = model.buses.values().map(|b| b.area).collect();
        areas.sort_unstable();
        areas.dedup();

        let mut zones: Vec<i32> = model.buses.values().map(|b| b.zone).collect();
        zones.sort_unstable();
        zones.dedup();

        Self {
            total_buses: model.buses.len(),
            total_transformers: model.transformers.len(),
            total_generators: model.generators.len(),
            total_loads: model.loads.len(),
            total_branches: model.branches.len(),
            voltage_levels,
            areas,
            zones,
            total_generation_capacity_mva: model.generators.iter().map(|g| g.mva_base).sum(),
            total_load_demand_mw: model.loads.iter().map(|l| l.active_power).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{Bus, ConversionInfo, Generator, Load, NetworkModel};

    fn bus(number: i32, base_kv: f64, area: i32, zone: i32) -> Bus {
        Bus {
            bus_number: number,
            name: format!("B{}", number),
            base_kv,
            bus_type: 1,
            voltage_magnitude: 1.0,
            voltage_angle: 0.0,
            area,
            zone,
            max_voltage: 1.1,
            min_voltage: 0.9,
            description: String::new(),
        }
    }

    fn load(bus_number: i32, active_power: f64) -> Load {
        Load {
            bus_number,
            id: "1".to_string(),
            active_power,
            reactive_power: 0.0,
            load_type: "1".to_string(),
            voltage_dependence: 1,
            area: 1,
            zone: 1,
            description: String::new(),
        }
    }

    fn generator(bus_number: i32, mva_base: f64) -> Generator {
        Generator {
            bus_number,
            id: "1".to_string(),
            active_power: 0.0,
            reactive_power: 0.0,
            max_reactive_power: 999.0,
            min_reactive_power: -999.0,
            voltage_setpoint: 1.0,
            mva_base,
            inertia: 3.0,
            damping: 0.0,
            brand: String::new(),
            model: String::new(),
            fuel_type: "Unknown".to_string(),
            efficiency: 0.95,
            year_commissioned: 2000,
        }
    }

    fn model() -> NetworkModel {
        let mut model = NetworkModel::new(ConversionInfo::new("test.txt", 50.0, "Test", "Test"));
        model.insert_bus(bus(3, 33.0, 2, 5));
        model.insert_bus(bus(1, 110.0, 1, 1));
        model.insert_bus(bus(2, 33.0, 1, 5));
        model.loads.push(load(2, 40.5));
        model.loads.push(load(3, 9.5));
        model.generators.push(generator(1, 150.0));
        model.generators.push(generator(1, 50.0));
        model
    }

    #[test]
    fn test_compute_counts_and_sets() {
        let stats = ModelStatistics::compute(&model());

        assert_eq!(stats.total_buses, 3);
        assert_eq!(stats.total_loads, 2);
        assert_eq!(stats.total_generators, 2);
        assert_eq!(stats.total_branches, 0);
        assert_eq!(stats.total_transformers, 0);
        assert_eq!(stats.voltage_levels, vec![33.0, 110.0]);
        assert_eq!(stats.areas, vec![1, 2]);
        assert_eq!(stats.zones, vec![1, 5]);
        assert_eq!(stats.total_generation_capacity_mva, 200.0);
        assert_eq!(stats.total_load_demand_mw, 50.0);
    }

    #[test]
    fn test_compute_is_repeatable() {
        let mut model = model();
        model.update_statistics();
        let first = serde_json::to_string(model.statistics()).unwrap();
        model.update_statistics();
        let second = serde_json::to_string(model.statistics()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_statistics_follow_bus_overwrite() {
        let mut model = model();
        model.update_statistics();
        assert_eq!(model.statistics().voltage_levels, vec![33.0, 110.0]);

        // Replacing bus 1 drops its 110 kV level entirely
        let replaced = model.insert_bus(bus(1, 20.0, 1, 1));
        assert!(replaced.is_some());
        model.update_statistics();

        assert_eq!(model.statistics().total_buses, 3);
        assert_eq!(model.statistics().voltage_levels, vec![20.0, 33.0]);
    }

    #[test]
    fn test_empty_model_statistics() {
        let mut model = NetworkModel::new(ConversionInfo::new("empty.txt", 50.0, "Test", "Test"));
        model.update_statistics();

        assert_eq!(model.statistics(), &ModelStatistics::default());
        assert!(model.brand_data().generators.is_empty());
    }
}
