//! Heuristic field recovery
//!
//! The EMS format carries no column schema, so some fields are found by
//! scanning a window of tokens for the first plausible value. Each bus
//! heuristic is an explicit [`ScanRule`]: a token window, a value test, the
//! field assigned from the match and an optional field assigned from the
//! token immediately after it. Rules are applied in table order.
//!
//! The base-kV window (tokens 2..8) and the area window (tokens 6..10)
//! overlap, so one token can feed two fields depending on the data shape.
//! This mirrors the legacy converter and is kept as-is until a format sample
//! pins down the real columns.

use std::ops::Range;

use super::field_parsers::{parse_number, strip_any_quotes, truncate_to_i32};
use crate::constants::{
    BUS_AREA_WINDOW, BUS_BASE_KV_WINDOW, BUS_VOLTAGE_WINDOW, GENERATOR_MODEL_WORDS,
    GENERATOR_NUMERIC_WINDOW, VOLTAGE_MAGNITUDE_MAX_PU, VOLTAGE_MAGNITUDE_MIN_PU, bus_defaults,
    generator_defaults,
};

// =============================================================================
// Scan Rules
// =============================================================================

/// Predicate a scanned value must satisfy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueTest {
    /// Any token that reads as a number
    AnyNumber,
    /// A number within `[min, max]`
    WithinRange { min: f64, max: f64 },
}

impl ValueTest {
    pub fn accepts(&self, value: f64) -> bool {
        match *self {
            ValueTest::AnyNumber => true,
            ValueTest::WithinRange { min, max } => min <= value && value <= max,
        }
    }
}

/// Bus fields recoverable by scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusField {
    BaseKv,
    BusType,
    VoltageMagnitude,
    VoltageAngle,
    Area,
    Zone,
}

/// A value found by a scan rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanMatch {
    /// Token index of the match
    pub index: usize,
    pub value: f64,
}

/// One heuristic: window, predicate, and the fields it assigns
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRule {
    /// Field assigned from the matching token
    pub field: BusField,

    /// Token indices searched (clamped to the token count)
    pub window: Range<usize>,

    pub test: ValueTest,

    /// Field assigned from the next token, when that token is numeric
    pub follower: Option<BusField>,
}

impl ScanRule {
    /// First token in the window whose value passes the test
    pub fn scan(&self, tokens: &[&str]) -> Option<ScanMatch> {
        let end = self.window.end.min(tokens.len());

        (self.window.start..end).find_map(|index| {
            parse_number(tokens[index])
                .filter(|value| self.test.accepts(*value))
                .map(|value| ScanMatch { index, value })
        })
    }

    /// Numeric value of the token following a match
    pub fn follower_value(&self, tokens: &[&str], found: &ScanMatch) -> Option<f64> {
        self.follower?;
        tokens.get(found.index + 1).and_then(|token| parse_number(token))
    }
}

/// Bus heuristics in application order
pub const BUS_SCAN_RULES: [ScanRule; 3] = [
    // First number after the name is the base voltage; the next token is the type code
    ScanRule {
        field: BusField::BaseKv,
        window: BUS_BASE_KV_WINDOW,
        test: ValueTest::AnyNumber,
        follower: Some(BusField::BusType),
    },
    // First value inside the plausible p.u. window is the magnitude, then the angle
    ScanRule {
        field: BusField::VoltageMagnitude,
        window: BUS_VOLTAGE_WINDOW,
        test: ValueTest::WithinRange {
            min: VOLTAGE_MAGNITUDE_MIN_PU,
            max: VOLTAGE_MAGNITUDE_MAX_PU,
        },
        follower: Some(BusField::VoltageAngle),
    },
    ScanRule {
        field: BusField::Area,
        window: BUS_AREA_WINDOW,
        test: ValueTest::AnyNumber,
        follower: Some(BusField::Zone),
    },
];

// =============================================================================
// Bus Fields
// =============================================================================

/// Bus fields recovered by the scan rules; `None` means not recovered
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecoveredBusFields {
    pub base_kv: Option<f64>,
    pub bus_type: Option<i32>,
    pub voltage_magnitude: Option<f64>,
    pub voltage_angle: Option<f64>,
    pub area: Option<i32>,
    pub zone: Option<i32>,
}

impl RecoveredBusFields {
    /// Assign a scanned value; integer fields truncate and ignore non-finite values
    pub fn assign(&mut self, field: BusField, value: f64) {
        match field {
            BusField::BaseKv => self.base_kv = Some(value),
            BusField::VoltageMagnitude => self.voltage_magnitude = Some(value),
            BusField::VoltageAngle => self.voltage_angle = Some(value),
            BusField::BusType => {
                if let Some(code) = truncate_to_i32(value) {
                    self.bus_type = Some(code);
                }
            }
            BusField::Area => {
                if let Some(area) = truncate_to_i32(value) {
                    self.area = Some(area);
                }
            }
            BusField::Zone => {
                if let Some(zone) = truncate_to_i32(value) {
                    self.zone = Some(zone);
                }
            }
        }
    }

    pub fn base_kv(&self) -> f64 {
        self.base_kv.unwrap_or(bus_defaults::BASE_KV)
    }

    pub fn bus_type(&self) -> i32 {
        self.bus_type.unwrap_or(bus_defaults::BUS_TYPE)
    }

    pub fn voltage_magnitude(&self) -> f64 {
        self.voltage_magnitude
            .unwrap_or(bus_defaults::VOLTAGE_MAGNITUDE)
    }

    pub fn voltage_angle(&self) -> f64 {
        self.voltage_angle.unwrap_or(bus_defaults::VOLTAGE_ANGLE)
    }

    pub fn area(&self) -> i32 {
        self.area.unwrap_or(bus_defaults::AREA)
    }

    pub fn zone(&self) -> i32 {
        self.zone.unwrap_or(bus_defaults::ZONE)
    }
}

/// Apply a rule table to a token sequence
pub fn apply_scan_rules(rules: &[ScanRule], tokens: &[&str]) -> RecoveredBusFields {
    let mut fields = RecoveredBusFields::default();

    for rule in rules {
        let Some(found) = rule.scan(tokens) else {
            continue;
        };

        fields.assign(rule.field, found.value);

        if let (Some(follower), Some(value)) = (rule.follower, rule.follower_value(tokens, &found)) {
            fields.assign(follower, value);
        }
    }

    fields
}

/// Recover scanned bus fields with the standard rule table
pub fn recover_bus_fields(tokens: &[&str]) -> RecoveredBusFields {
    apply_scan_rules(&BUS_SCAN_RULES, tokens)
}

// =============================================================================
// Generator Fields
// =============================================================================

/// Generator electrical values recovered from the numeric token list
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorValues {
    pub active_power: f64,
    pub reactive_power: f64,
    pub max_reactive_power: f64,
    pub min_reactive_power: f64,
    pub voltage_setpoint: f64,
    pub mva_base: f64,
}

impl Default for GeneratorValues {
    fn default() -> Self {
        Self {
            active_power: 0.0,
            reactive_power: 0.0,
            max_reactive_power: generator_defaults::MAX_REACTIVE_MVAR,
            min_reactive_power: generator_defaults::MIN_REACTIVE_MVAR,
            voltage_setpoint: generator_defaults::VOLTAGE_SETPOINT_PU,
            mva_base: generator_defaults::MVA_BASE,
        }
    }
}

/// Numeric tokens inside a window, in order
pub fn collect_numeric_values(tokens: &[&str], window: Range<usize>) -> Vec<f64> {
    let end = window.end.min(tokens.len());
    tokens
        .get(window.start..end)
        .unwrap_or_default()
        .iter()
        .filter_map(|token| parse_number(token))
        .collect()
}

/// Map collected numbers onto generator values by position
///
/// Fewer than two numbers leaves every value at its default. The third
/// number is |Qmax|; the fourth, when present, is negated into Qmin,
/// otherwise Qmin mirrors Qmax. The fifth and sixth are the voltage
/// setpoint and MVA base.
pub fn map_generator_values(values: &[f64]) -> GeneratorValues {
    let mut mapped = GeneratorValues::default();

    if values.len() < 2 {
        return mapped;
    }

    mapped.active_power = values[0];
    mapped.reactive_power = values[1];

    if let Some(q_max) = values.get(2) {
        mapped.max_reactive_power = q_max.abs();
        mapped.min_reactive_power = match values.get(3) {
            Some(q_min) => -q_min.abs(),
            None => -mapped.max_reactive_power,
        };
    }
    if let Some(setpoint) = values.get(4) {
        mapped.voltage_setpoint = *setpoint;
    }
    if let Some(mva_base) = values.get(5) {
        mapped.mva_base = *mva_base;
    }

    mapped
}

/// Recover generator electrical values from a generator record
pub fn recover_generator_values(tokens: &[&str]) -> GeneratorValues {
    map_generator_values(&collect_numeric_values(tokens, GENERATOR_NUMERIC_WINDOW))
}

/// Brand and model from a quoted free-text description
///
/// The description starts at the first token after the bus number that
/// begins with a quote, so a quoted id opens it. Its first word is the brand
/// and the next words (up to two) are the model. Both are empty when no
/// description exists.
pub fn recover_brand_model(tokens: &[&str]) -> (String, String) {
    let Some(start) = tokens
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, token)| token.starts_with(['\'', '"']))
        .map(|(index, _)| index)
    else {
        return (String::new(), String::new());
    };

    let description = tokens[start..].join(" ");
    let words: Vec<&str> = strip_any_quotes(&description).split_whitespace().collect();

    match words.split_first() {
        Some((brand, rest)) => {
            let model_words = &rest[..rest.len().min(GENERATOR_MODEL_WORDS)];
            (brand.to_string(), model_words.join(" "))
        }
        None => (String::new(), String::new()),
    }
}
