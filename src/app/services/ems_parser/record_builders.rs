//! Record builders for the five EMS sections
//!
//! Each `parse_*` function turns the tokens of one record into a typed
//! entity or fails for that record alone. [`RecordBuilder`] walks a
//! section's row range, applies the matching parse function and turns every
//! failure into a [`ParseWarning`] so the scan always reaches the section end.

use tracing::{debug, warn};

use super::field_parsers::{
    is_record_line, parse_positional_f64, parse_positional_string, parse_required_f64,
    parse_required_i32, preview, require_tokens, strip_any_quotes, strip_quotes,
};
use super::heuristics::{recover_brand_model, recover_bus_fields, recover_generator_values};
use super::section::{SectionBounds, SectionKind};
use super::stats::{ParseStats, ParseWarning, SkipReason};
use super::tokenizer::{TokenizerMode, tokenize_whitespace};
use crate::app::models::{Branch, Bus, Generator, Load, Transformer};
use crate::constants::{
    BRANCH_MIN_TOKENS, BUS_MIN_TOKENS, GENERATOR_MIN_TOKENS, LOAD_MIN_TOKENS,
    TRANSFORMER_BLOCK_LINES, TRANSFORMER_MIN_TOKENS, branch_defaults, bus_defaults,
    generator_defaults, load_defaults, transformer_defaults,
};
use crate::{Error, Result};

// =============================================================================
// Single-record parsers
// =============================================================================

/// Parse a bus record from quote-aware tokens
pub fn parse_bus_record(tokens: &[&str]) -> Result<Bus> {
    require_tokens(tokens, BUS_MIN_TOKENS)?;

    let bus_number = parse_required_i32(tokens, 0, "bus_number")?;
    let name = match tokens.get(1).map(|token| strip_quotes(token)) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("BUS_{}", bus_number),
    };

    let fields = recover_bus_fields(tokens);
    let base_kv = fields.base_kv();

    Ok(Bus {
        bus_number,
        description: Bus::describe(&name, bus_number, base_kv),
        name,
        base_kv,
        bus_type: fields.bus_type(),
        voltage_magnitude: fields.voltage_magnitude(),
        voltage_angle: fields.voltage_angle(),
        area: fields.area(),
        zone: fields.zone(),
        max_voltage: bus_defaults::MAX_VOLTAGE,
        min_voltage: bus_defaults::MIN_VOLTAGE,
    })
}

/// Parse a load record; every field is positional
pub fn parse_load_record(tokens: &[&str]) -> Result<Load> {
    require_tokens(tokens, LOAD_MIN_TOKENS)?;

    let bus_number = parse_required_i32(tokens, 0, "bus_number")?;

    Ok(Load {
        bus_number,
        id: parse_positional_string(tokens, 1, load_defaults::ID),
        active_power: parse_positional_f64(tokens, 2, "active_power", 0.0)?,
        reactive_power: parse_positional_f64(tokens, 3, "reactive_power", 0.0)?,
        load_type: tokens
            .get(4)
            .map(|token| token.to_string())
            .unwrap_or_else(|| load_defaults::LOAD_TYPE.to_string()),
        voltage_dependence: load_defaults::VOLTAGE_DEPENDENCE,
        area: load_defaults::AREA,
        zone: load_defaults::ZONE,
        description: format!("Load at bus {}", bus_number),
    })
}

/// Parse a generator record; electrical values come from the numeric scan
pub fn parse_generator_record(tokens: &[&str]) -> Result<Generator> {
    require_tokens(tokens, GENERATOR_MIN_TOKENS)?;

    let bus_number = parse_required_i32(tokens, 0, "bus_number")?;
    let values = recover_generator_values(tokens);
    let (brand, model) = recover_brand_model(tokens);

    Ok(Generator {
        bus_number,
        id: parse_positional_string(tokens, 1, generator_defaults::ID),
        active_power: values.active_power,
        reactive_power: values.reactive_power,
        max_reactive_power: values.max_reactive_power,
        min_reactive_power: values.min_reactive_power,
        voltage_setpoint: values.voltage_setpoint,
        mva_base: values.mva_base,
        inertia: generator_defaults::INERTIA,
        damping: generator_defaults::DAMPING,
        brand,
        model,
        fuel_type: generator_defaults::FUEL_TYPE.to_string(),
        efficiency: generator_defaults::EFFICIENCY,
        year_commissioned: generator_defaults::YEAR_COMMISSIONED,
    })
}

/// Parse a branch record; every field is positional
pub fn parse_branch_record(tokens: &[&str]) -> Result<Branch> {
    require_tokens(tokens, BRANCH_MIN_TOKENS)?;

    Ok(Branch {
        from_bus: parse_required_i32(tokens, 0, "from_bus")?,
        to_bus: parse_required_i32(tokens, 1, "to_bus")?,
        circuit_id: parse_positional_string(tokens, 2, branch_defaults::CIRCUIT_ID),
        resistance: parse_positional_f64(tokens, 3, "resistance", branch_defaults::RESISTANCE)?,
        reactance: parse_positional_f64(tokens, 4, "reactance", branch_defaults::REACTANCE)?,
        charging_susceptance: parse_positional_f64(
            tokens,
            5,
            "charging_susceptance",
            branch_defaults::CHARGING_SUSCEPTANCE,
        )?,
        mva_rating: parse_positional_f64(tokens, 6, "mva_rating", branch_defaults::MVA_RATING)?,
        length_km: branch_defaults::LENGTH_KM,
        conductor_type: branch_defaults::CONDUCTOR_TYPE.to_string(),
        tower_type: branch_defaults::TOWER_TYPE.to_string(),
        brand: branch_defaults::BRAND.to_string(),
        year_installed: branch_defaults::YEAR_INSTALLED,
    })
}

/// The four token lines of one transformer record
#[derive(Debug, Clone, Copy)]
pub struct TransformerBlock<'a> {
    /// Header: from bus, to bus, ...
    pub header: &'a [&'a str],
    /// Resistance, reactance, nominal MVA
    pub impedance: &'a [&'a str],
    /// Tap position, from-side kV
    pub tap: &'a [&'a str],
    /// (unused), to-side kV, optional name
    pub secondary: &'a [&'a str],
}

/// Parse a transformer from its four-line block
pub fn parse_transformer_block(block: &TransformerBlock<'_>) -> Result<Transformer> {
    require_tokens(block.header, TRANSFORMER_MIN_TOKENS)?;

    let from_bus = parse_required_i32(block.header, 0, "from_bus")?;
    let to_bus = parse_required_i32(block.header, 1, "to_bus")?;

    let (resistance, reactance, nominal_mva) = if block.impedance.len() >= 3 {
        (
            parse_required_f64(block.impedance, 0, "resistance")?,
            parse_required_f64(block.impedance, 1, "reactance")?,
            parse_required_f64(block.impedance, 2, "nominal_mva")?,
        )
    } else {
        (
            transformer_defaults::RESISTANCE,
            transformer_defaults::REACTANCE,
            transformer_defaults::NOMINAL_MVA,
        )
    };

    let (tap_position, from_bus_voltage) = if block.tap.len() >= 2 {
        (
            parse_required_f64(block.tap, 0, "tap_position")?,
            parse_required_f64(block.tap, 1, "from_bus_voltage")?,
        )
    } else {
        (
            transformer_defaults::TAP_POSITION,
            transformer_defaults::FROM_BUS_VOLTAGE_KV,
        )
    };

    let to_bus_voltage = if block.secondary.len() >= 2 {
        parse_required_f64(block.secondary, 1, "to_bus_voltage")?
    } else {
        transformer_defaults::TO_BUS_VOLTAGE_KV
    };

    let name = block
        .secondary
        .get(2..)
        .map(|rest| rest.join(" "))
        .and_then(|rest| {
            strip_any_quotes(&rest)
                .split_whitespace()
                .next()
                .map(str::to_string)
        })
        .unwrap_or_else(|| Transformer::default_name(from_bus, to_bus));

    Ok(Transformer {
        from_bus,
        to_bus,
        circuit_id: transformer_defaults::CIRCUIT_ID.to_string(),
        winding_type: transformer_defaults::WINDING_TYPE,
        control_method: transformer_defaults::CONTROL_METHOD,
        resistance,
        reactance,
        magnetizing_conductance: transformer_defaults::MAGNETIZING_CONDUCTANCE,
        magnetizing_susceptance: transformer_defaults::MAGNETIZING_SUSCEPTANCE,
        nominal_mva,
        from_bus_voltage,
        to_bus_voltage,
        min_tap: transformer_defaults::MIN_TAP,
        max_tap: transformer_defaults::MAX_TAP,
        step_size: transformer_defaults::TAP_STEP,
        min_angle: transformer_defaults::MIN_ANGLE,
        max_angle: transformer_defaults::MAX_ANGLE,
        angle_step: transformer_defaults::ANGLE_STEP,
        tap_position,
        phase_angle: transformer_defaults::PHASE_ANGLE,
        name,
        brand: transformer_defaults::BRAND.to_string(),
        model: transformer_defaults::MODEL.to_string(),
        year_manufactured: transformer_defaults::YEAR_MANUFACTURED,
        cooling_type: transformer_defaults::COOLING_TYPE.to_string(),
        vector_group: transformer_defaults::VECTOR_GROUP.to_string(),
    })
}

// =============================================================================
// Section builders
// =============================================================================

/// Tokenizer used for each section's record lines
pub fn tokenizer_for(kind: SectionKind) -> TokenizerMode {
    match kind {
        SectionKind::Bus => TokenizerMode::QuoteAware,
        _ => TokenizerMode::Whitespace,
    }
}

/// Walks section row ranges and builds records, recording skipped rows
#[derive(Debug, Clone, Copy)]
pub struct RecordBuilder<'a> {
    lines: &'a [&'a str],
    preview_chars: usize,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(lines: &'a [&'a str], preview_chars: usize) -> Self {
        Self {
            lines,
            preview_chars,
        }
    }

    /// Build bus records in input order (duplicates are resolved by the model)
    pub fn build_buses(&self, bounds: &SectionBounds, stats: &mut ParseStats) -> Vec<Bus> {
        self.build_single_line(bounds, stats, parse_bus_record)
    }

    pub fn build_loads(&self, bounds: &SectionBounds, stats: &mut ParseStats) -> Vec<Load> {
        self.build_single_line(bounds, stats, parse_load_record)
    }

    pub fn build_generators(
        &self,
        bounds: &SectionBounds,
        stats: &mut ParseStats,
    ) -> Vec<Generator> {
        self.build_single_line(bounds, stats, parse_generator_record)
    }

    pub fn build_branches(&self, bounds: &SectionBounds, stats: &mut ParseStats) -> Vec<Branch> {
        self.build_single_line(bounds, stats, parse_branch_record)
    }

    /// Build transformer records from four-line blocks
    ///
    /// A header line with enough tokens always consumes itself and the next
    /// three lines, whether or not the block parses. A qualifying header
    /// without three following lines in the section ends the scan.
    pub fn build_transformers(
        &self,
        bounds: &SectionBounds,
        stats: &mut ParseStats,
    ) -> Vec<Transformer> {
        let kind = bounds.kind;
        let mut records = Vec::new();
        let mut index = bounds.start;

        while index < bounds.end {
            let line = self.lines[index].trim();
            if !is_record_line(line) {
                index += 1;
                continue;
            }

            let header = tokenize_whitespace(line);
            if header.len() < TRANSFORMER_MIN_TOKENS {
                let error = Error::too_few_tokens(header.len(), TRANSFORMER_MIN_TOKENS);
                self.skip(stats, kind, index, line, &error);
                index += 1;
                continue;
            }

            let available = bounds.end - index;
            if available < TRANSFORMER_BLOCK_LINES {
                let error = Error::truncated_record(TRANSFORMER_BLOCK_LINES, available);
                self.skip(stats, kind, index, line, &error);
                break;
            }

            let impedance = tokenize_whitespace(self.lines[index + 1].trim());
            let tap = tokenize_whitespace(self.lines[index + 2].trim());
            let secondary = tokenize_whitespace(self.lines[index + 3].trim());
            let block = TransformerBlock {
                header: &header,
                impedance: &impedance,
                tap: &tap,
                secondary: &secondary,
            };

            match parse_transformer_block(&block) {
                Ok(transformer) => {
                    records.push(transformer);
                    stats.record_parsed(kind);
                }
                Err(error) => self.skip(stats, kind, index, line, &error),
            }

            index += TRANSFORMER_BLOCK_LINES;
        }

        records
    }

    fn build_single_line<T>(
        &self,
        bounds: &SectionBounds,
        stats: &mut ParseStats,
        parse: impl Fn(&[&str]) -> Result<T>,
    ) -> Vec<T> {
        let kind = bounds.kind;
        let tokenizer = tokenizer_for(kind);
        let mut records = Vec::new();

        for index in bounds.rows() {
            let line = self.lines[index].trim();
            if !is_record_line(line) {
                continue;
            }

            let tokens = tokenizer.tokenize(line);
            match parse(tokens.as_slice()) {
                Ok(record) => {
                    records.push(record);
                    stats.record_parsed(kind);
                }
                Err(error) => self.skip(stats, kind, index, line, &error),
            }
        }

        records
    }

    fn skip(
        &self,
        stats: &mut ParseStats,
        section: SectionKind,
        index: usize,
        line: &str,
        error: &Error,
    ) {
        let warning = ParseWarning {
            section,
            line_number: index + 1,
            preview: preview(line, self.preview_chars),
            reason: SkipReason::from(error),
            message: error.to_string(),
        };

        // Short rows are routine in these exports; field errors are not
        if warning.reason == SkipReason::TooFewTokens {
            debug!("{}", warning);
        } else {
            warn!("{}", warning);
        }

        stats.record_skipped(warning);
    }
}
