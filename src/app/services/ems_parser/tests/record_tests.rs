//! Tests for per-section record building

use super::super::record_builders::{
    RecordBuilder, TransformerBlock, parse_branch_record, parse_bus_record,
    parse_generator_record, parse_load_record, parse_transformer_block,
};
use super::super::section::{SectionBounds, SectionKind};
use super::super::stats::{ParseStats, SkipReason};
use super::super::tokenizer::{tokenize_quoted, tokenize_whitespace};
use crate::Error;

fn bounds(kind: SectionKind, lines: &[&str]) -> SectionBounds {
    SectionBounds {
        kind,
        start: 0,
        end: lines.len(),
        terminated: false,
    }
}

// =============================================================================
// Buses
// =============================================================================

#[test]
fn test_parse_bus_record() {
    let tokens = tokenize_quoted("101 'BUS ONE' 110.0 2 0 0 1 1 1.02 -5.5 1 1");
    let bus = parse_bus_record(&tokens).unwrap();

    assert_eq!(bus.bus_number, 101);
    assert_eq!(bus.name, "BUS ONE");
    assert_eq!(bus.base_kv, 110.0);
    assert_eq!(bus.bus_type, 2);
    assert_eq!(bus.voltage_magnitude, 1.02);
    assert_eq!(bus.voltage_angle, -5.5);
    assert_eq!(bus.area, 1);
    assert_eq!(bus.zone, 1);
    assert_eq!(bus.max_voltage, 1.1);
    assert_eq!(bus.min_voltage, 0.9);
    assert_eq!(bus.description, "Bus BUS ONE 101 110.0kV");
}

#[test]
fn test_bus_with_nine_tokens_is_rejected() {
    let tokens = tokenize_quoted("101 'BUS1' 110.0 1 0 0 1 1 1.02");
    assert_eq!(tokens.len(), 9);

    let err = parse_bus_record(&tokens).unwrap_err();
    assert!(matches!(
        err,
        Error::TooFewTokens {
            found: 9,
            required: 10
        }
    ));
}

#[test]
fn test_bus_number_must_be_integer() {
    let tokens = tokenize_quoted("10A 'BUS1' 110.0 1 0 0 1 1 1.02 0.0");
    let err = parse_bus_record(&tokens).unwrap_err();
    assert!(matches!(err, Error::InvalidField { ref field, .. } if field == "bus_number"));
}

#[test]
fn test_empty_bus_name_falls_back_to_number() {
    let tokens = tokenize_quoted("42 '' 20.0 1 0 0 1 1 1.0 0.0");
    let bus = parse_bus_record(&tokens).unwrap();
    assert_eq!(bus.name, "BUS_42");
}

#[test]
fn test_bus_builder_skips_short_rows_and_continues() {
    let lines = [
        "101 'A' 110.0 1 0 0 1 1 1.0 0.0",
        "102 'B' 110.0 1",
        "103 'C' 33.0 1 0 0 1 1 0.99 0.0",
    ];
    let mut stats = ParseStats::new();
    let buses =
        RecordBuilder::new(&lines, 50).build_buses(&bounds(SectionKind::Bus, &lines), &mut stats);

    let numbers: Vec<i32> = buses.iter().map(|b| b.bus_number).collect();
    assert_eq!(numbers, vec![101, 103]);

    assert_eq!(stats.warnings.len(), 1);
    let warning = &stats.warnings[0];
    assert_eq!(warning.section, SectionKind::Bus);
    assert_eq!(warning.line_number, 2);
    assert_eq!(warning.reason, SkipReason::TooFewTokens);
    assert_eq!(warning.preview, "102 'B' 110.0 1");

    let section = stats.section(SectionKind::Bus);
    assert_eq!(section.rows_scanned, 3);
    assert_eq!(section.records_parsed, 2);
    assert_eq!(section.rows_skipped, 1);
}

#[test]
fn test_builder_ignores_blank_and_zero_prefixed_lines() {
    let lines = ["", "   ", "0 comment 1 2 3 4 5 6 7 8 9", "101 'A' 110.0 1 0 0 1 1 1.0 0.0"];
    let mut stats = ParseStats::new();
    let buses =
        RecordBuilder::new(&lines, 50).build_buses(&bounds(SectionKind::Bus, &lines), &mut stats);

    assert_eq!(buses.len(), 1);
    assert!(stats.warnings.is_empty());
    assert_eq!(stats.section(SectionKind::Bus).rows_scanned, 1);
}

#[test]
fn test_warning_preview_is_truncated() {
    let lines = ["9 'SHORT' 1 2 3"];
    let mut stats = ParseStats::new();
    RecordBuilder::new(&lines, 4).build_buses(&bounds(SectionKind::Bus, &lines), &mut stats);

    assert_eq!(stats.warnings[0].preview, "9 'S");
}

// =============================================================================
// Loads, generators, branches
// =============================================================================

#[test]
fn test_parse_load_record() {
    let load = parse_load_record(&tokenize_whitespace("102 'L1' 50.0 20.0 3")).unwrap();

    assert_eq!(load.bus_number, 102);
    assert_eq!(load.id, "L1");
    assert_eq!(load.active_power, 50.0);
    assert_eq!(load.reactive_power, 20.0);
    assert_eq!(load.load_type, "3");
    assert_eq!(load.voltage_dependence, 1);
    assert_eq!(load.description, "Load at bus 102");
}

#[test]
fn test_load_with_bad_power_is_rejected() {
    let err = parse_load_record(&tokenize_whitespace("102 1 fifty 20.0 1")).unwrap_err();
    assert!(matches!(err, Error::InvalidField { ref field, .. } if field == "active_power"));
}

#[test]
fn test_parse_generator_record() {
    let tokens =
        tokenize_whitespace("101 1 80.0 10.0 60.0 40.0 1.01 150.0 'Siemens SGen5 2000E'");
    let generator = parse_generator_record(&tokens).unwrap();

    assert_eq!(generator.bus_number, 101);
    assert_eq!(generator.id, "1");
    assert_eq!(generator.active_power, 80.0);
    assert_eq!(generator.reactive_power, 10.0);
    assert_eq!(generator.max_reactive_power, 60.0);
    assert_eq!(generator.min_reactive_power, -40.0);
    assert_eq!(generator.voltage_setpoint, 1.01);
    assert_eq!(generator.mva_base, 150.0);
    assert_eq!(generator.brand, "Siemens");
    assert_eq!(generator.model, "SGen5 2000E");
    assert_eq!(generator.inertia, 3.0);
    assert_eq!(generator.fuel_type, "Unknown");
    assert_eq!(generator.efficiency, 0.95);
    assert_eq!(generator.year_commissioned, 2000);
}

#[test]
fn test_generator_quoted_id_starts_description() {
    let tokens =
        tokenize_whitespace("101 '1' 80.0 10.0 60.0 40.0 1.01 150.0 'Siemens SGen5 2000E'");
    let generator = parse_generator_record(&tokens).unwrap();

    assert_eq!(generator.id, "1");
    assert_eq!(generator.brand, "1'");
    assert_eq!(generator.model, "80.0 10.0");
    assert_eq!(generator.active_power, 80.0);
}

#[test]
fn test_generator_without_description_has_empty_brand() {
    let tokens = tokenize_whitespace("101 1 80.0 10.0 60.0 40.0 1.01 150.0");
    let generator = parse_generator_record(&tokens).unwrap();

    assert!(generator.brand.is_empty());
    assert!(generator.model.is_empty());
}

#[test]
fn test_generator_needs_eight_tokens() {
    let tokens = tokenize_whitespace("101 1 80.0 10.0 60.0 40.0 1.01");
    assert!(matches!(
        parse_generator_record(&tokens),
        Err(Error::TooFewTokens { found: 7, .. })
    ));
}

#[test]
fn test_parse_branch_record() {
    let branch = parse_branch_record(&tokenize_whitespace("101 102 'C2' 0.01 0.1 0.02 200.0 1"))
        .unwrap();

    assert_eq!(branch.from_bus, 101);
    assert_eq!(branch.to_bus, 102);
    assert_eq!(branch.circuit_id, "C2");
    assert_eq!(branch.resistance, 0.01);
    assert_eq!(branch.reactance, 0.1);
    assert_eq!(branch.charging_susceptance, 0.02);
    assert_eq!(branch.mva_rating, 200.0);
    assert_eq!(branch.length_km, 1.0);
    assert_eq!(branch.conductor_type, "Unknown");
    assert_eq!(branch.year_installed, 2000);
}

#[test]
fn test_branch_keeps_bus_order() {
    let branch = parse_branch_record(&tokenize_whitespace("205 101 1 0 0 0 100 1")).unwrap();
    assert_eq!((branch.from_bus, branch.to_bus), (205, 101));
}

// =============================================================================
// Transformers
// =============================================================================

#[test]
fn test_parse_transformer_block() {
    let header = tokenize_whitespace("101 102 1 1 1 0.0 0.0 0");
    let impedance = tokenize_whitespace("0.005 0.08 60.0");
    let tap = tokenize_whitespace("1.025 110.0");
    let secondary = tokenize_whitespace("1 33.0 \"T1 main\"");

    let transformer = parse_transformer_block(&TransformerBlock {
        header: &header,
        impedance: &impedance,
        tap: &tap,
        secondary: &secondary,
    })
    .unwrap();

    assert_eq!(transformer.from_bus, 101);
    assert_eq!(transformer.to_bus, 102);
    assert_eq!(transformer.circuit_id, "1");
    assert_eq!(transformer.resistance, 0.005);
    assert_eq!(transformer.reactance, 0.08);
    assert_eq!(transformer.nominal_mva, 60.0);
    assert_eq!(transformer.tap_position, 1.025);
    assert_eq!(transformer.from_bus_voltage, 110.0);
    assert_eq!(transformer.to_bus_voltage, 33.0);
    assert_eq!(transformer.name, "T1");
    assert_eq!(transformer.winding_type, 2);
    assert_eq!(transformer.min_tap, 0.9);
    assert_eq!(transformer.max_tap, 1.1);
    assert_eq!(transformer.vector_group, "YNd11");
    assert_eq!(transformer.cooling_type, "ONAN");
    assert_eq!(transformer.model, "Standard");
}

#[test]
fn test_transformer_short_block_lines_use_defaults() {
    let header = tokenize_whitespace("7 8 1 1 1 0 0 0");
    let short = tokenize_whitespace("x");

    let transformer = parse_transformer_block(&TransformerBlock {
        header: &header,
        impedance: &short,
        tap: &short,
        secondary: &short,
    })
    .unwrap();

    assert_eq!(transformer.resistance, 0.0);
    assert_eq!(transformer.reactance, 0.0);
    assert_eq!(transformer.nominal_mva, 100.0);
    assert_eq!(transformer.tap_position, 1.0);
    assert_eq!(transformer.from_bus_voltage, 110.0);
    assert_eq!(transformer.to_bus_voltage, 33.0);
    assert_eq!(transformer.name, "TX_7_8");
}

#[test]
fn test_transformer_cursor_advances_past_malformed_block() {
    let lines = [
        "101 102 1 1 1 0 0 0",
        "bad 0.08 60.0",
        "1.0 110.0",
        "1 33.0",
        "201 202 1 1 1 0 0 0",
        "0.01 0.1 50.0",
        "1.0 220.0",
        "1 66.0",
    ];
    let mut stats = ParseStats::new();
    let transformers = RecordBuilder::new(&lines, 50)
        .build_transformers(&bounds(SectionKind::Transformer, &lines), &mut stats);

    // The second block is read from its own header, not from lines 2-4
    assert_eq!(transformers.len(), 1);
    assert_eq!(transformers[0].from_bus, 201);
    assert_eq!(transformers[0].to_bus_voltage, 66.0);

    assert_eq!(stats.warnings.len(), 1);
    assert_eq!(stats.warnings[0].line_number, 1);
    assert_eq!(stats.warnings[0].reason, SkipReason::InvalidField);

    let section = stats.section(SectionKind::Transformer);
    assert_eq!(section.rows_scanned, 2);
    assert_eq!(section.records_parsed, 1);
}

#[test]
fn test_transformer_short_header_advances_one_line() {
    let lines = [
        "short header",
        "301 302 1 1 1 0 0 0",
        "0.01 0.1 50.0",
        "1.0 220.0",
        "1 66.0",
    ];
    let mut stats = ParseStats::new();
    let transformers = RecordBuilder::new(&lines, 50)
        .build_transformers(&bounds(SectionKind::Transformer, &lines), &mut stats);

    assert_eq!(transformers.len(), 1);
    assert_eq!(transformers[0].from_bus, 301);
    assert_eq!(stats.warnings.len(), 1);
    assert_eq!(stats.warnings[0].reason, SkipReason::TooFewTokens);
}

#[test]
fn test_truncated_transformer_block_is_reported() {
    let lines = ["101 102 1 1 1 0 0 0", "0.01 0.1 50.0", "1.0 220.0"];
    let mut stats = ParseStats::new();
    let transformers = RecordBuilder::new(&lines, 50)
        .build_transformers(&bounds(SectionKind::Transformer, &lines), &mut stats);

    assert!(transformers.is_empty());
    assert_eq!(stats.warnings.len(), 1);
    assert_eq!(stats.warnings[0].reason, SkipReason::TruncatedRecord);
}
