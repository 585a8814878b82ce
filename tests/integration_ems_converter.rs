//! Integration tests for the EMS converter
//!
//! These tests drive a full conversion through temporary directories and
//! check the files written for a small but complete EMS export.

use ems_converter::app::services::converter::{Converter, OutputLayout};
use ems_converter::app::services::ems_parser::SectionKind;
use ems_converter::{ConverterConfig, EmsParser, Error};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const GRID_EXPORT: &str = "SYS / Coastal Grid / 2019 case
BASEFREQ 50.0
comment
1001 'NORTH 220' 220.0 3 0 0 1 1 1.04 0.0 1 1
1002 'SOUTH 66' 66.0 1 0 0 1 2 0.99 -4.2 1 1
1003 'EAST' 66.0 1 0 0 2 2 1.01 -3.1 1 1
1004 'BROKEN' 66.0
0 / End of Bus Data
1002 1 40.0 12.0 1
1003 1 25.5 8.0 1
0 / End of Load Data
1001 1 120.0 30.0 80.0 60.0 1.04 200.0 'GE 7HA 01'
0 / End of Generator Data
1002 1003 1 0.02 0.12 0.01 90.0 1
1002 1003 2 0.02 0.12 0.01 90.0 1
0 / End of Branch Data
1001 1002 1 1 1 0.0 0.0 0
0.002 0.1 250.0
1.0 220.0
1 66.0 'T-NS'
0 / End of Transformer Data
";

/// Write the export into a temp directory and return its path
fn write_export(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Full conversion with default configuration and file names
///
/// Purpose: Validate parsing and all three writers together
/// Benefit: Catches mismatches between parsed model and output layout
#[test]
fn test_full_conversion_writes_all_outputs() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_export(temp_dir.path(), "coastal.txt", GRID_EXPORT);
    let output_dir = temp_dir.path().join("output");

    let layout = OutputLayout::for_input(&input, &output_dir);
    let outputs = Converter::new(ConverterConfig::default())
        .convert(&input, &layout)
        .unwrap();

    let raw_file = outputs.raw_file.clone().unwrap();
    assert_eq!(raw_file, output_dir.join("coastal_powerfactory.raw"));
    let raw = fs::read_to_string(&raw_file).unwrap();
    assert!(raw.starts_with("0, 50.0, 30 / PowerFactory RAW File\nConverted from coastal.txt on "));
    assert!(raw.contains("1001, 'NORTH 220', 220.00, 3, 1.0400, 0.000, 1, 1, 1.100, 0.900\n"));
    assert!(raw.contains("1003, 'EAST', 66.00, 1, 1.0100, -3.100, 2, 2, 1.100, 0.900\n"));
    assert!(!raw.contains("BROKEN"));
    assert!(raw.contains("1001, 1002, '1', 2, 1, 0.002000, 0.100000, 250.00\n"));
    assert!(raw.ends_with("0 / End of Transformer Data\n"));

    let metadata_file = outputs.metadata_file.clone().unwrap();
    let metadata: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&metadata_file).unwrap()).unwrap();
    assert_eq!(metadata["conversion_info"]["description"], "Coastal Grid");
    assert_eq!(metadata["statistics"]["total_buses"], 3);
    assert_eq!(metadata["statistics"]["total_branches"], 2);
    assert_eq!(
        metadata["statistics"]["voltage_levels"],
        serde_json::json!([66.0, 220.0])
    );
    assert_eq!(metadata["statistics"]["total_load_demand_mw"], 65.5);
    assert_eq!(metadata["brand_data"]["generators"]["GE"]["model"], "7HA 01");
    assert_eq!(
        metadata["brand_data"]["transformers"]["TX_1001_1002"]["voltage_ratio"],
        "220.0/66.0kV"
    );

    let report_dir = outputs.report_dir.clone().unwrap();
    assert_eq!(report_dir, output_dir.join("coastal_report"));
    for sheet in [
        "buses.csv",
        "loads.csv",
        "generators.csv",
        "branches.csv",
        "transformers.csv",
        "system_summary.csv",
    ] {
        assert!(report_dir.join(sheet).exists(), "missing {}", sheet);
    }
    assert_eq!(outputs.report_files.len(), 6);

    let warnings = &outputs.parsed.stats.warnings;
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].section, SectionKind::Bus);
    assert_eq!(warnings[0].line_number, 7);
}

/// Custom output names from the command line land in the output directory
#[test]
fn test_custom_output_names() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_export(temp_dir.path(), "coastal.txt", GRID_EXPORT);
    let output_dir = temp_dir.path().join("custom");

    let layout = OutputLayout::for_input(&input, &output_dir)
        .with_raw_file("grid.raw")
        .with_metadata_file("grid.json")
        .with_report_dir("tables");
    let outputs = Converter::new(ConverterConfig::default())
        .convert(&input, &layout)
        .unwrap();

    assert_eq!(outputs.raw_file, Some(output_dir.join("grid.raw")));
    assert!(output_dir.join("grid.raw").exists());
    assert!(output_dir.join("grid.json").exists());
    assert!(output_dir.join("tables").join("system_summary.csv").exists());
}

/// Re-running a conversion overwrites previous outputs
#[test]
fn test_conversion_overwrites_existing_outputs() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_export(temp_dir.path(), "coastal.txt", GRID_EXPORT);
    let layout = OutputLayout::for_input(&input, temp_dir.path().join("output"));
    let converter = Converter::new(ConverterConfig::default().with_outputs(true, false, false));

    fs::create_dir_all(&layout.output_dir).unwrap();
    fs::write(&layout.raw_file, "stale").unwrap();

    converter.convert(&input, &layout).unwrap();
    let raw = fs::read_to_string(&layout.raw_file).unwrap();
    assert!(raw.starts_with("0, 50.0"));
}

/// A nonexistent input is the only fatal input condition
#[test]
fn test_missing_input_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("absent.txt");

    let result = Converter::new(ConverterConfig::default())
        .convert(&input, &OutputLayout::for_input(&input, temp_dir.path()));

    match result {
        Err(Error::InputNotFound { path }) => assert!(path.ends_with("absent.txt")),
        other => panic!("expected InputNotFound, got {:?}", other.map(|_| ())),
    }
}

/// Garbage input still produces a well-formed empty model
#[test]
fn test_unstructured_input_yields_empty_model() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_export(
        temp_dir.path(),
        "noise.txt",
        "random text\nwith no sections\n12 34\nmore words here and there\n",
    );

    let result = EmsParser::default().parse_file(&input).unwrap();

    assert_eq!(result.model.record_count(), 0);
    assert_eq!(result.stats.missing_terminators.len(), 5);
    assert_eq!(result.model.statistics().total_buses, 0);
    assert!(result.model.statistics().voltage_levels.is_empty());
}
