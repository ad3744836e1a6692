//! Integration tests for a full generator run over a source tree

use crate::integration::test_utils::*;
use tablegen::config::TableGenConfig;
use tablegen::error::{ExtractionError, RegionError, TableGenError};
use tablegen::generator::{RunMode, TableGen};

fn generate(workspace: &Workspace) -> tablegen::generator::RunReport {
    TableGen::new(workspace.path(), TableGenConfig::default())
        .run(RunMode::Write)
        .unwrap()
}

#[test]
fn test_generate_writes_every_region() {
    let workspace = Workspace::new();
    let report = generate(&workspace);

    assert_eq!(report.records, 6);
    assert_eq!(
        report.tasks.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        vec!["IdEnum", "NameTable", "EncodingTable"]
    );
    assert!(report.tasks.iter().all(|t| t.changed > 0));
    assert_eq!(report.written_files.len(), 4);
    assert!(!report
        .written_files
        .iter()
        .any(|p| p.ends_with("a64emitter.h")));

    let globals = workspace.read(GLOBALS_H);
    assert!(globals.contains(
        "    // ------------------- Automatically generated, do not edit -------------------\n    kIdNone = 0,\n    kIdAdc,\n"
    ));
    assert!(globals.contains("    kIdNop,\n    _kIdCount\n"));

    let private = workspace.read(INSTDB_P_H);
    assert!(private.contains(
        "enum EncodingId : uint32_t {\n  kEncodingNone = 0,\n  kEncodingBaseAddSub,\n  kEncodingBaseOp,\n  kEncodingBaseRRR,\n  kEncodingSimdLdNStruct\n};\n"
    ));
    assert!(private.contains(
        "extern const BaseAddSub baseAddSub[2];\nextern const BaseRRR baseRRR[1];\nextern const SimdLdNStruct simdLdNStruct[1];\n"
    ));
    assert!(!private.contains("baseOp["));

    let source = workspace.read(INSTDB_CPP);
    assert!(source.contains(
        "const BaseAddSub baseAddSub[2] = {\n  { 0b0001011000, 0b0001000100, 0b0001011001 }, // add\n  { 0b0101011000, 0b0101000100, 0b0101011001 }  // adds\n};\n"
    ));
    assert!(source.contains("  \"\\0\" \"adc\\0\" \"add\\0\" \"adds\\0\" \"ld1\\0\" \"nop\";\n"));

    let header = workspace.read(INSTDB_H);
    assert!(header.contains("enum : uint32_t { kMaxNameSize = 4 };\n"));
}

#[test]
fn test_instruction_rows_carry_resolved_indices() {
    let workspace = Workspace::new();
    let report = generate(&workspace);
    assert_eq!(report.moved, 5);

    let source = workspace.read(INSTDB_CPP);
    let rows: Vec<_> = source
        .lines()
        .filter(|l| l.trim_start().starts_with("INST("))
        .collect();
    assert_eq!(rows.len(), 6);
    assert!(rows[0].ends_with(", 0  , 0   ), // #0"));
    assert!(rows[3].starts_with("  INST(Adds             , BaseAddSub         , (0b0101011000"));
    assert!(rows[3].ends_with(", 1  , 9   ), // #3"));
    assert!(rows[4].ends_with(", 0  , 14  ), // #4"));
    assert!(rows[5].ends_with(", 0  , 18  )  // #5"));
}

#[test]
fn test_table_sizes_reported() {
    let workspace = Workspace::new();
    let report = generate(&workspace);

    let sizes: Vec<_> = report
        .table_sizes
        .iter()
        .map(|t| (t.region.as_str(), t.bytes))
        .collect();
    assert_eq!(sizes, vec![("NameData", 22 + 26 * 4), ("InstInfo", 6 * 4)]);
    assert_eq!(report.total_table_size, 22 + 26 * 4 + 6 * 4);
}

#[test]
fn test_isa_description_annotates_ids() {
    let workspace = Workspace::new();
    workspace.write("isa.toml", ISA_TOML);

    let mut config = TableGenConfig::default();
    config.isa.path = Some("isa.toml".into());
    config.isa.mode = Some("A64".to_string());
    TableGen::new(workspace.path(), config)
        .run(RunMode::Write)
        .unwrap();

    let globals = workspace.read(GLOBALS_H);
    assert!(globals.contains(&format!(
        "    {:<37}//!< [--- --- A64] {{BASE}}\n",
        "kIdAdc,"
    )));
    assert!(globals.contains(&format!(
        "    {:<37}//!< [--- --- A64] {{ASIMD}}\n",
        "kIdLd1_v,"
    )));
    // `add` is only described for A32, filtered out by the mode.
    assert!(globals.contains("    kIdAdd,\n"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let workspace = Workspace::new();
    let before = workspace.snapshot();

    let report = TableGen::new(workspace.path(), TableGenConfig::default())
        .run(RunMode::DryRun)
        .unwrap();

    assert_eq!(report.modified_files.len(), 4);
    assert!(report.written_files.is_empty());
    assert_eq!(workspace.snapshot(), before);
}

#[test]
fn test_check_mode_detects_stale_then_passes() {
    let workspace = Workspace::new();
    let generator = TableGen::new(workspace.path(), TableGenConfig::default());

    match generator.run(RunMode::Check).unwrap_err() {
        TableGenError::Stale(paths) => assert_eq!(paths.len(), 4),
        other => panic!("unexpected error {:?}", other),
    }

    generator.run(RunMode::Write).unwrap();
    let report = generator.run(RunMode::Check).unwrap();
    assert!(report.modified_files.is_empty());
}

#[test]
fn test_missing_region_aborts_without_writing() {
    let workspace = Workspace::new();
    workspace.write(INSTDB_H, "namespace InstDB {}\n");
    let before = workspace.snapshot();

    let err = TableGen::new(workspace.path(), TableGenConfig::default())
        .run(RunMode::Write)
        .unwrap_err();

    assert!(matches!(
        err,
        TableGenError::Region(RegionError::NotFound { ref region }) if region == "NameLimits"
    ));
    assert_eq!(workspace.snapshot(), before);
}

#[test]
fn test_malformed_database_aborts_without_writing() {
    let workspace = Workspace::with_database(
        "  INST(None, None, (_), 0, 0, 0, 0),\n  INST(Adc, BaseRRR, 0b0001, kRWI_W, 0, 0, 0)\n",
    );
    let before = workspace.snapshot();

    let err = TableGen::new(workspace.path(), TableGenConfig::default())
        .run(RunMode::Write)
        .unwrap_err();

    assert!(matches!(
        err,
        TableGenError::Extraction(ExtractionError::Malformed { .. })
    ));
    assert_eq!(workspace.snapshot(), before);
}

#[test]
fn test_missing_source_file_is_io_error() {
    let workspace = Workspace::new();
    std::fs::remove_file(workspace.path().join(EMITTER_H)).unwrap();

    let err = TableGen::new(workspace.path(), TableGenConfig::default())
        .run(RunMode::Write)
        .unwrap_err();
    assert!(matches!(err, TableGenError::Io { .. }));
}
