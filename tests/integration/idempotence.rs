//! Integration tests for regeneration stability

use crate::integration::test_utils::*;
use tablegen::config::TableGenConfig;
use tablegen::generator::{RunMode, TableGen};

/// A second run over the first run's output changes nothing
#[test]
fn test_second_run_is_byte_identical() {
    let workspace = Workspace::new();
    let generator = TableGen::new(workspace.path(), TableGenConfig::default());

    generator.run(RunMode::Write).unwrap();
    let first = workspace.snapshot();

    let report = generator.run(RunMode::Write).unwrap();
    assert_eq!(workspace.snapshot(), first);
    assert!(report.written_files.is_empty());
    assert!(report.modified_files.is_empty());
    assert_eq!(report.total_changed(), 0);
    assert_eq!(report.moved, 0);
}

/// Generated rows survive a hand edit elsewhere in the database
#[test]
fn test_new_instruction_only_moves_affected_rows() {
    let workspace = Workspace::new();
    let generator = TableGen::new(workspace.path(), TableGenConfig::default());
    generator.run(RunMode::Write).unwrap();

    let source = workspace.read(INSTDB_CPP);
    let edited = source.replacen(
        "  INST(Nop ",
        "  INST(Mov, BaseRRR, (0b0010101000000000000000, kWX, kZR, 0), kRWI_W, 0, 0, 0),\n  INST(Nop ",
        1,
    );
    assert_ne!(edited, source);
    workspace.write(INSTDB_CPP, &edited);

    let report = generator.run(RunMode::Write).unwrap();
    assert_eq!(report.records, 7);
    // Mov itself plus Nop, whose name offset shifts behind "mov".
    assert_eq!(report.moved, 2);

    let settled = workspace.snapshot();
    let report = generator.run(RunMode::Write).unwrap();
    assert_eq!(report.total_changed(), 0);
    assert_eq!(workspace.snapshot(), settled);
}

/// Regions survive being reindented by hand
#[test]
fn test_reindented_region_is_rewritten_with_marker_indent() {
    let workspace = Workspace::new();
    let generator = TableGen::new(workspace.path(), TableGenConfig::default());
    generator.run(RunMode::Write).unwrap();

    let globals = workspace.read(GLOBALS_H);
    workspace.write(GLOBALS_H, &globals.replace("    kIdAdc,", "kIdAdc,"));

    let report = generator.run(RunMode::Write).unwrap();
    assert_eq!(report.written_files.len(), 1);
    assert_eq!(workspace.read(GLOBALS_H), globals);
}
