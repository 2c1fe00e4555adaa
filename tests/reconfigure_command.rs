#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `reconfigure` command.
//!
//! Each test builds a registry in a temporary directory, runs the command
//! through the same entry point as the binary, and inspects the output files
//! and the rewritten registry.

mod common;

use common::WorkspaceBuilder;
use rtk_cli::logging::ReportStatus;

// ---------------------------------------------------------------------------
// Concatenation order
// ---------------------------------------------------------------------------

/// Literal entries are read in list order; glob matches follow, sorted.
#[test]
fn literals_before_sorted_glob_matches() {
    let ws = WorkspaceBuilder::new()
        .with_file("in/A.txt", "A\n")
        .with_file("in/B.txt", "B\n")
        .with_file("in/g2.glob", "g2\n")
        .with_file("in/g1.glob", "g1\n")
        .with_registry(
            "configs:
- name: demo
  infiles:
    default: ['{root}/in/A.txt', '{root}/in/*.glob', '{root}/in/B.txt']
  outfile: '{root}/out/demo.conf'
  active_set: default
",
        )
        .build();

    ws.run_ok(&["reconfigure"]);

    assert_eq!(ws.read("out/demo.conf"), "A\nB\ng1\ng2\n");
}

/// Running twice without input changes produces identical output.
#[test]
fn reconfigure_is_idempotent() {
    let ws = WorkspaceBuilder::new()
        .with_file("in/a", "one\n")
        .with_file("in/b", "two\n")
        .with_registry(
            "configs:
- name: demo
  infiles:
    default: ['{root}/in/*']
  outfile: '{root}/demo.conf'
",
        )
        .build();

    ws.run_ok(&["r"]);
    let first = ws.read("demo.conf");
    ws.run_ok(&["r"]);
    assert_eq!(ws.read("demo.conf"), first);
    assert_eq!(first, "one\ntwo\n");
}

/// An entry that is neither a file nor a valid pattern is simply absent.
#[test]
fn unclosed_bracket_does_not_fail_the_run() {
    let ws = WorkspaceBuilder::new()
        .with_file("in.txt", "data\n")
        .with_registry(
            "configs:
- name: demo
  infiles:
    default: ['{root}/in.txt', '{root}/notes[1']
  outfile: '{root}/demo.conf'
",
        )
        .build();
    let before = ws.read(common::REGISTRY_FILE);

    let log = ws.run_ok(&["reconfigure"]);

    assert_eq!(ws.read("demo.conf"), "data\n");
    assert_eq!(log.reports()[0].status, ReportStatus::Written);
    assert_ne!(ws.read(common::REGISTRY_FILE), before);
}

// ---------------------------------------------------------------------------
// Skips leave outputs alone
// ---------------------------------------------------------------------------

/// A set whose inputs are all missing never truncates an existing outfile.
#[test]
fn empty_set_keeps_existing_outfile() {
    let ws = WorkspaceBuilder::new()
        .with_file("demo.conf", "hand-written\n")
        .with_registry(
            "configs:
- name: demo
  infiles:
    default: ['{root}/missing.txt', '{root}/nothing/*.conf']
  outfile: '{root}/demo.conf'
",
        )
        .build();

    let log = ws.run_ok(&["reconfigure"]);

    assert_eq!(ws.read("demo.conf"), "hand-written\n");
    assert_eq!(log.reports()[0].status, ReportStatus::Skipped);
}

/// One config's missing set does not stop the others.
#[test]
fn missing_set_skips_only_that_config() {
    let ws = WorkspaceBuilder::new()
        .with_file("in.txt", "data\n")
        .with_registry(
            "configs:
- name: broken
  infiles:
    default: ['{root}/in.txt']
  outfile: '{root}/broken.conf'
  active_set: laptop
- name: fine
  infiles:
    default: ['{root}/in.txt']
  outfile: '{root}/fine.conf'
",
        )
        .build();

    let log = ws.run_ok(&["reconfigure"]);

    assert!(!ws.path("broken.conf").exists());
    assert_eq!(ws.read("fine.conf"), "data\n");
    let statuses: Vec<_> = log.reports().iter().map(|t| t.status).collect();
    assert_eq!(statuses, [ReportStatus::Skipped, ReportStatus::Written]);
}

// ---------------------------------------------------------------------------
// Substitution
// ---------------------------------------------------------------------------

/// Placeholders are filled from the source document relative to the
/// registry's directory; unknown keys are left alone.
#[test]
fn substitution_from_registry_relative_source() {
    let ws = WorkspaceBuilder::new()
        .with_file("vars/values.yaml", "name: x\nsize: 11\n")
        .with_file("in.txt", "hello ${name} $size ${missing}\n")
        .with_registry(
            "substitution:
  default: false
  basepath: vars
  source: values.yaml
configs:
- name: substituted
  infiles:
    default: ['{root}/in.txt']
  outfile: '{root}/substituted.conf'
  substitute: true
- name: verbatim
  infiles:
    default: ['{root}/in.txt']
  outfile: '{root}/verbatim.conf'
",
        )
        .build();

    ws.run_ok(&["reconfigure"]);

    assert_eq!(ws.read("substituted.conf"), "hello x 11 ${missing}\n");
    assert_eq!(ws.read("verbatim.conf"), "hello ${name} $size ${missing}\n");
}

/// A missing substitution source fails the run before the registry is saved,
/// but every other config is still processed.
#[test]
fn missing_substitution_source_is_fatal() {
    let template = "substitution:
  default: true
  source: absent.yaml
configs:
- name: a
  infiles:
    default: ['{root}/in.txt']
  outfile: '{root}/a.conf'
";
    let ws = WorkspaceBuilder::new()
        .with_file("in.txt", "${x}\n")
        .with_registry(template)
        .build();
    let before = ws.read(common::REGISTRY_FILE);

    let (result, log) = ws.run(&["reconfigure"]);

    assert!(result.is_err());
    assert_eq!(log.failure_count(), 1);
    assert!(!ws.path("a.conf").exists());
    assert_eq!(ws.read(common::REGISTRY_FILE), before);
}

// ---------------------------------------------------------------------------
// Dry run and document handling
// ---------------------------------------------------------------------------

/// `--dry-run` reports instead of writing.
#[test]
fn dry_run_writes_nothing() {
    let ws = WorkspaceBuilder::new()
        .with_file("in.txt", "data\n")
        .with_registry(
            "configs:
- name: demo
  infiles:
    default: ['{root}/in.txt']
  outfile: '{root}/demo.conf'
",
        )
        .build();

    let log = ws.run_ok(&["--dry-run", "reconfigure"]);

    assert!(!ws.path("demo.conf").exists());
    assert_eq!(log.reports()[0].status, ReportStatus::DryRun);
}

/// A missing registry is fatal and nothing is created.
#[test]
fn missing_registry_is_fatal() {
    let ws = WorkspaceBuilder::new().build();
    let (result, _log) = ws.run(&["reconfigure"]);
    assert!(result.is_err());
    assert!(!ws.registry_path().exists());
}

/// A malformed registry is fatal and left untouched.
#[test]
fn malformed_registry_is_fatal() {
    let ws = WorkspaceBuilder::new()
        .with_registry("configs: [unterminated\n")
        .build();
    let (result, _log) = ws.run(&["reconfigure"]);
    assert!(result.is_err());
    assert_eq!(ws.read(common::REGISTRY_FILE), "configs: [unterminated\n");
}
