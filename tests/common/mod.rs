#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use result_printer::prelude::*;
use serde_json::Value;

pub struct CmdResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub log_path: PathBuf,
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis())
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_rprint"))
}

/// Run `rprint` with `args` and an isolated HOME, logging the exchange.
pub fn run_cli_case(case_name: &str, home: &Path, args: &[&str]) -> CmdResult {
    let root = std::env::temp_dir().join("rprint-test-logs");
    fs::create_dir_all(&root).expect("create temp test log dir");

    let log_path = root.join(format!("{}-{}.log", sanitize(case_name), now_millis()));
    let bin_path = bin_path();

    let output = Command::new(&bin_path)
        .args(args)
        .env("HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RPRINT_OUTPUT_FORMAT")
        .env_remove("RPRINT_LOG_ENABLED")
        .env("RUST_BACKTRACE", "1")
        .output()
        .expect("execute rprint command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    let mut log_content = String::new();
    log_content.push_str(&format!("case={case_name}\n"));
    log_content.push_str(&format!("bin={}\n", bin_path.display()));
    log_content.push_str(&format!("args={args:?}\n"));
    log_content.push_str(&format!("status={}\n", output.status));
    log_content.push_str("----- stdout -----\n");
    log_content.push_str(&stdout);
    log_content.push('\n');
    log_content.push_str("----- stderr -----\n");
    log_content.push_str(&stderr);
    log_content.push('\n');
    fs::write(&log_path, log_content).expect("write test log");

    CmdResult {
        status: output.status,
        stdout,
        stderr,
        log_path,
    }
}

// ──────────────────── fixtures ────────────────────

pub fn write_json(dir: &Path, name: &str, value: &Value) -> String {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).expect("serialize fixture"))
        .expect("write fixture");
    path.to_string_lossy().into_owned()
}

/// Two partially covered classes declared out of order, plus one
/// fully covered class that must not appear in the table.
pub fn two_class_report() -> CoverageReport {
    CoverageReport {
        nodes: vec![CoverageNode::Directory(DirectoryCoverage {
            name: "src".to_string(),
            children: vec![
                CoverageNode::File(FileCoverage {
                    path: "src/B.php".to_string(),
                    executable_lines: 10,
                    executed_lines: 5,
                    classes: vec![
                        ClassCoverage::new("B", vec![MethodCoverage::new("run", 10, 5)])
                            .in_namespace("App"),
                    ],
                    traits: Vec::new(),
                }),
                CoverageNode::File(FileCoverage {
                    path: "src/A.php".to_string(),
                    executable_lines: 7,
                    executed_lines: 5,
                    classes: vec![
                        ClassCoverage::new("A", vec![MethodCoverage::new("go", 3, 1)])
                            .in_namespace("App"),
                        ClassCoverage::new("Done", vec![MethodCoverage::new("ok", 4, 4)])
                            .in_namespace("App"),
                    ],
                    traits: Vec::new(),
                }),
            ],
        })],
    }
}

pub fn failing_transcript() -> RunTranscript {
    RunTranscript {
        events: vec![
            RunEvent::SuiteStarted(SuiteInfo {
                name: "all".to_string(),
                test_count: 3,
            }),
            RunEvent::TestEnded(TestOutcome::case("testA", TestStatus::Passed, 2)),
            RunEvent::TestFault {
                status: TestStatus::Failed,
            },
            RunEvent::TestEnded(TestOutcome::case("testB", TestStatus::Failed, 1)),
            RunEvent::TestEnded(TestOutcome::case("testC", TestStatus::Passed, 1)),
        ],
        result: Some(TestRunResult {
            tests: 3,
            failures: 1,
            assertions: 4,
            all_harmless: true,
            all_completely_implemented: true,
            none_skipped: true,
            elapsed: Duration::from_millis(1500),
            peak_memory_bytes: 2 * 1_048_576,
            ..TestRunResult::default()
        }),
        coverage: Some(two_class_report()),
        peak_memory_bytes: 0,
    }
}
