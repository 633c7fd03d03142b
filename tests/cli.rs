use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn vislang() -> Command {
    Command::cargo_bin("vislang").expect("binary exists")
}

#[test]
fn vislang_reads_stdin_by_default() {
    vislang()
        .write_stdin("log \"hi\"\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Reference: log"))
        .stderr(predicate::str::contains("StringLit: hi"))
        .stderr(predicate::str::contains("InstructionEnd: \\n"))
        .stderr(predicate::str::ends_with("hi\n"));
}

#[test]
fn vislang_no_trace_leaves_only_log_output() {
    vislang()
        .arg("--no-trace")
        .write_stdin("log (3 + 4 * 2)\nlog * 6 7\n")
        .assert()
        .success()
        .stderr("14\n42\n");
}

#[test]
fn vislang_run_quickstart() {
    vislang()
        .args(["--no-trace", "run", "demos/quickstart.vl"])
        .assert()
        .success()
        .stderr("Hello from vislang!\n14\n42\n1000\n");
}

#[test]
fn vislang_run_script_from_temp_dir() {
    let dir = tempdir().expect("create temp dir");
    let script = dir.path().join("main.vl");
    fs::write(&script, "# greeting\nlog 'from a file'\n").expect("write script");

    vislang()
        .arg("run")
        .arg(&script)
        .arg("--no-trace")
        .assert()
        .success()
        .stderr("from a file\n");
}

#[test]
fn vislang_run_dash_reads_stdin() {
    vislang()
        .args(["--no-trace", "run", "-"])
        .write_stdin("log 5")
        .assert()
        .success()
        .stderr("5\n");
}

#[test]
fn vislang_eval_snippet() {
    vislang()
        .args(["--no-trace", "eval", "log ** 2 8"])
        .assert()
        .success()
        .stderr("256\n");
}

#[test]
fn vislang_tokens_prints_to_stdout() {
    vislang()
        .arg("tokens")
        .write_stdin("(1 + 2)")
        .assert()
        .success()
        .stdout("BlockStart: (\nNumberLit: 1\nArithmeticOperator: +\nNumberLit: 2\nBlockEnd: )\n")
        .stderr("");
}

#[test]
fn lex_failure_reports_line_and_fails() {
    vislang()
        .write_stdin("log 1\n@")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error on line 2: invalid character `@`",
        ));
}

#[test]
fn runtime_failure_also_fails() {
    vislang()
        .args(["--no-trace", "eval", "(1 + 2"])
        .assert()
        .failure()
        .code(1)
        .stderr("Runtime error: ran out of code\n");
}

#[test]
fn deep_nesting_fails_cleanly() {
    let source = format!("log {}1{}", "(".repeat(5000), ")".repeat(5000));
    vislang()
        .arg("--no-trace")
        .write_stdin(source)
        .assert()
        .failure()
        .code(1)
        .stderr("Runtime error: nesting too deep (line 1)\n");
}

#[test]
fn missing_script_is_an_io_error() {
    let dir = tempdir().expect("create temp dir");
    vislang()
        .arg("run")
        .arg(dir.path().join("missing.vl"))
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("I/O error:"));
}
