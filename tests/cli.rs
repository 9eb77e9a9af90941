//! End-to-end runs of the `tape-layout` binary.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::tempdir;

const ONE_TAPE: &str =
    r#"{ "tapes": [ { "tape_width": 8, "tape_pitch": 4, "part": "0805", "part_count": 1 } ] }"#;

const ONE_TAPE_SCRIPT: &str = "\
GRID mm 1;
LAYER 51;
RECT (0 0) (8 8);
LAYER 45;
CHANGE WIDTH 0;
CIRCLE (1.75 2) (2.5 2);
RECT (4.615 2.984) (5.885 5.016);
";

/// Runs the binary with an empty config file, feeding `stdin`.
fn run(dir: &Path, args: &[&str], stdin: &str) -> Output {
    let config = dir.join("config.json");
    std::fs::write(&config, "{}").expect("Failed to write config");

    let mut child = Command::new(env!("CARGO_BIN_EXE_tape-layout"))
        .arg("-c")
        .arg(&config)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn tape-layout");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for tape-layout")
}

#[test]
fn test_job_from_stdin_to_stdout() {
    let dir = tempdir().expect("Failed to create temp dir");

    for args in [&[][..], &["-"][..]] {
        let output = run(dir.path(), args, ONE_TAPE);
        assert!(output.status.success(), "args {args:?}");
        assert_eq!(String::from_utf8_lossy(&output.stdout), ONE_TAPE_SCRIPT);
    }
}

#[test]
fn test_job_file_to_output_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let job = dir.path().join("job.json");
    let out = dir.path().join("tape.scr");
    std::fs::write(&job, ONE_TAPE).expect("Failed to write job");

    let output = run(
        dir.path(),
        &[
            job.to_str().expect("utf-8 path"),
            "-o",
            out.to_str().expect("utf-8 path"),
        ],
        "",
    );

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let written = std::fs::read_to_string(&out).expect("Failed to read output");
    assert_eq!(written, ONE_TAPE_SCRIPT);
}

#[test]
fn test_invalid_job_writes_nothing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let out = dir.path().join("tape.scr");
    let job = r#"{ "tapes": [ { "tape_width": 8, "tape_pitch": 4, "part": "0805", "part_count": -1 } ] }"#;

    let output = run(
        dir.path(),
        &["-", "-o", out.to_str().expect("utf-8 path")],
        job,
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("part_count"));
    assert!(!out.exists());
}
