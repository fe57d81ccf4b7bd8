//! Runs the binary end to end over stdin/stdout.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const HEADER: &str = "time,addr,zip,name,foo,bar,total,notes";

#[allow(deprecated)]
fn normalizer() -> Command {
    Command::cargo_bin("csv-normalizer").unwrap()
}

/// Matches raw stderr bytes, which may not be valid UTF-8.
fn contains_bytes(expected: &'static [u8]) -> impl Predicate<[u8]> {
    predicate::function(move |out: &[u8]| out.windows(expected.len()).any(|w| w == expected))
}

#[test]
fn test_stdin_to_stdout() {
    let input = format!(
        "{}\n1/2/23 1:02:03 PM,123 St,1234,jane doe,0:01:00,0:02:00,,hello\n",
        HEADER
    );

    normalizer()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(format!(
            "{}\n2023-01-02T16:02:03,123 St,0,JANE DOE,60,120,180,hello",
            HEADER
        ));
}

#[test]
fn test_malformed_row_warning_on_stderr() {
    let mut input = format!("{}\n", HEADER).into_bytes();
    input.extend_from_slice(b"1/2/23 1:02:03 PM,bad");
    input.push(0xff);
    input.extend_from_slice(b",12345,x,0:0:1,0:0:1,,\n");

    normalizer()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(HEADER)
        .stderr(contains_bytes(
            b"Warning: Malformed string, dropping row 2: bad\xff\n",
        ));
}

#[test]
fn test_invalid_header_exits_without_output() {
    let mut input = vec![b'h', 0xff];
    input.extend_from_slice(b"\n1/2/23 1:02:03 PM,s,12345,x,0:0:1,0:0:1,,\n");

    normalizer()
        .write_stdin(input)
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Malformed string"));
}

#[test]
fn test_unparseable_timestamp_is_fatal_by_default() {
    let input = format!("{}\nnoon,s,12345,x,0:0:1,0:0:1,,\n", HEADER);

    normalizer()
        .write_stdin(input)
        .assert()
        .code(1)
        .stdout("");
}

#[test]
fn test_skip_flag_drops_unparseable_rows() {
    let input = format!(
        "{}\nnoon,s,12345,x,0:0:1,0:0:1,,\n1/2/23 1:02:03 PM,t,12345,y,0:0:1,0:0:1,,\n",
        HEADER
    );

    normalizer()
        .args(["--on-parse-error", "skip"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("2023-01-02T16:02:03,t,12345,Y,1,1,2,"))
        .stderr(predicate::str::contains(
            "Warning: Unparseable timestamp, dropping row 2: noon",
        ));
}

#[test]
fn test_file_input_and_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(
        &input,
        format!("{}\n1/2/23 1:02:03 PM,s,12345,x,0:0:1,0:0:1,,\n", HEADER),
    )
    .unwrap();

    normalizer()
        .args([
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("");

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.starts_with(HEADER));
    assert!(content.ends_with("2023-01-02T16:02:03,s,12345,X,1,1,2,"));
}

#[test]
fn test_bad_config_file_fails() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("normalizer.toml");
    std::fs::write(&config, "[transform]\nshift_hours = \"three\"\n").unwrap();

    normalizer()
        .args(["--config", config.to_str().unwrap()])
        .write_stdin(HEADER)
        .assert()
        .failure()
        .stdout("");
}
