use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn lints_schema() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("treeval")?;

    cmd.arg("lint")
        .arg("--schema")
        .arg("tests/fixtures/user_schema.yml");
    cmd.assert().success().stdout(predicate::str::is_empty());

    Ok(())
}

#[test]
fn lints_incorrect_schema() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("treeval")?;

    cmd.arg("lint")
        .arg("--schema")
        .arg("tests/fixtures/invalid_schema.yml");
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("/fields/name"))
        .stdout(predicate::str::contains(
            "Additional properties are not allowed ('colour' was unexpected)",
        ));

    Ok(())
}

#[test]
fn lints_bad_pattern() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("treeval")?;

    cmd.arg("lint")
        .arg("--schema")
        .arg("tests/fixtures/bad_pattern_schema.yml");
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("/fields/code/rules/0"))
        .stdout(predicate::str::contains("invalid pattern"));

    Ok(())
}

#[test]
fn schema_file_doesnt_exist() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("treeval")?;

    cmd.arg("lint").arg("--schema").arg("test/file/doesnt/exist");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No such file or directory"));

    Ok(())
}

#[test]
fn checks_valid_yaml_document() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("treeval")?;

    cmd.arg("check")
        .arg("--schema")
        .arg("tests/fixtures/user_schema.yml")
        .arg("--file")
        .arg("tests/fixtures/valid_user.yml");
    cmd.assert().success().stdout(predicate::str::is_empty());

    Ok(())
}

#[test]
fn checks_valid_json_document() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("treeval")?;

    cmd.arg("check")
        .arg("--schema")
        .arg("tests/fixtures/user_schema.yml")
        .arg("--file")
        .arg("tests/fixtures/valid_user.json");
    cmd.assert().success();

    Ok(())
}

#[test]
fn checks_document_from_stdin() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = assert_cmd::Command::cargo_bin("treeval")?;

    cmd.arg("check")
        .arg("--schema")
        .arg("tests/fixtures/user_schema.yml")
        .arg("--format")
        .arg("flat")
        .write_stdin("name: Bo\nemail: bo@example.com\n");
    cmd.assert().success();

    let mut cmd = assert_cmd::Command::cargo_bin("treeval")?;
    cmd.arg("check")
        .arg("--schema")
        .arg("tests/fixtures/user_schema.yml")
        .arg("--format")
        .arg("flat")
        .write_stdin("name: Bo\n");
    cmd.assert()
        .failure()
        .stdout(predicate::eq("$.email: required\n"));

    Ok(())
}

#[test]
fn reports_grouped_errors() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("treeval")?;

    cmd.arg("check")
        .arg("--schema")
        .arg("tests/fixtures/user_schema.yml")
        .arg("--file")
        .arg("tests/fixtures/invalid_user.yml");
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("unexpected field nickname"))
        .stdout(predicate::str::contains("$.tags[1]"))
        .stdout(predicate::str::contains(
            r#"invalid option: "owner", expected one of ["admin","editor","viewer"]"#,
        ));

    Ok(())
}

#[test]
fn reports_flat_errors_in_visiting_order() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("treeval")?;

    cmd.arg("check")
        .arg("--schema")
        .arg("tests/fixtures/user_schema.yml")
        .arg("--file")
        .arg("tests/fixtures/invalid_user.yml")
        .arg("--format")
        .arg("flat");
    cmd.assert().failure().stdout(predicate::eq(concat!(
        "$.email: required\n",
        "$.name: expected at least 2 characters\n",
        "$.role: invalid option: \"owner\", expected one of [\"admin\",\"editor\",\"viewer\"]\n",
        "$.score: expected precision 2, actual precision 3\n",
        "$.tags[0]: \"Math\" is not lower cased\n",
        "$.tags[1]: not a string\n",
        "$: unexpected field nickname\n",
    )));

    Ok(())
}

#[test]
fn reports_detailed_messages() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("treeval")?;

    cmd.arg("check")
        .arg("--schema")
        .arg("tests/fixtures/user_schema.yml")
        .arg("--file")
        .arg("tests/fixtures/invalid_user.yml")
        .arg("--format")
        .arg("flat")
        .arg("--messages")
        .arg("detailed");
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("$.email: this field is required\n"));

    Ok(())
}

#[test]
fn reports_json_records() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("treeval")?;

    let output = cmd
        .arg("check")
        .arg("--schema")
        .arg("tests/fixtures/user_schema.yml")
        .arg("--file")
        .arg("tests/fixtures/invalid_user.yml")
        .arg("--format")
        .arg("json")
        .output()?;

    assert!(!output.status.success());
    let records: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let records = records.as_array().expect("a list of records");
    assert_eq!(records.len(), 7);
    assert_eq!(records[0]["path"], "$.email");
    assert_eq!(records[0]["kind"], "RequiredError");

    Ok(())
}

#[test]
fn check_refuses_invalid_schema() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("treeval")?;

    cmd.arg("check")
        .arg("--schema")
        .arg("tests/fixtures/invalid_schema.yml")
        .arg("--file")
        .arg("tests/fixtures/valid_user.yml");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid schema definition"));

    Ok(())
}

#[test]
fn shows_schema_outline() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("treeval")?;

    cmd.arg("show")
        .arg("--schema")
        .arg("tests/fixtures/user_schema.yml");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("map, required, no extra fields"))
        .stdout(predicate::str::contains("- one_of \"admin\", \"editor\", \"viewer\""))
        .stdout(predicate::str::contains("- precision 2"));

    Ok(())
}
