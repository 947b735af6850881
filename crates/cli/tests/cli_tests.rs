use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("rest-api").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("User CRUD REST service"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("rest-api").unwrap();
    cmd.arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("port"))
        .stdout(predicate::str::contains("storage"));
}

#[test]
fn test_cli_rejects_unknown_storage() {
    let mut cmd = Command::cargo_bin("rest-api").unwrap();
    cmd.args(["serve", "--storage", "sqlite"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_cli_exits_nonzero_when_store_unreachable() {
    let mut cmd = Command::cargo_bin("rest-api").unwrap();
    cmd.args(["serve", "--port", "0"])
        .env("REST_API_MONGODB_HOST", "")
        .env("REST_API_CONNECT_ATTEMPTS", "1")
        .env("REST_API_CONNECT_DELAY_SECS", "0")
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .failure();
}
