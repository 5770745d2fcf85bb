use assert_cmd::Command;
use predicates::str::contains;

fn cmd() -> Command {
    Command::cargo_bin("portfolio").unwrap()
}

#[test]
fn help_lists_modes_and_admin() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--headless"))
        .stdout(contains("--api-base"))
        .stdout(contains("admin"));
}

#[test]
fn update_repo_requires_a_name() {
    cmd()
        .args(["admin", "update-repo"])
        .assert()
        .failure()
        .stderr(contains("<NAME>"));
}

#[test]
fn invalid_repo_name_is_rejected_before_any_request() {
    cmd()
        .args(["--api-base", "http://127.0.0.1:9", "admin", "update-repo", "owner/radar"])
        .assert()
        .failure()
        .stderr(contains("not a single path segment"));
}

#[test]
fn bad_timeout_is_reported() {
    cmd()
        .arg("--headless")
        .env("PORTFOLIO_API_TIMEOUT_SECS", "soon")
        .assert()
        .failure()
        .stderr(contains("PORTFOLIO_API_TIMEOUT_SECS"));
}
