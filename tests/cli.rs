mod common;

use assert_cmd::Command;
use common::{StubServer, MILK_BODY};
use predicates::prelude::*;
use tempfile::TempDir;

fn pricecmp(server: &StubServer, config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pricecmp").unwrap();
    cmd.env("PRICECMP_BASE_URL", &server.base_url)
        .env("PRICECMP_CONFIG_DIR", config_dir.path())
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

fn row_index(output: &str, name: &str) -> usize {
    output
        .lines()
        .position(|line| line.starts_with(name))
        .unwrap_or_else(|| panic!("no row for {} in\n{}", name, output))
}

#[test]
fn list_sorts_by_price_by_default() {
    let server = StubServer::fixed(200, MILK_BODY);
    let dir = tempfile::tempdir().unwrap();

    let output = stdout_of(pricecmp(&server, &dir).arg("list"));

    assert!(output.contains("Price ↑"));
    assert!(row_index(&output, "Milk 1L") < row_index(&output, "Lite Milk 2L"));
    assert!(row_index(&output, "Lite Milk 2L") < row_index(&output, "Milk 2L"));
    assert!(output.contains("Showing 3 results"));
    assert_eq!(server.next_request().path, "/api/v1/price/all/milk");
}

#[test]
fn list_is_the_default_command() {
    let server = StubServer::fixed(200, MILK_BODY);
    let dir = tempfile::tempdir().unwrap();

    pricecmp(&server, &dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 3 results"));
}

#[test]
fn list_applies_filters_and_sort_flags() {
    let server = StubServer::fixed(200, MILK_BODY);
    let dir = tempfile::tempdir().unwrap();

    pricecmp(&server, &dir)
        .args(["list", "--store", "Coles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1 results"))
        .stdout(predicate::str::contains("store: Coles"))
        .stdout(predicate::str::contains("Dairy Farmers").not());

    let output = stdout_of(pricecmp(&server, &dir).args(["list", "--sort", "name", "--desc"]));
    assert!(output.contains("Name ↓"));
    assert!(row_index(&output, "Milk 2L") < row_index(&output, "Milk 1L"));
    assert!(row_index(&output, "Milk 1L") < row_index(&output, "Lite Milk 2L"));
}

#[test]
fn list_search_is_sent_to_the_backend() {
    let server = StubServer::fixed(200, MILK_BODY);
    let dir = tempfile::tempdir().unwrap();

    pricecmp(&server, &dir)
        .args(["list", "-s", "lite milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1 results"));

    assert_eq!(server.next_request().path, "/api/v1/price/all/lite%20milk");
}

#[test]
fn no_matches_prints_the_placeholder() {
    let server = StubServer::fixed(200, MILK_BODY);
    let dir = tempfile::tempdir().unwrap();

    pricecmp(&server, &dir)
        .args(["list", "--brand", "Nope"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No products found matching your filters.",
        ))
        .stdout(predicate::str::contains("Showing 0 results"));
}

#[test]
fn backend_failure_exits_non_zero() {
    let server = StubServer::fixed(500, "boom");
    let dir = tempfile::tempdir().unwrap();

    pricecmp(&server, &dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not load prices for 'milk'"))
        .stderr(predicate::str::contains("500"));
}

#[test]
fn base_url_flag_beats_the_environment() {
    let good = StubServer::fixed(200, MILK_BODY);
    let bad = StubServer::fixed(500, "boom");
    let dir = tempfile::tempdir().unwrap();

    pricecmp(&bad, &dir)
        .args(["--base-url", &good.base_url, "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 3 results"));
}

#[test]
fn options_lists_distinct_values() {
    let server = StubServer::fixed(200, MILK_BODY);
    let dir = tempfile::tempdir().unwrap();

    pricecmp(&server, &dir)
        .arg("options")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Stores\n  Aldi\n  Coles\n  Woolworths\n",
        ))
        .stdout(predicate::str::contains("Sizes\n  1L\n  2L\n"));
}

#[test]
fn config_round_trips_through_the_config_dir() {
    let server = StubServer::fixed(200, MILK_BODY);
    let dir = tempfile::tempdir().unwrap();

    pricecmp(&server, &dir)
        .args(["config", "default-search", "bread"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default-search set to bread"));

    pricecmp(&server, &dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("default-search = bread"))
        .stdout(predicate::str::contains("timeout-secs = 30"));

    // The stored seed term is now what gets fetched
    pricecmp(&server, &dir).arg("list").assert().success();
    assert_eq!(server.next_request().path, "/api/v1/price/all/bread");
}

#[test]
fn config_rejects_bad_values() {
    let server = StubServer::fixed(200, MILK_BODY);
    let dir = tempfile::tempdir().unwrap();

    pricecmp(&server, &dir)
        .args(["config", "base-url", "ftp://example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported scheme"));

    pricecmp(&server, &dir)
        .args(["config", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: colour"));

    pricecmp(&server, &dir)
        .args(["config", "timeout-secs", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout-secs must be at least 1"));
}

#[test]
fn zero_timeout_in_the_config_file_fails_before_fetching() {
    let server = StubServer::fixed(200, MILK_BODY);
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.json"), r#"{"timeout_secs": 0}"#).unwrap();

    pricecmp(&server, &dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout-secs must be at least 1"));
    assert!(server.try_next_request().is_none());
}

#[test]
fn shell_reads_commands_from_stdin() {
    let server = StubServer::fixed(200, MILK_BODY);
    let dir = tempfile::tempdir().unwrap();

    let output = stdout_of(
        pricecmp(&server, &dir)
            .arg("shell")
            .write_stdin("store Aldi\nsort name\nclear\nbogus\nquit\n"),
    );

    assert!(output.starts_with("Loading prices…\n"));
    assert!(output.contains("Loaded 3 prices for 'milk'"));
    assert!(output.contains("store: Aldi"));
    assert!(output.contains("Showing 1 results"));
    assert!(output.contains("Name ↑"));
    assert!(output.contains("type 'help' for commands"));
    // Only the initial fetch hit the network
    server.next_request();
    assert!(server.try_next_request().is_none());
}
