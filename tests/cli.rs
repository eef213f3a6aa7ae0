use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

const BATTERY: &str = "Battery,AA,1.5,3.10";
const LED: &str = "LED Light,red,3.0,20,0.50";

fn kitstock(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kitstock").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("KITSTOCK_HOME")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

#[test]
fn test_empty_store_lists_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();

    kitstock(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No components in stock."));

    assert!(temp_dir.path().join("components.csv").exists());
}

#[test]
fn test_buy_pack_sell_unpack_cycle() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();

    kitstock(dir).args(["buy", BATTERY, "2"]).assert().success();
    kitstock(dir).args(["buy", LED, "6"]).assert().success();

    kitstock(dir)
        .args(["pack", "Light Circuit", "2"])
        .args(["--item", &format!("1:{}", BATTERY)])
        .args(["--item", &format!("2:{}", LED)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Packed 2 x Light Circuit"))
        .stdout(predicate::str::contains("4.10"));

    kitstock(dir)
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("LED Light"))
        .stdout(predicate::str::contains("Battery").not());

    kitstock(dir)
        .args(["sell-kit", "Light Circuit", "1"])
        .assert()
        .success();
    kitstock(dir)
        .args(["unpack", "Light Circuit", "1"])
        .assert()
        .success();

    let components = std::fs::read_to_string(dir.join("components.csv")).unwrap();
    assert_eq!(
        components,
        format!("1,{}\n4,{}\n", BATTERY, LED)
    );
    let kits = std::fs::read_to_string(dir.join("kits.csv")).unwrap();
    assert_eq!(kits, "");

    let log = std::fs::read_to_string(dir.join("transactions.csv")).unwrap();
    let ops: Vec<&str> = log
        .lines()
        .map(|line| line.split(',').next().unwrap())
        .collect();
    assert_eq!(
        ops,
        vec![
            "Purchase Order",
            "Purchase Order",
            "Pack",
            "Customer Sale",
            "Unpack"
        ]
    );
}

#[test]
fn test_pack_reuses_stored_kit() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();

    kitstock(dir).args(["buy", BATTERY, "2"]).assert().success();
    kitstock(dir)
        .args(["pack", "Torch", "1", "--item", &format!("1:{}", BATTERY)])
        .assert()
        .success();
    kitstock(dir).args(["pack", "Torch", "1"]).assert().success();

    kitstock(dir)
        .arg("kits")
        .assert()
        .success()
        .stdout(predicate::str::contains("Torch"))
        .stdout(predicate::str::contains("1 Battery"));
}

#[test]
fn test_insufficient_stock_fails_without_changes() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();

    kitstock(dir).args(["buy", BATTERY, "1"]).assert().success();
    kitstock(dir)
        .args(["sell", BATTERY, "5"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("only 1 in stock"));

    kitstock(dir)
        .args(["pack", "Pair", "1", "--item", &format!("2:{}", BATTERY)])
        .assert()
        .failure()
        .stdout(predicate::str::contains("need 2, have 1"));

    let log = std::fs::read_to_string(dir.join("transactions.csv")).unwrap();
    assert_eq!(log.lines().count(), 1);
}

#[test]
fn test_unknown_kit_pack_is_an_error() {
    let temp_dir = tempfile::tempdir().unwrap();

    kitstock(temp_dir.path())
        .args(["pack", "Mystery", "1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Unknown kit: Mystery"));

    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("transactions.csv")).unwrap(),
        ""
    );
}

#[test]
fn test_bad_fragment_reports_parse_error() {
    let temp_dir = tempfile::tempdir().unwrap();

    kitstock(temp_dir.path())
        .args(["buy", "Capacitor,10,0.20", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown component kind"));
}

#[test]
fn test_zero_quantity_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();

    kitstock(temp_dir.path())
        .args(["buy", BATTERY, "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be at least 1"));
}

#[test]
fn test_history_limit() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();

    kitstock(dir).args(["buy", BATTERY, "3"]).assert().success();
    kitstock(dir).args(["sell", BATTERY, "1"]).assert().success();

    kitstock(dir)
        .args(["history", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Customer Sale"))
        .stdout(predicate::str::contains("Purchase Order").not());
}

#[test]
fn test_config_changes_file_names() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();

    kitstock(dir)
        .args(["config", "components-file", "parts.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("components-file set to parts.csv"));

    kitstock(dir).args(["buy", BATTERY, "1"]).assert().success();
    assert_eq!(
        std::fs::read_to_string(dir.join("parts.csv")).unwrap(),
        format!("1,{}\n", BATTERY)
    );

    kitstock(dir)
        .arg("paths")
        .assert()
        .success()
        .stdout(predicate::str::contains("parts.csv"));
}

#[test]
fn test_padded_timestamps_when_configured() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();

    kitstock(dir)
        .args(["config", "timestamp-padding", "true"])
        .assert()
        .success();
    kitstock(dir).args(["buy", BATTERY, "1"]).assert().success();

    let log = std::fs::read_to_string(dir.join("transactions.csv")).unwrap();
    assert!(log.starts_with("Purchase Order, 2"));

    kitstock(dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Purchase Order"));
}

#[test]
fn test_kitstock_home_env() {
    let temp_dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("kitstock").unwrap();
    cmd.env("NO_COLOR", "1")
        .env("KITSTOCK_HOME", temp_dir.path())
        .arg("paths")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            temp_dir.path().to_string_lossy().to_string(),
        ));
}
