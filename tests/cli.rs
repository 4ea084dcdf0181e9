use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fiscally(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fiscally").expect("bin");
    cmd.env("FISCALLY_FIT_DATA_DIR", home.path())
        .env_remove("FISCALLY_LOG")
        .env_remove("GOOGLE_API_KEY");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("run");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).expect("utf8")
}

fn id_from(output: &str) -> String {
    output
        .lines()
        .find_map(|l| l.trim().strip_prefix("ID: "))
        .expect("id line")
        .to_string()
}

#[test]
fn category_list_seeds_defaults() {
    let home = TempDir::new().unwrap();
    fiscally(&home)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Grocery").and(predicate::str::contains("cat_grocery")));

    assert!(home.path().join("data").join("categories.json").exists());
}

#[test]
fn expense_add_then_list() {
    let home = TempDir::new().unwrap();
    fiscally(&home)
        .args([
            "expense", "add", "12.50", "--category", "grocery", "--date", "2024-05-03",
            "--item", "Milk=2.50", "--item", "Bread=10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded $12.50 in Grocery on 2024-05-03"));

    fiscally(&home)
        .args(["expense", "list", "--month", "2024-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-05-03").and(predicate::str::contains("(2 items)")));
}

#[test]
fn expense_delete_by_id_prefix() {
    let home = TempDir::new().unwrap();
    let added = stdout_of(fiscally(&home).args(["expense", "add", "40", "-c", "Transport"]));
    let id = id_from(&added);

    fiscally(&home)
        .args(["expense", "delete", &id[..12]])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted expense"));

    fiscally(&home)
        .args(["expense", "list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));
}

#[test]
fn duplicate_budget_is_rejected() {
    let home = TempDir::new().unwrap();
    fiscally(&home)
        .args(["budget", "set", "Grocery", "300", "--month", "2024-05"])
        .assert()
        .success();

    fiscally(&home)
        .args(["budget", "set", "Grocery", "150", "--month", "2024-05"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    fiscally(&home)
        .args(["budget", "set", "Grocery", "150", "--month", "2024-06"])
        .assert()
        .success();
}

#[test]
fn budget_list_reports_over_budget() {
    let home = TempDir::new().unwrap();
    fiscally(&home)
        .args(["budget", "set", "Transport", "100", "--month", "2024-05"])
        .assert()
        .success();
    fiscally(&home)
        .args(["expense", "add", "110", "-c", "Transport", "-d", "2024-05-20"])
        .assert()
        .success();

    fiscally(&home)
        .args(["budget", "list", "--month", "2024-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("110%").and(predicate::str::contains("OVER by $10.00")));
}

#[test]
fn invalid_input_exits_non_zero() {
    let home = TempDir::new().unwrap();
    fiscally(&home)
        .args(["expense", "add", "0", "--category", "Grocery"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    fiscally(&home)
        .args(["expense", "add", "5", "--category", "Pets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Category not found: Pets"));

    fiscally(&home)
        .args(["budget", "list", "--month", "2024-13"])
        .assert()
        .failure();
}

#[test]
fn receipt_scan_without_api_key_fails() {
    let home = TempDir::new().unwrap();
    fiscally(&home)
        .args(["receipt", "scan", "data:image/png;base64,aGVsbG8="])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GOOGLE_API_KEY"));
}

#[test]
fn currency_setting_applies_to_output() {
    let home = TempDir::new().unwrap();
    fiscally(&home).args(["settings", "currency", "€"]).assert().success();
    fiscally(&home)
        .args(["expense", "add", "1234.5", "-c", "Rent/Mortgage", "-d", "2024-05-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€1,234.50"));
}

#[test]
fn export_all_json_is_parseable() {
    let home = TempDir::new().unwrap();
    let out = stdout_of(fiscally(&home).args(["export", "all", "--format", "json"]));
    let value: serde_json::Value = serde_json::from_str(&out).expect("json");
    assert_eq!(value["categories"].as_array().map(Vec::len), Some(8));
    assert_eq!(value["metadata"]["expense_count"], 0);
}

#[test]
fn clear_data_takes_backup_and_reseeds() {
    let home = TempDir::new().unwrap();
    fiscally(&home).args(["category", "add", "Pets", "--icon", "Bone"]).assert().success();

    fiscally(&home)
        .args(["settings", "clear-data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--yes"));

    fiscally(&home)
        .args(["settings", "clear-data", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup saved"));

    fiscally(&home)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pets").not());

    fiscally(&home)
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 1 backup(s)"));
}
