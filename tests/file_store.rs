use kitstock::fragment::Component;
use kitstock::inventory::Inventory;
use kitstock::model::Kit;
use kitstock::store::fs::{DataFiles, FileStore};
use kitstock::store::Persistence;
use kitstock::transaction::{Operation, TimestampStyle};
use std::fs;
use tempfile::TempDir;

const BATTERY: &str = "Battery,AA,1.5,3.10";
const LED: &str = "LED Light,red,3.0,20,0.50";

fn light_circuit() -> Kit {
    Kit::new(
        "Light Circuit",
        vec![
            format!("1:{}", BATTERY).parse().unwrap(),
            format!("2:{}", LED).parse().unwrap(),
        ],
    )
}

#[test]
fn test_missing_files_load_as_empty() {
    let temp = TempDir::new().unwrap();
    let store = FileStore::new(temp.path().join("not-yet"));

    let snapshot = store.load().unwrap();
    assert!(snapshot.components.is_empty());
    assert!(snapshot.kits.is_empty());
    assert!(store.load_transactions().unwrap().records.is_empty());
}

#[test]
fn test_state_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let battery: Component = BATTERY.parse().unwrap();
    let led: Component = LED.parse().unwrap();

    {
        let mut inventory = Inventory::open(FileStore::new(temp.path().to_path_buf())).unwrap();
        inventory.buy_component(&battery, 3).unwrap();
        inventory.buy_component(&led, 5).unwrap();
        assert!(inventory.pack(&light_circuit(), 2).unwrap());
    }

    let inventory = Inventory::open(FileStore::new(temp.path().to_path_buf())).unwrap();
    assert_eq!(inventory.available(&battery), 1);
    assert_eq!(inventory.available(&led), 1);
    assert_eq!(inventory.kit_available("Light Circuit"), 2);
    assert_eq!(
        inventory.kits().get("Light Circuit").unwrap().items,
        light_circuit().items
    );

    let history = inventory.history().unwrap();
    let ops: Vec<Operation> = history.records.iter().map(|r| r.operation).collect();
    assert_eq!(
        ops,
        vec![Operation::PurchaseOrder, Operation::PurchaseOrder, Operation::Pack]
    );
}

#[test]
fn test_saves_leave_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let mut inventory = Inventory::open(FileStore::new(temp.path().to_path_buf())).unwrap();
    inventory
        .buy_component(&BATTERY.parse::<Component>().unwrap(), 1)
        .unwrap();

    let mut names: Vec<String> = fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["components.csv", "transactions.csv"]);
}

#[test]
fn test_transaction_log_is_append_only() {
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("transactions.csv");
    let old_row = "Purchase Order, 2024-01-05 08:00:00,4,Wire,100,0.50\n";
    fs::write(&log_path, old_row).unwrap();

    let mut inventory = Inventory::open(FileStore::new(temp.path().to_path_buf())).unwrap();
    inventory
        .buy_component(&BATTERY.parse::<Component>().unwrap(), 1)
        .unwrap();

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.starts_with(old_row));
    assert_eq!(log.lines().count(), 2);

    let history = inventory.history().unwrap();
    assert_eq!(history.records.len(), 2);
    assert_eq!(history.records[0].quantity, 4);
}

#[test]
fn test_legacy_rows_load_and_are_rewritten_canonically() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("components.csv"),
        "2, battery, aa, 1.50, 3.1\n1,Battery,AA,1.5,3.10\nbroken row\n",
    )
    .unwrap();

    let mut inventory = Inventory::open(FileStore::new(temp.path().to_path_buf())).unwrap();
    let report = inventory.load_report();
    assert_eq!(report.components.skipped, 1);
    assert_eq!(report.normalized(), 1);

    let battery: Component = BATTERY.parse().unwrap();
    assert_eq!(inventory.available(&battery), 3);

    inventory.sell_component(&battery, 1).unwrap();
    assert_eq!(
        fs::read_to_string(temp.path().join("components.csv")).unwrap(),
        format!("2,{}\n", BATTERY)
    );
}

#[test]
fn test_custom_file_names_and_padded_timestamps() {
    let temp = TempDir::new().unwrap();
    let files = DataFiles {
        components: "parts.csv".into(),
        kits: "bundles.csv".into(),
        transactions: "log.csv".into(),
    };
    let store = FileStore::new(temp.path().to_path_buf())
        .with_files(files)
        .with_timestamp_style(TimestampStyle::Padded);
    store.ensure_files().unwrap();
    assert!(store.kits_path().ends_with("bundles.csv"));

    let mut inventory = Inventory::open(store).unwrap();
    inventory
        .buy_component(&BATTERY.parse::<Component>().unwrap(), 2)
        .unwrap();

    assert!(temp.path().join("parts.csv").exists());
    let log = fs::read_to_string(temp.path().join("log.csv")).unwrap();
    assert!(log.starts_with("Purchase Order, "));
    assert_eq!(inventory.history().unwrap().records.len(), 1);
}
