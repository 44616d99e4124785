#![allow(clippy::unwrap_used)]

use super::*;
use std::io::Write;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn make_csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn expenses_file() -> tempfile::NamedTempFile {
    make_csv_file(
        "id,title,amount,categoryId,date,userId\n\
         1,Grocery Shopping,85.50,food,2026-02-03T00:00:00Z,1\n\
         2,Uber Ride,15.20,transport,2026-02-02T00:00:00Z,1\n",
    )
}

fn categories_file() -> tempfile::NamedTempFile {
    make_csv_file(
        "id,name,icon,color\n\
         food,Food,fast-food,#f59e0b\n\
         transport,Transport,car,#3b82f6\n\
         bills,Bills,receipt,#ef4444\n",
    )
}

fn path_str(file: &tempfile::NamedTempFile) -> String {
    file.path().to_string_lossy().into_owned()
}

#[test]
fn test_flag_value() {
    let a = args(&["--expenses", "e.csv", "--at", "2026-02-03"]);
    assert_eq!(flag_value(&a, "--expenses"), Some("e.csv"));
    assert_eq!(flag_value(&a, "--at"), Some("2026-02-03"));
    assert_eq!(flag_value(&a, "--categories"), None);
}

#[test]
fn test_positional_skips_flag_values() {
    let a = args(&["--expenses", "e.csv", "5", "--categories", "c.csv"]);
    assert_eq!(positional(&a), vec!["5"]);
}

#[test]
fn test_shellexpand_leaves_plain_paths() {
    assert_eq!(shellexpand("/tmp/e.csv"), "/tmp/e.csv");
    assert!(!shellexpand("~/e.csv").starts_with('~'));
}

#[test]
fn test_load_snapshot_with_flags() {
    let expenses = expenses_file();
    let categories = categories_file();
    let a = args(&[
        "--expenses",
        &path_str(&expenses),
        "--categories",
        &path_str(&categories),
    ]);
    let snapshot = load_snapshot(&a, &Config::default()).unwrap();
    assert_eq!(snapshot.expenses().len(), 2);
    assert_eq!(snapshot.categories().len(), 3);
}

#[test]
fn test_load_snapshot_rejects_negative_amount() {
    let expenses = make_csv_file("id,amount,date\n1,-5.00,2026-02-01T00:00:00Z\n");
    let a = args(&["--expenses", &path_str(&expenses)]);
    let err = load_snapshot(&a, &Config::default()).unwrap_err();
    assert!(err.to_string().contains("negative amount"));
}

#[test]
fn test_check_delete_refuses_used_category() {
    let expenses = expenses_file();
    let categories = categories_file();
    let a = args(&[
        "food",
        "--expenses",
        &path_str(&expenses),
        "--categories",
        &path_str(&categories),
    ]);
    let err = cli_check_delete(&a, &Config::default()).unwrap_err();
    assert!(err.to_string().contains("category 'Food' has 1 transaction"));
}

#[test]
fn test_check_delete_allows_unused_category() {
    let expenses = expenses_file();
    let categories = categories_file();
    let a = args(&[
        "Bills",
        "--expenses",
        &path_str(&expenses),
        "--categories",
        &path_str(&categories),
    ]);
    assert!(cli_check_delete(&a, &Config::default()).is_ok());
}

#[test]
fn test_unknown_command_is_error() {
    let a = args(&["expense-report", "frobnicate"]);
    assert!(as_cli(&a, &Config::default()).is_err());
}

#[test]
fn test_recent_rejects_bad_count() {
    let expenses = expenses_file();
    let a = args(&["many", "--expenses", &path_str(&expenses)]);
    assert!(cli_recent(&a, &Config::default()).is_err());
}

// ── reports ───────────────────────────────────────────────────

fn snapshot_from_files() -> (Snapshot, tempfile::NamedTempFile, tempfile::NamedTempFile) {
    let expenses = expenses_file();
    let categories = categories_file();
    let a = args(&[
        "--expenses",
        &path_str(&expenses),
        "--categories",
        &path_str(&categories),
    ]);
    let snapshot = load_snapshot(&a, &Config::default()).unwrap();
    (snapshot, expenses, categories)
}

#[test]
fn test_summary_command_succeeds_with_reference_time() {
    let expenses = expenses_file();
    let a = args(&[
        "expense-report",
        "summary",
        "--expenses",
        &path_str(&expenses),
        "--at",
        "2026-02-03T12:00:00Z",
    ]);
    assert!(as_cli(&a, &Config::default()).is_ok());
}

#[test]
fn test_summary_command_rejects_bad_reference_time() {
    let expenses = expenses_file();
    let a = args(&["expense-report", "summary", "--expenses", &path_str(&expenses), "--at", "soon"]);
    let err = as_cli(&a, &Config::default()).unwrap_err();
    assert!(err.to_string().contains("Invalid --at value"));
}

#[test]
fn test_render_summary_figures() {
    let (snapshot, _e, _c) = snapshot_from_files();
    let reference = parse_date("2026-02-03T12:00:00Z").unwrap().with_timezone(&Local);
    let out = render_summary(&snapshot, &reference, &Config::default());
    assert!(out.contains("Total:        $100.70"), "{out}");
    assert!(out.contains("This month:   $100.70"), "{out}");
    assert!(out.contains("This week:    $100.70"), "{out}");
    assert!(out.contains("Transactions: 2"), "{out}");
}

#[test]
fn test_render_summary_uses_currency_symbol() {
    let (snapshot, _e, _c) = snapshot_from_files();
    let reference = parse_date("2026-02-03T12:00:00Z").unwrap().with_timezone(&Local);
    let config = Config {
        currency_symbol: "€".into(),
        ..Config::default()
    };
    let out = render_summary(&snapshot, &reference, &config);
    assert!(out.contains("Total:        €100.70"), "{out}");
}

#[test]
fn test_categories_command_succeeds() {
    let expenses = expenses_file();
    let categories = categories_file();
    let a = args(&[
        "expense-report",
        "categories",
        "--expenses",
        &path_str(&expenses),
        "--categories",
        &path_str(&categories),
    ]);
    assert!(as_cli(&a, &Config::default()).is_ok());
}

#[test]
fn test_render_categories_table() {
    let (snapshot, _e, _c) = snapshot_from_files();
    let out = render_categories(&snapshot, &Config::default());
    let food = out.lines().find(|l| l.starts_with("Food")).unwrap();
    assert!(food.contains("$85.50"), "{food}");
    assert!(food.contains("84.9%"), "{food}");
    let bills = out.lines().find(|l| l.starts_with("Bills")).unwrap();
    assert!(bills.contains("$0.00") && bills.contains("0.0%"), "{bills}");
    let total = out.lines().last().unwrap();
    assert!(total.starts_with("Total") && total.contains("$100.70"), "{total}");
}

#[test]
fn test_render_categories_empty() {
    let snapshot = Snapshot::default();
    assert_eq!(render_categories(&snapshot, &Config::default()), "No categories\n");
}

#[test]
fn test_recent_command_succeeds() {
    let expenses = expenses_file();
    let a = args(&["expense-report", "recent", "1", "--expenses", &path_str(&expenses)]);
    assert!(as_cli(&a, &Config::default()).is_ok());
}

#[test]
fn test_render_recent_limits_and_orders() {
    let (snapshot, _e, _c) = snapshot_from_files();
    let out = render_recent(&snapshot, 1, &Config::default());
    assert_eq!(out.lines().count(), 1);
    assert!(out.contains("Grocery Shopping"), "{out}");
    assert!(out.contains("Food"), "{out}");
    assert!(out.contains("-$85.50"), "{out}");
    assert!(!out.contains("Uber Ride"), "{out}");
}

#[test]
fn test_render_recent_empty() {
    assert_eq!(
        render_recent(&Snapshot::default(), 3, &Config::default()),
        "No expenses\n"
    );
}

#[test]
fn test_load_snapshot_blank_id_names_csv_row() {
    let expenses = make_csv_file(
        "id,amount,date\n\
         1,1.00,2026-02-01T00:00:00Z\n\
         ,,\n\
         ,2.00,2026-02-02T00:00:00Z\n",
    );
    let a = args(&["--expenses", &path_str(&expenses)]);
    let err = load_snapshot(&a, &Config::default()).unwrap_err();
    assert!(format!("{err:#}").contains("Row 4: missing id"), "{err:#}");
}
