use std::fs;

use tempfile::tempdir;
use transistor_cli::definition::{DefinitionError, FlagSet};
use transistor_cli::inspect::{self, InspectTable};

const PERMISSION: &str = r#"
name = "Permission"

[[flags]]
name = "Read"

[[flags]]
name = "Write"

[[flags]]
name = "Delete"

[[flags]]
name = "Admin"
"#;

fn permission() -> FlagSet {
    FlagSet::from_toml_str(PERMISSION).unwrap()
}

fn value_row(value: u64) -> String {
    let table = InspectTable::new(&permission(), Some(value)).render(false);
    let lines: Vec<&str> = table.lines().collect();
    lines[lines.len() - 2].to_string()
}

#[test]
fn renders_members() {
    let table = InspectTable::new(&permission(), None).render(false);
    let expected = "\
+--------+---------+-----------------+
| Case   | Decimal | Binary          |
+--------+---------+-----------------+
| Read   | 1       | 0 0 0 0 0 0 0 1 |
| Write  | 2       | 0 0 0 0 0 0 1 0 |
| Delete | 4       | 0 0 0 0 0 1 0 0 |
| Admin  | 8       | 0 0 0 0 1 0 0 0 |
+--------+---------+-----------------+
";
    assert_eq!(table, expected);
}

#[test]
fn renders_value_after_separator() {
    let table = InspectTable::new(&permission(), Some(11)).render(false);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[7], lines[0]);
    assert_eq!(lines[8], "| Value  | 11      | 0 0 0 0 1 0 1 1 |");
}

#[test]
fn value_rows() {
    assert_eq!(value_row(1), "| Value  | 1       | 0 0 0 0 0 0 0 1 |");
    assert_eq!(value_row(5), "| Value  | 5       | 0 0 0 0 0 1 0 1 |");
    assert_eq!(value_row(15), "| Value  | 15      | 0 0 0 0 1 1 1 1 |");
    assert_eq!(value_row(0), "| Value  | 0       | 0 0 0 0 0 0 0 0 |");
}

#[test]
fn widens_for_large_values() {
    let table = InspectTable::new(&permission(), Some(300));
    assert_eq!(table.bits(), 9);
    let rendered = table.render(false);
    assert!(rendered.contains("| Read   | 1       | 0 0 0 0 0 0 0 0 1 |"));
    assert!(rendered.contains("| Value  | 300     | 1 0 0 1 0 1 1 0 0 |"));
}

#[test]
fn rejects_invalid_values() {
    for input in ["-1", "abc", "", "1e3"] {
        let err = inspect::parse_value(input).unwrap_err();
        assert_eq!(err.to_string(), "value must be a non-negative integer");
    }
}

#[test]
fn locates_by_name_and_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Permission.toml");
    fs::write(&path, PERMISSION).unwrap();

    let by_name = FlagSet::locate("Permission", dir.path()).unwrap();
    assert_eq!(by_name, permission());

    let by_path = FlagSet::locate(path.to_str().unwrap(), "elsewhere".as_ref()).unwrap();
    assert_eq!(by_path.name(), "Permission");
}

#[test]
fn missing_set_is_not_found() {
    let dir = tempdir().unwrap();
    let err = FlagSet::locate("Missing", dir.path()).unwrap_err();
    assert!(matches!(err, DefinitionError::NotFound(_)));
    assert_eq!(err.to_string(), "flag set 'Missing' not found");
}
