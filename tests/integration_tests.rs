//! Integration tests for passstore.
//!
//! These tests drive the coordinator and the shell commands against real
//! files in temporary directories.

use passstore::shell::command::{CommandRegistry, CommandResult, ShellContext};
use passstore::shell::commands::register_all;
use passstore::storage::{read_table, write_table};
use passstore::{
    CsvStorage, PersistenceAdapter, RecordFields, RecordId, Shell, StoreError, ViewCoordinator,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn setup_test_env() -> (ViewCoordinator, PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("passwords.csv");
    let (view, load_error) = ViewCoordinator::open(CsvStorage::new(&path));
    assert!(load_error.is_none());
    (view, path, temp_dir)
}

fn reopen(path: &PathBuf) -> ViewCoordinator {
    let (view, load_error) = ViewCoordinator::open(CsvStorage::new(path));
    assert!(load_error.is_none(), "reload failed: {:?}", load_error);
    view
}

fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    register_all(&mut registry);
    registry
}

fn sorted_fields(view: &ViewCoordinator) -> Vec<(String, String, String, String, String)> {
    let mut rows: Vec<_> = view
        .records()
        .iter()
        .map(|r| {
            (
                r.url().to_string(),
                r.username().to_string(),
                r.secret().to_string(),
                r.comment().to_string(),
                r.tags().to_string(),
            )
        })
        .collect();
    rows.sort();
    rows
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_missing_file_opens_empty() {
    let (view, path, _temp_dir) = setup_test_env();
    assert!(view.is_empty());
    assert!(!path.exists());
    assert!(view.current_view("").is_empty());
}

#[test]
fn test_every_change_is_saved() {
    let (mut view, path, _temp_dir) = setup_test_env();

    let a = view
        .add(RecordFields::new("github.com", "bob", "hunter2").with_tags("dev"))
        .unwrap();
    view.add(RecordFields::new("mail.example", "alice", "p@ss, \"quoted\""))
        .unwrap();
    assert_eq!(reopen(&path).len(), 2);

    view.update(a, RecordFields::new("github.com", "robert", "n3w"))
        .unwrap();
    view.delete(a).unwrap();

    let reloaded = reopen(&path);
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.records()[0].secret(), "p@ss, \"quoted\"");
}

#[test]
fn test_round_trip_keeps_duplicates_and_special_characters() {
    let (mut view, path, _temp_dir) = setup_test_env();

    let same = RecordFields::new("site.com", "bob", "pw").with_comment("line one\nline two");
    view.add(same.clone()).unwrap();
    view.add(same).unwrap();
    view.add(RecordFields::new("ünïcode.example", "zoë", "пароль").with_tags("a,b"))
        .unwrap();

    let reloaded = reopen(&path);
    assert_eq!(sorted_fields(&reloaded), sorted_fields(&view));
}

#[test]
fn test_reload_assigns_fresh_ids_and_hides_everything() {
    let (mut view, path, _temp_dir) = setup_test_env();
    let id = view.add(RecordFields::new("a.com", "bob", "x")).unwrap();
    view.reveal(id).unwrap();

    let reloaded = reopen(&path);
    let row = &reloaded.current_view("")[0];
    assert!(!row.revealed);
    assert_eq!(row.secret_display, "*");
}

#[test]
fn test_empty_collection_still_writes_header() {
    let (mut view, path, _temp_dir) = setup_test_env();
    let id = view.add(RecordFields::new("a.com", "bob", "x")).unwrap();
    view.delete(id).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.trim_end(), "url,username,password,comment,tags");
    assert!(reopen(&path).is_empty());
}

#[test]
fn test_table_without_optional_columns() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("passwords.csv");
    fs::write(&path, "url,username,password\nsite.com,bob,pw\n").unwrap();

    let view = reopen(&path);
    assert_eq!(view.len(), 1);
    assert_eq!(view.records()[0].comment(), "");
    assert_eq!(view.current_view("")[0].comment, "-");
}

#[test]
fn test_unreadable_table_opens_empty_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("passwords.csv");
    fs::write(&path, "url,username,password\nonly,two\n").unwrap();

    let (view, load_error) = ViewCoordinator::open(CsvStorage::new(&path));
    assert!(view.is_empty());
    assert!(matches!(load_error, Some(StoreError::Read { .. })));
}

#[test]
fn test_failed_save_keeps_change_in_memory() {
    let temp_dir = TempDir::new().unwrap();
    // A directory where the file should be makes every save fail.
    let path = temp_dir.path().join("passwords.csv");
    fs::create_dir(&path).unwrap();

    let mut storage = CsvStorage::new(&path);
    assert!(storage.save(&[]).is_err());

    let (mut view, _) = ViewCoordinator::open(CsvStorage::new(&path));
    let err = view
        .add(RecordFields::new("a.com", "bob", "x"))
        .unwrap_err();

    assert!(err.is_unsaved());
    assert_eq!(err.unsaved_records().len(), 1);
    assert_eq!(view.len(), 1);
    assert_eq!(view.current_view("").len(), 1);
}

// ============================================================================
// Import and export
// ============================================================================

#[test]
fn test_import_appends_rows() {
    let (mut view, path, temp_dir) = setup_test_env();
    view.add(RecordFields::new("existing.com", "bob", "x")).unwrap();

    let source = temp_dir.path().join("in.csv");
    let rows = vec![
        RecordFields::new("one.com", "ann", "1"),
        RecordFields::new("existing.com", "bob", "x"),
    ];
    write_table(&source, &rows).unwrap();

    let ids = view.import(&source).unwrap();
    assert_eq!(ids.len(), 2);
    assert_eq!(view.len(), 3);
    assert_eq!(reopen(&path).len(), 3);
}

#[test]
fn test_import_missing_file_adds_nothing() {
    let (mut view, _path, temp_dir) = setup_test_env();
    let err = view.import(&temp_dir.path().join("nope.csv"));

    assert!(err.is_err());
    assert!(view.is_empty());
}

#[test]
fn test_import_with_malformed_row_adds_nothing() {
    let (mut view, path, temp_dir) = setup_test_env();
    view.add(RecordFields::new("existing.com", "bob", "x")).unwrap();

    let source = temp_dir.path().join("in.csv");
    fs::write(
        &source,
        "url,username,password,comment,tags\none.com,ann,1,,\ntwo.com,cid,2,,\nbroken,row\n",
    )
    .unwrap();

    let err = view.import(&source).unwrap_err();
    assert!(matches!(err, StoreError::Read { .. }));
    assert_eq!(view.len(), 1);
    assert_eq!(reopen(&path).len(), 1);
}

#[test]
fn test_export_writes_real_secrets() {
    let (mut view, _path, temp_dir) = setup_test_env();
    view.add(RecordFields::new("a.com", "bob", "hunter2")).unwrap();

    let target = temp_dir.path().join("out").join("export.csv");
    assert_eq!(view.export(&target).unwrap(), 1);

    let rows = read_table(&target).unwrap();
    assert_eq!(rows, vec![RecordFields::new("a.com", "bob", "hunter2")]);
}

// ============================================================================
// Viewing
// ============================================================================

#[test]
fn test_reveal_search_and_delete_flow() {
    let (mut view, _path, _temp_dir) = setup_test_env();
    let a = view
        .add(RecordFields::new("github.com", "alice", "abc").with_tags("dev"))
        .unwrap();
    let b = view
        .add(RecordFields::new("mail.example", "bob", "xyz"))
        .unwrap();

    let rows = view.current_view("");
    assert_eq!(rows[0].secret_display, "***");
    assert_eq!(rows[1].comment, "-");

    view.reveal(a).unwrap();
    assert_eq!(view.current_view("")[0].secret_display, "abc");

    let filtered = view.current_view("MAIL");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, b);
    assert_eq!(view.resolve_position(0, "MAIL").unwrap(), b);

    view.delete(a).unwrap();
    assert!(!view.is_visible(a));
    assert!(view.reveal(a).unwrap_err().is_not_found());
    assert!(view.resolve_position(1, "").unwrap_err().is_not_found());
}

#[test]
fn test_edit_masks_secret_again() {
    let (mut view, _path, _temp_dir) = setup_test_env();
    let id = view.add(RecordFields::new("a.com", "bob", "old")).unwrap();
    view.reveal(id).unwrap();

    view.update(id, RecordFields::new("a.com", "bob", "new"))
        .unwrap();
    assert_eq!(view.current_view("")[0].secret_display, "***");
    assert!(!view.is_visible(id));
    assert_eq!(view.record(id).unwrap().secret(), "new");
}

#[test]
fn test_unknown_id_is_not_found() {
    let (mut view, _path, _temp_dir) = setup_test_env();
    let ghost = RecordId::new(42);

    assert!(view.update(ghost, RecordFields::default()).unwrap_err().is_not_found());
    assert!(view.delete(ghost).unwrap_err().is_not_found());
    assert!(view.toggle(ghost).unwrap_err().is_not_found());
}

// ============================================================================
// Shell commands
// ============================================================================

#[test]
fn test_command_aliases() {
    let registry = create_registry();

    for (alias, name) in [
        ("ls", "list"),
        ("/", "search"),
        ("clear", "reset"),
        ("a", "add"),
        ("e", "edit"),
        ("rm", "remove"),
        ("reveal", "show"),
        ("t", "toggle"),
        ("?", "help"),
        ("q", "quit"),
    ] {
        let cmd = registry.get(alias).unwrap_or_else(|| panic!("no command for {}", alias));
        assert_eq!(cmd.name(), name);
    }
}

#[test]
fn test_add_and_list_commands() {
    let (mut view, path, _temp_dir) = setup_test_env();
    let registry = create_registry();
    let mut query = String::new();

    {
        let mut ctx = ShellContext::new(&mut view, &mut query).with_registry(&registry);
        let add = registry.get("add").unwrap();
        let result = add.execute(&["site.com", "bob", "hunter2", "work"], &mut ctx);
        assert!(matches!(result, CommandResult::Success(Some(_))));

        let list = registry.get("list").unwrap();
        match list.execute(&[], &mut ctx) {
            CommandResult::Success(Some(table)) => {
                assert!(table.contains("site.com"));
                assert!(table.contains("*******"));
                assert!(!table.contains("hunter2"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    assert_eq!(reopen(&path).len(), 1);
}

#[test]
fn test_shell_session() {
    let (mut view, path, temp_dir) = setup_test_env();
    let shell = Shell::new();
    let mut query = String::new();
    let export = temp_dir.path().join("export.csv");

    let lines = [
        "add github.com alice abc",
        "add mail.example bob 'x y z' personal",
        "/ bob",
        "toggle 1",
        "edit 1 mail.example robert xyz",
        "clear",
        "rm 1",
    ];
    for line in lines {
        let result = shell.execute_line(line, &mut view, &mut query);
        assert!(
            matches!(result, CommandResult::Success(_)),
            "'{}' gave {:?}",
            line,
            result
        );
    }
    let export_line = format!("export {}", export.display());
    assert!(matches!(
        shell.execute_line(&export_line, &mut view, &mut query),
        CommandResult::Success(_)
    ));

    let rows = view.current_view("");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].username, "robert");
    assert_eq!(rows[0].secret_display, "***");
    assert!(!rows[0].revealed);

    assert_eq!(reopen(&path).records()[0].username(), "robert");
    assert_eq!(read_table(&export).unwrap().len(), 1);
}

#[test]
fn test_row_out_of_range() {
    let (mut view, _path, _temp_dir) = setup_test_env();
    let shell = Shell::new();
    let mut query = String::new();

    shell.execute_line("add a.com bob x", &mut view, &mut query);
    let result = shell.execute_line("show 2", &mut view, &mut query);
    assert!(matches!(result, CommandResult::Error(_)));
    assert!(!view.is_visible(view.records()[0].id()));
}
