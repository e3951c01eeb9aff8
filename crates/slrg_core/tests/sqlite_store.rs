use rusqlite::Connection;
use slrg_core::db::migrations::latest_version;
use slrg_core::db::open_db_in_memory;
use slrg_core::{
    ensure_registry_ready, Assessment, Education, Entity, EntityStore, Member, OwnedStore,
    PageRequest, SortOrder, SqliteStore, StoreError,
};

fn member(first: &str, last: &str) -> Member {
    Member::new(first, last)
}

#[test]
fn insert_assigns_fresh_ids_and_reads_back() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::<Member>::try_new(&conn).unwrap();

    let mut alice = member("Alice", "Keller");
    alice.email = Some("alice@example.ch".to_string());
    alice.birth_date = Some("1990-04-12".to_string());

    let first = store.insert(&alice).unwrap();
    let second = store.insert(&member("Bruno", "Meier")).unwrap();

    assert_eq!(first.id, Some(1));
    assert_eq!(second.id, Some(2));
    assert_eq!(first.email.as_deref(), Some("alice@example.ch"));

    let loaded = store.find_one(1).unwrap().unwrap();
    assert_eq!(loaded, first);
}

#[test]
fn insert_ignores_client_id() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::<Member>::try_new(&conn).unwrap();

    let stored = store.insert(&member("Alice", "Keller").with_id(42)).unwrap();
    assert_eq!(stored.id, Some(1));
    assert!(store.find_one(42).unwrap().is_none());
}

#[test]
fn ids_are_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::<Member>::try_new(&conn).unwrap();

    let first = store.insert(&member("Alice", "Keller")).unwrap();
    assert!(store.delete(first.id.unwrap()).unwrap());
    let second = store.insert(&member("Bruno", "Meier")).unwrap();
    assert_eq!(second.id, Some(2));
}

#[test]
fn update_replaces_full_record() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::<Member>::try_new(&conn).unwrap();

    let mut stored = store.insert(&member("Alice", "Keller")).unwrap();
    stored.phone = Some("+41 79 000 00 00".to_string());
    store.update(1, &stored).unwrap();

    let mut replacement = member("Alicia", "Keller");
    replacement.active = false;
    let updated = store.update(1, &replacement).unwrap();

    assert_eq!(updated.id, Some(1));
    assert_eq!(updated.first_name, "Alicia");
    assert!(!updated.active);
    assert_eq!(updated.phone, None, "full replace clears omitted fields");
}

#[test]
fn update_missing_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::<Member>::try_new(&conn).unwrap();

    let err = store.update(7, &member("Ghost", "Member")).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(7)));
}

#[test]
fn delete_is_hard_and_reports_missing_rows() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::<Member>::try_new(&conn).unwrap();

    store.insert(&member("Alice", "Keller")).unwrap();
    assert!(store.delete(1).unwrap());
    assert!(store.find_one(1).unwrap().is_none());
    assert!(!store.delete(1).unwrap());

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM members;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 0);
}

#[test]
fn deleting_member_cascades_to_owned_records() {
    let conn = open_db_in_memory().unwrap();
    let members = SqliteStore::<Member>::try_new(&conn).unwrap();
    let assessments = SqliteStore::<Assessment>::try_new(&conn).unwrap();
    let educations = SqliteStore::<Education>::try_new(&conn).unwrap();

    let alice = members.insert(&member("Alice", "Keller")).unwrap();
    let alice_id = alice.id.unwrap();
    assessments.insert(&Assessment::new(alice_id, 90)).unwrap();
    educations
        .insert(&Education::new(alice_id, "Brevet Plus Pool"))
        .unwrap();

    members.delete(alice_id).unwrap();

    assert!(assessments.find_by_member_id(alice_id).unwrap().is_empty());
    assert!(educations.find_by_member_id(alice_id).unwrap().is_empty());
}

#[test]
fn owned_record_with_unknown_member_violates_foreign_key() {
    let conn = open_db_in_memory().unwrap();
    let assessments = SqliteStore::<Assessment>::try_new(&conn).unwrap();

    let err = assessments.insert(&Assessment::new(99, 50)).unwrap_err();
    assert!(matches!(err, StoreError::Db(_)));
}

#[test]
fn find_by_member_id_returns_only_owned_records_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let members = SqliteStore::<Member>::try_new(&conn).unwrap();
    let assessments = SqliteStore::<Assessment>::try_new(&conn).unwrap();

    members.insert(&member("Alice", "Keller")).unwrap();
    members.insert(&member("Bruno", "Meier")).unwrap();
    assessments.insert(&Assessment::new(1, 70)).unwrap();
    assessments.insert(&Assessment::new(2, 80)).unwrap();
    assessments.insert(&Assessment::new(1, 90)).unwrap();

    let owned = assessments.find_by_member_id(1).unwrap();
    let scores: Vec<i64> = owned.iter().map(|item| item.score).collect();
    assert_eq!(scores, vec![70, 90]);
    assert!(owned.iter().all(|item| item.member_id == Some(1)));
}

#[test]
fn find_page_sorts_and_counts_total() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::<Member>::try_new(&conn).unwrap();

    for (first, last) in [("Cleo", "Zürcher"), ("Alice", "Keller"), ("Bruno", "Meier")] {
        store.insert(&member(first, last)).unwrap();
    }

    let request = PageRequest::new(0, 2).sorted_by(SortOrder::asc("lastName"));
    let page = store.find_page(&request).unwrap();
    assert_eq!(page.total_elements, 3);
    assert_eq!(page.total_pages(), 2);
    let names: Vec<&str> = page.content.iter().map(|m| m.last_name.as_str()).collect();
    assert_eq!(names, vec!["Keller", "Meier"]);

    let request = PageRequest::new(1, 2).sorted_by(SortOrder::asc("lastName"));
    let page = store.find_page(&request).unwrap();
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].last_name, "Zürcher");
}

#[test]
fn find_page_rejects_unmapped_sort_property() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::<Member>::try_new(&conn).unwrap();

    let request = PageRequest::new(0, 10).sorted_by(SortOrder::asc("password"));
    let err = store.find_page(&request).unwrap_err();
    assert!(matches!(err, StoreError::InvalidSort(property) if property == "password"));
}

#[test]
fn read_path_rejects_invalid_persisted_rows() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO members (first_name, last_name, birth_date) VALUES ('Alice', 'Keller', 'yesterday');",
        [],
    )
    .unwrap();

    let store = SqliteStore::<Member>::try_new(&conn).unwrap();
    let err = store.find_one(1).unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)));
}

#[test]
fn store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteStore::<Member>::try_new(&conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn store_rejects_connection_without_required_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteStore::<Member>::try_new(&conn);
    assert!(matches!(
        result,
        Err(StoreError::MissingRequiredTable("members"))
    ));
}

#[test]
fn store_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE assessments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            member_id INTEGER NOT NULL,
            score INTEGER NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteStore::<Assessment>::try_new(&conn);
    assert!(matches!(
        result,
        Err(StoreError::MissingRequiredColumn {
            table: "assessments",
            column: "assessed_on"
        })
    ));
}

#[test]
fn registry_check_accepts_migrated_connection() {
    let conn = open_db_in_memory().unwrap();
    ensure_registry_ready(&conn).unwrap();

    let store = SqliteStore::<Member>::assume_ready(&conn);
    let stored = store.insert(&member("Alice", "Keller")).unwrap();
    assert_eq!(store.find_one(1).unwrap(), Some(stored));
}

#[test]
fn registry_check_reports_any_missing_table() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE appearances;").unwrap();

    assert!(matches!(
        ensure_registry_ready(&conn),
        Err(StoreError::MissingRequiredTable("appearances"))
    ));
}

#[test]
fn registry_check_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(matches!(
        ensure_registry_ready(&conn),
        Err(StoreError::UninitializedConnection {
            actual_version: 0,
            ..
        })
    ));
}
