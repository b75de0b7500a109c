use rusqlite::Connection;
use stockroom_core::db::migrations::latest_version;
use stockroom_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "products");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stockroom.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    conn_first
        .execute(
            "INSERT INTO products (name, description, price, available, category)
             VALUES ('tee', 'plain tee', '12.50', 1, 'CLOTHS');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "products");

    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM products;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1, "reopen must not disturb existing rows");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn deleted_product_ids_are_never_reused() {
    let conn = open_db_in_memory().unwrap();

    conn.execute(
        "INSERT INTO products (name, description, price, available, category)
         VALUES ('first', 'row one', '1.00', 1, 'UNKNOWN');",
        [],
    )
    .unwrap();
    let first_id = conn.last_insert_rowid();

    conn.execute("DELETE FROM products WHERE id = ?1;", [first_id])
        .unwrap();

    conn.execute(
        "INSERT INTO products (name, description, price, available, category)
         VALUES ('second', 'row two', '2.00', 1, 'UNKNOWN');",
        [],
    )
    .unwrap();
    let second_id = conn.last_insert_rowid();

    assert!(second_id > first_id, "AUTOINCREMENT must not reuse ids");
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
