//! Tests for seeder module.

use super::*;

#[test]
fn test_bulk_insert_single_row() {
    let sql = bulk_insert_sql("users", &["id"], 1);
    assert_eq!(sql, "INSERT INTO users (id) VALUES (?)");
}

#[test]
fn test_bulk_insert_multiple_rows() {
    let sql = bulk_insert_sql("users", &["id"], 3);
    assert_eq!(sql, "INSERT INTO users (id) VALUES (?), (?), (?)");
}

#[test]
fn test_bulk_insert_product_columns() {
    let sql = bulk_insert_sql("products", PRODUCT_COLUMNS, 2);
    assert_eq!(
        sql,
        "INSERT INTO products \
         (id, prod_id, name, code, price, preview_text, detail_text, user_id) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?), (?, ?, ?, ?, ?, ?, ?, ?)"
    );
}

#[test]
fn test_non_database_error_is_not_unknown_database() {
    let err = sqlx::Error::RowNotFound;
    assert!(!is_unknown_database(&err));
}

// ==================== Migration DDL ====================

#[test]
fn test_migrate_statements_are_idempotent() {
    // Repeated migration must neither error nor duplicate schema objects.
    for statement in MIGRATE_SQL {
        assert!(
            statement.contains("IF NOT EXISTS"),
            "DDL not idempotent: {statement}"
        );
    }
}

#[test]
fn test_migrate_creates_users_before_products() {
    assert_eq!(MIGRATE_SQL.len(), 2);
    assert!(MIGRATE_SQL[0].contains("CREATE TABLE IF NOT EXISTS users"));
    assert!(MIGRATE_SQL[1].contains("CREATE TABLE IF NOT EXISTS products"));
}

#[test]
fn test_products_table_references_users() {
    assert!(MIGRATE_SQL[1].contains("FOREIGN KEY (user_id) REFERENCES users(id)"));
}

// ==================== Replace ordering ====================

#[test]
fn test_clear_deletes_children_before_parents() {
    // Products rows hold the foreign key, so they go first.
    assert_eq!(CLEAR_SQL, &["DELETE FROM products", "DELETE FROM users"]);
}

// ==================== Insert chunking ====================

#[test]
fn test_insert_chunk_stays_under_placeholder_limit() {
    // MySQL prepared statements cap out at 65,535 placeholders.
    assert!(INSERT_CHUNK * PRODUCT_COLUMNS.len() < 65_535);
}
