use rusqlite::Connection;

use crate::error::TouchResult;

/// Initialize the database schema. Creates the key-value table if it doesn't exist.
pub fn initialize(conn: &Connection) -> TouchResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS kv_entries (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;
    Ok(())
}

/// In-memory connection with the schema applied, for tests.
pub fn test_connection() -> TouchResult<Connection> {
    let conn = Connection::open_in_memory()?;
    initialize(&conn)?;
    Ok(conn)
}
