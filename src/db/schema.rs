use rusqlite::Connection;

use crate::error::ContactResult;

/// Initialize the database schema. Creates all tables if they don't exist.
///
/// The layout follows the platform contacts provider: one row per contact,
/// plus one table per kind of detail keyed by `contact_id`. Detail rows are
/// returned in `_id` order, which is insertion order.
pub fn initialize(conn: &Connection) -> ContactResult<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS contacts (
            _id INTEGER PRIMARY KEY AUTOINCREMENT,
            lookup_key TEXT NOT NULL UNIQUE,
            display_name TEXT,
            photo_uri TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS phones (
            _id INTEGER PRIMARY KEY AUTOINCREMENT,
            contact_id INTEGER NOT NULL REFERENCES contacts(_id) ON DELETE CASCADE,
            number TEXT,
            type INTEGER
        );

        CREATE TABLE IF NOT EXISTS emails (
            _id INTEGER PRIMARY KEY AUTOINCREMENT,
            contact_id INTEGER NOT NULL REFERENCES contacts(_id) ON DELETE CASCADE,
            address TEXT,
            type INTEGER
        );

        CREATE TABLE IF NOT EXISTS events (
            _id INTEGER PRIMARY KEY AUTOINCREMENT,
            contact_id INTEGER NOT NULL REFERENCES contacts(_id) ON DELETE CASCADE,
            start_date TEXT,
            type INTEGER
        );

        CREATE TABLE IF NOT EXISTS postal_addresses (
            _id INTEGER PRIMARY KEY AUTOINCREMENT,
            contact_id INTEGER NOT NULL REFERENCES contacts(_id) ON DELETE CASCADE,
            street TEXT,
            city TEXT,
            region TEXT,
            postcode TEXT,
            country TEXT,
            type INTEGER
        );

        CREATE TABLE IF NOT EXISTS photos (
            uri TEXT PRIMARY KEY NOT NULL,
            contact_id INTEGER NOT NULL REFERENCES contacts(_id) ON DELETE CASCADE,
            data BLOB NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_phones_contact ON phones(contact_id);
        CREATE INDEX IF NOT EXISTS idx_emails_contact ON emails(contact_id);
        CREATE INDEX IF NOT EXISTS idx_events_contact ON events(contact_id);
        CREATE INDEX IF NOT EXISTS idx_postal_contact ON postal_addresses(contact_id);
        ",
    )?;
    Ok(())
}

/// Create an in-memory connection for testing. Available in test builds.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}
