use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::schema;
use crate::directory::{columns, Directory, PhotoSource, Row, Table, Value};
use crate::error::{ContactError, ContactResult};
use crate::model::{ContactId, ContactRef, PhotoRef, RefTarget, BIRTHDAY_EVENT_TYPE};

/// A contact directory backed by a SQLite database.
///
/// Each lookup prepares its own statement and drops it (and the cursor over
/// it) before returning, so no cursor outlives the lookup that opened it.
pub struct SqliteDirectory {
    conn: Connection,
}

impl SqliteDirectory {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens (creating if needed) a directory database at `path`.
    pub fn open(path: &Path) -> ContactResult<Self> {
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        Ok(Self::new(conn))
    }

    pub fn open_in_memory() -> ContactResult<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self::new(conn))
    }

    /// The underlying connection, for seeding through `contact_repo`.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

const PRIMARY_COLUMNS: &[&str] = &[columns::ID, columns::DISPLAY_NAME, columns::PHOTO_URI];
const PHONE_COLUMNS: &[&str] = &[columns::NUMBER, columns::TYPE];
const EMAIL_COLUMNS: &[&str] = &[columns::ADDRESS, columns::TYPE];
const EVENT_COLUMNS: &[&str] = &[columns::START_DATE, columns::TYPE];
const POSTAL_COLUMNS: &[&str] = &[
    columns::STREET,
    columns::CITY,
    columns::REGION,
    columns::POSTCODE,
    columns::COUNTRY,
    columns::TYPE,
];

fn detail_query(table: Table) -> (&'static str, &'static [&'static str]) {
    match table {
        Table::Phone => (
            "SELECT number, type FROM phones WHERE contact_id = ?1 ORDER BY _id",
            PHONE_COLUMNS,
        ),
        Table::Email => (
            "SELECT address, type FROM emails WHERE contact_id = ?1 ORDER BY _id",
            EMAIL_COLUMNS,
        ),
        Table::BirthdayEvent => (
            "SELECT start_date, type FROM events WHERE contact_id = ?1 AND type = ?2 ORDER BY _id",
            EVENT_COLUMNS,
        ),
        Table::PostalAddress => (
            "SELECT street, city, region, postcode, country, type
             FROM postal_addresses WHERE contact_id = ?1 ORDER BY _id",
            POSTAL_COLUMNS,
        ),
    }
}

fn to_row(row: &rusqlite::Row, names: &[&str]) -> rusqlite::Result<Row> {
    let mut out = Row::new();
    for (i, name) in names.iter().enumerate() {
        let value = match row.get_ref(i)? {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(n) => Value::Integer(n),
            ValueRef::Real(f) => Value::Text(f.to_string()),
            ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(_) => Value::Null,
        };
        out.set(name, value);
    }
    Ok(out)
}

impl Directory for SqliteDirectory {
    fn query_primary(&self, contact_ref: &ContactRef) -> ContactResult<Option<Row>> {
        let row = match contact_ref.target()? {
            RefTarget::LookupKey(key) => self
                .conn
                .query_row(
                    "SELECT _id, display_name, photo_uri FROM contacts WHERE lookup_key = ?1",
                    params![key],
                    |r| to_row(r, PRIMARY_COLUMNS),
                )
                .optional()?,
            RefTarget::ContactId(id) => {
                // Digits too long for an i64 cannot name a row.
                let Ok(rowid) = id.parse::<i64>() else {
                    return Ok(None);
                };
                self.conn
                    .query_row(
                        "SELECT _id, display_name, photo_uri FROM contacts WHERE _id = ?1",
                        params![rowid],
                        |r| to_row(r, PRIMARY_COLUMNS),
                    )
                    .optional()?
            }
        };
        Ok(row)
    }

    fn query_by_contact_id(&self, table: Table, contact_id: &ContactId) -> ContactResult<Vec<Row>> {
        let Ok(rowid) = contact_id.as_str().parse::<i64>() else {
            return Ok(Vec::new());
        };
        let (sql, names) = detail_query(table);
        let mut stmt = self.conn.prepare(sql)?;

        let rows = if table == Table::BirthdayEvent {
            stmt.query_map(params![rowid, BIRTHDAY_EVENT_TYPE], |r| to_row(r, names))?
                .collect::<Result<Vec<_>, _>>()?
        } else {
            stmt.query_map(params![rowid], |r| to_row(r, names))?
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(rows)
    }
}

impl PhotoSource for SqliteDirectory {
    fn open_photo(&self, photo_ref: &PhotoRef) -> ContactResult<Vec<u8>> {
        self.conn
            .query_row(
                "SELECT data FROM photos WHERE uri = ?1",
                params![photo_ref.as_str()],
                |r| r.get::<_, Vec<u8>>(0),
            )
            .optional()?
            .ok_or_else(|| ContactError::PhotoNotFound {
                reference: photo_ref.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::contact_repo::{self, NewContact};
    use crate::model::{PhoneLabel, PhoneNumber};

    fn directory() -> SqliteDirectory {
        SqliteDirectory::new(schema::test_connection())
    }

    #[test]
    fn primary_lookup_by_lookup_key_and_id() {
        let dir = directory();
        let (id, r) = contact_repo::insert(dir.connection(), &NewContact::named("Ada")).unwrap();

        let by_key = dir.query_primary(&r).unwrap().unwrap();
        let by_id = dir.query_primary(&ContactRef::for_id(id.as_str())).unwrap().unwrap();
        assert_eq!(by_key, by_id);
        assert_eq!(by_key.get_str(columns::ID), Some(id.value.clone()));
        assert_eq!(by_key.get_str(columns::DISPLAY_NAME), Some("Ada".into()));
        assert_eq!(by_key.get(columns::PHOTO_URI), Some(&Value::Null));
    }

    #[test]
    fn unknown_reference_yields_no_row() {
        let dir = directory();
        assert!(dir.query_primary(&ContactRef::for_id("99")).unwrap().is_none());
        assert!(dir
            .query_primary(&ContactRef::for_id("99999999999999999999999"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn detail_rows_come_back_in_insertion_order() {
        let dir = directory();
        let mut contact = NewContact::named("Ada");
        contact.phones = vec![
            PhoneNumber::new("555-0101", PhoneLabel::Mobile),
            PhoneNumber::new("555-0100", PhoneLabel::Home),
        ];
        let (id, _) = contact_repo::insert(dir.connection(), &contact).unwrap();

        let rows = dir.query_by_contact_id(Table::Phone, &id).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get_str(columns::NUMBER), Some("555-0101".into()));
        assert_eq!(rows[0].get_int(columns::TYPE), Some(2));
        assert_eq!(rows[1].get_str(columns::NUMBER), Some("555-0100".into()));
    }

    #[test]
    fn birthday_lookup_ignores_other_events() {
        let dir = directory();
        let (id, _) = contact_repo::insert(dir.connection(), &NewContact::named("Ada")).unwrap();
        contact_repo::insert_event(dir.connection(), &id, "2001-06-01", 1).unwrap();
        assert!(dir.query_by_contact_id(Table::BirthdayEvent, &id).unwrap().is_empty());

        contact_repo::insert_event(dir.connection(), &id, "1815-12-10", BIRTHDAY_EVENT_TYPE).unwrap();
        let rows = dir.query_by_contact_id(Table::BirthdayEvent, &id).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_str(columns::START_DATE), Some("1815-12-10".into()));
    }

    #[test]
    fn non_numeric_contact_id_has_no_details() {
        let dir = directory();
        assert!(dir
            .query_by_contact_id(Table::Email, &ContactId::new("abc"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn photo_roundtrip_and_missing_photo() {
        let dir = directory();
        let (id, _) = contact_repo::insert(dir.connection(), &NewContact::named("Ada")).unwrap();
        let photo_ref = contact_repo::insert_photo(dir.connection(), &id, &[1, 2, 3]).unwrap();

        assert_eq!(dir.open_photo(&photo_ref).unwrap(), vec![1, 2, 3]);
        let err = dir.open_photo(&PhotoRef::new("content://contacts/0/photo")).unwrap_err();
        assert!(matches!(err, ContactError::PhotoNotFound { .. }));
    }
}
