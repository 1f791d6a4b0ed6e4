use rusqlite::{params, Connection, OptionalExtension, Transaction};
use uuid::Uuid;

use crate::error::ContactResult;
use crate::model::{
    ContactId, ContactRef, EmailAddress, PhoneNumber, PhotoRef, PostalAddress, BIRTHDAY_EVENT_TYPE,
};
use crate::validation;

/// Everything needed to seed one contact into the directory.
#[derive(Debug, Clone, Default)]
pub struct NewContact {
    pub name: Option<String>,
    pub phones: Vec<PhoneNumber>,
    pub emails: Vec<EmailAddress>,
    pub birthday: Option<String>,
    pub addresses: Vec<PostalAddress>,
}

impl NewContact {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }
}

/// One line of the contact list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSummary {
    pub id: ContactId,
    pub name: Option<String>,
    pub contact_ref: ContactRef,
}

/// Inserts a contact with all of its details in one transaction.
/// Returns the new id and the lookup reference for it.
pub fn insert(conn: &Connection, contact: &NewContact) -> ContactResult<(ContactId, ContactRef)> {
    let tx = conn.unchecked_transaction()?;
    let inserted = insert_in(&tx, contact)?;
    tx.commit()?;
    Ok(inserted)
}

/// Like [`insert`], but runs inside the caller's transaction and leaves
/// committing to the caller.
pub fn insert_in(
    tx: &Transaction,
    contact: &NewContact,
) -> ContactResult<(ContactId, ContactRef)> {
    let name = match contact.name.as_deref() {
        Some(n) => Some(validation::non_blank(n, "name")?),
        None => None,
    };
    let lookup_key = Uuid::new_v4();

    tx.execute(
        "INSERT INTO contacts (lookup_key, display_name) VALUES (?1, ?2)",
        params![lookup_key.to_string(), name],
    )?;
    let id = ContactId::new(tx.last_insert_rowid().to_string());

    for phone in &contact.phones {
        insert_phone(tx, &id, phone)?;
    }
    for email in &contact.emails {
        insert_email(tx, &id, email)?;
    }
    if let Some(birthday) = contact.birthday.as_deref() {
        insert_event(tx, &id, birthday, BIRTHDAY_EVENT_TYPE)?;
    }
    for address in &contact.addresses {
        insert_address(tx, &id, address)?;
    }

    Ok((id, ContactRef::for_lookup_key(lookup_key)))
}

pub fn insert_phone(conn: &Connection, id: &ContactId, phone: &PhoneNumber) -> ContactResult<()> {
    conn.execute(
        "INSERT INTO phones (contact_id, number, type) VALUES (?1, ?2, ?3)",
        params![id.as_str(), phone.number, phone.label.code()],
    )?;
    Ok(())
}

pub fn insert_email(conn: &Connection, id: &ContactId, email: &EmailAddress) -> ContactResult<()> {
    conn.execute(
        "INSERT INTO emails (contact_id, address, type) VALUES (?1, ?2, ?3)",
        params![id.as_str(), email.address, email.label.code()],
    )?;
    Ok(())
}

/// Inserts an event row. Only events with [`BIRTHDAY_EVENT_TYPE`] count as
/// birthdays.
pub fn insert_event(
    conn: &Connection,
    id: &ContactId,
    start_date: &str,
    event_type: i64,
) -> ContactResult<()> {
    conn.execute(
        "INSERT INTO events (contact_id, start_date, type) VALUES (?1, ?2, ?3)",
        params![id.as_str(), start_date, event_type],
    )?;
    Ok(())
}

pub fn insert_address(
    conn: &Connection,
    id: &ContactId,
    address: &PostalAddress,
) -> ContactResult<()> {
    conn.execute(
        "INSERT INTO postal_addresses (contact_id, street, city, region, postcode, country, type)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            id.as_str(),
            address.street,
            address.city,
            address.region,
            address.postal_code,
            address.country,
            address.label.code(),
        ],
    )?;
    Ok(())
}

/// Stores photo bytes for a contact and points the contact at them.
/// The bytes are kept as-is; nothing checks that they decode.
pub fn insert_photo(conn: &Connection, id: &ContactId, bytes: &[u8]) -> ContactResult<PhotoRef> {
    let photo_ref = PhotoRef::for_contact(id.as_str());
    conn.execute(
        "INSERT OR REPLACE INTO photos (uri, contact_id, data) VALUES (?1, ?2, ?3)",
        params![photo_ref.as_str(), id.as_str(), bytes],
    )?;
    conn.execute(
        "UPDATE contacts SET photo_uri = ?1 WHERE _id = ?2",
        params![photo_ref.as_str(), id.as_str()],
    )?;
    Ok(photo_ref)
}

pub fn delete(conn: &Connection, id: &ContactId) -> ContactResult<()> {
    conn.execute("DELETE FROM contacts WHERE _id = ?1", params![id.as_str()])?;
    Ok(())
}

pub fn rename(conn: &Connection, id: &ContactId, name: Option<&str>) -> ContactResult<()> {
    conn.execute(
        "UPDATE contacts SET display_name = ?1 WHERE _id = ?2",
        params![validation::trim_optional(name), id.as_str()],
    )?;
    Ok(())
}

/// All contacts, ordered by name. Unnamed contacts sort first.
pub fn list_all(conn: &Connection) -> ContactResult<Vec<ContactSummary>> {
    let mut stmt = conn.prepare(
        "SELECT _id, display_name, lookup_key FROM contacts
         ORDER BY display_name COLLATE NOCASE, _id",
    )?;

    let contacts = stmt
        .query_map([], row_to_summary)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contacts)
}

/// Case-insensitive substring match on the display name.
pub fn find_by_name(conn: &Connection, query: &str) -> ContactResult<Vec<ContactSummary>> {
    let pattern = format!("%{}%", query.trim().to_lowercase());
    let mut stmt = conn.prepare(
        "SELECT _id, display_name, lookup_key FROM contacts
         WHERE LOWER(display_name) LIKE ?1
         ORDER BY display_name COLLATE NOCASE, _id",
    )?;

    let contacts = stmt
        .query_map(params![pattern], row_to_summary)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contacts)
}

pub fn find_by_id(conn: &Connection, id: &ContactId) -> ContactResult<Option<ContactSummary>> {
    let summary = conn
        .query_row(
            "SELECT _id, display_name, lookup_key FROM contacts WHERE _id = ?1",
            params![id.as_str()],
            row_to_summary,
        )
        .optional()?;
    Ok(summary)
}

fn row_to_summary(row: &rusqlite::Row) -> rusqlite::Result<ContactSummary> {
    let id: i64 = row.get(0)?;
    let name: Option<String> = row.get(1)?;
    let lookup_key: String = row.get(2)?;
    Ok(ContactSummary {
        id: ContactId::new(id.to_string()),
        name,
        contact_ref: ContactRef::for_lookup(&lookup_key, &id.to_string()),
    })
}
