use std::path::Path;

use rusqlite::Connection;
use serde::Deserialize;
use tracing::{info, warn};

use crate::db::{contact_repo, schema};
use crate::db::contact_repo::NewContact;
use crate::error::{ContactError, ContactResult};
use crate::model::*;

/// Seeds a SQLite directory at `db_path` from a JSON contacts file.
///
/// The import is all or nothing. If it fails and `db_path` did not exist
/// beforehand, the new database file is removed again.
pub fn import_json(json_path: &Path, db_path: &Path) -> ContactResult<ImportStats> {
    let json_str = std::fs::read_to_string(json_path)?;
    let file: ImportFile = serde_json::from_str(&json_str)?;

    let existed = db_path.exists();
    let result = Connection::open(db_path)
        .map_err(ContactError::from)
        .and_then(|conn| {
            schema::initialize(&conn)?;
            let base_dir = json_path.parent().unwrap_or_else(|| Path::new("."));
            import_contacts(&conn, &file, base_dir)
        });

    if let Err(e) = &result {
        if !existed {
            warn!(path = %db_path.display(), error = %e, "import failed; removing new database");
            if let Err(rm) = std::fs::remove_file(db_path) {
                warn!(path = %db_path.display(), error = %rm, "could not remove database");
            }
        }
    }
    result
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub contacts: usize,
    pub phones: usize,
    pub emails: usize,
    pub addresses: usize,
    pub photos: usize,
}

#[derive(Debug, Deserialize)]
pub struct ImportFile {
    #[serde(default)]
    pub contacts: Vec<ImportContact>,
}

#[derive(Debug, Deserialize)]
pub struct ImportContact {
    pub name: Option<String>,
    #[serde(default)]
    pub phones: Vec<ImportPhone>,
    #[serde(default)]
    pub emails: Vec<ImportEmail>,
    pub birthday: Option<String>,
    #[serde(default)]
    pub addresses: Vec<ImportAddress>,
    /// Image file path, relative to the JSON file.
    pub photo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImportPhone {
    pub number: String,
    #[serde(rename = "type", default)]
    pub type_code: i64,
}

#[derive(Debug, Deserialize)]
pub struct ImportEmail {
    pub address: String,
    #[serde(rename = "type", default)]
    pub type_code: i64,
}

#[derive(Debug, Deserialize)]
pub struct ImportAddress {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub country: String,
    #[serde(rename = "type", default)]
    pub type_code: i64,
}

/// Inserts every contact in `file` in a single transaction. Photo paths
/// are resolved against `base_dir`. On error nothing is written.
pub fn import_contacts(
    conn: &Connection,
    file: &ImportFile,
    base_dir: &Path,
) -> ContactResult<ImportStats> {
    let mut stats = ImportStats::default();
    let tx = conn.unchecked_transaction()?;

    for contact in &file.contacts {
        let photo = match contact.photo.as_deref() {
            Some(path) => Some(std::fs::read(base_dir.join(path))?),
            None => None,
        };
        let new = to_new_contact(contact);

        let (id, _) = contact_repo::insert_in(&tx, &new)?;
        stats.contacts += 1;
        stats.phones += new.phones.len();
        stats.emails += new.emails.len();
        stats.addresses += new.addresses.len();

        if let Some(bytes) = photo {
            contact_repo::insert_photo(&tx, &id, &bytes)?;
            stats.photos += 1;
        }
    }

    tx.commit()?;
    info!(contacts = stats.contacts, photos = stats.photos, "import finished");
    Ok(stats)
}

fn to_new_contact(contact: &ImportContact) -> NewContact {
    NewContact {
        name: contact.name.clone(),
        phones: contact
            .phones
            .iter()
            .map(|p| PhoneNumber::new(p.number.clone(), PhoneLabel::from_code(p.type_code)))
            .collect(),
        emails: contact
            .emails
            .iter()
            .map(|e| EmailAddress::new(e.address.clone(), EmailLabel::from_code(e.type_code)))
            .collect(),
        birthday: contact.birthday.clone(),
        addresses: contact
            .addresses
            .iter()
            .map(|a| PostalAddress {
                street: a.street.clone(),
                city: a.city.clone(),
                region: a.region.clone(),
                postal_code: a.postcode.clone(),
                country: a.country.clone(),
                label: AddressLabel::from_code(a.type_code),
            })
            .collect(),
    }
}
