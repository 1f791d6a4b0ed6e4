//! Turns a picked contact reference into a [`ContactRecord`].
//!
//! One primary lookup yields the contact's id, name and photo handle. Four
//! secondary lookups keyed by that id fill in phones, emails, birthday and
//! postal addresses. Only the primary lookup can fail the resolution; a
//! secondary lookup that errors leaves its field empty, and a photo that
//! cannot be fetched or decoded leaves the pixels absent.

use tracing::{debug, warn};

use crate::directory::{columns, Directory, PhotoSource, Row, Table};
use crate::error::{ContactError, ContactResult};
use crate::model::*;
use crate::photo;
use crate::validation::{present, trim_optional};

/// What to do when the directory knows a contact's id but not its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamePolicy {
    /// Treat a nameless contact as not found.
    #[default]
    RequireName,
    /// Return the record with `name: None`.
    AllowMissing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    pub name_policy: NamePolicy,
    pub decode_photos: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            name_policy: NamePolicy::RequireName,
            decode_photos: true,
        }
    }
}

/// Stateless resolver over borrowed directory capabilities.
pub struct ContactResolver<'a> {
    directory: &'a dyn Directory,
    photos: Option<&'a dyn PhotoSource>,
    config: ResolverConfig,
}

impl<'a> ContactResolver<'a> {
    pub fn new(directory: &'a dyn Directory) -> Self {
        Self {
            directory,
            photos: None,
            config: ResolverConfig::default(),
        }
    }

    pub fn with_photos(mut self, photos: &'a dyn PhotoSource) -> Self {
        self.photos = Some(photos);
        self
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> ResolverConfig {
        self.config
    }

    /// Resolves `contact_ref` into a full record.
    ///
    /// Returns [`ContactError::NotFound`] when the primary lookup has no row,
    /// when that row has no id, or when it has no name under
    /// [`NamePolicy::RequireName`]. Errors from the primary lookup itself are
    /// returned as-is. Nothing else fails the call.
    pub fn resolve(&self, contact_ref: &ContactRef) -> ContactResult<ContactRecord> {
        let primary = self
            .directory
            .query_primary(contact_ref)?
            .ok_or_else(|| ContactError::not_found(contact_ref))?;

        let id = primary
            .get_str(columns::ID)
            .and_then(|s| trim_optional(Some(s.as_str())))
            .map(ContactId::new)
            .ok_or_else(|| ContactError::not_found(contact_ref))?;

        let name = present(primary.get_str(columns::DISPLAY_NAME));

        if name.is_none() && self.config.name_policy == NamePolicy::RequireName {
            debug!(contact = %id, "contact has no display name");
            return Err(ContactError::not_found(contact_ref));
        }

        let photo_reference = primary
            .get_str(columns::PHOTO_URI)
            .and_then(|s| trim_optional(Some(s.as_str())))
            .map(PhotoRef::new);

        let phone_numbers = self
            .rows(Table::Phone, &id)
            .iter()
            .filter_map(row_to_phone)
            .collect();

        let emails = self
            .rows(Table::Email, &id)
            .iter()
            .filter_map(row_to_email)
            .collect();

        let date_of_birth = self
            .rows(Table::BirthdayEvent, &id)
            .iter()
            .find_map(|r| present(r.get_str(columns::START_DATE)));

        let postal_addresses = self
            .rows(Table::PostalAddress, &id)
            .iter()
            .map(row_to_address)
            .collect();

        let photo = photo_reference
            .as_ref()
            .and_then(|p| self.load_photo(p));

        Ok(ContactRecord {
            id,
            name,
            phone_numbers,
            emails,
            date_of_birth,
            postal_addresses,
            photo_reference,
            photo,
        })
    }

    /// A secondary lookup. Failures degrade to zero rows.
    fn rows(&self, table: Table, id: &ContactId) -> Vec<Row> {
        match self.directory.query_by_contact_id(table, id) {
            Ok(rows) => {
                debug!(contact = %id, %table, rows = rows.len(), "secondary lookup");
                rows
            }
            Err(e) => {
                warn!(contact = %id, %table, error = %e, "secondary lookup failed; treating as empty");
                Vec::new()
            }
        }
    }

    fn load_photo(&self, photo_ref: &PhotoRef) -> Option<DecodedPhoto> {
        if !self.config.decode_photos {
            return None;
        }
        let source = self.photos?;

        let decoded = source
            .open_photo(photo_ref)
            .and_then(|bytes| photo::decode(&bytes));

        match decoded {
            Ok(p) => Some(p),
            Err(e) => {
                debug!(photo = %photo_ref, error = %e, "photo unavailable");
                None
            }
        }
    }
}

fn row_to_phone(row: &Row) -> Option<PhoneNumber> {
    let Some(number) = present(row.get_str(columns::NUMBER)) else {
        debug!("skipping phone row without a number");
        return None;
    };
    let label = row
        .get_int(columns::TYPE)
        .map(PhoneLabel::from_code)
        .unwrap_or(PhoneLabel::Other);
    Some(PhoneNumber { number, label })
}

fn row_to_email(row: &Row) -> Option<EmailAddress> {
    let Some(address) = present(row.get_str(columns::ADDRESS)) else {
        debug!("skipping email row without an address");
        return None;
    };
    let label = row
        .get_int(columns::TYPE)
        .map(EmailLabel::from_code)
        .unwrap_or(EmailLabel::Other);
    Some(EmailAddress { address, label })
}

fn row_to_address(row: &Row) -> PostalAddress {
    let part = |column: &str| row.get_str(column).unwrap_or_default();
    PostalAddress {
        street: part(columns::STREET),
        city: part(columns::CITY),
        region: part(columns::REGION),
        postal_code: part(columns::POSTCODE),
        country: part(columns::COUNTRY),
        label: row
            .get_int(columns::TYPE)
            .map(AddressLabel::from_code)
            .unwrap_or(AddressLabel::Other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_row_without_type_is_other() {
        let row = Row::new().with(columns::NUMBER, "555");
        assert_eq!(row_to_phone(&row), Some(PhoneNumber::new("555", PhoneLabel::Other)));
    }

    #[test]
    fn blank_phone_row_is_skipped() {
        let row = Row::new().with(columns::NUMBER, "  ").with(columns::TYPE, 1i64);
        assert_eq!(row_to_phone(&row), None);
    }

    #[test]
    fn phone_number_keeps_directory_spacing() {
        let row = Row::new().with(columns::NUMBER, " 555 0100 ");
        assert_eq!(row_to_phone(&row).unwrap().number, " 555 0100 ");
    }

    #[test]
    fn email_with_unknown_type_is_other() {
        let row = Row::new()
            .with(columns::ADDRESS, "ada@example.com")
            .with(columns::TYPE, 42i64);
        assert_eq!(
            row_to_email(&row),
            Some(EmailAddress::new("ada@example.com", EmailLabel::Other))
        );
    }

    #[test]
    fn address_missing_parts_are_empty_strings() {
        let row = Row::new()
            .with(columns::CITY, "London")
            .with(columns::STREET, None::<String>)
            .with(columns::TYPE, 2i64);
        let address = row_to_address(&row);
        assert_eq!(address.street, "");
        assert_eq!(address.city, "London");
        assert_eq!(address.region, "");
        assert_eq!(address.postal_code, "");
        assert_eq!(address.country, "");
        assert_eq!(address.label, AddressLabel::Work);
    }

    #[test]
    fn default_config_requires_name_and_decodes_photos() {
        let config = ResolverConfig::default();
        assert_eq!(config.name_policy, NamePolicy::RequireName);
        assert!(config.decode_photos);
    }
}
