use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{Id, PhotoRef};
use super::label::{AddressLabel, EmailLabel, PhoneLabel};

pub type ContactId = Id<ContactRecord>;

/// A phone number and its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub number: String,
    pub label: PhoneLabel,
}

impl PhoneNumber {
    pub fn new(number: impl Into<String>, label: PhoneLabel) -> Self {
        Self {
            number: number.into(),
            label,
        }
    }
}

/// An email address and its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub address: String,
    pub label: EmailLabel,
}

impl EmailAddress {
    pub fn new(address: impl Into<String>, label: EmailLabel) -> Self {
        Self {
            address: address.into(),
            label,
        }
    }
}

/// A structured postal address. Missing parts are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
    pub label: AddressLabel,
}

impl PostalAddress {
    /// One-line rendering: `street, city, region postal_code, country`,
    /// skipping empty parts.
    pub fn formatted(&self) -> String {
        let region_line = [self.region.as_str(), self.postal_code.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        [
            self.street.as_str(),
            self.city.as_str(),
            region_line.as_str(),
            self.country.as_str(),
        ]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
    }

    pub fn is_empty(&self) -> bool {
        self.street.is_empty()
            && self.city.is_empty()
            && self.region.is_empty()
            && self.postal_code.is_empty()
            && self.country.is_empty()
    }
}

/// Decoded photo pixels, 8-bit RGBA, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedPhoto {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for DecodedPhoto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedPhoto")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

/// Everything known about one contact at the moment it was resolved.
/// Built once by the resolver and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: ContactId,
    pub name: Option<String>,
    pub phone_numbers: Vec<PhoneNumber>,
    pub emails: Vec<EmailAddress>,
    /// Raw value from the directory, not normalized.
    pub date_of_birth: Option<String>,
    pub postal_addresses: Vec<PostalAddress>,
    pub photo_reference: Option<PhotoRef>,
    #[serde(skip)]
    pub photo: Option<DecodedPhoto>,
}

impl ContactRecord {
    pub fn primary_phone(&self) -> Option<&PhoneNumber> {
        self.phone_numbers.first()
    }

    pub fn primary_email(&self) -> Option<&EmailAddress> {
        self.emails.first()
    }

    pub fn primary_address(&self) -> Option<&PostalAddress> {
        self.postal_addresses.first()
    }

    /// Parses `date_of_birth` when it carries a full `YYYY-MM-DD` date.
    /// Yearless birthdays (`--MM-DD`) and anything else yield `None`.
    pub fn birthday(&self) -> Option<NaiveDate> {
        let raw = self.date_of_birth.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    pub fn has_photo_pixels(&self) -> bool {
        self.photo.is_some()
    }
}
