use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use uuid::Uuid;

use crate::error::{ContactError, ContactResult};

const CONTENT_PREFIX: &str = "content://contacts/";
const LOOKUP_SEGMENT: &str = "lookup/";

/// Type-safe identifier wrapper. The value is opaque to this crate: it is
/// whatever the directory hands back. The phantom type parameter `T` keeps
/// identifiers of different entities apart.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T> {
    pub value: String,
    #[serde(skip)]
    _phantom: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _phantom: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// What a [`ContactRef`] points at once its URI has been taken apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefTarget {
    /// `content://contacts/lookup/<key>[/<id>]`
    LookupKey(String),
    /// `content://contacts/<id>`
    ContactId(String),
}

/// Opaque handle produced by a "pick one contact" interaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactRef(String);

impl ContactRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn for_lookup_key(key: Uuid) -> Self {
        Self(format!("{}{}{}", CONTENT_PREFIX, LOOKUP_SEGMENT, key))
    }

    /// Lookup reference carrying the contact's id as a trailing hint.
    pub fn for_lookup(key: &str, id: &str) -> Self {
        Self(format!("{}{}{}/{}", CONTENT_PREFIX, LOOKUP_SEGMENT, key, id))
    }

    pub fn for_id(id: &str) -> Self {
        Self(format!("{}{}", CONTENT_PREFIX, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the URI into the key the directory should look up.
    pub fn target(&self) -> ContactResult<RefTarget> {
        let invalid = || ContactError::InvalidReference {
            reference: self.0.clone(),
        };

        let rest = self.0.trim().strip_prefix(CONTENT_PREFIX).ok_or_else(invalid)?;

        if let Some(lookup) = rest.strip_prefix(LOOKUP_SEGMENT) {
            // Trailing "/<id>" is a hint only; the lookup key is authoritative.
            let key = lookup.split('/').next().unwrap_or("");
            if key.is_empty() {
                return Err(invalid());
            }
            return Ok(RefTarget::LookupKey(key.to_string()));
        }

        if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
            return Ok(RefTarget::ContactId(rest.to_string()));
        }

        Err(invalid())
    }
}

impl fmt::Display for ContactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque handle to a photo asset. Resolving it to bytes is a separate,
/// fallible step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoRef(String);

impl PhotoRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn for_contact(id: &str) -> Self {
        Self(format!("{}{}/photo", CONTENT_PREFIX, id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
