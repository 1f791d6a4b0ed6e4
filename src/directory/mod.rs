//! The contact directory capability the resolver reads from.
//!
//! A directory answers two kinds of lookup: a primary lookup that turns a
//! [`ContactRef`] into the contact's id, display name and photo handle, and
//! per-contact lookups against one of the detail tables. Rows are flat
//! column-to-value maps so that any backing store can produce them.

pub mod memory;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ContactResult;
use crate::model::{ContactId, ContactRef, PhotoRef};

pub use memory::MemoryDirectory;

/// Column names shared by every directory implementation.
pub mod columns {
    pub const ID: &str = "_id";
    pub const DISPLAY_NAME: &str = "display_name";
    pub const PHOTO_URI: &str = "photo_uri";

    pub const TYPE: &str = "type";
    pub const NUMBER: &str = "number";
    pub const ADDRESS: &str = "address";
    pub const START_DATE: &str = "start_date";

    pub const STREET: &str = "street";
    pub const CITY: &str = "city";
    pub const REGION: &str = "region";
    pub const POSTCODE: &str = "postcode";
    pub const COUNTRY: &str = "country";
}

/// Detail tables keyed by contact id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Table {
    Phone,
    Email,
    /// Only events whose type is the birthday code.
    BirthdayEvent,
    PostalAddress,
}

impl Table {
    pub const ALL: &'static [Table] = &[
        Table::Phone,
        Table::Email,
        Table::BirthdayEvent,
        Table::PostalAddress,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Table::Phone => "phone",
            Table::Email => "email",
            Table::BirthdayEvent => "birthday event",
            Table::PostalAddress => "postal address",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Text(String),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// One row returned by a lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: BTreeMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: &str, value: impl Into<Value>) {
        self.cells.insert(column.to_string(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells.get(column)
    }

    /// Text value of a column. Integers are rendered as decimal text, since
    /// providers are loose about whether ids come back as strings.
    pub fn get_str(&self, column: &str) -> Option<String> {
        match self.cells.get(column)? {
            Value::Text(s) => Some(s.clone()),
            Value::Integer(n) => Some(n.to_string()),
            Value::Null => None,
        }
    }

    /// Integer value of a column. Numeric text is accepted.
    pub fn get_int(&self, column: &str) -> Option<i64> {
        match self.cells.get(column)? {
            Value::Integer(n) => Some(*n),
            Value::Text(s) => s.trim().parse().ok(),
            Value::Null => None,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Read access to a contact directory.
pub trait Directory {
    /// Zero or one row with `_id`, `display_name` and `photo_uri`.
    fn query_primary(&self, contact_ref: &ContactRef) -> ContactResult<Option<Row>>;

    /// Every row of `table` that belongs to `contact_id`, in directory order.
    fn query_by_contact_id(&self, table: Table, contact_id: &ContactId) -> ContactResult<Vec<Row>>;
}

/// Fetches the raw bytes behind a photo handle.
pub trait PhotoSource {
    fn open_photo(&self, photo_ref: &PhotoRef) -> ContactResult<Vec<u8>>;
}
