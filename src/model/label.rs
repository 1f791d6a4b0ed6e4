use serde::{Deserialize, Serialize};
use std::fmt;

/// Event type code the directory uses for birthdays.
pub const BIRTHDAY_EVENT_TYPE: i64 = 3;

/// Kind of phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhoneLabel {
    Home,
    Mobile,
    Work,
    Other,
}

impl PhoneLabel {
    pub const ALL: &'static [PhoneLabel] = &[
        PhoneLabel::Home,
        PhoneLabel::Mobile,
        PhoneLabel::Work,
        PhoneLabel::Other,
    ];

    /// Total mapping from the directory's type code. Unknown codes are `Other`.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => PhoneLabel::Home,
            2 => PhoneLabel::Mobile,
            3 => PhoneLabel::Work,
            _ => PhoneLabel::Other,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            PhoneLabel::Home => 1,
            PhoneLabel::Mobile => 2,
            PhoneLabel::Work => 3,
            PhoneLabel::Other => 7,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PhoneLabel::Home => "Home",
            PhoneLabel::Mobile => "Mobile",
            PhoneLabel::Work => "Work",
            PhoneLabel::Other => "Other",
        }
    }
}

/// Kind of email address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmailLabel {
    Home,
    Work,
    Mobile,
    Other,
}

impl EmailLabel {
    pub const ALL: &'static [EmailLabel] = &[
        EmailLabel::Home,
        EmailLabel::Work,
        EmailLabel::Mobile,
        EmailLabel::Other,
    ];

    pub fn from_code(code: i64) -> Self {
        match code {
            1 => EmailLabel::Home,
            2 => EmailLabel::Work,
            4 => EmailLabel::Mobile,
            _ => EmailLabel::Other,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            EmailLabel::Home => 1,
            EmailLabel::Work => 2,
            EmailLabel::Other => 3,
            EmailLabel::Mobile => 4,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EmailLabel::Home => "Home",
            EmailLabel::Work => "Work",
            EmailLabel::Mobile => "Mobile",
            EmailLabel::Other => "Other",
        }
    }
}

/// Kind of postal address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AddressLabel {
    Home,
    Work,
    #[default]
    Other,
}

impl AddressLabel {
    pub const ALL: &'static [AddressLabel] =
        &[AddressLabel::Home, AddressLabel::Work, AddressLabel::Other];

    pub fn from_code(code: i64) -> Self {
        match code {
            1 => AddressLabel::Home,
            2 => AddressLabel::Work,
            _ => AddressLabel::Other,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            AddressLabel::Home => 1,
            AddressLabel::Work => 2,
            AddressLabel::Other => 3,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AddressLabel::Home => "Home",
            AddressLabel::Work => "Work",
            AddressLabel::Other => "Other",
        }
    }
}

impl fmt::Display for PhoneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl fmt::Display for EmailLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl fmt::Display for AddressLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
