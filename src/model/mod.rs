pub mod ids;
pub mod label;
pub mod contact;

// Re-exports for convenience
pub use ids::{ContactRef, Id, PhotoRef, RefTarget};
pub use label::{AddressLabel, EmailLabel, PhoneLabel, BIRTHDAY_EVENT_TYPE};
pub use contact::{ContactId, ContactRecord, DecodedPhoto, EmailAddress, PhoneNumber, PostalAddress};
