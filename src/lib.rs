pub mod error;
pub mod validation;
pub mod model;
pub mod directory;
pub mod db;
pub mod photo;
pub mod resolver;
pub mod config;
pub mod migrate;
pub mod cli;

pub use error::{ContactError, ContactResult};
pub use resolver::{ContactResolver, NamePolicy, ResolverConfig};
