use std::env;
use std::path::PathBuf;

use crate::resolver::{NamePolicy, ResolverConfig};

const DEFAULT_DB_DIR: &str = ".data";
const DEFAULT_DB_NAME: &str = "contacts.db";

pub const ENV_DB: &str = "PICK_CONTACT_DB";
pub const ENV_ALLOW_MISSING_NAME: &str = "PICK_CONTACT_ALLOW_MISSING_NAME";
pub const ENV_DECODE_PHOTOS: &str = "PICK_CONTACT_DECODE_PHOTOS";

/// Runtime settings for the binary. Environment first, flags on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub allow_missing_name: bool,
    pub decode_photos: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_DIR).join(DEFAULT_DB_NAME),
            allow_missing_name: false,
            decode_photos: true,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            db_path: lookup(ENV_DB)
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            allow_missing_name: lookup(ENV_ALLOW_MISSING_NAME)
                .and_then(|s| parse_flag(&s))
                .unwrap_or(defaults.allow_missing_name),
            decode_photos: lookup(ENV_DECODE_PHOTOS)
                .and_then(|s| parse_flag(&s))
                .unwrap_or(defaults.decode_photos),
        }
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            name_policy: if self.allow_missing_name {
                NamePolicy::AllowMissing
            } else {
                NamePolicy::RequireName
            },
            decode_photos: self.decode_photos,
        }
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let s = settings(&[]);
        assert_eq!(s, Settings::default());
        assert_eq!(s.db_path, PathBuf::from(".data/contacts.db"));
        assert_eq!(s.resolver_config(), ResolverConfig::default());
    }

    #[test]
    fn environment_overrides_defaults() {
        let s = settings(&[
            (ENV_DB, "/tmp/x.db"),
            (ENV_ALLOW_MISSING_NAME, "true"),
            (ENV_DECODE_PHOTOS, "0"),
        ]);
        assert_eq!(s.db_path, PathBuf::from("/tmp/x.db"));
        let config = s.resolver_config();
        assert_eq!(config.name_policy, NamePolicy::AllowMissing);
        assert!(!config.decode_photos);
    }

    #[test]
    fn unrecognised_flag_values_keep_defaults() {
        let s = settings(&[(ENV_ALLOW_MISSING_NAME, "maybe"), (ENV_DB, "  ")]);
        assert!(!s.allow_missing_name);
        assert_eq!(s.db_path, Settings::default().db_path);
    }
}
