use std::io::{self, Write};

use crate::db::contact_repo::{self, ContactSummary};
use crate::db::SqliteDirectory;
use crate::error::ContactResult;
use crate::model::{ContactRecord, ContactRef};
use crate::resolver::{ContactResolver, ResolverConfig};

pub struct CLIContext {
    pub directory: SqliteDirectory,
    pub config: ResolverConfig,
}

impl CLIContext {
    pub fn new(directory: SqliteDirectory, config: ResolverConfig) -> Self {
        Self { directory, config }
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    pub fn resolver(&self) -> ContactResolver<'_> {
        ContactResolver::new(&self.directory)
            .with_photos(&self.directory)
            .with_config(self.config)
    }

    pub fn resolve(&self, contact_ref: &ContactRef) -> ContactResult<ContactRecord> {
        self.resolver().resolve(contact_ref)
    }

    /// Stands in for the system contact picker: finds one contact by name
    /// and hands back its reference. Prints why when there is no single
    /// match.
    pub fn pick(&self, args: &str) -> Option<ContactRef> {
        let query = args.trim();
        if query.is_empty() {
            return None;
        }

        let matches = match contact_repo::find_by_name(self.directory.connection(), query) {
            Ok(m) => m,
            Err(e) => {
                println!("Error searching contacts: {}", e);
                return None;
            }
        };

        match matches.len() {
            0 => {
                println!("No contact found matching '{}'", query);
                None
            }
            1 => Some(matches[0].contact_ref.clone()),
            _ => {
                if let Some(exact) = matches.iter().find(|c| is_exact(c, query)) {
                    return Some(exact.contact_ref.clone());
                }
                println!("Multiple matches found:");
                for c in &matches {
                    println!("  {}", c.name.as_deref().unwrap_or("(no name)"));
                }
                println!("Please be more specific.");
                None
            }
        }
    }
}

fn is_exact(contact: &ContactSummary, query: &str) -> bool {
    contact
        .name
        .as_deref()
        .map(|n| n.eq_ignore_ascii_case(query))
        .unwrap_or(false)
}
