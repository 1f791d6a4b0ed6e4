use crate::db::contact_repo;
use crate::error::ContactError;
use crate::model::{ContactRecord, ContactRef};

use super::context::CLIContext;

pub fn list(ctx: &CLIContext) {
    let contacts = match contact_repo::list_all(ctx.directory.connection()) {
        Ok(c) => c,
        Err(e) => {
            println!("Error listing contacts: {}", e);
            return;
        }
    };

    if contacts.is_empty() {
        println!("No contacts yet. Use --import to load some.");
        return;
    }

    println!();
    for c in &contacts {
        println!("  {:>4}  {}", c.id, c.name.as_deref().unwrap_or("(no name)"));
    }
    println!();
    println!("{} contact(s)", contacts.len());
}

pub fn pick(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: pick <name>");
        return;
    }
    if let Some(contact_ref) = ctx.pick(args) {
        show_ref(ctx, &contact_ref);
    }
}

pub fn show(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: show <content://contacts/...>");
        return;
    }
    show_ref(ctx, &ContactRef::new(args));
}

pub fn json(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: json <name>");
        return;
    }
    let Some(contact_ref) = ctx.pick(args) else {
        return;
    };

    match ctx.resolve(&contact_ref) {
        Ok(record) => match serde_json::to_string_pretty(&record) {
            Ok(s) => println!("{}", s),
            Err(e) => println!("Error: {}", e),
        },
        Err(e) => print_resolve_error(&e),
    }
}

fn show_ref(ctx: &CLIContext, contact_ref: &ContactRef) {
    match ctx.resolve(contact_ref) {
        Ok(record) => {
            println!();
            for line in render(&record) {
                println!("{}", line);
            }
            println!();
        }
        Err(e) => print_resolve_error(&e),
    }
}

fn print_resolve_error(e: &ContactError) {
    match e {
        ContactError::NotFound { .. } => println!("Contact not found"),
        other => println!("Error: {}", other),
    }
}

/// Text rendering of a record, one line per field, with a fallback for
/// anything the directory had nothing for.
pub fn render(record: &ContactRecord) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("Name: {}", record.name.as_deref().unwrap_or("No name")));

    if record.phone_numbers.is_empty() {
        lines.push("Number: No number on file".into());
    } else {
        for phone in &record.phone_numbers {
            lines.push(format!("Number: {} ({})", phone.number, phone.label));
        }
    }

    if record.emails.is_empty() {
        lines.push("Email: No email on file".into());
    } else {
        for email in &record.emails {
            lines.push(format!("Email: {} ({})", email.address, email.label));
        }
    }

    lines.push(format!(
        "Date of Birth: {}",
        record.date_of_birth.as_deref().unwrap_or("No date of birth on file")
    ));

    if record.postal_addresses.is_empty() {
        lines.push("Postal Address: No postal address on file".into());
    } else {
        for address in &record.postal_addresses {
            lines.push(format!("Postal Address: {} ({})", address.formatted(), address.label));
        }
    }

    let photo = match (&record.photo_reference, &record.photo) {
        (None, _) => "No photo".to_string(),
        (Some(_), Some(p)) => format!("{}x{}", p.width, p.height),
        (Some(_), None) => "Photo unavailable".to_string(),
    };
    lines.push(format!("Photo: {}", photo));

    lines
}
