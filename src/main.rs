use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use pick_contact::config::Settings;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut settings = Settings::from_env();
    let mut args = std::env::args().skip(1);
    let mut import_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--file" | "-f" => match args.next() {
                Some(p) => settings.db_path = PathBuf::from(p),
                None => {
                    eprintln!("Error: --file requires a path argument");
                    std::process::exit(1);
                }
            },
            "--import" => {
                import_path = args.next().map(PathBuf::from);
                if import_path.is_none() {
                    eprintln!("Error: --import requires a JSON file path");
                    std::process::exit(1);
                }
            }
            "--allow-missing-name" => settings.allow_missing_name = true,
            "--no-photos" => settings.decode_photos = false,
            "--help" | "-h" => {
                println!("Pick Contact - resolve contacts from a local directory");
                println!();
                println!("Usage: pick-contact [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --file <PATH>        Directory database path (default: .data/contacts.db)");
                println!("  --import <JSON_PATH>     Seed a new directory from a JSON file");
                println!("  --allow-missing-name     Resolve contacts that have no display name");
                println!("  --no-photos              Do not decode contact photos");
                println!("  -h, --help               Show this help");
                println!();
                println!("Environment:");
                println!("  PICK_CONTACT_DB, PICK_CONTACT_ALLOW_MISSING_NAME, PICK_CONTACT_DECODE_PHOTOS, RUST_LOG");
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Use --help for usage information.");
                std::process::exit(1);
            }
        }
    }

    if let Some(dir) = settings.db_path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                eprintln!("Error: could not create {}: {}", dir.display(), e);
                std::process::exit(1);
            }
        }
    }

    if let Some(json_path) = import_path {
        println!("Importing from {}...", json_path.display());
        if settings.db_path.exists() {
            eprintln!("Error: Database file {} already exists.", settings.db_path.display());
            eprintln!("Remove it first or use --file to specify a different path.");
            std::process::exit(1);
        }
        match pick_contact::migrate::import_json(&json_path, &settings.db_path) {
            Ok(stats) => {
                println!("Import complete!");
                println!("  Contacts: {}", stats.contacts);
                println!("  Phones: {}", stats.phones);
                println!("  Emails: {}", stats.emails);
                println!("  Addresses: {}", stats.addresses);
                println!("  Photos: {}", stats.photos);
            }
            Err(e) => {
                eprintln!("Import failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    pick_contact::cli::run(&settings);
}
