pub mod context;
pub mod contact_commands;

use tracing::info;

use crate::config::Settings;
use crate::db::SqliteDirectory;
use context::CLIContext;

/// Run the interactive REPL.
pub fn run(settings: &Settings) {
    println!("Pick Contact");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let directory = match SqliteDirectory::open(&settings.db_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error opening directory: {}", e);
            return;
        }
    };
    info!(path = %settings.db_path.display(), "directory opened");

    let ctx = CLIContext::new(directory, settings.resolver_config());
    repl_loop(&ctx);
}

fn repl_loop(ctx: &CLIContext) {
    loop {
        let input = match ctx.read_line("> ") {
            Some(s) => s,
            None => break,
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, args) = parse_command(input);

        match command {
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" => break,

            "list" | "ls" => contact_commands::list(ctx),
            "pick" => contact_commands::pick(ctx, args),
            "show" => contact_commands::show(ctx, args),
            "json" => contact_commands::json(ctx, args),

            _ => println!("Unknown command: {}. Type 'help' for commands.", command),
        }
    }
}

/// Split input into command and the rest of the line.
fn parse_command(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(|c: char| c == ' ' || c == '\t') {
        Some(pos) => (&input[..pos], input[pos..].trim()),
        None => (input, ""),
    }
}

fn print_help() {
    println!(r#"
COMMANDS:

    list                    List all contacts
    pick <name>             Pick a contact by name and show its details
    show <reference>        Resolve a content://contacts/... reference
    json <name>             Pick a contact and print it as JSON
    help                    Show this help
    exit / quit / q         Exit

TIPS:
  - Names are case-insensitive and partial matches work
  - Set RUST_LOG=debug to see each directory lookup"#);
}
