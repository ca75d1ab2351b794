pub mod context;
pub mod contact_commands;
pub mod group_commands;
pub mod reminder_commands;

use std::path::Path;
use std::sync::Arc;

use crate::db::SqliteKv;
use context::CLIContext;

/// Run the interactive REPL.
pub fn run(db_path: &Path) {
    println!("touchbase - keep in touch with the people who matter");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let kv = match SqliteKv::open(db_path) {
        Ok(kv) => kv,
        Err(e) => {
            eprintln!("Error opening database: {}", e);
            return;
        }
    };

    let mut ctx = CLIContext::new(Arc::new(kv));

    if !ctx.contacts.is_loaded() {
        println!("Stored contacts could not be read. Nothing will be saved until they load.");
        println!();
    } else if ctx.contacts.contacts().is_empty() {
        println!("Good job, your network is healthy!");
        println!();
    } else {
        reminder_commands::due(&ctx);
        println!();
    }

    repl_loop(&mut ctx);
}

fn repl_loop(ctx: &mut CLIContext) {
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

            // Reminders
            "due" | "remind" | "reminders" => reminder_commands::due(ctx),
            "upcoming" => reminder_commands::upcoming(ctx),
            "contacted" | "done" => reminder_commands::contacted(ctx, args),

            // Contacts
            "list" | "ls" | "people" => contact_commands::list(ctx, args),
            "add" | "add-person" => contact_commands::add(ctx, args),
            "edit" => contact_commands::edit(ctx, args),
            "delete" | "rm" => contact_commands::delete(ctx, args),
            "save" => contact_commands::save(ctx),

            // Groups
            "groups" => group_commands::list(ctx),
            "add-group" => group_commands::add(ctx, args),
            "remove-group" => group_commands::remove(ctx, args),

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

  Reminders:
    due                     Show who to reach out to now
    upcoming                Show when everyone else comes due
    contacted <name>        Mark a person as contacted just now

  People:
    list [group]            List everyone, or only one group
    add [name]              Add a person (interactive)
    edit <name>             Change how often to contact someone
    delete <name>           Remove a person
    save                    Write the list to disk again

  Groups:
    groups                  List groups
    add-group <name>        Create a group
    remove-group <name>     Remove a group (people keep their group)

  Other:
    help                    Show this help
    exit / quit / q         Exit

TIPS:
  - Names are case-insensitive and partial matches work
  - Periods can be fractional, e.g. 1.5 hours"#);
}
