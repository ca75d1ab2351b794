use crate::cli::context::CLIContext;
use crate::queries::*;

pub fn list(ctx: &CLIContext) {
    let labels = ctx.groups.labels();
    if labels.is_empty() {
        println!("No groups yet. Use 'add-group <name>' to create one.");
        return;
    }

    println!("Groups ({}):", labels.len());
    for label in labels {
        let count = reminder_queries::filter_by_group(ctx.contacts.contacts(), Some(label.as_str())).len();
        println!("  {} ({})", label, count);
    }
}

pub fn add(ctx: &mut CLIContext, args: &str) {
    let name = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("Group name: ") {
            Some(s) if !s.is_empty() => s,
            _ => { println!("Name cannot be empty."); return; }
        }
    };

    match ctx.groups.add(&name) {
        Ok(true) => println!("Created group: {}", name.trim()),
        Ok(false) => println!("Group already exists: {}", name.trim()),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn remove(ctx: &mut CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: remove-group <name>");
        return;
    }

    match ctx.groups.remove(args) {
        Ok(true) => {
            let still_used = reminder_queries::filter_by_group(ctx.contacts.contacts(), Some(args)).len();
            println!("Removed group: {}", args.trim());
            if still_used > 0 {
                println!("{} contact(s) still list it as their group.", still_used);
            }
        }
        Ok(false) => println!("No group named '{}'", args.trim()),
        Err(e) => ctx.print_error(&e),
    }
}
