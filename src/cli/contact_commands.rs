use crate::cli::context::CLIContext;
use crate::error::TouchError;
use crate::model::*;
use crate::ops::*;
use crate::queries::*;
use crate::validation::trim_optional;

pub fn list(ctx: &CLIContext, args: &str) {
    let group = trim_optional(Some(args));
    let contacts = reminder_queries::filter_by_group(ctx.contacts.contacts(), group.as_deref());

    if contacts.is_empty() {
        match group {
            Some(g) => println!("No people found in '{}'.", g),
            None => println!("No people found. Use 'add' to add someone."),
        }
        return;
    }

    match &group {
        Some(g) => println!("People in {} ({}):", g, contacts.len()),
        None => println!("People ({}):", contacts.len()),
    }
    for contact in contacts {
        let last = contact
            .last_contacted_at
            .map(|at| format!(" - last contact {} ago", CLIContext::format_duration(CLIContext::now() - at)))
            .unwrap_or_else(|| " - never contacted".into());
        println!("  {} [{}] every {}{}", contact.name, contact.group, contact.period_label(), last);
    }
}

pub fn add(ctx: &mut CLIContext, args: &str) {
    let name = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("Name: ") {
            Some(s) => s,
            None => return,
        }
    };

    let period = match ctx.prompt("Period: ") {
        Some(s) => s,
        None => return,
    };

    let period_unit = match ctx.prompt("Unit (days/hours/minutes) [days]: ") {
        Some(s) if s.is_empty() => PeriodUnit::Days.to_string(),
        Some(s) => s,
        None => return,
    };

    println!("Groups: {}", ctx.groups.labels().join(", "));
    let default_group = ctx.groups.labels().first().cloned().unwrap_or_default();
    let group = match ctx.prompt(&format!("Group (new names are created) [{}]: ", default_group)) {
        Some(s) if s.is_empty() => default_group,
        Some(s) => s,
        None => return,
    };

    let input = NewContact::new(&name, &period, &period_unit, &group);
    match contact_ops::add_contact(&mut ctx.contacts, &mut ctx.groups, &input) {
        Ok(c) => println!("Added {} ({}), every {}", c.name, c.group, c.period_label()),
        Err(e) if e.is_validation() => println!("Not added: {}", e),
        Err(e @ TouchError::StorageWrite { .. }) => {
            println!("Added {} but not saved: {}. Use 'save' to retry.", name.trim(), e)
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn edit(ctx: &mut CLIContext, args: &str) {
    let contact = match if args.is_empty() { println!("Usage: edit <name>"); return; } else { ctx.find_contact(args) } {
        Some(c) => c,
        None => return,
    };

    println!("Editing {} (every {}). Press Enter to keep a value.", contact.name, contact.period_label());
    let period = match ctx.prompt(&format!("Period [{}]: ", contact.period)) {
        Some(s) => s,
        None => return,
    };
    let unit = match ctx.prompt(&format!("Unit [{}]: ", contact.period_unit)) {
        Some(s) => s,
        None => return,
    };

    match contact_ops::edit_period(&mut ctx.contacts, &contact.id, Some(period.as_str()), Some(unit.as_str())) {
        Ok(c) => println!("{} is now every {}.", c.name, c.period_label()),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn delete(ctx: &mut CLIContext, args: &str) {
    let contact = match if args.is_empty() { println!("Usage: delete <name>"); return; } else { ctx.find_contact(args) } {
        Some(c) => c,
        None => return,
    };

    let confirm = ctx.prompt(&format!("Delete {}? (y/N): ", contact.name)).unwrap_or_default();
    if !confirm.eq_ignore_ascii_case("y") {
        println!("Cancelled.");
        return;
    }

    match ctx.contacts.delete(&contact.id) {
        Ok(c) => println!("Deleted {}.", c.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn save(ctx: &CLIContext) {
    match ctx.contacts.save().and_then(|()| ctx.groups.save()) {
        Ok(()) => println!("Saved {} contact(s).", ctx.contacts.contacts().len()),
        Err(e) => ctx.print_error(&e),
    }
}
