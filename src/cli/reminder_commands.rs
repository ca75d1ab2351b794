use crate::cli::context::CLIContext;
use crate::ops::*;
use crate::queries::*;
use crate::queries::reminder_queries::OverdueStatus;

pub fn due(ctx: &CLIContext) {
    let now = CLIContext::now();
    let due = reminder_queries::due_list(ctx.contacts.contacts(), now);

    if due.is_empty() {
        println!("You are up to date!");
        return;
    }

    println!("Reach out to ({}):", due.len());
    for contact in due {
        let status = reminder_queries::reminder_status(contact, now);
        let detail = match status.overdue_status {
            OverdueStatus::NeverContacted => "never contacted".to_string(),
            OverdueStatus::Overdue(d) => {
                let last = status
                    .since_last_contact
                    .map(|s| format!(", last contact {} ago", CLIContext::format_duration(s)))
                    .unwrap_or_default();
                format!("overdue by {}{}", CLIContext::format_duration(d), last)
            }
            OverdueStatus::DueIn(_) => continue,
        };
        println!("  {} [{}] every {} - {}", contact.name, contact.group, contact.period_label(), detail);
    }
}

pub fn upcoming(ctx: &CLIContext) {
    let now = CLIContext::now();
    let all = reminder_queries::all_reminders(ctx.contacts.contacts(), now);
    let waiting: Vec<_> = all.iter().filter(|s| !s.overdue_status.is_due()).collect();

    if waiting.is_empty() {
        println!("Nobody is waiting on a future reminder.");
        return;
    }

    println!("Coming up ({}):", waiting.len());
    for status in waiting {
        if let OverdueStatus::DueIn(d) = status.overdue_status {
            println!("  {} - due in {}", status.contact.name, CLIContext::format_duration(d));
        }
    }
}

pub fn contacted(ctx: &mut CLIContext, args: &str) {
    let contact = match if args.is_empty() { println!("Usage: contacted <name>"); return; } else { ctx.find_contact(args) } {
        Some(c) => c,
        None => return,
    };

    match contact_ops::mark_contacted_now(&mut ctx.contacts, &contact.id) {
        Ok(c) => println!("Marked {} as contacted. Next reminder in {}.", c.name, c.period_label()),
        Err(e) => ctx.print_error(&e),
    }
}
