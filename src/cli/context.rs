use std::io::{self, Write};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::db::KeyValueStore;
use crate::model::*;
use crate::store::{ContactStore, GroupLabelStore};

pub struct CLIContext {
    pub contacts: ContactStore,
    pub groups: GroupLabelStore,
}

impl CLIContext {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            contacts: ContactStore::open(kv.clone()),
            groups: GroupLabelStore::open(kv),
        }
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

    /// Read a line, trimmed.
    pub fn prompt(&self, prompt: &str) -> Option<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    /// Find a contact by name query. Prints error if not found or ambiguous.
    pub fn find_contact(&self, args: &str) -> Option<Contact> {
        let query = args.trim();
        if query.is_empty() {
            return None;
        }

        let matches = self.contacts.find_by_name(query);
        match matches.len() {
            0 => {
                println!("No contact found matching '{}'", query);
                None
            }
            1 => Some(matches[0].clone()),
            _ => {
                if let Some(exact) = matches.iter().find(|c| c.name.eq_ignore_ascii_case(query)) {
                    return Some((*exact).clone());
                }
                println!("Multiple matches found:");
                for c in &matches {
                    println!("  {} ({})", c.name, c.group);
                }
                println!("Please be more specific.");
                None
            }
        }
    }

    pub fn format_duration(d: Duration) -> String {
        let minutes = d.num_minutes();
        match minutes {
            m if m < 1 => "less than a minute".into(),
            m if m < 60 => plural(m, "minute"),
            m if m < 60 * 24 => plural(m / 60, "hour"),
            m => plural(m / (60 * 24), "day"),
        }
    }

    pub fn now() -> DateTime<Utc> {
        Utc::now()
    }

    /// Print an error.
    pub fn print_error(&self, e: &crate::error::TouchError) {
        println!("Error: {}", e);
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}
