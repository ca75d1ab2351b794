/// Group labels offered before the user has created any.
pub const DEFAULT_GROUPS: [&str; 2] = ["Spain", "Korea"];

pub fn default_groups() -> Vec<String> {
    DEFAULT_GROUPS.iter().map(|g| g.to_string()).collect()
}

/// Drop blank and repeated labels, keeping the first occurrence of each.
pub fn normalize(labels: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        let trimmed = label.trim();
        if !trimmed.is_empty() && !seen.iter().any(|s| s == trimmed) {
            seen.push(trimmed.to_string());
        }
    }
    seen
}
