use std::collections::HashMap;

/// Hands out region ids of the form `"<name>-<n>"`.
///
/// Unnamed regions share the effective name `unnamed`. Ids are assigned when
/// a start marker is seen, so they stay stable for a given document no
/// matter how the starts are later paired.
#[derive(Debug, Default)]
pub struct RegionIds {
    seen: HashMap<String, usize>,
}

impl RegionIds {
    pub fn next_id(&mut self, name: &str) -> String {
        let effective = if name.is_empty() { "unnamed" } else { name };
        let count = self.seen.entry(effective.to_string()).or_insert(0);
        *count += 1;
        format!("{effective}-{count}")
    }
}
