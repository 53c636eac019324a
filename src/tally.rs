use std::collections::HashMap;

/// Commit totals per repository, iterated in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PushTally {
    order: Vec<String>,
    counts: HashMap<String, u64>,
}

impl PushTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `commits` to the running total for `repo`, starting from zero when unseen.
    pub fn add(&mut self, repo: &str, commits: u64) {
        match self.counts.get_mut(repo) {
            Some(total) => *total += commits,
            None => {
                self.order.push(repo.to_string());
                self.counts.insert(repo.to_string(), commits);
            }
        }
    }

    pub fn get(&self, repo: &str) -> u64 {
        self.counts.get(repo).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.order.iter().map(move |repo| (repo.as_str(), self.get(repo)))
    }
}

/// "Pushed N commit(s) to R"
pub fn push_line(repo: &str, commits: u64) -> String {
    let noun = if commits == 1 { "commit" } else { "commits" };
    format!("Pushed {} {} to {}", commits, noun, repo)
}
