use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Blacklist {
    entries: Vec<String>,
}

impl Blacklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: impl Into<String>) -> bool {
        let entry = entry.into();
        if entry.is_empty() || self.entries.contains(&entry) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn contains(&self, title: &str) -> bool {
        self.entries.iter().any(|entry| title.contains(entry.as_str()))
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blacklist_substring_match() {
        let mut blacklist = Blacklist::new();
        assert!(blacklist.add("List of"));
        assert!(!blacklist.add("List of"));
        assert!(!blacklist.add(""));

        assert!(blacklist.contains("List of rivers"));
        assert!(!blacklist.contains("Rivers"));
        assert_eq!(blacklist.entries(), ["List of".to_owned()]);
    }
}
