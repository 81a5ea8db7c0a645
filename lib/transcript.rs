/// The append-only log of chat lines and notices.
///
/// Entries are never deduplicated, rewritten, or evicted.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub struct Transcript {
    entries: Vec<String>,
}

impl Transcript {
    /// Appends an entry to the log.
    pub fn append(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    /// All entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// The most recent entry, if any.
    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// The number of entries in the log.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<String> for Transcript {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn entries_are_kept_in_order_of_arrival(lines: Vec<String>) {
        let mut transcript = Transcript::default();
        transcript.extend(lines.clone());

        assert_eq!(transcript.len(), lines.len());
        assert!(transcript.iter().eq(lines.iter().map(String::as_str)));
        assert_eq!(transcript.last(), lines.last().map(String::as_str));
    }

    #[proptest]
    fn duplicate_entries_are_kept(line: String) {
        let mut transcript = Transcript::default();
        transcript.append(line.clone());
        transcript.append(line.clone());

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.last(), Some(&*line));
    }
}
