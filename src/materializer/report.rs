use super::entry::EntryOutcome;

/// What a successful (or partially successful) materialization created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Names of the root's entries that were materialized, in traversal order.
    pub top_level: Vec<String>,
    pub directories: usize,
    pub files: usize,
    pub placeholders: usize,
}

impl MaterializeReport {
    pub(super) fn record(&mut self, outcome: EntryOutcome) {
        match outcome {
            EntryOutcome::File => self.files += 1,
            EntryOutcome::Directory => self.directories += 1,
            EntryOutcome::EmptyDirectory => {
                self.directories += 1;
                self.placeholders += 1;
            }
        }
    }

    pub(super) fn merge(&mut self, other: MaterializeReport) {
        self.top_level.extend(other.top_level);
        self.directories += other.directories;
        self.files += other.files;
        self.placeholders += other.placeholders;
    }
}
