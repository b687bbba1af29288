/// What to do when two entries of one archive resolve to the same path, or
/// one entry's path is a parent directory of another's.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Write entries in order; a later entry overwrites an earlier one.
    #[default]
    LastWriteWins,
    /// Fail the pre-flight check before anything is written.
    Reject,
}

#[derive(Clone, Debug, Default)]
pub struct ExtractOptions {
    pub duplicates: DuplicatePolicy,
}

impl ExtractOptions {
    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn reject_duplicates(self) -> Self { self.duplicates(DuplicatePolicy::Reject) }
}
