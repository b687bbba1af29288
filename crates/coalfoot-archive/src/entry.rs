/// One named file inside an archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Relative path as written in the file marker; may contain `/`.
    pub name: String,
    /// Raw content, written out verbatim.
    pub data: Vec<u8>,
}

impl Entry {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> u64 { self.data.len() as u64 }
}

/// A parsed text archive: a leading comment and entries in file order.
///
/// Entry names are kept as given; two entries may share a name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Archive {
    pub comment: Vec<u8>,
    pub entries: Vec<Entry>,
}

impl Archive {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            comment: Vec::new(),
            entries,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<Vec<u8>>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn total_bytes(&self) -> u64 { self.entries.iter().map(Entry::size).sum() }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}
