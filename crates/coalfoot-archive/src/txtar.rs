//! The txtar text archive format.
//!
//! An archive is a comment followed by zero or more files. Each file starts
//! with a marker line of the form `-- NAME --` and runs until the next marker
//! line or the end of input:
//!
//! ```text
//! comment text
//! -- a/b.txt --
//! hello
//! -- c.txt --
//! world
//! ```
//!
//! The name is trimmed of surrounding whitespace and must not be empty. Any
//! bytes are accepted in a name; invalid UTF-8 sequences become U+FFFD. A
//! comment or file body that does not end in a newline gets one appended.

use std::borrow::Cow;
use std::path::Path;

use crate::entry::{Archive, Entry};
use crate::error::{ArchiveError, ParseError, Result};

const MARKER: &[u8] = b"-- ";
const MARKER_END: &[u8] = b" --";
const NEWLINE_MARKER: &[u8] = b"\n-- ";

impl Archive {
    /// Parse without requiring any file markers; never fails.
    pub fn from_bytes(data: &[u8]) -> Self {
        let (comment, mut next) = find_file_marker(data);
        let mut entries = Vec::new();

        while let Some((name, rest)) = next {
            let (body, following) = find_file_marker(rest);
            entries.push(Entry {
                name,
                data: fix_newline(body).into_owned(),
            });
            next = following;
        }

        Archive {
            comment: fix_newline(comment).into_owned(),
            entries,
        }
    }
}

/// Parse archive bytes, requiring at least one file marker.
pub fn parse(data: &[u8]) -> std::result::Result<Archive, ParseError> {
    let archive = Archive::from_bytes(data);
    if archive.is_empty() {
        return Err(ParseError::NoFiles);
    }
    Ok(archive)
}

/// Read and parse the archive at `path`.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Archive> {
    let path = path.as_ref();
    let parse_error = |source| ArchiveError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let data = std::fs::read(path).map_err(|e| parse_error(ParseError::Read(e)))?;
    parse(&data).map_err(parse_error)
}

/// Serialize `archive` back to txtar bytes.
pub fn format(archive: &Archive) -> Vec<u8> {
    let mut out = Vec::with_capacity(archive.comment.len() + archive.total_bytes() as usize);
    out.extend_from_slice(&fix_newline(&archive.comment));
    for entry in &archive.entries {
        out.extend_from_slice(MARKER);
        out.extend_from_slice(entry.name.as_bytes());
        out.extend_from_slice(MARKER_END);
        out.push(b'\n');
        out.extend_from_slice(&fix_newline(&entry.data));
    }
    out
}

/// Split `data` at the first marker line.
///
/// Returns the bytes before it and, if a marker was found, its name and the
/// bytes after the marker line.
fn find_file_marker(data: &[u8]) -> (&[u8], Option<(String, &[u8])>) {
    let mut i = 0;
    loop {
        if let Some((name, after)) = marker_at(&data[i..]) {
            return (&data[..i], Some((name, after)));
        }
        match find(&data[i..], NEWLINE_MARKER) {
            // step past the newline to the start of the candidate marker
            Some(j) => i += j + 1,
            None => return (data, None),
        }
    }
}

/// Recognize a marker line at the very start of `data`.
fn marker_at(data: &[u8]) -> Option<(String, &[u8])> {
    if !data.starts_with(MARKER) {
        return None;
    }

    let (line, after) = match data.iter().position(|&b| b == b'\n') {
        Some(end) => (&data[..end], &data[end + 1..]),
        None => (data, &data[data.len()..]),
    };

    if line.len() < MARKER.len() + MARKER_END.len() || !line.ends_with(MARKER_END) {
        return None;
    }

    // Invalid UTF-8 in a name is replaced, not rejected.
    let name = String::from_utf8_lossy(&line[MARKER.len()..line.len() - MARKER_END.len()]);
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    Some((name.to_string(), after))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

fn fix_newline(data: &[u8]) -> Cow<'_, [u8]> {
    match data.last() {
        None | Some(b'\n') => Cow::Borrowed(data),
        Some(_) => {
            let mut owned = Vec::with_capacity(data.len() + 1);
            owned.extend_from_slice(data);
            owned.push(b'\n');
            Cow::Owned(owned)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comment_and_files() {
        let archive = parse(b"comment\n-- a/b.txt --\nhello\n-- c.txt --\nworld\n").unwrap();
        assert_eq!(archive.comment, b"comment\n");
        assert_eq!(
            archive.entries,
            vec![Entry::new("a/b.txt", "hello\n"), Entry::new("c.txt", "world\n")]
        );
    }

    #[test]
    fn marker_on_first_line_gives_empty_comment() {
        let archive = parse(b"-- only --\nx\n").unwrap();
        assert!(archive.comment.is_empty());
        assert_eq!(archive.entries, vec![Entry::new("only", "x\n")]);
    }

    #[test]
    fn missing_final_newline_is_added() {
        let archive = parse(b"-- a --\nno newline").unwrap();
        assert_eq!(archive.entries[0].data, b"no newline\n");
    }

    #[test]
    fn empty_body_stays_empty() {
        let archive = parse(b"-- a --\n-- b --\n").unwrap();
        assert_eq!(archive.entries, vec![Entry::new("a", ""), Entry::new("b", "")]);
    }

    #[test]
    fn marker_without_trailing_newline() {
        let archive = parse(b"-- last --").unwrap();
        assert_eq!(archive.entries, vec![Entry::new("last", "")]);
    }

    #[test]
    fn name_is_trimmed() {
        let archive = parse(b"--   spaced name.txt   --\nx\n").unwrap();
        assert_eq!(archive.entries[0].name, "spaced name.txt");
    }

    #[test]
    fn non_utf8_name_is_still_a_marker() {
        let mut data = b"-- caf".to_vec();
        data.extend_from_slice(&[0xe9]);
        data.extend_from_slice(b".txt --\nbody\n");

        let archive = parse(&data).unwrap();
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.entries[0].name, "caf\u{fffd}.txt");
        assert_eq!(archive.entries[0].data, b"body\n");
    }

    #[test]
    fn malformed_markers_are_content() {
        let data = b"-- a --\n--  --\n-- b\n--c --\n -- d --\n-- a -- trailing\n";
        let archive = parse(data).unwrap();
        assert_eq!(archive.len(), 1);
        assert_eq!(
            archive.entries[0].data,
            b"--  --\n-- b\n--c --\n -- d --\n-- a -- trailing\n"
        );
    }

    #[test]
    fn crlf_marker_is_not_a_marker() {
        let err = parse(b"-- a --\r\nbody\r\n").unwrap_err();
        assert!(matches!(err, ParseError::NoFiles));
    }

    #[test]
    fn no_markers_is_an_error() {
        assert!(matches!(parse(b"just text\n"), Err(ParseError::NoFiles)));
        assert!(matches!(parse(b""), Err(ParseError::NoFiles)));
    }

    #[test]
    fn from_bytes_keeps_comment_when_no_files() {
        let archive = Archive::from_bytes(b"just text");
        assert!(archive.is_empty());
        assert_eq!(archive.comment, b"just text\n");
    }

    #[test]
    fn duplicate_names_are_preserved_in_order() {
        let archive = parse(b"-- a --\n1\n-- a --\n2\n").unwrap();
        assert_eq!(archive.entries, vec![Entry::new("a", "1\n"), Entry::new("a", "2\n")]);
    }

    #[test]
    fn bodies_keep_arbitrary_bytes() {
        let mut data = b"-- bin --\n".to_vec();
        data.extend_from_slice(&[0xff, 0x00, b'\n']);
        let archive = parse(&data).unwrap();
        assert_eq!(archive.entries[0].data, [0xff, 0x00, b'\n']);
    }

    #[test]
    fn format_matches_canonical_input() {
        let input: &[u8] = b"comment\n-- a/b.txt --\nhello\n-- c.txt --\nworld\n";
        assert_eq!(format(&parse(input).unwrap()), input);
    }

    #[test]
    fn format_adds_missing_newlines() {
        let archive = Archive::new(vec![Entry::new("a", "x")]).with_comment("c");
        assert_eq!(format(&archive), b"c\n-- a --\nx\n");
    }

    #[test]
    fn parse_file_missing_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_file(dir.path().join("absent.txtar")).unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::Parse {
                source: ParseError::Read(_),
                ..
            }
        ));
    }
}
