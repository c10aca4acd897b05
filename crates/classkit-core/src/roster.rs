//! Roster file loading
//!
//! A roster is a plain text file with one student GitHub login per line.
//! Lines are trimmed; empty lines and `#` comments are skipped.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::Student;

/// Load a roster file into an ordered student list.
///
/// Roster order is load order; every downstream operation processes students
/// in exactly this order.
pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<Vec<Student>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read roster file '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(parse_roster(&content))
}

/// Parse roster text into students, preserving line order.
pub fn parse_roster(content: &str) -> Vec<Student> {
    content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(Student::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_trims_and_skips_blanks() {
        let students = parse_roster("alice\n  bob  \n\n# dropped the course\ncarol\n");
        let ids: Vec<&str> = students.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_parse_preserves_order() {
        let students = parse_roster("zed\nalice\nmike\n");
        let ids: Vec<&str> = students.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["zed", "alice", "mike"]);
    }

    #[test]
    fn test_load_roster_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "alice\nbob").unwrap();

        let students = load_roster(file.path()).unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].id, "alice");
    }

    #[test]
    fn test_load_roster_missing_file() {
        let err = load_roster("/definitely/not/here.txt").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Config);
    }
}
