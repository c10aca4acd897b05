//! CSV grade report writing

use std::fs::File;
use std::path::Path;

use crate::error::Result;
use crate::types::GradeRow;

/// Column header of the grade report
pub const CSV_HEADER: [&str; 4] = ["github_id", "points", "possible_points", "run_url"];

/// Incremental CSV writer for grade rows.
///
/// The header is written at creation and every row is flushed as it arrives,
/// so an interrupted run leaves a valid file with all rows determined so far.
pub struct GradeReportWriter {
    writer: csv::Writer<File>,
}

impl GradeReportWriter {
    /// Create (truncate) the report file and write the header
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(CSV_HEADER)?;
        writer.flush()?;
        Ok(Self { writer })
    }

    /// Append one row and flush it to disk
    pub fn write_row(&mut self, row: &GradeRow) -> Result<()> {
        self.writer.serialize(row)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_header_written_on_create() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grades.csv");
        let _writer = GradeReportWriter::create(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "github_id,points,possible_points,run_url\n");
    }

    #[test]
    fn test_rows_flushed_incrementally() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grades.csv");
        let mut writer = GradeReportWriter::create(&path).unwrap();

        writer
            .write_row(&GradeRow {
                student_id: "alice".into(),
                points: 7,
                possible_points: Some(10),
                run_url: "https://github.test/run/1".into(),
            })
            .unwrap();

        // Visible on disk before the writer is dropped
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("alice,7,10,https://github.test/run/1\n"));
    }

    #[test]
    fn test_absent_possible_points_is_empty_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grades.csv");
        let mut writer = GradeReportWriter::create(&path).unwrap();

        writer.write_row(&GradeRow::unresolved("bob")).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("bob,0,,n/a\n"));
    }

    #[test]
    fn test_rows_preserve_write_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grades.csv");
        let mut writer = GradeReportWriter::create(&path).unwrap();

        for (id, points) in [("zed", 3), ("alice", 9)] {
            writer
                .write_row(&GradeRow {
                    student_id: id.into(),
                    points,
                    possible_points: Some(10),
                    run_url: "n/a".into(),
                })
                .unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("zed,"));
        assert!(lines[2].starts_with("alice,"));
    }
}
