//! Core type definitions for classroom administration runs

use std::collections::BTreeMap;

use serde::Serialize;

/// One roster entry — a student's GitHub login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// GitHub login as it appears in the roster file
    pub id: String,
}

impl Student {
    /// Create a student from a roster line (caller trims)
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Repository name for this student under an assignment prefix
    pub fn repo_name(&self, assignment_prefix: &str) -> String {
        format!("{}-{}", assignment_prefix, self.id)
    }
}

/// One CSV output row, immutable once written.
///
/// Serializes in the column order of the report header:
/// `github_id,points,possible_points,run_url`. An unresolvable repository
/// produces `points = 0`, an empty `possible_points` field, and `"n/a"` as
/// the run URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeRow {
    /// Student GitHub login
    #[serde(rename = "github_id")]
    pub student_id: String,
    /// Awarded points
    pub points: i64,
    /// Maximum points, absent when no grade was found
    pub possible_points: Option<i64>,
    /// Web link to the check run that produced the grade, `"n/a"` otherwise
    pub run_url: String,
}

impl GradeRow {
    /// Fallback row for a student whose repository could not be resolved
    pub fn unresolved(student_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            points: 0,
            possible_points: None,
            run_url: "n/a".to_string(),
        }
    }

    /// Tab-separated console form, matching the per-student progress line
    pub fn tab_line(&self) -> String {
        let possible = self
            .possible_points
            .map(|p| p.to_string())
            .unwrap_or_default();
        format!(
            "{}\t{}\t{}\t{}",
            self.student_id, self.points, possible, self.run_url
        )
    }
}

/// Distribution of awarded scores across a run.
///
/// Backed by a `BTreeMap` so iteration is always in ascending score order,
/// which is the order the console summary prints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeHistogram {
    counts: BTreeMap<i64, u32>,
}

impl GradeHistogram {
    /// Empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one awarded score
    pub fn record(&mut self, points: i64) {
        *self.counts.entry(points).or_insert(0) += 1;
    }

    /// Number of students counted
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// True when no student has been counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate `(score, count)` pairs in ascending score order
    pub fn iter(&self) -> impl Iterator<Item = (i64, u32)> + '_ {
        self.counts.iter().map(|(&score, &count)| (score, count))
    }
}

/// Severity of a soft-failure record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    /// Informational; the run proceeded as intended
    Warning,
    /// A remote call or parse failed and was skipped
    SoftError,
}

/// What part of a run produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCategory {
    /// Repository lookup failed for a student
    RepoLookup,
    /// Commit listing failed for a repository
    CommitList,
    /// Check-run fetch failed for a commit
    CheckRun,
    /// No commit yielded a parseable grade
    GradeParse,
    /// CSV row could not be written
    CsvWrite,
    /// Clone of a student repository failed or was skipped
    Clone,
    /// Deletion of a repository failed
    Delete,
}

/// One soft-failure record collected during a run.
///
/// Bulk operations never abort on a per-item failure; they record one of
/// these and continue with the next item.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// How severe the failure was
    pub severity: DiagnosticSeverity,
    /// Which stage produced it
    pub category: DiagnosticCategory,
    /// Human-readable description, always naming the affected item
    pub message: String,
}

/// Everything a grade-harvesting run produced
#[derive(Debug, Default)]
pub struct HarvestOutcome {
    /// One row per graded or unresolvable student, in roster order
    pub rows: Vec<GradeRow>,
    /// Distribution of awarded scores
    pub histogram: GradeHistogram,
    /// Soft failures encountered along the way
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of a bulk clone or bulk delete run
#[derive(Debug, Default)]
pub struct AdminOutcome {
    /// Repository names the operation completed for
    pub succeeded: Vec<String>,
    /// Repository names skipped (dry run, already present, filtered out)
    pub skipped: Vec<String>,
    /// Soft failures encountered along the way
    pub diagnostics: Vec<Diagnostic>,
}

/// Options shared by every grade-harvesting run
#[derive(Debug, Clone)]
pub struct HarvestOptions {
    /// GitHub organization that owns the assignment repositories
    pub organization: String,
    /// Assignment name prefix, e.g. `assignment-01`
    pub assignment_prefix: String,
    /// Fixed delay between students, milliseconds
    pub pacing_ms: u64,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            organization: String::new(),
            assignment_prefix: String::new(),
            pacing_ms: 50,
        }
    }
}

/// A resolved repository, as much of it as the tool needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Bare repository name, e.g. `assignment-01-alice`
    pub name: String,
    /// `owner/name` form
    pub full_name: String,
    /// Web link
    pub html_url: String,
    /// HTTPS clone URL
    pub clone_url: String,
}

/// A commit reference from the remote listing, newest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    /// Commit SHA
    pub sha: String,
    /// Author timestamp as Unix epoch seconds, 0 when unparseable
    pub authored_at: i64,
}

/// An automated check run attached to a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRun {
    /// Check-run id
    pub id: u64,
    /// Web link to the run, used as grade evidence
    pub html_url: String,
    /// Free-text output, carries the `X/Y` score by convention
    pub output_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_repo_name() {
        let s = Student::new("alice");
        assert_eq!(s.repo_name("assignment-01"), "assignment-01-alice");
    }

    #[test]
    fn test_unresolved_row_shape() {
        let row = GradeRow::unresolved("bob");
        assert_eq!(row.student_id, "bob");
        assert_eq!(row.points, 0);
        assert_eq!(row.possible_points, None);
        assert_eq!(row.run_url, "n/a");
    }

    #[test]
    fn test_tab_line_with_and_without_possible() {
        let graded = GradeRow {
            student_id: "alice".into(),
            points: 7,
            possible_points: Some(10),
            run_url: "https://example.test/run/1".into(),
        };
        assert_eq!(graded.tab_line(), "alice\t7\t10\thttps://example.test/run/1");

        let fallback = GradeRow::unresolved("bob");
        assert_eq!(fallback.tab_line(), "bob\t0\t\tn/a");
    }

    #[test]
    fn test_histogram_ascending_order() {
        let mut h = GradeHistogram::new();
        h.record(7);
        h.record(3);
        h.record(7);

        let pairs: Vec<(i64, u32)> = h.iter().collect();
        assert_eq!(pairs, vec![(3, 1), (7, 2)]);
        assert_eq!(h.total(), 3);
        assert!(!h.is_empty());
    }

    #[test]
    fn test_harvest_options_default_pacing() {
        let opts = HarvestOptions::default();
        assert_eq!(opts.pacing_ms, 50);
    }
}
