//! # Classkit Core
//!
//! GitHub Classroom administration library. Three bulk operations over an
//! organization's assignment repositories:
//!
//! - **Grade harvesting** — walk a roster, find each student's first commit
//!   with a parseable autograder check run, collect `points/possible` rows
//!   into a CSV report and a score histogram
//! - **Bulk clone** — clone every student's assignment repository under one
//!   directory
//! - **Bulk delete** — remove repositories whose names carry a roster
//!   student's id suffix
//!
//! All three are sequential, one student at a time, with a fixed pacing
//! delay between remote calls. Per-item failures are collected as
//! diagnostics; a run never aborts because one student's repository is
//! missing or one check run is malformed.
//!
//! ## Example
//!
//! ```no_run
//! use classkit_core::{harvest_grades, ClassroomApiClient, HarvestOptions, Student};
//!
//! # async fn example() -> classkit_core::Result<()> {
//! let client = ClassroomApiClient::from_env()?;
//! let options = HarvestOptions {
//!     organization: "tulane-cmps2200".to_string(),
//!     assignment_prefix: "assignment-01".to_string(),
//!     ..Default::default()
//! };
//! let students = vec![Student::new("alice"), Student::new("bob")];
//!
//! let outcome = harvest_grades(&client, &options, &students).await;
//! println!("graded {} students", outcome.histogram.total());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod admin;
pub mod config;
pub mod error;
pub mod filter;
pub mod git;
pub mod harvest;
pub mod http;
pub mod output;
pub mod roster;
pub mod traits;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use filter::RepoFilter;
pub use harvest::{GradeHarvester, Score, ScoreParseError};
pub use http::ClassroomApiClient;
pub use roster::load_roster;
pub use traits::RepositoryProvider;
pub use types::{
    AdminOutcome, CheckRun, CommitRef, Diagnostic, DiagnosticCategory, DiagnosticSeverity,
    GradeHistogram, GradeRow, HarvestOptions, HarvestOutcome, Repository, Student,
};

/// Harvest grades for a roster of students.
///
/// This is the main entry point for the library. Per-student and per-commit
/// failures are isolated into [`Diagnostic`]s on the returned outcome; the
/// call itself never fails.
///
/// # Example
///
/// ```no_run
/// use classkit_core::{harvest_grades, ClassroomApiClient, HarvestOptions, Student};
///
/// # async fn example() -> classkit_core::Result<()> {
/// let client = ClassroomApiClient::from_env()?;
/// let options = HarvestOptions {
///     organization: "cs101".to_string(),
///     assignment_prefix: "lab-03".to_string(),
///     ..Default::default()
/// };
///
/// let outcome = harvest_grades(&client, &options, &[Student::new("alice")]).await;
/// println!("{} rows", outcome.rows.len());
/// # Ok(())
/// # }
/// ```
pub async fn harvest_grades<P: RepositoryProvider>(
    provider: &P,
    options: &HarvestOptions,
    students: &[Student],
) -> HarvestOutcome {
    GradeHarvester::new(provider, options).harvest(students).await
}

/// Synchronous variant of [`harvest_grades`].
///
/// This creates a new Tokio runtime and blocks on the async version.
/// Prefer the async version if you're already in an async context.
pub fn harvest_grades_sync<P: RepositoryProvider>(
    provider: &P,
    options: &HarvestOptions,
    students: &[Student],
) -> Result<HarvestOutcome> {
    let runtime = tokio::runtime::Runtime::new().map_err(|e| Error::Runtime(e.to_string()))?;
    Ok(runtime.block_on(harvest_grades(provider, options, students)))
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_library_version() {
        // Smoke test to ensure library compiles
        let _ = env!("CARGO_PKG_VERSION");
    }
}
