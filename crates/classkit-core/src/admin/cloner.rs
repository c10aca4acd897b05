//! Bulk clone of student assignment repositories

use std::path::PathBuf;

use crate::error::Result;
use crate::git::clone::{clone_repository, CloneAuth};
use crate::traits::RepositoryProvider;
use crate::types::{
    AdminOutcome, Diagnostic, DiagnosticCategory, DiagnosticSeverity, Student,
};

/// Options for a bulk clone run
#[derive(Debug, Clone)]
pub struct CloneOptions {
    /// GitHub organization that owns the assignment repositories
    pub organization: String,
    /// Assignment name prefix, e.g. `assignment-01`
    pub assignment_prefix: String,
    /// Directory the repositories are cloned under
    pub dest_dir: PathBuf,
    /// Fixed delay between students, milliseconds
    pub pacing_ms: u64,
}

/// Clones each roster student's assignment repository under one directory.
///
/// Per-student failures (missing repository, clone error) are recorded as
/// diagnostics and never stop the run. An already-present destination
/// directory is a skip, not an error, so reruns pick up where they left off.
pub struct BulkCloner<'a, P> {
    provider: &'a P,
    options: &'a CloneOptions,
    auth: Option<CloneAuth>,
}

impl<'a, P: RepositoryProvider> BulkCloner<'a, P> {
    /// Create a bulk cloner; `auth` is required for private repositories
    pub fn new(provider: &'a P, options: &'a CloneOptions, auth: Option<CloneAuth>) -> Self {
        Self {
            provider,
            options,
            auth,
        }
    }

    /// Clone every roster student's repository, in roster order
    pub async fn clone_all(&self, students: &[Student]) -> AdminOutcome {
        let mut outcome = AdminOutcome::default();

        for student in students {
            self.clone_student(student, &mut outcome).await;

            if self.options.pacing_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(self.options.pacing_ms)).await;
            }
        }

        outcome
    }

    async fn clone_student(&self, student: &Student, outcome: &mut AdminOutcome) {
        let org = &self.options.organization;
        let repo_name = student.repo_name(&self.options.assignment_prefix);

        let repo = match self.provider.repository(org, &repo_name).await {
            Ok(repo) => repo,
            Err(e) => {
                outcome.diagnostics.push(Diagnostic {
                    severity: DiagnosticSeverity::SoftError,
                    category: DiagnosticCategory::Clone,
                    message: format!("{}: {}/{} unavailable: {}", student.id, org, repo_name, e),
                });
                return;
            }
        };

        let dest = self.options.dest_dir.join(&repo.name);
        if dest.exists() {
            outcome.diagnostics.push(Diagnostic {
                severity: DiagnosticSeverity::Warning,
                category: DiagnosticCategory::Clone,
                message: format!(
                    "{}: '{}' already exists, skipping",
                    student.id,
                    dest.display()
                ),
            });
            outcome.skipped.push(repo.name);
            return;
        }

        match self.clone_one(&repo.clone_url, dest).await {
            Ok(()) => outcome.succeeded.push(repo.name),
            Err(e) => {
                outcome.diagnostics.push(Diagnostic {
                    severity: DiagnosticSeverity::SoftError,
                    category: DiagnosticCategory::Clone,
                    message: format!("{}: cloning {} failed: {}", student.id, repo.full_name, e),
                });
            }
        }
    }

    async fn clone_one(&self, clone_url: &str, dest: PathBuf) -> Result<()> {
        clone_repository(clone_url, &dest, self.auth.as_ref()).await?;
        Ok(())
    }
}
