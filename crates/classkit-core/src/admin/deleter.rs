//! Bulk delete of assignment repositories by student-id suffix

use crate::filter::RepoFilter;
use crate::http::ClassroomApiClient;
use crate::types::{
    AdminOutcome, Diagnostic, DiagnosticCategory, DiagnosticSeverity, Repository, Student,
};

/// Select the repositories a delete run targets.
///
/// A repository is a target when its name ends with `-{student_id}` for some
/// roster student AND passes the optional name filter. Listing order is
/// preserved so dry-run output matches what a confirmed run would delete.
pub fn select_delete_targets<'r>(
    repos: &'r [Repository],
    students: &[Student],
    filter: &RepoFilter,
) -> Vec<&'r Repository> {
    repos
        .iter()
        .filter(|repo| filter.matches(&repo.name))
        .filter(|repo| {
            students
                .iter()
                .any(|s| repo.name.ends_with(&format!("-{}", s.id)))
        })
        .collect()
}

/// Deletes organization repositories matching roster student suffixes.
///
/// Deletion is irreversible, so a run is a dry run unless explicitly
/// confirmed; the dry run reports the exact target set.
pub struct RepoDeleter<'a> {
    client: &'a ClassroomApiClient,
    organization: &'a str,
    pacing_ms: u64,
}

impl<'a> RepoDeleter<'a> {
    /// Create a deleter for one organization
    pub fn new(client: &'a ClassroomApiClient, organization: &'a str, pacing_ms: u64) -> Self {
        Self {
            client,
            organization,
            pacing_ms,
        }
    }

    /// Delete every repository whose name carries a roster student's suffix.
    ///
    /// With `confirmed == false` nothing is deleted; the target set comes
    /// back in `skipped`. Per-repository failures are diagnostics, never
    /// fatal.
    pub async fn delete_matching(
        &self,
        students: &[Student],
        filter: &RepoFilter,
        confirmed: bool,
    ) -> crate::error::Result<AdminOutcome> {
        let repos = self.client.list_org_repositories(self.organization).await?;
        let targets = select_delete_targets(&repos, students, filter);

        let mut outcome = AdminOutcome::default();

        if !confirmed {
            outcome.skipped = targets.iter().map(|r| r.name.clone()).collect();
            return Ok(outcome);
        }

        for repo in targets {
            match self
                .client
                .delete_repository(self.organization, &repo.name)
                .await
            {
                Ok(()) => outcome.succeeded.push(repo.name.clone()),
                Err(e) => {
                    outcome.diagnostics.push(Diagnostic {
                        severity: DiagnosticSeverity::SoftError,
                        category: DiagnosticCategory::Delete,
                        message: format!("deleting {} failed: {}", repo.full_name, e),
                    });
                }
            }

            if self.pacing_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(self.pacing_ms)).await;
            }
        }

        Ok(outcome)
    }
}
