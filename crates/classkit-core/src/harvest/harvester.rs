//! Per-student grade harvesting loop

use crate::error::Result;
use crate::harvest::score::parse_score_text;
use crate::traits::RepositoryProvider;
use crate::types::{
    Diagnostic, DiagnosticCategory, DiagnosticSeverity, GradeRow, HarvestOptions, HarvestOutcome,
    Student,
};

/// Grade harvester that walks a roster one student at a time.
///
/// For each student it resolves `{prefix}-{id}`, scans the repository's
/// commits newest-first, and takes the grade from the first check run whose
/// output text parses as `points/possible`. Every remote or parse failure is
/// recorded as a [`Diagnostic`] and recovered locally; a run never aborts.
pub struct GradeHarvester<'a, P> {
    provider: &'a P,
    options: &'a HarvestOptions,
}

impl<'a, P: RepositoryProvider> GradeHarvester<'a, P> {
    /// Create a harvester over an authenticated provider
    pub fn new(provider: &'a P, options: &'a HarvestOptions) -> Self {
        Self { provider, options }
    }

    /// Harvest grades for the whole roster, collecting rows in roster order.
    pub async fn harvest(&self, students: &[Student]) -> HarvestOutcome {
        self.harvest_with(students, |_| Ok(())).await
    }

    /// Harvest grades, invoking `on_row` as each row is determined.
    ///
    /// The callback is where the CLI appends to the CSV file, so an
    /// interrupted run retains every row already determined. A callback
    /// error is itself recorded as a diagnostic and does not stop the run.
    pub async fn harvest_with<F>(&self, students: &[Student], mut on_row: F) -> HarvestOutcome
    where
        F: FnMut(&GradeRow) -> Result<()>,
    {
        let mut outcome = HarvestOutcome::default();

        for student in students {
            if let Some(row) = self.grade_student(student, &mut outcome.diagnostics).await {
                // Only graded rows count toward the distribution; the
                // zero-point fallback for an unresolvable repository does not.
                if row.possible_points.is_some() {
                    outcome.histogram.record(row.points);
                }

                if let Err(e) = on_row(&row) {
                    outcome.diagnostics.push(Diagnostic {
                        severity: DiagnosticSeverity::SoftError,
                        category: DiagnosticCategory::CsvWrite,
                        message: format!("{}: failed to write row: {}", row.student_id, e),
                    });
                }

                outcome.rows.push(row);
            }

            if self.options.pacing_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(self.options.pacing_ms)).await;
            }
        }

        outcome
    }

    /// Determine one student's row.
    ///
    /// `Some(row)` is either a parsed grade or the zero-point fallback for an
    /// unresolvable repository. `None` means the repository resolved but no
    /// commit carried a parseable grade; the omission is recorded as a
    /// diagnostic and the student gets no row.
    async fn grade_student(
        &self,
        student: &Student,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<GradeRow> {
        let org = &self.options.organization;
        let repo_name = student.repo_name(&self.options.assignment_prefix);

        let repo = match self.provider.repository(org, &repo_name).await {
            Ok(repo) => repo,
            Err(e) => {
                diagnostics.push(Diagnostic {
                    severity: DiagnosticSeverity::SoftError,
                    category: DiagnosticCategory::RepoLookup,
                    message: format!("{}: {}/{} unavailable: {}", student.id, org, repo_name, e),
                });
                return Some(GradeRow::unresolved(&student.id));
            }
        };

        let commits = match self.provider.commits(org, &repo.name).await {
            Ok(commits) => commits,
            Err(e) => {
                diagnostics.push(Diagnostic {
                    severity: DiagnosticSeverity::SoftError,
                    category: DiagnosticCategory::CommitList,
                    message: format!("{}: listing commits of {} failed: {}", student.id, repo.full_name, e),
                });
                return Some(GradeRow::unresolved(&student.id));
            }
        };

        let commits_scanned = commits.len();
        for commit in commits {
            let runs = match self.provider.check_runs(org, &repo.name, &commit.sha).await {
                Ok(runs) => runs,
                Err(e) => {
                    diagnostics.push(Diagnostic {
                        severity: DiagnosticSeverity::SoftError,
                        category: DiagnosticCategory::CheckRun,
                        message: format!(
                            "{}: check runs for {}@{} failed: {}",
                            student.id, repo.name, commit.sha, e
                        ),
                    });
                    continue;
                }
            };

            // Only the first run on a commit carries the grade.
            let Some(run) = runs.into_iter().next() else {
                continue;
            };

            let Some(text) = run.output_text.as_deref() else {
                continue;
            };

            // A malformed run text skips this commit, not the student.
            if let Ok(score) = parse_score_text(text) {
                return Some(GradeRow {
                    student_id: student.id.clone(),
                    points: score.points,
                    possible_points: Some(score.possible),
                    run_url: run.html_url,
                });
            }
        }

        diagnostics.push(Diagnostic {
            severity: DiagnosticSeverity::SoftError,
            category: DiagnosticCategory::GradeParse,
            message: format!(
                "{}: no parseable grade in {} commits of {}",
                student.id, commits_scanned, repo.full_name
            ),
        });
        None
    }
}
