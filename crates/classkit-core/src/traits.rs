//! Provider trait for the remote repository collaborator

use crate::error::Result;
use crate::types::{CheckRun, CommitRef, Repository};

/// Remote operations the grade harvester and bulk cloner depend on.
///
/// The production implementation is the GitHub REST client
/// ([`crate::http::ClassroomApiClient`]); tests substitute an in-memory fake.
/// Keeping the seam this narrow is what lets per-student failure handling be
/// tested without a network.
pub trait RepositoryProvider {
    /// Resolve a repository by owner and name.
    ///
    /// Fails with [`crate::Error::RepoNotFound`] when the repository does not
    /// exist or is not visible to the caller's credentials.
    fn repository(
        &self,
        owner: &str,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Repository>>;

    /// List the repository's commits in remote-supplied order.
    ///
    /// The GitHub commits listing returns newest first; the harvester's
    /// "first parseable commit" semantics rely on that contract, so fakes
    /// must serve commits in the same order.
    fn commits(
        &self,
        owner: &str,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Vec<CommitRef>>>;

    /// List the check runs attached to one commit, remote order preserved.
    /// An ungraded commit yields an empty vector, not an error.
    fn check_runs(
        &self,
        owner: &str,
        name: &str,
        sha: &str,
    ) -> impl std::future::Future<Output = Result<Vec<CheckRun>>>;
}
