//! Authenticated repository cloning
//!
//! git2 types are not Send due to internal raw pointers, and its operations
//! block, so each clone runs on the blocking thread pool with owned inputs.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Credentials for HTTPS clones of private classroom repositories
#[derive(Clone)]
pub struct CloneAuth {
    /// GitHub username
    pub username: String,
    /// Personal access token used as the password
    pub token: String,
}

impl std::fmt::Debug for CloneAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloneAuth")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Clone `url` into `dest`, creating parent directories as needed.
///
/// Fails if `dest` already exists; callers decide whether that is a skip or
/// an error. Returns the destination path on success.
pub async fn clone_repository(
    url: &str,
    dest: &Path,
    auth: Option<&CloneAuth>,
) -> Result<PathBuf> {
    if dest.exists() {
        return Err(Error::Git(format!(
            "destination '{}' already exists",
            dest.display()
        )));
    }

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let url = url.to_string();
    let dest = dest.to_path_buf();
    let auth = auth.cloned();

    tokio::task::spawn_blocking(move || {
        let mut callbacks = git2::RemoteCallbacks::new();
        if let Some(auth) = &auth {
            let username = auth.username.clone();
            let token = auth.token.clone();
            callbacks.credentials(move |_url, _username_from_url, _allowed| {
                git2::Cred::userpass_plaintext(&username, &token)
            });
        }

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(callbacks);

        git2::build::RepoBuilder::new()
            .fetch_options(fetch_options)
            .clone(&url, &dest)?;

        Ok(dest)
    })
    .await
    .map_err(|e| Error::Runtime(format!("clone task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clone_auth_debug_redacts_token() {
        let auth = CloneAuth {
            username: "course-bot".to_string(),
            token: "ghp_CloneSecret77".to_string(),
        };
        let debug_output = format!("{:?}", auth);
        assert!(!debug_output.contains("ghp_CloneSecret77"));
        assert!(debug_output.contains("<redacted>"));
        assert!(debug_output.contains("course-bot"));
    }

    #[tokio::test]
    async fn test_clone_refuses_existing_destination() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("assignment-01-alice");
        std::fs::create_dir(&dest).unwrap();

        let err = clone_repository("https://example.test/repo.git", &dest, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Git);
        assert!(err.message().contains("already exists"));
    }
}
