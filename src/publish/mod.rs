//! @dose
//! purpose: Publishes generated files to a hosted repository through the ContentStore trait
//!     (GitHub contents API in production, an in-memory store in tests). Also verifies the
//!     account behind a credential and resolves a repository identifier to its metadata and
//!     branch list.
//!
//! when-editing:
//!     - !Files are written one at a time, in order; the first failure aborts the rest
//!     - !An existing file's sha must be sent back or the API rejects the write as a conflict
//!
//! invariants:
//!     - Every file lands at `<directory>/<fileName>` on the target branch
//!     - Commit message per file is "<message> - <fileName>"
//!     - Not-found on lookup means "create", never an error
//!
//! do-not:
//!     - Never retry or roll back; files written before a failure stay written
//!
//! gotchas:
//!     - Branch listing failures are tolerated during resolution (empty list, warning logged)

mod github;
mod repo;

pub use github::{GitHubClient, GITHUB_API_URL};
pub use repo::RepoRef;

use crate::types::GeneratedFile;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_DIRECTORY: &str = "design-tokens";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update design tokens";

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Please enter a GitHub token")]
    MissingToken,
    #[error("Please enter a repository URL")]
    MissingRepository,
    #[error("Invalid GitHub URL: {0}")]
    InvalidRepoUrl(String),
    #[error("Invalid GitHub token")]
    InvalidToken,
    #[error("Repository not found or no access: {0}")]
    RepositoryNotFound(String),
    #[error("No converted files to push")]
    NothingToPublish,
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("Failed to upload {file}: {source}")]
    Upload {
        file: String,
        #[source]
        source: Box<PublishError>,
    },
}

/// The authenticated account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Account {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(&self.login)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub full_name: String,
    pub default_branch: String,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub private: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
}

/// An existing file at the target path
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteFile {
    pub sha: String,
}

/// Body of a contents-API write
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PutFileRequest {
    pub message: String,
    /// Base64 of the file bytes
    pub content: String,
    pub branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

/// A hosted repository's file API.
pub trait ContentStore {
    fn current_user(&self) -> Result<Account, PublishError>;

    fn repository(&self, repo: &RepoRef) -> Result<Repository, PublishError>;

    fn branches(&self, repo: &RepoRef) -> Result<Vec<Branch>, PublishError>;

    /// `Ok(None)` when nothing exists at the path on that branch
    fn get_file(
        &self,
        full_name: &str,
        path: &str,
        branch: &str,
    ) -> Result<Option<RemoteFile>, PublishError>;

    fn put_file(
        &self,
        full_name: &str,
        path: &str,
        request: &PutFileRequest,
    ) -> Result<(), PublishError>;
}

/// A repository with its branches, as resolved at login
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRepository {
    pub repository: Repository,
    pub branches: Vec<Branch>,
}

impl ResolvedRepository {
    pub fn has_branch(&self, name: &str) -> bool {
        self.branches.iter().any(|b| b.name == name)
    }
}

/// Validate the credential and fetch the account identity.
pub fn verify_account<S: ContentStore + ?Sized>(store: &S) -> Result<Account, PublishError> {
    match store.current_user() {
        Err(PublishError::Api {
            status: 401 | 403, ..
        }) => Err(PublishError::InvalidToken),
        other => other,
    }
}

/// Parse an identifier and fetch the repository and its branches.
pub fn resolve_repository<S: ContentStore + ?Sized>(
    store: &S,
    identifier: &str,
) -> Result<ResolvedRepository, PublishError> {
    let repo: RepoRef = identifier.parse()?;

    let repository = match store.repository(&repo) {
        Err(PublishError::Api {
            status: 404 | 403, ..
        }) => return Err(PublishError::RepositoryNotFound(repo.full_name())),
        other => other?,
    };

    let branches = match store.branches(&repo) {
        Ok(branches) => branches,
        Err(e) => {
            tracing::warn!(repo = %repo, error = %e, "Could not list branches");
            Vec::new()
        }
    };

    Ok(ResolvedRepository {
        repository,
        branches,
    })
}

/// Where and how to write
#[derive(Debug, Clone)]
pub struct PublishTarget {
    /// `owner/name`
    pub full_name: String,
    pub branch: String,
    pub message: String,
    /// Remote subdirectory for the files
    pub directory: String,
}

impl PublishTarget {
    pub fn new(full_name: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            branch: branch.into(),
            message: DEFAULT_COMMIT_MESSAGE.to_string(),
            directory: DEFAULT_DIRECTORY.to_string(),
        }
    }

    pub fn path_for(&self, file_name: &str) -> String {
        let dir = self.directory.trim_matches('/');
        if dir.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", dir, file_name)
        }
    }

    fn commit_message(&self, file_name: &str) -> String {
        let message = self.message.trim();
        let message = if message.is_empty() {
            DEFAULT_COMMIT_MESSAGE
        } else {
            message
        };
        format!("{} - {}", message, file_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishReport {
    pub created: Vec<String>,
    pub updated: Vec<String>,
}

impl PublishReport {
    pub fn total(&self) -> usize {
        self.created.len() + self.updated.len()
    }
}

/// Create or update every file at the target, sequentially.
pub fn publish<S: ContentStore + ?Sized>(
    store: &S,
    target: &PublishTarget,
    files: &[GeneratedFile],
) -> Result<PublishReport, PublishError> {
    if files.is_empty() {
        return Err(PublishError::NothingToPublish);
    }

    let mut report = PublishReport::default();

    for file in files {
        let path = target.path_for(&file.file_name);
        let upload_err = |source: PublishError| PublishError::Upload {
            file: file.file_name.clone(),
            source: Box::new(source),
        };

        let existing = store
            .get_file(&target.full_name, &path, &target.branch)
            .map_err(upload_err)?;
        let sha = existing.map(|f| f.sha);
        let is_update = sha.is_some();

        let request = PutFileRequest {
            message: target.commit_message(&file.file_name),
            content: BASE64.encode(file.content.as_bytes()),
            branch: target.branch.clone(),
            sha,
        };
        store
            .put_file(&target.full_name, &path, &request)
            .map_err(upload_err)?;

        tracing::info!(path = %path, branch = %target.branch, update = is_update, "Pushed");
        if is_update {
            report.updated.push(path);
        } else {
            report.created.push(path);
        }
    }

    Ok(report)
}
