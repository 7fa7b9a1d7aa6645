//! Materializes and publishes version tags

use crate::error::{Result, TagOnMergeError};
use crate::git::{PushOutcome, RepoAuth, Repository, Tagger, DEFAULT_REMOTE};
use tracing::{info, warn};

/// Creates annotated tags at HEAD and pushes them to a remote
pub struct TagPublisher<'a, R: Repository> {
    repo: &'a R,
    tagger: Tagger,
}

impl<'a, R: Repository> TagPublisher<'a, R> {
    /// Create a publisher writing tags as `tagger`
    pub fn new(repo: &'a R, tagger: Tagger) -> Self {
        TagPublisher { repo, tagger }
    }

    /// Creates an annotated tag `name` on the current HEAD commit.
    ///
    /// An empty `message` defaults to the tag name. The tag is never
    /// overwritten: if `refs/tags/<name>` already exists the call fails with
    /// `TagAlreadyExists` and the repository is left untouched, so a retried
    /// run cannot silently tag twice.
    ///
    /// # Returns
    /// * `Ok(String)` - Hex id of the new tag object
    /// * `Err(EmptyTagName)` - If `name` is empty
    /// * `Err(TagAlreadyExists)` - If the tag exists
    /// * `Err(HeadUnresolvable)` - If HEAD does not resolve to a commit
    pub fn create_annotated_tag(&self, name: &str, message: &str) -> Result<String> {
        if name.is_empty() {
            return Err(TagOnMergeError::EmptyTagName);
        }
        let message = if message.is_empty() { name } else { message };

        if self.repo.tag_exists(name)? {
            return Err(TagOnMergeError::TagAlreadyExists(name.to_string()));
        }

        let head = self.repo.head_commit()?;
        let tag_oid = self
            .repo
            .create_annotated_tag(name, &head, &self.tagger, message)?;

        info!(tag = name, commit = %head, object = %tag_oid, "created annotated tag");
        Ok(tag_oid)
    }

    /// Pushes tag `name` to `remote` (`origin` when `None`).
    ///
    /// A remote that already holds the tag is reported as
    /// `PushOutcome::AlreadyUpToDate`, not as an error. Failures are not retried.
    pub fn push_tag(&self, auth: &RepoAuth, name: &str, remote: Option<&str>) -> Result<PushOutcome> {
        let remote = remote.filter(|r| !r.is_empty()).unwrap_or(DEFAULT_REMOTE);

        let outcome = self.repo.push_tag(remote, name, auth)?;
        match outcome {
            PushOutcome::Pushed => info!(tag = name, remote, "pushed tag"),
            PushOutcome::AlreadyUpToDate => {
                warn!(tag = name, remote, "remote was up to date, no tag pushed")
            }
        }

        Ok(outcome)
    }
}
