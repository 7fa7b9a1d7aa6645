//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the tag operations the
//! tool performs, allowing for a real Git repository and an in-memory
//! implementation for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! # Usage
//!
//! Code should depend on the [Repository] trait rather than on concrete
//! implementations.
//!
//! ```rust
//! # use semver_tag_on_merge::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! for tag in repo.list_tags()? {
//!     println!("{} -> {}", tag.name, tag.target);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod mock;
pub mod repository;

pub use auth::RepoAuth;
pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::TagReference;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Remote used when none is configured
pub const DEFAULT_REMOTE: &str = "origin";

/// Identity recorded in annotated tags
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Tagger {
    #[serde(default = "default_tagger_name")]
    pub name: String,
    #[serde(default = "default_tagger_email")]
    pub email: String,
}

fn default_tagger_name() -> String {
    "semver-tag-on-merge".to_string()
}

fn default_tagger_email() -> String {
    "semver-tag-on-merge@users.noreply.github.com".to_string()
}

impl Default for Tagger {
    fn default() -> Self {
        Tagger {
            name: default_tagger_name(),
            email: default_tagger_email(),
        }
    }
}

/// Result of a tag push that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The remote accepted the tag
    Pushed,
    /// The remote already held the tag at the same object; nothing was sent
    AlreadyUpToDate,
}

/// Tag operations needed to resolve and publish versions
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors to the specific [crate::error::TagOnMergeError] kinds
/// documented on each method.
pub trait Repository {
    /// List every reference in the tag namespace
    ///
    /// # Returns
    /// * `Ok(Vec<TagReference>)` - Tag names (without `refs/tags/`) and their targets
    /// * `Err` - If the references cannot be read
    fn list_tags(&self) -> Result<Vec<TagReference>>;

    /// Check whether `refs/tags/<name>` exists
    ///
    /// The comparison is an exact match on the fully-qualified reference name.
    fn tag_exists(&self, name: &str) -> Result<bool>;

    /// Resolve the commit HEAD points at
    ///
    /// # Returns
    /// * `Ok(String)` - Hex id of the HEAD commit
    /// * `Err(HeadUnresolvable)` - If HEAD is unborn or does not lead to a commit
    fn head_commit(&self) -> Result<String>;

    /// Create an annotated tag object for `target` and the reference pointing at it
    ///
    /// Never overwrites: an existing tag of the same name is `TagAlreadyExists`.
    ///
    /// # Returns
    /// * `Ok(String)` - Hex id of the new tag object
    fn create_annotated_tag(
        &self,
        name: &str,
        target: &str,
        tagger: &Tagger,
        message: &str,
    ) -> Result<String>;

    /// Push `refs/tags/<name>` to the same reference on `remote`
    ///
    /// # Returns
    /// * `Ok(PushOutcome::Pushed)` - The remote accepted the tag
    /// * `Ok(PushOutcome::AlreadyUpToDate)` - The remote already had it
    /// * `Err(PushFailure)` - Any transport, authentication or rejection error
    fn push_tag(&self, remote: &str, name: &str, auth: &RepoAuth) -> Result<PushOutcome>;
}
