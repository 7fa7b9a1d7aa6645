use crate::domain::{tag_ref_name, tag_refspec, TagReference, TAG_REF_PREFIX};
use crate::error::{Result, TagOnMergeError};
use crate::git::{auth, PushOutcome, RepoAuth, Tagger};
use git2::{ErrorCode, ObjectType, Oid, PushOptions, Repository as Git2Repo, Signature};
use std::cell::Cell;
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Object id the local tag reference points at
    fn local_tag_target(&self, name: &str) -> Result<Option<Oid>> {
        match self.repo.find_reference(&tag_ref_name(name)) {
            Ok(reference) => Ok(reference.target()),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<TagReference>> {
        let mut tags = Vec::new();

        for reference in self.repo.references_glob(&format!("{}*", TAG_REF_PREFIX))? {
            let reference = reference?;

            let Some(name) = reference
                .name()
                .and_then(|n| n.strip_prefix(TAG_REF_PREFIX))
            else {
                continue;
            };

            let target = match reference.target() {
                Some(oid) => oid,
                None => match reference.resolve().ok().and_then(|r| r.target()) {
                    Some(oid) => oid,
                    None => continue,
                },
            };

            tags.push(TagReference::new(name, target.to_string()));
        }

        Ok(tags)
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        match self.repo.find_reference(&tag_ref_name(name)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) if e.code() == ErrorCode::InvalidSpec => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn head_commit(&self) -> Result<String> {
        let commit = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| TagOnMergeError::HeadUnresolvable(e.message().to_string()))?;

        Ok(commit.id().to_string())
    }

    fn create_annotated_tag(
        &self,
        name: &str,
        target: &str,
        tagger: &Tagger,
        message: &str,
    ) -> Result<String> {
        let oid = Oid::from_str(target)?;
        let object = self.repo.find_object(oid, Some(ObjectType::Commit))?;
        let signature = Signature::now(&tagger.name, &tagger.email)?;

        let tag_oid = self
            .repo
            .tag(name, &object, &signature, message, false)
            .map_err(|e| match e.code() {
                ErrorCode::Exists => TagOnMergeError::TagAlreadyExists(name.to_string()),
                _ => TagOnMergeError::Git(e),
            })?;

        Ok(tag_oid.to_string())
    }

    fn push_tag(&self, remote_name: &str, name: &str, auth: &RepoAuth) -> Result<PushOutcome> {
        let failure = |message: String| TagOnMergeError::push_failure(remote_name, name, message);

        if self.local_tag_target(name)?.is_none() {
            return Err(failure("tag does not exist locally".to_string()));
        }

        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|e| failure(format!("cannot find remote: {}", e.message())))?;

        let reference = tag_ref_name(name);
        let up_to_date = Cell::new(false);
        let mut rejections = Vec::new();
        {
            let mut callbacks = auth::remote_callbacks(auth);
            // An update whose old and new ids match carries nothing to send
            callbacks.push_negotiation(|updates| {
                let unchanged = updates.iter().any(|update| {
                    update.dst_refname() == Some(reference.as_str()) && update.src() == update.dst()
                });
                up_to_date.set(unchanged);
                Ok(())
            });
            callbacks.push_update_reference(|refname, status| {
                if let Some(status) = status {
                    rejections.push(format!("{} rejected: {}", refname, status));
                }
                Ok(())
            });

            let mut push_options = PushOptions::new();
            push_options.remote_callbacks(callbacks);

            remote
                .push(&[tag_refspec(name).as_str()], Some(&mut push_options))
                .map_err(|e| failure(e.message().to_string()))?;
        }

        if !rejections.is_empty() {
            return Err(failure(rejections.join("; ")));
        }

        if up_to_date.get() {
            debug!(remote = remote_name, tag = name, "remote already holds the tag");
            return Ok(PushOutcome::AlreadyUpToDate);
        }

        Ok(PushOutcome::Pushed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use tempfile::TempDir;

    #[test]
    fn test_open_discovers_from_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        Git2Repo::init(temp_dir.path()).unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert!(Git2Repository::open(&nested).is_ok());
    }

    #[test]
    fn test_unborn_head_is_unresolvable() {
        let temp_dir = TempDir::new().unwrap();
        let repo = Git2Repository::from_git2(Git2Repo::init(temp_dir.path()).unwrap());

        assert!(matches!(
            repo.head_commit(),
            Err(TagOnMergeError::HeadUnresolvable(_))
        ));
        assert!(repo.list_tags().unwrap().is_empty());
    }
}
