use crate::domain::TagReference;
use crate::error::{Result, TagOnMergeError};
use crate::git::{PushOutcome, RepoAuth, Repository, Tagger};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

/// Annotated tag recorded by [MockRepository::create_annotated_tag]
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedTag {
    pub name: String,
    pub target: String,
    pub tagger: Tagger,
    pub message: String,
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    tags: RefCell<BTreeMap<String, String>>,
    head: Option<String>,
    remotes: RefCell<HashMap<String, BTreeMap<String, String>>>,
    push_error: Option<String>,
    created: RefCell<Vec<CreatedTag>>,
    next_object: Cell<u64>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            tags: RefCell::new(BTreeMap::new()),
            head: None,
            remotes: RefCell::new(HashMap::new()),
            push_error: None,
            created: RefCell::new(Vec::new()),
            next_object: Cell::new(0xa000),
        }
    }

    /// Add a tag pointing to an object id
    pub fn add_tag(&mut self, name: impl Into<String>, target: impl Into<String>) {
        self.tags.get_mut().insert(name.into(), target.into());
    }

    /// Set the commit HEAD resolves to
    pub fn set_head(&mut self, commit: impl Into<String>) {
        self.head = Some(commit.into());
    }

    /// Register an empty remote
    pub fn add_remote(&mut self, remote: impl Into<String>) {
        self.remotes.get_mut().entry(remote.into()).or_default();
    }

    /// Add a tag that already exists on a remote
    pub fn add_remote_tag(
        &mut self,
        remote: impl Into<String>,
        name: impl Into<String>,
        target: impl Into<String>,
    ) {
        self.remotes
            .get_mut()
            .entry(remote.into())
            .or_default()
            .insert(name.into(), target.into());
    }

    /// Make every push fail with `message`
    pub fn fail_pushes_with(&mut self, message: impl Into<String>) {
        self.push_error = Some(message.into());
    }

    /// Object id a local tag points at
    pub fn tag_target(&self, name: &str) -> Option<String> {
        self.tags.borrow().get(name).cloned()
    }

    /// Tag names held by a remote, sorted
    pub fn remote_tags(&self, remote: &str) -> Vec<String> {
        self.remotes
            .borrow()
            .get(remote)
            .map(|tags| tags.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Annotated tags created through the trait, oldest first
    pub fn created_tags(&self) -> Vec<CreatedTag> {
        self.created.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<TagReference>> {
        Ok(self
            .tags
            .borrow()
            .iter()
            .map(|(name, target)| TagReference::new(name.clone(), target.clone()))
            .collect())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self.tags.borrow().contains_key(name))
    }

    fn head_commit(&self) -> Result<String> {
        self.head
            .clone()
            .ok_or_else(|| TagOnMergeError::HeadUnresolvable("reference 'refs/heads/main' not found".to_string()))
    }

    fn create_annotated_tag(
        &self,
        name: &str,
        target: &str,
        tagger: &Tagger,
        message: &str,
    ) -> Result<String> {
        let mut tags = self.tags.borrow_mut();
        if tags.contains_key(name) {
            return Err(TagOnMergeError::TagAlreadyExists(name.to_string()));
        }

        let object = self.next_object.get();
        self.next_object.set(object + 1);
        let tag_oid = format!("{:040x}", object);

        tags.insert(name.to_string(), tag_oid.clone());
        self.created.borrow_mut().push(CreatedTag {
            name: name.to_string(),
            target: target.to_string(),
            tagger: tagger.clone(),
            message: message.to_string(),
        });

        Ok(tag_oid)
    }

    fn push_tag(&self, remote: &str, name: &str, _auth: &RepoAuth) -> Result<PushOutcome> {
        let failure = |message: &str| TagOnMergeError::push_failure(remote, name, message);

        if let Some(message) = &self.push_error {
            return Err(failure(message.as_str()));
        }

        let local_target = self
            .tag_target(name)
            .ok_or_else(|| failure("tag does not exist locally"))?;

        let mut remotes = self.remotes.borrow_mut();
        let remote_tags = remotes
            .get_mut(remote)
            .ok_or_else(|| failure("cannot find remote"))?;

        match remote_tags.get(name) {
            Some(existing) if *existing == local_target => Ok(PushOutcome::AlreadyUpToDate),
            Some(_) => Err(failure("rejected: tag already exists on remote")),
            None => {
                remote_tags.insert(name.to_string(), local_target);
                Ok(PushOutcome::Pushed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMIT: &str = "0a3f8c254543b1231bde79e5a2483a6b9a3d4081";

    #[test]
    fn test_mock_repository_tags() {
        let mut repo = MockRepository::new();
        repo.add_tag("v1.0.0", COMMIT);

        assert!(repo.tag_exists("v1.0.0").unwrap());
        assert!(!repo.tag_exists("v2.0.0").unwrap());
        assert_eq!(repo.list_tags().unwrap(), vec![TagReference::new("v1.0.0", COMMIT)]);
    }

    #[test]
    fn test_mock_repository_head() {
        let mut repo = MockRepository::new();
        assert!(repo.head_commit().is_err());

        repo.set_head(COMMIT);
        assert_eq!(repo.head_commit().unwrap(), COMMIT);
    }

    #[test]
    fn test_mock_repository_create_refuses_existing() {
        let repo = MockRepository::new();
        let tagger = Tagger::default();

        repo.create_annotated_tag("v1.0.0", COMMIT, &tagger, "v1.0.0").unwrap();
        assert!(matches!(
            repo.create_annotated_tag("v1.0.0", COMMIT, &tagger, "v1.0.0"),
            Err(TagOnMergeError::TagAlreadyExists(_))
        ));
        assert_eq!(repo.created_tags().len(), 1);
    }

    #[test]
    fn test_mock_repository_push() {
        let mut repo = MockRepository::new();
        repo.add_tag("v1.0.0", COMMIT);
        repo.add_remote("origin");

        assert_eq!(
            repo.push_tag("origin", "v1.0.0", &RepoAuth::Default).unwrap(),
            PushOutcome::Pushed
        );
        assert_eq!(
            repo.push_tag("origin", "v1.0.0", &RepoAuth::Default).unwrap(),
            PushOutcome::AlreadyUpToDate
        );
        assert_eq!(repo.remote_tags("origin"), vec!["v1.0.0"]);
    }

    #[test]
    fn test_mock_repository_push_to_unknown_remote() {
        let mut repo = MockRepository::new();
        repo.add_tag("v1.0.0", COMMIT);

        assert!(matches!(
            repo.push_tag("upstream", "v1.0.0", &RepoAuth::Default),
            Err(TagOnMergeError::PushFailure { .. })
        ));
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert!(repo.list_tags().unwrap().is_empty());
    }
}
