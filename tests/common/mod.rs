#![allow(dead_code)]

use git2::{Oid, Repository, Signature};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Scratch repository with a bare `origin` remote next to it
pub struct Fixture {
    pub repo: Repository,
    pub work: TempDir,
    pub remote: TempDir,
}

impl Fixture {
    /// Work repository with one commit and an empty bare `origin`
    pub fn new() -> Self {
        let work = TempDir::new().expect("Could not create temp dir");
        let remote = TempDir::new().expect("Could not create remote dir");

        let repo = Repository::init(work.path()).expect("Could not init git repo");
        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        Repository::init_bare(remote.path()).expect("Could not init bare remote");
        repo.remote("origin", remote.path().to_str().expect("utf-8 temp path"))
            .expect("Could not add remote");

        let fixture = Fixture { repo, work, remote };
        fixture.commit("README.md", "Initial content\n", "Initial commit");
        fixture
    }

    /// Commit `content` to `file` on HEAD
    pub fn commit(&self, file: &str, content: &str, message: &str) -> Oid {
        fs::write(self.work.path().join(file), content).expect("Could not write file");

        let mut index = self.repo.index().expect("Could not get index");
        index
            .add_path(Path::new(file))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");

        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");
        let signature = Signature::now("Test User", "test@example.com").unwrap();

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .expect("Could not create commit")
    }

    /// Lightweight tag on HEAD
    pub fn tag_head(&self, name: &str) {
        let head = self.repo.head().unwrap().peel_to_commit().unwrap();
        self.repo
            .tag_lightweight(name, head.as_object(), false)
            .expect("Could not create tag");
    }

    pub fn head_id(&self) -> String {
        self.repo.head().unwrap().peel_to_commit().unwrap().id().to_string()
    }

    /// Object id of `refs/tags/<name>` in the bare remote
    pub fn remote_tag(&self, name: &str) -> Option<Oid> {
        let remote = Repository::open_bare(self.remote.path()).unwrap();
        let target = remote
            .find_reference(&format!("refs/tags/{}", name))
            .ok()
            .and_then(|r| r.target());
        target
    }

    /// Number of tag references in the work repository
    pub fn tag_count(&self) -> usize {
        self.repo.tag_names(None).unwrap().len()
    }
}
