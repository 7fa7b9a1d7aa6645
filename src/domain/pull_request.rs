/// A pull request as reported by the hosting platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    /// Name of the branch the pull request targets
    pub base: String,
    /// Merge commit id; `None` or empty while the pull request is unmerged
    pub merge_commit_sha: Option<String>,
    /// Label names in the order the platform returned them
    pub labels: Vec<String>,
}

impl PullRequest {
    /// Whether this pull request was merged into `trunk`
    pub fn is_merged_into(&self, trunk: &str) -> bool {
        self.base == trunk
            && self
                .merge_commit_sha
                .as_deref()
                .is_some_and(|sha| !sha.is_empty())
    }
}
