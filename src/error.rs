use thiserror::Error;

/// Unified error type for semver-tag-on-merge operations
#[derive(Error, Debug)]
pub enum TagOnMergeError {
    #[error("no tag matching a semantic version was found")]
    NoMatchingTag,

    #[error("no label was found which matches any of the bump labels [ {} ]", .labels.join(", "))]
    NoMatchingLabel { labels: Vec<String> },

    #[error("could not find any pull request that introduces commit '{commit}' on trunk '{trunk}'")]
    PrNotFound { commit: String, trunk: String },

    #[error("tag '{0}' already exists")]
    TagAlreadyExists(String),

    #[error("tag name cannot be empty")]
    EmptyTagName,

    #[error("failed to resolve HEAD: {0}")]
    HeadUnresolvable(String),

    #[error("failed to push tag '{tag}' to remote '{remote}': {message}")]
    PushFailure {
        remote: String,
        tag: String,
        message: String,
    },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("API request failed: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in semver-tag-on-merge
pub type Result<T> = std::result::Result<T, TagOnMergeError>;

impl TagOnMergeError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TagOnMergeError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        TagOnMergeError::Version(msg.into())
    }

    /// Create an API error with context
    pub fn api(msg: impl Into<String>) -> Self {
        TagOnMergeError::Api(msg.into())
    }

    /// Create a push failure for the given remote and tag
    pub fn push_failure(
        remote: impl Into<String>,
        tag: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        TagOnMergeError::PushFailure {
            remote: remote.into(),
            tag: tag.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TagOnMergeError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TagOnMergeError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_no_matching_label_lists_configured_labels() {
        let err = TagOnMergeError::NoMatchingLabel {
            labels: vec!["merge-major".to_string(), "merge-minor".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("[ merge-major, merge-minor ]"), "got: {}", msg);
    }

    #[test]
    fn test_push_failure_carries_remote_and_tag() {
        let err = TagOnMergeError::push_failure("upstream", "v1.2.3", "authentication required");
        let msg = err.to_string();
        assert!(msg.contains("'v1.2.3'"));
        assert!(msg.contains("'upstream'"));
        assert!(msg.contains("authentication required"));
    }

    #[test]
    fn test_pr_not_found_mentions_commit_and_trunk() {
        let err = TagOnMergeError::PrNotFound {
            commit: "e83c516".to_string(),
            trunk: "main".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("e83c516"));
        assert!(msg.contains("'main'"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (TagOnMergeError::config("x"), "Configuration error"),
            (TagOnMergeError::version("x"), "Version parsing error"),
            (TagOnMergeError::api("x"), "API request failed"),
            (TagOnMergeError::TagAlreadyExists("v1.0.0".into()), "tag 'v1.0.0'"),
            (TagOnMergeError::HeadUnresolvable("x".into()), "failed to resolve HEAD"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
