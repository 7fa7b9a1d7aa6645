//! Mapping from pull request labels to bump kinds

use crate::domain::{BumpKind, PullRequest};
use crate::error::{Result, TagOnMergeError};
use std::collections::HashMap;

pub const DEFAULT_MAJOR_LABEL: &str = "merge-major";
pub const DEFAULT_MINOR_LABEL: &str = "merge-minor";
pub const DEFAULT_PATCH_LABEL: &str = "merge-patch";
pub const DEFAULT_NONE_LABEL: &str = "merge-none";

/// Label name to bump kind mapping, fixed for the duration of a run
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPolicy {
    labels: HashMap<String, BumpKind>,
}

impl LabelPolicy {
    /// Build a policy from the four label slots.
    ///
    /// Every slot needs its own non-empty label; a label shared by two slots
    /// would make the mapping ambiguous.
    pub fn from_slots(major: &str, minor: &str, patch: &str, none: &str) -> Result<Self> {
        let mut labels = HashMap::new();

        for (label, kind) in [
            (major, BumpKind::Major),
            (minor, BumpKind::Minor),
            (patch, BumpKind::Patch),
            (none, BumpKind::None),
        ] {
            if label.is_empty() {
                return Err(TagOnMergeError::config(format!(
                    "label for {} bumps cannot be empty",
                    kind
                )));
            }
            if let Some(previous) = labels.insert(label.to_string(), kind) {
                return Err(TagOnMergeError::config(format!(
                    "label '{}' is configured for both {} and {} bumps",
                    label, previous, kind
                )));
            }
        }

        Ok(LabelPolicy { labels })
    }

    /// Look up the bump kind configured for a label
    pub fn get(&self, label: &str) -> Option<BumpKind> {
        self.labels.get(label).copied()
    }

    /// All configured label names, sorted
    pub fn label_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.labels.keys().cloned().collect();
        names.sort();
        names
    }

    /// Determine the bump kind for a pull request.
    ///
    /// Labels are scanned in the order the hosting platform returned them and
    /// the first label with an entry in the policy decides; later matches are
    /// ignored even if they ask for a different bump.
    pub fn resolve_bump_kind(&self, pr: &PullRequest) -> Result<BumpKind> {
        pr.labels
            .iter()
            .find_map(|label| self.get(label))
            .ok_or_else(|| TagOnMergeError::NoMatchingLabel {
                labels: self.label_names(),
            })
    }
}

impl Default for LabelPolicy {
    fn default() -> Self {
        let labels = [
            (DEFAULT_MAJOR_LABEL, BumpKind::Major),
            (DEFAULT_MINOR_LABEL, BumpKind::Minor),
            (DEFAULT_PATCH_LABEL, BumpKind::Patch),
            (DEFAULT_NONE_LABEL, BumpKind::None),
        ]
        .into_iter()
        .map(|(label, kind)| (label.to_string(), kind))
        .collect();

        LabelPolicy { labels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pr_with_labels(labels: &[&str]) -> PullRequest {
        PullRequest {
            number: 1,
            base: "main".to_string(),
            merge_commit_sha: Some("asdf1234".to_string()),
            labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn test_default_policy_kinds() {
        let policy = LabelPolicy::default();
        assert_eq!(policy.get("merge-major"), Some(BumpKind::Major));
        assert_eq!(policy.get("merge-minor"), Some(BumpKind::Minor));
        assert_eq!(policy.get("merge-patch"), Some(BumpKind::Patch));
        assert_eq!(policy.get("merge-none"), Some(BumpKind::None));
        assert_eq!(policy.get("merge"), None);
    }

    #[test]
    fn test_resolve_skips_unknown_labels() {
        let policy = LabelPolicy::default();
        for (label, expected) in [
            ("merge-major", BumpKind::Major),
            ("merge-minor", BumpKind::Minor),
            ("merge-patch", BumpKind::Patch),
            ("merge-none", BumpKind::None),
        ] {
            let pr = pr_with_labels(&["some-other-label", label, "another-label"]);
            assert_eq!(policy.resolve_bump_kind(&pr).unwrap(), expected);
        }
    }

    #[test]
    fn test_first_matching_label_wins() {
        let policy = LabelPolicy::default();
        let pr = pr_with_labels(&["unrelated", "merge-minor", "merge-major"]);
        assert_eq!(policy.resolve_bump_kind(&pr).unwrap(), BumpKind::Minor);

        let reversed = pr_with_labels(&["merge-major", "merge-minor", "unrelated"]);
        assert_eq!(policy.resolve_bump_kind(&reversed).unwrap(), BumpKind::Major);
    }

    #[test]
    fn test_no_matching_label_reports_configured_labels() {
        let policy = LabelPolicy::default();
        let pr = pr_with_labels(&["some-other-label", "another-label"]);

        match policy.resolve_bump_kind(&pr) {
            Err(TagOnMergeError::NoMatchingLabel { labels }) => assert_eq!(
                labels,
                vec!["merge-major", "merge-minor", "merge-none", "merge-patch"]
            ),
            other => panic!("expected NoMatchingLabel, got {:?}", other),
        }
    }

    #[test]
    fn test_pr_without_labels_has_no_match() {
        let policy = LabelPolicy::default();
        assert!(matches!(
            policy.resolve_bump_kind(&pr_with_labels(&[])),
            Err(TagOnMergeError::NoMatchingLabel { .. })
        ));
    }

    #[test]
    fn test_custom_slots() {
        let policy = LabelPolicy::from_slots("breaking", "feature", "fix", "none").unwrap();
        let pr = pr_with_labels(&["docs", "fix"]);
        assert_eq!(policy.resolve_bump_kind(&pr).unwrap(), BumpKind::Patch);
        assert_eq!(policy.get("merge-patch"), None);
    }

    #[test]
    fn test_label_matching_is_exact() {
        let policy = LabelPolicy::default();
        let pr = pr_with_labels(&["Merge-Major", "merge-major-please"]);
        assert!(policy.resolve_bump_kind(&pr).is_err());
    }

    #[test]
    fn test_duplicate_slot_labels_are_rejected() {
        let err = LabelPolicy::from_slots("release", "release", "fix", "none").unwrap_err();
        assert!(err.to_string().contains("'release'"));
    }

    #[test]
    fn test_empty_slot_label_is_rejected() {
        assert!(LabelPolicy::from_slots("major", "", "fix", "none").is_err());
    }
}
