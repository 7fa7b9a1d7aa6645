use crate::domain::SemanticVersion;
use std::fmt;

/// Magnitude of the version increment requested for a merge.
///
/// Variants are declared from least to most severe; the order is informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BumpKind {
    None,
    Patch,
    Minor,
    Major,
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpKind::Major => write!(f, "major"),
            BumpKind::Minor => write!(f, "minor"),
            BumpKind::Patch => write!(f, "patch"),
            BumpKind::None => write!(f, "none"),
        }
    }
}

/// Applies a bump to a version.
///
/// - **Major**: major += 1, minor = 0, patch = 0
/// - **Minor**: minor += 1, patch = 0
/// - **Patch**: patch += 1
/// - **None**: the version is returned unchanged
///
/// Bumped versions are plain releases: pre-release and build metadata are
/// dropped and the textual form keeps the input's `v` prefix.
///
/// Components saturate at `u64::MAX`, so bumping a component already at the
/// ceiling returns an equal version; publishing it then fails with
/// `TagAlreadyExists`.
///
/// # Example
/// ```
/// # use semver_tag_on_merge::domain::{apply_bump, BumpKind, SemanticVersion};
/// let v = SemanticVersion::parse("v1.2.3").unwrap();
/// assert_eq!(apply_bump(&v, BumpKind::Minor).original(), "v1.3.0");
/// ```
pub fn apply_bump(version: &SemanticVersion, kind: BumpKind) -> SemanticVersion {
    let (major, minor, patch) = (version.major(), version.minor(), version.patch());
    let prefix = version.prefix();

    match kind {
        BumpKind::Major => SemanticVersion::release(prefix, major.saturating_add(1), 0, 0),
        BumpKind::Minor => SemanticVersion::release(prefix, major, minor.saturating_add(1), 0),
        BumpKind::Patch => SemanticVersion::release(prefix, major, minor, patch.saturating_add(1)),
        BumpKind::None => version.clone(),
    }
}

/// Outcome of the bump decision for one run
#[derive(Debug, Clone, PartialEq)]
pub struct BumpDecision {
    pub old_version: SemanticVersion,
    pub new_version: SemanticVersion,
    pub kind: BumpKind,
}

impl BumpDecision {
    /// Decide the next version for `old_version` under `kind`
    pub fn decide(old_version: SemanticVersion, kind: BumpKind) -> Self {
        let new_version = apply_bump(&old_version, kind);
        BumpDecision {
            old_version,
            new_version,
            kind,
        }
    }

    /// Whether a new tag has to be published
    pub fn is_bump(&self) -> bool {
        self.kind != BumpKind::None
    }
}
