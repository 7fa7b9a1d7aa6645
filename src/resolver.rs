//! Resolves the current version from the repository's tags

use crate::domain::{SemanticVersion, TagReference};
use crate::error::{Result, TagOnMergeError};
use crate::git::Repository;
use std::cmp::Ordering;
use tracing::debug;

/// Returns the highest semantic version among `tags`.
///
/// Tags whose names are not semantic versions are skipped. When two tags carry
/// the same version under different spellings (`v1.2.0` and `1.2.0`), the one
/// whose name sorts last wins, so the result never depends on listing order.
///
/// # Returns
/// * `Ok(SemanticVersion)` - The highest version found
/// * `Err(NoMatchingTag)` - If no tag name parses as a semantic version
pub fn find_latest_semantic_version(tags: &[TagReference]) -> Result<SemanticVersion> {
    tags.iter()
        .filter_map(|tag| match SemanticVersion::parse(&tag.name) {
            Ok(version) => Some(version),
            Err(e) => {
                debug!(tag = %tag.name, error = %e, "skipping tag");
                None
            }
        })
        .max_by(|a, b| match a.cmp(b) {
            Ordering::Equal => a.original().cmp(b.original()),
            ordering => ordering,
        })
        .ok_or(TagOnMergeError::NoMatchingTag)
}

/// Lists the repository's tags and resolves the highest semantic version
pub fn resolve_current_version<R: Repository>(repo: &R) -> Result<SemanticVersion> {
    let tags = repo.list_tags()?;
    find_latest_semantic_version(&tags)
}
