use crate::error::{Result, TagOnMergeError};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Semantic version as read from (or written to) a tag name.
///
/// Keeps the text it was parsed from (e.g. `v1.2.3`) for display, but compares
/// by semantic-version precedence only: major, minor and patch first, then a
/// pre-release ranks below the same triple without one. Build metadata and the
/// original text never take part in comparisons.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    inner: semver::Version,
    original: String,
}

impl SemanticVersion {
    /// Create a release version without a prefix (e.g. `1.2.3`)
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self::release("", major, minor, patch)
    }

    /// Create a release version whose textual form starts with `prefix`
    pub fn release(prefix: &str, major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            inner: semver::Version::new(major, minor, patch),
            original: format!("{}{}.{}.{}", prefix, major, minor, patch),
        }
    }

    /// Parse a tag name such as `v1.2.3`, `1.2.3-rc.1` or `v2.0.0+build.7`.
    ///
    /// A single leading lowercase `v` is accepted. Minor and patch may be
    /// left out (`v1.2` reads as 1.2.0, `v3` as 3.0.0); the text is kept as
    /// written.
    pub fn parse(text: &str) -> Result<Self> {
        let bare = text.strip_prefix('v').unwrap_or(text);

        let inner = semver::Version::parse(&complete_core(bare)).map_err(|e| {
            TagOnMergeError::version(format!("'{}' is not a semantic version: {}", text, e))
        })?;

        Ok(SemanticVersion {
            inner,
            original: text.to_string(),
        })
    }

    pub fn major(&self) -> u64 {
        self.inner.major
    }

    pub fn minor(&self) -> u64 {
        self.inner.minor
    }

    pub fn patch(&self) -> u64 {
        self.inner.patch
    }

    /// Pre-release identifier, if any (`rc.1` for `v1.0.0-rc.1`)
    pub fn pre_release(&self) -> Option<&str> {
        (!self.inner.pre.is_empty()).then(|| self.inner.pre.as_str())
    }

    /// Build metadata, if any (`build.7` for `v1.0.0+build.7`)
    pub fn build_metadata(&self) -> Option<&str> {
        (!self.inner.build.is_empty()).then(|| self.inner.build.as_str())
    }

    /// The text this version was parsed from, or the canonical form for bumped versions
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The `v` prefix of the original text, or an empty string
    pub fn prefix(&self) -> &str {
        if self.original.starts_with('v') {
            "v"
        } else {
            ""
        }
    }

    fn precedence(&self, other: &Self) -> Ordering {
        (self.inner.major, self.inner.minor, self.inner.patch)
            .cmp(&(other.inner.major, other.inner.minor, other.inner.patch))
            .then_with(|| {
                match (self.inner.pre.is_empty(), other.inner.pre.is_empty()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => self.inner.pre.cmp(&other.inner.pre),
                }
            })
    }
}

/// Pads a `MAJOR` or `MAJOR.MINOR` core with `.0` components, leaving any
/// pre-release or build suffix in place
fn complete_core(bare: &str) -> String {
    let core_end = bare.find(['-', '+']).unwrap_or(bare.len());
    let (core, suffix) = bare.split_at(core_end);

    match core.split('.').count() {
        1 => format!("{}.0.0{}", core, suffix),
        2 => format!("{}.0{}", core, suffix),
        _ => bare.to_string(),
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.precedence(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence(other)
    }
}

impl FromStr for SemanticVersion {
    type Err = TagOnMergeError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}
