/// Fully-qualified prefix of the tag namespace
pub const TAG_REF_PREFIX: &str = "refs/tags/";

/// A tag in the repository and the object it points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagReference {
    /// Short tag name (e.g. "v1.2.3")
    pub name: String,
    /// Hex id of the object the tag reference targets
    pub target: String,
}

impl TagReference {
    /// Create a new tag reference
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        TagReference {
            name: name.into(),
            target: target.into(),
        }
    }

    /// Fully-qualified reference name (e.g. "refs/tags/v1.2.3")
    pub fn ref_name(&self) -> String {
        tag_ref_name(&self.name)
    }
}

/// Fully-qualified reference name for a short tag name
pub fn tag_ref_name(name: &str) -> String {
    format!("{}{}", TAG_REF_PREFIX, name)
}

/// Refspec that pushes a local tag to the identically named remote tag
pub fn tag_refspec(name: &str) -> String {
    let reference = tag_ref_name(name);
    format!("{}:{}", reference, reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_reference_new() {
        let tag = TagReference::new("v1.2.3", "0a3f8c25");
        assert_eq!(tag.name, "v1.2.3");
        assert_eq!(tag.target, "0a3f8c25");
    }

    #[test]
    fn test_ref_name() {
        assert_eq!(TagReference::new("v1.2.3", "").ref_name(), "refs/tags/v1.2.3");
    }

    #[test]
    fn test_tag_refspec() {
        assert_eq!(tag_refspec("v1.2.3"), "refs/tags/v1.2.3:refs/tags/v1.2.3");
    }
}
