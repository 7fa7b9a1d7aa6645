use std::fmt;

/// Reasons a run stops before publishing.
/// These are successful outcomes that should still be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The pull request asked for no version bump
    NoBump { tag: String },
    /// Tag creation is switched off; nothing is tagged or pushed
    SetTagDisabled { tag: String },
    /// The tag was created locally but pushing is switched off
    PushTagDisabled { tag: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoBump { tag } => {
                write!(f, "Detected no bump, '{}' stays current. Skip setting and pushing new tag", tag)
            }
            SkipReason::SetTagDisabled { tag } => {
                write!(f, "should_set_tag is false. Skip setting and pushing tag '{}'", tag)
            }
            SkipReason::PushTagDisabled { tag } => {
                write!(f, "should_push_tag is false. Skip pushing tag '{}'", tag)
            }
        }
    }
}
