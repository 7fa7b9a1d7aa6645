//! Domain logic - pure business rules independent of git operations

pub mod bump;
pub mod label;
pub mod pull_request;
pub mod tag;
pub mod version;

pub use bump::{apply_bump, BumpDecision, BumpKind};
pub use label::LabelPolicy;
pub use pull_request::PullRequest;
pub use tag::{tag_ref_name, tag_refspec, TagReference, TAG_REF_PREFIX};
pub use version::SemanticVersion;
