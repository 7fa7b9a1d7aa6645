//! Merge-time tagging workflow
//!
//! Runs the steps of one merge event in order: resolve the current version,
//! look up the merged pull request, decide the bump, then create and push the
//! tag. A failing step ends the run with its error; nothing is rolled back, so
//! a tag created before a failed push stays in the local repository and a
//! re-run reports it as `TagAlreadyExists`.

use crate::config::Config;
use crate::domain::{BumpDecision, SemanticVersion};
use crate::error::{Result, TagOnMergeError};
use crate::git::{PushOutcome, RepoAuth, Repository, DEFAULT_REMOTE};
use crate::github::PrLookup;
use crate::outputs::{OutputSink, NEW_TAG_OUTPUT, OLD_TAG_OUTPUT};
use crate::publisher::TagPublisher;
use crate::resolver::resolve_current_version;
use crate::skip::SkipReason;
use tracing::{info, warn};

/// Per-run arguments that do not come from the configuration
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowArgs {
    /// Commit the merge event was triggered for
    pub event_sha: String,

    /// Credentials for pushing the tag
    pub auth: RepoAuth,
}

/// Result of a successful workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Number of the pull request that decided the bump
    pub pull_request: u64,

    /// Old and new version
    pub decision: BumpDecision,

    /// Whether the new tag was created locally
    pub tag_created: bool,

    /// Outcome of the push, if one was attempted
    pub push: Option<PushOutcome>,

    /// Remote the tag was pushed to
    pub remote: String,

    /// Why publishing stopped early, if it did
    pub skipped: Option<SkipReason>,
}

/// Version the run starts from.
///
/// Without any version tag this fails with `NoMatchingTag`, unless the
/// configuration opts into first-release semantics with `allow_initial_tag`.
fn current_version<R: Repository>(repo: &R, config: &Config) -> Result<SemanticVersion> {
    match resolve_current_version(repo) {
        Err(TagOnMergeError::NoMatchingTag) if config.allow_initial_tag => {
            warn!("no semantic version tag found, starting from v0.0.0");
            Ok(SemanticVersion::release("v", 0, 0, 0))
        }
        result => result,
    }
}

/// Main merge workflow
///
/// Orchestrates the tagging process:
/// 1. Resolve the highest semantic version tag
/// 2. Find the pull request that merged `event_sha` into trunk
/// 3. Decide the bump from its labels and publish the `old-tag`/`new-tag` outputs
/// 4. Create the annotated tag (unless no bump or `should_set_tag` is off)
/// 5. Push it (unless `should_push_tag` is off)
pub fn run_workflow<R, P>(
    repo: &R,
    lookup: &P,
    outputs: &mut dyn OutputSink,
    config: &Config,
    args: &WorkflowArgs,
) -> Result<WorkflowResult>
where
    R: Repository,
    P: PrLookup,
{
    let policy = config.label_policy()?;

    let current = current_version(repo, config)?;
    info!(version = %current, "resolved current version");

    let pr = lookup.pull_request_for_commit(&args.event_sha, &config.trunk)?;
    let kind = policy.resolve_bump_kind(&pr)?;
    let decision = BumpDecision::decide(current, kind);

    info!(
        pull_request = pr.number,
        bump = %kind,
        old_tag = decision.old_version.original(),
        new_tag = decision.new_version.original(),
        "decided version bump"
    );
    outputs.set(OLD_TAG_OUTPUT, decision.old_version.original())?;
    outputs.set(NEW_TAG_OUTPUT, decision.new_version.original())?;

    let remote = config
        .remote
        .clone()
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_REMOTE.to_string());
    let tag = decision.new_version.original().to_string();

    let mut result = WorkflowResult {
        pull_request: pr.number,
        decision,
        tag_created: false,
        push: None,
        remote,
        skipped: None,
    };

    if !result.decision.is_bump() {
        return Ok(skip(result, SkipReason::NoBump { tag }));
    }

    if !config.should_set_tag {
        return Ok(skip(result, SkipReason::SetTagDisabled { tag }));
    }

    let publisher = TagPublisher::new(repo, config.tagger.clone());
    publisher.create_annotated_tag(&tag, config.tag_message.as_deref().unwrap_or(""))?;
    result.tag_created = true;

    if !config.should_push_tag {
        return Ok(skip(result, SkipReason::PushTagDisabled { tag }));
    }

    result.push = Some(publisher.push_tag(&args.auth, &tag, Some(result.remote.as_str()))?);
    Ok(result)
}

fn skip(mut result: WorkflowResult, reason: SkipReason) -> WorkflowResult {
    info!("{}", reason);
    result.skipped = Some(reason);
    result
}
