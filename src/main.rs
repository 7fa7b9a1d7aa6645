use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use semver_tag_on_merge::cli::{run_workflow, WorkflowArgs};
use semver_tag_on_merge::config::{self, ActionInputs};
use semver_tag_on_merge::git::{Git2Repository, RepoAuth};
use semver_tag_on_merge::github::GitHubClient;
use semver_tag_on_merge::{outputs, ui};

#[derive(clap::Parser)]
#[command(
    name = "semver-tag-on-merge",
    version,
    about = "Create and push the next semantic version tag for a merged pull request"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Path to the repository checkout")]
    repo_path: Option<PathBuf>,

    #[arg(long, help = "Commit the merge event was triggered for")]
    sha: Option<String>,

    #[arg(long, help = "Branch pull requests are merged into")]
    trunk: Option<String>,

    #[arg(long, help = "Remote to push the tag to")]
    remote: Option<String>,

    #[arg(long, help = "Decide the version but do not create a tag")]
    no_set_tag: bool,

    #[arg(long, help = "Create the tag but do not push it")]
    no_push_tag: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let env = |key: &str| std::env::var(key).ok();

    let mut config = config::load_config(args.config.as_deref())?;
    config.apply_action_env(env)?;
    let inputs = ActionInputs::from_env(env);

    if let Some(trunk) = args.trunk {
        config.trunk = trunk;
    }
    if let Some(remote) = args.remote {
        config.remote = Some(remote);
    }
    if args.no_set_tag {
        config.should_set_tag = false;
    }
    if args.no_push_tag {
        config.should_push_tag = false;
    }

    let event_sha = args
        .sha
        .or(inputs.event_sha.clone())
        .context("could not read the event commit, pass --sha or set GITHUB_SHA")?;
    let token = inputs
        .token
        .as_deref()
        .context("input variable 'repo_token' cannot be empty")?;

    let repo_path = args
        .repo_path
        .or_else(|| inputs.repo_path.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let repo = Git2Repository::open(&repo_path)
        .with_context(|| format!("could not open repository at {}", repo_path.display()))?;

    let auth = RepoAuth::from_inputs(Some(token), inputs.ssh_key.as_deref())?;
    let (owner, repository) = config.github_repository()?;
    let client = GitHubClient::new(&config.github.api_url, owner, repository, token)?;

    let mut sink = outputs::default_sink();
    let workflow_args = WorkflowArgs { event_sha, auth };
    let result = run_workflow(&repo, &client, sink.as_mut(), &config, &workflow_args)?;

    ui::display_decision(&result.decision);
    if let Some(reason) = &result.skipped {
        ui::display_skip(reason);
    }
    if result.tag_created {
        ui::display_success(&format!("Created tag {}", result.decision.new_version));
    }
    if let Some(outcome) = result.push {
        ui::display_push(result.decision.new_version.original(), &result.remote, outcome);
    }

    Ok(())
}
