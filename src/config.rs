use crate::domain::label::{
    DEFAULT_MAJOR_LABEL, DEFAULT_MINOR_LABEL, DEFAULT_NONE_LABEL, DEFAULT_PATCH_LABEL,
};
use crate::domain::LabelPolicy;
use crate::error::{Result, TagOnMergeError};
use crate::git::Tagger;
use crate::github::DEFAULT_API_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "tagonmerge.toml";

/// Represents the complete configuration for semver-tag-on-merge.
///
/// Holds the trunk branch, the publishing switches, the label slots and the
/// identity used for tags. Secrets are never part of it; see [ActionInputs].
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_trunk")]
    pub trunk: String,

    /// Remote to push to; `origin` when unset
    #[serde(default)]
    pub remote: Option<String>,

    #[serde(default = "default_true")]
    pub should_set_tag: bool,

    #[serde(default = "default_true")]
    pub should_push_tag: bool,

    /// Treat a repository without version tags as being at `v0.0.0`
    #[serde(default)]
    pub allow_initial_tag: bool,

    /// Annotation message for new tags; the tag name when unset
    #[serde(default)]
    pub tag_message: Option<String>,

    #[serde(default)]
    pub labels: LabelsConfig,

    #[serde(default)]
    pub tagger: Tagger,

    #[serde(default)]
    pub github: GithubConfig,
}

fn default_trunk() -> String {
    "main".to_string()
}

fn default_true() -> bool {
    true
}

/// Label text for each of the four bump slots.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LabelsConfig {
    #[serde(default = "default_major_label")]
    pub major: String,

    #[serde(default = "default_minor_label")]
    pub minor: String,

    #[serde(default = "default_patch_label")]
    pub patch: String,

    #[serde(default = "default_none_label")]
    pub none: String,
}

fn default_major_label() -> String {
    DEFAULT_MAJOR_LABEL.to_string()
}

fn default_minor_label() -> String {
    DEFAULT_MINOR_LABEL.to_string()
}

fn default_patch_label() -> String {
    DEFAULT_PATCH_LABEL.to_string()
}

fn default_none_label() -> String {
    DEFAULT_NONE_LABEL.to_string()
}

impl Default for LabelsConfig {
    fn default() -> Self {
        LabelsConfig {
            major: default_major_label(),
            minor: default_minor_label(),
            patch: default_patch_label(),
            none: default_none_label(),
        }
    }
}

impl LabelsConfig {
    /// Build the label policy for these slots
    pub fn policy(&self) -> Result<LabelPolicy> {
        LabelPolicy::from_slots(&self.major, &self.minor, &self.patch, &self.none)
    }
}

/// Where to find the pull requests of the repository.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GithubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default)]
    pub owner: Option<String>,

    #[serde(default)]
    pub repository: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for GithubConfig {
    fn default() -> Self {
        GithubConfig {
            api_url: default_api_url(),
            owner: None,
            repository: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            trunk: default_trunk(),
            remote: None,
            should_set_tag: true,
            should_push_tag: true,
            allow_initial_tag: false,
            tag_message: None,
            labels: LabelsConfig::default(),
            tagger: Tagger::default(),
            github: GithubConfig::default(),
        }
    }
}

/// Reads a GitHub Actions input (`INPUT_<NAME>`), trimmed; empty counts as unset
fn action_input<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let key = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
    non_empty(lookup(&key))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A switch input is only turned off by the literal `false`
fn switch_input<F>(lookup: &F, name: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    action_input(lookup, name).map(|value| value != "false")
}

impl Config {
    /// Overlay the GitHub Actions environment onto this configuration.
    ///
    /// `lookup` resolves environment variable names; pass
    /// `|key| std::env::var(key).ok()` to read the process environment.
    /// Unset or empty variables leave the configured values untouched.
    pub fn apply_action_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(trunk) = non_empty(lookup("GITHUB_REF_NAME")) {
            self.trunk = trunk;
        }

        if let Some(should_set_tag) = switch_input(&lookup, "should_set_tag") {
            self.should_set_tag = should_set_tag;
        }
        if let Some(should_push_tag) = switch_input(&lookup, "should_push_tag") {
            self.should_push_tag = should_push_tag;
        }

        for (input, slot) in [
            ("label_major", &mut self.labels.major),
            ("label_minor", &mut self.labels.minor),
            ("label_patch", &mut self.labels.patch),
            ("label_none", &mut self.labels.none),
        ] {
            if let Some(label) = action_input(&lookup, input) {
                *slot = label;
            }
        }

        if let Some(full_name) = non_empty(lookup("GITHUB_REPOSITORY")) {
            let (owner, repository) = full_name
                .split_once('/')
                .filter(|(owner, name)| !owner.is_empty() && !name.is_empty())
                .ok_or_else(|| {
                    TagOnMergeError::config(format!(
                        "GITHUB_REPOSITORY '{}' is not of the form owner/name",
                        full_name
                    ))
                })?;
            self.github.owner = Some(owner.to_string());
            self.github.repository = Some(repository.to_string());
        }

        if let Some(api_url) = non_empty(lookup("GITHUB_API_URL")) {
            self.github.api_url = api_url;
        }

        Ok(())
    }

    /// Label policy built from the configured slots
    pub fn label_policy(&self) -> Result<LabelPolicy> {
        self.labels.policy()
    }

    /// Owner and repository name for the pull request lookup
    pub fn github_repository(&self) -> Result<(&str, &str)> {
        match (&self.github.owner, &self.github.repository) {
            (Some(owner), Some(repository)) => Ok((owner, repository)),
            _ => Err(TagOnMergeError::config(
                "could not determine the repository, set GITHUB_REPOSITORY or [github] owner/repository",
            )),
        }
    }
}

/// Per-run values taken from the environment rather than the config file
#[derive(Clone, Default, PartialEq)]
pub struct ActionInputs {
    /// Commit the merge event refers to (`GITHUB_SHA`)
    pub event_sha: Option<String>,
    /// Token for the API and, without an SSH key, for pushing (`repo_token` input)
    pub token: Option<String>,
    /// Base64 encoded private key for pushing over SSH (`repo_ssh_key` input)
    pub ssh_key: Option<String>,
    /// Checkout location (`repo_storage_path_overwrite` input, else `GITHUB_WORKSPACE`)
    pub repo_path: Option<PathBuf>,
}

impl ActionInputs {
    /// Read the inputs through `lookup`
    pub fn from_env<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let repo_path = action_input(&lookup, "repo_storage_path_overwrite")
            .or_else(|| non_empty(lookup("GITHUB_WORKSPACE")))
            .map(PathBuf::from);

        ActionInputs {
            event_sha: non_empty(lookup("GITHUB_SHA")),
            token: action_input(&lookup, "repo_token"),
            ssh_key: action_input(&lookup, "repo_ssh_key"),
            repo_path,
        }
    }
}

impl std::fmt::Debug for ActionInputs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionInputs")
            .field("event_sha", &self.event_sha)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("ssh_key", &self.ssh_key.as_ref().map(|_| "<redacted>"))
            .field("repo_path", &self.repo_path)
            .finish()
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `tagonmerge.toml` in current directory
/// 3. `.tagonmerge.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let path = if let Some(path) = config_path {
        PathBuf::from(path)
    } else if local.exists() {
        local
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_config.exists() {
            user_config
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path)?;
    parse_config(&config_str)
        .map_err(|e| TagOnMergeError::config(format!("{}: {}", path.display(), e)))
}

/// Parses configuration from TOML text
pub fn parse_config(text: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(text)
}
