//! Credentials for talking to remotes

use crate::error::{Result, TagOnMergeError};
use base64::Engine;
use git2::{Cred, CredentialType, RemoteCallbacks};
use std::cell::Cell;
use std::fmt;

/// User name sent with token authentication; the host only checks the token
const TOKEN_USERNAME: &str = "x-access-token";

/// How to authenticate against the remote when pushing
#[derive(Clone, PartialEq, Eq)]
pub enum RepoAuth {
    /// libgit2 default credentials; enough for local and anonymous remotes
    Default,
    /// HTTP basic authentication with an access token as password
    Token { token: String },
    /// SSH authentication with an in-memory private key
    SshKey { private_key: String },
}

impl RepoAuth {
    /// Pick the authentication method from the action inputs.
    ///
    /// A base64 encoded SSH key wins over the token; without either the
    /// default credentials are used.
    pub fn from_inputs(token: Option<&str>, ssh_key_base64: Option<&str>) -> Result<Self> {
        if let Some(encoded) = ssh_key_base64.filter(|k| !k.trim().is_empty()) {
            let decoded = base64::engine::general_purpose::STANDARD
                .decode(encoded.trim())
                .map_err(|e| TagOnMergeError::config(format!("could not decode 'repo_ssh_key': {}", e)))?;
            let private_key = String::from_utf8(decoded).map_err(|_| {
                TagOnMergeError::config("'repo_ssh_key' does not decode to a text private key")
            })?;
            return Ok(RepoAuth::SshKey { private_key });
        }

        match token.filter(|t| !t.is_empty()) {
            Some(token) => Ok(RepoAuth::Token {
                token: token.to_string(),
            }),
            None => Ok(RepoAuth::Default),
        }
    }

    fn credentials(
        &self,
        username_from_url: Option<&str>,
        allowed_types: CredentialType,
    ) -> std::result::Result<Cred, git2::Error> {
        match self {
            RepoAuth::Token { token } if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) => {
                Cred::userpass_plaintext(TOKEN_USERNAME, token)
            }
            RepoAuth::SshKey { private_key } if allowed_types.contains(CredentialType::SSH_KEY) => {
                Cred::ssh_key_from_memory(username_from_url.unwrap_or("git"), None, private_key, None)
            }
            _ => Cred::default(),
        }
    }
}

impl fmt::Debug for RepoAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoAuth::Default => write!(f, "Default"),
            RepoAuth::Token { .. } => write!(f, "Token {{ token: <redacted> }}"),
            RepoAuth::SshKey { .. } => write!(f, "SshKey {{ private_key: <redacted> }}"),
        }
    }
}

/// Remote callbacks that answer credential requests with `auth`.
///
/// libgit2 asks again whenever the remote rejects the credentials, so the
/// callback gives up after the first rejected attempt.
pub fn remote_callbacks(auth: &RepoAuth) -> RemoteCallbacks<'_> {
    let attempts = Cell::new(0u32);
    let mut callbacks = RemoteCallbacks::new();

    callbacks.credentials(move |_url, username_from_url, allowed_types| {
        attempts.set(attempts.get() + 1);
        if attempts.get() > 1 {
            return Err(git2::Error::from_str("remote rejected the configured credentials"));
        }
        auth.credentials(username_from_url, allowed_types)
    });

    callbacks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_auth() {
        let auth = RepoAuth::from_inputs(Some("ghp_secret"), None).unwrap();
        assert_eq!(
            auth,
            RepoAuth::Token {
                token: "ghp_secret".to_string()
            }
        );
    }

    #[test]
    fn test_ssh_key_wins_over_token() {
        let encoded = base64::engine::general_purpose::STANDARD.encode("-----BEGIN KEY-----\n");
        let auth = RepoAuth::from_inputs(Some("ghp_secret"), Some(&encoded)).unwrap();
        assert_eq!(
            auth,
            RepoAuth::SshKey {
                private_key: "-----BEGIN KEY-----\n".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_base64_key() {
        let err = RepoAuth::from_inputs(None, Some("%%%not base64%%%")).unwrap_err();
        assert!(err.to_string().contains("repo_ssh_key"));
    }

    #[test]
    fn test_no_inputs_uses_default() {
        assert_eq!(RepoAuth::from_inputs(None, Some("  ")).unwrap(), RepoAuth::Default);
        assert_eq!(RepoAuth::from_inputs(Some(""), None).unwrap(), RepoAuth::Default);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let auth = RepoAuth::Token {
            token: "ghp_secret".to_string(),
        };
        let printed = format!("{:?}", auth);
        assert!(!printed.contains("ghp_secret"));
        assert!(printed.contains("redacted"));
    }
}
