//! Destination resolver
//!
//! A destination is either a plain local path or `[user@]host:path`. The
//! split is on the *last* colon so host specs containing `@` keep working.

use std::path::PathBuf;

use crate::error::{PatchError, PatchResult};

/// A resolved patch destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Same-host destination; plain filesystem operations
    Local { path: PathBuf },
    /// Remote destination reached over ssh/scp
    Remote {
        user: Option<String>,
        host: String,
        path: PathBuf,
    },
}

impl Destination {
    /// Parse a destination specifier.
    ///
    /// No colon means local and the whole specifier is the path. Otherwise
    /// everything after the final colon is the path and the part before it
    /// is `host` or `user@host`.
    pub fn parse(spec: &str) -> PatchResult<Self> {
        let Some((head, path)) = spec.rsplit_once(':') else {
            if spec.is_empty() {
                return Err(PatchError::MissingPath);
            }
            return Ok(Destination::Local {
                path: PathBuf::from(spec),
            });
        };

        if path.is_empty() {
            return Err(PatchError::MissingPath);
        }

        let (user, host) = match head.split_once('@') {
            Some((user, host)) => (Some(user), host),
            None => (None, head),
        };

        if host.is_empty() {
            return Err(PatchError::MissingHost);
        }

        Ok(Destination::Remote {
            user: user.filter(|u| !u.is_empty()).map(str::to_string),
            host: host.to_string(),
            path: PathBuf::from(path),
        })
    }

    /// Path of the destination jar (local meaning on the destination host)
    pub fn path(&self) -> &std::path::Path {
        match self {
            Destination::Local { path } => path,
            Destination::Remote { path, .. } => path,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Destination::Remote { .. })
    }

    /// The `[user@]host` argument handed to ssh/scp. None for local.
    pub fn ssh_target(&self) -> Option<String> {
        match self {
            Destination::Local { .. } => None,
            Destination::Remote { user, host, .. } => Some(match user {
                Some(user) => format!("{user}@{host}"),
                None => host.clone(),
            }),
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Local { path } => write!(f, "{}", path.display()),
            Destination::Remote { user: Some(user), host, path } => {
                write!(f, "{user}@{host}:{}", path.display())
            }
            Destination::Remote { user: None, host, path } => {
                write!(f, "{host}:{}", path.display())
            }
        }
    }
}
