use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a commit.
///
/// A freshly generated random 128-bit value; no process-wide counter or
/// lock is involved, so two histories can mint ids independently. The
/// canonical text form is the hyphenated lowercase rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(Uuid);

impl CommitId {
    /// Mint a fresh identifier.
    pub fn generate() -> Self {
        CommitId(Uuid::new_v4())
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CommitId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CommitId(Uuid::parse_str(s)?))
    }
}

/// A single commit in the chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    /// Unique commit ID, assigned at creation
    pub id: CommitId,
    /// Commit message (any text, may be empty)
    pub message: String,
    /// ID of the chronologically preceding commit, None for the oldest
    pub previous: Option<CommitId>,
}

impl Commit {
    pub fn new(message: String, previous: Option<CommitId>) -> Self {
        Self {
            id: CommitId::generate(),
            message,
            previous,
        }
    }

    /// Check if this is the oldest commit in its chain (no predecessor)
    pub fn is_root(&self) -> bool {
        self.previous.is_none()
    }

    /// Render as a history line
    pub fn display(&self) -> String {
        format!("{}: {}", self.id, self.message)
    }
}

/// Commit data as returned by history queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    pub id: CommitId,
    pub message: String,
    pub previous: Option<CommitId>,
}

impl From<&Commit> for CommitInfo {
    fn from(commit: &Commit) -> Self {
        CommitInfo {
            id: commit.id,
            message: commit.message.clone(),
            previous: commit.previous,
        }
    }
}
