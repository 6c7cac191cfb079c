use std::collections::HashMap;

use tracing::debug;

use crate::commit::{Commit, CommitId, CommitInfo};
use crate::error::HistoryError;

/// A named, linear commit history.
///
/// Commits form a singly linked chain, newest first: each commit points
/// at its predecessor via `previous`, and the history holds the id of the
/// most recent commit. Commits are stored in an id-keyed map so that
/// links are plain ids rather than references; the map always contains
/// exactly the commits reachable from `head`, because every operation
/// that detaches a commit also removes it from the map.
#[derive(Debug, Clone)]
pub struct CommitHistory {
    name: String,
    head: Option<CommitId>,
    commits: HashMap<CommitId, Commit>,
}

impl CommitHistory {
    /// Create an empty history.
    ///
    /// Fails with `InvalidArgument` if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, HistoryError> {
        let name = name.into();
        if name.is_empty() {
            return Err(HistoryError::InvalidArgument(
                "history name must not be empty".to_string(),
            ));
        }

        Ok(CommitHistory {
            name,
            head: None,
            commits: HashMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the id of the most recent commit, or None if the history is empty
    pub fn head_id(&self) -> Option<CommitId> {
        self.head
    }

    /// Number of commits in the chain
    pub fn depth(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// One-line summary of the history and its current head
    pub fn describe(&self) -> String {
        match self.head.and_then(|id| self.commits.get(&id)) {
            Some(head) => format!(
                "{} - Current head: {}: {}",
                self.name, head.id, head.message
            ),
            None => format!("{} - No commits", self.name),
        }
    }

    /// Walk the chain from the head towards the oldest commit.
    fn iter(&self) -> impl Iterator<Item = &Commit> {
        let mut next = self.head;
        std::iter::from_fn(move || {
            let commit = self.commits.get(&next?)?;
            next = commit.previous;
            Some(commit)
        })
    }

    /// Check whether a commit with the given id is reachable from the head
    pub fn contains(&self, target: CommitId) -> bool {
        self.iter().any(|commit| commit.id == target)
    }

    /// Get up to `limit` commits, newest first.
    ///
    /// Returns fewer than `limit` entries when the chain is shorter, and
    /// an empty list on an empty history. Fails with `InvalidArgument`
    /// only for `limit == 0`.
    pub fn commits(&self, limit: usize) -> Result<Vec<CommitInfo>, HistoryError> {
        if limit == 0 {
            return Err(HistoryError::InvalidArgument(
                "commit count must be positive".to_string(),
            ));
        }

        Ok(self.iter().take(limit).map(CommitInfo::from).collect())
    }

    /// Render up to `limit` commits as `"{id}: {message}"` lines, newest
    /// first, newline-joined. Same argument contract as [`commits`].
    ///
    /// [`commits`]: CommitHistory::commits
    pub fn history(&self, limit: usize) -> Result<String, HistoryError> {
        let lines: Vec<String> = self
            .commits(limit)?
            .iter()
            .map(|info| format!("{}: {}", info.id, info.message))
            .collect();

        Ok(lines.join("\n"))
    }

    /// Create a new commit on top of the current head and return its id.
    ///
    /// The message may be any text, including empty.
    pub fn commit(&mut self, message: impl Into<String>) -> CommitId {
        let commit = Commit::new(message.into(), self.head);
        let id = commit.id;

        self.commits.insert(id, commit);
        self.head = Some(id);

        debug!(history = %self.name, commit = %id, "created commit");
        id
    }

    /// Move the head back by `n` commits, discarding everything walked
    /// past. Walking off the oldest commit leaves the history empty.
    ///
    /// Fails with `InvalidArgument` if `n == 0`; a reset on an already
    /// empty history is a no-op.
    pub fn reset(&mut self, n: usize) -> Result<(), HistoryError> {
        if n == 0 {
            return Err(HistoryError::InvalidArgument(
                "reset depth must be positive".to_string(),
            ));
        }

        let mut dropped = 0usize;
        for _ in 0..n {
            let Some(id) = self.head else { break };
            // Detached commits leave the store immediately
            self.head = self.commits.remove(&id).and_then(|c| c.previous);
            dropped += 1;
        }

        debug!(history = %self.name, dropped, "reset head");
        Ok(())
    }

    /// Remove the single commit with the given id, relinking its
    /// neighbour so the rest of the chain keeps its order.
    ///
    /// Returns false when the history is empty or no commit matches.
    pub fn drop_commit(&mut self, target: CommitId) -> bool {
        let Some(head_id) = self.head else {
            return false;
        };

        if head_id == target {
            self.head = self.commits.remove(&target).and_then(|c| c.previous);
            debug!(history = %self.name, commit = %target, "dropped head commit");
            return true;
        }

        // Find the commit whose predecessor is the target, then splice
        // the target out of the chain.
        let mut current = head_id;
        loop {
            let Some(previous) = self.commits.get(&current).and_then(|c| c.previous) else {
                return false;
            };

            if previous == target {
                let successor = self.commits.remove(&target).and_then(|c| c.previous);
                if let Some(commit) = self.commits.get_mut(&current) {
                    commit.previous = successor;
                }
                debug!(history = %self.name, commit = %target, "dropped commit");
                return true;
            }

            current = previous;
        }
    }

    /// Merge the commit with the given id into its predecessor.
    ///
    /// The two adjacent commits are replaced, at the same chain position,
    /// by one freshly minted commit whose message is
    /// `"SQUASHED: {newer}/{older}"`. Returns false when the history has
    /// fewer than two commits, when no commit matches, or when the match
    /// is the oldest commit (nothing older to merge with).
    pub fn squash(&mut self, target: CommitId) -> bool {
        if self.depth() < 2 {
            return false;
        }

        let Some(head_id) = self.head else {
            return false;
        };

        if head_id == target {
            let merged = match self.merge_pair(target) {
                Some(merged) => merged,
                None => return false,
            };
            self.head = Some(merged.id);
            let id = merged.id;
            self.commits.insert(id, merged);
            debug!(history = %self.name, commit = %id, "squashed head");
            return true;
        }

        let mut current = head_id;
        loop {
            let Some(previous) = self.commits.get(&current).and_then(|c| c.previous) else {
                return false;
            };

            if previous == target {
                let merged = match self.merge_pair(target) {
                    Some(merged) => merged,
                    None => return false,
                };
                let id = merged.id;
                self.commits.insert(id, merged);
                if let Some(commit) = self.commits.get_mut(&current) {
                    commit.previous = Some(id);
                }
                debug!(history = %self.name, commit = %id, "squashed commit");
                return true;
            }

            current = previous;
        }
    }

    /// Remove `newer` and its predecessor from the store and build their
    /// replacement. Returns None, without touching the chain, when
    /// `newer` has no predecessor to merge with.
    fn merge_pair(&mut self, newer: CommitId) -> Option<Commit> {
        let older_id = self.commits.get(&newer).and_then(|c| c.previous)?;

        let newer = self.commits.remove(&newer)?;
        // Reachable chain invariant: the predecessor is in the store
        let older = self.commits.remove(&older_id)?;

        Some(Commit::new(
            format!("SQUASHED: {}/{}", newer.message, older.message),
            older.previous,
        ))
    }
}
