// ABOUTME: Change-set resolution between two file states
// Classifies paths as added, modified or deleted and folds accepted changes back into a state

use serde::{Deserialize, Serialize};

use super::FileState;

/// One path together with the timestamp it is being reported with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub timestamp: f64,
}

impl FileChange {
    pub fn new(path: impl Into<String>, timestamp: f64) -> Self {
        Self {
            path: path.into(),
            timestamp,
        }
    }
}

/// Added/Modified/Deleted classification between two file states.
///
/// A path appears in at most one of the three lists. Deleted entries carry
/// the last known timestamp since the file is gone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub added: Vec<FileChange>,
    pub modified: Vec<FileChange>,
    pub deleted: Vec<FileChange>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.added.len() + self.modified.len() + self.deleted.len()
    }

    /// Paths whose contents must be shipped: added followed by modified.
    pub fn upload_paths(&self) -> impl Iterator<Item = &str> {
        self.added
            .iter()
            .chain(self.modified.iter())
            .map(|c| c.path.as_str())
    }

    pub fn summary(&self) -> String {
        if self.is_empty() {
            "No changes".to_string()
        } else {
            format!(
                "+{} ~{} -{}",
                self.added.len(),
                self.modified.len(),
                self.deleted.len()
            )
        }
    }
}

/// Compare `old` against `new`.
///
/// Timestamps are compared for exact equality; any difference counts as a
/// modification.
#[allow(clippy::float_cmp)]
pub fn diff(old: &FileState, new: &FileState) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for (path, timestamp) in new.iter() {
        match old.get(path) {
            None => changes.added.push(FileChange::new(path, timestamp)),
            Some(previous) if previous != timestamp => {
                changes.modified.push(FileChange::new(path, timestamp));
            }
            Some(_) => {}
        }
    }

    for (path, timestamp) in old.iter() {
        if !new.contains(path) {
            changes.deleted.push(FileChange::new(path, timestamp));
        }
    }

    changes
}

/// Apply `changes` on top of `old` and return the resulting state.
///
/// Added and modified entries are upserts, deleted entries are removals.
/// The change set is replayed as given; nothing is re-derived.
pub fn commit(old: &FileState, changes: &ChangeSet) -> FileState {
    let mut state = old.clone();

    for change in changes.added.iter().chain(changes.modified.iter()) {
        state.upsert(change.path.clone(), change.timestamp);
    }
    for change in &changes.deleted {
        state.remove(&change.path);
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state(entries: &[(&str, f64)]) -> FileState {
        entries.iter().map(|(p, t)| (*p, *t)).collect()
    }

    #[test]
    fn test_sub_second_mtime_change_is_a_modification() {
        let old = state(&[("a.txt", 100.000_001)]);
        let new = state(&[("a.txt", 100.000_002)]);

        let changes = diff(&old, &new);

        assert_eq!(changes.modified, vec![FileChange::new("a.txt", 100.000_002)]);
        assert!(changes.added.is_empty());
        assert!(changes.deleted.is_empty());
    }

    #[test]
    fn test_diff_from_empty_state_adds_everything() {
        let new = state(&[("a.txt", 1.0), ("b.txt", 2.0)]);

        let changes = diff(&FileState::new(), &new);

        assert_eq!(changes.added.len(), 2);
        assert_eq!(changes.summary(), "+2 ~0 -0");
    }

    #[test]
    fn test_upload_paths_excludes_deleted() {
        let old = state(&[("gone.txt", 1.0), ("edit.txt", 1.0)]);
        let new = state(&[("edit.txt", 2.0), ("new.txt", 3.0)]);

        let changes = diff(&old, &new);

        assert_eq!(
            changes.upload_paths().collect::<Vec<_>>(),
            vec!["new.txt", "edit.txt"]
        );
        assert_eq!(changes.len(), 3);
    }

    #[test]
    fn test_commit_replay_is_a_no_op() {
        let old = state(&[("a.txt", 100.0), ("c.txt", 300.0)]);
        let new = state(&[("a.txt", 150.0), ("b.txt", 200.0)]);
        let changes = diff(&old, &new);

        let once = commit(&old, &changes);
        let twice = commit(&once, &changes);

        assert_eq!(once, new);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_commit_tolerates_deleting_unknown_path() {
        let old = state(&[("a.txt", 100.0)]);
        let changes = ChangeSet {
            deleted: vec![FileChange::new("never-there.txt", 1.0)],
            ..ChangeSet::default()
        };

        assert_eq!(commit(&old, &changes), old);
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(ChangeSet::default().summary(), "No changes");
    }
}
