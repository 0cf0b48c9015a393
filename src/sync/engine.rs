// ABOUTME: Scan, diff, transmit and commit cycle for a connected project
// The snapshot is only replaced after the remote side has accepted the transfer

use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::archive::{build_archive, encode_archive};
use super::SyncError;
use crate::config::ProjectPaths;
use crate::remote::RemoteProject;
use crate::state::{self, ChangeSet, FileState, ScanOptions, SnapshotStore, StateError};

/// Result of the detection half of a cycle, waiting to be pushed.
#[derive(Debug, Clone)]
pub struct PendingSync {
    /// Snapshot the changes were computed against
    pub base: FileState,
    pub changes: ChangeSet,
}

impl PendingSync {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

pub struct SyncEngine<R> {
    root: PathBuf,
    store: SnapshotStore,
    scan_options: ScanOptions,
    remote: R,
}

impl<R: RemoteProject> SyncEngine<R> {
    pub fn new(paths: &ProjectPaths, scan_options: ScanOptions, remote: R) -> Self {
        Self {
            root: paths.root.clone(),
            store: paths.snapshot_store(),
            scan_options,
            remote,
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    fn load_snapshot(&self) -> Result<FileState, SyncError> {
        self.store.load().map_err(|e| match e {
            StateError::SnapshotMissing(_) | StateError::SnapshotCorrupt { .. } => {
                SyncError::SnapshotUnavailable(e)
            }
            other => SyncError::State(other),
        })
    }

    /// Scan the project and diff it against the committed snapshot.
    pub fn detect_changes(&self) -> Result<PendingSync, SyncError> {
        let base = self.load_snapshot()?;
        let current = state::scan(&self.root, &self.scan_options)?;
        let changes = state::diff(&base, &current);

        debug!("Detected changes: {}", changes.summary());
        Ok(PendingSync { base, changes })
    }

    /// Ship the added and modified files, then commit the change set.
    ///
    /// Nothing is sent and nothing is committed when there are no changes.
    /// Any failure before the remote accepts the upload leaves the snapshot
    /// untouched, so the next cycle derives the same change set again.
    pub async fn push(&self, pending: PendingSync) -> Result<ChangeSet, SyncError> {
        let PendingSync { base, changes } = pending;
        if changes.is_empty() {
            return Ok(changes);
        }

        let archive = build_archive(&self.root, changes.upload_paths())?;
        let encoded = encode_archive(&archive);

        if let Err(e) = self.remote.upload_files(&encoded).await {
            warn!("Upload rejected, snapshot left unchanged: {}", e);
            return Err(e.into());
        }

        let committed = state::commit(&base, &changes);
        self.store.save(&committed)?;
        info!("Pushed changes: {}", changes.summary());

        Ok(changes)
    }

    /// Push pending changes and hand `command` to the remote agent.
    ///
    /// `report` sees the change set before anything is transmitted.
    pub async fn exec<F>(&self, command: &str, report: F) -> Result<ChangeSet, SyncError>
    where
        F: FnOnce(&ChangeSet),
    {
        if command.trim().is_empty() {
            return Err(SyncError::EmptyCommand);
        }

        let pending = self.detect_changes()?;
        report(&pending.changes);
        let changes = self.push(pending).await?;

        self.remote.set_command(command).await?;
        info!("Command set: {}", command);

        Ok(changes)
    }

    /// Ship every tracked file and make the scanned state the new snapshot.
    pub async fn full_sync(&self) -> Result<FileState, SyncError> {
        let current = state::scan(&self.root, &self.scan_options)?;

        let archive = build_archive(&self.root, current.paths())?;
        let encoded = encode_archive(&archive);
        self.remote.upload_files(&encoded).await?;

        self.store.save(&current)?;
        info!("Full sync pushed {} files", current.len());

        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{MockRemoteProject, RemoteError};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn project_with(files: &[&str]) -> (TempDir, ProjectPaths) {
        let dir = TempDir::new().unwrap();
        for f in files {
            fs::write(dir.path().join(f), f).unwrap();
        }
        let paths = ProjectPaths::new(dir.path());
        (dir, paths)
    }

    fn engine(paths: &ProjectPaths, remote: MockRemoteProject) -> SyncEngine<MockRemoteProject> {
        SyncEngine::new(paths, ScanOptions::default(), remote)
    }

    #[tokio::test]
    async fn test_detect_without_snapshot_is_unavailable() {
        let (_dir, paths) = project_with(&["a.txt"]);

        let result = engine(&paths, MockRemoteProject::new()).detect_changes();

        assert!(matches!(result, Err(SyncError::SnapshotUnavailable(_))));
    }

    #[tokio::test]
    async fn test_exec_with_no_changes_only_sets_command() {
        let (_dir, paths) = project_with(&["a.txt"]);
        let baseline = state::scan(&paths.root, &ScanOptions::default()).unwrap();
        paths.snapshot_store().save(&baseline).unwrap();

        let mut remote = MockRemoteProject::new();
        remote.expect_upload_files().never();
        remote
            .expect_set_command()
            .withf(|cmd| cmd == "python train.py")
            .times(1)
            .returning(|_| Ok(()));

        let changes = engine(&paths, remote)
            .exec("python train.py", |_| {})
            .await
            .unwrap();

        assert!(changes.is_empty());
    }

    #[tokio::test]
    async fn test_exec_rejects_blank_command_before_scanning() {
        let (_dir, paths) = project_with(&[]);
        let mut remote = MockRemoteProject::new();
        remote.expect_set_command().never();

        let result = engine(&paths, remote).exec("   ", |_| {}).await;

        assert!(matches!(result, Err(SyncError::EmptyCommand)));
    }

    #[tokio::test]
    async fn test_push_commits_after_accepted_upload() {
        let (dir, paths) = project_with(&["a.txt"]);
        paths.snapshot_store().save(&FileState::new()).unwrap();

        let mut remote = MockRemoteProject::new();
        remote
            .expect_upload_files()
            .times(1)
            .returning(|_| Ok(()));
        let engine = engine(&paths, remote);

        let pending = engine.detect_changes().unwrap();
        let pushed = engine.push(pending).await.unwrap();

        assert_eq!(pushed.added.len(), 1);
        let expected = state::scan(dir.path(), &ScanOptions::default()).unwrap();
        assert_eq!(paths.snapshot_store().load().unwrap(), expected);
        assert!(engine.detect_changes().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_upload_leaves_snapshot_unchanged() {
        let (_dir, paths) = project_with(&["a.txt", "b.txt"]);
        let before: FileState = [("a.txt", 1.0), ("gone.txt", 2.0)].into_iter().collect();
        paths.snapshot_store().save(&before).unwrap();

        let mut remote = MockRemoteProject::new();
        remote
            .expect_upload_files()
            .returning(|_| Err(RemoteError::Rejected("quota exceeded".into())));
        remote.expect_set_command().never();
        let engine = engine(&paths, remote);

        let first = engine.exec("ls", |_| {}).await;
        assert!(matches!(first, Err(SyncError::Remote(RemoteError::Rejected(_)))));
        assert_eq!(paths.snapshot_store().load().unwrap(), before);

        // the next cycle sees the same changes again
        let again = engine.detect_changes().unwrap();
        assert_eq!(again.changes.len(), 3);
    }

    #[tokio::test]
    async fn test_failed_full_sync_leaves_snapshot_unchanged() {
        let (_dir, paths) = project_with(&["a.txt"]);
        let before: FileState = [("old.txt", 5.0)].into_iter().collect();
        paths.snapshot_store().save(&before).unwrap();

        let mut remote = MockRemoteProject::new();
        remote.expect_upload_files().returning(|_| {
            Err(RemoteError::Status {
                endpoint: "/api/v1/project_set_files".into(),
                status: 502,
            })
        });

        let result = engine(&paths, remote).full_sync().await;

        assert!(result.is_err());
        assert_eq!(paths.snapshot_store().load().unwrap(), before);
    }

    #[tokio::test]
    async fn test_full_sync_replaces_snapshot_with_scan() {
        let (_dir, paths) = project_with(&["a.txt", "b.txt"]);
        paths
            .snapshot_store()
            .save(&[("stale.txt", 1.0)].into_iter().collect())
            .unwrap();

        let mut remote = MockRemoteProject::new();
        remote.expect_upload_files().times(1).returning(|_| Ok(()));

        let synced = engine(&paths, remote).full_sync().await.unwrap();

        assert_eq!(synced.paths().collect::<Vec<_>>(), vec!["a.txt", "b.txt"]);
        assert_eq!(paths.snapshot_store().load().unwrap(), synced);
    }

    #[tokio::test]
    async fn test_report_sees_changes_before_upload() {
        let (_dir, paths) = project_with(&["new.py"]);
        paths.snapshot_store().save(&FileState::new()).unwrap();

        let mut remote = MockRemoteProject::new();
        remote
            .expect_upload_files()
            .returning(|_| Err(RemoteError::Rejected("nope".into())));

        let mut reported = None;
        let _ = engine(&paths, remote)
            .exec("python new.py", |c| reported = Some(c.summary()))
            .await;

        assert_eq!(reported.as_deref(), Some("+1 ~0 -0"));
    }
}
