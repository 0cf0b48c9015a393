// ABOUTME: Project tree scanner producing the path -> mtime file state
// Walks the working directory, pruning tooling directories on the denylist

use std::collections::BTreeMap;
use std::path::{Component, Path};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::StateError;

/// Name of the tool's control directory inside a project.
pub const CONTROL_DIR: &str = ".colabond";

/// Name of the per-project config file kept inside the control directory.
pub const PROJECT_CONFIG_FILE: &str = "colabond.toml";

/// Directory names that are never scanned, at any depth.
pub const DEFAULT_DENYLIST: &[&str] = &[
    CONTROL_DIR,
    ".git",
    ".idea",
    ".ipynb_checkpoints",
    ".node_modules",
    ".vscode",
    ".vscode-test",
    "__pycache__",
];

/// Last-known modification time of every tracked file, keyed by relative path.
///
/// Paths are `/`-separated and relative to the project root. Timestamps are
/// seconds since the Unix epoch at full platform precision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileState {
    files: BTreeMap<String, f64>,
}

impl FileState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<f64> {
        self.files.get(path).copied()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Insert or overwrite the timestamp recorded for `path`.
    pub fn upsert(&mut self, path: impl Into<String>, timestamp: f64) {
        self.files.insert(path.into(), timestamp);
    }

    pub fn remove(&mut self, path: &str) -> Option<f64> {
        self.files.remove(path)
    }

    /// Iterate entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.files.iter().map(|(path, ts)| (path.as_str(), *ts))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl<P: Into<String>> FromIterator<(P, f64)> for FileState {
    fn from_iter<I: IntoIterator<Item = (P, f64)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().map(|(p, ts)| (p.into(), ts)).collect(),
        }
    }
}

/// What the scanner leaves out of a walk.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Directory names pruned wherever they appear in the tree
    pub denylist: Vec<String>,
    /// File names skipped wherever they appear in the tree
    pub skip_file_names: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            denylist: DEFAULT_DENYLIST.iter().map(|s| (*s).to_string()).collect(),
            skip_file_names: Vec::new(),
        }
    }
}

impl ScanOptions {
    /// Default denylist extended with project-specific directory names.
    pub fn with_extra_excludes<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = Self::default();
        for name in extra {
            let name = name.into();
            if !options.denylist.contains(&name) {
                options.denylist.push(name);
            }
        }
        options
    }

    /// Options for the initial scan at connect time, which must not pick up
    /// the project config file being written alongside it.
    #[must_use]
    pub fn for_connect(mut self) -> Self {
        self.skip_file_names.push(PROJECT_CONFIG_FILE.to_string());
        self
    }

    fn is_denied_dir(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.denylist.iter().any(|d| d == name))
    }

    fn is_skipped_file(&self, entry: &DirEntry) -> bool {
        entry
            .file_name()
            .to_str()
            .is_some_and(|name| self.skip_file_names.iter().any(|s| s == name))
    }
}

/// Scan `root` recursively and record the mtime of every regular file.
///
/// Entries that disappear mid-walk or cannot be stat'ed are left out; only an
/// unreadable root fails the scan.
pub fn scan(root: &Path, options: &ScanOptions) -> Result<FileState, StateError> {
    std::fs::read_dir(root).map_err(|source| StateError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut state = FileState::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !options.is_denied_dir(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry during scan: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() || options.is_skipped_file(&entry) {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!("File vanished before stat: {}: {}", entry.path().display(), e);
                continue;
            }
        };
        let Ok(modified) = metadata.modified() else {
            debug!("No mtime available for {}", entry.path().display());
            continue;
        };

        // names that are not valid UTF-8 cannot be keyed or archived by name
        let Some(relative) = relative_path(root, entry.path()) else {
            warn!("Skipping path that is not valid UTF-8: {}", entry.path().display());
            continue;
        };

        state.upsert(relative, to_timestamp(modified));
    }

    debug!("Scanned {} files under {}", state.len(), root.display());
    Ok(state)
}

/// Normalize `path` to a `/`-separated path relative to `root`.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<&str> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_str()),
            _ => None,
        })
        .collect::<Option<_>>()?;

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

fn to_timestamp(time: SystemTime) -> f64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs_f64(),
        // pre-epoch mtimes
        Err(e) => -e.duration().as_secs_f64(),
    }
}
