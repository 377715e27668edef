use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use super::{PruneContext, Step, walk};
use crate::utils::dry_run_indicator;

/// Directories in discovery order, without duplicates
#[derive(Debug, Default)]
pub struct DirectorySet {
    ordered: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl DirectorySet {
    /// Returns false if `path` was already recorded.
    pub fn insert(&mut self, path: PathBuf) -> bool {
        if self.seen.contains(&path) {
            return false;
        }
        self.seen.insert(path.clone());
        self.ordered.push(path);
        true
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Last discovered first.
    ///
    /// A pre-order walk discovers children after their parents, so this visits
    /// nested directories before the directories containing them.
    pub fn iter_rev(&self) -> impl Iterator<Item = &Path> {
        self.ordered.iter().rev().map(PathBuf::as_path)
    }
}

impl PruneContext {
    pub fn prune_empty_dirs<P: AsRef<Path>>(&self, root: P) {
        let root = root.as_ref();
        log::debug!("pruning empty directories under {root:?}");
        let directories = self.collect_dirs(root);
        self.statistic.directories.add(directories.len());

        // directories removed in this pass, only consulted in dry-run mode
        let mut removed = HashSet::new();
        for dir in directories.iter_rev() {
            match self.remove_dir(dir, &removed) {
                Step::Removed => {
                    self.statistic.removed_directories.increase();
                    log::info!(
                        "pruned{} {dir:?} (empty dir)",
                        dry_run_indicator(self.dry_run)
                    );
                    if self.dry_run {
                        removed.insert(dir.to_path_buf());
                    }
                }
                Step::Failed => self.statistic.failed.increase(),
                Step::Kept | Step::Skipped => {}
            }
        }
    }

    /// Every directory strictly beneath `root`.
    pub fn collect_dirs(&self, root: &Path) -> DirectorySet {
        let mut directories = DirectorySet::default();
        for result in walk(root) {
            match result {
                Ok(entry) => {
                    if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_dir()) {
                        continue;
                    }
                    directories.insert(entry.into_path());
                }
                Err(e) => {
                    log::warn!("failed to access {e}, skip");
                    self.statistic.inaccessible.increase();
                }
            }
        }
        directories
    }

    fn remove_dir(&self, dir: &Path, removed: &HashSet<PathBuf>) -> Step {
        let result = if self.dry_run {
            dry_run_remove_dir(dir, removed)
        } else {
            fs::remove_dir(dir)
        };
        match result {
            Ok(()) => Step::Removed,
            Err(e) if e.kind() == io::ErrorKind::DirectoryNotEmpty => {
                log::trace!("keep {dir:?}, not empty");
                Step::Kept
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("{dir:?} already removed");
                Step::Kept
            }
            Err(e) => {
                log::warn!("failed to prune empty directory {dir:?}: {e}");
                Step::Failed
            }
        }
    }
}

/// Succeeds if every child of `dir` was removed earlier in this pass.
fn dry_run_remove_dir(dir: &Path, removed: &HashSet<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        if !removed.contains(&entry?.path()) {
            return Err(io::ErrorKind::DirectoryNotEmpty.into());
        }
    }
    Ok(())
}
