use std::{path::Path, time::Duration};

use ignore::{Walk, WalkBuilder};

use crate::{current::Current, statistics::Statistics};

pub mod dirs;
pub mod files;

/// State of one pruning cycle
///
/// Built fresh for every cycle, nothing is carried over between cycles.
#[derive(Debug, Default)]
pub struct PruneContext {
    dry_run: bool,
    current: Current,
    statistic: Statistics,
}

/// Outcome of visiting a single traversal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Removed,
    Kept,
    /// The entry could not be accessed, it is retried next cycle
    Skipped,
    /// Removing the entry failed, it is retried next cycle
    Failed,
}

impl PruneContext {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            current: Current::new(),
            statistic: Statistics::default(),
        }
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn statistic(&self) -> &Statistics {
        &self.statistic
    }

    pub fn finish(self) -> Statistics {
        self.statistic
    }
}

/// Remove every file under `root` last modified more than `max_age` ago.
pub fn prune_old_files<P: AsRef<Path>>(root: P, max_age: Duration) {
    PruneContext::new(false).prune_old_files(root, max_age);
}

/// Remove every empty directory strictly beneath `root`, most nested first.
pub fn prune_empty_dirs<P: AsRef<Path>>(root: P) {
    PruneContext::new(false).prune_empty_dirs(root);
}

/// Sequential depth-first walk in pre-order, without any filtering.
fn walk<P: AsRef<Path>>(root: P) -> Walk {
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false).follow_links(false);
    builder.build()
}
