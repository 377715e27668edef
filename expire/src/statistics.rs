use std::sync::atomic::{AtomicUsize, Ordering};

use crate::utils::dry_run_indicator;

#[derive(Debug, Default)]
pub struct Statistics {
    pub traversed: Counter,
    pub expired: Counter,
    pub removed: Counter,
    /// Removals that failed, files and directories
    pub failed: Counter,
    /// Entries the walk could not access
    pub inaccessible: Counter,
    pub directories: Counter,
    pub removed_directories: Counter,
}

impl Statistics {
    pub fn summary(&self, dry_run: bool) -> String {
        let removed = self.removed.get();
        let removed_directories = self.removed_directories.get();
        let indicator = dry_run_indicator(dry_run && (removed != 0 || removed_directories != 0));
        [
            format!("traversed: {}", self.traversed.get()),
            format!("expired: {}", self.expired.get()),
            format!("removed: {removed}"),
            format!("failed: {}", self.failed.get()),
            format!("inaccessible: {}", self.inaccessible.get()),
            format!(
                "empty directories: {removed_directories}/{}",
                self.directories.get()
            ),
        ]
        .join(", ")
            + indicator
    }
}

#[derive(Debug, Default)]
pub struct Counter(AtomicUsize);

impl Counter {
    pub fn increase(&self) {
        self.add(1);
    }

    pub fn add(&self, n: usize) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}
