use std::{fs, path::Path, time::Duration};

use ignore::DirEntry;

use super::{PruneContext, Step, walk};
use crate::utils::{dry_run_indicator, format_duration_short};

impl PruneContext {
    pub fn prune_old_files<P: AsRef<Path>>(&self, root: P, max_age: Duration) {
        let root = root.as_ref();
        log::debug!(
            "pruning files under {root:?} older than {}",
            humantime::format_duration(max_age)
        );
        self.prune_entries(walk(root), max_age);
    }

    fn prune_entries<I>(&self, entries: I, max_age: Duration)
    where
        I: IntoIterator<Item = Result<DirEntry, ignore::Error>>,
    {
        for result in entries {
            let step = match result {
                Ok(entry) => self.prune_file(&entry, max_age),
                Err(e) => {
                    log::warn!("failed to access {e}, skip");
                    Step::Skipped
                }
            };
            match step {
                Step::Removed => self.statistic.removed.increase(),
                Step::Kept => {}
                Step::Skipped => self.statistic.inaccessible.increase(),
                Step::Failed => self.statistic.failed.increase(),
            }
        }
    }

    fn prune_file(&self, entry: &DirEntry, max_age: Duration) -> Step {
        let path = entry.path();
        if entry.file_type().is_some_and(|t| t.is_dir()) {
            return Step::Kept;
        }
        self.statistic.traversed.increase();
        let modified = match entry.metadata().map(|m| m.modified()) {
            Ok(Ok(time)) => time,
            Ok(Err(e)) => {
                log::warn!("failed to get modified time of {path:?}: {e}, skip");
                return Step::Skipped;
            }
            Err(e) => {
                log::warn!("failed to access {e}, skip");
                return Step::Skipped;
            }
        };
        let age = self.current.age_of(modified);
        if age <= max_age {
            log::trace!("keep {path:?} ({} old)", format_duration_short(age));
            return Step::Kept;
        }

        self.statistic.expired.increase();
        if !self.dry_run {
            if let Err(e) = fs::remove_file(path) {
                log::warn!("failed to prune {path:?}: {e}");
                return Step::Failed;
            }
        }
        log::info!(
            "pruned{} {path:?} (last modified {} ago, older than {})",
            dry_run_indicator(self.dry_run),
            format_duration_short(age),
            humantime::format_duration(max_age)
        );
        Step::Removed
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    const HOUR: Duration = Duration::from_secs(60 * 60);

    #[test]
    fn age_equal_to_threshold_is_kept() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("boundary.txt");
        fs::write(&file, b"x").unwrap();
        let modified = fs::metadata(&file).unwrap().modified().unwrap();

        let mut context = PruneContext::new(false);
        context.current.now = modified + HOUR;
        context.prune_old_files(temp.path(), HOUR);
        assert!(file.exists());
        assert_eq!(context.statistic().expired.get(), 0);

        context.current.now = modified + HOUR + Duration::from_secs(1);
        context.prune_old_files(temp.path(), HOUR);
        assert!(!file.exists());
        assert_eq!(context.statistic().removed.get(), 1);
    }

    #[test]
    fn access_error_does_not_stop_following_entries() {
        let temp = tempfile::tempdir().unwrap();
        for name in ["a.txt", "b/c.txt", "d.txt"] {
            let path = temp.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, name).unwrap();
        }
        let mut entries: Vec<_> = walk(temp.path()).collect();
        // a subtree that became unreadable while walking, ahead of its siblings
        let denied = ignore::Error::WithPath {
            path: temp.path().join("locked"),
            err: Box::new(ignore::Error::Io(io::ErrorKind::PermissionDenied.into())),
        };
        entries.insert(1, Err(denied));

        let mut context = PruneContext::new(false);
        context.current.now += HOUR;
        context.prune_entries(entries, Duration::ZERO);

        let statistic = context.finish();
        assert_eq!(statistic.inaccessible.get(), 1);
        assert_eq!(statistic.removed.get(), 3);
        for name in ["a.txt", "b/c.txt", "d.txt"] {
            assert!(!temp.path().join(name).exists(), "{name} should be removed");
        }
    }

    #[test]
    fn entry_vanishing_mid_walk_is_not_counted_as_removed() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("gone.txt");
        fs::write(&file, b"x").unwrap();
        let entries: Vec<_> = walk(temp.path()).collect();
        // removed by someone else between listing and pruning
        fs::remove_file(&file).unwrap();

        let mut context = PruneContext::new(false);
        context.current.now += HOUR;
        context.prune_entries(entries, Duration::ZERO);

        let statistic = context.finish();
        assert_eq!(statistic.failed.get() + statistic.inaccessible.get(), 1);
        assert_eq!(statistic.removed.get(), 0);
    }
}
