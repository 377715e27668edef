use std::time::{Duration, SystemTime};

/// Snapshot of the clock taken once per pruning cycle
///
/// Ages of all entries visited during one cycle are measured against the same
/// instant.
#[derive(Clone, Debug)]
pub struct Current {
    pub now: SystemTime,
}

impl Default for Current {
    fn default() -> Self {
        Self::new()
    }
}

impl Current {
    pub fn new() -> Self {
        Self {
            now: SystemTime::now(),
        }
    }

    /// Time elapsed since `time`, zero if `time` lies in the future.
    pub fn age_of(&self, time: SystemTime) -> Duration {
        self.now
            .duration_since(time)
            .unwrap_or_else(|_| Duration::new(0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn future_times_have_zero_age() {
        let current = Current::new();
        let future = current.now + Duration::from_secs(30);
        assert_eq!(current.age_of(future), Duration::ZERO);
        let past = current.now - Duration::from_secs(30);
        assert_eq!(current.age_of(past), Duration::from_secs(30));
    }
}
